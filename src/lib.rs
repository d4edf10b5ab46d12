#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub use app::BezierLab;

pub mod curve;
pub mod interaction;
pub mod points;
pub mod render;
pub mod settings;
