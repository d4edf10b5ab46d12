#![warn(clippy::all, rust_2018_idioms)]

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    log::info!("bezierlab v{} starting", env!("CARGO_PKG_VERSION"));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 480.0])
            .with_min_inner_size([320.0, 240.0])
            .with_title("Bezier"),
        ..Default::default()
    };
    eframe::run_native(
        "bezierlab",
        native_options,
        Box::new(|cc| Ok(Box::new(bezierlab::BezierLab::new(cc)))),
    )
}
