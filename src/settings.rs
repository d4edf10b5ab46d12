use json::JsonValue;

use crate::{curve::{DEFAULT_STEP, MIN_STEP}, interaction::DEFAULT_DELETE_THRESHOLD, points::DEFAULT_SELECT_RADIUS};

pub const STORAGE_KEY: &str = "settings_json";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub select_radius: f64,
    pub delete_threshold: f64,
    pub curve_step: f64,
    pub curve_width: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            select_radius: DEFAULT_SELECT_RADIUS,
            delete_threshold: DEFAULT_DELETE_THRESHOLD,
            curve_step: DEFAULT_STEP,
            curve_width: 1.0,
        }
    }
}

impl Settings {
    pub fn sanitized(&self) -> Self {
        let defaults = Settings::default();
        let finite_or = |value: f64, fallback: f64| if value.is_finite() { value } else { fallback };
        let step = finite_or(self.curve_step, defaults.curve_step);
        Self {
            select_radius: finite_or(self.select_radius, defaults.select_radius).max(1.0),
            delete_threshold: finite_or(self.delete_threshold, defaults.delete_threshold).max(0.0),
            curve_step: if step > 0.0 { step.clamp(MIN_STEP, 1.0) } else { defaults.curve_step },
            curve_width: finite_or(self.curve_width, defaults.curve_width).max(0.5),
        }
    }

    /// Missing fields keep their defaults.
    pub fn load(raw: &str) -> Result<Settings, json::Error> {
        let root = json::parse(raw)?;
        let defaults = Settings::default();
        let field = |name: &str, fallback: f64| root[name].as_f64().unwrap_or(fallback);
        let settings = Settings {
            select_radius: field("select_radius", defaults.select_radius),
            delete_threshold: field("delete_threshold", defaults.delete_threshold),
            curve_step: field("curve_step", defaults.curve_step),
            curve_width: field("curve_width", defaults.curve_width),
        };
        Ok(settings.sanitized())
    }

    pub fn save(&self) -> String {
        let root: JsonValue = json::object! {
            select_radius: self.select_radius,
            delete_threshold: self.delete_threshold,
            curve_step: self.curve_step,
            curve_width: self.curve_width,
        };
        root.dump()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_settings_load_back() {
        let settings = Settings { select_radius: 8.0, delete_threshold: 3.0, curve_step: 0.25, curve_width: 2.0 };
        assert_eq!(Settings::load(&settings.save()).unwrap(), settings);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings = Settings::load(r#"{"select_radius": 6}"#).unwrap();
        assert_eq!(settings.select_radius, 6.0);
        assert_eq!(settings.delete_threshold, DEFAULT_DELETE_THRESHOLD);
        assert_eq!(settings.curve_step, DEFAULT_STEP);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(Settings::load("{not json").is_err());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let settings = Settings::load(r#"{"select_radius": 0, "delete_threshold": -4, "curve_step": 0, "curve_width": 0.1}"#).unwrap();
        assert_eq!(settings.select_radius, 1.0);
        assert_eq!(settings.delete_threshold, 0.0);
        assert_eq!(settings.curve_step, DEFAULT_STEP);
        assert_eq!(settings.curve_width, 0.5);

        let settings = Settings { curve_step: 4.0, ..Settings::default() }.sanitized();
        assert_eq!(settings.curve_step, 1.0);
    }

    #[test]
    fn tiny_stored_step_is_raised_to_minimum() {
        let settings = Settings::load(r#"{"curve_step": 1e-300}"#).unwrap();
        assert_eq!(settings.curve_step, MIN_STEP);
    }
}
