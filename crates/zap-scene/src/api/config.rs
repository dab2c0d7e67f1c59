use std::borrow::Cow;
use serde::Deserialize;
use crate::components::text::TextStyle;

/// Style of the debug marker drawn by [`Entity::set_debug_point`](crate::Entity::set_debug_point).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DebugMarker {
    /// Circle radius in local units.
    pub radius: f32,
    pub fill: Cow<'static, str>,
    pub stroke: Cow<'static, str>,
}

pub static DEFAULT_DEBUG_MARKER: DebugMarker = DebugMarker {
    radius: 5.0,
    fill: Cow::Borrowed("rgb(255, 0,0)"),
    stroke: Cow::Borrowed("rgb(128,128,128)"),
};

impl Default for DebugMarker {
    fn default() -> Self {
        DEFAULT_DEBUG_MARKER.clone()
    }
}

/// Stage configuration. Every field has a default, so a partial (or empty)
/// JSON document is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Fallback surface width when the surface reports no size.
    pub width: f32,
    /// Fallback surface height when the surface reports no size.
    pub height: f32,
    /// Log level for the web console logger ("error" .. "trace").
    pub log_level: String,
    pub debug_marker: DebugMarker,
    /// Defaults for text blocks created through the stage.
    pub text: TextStyle,
    /// Default normalized origin for image sprites created through the stage.
    pub image_origin: [f32; 2],
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            log_level: "info".to_owned(),
            debug_marker: DebugMarker::default(),
            text: TextStyle::default(),
            image_origin: [0.5, 0.5],
        }
    }
}

impl StageConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parsed log level; unknown names fall back to `Info`.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::traits::TextAlign;

    #[test]
    fn empty_json_is_default() {
        let config = StageConfig::from_json("{}").unwrap();
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.debug_marker, DEFAULT_DEBUG_MARKER);
        assert_eq!(config.text.font_size, 20.0);
        assert_eq!(config.image_origin, [0.5, 0.5]);
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn partial_overrides() {
        let json = r#"{
            "width": 1024,
            "log_level": "debug",
            "debug_marker": { "radius": 3 },
            "text": { "font_family": "Helvetica", "align": "right" },
            "image_origin": [0, 1]
        }"#;
        let config = StageConfig::from_json(json).unwrap();
        assert_eq!(config.width, 1024.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.log_level(), log::Level::Debug);
        assert_eq!(config.debug_marker.radius, 3.0);
        assert_eq!(config.debug_marker.fill, "rgb(255, 0,0)");
        assert_eq!(config.text.font_family, "Helvetica");
        assert_eq!(config.text.font_size, 20.0);
        assert_eq!(config.text.align, TextAlign::Right);
        assert_eq!(config.image_origin, [0.0, 1.0]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(StageConfig::from_json("{ width: }").is_err());
        assert!(StageConfig::from_json(r#"{ "width": "wide" }"#).is_err());
    }

    #[test]
    fn unknown_log_level_falls_back() {
        let config = StageConfig {
            log_level: "chatty".to_owned(),
            ..Default::default()
        };
        assert_eq!(config.log_level(), log::Level::Info);
    }
}
