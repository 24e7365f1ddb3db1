//! Sketch-wide defaults, loadable from TOML.
//!
//! ```toml
//! circle_segments = 32
//! sphere_subdivisions = 2
//! vertex_capacity = 4096
//! line_width = 2.0
//! default_color = [1.0, 0.5, 0.0, 1.0]
//! attributes = ["position0", "color0"]
//! ```
//!
//! Every field is optional; missing fields take the [`Default`] value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Vertex channel names accepted in `attributes`, in canonical order.
pub const CHANNEL_NAMES: [&str; 7] = [
    "position0",
    "normal0",
    "color0",
    "uv0",
    "uv1",
    "uv2",
    "uv3",
];

/// Position of `name` in [`CHANNEL_NAMES`]. Surrounding whitespace and
/// ASCII case are ignored.
pub fn channel_index(name: &str) -> Option<usize> {
    let name = name.trim();
    CHANNEL_NAMES
        .iter()
        .position(|n| n.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("could not parse sketch config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("circle_segments must be at least 3, got {0}")]
    TooFewSegments(u32),
    #[error("vertex_capacity must be greater than zero")]
    ZeroCapacity,
    #[error("unknown vertex attribute `{0}`")]
    UnknownAttribute(String),
    #[error("attributes must include `position0`")]
    MissingPosition,
}

/// Defaults applied to every geometry a frame hands out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Segment count for circles and ellipses.
    pub circle_segments: u32,
    /// Icosphere subdivision level (clamped to 1..=6 at use).
    pub sphere_subdivisions: u32,
    /// Vertex capacity of the per-frame buffer, in vertices.
    pub vertex_capacity: usize,
    /// Width given to the first point of every new line.
    pub line_width: f32,
    pub default_color: [f32; 4],
    pub default_normal: [f32; 3],
    /// Channel names present in the vertex schema.
    pub attributes: Vec<String>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            circle_segments: 24,
            sphere_subdivisions: 3,
            vertex_capacity: 65_536,
            line_width: 1.0,
            default_color: [1.0, 1.0, 1.0, 1.0],
            default_normal: [0.0, 0.0, 1.0],
            attributes: ["position0", "normal0", "color0", "uv0"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SketchConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        log::debug!("sketch config loaded: {config:?}");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.circle_segments < 3 {
            return Err(ConfigError::TooFewSegments(self.circle_segments));
        }
        if self.vertex_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let mut has_position = false;
        for name in &self.attributes {
            match channel_index(name) {
                Some(index) => has_position |= index == 0,
                None => return Err(ConfigError::UnknownAttribute(name.clone())),
            }
        }
        if !has_position {
            return Err(ConfigError::MissingPosition);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(SketchConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() -> anyhow::Result<()> {
        let cfg = SketchConfig::from_toml_str("circle_segments = 32\nline_width = 2.5\n")?;
        assert_eq!(cfg.circle_segments, 32);
        assert_eq!(cfg.line_width, 2.5);
        assert_eq!(cfg.vertex_capacity, 65_536);
        assert_eq!(cfg.attributes.len(), 4);
        Ok(())
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            SketchConfig::from_toml_str("circle_segments = 2"),
            Err(ConfigError::TooFewSegments(2))
        ));
        assert!(matches!(
            SketchConfig::from_toml_str("vertex_capacity = 0"),
            Err(ConfigError::ZeroCapacity)
        ));
        assert!(matches!(
            SketchConfig::from_toml_str("attributes = [\"position0\", \"tangent\"]"),
            Err(ConfigError::UnknownAttribute(name)) if name == "tangent"
        ));
        assert!(matches!(
            SketchConfig::from_toml_str("attributes = [\"color0\"]"),
            Err(ConfigError::MissingPosition)
        ));
        assert!(matches!(
            SketchConfig::from_toml_str("circle_segments = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn attribute_names_ignore_case() -> anyhow::Result<()> {
        let cfg = SketchConfig::from_toml_str("attributes = [\"UV0\", \" Position0 \"]")?;
        assert_eq!(cfg.attributes, vec!["UV0", " Position0 "]);
        assert_eq!(channel_index("COLOR0"), Some(2));
        assert_eq!(channel_index("end"), None);
        Ok(())
    }
}
