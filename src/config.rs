use std::{io, path::Path, str::FromStr};

use ini::Ini;
use thiserror::Error;

use crate::curve::CurveConfig;

#[derive(Error, Debug)]
pub enum ConfigParseError {
    #[error("parsing .ini file: `{0}`")]
    ParseError(#[from] ini::Error),
    #[error("reading config: `{0}`")]
    Io(#[from] io::Error),
    #[error("invalid value for `{key}`: `{value}`")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// How far ahead objects get activated
    pub horizon_ms: f64,
    /// How long objects stay around after they stopped being relevant
    pub despawn_margin_ms: f64,
    /// Approach circle scale at the start of the approach, on top of 1.0
    pub approach_scale: f64,
    pub curve: CurveConfig,
    pub autoplay: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            horizon_ms: 10000.0,
            despawn_margin_ms: 2000.0,
            approach_scale: 3.0,
            curve: CurveConfig::default(),
            autoplay: false,
        }
    }
}

fn read_value<T: FromStr>(
    ini: &Ini,
    section: &str,
    key: &str,
    out: &mut T,
) -> Result<(), ConfigParseError> {
    let Some(value) = ini.get_from(Some(section), key) else {
        return Ok(());
    };

    *out = value.trim().parse().map_err(|_| ConfigParseError::InvalidValue {
        key: key.to_owned(),
        value: value.to_owned(),
    })?;

    Ok(())
}

impl Config {
    /// Missing keys keep their defaults
    pub fn parse(bytes: &[u8]) -> Result<Self, ConfigParseError> {
        let ini = Ini::read_from(&mut io::Cursor::new(bytes))?;
        let mut config = Self::default();

        read_value(&ini, "Playback", "HorizonMs", &mut config.horizon_ms)?;
        read_value(&ini, "Playback", "DespawnMarginMs", &mut config.despawn_margin_ms)?;
        read_value(&ini, "Playback", "ApproachScale", &mut config.approach_scale)?;
        read_value(&ini, "Playback", "Autoplay", &mut config.autoplay)?;

        read_value(&ini, "Curves", "BezierResolution", &mut config.curve.bezier_resolution)?;
        read_value(&ini, "Curves", "CatmullResolution", &mut config.curve.catmull_resolution)?;
        read_value(&ini, "Curves", "ArcPointSeparation", &mut config.curve.arc_point_separation)?;

        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigParseError> {
        let bytes = std::fs::read(path)?;
        Self::parse(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_on_empty() {
        let config = Config::parse(b"").unwrap();

        assert_eq!(config.horizon_ms, 10000.0);
        assert_eq!(config.despawn_margin_ms, 2000.0);
        assert_eq!(config.curve.bezier_resolution, 50);
        assert!(!config.autoplay);
    }

    #[test]
    fn test_parse_sections() {
        let config = Config::parse(
            b"[Playback]\nHorizonMs = 5000\nAutoplay = true\n\n[Curves]\nBezierResolution = 20\n",
        )
        .unwrap();

        assert_eq!(config.horizon_ms, 5000.0);
        assert!(config.autoplay);
        assert_eq!(config.curve.bezier_resolution, 20);
        assert_eq!(config.curve.catmull_resolution, 50);
    }

    #[test]
    fn test_invalid_value() {
        let err = Config::parse(b"[Playback]\nHorizonMs = soon\n").unwrap_err();

        assert!(matches!(err, ConfigParseError::InvalidValue { .. }));
    }
}
