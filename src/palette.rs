use std::{io, path::Path};

use ini::Ini;
use thiserror::Error;

use crate::rgb::Rgb;

const COMBO_KEYS: [&str; 8] = [
    "Combo1", "Combo2", "Combo3", "Combo4", "Combo5", "Combo6", "Combo7", "Combo8",
];

#[derive(Error, Debug)]
pub enum PaletteParseError {
    #[error("parsing .ini file: `{0}`")]
    ParseError(#[from] ini::Error),
    #[error("reading palette: `{0}`")]
    Io(#[from] io::Error),
    #[error("couldn't parse colour `{key}`: `{value}`")]
    InvalidColour { key: String, value: String },
}

/// Combo colours, indexed by `combo_index % len`
#[derive(Debug, Clone, PartialEq)]
pub struct ComboPalette {
    colors: Vec<Rgb>,
}

impl ComboPalette {
    /// Empty palettes fall back to white
    pub fn new(colors: Vec<Rgb>) -> Self {
        if colors.is_empty() {
            return Self::default();
        }

        Self { colors }
    }

    /// Reads `Combo1..Combo8` from the `[Colours]` section,
    /// `None` when there are no combo colours at all
    pub fn parse(bytes: &[u8]) -> Result<Option<Self>, PaletteParseError> {
        let ini = Ini::read_from(&mut io::Cursor::new(bytes))?;

        let mut colors = Vec::new();

        for key in COMBO_KEYS {
            let Some(value) = ini.get_from(Some("Colours"), key) else {
                continue;
            };

            let color = Rgb::parse(value).ok_or_else(|| PaletteParseError::InvalidColour {
                key: key.to_owned(),
                value: value.to_owned(),
            })?;

            colors.push(color);
        }

        if colors.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self::new(colors)))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Option<Self>, PaletteParseError> {
        let bytes = std::fs::read(path)?;
        Self::parse(&bytes)
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color(&self, combo_index: usize) -> Rgb {
        self.colors[combo_index % self.colors.len()]
    }
}

impl Default for ComboPalette {
    fn default() -> Self {
        Self {
            colors: vec![Rgb::new(255, 255, 255)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_palette() {
        let ini = b"[General]\nName = test\n\n[Colours]\nCombo1 = 255, 0, 0\nCombo2 = 0,255,0 // green\nCombo4 = 0, 0, 255\n";
        let palette = ComboPalette::parse(ini).unwrap().unwrap();

        assert_eq!(palette.len(), 3);
        assert_eq!(palette.color(0), Rgb::new(255, 0, 0));
        assert_eq!(palette.color(1), Rgb::new(0, 255, 0));
        assert_eq!(palette.color(2), Rgb::new(0, 0, 255));
        assert_eq!(palette.color(3), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_missing_section() {
        assert_eq!(ComboPalette::parse(b"[General]\nName = test\n").unwrap(), None);
    }

    #[test]
    fn test_empty_palette_is_white() {
        let palette = ComboPalette::new(Vec::new());

        assert_eq!(palette, ComboPalette::default());
        assert_eq!(palette.color(7), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_invalid_colour() {
        let err = ComboPalette::parse(b"[Colours]\nCombo1 = red\n").unwrap_err();

        assert!(matches!(err, PaletteParseError::InvalidColour { .. }));
    }

    #[test]
    fn test_from_path() {
        let dir = testdir::testdir!();
        let path = dir.join("skin.ini");
        std::fs::write(&path, "[Colours]\nCombo1 = 1, 2, 3\n").unwrap();

        let palette = ComboPalette::from_path(&path).unwrap().unwrap();

        assert_eq!(palette.colors(), &[Rgb::new(1, 2, 3)]);
    }
}
