use std::num::NonZeroU8;

use serde::{Deserialize, Serialize};

/// Opaque color index of a piece or a settled cell.
///
/// Colors are small integers in `1..=7`, one per canonical shape by default.
/// The engine only stores and copies them; the mapping to actual colors is a
/// fixed legend owned by the renderer:
///
/// | index | default shape | legend  |
/// |-------|---------------|---------|
/// | 1     | I             | cyan    |
/// | 2     | O             | yellow  |
/// | 3     | T             | magenta |
/// | 4     | L             | blue    |
/// | 5     | J             | white   |
/// | 6     | S             | green   |
/// | 7     | Z             | red     |
///
/// `0` is reserved for "no color" in the board's color matrix and is therefore
/// not a valid `Color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Color(NonZeroU8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("color index must be in 1..={}, got {value}", Color::MAX)]
pub struct ColorError {
    pub value: u8,
}

impl Color {
    /// Largest valid color index.
    pub const MAX: u8 = 7;

    /// Creates a color from its index, rejecting `0` and values above [`Color::MAX`].
    pub const fn new(value: u8) -> Result<Self, ColorError> {
        if value > Self::MAX {
            return Err(ColorError { value });
        }
        match NonZeroU8::new(value) {
            Some(value) => Ok(Self(value)),
            None => Err(ColorError { value }),
        }
    }

    /// Returns the raw color index (`1..=7`).
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Color {
    type Error = ColorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> Self {
        color.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_range() {
        assert!(Color::new(0).is_err());
        assert_eq!(Color::new(1).unwrap().get(), 1);
        assert_eq!(Color::new(7).unwrap().get(), 7);
        assert_eq!(Color::new(8), Err(ColorError { value: 8 }));
    }

    #[test]
    fn test_color_serde() {
        let color: Color = serde_json::from_str("3").unwrap();
        assert_eq!(color.get(), 3);
        assert_eq!(serde_json::to_string(&color).unwrap(), "3");
        assert!(serde_json::from_str::<Color>("0").is_err());
    }
}
