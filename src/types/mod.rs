//! Core value types shared by the sheet and editor modules:
//! - `Colour` - RGBA colour values with hex parsing
//! - `Rgb` - opaque cell colours for the pixel grid
//! - `Background` - sheet fill for composition

mod colour;

pub use colour::{Colour, Rgb};

/// Fill used behind composed sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    /// Fully transparent (0, 0, 0, 0).
    #[default]
    Transparent,
    /// Opaque solid colour; any alpha in the source colour is ignored.
    Solid(Colour),
}

impl Background {
    /// Build a background from an optional hex colour.
    pub fn from_hex(hex: Option<&str>) -> crate::error::Result<Self> {
        match hex {
            Some(hex) => Ok(Self::Solid(Colour::from_hex(hex)?)),
            None => Ok(Self::Transparent),
        }
    }

    /// RGBA fill value.
    pub fn to_rgba(self) -> [u8; 4] {
        match self {
            Background::Transparent => Colour::TRANSPARENT.to_rgba(),
            Background::Solid(c) => c.opaque().to_rgba(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_transparent() {
        assert_eq!(Background::Transparent.to_rgba(), [0, 0, 0, 0]);
        assert_eq!(Background::from_hex(None).unwrap(), Background::Transparent);
    }

    #[test]
    fn test_background_solid_is_opaque() {
        let bg = Background::from_hex(Some("#336699")).unwrap();
        assert_eq!(bg.to_rgba(), [0x33, 0x66, 0x99, 255]);

        let bg = Background::Solid(Colour::new(1, 2, 3, 4));
        assert_eq!(bg.to_rgba(), [1, 2, 3, 255]);
    }

    #[test]
    fn test_background_bad_hex() {
        assert!(Background::from_hex(Some("#nothex")).is_err());
    }
}
