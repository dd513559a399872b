use std::fmt;

use voxmap_blocks::PaletteError;

#[derive(Clone, Debug, PartialEq)]
pub enum MapError {
    /// Zoom must be finite and positive.
    InvalidZoom(f64),
    /// Byte-exact drawing only replicates whole pixels.
    InvalidExactZoom(u32),
    EmptyImage,
    Palette(PaletteError),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::InvalidZoom(z) => write!(f, "invalid zoom factor {z}"),
            MapError::InvalidExactZoom(z) => write!(f, "exact zoom must be at least 1, got {z}"),
            MapError::EmptyImage => write!(f, "output image has no pixels"),
            MapError::Palette(e) => write!(f, "palette: {e}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Palette(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PaletteError> for MapError {
    fn from(e: PaletteError) -> Self {
        MapError::Palette(e)
    }
}
