//! Block catalogue, palette overrides and subtype naming.
#![forbid(unsafe_code)]

pub mod flags;
pub mod ids;
pub mod names;
pub mod palette;
pub mod table;

pub use flags::BlockFlags;
pub use ids::{BlockId, fold_high_bit};
pub use names::subtype_name;
pub use palette::PaletteConfig;
pub use table::{BlockDef, BlockTable, PaletteError, premultiply};
