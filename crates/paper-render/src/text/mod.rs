//! Font metrics and glyph layout for the 2D text batch.

mod font;
mod layout;

pub use font::*;
pub use layout::*;
