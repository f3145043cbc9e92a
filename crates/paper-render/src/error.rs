/// Errors raised while constructing render resources.
///
/// Nothing on the per-frame draw path returns these: capacity exhaustion is
/// handled by flushing and missing glyphs truncate the string silently.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A [`Renderer2DConfig`](crate::Renderer2DConfig) field is out of range.
    InvalidConfig(String),

    /// A font atlas has a zero dimension, so texture coordinates cannot be normalized.
    InvalidAtlas { width: u32, height: u32 },

    /// A sprite sheet cell does not fit its texture.
    InvalidSpriteSheet(String),

    /// The requested sprite lies outside the sheet grid.
    SpriteOutOfBounds {
        column: u32,
        row: u32,
        columns: u32,
        rows: u32,
    },
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::InvalidConfig(msg) => write!(f, "Invalid renderer configuration: {}", msg),
            RenderError::InvalidAtlas { width, height } => {
                write!(f, "Invalid font atlas size {}x{}", width, height)
            }
            RenderError::InvalidSpriteSheet(msg) => write!(f, "Invalid sprite sheet: {}", msg),
            RenderError::SpriteOutOfBounds {
                column,
                row,
                columns,
                rows,
            } => write!(
                f,
                "Sprite ({}, {}) is outside the {}x{} sheet",
                column, row, columns, rows
            ),
        }
    }
}

impl std::error::Error for RenderError {}

/// Result type for render resource construction.
pub type RenderResult<T> = Result<T, RenderError>;
