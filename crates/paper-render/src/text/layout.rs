//! Glyph layout: turns a string into atlas-textured quads centered on the
//! text origin.

use glam::Vec2;
use paper_core::profiling::profile_function;

use super::font::Font;

/// Scale from font units to layout units.
pub const FONT_SCALE: f32 = 1.0;

/// Glyph substituted for characters the font lacks.
pub const FALLBACK_GLYPH: char = '?';

/// One laid-out glyph.
///
/// Corner order is bottom-left, top-left, top-right, bottom-right, which
/// matches the quad index pattern `0,1,2,2,3,0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    pub positions: [Vec2; 4],
    pub tex_coords: [Vec2; 4],
}

/// The quads of a laid-out string, already shifted by the centering offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    quads: Vec<GlyphQuad>,
    offset: Vec2,
    truncated: bool,
}

impl TextLayout {
    pub fn quads(&self) -> &[GlyphQuad] {
        &self.quads
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// The offset that was subtracted from every corner.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// True if layout stopped early because neither a glyph nor the
    /// fallback glyph existed in the font.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// Extremes of the emitted quads. Both horizontal extremes start at the pen
/// origin, so a block that never reaches left of `x = 0` keeps `min_x == 0`.
#[derive(Debug, Default)]
struct Extents {
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
}

impl Extents {
    fn include(&mut self, min: Vec2, max: Vec2) {
        self.max_y = self.max_y.max(max.y);
        self.min_y = self.min_y.min(min.y);
        self.min_x = self.min_x.min(min.x);
        self.max_x = self.max_x.max(max.x);
    }

    /// Horizontal term is half the width, not the midpoint: it only centers
    /// blocks whose leftmost quad starts at or right of the origin.
    fn centering_offset(&self) -> Vec2 {
        Vec2::new(
            (self.max_x - self.min_x) / 2.0,
            (self.max_y - self.min_y) / 2.0 + self.min_y,
        )
    }
}

/// Lay out `text` with `font`.
///
/// - `\r` is skipped.
/// - `\n` returns the pen to `x = 0` and moves it down one line height.
/// - `\t` uses the space glyph.
/// - Missing glyphs use [`FALLBACK_GLYPH`]; if that is missing too, layout
///   stops and the string is truncated at that character.
pub fn layout_text(text: &str, font: &Font) -> TextLayout {
    profile_function!();

    let atlas = font.atlas();
    let texel = Vec2::new(1.0 / atlas.width() as f32, 1.0 / atlas.height() as f32);
    let line_height = font.metrics().line_height;

    let mut quads = Vec::with_capacity(text.len());
    let mut extents = Extents::default();
    let mut truncated = false;
    let mut pen = Vec2::ZERO;

    let mut chars = text.chars().peekable();
    while let Some(character) = chars.next() {
        match character {
            '\r' => continue,
            '\n' => {
                pen.x = 0.0;
                pen.y -= FONT_SCALE * line_height;
                continue;
            }
            _ => {}
        }

        let lookup = if character == '\t' { ' ' } else { character };
        let Some(glyph) = font.glyph(lookup).or_else(|| font.glyph(FALLBACK_GLYPH)) else {
            tracing::warn!(
                "Font '{}' has neither {:?} nor the fallback glyph; truncating text",
                font.name(),
                character
            );
            truncated = true;
            break;
        };

        let atlas_min = Vec2::new(glyph.atlas_bounds.left, glyph.atlas_bounds.bottom) * texel;
        let atlas_max = Vec2::new(glyph.atlas_bounds.right, glyph.atlas_bounds.top) * texel;

        let quad_min = Vec2::new(glyph.plane_bounds.left, glyph.plane_bounds.bottom) * FONT_SCALE + pen;
        let quad_max = Vec2::new(glyph.plane_bounds.right, glyph.plane_bounds.top) * FONT_SCALE + pen;

        quads.push(GlyphQuad {
            positions: [
                quad_min,
                Vec2::new(quad_min.x, quad_max.y),
                quad_max,
                Vec2::new(quad_max.x, quad_min.y),
            ],
            tex_coords: [
                atlas_min,
                Vec2::new(atlas_min.x, atlas_max.y),
                atlas_max,
                Vec2::new(atlas_max.x, atlas_min.y),
            ],
        });
        extents.include(quad_min, quad_max);

        if let Some(&next) = chars.peek() {
            let advance = glyph.advance + font.kerning(character, next);
            pen.x += FONT_SCALE * advance;
        }
    }

    let offset = extents.centering_offset();
    for quad in &mut quads {
        for position in &mut quad.positions {
            *position -= offset;
        }
    }

    TextLayout {
        quads,
        offset,
        truncated,
    }
}
