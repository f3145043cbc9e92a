use std::sync::Arc;

use paper_core::alloc::HashMap;

use crate::error::{RenderError, RenderResult};
use crate::resource::Texture;

/// An axis-aligned box given by its four edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Bounds {
    pub const fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }
}

/// Geometry of one glyph in an MSDF-style atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Glyph rectangle inside the atlas, in atlas pixels.
    pub atlas_bounds: Bounds,
    /// Quad relative to the pen position, in font units.
    pub plane_bounds: Bounds,
    /// Horizontal pen advance in font units.
    pub advance: f32,
}

/// Vertical font metrics in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub line_height: f32,
    pub ascender_y: f32,
    pub descender_y: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            line_height: 1.0,
            ascender_y: 1.0,
            descender_y: 0.0,
        }
    }
}

/// Read-only glyph metrics plus the atlas texture they index into.
///
/// Fonts are produced by an asset loader outside the render core and shared
/// as `Arc<Font>`.
#[derive(Debug)]
pub struct Font {
    name: String,
    atlas: Arc<Texture>,
    metrics: FontMetrics,
    glyphs: HashMap<char, Glyph>,
    kerning: HashMap<(char, char), f32>,
}

impl Font {
    pub fn builder(name: impl Into<String>, atlas: Arc<Texture>) -> FontBuilder {
        FontBuilder {
            name: name.into(),
            atlas,
            metrics: FontMetrics::default(),
            glyphs: HashMap::new(),
            kerning: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn atlas(&self) -> &Arc<Texture> {
        &self.atlas
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn glyph(&self, character: char) -> Option<&Glyph> {
        self.glyphs.get(&character)
    }

    /// Pairwise kerning adjustment added to the advance of `current` when followed by `next`.
    pub fn kerning(&self, current: char, next: char) -> f32 {
        self.kerning.get(&(current, next)).copied().unwrap_or(0.0)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

pub struct FontBuilder {
    name: String,
    atlas: Arc<Texture>,
    metrics: FontMetrics,
    glyphs: HashMap<char, Glyph>,
    kerning: HashMap<(char, char), f32>,
}

impl FontBuilder {
    pub fn metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.metrics.line_height = line_height;
        self
    }

    pub fn glyph(mut self, character: char, glyph: Glyph) -> Self {
        self.glyphs.insert(character, glyph);
        self
    }

    pub fn kerning(mut self, current: char, next: char, adjustment: f32) -> Self {
        self.kerning.insert((current, next), adjustment);
        self
    }

    pub fn build(self) -> RenderResult<Font> {
        let (width, height) = (self.atlas.width(), self.atlas.height());
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidAtlas { width, height });
        }

        Ok(Font {
            name: self.name,
            atlas: self.atlas,
            metrics: self.metrics,
            glyphs: self.glyphs,
            kerning: self.kerning,
        })
    }
}
