//! Textures and fonts with known metrics.

use std::sync::Arc;

use paper_render::text::{Bounds, Font, Glyph};
use paper_render::{Texture, TextureId};

/// An RGBA texture handle with the given backend id.
pub fn mock_texture(id: u64, width: u32, height: u32) -> Arc<Texture> {
    Arc::new(
        Texture::from_raw(TextureId(id), width, height, wgpu::TextureFormat::Rgba8Unorm)
            .with_label(format!("mock_texture_{id}")),
    )
}

/// `count` textures with distinct ids starting at `first_id`.
pub fn distinct_textures(first_id: u64, count: usize) -> Vec<Arc<Texture>> {
    (0..count as u64)
        .map(|offset| mock_texture(first_id + offset, 64, 64))
        .collect()
}

/// A font holding only `'A'` with plane bounds `(0, 0, 1, 1)` and atlas
/// bounds `(0, 0, 16, 16)` on a 16x16 atlas.
pub fn single_glyph_font(atlas_id: u64) -> Arc<Font> {
    let glyph = Glyph {
        atlas_bounds: Bounds::new(0.0, 0.0, 16.0, 16.0),
        plane_bounds: Bounds::new(0.0, 0.0, 1.0, 1.0),
        advance: 1.0,
    };
    let font = Font::builder("single_glyph", mock_texture(atlas_id, 16, 16))
        .glyph('A', glyph)
        .build();
    match font {
        Ok(font) => Arc::new(font),
        Err(err) => panic!("fixture font is invalid: {err}"),
    }
}

/// A monospace font covering printable ASCII.
///
/// Every glyph is a unit square advancing by 1; the space glyph is empty.
/// Glyphs sit in 16 px cells of a 160x160 atlas, ten per row.
pub fn monospace_font(atlas_id: u64) -> Arc<Font> {
    const CELL: f32 = 16.0;

    let mut builder = Font::builder("monospace", mock_texture(atlas_id, 160, 160)).line_height(1.25);
    for (index, character) in (' '..='~').enumerate() {
        let column = (index % 10) as f32;
        let row = (index / 10) as f32;
        let plane_bounds = if character == ' ' {
            Bounds::default()
        } else {
            Bounds::new(0.0, 0.0, 1.0, 1.0)
        };
        builder = builder.glyph(
            character,
            Glyph {
                atlas_bounds: Bounds::new(column * CELL, row * CELL, (column + 1.0) * CELL, (row + 1.0) * CELL),
                plane_bounds,
                advance: 1.0,
            },
        );
    }

    match builder.build() {
        Ok(font) => Arc::new(font),
        Err(err) => panic!("fixture font is invalid: {err}"),
    }
}
