//! Integration tests for the batched 2D renderer.
//!
//! Every test drives a real `Renderer2D` against the recording mock backend
//! and asserts on the calls it issued and the stats it kept.

use std::sync::Arc;

use glam::{Vec2, Vec3};
use paper_render::renderer2d::{EdgeVertex, TextVertex, NO_TEXTURE};
use paper_render::*;
use paper_test_utils::{
    distinct_textures, mock_texture, monospace_font, single_glyph_font, MockRenderBackend, RenderCall,
};

// ============================================================================
// Helpers
// ============================================================================

fn init_logging() {
    // Several tests share the global subscriber.
    let _ = paper_core::logging::try_init_with_filter("paper_render=warn");
}

fn setup() -> (Arc<MockRenderBackend>, Renderer2D) {
    init_logging();
    let backend = Arc::new(MockRenderBackend::new());
    let mut renderer = Renderer2D::new(backend.clone());
    renderer.begin_render(&Camera::new(800.0, 600.0));
    renderer.clear_stats();
    (backend, renderer)
}

fn setup_with(config: Renderer2DConfig) -> (Arc<MockRenderBackend>, Renderer2D) {
    init_logging();
    let backend = Arc::new(MockRenderBackend::new());
    let mut renderer = Renderer2D::with_config(backend.clone(), config).unwrap();
    renderer.begin_render(&Camera::new(800.0, 600.0));
    renderer.clear_stats();
    (backend, renderer)
}

fn quad() -> EdgeRenderData {
    EdgeRenderData::new(Transform::default(), Color::WHITE)
}

fn textured_quad(texture: &Arc<Texture>) -> EdgeRenderData {
    quad().with_texture(Arc::clone(texture))
}

fn line(thickness: f32) -> LineRenderData {
    LineRenderData::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), Color::GREEN).with_thickness(thickness)
}

fn assert_close(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).length() < 1e-5,
        "expected {expected:?}, got {actual:?}"
    );
}

// ============================================================================
// Counting
// ============================================================================

#[test]
fn test_index_and_vertex_counts_per_kind() {
    let (backend, mut renderer) = setup();

    for _ in 0..3 {
        renderer.draw_rectangle(&quad());
    }
    for _ in 0..2 {
        renderer.draw_triangle(&quad());
    }
    for _ in 0..4 {
        renderer.draw_circle(&CircleRenderData::new(Transform::default(), Color::RED));
    }
    renderer.end_render();

    assert_eq!(backend.draw_counts("rectangles"), vec![18]);
    assert_eq!(backend.draw_counts("triangles"), vec![6]);
    assert_eq!(backend.draw_counts("circles"), vec![24]);

    let stats = renderer.stats();
    assert_eq!(stats.object_count, 9);
    assert_eq!(stats.vertex_count, 3 * 4 + 2 * 3 + 4 * 4);
    assert_eq!(stats.element_count, 18 + 6 + 24);
    assert_eq!(stats.draw_calls, 3);
}

#[test]
fn test_clear_stats_then_one_rectangle() {
    let (_backend, mut renderer) = setup();

    renderer.draw_rectangle(&quad());
    assert_eq!(
        renderer.stats(),
        RenderStats {
            draw_calls: 0,
            object_count: 1,
            data_size: 0,
            vertex_count: 4,
            element_count: 6,
        }
    );

    renderer.end_render();
    let stats = renderer.stats();
    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.data_size as usize, 4 * std::mem::size_of::<EdgeVertex>());
}

#[test]
fn test_empty_render_changes_nothing() {
    let (backend, mut renderer) = setup();
    backend.clear_calls();

    renderer.render(RenderTarget2D::All);
    renderer.end_render();

    assert_eq!(backend.call_count(), 0);
    assert_eq!(renderer.stats(), RenderStats::default());
}

// ============================================================================
// Capacity
// ============================================================================

#[test]
fn test_element_overflow_flushes_exactly_once() {
    let (backend, mut renderer) = setup();
    let per_batch = Renderer2DConfig::MAX_ELEMENTS / 6;

    for _ in 0..per_batch {
        renderer.draw_rectangle(&quad());
    }
    assert!(backend.draws().is_empty());

    renderer.draw_rectangle(&quad());
    assert_eq!(backend.draw_counts("rectangles"), vec![Renderer2DConfig::MAX_ELEMENTS]);
    assert_eq!(renderer.element_count(GeometryKind::Rectangle), 6);

    renderer.end_render();
    let drawn: u32 = backend.draw_counts("rectangles").iter().sum();
    assert_eq!(drawn, 6 * (per_batch + 1));
    assert_eq!(renderer.stats().object_count, per_batch + 1);
}

#[test]
fn test_triangles_never_overrun_vertex_arena() {
    let (backend, mut renderer) = setup();
    let per_batch = Renderer2DConfig::MAX_VERTICES / 3;

    for _ in 0..=per_batch {
        renderer.draw_triangle(&quad());
    }
    assert_eq!(backend.draw_counts("triangles"), vec![per_batch * 3]);

    renderer.end_render();
    assert_eq!(backend.draw_counts("triangles"), vec![per_batch * 3, 3]);
}

#[test]
fn test_small_config_limits() {
    let config = Renderer2DConfig {
        max_vertices: 8,
        max_elements: 12,
        max_texture_slots: 4,
    };
    let (backend, mut renderer) = setup_with(config);

    for _ in 0..5 {
        renderer.draw_rectangle(&quad());
    }
    renderer.end_render();

    assert_eq!(backend.draw_counts("rectangles"), vec![12, 12, 6]);
}

#[test]
fn test_invalid_config_is_rejected() {
    let backend = Arc::new(MockRenderBackend::new());
    let config = Renderer2DConfig {
        max_elements: 64,
        ..Default::default()
    };

    let result = Renderer2D::with_config(backend, config);
    assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
}

#[test]
#[should_panic(expected = "not a valid graphics API")]
fn test_no_graphics_api_is_fatal() {
    let backend = Arc::new(MockRenderBackend::with_api(GraphicsApi::None));
    let _ = Renderer2D::new(backend);
}

// ============================================================================
// Texture slots
// ============================================================================

#[test]
fn test_repeated_texture_uses_one_slot() {
    let (backend, mut renderer) = setup();
    let texture = mock_texture(100, 32, 32);

    for _ in 0..5 {
        renderer.draw_rectangle(&textured_quad(&texture));
    }
    assert_eq!(renderer.texture_slots_in_use(GeometryKind::Rectangle), 1);

    renderer.end_render();
    assert_eq!(backend.texture_binds(), vec![(TextureId(100), 0)]);

    let uploads = backend.uploaded_vertices::<EdgeVertex>("rectangles");
    assert_eq!(uploads.len(), 1);
    assert!(uploads[0].iter().all(|vertex| vertex.tex_index == 0));
}

#[test]
fn test_equal_textures_share_a_slot_across_handles() {
    let (_backend, mut renderer) = setup();
    // Two handles to the same backend resource.
    let first = mock_texture(7, 32, 32);
    let second = mock_texture(7, 32, 32);

    renderer.draw_rectangle(&textured_quad(&first));
    renderer.draw_rectangle(&textured_quad(&second));

    assert_eq!(renderer.texture_slots_in_use(GeometryKind::Rectangle), 1);
}

#[test]
fn test_slot_exhaustion_flushes_on_32nd_distinct_texture() {
    let (backend, mut renderer) = setup();
    let textures = distinct_textures(1, Renderer2DConfig::MAX_TEXTURE_SLOTS as usize);

    for texture in &textures[..31] {
        renderer.draw_rectangle(&textured_quad(texture));
    }
    assert!(backend.draws().is_empty());
    assert_eq!(renderer.texture_slots_in_use(GeometryKind::Rectangle), 31);

    renderer.draw_rectangle(&textured_quad(&textures[31]));
    assert_eq!(backend.draw_counts("rectangles"), vec![31 * 6]);
    assert_eq!(renderer.texture_slots_in_use(GeometryKind::Rectangle), 1);

    let units: Vec<u32> = backend.texture_binds().iter().map(|(_, unit)| *unit).collect();
    assert_eq!(units, (0..31).collect::<Vec<_>>());

    renderer.end_render();
    assert_eq!(backend.draw_counts("rectangles"), vec![31 * 6, 6]);
    assert_eq!(backend.texture_binds().last(), Some(&(TextureId(32), 0)));
}

#[test]
fn test_triangle_and_circle_slots_dedupe_and_exhaust() {
    // (kind, indices per primitive)
    let cases = [(GeometryKind::Triangle, 3), (GeometryKind::Circle, 6)];

    for (kind, elements) in cases {
        let (backend, mut renderer) = setup();
        let textures = distinct_textures(1, Renderer2DConfig::MAX_TEXTURE_SLOTS as usize);
        let draw = |renderer: &mut Renderer2D, texture: &Arc<Texture>| match kind {
            GeometryKind::Triangle => renderer.draw_triangle(&textured_quad(texture)),
            _ => renderer.draw_circle(
                &CircleRenderData::new(Transform::default(), Color::RED).with_texture(Arc::clone(texture)),
            ),
        };

        draw(&mut renderer, &textures[0]);
        draw(&mut renderer, &textures[0]);
        assert_eq!(renderer.texture_slots_in_use(kind), 1, "{kind:?}");

        for texture in &textures[1..31] {
            draw(&mut renderer, texture);
        }
        assert!(backend.draws().is_empty(), "{kind:?}");
        assert_eq!(renderer.texture_slots_in_use(kind), 31, "{kind:?}");

        draw(&mut renderer, &textures[31]);
        assert_eq!(backend.draw_counts(kind.label()), vec![32 * elements], "{kind:?}");
        assert_eq!(renderer.texture_slots_in_use(kind), 1, "{kind:?}");

        renderer.end_render();
        assert_eq!(
            backend.draw_counts(kind.label()),
            vec![32 * elements, elements],
            "{kind:?}"
        );
        assert_eq!(backend.texture_binds().last(), Some(&(TextureId(32), 0)), "{kind:?}");
    }
}

#[test]
fn test_untextured_vertices_use_no_texture_index() {
    let (backend, mut renderer) = setup();
    renderer.draw_rectangle(&quad());
    renderer.end_render();

    let uploads = backend.uploaded_vertices::<EdgeVertex>("rectangles");
    assert!(uploads[0].iter().all(|vertex| vertex.tex_index == NO_TEXTURE));
    assert!(backend.texture_binds().is_empty());
}

// ============================================================================
// Flush sequence and ordering
// ============================================================================

#[test]
fn test_flush_call_sequence() {
    let (backend, mut renderer) = setup();
    let texture = mock_texture(9, 8, 8);
    renderer.draw_rectangle(&textured_quad(&texture));
    backend.clear_calls();

    renderer.render(RenderTarget2D::Rectangle);

    let calls: Vec<RenderCall> = backend
        .calls()
        .into_iter()
        .filter(|call| {
            !matches!(
                call,
                RenderCall::CreateVertexArray { .. } | RenderCall::CreateShader { .. }
            )
        })
        .collect();
    assert_eq!(calls.len(), 7);
    assert!(matches!(calls[0], RenderCall::WriteBuffer { ref data, .. } if data.len() == 4 * 60));
    assert_eq!(
        calls[1],
        RenderCall::BindTexture {
            texture: TextureId(9),
            unit: 0
        }
    );
    let RenderCall::BindShader(shader) = calls[2] else {
        panic!("expected shader bind, got {:?}", calls[2]);
    };
    assert_eq!(backend.shader_name(shader).as_deref(), Some("EdgeGeometryShader_2D"));
    assert_eq!(
        calls[3],
        RenderCall::UploadIntArray {
            shader,
            name: "uTexture".to_string(),
            values: (0..31).collect(),
        }
    );
    assert!(matches!(calls[4], RenderCall::DrawIndexed { index_count: 6, .. }));
    assert_eq!(calls[5], RenderCall::UnbindShader(shader));
    assert_eq!(calls[6], RenderCall::UnbindTexture(TextureId(9)));
}

#[test]
fn test_paint_order_is_fixed() {
    let (backend, mut renderer) = setup();
    let font = monospace_font(300);

    renderer.draw_string(&TextRenderData::new("hi", font));
    renderer.draw_circle(&CircleRenderData::default());
    renderer.draw_triangle(&quad());
    renderer.draw_rectangle(&quad());
    renderer.end_render();

    assert_eq!(backend.draw_order(), vec!["rectangles", "triangles", "circles", "text"]);
}

#[test]
fn test_next_batch_resets_only_named_kind() {
    let (backend, mut renderer) = setup();

    renderer.draw_rectangle(&quad());
    renderer.draw_circle(&CircleRenderData::default());
    renderer.next_batch(RenderTarget2D::Circle);

    assert_eq!(backend.draw_order(), vec!["circles"]);
    assert_eq!(renderer.element_count(GeometryKind::Circle), 0);
    assert_eq!(renderer.element_count(GeometryKind::Rectangle), 6);
}

#[test]
fn test_render_keeps_batch_pending() {
    let (backend, mut renderer) = setup();

    renderer.draw_rectangle(&quad());
    renderer.render(RenderTarget2D::Rectangle);

    assert_eq!(backend.draw_counts("rectangles"), vec![6]);
    assert_eq!(renderer.element_count(GeometryKind::Rectangle), 6);
}

#[test]
fn test_end_render_resets_every_kind() {
    let (backend, mut renderer) = setup();

    renderer.draw_rectangle(&quad());
    renderer.draw_triangle(&quad());
    renderer.end_render();
    backend.clear_calls();
    renderer.end_render();

    assert!(backend.draws().is_empty());
    for kind in GeometryKind::ALL {
        assert_eq!(renderer.element_count(kind), 0);
    }
}

#[test]
fn test_begin_render_binds_camera_once_and_disables_depth() {
    let backend = Arc::new(MockRenderBackend::new());
    let mut renderer = Renderer2D::new(backend.clone());
    assert!(backend.is_depth_testing_enabled());

    renderer.begin_render(&Camera::new(800.0, 600.0));
    assert!(!backend.is_depth_testing_enabled());

    let config = Renderer2DConfig {
        max_vertices: 8,
        max_elements: 12,
        max_texture_slots: 4,
    };
    let mut small = Renderer2D::with_config(backend.clone(), config).unwrap();
    backend.clear_calls();
    small.begin_render(&Camera::new(800.0, 600.0));
    for _ in 0..7 {
        small.draw_rectangle(&quad());
    }
    small.end_render();

    let camera_binds = backend.count(|call| matches!(call, RenderCall::BindUniformBuffer { binding: 0, .. }));
    assert_eq!(camera_binds, 1);
    assert_eq!(backend.draw_counts("rectangles").len(), 4);
}

#[test]
fn test_begin_render_discards_pending_geometry() {
    let (backend, mut renderer) = setup();

    renderer.draw_rectangle(&quad());
    renderer.begin_render(&Camera::new(800.0, 600.0));
    renderer.end_render();

    assert!(backend.draws().is_empty());
}

// ============================================================================
// Lines
// ============================================================================

#[test]
fn test_each_line_costs_one_draw_call() {
    let (backend, mut renderer) = setup();

    for thickness in [1.0, 2.0, 3.0] {
        let before = renderer.stats().draw_calls;
        renderer.draw_line(&line(thickness));
        assert_eq!(renderer.stats().draw_calls, before + 1);
    }
    assert_eq!(backend.line_thicknesses(), vec![1.0, 2.0, 3.0]);
    assert_eq!(backend.draw_counts("lines"), vec![2, 2, 2]);
    assert_eq!(renderer.element_count(GeometryKind::Line), 0);
    assert_eq!(renderer.line_width(), 3.0);

    renderer.end_render();
    let stats = renderer.stats();
    assert_eq!(stats.draw_calls, 3);
    assert_eq!(stats.object_count, 3);
    assert_eq!(stats.element_count, 6);
    assert_eq!(stats.vertex_count, 6);
}

#[test]
fn test_line_sets_width_before_drawing() {
    let (backend, mut renderer) = setup();
    backend.clear_calls();

    renderer.draw_line(&line(4.0));

    let calls = backend.calls();
    let width_at = calls
        .iter()
        .position(|call| *call == RenderCall::SetLineWidth(4.0))
        .unwrap();
    let draw_at = calls
        .iter()
        .position(|call| matches!(call, RenderCall::DrawLines { .. }))
        .unwrap();
    assert!(width_at < draw_at);
    assert!(backend.int_array_uploads("uTexture").is_empty());
}

// ============================================================================
// Text
// ============================================================================

#[test]
fn test_single_glyph_is_unit_square_at_origin() {
    let (backend, mut renderer) = setup();

    renderer.draw_string(&TextRenderData::new("A", single_glyph_font(500)));
    renderer.end_render();

    let uploads = backend.uploaded_vertices::<TextVertex>("text");
    assert_eq!(uploads.len(), 1);
    let positions: Vec<Vec3> = uploads[0].iter().map(|v| Vec3::from(v.position)).collect();
    let expected = [
        Vec3::new(-0.5, -0.5, 0.0),
        Vec3::new(-0.5, 0.5, 0.0),
        Vec3::new(0.5, 0.5, 0.0),
        Vec3::new(0.5, -0.5, 0.0),
    ];
    assert_eq!(positions.len(), 4);
    for (actual, expected) in positions.into_iter().zip(expected) {
        assert_close(actual, expected);
    }
    assert_eq!(Vec2::from(uploads[0][2].tex_coords), Vec2::ONE);

    assert_eq!(backend.texture_binds(), vec![(TextureId(500), 0)]);
    assert!(backend.int_array_uploads("uTexture").is_empty());
    assert_eq!(renderer.stats().object_count, 1);
}

#[test]
fn test_text_follows_transform() {
    let (backend, mut renderer) = setup();
    let transform = Transform::from_position(Vec3::new(10.0, 20.0, 0.0)).with_scale(Vec3::splat(2.0));

    renderer.draw_string(&TextRenderData::new("A", single_glyph_font(1)).with_transform(transform));
    renderer.end_render();

    let uploads = backend.uploaded_vertices::<TextVertex>("text");
    assert_close(Vec3::from(uploads[0][0].position), Vec3::new(9.0, 19.0, 0.0));
    assert_close(Vec3::from(uploads[0][2].position), Vec3::new(11.0, 21.0, 0.0));
}

#[test]
fn test_one_object_per_glyph() {
    let (backend, mut renderer) = setup();

    renderer.draw_string(&TextRenderData::new("ab\ncd", monospace_font(2)));
    renderer.end_render();

    assert_eq!(renderer.stats().object_count, 4);
    assert_eq!(backend.draw_counts("text"), vec![24]);
}

#[test]
fn test_missing_glyph_without_fallback_truncates() {
    let (backend, mut renderer) = setup();

    renderer.draw_string(&TextRenderData::new("AA\u{e9}A", single_glyph_font(3)));
    renderer.end_render();

    assert_eq!(renderer.stats().object_count, 2);
    assert_eq!(backend.draw_counts("text"), vec![12]);
}

#[test]
fn test_text_atlas_switch_flushes() {
    let (backend, mut renderer) = setup();

    renderer.draw_string(&TextRenderData::new("A", single_glyph_font(11)));
    renderer.draw_string(&TextRenderData::new("A", single_glyph_font(11)));
    assert!(backend.draws().is_empty());

    renderer.draw_string(&TextRenderData::new("A", single_glyph_font(12)));
    assert_eq!(backend.draw_counts("text"), vec![12]);

    renderer.end_render();
    assert_eq!(backend.draw_counts("text"), vec![12, 6]);
    assert_eq!(
        backend.texture_binds(),
        vec![(TextureId(11), 0), (TextureId(12), 0)]
    );
}

#[test]
fn test_empty_string_draws_nothing() {
    let (backend, mut renderer) = setup();

    renderer.draw_string(&TextRenderData::new("", monospace_font(4)));
    renderer.end_render();

    assert!(backend.draws().is_empty());
    assert_eq!(renderer.stats(), RenderStats::default());
}

// ============================================================================
// Sprites and window
// ============================================================================

#[test]
fn test_draw_sprite_dispatches_by_geometry() {
    let (backend, mut renderer) = setup();

    renderer.draw_sprite(Geometry::Rectangle, &quad());
    renderer.draw_sprite(Geometry::Triangle, &quad());
    renderer.draw_sprite(Geometry::Circle, &quad());
    renderer.end_render();

    assert_eq!(backend.draw_order(), vec!["rectangles", "triangles", "circles"]);
    assert_eq!(backend.draw_counts("triangles"), vec![3]);
}

#[test]
fn test_sprite_sheet_coords_reach_vertices() {
    let (backend, mut renderer) = setup();
    let sheet = SpriteSheet::new(mock_texture(21, 64, 64), SpriteSheetDescriptor::uniform(32, 32)).unwrap();

    let data = sheet.render_data(1, 1, Transform::default(), Color::WHITE).unwrap();
    renderer.draw_rectangle(&data);
    renderer.end_render();

    let uploads = backend.uploaded_vertices::<EdgeVertex>("rectangles");
    let coords: Vec<Vec2> = uploads[0].iter().map(|v| Vec2::from(v.tex_coords)).collect();
    assert_eq!(
        coords,
        vec![
            Vec2::new(0.5, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 0.5),
            Vec2::new(0.5, 0.5),
        ]
    );
}

#[test]
fn test_resize_window_sets_viewport() {
    let (backend, mut renderer) = setup();
    backend.clear_calls();

    renderer.resize_window(1280, 720);

    assert_eq!(
        backend.calls().last(),
        Some(&RenderCall::SetViewport {
            x: 0,
            y: 0,
            width: 1280,
            height: 720
        })
    );
}

#[test]
fn test_shutdown_issues_no_draws() {
    let (backend, mut renderer) = setup();
    renderer.draw_rectangle(&quad());
    renderer.shutdown();

    assert!(backend.draws().is_empty());
}
