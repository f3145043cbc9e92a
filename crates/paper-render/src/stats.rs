/// Per-frame draw counters.
///
/// Incremented by every draw and flush, reset by
/// [`Renderer2D::clear_stats`](crate::Renderer2D::clear_stats). Read-only to
/// UI and diagnostics. Counters wrap on overflow when never cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Number of GPU draw calls issued.
    pub draw_calls: u32,
    /// Number of primitives submitted (one per glyph for text).
    pub object_count: u32,
    /// Bytes of vertex data uploaded.
    pub data_size: u32,
    /// Number of vertex records written.
    pub vertex_count: u32,
    /// Number of indices queued (vertices for lines).
    pub element_count: u32,
}

impl RenderStats {
    pub(crate) fn record_object(&mut self, vertices: u32, elements: u32) {
        self.object_count = self.object_count.wrapping_add(1);
        self.vertex_count = self.vertex_count.wrapping_add(vertices);
        self.element_count = self.element_count.wrapping_add(elements);
    }

    pub(crate) fn record_draw(&mut self, bytes: u32) {
        self.draw_calls = self.draw_calls.wrapping_add(1);
        self.data_size = self.data_size.wrapping_add(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_draw_wraps_data_size() {
        let mut stats = RenderStats {
            data_size: u32::MAX - 10,
            ..Default::default()
        };
        stats.record_draw(240);
        assert_eq!(stats.data_size, 229);
        assert_eq!(stats.draw_calls, 1);
    }

    #[test]
    fn test_record_object_wraps_counts() {
        let mut stats = RenderStats {
            object_count: u32::MAX,
            vertex_count: u32::MAX - 1,
            element_count: u32::MAX - 2,
            ..Default::default()
        };
        stats.record_object(4, 6);
        assert_eq!(stats.object_count, 0);
        assert_eq!(stats.vertex_count, 2);
        assert_eq!(stats.element_count, 3);
    }
}
