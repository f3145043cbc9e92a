use crate::error::{RenderError, RenderResult};

/// Capacity limits of the 2D batch renderer.
///
/// Every geometry kind gets its own scratch arena of `max_vertices` records
/// and may queue up to `max_elements` indices before it is flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer2DConfig {
    pub max_vertices: u32,
    pub max_elements: u32,
    /// Size of the sampler array. One entry is reserved, so a batch can
    /// reference `max_texture_slots - 1` distinct textures.
    pub max_texture_slots: u32,
}

impl Renderer2DConfig {
    pub const MAX_VERTICES: u32 = 40_000;
    pub const MAX_ELEMENTS: u32 = 60_000;
    pub const MAX_TEXTURE_SLOTS: u32 = 32;

    /// Texture units a single batch may reference.
    pub fn usable_texture_slots(&self) -> u32 {
        self.max_texture_slots - 1
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.max_vertices < 4 {
            return Err(RenderError::InvalidConfig(format!(
                "max_vertices must hold at least one quad, got {}",
                self.max_vertices
            )));
        }
        if self.max_elements == 0 || self.max_elements % 6 != 0 {
            return Err(RenderError::InvalidConfig(format!(
                "max_elements must be a positive multiple of 6, got {}",
                self.max_elements
            )));
        }
        if !(2..=Self::MAX_TEXTURE_SLOTS).contains(&self.max_texture_slots) {
            return Err(RenderError::InvalidConfig(format!(
                "max_texture_slots must be within 2..={}, got {}",
                Self::MAX_TEXTURE_SLOTS,
                self.max_texture_slots
            )));
        }
        Ok(())
    }
}

impl Default for Renderer2DConfig {
    fn default() -> Self {
        Self {
            max_vertices: Self::MAX_VERTICES,
            max_elements: Self::MAX_ELEMENTS,
            max_texture_slots: Self::MAX_TEXTURE_SLOTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Renderer2DConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.usable_texture_slots(), 31);
    }

    #[test]
    fn test_rejects_odd_element_count() {
        let config = Renderer2DConfig {
            max_elements: 64,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_texture_slot_bounds() {
        for slots in [0, 1, 33] {
            let config = Renderer2DConfig {
                max_texture_slots: slots,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{slots} slots accepted");
        }
    }

    #[test]
    fn test_rejects_tiny_arena() {
        let config = Renderer2DConfig {
            max_vertices: 3,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
