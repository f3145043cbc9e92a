use std::sync::Arc;

use crate::resource::Texture;

/// Per-batch table mapping textures to sampler slots.
///
/// Identical textures (same backend resource) share a slot for the lifetime
/// of a batch. The table is never evicted mid-batch: once full, the owner
/// must flush and [`clear`](Self::clear) it before inserting again.
#[derive(Debug)]
pub struct TextureSlots {
    slots: Vec<Arc<Texture>>,
    capacity: usize,
}

impl TextureSlots {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Slot already holding `texture`, if any.
    pub fn find(&self, texture: &Texture) -> Option<u32> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref() == texture)
            .map(|index| index as u32)
    }

    /// Append `texture` to the next free slot and return its index.
    ///
    /// Callers check [`find`](Self::find) and [`is_full`](Self::is_full) first.
    pub fn insert(&mut self, texture: Arc<Texture>) -> u32 {
        debug_assert!(!self.is_full(), "texture slot table overflow");
        self.slots.push(texture);
        (self.slots.len() - 1) as u32
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Textures in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Texture>> {
        self.slots.iter()
    }
}
