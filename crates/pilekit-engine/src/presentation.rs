//! Presentation derivation: the ordered draw list handed to the renderer.

use pilekit_core::{ObjectId, Rect, Result, TextureId};

use crate::registry::ObjectStore;

/// Depth reported for the held object so it draws above every pile.
pub const HELD_DEPTH: usize = usize::MAX;

/// One entry of the per-frame draw list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub id: ObjectId,
    /// Effective rectangle after pile offsetting
    pub rect: Rect,
    /// Raw placement rectangle, where placeholders are outlined
    pub placement: Rect,
    pub texture: Option<TextureId>,
    pub depth: usize,
}

impl DrawItem {
    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }
}

/// External drawing collaborator.
pub trait Renderer {
    /// Draws `texture` stretched over `rect`.
    fn draw_texture(&mut self, id: ObjectId, rect: Rect, texture: TextureId);

    /// Outlines an object that has no texture, such as an empty pile slot.
    fn draw_placeholder(&mut self, id: ObjectId, rect: Rect);
}

/// Builds the draw list, bottom to top.
///
/// Objects need both a placement and a visual facet. Items are sorted by pile
/// depth; the sort is stable so equal depths keep registry order.
pub fn draw_list(store: &ObjectStore) -> Result<Vec<DrawItem>> {
    let mut items = Vec::with_capacity(store.len());

    for object in store.iter() {
        let (Some(placement), Some(visual)) = (object.placement, object.visual) else {
            continue;
        };
        let id = object.id();
        let depth = if object.is_held() {
            HELD_DEPTH
        } else {
            store.depth_of(id)?
        };

        items.push(DrawItem {
            id,
            rect: store.effective_rect(id)?,
            placement: placement.rect,
            texture: visual.texture,
            depth,
        });
    }

    items.sort_by_key(|item| item.depth);
    Ok(items)
}

/// Hands every item to `renderer` in order.
pub fn submit<R: Renderer + ?Sized>(items: &[DrawItem], renderer: &mut R) {
    for item in items {
        match item.texture {
            Some(texture) => renderer.draw_texture(item.id, item.rect, texture),
            None => renderer.draw_placeholder(item.id, item.placement),
        }
    }
}
