#![allow(dead_code)]

use pilekit_core::{ObjectId, Rect, TextureId, Vec2};
use pilekit_engine::{Engine, GameObject, Visual};

pub const CARD_W: f64 = 100.0;
pub const CARD_H: f64 = 150.0;

pub fn card_rect(x: f64, y: f64) -> Rect {
    Rect::new(x, y, CARD_W, CARD_H)
}

/// Draggable pileable card fanned out by 24 pixels per level.
pub fn add_card(engine: &mut Engine, x: f64, y: f64) -> ObjectId {
    engine
        .insert(
            GameObject::new()
                .placed(card_rect(x, y))
                .visual(Visual::new(Some(TextureId(1)), Vec2::new(0.0, 24.0)))
                .pileable(None)
                .interactive(),
        )
        .unwrap()
}

/// Card whose pile members all sit on the anchor.
pub fn add_flat_card(engine: &mut Engine, x: f64, y: f64) -> ObjectId {
    engine
        .insert(
            GameObject::new()
                .placed(card_rect(x, y))
                .visual(Visual::new(Some(TextureId(1)), Vec2::ZERO))
                .pileable(None)
                .interactive(),
        )
        .unwrap()
}

/// Fixed, untextured pile anchor.
pub fn add_slot(engine: &mut Engine, x: f64, y: f64, max_pile_size: Option<usize>) -> ObjectId {
    engine
        .insert(
            GameObject::new()
                .placed(card_rect(x, y))
                .visual(Visual::default())
                .pileable(max_pile_size),
        )
        .unwrap()
}

/// Joins `members` bottom to top.
pub fn stack(engine: &mut Engine, members: &[ObjectId]) {
    for pair in members.windows(2) {
        engine.join(pair[1], pair[0]).unwrap();
    }
}

pub fn members(engine: &Engine, id: ObjectId) -> Vec<ObjectId> {
    engine.store().pile_members(id).unwrap()
}
