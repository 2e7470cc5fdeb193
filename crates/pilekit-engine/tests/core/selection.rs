use pilekit_core::{Rect, Vec2};
use pilekit_engine::{Capability, Engine, Filter, GameObject, PointerFrame, Region, Resolver};
use pilekit_settings::SelectionSettings;

use crate::common::*;

#[test]
fn test_resolver_defaults_from_settings() {
    let settings = SelectionSettings {
        tie_epsilon: 0.25,
        ..Default::default()
    };

    assert_eq!(Resolver::default().tie_epsilon(), 0.1);
    assert_eq!(Resolver::from_settings(&settings).tie_epsilon(), 0.25);
}

#[test]
fn test_resolve_empty_registry() {
    let engine = Engine::default();

    let hit = engine
        .resolve(&card_rect(0.0, 0.0), &Filter::new())
        .unwrap();

    assert_eq!(hit, None);
}

#[test]
fn test_resolve_picks_closest_top_left() {
    let mut engine = Engine::default();
    add_card(&mut engine, 0.0, 0.0);
    let middle = add_card(&mut engine, 300.0, 0.0);
    add_card(&mut engine, 600.0, 0.0);

    let hit = engine
        .resolve(&card_rect(280.0, 10.0), &Filter::new())
        .unwrap();

    assert_eq!(hit, Some(middle));
}

#[test]
fn test_colocated_tie_goes_to_deepest() {
    let mut engine = Engine::default();
    let upper = add_flat_card(&mut engine, 900.0, 0.0);
    let lower = add_flat_card(&mut engine, 500.0, 0.0);
    stack(&mut engine, &[lower, upper]);

    let hit = engine
        .resolve(&card_rect(500.0, 0.0), &Filter::new())
        .unwrap();

    assert_eq!(hit, Some(upper));
}

#[test]
fn test_equal_depth_tie_goes_to_last_visited() {
    let mut engine = Engine::default();
    add_card(&mut engine, 1000.0, 0.0);
    let later = add_card(&mut engine, 1040.0, 0.0);

    let hit = engine
        .resolve(&card_rect(1000.0, 0.0), &Filter::new())
        .unwrap();

    assert_eq!(hit, Some(later));
}

#[test]
fn test_positions_outside_tolerance_are_not_tied() {
    let mut engine = Engine::default();
    let near = add_card(&mut engine, 0.0, 0.0);
    add_card(&mut engine, 50.0, 0.0);

    let hit = engine
        .resolve(&card_rect(0.0, 0.0), &Filter::new())
        .unwrap();

    assert_eq!(hit, Some(near));
}

#[test]
fn test_filter_requires_capability() {
    let mut engine = Engine::default();
    add_slot(&mut engine, 0.0, 0.0, None);
    let card = add_card(&mut engine, 400.0, 0.0);
    let filter = Filter::new().require(Capability::Interactive);

    let hit = engine.resolve(&card_rect(0.0, 0.0), &filter).unwrap();

    assert_eq!(hit, Some(card));
}

#[test]
fn test_filter_excludes_ids() {
    let mut engine = Engine::default();
    let skipped = add_card(&mut engine, 0.0, 0.0);
    let other = add_card(&mut engine, 400.0, 0.0);
    let filter = Filter::new().excluding(skipped);

    let hit = engine.resolve(&card_rect(0.0, 0.0), &filter).unwrap();

    assert_eq!(hit, Some(other));
}

#[test]
fn test_overlap_region_uses_effective_rect() {
    let mut engine = Engine::default();
    let bottom = add_card(&mut engine, 0.0, 0.0);
    let top = add_card(&mut engine, 300.0, 0.0);
    stack(&mut engine, &[bottom, top]);

    // Raw rect of `top` now sits on the anchor; only the fanned rect reaches
    // below y = 150.
    let probe = Rect::new(40.0, 160.0, 10.0, 10.0);
    let filter = Filter::new().overlapping(probe);

    assert_eq!(filter.region(), Region::Overlapping(probe));
    assert_eq!(engine.resolve(&probe, &filter).unwrap(), Some(top));
}

#[test]
fn test_nothing_overlapping_resolves_to_none() {
    let mut engine = Engine::default();
    add_card(&mut engine, 0.0, 0.0);
    let probe = Rect::new(500.0, 500.0, 10.0, 10.0);

    let hit = engine
        .resolve(&probe, &Filter::new().overlapping(probe))
        .unwrap();

    assert_eq!(hit, None);
}

#[test]
fn test_unplaced_objects_never_win_a_comparison() {
    let mut engine = Engine::default();
    engine.insert(GameObject::new().pileable(None)).unwrap();
    let placed = add_card(&mut engine, 700.0, 0.0);

    let candidates = engine
        .resolver()
        .candidates(engine.store(), &Filter::new())
        .unwrap();
    let hit = engine
        .resolve(&card_rect(0.0, 0.0), &Filter::new())
        .unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(hit, Some(placed));
}

#[test]
fn test_resolve_top_ignores_distance() {
    let mut engine = Engine::default();
    let bottom = add_card(&mut engine, 0.0, 0.0);
    let top = add_card(&mut engine, 300.0, 0.0);
    add_card(&mut engine, 800.0, 0.0);
    stack(&mut engine, &[bottom, top]);

    let hit = engine.resolve_top(&Filter::new()).unwrap();

    assert_eq!(hit, Some(top));
}

#[test]
fn test_hit_test_prefers_top_of_fanned_pile() {
    let mut engine = Engine::default();
    let bottom = add_card(&mut engine, 0.0, 0.0);
    let top = add_card(&mut engine, 300.0, 0.0);
    stack(&mut engine, &[bottom, top]);

    assert_eq!(engine.hit_test(Vec2::new(50.0, 100.0)), Some(top));
    assert_eq!(engine.hit_test(Vec2::new(50.0, 10.0)), Some(bottom));
    assert_eq!(engine.hit_test(Vec2::new(500.0, 500.0)), None);
}

#[test]
fn test_hit_test_skips_objects_without_visual() {
    let mut engine = Engine::default();
    let card = add_card(&mut engine, 0.0, 0.0);
    engine
        .insert(GameObject::new().placed(card_rect(0.0, 0.0)))
        .unwrap();
    engine
        .insert(GameObject::new().placed(card_rect(300.0, 0.0)))
        .unwrap();

    assert_eq!(engine.hit_test(Vec2::new(50.0, 75.0)), Some(card));
    assert_eq!(engine.hit_test(Vec2::new(350.0, 75.0)), None);
}

#[test]
fn test_idle_capability_excludes_held_object() {
    let mut engine = Engine::default();
    let held = add_card(&mut engine, 0.0, 0.0);
    let resting = add_card(&mut engine, 300.0, 0.0);
    add_slot(&mut engine, 600.0, 0.0, None);
    engine.tick(&PointerFrame::press(50.0, 75.0));
    assert_eq!(engine.held(), Some(held));

    let idle: Vec<_> = engine
        .resolver()
        .candidates(engine.store(), &Filter::new().require(Capability::Idle))
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();

    assert_eq!(idle, vec![resting]);
}

#[test]
fn test_pile_top_capability() {
    let mut engine = Engine::default();
    let bottom = add_card(&mut engine, 0.0, 0.0);
    let top = add_card(&mut engine, 300.0, 0.0);
    stack(&mut engine, &[bottom, top]);
    let filter = Filter::new().require(Capability::PileTop);

    let candidates = engine
        .resolver()
        .candidates(engine.store(), &filter)
        .unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, top);
    assert_eq!(candidates[0].depth, 1);
}
