use pilekit_core::layout::{CARD_HEIGHT, CARD_WIDTH, SURFACE_HEIGHT, SURFACE_WIDTH};
use pilekit_core::{approx_eq, EngineError, Rect, TextureId, Vec2};
use pilekit_engine::{
    default_layout, ObjectKind, ObjectSpec, SceneBuilder, SceneDescription, SceneError,
};
use pilekit_settings::EngineConfig;
use tempfile::TempDir;

fn spec(name: &str, kind: ObjectKind, x: f64) -> ObjectSpec {
    ObjectSpec {
        name: name.to_string(),
        kind,
        texture: None,
        max_pile_size: None,
        pile_offset: None,
        rect: Rect::new(x, 0.0, CARD_WIDTH, CARD_HEIGHT),
    }
}

#[test]
fn test_default_layout_builds_unpiled() {
    let (engine, names) = default_layout().build(EngineConfig::default()).unwrap();

    assert_eq!(engine.object_count(), 5);
    assert_eq!(names.len(), 5);
    assert!(engine.store().piles().unwrap().is_empty());

    let two = names["two_of_clubs"];
    let slot = names["slot_1"];
    assert!(engine.get(two).unwrap().interactive.is_some());
    assert!(engine.get(slot).unwrap().interactive.is_none());
    assert_eq!(
        engine.get(two).unwrap().visual.unwrap().texture,
        Some(TextureId(2))
    );
}

#[test]
fn test_default_layout_has_no_colocated_objects() {
    let (engine, _) = default_layout().build(EngineConfig::default()).unwrap();
    let epsilon = engine.resolver().tie_epsilon();
    let rects: Vec<Rect> = engine
        .store()
        .ids()
        .map(|id| engine.effective_rect(id).unwrap())
        .collect();

    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            assert!(
                !(approx_eq(a.x, b.x, epsilon) && approx_eq(a.y, b.y, epsilon)),
                "{a:?} and {b:?} would tie"
            );
        }
    }
}

#[test]
fn test_default_layout_fits_surface() {
    for object in default_layout().objects {
        let rect = object.rect;
        assert!(rect.x >= 0.0 && rect.y >= 0.0, "{} off surface", object.name);
        assert!(
            rect.x + rect.width <= SURFACE_WIDTH && rect.y + rect.height <= SURFACE_HEIGHT,
            "{} off surface",
            object.name
        );
    }
}

#[test]
fn test_described_slot_has_no_fan_out() {
    let mut offset_slot = spec("offset_slot", ObjectKind::Slot, 400.0);
    offset_slot.pile_offset = Some(Vec2::new(0.0, 10.0));
    let description = SceneDescription {
        piles: vec![vec![
            "card".to_string(),
            "slot".to_string(),
            "offset_slot".to_string(),
        ]],
        objects: vec![
            spec("card", ObjectKind::Card, 0.0),
            spec("slot", ObjectKind::Slot, 200.0),
            offset_slot,
        ],
    };

    let (engine, names) = description.build(EngineConfig::default()).unwrap();

    assert_eq!(
        engine.get(names["slot"]).unwrap().visual.unwrap().pile_offset,
        Vec2::ZERO
    );
    assert_eq!(
        engine.effective_rect(names["slot"]).unwrap().top_left(),
        Vec2::new(0.0, 0.0)
    );
    assert_eq!(
        engine.effective_rect(names["offset_slot"]).unwrap().top_left(),
        Vec2::new(0.0, 20.0)
    );
    assert_eq!(
        engine.get(names["card"]).unwrap().visual.unwrap().pile_offset,
        Vec2::new(0.0, 24.0)
    );
}

#[test]
fn test_description_deals_piles_bottom_to_top() {
    let description = SceneDescription {
        piles: vec![vec![
            "slot".to_string(),
            "low".to_string(),
            "high".to_string(),
        ]],
        objects: vec![
            spec("high", ObjectKind::Card, 0.0),
            spec("slot", ObjectKind::Slot, 400.0),
            spec("low", ObjectKind::Card, 200.0),
        ],
    };

    let (engine, names) = description.build(EngineConfig::default()).unwrap();

    assert_eq!(
        engine.store().pile_members(names["high"]).unwrap(),
        vec![names["slot"], names["low"], names["high"]]
    );
    assert_eq!(
        engine.effective_rect(names["high"]).unwrap().top_left(),
        Vec2::new(400.0, 48.0)
    );
}

#[test]
fn test_description_rejects_unknown_name() {
    let description = SceneDescription {
        piles: vec![vec!["a".to_string(), "ghost".to_string()]],
        objects: vec![spec("a", ObjectKind::Card, 0.0)],
    };

    let err = description.build(EngineConfig::default()).unwrap_err();

    assert!(matches!(err, SceneError::UnknownName(ref name) if name == "ghost"));
}

#[test]
fn test_description_rejects_duplicate_name() {
    let description = SceneDescription {
        piles: Vec::new(),
        objects: vec![
            spec("a", ObjectKind::Card, 0.0),
            spec("a", ObjectKind::Card, 200.0),
        ],
    };

    let err = description.build(EngineConfig::default()).unwrap_err();

    assert!(matches!(err, SceneError::DuplicateName(_)));
}

#[test]
fn test_description_rejects_single_member_pile() {
    let description = SceneDescription {
        piles: vec![vec!["a".to_string()]],
        objects: vec![spec("a", ObjectKind::Card, 0.0)],
    };

    let err = description.build(EngineConfig::default()).unwrap_err();

    assert!(matches!(err, SceneError::PileTooShort { index: 0, len: 1 }));
}

#[test]
fn test_description_respects_capacity() {
    let mut slot = spec("slot", ObjectKind::Slot, 400.0);
    slot.max_pile_size = Some(2);
    let description = SceneDescription {
        piles: vec![vec![
            "slot".to_string(),
            "a".to_string(),
            "b".to_string(),
        ]],
        objects: vec![
            slot,
            spec("a", ObjectKind::Card, 0.0),
            spec("b", ObjectKind::Card, 200.0),
        ],
    };

    let err = description.build(EngineConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        SceneError::Engine(EngineError::CapacityExceeded { capacity: 2, .. })
    ));
}

#[test]
fn test_scene_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scene.json");
    let mut description = default_layout();
    description.piles.push(vec![
        "slot_1".to_string(),
        "two_of_clubs".to_string(),
    ]);

    description.save_to_file(&path).unwrap();
    let loaded = SceneDescription::load_from_file(&path).unwrap();

    assert_eq!(loaded, description);
}

#[test]
fn test_scene_loads_from_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scene.toml");
    std::fs::write(
        &path,
        r#"
piles = [["slot", "ace"]]

[[objects]]
name = "slot"
kind = "slot"
max_pile_size = 13
rect = { x = 400.0, y = 400.0, width = 111.0, height = 160.0 }

[[objects]]
name = "ace"
texture = 1
pile_offset = { x = 0.0, y = 30.0 }
rect = { x = 0.0, y = 0.0, width = 111.0, height = 160.0 }
"#,
    )
    .unwrap();

    let description = SceneDescription::load_from_file(&path).unwrap();
    let (engine, names) = description.build(EngineConfig::default()).unwrap();

    assert_eq!(description.objects[1].kind, ObjectKind::Card);
    assert_eq!(
        engine.effective_rect(names["ace"]).unwrap().top_left(),
        Vec2::new(400.0, 430.0)
    );
    assert_eq!(
        engine
            .store()
            .capacity_of(names["slot"], Some(40))
            .unwrap(),
        Some(13)
    );
}

#[test]
fn test_missing_scene_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = SceneDescription::load_from_file(&dir.path().join("missing.json"));

    assert!(matches!(result, Err(SceneError::Settings(_))));
}

#[test]
fn test_builder_pile_and_slot() {
    let mut scene = SceneBuilder::default();
    let slot = scene.slot(Rect::new(400.0, 400.0, 100.0, 150.0)).unwrap();
    let a = scene
        .card(Rect::new(0.0, 0.0, 100.0, 150.0), Some(TextureId(7)))
        .unwrap();
    let b = scene.card(Rect::new(200.0, 0.0, 100.0, 150.0), None).unwrap();
    scene.pile(&[slot, a, b]).unwrap();
    let engine = scene.build();

    assert_eq!(engine.top_of(slot).unwrap(), b);
    assert_eq!(
        engine.effective_rect(b).unwrap().top_left(),
        Vec2::new(400.0, 448.0)
    );
}
