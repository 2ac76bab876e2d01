//! Content domain: tests for parsing and validation.

use ron::Options;

use super::data::*;
use super::registry::ContentRegistry;

fn parse_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn hitbox(id: &str) -> HitboxConfigDef {
    HitboxConfigDef {
        id: id.to_string(),
        payload: HitPayloadDef {
            damage: 5.0,
            ..HitPayloadDef::default()
        },
        target: HitTarget::Enemies,
        radius: 12.0,
        local_offset: XY::default(),
        flip_with_facing: true,
        life_seconds: 0.2,
        projectile: None,
    }
}

fn variant(id: &str) -> ActionVariantDef {
    ActionVariantDef {
        id: id.to_string(),
        context: ActionContext::Ground,
        direction: ActionDirection::Neutral,
        startup: 0.1,
        active: 0.1,
        recovery: 0.2,
        can_cancel_during_recovery: false,
        cancel_window_start: -1.0,
        cancel_window_end: -1.0,
        cancel_tags_granted: Vec::new(),
        cancel_tags_required: Vec::new(),
        zero_velocity_on_start: true,
        preserve_horizontal_momentum: false,
        lock_facing: true,
        lock_move_keys: true,
        gravity_mode: GravityMode::Normal,
        motion_events: Vec::new(),
        hitbox_events: Vec::new(),
        callback_hitbox: None,
        animation_trigger: String::new(),
    }
}

fn set(id: &str, variants: Vec<ActionVariantDef>) -> ActionSetDef {
    ActionSetDef {
        id: id.to_string(),
        variants,
    }
}

#[test]
fn test_action_set_ron_shape_parses() {
    let source = r#"
        (
            schema_version: 1,
            items: [
                (
                    id: "set_test",
                    variants: [
                        (
                            id: "poke",
                            context: Ground,
                            direction: Horizontal,
                            startup: 0.1,
                            active: 0.05,
                            recovery: 0.2,
                            cancel_window_start: 0.1,
                            cancel_window_end: 0.2,
                            cancel_tags_granted: ["chain"],
                            gravity_mode: SuspendZeroVertical,
                            motion_events: [
                                (time: 0.05, velocity: (x: 200.0, y: 0.0), apply: Add),
                            ],
                            hitbox_events: [
                                (time: 0.1, hitbox: "hb", duration_override: 0.25),
                            ],
                            animation_trigger: "Poke",
                        ),
                    ],
                ),
            ],
        )
    "#;

    let parsed: DataFile<ActionSetDef> = parse_options().from_str(source).unwrap();
    assert_eq!(parsed.items.len(), 1);
    let v = &parsed.items[0].variants[0];
    assert_eq!(v.direction, ActionDirection::Horizontal);
    assert_eq!(v.gravity_mode, GravityMode::SuspendZeroVertical);
    assert_eq!(v.hitbox_events[0].duration_override, Some(0.25));
    assert_eq!(v.motion_events[0].velocity, XY { x: 200.0, y: 0.0 });
    // Omitted fields take their defaults
    assert!(v.lock_facing);
    assert!(!v.can_cancel_during_recovery);
}

#[test]
fn test_hitbox_ron_shape_parses() {
    let source = r#"
        (
            schema_version: 1,
            items: [
                (
                    id: "hb_test",
                    payload: (
                        damage: 6.0,
                        hitstun_seconds: 0.2,
                        knockback: (x: 150.0, y: 40.0),
                        reset_vertical_velocity: true,
                    ),
                    radius: 14.0,
                    local_offset: (x: 20.0, y: 4.0),
                    life_seconds: 0.1,
                    projectile: (speed: 600.0),
                ),
            ],
        )
    "#;

    let parsed: DataFile<HitboxConfigDef> = parse_options().from_str(source).unwrap();
    let hb = &parsed.items[0];
    assert_eq!(hb.target, HitTarget::Enemies);
    assert!(hb.payload.reset_vertical_velocity);
    assert!(!hb.payload.ignore_iframes);
    assert_eq!(hb.projectile.as_ref().unwrap().speed, 600.0);
}

#[test]
fn test_registry_drops_variant_with_negative_phase() {
    let mut bad = variant("bad");
    bad.active = -0.1;

    let (registry, errors) =
        ContentRegistry::from_defs(vec![set("s", vec![bad, variant("good")])], Vec::new(), Vec::new());

    assert_eq!(errors.len(), 1);
    assert_eq!(registry.action_set("s").unwrap().variants.len(), 1);
    assert_eq!(registry.action_set("s").unwrap().variants[0].id, "good");
}

#[test]
fn test_registry_drops_variant_with_unknown_hitbox() {
    let mut bad = variant("bad");
    bad.hitbox_events.push(HitboxEventDef {
        time: 0.1,
        hitbox: "hb_missing".to_string(),
        duration_override: None,
    });

    let (registry, errors) =
        ContentRegistry::from_defs(vec![set("s", vec![bad])], vec![hitbox("hb")], Vec::new());

    assert_eq!(errors.len(), 1);
    assert!(registry.action_set("s").unwrap().variants.is_empty());
}

#[test]
fn test_registry_drops_event_outside_timeline() {
    let mut bad = variant("bad");
    bad.hitbox_events.push(HitboxEventDef {
        time: 5.0,
        hitbox: "hb".to_string(),
        duration_override: None,
    });

    let (_, errors) =
        ContentRegistry::from_defs(vec![set("s", vec![bad])], vec![hitbox("hb")], Vec::new());
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_registry_rejects_dual_hitbox_timing_sources() {
    let mut bad = variant("bad");
    bad.hitbox_events.push(HitboxEventDef {
        time: 0.1,
        hitbox: "hb".to_string(),
        duration_override: None,
    });
    bad.callback_hitbox = Some("hb".to_string());

    let (_, errors) =
        ContentRegistry::from_defs(vec![set("s", vec![bad])], vec![hitbox("hb")], Vec::new());
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_registry_drops_rag_with_missing_set() {
    let rags = vec![
        RagDef {
            id: "ok".to_string(),
            name: "Ok".to_string(),
            special_set: Some("s".to_string()),
            trick_set: None,
        },
        RagDef {
            id: "broken".to_string(),
            name: "Broken".to_string(),
            special_set: Some("s_missing".to_string()),
            trick_set: None,
        },
    ];

    let (registry, errors) =
        ContentRegistry::from_defs(vec![set("s", vec![variant("v")])], Vec::new(), rags);

    assert_eq!(errors.len(), 1);
    assert_eq!(registry.rags.len(), 1);
    assert_eq!(registry.rags[0].id, "ok");
}

#[test]
fn test_registry_drops_degenerate_hitboxes() {
    let mut flat = hitbox("hb_flat");
    flat.radius = 0.0;
    let mut hot = hitbox("hb_negative");
    hot.payload.damage = -1.0;

    let (registry, errors) =
        ContentRegistry::from_defs(Vec::new(), vec![flat, hot, hitbox("hb_ok")], Vec::new());

    assert_eq!(errors.len(), 2);
    assert!(registry.hitbox("hb_ok").is_some());
    assert!(registry.hitbox("hb_flat").is_none());
}

#[test]
fn test_slot_lookup_is_exact() {
    let mut horizontal = variant("h");
    horizontal.direction = ActionDirection::Horizontal;
    let (registry, _) =
        ContentRegistry::from_defs(vec![set("s", vec![horizontal])], Vec::new(), Vec::new());

    let entry = registry.action_set("s").unwrap();
    assert!(entry.slot(ActionContext::Ground, ActionDirection::Horizontal).is_some());
    // The registry itself never falls back; that rule lives in the resolver
    assert!(entry.slot(ActionContext::Ground, ActionDirection::Neutral).is_none());
    assert!(entry.slot(ActionContext::Air, ActionDirection::Horizontal).is_none());
}
