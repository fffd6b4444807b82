//! End-to-end drag sessions over every variant

use glam::Vec2;
use joystick_pan::consts::SIM_DT;
use joystick_pan::session::{self, DragScript, Stroke};
use joystick_pan::sim::{GestureEvent, JoystickPhase, ScreenEvent, ScreenState, TickInput, tick};
use joystick_pan::{Settings, Variant};

/// Spring settle time plus one map cycle, with margin
const COOLDOWN: u32 = 120 * 30;

#[test]
fn every_variant_comes_to_rest() {
    for variant in Variant::ALL {
        let settings = Settings::from_variant(variant);
        let mut state = ScreenState::new(&settings);
        let script = DragScript::random(1234, 6);
        let report = session::play(&mut state, &script, COOLDOWN);

        assert_eq!(report.strokes, 6, "{}", variant.as_str());
        assert_eq!(state.joystick.offset, Vec2::ZERO, "{}", variant.as_str());
        assert_eq!(state.joystick.phase, JoystickPhase::Idle);
        assert!(state.is_at_rest(), "{} still moving", variant.as_str());
        assert!(report.retargets > 0);
    }
}

#[test]
fn joystick_never_leaves_its_bounds() {
    for variant in Variant::ALL {
        let settings = Settings::from_variant(variant);
        let bounds = settings.joystick_bounds();
        let mut state = ScreenState::new(&settings);
        for input in DragScript::random(99, 10).inputs() {
            tick(&mut state, &input, SIM_DT);
            assert!(
                bounds.contains(state.joystick.offset),
                "{}: {:?} outside bounds",
                variant.as_str(),
                state.joystick.offset
            );
        }
    }
}

#[test]
fn same_seed_replays_identically() {
    let settings = Settings::from_variant(Variant::DiscHeading);
    let script = DragScript::random(77, 5);

    let mut a = ScreenState::new(&settings);
    let mut b = ScreenState::new(&settings);
    let report_a = session::play(&mut a, &script, 0);
    let report_b = session::play(&mut b, &script, 0);

    assert_eq!(report_a, report_b);
    assert_eq!(a.map, b.map);
    assert_eq!(a.heading, b.heading);
}

#[test]
fn only_throttled_variant_sees_stale_completions() {
    let script = DragScript {
        seed: 0,
        strokes: vec![Stroke {
            direction: 0.0,
            reach: 100.0,
            hold_ticks: 120,
            rest_ticks: 0,
        }],
    };

    let mut throttled = ScreenState::new(&Settings::from_variant(Variant::BoxThrottled));
    let report = session::play(&mut throttled, &script, COOLDOWN);
    assert!(report.stale_completions > 0);
    // Every superseded retarget is reported stale exactly once
    assert!(report.stale_completions < report.retargets);

    let mut looping = ScreenState::new(&Settings::from_variant(Variant::BoxLoop));
    let report = session::play(&mut looping, &script, COOLDOWN);
    assert_eq!(report.stale_completions, 0);
}

#[test]
fn clamped_variant_keeps_map_on_tile() {
    let settings = Settings::from_variant(Variant::DiscClamped);
    let half = settings.tile_size / 2.0;
    let mut state = ScreenState::new(&settings);
    for input in DragScript::random(5, 12).inputs() {
        tick(&mut state, &input, SIM_DT);
        assert!(state.map.x.abs() <= half && state.map.y.abs() <= half);
    }
}

#[test]
fn box_scenario_from_a_single_drag() {
    let mut state = ScreenState::new(&Settings::from_variant(Variant::BoxLoop));
    tick(&mut state, &TickInput::gesture(GestureEvent::Start), SIM_DT);
    tick(
        &mut state,
        &TickInput::gesture(GestureEvent::Move { dx: 100.0, dy: -10.0 }),
        SIM_DT,
    );
    assert_eq!(state.joystick.offset, Vec2::new(45.0, -10.0));
    let events = state.drain_events();
    assert!(events.contains(&ScreenEvent::MapRetargeted {
        generation: 1,
        target: Vec2::new(-36.0, 8.0),
    }));
}

#[test]
fn retouch_during_spring_back_takes_over() {
    let mut state = ScreenState::new(&Settings::from_variant(Variant::DiscHeading));
    let idle = TickInput::default();
    tick(&mut state, &TickInput::gesture(GestureEvent::Start), SIM_DT);
    tick(
        &mut state,
        &TickInput::gesture(GestureEvent::Move { dx: 0.0, dy: 50.0 }),
        SIM_DT,
    );
    tick(&mut state, &TickInput::gesture(GestureEvent::End), SIM_DT);
    for _ in 0..60 {
        tick(&mut state, &idle, SIM_DT);
    }
    assert_eq!(state.joystick.phase, JoystickPhase::Releasing);

    tick(
        &mut state,
        &TickInput {
            gestures: vec![GestureEvent::Start, GestureEvent::Move { dx: 30.0, dy: 0.0 }],
        },
        SIM_DT,
    );
    assert_eq!(state.joystick.phase, JoystickPhase::Dragging);
    for _ in 0..60 {
        tick(&mut state, &idle, SIM_DT);
    }
    assert_eq!(state.joystick.offset, Vec2::new(30.0, 0.0));
    let heading = state.heading.expect("heading variant");
    assert!((heading.degrees - 90.0).abs() < 1e-3);
}
