// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use strum::IntoEnumIterator as _;

use super::*;
use crate::{MemoryEngine, Position};

fn press(behavior: &mut Behavior, engine: &mut MemoryEngine, session: &mut Session) -> Reaction {
    let mut context = Context {
        engine,
        session,
        pressed: true,
    };
    behavior.on_press(&mut context).unwrap()
}

fn release(behavior: &mut Behavior, engine: &mut MemoryEngine, session: &mut Session) -> Reaction {
    let mut context = Context {
        engine,
        session,
        pressed: false,
    };
    behavior.on_release(&mut context).unwrap()
}

#[test]
fn plain_does_nothing() {
    let mut engine = MemoryEngine::new();
    let mut session = Session::default();
    let mut behavior = Behavior::Plain;
    assert_eq!(Reaction::NONE, press(&mut behavior, &mut engine, &mut session));
    assert_eq!(Reaction::NONE, release(&mut behavior, &mut engine, &mut session));
    assert!(behavior.subscriptions().is_empty());
}

#[test]
fn toggle_light() {
    let mut engine = MemoryEngine::new();
    let mut session = Session::default();
    let mut behavior = Behavior::from(Toggle::new(Color::LoRed, Color::HiRed));
    assert_eq!(Color::LoRed, behavior.initial_color(LoopMode::default()));
    assert_eq!(
        Reaction::color(Color::HiRed),
        press(&mut behavior, &mut engine, &mut session)
    );
    assert_eq!(
        Reaction::color(Color::LoRed),
        release(&mut behavior, &mut engine, &mut session)
    );
}

#[test]
fn shift_sets_modifier_before_light() {
    let mut engine = MemoryEngine::new();
    let mut session = Session::default();
    let mut behavior = Behavior::from(Shift::default());
    assert_eq!(
        Reaction::color(Shift::PRESSED_COLOR),
        press(&mut behavior, &mut engine, &mut session)
    );
    assert!(session.is_shift_active());
    assert_eq!(
        Reaction::color(Shift::REST_COLOR),
        release(&mut behavior, &mut engine, &mut session)
    );
    assert!(!session.is_shift_active());
}

#[test]
fn page_select_requests_page_switch() {
    let mut engine = MemoryEngine::new();
    let mut session = Session::default();
    let mut behavior = Behavior::from(PageSelect::new(4));
    assert_eq!(
        Reaction::followup(Followup::SelectPage(4)),
        press(&mut behavior, &mut engine, &mut session)
    );
    assert_eq!(Reaction::NONE, release(&mut behavior, &mut engine, &mut session));
    // Switching is up to the controller
    assert_eq!(0, session.current_page());
}

#[test]
fn hotcue_keys() {
    let hotcue = Hotcue::new(3, 7);
    assert_eq!("[Channel3],hotcue_7_activate", hotcue.activate_key().to_string());
    assert_eq!("[Channel3],hotcue_7_clear", hotcue.clear_key().to_string());
    assert_eq!("[Channel3],hotcue_7_enabled", hotcue.enabled_key().to_string());
    assert_eq!(
        vec![hotcue.enabled_key().clone()],
        Behavior::from(hotcue).subscriptions()
    );
}

#[test]
#[allow(clippy::float_cmp)]
fn hotcue_clears_while_shifted() {
    let mut engine = MemoryEngine::new();
    let mut session = Session::default();
    let hotcue = Hotcue::new(1, 1);
    let mut behavior = Behavior::from(hotcue.clone());
    session.set_shift_active(true);
    assert_eq!(
        Reaction::color(Hotcue::PRESSED_COLOR),
        press(&mut behavior, &mut engine, &mut session)
    );
    assert_eq!(Some(1.0), engine.value(hotcue.clear_key()));
    assert_eq!(None, engine.value(hotcue.activate_key()));
}

#[test]
fn hotcue_led_color() {
    let mut engine = MemoryEngine::new();
    let hotcue = Hotcue::new(2, 1);
    assert_eq!(Hotcue::UNSET_COLOR, hotcue.led_color(false, &engine).unwrap());
    engine.update(hotcue.enabled_key().clone(), 1.0);
    assert_eq!(Hotcue::SET_COLOR, hotcue.led_color(false, &engine).unwrap());
    assert_eq!(Hotcue::PRESSED_COLOR, hotcue.led_color(true, &engine).unwrap());
}

#[test]
#[allow(clippy::float_cmp)]
fn transport_release_does_not_write() {
    let mut engine = MemoryEngine::new();
    let mut session = Session::default();
    let transport = Transport::new(1);
    let mut behavior = Behavior::from(transport.clone());
    assert_eq!(
        vec![transport.indicator_key().clone()],
        behavior.subscriptions()
    );
    press(&mut behavior, &mut engine, &mut session);
    assert_eq!(Some(1.0), engine.value(transport.play_key()));
    engine.update(transport.play_key().clone(), 0.5);
    assert_eq!(
        Reaction::color(Transport::STOPPED_COLOR),
        release(&mut behavior, &mut engine, &mut session)
    );
    assert_eq!(Some(0.5), engine.value(transport.play_key()));
}

#[test]
fn loop_size_keys() {
    let keys = BeatLoopSize::iter()
        .map(|size| LoopSize::new(1, size).toggle_key().item.to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            "beatloop_0.0625_toggle",
            "beatloop_0.125_toggle",
            "beatloop_0.25_toggle",
            "beatloop_0.5_toggle",
            "beatloop_1_toggle",
            "beatloop_2_toggle",
        ],
        keys
    );
    let loop_size = LoopSize::new(4, BeatLoopSize::Half);
    assert_eq!(
        "[Channel4],beatlooproll_0.5_activate",
        loop_size.roll_key().to_string()
    );
    assert_eq!(
        "[Channel4],beatloop_0.5_enabled",
        loop_size.enabled_key().to_string()
    );
    assert!(Behavior::from(loop_size).subscriptions().is_empty());
}

#[test]
fn loop_size_rest_color_depends_on_mode() {
    let behavior = Behavior::from(LoopSize::new(1, BeatLoopSize::One));
    assert_eq!(Color::HiYellow, behavior.initial_color(LoopMode::BeatloopToggle));
    assert_eq!(Color::HiOrange, behavior.initial_color(LoopMode::LoopRoll));
}

#[test]
fn loop_mode_selector_toggles_mode() {
    let mut engine = MemoryEngine::new();
    let mut session = Session::default();
    let mut behavior = Behavior::from(LoopModeSelector);
    assert_eq!(
        Reaction::color(Color::LoOrange).with_followup(Followup::RecolorLoopSizes),
        press(&mut behavior, &mut engine, &mut session)
    );
    assert_eq!(LoopMode::LoopRoll, session.loop_mode().mode());
    assert_eq!(Reaction::NONE, release(&mut behavior, &mut engine, &mut session));
    assert_eq!(
        Reaction::color(Color::LoYellow).with_followup(Followup::RecolorLoopSizes),
        press(&mut behavior, &mut engine, &mut session)
    );
    assert_eq!(LoopMode::BeatloopToggle, session.loop_mode().mode());
}

#[test]
fn loop_mode_group_members_are_unique() {
    let mut group = LoopModeGroup::default();
    let position = Position::new(0, 2, 0);
    group.register(position);
    group.register(position);
    group.register(Position::new(0, 3, 0));
    assert_eq!(2, group.members().len());
    group.unregister(position);
    assert_eq!(&[Position::new(0, 3, 0)], group.members());
}

#[test]
fn unavailable_engine() {
    let mut engine = MemoryEngine::new();
    engine.set_available(false);
    let mut session = Session::default();
    let mut behavior = Behavior::from(Transport::new(1));
    let mut context = Context {
        engine: &mut engine,
        session: &mut session,
        pressed: true,
    };
    assert!(behavior.on_press(&mut context).is_err());
}
