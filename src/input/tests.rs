// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::sync::mpsc;

use super::*;

#[test]
fn button_from_u7() {
    assert_eq!(ButtonInput::Pressed, ButtonInput::from_u7(127));
    assert_eq!(ButtonInput::Released, ButtonInput::from_u7(0));
    // Undefined values must not panic
    assert_eq!(ButtonInput::Released, ButtonInput::from_u7(1));
    assert_eq!(ButtonInput::Released, ButtonInput::from_u7(64));
    assert_eq!(ButtonInput::Released, ButtonInput::from_u7(126));
}

#[test]
fn raw_event_from_midi() {
    let event = RawEvent::from_midi(0xb0, 0x69, 0x7f);
    assert_eq!(0, event.channel);
    assert_eq!(176, event.status);
    assert_eq!(0x69, event.control);
    assert!(event.button_input().is_pressed());

    let event = RawEvent::from_midi(0x92, 0x16, 0x00);
    assert_eq!(2, event.channel);
    assert!(!event.button_input().is_pressed());
}

#[test]
fn time_stamp_display() {
    assert_eq!("1.000002", TimeStamp::from_micros(1_000_002).to_string());
}

#[test]
fn sink_forwards_events_in_order() {
    let (mut tx, rx) = mpsc::channel();
    let first = (TimeStamp::from_micros(1), RawEvent::from_midi(0x90, 0x00, 0x7f));
    let second = (TimeStamp::from_micros(2), RawEvent::from_midi(0x90, 0x00, 0x00));
    tx.sink_raw_events(&[first, second]);
    assert_eq!(Ok(first), rx.try_recv());
    assert_eq!(Ok(second), rx.try_recv());
    assert!(rx.try_recv().is_err());
}
