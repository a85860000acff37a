// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::{sync::mpsc, time::Duration};

use djio_grid::{
    devices::{
        novation_launchpad_mini::{InputGateway, OutputGateway},
        MIDI_GRID_CONTROLLER_DESCRIPTORS,
    },
    engine::{bool_value, is_on},
    ControlKey, GridController, GridLayout, MemoryEngine, MidirDeviceManager, RawEvent, TimeStamp,
};

const NUM_DECKS: u8 = 2;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

type EventSender = mpsc::Sender<(TimeStamp, RawEvent)>;

fn main() {
    pretty_env_logger::init();
    if let Err(err) = run() {
        log::error!("{err}");
    }
}

// Stands in for the engine: the play indicator follows play.
fn emulate_play_indicators(engine: &mut MemoryEngine) {
    for deck in 1..=NUM_DECKS {
        let play = ControlKey::deck(deck, "play");
        let play_indicator = ControlKey::deck(deck, "play_indicator");
        let playing = engine.value(&play).is_some_and(is_on);
        let indicated = engine.value(&play_indicator).is_some_and(is_on);
        if playing != indicated {
            engine.update(play_indicator, bool_value(playing));
        }
    }
}

fn run() -> anyhow::Result<()> {
    let device_manager = MidirDeviceManager::new()?;
    let mut devices = device_manager.detect_devices::<InputGateway<EventSender>>(
        MIDI_GRID_CONTROLLER_DESCRIPTORS,
    );
    let Some(mut device) = devices.pop() else {
        anyhow::bail!("No grid controller found");
    };

    let (event_tx, event_rx) = mpsc::channel();
    let output_connection = device
        .connect(InputGateway::new(event_tx))
        .map_err(|err| anyhow::anyhow!("{err}"))?;
    let mut output = OutputGateway::default();
    output.attach(output_connection);

    let engine = MemoryEngine::with_num_decks(NUM_DECKS);
    let mut controller = GridController::new(GridLayout::default(), engine, output);
    controller.initialize()?;

    log::info!("Starting endless loop, press CTRL-C to exit...");
    loop {
        match event_rx.recv_timeout(POLL_INTERVAL) {
            Ok((ts, event)) => {
                log::debug!("{ts}: {event:?}");
                controller.on_incoming_event(&event);
            }
            Err(mpsc::RecvTimeoutError::Timeout) => (),
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
        emulate_play_indicators(controller.engine_mut());
        for key in controller.engine_mut().take_changed() {
            if let Err(err) = controller.on_engine_control_changed(&key) {
                log::warn!("Failed to refresh {key}: {err}");
            }
        }
        if !device_manager.is_available(&device) {
            log::warn!("Device is no longer available");
            break;
        }
    }

    if let Err(err) = controller.shutdown() {
        log::warn!("Failed to shut down: {err}");
    }
    device.disconnect();
    Ok(())
}
