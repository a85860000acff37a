// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::collections::{BTreeSet, HashMap, VecDeque};

use super::{ControlKey, Engine, EngineError, EngineResult};

/// Engine state held in memory.
///
/// Unset controls read as 0.0. Writing a connected control queues
/// a change notification that the host is supposed to drain with
/// [`MemoryEngine::take_changed()`] and forward to the controller.
#[derive(Debug)]
pub struct MemoryEngine {
    values: HashMap<ControlKey, f64>,
    connected: BTreeSet<ControlKey>,
    changed: VecDeque<ControlKey>,
    available: bool,
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            connected: BTreeSet::new(),
            changed: VecDeque::new(),
            available: true,
        }
    }
}

impl MemoryEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_num_decks(num_decks: u8) -> Self {
        let mut engine = Self::new();
        engine.update(ControlKey::master(super::NUM_DECKS_ITEM), num_decks.into());
        engine
    }

    /// Simulate an engine that stops responding.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Update a value from the engine side, e.g. by another controller.
    pub fn update(&mut self, key: ControlKey, value: f64) {
        if self.connected.contains(&key) {
            self.changed.push_back(key.clone());
        }
        self.values.insert(key, value);
    }

    #[must_use]
    pub fn value(&self, key: &ControlKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    #[must_use]
    pub fn is_connected(&self, key: &ControlKey) -> bool {
        self.connected.contains(key)
    }

    pub fn connected(&self) -> impl Iterator<Item = &ControlKey> + '_ {
        self.connected.iter()
    }

    /// Drain all pending change notifications.
    pub fn take_changed(&mut self) -> Vec<ControlKey> {
        self.changed.drain(..).collect()
    }

    fn check_available(&self) -> EngineResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(EngineError::Unavailable {
                msg: "engine not responding".into(),
            })
        }
    }
}

impl Engine for MemoryEngine {
    fn get_value(&self, key: &ControlKey) -> EngineResult<f64> {
        self.check_available()?;
        Ok(self.values.get(key).copied().unwrap_or_default())
    }

    fn set_value(&mut self, key: &ControlKey, value: f64) -> EngineResult<()> {
        self.check_available()?;
        self.update(key.clone(), value);
        Ok(())
    }

    fn connect_control(&mut self, key: &ControlKey) -> EngineResult<()> {
        self.check_available()?;
        self.connected.insert(key.clone());
        Ok(())
    }

    fn disconnect_control(&mut self, key: &ControlKey) -> EngineResult<()> {
        self.check_available()?;
        self.connected.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::float_cmp)]
    fn unset_controls_read_as_zero() {
        let engine = MemoryEngine::new();
        assert_eq!(0.0, engine.get_value(&ControlKey::deck(1, "play")).unwrap());
    }

    #[test]
    fn queue_changes_of_connected_controls() {
        let play = ControlKey::deck(1, "play");
        let indicator = ControlKey::deck(1, "play_indicator");
        let mut engine = MemoryEngine::new();
        engine.connect_control(&indicator).unwrap();
        engine.set_value(&play, 1.0).unwrap();
        engine.update(indicator.clone(), 1.0);
        assert_eq!(vec![indicator.clone()], engine.take_changed());
        assert!(engine.take_changed().is_empty());
        engine.disconnect_control(&indicator).unwrap();
        engine.update(indicator, 0.0);
        assert!(engine.take_changed().is_empty());
    }

    #[test]
    fn unavailable() {
        let mut engine = MemoryEngine::new();
        engine.set_available(false);
        assert!(matches!(
            engine.set_value(&ControlKey::deck(2, "play"), 1.0),
            Err(EngineError::Unavailable { .. })
        ));
    }
}
