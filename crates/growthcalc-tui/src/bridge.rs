//! Bridge between engine events and TUI messages.

use crossbeam_channel::Sender;

use growthcalc_core::{EngineEvent, EngineObserver};

use crate::messages::TuiMessage;

/// Engine observer that forwards every event into the TUI channel.
///
/// Sending never blocks the engine's worker; events are dropped when the
/// channel is full or the TUI has gone away.
pub struct TuiBridgeObserver {
    tx: Sender<TuiMessage>,
}

impl TuiBridgeObserver {
    #[must_use]
    pub fn new(tx: Sender<TuiMessage>) -> Self {
        Self { tx }
    }
}

impl EngineObserver for TuiBridgeObserver {
    fn on_event(&self, event: &EngineEvent) {
        let _ = self.tx.try_send(TuiMessage::Engine(event.clone()));
    }
}
