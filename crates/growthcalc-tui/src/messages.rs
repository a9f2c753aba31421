//! TUI message types (Elm Messages).

use growthcalc_core::EngineEvent;

use crate::keymap::KeyAction;

/// Messages that drive the TUI update cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum TuiMessage {
    /// A change published by the engine.
    Engine(EngineEvent),
    /// Free-form log line.
    Log(String),
    /// Tick event for periodic redraws.
    Tick,
    /// Terminal resize event.
    Resize { width: u16, height: u16 },
    /// Key press event forwarded from the event loop.
    KeyPress(KeyAction),
    /// Quit the application.
    Quit,
}

impl From<EngineEvent> for TuiMessage {
    fn from(event: EngineEvent) -> Self {
        TuiMessage::Engine(event)
    }
}
