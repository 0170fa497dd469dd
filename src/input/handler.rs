use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{FutureExt, StreamExt};
use tracing::warn;

use crate::game::InputSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Stop,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Stop;
        }

        match key.code {
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Stop,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Stop,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Stop-key poller over the terminal event stream.
///
/// Polling drains whatever events are already queued and never waits for
/// new ones.
pub struct KeyboardInput {
    events: EventStream,
    handler: InputHandler,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self {
            events: EventStream::new(),
            handler: InputHandler::new(),
        }
    }

    /// Wait for the next key press, whatever the key
    pub async fn next_key_press(&mut self) {
        while let Some(event) = self.events.next().await {
            if let Ok(Event::Key(key)) = event {
                if key.kind == KeyEventKind::Press {
                    return;
                }
            }
        }
    }
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for KeyboardInput {
    fn poll_stop_requested(&mut self) -> bool {
        let mut stop = false;
        while let Some(Some(event)) = self.events.next().now_or_never() {
            match event {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if self.handler.handle_key_event(key) == KeyAction::Stop {
                        stop = true;
                    }
                }
                Ok(_) => {}
                Err(err) => warn!(%err, "failed to read terminal event"),
            }
        }
        stop
    }
}
