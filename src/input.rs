//! Keyboard events and the exit key binding.

use crate::signal::ExitSender;

/// Keys the window reports. Only Escape means anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Routes key events to the exit signal.
#[derive(Debug, Clone)]
pub struct KeyHandler {
    exit: ExitSender,
}

impl KeyHandler {
    pub fn new(exit: ExitSender) -> Self {
        Self { exit }
    }

    /// Raises exit code 0 on Escape, whether pressed or released.
    ///
    /// Returns whether a new exit was queued. Other keys are ignored.
    pub fn on_key(&self, key: Key, state: KeyState) -> bool {
        match key {
            Key::Escape => {
                log::debug!("escape {state:?}, requesting exit");
                self.exit.raise(0)
            }
            Key::Other => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::exit_signal;

    #[test]
    fn escape_raises_exit() {
        let (send, recv) = exit_signal();
        let handler = KeyHandler::new(send);

        assert!(handler.on_key(Key::Escape, KeyState::Pressed));
        assert_eq!(recv.try_take(), Some(0));
    }

    #[test]
    fn other_keys_are_ignored() {
        let (send, recv) = exit_signal();
        let handler = KeyHandler::new(send);

        assert!(!handler.on_key(Key::Other, KeyState::Pressed));
        assert_eq!(recv.try_take(), None);
    }

    #[test]
    fn press_then_release_queues_a_single_exit() {
        let (send, recv) = exit_signal();
        let handler = KeyHandler::new(send);

        assert!(handler.on_key(Key::Escape, KeyState::Pressed));
        assert!(!handler.on_key(Key::Escape, KeyState::Released));
        assert_eq!(recv.try_take(), Some(0));
        assert_eq!(recv.try_take(), None);
    }
}
