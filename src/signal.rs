//! Single-slot exit signal between the input handler and the frame loop.

use crossbeam::channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};

/// Creates a connected sender/receiver pair with room for one pending code.
pub fn exit_signal() -> (ExitSender, ExitReceiver) {
    let (send, recv) = bounded(1);
    (ExitSender { send }, ExitReceiver { recv })
}

/// Raising side of the exit signal. Never blocks.
#[derive(Debug, Clone)]
pub struct ExitSender {
    send: Sender<i32>,
}

impl ExitSender {
    /// Requests an exit with `code`.
    ///
    /// Returns `false` when a code is already pending (or the receiver is
    /// gone); the new code is dropped in that case.
    pub fn raise(&self, code: i32) -> bool {
        match self.send.try_send(code) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::debug!("exit already pending, dropping code {code}");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Consuming side of the exit signal, owned by the frame loop.
#[derive(Debug)]
pub struct ExitReceiver {
    recv: Receiver<i32>,
}

impl ExitReceiver {
    /// Takes the pending exit code, if any, without blocking.
    pub fn try_take(&self) -> Option<i32> {
        match self.recv.try_recv() {
            Ok(code) => Some(code),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_pending_initially() {
        let (_send, recv) = exit_signal();
        assert_eq!(recv.try_take(), None);
    }

    #[test]
    fn raised_code_is_taken_once() {
        let (send, recv) = exit_signal();
        assert!(send.raise(3));
        assert_eq!(recv.try_take(), Some(3));
        assert_eq!(recv.try_take(), None);
    }

    #[test]
    fn second_raise_does_not_block_and_keeps_first_code() {
        let (send, recv) = exit_signal();
        assert!(send.raise(0));
        assert!(!send.raise(7));
        assert_eq!(recv.try_take(), Some(0));
    }

    #[test]
    fn cloned_senders_share_the_slot() {
        let (send, recv) = exit_signal();
        let other = send.clone();
        assert!(other.raise(1));
        assert!(!send.raise(2));
        assert_eq!(recv.try_take(), Some(1));
    }

    #[test]
    fn raise_after_receiver_dropped_does_not_block() {
        let (send, recv) = exit_signal();
        drop(recv);
        assert!(!send.raise(0));
    }
}
