//! Host state shared between the caller and the frame loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use fathom_core::commands::OperatorCommand;
use fathom_core::state::SessionSnapshot;
use fathom_core::types::ControlInput;

/// Messages sent to the frame loop thread.
#[derive(Debug)]
pub enum FrameLoopCommand {
    /// An operator command to forward to the simulation engine.
    Operator(OperatorCommand),
    /// Replace the control input used from the next frame on.
    Control(ControlInput),
    /// Hand steering to the scripted autopilot, or take it back.
    SetAutopilot(bool),
    /// Shut down the frame loop thread gracefully.
    Shutdown,
}

/// Shared host state.
///
/// `mpsc::Sender` is not `Sync`, so it sits behind a `Mutex`; the latest
/// snapshot is shared with the loop thread through an `Arc`.
pub struct AppState {
    /// `None` until the frame loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<FrameLoopCommand>>>,
    /// Updated by the frame loop after each tick.
    pub latest_snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send a message to the frame loop. Returns false if it is not running.
    pub fn send(&self, command: FrameLoopCommand) -> bool {
        match self.command_tx.lock() {
            Ok(guard) => guard.as_ref().is_some_and(|tx| tx.send(command).is_ok()),
            Err(_) => false,
        }
    }

    /// Clone of the most recent snapshot, if any.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
    }

    #[test]
    fn test_send_without_loop_fails() {
        let state = AppState::new();
        assert!(!state.send(FrameLoopCommand::Shutdown));
        assert!(state.snapshot().is_none());
    }

    #[test]
    fn test_send_reaches_receiver() {
        let state = AppState::new();
        let (tx, rx) = mpsc::channel();
        *state.command_tx.lock().unwrap() = Some(tx);

        assert!(state.send(FrameLoopCommand::Operator(OperatorCommand::StartMission)));
        assert!(matches!(
            rx.try_recv(),
            Ok(FrameLoopCommand::Operator(OperatorCommand::StartMission))
        ));
    }
}
