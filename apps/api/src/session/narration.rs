//! Narration playback control: a small state machine mirroring the client's
//! play/pause/stop control. Generation is never cancelled by it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Playback {
    #[default]
    Idle,
    Speaking {
        text: String,
    },
    Paused {
        text: String,
    },
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackAction {
    Play,
    Pause,
    Resume,
    Stop,
    Finish,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot {action} narration while {state}")]
pub struct InvalidTransition {
    pub action: &'static str,
    pub state: &'static str,
}

impl Playback {
    fn name(&self) -> &'static str {
        match self {
            Playback::Idle => "idle",
            Playback::Speaking { .. } => "speaking",
            Playback::Paused { .. } => "paused",
            Playback::Cancelled => "cancelled",
        }
    }

    fn invalid(&self, action: &'static str) -> InvalidTransition {
        InvalidTransition {
            action,
            state: self.name(),
        }
    }

    /// Starts an utterance, replacing whatever was playing.
    pub fn play(&mut self, text: String) {
        *self = Playback::Speaking { text };
    }

    pub fn pause(&mut self) -> Result<(), InvalidTransition> {
        match std::mem::take(self) {
            Playback::Speaking { text } => {
                *self = Playback::Paused { text };
                Ok(())
            }
            other => {
                let err = other.invalid("pause");
                *self = other;
                Err(err)
            }
        }
    }

    pub fn resume(&mut self) -> Result<(), InvalidTransition> {
        match std::mem::take(self) {
            Playback::Paused { text } => {
                *self = Playback::Speaking { text };
                Ok(())
            }
            other => {
                let err = other.invalid("resume");
                *self = other;
                Err(err)
            }
        }
    }

    /// Halts playback from any state.
    pub fn stop(&mut self) {
        *self = Playback::Cancelled;
    }

    /// The utterance ended on its own.
    pub fn finish(&mut self) -> Result<(), InvalidTransition> {
        if !matches!(self, Playback::Speaking { .. }) {
            return Err(self.invalid("finish"));
        }
        *self = Playback::Idle;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Playback::Idle;
    }
}
