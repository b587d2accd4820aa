//! Cover: a lid that is either open or closed.
//!
//! Open and close must alternate: opening an open cover (or closing a
//! closed one) is rejected before the controller is asked to move.

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::error::{AquaHubError, InvariantViolation};
use crate::subsystem::{Command, Reservation, Subsystem};
use crate::time::{Timestamp, now};

/// Shadow state of the cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverState {
    pub is_open: bool,
    pub last_changed: Timestamp,
}

impl CoverState {
    /// `"open"` or `"closed"`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        if self.is_open { "open" } else { "closed" }
    }
}

/// Commands accepted by the cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverCommand {
    Open,
    Close,
}

impl Command for CoverCommand {
    fn endpoint(&self) -> Endpoint {
        match self {
            Self::Open => Endpoint::Open,
            Self::Close => Endpoint::Close,
        }
    }

    fn payload(&self) -> Option<serde_json::Value> {
        None
    }

    fn success_message(&self) -> &'static str {
        match self {
            Self::Open => "cover opened",
            Self::Close => "cover closed",
        }
    }
}

/// The cover subsystem. Starts closed.
#[derive(Debug)]
pub struct Cover {
    state: CoverState,
}

impl Default for Cover {
    fn default() -> Self {
        Self {
            state: CoverState {
                is_open: false,
                last_changed: now(),
            },
        }
    }
}

impl Subsystem for Cover {
    const NAME: &'static str = "cover";

    type State = CoverState;
    type Command = CoverCommand;

    fn validate(&self, command: &CoverCommand) -> Result<(), AquaHubError> {
        match (command, self.state.is_open) {
            (CoverCommand::Open, true) => Err(InvariantViolation::AlreadyOpen.into()),
            (CoverCommand::Close, false) => Err(InvariantViolation::AlreadyClosed.into()),
            _ => Ok(()),
        }
    }

    fn reserve(&self, command: &CoverCommand) -> Reservation<CoverState> {
        Reservation::new(CoverState {
            is_open: matches!(command, CoverCommand::Open),
            last_changed: self.state.last_changed,
        })
    }

    fn commit(&mut self, reservation: Reservation<CoverState>) {
        self.state = reservation.into_inner();
        self.state.last_changed = now();
    }

    fn peek(&self) -> CoverState {
        self.state.clone()
    }
}
