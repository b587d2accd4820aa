//! State coordinator: keeps the shadow state in step with the controller.
//!
//! Every subsystem sits behind its own [`Mutex`]. The lock is held for the
//! whole validate → reserve → remote call → commit sequence, so two requests
//! against the same subsystem can never both pass validation before one of
//! them commits. Different subsystems lock independently.
//!
//! The shadow state only moves after the controller confirms a command. A
//! failed or timed-out remote call drops the reservation and the committed
//! state stays exactly as it was. This includes `reset`: an unconfirmed reset
//! does not zero the reservoir locally.
//!
//! Each operation runs under a single deadline that covers waiting for the
//! lock as well as the remote call. Past the deadline the operation fails
//! with [`RemoteErrorKind::Timeout`] and nothing is committed.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;

use aquahub_domain::cover::{Cover, CoverCommand, CoverState};
use aquahub_domain::endpoint::Endpoint;
use aquahub_domain::error::{AquaHubError, RemoteError, RemoteErrorKind};
use aquahub_domain::reservoir::{Reservoir, ReservoirCommand, ReservoirState};
use aquahub_domain::subsystem::{Command, Subsystem};
use aquahub_domain::threshold::{Threshold, ThresholdCommand, ThresholdState};

use crate::ports::RemoteDevice;

/// A confirmed and committed command.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<S> {
    /// Human-readable confirmation.
    pub message: &'static str,
    /// Shadow state right after the commit.
    pub new_state: S,
    /// Controller response body, unmodified.
    pub remote_response: serde_json::Value,
}

/// Local shadow state merged with the controller's own status report.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport<S> {
    pub local: S,
    pub remote: serde_json::Value,
}

/// A command addressed to one of the three subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCommand {
    Cover(CoverCommand),
    Reservoir(ReservoirCommand),
    Threshold(ThresholdCommand),
}

impl DeviceCommand {
    /// Name of the targeted subsystem.
    #[must_use]
    pub fn subsystem(&self) -> &'static str {
        match self {
            Self::Cover(_) => Cover::NAME,
            Self::Reservoir(_) => Reservoir::NAME,
            Self::Threshold(_) => Threshold::NAME,
        }
    }
}

/// Result of [`StateCoordinator::execute`], tagged by subsystem.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Cover(Outcome<CoverState>),
    Reservoir(Outcome<ReservoirState>),
    Threshold(Outcome<ThresholdState>),
}

impl CommandOutcome {
    /// Confirmation message of the underlying outcome.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Cover(outcome) => outcome.message,
            Self::Reservoir(outcome) => outcome.message,
            Self::Threshold(outcome) => outcome.message,
        }
    }
}

/// Deadline applied to every operation unless overridden.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

/// Sole owner of the cover, reservoir and threshold shadow states.
pub struct StateCoordinator<R> {
    remote: R,
    deadline: Duration,
    cover: Mutex<Cover>,
    reservoir: Mutex<Reservoir>,
    threshold: Mutex<Threshold>,
}

impl<R: RemoteDevice> StateCoordinator<R> {
    /// Create a coordinator that takes ownership of the given subsystems.
    pub fn new(remote: R, cover: Cover, reservoir: Reservoir, threshold: Threshold) -> Self {
        Self {
            remote,
            deadline: DEFAULT_DEADLINE,
            cover: Mutex::new(cover),
            reservoir: Mutex::new(reservoir),
            threshold: Mutex::new(threshold),
        }
    }

    /// Create a coordinator with every subsystem in its initial state:
    /// cover closed, reservoir full, threshold at its default.
    pub fn with_defaults(remote: R) -> Self {
        Self::new(
            remote,
            Cover::default(),
            Reservoir::default(),
            Threshold::default(),
        )
    }

    /// Bound every operation, lock wait included, by `deadline`.
    ///
    /// Should match the remote client's own request timeout.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Configured per-operation deadline.
    #[must_use]
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Run any subsystem command.
    ///
    /// # Errors
    ///
    /// See [`AquaHubError`]: validation and invariant errors are raised
    /// before the controller is contacted; remote errors leave the shadow
    /// state unchanged.
    pub async fn execute(&self, command: DeviceCommand) -> Result<CommandOutcome, AquaHubError> {
        match command {
            DeviceCommand::Cover(cmd) => self.run(&self.cover, cmd).await.map(CommandOutcome::Cover),
            DeviceCommand::Reservoir(cmd) => self
                .run(&self.reservoir, cmd)
                .await
                .map(CommandOutcome::Reservoir),
            DeviceCommand::Threshold(cmd) => self
                .run(&self.threshold, cmd)
                .await
                .map(CommandOutcome::Threshold),
        }
    }

    /// Open the cover.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the cover is already open, or a
    /// remote error if the controller does not confirm.
    pub async fn open_cover(&self) -> Result<Outcome<CoverState>, AquaHubError> {
        self.run(&self.cover, CoverCommand::Open).await
    }

    /// Close the cover.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the cover is already closed, or a
    /// remote error if the controller does not confirm.
    pub async fn close_cover(&self) -> Result<Outcome<CoverState>, AquaHubError> {
        self.run(&self.cover, CoverCommand::Close).await
    }

    /// Dispense `amount` liters.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive amount, an invariant
    /// violation when less than `amount` remains, or a remote error.
    pub async fn supply(&self, amount: i64) -> Result<Outcome<ReservoirState>, AquaHubError> {
        self.run(&self.reservoir, ReservoirCommand::Supply { amount })
            .await
    }

    /// Refill the reservoir to capacity.
    ///
    /// # Errors
    ///
    /// Returns a remote error if the controller does not confirm.
    pub async fn refill(&self) -> Result<Outcome<ReservoirState>, AquaHubError> {
        self.run(&self.reservoir, ReservoirCommand::Refill).await
    }

    /// Mark the reservoir as empty.
    ///
    /// # Errors
    ///
    /// Returns a remote error if the controller does not confirm; the level
    /// is then left as it was.
    pub async fn reset_reservoir(&self) -> Result<Outcome<ReservoirState>, AquaHubError> {
        self.run(&self.reservoir, ReservoirCommand::Reset).await
    }

    /// Change the trigger threshold.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a value outside `1..=1023`, or a
    /// remote error if the controller does not confirm.
    pub async fn set_threshold(&self, value: i64) -> Result<Outcome<ThresholdState>, AquaHubError> {
        self.run(&self.threshold, ThresholdCommand::Set { value })
            .await
    }

    /// Cover shadow state together with the controller's status report.
    ///
    /// # Errors
    ///
    /// Returns a remote error if the status query fails.
    pub async fn cover_status(&self) -> Result<StatusReport<CoverState>, AquaHubError> {
        self.query(&self.cover).await
    }

    /// Reservoir shadow state together with the controller's status report.
    ///
    /// # Errors
    ///
    /// Returns a remote error if the status query fails.
    pub async fn reservoir_status(&self) -> Result<StatusReport<ReservoirState>, AquaHubError> {
        self.query(&self.reservoir).await
    }

    /// Current threshold. Local only, never contacts the controller.
    pub async fn threshold(&self) -> ThresholdState {
        self.threshold.lock().await.peek()
    }

    #[tracing::instrument(skip_all, fields(subsystem = S::NAME, endpoint = %command.endpoint()))]
    async fn run<S>(
        &self,
        slot: &Mutex<S>,
        command: S::Command,
    ) -> Result<Outcome<S::State>, AquaHubError>
    where
        S: Subsystem,
    {
        let endpoint = command.endpoint();
        self.within_deadline(endpoint, async {
            let mut subsystem = slot.lock().await;

            let reservation = subsystem.prepare(&command).inspect_err(|err| {
                tracing::debug!(error = %err, "command rejected");
            })?;

            let remote_response = match self.remote.send(endpoint, command.payload()).await {
                Ok(response) => response,
                Err(err) => {
                    tracing::warn!(error = %err, kind = %err.kind, "controller did not confirm, state unchanged");
                    return Err(AquaHubError::from(err));
                }
            };

            subsystem.commit(reservation);
            tracing::info!("command committed");

            Ok::<_, AquaHubError>(Outcome {
                message: command.success_message(),
                new_state: subsystem.peek(),
                remote_response,
            })
        })
        .await
    }

    #[tracing::instrument(skip_all, fields(subsystem = S::NAME))]
    async fn query<S>(&self, slot: &Mutex<S>) -> Result<StatusReport<S::State>, AquaHubError>
    where
        S: Subsystem,
    {
        self.within_deadline(Endpoint::Status, async {
            let remote = self
                .remote
                .send(Endpoint::Status, None)
                .await
                .inspect_err(|err| tracing::warn!(error = %err, "status query failed"))?;
            let local = slot.lock().await.peek();
            Ok::<_, AquaHubError>(StatusReport { local, remote })
        })
        .await
    }

    /// Dropping `operation` on expiry releases the lock and any pending
    /// reservation.
    async fn within_deadline<T>(
        &self,
        endpoint: Endpoint,
        operation: impl Future<Output = Result<T, AquaHubError>>,
    ) -> Result<T, AquaHubError> {
        match tokio::time::timeout(self.deadline, operation).await {
            Ok(result) => result,
            Err(elapsed) => {
                tracing::warn!(
                    deadline = ?self.deadline,
                    "operation deadline exceeded, state unchanged"
                );
                Err(RemoteError::new(endpoint, RemoteErrorKind::Timeout)
                    .with_source(elapsed)
                    .into())
            }
        }
    }
}
