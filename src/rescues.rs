//! Rescue Request Lifecycle
//!
//! ```text
//! Pending ──accept──▶ Accepted ──start──▶ InProgress
//!    │                   │                    │
//!    │                   ├──complete──────────┴──▶ Completed
//!    └──cancel───────────┴──cancel──▶ Cancelled
//! ```
//!
//! `Completed` and `Cancelled` are terminal.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status of a rescue request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RescueStatus {
    /// Offered, waiting for a collector.
    Pending,

    /// Claimed by a collector with a scheduled pickup.
    Accepted,

    /// Pickup under way.
    InProgress,

    /// Picked up.
    Completed,

    /// Withdrawn before pickup.
    Cancelled,
}

impl RescueStatus {
    /// Every status.
    pub const ALL: [RescueStatus; 5] = [
        Self::Pending,
        Self::Accepted,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether a request in this status must name a collector.
    #[must_use]
    pub const fn has_collector(self) -> bool {
        matches!(self, Self::Accepted | Self::InProgress | Self::Completed)
    }

    /// Status reached by applying `transition`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] if `transition` is not legal from this status.
    pub const fn transition(
        self,
        transition: RescueTransition,
    ) -> Result<RescueStatus, InvalidTransition> {
        use RescueStatus::{Accepted, Cancelled, Completed, InProgress, Pending};
        use RescueTransition::{Accept, Cancel, Complete, Start};

        match (self, transition) {
            (Pending, Accept) => Ok(Accepted),
            (Accepted, Start) => Ok(InProgress),
            (Accepted | InProgress, Complete) => Ok(Completed),
            (Pending | Accepted, Cancel) => Ok(Cancelled),
            (Pending, Start | Complete)
            | (Accepted, Accept)
            | (InProgress, Accept | Start | Cancel)
            | (Completed | Cancelled, _) => Err(InvalidTransition {
                from: self,
                requested: transition,
            }),
        }
    }
}

/// Unrecognised status name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rescue status \"{0}\"")]
pub struct UnknownStatus(pub String);

impl FromStr for RescueStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for RescueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested change to a rescue request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RescueTransition {
    /// A collector claims the offer.
    Accept,

    /// The collector begins the pickup.
    Start,

    /// The pickup is done.
    Complete,

    /// The offer is withdrawn.
    Cancel,
}

impl RescueTransition {
    /// Statuses this transition may be applied from.
    #[must_use]
    pub const fn sources(self) -> &'static [RescueStatus] {
        match self {
            Self::Accept => &[RescueStatus::Pending],
            Self::Start => &[RescueStatus::Accepted],
            Self::Complete => &[RescueStatus::Accepted, RescueStatus::InProgress],
            Self::Cancel => &[RescueStatus::Pending, RescueStatus::Accepted],
        }
    }

    /// Status this transition leads to.
    #[must_use]
    pub const fn target(self) -> RescueStatus {
        match self {
            Self::Accept => RescueStatus::Accepted,
            Self::Start => RescueStatus::InProgress,
            Self::Complete => RescueStatus::Completed,
            Self::Cancel => RescueStatus::Cancelled,
        }
    }

    /// Verb used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
        }
    }
}

impl fmt::Display for RescueTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transition that is not legal from the request's current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {requested} a rescue request that is {from}")]
pub struct InvalidTransition {
    /// Status the request was in.
    pub from: RescueStatus,

    /// Transition that was asked for.
    pub requested: RescueTransition,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSITIONS: [RescueTransition; 4] = [
        RescueTransition::Accept,
        RescueTransition::Start,
        RescueTransition::Complete,
        RescueTransition::Cancel,
    ];

    #[test]
    fn happy_path_reaches_completed() {
        let status = RescueStatus::Pending
            .transition(RescueTransition::Accept)
            .and_then(|s| s.transition(RescueTransition::Start))
            .and_then(|s| s.transition(RescueTransition::Complete));

        assert_eq!(status, Ok(RescueStatus::Completed));
    }

    #[test]
    fn start_may_be_skipped() {
        let status = RescueStatus::Pending
            .transition(RescueTransition::Accept)
            .and_then(|s| s.transition(RescueTransition::Complete));

        assert_eq!(status, Ok(RescueStatus::Completed));
    }

    #[test]
    fn complete_on_pending_is_invalid() {
        assert_eq!(
            RescueStatus::Pending.transition(RescueTransition::Complete),
            Err(InvalidTransition {
                from: RescueStatus::Pending,
                requested: RescueTransition::Complete,
            })
        );
    }

    #[test]
    fn terminal_statuses_reject_everything() {
        for from in [RescueStatus::Completed, RescueStatus::Cancelled] {
            assert!(from.is_terminal(), "{from} should be terminal");

            for requested in TRANSITIONS {
                assert_eq!(
                    from.transition(requested),
                    Err(InvalidTransition { from, requested }),
                    "{requested} from {from} should be rejected"
                );
            }
        }
    }

    #[test]
    fn in_progress_cannot_be_cancelled() {
        assert!(
            RescueStatus::InProgress
                .transition(RescueTransition::Cancel)
                .is_err(),
            "cancel after pickup started should be rejected"
        );
    }

    #[test]
    fn sources_agree_with_transition() {
        for requested in TRANSITIONS {
            for from in RescueStatus::ALL {
                let legal = requested.sources().contains(&from);

                assert_eq!(
                    from.transition(requested).is_ok(),
                    legal,
                    "{requested} from {from}"
                );

                if legal {
                    assert_eq!(from.transition(requested), Ok(requested.target()));
                }
            }
        }
    }

    #[test]
    fn collector_presence_follows_status() {
        assert!(!RescueStatus::Pending.has_collector());
        assert!(RescueStatus::Accepted.has_collector());
        assert!(RescueStatus::InProgress.has_collector());
        assert!(RescueStatus::Completed.has_collector());
        assert!(!RescueStatus::Cancelled.has_collector());
    }

    #[test]
    fn invalid_transition_names_both_states() {
        let error = InvalidTransition {
            from: RescueStatus::Completed,
            requested: RescueTransition::Accept,
        };

        assert_eq!(
            error.to_string(),
            "cannot accept a rescue request that is completed"
        );
    }

    #[test]
    fn status_parses_storage_names() {
        for status in RescueStatus::ALL {
            assert_eq!(status.as_str().parse::<RescueStatus>(), Ok(status));
        }

        assert_eq!(
            "in-progress".parse::<RescueStatus>(),
            Err(UnknownStatus("in-progress".to_string()))
        );
    }
}
