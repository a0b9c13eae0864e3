//! Analysis task events
//!
//! Events sent from a background analysis task to the main loop.
//! The main loop drains them without blocking and hands settles to the
//! workbench.

use compilab_core::{Mode, Outcome};
use tokio::sync::mpsc;

/// Channel sender for analysis events
pub type AnalysisSender = mpsc::UnboundedSender<AnalysisEvent>;
/// Channel receiver for analysis events
pub type AnalysisReceiver = mpsc::UnboundedReceiver<AnalysisEvent>;

/// Create an analysis event channel
pub fn channel() -> (AnalysisSender, AnalysisReceiver) {
    mpsc::unbounded_channel()
}

/// Event sent from an analysis task
#[derive(Debug, Clone)]
pub enum AnalysisEvent {
    /// Task spawned, request about to go out
    Started { request_id: u64, mode: Mode },
    /// Request finished, one way or another
    Settled {
        request_id: u64,
        mode: Mode,
        outcome: Outcome,
    },
}

impl AnalysisEvent {
    pub fn request_id(&self) -> u64 {
        match self {
            AnalysisEvent::Started { request_id, .. } => *request_id,
            AnalysisEvent::Settled { request_id, .. } => *request_id,
        }
    }

    /// Mode the request was issued under
    pub fn mode(&self) -> Mode {
        match self {
            AnalysisEvent::Started { mode, .. } => *mode,
            AnalysisEvent::Settled { mode, .. } => *mode,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisEvent::Settled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let started = AnalysisEvent::Started {
            request_id: 3,
            mode: Mode::Semantic,
        };
        assert_eq!(started.request_id(), 3);
        assert_eq!(started.mode(), Mode::Semantic);
        assert!(!started.is_terminal());

        let settled = AnalysisEvent::Settled {
            request_id: 3,
            mode: Mode::Semantic,
            outcome: Outcome::TransportError {
                detail: "refused".to_string(),
            },
        };
        assert_eq!(settled.request_id(), 3);
        assert!(settled.is_terminal());
    }
}
