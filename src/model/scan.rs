//! Scan workflow contract shared with the frontend
//!
//! The UI walks through four cosmetic progress phases before it dispatches the
//! actual analyze request; the phase timer is deliberately decoupled from real
//! pipeline latency. This module documents that contract as a state machine so
//! the backend and client agree on the sequence, the dwell time, and the
//! failure/retry path.

use std::time::Duration;

/// Fixed dwell per progress phase
pub const PHASE_DWELL: Duration = Duration::from_millis(1500);

/// The four announced progress phases, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Reading,
    Analyzing,
    Searching,
    Verifying,
}

impl ScanPhase {
    /// Next phase in the fixed sequence, or `None` after the last one
    /// (at which point the analyze request is dispatched)
    pub fn next(self) -> Option<ScanPhase> {
        match self {
            ScanPhase::Reading => Some(ScanPhase::Analyzing),
            ScanPhase::Analyzing => Some(ScanPhase::Searching),
            ScanPhase::Searching => Some(ScanPhase::Verifying),
            ScanPhase::Verifying => None,
        }
    }
}

/// Workflow state, generic over the outcome carried by `Done`
#[derive(Debug, Clone, PartialEq)]
pub enum ScanState<R> {
    Idle,
    Capturing(ScanPhase),
    Done(R),
    Failed,
}

/// Time-driven scan workflow: `Idle -> Capturing(phase) -> Done | Failed`
///
/// `Failed` is reachable only from a transport-level error while fetching the
/// pipeline result and returns to `Idle` so the user can retry. The pipeline
/// itself must tolerate being invoked after an arbitrary client-side delay.
#[derive(Debug)]
pub struct ScanWorkflow<R> {
    state: ScanState<R>,
}

impl<R> ScanWorkflow<R> {
    pub fn new() -> Self {
        Self {
            state: ScanState::Idle,
        }
    }

    pub fn state(&self) -> &ScanState<R> {
        &self.state
    }

    /// Begin a scan; only valid from `Idle`
    pub fn begin(&mut self) -> bool {
        match self.state {
            ScanState::Idle => {
                self.state = ScanState::Capturing(ScanPhase::Reading);
                true
            }
            _ => false,
        }
    }

    /// Advance to the next phase after `PHASE_DWELL` has elapsed
    ///
    /// Returns the newly entered phase, or `None` when the sequence is
    /// exhausted and the analyze request should be dispatched.
    pub fn advance_phase(&mut self) -> Option<ScanPhase> {
        if let ScanState::Capturing(phase) = self.state {
            if let Some(next) = phase.next() {
                self.state = ScanState::Capturing(next);
                return Some(next);
            }
        }
        None
    }

    /// Record the pipeline outcome; only valid while capturing
    pub fn complete(&mut self, outcome: R) -> bool {
        match self.state {
            ScanState::Capturing(_) => {
                self.state = ScanState::Done(outcome);
                true
            }
            _ => false,
        }
    }

    /// Record a transport failure while fetching the result
    pub fn fail(&mut self) -> bool {
        match self.state {
            ScanState::Capturing(_) => {
                self.state = ScanState::Failed;
                true
            }
            _ => false,
        }
    }

    /// Return to `Idle` for a retry or a fresh scan
    pub fn reset(&mut self) -> bool {
        match self.state {
            ScanState::Done(_) | ScanState::Failed => {
                self.state = ScanState::Idle;
                true
            }
            _ => false,
        }
    }
}

impl<R> Default for ScanWorkflow<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_sequence() {
        let mut workflow: ScanWorkflow<()> = ScanWorkflow::new();
        assert!(workflow.begin());
        assert_eq!(workflow.state(), &ScanState::Capturing(ScanPhase::Reading));

        assert_eq!(workflow.advance_phase(), Some(ScanPhase::Analyzing));
        assert_eq!(workflow.advance_phase(), Some(ScanPhase::Searching));
        assert_eq!(workflow.advance_phase(), Some(ScanPhase::Verifying));
        // Sequence exhausted: time to dispatch the real request
        assert_eq!(workflow.advance_phase(), None);
        assert_eq!(
            workflow.state(),
            &ScanState::Capturing(ScanPhase::Verifying)
        );
    }

    #[test]
    fn test_begin_only_from_idle() {
        let mut workflow: ScanWorkflow<()> = ScanWorkflow::new();
        assert!(workflow.begin());
        assert!(!workflow.begin());
    }

    #[test]
    fn test_complete_carries_outcome() {
        let mut workflow: ScanWorkflow<&str> = ScanWorkflow::new();
        workflow.begin();
        while workflow.advance_phase().is_some() {}
        assert!(workflow.complete("verdict"));
        assert_eq!(workflow.state(), &ScanState::Done("verdict"));

        assert!(workflow.reset());
        assert_eq!(workflow.state(), &ScanState::Idle);
    }

    #[test]
    fn test_failure_returns_to_idle_for_retry() {
        let mut workflow: ScanWorkflow<()> = ScanWorkflow::new();
        workflow.begin();
        assert!(workflow.fail());
        assert_eq!(workflow.state(), &ScanState::Failed);

        assert!(workflow.reset());
        assert!(workflow.begin());
    }

    #[test]
    fn test_fail_not_reachable_outside_capture() {
        let mut workflow: ScanWorkflow<()> = ScanWorkflow::new();
        assert!(!workflow.fail());
        assert!(!workflow.complete(()));
    }

    #[test]
    fn test_dwell_is_fixed() {
        assert_eq!(PHASE_DWELL, Duration::from_millis(1500));
    }
}
