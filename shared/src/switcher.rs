//! View switching state machine.
//!
//! Tracks the currently displayed view, serializes transition requests and
//! coalesces rapid-fire requests into a single pending slot (depth 1,
//! last write wins). The machine knows nothing about rendering or tweens;
//! callers act on the returned [`SwitchAction`] and feed transition
//! start/end events back in.

/// Number of predefined views.
pub const VIEW_COUNT: usize = 5;

/// Machine phase. At most one transition is ever in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning,
}

/// What the caller must do after submitting a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchAction {
    /// Request was recorded in the pending slot; no side effects.
    Deferred,
    /// Request was out of range; nothing happened.
    Ignored,
    /// Cancel in-flight tweens on the shared properties (camera
    /// translation, inner/outer scale) and run this view's transition
    /// routine.
    Start(usize),
}

#[derive(Debug)]
pub struct ViewSwitcher {
    active: usize,
    pending: Option<usize>,
    phase: Phase,
}

impl Default for ViewSwitcher {
    fn default() -> Self {
        Self {
            active: 0,
            pending: None,
            phase: Phase::Idle,
        }
    }
}

impl ViewSwitcher {
    pub fn active_view(&self) -> usize {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    /// Submit a view-switch request.
    ///
    /// Requests for the active view, or any request arriving while a
    /// transition is in flight, land in the pending slot and overwrite
    /// whatever was there. Out-of-range indices are inert. Otherwise the
    /// machine is `Transitioning` before this returns and the caller
    /// starts the routine.
    pub fn request_view(&mut self, view: usize) -> SwitchAction {
        if view == self.active || self.phase == Phase::Transitioning {
            self.pending = Some(view);
            return SwitchAction::Deferred;
        }
        if view >= VIEW_COUNT {
            return SwitchAction::Ignored;
        }
        self.phase = Phase::Transitioning;
        self.active = view;
        SwitchAction::Start(view)
    }

    /// Re-submission path for a pending request handed back by
    /// [`Self::on_transition_start`]. Unlike `request_view` it may
    /// interrupt the transition in flight; shared-tween cancellation
    /// keeps the two from fighting over the same properties.
    pub fn preempt_with(&mut self, view: usize) -> SwitchAction {
        if view == self.active || view >= VIEW_COUNT {
            return SwitchAction::Ignored;
        }
        self.phase = Phase::Transitioning;
        self.active = view;
        SwitchAction::Start(view)
    }

    /// A routine has begun irreversibly mutating shared state. Returns a
    /// pending request to re-submit (via [`Self::preempt_with`]) on the
    /// next frame, clearing the slot.
    pub fn on_transition_start(&mut self) -> Option<usize> {
        self.phase = Phase::Transitioning;
        self.pending.take()
    }

    /// The final tween of the running transition settled. Returns a
    /// still-relevant pending request to re-submit through
    /// [`Self::request_view`], so the settled scene always reflects the
    /// most recent request.
    pub fn on_transition_end(&mut self) -> Option<usize> {
        self.phase = Phase::Idle;
        match self.pending.take() {
            Some(v) if v != self.active => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_request_for_other_view_starts_synchronously() {
        let mut sw = ViewSwitcher::default();
        assert_eq!(sw.request_view(2), SwitchAction::Start(2));
        assert_eq!(sw.phase(), Phase::Transitioning);
        assert_eq!(sw.active_view(), 2);
    }

    #[test]
    fn request_for_active_view_is_deferred_without_state_change() {
        let mut sw = ViewSwitcher::default();
        assert_eq!(sw.request_view(0), SwitchAction::Deferred);
        assert_eq!(sw.phase(), Phase::Idle);
        assert_eq!(sw.active_view(), 0);
        assert_eq!(sw.pending(), Some(0));
    }

    #[test]
    fn out_of_range_request_is_inert() {
        let mut sw = ViewSwitcher::default();
        assert_eq!(sw.request_view(5), SwitchAction::Ignored);
        assert_eq!(sw.phase(), Phase::Idle);
        assert_eq!(sw.active_view(), 0);
        assert_eq!(sw.pending(), None);
    }

    #[test]
    fn requests_while_transitioning_coalesce_to_last() {
        let mut sw = ViewSwitcher::default();
        assert_eq!(sw.request_view(1), SwitchAction::Start(1));
        assert_eq!(sw.request_view(2), SwitchAction::Deferred);
        assert_eq!(sw.request_view(3), SwitchAction::Deferred);
        assert_eq!(sw.request_view(4), SwitchAction::Deferred);
        // Only the last request survives coalescing.
        assert_eq!(sw.on_transition_start(), Some(4));
        assert_eq!(sw.pending(), None);
        // The re-submission interrupts the in-flight transition.
        assert_eq!(sw.preempt_with(4), SwitchAction::Start(4));
        assert_eq!(sw.active_view(), 4);
    }

    #[test]
    fn preempt_to_active_view_is_inert() {
        let mut sw = ViewSwitcher::default();
        sw.request_view(1);
        assert_eq!(sw.preempt_with(1), SwitchAction::Ignored);
    }

    #[test]
    fn transition_end_returns_to_idle() {
        let mut sw = ViewSwitcher::default();
        sw.request_view(3);
        sw.on_transition_start();
        assert_eq!(sw.on_transition_end(), None);
        assert_eq!(sw.phase(), Phase::Idle);
    }

    #[test]
    fn late_pending_request_is_drained_at_transition_end() {
        let mut sw = ViewSwitcher::default();
        sw.request_view(1);
        sw.on_transition_start();
        // Arrives after the start event already fired.
        assert_eq!(sw.request_view(4), SwitchAction::Deferred);
        assert_eq!(sw.on_transition_end(), Some(4));
        // Ordinary re-submission now that the machine is idle.
        assert_eq!(sw.request_view(4), SwitchAction::Start(4));
    }

    #[test]
    fn pending_equal_to_active_is_dropped_at_transition_end() {
        let mut sw = ViewSwitcher::default();
        sw.request_view(1);
        sw.on_transition_start();
        assert_eq!(sw.request_view(1), SwitchAction::Deferred);
        assert_eq!(sw.on_transition_end(), None);
        assert_eq!(sw.pending(), None);
    }

    #[test]
    fn spec_scenario_zero_two_one() {
        let mut sw = ViewSwitcher::default();

        // Active view 0; requesting it again changes nothing.
        assert_eq!(sw.request_view(0), SwitchAction::Deferred);
        assert_eq!(sw.phase(), Phase::Idle);

        // Switch to the cube-grid view.
        assert_eq!(sw.request_view(2), SwitchAction::Start(2));
        assert_eq!(sw.phase(), Phase::Transitioning);
        assert_eq!(sw.active_view(), 2);

        // Mid-transition request is parked.
        assert_eq!(sw.request_view(1), SwitchAction::Deferred);
        assert_eq!(sw.pending(), Some(1));

        // View 2's start callback hands the pending request back.
        let resubmit = sw.on_transition_start();
        assert_eq!(resubmit, Some(1));
        assert_eq!(sw.pending(), None);

        // Next frame: the re-submission runs view 1's routine.
        assert_eq!(sw.preempt_with(1), SwitchAction::Start(1));
        sw.on_transition_start();
        sw.on_transition_end();
        assert_eq!(sw.active_view(), 1);
        assert_eq!(sw.phase(), Phase::Idle);
    }
}
