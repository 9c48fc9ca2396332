use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::grid::{Gesture, Grid};
use crate::layers::{ActivationTriple, LayerSizes, LayerState};
use crate::predict::{PredictError, PredictRequest, PredictionTicket};

/// Which completed predictions are allowed to overwrite the layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Every successful response is applied as it lands, even one that was
    /// issued before a newer request or before a reset.
    #[default]
    LastCompleted,
    /// Responses older than the last applied one, or issued before the last
    /// reset, are dropped.
    LatestIssued,
}

/// What happened to a completed prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Dropped by [`OrderingPolicy::LatestIssued`].
    Stale,
    /// The call failed or returned the wrong shape; layers untouched.
    Failed,
}

/// Everything the drawing view owns: the grid, the layer activations, the
/// pointer gesture, and the bookkeeping for outstanding predictions.
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    layers: LayerState,
    gesture: Gesture,
    ordering: OrderingPolicy,
    issued: u64,
    last_applied: u64,
    reset_floor: u64,
    revision: u64,
}

impl Session {
    pub fn new(grid_size: usize, sizes: LayerSizes, ordering: OrderingPolicy) -> Self {
        Session {
            grid: Grid::new(grid_size),
            layers: LayerState::new(sizes),
            gesture: Gesture::new(),
            ordering,
            issued: 0,
            last_applied: 0,
            reset_floor: 0,
            revision: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layers(&self) -> &LayerState {
        &self.layers
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_held()
    }

    pub fn ordering(&self) -> OrderingPolicy {
        self.ordering
    }

    /// Sequence number of the most recently issued prediction (0 = none yet).
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Bumped on every change a snapshot can observe. Lets a client that
    /// receives snapshots over several channels drop the older ones.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Pointer pressed on `(row, col)`: starts a gesture and paints the cell.
    pub fn press(&mut self, row: usize, col: usize) -> Option<PredictionTicket> {
        if !self.grid.contains(row, col) {
            return None;
        }
        let (r, c) = self.gesture.press(row, col);
        Some(self.brush(r, c))
    }

    /// Pointer moved over `(row, col)`. Paints only while held and only when
    /// the pointer entered a new cell.
    pub fn move_to(&mut self, row: usize, col: usize) -> Option<PredictionTicket> {
        if !self.grid.contains(row, col) {
            return None;
        }
        let (r, c) = self.gesture.enter(row, col)?;
        Some(self.brush(r, c))
    }

    pub fn release(&mut self) {
        self.gesture.release();
        self.revision += 1;
    }

    /// Pointer left the drawable area. Ends the gesture; the drawing stays.
    pub fn leave(&mut self) {
        self.gesture.release();
        self.revision += 1;
    }

    /// Clears the grid and the layers. Issues no prediction and cancels
    /// nothing already in flight.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.layers.reset();
        self.gesture.release();
        self.reset_floor = self.issued;
        self.revision += 1;
        debug!(floor = self.reset_floor, "session reset");
    }

    fn brush(&mut self, row: usize, col: usize) -> PredictionTicket {
        self.grid.apply_brush(row, col);
        self.issued += 1;
        self.revision += 1;
        PredictionTicket { seq: self.issued, request: PredictRequest::from_grid(&self.grid) }
    }

    /// Folds a completed prediction back into the layers.
    pub fn apply_prediction(&mut self, seq: u64, result: Result<ActivationTriple, PredictError>) -> ApplyOutcome {
        let triple = match result {
            Ok(t) => t,
            Err(_) => return ApplyOutcome::Failed,
        };

        if self.ordering == OrderingPolicy::LatestIssued && (seq <= self.last_applied || seq <= self.reset_floor) {
            debug!(seq, last_applied = self.last_applied, reset_floor = self.reset_floor, "dropping stale prediction");
            return ApplyOutcome::Stale;
        }

        match self.layers.replace(triple) {
            Ok(()) => {
                self.last_applied = self.last_applied.max(seq);
                self.revision += 1;
                ApplyOutcome::Applied
            }
            Err(bad) => {
                warn!(seq, expected = ?self.layers.sizes(), got = ?bad.sizes(), "prediction shape mismatch");
                ApplyOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Intensity;
    use crate::layers::LayerKind;

    fn session(ordering: OrderingPolicy) -> Session {
        Session::new(28, LayerSizes::default(), ordering)
    }

    fn filled(v: f64) -> ActivationTriple {
        let sizes = LayerSizes::default();
        ActivationTriple {
            hidden1: vec![v; sizes.hidden1],
            hidden2: vec![v; sizes.hidden2],
            output:  vec![v; sizes.output],
        }
    }

    #[test]
    fn press_paints_and_issues_a_ticket() {
        let mut s = session(OrderingPolicy::LastCompleted);
        let ticket = s.press(5, 5).unwrap();

        assert!(s.is_drawing());
        assert_eq!(ticket.seq, 1);
        assert_eq!(ticket.request.input.len(), 784);
        assert_eq!(ticket.request.input[145], 255);
        assert_eq!(s.grid().get(4, 5), Intensity::Half);
    }

    #[test]
    fn drag_paints_each_new_cell() {
        let mut s = session(OrderingPolicy::LastCompleted);
        s.press(3, 3);
        assert!(s.move_to(3, 3).is_none());
        assert_eq!(s.move_to(3, 4).unwrap().seq, 2);
        assert_eq!(s.move_to(4, 4).unwrap().seq, 3);
        s.release();
        assert!(s.move_to(10, 10).is_none());
        assert_eq!(s.grid().get(10, 10), Intensity::Off);
    }

    #[test]
    fn leaving_ends_gesture_but_keeps_drawing() {
        let mut s = session(OrderingPolicy::LastCompleted);
        s.press(1, 1);
        s.leave();
        assert!(!s.is_drawing());
        assert!(s.move_to(1, 2).is_none());
        assert_eq!(s.grid().get(1, 1), Intensity::Full);
    }

    #[test]
    fn out_of_bounds_pointer_is_ignored() {
        let mut s = session(OrderingPolicy::LastCompleted);
        assert!(s.press(28, 0).is_none());
        assert!(!s.is_drawing());
        assert!(s.grid().is_blank());
    }

    #[test]
    fn reset_zeroes_grid_and_layers_without_a_ticket() {
        let mut s = session(OrderingPolicy::LastCompleted);
        let t = s.press(5, 5).unwrap();
        assert_eq!(s.apply_prediction(t.seq, Ok(filled(0.7))), ApplyOutcome::Applied);
        let issued = s.issued();

        s.reset();
        assert!(s.grid().is_blank());
        assert!(s.layers().is_zero());
        assert!(!s.is_drawing());
        assert_eq!(s.issued(), issued);
    }

    #[test]
    fn failure_leaves_layers_untouched() {
        let mut s = session(OrderingPolicy::LastCompleted);
        let t1 = s.press(5, 5).unwrap();
        s.apply_prediction(t1.seq, Ok(filled(0.3)));
        let before = s.layers().clone();

        let t2 = s.move_to(5, 6).unwrap();
        let outcome = s.apply_prediction(t2.seq, Err(PredictError::Status(500)));
        assert_eq!(outcome, ApplyOutcome::Failed);
        assert_eq!(s.layers(), &before);
    }

    #[test]
    fn wrong_shape_counts_as_failure() {
        let mut s = session(OrderingPolicy::LastCompleted);
        let t = s.press(0, 0).unwrap();
        let mut bad = filled(0.5);
        bad.hidden1.push(0.5);
        assert_eq!(s.apply_prediction(t.seq, Ok(bad)), ApplyOutcome::Failed);
        assert!(s.layers().is_zero());
    }

    #[test]
    fn last_completed_lets_late_responses_win() {
        let mut s = session(OrderingPolicy::LastCompleted);
        let t1 = s.press(5, 5).unwrap();
        let t2 = s.move_to(5, 6).unwrap();

        assert_eq!(s.apply_prediction(t2.seq, Ok(filled(0.2))), ApplyOutcome::Applied);
        assert_eq!(s.apply_prediction(t1.seq, Ok(filled(0.1))), ApplyOutcome::Applied);
        assert_eq!(s.layers().get(LayerKind::Output)[0], 0.1);

        // Even after a reset.
        s.reset();
        assert_eq!(s.apply_prediction(t2.seq, Ok(filled(0.9))), ApplyOutcome::Applied);
        assert!(!s.layers().is_zero());
    }

    #[test]
    fn revision_moves_forward_on_every_visible_change() {
        let mut s = session(OrderingPolicy::LastCompleted);
        assert_eq!(s.revision(), 0);

        let t = s.press(5, 5).unwrap();
        let after_press = s.revision();
        assert!(s.move_to(5, 5).is_none());
        assert_eq!(s.revision(), after_press);

        s.apply_prediction(t.seq, Ok(filled(0.5)));
        let after_apply = s.revision();
        assert!(after_apply > after_press);

        s.apply_prediction(t.seq + 1, Err(PredictError::Status(500)));
        assert_eq!(s.revision(), after_apply);

        s.release();
        assert!(s.revision() > after_apply);
        let after_release = s.revision();
        s.reset();
        assert!(s.revision() > after_release);
    }

    #[test]
    fn latest_issued_drops_out_of_order_and_pre_reset_responses() {
        let mut s = session(OrderingPolicy::LatestIssued);
        let t1 = s.press(5, 5).unwrap();
        let t2 = s.move_to(5, 6).unwrap();

        assert_eq!(s.apply_prediction(t2.seq, Ok(filled(0.2))), ApplyOutcome::Applied);
        assert_eq!(s.apply_prediction(t1.seq, Ok(filled(0.1))), ApplyOutcome::Stale);
        assert_eq!(s.layers().get(LayerKind::Output)[0], 0.2);

        let t3 = s.move_to(5, 7).unwrap();
        s.reset();
        assert_eq!(s.apply_prediction(t3.seq, Ok(filled(0.9))), ApplyOutcome::Stale);
        assert!(s.layers().is_zero());

        let t4 = s.press(0, 0).unwrap();
        assert_eq!(s.apply_prediction(t4.seq, Ok(filled(0.4))), ApplyOutcome::Applied);
    }
}
