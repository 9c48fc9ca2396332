use std::io::{Cursor, Read};
use std::sync::{Arc, MutexGuard};

use tiny_http::{Request, Response};
use tracing::{debug, warn};

use digit_viz::{dispatch, ApplyOutcome, PredictionTicket, Predictor};

use crate::routes::{bad_request, json_response};
use crate::state::{lock, SharedState, StudioState};
use crate::util::form::parse_cell;

// ---------------------------------------------------------------------------
// POST /draw/press  and  POST /draw/move
// ---------------------------------------------------------------------------

pub fn handle_press(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    handle_cell(request, state, |st, row, col| st.session.press(row, col))
}

pub fn handle_move(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    handle_cell(request, state, |st, row, col| st.session.move_to(row, col))
}

fn handle_cell<F>(request: &mut Request, state: SharedState, paint: F) -> Response<Cursor<Vec<u8>>>
where
    F: FnOnce(&mut StudioState, usize, usize) -> Option<PredictionTicket>,
{
    let body = match read_body(request.as_reader()) {
        Ok(body) => body,
        Err(e) => {
            warn!(url = %request.url(), error = %e, "unreadable draw request body");
            return bad_request("request body is not valid UTF-8 form data");
        }
    };

    let mut st = lock(&state);
    let (row, col) = match parse_cell(&body, st.session.grid().size()) {
        Ok(cell) => cell,
        Err(reason) => {
            warn!(url = %request.url(), %reason, "rejected draw request");
            return bad_request(&reason);
        }
    };

    let ticket = paint(&mut *st, row, col);
    finish(st, ticket, &state)
}

fn read_body<R: Read + ?Sized>(reader: &mut R) -> std::io::Result<String> {
    let mut body = String::new();
    reader.read_to_string(&mut body)?;
    Ok(body)
}

// ---------------------------------------------------------------------------
// POST /draw/release  and  POST /draw/leave
// ---------------------------------------------------------------------------

pub fn handle_release(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = lock(&state);
    st.session.release();
    finish(st, None, &state)
}

pub fn handle_leave(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = lock(&state);
    st.session.leave();
    finish(st, None, &state)
}

// ---------------------------------------------------------------------------
// POST /reset
// ---------------------------------------------------------------------------

/// Zeroes grid and layers. No prediction is issued; requests already in
/// flight still land according to the ordering policy.
pub fn handle_reset(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = lock(&state);
    st.session.reset();
    st.broadcast();
    finish(st, None, &state)
}

// ---------------------------------------------------------------------------
// Shared tail: answer with the snapshot, then fire the prediction.
// ---------------------------------------------------------------------------

fn finish(
    st: MutexGuard<'_, StudioState>,
    ticket: Option<PredictionTicket>,
    state: &SharedState,
) -> Response<Cursor<Vec<u8>>> {
    let snapshot  = st.snapshot().to_json();
    let predictor = st.predictor.clone();
    drop(st);

    if let Some(ticket) = ticket {
        spawn_prediction(predictor, ticket, state.clone());
    }
    json_response(snapshot)
}

/// Runs the prediction on its own thread; the gesture handler has already
/// returned by the time it completes.
pub fn spawn_prediction(predictor: Arc<dyn Predictor>, ticket: PredictionTicket, state: SharedState) {
    dispatch(predictor, ticket, move |seq, result| {
        let mut st = lock(&state);
        match st.session.apply_prediction(seq, result) {
            ApplyOutcome::Applied => st.broadcast(),
            ApplyOutcome::Stale   => debug!(seq, "stale prediction ignored"),
            ApplyOutcome::Failed  => debug!(seq, "keeping previous activations"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use digit_viz::{ActivationTriple, LayerSizes, PredictError, PredictRequest, Snapshot, VizConfig};
    use tiny_http::{Method, TestRequest};

    struct Fixed(Result<ActivationTriple, PredictError>);

    impl Predictor for Fixed {
        fn predict(&self, _: &PredictRequest) -> Result<ActivationTriple, PredictError> {
            self.0.clone()
        }
    }

    fn studio(result: Result<ActivationTriple, PredictError>) -> SharedState {
        Arc::new(Mutex::new(StudioState::new(VizConfig::default(), Arc::new(Fixed(result)))))
    }

    fn halves() -> ActivationTriple {
        let sizes = LayerSizes::default();
        ActivationTriple { hidden1: vec![0.5; sizes.hidden1], hidden2: vec![0.5; sizes.hidden2], output: vec![0.5; sizes.output] }
    }

    #[test]
    fn completed_prediction_is_broadcast() {
        let state = studio(Ok(halves()));
        let (rx, ticket, predictor) = {
            let mut st = lock(&state);
            let rx = st.subscribe();
            let ticket = st.session.press(5, 5).unwrap();
            (rx, ticket, st.predictor.clone())
        };

        spawn_prediction(predictor, ticket, state.clone());

        let json = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let snap: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap.output, vec![0.5; 10]);
        assert_eq!(snap.grid[145], 1.0);
    }

    #[test]
    fn failed_prediction_is_not_broadcast() {
        let state = studio(Err(PredictError::Status(500)));
        let (rx, ticket, predictor) = {
            let mut st = lock(&state);
            let rx = st.subscribe();
            let ticket = st.session.press(0, 0).unwrap();
            (rx, ticket, st.predictor.clone())
        };

        spawn_prediction(predictor, ticket, state.clone());

        assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
        assert!(lock(&state).session.layers().is_zero());
    }

    #[test]
    fn reset_clears_and_notifies() {
        let state = studio(Ok(halves()));
        let rx = {
            let mut st = lock(&state);
            st.session.press(3, 3);
            st.subscribe()
        };

        let response = handle_reset(state.clone());
        assert_eq!(response.status_code().0, 200);

        let snap: Snapshot = serde_json::from_str(&rx.recv().unwrap()).unwrap();
        assert!(snap.grid.iter().all(|&v| v == 0.0));
        assert!(!snap.drawing);
    }

    #[test]
    fn leave_ends_gesture() {
        let state = studio(Ok(halves()));
        lock(&state).session.press(2, 2);
        handle_leave(state.clone());
        let st = lock(&state);
        assert!(!st.session.is_drawing());
        assert!(!st.session.grid().is_blank());
    }

    fn post(path: &str, body: &'static str) -> Request {
        TestRequest::new().with_method(Method::Post).with_path(path).with_body(body).into()
    }

    fn assert_untouched(state: &SharedState) {
        let st = lock(state);
        assert!(st.session.grid().is_blank());
        assert!(!st.session.is_drawing());
        assert_eq!(st.session.issued(), 0);
    }

    #[test]
    fn press_outside_grid_is_rejected() {
        let state = studio(Ok(halves()));
        let mut request = post("/draw/press", "row=28&col=3");
        let response = handle_press(&mut request, state.clone());
        assert_eq!(response.status_code().0, 400);
        assert_untouched(&state);
    }

    #[test]
    fn move_without_col_is_rejected() {
        let state = studio(Ok(halves()));
        let mut request = post("/draw/move", "row=4");
        let response = handle_move(&mut request, state.clone());
        assert_eq!(response.status_code().0, 400);
        assert_untouched(&state);
    }

    #[test]
    fn garbage_coordinates_are_rejected() {
        let state = studio(Ok(halves()));
        let mut request = post("/draw/press", "row=-1&col=x");
        assert_eq!(handle_press(&mut request, state.clone()).status_code().0, 400);
        assert_untouched(&state);
    }

    #[test]
    fn valid_press_paints_and_answers_with_snapshot() {
        let state = studio(Ok(halves()));
        let mut request = post("/draw/press", "row=5&col=5");
        let response = handle_press(&mut request, state.clone());
        assert_eq!(response.status_code().0, 200);

        let st = lock(&state);
        assert!(st.session.is_drawing());
        assert_eq!(st.session.issued(), 1);
    }

    #[test]
    fn non_utf8_body_is_unreadable() {
        let mut bytes: &[u8] = &[b'r', b'o', b'w', b'=', 0xff, 0xfe];
        assert!(read_body(&mut bytes).is_err());

        let mut ok: &[u8] = b"row=1&col=2";
        assert_eq!(read_body(&mut ok).unwrap(), "row=1&col=2");
    }
}
