use super::*;

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Open,
    Done,
    Idle,
}

impl Phase for Step {
    fn accepts_input(&self) -> bool {
        matches!(self, Self::Open)
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

fn loaded(status: i64) -> PageView<Step, i64> {
    let mut view = PageView::new(Step::Open);
    let ticket = view.begin_enter();
    assert!(view.enter_loaded(ticket, status, Step::Open));
    view
}

fn server_error() -> ApiError {
    ApiError::Server { status: 500, detail: None }
}

#[test]
fn new_view_is_loading_with_inputs_disabled() {
    let view: PageView<Step, i64> = PageView::new(Step::Open);
    assert_eq!(view.load(), &Load::Loading);
    assert!(!view.inputs_enabled());
    assert!(view.status().is_none());
}

#[test]
fn enter_loaded_sets_status_and_phase() {
    let view = loaded(10);
    assert_eq!(view.status(), Some(&10));
    assert!(view.inputs_enabled());
}

#[test]
fn enter_failed_is_recoverable() {
    let mut view: PageView<Step, i64> = PageView::new(Step::Open);
    let ticket = view.begin_enter();
    assert!(view.enter_failed(ticket, &ApiError::Transport("offline".to_owned())));
    assert!(matches!(view.load(), Load::Failed(msg) if !msg.is_empty()));

    let retry = view.begin_enter();
    assert!(view.enter_loaded(retry, 3, Step::Open));
    assert_eq!(view.load(), &Load::Ready);
}

#[test]
fn terminal_phase_disables_inputs() {
    let mut view: PageView<Step, i64> = PageView::new(Step::Open);
    let ticket = view.begin_enter();
    view.enter_loaded(ticket, 0, Step::Done);
    assert!(!view.inputs_enabled());
    assert_eq!(view.begin_submit(), Err(SubmitRejected::NotAccepting));
}

#[test]
fn stale_enter_response_is_ignored() {
    let mut view: PageView<Step, i64> = PageView::new(Step::Open);
    let first = view.begin_enter();
    let second = view.begin_enter();
    assert!(!view.enter_loaded(first, 1, Step::Open));
    assert!(view.status().is_none());
    assert!(view.enter_loaded(second, 2, Step::Open));
    assert_eq!(view.status(), Some(&2));
}

#[test]
fn rapid_double_submit_yields_one_ticket() {
    let mut view = loaded(0);
    let first = view.begin_submit();
    let second = view.begin_submit();
    assert!(first.is_ok());
    assert_eq!(second, Err(SubmitRejected::Pending));
    assert!(view.is_pending());
    assert!(!view.inputs_enabled());
}

#[test]
fn submit_refused_before_load() {
    let mut view: PageView<Step, i64> = PageView::new(Step::Open);
    assert_eq!(view.begin_submit(), Err(SubmitRejected::NotReady));
}

#[test]
fn failed_submit_keeps_phase_and_clears_pending() {
    let mut view = loaded(5);
    let ticket = view.begin_submit().expect("ticket");
    assert!(view.submit_failed(ticket, &server_error()));
    assert_eq!(view.phase(), &Step::Open);
    assert!(!view.is_pending());
    assert_eq!(view.status(), Some(&5));
    assert_eq!(view.notice().map(|n| n.tone), Some(Tone::Error));
    assert!(view.begin_submit().is_ok());
}

#[test]
fn failed_submit_shows_server_detail_when_present() {
    let mut view = loaded(5);
    let ticket = view.begin_submit().expect("ticket");
    let err = ApiError::Rejected { status: 400, detail: Some("already checked in".to_owned()) };
    view.submit_failed(ticket, &err);
    assert_eq!(view.notice().map(|n| n.text.as_str()), Some("already checked in"));
}

#[test]
fn retry_clears_previous_failure_notice() {
    let mut view = loaded(5);
    let ticket = view.begin_submit().expect("ticket");
    view.submit_failed(ticket, &server_error());
    assert!(view.notice().is_some());
    view.begin_submit().expect("retry");
    assert!(view.notice().is_none());
}

#[test]
fn submit_succeeded_merges_and_advances() {
    let mut view = loaded(5);
    let ticket = view.begin_submit().expect("ticket");
    assert!(view.submit_succeeded(
        ticket,
        |status| {
            if let Some(points) = status {
                *points += 1;
            }
        },
        Step::Done,
    ));
    assert_eq!(view.status(), Some(&6));
    assert_eq!(view.phase(), &Step::Done);
    assert!(!view.is_pending());
}

#[test]
fn submit_response_after_reenter_is_discarded() {
    let mut view = loaded(5);
    let submit = view.begin_submit().expect("ticket");
    let enter = view.begin_enter();
    assert!(!view.submit_succeeded(submit, |status| *status = Some(99), Step::Done));
    assert!(view.enter_loaded(enter, 7, Step::Open));
    assert_eq!(view.status(), Some(&7));
    assert_eq!(view.phase(), &Step::Open);
}

#[test]
fn refresh_updates_status_without_leaving_ready() {
    let mut view = loaded(1);
    let ticket = view.begin_refresh();
    assert_eq!(view.load(), &Load::Ready);
    assert!(view.refresh_loaded(ticket, 2));
    assert_eq!(view.status(), Some(&2));
}

#[test]
fn failed_refresh_keeps_last_status() {
    let mut view = loaded(1);
    let ticket = view.begin_refresh();
    assert!(view.refresh_failed(ticket, &server_error()));
    assert_eq!(view.status(), Some(&1));
    assert!(view.notice().is_some());
}

#[test]
fn advance_refused_while_pending() {
    let mut view = loaded(0);
    let ticket = view.begin_submit().expect("ticket");
    assert_eq!(view.advance(Step::Idle), Err(SubmitRejected::Pending));
    view.submit_failed(ticket, &server_error());
    assert_eq!(view.advance(Step::Idle), Ok(()));
    assert_eq!(view.phase(), &Step::Idle);
}
