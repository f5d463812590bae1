use std::cell::Cell;
use std::rc::Rc;

use super::*;

#[test]
fn start_ticks_immediately() {
    let ticks = Rc::new(Cell::new(0));
    let counter = ticks.clone();
    let poller = Poller::start(Duration::from_secs(30), move || counter.set(counter.get() + 1));
    assert_eq!(ticks.get(), 1);
    assert!(poller.is_running());
}

#[test]
fn stop_is_idempotent() {
    let poller = Poller::start(Duration::from_secs(30), || {});
    poller.stop();
    poller.stop();
    assert!(!poller.is_running());
}
