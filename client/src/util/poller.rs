//! Cancellable repeating task.
//!
//! `start` runs the tick once immediately, then after every `interval` until
//! `stop` is called (or the poller is dropped). The loop checks the alive flag
//! after each sleep, so at most one tick can run after `stop` if it was
//! already mid-flight.

#[cfg(test)]
#[path = "poller_test.rs"]
mod poller_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub struct Poller {
    alive: Arc<AtomicBool>,
}

impl Poller {
    pub fn start(interval: Duration, tick: impl Fn() + 'static) -> Self {
        let alive = Arc::new(AtomicBool::new(true));
        tick();
        #[cfg(feature = "csr")]
        {
            let alive_task = alive.clone();
            leptos::task::spawn_local(async move {
                loop {
                    gloo_timers::future::sleep(interval).await;
                    if !alive_task.load(Ordering::Relaxed) {
                        break;
                    }
                    tick();
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            log::debug!("poller started without a browser; interval {interval:?} ignored");
        }
        Self { alive }
    }

    pub fn stop(&self) {
        if self.alive.swap(false, Ordering::Relaxed) {
            log::debug!("poller stopped");
        }
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
