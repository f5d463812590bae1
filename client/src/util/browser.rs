//! Thin wrappers over `window` calls the pages need.
//!
//! Native builds return neutral values so the callers stay testable.

use std::ops::RangeInclusive;

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    #[cfg(feature = "csr")]
    {
        let now = js_sys::Date::now();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let millis = if now.is_finite() && now > 0.0 { now as u64 } else { 0 };
        millis
    }
    #[cfg(not(feature = "csr"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// Blocking `window.alert`.
pub fn alert(message: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            if window.alert_with_message(message).is_err() {
                log::warn!("alert failed: {message}");
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        log::info!("alert: {message}");
    }
}

/// Blocking `window.confirm`. `false` when no window exists.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window().is_some_and(|window| window.confirm_with_message(message).unwrap_or(false))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
        false
    }
}

/// Hard navigation; drops every in-memory signal and timer.
pub fn redirect(path: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            if window.location().set_href(path).is_err() {
                log::error!("redirect to {path} failed");
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = path;
    }
}

/// Uniform pick from `range` using `Math.random`.
pub fn random_in(range: RangeInclusive<u32>) -> u32 {
    let (lo, hi) = (*range.start(), *range.end());
    if hi <= lo {
        return lo;
    }
    let span = f64::from(hi - lo + 1);
    #[cfg(feature = "csr")]
    let roll = js_sys::Math::random();
    #[cfg(not(feature = "csr"))]
    let roll = f64::from(u32::try_from(now_ms() % 1000).unwrap_or(0)) / 1000.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let offset = (roll * span).floor() as u32;
    lo + offset.min(hi - lo)
}

/// Run a request task on the browser event loop. Native builds drop it.
pub fn spawn(task: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(task);
    }
    #[cfg(not(feature = "csr"))]
    {
        drop(task);
        log::debug!("task dropped outside the browser");
    }
}

/// Run `f` once after `millis`.
pub fn after(millis: u32, f: impl FnOnce() + 'static) {
    #[cfg(feature = "csr")]
    {
        gloo_timers::callback::Timeout::new(millis, f).forget();
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (millis, f);
    }
}

/// Async delay on the browser timer queue. Resolves immediately natively.
pub async fn sleep(duration: std::time::Duration) {
    #[cfg(feature = "csr")]
    {
        gloo_timers::future::sleep(duration).await;
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = duration;
    }
}
