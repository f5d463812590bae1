//! Browser host for the idle-session watchdog.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session::Watchdog` decides; this module performs. It owns the two
//! `gloo-timers` timeouts, the document-level activity listeners, and the
//! warning-modal signal, and it turns each `Command` into those effects.
//!
//! DESIGN
//! ======
//! - All state sits in one `Rc<RefCell<GuardInner>>`. Timer and listener
//!   callbacks hold a `Weak`, so a disposed guard is never revived.
//! - A `RefCell` borrow never spans `apply`: commands are collected under the
//!   borrow, then performed after it is released, because performing a
//!   command re-enters the guard (arming timers, disposing).
//! - Re-arming replaces the stored `Timeout`s; dropping a `Timeout` cancels
//!   it. Stale callbacks that still fire are rejected by generation.
//! - Pointer-move storms are coalesced: activity within
//!   [`ACTIVITY_THROTTLE_MS`] of the last accepted signal only stamps the
//!   activity time, without re-arming, while no warning is showing.

#[cfg(test)]
#[path = "watchdog_test.rs"]
mod watchdog_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use session::{Command, SessionInfo, Watchdog, WatchdogConfig, clear_session};

use crate::config;
use crate::util::browser;
use crate::util::storage::LocalStore;

/// Activity signals closer together than this are coalesced.
pub const ACTIVITY_THROTTLE_MS: u64 = 1_000;

/// Document events that count as user activity.
pub const ACTIVITY_EVENTS: [&str; 8] = ["mousedown", "mousemove", "keypress", "scroll", "touchstart", "click", "focus", "blur"];

#[cfg(feature = "csr")]
type Listener = (&'static str, wasm_bindgen::closure::Closure<dyn FnMut(web_sys::Event)>);

struct GuardInner {
    watchdog: Watchdog,
    warning: RwSignal<bool>,
    last_signal_ms: u64,
    armed_generation: Option<u64>,
    disposed: bool,
    #[cfg(feature = "csr")]
    warning_timer: Option<gloo_timers::callback::Timeout>,
    #[cfg(feature = "csr")]
    logout_timer: Option<gloo_timers::callback::Timeout>,
    #[cfg(feature = "csr")]
    listeners: Vec<Listener>,
}

/// Installed watchdog plus its browser resources.
#[derive(Clone)]
pub struct SessionGuard {
    inner: Rc<RefCell<GuardInner>>,
}

impl SessionGuard {
    /// Start the watchdog, attach activity listeners, arm the timers.
    ///
    /// `warning` is driven true/false as the warning modal should show/hide.
    pub fn install(config: WatchdogConfig, warning: RwSignal<bool>) -> Self {
        let now = browser::now_ms();
        let (watchdog, commands) = Watchdog::start(config, now);
        let guard = Self {
            inner: Rc::new(RefCell::new(GuardInner {
                watchdog,
                warning,
                last_signal_ms: now,
                armed_generation: None,
                disposed: false,
                #[cfg(feature = "csr")]
                warning_timer: None,
                #[cfg(feature = "csr")]
                logout_timer: None,
                #[cfg(feature = "csr")]
                listeners: Vec::new(),
            })),
        };
        #[cfg(feature = "csr")]
        attach_listeners(&guard.inner);
        apply(&guard.inner, commands);
        guard
    }

    /// "Extend session" from the warning modal.
    pub fn extend(&self) {
        let commands = self.inner.borrow_mut().watchdog.extend(browser::now_ms());
        apply(&self.inner, commands);
    }

    /// "Log out now" from the warning modal.
    pub fn logout_now(&self) {
        let commands = self.inner.borrow_mut().watchdog.logout_now();
        apply(&self.inner, commands);
    }

    /// A qualifying activity signal.
    pub fn activity(&self) {
        on_activity(&Rc::downgrade(&self.inner), browser::now_ms());
    }

    /// Debug snapshot.
    pub fn info(&self) -> SessionInfo {
        self.inner.borrow().watchdog.info(browser::now_ms())
    }

    /// Drop timers and listeners. Idempotent.
    pub fn dispose(&self) {
        dispose_inner(&self.inner);
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    /// Generation of the most recently armed timer pair.
    pub fn armed_generation(&self) -> Option<u64> {
        self.inner.borrow().armed_generation
    }

    #[cfg(test)]
    fn warning_elapsed(&self, generation: u64, now_ms: u64) {
        let commands = self.inner.borrow_mut().watchdog.warning_elapsed(generation, now_ms);
        apply(&self.inner, commands);
    }

    #[cfg(test)]
    fn logout_elapsed(&self, generation: u64, now_ms: u64) {
        let commands = self.inner.borrow_mut().watchdog.logout_elapsed(generation, now_ms);
        apply(&self.inner, commands);
    }
}

fn on_activity(weak: &Weak<RefCell<GuardInner>>, now_ms: u64) {
    let Some(inner) = weak.upgrade() else { return };
    let commands = {
        let mut guard = inner.borrow_mut();
        if guard.disposed {
            return;
        }
        let throttled = !guard.watchdog.warning_shown()
            && now_ms.saturating_sub(guard.last_signal_ms) < ACTIVITY_THROTTLE_MS;
        if throttled {
            guard.watchdog.touch(now_ms);
            return;
        }
        guard.last_signal_ms = now_ms;
        guard.watchdog.record_activity(now_ms)
    };
    apply(&inner, commands);
}

fn apply(inner: &Rc<RefCell<GuardInner>>, commands: Vec<Command>) {
    for command in commands {
        match command {
            Command::Arm { generation, warning_in_ms, logout_in_ms } => {
                arm(inner, generation, warning_in_ms, logout_in_ms);
            }
            Command::ShowWarning => warning_signal(inner).set(true),
            Command::HideWarning => warning_signal(inner).set(false),
            Command::Logout { reason } => {
                let message = reason.message(inner.borrow().watchdog.config());
                clear_session(&LocalStore);
                warning_signal(inner).set(false);
                dispose_inner(inner);
                log::info!("session ended: {reason:?}");
                browser::alert(&message);
                browser::redirect(config::app().login_path);
            }
        }
    }
}

fn warning_signal(inner: &Rc<RefCell<GuardInner>>) -> RwSignal<bool> {
    inner.borrow().warning
}

fn arm(inner: &Rc<RefCell<GuardInner>>, generation: u64, warning_in_ms: Option<u64>, logout_in_ms: u64) {
    let mut guard = inner.borrow_mut();
    if guard.disposed {
        return;
    }
    guard.armed_generation = Some(generation);
    #[cfg(feature = "csr")]
    {
        use gloo_timers::callback::Timeout;

        let millis = |ms: u64| u32::try_from(ms).unwrap_or(u32::MAX);
        guard.warning_timer = warning_in_ms.map(|ms| {
            let weak = Rc::downgrade(inner);
            Timeout::new(millis(ms), move || {
                let Some(inner) = weak.upgrade() else { return };
                let commands = inner.borrow_mut().watchdog.warning_elapsed(generation, browser::now_ms());
                apply(&inner, commands);
            })
        });
        let weak = Rc::downgrade(inner);
        guard.logout_timer = Some(Timeout::new(millis(logout_in_ms), move || {
            let Some(inner) = weak.upgrade() else { return };
            let commands = inner.borrow_mut().watchdog.logout_elapsed(generation, browser::now_ms());
            apply(&inner, commands);
        }));
    }
    #[cfg(not(feature = "csr"))]
    {
        log::debug!("armed generation {generation}: warning {warning_in_ms:?} ms, logout {logout_in_ms} ms");
    }
}

fn dispose_inner(inner: &Rc<RefCell<GuardInner>>) {
    let mut guard = inner.borrow_mut();
    if guard.disposed {
        return;
    }
    guard.disposed = true;
    guard.armed_generation = None;
    #[cfg(feature = "csr")]
    {
        guard.warning_timer = None;
        guard.logout_timer = None;
        let listeners = std::mem::take(&mut guard.listeners);
        drop(guard);
        detach_listeners(listeners);
    }
}

#[cfg(feature = "csr")]
fn attach_listeners(inner: &Rc<RefCell<GuardInner>>) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("no document; session watchdog runs without activity listeners");
        return;
    };
    let options = web_sys::AddEventListenerOptions::new();
    options.set_capture(true);
    options.set_passive(true);

    let mut listeners: Vec<Listener> = Vec::with_capacity(ACTIVITY_EVENTS.len() + 1);
    for name in ACTIVITY_EVENTS {
        let weak = Rc::downgrade(inner);
        let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
            on_activity(&weak, browser::now_ms());
        }) as Box<dyn FnMut(web_sys::Event)>);
        listeners.push((name, closure));
    }

    let weak = Rc::downgrade(inner);
    let visibility = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let visible = web_sys::window()
            .and_then(|w| w.document())
            .is_some_and(|doc| doc.visibility_state() == web_sys::VisibilityState::Visible);
        if visible {
            on_activity(&weak, browser::now_ms());
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    listeners.push(("visibilitychange", visibility));

    for (name, closure) in &listeners {
        let attached = document.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            closure.as_ref().unchecked_ref(),
            &options,
        );
        if attached.is_err() {
            log::warn!("failed to attach {name} listener");
        }
    }
    inner.borrow_mut().listeners = listeners;
}

#[cfg(feature = "csr")]
fn detach_listeners(listeners: Vec<Listener>) {
    use wasm_bindgen::JsCast;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };
    for (name, closure) in listeners {
        let detached =
            document.remove_event_listener_with_callback_and_bool(name, closure.as_ref().unchecked_ref(), true);
        if detached.is_err() {
            log::warn!("failed to detach {name} listener");
        }
    }
}
