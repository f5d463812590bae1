//! Generic page view-state: local phase plus server-confirmed status.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every mini-feature page owns one `PageView`. The client adapter calls
//! `begin_*` before a request, hands the returned [`Ticket`] to the async
//! task, and passes it back with the response. The view decides whether the
//! response is still wanted.
//!
//! DESIGN
//! ======
//! - `status` is written only by responses carrying the latest enter/refresh
//!   ticket or the outstanding submit ticket.
//! - At most one submit is pending. A second `begin_submit` is refused, so a
//!   double click never produces a second request.
//! - A failed submit leaves the phase where it was so the user can retry.
//!   Its notice stays up until the next submit or enter.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::fmt::Debug;

use crate::error::ApiError;

/// A step in a feature's local flow.
pub trait Phase: Clone + PartialEq + Debug {
    /// Whether the primary action of this phase may be submitted.
    fn accepts_input(&self) -> bool;

    /// Terminal phases (already done today, settled) disable every input.
    fn is_terminal(&self) -> bool {
        false
    }
}

/// Identifies one outbound request of a single `PageView`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Initial-load state of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Load {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("panel has not finished loading")]
    NotReady,
    #[error("a request is already pending")]
    Pending,
    #[error("current step does not accept input")]
    NotAccepting,
    #[error("required input is missing")]
    MissingInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

/// A one-shot message for the toast / inline banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self { tone: Tone::Info, text: text.into() }
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self { tone: Tone::Success, text: text.into() }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self { tone: Tone::Error, text: text.into() }
    }
}

#[derive(Debug, Clone)]
pub struct PageView<P: Phase, S> {
    phase: P,
    status: Option<S>,
    load: Load,
    pending: Option<Ticket>,
    status_ticket: Option<Ticket>,
    next_ticket: u64,
    notice: Option<Notice>,
}

impl<P: Phase, S> PageView<P, S> {
    #[must_use]
    pub fn new(initial: P) -> Self {
        Self {
            phase: initial,
            status: None,
            load: Load::Loading,
            pending: None,
            status_ticket: None,
            next_ticket: 0,
            notice: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &P {
        &self.phase
    }

    #[must_use]
    pub fn status(&self) -> Option<&S> {
        self.status.as_ref()
    }

    #[must_use]
    pub fn load(&self) -> &Load {
        &self.load
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Inputs are live only when loaded, idle, and in an input phase.
    #[must_use]
    pub fn inputs_enabled(&self) -> bool {
        self.load == Load::Ready
            && self.pending.is_none()
            && !self.phase.is_terminal()
            && self.phase.accepts_input()
    }

    fn issue(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    fn is_current_status(&self, ticket: Ticket) -> bool {
        self.status_ticket == Some(ticket)
    }

    // -------------------------------------------------------------------------
    // Enter
    // -------------------------------------------------------------------------

    /// Start (or restart) the initial load. Any pending submit is abandoned;
    /// its response will be discarded.
    pub fn begin_enter(&mut self) -> Ticket {
        let ticket = self.issue();
        self.load = Load::Loading;
        self.pending = None;
        self.notice = None;
        self.status_ticket = Some(ticket);
        ticket
    }

    /// Returns `false` when the response was stale and ignored.
    pub fn enter_loaded(&mut self, ticket: Ticket, status: S, phase: P) -> bool {
        if !self.is_current_status(ticket) {
            return false;
        }
        self.status = Some(status);
        self.phase = phase;
        self.load = Load::Ready;
        true
    }

    pub fn enter_failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        if !self.is_current_status(ticket) {
            return false;
        }
        self.load = Load::Failed(err.user_message());
        true
    }

    // -------------------------------------------------------------------------
    // Refresh (status re-fetch without leaving Ready)
    // -------------------------------------------------------------------------

    pub fn begin_refresh(&mut self) -> Ticket {
        let ticket = self.issue();
        self.status_ticket = Some(ticket);
        ticket
    }

    pub fn refresh_loaded(&mut self, ticket: Ticket, status: S) -> bool {
        if !self.is_current_status(ticket) {
            return false;
        }
        self.status = Some(status);
        if self.load != Load::Ready {
            self.load = Load::Ready;
        }
        true
    }

    /// A failed refresh keeps the last known status and raises a notice.
    pub fn refresh_failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        if !self.is_current_status(ticket) {
            return false;
        }
        self.notice = Some(Notice::error(err.user_message()));
        true
    }

    // -------------------------------------------------------------------------
    // Submit
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Refused while loading, while another submit is pending, or when the
    /// current phase does not accept input.
    pub fn begin_submit(&mut self) -> Result<Ticket, SubmitRejected> {
        if self.load != Load::Ready {
            return Err(SubmitRejected::NotReady);
        }
        if self.pending.is_some() {
            return Err(SubmitRejected::Pending);
        }
        if self.phase.is_terminal() || !self.phase.accepts_input() {
            return Err(SubmitRejected::NotAccepting);
        }
        let ticket = self.issue();
        self.pending = Some(ticket);
        self.notice = None;
        Ok(ticket)
    }

    /// Merge the server's result into `status` and move to `next`.
    pub fn submit_succeeded(&mut self, ticket: Ticket, merge: impl FnOnce(&mut Option<S>), next: P) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        merge(&mut self.status);
        self.phase = next;
        self.pending = None;
        true
    }

    pub fn submit_failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        self.submit_failed_with(ticket, err.user_message())
    }

    /// Like [`Self::submit_failed`] with a caller-mapped message.
    pub fn submit_failed_with(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        self.notice = Some(Notice::error(message));
        true
    }

    // -------------------------------------------------------------------------
    // Local steps
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Refused while a submit is pending.
    pub fn advance(&mut self, next: P) -> Result<(), SubmitRejected> {
        if self.pending.is_some() {
            return Err(SubmitRejected::Pending);
        }
        self.phase = next;
        Ok(())
    }
}
