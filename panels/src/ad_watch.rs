//! Ad-watch reward: a 30 second countdown, then a server claim.
//!
//! The countdown decides when to ask; the server decides what was earned.
//! Reward text is derived from the change in the server's `total_point`,
//! falling back to the server message when no total comes back.

#[cfg(test)]
#[path = "ad_watch_test.rs"]
mod ad_watch_test;

use crate::api::{AdReply, PointStatus};
use crate::error::ApiError;
use crate::format;
use crate::view::{Notice, PageView, Phase, SubmitRejected, Ticket};

pub const MAX_WATCHES: u32 = 3;
pub const COUNTDOWN_SECS: u32 = 30;

pub const MSG_EXHAUSTED: &str = "You have used all of today's ad views.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdPhase {
    Ready,
    Counting { remaining: u32 },
    /// Countdown finished; claim pending or awaiting retry.
    Claiming,
    Exhausted,
}

impl Phase for AdPhase {
    fn accepts_input(&self) -> bool {
        matches!(self, Self::Ready | Self::Claiming)
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// What a countdown tick asks the adapter to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue { remaining: u32 },
    /// Stop the interval and submit the claim.
    Claim,
    /// No countdown running; stop the interval.
    Idle,
}

fn phase_for(count: u32) -> AdPhase {
    if count >= MAX_WATCHES { AdPhase::Exhausted } else { AdPhase::Ready }
}

#[derive(Debug, Clone)]
pub struct AdWatch {
    view: PageView<AdPhase, PointStatus>,
}

impl Default for AdWatch {
    fn default() -> Self {
        Self::new()
    }
}

impl AdWatch {
    #[must_use]
    pub fn new() -> Self {
        Self { view: PageView::new(AdPhase::Ready) }
    }

    #[must_use]
    pub fn view(&self) -> &PageView<AdPhase, PointStatus> {
        &self.view
    }

    #[must_use]
    pub fn watched(&self) -> u32 {
        self.view.status().map_or(0, |status| status.ad_participation)
    }

    #[must_use]
    pub fn remaining_watches(&self) -> u32 {
        MAX_WATCHES.saturating_sub(self.watched())
    }

    pub fn begin_enter(&mut self) -> Ticket {
        self.view.begin_enter()
    }

    pub fn loaded(&mut self, ticket: Ticket, status: PointStatus) -> bool {
        let phase = phase_for(status.ad_participation);
        self.view.enter_loaded(ticket, status, phase)
    }

    pub fn failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        self.view.enter_failed(ticket, err)
    }

    /// Start the countdown from `Ready`.
    ///
    /// # Errors
    ///
    /// Refused when exhausted, already counting, or not loaded.
    pub fn start(&mut self) -> Result<u32, SubmitRejected> {
        if !self.view.inputs_enabled() || *self.view.phase() != AdPhase::Ready {
            return Err(SubmitRejected::NotAccepting);
        }
        self.view.advance(AdPhase::Counting { remaining: COUNTDOWN_SECS })?;
        Ok(COUNTDOWN_SECS)
    }

    /// One second elapsed.
    pub fn tick(&mut self) -> Tick {
        let AdPhase::Counting { remaining } = *self.view.phase() else {
            return Tick::Idle;
        };
        let remaining = remaining.saturating_sub(1);
        let next = if remaining == 0 { AdPhase::Claiming } else { AdPhase::Counting { remaining } };
        if self.view.advance(next).is_err() {
            return Tick::Idle;
        }
        if remaining == 0 { Tick::Claim } else { Tick::Continue { remaining } }
    }

    /// Abandon a running countdown (page left or tab reset).
    pub fn cancel(&mut self) {
        if let AdPhase::Counting { .. } = self.view.phase() {
            let next = phase_for(self.watched());
            if self.view.advance(next).is_err() {
                log::debug!("ad countdown cancel ignored while pending");
            }
        }
    }

    /// # Errors
    ///
    /// Refused unless the countdown has finished and no claim is in flight.
    pub fn begin_claim(&mut self) -> Result<Ticket, SubmitRejected> {
        if *self.view.phase() != AdPhase::Claiming {
            return Err(SubmitRejected::NotAccepting);
        }
        self.view.begin_submit()
    }

    /// Apply the server's claim reply and return the toast.
    pub fn claimed(&mut self, ticket: Ticket, reply: &AdReply) -> Option<Notice> {
        let before = self.view.status().map(|status| status.total_point);
        let count = reply.new_ad_count.unwrap_or_else(|| self.watched() + 1);
        let applied = self.view.submit_succeeded(
            ticket,
            |status| {
                let status = status.get_or_insert_with(PointStatus::default);
                status.ad_participation = count;
                if let Some(total) = reply.total_point {
                    status.total_point = total;
                }
            },
            phase_for(count),
        );
        if !applied {
            return None;
        }
        Some(Notice::success(reward_text(before, reply)))
    }

    pub fn claim_failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        self.view.submit_failed(ticket, err)
    }
}

fn reward_text(before: Option<i64>, reply: &AdReply) -> String {
    match (before, reply.total_point) {
        (Some(before), Some(after)) if after > before => {
            format!("Ad complete! You earned {}.", format::points(after - before))
        }
        _ if !reply.message.is_empty() => reply.message.clone(),
        (_, Some(after)) => format!("Ad complete! Balance: {}.", format::points(after)),
        _ => "Ad complete!".to_owned(),
    }
}
