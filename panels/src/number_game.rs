//! Daily number guess: five chances to find a number in 1..=100.
//!
//! The target is drawn by the caller and only drives the up/down hints. The
//! win/lose report goes to the server, and whatever reward text appears
//! comes from its reply.

#[cfg(test)]
#[path = "number_game_test.rs"]
mod number_game_test;

use std::ops::RangeInclusive;

use crate::api::{GameResultReply, PointStatus};
use crate::error::ApiError;
use crate::format;
use crate::view::{PageView, Phase, SubmitRejected, Ticket};

pub const CHANCES: u32 = 5;
pub const RANGE: RangeInclusive<u32> = 1..=100;

pub const MSG_INVALID: &str = "Enter a number between 1 and 100.";
pub const MSG_UP: &str = "UP! Try a bigger number.";
pub const MSG_DOWN: &str = "DOWN! Try a smaller number.";
pub const MSG_ALREADY_PLAYED: &str = "You have already played today.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Guessing,
    /// Round over; the result report is pending or awaiting retry.
    Settling { won: bool },
    Settled { won: bool },
    AlreadyPlayed,
}

impl Phase for GamePhase {
    fn accepts_input(&self) -> bool {
        matches!(self, Self::Guessing | Self::Settling { .. })
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled { .. } | Self::AlreadyPlayed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    /// Non-numeric or out of range. No chance consumed.
    Invalid,
    Up,
    Down,
    Won,
    Lost,
}

impl Guess {
    #[must_use]
    pub fn hint(self) -> Option<&'static str> {
        match self {
            Self::Invalid => Some(MSG_INVALID),
            Self::Up => Some(MSG_UP),
            Self::Down => Some(MSG_DOWN),
            Self::Won | Self::Lost => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NumberGame {
    view: PageView<GamePhase, PointStatus>,
    target: u32,
    chances: u32,
    last_guess: Option<Guess>,
    result: Option<String>,
}

impl NumberGame {
    /// `target` is clamped into [`RANGE`].
    #[must_use]
    pub fn new(target: u32) -> Self {
        Self {
            view: PageView::new(GamePhase::Guessing),
            target: target.clamp(*RANGE.start(), *RANGE.end()),
            chances: CHANCES,
            last_guess: None,
            result: None,
        }
    }

    #[must_use]
    pub fn view(&self) -> &PageView<GamePhase, PointStatus> {
        &self.view
    }

    #[must_use]
    pub fn chances(&self) -> u32 {
        self.chances
    }

    #[must_use]
    pub fn target(&self) -> u32 {
        self.target
    }

    #[must_use]
    pub fn last_guess(&self) -> Option<Guess> {
        self.last_guess
    }

    /// Server-confirmed result text once settled.
    #[must_use]
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Whether the guess input and button are live.
    #[must_use]
    pub fn can_guess(&self) -> bool {
        self.view.inputs_enabled() && *self.view.phase() == GamePhase::Guessing
    }

    pub fn begin_enter(&mut self) -> Ticket {
        self.view.begin_enter()
    }

    pub fn loaded(&mut self, ticket: Ticket, status: PointStatus) -> bool {
        let phase = if status.dailygame_participate { GamePhase::AlreadyPlayed } else { GamePhase::Guessing };
        self.view.enter_loaded(ticket, status, phase)
    }

    pub fn failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        self.view.enter_failed(ticket, err)
    }

    /// Score one guess. `None` when guessing is not currently allowed.
    pub fn guess(&mut self, input: &str) -> Option<Guess> {
        if !self.can_guess() {
            return None;
        }
        let outcome = match input.trim().parse::<u32>() {
            Ok(value) if RANGE.contains(&value) => {
                self.chances = self.chances.saturating_sub(1);
                if value == self.target {
                    Guess::Won
                } else if self.chances == 0 {
                    Guess::Lost
                } else if value < self.target {
                    Guess::Up
                } else {
                    Guess::Down
                }
            }
            _ => Guess::Invalid,
        };
        if let Guess::Won | Guess::Lost = outcome {
            let won = outcome == Guess::Won;
            if self.view.advance(GamePhase::Settling { won }).is_err() {
                return None;
            }
        }
        self.last_guess = Some(outcome);
        Some(outcome)
    }

    /// Start (or retry) the result report. Returns the ticket and `won`.
    ///
    /// # Errors
    ///
    /// Refused unless the round is over and no report is in flight.
    pub fn begin_settle(&mut self) -> Result<(Ticket, bool), SubmitRejected> {
        let GamePhase::Settling { won } = *self.view.phase() else {
            return Err(SubmitRejected::NotAccepting);
        };
        let ticket = self.view.begin_submit()?;
        Ok((ticket, won))
    }

    /// Apply the server's reply to the result report.
    pub fn settled(&mut self, ticket: Ticket, reply: &GameResultReply) -> bool {
        let GamePhase::Settling { won } = *self.view.phase() else {
            return false;
        };
        let applied = self.view.submit_succeeded(
            ticket,
            |status| {
                let status = status.get_or_insert_with(PointStatus::default);
                status.dailygame_participate = true;
                if let Some(total) = reply.total_point {
                    status.total_point = total;
                }
            },
            GamePhase::Settled { won },
        );
        if applied {
            self.result = Some(self.result_text(won, reply));
        }
        applied
    }

    pub fn settle_failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        self.view.submit_failed(ticket, err)
    }

    fn result_text(&self, won: bool, reply: &GameResultReply) -> String {
        let mut text = if won {
            format!("Correct! 🎉 {}", reply.message)
        } else {
            format!("So close. The answer was {}. {}", self.target, reply.message)
        };
        if let Some(total) = reply.total_point {
            text.push_str(&format!("\nBalance: {}", format::points(total)));
        }
        text
    }
}
