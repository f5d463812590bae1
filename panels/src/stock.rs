//! Stock direction prediction: one guess per day, history, and claiming
//! points for correct guesses.

#[cfg(test)]
#[path = "stock_test.rs"]
mod stock_test;

use crate::api::{ClaimReply, ClaimRequest, MessageReply, PredictionRecord, PredictionRequest, StockGameData, Trend};
use crate::error::ApiError;
use crate::format;
use crate::view::{Notice, PageView, Phase, SubmitRejected, Ticket};

/// Points the backend awards per correct call (display hint).
pub const CORRECT_REWARD: i64 = 30;

pub const MSG_PICK_TREND: &str = "Choose UP or DOWN first.";
pub const MSG_ALREADY_DONE: &str = "You have already made today's prediction.";
pub const MSG_SUBMITTED: &str = "Prediction submitted. Results are posted after the market closes.";

/// Which panel of the stock page is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StockView {
    #[default]
    Menu,
    Game,
    History,
}

// =============================================================================
// PREDICTION GAME
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictPhase {
    Choosing { choice: Option<Trend> },
    /// `ai_match` is `None` when the backend gave no model outlook.
    Submitted { choice: Trend, ai_match: Option<bool> },
    AlreadyDone,
}

impl Phase for PredictPhase {
    fn accepts_input(&self) -> bool {
        matches!(self, Self::Choosing { choice: Some(_) })
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted { .. } | Self::AlreadyDone)
    }
}

/// The model's direction: the explicit trend if given, else derived from the
/// predicted price against the current one.
#[must_use]
pub fn ai_trend(data: &StockGameData) -> Option<Trend> {
    if let Some(trend) = data.trend_predict {
        return Some(trend);
    }
    let (current, predicted) = (data.current_price?, data.price_predict?);
    if predicted > current {
        Some(Trend::Up)
    } else if predicted < current {
        Some(Trend::Down)
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct Prediction {
    view: PageView<PredictPhase, StockGameData>,
    reasoning: String,
}

impl Default for Prediction {
    fn default() -> Self {
        Self::new()
    }
}

impl Prediction {
    #[must_use]
    pub fn new() -> Self {
        Self { view: PageView::new(PredictPhase::Choosing { choice: None }), reasoning: String::new() }
    }

    #[must_use]
    pub fn view(&self) -> &PageView<PredictPhase, StockGameData> {
        &self.view
    }

    #[must_use]
    pub fn choice(&self) -> Option<Trend> {
        match *self.view.phase() {
            PredictPhase::Choosing { choice } => choice,
            PredictPhase::Submitted { choice, .. } => Some(choice),
            PredictPhase::AlreadyDone => None,
        }
    }

    #[must_use]
    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn begin_enter(&mut self) -> Ticket {
        self.view.begin_enter()
    }

    pub fn loaded(&mut self, ticket: Ticket, data: StockGameData) -> bool {
        let phase = if data.can_participate {
            PredictPhase::Choosing { choice: None }
        } else {
            PredictPhase::AlreadyDone
        };
        self.view.enter_loaded(ticket, data, phase)
    }

    pub fn failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        self.view.enter_failed(ticket, err)
    }

    /// # Errors
    ///
    /// Refused once submitted, or while the submit is in flight.
    pub fn choose(&mut self, trend: Trend) -> Result<(), SubmitRejected> {
        if !matches!(self.view.phase(), PredictPhase::Choosing { .. }) {
            return Err(SubmitRejected::NotAccepting);
        }
        self.view.advance(PredictPhase::Choosing { choice: Some(trend) })
    }

    pub fn set_reasoning(&mut self, text: &str) {
        text.clone_into(&mut self.reasoning);
    }

    /// # Errors
    ///
    /// `MissingInput` when no direction has been chosen.
    pub fn begin_submit(&mut self, user_id: &str) -> Result<(Ticket, PredictionRequest), SubmitRejected> {
        let PredictPhase::Choosing { choice } = *self.view.phase() else {
            return Err(SubmitRejected::NotAccepting);
        };
        let choice = choice.ok_or(SubmitRejected::MissingInput)?;
        let stock_code = self.view.status().map(|data| data.stock_code.clone()).ok_or(SubmitRejected::NotReady)?;
        let ticket = self.view.begin_submit()?;
        let request = PredictionRequest {
            user_id: user_id.to_owned(),
            stock_code,
            user_predict_trend: choice,
            reasoning: self.reasoning.trim().to_owned(),
        };
        Ok((ticket, request))
    }

    pub fn submitted(&mut self, ticket: Ticket, reply: &MessageReply) -> Option<Notice> {
        let PredictPhase::Choosing { choice: Some(choice) } = *self.view.phase() else {
            return None;
        };
        let ai_match = self.view.status().and_then(ai_trend).map(|ai| ai == choice);
        let applied = self.view.submit_succeeded(
            ticket,
            |data| {
                if let Some(data) = data {
                    data.can_participate = false;
                }
            },
            PredictPhase::Submitted { choice, ai_match },
        );
        if !applied {
            return None;
        }
        let text = if reply.message.is_empty() { MSG_SUBMITTED.to_owned() } else { reply.message.clone() };
        Some(Notice::success(text))
    }

    pub fn submit_failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        self.view.submit_failed(ticket, err)
    }
}

// =============================================================================
// HISTORY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryPhase {
    Browsing,
}

impl Phase for HistoryPhase {
    fn accepts_input(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryStats {
    pub total: usize,
    pub correct: usize,
    /// Rounded percent of correct among resolved entries; 0 when none resolved.
    pub accuracy_percent: u32,
}

#[must_use]
pub fn stats(records: &[PredictionRecord]) -> HistoryStats {
    let resolved = records.iter().filter(|r| r.is_correct.is_some()).count();
    let correct = records.iter().filter(|r| r.is_correct == Some(true)).count();
    let accuracy_percent = if resolved == 0 {
        0
    } else {
        u32::try_from((correct * 100 + resolved / 2) / resolved).unwrap_or(100)
    };
    HistoryStats { total: records.len(), correct, accuracy_percent }
}

#[must_use]
pub fn is_claimable(record: &PredictionRecord) -> bool {
    record.is_correct == Some(true) && !record.points_claimed
}

#[derive(Debug, Clone)]
pub struct History {
    view: PageView<HistoryPhase, Vec<PredictionRecord>>,
    claiming: Option<i64>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self { view: PageView::new(HistoryPhase::Browsing), claiming: None }
    }

    #[must_use]
    pub fn view(&self) -> &PageView<HistoryPhase, Vec<PredictionRecord>> {
        &self.view
    }

    #[must_use]
    pub fn records(&self) -> &[PredictionRecord] {
        self.view.status().map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        stats(self.records())
    }

    /// Prediction id of the claim in flight.
    #[must_use]
    pub fn claiming(&self) -> Option<i64> {
        self.claiming
    }

    pub fn begin_enter(&mut self) -> Ticket {
        self.claiming = None;
        self.view.begin_enter()
    }

    pub fn loaded(&mut self, ticket: Ticket, records: Vec<PredictionRecord>) -> bool {
        self.view.enter_loaded(ticket, records, HistoryPhase::Browsing)
    }

    pub fn failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        self.view.enter_failed(ticket, err)
    }

    /// # Errors
    ///
    /// Refused when the entry is unknown or not claimable, or while another
    /// claim is in flight.
    pub fn begin_claim(&mut self, user_id: &str, prediction_id: i64) -> Result<(Ticket, ClaimRequest), SubmitRejected> {
        let claimable = self.records().iter().any(|r| r.id == prediction_id && is_claimable(r));
        if !claimable {
            return Err(SubmitRejected::NotAccepting);
        }
        let ticket = self.view.begin_submit()?;
        self.claiming = Some(prediction_id);
        Ok((ticket, ClaimRequest { user_id: user_id.to_owned(), prediction_id }))
    }

    /// Mark the entry claimed and return the toast.
    pub fn claimed(&mut self, ticket: Ticket, reply: &ClaimReply) -> Option<Notice> {
        let id = self.claiming?;
        let applied = self.view.submit_succeeded(
            ticket,
            |records| {
                if let Some(record) = records.iter_mut().flatten().find(|r| r.id == id) {
                    record.points_claimed = true;
                }
            },
            HistoryPhase::Browsing,
        );
        if !applied {
            return None;
        }
        self.claiming = None;
        let text = if reply.points_awarded > 0 {
            format!("{} claimed!", format::points(reply.points_awarded))
        } else {
            reply.message.clone()
        };
        Some(Notice::success(text))
    }

    pub fn claim_failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        let applied = self.view.submit_failed(ticket, err);
        if applied {
            self.claiming = None;
        }
        applied
    }
}
