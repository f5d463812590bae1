//! Daily O/X quiz: pick a topic, preview explanations, answer each question.
//!
//! DESIGN
//! ======
//! The participation check is the page's enter; loading a topic's questions
//! is a submit from `SelectingTopic`, so a double click on "start" fetches
//! once. Correctness and points come only from the server's answer replies,
//! and the running total is their sum.

#[cfg(test)]
#[path = "quiz_test.rs"]
mod quiz_test;

use crate::api::{AnswerReply, AnswerRequest, Participation, QuizItem};
use crate::error::ApiError;
use crate::view::{PageView, Phase, SubmitRejected, Ticket};

pub const MSG_NO_QUESTIONS: &str = "No questions are available for this topic yet.";
pub const MSG_ALREADY_DONE: &str = "You have already taken today's quiz. Come back tomorrow!";
pub const MSG_PICK_TOPIC: &str = "Choose a topic first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Basics,
    TechnicalIndicators,
    FinancialStatements,
}

impl Topic {
    pub const ALL: [Self; 3] = [Self::Basics, Self::TechnicalIndicators, Self::FinancialStatements];

    /// Preselected when the picker opens.
    pub const DEFAULT: Self = Self::Basics;

    /// Sub-category key the backend files questions under.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Basics => "기초지식",
            Self::TechnicalIndicators => "기술적 지표",
            Self::FinancialStatements => "재무제표",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Basics => "Basics",
            Self::TechnicalIndicators => "Technical indicators",
            Self::FinancialStatements => "Financial statements",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Basics => "📘",
            Self::TechnicalIndicators => "📈",
            Self::FinancialStatements => "🧾",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    O,
    X,
}

impl Answer {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::O => "O",
            Self::X => "X",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    SelectingTopic { topic: Option<Topic> },
    Previewing,
    Answering { index: usize },
    Feedback { index: usize, correct: bool, points: i64 },
    Finished,
    AlreadyDone,
}

impl Phase for QuizPhase {
    fn accepts_input(&self) -> bool {
        matches!(
            self,
            Self::SelectingTopic { topic: Some(_) } | Self::Previewing | Self::Answering { .. } | Self::Feedback { .. }
        )
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::AlreadyDone)
    }
}

/// Server-confirmed quiz state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    pub can_participate: bool,
    pub topic: Option<Topic>,
    pub items: Vec<QuizItem>,
    pub total_points: i64,
}

#[derive(Debug, Clone)]
pub struct Quiz {
    view: PageView<QuizPhase, QuizSession>,
    requested_topic: Option<Topic>,
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new()
    }
}

impl Quiz {
    #[must_use]
    pub fn new() -> Self {
        Self { view: PageView::new(QuizPhase::SelectingTopic { topic: Some(Topic::DEFAULT) }), requested_topic: None }
    }

    #[must_use]
    pub fn view(&self) -> &PageView<QuizPhase, QuizSession> {
        &self.view
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.view.status()
    }

    #[must_use]
    pub fn total_points(&self) -> i64 {
        self.session().map_or(0, |session| session.total_points)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.session().map_or(0, |session| session.items.len())
    }

    /// The question for the current answering or feedback step.
    #[must_use]
    pub fn current_item(&self) -> Option<&QuizItem> {
        let index = match *self.view.phase() {
            QuizPhase::Answering { index } | QuizPhase::Feedback { index, .. } => index,
            _ => return None,
        };
        self.session()?.items.get(index)
    }

    // -------------------------------------------------------------------------
    // Participation
    // -------------------------------------------------------------------------

    pub fn begin_enter(&mut self) -> Ticket {
        self.view.begin_enter()
    }

    pub fn participation_loaded(&mut self, ticket: Ticket, participation: Participation) -> bool {
        let phase = if participation.can_participate {
            QuizPhase::SelectingTopic { topic: Some(Topic::DEFAULT) }
        } else {
            QuizPhase::AlreadyDone
        };
        let session = QuizSession { can_participate: participation.can_participate, ..QuizSession::default() };
        self.view.enter_loaded(ticket, session, phase)
    }

    /// A 404 means the backend has no record of this user yet, which is a
    /// first-time participant.
    pub fn participation_failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        if err.is_not_found() {
            log::warn!("quiz participation: user unknown to backend, treating as new");
            return self.participation_loaded(ticket, Participation { can_participate: true });
        }
        self.view.enter_failed(ticket, err)
    }

    // -------------------------------------------------------------------------
    // Topic
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Refused outside topic selection or while a topic is loading.
    pub fn select_topic(&mut self, topic: Topic) -> Result<(), SubmitRejected> {
        if !matches!(self.view.phase(), QuizPhase::SelectingTopic { .. }) {
            return Err(SubmitRejected::NotAccepting);
        }
        self.view.advance(QuizPhase::SelectingTopic { topic: Some(topic) })
    }

    /// # Errors
    ///
    /// `MissingInput` when no topic is selected.
    pub fn begin_topic(&mut self) -> Result<(Ticket, Topic), SubmitRejected> {
        let QuizPhase::SelectingTopic { topic } = *self.view.phase() else {
            return Err(SubmitRejected::NotAccepting);
        };
        let topic = topic.ok_or(SubmitRejected::MissingInput)?;
        let ticket = self.view.begin_submit()?;
        self.requested_topic = Some(topic);
        Ok((ticket, topic))
    }

    /// An empty question list is reported as a failure.
    pub fn topic_loaded(&mut self, ticket: Ticket, items: Vec<QuizItem>) -> bool {
        if items.is_empty() {
            return self.view.submit_failed_with(ticket, MSG_NO_QUESTIONS);
        }
        let topic = self.requested_topic;
        self.view.submit_succeeded(
            ticket,
            |session| {
                let session = session.get_or_insert_with(QuizSession::default);
                session.topic = topic;
                session.items = items;
                session.total_points = 0;
            },
            QuizPhase::Previewing,
        )
    }

    pub fn topic_failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        self.view.submit_failed(ticket, err)
    }

    /// Leave the explanation preview and show the first question.
    ///
    /// # Errors
    ///
    /// Refused outside the preview.
    pub fn start_answering(&mut self) -> Result<(), SubmitRejected> {
        if *self.view.phase() != QuizPhase::Previewing {
            return Err(SubmitRejected::NotAccepting);
        }
        self.view.advance(QuizPhase::Answering { index: 0 })
    }

    // -------------------------------------------------------------------------
    // Answers
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Refused outside an answering step or while an answer is in flight.
    pub fn begin_answer(&mut self, user_id: &str, answer: Answer) -> Result<(Ticket, AnswerRequest), SubmitRejected> {
        let QuizPhase::Answering { index } = *self.view.phase() else {
            return Err(SubmitRejected::NotAccepting);
        };
        let session = self.view.status().ok_or(SubmitRejected::NotReady)?;
        let item = session.items.get(index).ok_or(SubmitRejected::MissingInput)?;
        let request = AnswerRequest {
            user_id: user_id.to_owned(),
            quiz_id: item.identify_code,
            user_answer: answer.as_str().to_owned(),
            topic: session.topic.map(Topic::wire_name).unwrap_or_default().to_owned(),
            quiz_index: index,
            total_questions: session.items.len(),
        };
        let ticket = self.view.begin_submit()?;
        Ok((ticket, request))
    }

    pub fn answered(&mut self, ticket: Ticket, reply: AnswerReply) -> bool {
        let QuizPhase::Answering { index } = *self.view.phase() else {
            return false;
        };
        self.view.submit_succeeded(
            ticket,
            |session| {
                if let Some(session) = session {
                    session.total_points += reply.points_awarded;
                }
            },
            QuizPhase::Feedback { index, correct: reply.is_correct, points: reply.points_awarded },
        )
    }

    pub fn answer_failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        self.view.submit_failed(ticket, err)
    }

    /// From feedback, move to the next question or to the result page.
    ///
    /// # Errors
    ///
    /// Refused outside a feedback step.
    pub fn next_question(&mut self) -> Result<(), SubmitRejected> {
        let QuizPhase::Feedback { index, .. } = *self.view.phase() else {
            return Err(SubmitRejected::NotAccepting);
        };
        let next = if index + 1 < self.question_count() {
            QuizPhase::Answering { index: index + 1 }
        } else {
            QuizPhase::Finished
        };
        self.view.advance(next)
    }

    /// Whether the current feedback step is on the last question.
    #[must_use]
    pub fn is_last_question(&self) -> bool {
        match *self.view.phase() {
            QuizPhase::Answering { index } | QuizPhase::Feedback { index, .. } => index + 1 >= self.question_count(),
            _ => false,
        }
    }

    /// Feedback line for the current feedback step.
    #[must_use]
    pub fn feedback_text(&self) -> Option<String> {
        let QuizPhase::Feedback { correct, points, .. } = *self.view.phase() else {
            return None;
        };
        let item = self.current_item()?;
        Some(if correct {
            format!("👍 Correct! (+{points} points)")
        } else {
            format!("👎 Not quite. The answer is '{}'. (+{points} points)", item.answer)
        })
    }
}
