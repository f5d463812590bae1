//! Daily check-in calendar.
//!
//! A 7-cell streak calendar. The cell at index `consecutive_days` is today's;
//! it is the only cell that submits, and only while today's check-in is
//! still open. Rewards shown on the cells are display hints; the server
//! decides what is actually awarded.

#[cfg(test)]
#[path = "attendance_test.rs"]
mod attendance_test;

use crate::api::{AttendanceReply, PointStatus};
use crate::error::ApiError;
use crate::view::{Notice, PageView, Phase, Ticket};

pub const CALENDAR_DAYS: u32 = 7;
pub const DAILY_REWARD: i64 = 1;
/// Day 7 includes the streak bonus.
pub const FINAL_DAY_REWARD: i64 = 11;

pub const MSG_ALREADY_DONE: &str = "You have already checked in today.";
pub const MSG_NOT_TODAY: &str = "This is not today's check-in day.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInPhase {
    Calendar,
    AlreadyDone,
}

impl Phase for CheckInPhase {
    fn accepts_input(&self) -> bool {
        matches!(self, Self::Calendar)
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::AlreadyDone)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMark {
    Checked,
    Today,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    /// Zero-based cell index.
    pub index: u32,
    pub reward: i64,
    pub mark: DayMark,
    pub clickable: bool,
}

impl CalendarDay {
    #[must_use]
    pub fn label(&self) -> String {
        format!("Day {}", self.index + 1)
    }
}

/// Outcome of clicking a calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClick {
    Submit(Ticket),
    AlreadyDone,
    NotToday,
}

impl DayClick {
    /// Message to show for the non-submitting outcomes.
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Submit(_) => None,
            Self::AlreadyDone => Some(MSG_ALREADY_DONE),
            Self::NotToday => Some(MSG_NOT_TODAY),
        }
    }
}

#[must_use]
pub fn reward_for(index: u32) -> i64 {
    if index + 1 == CALENDAR_DAYS { FINAL_DAY_REWARD } else { DAILY_REWARD }
}

/// Streak position on the calendar.
///
/// The backend resets `consecutive_days` to 0 on the seventh check-in, so a
/// zero streak with today already done is a completed week.
fn streak_position(status: &PointStatus) -> u32 {
    if status.attendance_participate && status.consecutive_days == 0 {
        CALENDAR_DAYS
    } else {
        status.consecutive_days.min(CALENDAR_DAYS)
    }
}

#[must_use]
pub fn phase_for(status: &PointStatus) -> CheckInPhase {
    if status.attendance_participate { CheckInPhase::AlreadyDone } else { CheckInPhase::Calendar }
}

#[derive(Debug, Clone)]
pub struct Attendance {
    view: PageView<CheckInPhase, PointStatus>,
}

impl Default for Attendance {
    fn default() -> Self {
        Self::new()
    }
}

impl Attendance {
    #[must_use]
    pub fn new() -> Self {
        Self { view: PageView::new(CheckInPhase::Calendar) }
    }

    #[must_use]
    pub fn view(&self) -> &PageView<CheckInPhase, PointStatus> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut PageView<CheckInPhase, PointStatus> {
        &mut self.view
    }

    pub fn begin_enter(&mut self) -> Ticket {
        self.view.begin_enter()
    }

    pub fn loaded(&mut self, ticket: Ticket, status: PointStatus) -> bool {
        let phase = phase_for(&status);
        self.view.enter_loaded(ticket, status, phase)
    }

    pub fn failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        self.view.enter_failed(ticket, err)
    }

    /// The seven cells, empty until status has loaded.
    #[must_use]
    pub fn days(&self) -> Vec<CalendarDay> {
        let Some(status) = self.view.status() else {
            return Vec::new();
        };
        let position = streak_position(status);
        let open = !status.attendance_participate && !self.view.is_pending();
        (0..CALENDAR_DAYS)
            .map(|index| {
                let mark = match index.cmp(&position) {
                    std::cmp::Ordering::Less => DayMark::Checked,
                    std::cmp::Ordering::Equal => DayMark::Today,
                    std::cmp::Ordering::Greater => DayMark::Upcoming,
                };
                CalendarDay {
                    index,
                    reward: reward_for(index),
                    mark,
                    clickable: open && mark == DayMark::Today,
                }
            })
            .collect()
    }

    /// Handle a click on cell `index`. Only today's open cell submits.
    pub fn click(&mut self, index: u32) -> DayClick {
        let Some(status) = self.view.status() else {
            return DayClick::NotToday;
        };
        if status.attendance_participate {
            return DayClick::AlreadyDone;
        }
        if index != streak_position(status) {
            return DayClick::NotToday;
        }
        match self.view.begin_submit() {
            Ok(ticket) => DayClick::Submit(ticket),
            Err(_) => DayClick::NotToday,
        }
    }

    /// Merge the server's confirmation. Returns the toast text when applied.
    pub fn checked_in(&mut self, ticket: Ticket, reply: &AttendanceReply) -> Option<Notice> {
        let applied = self.view.submit_succeeded(
            ticket,
            |status| {
                let status = status.get_or_insert_with(PointStatus::default);
                let next_day = reply.consecutive_days.unwrap_or_else(|| streak_position(status) + 1);
                status.consecutive_days = next_day;
                if let Some(total) = reply.total_point {
                    status.total_point = total;
                }
                status.attendance_participate = true;
            },
            CheckInPhase::AlreadyDone,
        );
        if !applied {
            return None;
        }
        let text = match reply.bonus_message.as_deref() {
            Some(bonus) if !bonus.is_empty() => format!("{}\n{bonus}", reply.message),
            _ => reply.message.clone(),
        };
        Some(Notice::success(text))
    }

    pub fn check_in_failed(&mut self, ticket: Ticket, err: &ApiError) -> bool {
        self.view.submit_failed(ticket, err)
    }
}
