//! My-page profile presentation.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use crate::api::MyPage;
use crate::format;

pub const NOT_REGISTERED: &str = "Not registered";
pub const NO_RECORD: &str = "No record";
pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("user not found")]
    UserNotFound,
    #[error("server error: {0}")]
    Server(String),
}

impl ProfileError {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UserNotFound => "Could not find your user information.",
            Self::Server(_) => crate::error::MSG_SERVER,
        }
    }
}

/// Display name for a trophy code; unknown codes show as-is.
#[must_use]
pub fn trophy_name(code: &str) -> &str {
    match code {
        "quiz_master_7days" => "Quiz Master (7-day streak)",
        "daily_champion" => "Daily Champion",
        "unique_learner" => "Unique Learner",
        "legendary_investor" => "Legendary Investor",
        other => other,
    }
}

/// `↑ +N P` for gains (and zero), `↓ N P` for losses.
#[must_use]
pub fn daily_delta(bonus: i64) -> String {
    if bonus >= 0 {
        format!("↑ +{} P", format::thousands(bonus))
    } else {
        format!("↓ {} P", format::thousands(bonus.saturating_abs()))
    }
}

/// Render-ready profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub user_id: String,
    pub nickname: String,
    pub nickname_color: Option<String>,
    pub contact: String,
    pub email: String,
    pub attendance: String,
    pub continuous_attendance: String,
    pub last_attendance_date: String,
    pub total_point: String,
    pub daily_point_bonus: String,
    pub daily_delta: String,
    pub trophies: Vec<String>,
    pub indicators: Vec<String>,
}

impl ProfileView {
    /// # Errors
    ///
    /// The backend reports failures in-band as `message: "UserNotFound"` or
    /// `message: "Error"`.
    pub fn from_page(page: &MyPage, fallback_id: &str) -> Result<Self, ProfileError> {
        match page.message.as_deref() {
            Some("UserNotFound") => return Err(ProfileError::UserNotFound),
            Some("Error") => return Err(ProfileError::Server(page.detail.clone().unwrap_or_default())),
            _ => {}
        }
        let nickname = page
            .nickname
            .clone()
            .or_else(|| page.name.clone())
            .unwrap_or_else(|| ANONYMOUS.to_owned());
        Ok(Self {
            user_id: page.id.clone().unwrap_or_else(|| fallback_id.to_owned()),
            nickname,
            nickname_color: page.nickname_color.clone().filter(|c| !c.is_empty()),
            contact: page.contact.clone().unwrap_or_else(|| NOT_REGISTERED.to_owned()),
            email: page.email.clone().unwrap_or_else(|| NOT_REGISTERED.to_owned()),
            attendance: page.attendance.to_string(),
            continuous_attendance: page.continuous_attendance.to_string(),
            last_attendance_date: page.last_attendance_date.clone().unwrap_or_else(|| NO_RECORD.to_owned()),
            total_point: format::points_spaced(page.total_point),
            daily_point_bonus: format::points_spaced(page.daily_point_bonus),
            daily_delta: daily_delta(page.daily_point_bonus),
            trophies: page.my_trophies.iter().map(|code| trophy_name(code).to_owned()).collect(),
            indicators: page.purchased_indicators.clone(),
        })
    }
}
