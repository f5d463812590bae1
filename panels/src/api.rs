//! Backend wire schema: endpoint paths and JSON request/response bodies.
//!
//! DESIGN
//! ======
//! Bodies mirror the backend's JSON exactly (snake_case field names). The
//! backend returns `null` for unset columns, so numeric and boolean fields use
//! [`null_as_default`] rather than failing deserialization.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::{Deserialize, Deserializer, Serialize};

/// Endpoint paths, relative to the configured API base.
pub mod endpoints {
    pub const LOGIN_VALIDATION: &str = "/login/validation";
    pub const LOGIN_NAME: &str = "/login/get_name";
    pub const SIGN_UP: &str = "/sign_up/";

    pub const ATTENDANCE: &str = "/point/attendance";
    pub const GAME_RESULT: &str = "/point/game-result";
    pub const AD_GAIN: &str = "/point/gain/ad";

    pub const QUIZ_PARTICIPATION: &str = "/quiz/check-participation";
    pub const QUIZ_BY_TOPIC: &str = "/quiz/get-by-topic";
    pub const QUIZ_SUBMIT: &str = "/quiz/submit-answer";

    pub const RANKING_TOP: &str = "/ranking/top-points";

    pub const SHOP_PURCHASE: &str = "/shop/purchase";

    pub const STOCK_GAME_DATA: &str = "/stock-predict/get-game-data";
    pub const STOCK_SUBMIT: &str = "/stock-predict/submit-prediction";
    pub const STOCK_HISTORY: &str = "/stock-predict/get-history";
    pub const STOCK_CLAIM: &str = "/stock-predict/claim-points";

    /// `GET /mypage/{user_id}`
    #[must_use]
    pub fn mypage(user_id: &str) -> String {
        format!("/mypage/{}", encode_segment(user_id))
    }

    /// `GET /point/{user_id}/status`
    #[must_use]
    pub fn point_status(user_id: &str) -> String {
        format!("/point/{}/status", encode_segment(user_id))
    }

    /// `GET /ranking/user-rank/{user_id}`
    #[must_use]
    pub fn user_rank(user_id: &str) -> String {
        format!("/ranking/user-rank/{}", encode_segment(user_id))
    }

    /// Percent-encode a single path segment (RFC 3986 unreserved set kept).
    #[must_use]
    pub fn encode_segment(raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        for byte in raw.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
                out.push(char::from(byte));
            } else {
                out.push_str(&format!("%{byte:02X}"));
            }
        }
        out
    }
}

/// Deserialize `null` (or a missing field, with `#[serde(default)]`) as
/// `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// ACCOUNTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Reply of `POST /login/validation`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginValidation {
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginValidation {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.message.as_deref() == Some("LoginSuccess")
    }
}

/// Reply of `POST /login/get_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginName {
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    pub nickname: String,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageReply {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

// =============================================================================
// POINT CENTER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdRequest {
    pub user_id: String,
}

/// Reply of `GET /point/{user_id}/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PointStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_point: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub consecutive_days: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ad_participation: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attendance_participate: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dailygame_participate: bool,
}

/// Reply of `POST /point/attendance`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AttendanceReply {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub total_point: Option<i64>,
    #[serde(default)]
    pub consecutive_days: Option<u32>,
    #[serde(default)]
    pub bonus_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResultRequest {
    pub user_id: String,
    pub won: bool,
}

/// Reply of `POST /point/game-result`. `total_point` is present only when
/// points were actually awarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameResultReply {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub total_point: Option<i64>,
}

/// Reply of `POST /point/gain/ad`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdReply {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub total_point: Option<i64>,
    #[serde(default)]
    pub new_ad_count: Option<u32>,
}

// =============================================================================
// QUIZ
// =============================================================================

/// Reply of `GET /quiz/check-participation` and the stock game eligibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Participation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub can_participate: bool,
}

/// One question from `GET /quiz/get-by-topic`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizItem {
    pub identify_code: i64,
    pub question: String,
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRequest {
    pub user_id: String,
    pub quiz_id: i64,
    pub user_answer: String,
    pub topic: String,
    pub quiz_index: usize,
    pub total_questions: usize,
}

/// Reply of `POST /quiz/submit-answer`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct AnswerReply {
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_correct: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points_awarded: i64,
}

// =============================================================================
// RANKING
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RankEntry {
    pub rank: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nickname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_point: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRank {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nickname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_point: i64,
    pub rank: u32,
}

// =============================================================================
// SHOP
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseRequest {
    pub user_id: String,
    pub item_code: String,
    pub item_name: String,
    pub price: i64,
}

/// Reply of `POST /shop/purchase`. `total_point` is the authoritative
/// post-purchase balance, random reward included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PurchaseReply {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ok: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_point: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rng_gain: i64,
}

// =============================================================================
// MY PAGE
// =============================================================================

/// Reply of `GET /mypage/{user_id}`. Error shapes carry only `message`
/// (`"UserNotFound"` / `"Error"`) and `detail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MyPage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nickname_color: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attendance: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub continuous_attendance: i64,
    #[serde(default)]
    pub last_attendance_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_point: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub daily_point_bonus: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub my_trophies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub purchased_indicators: Vec<String>,
}

// =============================================================================
// STOCK PREDICTION
// =============================================================================

/// Direction of a price prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "📈 Up",
            Self::Down => "📉 Down",
        }
    }
}

/// Reply of `GET /stock-predict/get-game-data`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StockGameData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub can_participate: bool,
    pub stock_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock_name: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_predict: Option<f64>,
    #[serde(default)]
    pub trend_predict: Option<Trend>,
    #[serde(default)]
    pub sentiment_outlook: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionRequest {
    pub user_id: String,
    pub stock_code: String,
    pub user_predict_trend: Trend,
    pub reasoning: String,
}

/// One entry of `GET /stock-predict/get-history`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PredictionRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prediction_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock_code: String,
    pub predicted_trend: Trend,
    #[serde(default)]
    pub actual_trend: Option<Trend>,
    #[serde(default)]
    pub is_correct: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points_claimed: bool,
    #[serde(default)]
    pub reasoning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimRequest {
    pub user_id: String,
    pub prediction_id: i64,
}

/// Reply of `POST /stock-predict/claim-points`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClaimReply {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points_awarded: i64,
    #[serde(default)]
    pub total_point: Option<i64>,
}
