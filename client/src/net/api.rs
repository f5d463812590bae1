//! REST helpers for the points backend.
//!
//! Browser builds (`csr`): real HTTP calls via `gloo-net`.
//! Native builds: every call fails with a transport error, since there is no
//! backend to reach outside the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every helper returns `Result<_, ApiError>`. Non-2xx responses are
//! classified by [`ApiError::from_response`]; a 2xx body that does not match
//! the schema is `ApiError::Decode`. Nothing here retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use panels::ApiError;
use panels::api::endpoints;
use panels::api::{
    AdReply, AnswerReply, AnswerRequest, AttendanceReply, ClaimReply, ClaimRequest, Credentials, GameResultReply,
    GameResultRequest, LoginName, LoginValidation, MessageReply, MyPage, Participation, PointStatus,
    PredictionRecord, PredictionRequest, PurchaseReply, PurchaseRequest, QuizItem, RankEntry, SignUpRequest,
    StockGameData, UserIdRequest, UserRank,
};
use panels::quiz::Topic;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Append `?k=v&...` with percent-encoded values.
fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={}", endpoints::encode_segment(value)))
        .collect::<Vec<_>>()
        .join("&");
    if query.is_empty() { path.to_owned() } else { format!("{path}?{query}") }
}

fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_response(status, body));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Sign-up replies are sometimes plain text; use the raw body as the message.
fn decode_message(status: u16, body: &str) -> Result<String, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_response(status, body));
    }
    Ok(serde_json::from_str::<MessageReply>(body).map_or_else(|_| body.trim().to_owned(), |reply| reply.message))
}

#[cfg(feature = "csr")]
fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// Issue a request and return status plus raw body.
async fn send_raw<B: Serialize>(method: &str, path: &str, body: Option<&B>) -> Result<(u16, String), ApiError> {
    #[cfg(feature = "csr")]
    {
        use gloo_net::http::Request;

        let url = crate::config::app().url(path);
        let builder = match method {
            "POST" => Request::post(&url),
            _ => Request::get(&url),
        };
        let resp = match body {
            Some(body) => builder.json(body).map_err(transport)?.send().await,
            None => builder.send().await,
        }
        .map_err(transport)?;
        let status = resp.status();
        let text = resp.text().await.map_err(transport)?;
        log::debug!("{method} {path} -> {status}");
        Ok((status, text))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (method, path, body);
        Err(ApiError::Transport("no browser environment".to_owned()))
    }
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let (status, body) = send_raw::<()>("GET", path, None).await?;
    decode(status, &body)
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let (status, body) = send_raw("POST", path, Some(body)).await?;
    decode(status, &body)
}

fn user_body(user_id: &str) -> UserIdRequest {
    UserIdRequest { user_id: user_id.to_owned() }
}

// =============================================================================
// ACCOUNTS
// =============================================================================

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn login_validation(credentials: &Credentials) -> Result<LoginValidation, ApiError> {
    post_json(endpoints::LOGIN_VALIDATION, credentials).await
}

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn login_name(credentials: &Credentials) -> Result<LoginName, ApiError> {
    post_json(endpoints::LOGIN_NAME, credentials).await
}

/// Returns the server's confirmation message.
///
/// # Errors
///
/// Transport failure or a rejection carrying the server's `detail`.
pub async fn sign_up(request: &SignUpRequest) -> Result<String, ApiError> {
    let (status, body) = send_raw("POST", endpoints::SIGN_UP, Some(request)).await?;
    decode_message(status, &body)
}

// =============================================================================
// POINT CENTER
// =============================================================================

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn point_status(user_id: &str) -> Result<PointStatus, ApiError> {
    get_json(&endpoints::point_status(user_id)).await
}

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn attendance(user_id: &str) -> Result<AttendanceReply, ApiError> {
    post_json(endpoints::ATTENDANCE, &user_body(user_id)).await
}

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn game_result(request: &GameResultRequest) -> Result<GameResultReply, ApiError> {
    post_json(endpoints::GAME_RESULT, request).await
}

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn gain_ad(user_id: &str) -> Result<AdReply, ApiError> {
    post_json(endpoints::AD_GAIN, &user_body(user_id)).await
}

// =============================================================================
// QUIZ
// =============================================================================

/// # Errors
///
/// A 404 surfaces as `Rejected`; callers treat it as a new user.
pub async fn quiz_participation(user_id: &str) -> Result<Participation, ApiError> {
    get_json(&with_query(endpoints::QUIZ_PARTICIPATION, &[("user_id", user_id)])).await
}

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn quiz_by_topic(topic: Topic) -> Result<Vec<QuizItem>, ApiError> {
    get_json(&with_query(endpoints::QUIZ_BY_TOPIC, &[("topic", topic.wire_name())])).await
}

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn submit_answer(request: &AnswerRequest) -> Result<AnswerReply, ApiError> {
    post_json(endpoints::QUIZ_SUBMIT, request).await
}

// =============================================================================
// RANKING
// =============================================================================

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn ranking_top(limit: u32) -> Result<Vec<RankEntry>, ApiError> {
    get_json(&with_query(endpoints::RANKING_TOP, &[("limit", &limit.to_string())])).await
}

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn user_rank(user_id: &str) -> Result<UserRank, ApiError> {
    get_json(&endpoints::user_rank(user_id)).await
}

// =============================================================================
// SHOP / MY PAGE
// =============================================================================

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn purchase(request: &PurchaseRequest) -> Result<PurchaseReply, ApiError> {
    post_json(endpoints::SHOP_PURCHASE, request).await
}

/// In-band error shapes (`message: "UserNotFound"`) come back as `Ok`.
///
/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn mypage(user_id: &str) -> Result<MyPage, ApiError> {
    get_json(&endpoints::mypage(user_id)).await
}

// =============================================================================
// STOCK PREDICTION
// =============================================================================

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn stock_game_data(user_id: &str) -> Result<StockGameData, ApiError> {
    get_json(&with_query(endpoints::STOCK_GAME_DATA, &[("user_id", user_id)])).await
}

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn submit_prediction(request: &PredictionRequest) -> Result<MessageReply, ApiError> {
    post_json(endpoints::STOCK_SUBMIT, request).await
}

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn stock_history(user_id: &str) -> Result<Vec<PredictionRecord>, ApiError> {
    get_json(&with_query(endpoints::STOCK_HISTORY, &[("user_id", user_id)])).await
}

/// # Errors
///
/// Transport, rejection or decode failures.
pub async fn claim_points(request: &ClaimRequest) -> Result<ClaimReply, ApiError> {
    post_json(endpoints::STOCK_CLAIM, request).await
}
