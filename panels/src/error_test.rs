use super::*;

#[test]
fn extract_detail_reads_string_detail() {
    assert_eq!(
        extract_detail(r#"{"detail":"오늘은 이미 출석체크를 완료했습니다."}"#).as_deref(),
        Some("오늘은 이미 출석체크를 완료했습니다.")
    );
}

#[test]
fn extract_detail_joins_validation_records() {
    let body = r#"{"detail":[{"loc":["body","user_id"],"msg":"field required"},{"msg":"bad price"}]}"#;
    assert_eq!(extract_detail(body).as_deref(), Some("field required; bad price"));
}

#[test]
fn extract_detail_falls_back_to_message_then_raw_text() {
    assert_eq!(extract_detail(r#"{"message":"UserNotFound"}"#).as_deref(), Some("UserNotFound"));
    assert_eq!(extract_detail("Internal Server Error").as_deref(), Some("Internal Server Error"));
    assert_eq!(extract_detail("   "), None);
    assert_eq!(extract_detail(r#"{"other":1}"#), None);
}

#[test]
fn from_response_classifies_by_status() {
    assert!(matches!(ApiError::from_response(0, ""), ApiError::Transport(_)));
    assert_eq!(
        ApiError::from_response(400, r#"{"detail":"포인트가 부족합니다."}"#),
        ApiError::Rejected { status: 400, detail: Some("포인트가 부족합니다.".to_owned()) }
    );
    assert_eq!(
        ApiError::from_response(503, ""),
        ApiError::Server { status: 503, detail: None }
    );
}

#[test]
fn user_message_shows_rejection_detail_verbatim() {
    let err = ApiError::Rejected { status: 400, detail: Some("already done".to_owned()) };
    assert_eq!(err.user_message(), "already done");
    let bare = ApiError::Rejected { status: 409, detail: None };
    assert_eq!(bare.user_message(), "The request was rejected (HTTP 409).");
}

#[test]
fn user_message_hides_server_and_transport_details() {
    let server = ApiError::Server { status: 500, detail: Some("traceback".to_owned()) };
    assert_eq!(server.user_message(), MSG_SERVER);
    assert_eq!(ApiError::Transport("dns".to_owned()).user_message(), MSG_TRANSPORT);
    assert_eq!(ApiError::Decode("eof".to_owned()).user_message(), MSG_DECODE);
}

#[test]
fn status_and_not_found_helpers() {
    let err = ApiError::from_response(404, r#"{"detail":"User 'x' not found."}"#);
    assert_eq!(err.status(), Some(404));
    assert!(err.is_not_found());
    assert_eq!(err.detail(), Some("User 'x' not found."));
    assert_eq!(ApiError::MissingIdentity.status(), None);
}
