use super::*;

#[test]
fn with_query_encodes_values() {
    assert_eq!(
        with_query(endpoints::QUIZ_BY_TOPIC, &[("topic", "기술적 지표")]),
        "/quiz/get-by-topic?topic=%EA%B8%B0%EC%88%A0%EC%A0%81%20%EC%A7%80%ED%91%9C"
    );
    assert_eq!(with_query(endpoints::RANKING_TOP, &[("limit", "5")]), "/ranking/top-points?limit=5");
    assert_eq!(with_query("/x", &[]), "/x");
}

#[test]
fn decode_parses_success_body() {
    let status: PointStatus = decode(200, r#"{"total_point":5}"#).expect("status");
    assert_eq!(status.total_point, 5);
}

#[test]
fn decode_classifies_error_status() {
    let err = decode::<PointStatus>(404, r#"{"detail":"User not found"}"#).expect_err("404");
    assert!(err.is_not_found());
    let err = decode::<PointStatus>(502, "Bad Gateway").expect_err("502");
    assert!(matches!(err, ApiError::Server { status: 502, .. }));
}

#[test]
fn decode_reports_schema_mismatch() {
    let err = decode::<Vec<RankEntry>>(200, r#"{"oops":true}"#).expect_err("decode");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn sign_up_message_accepts_plain_text() {
    assert_eq!(decode_message(200, r#"{"message":"created"}"#).as_deref(), Ok("created"));
    assert_eq!(decode_message(201, "created\n").as_deref(), Ok("created"));
    let err = decode_message(400, r#"{"detail":"ID already exists"}"#).expect_err("400");
    assert_eq!(err.user_message(), "ID already exists");
}
