use super::*;

#[test]
fn trophy_codes_map_to_names() {
    assert_eq!(trophy_name("daily_champion"), "Daily Champion");
    assert_eq!(trophy_name("quiz_master_7days"), "Quiz Master (7-day streak)");
    assert_eq!(trophy_name("mystery_badge"), "mystery_badge");
}

#[test]
fn daily_delta_arrows() {
    assert_eq!(daily_delta(15), "↑ +15 P");
    assert_eq!(daily_delta(0), "↑ +0 P");
    assert_eq!(daily_delta(-1200), "↓ 1,200 P");
}

#[test]
fn error_shapes_become_errors() {
    let missing = MyPage { message: Some("UserNotFound".to_owned()), ..MyPage::default() };
    assert_eq!(ProfileView::from_page(&missing, "u1"), Err(ProfileError::UserNotFound));
    let broken = MyPage {
        message: Some("Error".to_owned()),
        detail: Some("db down".to_owned()),
        ..MyPage::default()
    };
    assert_eq!(ProfileView::from_page(&broken, "u1"), Err(ProfileError::Server("db down".to_owned())));
}

#[test]
fn profile_fills_defaults() {
    let page = MyPage {
        name: Some("Kim".to_owned()),
        total_point: 2_500,
        daily_point_bonus: -20,
        my_trophies: vec!["unique_learner".to_owned()],
        ..MyPage::default()
    };
    let view = ProfileView::from_page(&page, "u1").expect("profile");
    assert_eq!(view.user_id, "u1");
    assert_eq!(view.nickname, "Kim");
    assert_eq!(view.contact, NOT_REGISTERED);
    assert_eq!(view.last_attendance_date, NO_RECORD);
    assert_eq!(view.total_point, "2,500 P");
    assert_eq!(view.daily_delta, "↓ 20 P");
    assert_eq!(view.trophies, ["Unique Learner"]);
}
