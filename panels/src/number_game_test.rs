use super::*;

fn ready(target: u32) -> NumberGame {
    let mut game = NumberGame::new(target);
    let ticket = game.begin_enter();
    assert!(game.loaded(ticket, PointStatus::default()));
    game
}

#[test]
fn out_of_range_and_garbage_never_consume_chances() {
    let mut game = ready(50);
    for input in ["0", "101", "-3", "abc", "", "12.5"] {
        assert_eq!(game.guess(input), Some(Guess::Invalid), "input {input:?}");
    }
    assert_eq!(game.chances(), CHANCES);
}

#[test]
fn hints_point_toward_target() {
    let mut game = ready(50);
    assert_eq!(game.guess("10"), Some(Guess::Up));
    assert_eq!(game.guess(" 90 "), Some(Guess::Down));
    assert_eq!(game.chances(), 3);
    assert_eq!(Guess::Up.hint(), Some(MSG_UP));
}

#[test]
fn correct_guess_moves_to_settling_won() {
    let mut game = ready(42);
    assert_eq!(game.guess("42"), Some(Guess::Won));
    assert_eq!(game.view().phase(), &GamePhase::Settling { won: true });
    assert!(!game.can_guess());
    assert_eq!(game.guess("1"), None);
}

#[test]
fn fifth_miss_loses() {
    let mut game = ready(42);
    for _ in 0..4 {
        assert_eq!(game.guess("1"), Some(Guess::Up));
    }
    assert_eq!(game.guess("1"), Some(Guess::Lost));
    assert_eq!(game.chances(), 0);
    assert_eq!(game.view().phase(), &GamePhase::Settling { won: false });
}

#[test]
fn settle_uses_server_message_and_optional_balance() {
    let mut game = ready(42);
    game.guess("42");
    let (ticket, won) = game.begin_settle().expect("settle");
    assert!(won);
    let reply = GameResultReply { message: "+5P earned".to_owned(), total_point: Some(1205) };
    assert!(game.settled(ticket, &reply));
    assert_eq!(game.view().phase(), &GamePhase::Settled { won: true });
    assert_eq!(game.result(), Some("Correct! 🎉 +5P earned\nBalance: 1,205P"));
}

#[test]
fn losing_settle_reveals_target_without_balance_line() {
    let mut game = ready(7);
    for _ in 0..5 {
        game.guess("99");
    }
    let (ticket, won) = game.begin_settle().expect("settle");
    assert!(!won);
    let reply = GameResultReply { message: "Better luck tomorrow".to_owned(), total_point: None };
    game.settled(ticket, &reply);
    assert_eq!(game.result(), Some("So close. The answer was 7. Better luck tomorrow"));
}

#[test]
fn failed_settle_can_be_retried() {
    let mut game = ready(42);
    game.guess("42");
    let (ticket, _) = game.begin_settle().expect("settle");
    assert_eq!(game.begin_settle(), Err(SubmitRejected::Pending));
    assert!(game.settle_failed(ticket, &ApiError::Transport("offline".to_owned())));
    assert_eq!(game.view().phase(), &GamePhase::Settling { won: true });
    assert!(game.begin_settle().is_ok());
}

#[test]
fn already_played_disables_game() {
    let mut game = NumberGame::new(42);
    let ticket = game.begin_enter();
    game.loaded(ticket, PointStatus { dailygame_participate: true, ..PointStatus::default() });
    assert_eq!(game.view().phase(), &GamePhase::AlreadyPlayed);
    assert_eq!(game.guess("42"), None);
    assert_eq!(game.begin_settle(), Err(SubmitRejected::NotAccepting));
}

#[test]
fn target_is_clamped_into_range() {
    assert_eq!(NumberGame::new(0).target(), 1);
    assert_eq!(NumberGame::new(500).target(), 100);
}
