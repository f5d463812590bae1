use super::*;

#[test]
fn newer_toast_survives_older_dismissal() {
    let mut ui = UiState::default();
    let first = ui.show_toast(Notice::info("one"));
    let second = ui.show_toast(Notice::success("two"));
    ui.dismiss_toast(first);
    assert_eq!(ui.toast.as_ref().map(|(id, n)| (*id, n.text.as_str())), Some((second, "two")));
    ui.dismiss_toast(second);
    assert!(ui.toast.is_none());
}
