#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use panels::Notice;

/// How long a toast stays up before it dismisses itself.
pub const TOAST_MS: u32 = 3_000;

/// Cross-page UI state: the toast slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub toast: Option<(u64, Notice)>,
    next_toast: u64,
}

impl UiState {
    /// Replace the current toast. Returns its id for [`Self::dismiss_toast`].
    pub fn show_toast(&mut self, notice: Notice) -> u64 {
        self.next_toast += 1;
        self.toast = Some((self.next_toast, notice));
        self.next_toast
    }

    /// Dismiss only if `id` is still the visible toast.
    pub fn dismiss_toast(&mut self, id: u64) {
        if self.toast.as_ref().is_some_and(|(current, _)| *current == id) {
            self.toast = None;
        }
    }
}
