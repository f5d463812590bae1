//! Idle-session warning modal and the app-wide session slot.

use leptos::prelude::*;

use crate::util::watchdog::SessionGuard;

/// Where the app shell keeps the installed watchdog and its modal flag.
#[derive(Clone, Copy)]
pub struct SessionSlot {
    pub warning: RwSignal<bool>,
    pub guard: StoredValue<Option<SessionGuard>, LocalStorage>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self { warning: RwSignal::new(false), guard: StoredValue::new_local(None) }
    }

    pub fn guard(&self) -> Option<SessionGuard> {
        self.guard.try_with_value(Clone::clone).flatten()
    }

    pub fn is_installed(&self) -> bool {
        self.guard().is_some_and(|guard| !guard.is_disposed())
    }

    /// Install a fresh watchdog, replacing any previous one.
    pub fn install(&self) {
        self.dispose();
        let guard = SessionGuard::install(crate::config::app().watchdog, self.warning);
        log::debug!("session guard installed: {:?}", guard.info());
        self.guard.set_value(Some(guard));
    }

    pub fn dispose(&self) {
        if let Some(guard) = self.guard.try_update_value(Option::take).flatten() {
            guard.dispose();
        }
        self.warning.set(false);
    }
}

impl Default for SessionSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn SessionWarningModal() -> impl IntoView {
    let slot = expect_context::<SessionSlot>();
    let lead = crate::config::app().watchdog.warning_lead_minutes();

    let on_extend = move |_| {
        if let Some(guard) = slot.guard() {
            guard.extend();
        }
    };
    let on_logout = move |_| {
        if let Some(guard) = slot.guard() {
            guard.logout_now();
        }
    };

    view! {
        <Show when=move || slot.warning.get()>
            <div class="dialog-backdrop">
                <div class="dialog session-warning" role="alertdialog">
                    <h2>"Are you still there?"</h2>
                    <p>{format!("You will be logged out in {lead} minutes because of inactivity.")}</p>
                    <div class="dialog__actions">
                        <button class="btn btn--primary" on:click=on_extend>"Stay logged in"</button>
                        <button class="btn" on:click=on_logout>"Log out now"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
