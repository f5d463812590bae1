//! Routed pages. Each page owns its feature state locally and reads the
//! shared `AuthState` / `UiState` signals from context.

pub mod events;
pub mod home;
pub mod login;
pub mod mypage;
pub mod quiz;
pub mod sign_up;
pub mod stock;
pub mod store;
