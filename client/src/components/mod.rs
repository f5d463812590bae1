//! Shared UI components used across pages.

pub mod header;
pub mod load_gate;
pub mod ranking_panel;
pub mod session_modal;
pub mod toast;
