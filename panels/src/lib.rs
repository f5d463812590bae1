//! Feature panels of the points center: wire schema, error taxonomy, and the
//! view-state machines behind every mini-feature page.
//!
//! Every panel is built on [`view::PageView`], which mediates between the
//! locally-held UI phase and the server-confirmed status. The state machines
//! here carry no rendering concern; the `client` crate calls their
//! transitions from DOM events and renders from their state.

pub mod account;
pub mod ad_watch;
pub mod api;
pub mod attendance;
pub mod error;
pub mod format;
pub mod number_game;
pub mod profile;
pub mod quiz;
pub mod ranking;
pub mod stock;
pub mod store;
pub mod view;

pub use error::ApiError;
pub use view::{Load, Notice, PageView, Phase, SubmitRejected, Ticket, Tone};
