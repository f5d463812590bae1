//! Browser utilities: storage, timers, DOM glue.

pub mod auth;
pub mod browser;
pub mod poller;
pub mod storage;
pub mod watchdog;
