//! In-memory session ownership.
//!
//! Sessions live for the duration of a user's visit and are never
//! persisted; the [`SessionManager`] owns them and the [`reaper`] task
//! discards the ones that go idle.

mod manager;
pub mod reaper;

pub use manager::SessionManager;
