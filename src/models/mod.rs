//! Domain models for the memo API.
//!
//! - [`Memo`]: the persisted entity, one row of the `memo` table.
//! - [`MemoRequest`]: request body for creating or updating a memo.
//! - [`MemoResponse`]: what the HTTP API hands back to clients.

mod memo;

pub use memo::*;
