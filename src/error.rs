//! Cursor access errors.
//!
//! Misusing a cursor is a programming error, so the plain cursor operations on
//! [`LruCache`](crate::LruCache) panic with these messages. The `try_*` variants
//! return them instead, for callers that would rather branch than crash.

use thiserror::Error;

/// Ways a [`Cursor`](crate::Cursor) can fail to resolve against its cache.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// The cursor is positioned at `end()`, which holds no entry and has no
    /// successor.
    #[error("cursor is positioned at end()")]
    End,

    /// The entry the cursor referred to was erased or evicted, or the cursor was
    /// issued by a different cache.
    #[error("cursor refers to an entry that is no longer in the cache")]
    Stale,

    /// The cursor is positioned at `begin()` and has no predecessor.
    #[error("cursor cannot move before begin()")]
    BeforeBegin,
}
