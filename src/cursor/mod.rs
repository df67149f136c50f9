//! Cursor module
//!
//! Opaque pagination cursors. A cursor is the base-62 encoding of a
//! zero-based dataset offset over the alphabet `0-9a-zA-Z`.
//!
//! # Overview
//!
//! Clients never see raw offsets: the server hands out a cursor with each
//! page and accepts it back on the next request. Decoding is strict, so any
//! string outside the alphabet is rejected instead of being coerced to the
//! first page.

mod codec;
mod types;

pub use codec::{decode, encode, ALPHABET, BASE, MAX_CURSOR_LEN};
pub use types::{Cursor, CursorError, Offset};
