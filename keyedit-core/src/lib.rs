//! This crate contains common types used across the `keyedit` crates.
//!
//! You are probably looking for the [`keyedit`](https://crates.io/crates/keyedit)
//! crate itself. This crate holds the vocabulary that every layer of an edit
//! exchange agrees on: the engine's status codes and prompt identifiers, the
//! error type an edit session can conclude with, and the key-related value
//! types that get encoded onto the command channel.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod key;
pub mod status;

pub use error::{Error, Result};
pub use key::{CheckLevel, KeyHandle, Ownertrust};
pub use status::StatusCode;
