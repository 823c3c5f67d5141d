//! Core of the calculator bot: the expression evaluator, the encrypted note
//! store and the stateless command layer.
//!
//! This crate is framework-agnostic. Telegram lives behind
//! [`messaging::port::MessagingPort`] in the adapter crate.

pub mod bot;
pub mod calc;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod notes;

pub use errors::{Error, Result};
