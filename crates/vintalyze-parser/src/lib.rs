//! Text parser for pasted Vinted profile pages.
//!
//! Turns the raw text a user copies from a seller's profile into a
//! [`vintalyze_core::RawProfileRecord`]. Optional fields that cannot be
//! located are left unset; only a missing shop name fails the parse.

pub mod error;
pub mod parse;

mod extract;
mod reviews;

pub use error::ParseError;
pub use parse::{parse_profile, parse_profile_with};
