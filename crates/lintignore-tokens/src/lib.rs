//! Python tokenization.
//!
//! This crate turns Python source text into the token stream consumed by the
//! suppression engine: comments, strings, logical and non-logical line breaks,
//! and an end marker. Everything else is an opaque `Other` token.

mod python;

pub use python::{Position, Token, TokenKind, tokenize};
