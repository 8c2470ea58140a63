//! Failure classification and response translation for tally
//!
//! Every unhandled failure raised while processing a request terminates
//! here: it is logged once, matched against an ordered rule table, and
//! mapped to exactly one response descriptor. The mapping is total — any
//! failure shape, malformed ones included, produces a response.
//!
//! This crate is deliberately free of axum; the server layer owns the
//! conversion from [`ResponseDescriptor`] to an actual HTTP response.

#![allow(clippy::must_use_candidate)]

pub mod failure;
pub mod response;
pub mod rules;

pub use failure::{EngineError, Failure, FieldFailure, OtherFailure, StorageFailure, UNIQUE_VIOLATION, ValidationFailure};
pub use response::{Body, ResponseDescriptor};
pub use rules::{Rule, respond, rules, translate};
