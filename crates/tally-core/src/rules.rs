use http::StatusCode;

use crate::failure::{Failure, UNIQUE_VIOLATION};
use crate::response::ResponseDescriptor;

/// A classification rule: a predicate over failures plus a response builder
///
/// Rules hold plain function pointers, so the table lives in a `static` and
/// is shared between concurrent requests without synchronization.
pub struct Rule {
    name: &'static str,
    applies: fn(&Failure) -> bool,
    build: fn(&Failure) -> ResponseDescriptor,
}

impl Rule {
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn applies_to(&self, failure: &Failure) -> bool {
        (self.applies)(failure)
    }

    pub fn response(&self, failure: &Failure) -> ResponseDescriptor {
        (self.build)(failure)
    }
}

/// Classification order. First match wins; the last entry matches everything.
static RULES: [Rule; 3] = [
    Rule {
        name: "unique-violation",
        applies: is_unique_violation,
        build: conflict_response,
    },
    Rule {
        name: "validation",
        applies: is_validation,
        build: validation_response,
    },
    Rule {
        name: "fallback",
        applies: always,
        build: fallback_response,
    },
];

/// The ordered rule table
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// Map a failure to the response of the first matching rule
///
/// Pure and total: equal failures map to equal descriptors, and every
/// failure shape — partial or malformed origins included — produces a
/// descriptor because the table ends with an unconditional rule.
pub fn translate(failure: &Failure) -> ResponseDescriptor {
    RULES
        .iter()
        .find(|rule| rule.applies_to(failure))
        .map_or_else(|| fallback_response(failure), |rule| rule.response(failure))
}

/// Boundary entry point: record the failure, then classify it
///
/// The log record is emitted before classification runs, so no change to
/// the rule table can skip it. Invoked once per failed request.
pub fn respond(failure: &Failure) -> ResponseDescriptor {
    tracing::error!(failure = %failure, "request failed");
    translate(failure)
}

fn is_unique_violation(failure: &Failure) -> bool {
    failure
        .origin()
        .is_some_and(|origin| origin.code.as_deref() == Some(UNIQUE_VIOLATION))
}

fn conflict_response(failure: &Failure) -> ResponseDescriptor {
    // Detail can be absent even when the code matched.
    let detail = failure
        .origin()
        .and_then(|origin| origin.detail.as_deref())
        .unwrap_or_default();
    ResponseDescriptor::message(StatusCode::CONFLICT, format!("resource already exists: {detail}"))
}

fn is_validation(failure: &Failure) -> bool {
    matches!(failure, Failure::Validation(_))
}

fn validation_response(failure: &Failure) -> ResponseDescriptor {
    let messages = match failure {
        Failure::Validation(validation) => validation
            .fields
            .iter()
            .map(|field| field.message.clone())
            .collect(),
        Failure::Storage(_) | Failure::Other(_) => Vec::new(),
    };
    ResponseDescriptor::messages(StatusCode::BAD_REQUEST, messages)
}

fn always(_: &Failure) -> bool {
    true
}

fn fallback_response(failure: &Failure) -> ResponseDescriptor {
    let status = failure
        .encoded_status()
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    ResponseDescriptor::message(status, failure.to_string())
}
