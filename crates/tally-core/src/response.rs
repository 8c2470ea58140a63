use http::StatusCode;
use serde::Serialize;

/// What the boundary sends back for a failed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDescriptor {
    pub status: StatusCode,
    pub body: Body,
}

/// Response body: a single message, or one message per invalid field
///
/// Serialized untagged, so the wire shape is a bare JSON string or a JSON
/// array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Message(String),
    Messages(Vec<String>),
}

impl ResponseDescriptor {
    pub const fn new(status: StatusCode, body: Body) -> Self {
        Self { status, body }
    }

    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: Body::Message(message.into()),
        }
    }

    pub const fn messages(status: StatusCode, messages: Vec<String>) -> Self {
        Self {
            status,
            body: Body::Messages(messages),
        }
    }
}
