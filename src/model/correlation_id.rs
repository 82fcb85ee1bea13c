//! Correlation-ID is a UUID sent with every call to the task store so that
//! client and server logs of one user action can be joined.

use http::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use thiserror::Error;
use uuid::{fmt::Hyphenated, Uuid};

/// Correlation-ID for correlating logs together
#[derive(Clone, Debug, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CorrelationId(Uuid);

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CorrelationId {
    fn from(c: Uuid) -> Self {
        CorrelationId(c)
    }
}

impl From<CorrelationId> for Uuid {
    fn from(c: CorrelationId) -> Self {
        c.0
    }
}

impl<'a> TryFrom<&'a str> for CorrelationId {
    type Error = InvalidCorrelationId;

    fn try_from(input: &'a str) -> Result<Self, Self::Error> {
        Uuid::parse_str(input)
            .map(CorrelationId)
            .map_err(|_| InvalidCorrelationId::InvalidString(input.to_string()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCorrelationId {
    #[error("correlation-id not found")]
    NotFound,
    #[error("Invalid correlation-id string {0}")]
    InvalidString(String),
}

impl CorrelationId {
    pub const HEADER_NAME: &'static str = "correlation-id";

    pub fn new() -> Self {
        CorrelationId(Uuid::new_v4())
    }

    /// Extract correlation-id from a set of HTTP headers
    pub fn from_header_map(h: &HeaderMap) -> Result<Self, InvalidCorrelationId> {
        h.get(Self::HEADER_NAME)
            .ok_or(InvalidCorrelationId::NotFound)
            .and_then(|x| {
                x.to_str()
                    .map_err(|err| InvalidCorrelationId::InvalidString(err.to_string()))
            })
            .and_then(CorrelationId::try_from)
    }

    pub fn insert_into_header_map(&self, h: &mut HeaderMap) {
        let mut buffer = Uuid::encode_buffer();
        let encoded = self.as_hyphenated().encode_lower(&mut buffer);
        // a hyphenated uuid is plain ascii, always a valid header value
        if let Ok(value) = HeaderValue::from_str(encoded) {
            h.insert(Self::HEADER_NAME, value);
        }
    }

    pub fn as_hyphenated(&self) -> Hyphenated {
        self.0.hyphenated()
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_round_trip() {
        let mut headers = HeaderMap::new();
        assert_eq!(
            CorrelationId::from_header_map(&headers),
            Err(InvalidCorrelationId::NotFound)
        );

        let cid = CorrelationId::new();
        cid.insert_into_header_map(&mut headers);
        assert_eq!(CorrelationId::from_header_map(&headers), Ok(cid));
    }

    #[test]
    fn test_invalid_header_value() {
        let mut headers = HeaderMap::new();
        headers.insert(CorrelationId::HEADER_NAME, HeaderValue::from_static("nope"));
        assert_eq!(
            CorrelationId::from_header_map(&headers),
            Err(InvalidCorrelationId::InvalidString("nope".to_string()))
        );
    }
}
