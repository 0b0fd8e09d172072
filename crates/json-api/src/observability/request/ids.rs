//! Request id resolution and echoing.

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuse the caller's request id when it is usable, otherwise mint a v7 uuid.
pub(super) fn resolve(header_value: Option<String>) -> String {
    header_value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty() && value.len() <= MAX_REQUEST_ID_LEN)
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

pub(super) fn set_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => {
            warn!(
                request_id,
                "could not encode request id for response header: {source}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_caller_supplied_id() {
        assert_eq!(resolve(Some(" abc-123 ".to_owned())), "abc-123");
    }

    #[test]
    fn generates_id_for_blank_or_oversized_values() {
        for value in [None, Some("   ".to_owned()), Some("x".repeat(200))] {
            let resolved = resolve(value);

            assert!(
                Uuid::parse_str(&resolved).is_ok(),
                "expected generated uuid, got {resolved}"
            );
        }
    }
}
