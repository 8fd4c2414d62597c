use uuid::Uuid;

use crate::error::ApiError;

/// Checks that a caller-supplied identifier is well formed before any lookup.
///
/// Malformed ids are reported as not found, with the caller's message.
pub fn parse_object_id(raw: &str, message: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hyphenated_and_simple_forms() {
        let id = Uuid::new_v4();
        assert_eq!(parse_object_id(&id.to_string(), "bad").unwrap(), id);
        assert_eq!(parse_object_id(&id.simple().to_string(), "bad").unwrap(), id);
    }

    #[test]
    fn rejects_garbage_as_not_found() {
        for raw in ["", "123", "not-an-id", "64b7f0c2e4b0a1a2b3c4d5e6"] {
            let err = parse_object_id(raw, "Invalid Address ID").unwrap_err();
            assert!(matches!(err, ApiError::NotFound(ref m) if m == "Invalid Address ID"));
        }
    }
}
