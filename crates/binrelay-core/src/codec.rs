//! Base64 transport encoding used on the JSON boundary.
//!
//! Both relays carry binary bytes inside JSON strings. Decoding is strict:
//! standard alphabet with padding, no whitespace, no data-URL prefix.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;

/// The encoded text could not be turned back into bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid base64 payload: {0}")]
pub struct CodecError(#[from] base64::DecodeError);

/// Reconstruct the exact byte sequence behind `encoded`.
pub fn decode(encoded: &str) -> Result<Vec<u8>, CodecError> {
    Ok(STANDARD.decode(encoded)?)
}

/// Encode raw bytes for transport inside JSON.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_values() {
        assert_eq!(decode("AAAA").unwrap(), vec![0, 0, 0]);
        assert_eq!(decode("SGVsbG8=").unwrap(), b"Hello".to_vec());
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode(&[0, 0, 0]), "AAAA");
        assert_eq!(encode(b"Hello"), "SGVsbG8=");
    }

    #[test]
    fn test_round_trip_preserves_bytes() {
        let all_bytes: Vec<u8> = (0..=255).collect();
        let samples: [&[u8]; 4] = [b"", b"\x00", b"\xff\xfe\xfd\x00\x01", &all_bytes];
        for sample in samples {
            assert_eq!(decode(&encode(sample)).unwrap(), sample);
        }
    }

    #[test]
    fn test_invalid_input_is_an_error() {
        assert!(decode("not base64!").is_err());
        assert!(decode("SGVsbG8").is_err());
        assert!(decode("data:image/png;base64,AAAA").is_err());
    }

    #[test]
    fn test_error_message_names_cause() {
        let err = decode("@@@@").unwrap_err();
        assert!(err.to_string().starts_with("invalid base64 payload"));
    }
}
