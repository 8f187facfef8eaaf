//! Exhaustive single-byte tamper detection.
//!
//! Flipping any one byte of an encoded license must make decode fail,
//! never succeed with altered content.

mod common;

use common::{encrypted_pair, signed_pair, SAMPLE_TEXT};
use lexlock_crypto::{decode, encode};

/// Replaces the byte at `pos` with a different printable byte.
fn flip_byte(encoded: &str, pos: usize) -> String {
    let mut bytes = encoded.as_bytes().to_vec();
    bytes[pos] = if bytes[pos] == b'A' { b'B' } else { b'A' };
    String::from_utf8(bytes).unwrap()
}

#[test]
fn every_byte_flip_is_rejected_signed() {
    let (server, client) = signed_pair();
    let encoded = encode(SAMPLE_TEXT, &server).unwrap();
    let encoded = encoded.as_str();

    for pos in 0..encoded.len() {
        let tampered = flip_byte(encoded, pos);
        if tampered == encoded {
            continue;
        }
        let result = decode(&tampered, &client);
        assert!(
            result.is_err(),
            "byte flip at {pos} was not rejected: {tampered}"
        );
    }
}

#[test]
fn every_byte_flip_is_rejected_encrypted() {
    let (server, client) = encrypted_pair();
    let encoded = encode(SAMPLE_TEXT, &server).unwrap();
    let encoded = encoded.as_str();

    for pos in 0..encoded.len() {
        let tampered = flip_byte(encoded, pos);
        if tampered == encoded {
            continue;
        }
        let result = decode(&tampered, &client);
        assert!(
            result.is_err(),
            "byte flip at {pos} was not rejected: {tampered}"
        );
    }
}

#[test]
fn appended_byte_is_rejected() {
    let (server, client) = signed_pair();
    let encoded = encode(SAMPLE_TEXT, &server).unwrap();
    let extended = format!("{}A", encoded.as_str());
    assert!(decode(&extended, &client).is_err());
}

#[test]
fn decoded_text_is_never_altered() {
    // Positive control: the untampered envelope still round-trips after
    // all the destructive probing above.
    let (server, client) = signed_pair();
    let encoded = encode(SAMPLE_TEXT, &server).unwrap();
    assert_eq!(decode(encoded.as_str(), &client).unwrap(), SAMPLE_TEXT);
}
