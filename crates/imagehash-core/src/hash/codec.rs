//! Text form of hash values: `<k>:<hex>`.
//!
//! `<k>` is the one-character kind tag (`a`, `p`, `d`, `w`) or nothing for an unknown
//! kind. `<hex>` is the words rendered big-endian in lowercase, 16 digits per word.

use crate::error::{Error, Result};
use crate::types::Kind;

/// Render `words` with the tag of `kind`.
pub fn encode_text(kind: Kind, words: &[u64]) -> String {
    let bytes: Vec<u8> = words.iter().flat_map(|word| word.to_be_bytes()).collect();
    format!("{}:{}", kind.tag(), hex::encode(bytes))
}

/// Parse the single-word form. Accepts 1 to 16 hex digits.
pub fn decode_fixed(text: &str) -> Result<(Kind, u64)> {
    let (kind, payload) = split_text(text)?;

    if payload.len() > 16 || !payload.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(parse_error(text, "expected 1 to 16 hex digits"));
    }

    let hash = u64::from_str_radix(payload, 16).map_err(|e| parse_error(text, &e.to_string()))?;
    Ok((kind, hash))
}

/// Parse the multi-word form. The payload must decode to a non-zero multiple of 8 bytes.
pub fn decode_extended(text: &str) -> Result<(Kind, Vec<u64>)> {
    let (kind, payload) = split_text(text)?;

    let bytes = hex::decode(payload).map_err(|e| parse_error(text, &e.to_string()))?;
    if bytes.is_empty() || bytes.len() % 8 != 0 {
        return Err(parse_error(
            text,
            &format!("{} bytes is not a whole number of words", bytes.len()),
        ));
    }

    let words = bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            u64::from_be_bytes(word)
        })
        .collect();

    Ok((kind, words))
}

fn split_text(text: &str) -> Result<(Kind, &str)> {
    let (tag, payload) = text
        .split_once(':')
        .ok_or_else(|| parse_error(text, "missing ':' separator"))?;

    if tag.chars().count() > 1 {
        return Err(parse_error(text, "kind tag is longer than one character"));
    }
    if payload.is_empty() {
        return Err(parse_error(text, "empty hash"));
    }

    Ok((Kind::from_tag(tag), payload))
}

fn parse_error(text: &str, reason: &str) -> Error {
    Error::Parse(format!("couldn't parse {:?}: {}", text, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_zero_padded_lowercase() {
        assert_eq!(encode_text(Kind::PerceptualHash, &[0xAB]), "p:00000000000000ab");
        assert_eq!(encode_text(Kind::Unknown, &[u64::MAX]), ":ffffffffffffffff");
        assert_eq!(
            encode_text(Kind::WaveletHash, &[1, 2]),
            "w:00000000000000010000000000000002"
        );
    }

    #[test]
    fn fixed_accepts_short_payloads() {
        assert_eq!(decode_fixed("a:ff").unwrap(), (Kind::AverageHash, 0xff));
        assert_eq!(decode_fixed(":1").unwrap(), (Kind::Unknown, 1));
        assert_eq!(
            decode_fixed("d:FFFFFFFFFFFFFFFF").unwrap(),
            (Kind::DifferenceHash, u64::MAX)
        );
    }

    #[test]
    fn unrecognized_tag_parses_as_unknown() {
        assert_eq!(decode_fixed("x:10").unwrap(), (Kind::Unknown, 16));
    }

    #[test]
    fn fixed_rejects_malformed_text() {
        for text in [
            "",
            "p",
            "p:",
            "ph:00",
            "p:xyz",
            "p:+1",
            "p:00000000000000000",
            "p:0000 0000",
        ] {
            assert!(
                matches!(decode_fixed(text), Err(Error::Parse(_))),
                "{:?} should not parse",
                text
            );
        }
    }

    #[test]
    fn extended_words_are_big_endian() {
        let (kind, words) = decode_extended("p:0102030405060708ffffffffffffffff").unwrap();
        assert_eq!(kind, Kind::PerceptualHash);
        assert_eq!(words, vec![0x0102_0304_0506_0708, u64::MAX]);
    }

    #[test]
    fn extended_rejects_partial_words() {
        for text in ["p:", "p:0102", "p:0g00000000000000", "p:000", "pp:0000000000000000"] {
            assert!(
                matches!(decode_extended(text), Err(Error::Parse(_))),
                "{:?} should not parse",
                text
            );
        }
    }
}
