//! Conversions between standard and URL-safe base64.
//!
//! Token segments use the URL-safe alphabet without padding. Encoding goes through
//! the standard padded alphabet and is then translated; decoding reverses the translation,
//! restores the padding and decodes strictly, so that chars outside the alphabet are
//! rejected rather than skipped.

use base64ct::{Base64, Encoding};

/// Translates standard base64 into its URL-safe form: `+` becomes `-`, `/` becomes `_`,
/// and all `=` padding is removed.
pub fn to_base64_url(base64: &str) -> String {
    base64
        .chars()
        .filter(|&ch| ch != '=')
        .map(|ch| match ch {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

/// Translates URL-safe base64 back into the standard alphabet. Padding is not restored;
/// see [`add_padding()`].
pub fn to_base64(url_string: &str) -> String {
    url_string
        .chars()
        .map(|ch| match ch {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect()
}

/// Appends `=` until the string length is a multiple of 4.
pub fn add_padding(base64: &str) -> String {
    let mut padded = base64.to_owned();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    padded
}

/// Encodes bytes into an unpadded base64url string.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    to_base64_url(&Base64::encode_string(bytes.as_ref()))
}

/// Decodes an unpadded base64url segment.
///
/// # Errors
///
/// Fails if the segment contains chars outside the base64url alphabet or has
/// an impossible length.
pub fn decode(segment: &str) -> Result<Vec<u8>, base64ct::Error> {
    Base64::decode_vec(&add_padding(&to_base64(segment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_safe_translation() {
        assert_eq!(to_base64_url("a+b/c=="), "a-b_c");
        assert_eq!(to_base64_url("abcd"), "abcd");
        assert_eq!(to_base64("a-b_c"), "a+b/c");
    }

    #[test]
    fn padding_is_restored() {
        assert_eq!(add_padding(""), "");
        assert_eq!(add_padding("a"), "a===");
        assert_eq!(add_padding("ab"), "ab==");
        assert_eq!(add_padding("abc"), "abc=");
        assert_eq!(add_padding("abcd"), "abcd");
    }

    #[test]
    fn padding_is_idempotent() {
        for s in ["", "a", "ab", "abc", "abcd", "abcde", "eyJhbGciOiJIUzI1NiJ9"] {
            let once = add_padding(s);
            assert_eq!(add_padding(&once), once);
        }
    }

    #[test]
    fn encoding_uses_url_alphabet() {
        // `0xfb 0xff` encodes to `+/8=` in the standard alphabet.
        assert_eq!(encode([0xfb, 0xff]), "-_8");
        assert_eq!(encode(b"{\"typ\":\"JWT\"}"), "eyJ0eXAiOiJKV1QifQ");
    }

    #[test]
    fn decoding_restores_bytes() {
        assert_eq!(decode("-_8").unwrap(), [0xfb, 0xff]);
        assert_eq!(decode("eyJ0eXAiOiJKV1QifQ").unwrap(), b"{\"typ\":\"JWT\"}");
        assert_eq!(decode("").unwrap(), b"");
    }

    #[test]
    fn decoding_rejects_malformed_input() {
        assert!(decode("ab$d").is_err());
        assert!(decode("eyJ0 eXAi").is_err());
        // A single trailing char cannot encode a whole byte.
        assert!(decode("abcde").is_err());
    }
}
