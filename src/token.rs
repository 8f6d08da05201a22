//! `Jwt` value object.

use zeroize::Zeroize;

use core::fmt;

use crate::ValidationError;

/// Checks that `token` consists of 3 non-empty segments separated by periods,
/// each made of base64url chars (optionally with `=` padding).
///
/// This is a shape check only; it says nothing about whether segments decode.
pub(crate) fn has_valid_structure(token: &str) -> bool {
    let is_segment_char = |ch: char| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '=');
    let mut segment_count = 0;
    for segment in token.split('.') {
        segment_count += 1;
        if segment_count > 3 || segment.is_empty() || !segment.chars().all(is_segment_char) {
            return false;
        }
    }
    segment_count == 3
}

/// Raw token string paired with the secret it is signed with.
///
/// The token string is checked to have the [structure](crate::ClaimValidator::structure())
/// of a JWT on creation; its signature and claims are not checked. The secret is zeroed on drop.
///
/// # Examples
///
/// ```
/// use simple_jwt::Jwt;
///
/// let jwt = Jwt::new("aaa.bbb.ccc", "sec!ReT423*&")?;
/// assert_eq!(jwt.token(), "aaa.bbb.ccc");
/// assert!(Jwt::new("aaa.bbb", "sec!ReT423*&").is_err());
/// # Ok::<_, simple_jwt::ValidationError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Jwt {
    token: String,
    secret: String,
}

impl fmt::Debug for Jwt {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Jwt")
            .field("token", &self.token)
            .field("secret", &"_")
            .finish()
    }
}

impl Drop for Jwt {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl Jwt {
    /// Creates a token from its string form and the secret it is signed with.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidStructure`] if the token does not look like a JWT.
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        let mut secret = secret.into();
        if !has_valid_structure(&token) {
            secret.zeroize();
            return Err(ValidationError::InvalidStructure);
        }
        Ok(Self { token, secret })
    }

    /// Gets the token string.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Gets the secret.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Splits the token into its header, payload and signature segments.
    pub(crate) fn segments(&self) -> Result<[&str; 3], ValidationError> {
        let mut parts = self.token.splitn(4, '.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(header), Some(payload), Some(signature), None) => {
                Ok([header, payload, signature])
            }
            _ => Err(ValidationError::InvalidStructure),
        }
    }
}

impl fmt::Display for Jwt {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
                         eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
                         SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";

    #[test]
    fn valid_structure() {
        assert!(has_valid_structure(TOKEN));
        assert!(has_valid_structure("a.b.c"));
        assert!(has_valid_structure("a==.b-_.c="));
    }

    #[test]
    fn invalid_token_structure() {
        let mangled = [
            "",
            "a.b",
            "a.b.c.d",
            "a..c",
            ".b.c",
            "a.b.",
            "a.b+.c",
            "a.b/.c",
            "a.b c.c",
            "a.b.c\n",
        ];
        for token in &mangled {
            assert!(!has_valid_structure(token), "{token:?}");
            assert_matches!(
                Jwt::new(*token, "secret").unwrap_err(),
                ValidationError::InvalidStructure
            );
        }

        let without_dots = TOKEN.replace('.', "");
        assert!(!has_valid_structure(&without_dots));
        let mut with_trailing_dot = TOKEN.to_owned();
        with_trailing_dot.push('.');
        assert!(!has_valid_structure(&with_trailing_dot));
    }

    #[test]
    fn accessors_and_segments() {
        let jwt = Jwt::new(TOKEN, "your-256-bit-secret").unwrap();
        assert_eq!(jwt.token(), TOKEN);
        assert_eq!(jwt.secret(), "your-256-bit-secret");
        assert_eq!(jwt.to_string(), TOKEN);

        let [header, payload, signature] = jwt.segments().unwrap();
        assert_eq!(header, "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
        assert!(payload.starts_with("eyJzdWIi"));
        assert_eq!(signature, "SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c");
    }

    #[test]
    fn debug_output_hides_secret() {
        let jwt = Jwt::new("a.b.c", "super-secret").unwrap();
        let debug = format!("{jwt:?}");
        assert!(!debug.contains("super-secret"), "{debug}");
    }
}
