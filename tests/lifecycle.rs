//! End-to-end token creation, parsing and validation.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use serde_json::json;

mod shared;

use crate::shared::{create_token, now, time_options, validator, SECRET};
use simple_jwt::{
    alg::Hs256, prelude::*, Audience, Claim, ClaimValidator, CreationError, SecretError,
    SecretPolicy, ValidationError,
};

#[test]
fn token_with_user_id() {
    let mut builder = Builder::new();
    let jwt = builder
        .set_secret(SECRET)
        .unwrap()
        .set_issuer("localhost")
        .set_expiration(Utc::now().timestamp() + 10)
        .unwrap()
        .set_payload_claim("uid", 2)
        .unwrap()
        .build()
        .unwrap();

    let jwt = Jwt::new(jwt.token(), SECRET).unwrap();
    let parsed = Parser::new(&jwt).parse().unwrap();
    assert_eq!(parsed.payload_claim("uid"), Some(&json!(2)));
    assert_eq!(parsed.issuer(), "localhost");
    assert_eq!(parsed.algorithm(), "HS256");
    assert_eq!(parsed.token_type(), "JWT");

    Validator::new(&jwt)
        .structure()
        .unwrap()
        .signature()
        .unwrap()
        .algorithm_not_none()
        .unwrap()
        .expiration()
        .unwrap();
}

#[test]
fn expiration_in_the_past() {
    let err = Builder::new()
        .set_secret(SECRET)
        .unwrap()
        .set_expiration(Utc::now().timestamp() - 20)
        .unwrap_err();
    assert_matches!(err, CreationError::Expired);
    assert_eq!(err.code(), 4);

    // A token can still carry a past `exp` if it is set as a generic claim.
    let mut builder = Builder::new();
    let jwt = builder
        .set_secret(SECRET)
        .unwrap()
        .set_payload_claim("exp", Utc::now().timestamp() - 20)
        .unwrap()
        .build()
        .unwrap();
    let err = Validator::new(&jwt).expiration().unwrap_err();
    assert_matches!(err, ValidationError::Expired);
    assert_eq!(err.code(), 4);
}

#[test]
fn tampered_payload() {
    let jwt = create_token();
    let [header, payload, signature]: [&str; 3] = jwt
        .token()
        .split('.')
        .collect::<Vec<_>>()
        .try_into()
        .unwrap();
    let mut payload = payload.to_owned();
    let last = if payload.ends_with('x') { "y" } else { "x" };
    payload.replace_range(payload.len() - 1.., last);

    let tampered = Jwt::new(format!("{header}.{payload}.{signature}"), SECRET).unwrap();
    let err = validator(&tampered).signature().unwrap_err();
    assert_matches!(err, ValidationError::InvalidSignature);
    assert_eq!(err.code(), 3);
}

#[test]
fn missing_audience() {
    let jwt = create_token();
    let err = Parser::new(&jwt).audience().unwrap_err();
    assert_matches!(err, ValidationError::NoClaim(Claim::Audience));
    assert_eq!(err.code(), 11);

    let parsed = Parser::new(&jwt).parse().unwrap();
    assert_eq!(parsed.audience(), Audience::Single(String::new()));
    assert_eq!(validator(&jwt).audience("site").unwrap_err().code(), 11);
}

#[test]
fn audience_round_trip() {
    let now = now().timestamp();
    let mut builder = Builder::with_parts(Hs256, SecretPolicy::default(), time_options());
    let jwt = builder
        .set_secret(SECRET)
        .unwrap()
        .set_audience(vec!["site", "api"])
        .unwrap()
        .set_expiration(now + 60)
        .unwrap()
        .build()
        .unwrap();

    validator(&jwt).audience("api").unwrap().audience("site").unwrap();
    assert_eq!(validator(&jwt).audience("admin").unwrap_err().code(), 2);
    assert_eq!(
        builder.set_audience(json!({ "site": true })).unwrap_err().code(),
        10
    );
}

#[test]
fn empty_allow_list_accepts_none() {
    let claim_validator = ClaimValidator::default();
    assert!(claim_validator.algorithm("none", &[]));
    assert!(!claim_validator.algorithm("HS256", &[]));
    assert!(claim_validator.algorithm("HS256", &["HS256", "HS512"]));
}

#[test]
fn not_before_and_leeway() {
    let now = now().timestamp();
    let mut builder = Builder::with_parts(Hs256, SecretPolicy::default(), time_options());
    let jwt = builder
        .set_secret(SECRET)
        .unwrap()
        .set_not_before(now + 30)
        .set_expiration(now + 60)
        .unwrap()
        .build()
        .unwrap();

    let err = validator(&jwt).not_before().unwrap_err();
    assert_matches!(err, ValidationError::NotMature);
    assert_eq!(err.code(), 5);

    let parsed = Parser::new(&jwt).parse().unwrap();
    assert_eq!(parsed.usable_in(&time_options()), 30);
    assert_eq!(parsed.expires_in(&time_options()), 60);

    let lenient = TimeOptions::new(Duration::seconds(30), shared::now as fn() -> _);
    Validator::with_parts(Parser::new(&jwt), Hs256, ClaimValidator::new(lenient))
        .not_before()
        .unwrap();
}

#[test]
fn weak_secrets_are_rejected() {
    let mut builder = Builder::new();
    let cases = [
        ("Ab1!", SecretError::TooShort { min_length: 12, actual: 4 }),
        ("abcdefghijk!", SecretError::NoDigit),
        ("abcdefghij1!", SecretError::NoUppercase),
        ("ABCDEFGHIJ1!", SecretError::NoLowercase),
    ];
    for (secret, expected) in cases {
        let err = builder.set_secret(secret).unwrap_err();
        assert_eq!(err.code(), 9);
        assert_matches!(err, CreationError::InvalidSecret(ref inner) if *inner == expected);
    }
    let err = builder.set_secret("abcdefghiJ12").unwrap_err();
    assert_matches!(
        err,
        CreationError::InvalidSecret(SecretError::NoSpecialChar { .. })
    );

    // No secret is set at all.
    assert_eq!(builder.build().unwrap_err().code(), 9);
}

#[test]
fn numeric_claim_keys_are_rejected() {
    let mut builder = Builder::new();
    let err = builder.set_payload_claim("42", true).unwrap_err();
    assert_matches!(err, CreationError::InvalidClaim { ref key } if key == "42");
    assert_eq!(err.code(), 8);
    assert_eq!(builder.set_header_claim("7", 1).unwrap_err().code(), 8);
}

#[test]
fn lenient_facade() {
    let jwt = Tokens::create(2, SECRET, Utc::now().timestamp() + 60, "localhost").unwrap();
    let token = jwt.token();
    assert!(Tokens::validate(token, SECRET));
    assert!(Tokens::validate_expiration(token, SECRET));
    assert!(!Tokens::validate_not_before(token, SECRET));
    assert_eq!(Tokens::user_id(token, SECRET), Some(json!(2)));
    assert_eq!(Tokens::issuer(token, SECRET), "localhost");

    assert!(!Tokens::validate(token, "123abcDEF!$£%457"));
    assert!(Tokens::header(token, "123abcDEF!$£%457").is_empty());
    assert_eq!(Tokens::user_id(token, "123abcDEF!$£%457"), None);
}
