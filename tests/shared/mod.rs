//! Functionality shared by `integrity` and `lifecycle` tests.

use assert_matches::assert_matches;
use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use simple_jwt::{
    alg::Hs256, base64url, json, prelude::*, ClaimValidator, SecretPolicy, ValidationError,
};

pub const SECRET: &str = "123abcDEF!$£%456";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 9, 1, 10, 0, 0).single().unwrap()
}

pub fn time_options() -> TimeOptions<fn() -> DateTime<Utc>> {
    TimeOptions::new(Duration::zero(), now)
}

pub fn validator(jwt: &Jwt) -> Validator<'_, Hs256, Hs256, fn() -> DateTime<Utc>> {
    Validator::with_parts(Parser::new(jwt), Hs256, ClaimValidator::new(time_options()))
}

pub fn create_token() -> Jwt {
    let now = now().timestamp();
    let mut builder = Builder::with_parts(Hs256, SecretPolicy::default(), time_options());
    let jwt = builder
        .set_secret(SECRET)
        .unwrap()
        .set_issuer("localhost")
        .set_issued_at(now)
        .set_expiration(now + 3_600)
        .unwrap()
        .set_payload_claim("uid", 2)
        .unwrap()
        .build()
        .unwrap();
    jwt
}

fn assert_invalid_signature(token: &str) {
    let jwt = Jwt::new(token, SECRET).unwrap();
    let err = validator(&jwt).signature().unwrap_err();
    assert_matches!(err, ValidationError::InvalidSignature);
    assert_eq!(err.code(), 3);
}

/// Checks that any change to a signed token is detected.
pub fn test_tampering(jwt: &Jwt) {
    validator(jwt).signature().unwrap();

    let token = jwt.token();
    let header_end = token.find('.').unwrap();
    let signature_start = token.rfind('.').unwrap() + 1;

    // Mutate signature bits.
    let signature = Base64UrlUnpadded::decode_vec(&token[signature_start..]).unwrap();
    for i in 0..signature.len() * 8 {
        let mut mangled_signature = signature.clone();
        mangled_signature[i / 8] ^= 1 << (i % 8) as u8;
        let mangled_signature = Base64UrlUnpadded::encode_string(&mangled_signature);

        let mut mangled = token.to_owned();
        mangled.replace_range(signature_start.., &mangled_signature);
        assert_invalid_signature(&mangled);
    }

    // Mutate header.
    let mangled_header = base64url::encode(json!({ "alg": "HS256", "typ": "JWT" }).to_string());
    assert_ne!(mangled_header, &token[..header_end]);
    let mut mangled = token.to_owned();
    mangled.replace_range(..header_end, &mangled_header);
    assert_invalid_signature(&mangled);

    // Mutate claims.
    let mut claims = Parser::new(jwt).decoded_payload().unwrap();
    let issued_at = claims["iat"].as_i64().unwrap();
    claims.insert("iat".to_owned(), json!(issued_at + 1));
    let claims_string = base64url::encode(json::encode(&claims));
    assert_ne!(claims_string, &token[(header_end + 1)..(signature_start - 1)]);
    let mut mangled = token.to_owned();
    mangled.replace_range((header_end + 1)..(signature_start - 1), &claims_string);
    assert_invalid_signature(&mangled);
}
