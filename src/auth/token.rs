// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance and verification.
//!
//! Tokens are compact JWTs signed with HS256 over a process-wide secret.
//! The payload carries the subject (string form of the numeric user id), the
//! role claim, and issued-at/expiry timestamps. Signature comparison and
//! expiry checks are delegated to `jsonwebtoken`; leeway is zero so a token
//! is rejected the moment its expiry passes.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{error::AuthError, roles::Role};

/// Claims carried by every session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: string form of the user's numeric id.
    pub sub: String,
    /// Role claim.
    pub role: Role,
    /// Issued-at timestamp (Unix seconds).
    pub iat: i64,
    /// Expiry timestamp (Unix seconds), always `iat + ttl`.
    pub exp: i64,
}

/// The verified caller attached to a request after the gate accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub role: Role,
}

impl TryFrom<&Claims> for AuthenticatedUser {
    type Error = AuthError;

    fn try_from(claims: &Claims) -> Result<Self, Self::Error> {
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::MalformedToken)?;
        Ok(Self {
            user_id,
            role: claims.role,
        })
    }
}

/// Issues and verifies session tokens.
///
/// Holds the derived signing keys and the configured TTL. Built once at
/// startup from [`crate::config::Config`] and shared read-only.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs: ttl_secs as i64,
        }
    }

    /// Issue a token for `subject_id` carrying `role`.
    ///
    /// `exp` is always `iat + ttl`; tokens are immutable once issued.
    pub fn issue(&self, subject_id: i64, role: Role) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject_id.to_string(),
            role,
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InternalError(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Fails with [`AuthError::InvalidSignature`] on signature mismatch,
    /// [`AuthError::TokenExpired`] once `exp` has passed, and
    /// [`AuthError::MalformedToken`] for anything that does not parse as a
    /// three-part JWT.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-test-secret-test-secret";

    fn codec() -> TokenCodec {
        TokenCodec::new(TEST_SECRET, 3600)
    }

    #[test]
    fn verify_returns_issued_subject_and_role() {
        let codec = codec();
        let token = codec.issue(42, Role::Merchant).expect("issue succeeds");
        let claims = codec.verify(&token).expect("verify succeeds");

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, Role::Merchant);
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn token_signed_with_other_key_fails_with_invalid_signature() {
        let codec = codec();
        let other = TokenCodec::new("another-secret-another-secret-abc", 3600);

        let token = other.issue(7, Role::Customer).expect("issue succeeds");
        assert_eq!(codec.verify(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn tampered_payload_fails_with_invalid_signature() {
        let codec = codec();
        let token = codec.issue(7, Role::Customer).expect("issue succeeds");

        // Swap the payload segment for one signed under a different subject.
        let other_token = codec.issue(8, Role::Customer).expect("issue succeeds");
        let mut parts: Vec<&str> = token.split('.').collect();
        let other_payload = other_token.split('.').nth(1).unwrap();
        parts[1] = other_payload;
        let tampered = parts.join(".");

        assert_eq!(codec.verify(&tampered), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn flipped_signature_byte_fails_with_invalid_signature() {
        let codec = codec();
        let token = codec.issue(7, Role::Customer).expect("issue succeeds");

        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        // Flip a character in the middle of the signature, staying inside
        // the base64url alphabet.
        let mid = chars.len() / 2;
        chars[mid] = if chars[mid] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{head}.{}", chars.into_iter().collect::<String>());
        assert_ne!(tampered, token);

        assert_eq!(codec.verify(&tampered), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn garbage_token_fails_with_malformed() {
        let codec = codec();
        assert_eq!(codec.verify("not-a-jwt"), Err(AuthError::MalformedToken));
        assert_eq!(codec.verify(""), Err(AuthError::MalformedToken));
        assert_eq!(codec.verify("a.b"), Err(AuthError::MalformedToken));
    }

    #[test]
    fn expired_token_fails_with_expired() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "1".to_string(),
            role: Role::Customer,
            iat: now - 120,
            exp: now - 60,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(codec.verify(&token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn authenticated_user_parses_numeric_subject() {
        let claims = Claims {
            sub: "15".to_string(),
            role: Role::Admin,
            iat: 0,
            exp: 0,
        };
        let user = AuthenticatedUser::try_from(&claims).expect("numeric subject");
        assert_eq!(user.user_id, 15);
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn authenticated_user_rejects_non_numeric_subject() {
        let claims = Claims {
            sub: "alice".to_string(),
            role: Role::Customer,
            iat: 0,
            exp: 0,
        };
        assert_eq!(
            AuthenticatedUser::try_from(&claims),
            Err(AuthError::MalformedToken)
        );
    }
}
