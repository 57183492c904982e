// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing capability.
//!
//! One-way, salted Argon2id hashing. Verification never reveals whether the
//! hash was absent or merely mismatched; callers surface a uniform
//! credentials error either way.

use std::sync::LazyLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::error::AuthError;

static FALLBACK_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("fallback-login-placeholder").unwrap_or_default());

/// Hash verified when a login lookup misses, so an unknown username costs
/// the same argon2 work as a wrong password. The outcome is discarded for
/// unknown users; an empty fallback (hashing failed) fails closed in
/// [`verify_password`].
pub fn fallback_hash() -> &'static str {
    &FALLBACK_HASH
}

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::InternalError(format!("password hashing failed: {e}")))
}

/// Check a plaintext password against a stored hash.
///
/// Returns `false` for unparsable hashes as well as mismatches.
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
