// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Token issuance and verification for the e-wallet gateway.
//!
//! ## Auth Flow
//!
//! 1. Client registers via `POST /auth/register`; the password is stored as
//!    a salted Argon2id hash.
//! 2. Client logs in via `POST /auth/login` and receives an HS256-signed
//!    session token carrying its numeric id and role.
//! 3. Client sends `Authorization: Bearer <token>` on every `/api/*` call.
//! 4. The [`require_auth`](middleware::require_auth) gate verifies the
//!    signature and expiry and attaches the verified caller to the request.
//!
//! ## Security
//!
//! - All `/api/*` endpoints require authentication; `/auth/*` and `/health`
//!   are public
//! - Every token-verification failure returns the same client-facing body
//! - Tokens and credentials are redacted from all diagnostic output

pub mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod roles;
pub mod service;
pub mod token;

pub use error::AuthError;
pub use extractor::{Auth, BearerToken};
pub use roles::Role;
pub use token::{AuthenticatedUser, Claims, TokenCodec};
