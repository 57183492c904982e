// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles carried as token claims.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role claim embedded in every session token.
///
/// ## Roles
///
/// - `Customer` - Normal user, can only access their own wallet
/// - `Merchant` - Sells products through the catalog
/// - `Admin` - Operational access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Customer,
    Merchant,
    Admin,
}

impl Role {
    /// Parse a role from its wire name (case-insensitive).
    pub fn parse(s: &str) -> Option<Role> {
        match s.to_uppercase().as_str() {
            "CUSTOMER" => Some(Role::Customer),
            "MERCHANT" => Some(Role::Merchant),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl Default for Role {
    /// Registration without an explicit role creates a customer.
    fn default() -> Self {
        Role::Customer
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Customer => write!(f, "CUSTOMER"),
            Role::Merchant => write!(f, "MERCHANT"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}
