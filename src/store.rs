// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory identity store.
//!
//! The identity repository collaborator: `save`, `find_by_username`,
//! `find_by_id`. Ids are sequential starting at 1; username, email, and
//! mobile number are unique. Held behind `Arc<RwLock<..>>` in
//! [`crate::state::AppState`]; the gateway core never mutates stored
//! identities.

use std::collections::HashMap;

use crate::error::ApiError;
use crate::models::{Identity, NewIdentity};

#[derive(Default)]
pub struct InMemoryIdentityStore {
    users: HashMap<i64, Identity>,
    next_id: i64,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a new identity, assigning the next sequential id.
    pub fn save(&mut self, new: NewIdentity) -> Result<Identity, ApiError> {
        if self.users.values().any(|u| u.username == new.username) {
            return Err(ApiError::bad_request("Username already registered"));
        }
        if self.users.values().any(|u| u.email == new.email) {
            return Err(ApiError::bad_request("Email already registered"));
        }
        if self.users.values().any(|u| u.mobile_number == new.mobile_number) {
            return Err(ApiError::bad_request("Mobile number already registered"));
        }

        self.next_id += 1;
        let identity = Identity {
            id: self.next_id,
            username: new.username,
            display_name: new.display_name,
            email: new.email,
            mobile_number: new.mobile_number,
            password_hash: new.password_hash,
            role: new.role,
            status: "ACTIVE".to_string(),
        };
        self.users.insert(identity.id, identity.clone());
        Ok(identity)
    }

    pub fn find_by_username(&self, username: &str) -> Option<Identity> {
        self.users.values().find(|u| u.username == username).cloned()
    }

    pub fn find_by_id(&self, id: i64) -> Option<Identity> {
        self.users.get(&id).cloned()
    }
}
