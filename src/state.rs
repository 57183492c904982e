// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::TokenCodec;
use crate::config::Config;
use crate::proxy::{DownstreamTarget, ProxyForwarder};
use crate::store::InMemoryIdentityStore;

/// Shared application state.
///
/// The token codec and forwarder are read-only after startup; the identity
/// store is the only mutable piece and sits behind its own lock. No lock is
/// held across any outbound call.
#[derive(Clone)]
pub struct AppState {
    pub identities: Arc<RwLock<InMemoryIdentityStore>>,
    pub tokens: Arc<TokenCodec>,
    pub forwarder: ProxyForwarder,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let tokens = TokenCodec::new(&config.jwt_secret, config.jwt_ttl_secs);
        let forwarder = ProxyForwarder::new(
            std::time::Duration::from_secs(config.proxy_timeout_secs),
            DownstreamTarget::new(config.product_service_url.clone(), "Product"),
            DownstreamTarget::new(config.wallet_service_url.clone(), "Wallet"),
        )?;

        Ok(Self {
            identities: Arc::new(RwLock::new(InMemoryIdentityStore::new())),
            tokens: Arc::new(tokens),
            forwarder,
        })
    }
}
