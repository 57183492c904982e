// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! E-Wallet Gateway - Authentication Gateway for E-Wallet Microservices
//!
//! This crate issues signed session tokens at login, verifies them on every
//! protected request, enforces the wallet-owner rule, and forwards
//! authorized calls to the product and wallet services with a stable
//! client-facing error contract.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token issuance/verification, password hashing, the gate
//! - `proxy` - Authenticated forwarding and downstream error mapping
//! - `store` - In-memory identity repository

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;
pub mod state;
pub mod store;
