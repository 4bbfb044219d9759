// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # User Storage Module
//!
//! Persistent user records backed by redb (pure Rust, ACID).
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/users.redb
//!   users:        lowercase address → serialized StoredUser (JSON bytes)
//!   invite_codes: invite code → lowercase address
//!   inviter_index: composite key (inviter|invitee) → invitee address
//!   schema_meta:  "columns" → JSON array of column names
//! ```
//!
//! ## Schema Generations
//!
//! The user table exists in two generations: with and without the `balance`
//! snapshot column. The generation is recorded in `schema_meta` at creation
//! time; databases created before the column was introduced carry no record
//! and are treated as the 4-column layout. No migration step is required.

pub mod user_db;

pub use user_db::{StoredUser, UserDatabase, UserDbError, UserDbResult};
