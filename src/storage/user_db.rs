// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded user database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `users`: lowercase address → serialized StoredUser (JSON bytes)
//! - `invite_codes`: invite code → lowercase address
//! - `inviter_index`: composite key (inviter|invitee) → invitee address
//! - `schema_meta`: "columns" → JSON array of column names
//!
//! The inviter index makes the invitee count a cheap prefix range scan
//! instead of a full table walk. It is written together with the user row
//! inside one write transaction.

use std::path::Path;

use chrono::{DateTime, Utc};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: lowercase address → serialized StoredUser (JSON bytes).
const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Index: invite code → lowercase address of the code's owner.
const INVITE_CODES: TableDefinition<&str, &str> = TableDefinition::new("invite_codes");

/// Index: composite key (inviter|invitee) → invitee address.
const INVITER_INDEX: TableDefinition<&[u8], &str> = TableDefinition::new("inviter_index");

/// Schema metadata: "columns" → JSON array of column names.
const SCHEMA_META: TableDefinition<&str, &[u8]> = TableDefinition::new("schema_meta");

/// Meta key under which the column layout is recorded.
const COLUMNS_KEY: &str = "columns";

/// Column layout written by the current generation.
const CURRENT_COLUMNS: [&str; 5] = ["address", "inviter", "invite_code", "created_at", "balance"];

/// Column layout of databases created before the balance snapshot existed.
const LEGACY_COLUMNS: [&str; 4] = ["address", "inviter", "invite_code", "created_at"];

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UserDbError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("already exists: {0}")]
    AlreadyExists(String),
}

pub type UserDbResult<T> = Result<T, UserDbError>;

// =============================================================================
// Stored Model
// =============================================================================

/// One user row, created exactly once at first successful login.
///
/// `inviter` and `invite_code` are fixed at creation and never mutated.
/// `balance` is a point-in-time snapshot in human-readable decimal form,
/// present only under the 5-column layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUser {
    /// Lowercase 0x-prefixed wallet address (primary key).
    pub address: String,
    /// Lowercase address of the referring user, if any.
    pub inviter: Option<String>,
    /// Short opaque code identifying this user as a referral target.
    pub invite_code: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Token balance snapshot at registration (schema-dependent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
}

// =============================================================================
// Index Key Helpers
// =============================================================================

/// Build a composite key for the inviter_index table.
///
/// Format: `lowercase_inviter | lowercase_invitee`
fn make_index_key(inviter: &str, invitee: &str) -> Vec<u8> {
    let inviter = inviter.to_lowercase();
    let invitee = invitee.to_lowercase();
    let mut key = Vec::with_capacity(inviter.len() + 1 + invitee.len());
    key.extend_from_slice(inviter.as_bytes());
    key.push(b'|');
    key.extend_from_slice(invitee.as_bytes());
    key
}

/// Build a prefix key for range scanning all invitees of an inviter.
fn make_prefix(inviter: &str) -> Vec<u8> {
    let inviter = inviter.to_lowercase();
    let mut prefix = Vec::with_capacity(inviter.len() + 1);
    prefix.extend_from_slice(inviter.as_bytes());
    prefix.push(b'|');
    prefix
}

/// Build the upper bound for a range scan (prefix with 0xFF bytes appended).
fn make_prefix_end(inviter: &str) -> Vec<u8> {
    let inviter = inviter.to_lowercase();
    let mut end = Vec::with_capacity(inviter.len() + 1 + 20);
    end.extend_from_slice(inviter.as_bytes());
    end.push(b'|');
    // Past any valid key with this prefix
    end.extend_from_slice(&[0xFF; 20]);
    end
}

// =============================================================================
// UserDatabase
// =============================================================================

/// Embedded ACID user database.
pub struct UserDatabase {
    db: Database,
}

impl UserDatabase {
    /// Open (or create) the database at the given path.
    ///
    /// A freshly created database records the current 5-column layout.
    /// An existing database keeps whatever layout it was created with.
    pub fn open(path: &Path) -> UserDbResult<Self> {
        Self::open_with_columns(path, &CURRENT_COLUMNS)
    }

    /// Open (or create) a database in the pre-balance 4-column layout.
    ///
    /// Used for deployments still running the legacy table and by tests
    /// exercising the schema probe.
    pub fn open_legacy(path: &Path) -> UserDbResult<Self> {
        Self::open_with_columns(path, &LEGACY_COLUMNS)
    }

    fn open_with_columns(path: &Path, columns: &[&str]) -> UserDbResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail,
        // and record the column layout on first creation only.
        let write_txn = db.begin_write()?;
        {
            let users = write_txn.open_table(USERS)?;
            let _ = write_txn.open_table(INVITE_CODES)?;
            let _ = write_txn.open_table(INVITER_INDEX)?;
            let mut meta = write_txn.open_table(SCHEMA_META)?;

            // Record the layout only on first creation; an existing database
            // keeps whatever generation it was created with.
            if meta.get(COLUMNS_KEY)?.is_none() && users.iter()?.next().is_none() {
                let json = serde_json::to_vec(columns)?;
                meta.insert(COLUMNS_KEY, json.as_slice())?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    // =========================================================================
    // Schema Probe
    // =========================================================================

    /// Whether the user table carries the `balance` column.
    ///
    /// Databases without a recorded layout predate the balance column and
    /// probe as the 4-column layout. A failed probe read also degrades to
    /// the legacy layout; the probe never fails a request.
    pub fn has_balance_column(&self) -> bool {
        self.read_columns()
            .map(|cols| cols.iter().any(|c| c == "balance"))
            .unwrap_or(false)
    }

    fn read_columns(&self) -> UserDbResult<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let meta = read_txn.open_table(SCHEMA_META)?;
        match meta.get(COLUMNS_KEY)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Ok(Vec::new()),
        }
    }

    // =========================================================================
    // User Lookups
    // =========================================================================

    /// Look up a user by lowercase address.
    pub fn find_by_address(&self, address: &str) -> UserDbResult<Option<StoredUser>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS)?;
        match table.get(address)? {
            Some(value) => {
                let user: StoredUser = serde_json::from_slice(value.value())?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Resolve an invite code to its owning user.
    pub fn find_by_invite_code(&self, code: &str) -> UserDbResult<Option<StoredUser>> {
        let read_txn = self.db.begin_read()?;
        let codes = read_txn.open_table(INVITE_CODES)?;
        let Some(owner) = codes.get(code)? else {
            return Ok(None);
        };
        let users = read_txn.open_table(USERS)?;
        match users.get(owner.value())? {
            Some(value) => {
                let user: StoredUser = serde_json::from_slice(value.value())?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Count users whose `inviter` equals the given address.
    ///
    /// Always a live aggregate over the inviter index; an empty address
    /// scans an empty prefix and returns 0.
    pub fn count_invitees(&self, inviter: &str) -> UserDbResult<u64> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(INVITER_INDEX)?;

        let prefix = make_prefix(inviter);
        let prefix_end = make_prefix_end(inviter);

        let mut count = 0u64;
        for entry in index.range(prefix.as_slice()..prefix_end.as_slice())? {
            let _ = entry?;
            count += 1;
        }
        Ok(count)
    }

    // =========================================================================
    // Insert
    // =========================================================================

    /// Insert a new user row and its index entries.
    ///
    /// Not an upsert: a row for the same address, or a clash on the invite
    /// code, fails with [`UserDbError::AlreadyExists`]. Concurrent first
    /// logins for one address race here and exactly one insert wins; the
    /// loser's error is surfaced as a storage failure, not retried.
    pub fn insert_user(&self, user: &StoredUser) -> UserDbResult<()> {
        let json = serde_json::to_vec(user)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut users = write_txn.open_table(USERS)?;
            if users.get(user.address.as_str())?.is_some() {
                return Err(UserDbError::AlreadyExists(format!(
                    "user {}",
                    user.address
                )));
            }
            users.insert(user.address.as_str(), json.as_slice())?;

            let mut codes = write_txn.open_table(INVITE_CODES)?;
            if codes.get(user.invite_code.as_str())?.is_some() {
                return Err(UserDbError::AlreadyExists(format!(
                    "invite code {}",
                    user.invite_code
                )));
            }
            codes.insert(user.invite_code.as_str(), user.address.as_str())?;

            if let Some(inviter) = user.inviter.as_deref() {
                if !inviter.is_empty() {
                    let mut index = write_txn.open_table(INVITER_INDEX)?;
                    let key = make_index_key(inviter, &user.address);
                    index.insert(key.as_slice(), user.address.as_str())?;
                }
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_db(dir: &TempDir) -> UserDatabase {
        UserDatabase::open(&dir.path().join("users.redb")).expect("open database")
    }

    fn test_user(address: &str, inviter: Option<&str>, code: &str) -> StoredUser {
        StoredUser {
            address: address.to_lowercase(),
            inviter: inviter.map(|s| s.to_lowercase()),
            invite_code: code.to_string(),
            created_at: Utc::now(),
            balance: None,
        }
    }

    #[test]
    fn insert_and_find_by_address() {
        let dir = TempDir::new().unwrap();
        let db = test_db(&dir);

        let user = test_user("0xaaaa000000000000000000000000000000000001", None, "code0001");
        db.insert_user(&user).unwrap();

        let loaded = db.find_by_address(&user.address).unwrap().unwrap();
        assert_eq!(loaded, user);

        assert!(db
            .find_by_address("0xbbbb000000000000000000000000000000000002")
            .unwrap()
            .is_none());
    }

    #[test]
    fn find_by_invite_code_resolves_owner() {
        let dir = TempDir::new().unwrap();
        let db = test_db(&dir);

        let user = test_user("0xaaaa000000000000000000000000000000000001", None, "code0001");
        db.insert_user(&user).unwrap();

        let loaded = db.find_by_invite_code("code0001").unwrap().unwrap();
        assert_eq!(loaded.address, user.address);

        assert!(db.find_by_invite_code("missing1").unwrap().is_none());
    }

    #[test]
    fn duplicate_address_rejected() {
        let dir = TempDir::new().unwrap();
        let db = test_db(&dir);

        let user = test_user("0xaaaa000000000000000000000000000000000001", None, "code0001");
        db.insert_user(&user).unwrap();

        let mut again = user.clone();
        again.invite_code = "code0002".to_string();
        let result = db.insert_user(&again);
        assert!(matches!(result, Err(UserDbError::AlreadyExists(_))));
    }

    #[test]
    fn duplicate_invite_code_rejected() {
        let dir = TempDir::new().unwrap();
        let db = test_db(&dir);

        let a = test_user("0xaaaa000000000000000000000000000000000001", None, "samecode");
        let b = test_user("0xbbbb000000000000000000000000000000000002", None, "samecode");
        db.insert_user(&a).unwrap();

        let result = db.insert_user(&b);
        assert!(matches!(result, Err(UserDbError::AlreadyExists(_))));
    }

    #[test]
    fn count_invitees_is_a_live_aggregate() {
        let dir = TempDir::new().unwrap();
        let db = test_db(&dir);

        let inviter = "0xaaaa000000000000000000000000000000000001";
        db.insert_user(&test_user(inviter, None, "code0001")).unwrap();
        assert_eq!(db.count_invitees(inviter).unwrap(), 0);

        db.insert_user(&test_user(
            "0xbbbb000000000000000000000000000000000002",
            Some(inviter),
            "code0002",
        ))
        .unwrap();
        assert_eq!(db.count_invitees(inviter).unwrap(), 1);

        db.insert_user(&test_user(
            "0xcccc000000000000000000000000000000000003",
            Some(inviter),
            "code0003",
        ))
        .unwrap();
        assert_eq!(db.count_invitees(inviter).unwrap(), 2);

        // The invitee invited nobody.
        assert_eq!(
            db.count_invitees("0xbbbb000000000000000000000000000000000002")
                .unwrap(),
            0
        );
    }

    #[test]
    fn count_invitees_empty_address_returns_zero() {
        let dir = TempDir::new().unwrap();
        let db = test_db(&dir);
        assert_eq!(db.count_invitees("").unwrap(), 0);
    }

    #[test]
    fn count_invitees_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let db = test_db(&dir);

        let inviter = "0xaaaa000000000000000000000000000000000001";
        db.insert_user(&test_user(inviter, None, "code0001")).unwrap();
        db.insert_user(&test_user(
            "0xbbbb000000000000000000000000000000000002",
            Some(inviter),
            "code0002",
        ))
        .unwrap();

        assert_eq!(db.count_invitees(&inviter.to_uppercase().replace("0X", "0x")).unwrap(), 1);
    }

    #[test]
    fn fresh_database_probes_balance_column() {
        let dir = TempDir::new().unwrap();
        let db = test_db(&dir);
        assert!(db.has_balance_column());
    }

    #[test]
    fn legacy_database_probes_without_balance_column() {
        let dir = TempDir::new().unwrap();
        let db = UserDatabase::open_legacy(&dir.path().join("users.redb")).unwrap();
        assert!(!db.has_balance_column());
    }

    #[test]
    fn reopen_keeps_recorded_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.redb");

        {
            let db = UserDatabase::open_legacy(&path).unwrap();
            assert!(!db.has_balance_column());
        }
        // Reopening with the current generation must not rewrite the layout.
        let db = UserDatabase::open(&path).unwrap();
        assert!(!db.has_balance_column());
    }

    #[test]
    fn balance_snapshot_round_trips() {
        let dir = TempDir::new().unwrap();
        let db = test_db(&dir);

        let mut user = test_user("0xaaaa000000000000000000000000000000000001", None, "code0001");
        user.balance = Some("1.5".to_string());
        db.insert_user(&user).unwrap();

        let loaded = db.find_by_address(&user.address).unwrap().unwrap();
        assert_eq!(loaded.balance.as_deref(), Some("1.5"));
    }

    #[test]
    fn balance_field_is_omitted_when_absent() {
        let user = test_user("0xaaaa000000000000000000000000000000000001", None, "code0001");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("balance"));
    }
}
