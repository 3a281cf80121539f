//! Allowlist Manager
//!
//! Mutable set of approved launchpad program ids. Every transaction build
//! is gated on this set before anything touches the network. State lives
//! only for the process lifetime of the owning adapter; there is no
//! persistence and nothing is ever pruned implicitly.

use solana_sdk::pubkey::Pubkey;
use std::collections::HashSet;
use std::sync::RwLock;
use tracing::{debug, warn};

/// Set of program ids the system trusts to build instructions against.
///
/// Interior locking lets a single instance be shared (via `Arc`) between
/// concurrent build requests; program ids are stored string-canonicalized.
#[derive(Debug, Default)]
pub struct AllowlistManager {
    allowed: RwLock<HashSet<String>>,
}

impl AllowlistManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allowlist pre-seeded with one program id.
    pub fn seeded(program_id: &Pubkey) -> Self {
        let manager = Self::new();
        manager.add(program_id);
        manager
    }

    /// Add a program to the allowlist. Idempotent.
    pub fn add(&self, program_id: &Pubkey) {
        let key = program_id.to_string();
        debug!(program = %key, "added program to allowlist");
        self.allowed.write().expect("allowlist lock poisoned").insert(key);
    }

    /// Remove a program from the allowlist. Idempotent.
    pub fn remove(&self, program_id: &Pubkey) {
        let key = program_id.to_string();
        if self.allowed.write().expect("allowlist lock poisoned").remove(&key) {
            debug!(program = %key, "removed program from allowlist");
        }
    }

    /// Check whether a program is allowed. Misses are logged.
    pub fn is_allowed(&self, program_id: &Pubkey) -> bool {
        let key = program_id.to_string();
        let allowed = self
            .allowed
            .read()
            .expect("allowlist lock poisoned")
            .contains(&key);

        if !allowed {
            warn!(program = %key, "program not in allowlist");
        }
        allowed
    }

    /// Snapshot of the allowed program ids. Returns a defensive copy;
    /// mutating the result never touches internal state.
    pub fn allowed_programs(&self) -> HashSet<String> {
        self.allowed.read().expect("allowlist lock poisoned").clone()
    }

    /// Empty the set unconditionally.
    pub fn clear(&self) {
        self.allowed.write().expect("allowlist lock poisoned").clear();
        debug!("allowlist cleared");
    }

    pub fn len(&self) -> usize {
        self.allowed.read().expect("allowlist lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
