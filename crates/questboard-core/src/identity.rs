//! Player identity mirror.
//!
//! The backend identifies a player primarily through a session cookie. Cookies
//! are not always kept (cleared jars, partitioned storage, fresh CLI
//! processes), so the client also keeps a copy of the last id the server
//! reported and sends it back as a header.
//!
//! Stores never fail from the caller's point of view: a broken store degrades
//! to "absent" and the client falls back to cookie-only behavior.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use redb::{Database, ReadableTable, TableDefinition};
use tracing::{debug, info, warn};

use crate::error::QuestError;
use crate::types::PlayerId;

const IDENTITY_TABLE: TableDefinition<&str, &str> = TableDefinition::new("identity");

/// Capability-checked single-value store for the player id.
pub trait IdentityStore: Send + Sync {
    /// Current mirror value, `None` when empty or unreadable.
    fn try_read(&self) -> Option<PlayerId>;

    /// Persist `id`. Returns whether the value is now durably stored.
    fn try_write(&self, id: &PlayerId) -> bool;
}

/// Outcome of reconciling the mirror with a server-reported id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySync {
    /// Mirror already held this value; nothing was written
    Unchanged,
    /// Mirror was empty and now holds the value
    Stored,
    /// Mirror held a different value and was overwritten
    Replaced { previous: PlayerId },
    /// The value differed but the store refused the write
    WriteFailed,
}

/// Bring the mirror in line with the id the server just reported.
///
/// Writes if and only if `reported` differs from the stored value.
pub fn sync_identity(store: &dyn IdentityStore, reported: &PlayerId) -> IdentitySync {
    let existing = store.try_read();
    if existing.as_ref() == Some(reported) {
        return IdentitySync::Unchanged;
    }
    if !store.try_write(reported) {
        debug!(player_id = %reported, "Player id not mirrored, store unavailable");
        return IdentitySync::WriteFailed;
    }
    match existing {
        Some(previous) => {
            info!(player_id = %reported, "Updating player id");
            IdentitySync::Replaced { previous }
        }
        None => {
            info!(player_id = %reported, "Storing new player id");
            IdentitySync::Stored
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// redb-backed store
// ═══════════════════════════════════════════════════════════════════════

/// Persistent mirror in a small redb file.
#[derive(Clone)]
pub struct RedbIdentityStore {
    db: Arc<RwLock<Database>>,
}

impl RedbIdentityStore {
    /// Fixed key; there is one player per data directory
    const PLAYER_ID_KEY: &'static str = "player_id";

    /// Open (or create) the identity database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, QuestError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(IDENTITY_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
        })
    }

    fn load(&self) -> Result<Option<PlayerId>, QuestError> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(IDENTITY_TABLE)?;

        Ok(table
            .get(Self::PLAYER_ID_KEY)?
            .map(|v| PlayerId::new(v.value())))
    }

    fn save(&self, id: &PlayerId) -> Result<(), QuestError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(IDENTITY_TABLE)?;
            table.insert(Self::PLAYER_ID_KEY, id.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove the stored id (used by `questboard identity forget`).
    pub fn clear(&self) -> Result<bool, QuestError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(IDENTITY_TABLE)?;
            let old = table.remove(Self::PLAYER_ID_KEY)?;
            old.is_some()
        };
        write_txn.commit()?;
        Ok(removed)
    }
}

impl IdentityStore for RedbIdentityStore {
    fn try_read(&self) -> Option<PlayerId> {
        match self.load() {
            Ok(id) => id.filter(|id| !id.as_str().is_empty()),
            Err(e) => {
                warn!("Identity store not readable: {}", e);
                None
            }
        }
    }

    fn try_write(&self, id: &PlayerId) -> bool {
        if let Err(e) = self.save(id) {
            warn!("Failed to store player id: {}", e);
            return false;
        }
        match self.load() {
            Ok(Some(stored)) if &stored == id => true,
            _ => {
                warn!("Player id read-back did not match what was written");
                false
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// In-memory and disabled stores
// ═══════════════════════════════════════════════════════════════════════

/// Process-local mirror. Used in tests and when the redb file can't be opened.
#[derive(Default)]
pub struct MemoryIdentityStore {
    slot: RwLock<Option<PlayerId>>,
    writes: std::sync::atomic::AtomicUsize,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: PlayerId) -> Self {
        Self {
            slot: RwLock::new(Some(id)),
            writes: Default::default(),
        }
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(std::sync::atomic::Ordering::Relaxed)
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn try_read(&self) -> Option<PlayerId> {
        self.slot.read().clone()
    }

    fn try_write(&self, id: &PlayerId) -> bool {
        *self.slot.write() = Some(id.clone());
        self.writes
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        true
    }
}

/// Storage is unavailable; identity rides on cookies alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledIdentityStore;

impl IdentityStore for DisabledIdentityStore {
    fn try_read(&self) -> Option<PlayerId> {
        None
    }

    fn try_write(&self, _id: &PlayerId) -> bool {
        false
    }
}

/// Open the on-disk store, degrading to memory if that fails.
pub fn open_or_fallback(path: impl AsRef<Path>) -> Arc<dyn IdentityStore> {
    match RedbIdentityStore::open(path.as_ref()) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                "Identity store at {:?} unavailable, keeping player id in memory: {}",
                path.as_ref(),
                e
            );
            Arc::new(MemoryIdentityStore::new())
        }
    }
}
