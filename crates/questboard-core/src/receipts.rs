//! Capped, deduplicated receipt cache.
//!
//! Newest first by `created_at_ms`. A receipt id appears at most once; when
//! the same id shows up again the most recently merged copy replaces the old
//! one (so a receipt annotated with an action supersedes the bare one).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::Receipt;

/// Maximum number of receipts the client keeps in memory
pub const RECEIPT_CACHE_CAP: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptCache {
    items: Vec<Receipt>,
}

impl ReceiptCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache from a server listing.
    pub fn from_list(receipts: Vec<Receipt>) -> Self {
        let mut cache = Self::new();
        cache.merge(receipts);
        cache
    }

    /// Add one freshly returned receipt.
    pub fn insert(&mut self, receipt: Receipt) {
        self.merge(std::iter::once(receipt));
    }

    /// Merge `incoming` into the cache.
    ///
    /// `incoming` is treated as newer than what is already cached; within
    /// `incoming`, earlier entries win over later duplicates.
    pub fn merge(&mut self, incoming: impl IntoIterator<Item = Receipt>) {
        let mut seen: HashSet<String> = HashSet::new();
        let mut merged: Vec<Receipt> = Vec::with_capacity(self.items.len() + 1);
        for receipt in incoming.into_iter().chain(self.items.drain(..)) {
            if seen.insert(receipt.id.clone()) {
                merged.push(receipt);
            }
        }
        // Stable: equal timestamps keep merge order
        merged.sort_by(|a, b| b.created_at_ms.cmp(&a.created_at_ms));
        merged.truncate(RECEIPT_CACHE_CAP);
        self.items = merged;
    }

    pub fn get(&self, id: &str) -> Option<&Receipt> {
        self.items.iter().find(|r| r.id == id)
    }

    /// Most recent receipt, if any
    pub fn latest(&self) -> Option<&Receipt> {
        self.items.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Receipt> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Receipt] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
