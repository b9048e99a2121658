//! In-memory, ordered cache of one resource collection with optimistic
//! insert/remove and token-based reconciliation.
//!
//! Every optimistic change returns a [`PendingToken`]. The caller later
//! commits or rolls back exactly that change, even if other changes were
//! applied in between. Ids are unique at all times.
//!
//! An optimistic removal hides the entry in place instead of dropping it, so
//! a rollback puts the item back between the same neighbours no matter how
//! many other changes landed meanwhile.

use std::collections::{HashMap, HashSet};

use crate::resource::{InsertPosition, ItemId, ResourceItem};

use super::{CacheError, Result};

/// Handle to one optimistic change awaiting reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingToken(u64);

impl PendingToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
enum PendingChange {
    Insert { provisional_id: ItemId },
    Remove { id: ItemId },
}

#[derive(Debug, Clone)]
struct Entry<T> {
    item: T,
    /// Set while an optimistic removal of this entry is unreconciled.
    removed_by: Option<PendingToken>,
}

impl<T> Entry<T> {
    fn visible(item: T) -> Self {
        Self {
            item,
            removed_by: None,
        }
    }

    fn is_visible(&self) -> bool {
        self.removed_by.is_none()
    }
}

/// Ordered collection of items for one resource type.
#[derive(Debug, Clone)]
pub struct CollectionCache<T: ResourceItem> {
    entries: Vec<Entry<T>>,
    /// Visible items in order, rebuilt after every mutation.
    items: Vec<T>,
    position: InsertPosition,
    pending: HashMap<PendingToken, PendingChange>,
    next_token: u64,
}

impl<T: ResourceItem> CollectionCache<T> {
    pub fn new(position: InsertPosition) -> Self {
        Self {
            entries: Vec::new(),
            items: Vec::new(),
            position,
            pending: HashMap::new(),
            next_token: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.index_of(id).is_some()
    }

    /// Number of optimistic changes not yet committed or rolled back.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Replaces the whole collection with a fresh server listing.
    ///
    /// Keeps the first occurrence of a duplicated id. Outstanding tokens stay
    /// valid: an item with a pending removal stays hidden if the listing
    /// still has it, otherwise it is kept hidden after its nearest
    /// predecessor that survived the reload.
    pub fn replace_all(&mut self, items: Vec<T>) {
        let mut seen = HashSet::new();
        let fresh: Vec<Entry<T>> = items
            .into_iter()
            .filter(|item| seen.insert(item.id().clone()))
            .map(Entry::visible)
            .collect();
        let previous = std::mem::replace(&mut self.entries, fresh);

        for (old_index, entry) in previous.iter().enumerate() {
            let Some(token) = entry.removed_by else {
                continue;
            };
            let id = entry.item.id();
            if let Some(index) = self.index_of(id) {
                self.entries[index].removed_by = Some(token);
                continue;
            }
            let anchor = previous[..old_index].iter().rev().find_map(|before| {
                self.entries
                    .iter()
                    .position(|e| e.item.id() == before.item.id())
            });
            let index = anchor.map_or(0, |a| a + 1);
            self.entries.insert(index, entry.clone());
        }
        self.refresh();
    }

    /// Inserts an item ahead of server confirmation.
    pub fn insert_optimistic(&mut self, item: T) -> Result<PendingToken> {
        if self.contains(item.id()) {
            return Err(CacheError::DuplicateId(item.id().to_string()));
        }
        let provisional_id = item.id().clone();
        self.insert_at_position(item);
        self.refresh();
        Ok(self.track(PendingChange::Insert { provisional_id }))
    }

    /// Swaps the provisional item for the server-confirmed one.
    pub fn commit_insert(&mut self, token: PendingToken, confirmed: T) -> Result<()> {
        let provisional_id = match self.take(token)? {
            PendingChange::Insert { provisional_id } => provisional_id,
            other => return Err(self.restore(token, other)),
        };

        let provisional_index = self.index_of(&provisional_id);
        let confirmed_elsewhere = confirmed.id() != &provisional_id && self.contains(confirmed.id());

        match (provisional_index, confirmed_elsewhere) {
            (Some(index), true) => {
                self.entries.remove(index);
            }
            (Some(index), false) => self.entries[index].item = confirmed,
            (None, true) => {}
            (None, false) => self.insert_at_position(confirmed),
        }
        self.refresh();
        Ok(())
    }

    /// Drops the provisional item, restoring the previous sequence.
    pub fn rollback_insert(&mut self, token: PendingToken) -> Result<()> {
        let provisional_id = match self.take(token)? {
            PendingChange::Insert { provisional_id } => provisional_id,
            other => return Err(self.restore(token, other)),
        };
        if let Some(index) = self.index_of(&provisional_id) {
            self.entries.remove(index);
        }
        self.refresh();
        Ok(())
    }

    /// Removes an item ahead of server confirmation.
    ///
    /// Returns `None` and leaves the cache untouched when the id is absent.
    pub fn remove_optimistic(&mut self, id: &ItemId) -> Option<PendingToken> {
        let index = self.index_of(id)?;
        let token = self.track(PendingChange::Remove { id: id.clone() });
        self.entries[index].removed_by = Some(token);
        self.refresh();
        Some(token)
    }

    /// Confirms a removal; the item stays gone.
    pub fn commit_remove(&mut self, token: PendingToken) -> Result<()> {
        match self.take(token)? {
            PendingChange::Remove { .. } => {}
            other => return Err(self.restore(token, other)),
        }
        if let Some(index) = self.hidden_by(token) {
            self.entries.remove(index);
        }
        Ok(())
    }

    /// Puts a removed item back between its original neighbours unless the
    /// same id has reappeared meanwhile.
    pub fn rollback_remove(&mut self, token: PendingToken) -> Result<()> {
        let id = match self.take(token)? {
            PendingChange::Remove { id } => id,
            other => return Err(self.restore(token, other)),
        };
        if let Some(index) = self.hidden_by(token) {
            if self.contains(&id) {
                self.entries.remove(index);
            } else {
                self.entries[index].removed_by = None;
            }
        }
        self.refresh();
        Ok(())
    }

    /// Position in `entries` of the visible item with this id.
    fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.is_visible() && entry.item.id() == id)
    }

    fn hidden_by(&self, token: PendingToken) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.removed_by == Some(token))
    }

    fn insert_at_position(&mut self, item: T) {
        match self.position {
            InsertPosition::Front => self.entries.insert(0, Entry::visible(item)),
            InsertPosition::Back => self.entries.push(Entry::visible(item)),
        }
    }

    fn refresh(&mut self) {
        self.items = self
            .entries
            .iter()
            .filter(|entry| entry.is_visible())
            .map(|entry| entry.item.clone())
            .collect();
    }

    fn track(&mut self, change: PendingChange) -> PendingToken {
        let token = PendingToken(self.next_token);
        self.next_token += 1;
        self.pending.insert(token, change);
        token
    }

    fn take(&mut self, token: PendingToken) -> Result<PendingChange> {
        self.pending
            .remove(&token)
            .ok_or(CacheError::UnknownToken(token.0))
    }

    fn restore(&mut self, token: PendingToken, change: PendingChange) -> CacheError {
        self.pending.insert(token, change);
        CacheError::TokenKindMismatch(token.0)
    }
}
