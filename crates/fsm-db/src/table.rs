//! Typed record tables
//!
//! Provides generic CRUD operations for stored records.

use std::collections::BTreeMap;

use fsm_core::error::FsmError;
use fsm_core::result::FsmResult;
use fsm_core::traits::{Entity, Id, Named};

/// One table of records keyed by id, iterated in id order
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<Id, T>,
    next_id: Id,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<T: Entity> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new record, assigning the next id
    pub fn insert(&mut self, mut row: T) -> Id {
        self.next_id += 1;
        let id = self.next_id;
        row.set_id(id);
        self.rows.insert(id, row);
        id
    }

    /// Find a record by ID
    pub fn find(&self, id: Id) -> FsmResult<&T> {
        self.rows
            .get(&id)
            .ok_or_else(|| FsmError::not_found(T::TYPE_NAME, id))
    }

    pub fn find_optional(&self, id: Id) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn find_mut(&mut self, id: Id) -> FsmResult<&mut T> {
        self.rows
            .get_mut(&id)
            .ok_or_else(|| FsmError::not_found(T::TYPE_NAME, id))
    }

    /// Replace a stored record with the given one (matched by its id)
    pub fn update(&mut self, row: T) -> FsmResult<()> {
        let slot = self.find_mut(row.id())?;
        *slot = row;
        Ok(())
    }

    pub fn delete(&mut self, id: Id) -> FsmResult<T> {
        self.rows
            .remove(&id)
            .ok_or_else(|| FsmError::not_found(T::TYPE_NAME, id))
    }

    pub fn exists(&self, id: Id) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// All records matching the predicate, in id order
    pub fn search<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows.values().filter(|row| predicate(row)).collect()
    }

    /// Lowest-id record matching the predicate (`search(..., limit=1)`)
    pub fn first<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows.values().find(|row| predicate(row))
    }

    /// Delete every record matching the predicate, returning how many went
    pub fn delete_where<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|_, row| !predicate(row));
        before - self.rows.len()
    }
}

impl<T: Entity + Named> Table<T> {
    /// Display name of a record; empty when it does not exist
    pub fn name_of(&self, id: Id) -> &str {
        self.rows.get(&id).map(Named::display_name).unwrap_or_default()
    }
}
