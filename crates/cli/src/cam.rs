//! Bounded content-addressable map of architectural register identities.
//!
//! Scaffolding for the demonstration: an ordered table keyed by an
//! integer tag, standing in for the lookup structure a pipeline frontend
//! would use to find the architectural identity behind a decoded
//! destination.

use std::collections::BTreeMap;

use renamesim_core::core::reg_class::{RegId, RegIndex};

/// Ordered lookup table from integer keys to architectural identities.
#[derive(Debug)]
pub struct Cam<'a> {
    table: BTreeMap<RegIndex, RegId<'a>>,
    max_size: usize,
}

impl<'a> Cam<'a> {
    /// Creates an empty CAM bounded at 512 entries.
    pub fn new() -> Self {
        Self {
            table: BTreeMap::new(),
            max_size: 512,
        }
    }

    /// Returns the capacity bound.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Inserts an identity under `key`. A full table rejects new keys.
    pub fn add(&mut self, key: RegIndex, value: RegId<'a>) {
        if self.table.len() == self.max_size && !self.table.contains_key(&key) {
            eprintln!("CAM is full, cannot add key {key}");
            return;
        }
        let _ = self.table.insert(key, value);
    }

    /// Returns the identity stored under `key`, if any.
    pub fn find(&self, key: RegIndex) -> Option<RegId<'a>> {
        self.table.get(&key).copied()
    }

    /// Prints the table contents in key order.
    pub fn display(&self) {
        println!("CAM contents (key: register):");
        for (key, value) in &self.table {
            println!("{key}: {value}");
        }
    }
}

impl Default for Cam<'_> {
    fn default() -> Self {
        Self::new()
    }
}
