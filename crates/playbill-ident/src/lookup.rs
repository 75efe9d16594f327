//! Read-only name lookup capability
//!
//! The static name tables are built asynchronously by the host at startup
//! and zone load; the identity core only ever performs non-blocking reads
//! against them. Every query must be safe to call before the tables are
//! populated and report "not found" instead of blocking.

use crate::ids::{DataId, NpcKind, WorldId};
use crate::name::eq_ignore_case;
use indexmap::IndexMap;

/// Read-only queries against the static name tables
pub trait NameLookup {
    /// Display name for a catalog entry, `None` while the table is still
    /// loading or when the id is unknown
    fn name(&self, kind: NpcKind, id: DataId) -> Option<&str>;

    /// All catalog ids whose display name matches case-insensitively, in
    /// catalog order
    fn ids_by_name(&self, kind: NpcKind, name: &str) -> Vec<DataId>;

    /// Display name of a world
    fn world_name(&self, id: WorldId) -> Option<&str>;

    /// World id for a world name, case-insensitive
    fn world_id(&self, name: &str) -> Option<WorldId>;

    /// Check if a world id denotes a known world
    fn world_exists(&self, id: WorldId) -> bool {
        self.world_name(id).is_some()
    }

    /// Check if a catalog entry exists
    fn contains(&self, kind: NpcKind, id: DataId) -> bool {
        self.name(kind, id).is_some()
    }
}

/// In-memory name tables, used by tests and demos in place of the host's
/// static-data loader
///
/// Insertion order doubles as catalog order, so ambiguous name queries
/// return ids in a deterministic order.
#[derive(Debug, Clone, Default)]
pub struct MemoryNameLookup {
    tables: IndexMap<NpcKind, IndexMap<DataId, String>>,
    worlds: IndexMap<WorldId, String>,
}

impl MemoryNameLookup {
    /// Create empty tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a catalog entry
    pub fn insert(&mut self, kind: NpcKind, id: DataId, name: impl Into<String>) {
        self.tables.entry(kind).or_default().insert(id, name.into());
    }

    /// Add a world
    pub fn insert_world(&mut self, id: WorldId, name: impl Into<String>) {
        self.worlds.insert(id, name.into());
    }
}

impl NameLookup for MemoryNameLookup {
    fn name(&self, kind: NpcKind, id: DataId) -> Option<&str> {
        self.tables.get(&kind)?.get(&id).map(String::as_str)
    }

    fn ids_by_name(&self, kind: NpcKind, name: &str) -> Vec<DataId> {
        let Some(table) = self.tables.get(&kind) else {
            return Vec::new();
        };
        table
            .iter()
            .filter(|(_, entry)| eq_ignore_case(entry, name))
            .map(|(&id, _)| id)
            .collect()
    }

    fn world_name(&self, id: WorldId) -> Option<&str> {
        self.worlds.get(&id).map(String::as_str)
    }

    fn world_id(&self, name: &str) -> Option<WorldId> {
        self.worlds
            .iter()
            .find(|(_, entry)| eq_ignore_case(entry, name))
            .map(|(&id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_queries() {
        let mut lookup = MemoryNameLookup::new();
        lookup.insert(NpcKind::Mount, DataId(12), "Company Chocobo");
        lookup.insert(NpcKind::Mount, DataId(34), "Chocobo");
        lookup.insert(NpcKind::Mount, DataId(56), "chocobo");

        assert_eq!(lookup.name(NpcKind::Mount, DataId(12)), Some("Company Chocobo"));
        assert_eq!(lookup.name(NpcKind::Companion, DataId(12)), None);
        assert!(lookup.contains(NpcKind::Mount, DataId(34)));

        // catalog order, case-insensitive
        assert_eq!(
            lookup.ids_by_name(NpcKind::Mount, "CHOCOBO"),
            vec![DataId(34), DataId(56)]
        );
        assert!(lookup.ids_by_name(NpcKind::Mount, "Ahriman").is_empty());
    }

    #[test]
    fn test_world_queries() {
        let mut lookup = MemoryNameLookup::new();
        lookup.insert_world(WorldId(23), "Cerberus");

        assert!(lookup.world_exists(WorldId(23)));
        assert!(!lookup.world_exists(WorldId(24)));
        assert_eq!(lookup.world_id("cerberus"), Some(WorldId(23)));
        assert_eq!(lookup.world_name(WorldId(23)), Some("Cerberus"));
    }
}
