//! Validated construction of actor identifiers
//!
//! The factory is the single gate every identifier passes through. The
//! `create_*` constructors validate against the name grammar and the static
//! tables and return [`ActorIdentifier::Invalid`] on any failure; they never
//! error. The `*_unchecked` counterparts skip the table lookups for sources
//! that are already trusted, such as fields just read from a live handle on
//! the per-frame resolution path.

use crate::identifier::{
    ActorIdentifier, NpcIdent, OwnedIdent, PlayerIdent, RetainerIdent, UnknownIdent,
};
use crate::ids::{DataId, NpcKind, ObjectIndex, RetainerKind, SpecialSlot, WorldId};
use crate::lookup::NameLookup;
use crate::name::{verify_player_name, verify_retainer_name, EntityName};

/// Constructs validated actor identifiers
///
/// Holds an optional [`NameLookup`]; while the tables are still loading the
/// table-backed checks degrade to accepting the raw values rather than
/// rejecting everything.
#[derive(Clone, Copy, Default)]
pub struct IdentifierFactory<'a> {
    lookup: Option<&'a dyn NameLookup>,
}

impl<'a> IdentifierFactory<'a> {
    /// Factory backed by name tables
    pub fn new(lookup: &'a dyn NameLookup) -> Self {
        Self {
            lookup: Some(lookup),
        }
    }

    /// Factory without tables; validation degrades to structural checks
    pub fn detached() -> Self {
        Self { lookup: None }
    }

    /// The lookup backing this factory, if any
    pub fn lookup(&self) -> Option<&'a dyn NameLookup> {
        self.lookup
    }

    fn world_ok(&self, world: WorldId) -> bool {
        world.is_any()
            || match self.lookup {
                Some(lookup) => lookup.world_exists(world),
                None => true,
            }
    }

    fn data_id_ok(&self, kind: NpcKind, data_id: DataId) -> bool {
        match self.lookup {
            Some(lookup) => lookup.contains(kind, data_id),
            None => true,
        }
    }

    /// A player identity, `Invalid` unless the name passes the player
    /// grammar and the world is the wildcard or a known world
    pub fn create_player<'n>(
        &self,
        name: EntityName<'n>,
        world: WorldId,
    ) -> ActorIdentifier<'n> {
        if verify_player_name(name.as_str()) && self.world_ok(world) {
            ActorIdentifier::Player(PlayerIdent { name, world })
        } else {
            ActorIdentifier::Invalid
        }
    }

    /// A retainer identity, `Invalid` unless the name passes the retainer
    /// grammar
    pub fn create_retainer<'n>(
        &self,
        name: EntityName<'n>,
        kind: RetainerKind,
    ) -> ActorIdentifier<'n> {
        if verify_retainer_name(name.as_str()) {
            ActorIdentifier::Retainer(RetainerIdent { name, kind })
        } else {
            ActorIdentifier::Invalid
        }
    }

    /// A player-owned NPC identity, `Invalid` unless the owner fields pass
    /// the player checks and the catalog entry exists
    pub fn create_owned<'n>(
        &self,
        owner_name: EntityName<'n>,
        world: WorldId,
        kind: NpcKind,
        data_id: DataId,
    ) -> ActorIdentifier<'n> {
        if verify_player_name(owner_name.as_str())
            && self.world_ok(world)
            && self.data_id_ok(kind, data_id)
        {
            ActorIdentifier::Owned(OwnedIdent {
                owner: PlayerIdent {
                    name: owner_name,
                    world,
                },
                kind,
                data_id,
            })
        } else {
            ActorIdentifier::Invalid
        }
    }

    /// An unowned NPC identity, `Invalid` unless the index is a viable NPC
    /// slot and the catalog entry exists
    pub fn create_npc(
        &self,
        kind: NpcKind,
        data_id: DataId,
        index: ObjectIndex,
    ) -> ActorIdentifier<'static> {
        if index.is_viable_npc_slot() && self.data_id_ok(kind, data_id) {
            ActorIdentifier::Npc(NpcIdent {
                kind,
                data_id,
                index,
            })
        } else {
            ActorIdentifier::Invalid
        }
    }

    /// A fixed UI slot identity; the slot type already carries the range
    /// check
    pub fn create_special(&self, slot: SpecialSlot) -> ActorIdentifier<'static> {
        ActorIdentifier::Special(slot)
    }

    /// Player identity without any validation
    pub fn player_unchecked<'n>(
        &self,
        name: EntityName<'n>,
        world: WorldId,
    ) -> ActorIdentifier<'n> {
        ActorIdentifier::Player(PlayerIdent { name, world })
    }

    /// Retainer identity without any validation
    pub fn retainer_unchecked<'n>(
        &self,
        name: EntityName<'n>,
        kind: RetainerKind,
    ) -> ActorIdentifier<'n> {
        ActorIdentifier::Retainer(RetainerIdent { name, kind })
    }

    /// Owned identity without any validation
    pub fn owned_unchecked<'n>(
        &self,
        owner_name: EntityName<'n>,
        world: WorldId,
        kind: NpcKind,
        data_id: DataId,
    ) -> ActorIdentifier<'n> {
        ActorIdentifier::Owned(OwnedIdent {
            owner: PlayerIdent {
                name: owner_name,
                world,
            },
            kind,
            data_id,
        })
    }

    /// NPC identity without any validation
    pub fn npc_unchecked(
        &self,
        kind: NpcKind,
        data_id: DataId,
        index: ObjectIndex,
    ) -> ActorIdentifier<'static> {
        ActorIdentifier::Npc(NpcIdent {
            kind,
            data_id,
            index,
        })
    }

    /// Unclassifiable entity identity; never validated since the variant
    /// itself reports as not valid
    pub fn unknown<'n>(&self, name: EntityName<'n>, index: ObjectIndex) -> ActorIdentifier<'n> {
        ActorIdentifier::Unknown(UnknownIdent { name, index })
    }
}

impl std::fmt::Debug for IdentifierFactory<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifierFactory")
            .field("lookup", &self.lookup.map(|_| "dyn NameLookup"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::MemoryNameLookup;

    fn lookup() -> MemoryNameLookup {
        let mut lookup = MemoryNameLookup::new();
        lookup.insert_world(WorldId(23), "Cerberus");
        lookup.insert(NpcKind::Mount, DataId(12), "Chocobo");
        lookup
    }

    #[test]
    fn test_create_player() {
        let lookup = lookup();
        let factory = IdentifierFactory::new(&lookup);

        assert!(factory
            .create_player(EntityName::borrowed("Jane Doe"), WorldId(23))
            .is_valid());
        assert!(factory
            .create_player(EntityName::borrowed("Jane Doe"), WorldId::ANY)
            .is_valid());
        // unknown world
        assert_eq!(
            factory.create_player(EntityName::borrowed("Jane Doe"), WorldId(99)),
            ActorIdentifier::Invalid
        );
        // bad grammar
        assert_eq!(
            factory.create_player(EntityName::borrowed("jane doe"), WorldId(23)),
            ActorIdentifier::Invalid
        );
    }

    #[test]
    fn test_detached_factory_degrades() {
        let factory = IdentifierFactory::detached();
        // world and catalog checks degrade, grammar still applies
        assert!(factory
            .create_player(EntityName::borrowed("Jane Doe"), WorldId(99))
            .is_valid());
        assert!(factory
            .create_npc(NpcKind::Mount, DataId(999), ObjectIndex::ANY)
            .is_valid());
        assert_eq!(
            factory.create_player(EntityName::borrowed("jane doe"), WorldId(99)),
            ActorIdentifier::Invalid
        );
    }

    #[test]
    fn test_create_npc_index_rules() {
        let lookup = lookup();
        let factory = IdentifierFactory::new(&lookup);

        assert!(factory
            .create_npc(NpcKind::Mount, DataId(12), ObjectIndex::ANY)
            .is_valid());
        assert!(factory
            .create_npc(NpcKind::Mount, DataId(12), ObjectIndex(6))
            .is_valid());
        // odd slot in the regular range
        assert_eq!(
            factory.create_npc(NpcKind::Mount, DataId(12), ObjectIndex(7)),
            ActorIdentifier::Invalid
        );
        // beyond table capacity
        assert_eq!(
            factory.create_npc(NpcKind::Mount, DataId(12), ObjectIndex(720)),
            ActorIdentifier::Invalid
        );
        // unknown catalog entry
        assert_eq!(
            factory.create_npc(NpcKind::Mount, DataId(99), ObjectIndex::ANY),
            ActorIdentifier::Invalid
        );
    }

    #[test]
    fn test_create_owned() {
        let lookup = lookup();
        let factory = IdentifierFactory::new(&lookup);

        assert!(factory
            .create_owned(
                EntityName::borrowed("Jane Doe"),
                WorldId(23),
                NpcKind::Mount,
                DataId(12)
            )
            .is_valid());
        assert_eq!(
            factory.create_owned(
                EntityName::borrowed("Jane Doe"),
                WorldId(23),
                NpcKind::Companion,
                DataId(12)
            ),
            ActorIdentifier::Invalid
        );
    }

    #[test]
    fn test_create_retainer() {
        let factory = IdentifierFactory::detached();
        assert!(factory
            .create_retainer(EntityName::borrowed("Pemberton"), RetainerKind::Bell)
            .is_valid());
        assert_eq!(
            factory.create_retainer(EntityName::borrowed("Jane Doe"), RetainerKind::Bell),
            ActorIdentifier::Invalid
        );
    }

    #[test]
    fn test_unchecked_bypasses_tables() {
        let lookup = lookup();
        let factory = IdentifierFactory::new(&lookup);
        assert!(factory
            .player_unchecked(EntityName::borrowed("Jane Doe"), WorldId(99))
            .is_valid());
        assert!(factory
            .npc_unchecked(NpcKind::Mount, DataId(999), ObjectIndex(7))
            .is_valid());
    }
}
