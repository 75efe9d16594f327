//! Live entity capabilities
//!
//! The identity core never touches client memory directly; it sees live
//! entities through these two traits. Handle data is only guaranteed stable
//! for the duration of one update callback, which is why resolved
//! identifiers borrow their name bytes and must be made permanent before
//! they are retained.

use crate::ids::{DataId, EntityId, EntityKind, ObjectIndex, WorldId};

/// Opaque view of one live game entity
pub trait EntityHandle {
    /// Check if the handle still points at a live entity
    fn valid(&self) -> bool;

    /// Slot in the live object table
    fn index(&self) -> ObjectIndex;

    /// Coarse classification of the entity
    fn kind(&self) -> EntityKind;

    /// Runtime id of this entity
    fn entity_id(&self) -> EntityId;

    /// Runtime id of the owning entity, [`EntityId::NONE`] when unowned
    fn owner_id(&self) -> EntityId;

    /// Display name cached by the client at the last update tick
    fn name(&self) -> &str;

    /// Name re-read from the entity this instant
    ///
    /// Diverges from [`EntityHandle::name`] for one update cycle when the
    /// displayed name changes, which is what distinguishes a mannequin from
    /// a real retainer.
    fn live_name(&self) -> &str {
        self.name()
    }

    /// Home world of a player entity
    fn home_world(&self) -> WorldId;

    /// Static base id of the entity's own catalog row
    fn base_id(&self) -> DataId;

    /// Catalog name id; zero when the client does not fill the field
    fn name_id(&self) -> DataId;

    /// Mount catalog id currently in this character's state
    fn mount_id(&self) -> DataId {
        DataId(0)
    }

    /// Ornament catalog id currently in this character's state
    fn ornament_id(&self) -> DataId {
        DataId(0)
    }
}

/// Lookups against the live object table
pub trait ObjectTable {
    type Handle: EntityHandle;

    /// Entity occupying a slot, if any
    fn by_index(&self, index: ObjectIndex) -> Option<&Self::Handle>;

    /// Entity whose runtime id matches, used to chase owner ids
    fn by_entity_id(&self, id: EntityId) -> Option<&Self::Handle>;

    /// Real slot mirrored by a cutscene duplicate
    ///
    /// Implementations only return mappings for slots in the cutscene
    /// range; everything else is `None`.
    fn cutscene_parent(&self, index: ObjectIndex) -> Option<ObjectIndex>;
}
