//! Deriving an identity from a live handle
//!
//! The resolver is state-free: every call re-derives from the current
//! object-table contents and never blocks, so it is safe on the per-frame
//! update path. Any step that cannot complete yields
//! [`ActorIdentifier::Invalid`]; resolution never errors.

use crate::factory::IdentifierFactory;
use crate::handle::{EntityHandle, ObjectTable};
use crate::identifier::ActorIdentifier;
use crate::ids::{DataId, EntityKind, NpcKind, ObjectIndex, RetainerKind, SpecialSlot};
use crate::name::EntityName;
use tracing::{debug, trace};

/// Base catalog id of the buddy chocobo, whose name-id field the client
/// leaves at zero
const CHOCOBO_BASE_ID: DataId = DataId(1793);
/// Catalog id the buddy chocobo actually resolves to
const CHOCOBO_NAME_ID: DataId = DataId(913);

/// Base id of the squadron stand-in whose catalog id lives in the name-id
/// field instead
const SQUADRON_BASE_ID: DataId = DataId(1_012_065);

/// Event-NPC base ids that vendor mannequins share with real retainers
const MANNEQUIN_IDS: [DataId; 6] = [
    DataId(1_026_228),
    DataId(1_026_229),
    DataId(1_026_986),
    DataId(1_027_668),
    DataId(1_027_669),
    DataId(1_033_693),
];

/// Per-call switches for [`EntityResolver::resolve`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Validate fields against the name tables instead of trusting the
    /// handle; used for user-facing and persisted identities
    pub validate: bool,
    /// Record the wildcard index instead of the live slot, for identities
    /// that must survive the entity moving slots
    pub suppress_index: bool,
    /// Treat battle NPCs with a zero catalog id as players; some external
    /// tools repurpose that kind for modified player characters
    pub allow_player_bnpc: bool,
}

/// The outcome of resolving one handle
#[derive(Debug)]
pub struct Resolution<'e, H> {
    pub identifier: ActorIdentifier<'e>,
    /// The immediate owner, for callers that need both
    pub owner: Option<&'e H>,
}

impl<'e, H> Resolution<'e, H> {
    fn invalid() -> Self {
        Self {
            identifier: ActorIdentifier::Invalid,
            owner: None,
        }
    }

    fn bare(identifier: ActorIdentifier<'e>) -> Self {
        Self {
            identifier,
            owner: None,
        }
    }
}

/// Derives canonical identities from live handles
pub struct EntityResolver<'e, T: ObjectTable> {
    table: &'e T,
    factory: IdentifierFactory<'e>,
}

impl<'e, T: ObjectTable> EntityResolver<'e, T> {
    pub fn new(table: &'e T, factory: IdentifierFactory<'e>) -> Self {
        Self { table, factory }
    }

    /// Resolve a handle to its canonical identity
    pub fn resolve(
        &self,
        handle: &'e T::Handle,
        options: ResolveOptions,
    ) -> Resolution<'e, T::Handle> {
        if !handle.valid() {
            return Resolution::invalid();
        }
        let handle = self.redirect_cutscene(handle);

        // fixed UI slots win over any further classification
        if let Some(slot) = SpecialSlot::from_index(handle.index()) {
            return Resolution::bare(self.factory.create_special(slot));
        }

        match handle.kind() {
            EntityKind::Player => Resolution::bare(self.player_identity(handle, options)),
            EntityKind::BattleNpc => self.resolve_battle_npc(handle, options),
            EntityKind::EventNpc => self.resolve_event_npc(handle, options),
            EntityKind::Mount => self.resolve_owned(handle, NpcKind::Mount, options),
            EntityKind::Companion => self.resolve_owned(handle, NpcKind::Companion, options),
            EntityKind::Ornament => self.resolve_owned(handle, NpcKind::Ornament, options),
            EntityKind::Retainer => {
                let name = EntityName::borrowed(handle.name());
                let identifier = if options.validate {
                    self.factory.create_retainer(name, RetainerKind::Bell)
                } else {
                    self.factory.retainer_unchecked(name, RetainerKind::Bell)
                };
                Resolution::bare(identifier)
            }
            EntityKind::Other => Resolution::bare(
                self.factory.unknown(
                    EntityName::borrowed(handle.name()),
                    self.record_index(handle, options),
                ),
            ),
        }
    }

    /// Follow a cutscene duplicate back to the entity it mirrors
    ///
    /// The table only maps slots in the cutscene range; everything else
    /// passes through unchanged, as does a mapping whose target is gone.
    fn redirect_cutscene(&self, handle: &'e T::Handle) -> &'e T::Handle {
        let index = handle.index();
        if let Some(parent_index) = self.table.cutscene_parent(index) {
            if let Some(parent) = self.table.by_index(parent_index) {
                if parent.valid() {
                    trace!(
                        from = index.0,
                        to = parent_index.0,
                        "following cutscene redirection"
                    );
                    return parent;
                }
            }
        }
        handle
    }

    fn record_index(&self, handle: &T::Handle, options: ResolveOptions) -> ObjectIndex {
        if options.suppress_index {
            ObjectIndex::ANY
        } else {
            handle.index()
        }
    }

    fn player_identity(
        &self,
        handle: &'e T::Handle,
        options: ResolveOptions,
    ) -> ActorIdentifier<'e> {
        let name = EntityName::borrowed(handle.name());
        let world = handle.home_world();
        if options.validate {
            self.factory.create_player(name, world)
        } else {
            self.factory.player_unchecked(name, world)
        }
    }

    fn resolve_battle_npc(
        &self,
        handle: &'e T::Handle,
        options: ResolveOptions,
    ) -> Resolution<'e, T::Handle> {
        let mut data_id = handle.name_id();
        if data_id == DataId(0) && handle.base_id() == CHOCOBO_BASE_ID {
            data_id = CHOCOBO_NAME_ID;
        }
        let owner_id = handle.owner_id();
        if owner_id.is_none() {
            // legacy: some tools repurpose this kind for modified players
            if data_id == DataId(0) && options.allow_player_bnpc {
                return Resolution::bare(self.player_identity(handle, options));
            }
            let identifier = self.npc_identity(
                NpcKind::BattleNpc,
                data_id,
                self.record_index(handle, options),
                options,
            );
            return Resolution::bare(identifier);
        }

        let Some(owner) = self.table.by_entity_id(owner_id) else {
            debug!(%owner_id, "owner of battle npc not in the object table");
            return Resolution::invalid();
        };
        let owner = self.redirect_cutscene(owner);
        let identifier = self.owned_identity(owner, NpcKind::BattleNpc, data_id, options);
        Resolution {
            identifier,
            owner: Some(owner),
        }
    }

    fn resolve_event_npc(
        &self,
        handle: &'e T::Handle,
        options: ResolveOptions,
    ) -> Resolution<'e, T::Handle> {
        let mut data_id = handle.base_id();
        if data_id == SQUADRON_BASE_ID {
            data_id = handle.name_id();
        }

        if MANNEQUIN_IDS.contains(&data_id) {
            // a mannequin and a real retainer share this kind; the names
            // diverge for one update cycle only on a real retainer
            if handle.live_name() != handle.name() {
                let identifier = self
                    .factory
                    .create_retainer(EntityName::borrowed(handle.name()), RetainerKind::Mannequin);
                if identifier.is_valid() {
                    return Resolution::bare(identifier);
                }
            }
        }

        let identifier = self.npc_identity(
            NpcKind::EventNpc,
            data_id,
            self.record_index(handle, options),
            options,
        );
        Resolution::bare(identifier)
    }

    /// Mounts, companions, and ornaments sit in the odd slot after their
    /// owner
    fn resolve_owned(
        &self,
        handle: &'e T::Handle,
        kind: NpcKind,
        options: ResolveOptions,
    ) -> Resolution<'e, T::Handle> {
        let index = handle.index();
        if index.0 == 0 || index.is_any() {
            return Resolution::invalid();
        }
        let Some(owner) = self.table.by_index(ObjectIndex(index.0 - 1)) else {
            debug!(index = index.0, "owned entity without an owner slot");
            return Resolution::invalid();
        };
        let owner = self.redirect_cutscene(owner);
        if !owner.valid() {
            return Resolution::invalid();
        }

        let data_id = match kind {
            NpcKind::Mount => owner.mount_id(),
            NpcKind::Ornament => owner.ornament_id(),
            _ => handle.base_id(),
        };

        // some non-player owners carry no name; keep the entity
        // addressable by slot instead
        if owner.name().is_empty() {
            let identifier =
                self.npc_identity(kind, data_id, self.record_index(handle, options), options);
            return Resolution::bare(identifier);
        }

        let identifier = self.owned_identity(owner, kind, data_id, options);
        Resolution {
            identifier,
            owner: Some(owner),
        }
    }

    fn npc_identity(
        &self,
        kind: NpcKind,
        data_id: DataId,
        index: ObjectIndex,
        options: ResolveOptions,
    ) -> ActorIdentifier<'static> {
        if options.validate {
            self.factory.create_npc(kind, data_id, index)
        } else {
            self.factory.npc_unchecked(kind, data_id, index)
        }
    }

    fn owned_identity(
        &self,
        owner: &'e T::Handle,
        kind: NpcKind,
        data_id: DataId,
        options: ResolveOptions,
    ) -> ActorIdentifier<'e> {
        let name = EntityName::borrowed(owner.name());
        let world = owner.home_world();
        if options.validate {
            self.factory.create_owned(name, world, kind, data_id)
        } else {
            self.factory.owned_unchecked(name, world, kind, data_id)
        }
    }
}
