//! In-memory object table for tests and demos
//!
//! Stands in for the client's live object table so resolution can be
//! exercised without a running game. Entities are plain structs; the table
//! is an index-keyed map plus an explicit cutscene-alias map.

use crate::handle::{EntityHandle, ObjectTable};
use crate::ids::{DataId, EntityId, EntityKind, ObjectIndex, WorldId};
use indexmap::IndexMap;

/// One scripted entity in a [`SyntheticTable`]
#[derive(Debug, Clone)]
pub struct SyntheticEntity {
    pub valid: bool,
    pub index: ObjectIndex,
    pub kind: EntityKind,
    pub entity_id: EntityId,
    pub owner_id: EntityId,
    pub name: String,
    /// Set to script a name divergence between update cycles
    pub live_name: Option<String>,
    pub world: WorldId,
    pub base_id: DataId,
    pub name_id: DataId,
    pub mount_id: DataId,
    pub ornament_id: DataId,
}

impl SyntheticEntity {
    /// Create an entity with every field at its neutral value
    pub fn new(index: u16, kind: EntityKind) -> Self {
        Self {
            valid: true,
            index: ObjectIndex(index),
            kind,
            entity_id: EntityId::NONE,
            owner_id: EntityId::NONE,
            name: String::new(),
            live_name: None,
            world: WorldId::ANY,
            base_id: DataId(0),
            name_id: DataId(0),
            mount_id: DataId(0),
            ornament_id: DataId(0),
        }
    }

    /// A named player character
    pub fn player(index: u16, name: impl Into<String>, world: WorldId) -> Self {
        let mut entity = Self::new(index, EntityKind::Player);
        entity.name = name.into();
        entity.world = world;
        entity
    }

    pub fn with_entity_id(mut self, id: u32) -> Self {
        self.entity_id = EntityId(id);
        self
    }

    pub fn with_owner(mut self, id: u32) -> Self {
        self.owner_id = EntityId(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_live_name(mut self, name: impl Into<String>) -> Self {
        self.live_name = Some(name.into());
        self
    }

    pub fn with_base_id(mut self, id: u32) -> Self {
        self.base_id = DataId(id);
        self
    }

    pub fn with_name_id(mut self, id: u32) -> Self {
        self.name_id = DataId(id);
        self
    }

    pub fn with_mount(mut self, id: u32) -> Self {
        self.mount_id = DataId(id);
        self
    }

    pub fn with_ornament(mut self, id: u32) -> Self {
        self.ornament_id = DataId(id);
        self
    }

    pub fn invalidated(mut self) -> Self {
        self.valid = false;
        self
    }
}

impl EntityHandle for SyntheticEntity {
    fn valid(&self) -> bool {
        self.valid
    }

    fn index(&self) -> ObjectIndex {
        self.index
    }

    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    fn owner_id(&self) -> EntityId {
        self.owner_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn live_name(&self) -> &str {
        self.live_name.as_deref().unwrap_or(&self.name)
    }

    fn home_world(&self) -> WorldId {
        self.world
    }

    fn base_id(&self) -> DataId {
        self.base_id
    }

    fn name_id(&self) -> DataId {
        self.name_id
    }

    fn mount_id(&self) -> DataId {
        self.mount_id
    }

    fn ornament_id(&self) -> DataId {
        self.ornament_id
    }
}

/// Scriptable object table
#[derive(Debug, Clone, Default)]
pub struct SyntheticTable {
    entities: IndexMap<ObjectIndex, SyntheticEntity>,
    cutscene_links: IndexMap<ObjectIndex, ObjectIndex>,
}

impl SyntheticTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an entity at its slot
    pub fn insert(&mut self, entity: SyntheticEntity) {
        self.entities.insert(entity.index, entity);
    }

    /// Declare `from` a cutscene duplicate mirroring `to`
    pub fn link_cutscene(&mut self, from: u16, to: u16) {
        self.cutscene_links
            .insert(ObjectIndex(from), ObjectIndex(to));
    }

    /// Iterate all scripted entities in slot order of insertion
    pub fn iter(&self) -> impl Iterator<Item = &SyntheticEntity> {
        self.entities.values()
    }
}

impl ObjectTable for SyntheticTable {
    type Handle = SyntheticEntity;

    fn by_index(&self, index: ObjectIndex) -> Option<&SyntheticEntity> {
        self.entities.get(&index)
    }

    fn by_entity_id(&self, id: EntityId) -> Option<&SyntheticEntity> {
        if id.is_none() {
            return None;
        }
        self.entities.values().find(|e| e.entity_id == id)
    }

    fn cutscene_parent(&self, index: ObjectIndex) -> Option<ObjectIndex> {
        self.cutscene_links.get(&index).copied()
    }
}
