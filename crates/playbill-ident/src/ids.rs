//! Small copyable ids shared across the identity core

use serde::{Deserialize, Serialize};
use std::fmt;

/// Home-world id from the static world table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldId(pub u16);

impl WorldId {
    /// Wildcard world, matches any world
    pub const ANY: WorldId = WorldId(u16::MAX);

    /// How the wildcard world renders; user strings may spell it out to
    /// mean "no particular world"
    pub const ANY_NAME: &'static str = "Any World";

    /// Check if this is the wildcard world
    pub fn is_any(self) -> bool {
        self == Self::ANY
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            f.write_str(Self::ANY_NAME)
        } else {
            write!(f, "World {}", self.0)
        }
    }
}

/// Static catalog id within an NPC-like category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataId(pub u32);

impl DataId {
    /// Wildcard catalog id, matches any entry of the category
    pub const ANY: DataId = DataId(u32::MAX);

    /// Check if this is the wildcard id
    pub fn is_any(self) -> bool {
        self == Self::ANY
    }
}

impl fmt::Display for DataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            write!(f, "#any")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Runtime id of a live game entity
///
/// Only stable while the entity exists; never part of a persisted identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Sentinel the client uses for "no entity" / "no owner"
    pub const NONE: EntityId = EntityId(0xE000_0000);

    /// Check if this is the no-entity sentinel
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "entity:none")
        } else {
            write!(f, "entity:{:#x}", self.0)
        }
    }
}

/// Slot index in the live object table
///
/// The table is laid out in fixed ranges: regular characters occupy even
/// indices below [`ObjectIndex::CUTSCENE_START`] with their owned companion
/// object in the following odd slot, cutscene duplicates occupy
/// `CUTSCENE_START..SPECIAL_START`, the fixed UI slots occupy
/// `SPECIAL_START..SPECIAL_END`, and event stand-ins fill the rest up to
/// [`ObjectIndex::TOTAL_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectIndex(pub u16);

impl ObjectIndex {
    /// Wildcard index, matches any slot
    pub const ANY: ObjectIndex = ObjectIndex(u16::MAX);
    /// Sentinel for identities where an index is not applicable
    pub const NONE: ObjectIndex = ObjectIndex(u16::MAX - 1);

    /// First index of the cutscene duplicate range
    pub const CUTSCENE_START: u16 = 200;
    /// First index of the fixed UI slot range
    pub const SPECIAL_START: u16 = 240;
    /// One past the last fixed UI slot
    pub const SPECIAL_END: u16 = 248;
    /// Total capacity of the live object table
    pub const TOTAL_COUNT: u16 = 720;

    /// Check if this is the wildcard index
    pub fn is_any(self) -> bool {
        self == Self::ANY
    }

    /// Check if the index lies in the cutscene duplicate range
    pub fn is_cutscene(self) -> bool {
        (Self::CUTSCENE_START..Self::SPECIAL_START).contains(&self.0)
    }

    /// Check if the index lies in the fixed UI slot range
    pub fn is_special(self) -> bool {
        (Self::SPECIAL_START..Self::SPECIAL_END).contains(&self.0)
    }

    /// Check if the index is acceptable for an NPC identity: the wildcard,
    /// an even slot in the regular range, or any slot in the cutscene and
    /// extended ranges below table capacity.
    pub fn is_viable_npc_slot(self) -> bool {
        self == Self::ANY
            || self.0 < Self::CUTSCENE_START && self.0 % 2 == 0
            || self.0 >= Self::CUTSCENE_START && self.0 < Self::TOTAL_COUNT
    }
}

impl fmt::Display for ObjectIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ANY => write!(f, "any index"),
            Self::NONE => write!(f, "no index"),
            Self(i) => write!(f, "index {i}"),
        }
    }
}

/// Coarse classification of a live object-table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    BattleNpc,
    EventNpc,
    Mount,
    Companion,
    Ornament,
    Retainer,
    /// Anything the client does not classify further
    Other,
}

/// NPC-like catalog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcKind {
    Mount,
    Companion,
    Ornament,
    BattleNpc,
    EventNpc,
}

impl fmt::Display for NpcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NpcKind::Mount => "Mount",
            NpcKind::Companion => "Companion",
            NpcKind::Ornament => "Ornament",
            NpcKind::BattleNpc => "Battle NPC",
            NpcKind::EventNpc => "Event NPC",
        };
        f.write_str(name)
    }
}

/// Sub-classification of a retainer identity
///
/// `Both` is the wildcard: it matches either concrete flavor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RetainerKind {
    #[default]
    Both,
    Bell,
    Mannequin,
}

impl RetainerKind {
    /// Wildcard-absorbing comparison
    pub fn matches(self, other: RetainerKind) -> bool {
        self == other || self == RetainerKind::Both || other == RetainerKind::Both
    }
}

impl fmt::Display for RetainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RetainerKind::Both => "Retainer",
            RetainerKind::Bell => "Retainer (Bell)",
            RetainerKind::Mannequin => "Mannequin",
        };
        f.write_str(name)
    }
}

/// One of the reserved object-table slots that is always bound to a UI
/// context rather than a roaming entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpecialSlot {
    CharacterScreen,
    ExamineScreen,
    FittingRoom,
    DyePreview,
    Portrait,
    Card6,
    Card7,
    Card8,
}

impl SpecialSlot {
    const ALL: [SpecialSlot; 8] = [
        SpecialSlot::CharacterScreen,
        SpecialSlot::ExamineScreen,
        SpecialSlot::FittingRoom,
        SpecialSlot::DyePreview,
        SpecialSlot::Portrait,
        SpecialSlot::Card6,
        SpecialSlot::Card7,
        SpecialSlot::Card8,
    ];

    /// The fixed object-table slot this UI context owns
    pub fn index(self) -> ObjectIndex {
        ObjectIndex(ObjectIndex::SPECIAL_START + self as u16)
    }

    /// Map an object-table index back to its UI slot, if it is one
    pub fn from_index(index: ObjectIndex) -> Option<SpecialSlot> {
        if index.is_special() {
            Some(Self::ALL[(index.0 - ObjectIndex::SPECIAL_START) as usize])
        } else {
            None
        }
    }
}

impl fmt::Display for SpecialSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpecialSlot::CharacterScreen => "Character Screen",
            SpecialSlot::ExamineScreen => "Examine Screen",
            SpecialSlot::FittingRoom => "Fitting Room",
            SpecialSlot::DyePreview => "Dye Preview",
            SpecialSlot::Portrait => "Portrait",
            SpecialSlot::Card6 => "Card Slot 6",
            SpecialSlot::Card7 => "Card Slot 7",
            SpecialSlot::Card8 => "Card Slot 8",
        };
        f.write_str(name)
    }
}
