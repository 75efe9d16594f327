//! The actor identity value type
//!
//! An [`ActorIdentifier`] gives a volatile live entity a stable, comparable
//! identity that survives frames, zone transitions, and UI context switches.
//! Values are created through [`IdentifierFactory`](crate::IdentifierFactory)
//! or [`EntityResolver`](crate::EntityResolver) and are immutable afterwards.
//!
//! Equality is variant- and field-specific rather than structural: wildcard
//! fields absorb any concrete value, and catalog ids fall back to a
//! display-name comparison when a [`NameLookup`] is supplied. The `Hash`
//! impl only covers fields that compare exactly, so it stays consistent
//! with every branch of the equality check.

use crate::ids::{DataId, NpcKind, ObjectIndex, RetainerKind, SpecialSlot, WorldId};
use crate::lookup::NameLookup;
use crate::name::{eq_ignore_case, EntityName};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::discriminant;

/// A named player character on a home world
#[derive(Debug, Clone)]
pub struct PlayerIdent<'a> {
    pub name: EntityName<'a>,
    pub world: WorldId,
}

/// A player's retainer or vendor-stand actor
#[derive(Debug, Clone)]
pub struct RetainerIdent<'a> {
    pub name: EntityName<'a>,
    pub kind: RetainerKind,
}

/// An NPC-like entity owned by a player: mount, minion, ornament, or pet
#[derive(Debug, Clone)]
pub struct OwnedIdent<'a> {
    pub owner: PlayerIdent<'a>,
    pub kind: NpcKind,
    pub data_id: DataId,
}

/// An unowned NPC instance
#[derive(Debug, Clone, Copy)]
pub struct NpcIdent {
    pub kind: NpcKind,
    pub data_id: DataId,
    /// Live object-table slot, or [`ObjectIndex::ANY`] when the slot is not
    /// part of the identity
    pub index: ObjectIndex,
}

/// Anything not otherwise classifiable
#[derive(Debug, Clone)]
pub struct UnknownIdent<'a> {
    pub name: EntityName<'a>,
    pub index: ObjectIndex,
}

/// A stable identity for a live game entity
///
/// The lifetime tracks name bytes that may still be borrowed from a live
/// handle; call [`ActorIdentifier::make_permanent`] before retaining a value
/// past the update tick that produced it.
#[derive(Debug, Clone, Default)]
pub enum ActorIdentifier<'a> {
    #[default]
    Invalid,
    Player(PlayerIdent<'a>),
    Retainer(RetainerIdent<'a>),
    Owned(OwnedIdent<'a>),
    Special(SpecialSlot),
    Npc(NpcIdent),
    Unknown(UnknownIdent<'a>),
}

impl<'a> ActorIdentifier<'a> {
    /// Check if this identifier denotes a classified entity
    ///
    /// False only for `Invalid` and `Unknown`.
    pub fn is_valid(&self) -> bool {
        !matches!(self, ActorIdentifier::Invalid | ActorIdentifier::Unknown(_))
    }

    /// Name of the variant, also used as the `Type` discriminator of the
    /// serialized form
    pub fn variant_name(&self) -> &'static str {
        match self {
            ActorIdentifier::Invalid => "Invalid",
            ActorIdentifier::Player(_) => "Player",
            ActorIdentifier::Retainer(_) => "Retainer",
            ActorIdentifier::Owned(_) => "Owned",
            ActorIdentifier::Special(_) => "Special",
            ActorIdentifier::Npc(_) => "Npc",
            ActorIdentifier::Unknown(_) => "Unknown",
        }
    }

    /// Deep-copy any name bytes still borrowed from a live handle
    ///
    /// A no-op for identifiers whose names are already owned.
    pub fn make_permanent(self) -> ActorIdentifier<'static> {
        match self {
            ActorIdentifier::Invalid => ActorIdentifier::Invalid,
            ActorIdentifier::Player(p) => ActorIdentifier::Player(p.make_permanent()),
            ActorIdentifier::Retainer(r) => ActorIdentifier::Retainer(RetainerIdent {
                name: r.name.into_permanent(),
                kind: r.kind,
            }),
            ActorIdentifier::Owned(o) => ActorIdentifier::Owned(OwnedIdent {
                owner: o.owner.make_permanent(),
                kind: o.kind,
                data_id: o.data_id,
            }),
            ActorIdentifier::Special(s) => ActorIdentifier::Special(s),
            ActorIdentifier::Npc(n) => ActorIdentifier::Npc(n),
            ActorIdentifier::Unknown(u) => ActorIdentifier::Unknown(UnknownIdent {
                name: u.name.into_permanent(),
                index: u.index,
            }),
        }
    }

    /// Full equality check
    ///
    /// With a lookup, catalog ids that differ may still match when their
    /// display names are equal case-insensitively; without one the check
    /// degrades to raw field comparison. Wildcards absorb in either mode.
    pub fn matches(&self, other: &ActorIdentifier<'_>, lookup: Option<&dyn NameLookup>) -> bool {
        match (self, other) {
            (ActorIdentifier::Invalid, ActorIdentifier::Invalid) => true,
            (ActorIdentifier::Player(a), ActorIdentifier::Player(b)) => {
                a.name == b.name && a.world == b.world
            }
            (ActorIdentifier::Retainer(a), ActorIdentifier::Retainer(b)) => {
                a.name == b.name && a.kind.matches(b.kind)
            }
            (ActorIdentifier::Owned(a), ActorIdentifier::Owned(b)) => {
                a.owner.name == b.owner.name
                    && a.owner.world == b.owner.world
                    && a.kind == b.kind
                    && data_id_matches(a.kind, a.data_id, b.data_id, lookup)
            }
            (ActorIdentifier::Special(a), ActorIdentifier::Special(b)) => a == b,
            (ActorIdentifier::Npc(a), ActorIdentifier::Npc(b)) => {
                a.kind == b.kind
                    && data_id_matches(a.kind, a.data_id, b.data_id, lookup)
                    && (a.index.is_any() || b.index.is_any() || a.index == b.index)
            }
            (ActorIdentifier::Unknown(a), ActorIdentifier::Unknown(b)) => {
                a.name == b.name && a.index == b.index
            }
            _ => false,
        }
    }

    /// Lookup-aware rendering for user-facing text
    ///
    /// Falls back to the same numeric rendering as `Display` for ids the
    /// tables cannot resolve yet.
    pub fn to_name(&self, lookup: &dyn NameLookup) -> String {
        match self {
            ActorIdentifier::Player(p) => match lookup.world_name(p.world) {
                Some(world) => format!("{} ({world})", p.name),
                None => self.to_string(),
            },
            ActorIdentifier::Owned(o) => match lookup.name(o.kind, o.data_id) {
                Some(name) => format!("{}'s {name}", o.owner.name),
                None => self.to_string(),
            },
            ActorIdentifier::Npc(n) => match lookup.name(n.kind, n.data_id) {
                Some(name) if n.index.is_any() => name.to_string(),
                Some(name) => format!("{name} at {}", n.index.0),
                None => self.to_string(),
            },
            _ => self.to_string(),
        }
    }
}

impl<'a> PlayerIdent<'a> {
    fn make_permanent(self) -> PlayerIdent<'static> {
        PlayerIdent {
            name: self.name.into_permanent(),
            world: self.world,
        }
    }
}

/// Catalog-id comparison shared by the Owned and Npc variants
///
/// The display-name fallback tolerates catalog drift between game versions:
/// two raw ids that denote the same entry compare equal. Inherited quirk: a
/// name table with duplicate display names makes distinct ids compare equal
/// as well.
fn data_id_matches(
    kind: NpcKind,
    a: DataId,
    b: DataId,
    lookup: Option<&dyn NameLookup>,
) -> bool {
    if a == b || a.is_any() || b.is_any() {
        return true;
    }
    let Some(lookup) = lookup else {
        return false;
    };
    match (lookup.name(kind, a), lookup.name(kind, b)) {
        (Some(x), Some(y)) => eq_ignore_case(x, y),
        _ => false,
    }
}

impl<'a, 'b> PartialEq<ActorIdentifier<'b>> for ActorIdentifier<'a> {
    fn eq(&self, other: &ActorIdentifier<'b>) -> bool {
        self.matches(other, None)
    }
}

impl Eq for ActorIdentifier<'_> {}

impl Hash for ActorIdentifier<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant(self).hash(state);
        match self {
            ActorIdentifier::Invalid => {}
            ActorIdentifier::Player(p) => {
                p.name.hash(state);
                p.world.hash(state);
            }
            // kind is wildcard-absorbing, names alone decide
            ActorIdentifier::Retainer(r) => r.name.hash(state),
            // the data id admits the any-sentinel and the name fallback
            ActorIdentifier::Owned(o) => {
                o.owner.name.hash(state);
                o.owner.world.hash(state);
                o.kind.hash(state);
            }
            ActorIdentifier::Special(s) => s.hash(state),
            // both data id and index admit wildcards
            ActorIdentifier::Npc(n) => n.kind.hash(state),
            ActorIdentifier::Unknown(u) => {
                u.name.hash(state);
                u.index.hash(state);
            }
        }
    }
}

impl fmt::Display for ActorIdentifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorIdentifier::Invalid => f.write_str("Invalid"),
            ActorIdentifier::Player(p) if p.world.is_any() => write!(f, "{}", p.name),
            ActorIdentifier::Player(p) => write!(f, "{} ({})", p.name, p.world),
            ActorIdentifier::Retainer(r) => write!(f, "{} ({})", r.name, r.kind),
            ActorIdentifier::Owned(o) => {
                write!(f, "{}'s {} {}", o.owner.name, o.kind, o.data_id)
            }
            ActorIdentifier::Special(s) => write!(f, "{s}"),
            ActorIdentifier::Npc(n) if n.index.is_any() => {
                write!(f, "{} {}", n.kind, n.data_id)
            }
            ActorIdentifier::Npc(n) => {
                write!(f, "{} {} at {}", n.kind, n.data_id, n.index.0)
            }
            ActorIdentifier::Unknown(u) if u.name.is_empty() => {
                write!(f, "Unknown ({})", u.index)
            }
            ActorIdentifier::Unknown(u) => write!(f, "{} ({})", u.name, u.index),
        }
    }
}

impl<'a> From<PlayerIdent<'a>> for ActorIdentifier<'a> {
    fn from(ident: PlayerIdent<'a>) -> Self {
        ActorIdentifier::Player(ident)
    }
}

impl From<NpcIdent> for ActorIdentifier<'static> {
    fn from(ident: NpcIdent) -> Self {
        ActorIdentifier::Npc(ident)
    }
}

impl From<SpecialSlot> for ActorIdentifier<'static> {
    fn from(slot: SpecialSlot) -> Self {
        ActorIdentifier::Special(slot)
    }
}
