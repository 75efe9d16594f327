//! Serialized form of an actor identifier
//!
//! The boundary format is a keyed record with a `Type` discriminator and
//! variant-specific fields. Missing fields default to the variant's
//! wildcard values so that records written by older versions keep loading;
//! only an unrecognized `Type` falls through to `Invalid`.

use crate::identifier::{
    ActorIdentifier, NpcIdent, OwnedIdent, PlayerIdent, RetainerIdent, UnknownIdent,
};
use crate::ids::{DataId, NpcKind, ObjectIndex, RetainerKind, SpecialSlot, WorldId};
use crate::name::EntityName;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Flat serialized form of an [`ActorIdentifier`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierRecord {
    #[serde(rename = "Type")]
    pub variant: String,
    #[serde(rename = "PlayerName", default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(rename = "HomeWorld", default = "any_world")]
    pub home_world: WorldId,
    #[serde(rename = "Retainer", default)]
    pub retainer: RetainerKind,
    #[serde(rename = "Kind", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NpcKind>,
    #[serde(rename = "DataId", default = "any_data_id")]
    pub data_id: DataId,
    #[serde(rename = "Index", default = "any_index")]
    pub index: ObjectIndex,
    #[serde(rename = "Special", default, skip_serializing_if = "Option::is_none")]
    pub special: Option<SpecialSlot>,
}

fn any_world() -> WorldId {
    WorldId::ANY
}

fn any_data_id() -> DataId {
    DataId::ANY
}

fn any_index() -> ObjectIndex {
    ObjectIndex::ANY
}

impl IdentifierRecord {
    fn empty(variant: &ActorIdentifier) -> Self {
        Self {
            variant: variant.variant_name().to_string(),
            player_name: None,
            home_world: WorldId::ANY,
            retainer: RetainerKind::Both,
            kind: None,
            data_id: DataId::ANY,
            index: ObjectIndex::ANY,
            special: None,
        }
    }

    /// Build the record for an identifier
    pub fn from_identifier(ident: &ActorIdentifier) -> Self {
        let mut record = Self::empty(ident);
        match ident {
            ActorIdentifier::Invalid => {}
            ActorIdentifier::Player(p) => {
                record.player_name = Some(p.name.as_str().to_string());
                record.home_world = p.world;
            }
            ActorIdentifier::Retainer(r) => {
                record.player_name = Some(r.name.as_str().to_string());
                record.retainer = r.kind;
            }
            ActorIdentifier::Owned(o) => {
                record.player_name = Some(o.owner.name.as_str().to_string());
                record.home_world = o.owner.world;
                record.kind = Some(o.kind);
                record.data_id = o.data_id;
            }
            ActorIdentifier::Special(s) => record.special = Some(*s),
            ActorIdentifier::Npc(n) => {
                record.kind = Some(n.kind);
                record.data_id = n.data_id;
                record.index = n.index;
            }
            ActorIdentifier::Unknown(u) => {
                record.player_name = Some(u.name.as_str().to_string());
                record.index = u.index;
            }
        }
        record
    }

    /// Rebuild the identifier this record denotes
    ///
    /// Fields are taken as stored without table validation; hosts that need
    /// a validated value re-check through the factory. A record whose
    /// `Type` is unrecognized, or that lacks a field the variant cannot
    /// default, becomes `Invalid`.
    pub fn into_identifier(self) -> ActorIdentifier<'static> {
        let name = EntityName::owned(self.player_name.unwrap_or_default());
        match self.variant.as_str() {
            "Player" => ActorIdentifier::Player(PlayerIdent {
                name,
                world: self.home_world,
            }),
            "Retainer" => ActorIdentifier::Retainer(RetainerIdent {
                name,
                kind: self.retainer,
            }),
            "Owned" => match self.kind {
                Some(kind) => ActorIdentifier::Owned(OwnedIdent {
                    owner: PlayerIdent {
                        name,
                        world: self.home_world,
                    },
                    kind,
                    data_id: self.data_id,
                }),
                None => ActorIdentifier::Invalid,
            },
            "Special" => match self.special {
                Some(slot) => ActorIdentifier::Special(slot),
                None => ActorIdentifier::Invalid,
            },
            "Npc" => match self.kind {
                Some(kind) => ActorIdentifier::Npc(NpcIdent {
                    kind,
                    data_id: self.data_id,
                    index: self.index,
                }),
                None => ActorIdentifier::Invalid,
            },
            "Unknown" => ActorIdentifier::Unknown(UnknownIdent {
                name,
                index: self.index,
            }),
            _ => ActorIdentifier::Invalid,
        }
    }
}

impl Serialize for ActorIdentifier<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        IdentifierRecord::from_identifier(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ActorIdentifier<'static> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(IdentifierRecord::deserialize(deserializer)?.into_identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(ident: &ActorIdentifier) -> ActorIdentifier<'static> {
        let text = ron::to_string(ident).unwrap();
        ron::from_str(&text).unwrap()
    }

    #[test]
    fn test_round_trip_all_variants() {
        let idents = [
            ActorIdentifier::Invalid,
            ActorIdentifier::Player(PlayerIdent {
                name: EntityName::owned("Jane Doe"),
                world: WorldId(23),
            }),
            ActorIdentifier::Retainer(RetainerIdent {
                name: EntityName::owned("Pemberton"),
                kind: RetainerKind::Mannequin,
            }),
            ActorIdentifier::Owned(OwnedIdent {
                owner: PlayerIdent {
                    name: EntityName::owned("Jane Doe"),
                    world: WorldId::ANY,
                },
                kind: NpcKind::Mount,
                data_id: DataId(12),
            }),
            ActorIdentifier::Special(SpecialSlot::FittingRoom),
            ActorIdentifier::Npc(NpcIdent {
                kind: NpcKind::BattleNpc,
                data_id: DataId(913),
                index: ObjectIndex(40),
            }),
            ActorIdentifier::Unknown(UnknownIdent {
                name: EntityName::owned("Door"),
                index: ObjectIndex(300),
            }),
        ];
        for ident in &idents {
            assert_eq!(&round_trip(ident), ident, "round trip changed {ident}");
        }
    }

    #[test]
    fn test_unknown_type_becomes_invalid() {
        let ident: ActorIdentifier =
            ron::from_str(r#"(Type: "Chair", Index: 300)"#).unwrap();
        assert_eq!(ident, ActorIdentifier::Invalid);
    }

    #[test]
    fn test_missing_fields_default_to_wildcards() {
        let ident: ActorIdentifier =
            ron::from_str(r#"(Type: "Player", PlayerName: Some("Jane Doe"))"#).unwrap();
        match ident {
            ActorIdentifier::Player(p) => assert!(p.world.is_any()),
            other => panic!("expected a player, got {other}"),
        }

        let ident: ActorIdentifier =
            ron::from_str(r#"(Type: "Npc", Kind: Some(BattleNpc))"#).unwrap();
        match ident {
            ActorIdentifier::Npc(n) => {
                assert!(n.data_id.is_any());
                assert!(n.index.is_any());
            }
            other => panic!("expected an npc, got {other}"),
        }
    }

    #[test]
    fn test_npc_without_category_is_invalid() {
        let ident: ActorIdentifier = ron::from_str(r#"(Type: "Npc")"#).unwrap();
        assert_eq!(ident, ActorIdentifier::Invalid);
    }
}
