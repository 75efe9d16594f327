//! The user-string grammar
//!
//! `type '|' value` or `type '|' value '|' value2`, where `type` selects the
//! identifier variant. A single string can denote several catalog entries
//! when a display name is ambiguous, so parsing returns every match in
//! catalog order.
//!
//! ```text
//! p|Jane Doe@Cerberus
//! r|Pemberton
//! n|mount:Chocobo
//! o|mount:Chocobo|Jane Doe
//! ```

use crate::error::ParseError;
use crate::factory::IdentifierFactory;
use crate::ids::{DataId, NpcKind, ObjectIndex, RetainerKind, WorldId};
use crate::identifier::ActorIdentifier;
use crate::lookup::NameLookup;
use crate::name::{eq_ignore_case, EntityName};

/// Parses user strings into actor identifiers
pub struct UserStringParser<'f, 'a> {
    factory: &'f IdentifierFactory<'a>,
    allow_index: bool,
}

impl<'f, 'a> UserStringParser<'f, 'a> {
    pub fn new(factory: &'f IdentifierFactory<'a>) -> Self {
        Self {
            factory,
            allow_index: false,
        }
    }

    /// Permit the `@index` suffix on NPC values
    pub fn allow_index(mut self, allow: bool) -> Self {
        self.allow_index = allow;
        self
    }

    /// Parse one user string into every identifier it denotes
    pub fn parse(&self, input: &str) -> Result<Vec<ActorIdentifier<'static>>, ParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::Empty);
        }
        let segments: Vec<&str> = input.split('|').map(str::trim).collect();
        let tag = segments[0].to_ascii_lowercase();
        match tag.as_str() {
            "p" | "player" => {
                expect_segments("player", &segments, 1)?;
                let (name, world) = self.parse_player_value(segments[1])?;
                Ok(vec![self.factory.create_player(name, world)])
            }
            "r" | "retainer" => {
                expect_segments("retainer", &segments, 1)?;
                let name = EntityName::owned(segments[1]);
                let ident = self.factory.create_retainer(name, RetainerKind::Both);
                if ident.is_valid() {
                    Ok(vec![ident])
                } else {
                    Err(ParseError::InvalidRetainerName(segments[1].to_string()))
                }
            }
            "n" | "npc" => {
                expect_segments("npc", &segments, 1)?;
                let (kind, ids, index) = self.parse_npc_value(segments[1], self.allow_index)?;
                ids.into_iter()
                    .map(|id| {
                        let ident = self.factory.create_npc(kind, id, index);
                        if ident.is_valid() {
                            Ok(ident)
                        } else {
                            Err(ParseError::InvalidIndex(format!("{}", index.0)))
                        }
                    })
                    .collect()
            }
            "o" | "owned" => {
                expect_segments("owned", &segments, 2)?;
                let (kind, ids, _) = self.parse_npc_value(segments[1], false)?;
                let (name, world) = self.parse_player_value(segments[2])?;
                Ok(ids
                    .into_iter()
                    .map(|id| {
                        self.factory
                            .create_owned(name.clone(), world, kind, id)
                    })
                    .collect())
            }
            _ => Err(ParseError::UnknownType(segments[0].to_string())),
        }
    }

    fn lookup(&self) -> Result<&'a dyn NameLookup, ParseError> {
        self.factory.lookup().ok_or(ParseError::TablesNotReady)
    }

    /// `name['@'world]`, a missing world or the literal "Any World" is the
    /// wildcard
    fn parse_player_value(
        &self,
        value: &str,
    ) -> Result<(EntityName<'static>, WorldId), ParseError> {
        let (name, world) = match value.split_once('@') {
            Some((name, world)) => {
                let world = world.trim();
                let id = if eq_ignore_case(world, WorldId::ANY_NAME) {
                    WorldId::ANY
                } else {
                    self.lookup()?
                        .world_id(world)
                        .ok_or_else(|| ParseError::UnknownWorld(world.to_string()))?
                };
                (name.trim(), id)
            }
            None => (value, WorldId::ANY),
        };
        if !self
            .factory
            .create_player(EntityName::borrowed(name), world)
            .is_valid()
        {
            return Err(ParseError::InvalidPlayerName(name.to_string()));
        }
        Ok((EntityName::owned(name), world))
    }

    /// `category ':' name['@'index]`, resolving the name to every matching
    /// catalog id
    fn parse_npc_value(
        &self,
        value: &str,
        allow_index: bool,
    ) -> Result<(NpcKind, Vec<DataId>, ObjectIndex), ParseError> {
        let (category, rest) = value
            .split_once(':')
            .ok_or_else(|| ParseError::UnknownCategory(value.to_string()))?;
        let kind = parse_category(category.trim())?;

        let (name, index) = match rest.split_once('@') {
            Some((name, index)) => {
                if !allow_index {
                    return Err(ParseError::IndexNotAllowed);
                }
                (name.trim(), parse_index(index.trim())?)
            }
            None => (rest.trim(), ObjectIndex::ANY),
        };

        let ids = self.lookup()?.ids_by_name(kind, name);
        if ids.is_empty() {
            return Err(ParseError::UnknownName {
                kind,
                name: name.to_string(),
            });
        }
        Ok((kind, ids, index))
    }
}

fn expect_segments(
    tag: &'static str,
    segments: &[&str],
    expected: usize,
) -> Result<(), ParseError> {
    if segments.len() - 1 == expected {
        Ok(())
    } else {
        Err(ParseError::SegmentCount {
            tag,
            expected,
            got: segments.len() - 1,
        })
    }
}

fn parse_category(category: &str) -> Result<NpcKind, ParseError> {
    match category.to_ascii_lowercase().as_str() {
        "m" | "mount" => Ok(NpcKind::Mount),
        "c" | "companion" | "minion" => Ok(NpcKind::Companion),
        "a" | "accessory" | "ornament" => Ok(NpcKind::Ornament),
        "e" | "enpc" | "eventnpc" => Ok(NpcKind::EventNpc),
        "b" | "bnpc" | "battlenpc" => Ok(NpcKind::BattleNpc),
        _ => Err(ParseError::UnknownCategory(category.to_string())),
    }
}

fn parse_index(index: &str) -> Result<ObjectIndex, ParseError> {
    let value: u16 = index
        .parse()
        .map_err(|_| ParseError::InvalidIndex(index.to_string()))?;
    if value < ObjectIndex::TOTAL_COUNT {
        Ok(ObjectIndex(value))
    } else {
        Err(ParseError::InvalidIndex(index.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::ActorIdentifier;
    use crate::lookup::MemoryNameLookup;

    fn lookup() -> MemoryNameLookup {
        let mut lookup = MemoryNameLookup::new();
        lookup.insert_world(WorldId(23), "Cerberus");
        lookup.insert(NpcKind::Mount, DataId(12), "Chocobo");
        lookup.insert(NpcKind::Mount, DataId(34), "Chocobo");
        lookup.insert(NpcKind::Mount, DataId(56), "Ahriman");
        lookup.insert(NpcKind::Companion, DataId(78), "Wind-up Tonberry");
        lookup
    }

    fn parse(input: &str) -> Result<Vec<ActorIdentifier<'static>>, ParseError> {
        parse_with(input, false)
    }

    fn parse_with(
        input: &str,
        allow_index: bool,
    ) -> Result<Vec<ActorIdentifier<'static>>, ParseError> {
        let lookup = lookup();
        let factory = IdentifierFactory::new(&lookup);
        UserStringParser::new(&factory)
            .allow_index(allow_index)
            .parse(input)
            .map(|ids| ids.into_iter().map(ActorIdentifier::make_permanent).collect())
    }

    #[test]
    fn test_parse_player() {
        let ids = parse("p|Jane Doe@Cerberus").unwrap();
        assert_eq!(ids.len(), 1);
        match &ids[0] {
            ActorIdentifier::Player(p) => {
                assert_eq!(p.name.as_str(), "Jane Doe");
                assert_eq!(p.world, WorldId(23));
            }
            other => panic!("expected a player, got {other}"),
        }

        // missing world is the wildcard, long tag works
        let ids = parse("Player|Jane Doe").unwrap();
        match &ids[0] {
            ActorIdentifier::Player(p) => assert!(p.world.is_any()),
            other => panic!("expected a player, got {other}"),
        }
    }

    #[test]
    fn test_parse_retainer() {
        let ids = parse("r|Pemberton").unwrap();
        match &ids[0] {
            ActorIdentifier::Retainer(r) => {
                assert_eq!(r.name.as_str(), "Pemberton");
                assert_eq!(r.kind, RetainerKind::Both);
            }
            other => panic!("expected a retainer, got {other}"),
        }
    }

    #[test]
    fn test_parse_npc_multiplicity() {
        let ids = parse("n|mount:Chocobo").unwrap();
        assert_eq!(ids.len(), 2);
        match (&ids[0], &ids[1]) {
            (ActorIdentifier::Npc(a), ActorIdentifier::Npc(b)) => {
                // catalog order preserved
                assert_eq!(a.data_id, DataId(12));
                assert_eq!(b.data_id, DataId(34));
                assert!(a.index.is_any());
            }
            other => panic!("expected two npcs, got {other:?}"),
        }

        let ids = parse("n|m:Ahriman").unwrap();
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn test_parse_owned_multiplicity() {
        let ids = parse("o|mount:Chocobo|Jane Doe@Cerberus").unwrap();
        assert_eq!(ids.len(), 2);
        for ident in &ids {
            match ident {
                ActorIdentifier::Owned(o) => {
                    assert_eq!(o.owner.name.as_str(), "Jane Doe");
                    assert_eq!(o.kind, NpcKind::Mount);
                }
                other => panic!("expected an owned identity, got {other}"),
            }
        }
    }

    #[test]
    fn test_parse_any_world_suffix() {
        // spelling the wildcard world out is the same as omitting it
        let ids = parse("o|mount:Chocobo|Jane Doe@Any World").unwrap();
        assert_eq!(ids.len(), 2);
        for ident in &ids {
            match ident {
                ActorIdentifier::Owned(o) => assert!(o.owner.world.is_any()),
                other => panic!("expected an owned identity, got {other}"),
            }
        }

        let ids = parse("p|Jane Doe@any world").unwrap();
        match &ids[0] {
            ActorIdentifier::Player(p) => assert!(p.world.is_any()),
            other => panic!("expected a player, got {other}"),
        }
    }

    #[test]
    fn test_parse_index_flag() {
        assert_eq!(
            parse("n|mount:Ahriman@4"),
            Err(ParseError::IndexNotAllowed)
        );

        let ids = parse_with("n|mount:Ahriman@4", true).unwrap();
        match &ids[0] {
            ActorIdentifier::Npc(n) => assert_eq!(n.index, ObjectIndex(4)),
            other => panic!("expected an npc, got {other}"),
        }

        assert_eq!(
            parse_with("n|mount:Ahriman@900", true),
            Err(ParseError::InvalidIndex("900".to_string()))
        );
        assert_eq!(
            parse_with("n|mount:Ahriman@-3", true),
            Err(ParseError::InvalidIndex("-3".to_string()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(
            parse("x|Jane Doe"),
            Err(ParseError::UnknownType("x".to_string()))
        );
        assert_eq!(
            parse("p|Jane Doe|extra"),
            Err(ParseError::SegmentCount {
                tag: "player",
                expected: 1,
                got: 2
            })
        );
        assert_eq!(
            parse("p|Jane Doe@Chaos"),
            Err(ParseError::UnknownWorld("Chaos".to_string()))
        );
        assert_eq!(
            parse("p|jane doe"),
            Err(ParseError::InvalidPlayerName("jane doe".to_string()))
        );
        assert_eq!(
            parse("n|chair:Chocobo"),
            Err(ParseError::UnknownCategory("chair".to_string()))
        );
        assert_eq!(
            parse("n|mount:Moogle"),
            Err(ParseError::UnknownName {
                kind: NpcKind::Mount,
                name: "Moogle".to_string()
            })
        );
        assert_eq!(
            parse("n|Chocobo"),
            Err(ParseError::UnknownCategory("Chocobo".to_string()))
        );
    }

    #[test]
    fn test_parse_without_tables() {
        let factory = IdentifierFactory::detached();
        let parser = UserStringParser::new(&factory);
        assert_eq!(
            parser.parse("n|mount:Chocobo"),
            Err(ParseError::TablesNotReady)
        );
        // player strings without a world never need the tables
        assert!(parser.parse("p|Jane Doe").is_ok());
    }
}
