//! End-to-end resolution over a synthetic object table

use playbill_ident::synthetic::{SyntheticEntity, SyntheticTable};
use playbill_ident::{
    ActorIdentifier, DataId, EntityKind, EntityResolver, IdentifierFactory, MemoryNameLookup,
    NpcKind, ObjectIndex, ObjectTable, ResolveOptions, UserStringParser, WorldId,
};

fn name_tables() -> MemoryNameLookup {
    let mut lookup = MemoryNameLookup::new();
    lookup.insert_world(WorldId(23), "Cerberus");
    lookup.insert(NpcKind::Companion, DataId(78), "Wind-up Tonberry");
    lookup
}

/// The companion at slot 5 belongs to slot 4, which is itself a cutscene
/// alias of slot 40 where the real named player sits. Resolution must carry
/// slot 40's name and world, not slot 4's raw fields.
#[test]
fn companion_owner_follows_cutscene_redirection() {
    let mut table = SyntheticTable::new();
    table.insert(SyntheticEntity::new(5, EntityKind::Companion).with_base_id(78));
    table.insert(SyntheticEntity::player(4, "Cs Duplicate", WorldId(99)));
    table.insert(SyntheticEntity::player(40, "Jane Doe", WorldId(23)));
    table.link_cutscene(4, 40);

    let lookup = name_tables();
    let factory = IdentifierFactory::new(&lookup);
    let resolver = EntityResolver::new(&table, factory);

    let handle = table.by_index(ObjectIndex(5)).unwrap();
    let resolution = resolver.resolve(
        handle,
        ResolveOptions {
            validate: true,
            ..Default::default()
        },
    );

    match &resolution.identifier {
        ActorIdentifier::Owned(o) => {
            assert_eq!(o.owner.name.as_str(), "Jane Doe");
            assert_eq!(o.owner.world, WorldId(23));
            assert_eq!(o.kind, NpcKind::Companion);
            assert_eq!(o.data_id, DataId(78));
        }
        other => panic!("expected an owned identity, got {other}"),
    }
    assert_eq!(resolution.owner.unwrap().index, ObjectIndex(40));
}

/// A resolved identity, made permanent, survives the serialization boundary
/// and still matches what a user string parses to.
#[test]
fn resolved_identity_round_trips_and_matches_parsed() {
    let mut table = SyntheticTable::new();
    table.insert(SyntheticEntity::new(5, EntityKind::Companion).with_base_id(78));
    table.insert(SyntheticEntity::player(4, "Jane Doe", WorldId(23)));

    let lookup = name_tables();
    let factory = IdentifierFactory::new(&lookup);
    let resolver = EntityResolver::new(&table, factory);

    let handle = table.by_index(ObjectIndex(5)).unwrap();
    let resolved = resolver
        .resolve(
            handle,
            ResolveOptions {
                validate: true,
                ..Default::default()
            },
        )
        .identifier
        .make_permanent();

    let text = ron::to_string(&resolved).unwrap();
    let reloaded: ActorIdentifier = ron::from_str(&text).unwrap();
    assert_eq!(reloaded, resolved);

    let parsed = UserStringParser::new(&factory)
        .parse("o|companion:Wind-up Tonberry|Jane Doe@Cerberus")
        .unwrap();
    assert_eq!(parsed.len(), 1);
    assert!(parsed[0].matches(&resolved, Some(&lookup)));
}

/// Without the tables ready, resolution still produces a usable identity
/// and display strings fall back to numeric rendering.
#[test]
fn resolution_degrades_without_tables() {
    let mut table = SyntheticTable::new();
    table.insert(SyntheticEntity::new(5, EntityKind::Companion).with_base_id(78));
    table.insert(SyntheticEntity::player(4, "Jane Doe", WorldId(23)));

    let factory = IdentifierFactory::detached();
    let resolver = EntityResolver::new(&table, factory);

    let handle = table.by_index(ObjectIndex(5)).unwrap();
    let identifier = resolver
        .resolve(handle, ResolveOptions::default())
        .identifier;
    assert!(identifier.is_valid());
    assert_eq!(identifier.to_string(), "Jane Doe's Companion #78");

    // once tables arrive, the same value renders with names
    let lookup = name_tables();
    assert_eq!(identifier.to_name(&lookup), "Jane Doe's Wind-up Tonberry");
}
