//! Ident Inspector Demo
//!
//! Seeds a synthetic object table and name tables, resolves every live
//! handle to its identity, and parses a few user strings. Shows how display
//! rendering degrades before the name tables are ready and how ambiguous
//! names produce several identifiers.

use playbill_ident::synthetic::{SyntheticEntity, SyntheticTable};
use playbill_ident::{
    DataId, EntityKind, EntityResolver, IdentifierFactory, MemoryNameLookup, NpcKind,
    ResolveOptions, UserStringParser, WorldId,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Playbill Ident Inspector ===\n");

    // Name tables, as the host's static-data loader would build them.
    // Two mounts deliberately share a display name.
    let mut lookup = MemoryNameLookup::new();
    lookup.insert_world(WorldId(23), "Cerberus");
    lookup.insert_world(WorldId(56), "Phoenix");
    lookup.insert(NpcKind::Mount, DataId(12), "Chocobo");
    lookup.insert(NpcKind::Mount, DataId(34), "Chocobo");
    lookup.insert(NpcKind::Companion, DataId(78), "Wind-up Tonberry");
    lookup.insert(NpcKind::BattleNpc, DataId(555), "Carbuncle");

    // A small live scene: a player riding a mount, a second player with a
    // minion, a battle pet, and a cutscene duplicate of the first player.
    let mut table = SyntheticTable::new();
    table.insert(
        SyntheticEntity::player(0, "Jane Doe", WorldId(23))
            .with_entity_id(0x1001)
            .with_mount(12),
    );
    table.insert(SyntheticEntity::new(1, EntityKind::Mount));
    table.insert(SyntheticEntity::player(2, "John Smith", WorldId(56)).with_entity_id(0x1002));
    table.insert(SyntheticEntity::new(3, EntityKind::Companion).with_base_id(78));
    table.insert(
        SyntheticEntity::new(4, EntityKind::BattleNpc)
            .with_name("Carbuncle")
            .with_name_id(555)
            .with_owner(0x1002),
    );
    table.insert(SyntheticEntity::player(201, "Jane Doe", WorldId(23)));
    table.link_cutscene(201, 0);

    let factory = IdentifierFactory::new(&lookup);
    let resolver = EntityResolver::new(&table, factory);
    let options = ResolveOptions {
        validate: true,
        ..Default::default()
    };

    println!("Resolved identities:");
    for handle in table.iter() {
        let resolution = resolver.resolve(handle, options);
        let owner = resolution
            .owner
            .map(|o| format!(" (owner at {})", o.index))
            .unwrap_or_default();
        println!(
            "  slot {:>3}: {}{owner}",
            handle.index.0,
            resolution.identifier.to_name(&lookup),
        );
    }

    // The same identity renders without tables, just less prettily.
    let detached = IdentifierFactory::detached();
    let raw_resolver = EntityResolver::new(&table, detached);
    let handle = table.iter().next().unwrap();
    let identifier = raw_resolver
        .resolve(handle, ResolveOptions::default())
        .identifier;
    println!("\nBefore the tables are ready: {identifier}");
    println!("After they arrive:           {}", identifier.to_name(&lookup));

    println!("\nParsed user strings:");
    let parser = UserStringParser::new(&factory);
    for input in [
        "p|Jane Doe@Cerberus",
        "n|mount:Chocobo",
        "o|mount:Chocobo|Jane Doe",
        "r|Pemberton",
        "p|Jane Doe@Gilgamesh",
    ] {
        match parser.parse(input) {
            Ok(identifiers) => {
                for identifier in &identifiers {
                    println!("  {input:<28} -> {}", identifier.to_name(&lookup));
                }
            }
            Err(err) => println!("  {input:<28} -> error: {err}"),
        }
    }
}
