//! Playbill Ident - stable identities for volatile game-client entities
//!
//! A live entity is only addressable by a transient runtime handle that can
//! be reused or invalidated every frame. This crate derives a stable,
//! comparable, serializable [`ActorIdentifier`] for such entities so hosts
//! can persist per-character configuration, match entities across save/load
//! boundaries, and let users type references to entities that are not
//! currently in the world.
//!
//! The pieces:
//! - [`ActorIdentifier`] - the tagged identity value with variant-specific
//!   equality, hashing, and rendering
//! - [`IdentifierFactory`] - the single validated construction gate
//! - [`UserStringParser`] - the `type|value` grammar for typed references
//! - [`EntityResolver`] - derives an identity from a live handle, chasing
//!   ownership and cutscene redirections
//! - [`NameLookup`], [`EntityHandle`], [`ObjectTable`] - the narrow
//!   capabilities the host supplies
//!
//! The core is synchronous and lock-free; it is meant to run inside the
//! client's per-frame update callback. Name tables may still be loading
//! when it runs, so every table-backed operation degrades to raw-field
//! behavior instead of blocking or failing.

mod error;
mod factory;
mod handle;
mod identifier;
mod ids;
mod lookup;
mod name;
mod parse;
mod record;
mod resolve;
pub mod synthetic;

pub use error::ParseError;
pub use factory::IdentifierFactory;
pub use handle::{EntityHandle, ObjectTable};
pub use identifier::{
    ActorIdentifier, NpcIdent, OwnedIdent, PlayerIdent, RetainerIdent, UnknownIdent,
};
pub use ids::{
    DataId, EntityId, EntityKind, NpcKind, ObjectIndex, RetainerKind, SpecialSlot, WorldId,
};
pub use lookup::{MemoryNameLookup, NameLookup};
pub use name::{verify_player_name, verify_retainer_name, EntityName};
pub use parse::UserStringParser;
pub use record::IdentifierRecord;
pub use resolve::{EntityResolver, Resolution, ResolveOptions};
