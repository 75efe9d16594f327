//! Error type for the user-string grammar
//!
//! Everywhere else in the core, failure is the silent
//! [`ActorIdentifier::Invalid`](crate::ActorIdentifier::Invalid) sentinel.
//! Parsing is the one surface whose caller is a text field that needs a
//! reason to show, so it reports through a real error.

use crate::ids::NpcKind;
use thiserror::Error;

/// Why a user string did not parse to any identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("the string is empty")]
    Empty,

    #[error("{0:?} is not an identifier type; use p[layer], r[etainer], n[pc], or o[wned]")]
    UnknownType(String),

    #[error("{tag:?} takes {expected} part(s) after the type, got {got}")]
    SegmentCount {
        tag: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("the name tables are not ready yet")]
    TablesNotReady,

    #[error("{0:?} is not a valid player name")]
    InvalidPlayerName(String),

    #[error("{0:?} is not a valid retainer name")]
    InvalidRetainerName(String),

    #[error("no world named {0:?}")]
    UnknownWorld(String),

    #[error("{0:?} is not an NPC category; use m[ount], c[ompanion], a[ccessory], e[npc], or b[npc]")]
    UnknownCategory(String),

    #[error("no {kind} named {name:?}")]
    UnknownName { kind: NpcKind, name: String },

    #[error("object indices are not enabled")]
    IndexNotAllowed,

    #[error("{0:?} is not a usable object index")]
    InvalidIndex(String),
}
