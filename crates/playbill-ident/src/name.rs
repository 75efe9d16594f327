//! Entity display names and the character-level name grammar
//!
//! Names read from a live handle alias client memory that is only stable for
//! the current update tick, so [`EntityName`] keeps the borrowed/owned
//! distinction explicit and offers [`EntityName::into_permanent`] to promote
//! a borrowed view before it is retained anywhere.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A display name, borrowed from a live handle or owned
///
/// Comparison and hashing are case-insensitive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityName<'a>(Cow<'a, str>);

impl<'a> EntityName<'a> {
    /// Wrap a name borrowed from a live handle
    pub fn borrowed(name: &'a str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create an owned name
    pub fn owned(name: impl Into<String>) -> EntityName<'static> {
        EntityName(Cow::Owned(name.into()))
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the name is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Promote to an owned name that may outlive the handle it came from
    ///
    /// A no-op for names that are already owned.
    pub fn into_permanent(self) -> EntityName<'static> {
        EntityName(Cow::Owned(self.0.into_owned()))
    }
}

impl fmt::Display for EntityName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'a, 'b> PartialEq<EntityName<'b>> for EntityName<'a> {
    fn eq(&self, other: &EntityName<'b>) -> bool {
        eq_ignore_case(&self.0, &other.0)
    }
}

impl Eq for EntityName<'_> {}

impl Hash for EntityName<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.0.chars().flat_map(char::to_lowercase) {
            state.write_u32(c as u32);
        }
    }
}

impl<'a> From<&'a str> for EntityName<'a> {
    fn from(name: &'a str) -> Self {
        Self::borrowed(name)
    }
}

impl From<String> for EntityName<'static> {
    fn from(name: String) -> Self {
        EntityName(Cow::Owned(name))
    }
}

/// Case-insensitive string comparison without allocating
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Maximum byte length of a player name, two parts plus the space
const PLAYER_NAME_MAX: usize = 21;
/// Per-part length bounds for player names
const PLAYER_PART_MIN: usize = 2;
const PLAYER_PART_MAX: usize = 15;
/// Length bounds for retainer names
const RETAINER_MIN: usize = 3;
const RETAINER_MAX: usize = 20;

/// Check one name part against the shared character grammar:
/// an uppercase first letter, then lowercase letters, apostrophes, and
/// hyphens; an uppercase letter may also follow an apostrophe or hyphen.
/// Hyphens may not repeat, may not touch an apostrophe, and may not end
/// the part.
fn verify_name_part(part: &str, min: usize, max: usize) -> bool {
    if part.len() < min || part.len() > max {
        return false;
    }
    let mut chars = part.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_uppercase() {
        return false;
    }
    let mut prev = first;
    for c in chars {
        match c {
            'a'..='z' => {}
            'A'..='Z' if prev == '\'' || prev == '-' => {}
            '\'' if prev != '-' => {}
            '-' if prev != '-' && prev != '\'' => {}
            _ => return false,
        }
        prev = c;
    }
    prev != '-'
}

/// Check a player name: two grammar-conforming parts joined by one space
pub fn verify_player_name(name: &str) -> bool {
    if name.len() > PLAYER_NAME_MAX {
        return false;
    }
    let mut parts = name.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(last), None) => {
            verify_name_part(first, PLAYER_PART_MIN, PLAYER_PART_MAX)
                && verify_name_part(last, PLAYER_PART_MIN, PLAYER_PART_MAX)
        }
        _ => false,
    }
}

/// Check a retainer name: a single grammar-conforming part
pub fn verify_retainer_name(name: &str) -> bool {
    verify_name_part(name, RETAINER_MIN, RETAINER_MAX)
}
