//! Ordered declaration tree
//!
//! Serialized as a mapping from declaration name to declaration, in the
//! order declarations appear in the header.

use super::decl::Declaration;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Declarations of one scope, keyed by name, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationTree {
    entries: Vec<Declaration>,
}

impl DeclarationTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration under its name
    ///
    /// A name that already exists is replaced in place, except that a
    /// reopened namespace is merged into the existing one and a forward
    /// declaration never replaces a definition.
    pub fn insert(&mut self, decl: Declaration) {
        let Some(index) = self.entries.iter().position(|d| d.name() == decl.name()) else {
            self.entries.push(decl);
            return;
        };

        match (&mut self.entries[index], decl) {
            (Declaration::Namespace(existing), Declaration::Namespace(reopened)) => {
                existing.declarations.extend(reopened.declarations);
            }
            (slot, decl) if decl.is_forward() && !slot.is_forward() => {}
            (slot, decl) => *slot = decl,
        }
    }

    /// Insert every declaration of `other`
    pub fn extend(&mut self, other: DeclarationTree) {
        for decl in other.entries {
            self.insert(decl);
        }
    }

    /// Look up a declaration by name
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.entries.iter().find(|d| d.name() == name)
    }

    /// Number of declarations
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate declarations in order
    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.entries.iter()
    }

    /// Declaration names in order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|d| d.name()).collect()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for DeclarationTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for decl in &self.entries {
            map.serialize_entry(decl.name(), decl)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a DeclarationTree {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for DeclarationTree {
    type Item = Declaration;
    type IntoIter = std::vec::IntoIter<Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<Declaration> for DeclarationTree {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        let mut tree = DeclarationTree::new();
        for decl in iter {
            tree.insert(decl);
        }
        tree
    }
}
