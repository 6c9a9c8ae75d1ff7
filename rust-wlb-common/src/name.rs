//! NDN name types.
//!
//! Names are hierarchical sequences of opaque components. The strategy uses
//! them as table keys: the FIB maps name prefixes to next-hops, the PIT
//! aggregates Interests by name, and measurement state inherits along the
//! ancestor chain of a name, which [`Name::self_and_ancestors`] walks.
//!
//! The textual form follows the NDN URI convention: components are joined
//! with `/`, and any byte outside the unreserved set is written as a
//! percent escape (`%20` for a space, and so on).

use crate::error::Error;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of an NDN name component.
pub const MAX_NAME_COMPONENT_LENGTH: usize = 255;

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|v| v as u8)
}

/// Represents a single NDN name component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameComponent(pub Bytes);

impl NameComponent {
    /// Creates a new name component from a byte sequence.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Returns the component as bytes.
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    /// Decodes the URI form of a component, resolving percent escapes.
    fn from_uri(raw: &str) -> crate::Result<Self> {
        let mut bytes = Vec::with_capacity(raw.len());
        let mut rest = raw.bytes();
        while let Some(byte) = rest.next() {
            if byte != b'%' {
                bytes.push(byte);
                continue;
            }
            let hi = rest.next().and_then(hex_value);
            let lo = rest.next().and_then(hex_value);
            match (hi, lo) {
                (Some(hi), Some(lo)) => bytes.push(hi << 4 | lo),
                _ => {
                    return Err(Error::Name(format!(
                        "malformed percent escape in component '{raw}'"
                    )))
                }
            }
        }
        if bytes.len() > MAX_NAME_COMPONENT_LENGTH {
            return Err(Error::Name(format!(
                "component of {} bytes exceeds the {}-byte limit",
                bytes.len(),
                MAX_NAME_COMPONENT_LENGTH
            )));
        }
        Ok(Self::new(bytes))
    }
}

impl fmt::Display for NameComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.0.iter() {
            if is_unreserved(byte) {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "%{byte:02X}")?;
            }
        }
        Ok(())
    }
}

/// Represents an NDN name, a sequence of name components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name {
    components: Vec<NameComponent>,
}

impl Name {
    /// Creates a new empty NDN name (the root name `/`).
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Parses the URI form of a name, with `/` as component separator and
    /// `%XX` escapes for bytes outside the unreserved set.
    ///
    /// Empty components are skipped, so `"/a//b/"` parses as `/a/b`.
    pub fn from_string(s: &str) -> crate::Result<Self> {
        let components = s
            .split('/')
            .filter(|raw| !raw.is_empty())
            .map(NameComponent::from_uri)
            .collect::<crate::Result<Vec<_>>>()?;

        Ok(Self { components })
    }

    /// Adds a component to the name.
    pub fn push(&mut self, component: NameComponent) -> &mut Self {
        self.components.push(component);
        self
    }

    /// Returns the number of components in the name.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the name has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns an iterator over the name components.
    pub fn components(&self) -> impl Iterator<Item = &NameComponent> {
        self.components.iter()
    }

    /// Gets a component at the specified index.
    pub fn get(&self, index: usize) -> Option<&NameComponent> {
        self.components.get(index)
    }

    /// Returns a prefix of this name with the specified length.
    pub fn prefix(&self, len: usize) -> Self {
        let len = len.min(self.components.len());
        Self {
            components: self.components[..len].to_vec(),
        }
    }

    /// Returns the immediate ancestor, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self.prefix(self.len() - 1))
        }
    }

    /// Walks from this name up to the root: the name itself, then every
    /// ancestor prefix, deepest first, ending with `/`.
    pub fn self_and_ancestors(&self) -> impl Iterator<Item = Name> + '_ {
        (0..=self.len()).rev().map(move |len| self.prefix(len))
    }

    /// Checks if this name is a prefix of another name.
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.components.starts_with(&self.components)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return write!(f, "/");
        }

        for component in &self.components {
            write!(f, "/{component}")?;
        }

        Ok(())
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_creation() {
        let name = Name::from_string("/test/data/1").unwrap();

        assert_eq!(name.len(), 3);
        assert_eq!(name.get(0).unwrap().as_bytes().as_ref(), b"test");
        assert_eq!(name.get(1).unwrap().as_bytes().as_ref(), b"data");
        assert_eq!(name.get(2).unwrap().as_bytes().as_ref(), b"1");

        assert_eq!(name.to_string(), "/test/data/1");
    }

    #[test]
    fn empty_components_are_skipped() {
        let name = Name::from_string("/a//b/").unwrap();
        assert_eq!(name.to_string(), "/a/b");
    }

    #[test]
    fn root_name_displays_as_slash() {
        assert_eq!(Name::new().to_string(), "/");
        assert!(Name::new().is_empty());
    }

    #[test]
    fn percent_escapes_round_trip() {
        let name = Name::from_string("/a%20b/%01%FF").unwrap();
        assert_eq!(name.get(0).unwrap().as_bytes().as_ref(), b"a b");
        assert_eq!(name.get(1).unwrap().as_bytes().as_ref(), &[0x01, 0xff][..]);
        assert_eq!(name.to_string(), "/a%20b/%01%FF");
    }

    #[test]
    fn reserved_bytes_display_escaped() {
        let mut name = Name::new();
        name.push(NameComponent::new(&b"a/b c"[..]));
        assert_eq!(name.to_string(), "/a%2Fb%20c");
    }

    #[test]
    fn malformed_percent_escape_is_rejected() {
        assert!(Name::from_string("/a/%4").is_err());
        assert!(Name::from_string("/a/%zz").is_err());
    }

    #[test]
    fn oversized_component_is_rejected() {
        let long = "x".repeat(MAX_NAME_COMPONENT_LENGTH + 1);
        assert!(Name::from_string(&format!("/a/{long}")).is_err());
    }

    #[test]
    fn name_compare() {
        let name1 = Name::from_string("/a/b/c").unwrap();
        let name2 = Name::from_string("/a/b/c").unwrap();
        let name3 = Name::from_string("/a/b/d").unwrap();
        let name4 = Name::from_string("/a/b").unwrap();

        assert_eq!(name1, name2);
        assert_ne!(name1, name3);
        assert_ne!(name1, name4);

        assert!(name4.is_prefix_of(&name1));
        assert!(!name1.is_prefix_of(&name4));
        assert!(!name3.is_prefix_of(&name1));
    }

    #[test]
    fn prefix_truncates() {
        let name = Name::from_string("/a/b/c").unwrap();
        assert_eq!(name.prefix(2), Name::from_string("/a/b").unwrap());
        assert_eq!(name.prefix(0), Name::new());
        // Prefix longer than the name is the name itself
        assert_eq!(name.prefix(5), name);
    }

    #[test]
    fn parent_walks_one_level() {
        let name = Name::from_string("/a/b").unwrap();
        assert_eq!(name.parent(), Some(Name::from_string("/a").unwrap()));
        assert_eq!(Name::from_string("/a").unwrap().parent(), Some(Name::new()));
        assert_eq!(Name::new().parent(), None);
    }

    #[test]
    fn ancestor_walk_ends_at_the_root() {
        let name = Name::from_string("/a/b/c").unwrap();
        let walked: Vec<String> = name.self_and_ancestors().map(|n| n.to_string()).collect();
        assert_eq!(walked, vec!["/a/b/c", "/a/b", "/a", "/"]);
    }
}
