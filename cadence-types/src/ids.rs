//! Versioned component identifiers.
//!
//! The text form is `urn:lsid:<authority>:<namespace>:<object>:<revision>`.
//! The family form drops the trailing `:<revision>`.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scheme prefix of the full text form.
pub const LSID_SCHEME: &str = "urn:lsid";

/// Authority assumed by the short forms (`ns:object[:revision]`).
pub const DEFAULT_AUTHORITY: &str = "localhost";

const SCHEME_PREFIX: &str = "urn:lsid:";

/// Identity and version of a component.
///
/// Two identifiers are exactly equal (`==`) iff every field matches. They are
/// family-equal iff everything but the revision matches; see
/// [`equals_family`](Self::equals_family).
///
/// Ordering is lexicographic over (authority, namespace, object, revision),
/// so all revisions of one family sort next to each other, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    authority: String,
    namespace: String,
    object: u64,
    revision: u64,
}

impl Identifier {
    /// Creates an identifier from its parts.
    #[must_use]
    pub fn new(
        authority: impl Into<String>,
        namespace: impl Into<String>,
        object: u64,
        revision: u64,
    ) -> Self {
        Self {
            authority: authority.into(),
            namespace: namespace.into(),
            object,
            revision,
        }
    }

    /// Creates an identifier under [`DEFAULT_AUTHORITY`].
    #[must_use]
    pub fn local(namespace: impl Into<String>, object: u64, revision: u64) -> Self {
        Self::new(DEFAULT_AUTHORITY, namespace, object, revision)
    }

    /// Parses the full or short text form.
    ///
    /// Accepted forms:
    /// - `urn:lsid:<authority>:<namespace>:<object>:<revision>`
    /// - `urn:lsid:<authority>:<namespace>:<object>` (revision 0)
    /// - `<namespace>:<object>:<revision>`
    /// - `<namespace>:<object>` (revision 0)
    ///
    /// The scheme is matched case-insensitively. Object and revision must be
    /// unsigned decimal integers.
    pub fn parse(s: &str) -> Result<Self> {
        let input = s.trim();
        if input.is_empty() {
            return Err(Error::malformed(s, "empty identifier"));
        }

        let (authority, rest) = match strip_scheme(input) {
            Some(rest) => rest
                .split_once(':')
                .ok_or_else(|| Error::malformed(s, "missing namespace after authority"))?,
            None => {
                if has_foreign_scheme(input) {
                    return Err(Error::malformed(
                        s,
                        format!("unsupported scheme, expected '{LSID_SCHEME}'"),
                    ));
                }
                (DEFAULT_AUTHORITY, input)
            }
        };
        if authority.is_empty() {
            return Err(Error::malformed(s, "empty authority"));
        }

        let fields: Vec<&str> = rest.split(':').collect();
        let (namespace, object, revision) = match fields.as_slice() {
            [namespace, object] => (*namespace, *object, None),
            [namespace, object, revision] => (*namespace, *object, Some(*revision)),
            _ => {
                return Err(Error::malformed(
                    s,
                    format!(
                        "expected namespace:object[:revision], found {} fields",
                        fields.len()
                    ),
                ));
            }
        };
        if namespace.is_empty() {
            return Err(Error::malformed(s, "empty namespace"));
        }

        let object = parse_number(s, object, "object")?;
        let revision = match revision {
            Some(revision) => parse_number(s, revision, "revision")?,
            None => 0,
        };

        Ok(Self::new(authority, namespace, object, revision))
    }

    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub const fn object(&self) -> u64 {
        self.object
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns a copy of this identifier carrying `revision`.
    #[must_use]
    pub fn with_revision(&self, revision: u64) -> Self {
        Self {
            revision,
            ..self.clone()
        }
    }

    /// Returns the identifier of the next revision of the same component.
    ///
    /// Editing a component produces a new revision; the family stays the same.
    #[must_use]
    pub fn next_revision(&self) -> Self {
        self.with_revision(self.revision.saturating_add(1))
    }

    /// Exact equality: every field, revision included.
    #[must_use]
    pub fn equals_exact(&self, other: &Self) -> bool {
        self == other
    }

    /// Family equality: same authority, namespace and object, any revision.
    #[must_use]
    pub fn equals_family(&self, other: &Self) -> bool {
        self.object == other.object
            && self.namespace == other.namespace
            && self.authority == other.authority
    }

    /// Renders the family form (no revision).
    #[must_use]
    pub fn to_family_string(&self) -> String {
        format!(
            "{SCHEME_PREFIX}{}:{}:{}",
            self.authority, self.namespace, self.object
        )
    }

    /// Renders a colon-free form usable as a file stem.
    #[must_use]
    pub fn to_file_name(&self) -> String {
        self.to_string().replace(':', "_")
    }
}

fn strip_scheme(input: &str) -> Option<&str> {
    input
        .get(..SCHEME_PREFIX.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(SCHEME_PREFIX))
        .map(|_| &input[SCHEME_PREFIX.len()..])
}

fn has_foreign_scheme(input: &str) -> bool {
    input
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("urn:"))
}

fn parse_number(input: &str, field: &str, what: &str) -> Result<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::malformed(
            input,
            format!("{what} must be a non-negative integer, got '{field}'"),
        ));
    }
    field
        .parse()
        .map_err(|_| Error::malformed(input, format!("{what} '{field}' is out of range")))
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SCHEME_PREFIX}{}:{}:{}:{}",
            self.authority, self.namespace, self.object, self.revision
        )
    }
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
