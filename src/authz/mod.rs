use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use anyhow::{bail, format_err, Error, Result};
use serde_derive::{Deserialize, Serialize};

mod serde;

////////////////////////////////////////////////////////////////////////////////

/// Coarse authorization tier required for an audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// `"admin"`: elevated access.
    Admin,
    /// `"*"`: any authenticated caller.
    Any,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Admin => "admin",
            Permission::Any => "*",
        }
    }

    pub fn is_admin(&self) -> bool {
        *self == Permission::Admin
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "admin" => Ok(Permission::Admin),
            "*" => Ok(Permission::Any),
            _ => Err(format_err!("invalid value for the permission: {}", val)),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Issuer tenant used by a validator to verify token signatures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Domain(String);

impl Domain {
    pub fn new(val: &str) -> Result<Self> {
        if val.is_empty() {
            bail!("domain must not be empty");
        }

        if val.contains(|c: char| c.is_whitespace() || c == '/') {
            bail!("invalid value for the domain: {}", val);
        }

        Ok(Self(val.to_owned()))
    }

    pub(crate) fn from_static(val: &'static str) -> Self {
        Self(val.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn issuer(&self) -> String {
        format!("https://{}/", self.0)
    }

    pub fn jwks_uri(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.0)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Domain {
    type Err = Error;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        Self::new(val)
    }
}

impl TryFrom<String> for Domain {
    type Error = Error;

    fn try_from(val: String) -> Result<Self, Self::Error> {
        Self::new(&val)
    }
}

impl From<Domain> for String {
    fn from(domain: Domain) -> Self {
        domain.0
    }
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    audience: String,
    permission: Permission,
}

impl Entry {
    pub fn new(audience: &str, permission: Permission) -> Self {
        Self {
            audience: audience.to_owned(),
            permission,
        }
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Audience to permission lookup consumed by a token validator.
///
/// Every audience has exactly one entry. The table is immutable once built;
/// what an absent audience means is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "Vec<Entry>", into = "Vec<Entry>")]
pub struct AudiencePermissions(HashMap<String, Permission>);

impl AudiencePermissions {
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut inner = HashMap::new();

        for Entry {
            audience,
            permission,
        } in entries
        {
            if audience.is_empty() {
                bail!("audience must not be empty");
            }

            if inner.contains_key(&audience) {
                bail!("audience = '{}' is listed more than once", audience);
            }

            inner.insert(audience, permission);
        }

        Ok(Self(inner))
    }

    pub(crate) fn from_static(entries: &[(&'static str, Permission)]) -> Self {
        let inner = entries
            .iter()
            .map(|(audience, permission)| ((*audience).to_owned(), *permission))
            .collect::<HashMap<_, _>>();

        // Release builds rely on the built-in table's length test to catch duplicates.
        debug_assert_eq!(inner.len(), entries.len(), "duplicate static audience");
        Self(inner)
    }

    pub fn get(&self, audience: &str) -> Option<Permission> {
        self.0.get(audience).copied()
    }

    pub fn contains(&self, audience: &str) -> bool {
        self.0.contains_key(audience)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Audience keys in lexicographic order.
    pub fn audiences(&self) -> Vec<&str> {
        let mut audiences = self.0.keys().map(String::as_str).collect::<Vec<_>>();
        audiences.sort_unstable();
        audiences
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Permission)> {
        self.0
            .iter()
            .map(|(audience, permission)| (audience.as_str(), *permission))
    }
}

impl TryFrom<Vec<Entry>> for AudiencePermissions {
    type Error = Error;

    fn try_from(entries: Vec<Entry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<AudiencePermissions> for Vec<Entry> {
    fn from(table: AudiencePermissions) -> Self {
        let mut entries = table
            .0
            .into_iter()
            .map(|(audience, permission)| Entry {
                audience,
                permission,
            })
            .collect::<Vec<_>>();

        entries.sort_unstable_by(|a, b| a.audience.cmp(&b.audience));
        entries
    }
}

////////////////////////////////////////////////////////////////////////////////
