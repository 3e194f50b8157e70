use std::fmt;

/// Identifier selecting which submodels of a model are morphed.
///
/// Stored lowercased; matching is a case-insensitive substring test against
/// submodel names, so `"Body"` selects both `"body"` and `"/Root/Body_Target"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(String);

impl PartId {
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `name` contains this id, ignoring case.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.0)
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PartId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PartId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
