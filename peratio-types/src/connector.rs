//! Connector identity.

/// Stable name of a PE history connector, e.g. `peratio-eastmoney`.
///
/// Transport errors carry the same name in their `connector` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectorKey(&'static str);

impl ConnectorKey {
    /// Key for a connector named `name`.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The connector name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl AsRef<str> for ConnectorKey {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl std::fmt::Display for ConnectorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
