//! Core-owned DTOs for the Immich port.

/// Summary of a remote album as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumSummary {
    /// Service-assigned album id
    pub id: String,
    /// Album display name
    pub name: String,
}

impl AlbumSummary {
    /// Create a new album summary.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
