//! Legacy content migration: distribution rows.
//!
//! # Data Flow
//! ```text
//! legacy row (nid, vid, uri, file_id, access_url, ...)
//!     → DistributionSource::prepare_row
//!         uri        → normalised or dropped
//!         technique  ← TermSource (vocabulary 70)
//!         access_url ← IdMap("distribution_file") when a file is attached
//!     → row ready for the destination entity
//! ```
//!
//! # Design Decisions
//! - The id map and term lookup are traits; storage is out of scope
//! - File-backed distributions point at the site's dereference path

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Vocabulary holding representation techniques in the legacy site.
pub const REPRESENTATION_TECHNIQUE_VOCABULARY: u32 = 70;

/// Migration whose id map resolves attached files.
pub const DISTRIBUTION_FILE_MIGRATION: &str = "distribution_file";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrateError {
    #[error("id map for migration '{migration}' is unavailable: {reason}")]
    IdMapUnavailable { migration: String, reason: String },
}

/// Lookup of destination ids produced by an earlier migration.
pub trait IdMap: Send + Sync {
    /// Destination id for the given source node id, if it was migrated.
    fn lookup_destination_id(&self, migration: &str, nid: u64) -> Result<Option<String>, MigrateError>;
}

/// Taxonomy terms attached to a legacy node revision.
pub trait TermSource: Send + Sync {
    fn term_names(&self, nid: u64, vid: u64, vocabulary: u32) -> Vec<String>;
}

/// One row of the distribution source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRow {
    pub nid: u64,
    pub vid: u64,
    pub uri: Option<String>,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub created_time: Option<i64>,
    #[serde(default)]
    pub changed_time: Option<i64>,
    #[serde(default)]
    pub licence: Option<String>,
    #[serde(default)]
    pub file_id: Option<u64>,
    #[serde(default)]
    pub access_url: Option<String>,
    #[serde(default)]
    pub technique: Vec<String>,
}

/// Prepares distribution rows for import.
pub struct DistributionSource<'a> {
    base_url: String,
    id_map: &'a dyn IdMap,
    terms: &'a dyn TermSource,
}

impl<'a> DistributionSource<'a> {
    pub fn new(base_url: &str, id_map: &'a dyn IdMap, terms: &'a dyn TermSource) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            id_map,
            terms,
        }
    }

    pub fn prepare_row(&self, row: &mut DistributionRow) -> Result<(), MigrateError> {
        row.uri = row.uri.as_deref().and_then(normalize_uri);

        row.technique = self
            .terms
            .term_names(row.nid, row.vid, REPRESENTATION_TECHNIQUE_VOCABULARY);

        if row.file_id.is_some() {
            row.access_url = self
                .id_map
                .lookup_destination_id(DISTRIBUTION_FILE_MIGRATION, row.nid)?
                .filter(|fid| !fid.is_empty())
                .map(|fid| format!("{}/file-dereference/{}", self.base_url, fid));
        }

        tracing::trace!(nid = row.nid, access_url = ?row.access_url, "Distribution row prepared");
        Ok(())
    }
}

/// Keep only absolute http(s) URIs, trimmed.
fn normalize_uri(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| trimmed.to_string())
}
