//! Immutable in-memory campground catalog.
//!
//! # Responsibility
//! - Decode the embedded regional datasets exactly once per process.
//! - Concatenate them in fixed order and hand out read-only borrows.
//!
//! # Invariants
//! - Order is moscow, tver, kaluga; inside each region, authored order.
//! - Loading performs no deduplication and no validation gate; `audit()`
//!   reports problems as diagnostics only.

use crate::model::campground::{CampgroundRecord, CampgroundValidationError};
use crate::model::taxonomy::{Region, Vocabulary};
use crate::query::find_by_id;
use log::{info, warn};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MOSCOW_DATASET: &str = include_str!("../../data/moscow.json");
const TVER_DATASET: &str = include_str!("../../data/tver.json");
const KALUGA_DATASET: &str = include_str!("../../data/kaluga.json");

static BUILTIN_STORE: OnceCell<CampgroundStore> = OnceCell::new();

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level error for dataset decoding and identifier lookup.
#[derive(Debug)]
pub enum CatalogError {
    /// Embedded dataset cannot be decoded into records.
    InvalidDataset {
        region: Region,
        source: serde_json::Error,
    },
    /// Lookup by identifier found no record.
    NotFound(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDataset { region, source } => {
                write!(f, "invalid {} dataset: {source}", region.as_str())
            }
            Self::NotFound(id) => write!(f, "campground not found: {id}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDataset { source, .. } => Some(source),
            Self::NotFound(_) => None,
        }
    }
}

/// Diagnostic produced by [`CampgroundStore::audit`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreIssue {
    /// Same identifier appears at more than one position.
    DuplicateId { id: String, positions: Vec<usize> },
    /// Record stored under one region list but tagged with another.
    RegionMismatch {
        id: String,
        listed_under: Region,
        tagged: Region,
    },
    InvalidRecord(CampgroundValidationError),
}

/// Fixed, ordered catalog of campground records.
#[derive(Debug, Clone, PartialEq)]
pub struct CampgroundStore {
    records: Vec<CampgroundRecord>,
    /// Region list each record came from, parallel to `records`.
    origins: Vec<Region>,
}

impl CampgroundStore {
    /// Returns the process-wide catalog built from the embedded datasets.
    ///
    /// # Errors
    /// - Returns [`CatalogError::InvalidDataset`] when an embedded document
    ///   does not decode. The failure is not cached; the next call retries.
    pub fn builtin() -> CatalogResult<&'static CampgroundStore> {
        BUILTIN_STORE.get_or_try_init(|| {
            let store = Self::from_regions(
                decode_dataset(Region::Moscow, MOSCOW_DATASET)?,
                decode_dataset(Region::Tver, TVER_DATASET)?,
                decode_dataset(Region::Kaluga, KALUGA_DATASET)?,
            );
            info!(
                "event=catalog_load module=store status=ok records={}",
                store.len()
            );
            Ok(store)
        })
    }

    /// Builds a catalog by concatenating the three regional lists.
    pub fn from_regions(
        moscow: Vec<CampgroundRecord>,
        tver: Vec<CampgroundRecord>,
        kaluga: Vec<CampgroundRecord>,
    ) -> Self {
        let mut records = Vec::with_capacity(moscow.len() + tver.len() + kaluga.len());
        let mut origins = Vec::with_capacity(records.capacity());
        for (region, list) in [
            (Region::Moscow, moscow),
            (Region::Tver, tver),
            (Region::Kaluga, kaluga),
        ] {
            origins.extend(std::iter::repeat(region).take(list.len()));
            records.extend(list);
        }
        Self { records, origins }
    }

    pub fn records(&self) -> &[CampgroundRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records authored in one regional list, in order.
    pub fn regional(&self, region: Region) -> Vec<&CampgroundRecord> {
        self.records
            .iter()
            .zip(&self.origins)
            .filter(|(_, origin)| **origin == region)
            .map(|(record, _)| record)
            .collect()
    }

    /// Looks up one record, treating absence as an error.
    pub fn require(&self, id: &str) -> CatalogResult<&CampgroundRecord> {
        find_by_id(&self.records, id).ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Reports duplicate identifiers, region mismatches and invalid records.
    ///
    /// Never fails; an empty result means the catalog is consistent.
    pub fn audit(&self) -> Vec<StoreIssue> {
        let mut issues = Vec::new();
        let mut positions: BTreeMap<&str, Vec<usize>> = BTreeMap::new();

        for (index, (record, origin)) in self.records.iter().zip(&self.origins).enumerate() {
            positions.entry(record.id.as_str()).or_default().push(index);
            if record.region != *origin {
                issues.push(StoreIssue::RegionMismatch {
                    id: record.id.clone(),
                    listed_under: *origin,
                    tagged: record.region,
                });
            }
            if let Err(err) = record.validate() {
                issues.push(StoreIssue::InvalidRecord(err));
            }
        }

        for (id, at) in positions {
            if at.len() > 1 {
                issues.push(StoreIssue::DuplicateId {
                    id: id.to_string(),
                    positions: at,
                });
            }
        }

        if !issues.is_empty() {
            warn!(
                "event=catalog_audit module=store status=error issues={}",
                issues.len()
            );
        }
        issues
    }
}

fn decode_dataset(region: Region, raw: &str) -> CatalogResult<Vec<CampgroundRecord>> {
    serde_json::from_str(raw).map_err(|source| CatalogError::InvalidDataset { region, source })
}

#[cfg(test)]
mod tests {
    use super::{decode_dataset, CatalogError, CampgroundStore, KALUGA_DATASET};
    use crate::model::taxonomy::Region;

    #[test]
    fn kaluga_dataset_keeps_authored_order() {
        let records = decode_dataset(Region::Kaluga, KALUGA_DATASET).expect("kaluga decodes");
        let ids = records.iter().map(|r| r.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["camping-4", "camping-5", "camping-8"]);
    }

    #[test]
    fn malformed_dataset_reports_region() {
        let err = decode_dataset(Region::Tver, "[{").expect_err("truncated json must fail");
        assert!(matches!(
            err,
            CatalogError::InvalidDataset {
                region: Region::Tver,
                ..
            }
        ));
        assert!(err.to_string().starts_with("invalid tver dataset"));
    }

    #[test]
    fn empty_regions_build_empty_store() {
        let store = CampgroundStore::from_regions(Vec::new(), Vec::new(), Vec::new());
        assert!(store.is_empty());
        assert!(store.audit().is_empty());
    }
}
