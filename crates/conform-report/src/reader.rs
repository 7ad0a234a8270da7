//! Loads persisted scan results.

use std::path::Path;

use conform_core::address::TableAddress;
use conform_core::entities::{CategoricalsFile, DomainsFile};
use serde::de::DeserializeOwned;

use crate::error::ReportError;

pub struct ReportReader;

impl ReportReader {
    /// Load `domains.json` for a table.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotScanned`] if the table has never been scanned,
    /// or [`ReportError::Parse`] if the file is not a valid `DomainsFile`.
    pub fn domains(address: &TableAddress) -> Result<DomainsFile, ReportError> {
        read_json(&address.domains_path())
    }

    /// Load `categoricals.json` for a table.
    ///
    /// # Errors
    ///
    /// Same as [`Self::domains`].
    pub fn categoricals(address: &TableAddress) -> Result<CategoricalsFile, ReportError> {
        read_json(&address.categoricals_path())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ReportError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ReportError::NotScanned {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(ReportError::io(path, e)),
    };
    serde_json::from_str(&raw).map_err(|e| ReportError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
