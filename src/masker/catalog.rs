// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Maskable-property catalog loading

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Well-known catalog location used when no path is configured.
pub const DEFAULT_CATALOG_PATH: &str = "secrets_mask.yaml";

/// Errors from the strict catalog-loading path.
///
/// The masking engine itself never propagates these; see
/// [`MaskableProperties::load`] for the degrading variant.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog '{path}'")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// On-disk catalog shape: a mapping with a `properties` key listing the
/// maskable property names.
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    properties: Vec<String>,
}

/// Immutable set of property names whose values must always be masked.
///
/// Name identity is case-insensitive: names differing only in case are a
/// single entry, first spelling wins. Match-time case-insensitivity is
/// handled by the compiled pattern, so original spellings are preserved
/// here for the alternation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskableProperties {
    // keyed by lowercased name, value keeps the original spelling
    names: BTreeMap<String, String>,
}

impl MaskableProperties {
    /// Build a property set from explicit names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeMap::new();
        for name in names {
            let name = name.into();
            set.entry(name.to_lowercase()).or_insert(name);
        }
        Self { names: set }
    }

    /// Load the catalog from `path`, degrading to an empty set on any
    /// failure. Absence of a masking catalog must never block log
    /// emission; it only reduces redaction. The failure itself is
    /// reported through the diagnostic channel.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(properties) => {
                tracing::info!(
                    path = %path.display(),
                    count = properties.len(),
                    "loaded maskable property catalog"
                );
                properties
            }
            Err(err) => {
                tracing::error!(
                    path = %path.display(),
                    error = %err,
                    "unable to load maskable property catalog; property masking disabled"
                );
                Self::default()
            }
        }
    }

    /// Strict loading variant for callers that want the failure.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog: CatalogFile =
            serde_yaml::from_str(&contents).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::new(catalog.properties))
    }

    /// Iterate property names in their original spelling.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
