//! Read-only, load-once access to the persisted catalog.
//!
//! The catalog is read from disk on first use and kept for the lifetime of
//! the registry. It is never reloaded or modified, so the registry can be
//! shared freely between requests.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{error, info, warn};

use super::{Catalog, CatalogMetadata, ComponentDoc, DocsError, DocsResult};

/// Stand-in returned when the catalog cannot be parsed.
static EMPTY_CATALOG: Catalog = Catalog {
    generated_at: None,
    total_components: 0,
    components: Vec::new(),
};

/// Lazily loaded component catalog.
#[derive(Debug)]
pub struct ComponentRegistry {
    path: PathBuf,
    catalog: OnceLock<Catalog>,
}

impl ComponentRegistry {
    /// Creates a registry that will read the catalog at `path` on first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            catalog: OnceLock::new(),
        }
    }

    /// Creates a registry over an already built catalog.
    #[must_use]
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            path: PathBuf::new(),
            catalog: OnceLock::from(catalog),
        }
    }

    /// Path of the persisted catalog.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the catalog, reading it on the first successful call.
    ///
    /// A missing catalog file is not an error: an empty catalog is cached
    /// and a warning logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    /// Nothing is cached in that case.
    pub fn load(&self) -> DocsResult<&Catalog> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(catalog);
        }

        let catalog = if self.path.is_file() {
            let contents = std::fs::read_to_string(&self.path)
                .map_err(|e| DocsError::file_read(&self.path, e))?;
            let catalog: Catalog =
                serde_json::from_str(&contents).map_err(|source| DocsError::CatalogParse {
                    path: self.path.clone(),
                    source,
                })?;
            info!(
                path = %self.path.display(),
                components = catalog.components.len(),
                "Loaded component catalog"
            );
            catalog
        } else {
            warn!(
                path = %self.path.display(),
                "Component catalog not found; run the build command to generate it"
            );
            Catalog::default()
        };

        Ok(self.catalog.get_or_init(|| catalog))
    }

    fn catalog(&self) -> &Catalog {
        self.load().unwrap_or_else(|e| {
            error!(error = %e, "Component catalog unavailable");
            &EMPTY_CATALOG
        })
    }

    /// Returns every component in catalog order.
    #[must_use]
    pub fn list(&self) -> &[ComponentDoc] {
        &self.catalog().components
    }

    /// Finds a component by name, ignoring case.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&ComponentDoc> {
        self.list()
            .iter()
            .find(|doc| doc.name.eq_ignore_ascii_case(name))
    }

    /// Returns every component whose name, description, props, or
    /// sub-components contain `query`, ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&ComponentDoc> {
        let query = query.to_lowercase();
        let hit = |text: &str| text.to_lowercase().contains(&query);

        self.list()
            .iter()
            .filter(|doc| {
                hit(&doc.name)
                    || hit(&doc.description)
                    || doc.props.iter().any(|p| hit(&p.name) || hit(&p.description))
                    || doc
                        .sub_components
                        .iter()
                        .any(|s| hit(&s.name) || hit(&s.description))
            })
            .collect()
    }

    /// Returns the catalog header.
    #[must_use]
    pub fn metadata(&self) -> CatalogMetadata {
        self.catalog().metadata()
    }
}
