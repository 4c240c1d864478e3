//! Offline catalog generation.
//!
//! Walks `components_dir`, where every sub-directory holds one component:
//!
//! ```text
//! src/components/
//! ├── alert-dialog/AlertDialog.jsx   → AlertDialog
//! ├── button/index.tsx               → Button
//! └── ...
//! src/pages/components/
//! ├── AlertDialog.jsx                (optional demo page)
//! └── Button.jsx
//! ```
//!
//! A component that fails to process is logged and skipped; the rest of the
//! run continues.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use super::builder::{build_component_doc, build_compound_doc};
use super::extract::{extract_demo, DemoDocs};
use super::merge::merge_demo;
use super::{Catalog, ComponentDoc, DocsError, DocsResult};
use crate::config::Config;

/// Extensions tried for component sources, in order of preference.
const SOURCE_EXTENSIONS: &[&str] = &["tsx", "jsx", "ts", "js"];

/// Extensions tried for demo pages, in order of preference.
const DEMO_EXTENSIONS: &[&str] = &["jsx", "tsx", "js", "mdx"];

/// Builds the catalog from component and demo sources.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    root: PathBuf,
    components_dir: PathBuf,
    demos_dir: PathBuf,
    package_name: String,
    compound_components: Vec<String>,
}

impl CatalogBuilder {
    /// Creates a builder from the configured paths and package name.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let root = config.project_root.clone();
        Self {
            components_dir: root.join(&config.components_dir),
            demos_dir: root.join(&config.demos_dir),
            package_name: config.package_name.clone(),
            compound_components: config.compound_components.clone(),
            root,
        }
    }

    /// Processes every component directory into a catalog.
    ///
    /// # Errors
    ///
    /// Returns an error only if the components directory itself is missing
    /// or cannot be listed. Per-component failures are logged and skipped.
    pub fn build(&self) -> DocsResult<Catalog> {
        let dirs = self.component_dirs()?;
        info!(
            directories = dirs.len(),
            path = %self.components_dir.display(),
            "Building component catalog"
        );

        let mut components = Vec::new();
        let mut failed = 0_usize;
        for dir in &dirs {
            let name = component_name(&dir_name(dir));
            match self.build_component(dir, &name) {
                Ok(Some(doc)) => components.push(doc),
                Ok(None) => {}
                Err(e) => {
                    failed += 1;
                    error!(component = %name, error = %e, "Failed to process component");
                }
            }
        }

        info!(
            components = components.len(),
            failed,
            "Component catalog built"
        );
        Ok(Catalog::new(components))
    }

    /// Builds the descriptor for the component in `dir`.
    ///
    /// Returns `Ok(None)` if the directory has no recognisable source file.
    ///
    /// # Errors
    ///
    /// Returns an error if the source or demo file cannot be read.
    pub fn build_component(&self, dir: &Path, name: &str) -> DocsResult<Option<ComponentDoc>> {
        let stem = dir_name(dir);
        let candidates = [name, stem.as_str(), "index"];
        let Some(source_path) = find_file(dir, &candidates, SOURCE_EXTENSIONS) else {
            warn!(component = %name, dir = %dir.display(), "No component source found, skipping");
            return Ok(None);
        };

        let source = std::fs::read_to_string(&source_path)
            .map_err(|e| DocsError::file_read(&source_path, e))?;

        let mut doc = if self.is_compound(name) {
            build_compound_doc(&source, name, &self.package_name)
        } else {
            build_component_doc(&source, name, &self.package_name)
        };

        let demo = self.load_demo(name, &stem)?;
        merge_demo(&mut doc, demo);

        doc.file_path = self.relative_path(&source_path);
        for sub in &mut doc.sub_component_docs {
            sub.file_path.clone_from(&doc.file_path);
        }

        debug!(
            component = %name,
            props = doc.props.len(),
            examples = doc.examples.len(),
            sub_components = doc.sub_components.len(),
            "Processed component"
        );
        Ok(Some(doc))
    }

    fn is_compound(&self, name: &str) -> bool {
        self.compound_components
            .iter()
            .any(|c| c.eq_ignore_ascii_case(name))
    }

    fn load_demo(&self, name: &str, stem: &str) -> DocsResult<Option<DemoDocs>> {
        let Some(path) = find_file(&self.demos_dir, &[name, stem], DEMO_EXTENSIONS) else {
            debug!(component = %name, "No demo page");
            return Ok(None);
        };
        let source = std::fs::read_to_string(&path).map_err(|e| DocsError::file_read(&path, e))?;
        Ok(Some(extract_demo(&source, &self.package_name)))
    }

    fn component_dirs(&self) -> DocsResult<Vec<PathBuf>> {
        if !self.components_dir.is_dir() {
            return Err(DocsError::ComponentsDirMissing {
                path: self.components_dir.clone(),
            });
        }

        let pattern = format!(
            "{}/*",
            glob::Pattern::escape(&self.components_dir.to_string_lossy())
        );
        let entries = glob::glob(&pattern).map_err(|source| DocsError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;

        let mut dirs = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_dir() => dirs.push(path),
                Ok(_) => {}
                Err(e) => {
                    let path = e.path().to_path_buf();
                    return Err(DocsError::directory_read(path, std::io::Error::from(e)));
                }
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Writes the catalog as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the catalog cannot be serialised or written.
pub fn write_catalog(catalog: &Catalog, path: &Path) -> DocsResult<()> {
    let mut json = serde_json::to_string_pretty(catalog)
        .map_err(|source| DocsError::CatalogSerialise { source })?;
    json.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DocsError::file_write(parent, e))?;
    }
    std::fs::write(path, json).map_err(|e| DocsError::file_write(path, e))?;

    info!(
        path = %path.display(),
        components = catalog.total_components,
        "Catalog written"
    );
    Ok(())
}

/// Converts a directory name such as `alert-dialog` to `AlertDialog`.
#[must_use]
pub fn component_name(dir_name: &str) -> String {
    dir_name
        .split(|c: char| c == '-' || c == '_' || c == ' ')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect()
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn find_file(dir: &Path, stems: &[&str], extensions: &[&str]) -> Option<PathBuf> {
    stems
        .iter()
        .flat_map(|stem| extensions.iter().map(move |ext| dir.join(format!("{stem}.{ext}"))))
        .find(|path| path.is_file())
}
