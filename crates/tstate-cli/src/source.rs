//! # Catalog Source
//!
//! Resolves the registry a command runs against: the built-in warehouse
//! catalog, or a declaration table loaded from a YAML or JSON file.

use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result};

use tstate_core::{warehouse, Catalog, Registry};

/// Load a declaration table from `path`.
///
/// `.json` files are read as JSON. Anything else is read as YAML, which
/// also accepts JSON input.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let catalog: Catalog = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON catalog: {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML catalog: {}", path.display()))?
    };

    tracing::debug!(
        path = %path.display(),
        atomics = catalog.atomic.len(),
        composites = catalog.composite.len(),
        "loaded catalog file"
    );
    Ok(catalog)
}

/// The registry for `path`, or the shared warehouse registry when no path
/// is given.
pub fn resolve_registry(path: Option<&Path>) -> Result<Cow<'static, Registry>> {
    match path {
        None => Ok(Cow::Borrowed(warehouse::registry())),
        Some(path) => {
            let catalog = load_catalog(path)?;
            let registry = Registry::build(&catalog)
                .with_context(|| format!("catalog {} failed integrity checks", path.display()))?;
            Ok(Cow::Owned(registry))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = "\
atomic:
  - { name: Docked, id: 1 }
  - { name: Unloaded, id: 2 }
  - { name: Scrapped, id: 4, deprecated: true }
composite:
  - { name: AtDock, members: [Docked, Unloaded] }
";

    #[test]
    fn builtin_when_no_path() {
        let registry = resolve_registry(None).unwrap();
        assert!(matches!(registry, Cow::Borrowed(_)));
        assert_eq!(registry.atomic_count(), 82);
    }

    #[test]
    fn loads_yaml_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, YAML).unwrap();

        let registry = resolve_registry(Some(&path)).unwrap();
        assert_eq!(registry.atomic_count(), 3);
        assert_eq!(registry.composite_count(), 1);
        let scrapped = registry.atomic_by_name("Scrapped").unwrap();
        assert!(registry.is_deprecated(scrapped));
    }

    #[test]
    fn loads_json_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"atomic": [{"name": "Docked", "id": 1}], "composite": []}"#,
        )
        .unwrap();

        let registry = resolve_registry(Some(&path)).unwrap();
        assert_eq!(registry.render(&registry.parse("Docked").unwrap()), "Docked");
    }

    #[test]
    fn integrity_violation_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(
            &path,
            "atomic:\n  - { name: Docked, id: 1 }\n  - { name: Moored, id: 1 }\n",
        )
        .unwrap();

        let err = resolve_registry(Some(&path)).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("failed integrity checks"));
        assert!(message.contains("share id 1"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read catalog file"));
    }
}
