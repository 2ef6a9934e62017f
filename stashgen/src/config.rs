//! Generator configuration
//!
//! Every platform name the engine relies on lives here so the generator can target a
//! different persistence API without touching the engine. Defaults describe the Android
//! `Bundle` API.

use std::path::Path;

use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::TypeName;

/// Default suffix appended to the flattened type name to form the artifact name
pub const DEFAULT_ARTIFACT_SUFFIX: &str = "$$Stash";

/// Configuration for one generator invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Appended to `<EnclosingFlattenedName>` to name the generated artifact
    pub artifact_suffix:         String,
    /// The persisted key-value container
    pub container_type:          TypeName,
    /// Opaque state value exchanged by the renderable save/restore protocol
    pub parent_state_type:       TypeName,
    /// Structured transferable capability
    pub structured_transferable: TypeName,
    /// Generic serializable capability
    pub serializable:            TypeName,
    /// Renderable capability, selects the renderable artifact variant
    pub renderable_type:         TypeName,
    /// Generic list type used by the list strategy
    pub list_type:               TypeName,
    /// Indexed sparse map type used by the sparse map strategy
    pub sparse_map_type:         TypeName,
    /// Base extended by plain artifacts without a marked ancestor
    pub plain_base:              TypeName,
    /// Base extended by renderable artifacts without a marked ancestor
    pub renderable_base:         TypeName,
    /// Runtime helper providing the `get*`/`put*` operations
    pub helper_type:             TypeName,
    /// Supertype prefixes that are never inspected for marked fields
    pub excluded_prefixes:       Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            artifact_suffix:         DEFAULT_ARTIFACT_SUFFIX.to_string(),
            container_type:          TypeName::from("android.os.Bundle"),
            parent_state_type:       TypeName::from("android.os.Parcelable"),
            structured_transferable: TypeName::from("android.os.Parcelable"),
            serializable:            TypeName::from("java.io.Serializable"),
            renderable_type:         TypeName::from("android.view.View"),
            list_type:               TypeName::from("java.util.ArrayList"),
            sparse_map_type:         TypeName::from("android.util.SparseArray"),
            plain_base:              TypeName::from("stash.Stash.Object"),
            renderable_base:         TypeName::from("stash.Stash.View"),
            helper_type:             TypeName::from("stash.Stash.Helper"),
            excluded_prefixes:       ["android.", "androidx.", "java.", "javax.", "kotlin."]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration from a JSON file, missing keys fall back to the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|error| Report::new(Error::io_failed("read config", path, error)))?;
        let config: Self = serde_json::from_str(&text)
            .change_context(Error::invalid("config file", path.display()))?;
        config.validate()?;
        tracing::debug!("Loaded generator config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the engine cannot generate well-formed artifacts from
    pub fn validate(&self) -> Result<()> {
        if self.artifact_suffix.is_empty() {
            return Err(Report::new(Error::invalid(
                "artifact_suffix",
                "must not be empty",
            )));
        }

        let names = [
            ("container_type", &self.container_type),
            ("parent_state_type", &self.parent_state_type),
            ("structured_transferable", &self.structured_transferable),
            ("serializable", &self.serializable),
            ("renderable_type", &self.renderable_type),
            ("list_type", &self.list_type),
            ("sparse_map_type", &self.sparse_map_type),
            ("plain_base", &self.plain_base),
            ("renderable_base", &self.renderable_base),
            ("helper_type", &self.helper_type),
        ];
        if let Some((key, _)) = names.iter().find(|(_, name)| name.as_str().is_empty()) {
            return Err(Report::new(Error::invalid(key, "must not be empty")));
        }

        if let Some(prefix) = self
            .excluded_prefixes
            .iter()
            .find(|prefix| !prefix.ends_with('.'))
        {
            return Err(Report::new(Error::invalid(
                "excluded_prefixes",
                format!("'{prefix}' must end with '.'"),
            )));
        }

        Ok(())
    }

    /// Whether `name` belongs to a namespace the generator must never reach into
    pub fn is_excluded(&self, name: &TypeName) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| name.as_str().starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_excluded_prefixes() {
        let config = GeneratorConfig::default();
        assert!(config.is_excluded(&TypeName::from("android.app.Activity")));
        assert!(config.is_excluded(&TypeName::from("java.lang.Object")));
        assert!(!config.is_excluded(&TypeName::from("com.example.MainActivity")));
        // prefix match is on the namespace separator, not on a bare word
        assert!(!config.is_excluded(&TypeName::from("javafx.Thing")));
    }

    #[test]
    fn test_load_partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "artifact_suffix": "$$Saver" }}"#).unwrap();

        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.artifact_suffix, "$$Saver");
        assert_eq!(config.container_type.as_str(), "android.os.Bundle");
    }

    #[test]
    fn test_load_rejects_unknown_keys_and_bad_prefixes() {
        let mut unknown = tempfile::NamedTempFile::new().unwrap();
        write!(unknown, r#"{{ "suffix": "$$Saver" }}"#).unwrap();
        assert!(GeneratorConfig::load(unknown.path()).is_err());

        let mut bad_prefix = tempfile::NamedTempFile::new().unwrap();
        write!(bad_prefix, r#"{{ "excluded_prefixes": ["android"] }}"#).unwrap();
        let error = GeneratorConfig::load(bad_prefix.path()).unwrap_err();
        assert!(matches!(error.current_context(), Error::Configuration(_)));
    }
}
