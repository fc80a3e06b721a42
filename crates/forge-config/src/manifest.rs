//! Rule manifests: the declarative, data-driven stand-in for the original
//! "rule file" contract. A rule manifest is a TOML document describing node
//! configs, node masks, tasks, languages, environment, and level-naming
//! schemes. Manifests are merged, never executed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// A single node's declared configuration, as written in a rule manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeConfig {
    #[serde(default)]
    pub techs: Vec<String>,

    #[serde(default)]
    pub settings: Value,

    /// Per-mode overrides, keyed by mode name (e.g. `"production"`), merged
    /// into `settings` when a node is initialized under that mode.
    #[serde(default)]
    pub mode: HashMap<String, Value>,
}

/// An override applied to every node whose path matches `mask`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeMaskConfig {
    pub mask: String,

    #[serde(default)]
    pub techs: Option<Vec<String>>,

    #[serde(default)]
    pub settings: Value,
}

/// A named, ad-hoc task, run instead of a target build.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaskConfig {
    pub name: String,
    pub run: String,
}

/// Naming scheme applied to a directory level when resolving node paths.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LevelNamingScheme {
    #[serde(default)]
    pub scheme: String,
}

/// Raw, as-parsed contents of one manifest file. `include` references other
/// manifest files (relative to the config directory) that are merged in
/// before the result is handed to the platform.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RuleManifest {
    #[serde(default)]
    pub node: HashMap<String, NodeConfig>,

    #[serde(default)]
    pub node_mask: Vec<NodeMaskConfig>,

    #[serde(default)]
    pub task: Vec<TaskConfig>,

    #[serde(default)]
    pub languages: Vec<String>,

    #[serde(default)]
    pub env: HashMap<String, String>,

    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub level_naming: HashMap<String, LevelNamingScheme>,
}

impl RuleManifest {
    /// Parse a manifest from TOML source text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidManifest {
            message: e.to_string(),
        })
    }

    /// Load a manifest file and recursively merge its `include`d manifests.
    ///
    /// `include` paths are resolved relative to `config_dir`. Later files win
    /// on scalar conflicts; array fields (`node_mask`, `task`, `languages`)
    /// are appended in encounter order.
    pub fn load_merged(path: &Path, config_dir: &Path) -> Result<(Self, Vec<PathBuf>)> {
        let mut visited = Vec::new();
        let manifest = Self::load_recursive(path, config_dir, &mut visited)?;
        Ok((manifest, visited))
    }

    fn load_recursive(
        path: &Path,
        config_dir: &Path,
        visited: &mut Vec<PathBuf>,
    ) -> Result<Self> {
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if visited.contains(&canonical) {
            return Err(ConfigError::InvalidManifest {
                message: format!("circular include of {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let mut manifest = Self::from_toml_str(&content)?;
        visited.push(canonical);

        let includes = std::mem::take(&mut manifest.include);
        for include in includes {
            let include_path = config_dir.join(&include);
            let included = Self::load_recursive(&include_path, config_dir, visited)?;
            manifest.merge(included);
        }

        Ok(manifest)
    }

    /// Merge `other` into `self`; `other` wins scalar conflicts.
    fn merge(&mut self, other: Self) {
        for (path, config) in other.node {
            self.node.insert(path, config);
        }
        self.node_mask.extend(other.node_mask);
        self.task.extend(other.task);
        self.languages.extend(other.languages);
        for (k, v) in other.env {
            self.env.insert(k, v);
        }
        for (level, scheme) in other.level_naming {
            self.level_naming.insert(level, scheme);
        }
    }
}

/// Recursively deep-merge `update` into `target`, the way profile overrides
/// are applied to a base config: objects merge key-by-key, everything else
/// (including arrays) is replaced wholesale.
pub fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_minimal_manifest() {
        let manifest = RuleManifest::from_toml_str(
            r#"
            languages = ["ru", "en"]

            [node."bundles/common"]
            techs = ["js", "css"]
            "#,
        )
        .unwrap();

        assert_eq!(manifest.languages, vec!["ru", "en"]);
        assert_eq!(manifest.node["bundles/common"].techs, vec!["js", "css"]);
    }

    #[test]
    fn node_mask_and_task_parse() {
        let manifest = RuleManifest::from_toml_str(
            r#"
            [[node_mask]]
            mask = "bundles/*"
            techs = ["js"]

            [[task]]
            name = "lint"
            run = "eslint ."
            "#,
        )
        .unwrap();

        assert_eq!(manifest.node_mask[0].mask, "bundles/*");
        assert_eq!(manifest.task[0].name, "lint");
    }

    #[test]
    fn merge_values_deep_merges_objects_and_replaces_arrays() {
        let mut base = json!({"a": 1, "b": {"c": 2, "d": 3}, "e": [1, 2]});
        let update = json!({"b": {"c": 20}, "e": [9]});
        merge_values(&mut base, &update);
        assert_eq!(base, json!({"a": 1, "b": {"c": 20, "d": 3}, "e": [9]}));
    }

    #[test]
    fn merge_prefers_later_manifest_for_duplicate_node() {
        let mut first = RuleManifest::from_toml_str(
            r#"
            [node."a"]
            techs = ["js"]
            "#,
        )
        .unwrap();
        let second = RuleManifest::from_toml_str(
            r#"
            [node."a"]
            techs = ["css"]
            "#,
        )
        .unwrap();

        first.merge(second);
        assert_eq!(first.node["a"].techs, vec!["css"]);
    }
}
