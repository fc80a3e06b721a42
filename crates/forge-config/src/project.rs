//! `ProjectConfig`: the merged, ready-to-use configuration a platform
//! instance builds once per `init` call and holds for its lifetime.

use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::Value;

use crate::manifest::{LevelNamingScheme, NodeConfig, NodeMaskConfig, RuleManifest, TaskConfig};
use crate::settings::GlobalSettings;

/// The fully merged project configuration: every declared node, node mask,
/// task, and ambient setting gathered from the primary rule manifest and any
/// manifests it `include`s.
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    pub nodes: HashMap<String, NodeConfig>,
    pub node_masks: Vec<NodeMaskConfig>,
    pub tasks: HashMap<String, TaskConfig>,
    pub languages: Vec<String>,
    pub env: HashMap<String, String>,
    pub level_naming_schemes: HashMap<String, LevelNamingScheme>,
    pub settings: GlobalSettings,
    /// Every manifest file that contributed to this config, in load order.
    /// Used by the cache validator to compute the rule-file mtime fingerprint.
    pub included_files: Vec<PathBuf>,
}

impl ProjectConfig {
    /// Build a `ProjectConfig` from a merged manifest plus the list of files
    /// that contributed to it.
    pub fn from_manifest(manifest: RuleManifest, included_files: Vec<PathBuf>) -> Self {
        let mut tasks = HashMap::with_capacity(manifest.task.len());
        for task in manifest.task {
            tasks.insert(task.name.clone(), task);
        }

        Self {
            nodes: manifest.node,
            node_masks: manifest.node_mask,
            tasks,
            languages: manifest.languages,
            env: manifest.env,
            level_naming_schemes: manifest.level_naming,
            settings: GlobalSettings::default(),
            included_files,
        }
    }

    /// Compute the effective settings for a node path: base node settings,
    /// every matching node-mask override layered on top in declaration order
    /// (step 4), then the node's own mode-config for `mode`, if any, layered
    /// last (step 5) so that a mode override always wins over a mask.
    pub fn effective_settings(&self, node_path: &str, mode: &str) -> Value {
        let node = self.nodes.get(node_path);

        let mut settings = node.map(|n| n.settings.clone()).unwrap_or(Value::Null);

        for mask in &self.node_masks {
            if node_path_matches(node_path, &mask.mask) {
                crate::manifest::merge_values(&mut settings, &mask.settings);
            }
        }

        if let Some(mode_override) = node.and_then(|n| n.mode.get(mode)) {
            crate::manifest::merge_values(&mut settings, mode_override);
        }

        settings
    }

    /// Techs declared for a node path, with mask-level overrides applied
    /// (a matching mask's `techs`, if present, replaces the node's own list).
    pub fn effective_techs(&self, node_path: &str) -> Vec<String> {
        let mut techs = self
            .nodes
            .get(node_path)
            .map(|n| n.techs.clone())
            .unwrap_or_default();

        for mask in &self.node_masks {
            if node_path_matches(node_path, &mask.mask) {
                if let Some(mask_techs) = &mask.techs {
                    techs = mask_techs.clone();
                }
            }
        }

        techs
    }
}

/// Minimal glob-style matcher supporting a single trailing `*` wildcard,
/// which is all `node_mask` patterns need (`"bundles/*"`, `"*"`, exact paths).
fn node_path_matches(node_path: &str, mask: &str) -> bool {
    match mask.strip_suffix('*') {
        Some(prefix) => node_path.starts_with(prefix),
        None => node_path == mask,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest() -> RuleManifest {
        RuleManifest::from_toml_str(
            r#"
            [node."bundles/common"]
            techs = ["js"]
            settings = { minify = false }

            [node."bundles/common".mode.production]
            minify = true

            [[node_mask]]
            mask = "bundles/*"
            settings = { cache = true, minify = "masked" }
            "#,
        )
        .unwrap()
    }

    #[test]
    fn effective_settings_layers_node_mask_over_base() {
        let config = ProjectConfig::from_manifest(manifest(), vec![]);
        let settings = config.effective_settings("bundles/common", "development");
        assert_eq!(settings["minify"], json!("masked"));
        assert_eq!(settings["cache"], json!(true));
    }

    #[test]
    fn mode_override_wins_over_node_mask() {
        let config = ProjectConfig::from_manifest(manifest(), vec![]);
        let settings = config.effective_settings("bundles/common", "production");
        assert_eq!(settings["minify"], json!(true));
        assert_eq!(settings["cache"], json!(true));
    }

    #[test]
    fn mask_does_not_apply_to_non_matching_path() {
        let config = ProjectConfig::from_manifest(manifest(), vec![]);
        let settings = config.effective_settings("other/node", "development");
        assert_eq!(settings, Value::Null);
    }
}
