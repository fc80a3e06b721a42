//! Target resolution: mapping user-supplied target strings to the nodes
//! that own them, via longest-prefix matching over declared node paths.

use forge_config::ProjectConfig;

use crate::error::{PlatformError, Result};

/// Sub-target naming "the node itself", as opposed to a path beneath it.
pub const WILDCARD_SUBTARGET: &str = "*";

/// A node, together with the sub-targets (paths below the node's own path)
/// that were requested against it. A sub-target of [`WILDCARD_SUBTARGET`]
/// means "the node itself", i.e. the whole node was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub node: String,
    pub sub_targets: Vec<String>,
}

/// Resolves target strings against a project's declared node paths.
pub struct TargetResolver<'a> {
    project_config: &'a ProjectConfig,
}

impl<'a> TargetResolver<'a> {
    pub fn new(project_config: &'a ProjectConfig) -> Self {
        Self { project_config }
    }

    /// Resolve `targets` to `(node, sub_targets)` pairs. An empty `targets`
    /// list expands to every declared node with the wildcard sub-target.
    pub fn resolve(&self, targets: &[String]) -> Result<Vec<ResolvedTarget>> {
        if targets.is_empty() {
            let mut all_nodes: Vec<&String> = self.project_config.nodes.keys().collect();
            all_nodes.sort();
            return Ok(all_nodes
                .into_iter()
                .map(|node| ResolvedTarget {
                    node: node.clone(),
                    sub_targets: vec![WILDCARD_SUBTARGET.to_string()],
                })
                .collect());
        }

        let mut node_paths: Vec<&String> = self.project_config.nodes.keys().collect();
        node_paths.sort_by_key(|p| std::cmp::Reverse(p.len()));

        let mut resolved: Vec<ResolvedTarget> = Vec::new();

        for raw_target in targets {
            let target = strip_leading_dot_slash(raw_target);

            let matched_node = node_paths
                .iter()
                .find(|node_path| {
                    target == node_path.as_str() || target.starts_with(&format!("{node_path}/"))
                })
                .ok_or_else(|| PlatformError::TargetNotFound {
                    target: raw_target.clone(),
                })?;

            let sub_target = if target == matched_node.as_str() {
                WILDCARD_SUBTARGET.to_string()
            } else {
                target[matched_node.len() + 1..].to_string()
            };

            match resolved.iter_mut().find(|r| &r.node == *matched_node) {
                Some(entry) => {
                    if !entry.sub_targets.contains(&sub_target) {
                        entry.sub_targets.push(sub_target);
                    }
                }
                None => resolved.push(ResolvedTarget {
                    node: (*matched_node).clone(),
                    sub_targets: vec![sub_target],
                }),
            }
        }

        Ok(resolved)
    }
}

fn strip_leading_dot_slash(target: &str) -> &str {
    target.strip_prefix("./").unwrap_or(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_config::NodeConfig;

    fn config_with_nodes(paths: &[&str]) -> ProjectConfig {
        let mut config = ProjectConfig::default();
        for path in paths {
            config.nodes.insert(path.to_string(), NodeConfig::default());
        }
        config
    }

    #[test]
    fn empty_targets_expand_to_all_nodes() {
        let config = config_with_nodes(&["a", "b"]);
        let resolved = TargetResolver::new(&config).resolve(&[]).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].node, "a");
        assert_eq!(resolved[1].node, "b");
        assert_eq!(resolved[0].sub_targets, vec![WILDCARD_SUBTARGET.to_string()]);
    }

    #[test]
    fn longest_prefix_wins_over_shorter_ancestor() {
        let config = config_with_nodes(&["bundles", "bundles/common"]);
        let resolved = TargetResolver::new(&config)
            .resolve(&["bundles/common/file.js".to_string()])
            .unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].node, "bundles/common");
        assert_eq!(resolved[0].sub_targets, vec!["file.js".to_string()]);
    }

    #[test]
    fn leading_dot_slash_is_stripped() {
        let config = config_with_nodes(&["bundles/common"]);
        let resolved = TargetResolver::new(&config)
            .resolve(&["./bundles/common".to_string()])
            .unwrap();
        assert_eq!(resolved[0].node, "bundles/common");
        assert_eq!(resolved[0].sub_targets, vec![WILDCARD_SUBTARGET.to_string()]);
    }

    #[test]
    fn duplicate_sub_targets_are_deduped() {
        let config = config_with_nodes(&["bundles/common"]);
        let resolved = TargetResolver::new(&config)
            .resolve(&[
                "bundles/common/a.js".to_string(),
                "bundles/common/a.js".to_string(),
            ])
            .unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].sub_targets, vec!["a.js".to_string()]);
    }

    #[test]
    fn unmatched_target_is_an_error() {
        let config = config_with_nodes(&["bundles/common"]);
        let result = TargetResolver::new(&config).resolve(&["unknown/thing".to_string()]);
        assert!(matches!(result, Err(PlatformError::TargetNotFound { .. })));
    }
}
