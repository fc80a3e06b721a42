//! Pluggable validation strategies for a merged `ProjectConfig`.

use crate::error::{ConfigError, Result};
use crate::project::ProjectConfig;

/// Trait for pluggable config validation strategies.
pub trait ConfigValidator {
    fn validate(&self, config: &ProjectConfig) -> Result<()>;
}

/// Schema-only validation: no filesystem checks, safe to run on any
/// `ProjectConfig` regardless of where it came from.
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &ProjectConfig) -> Result<()> {
        for path in config.nodes.keys() {
            if path.trim().is_empty() {
                return Err(ConfigError::schema_validation(
                    "node path cannot be empty",
                    "Remove or name the empty node declaration",
                ));
            }
        }

        for mask in &config.node_masks {
            if mask.mask.trim().is_empty() {
                return Err(ConfigError::schema_validation(
                    "node_mask entry has an empty mask pattern",
                    "Give the mask a non-empty pattern, e.g. \"bundles/*\"",
                ));
            }
        }

        for task in config.tasks.values() {
            if task.run.trim().is_empty() {
                return Err(ConfigError::schema_validation(
                    format!("task '{}' has an empty run command", task.name),
                    "Give the task a non-empty `run` command",
                ));
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation.
pub fn validate_schema(config: &ProjectConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{NodeMaskConfig, TaskConfig};
    use serde_json::Value;

    #[test]
    fn schema_validator_accepts_empty_project() {
        let config = ProjectConfig::default();
        assert!(SchemaValidator.validate(&config).is_ok());
    }

    #[test]
    fn schema_validator_rejects_empty_mask() {
        let mut config = ProjectConfig::default();
        config.node_masks.push(NodeMaskConfig {
            mask: "   ".to_string(),
            techs: None,
            settings: Value::Null,
        });
        let result = SchemaValidator.validate(&config);
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn schema_validator_rejects_empty_task_run() {
        let mut config = ProjectConfig::default();
        config.tasks.insert(
            "lint".to_string(),
            TaskConfig {
                name: "lint".to_string(),
                run: "".to_string(),
            },
        );
        let result = SchemaValidator.validate(&config);
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }
}
