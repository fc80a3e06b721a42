//! Named, ad-hoc tasks: an escape hatch alongside target builds.

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{PlatformError, Result};
use crate::platform::MakePlatform;

/// A runnable, named task. Tasks are arbitrary collaborator code; the
/// platform only knows how to look one up by name and run it with
/// arguments.
#[async_trait]
pub trait Task: Send + Sync {
    async fn run(&self, platform: &MakePlatform, args: &[String]) -> Result<()>;
}

/// Runs a templated shell command, substituting `{args}` with the
/// whitespace-joined argument list.
pub struct ShellTask {
    pub command_template: String,
}

#[async_trait]
impl Task for ShellTask {
    async fn run(&self, _platform: &MakePlatform, args: &[String]) -> Result<()> {
        let command = self.command_template.replace("{args}", &args.join(" "));

        let status = Command::new("sh")
            .arg("-c")
            .arg(&command)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| PlatformError::TaskFailed {
                name: command.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(PlatformError::TaskFailed {
                name: command,
                message: format!("exited with status {status}"),
            });
        }

        Ok(())
    }
}

/// The platform's built-in `clean` task: cleans every declared node.
pub struct CleanTask;

#[async_trait]
impl Task for CleanTask {
    async fn run(&self, platform: &MakePlatform, args: &[String]) -> Result<()> {
        platform.clean_targets(args).await
    }
}

/// Registers the built-in tasks every platform carries regardless of what
/// the rule manifests declare.
pub fn builtin_tasks() -> Vec<(String, Arc<dyn Task>)> {
    vec![("clean".to_string(), Arc::new(CleanTask) as Arc<dyn Task>)]
}
