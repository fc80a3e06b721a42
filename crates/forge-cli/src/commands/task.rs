//! `forge task` — runs a named ad-hoc task.

use std::path::Path;

use forge_core::MakePlatform;

use crate::error::Result;
use crate::ui;

pub async fn execute(project: &Path, mode: Option<String>, name: String, args: Vec<String>) -> Result<()> {
    let mut platform = MakePlatform::init(project, mode)?;
    platform.load_cache()?;

    let result = platform.build_task(&name, &args).await;

    match result {
        Ok(()) => {
            ui::success(&format!("task '{name}' finished"));
            platform.destruct();
            Ok(())
        }
        Err(err) => {
            ui::error(&format!("task '{name}' failed: {err}"));
            platform.destruct();
            Err(err.into())
        }
    }
}
