//! `forge clean` — cleans the requested targets.

use std::path::Path;

use forge_core::MakePlatform;

use crate::error::Result;
use crate::ui;

pub async fn execute(project: &Path, mode: Option<String>, targets: Vec<String>) -> Result<()> {
    let mut platform = MakePlatform::init(project, mode)?;
    platform.load_cache()?;

    let result = platform.clean_targets(&targets).await;

    match result {
        Ok(()) => {
            ui::success("clean finished");
            platform.save_cache()?;
            platform.destruct();
            Ok(())
        }
        Err(err) => {
            ui::error(&format!("clean failed: {err}"));
            platform.destruct();
            Err(err.into())
        }
    }
}
