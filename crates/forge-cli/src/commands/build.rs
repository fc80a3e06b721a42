//! `forge build` — builds the requested targets, reporting elapsed time.

use std::path::Path;
use std::time::Instant;

use forge_core::MakePlatform;

use crate::error::Result;
use crate::ui;

pub async fn execute(project: &Path, mode: Option<String>, targets: Vec<String>) -> Result<()> {
    let mut platform = MakePlatform::init(project, mode)?;
    platform.load_cache()?;

    let started = Instant::now();
    let result = platform.build_targets(&targets).await;
    let elapsed = started.elapsed();

    match result {
        Ok(built) => {
            ui::success(&format!(
                "built {} target(s) in {}ms",
                built.len(),
                elapsed.as_millis()
            ));
            for target in &built {
                ui::info(&format!("  {target}"));
            }
            platform.save_cache()?;
            platform.destruct();
            Ok(())
        }
        Err(err) => {
            ui::error(&format!("build failed: {err}"));
            platform.destruct();
            Err(err.into())
        }
    }
}
