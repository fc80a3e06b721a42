//! Nodes and at-most-once, memoized async node initialization.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use forge_config::ProjectConfig;
use futures::future::{BoxFuture, FutureExt, Shared};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::Span;

use crate::error::{PlatformError, Result};
use crate::graph::BuildGraph;
use crate::resolver::WILDCARD_SUBTARGET;
use crate::state::BuildState;

/// A single build unit, fully assembled: its techs and effective settings
/// after node-mask and mode overrides have been layered on.
#[derive(Debug, Clone)]
pub struct Node {
    pub path: String,
    pub techs: Vec<String>,
    pub settings: Value,
    /// Per-node tracing span; dropped (disabled) once the node's build or
    /// clean has completed successfully.
    pub span: Span,
    /// Write-shared sink for build activity, common to every node in this
    /// platform's lifetime.
    pub build_graph: Arc<BuildGraph>,
    /// Free-form scratchpad shared among every node in this platform's
    /// lifetime.
    pub build_state: BuildState,
}

impl Node {
    /// Build the given sub-targets. The actual build step is a collaborator
    /// concern (the per-node builder, out of scope here); this produces the
    /// node's contribution to the aggregated `builtTargets` list.
    pub fn build(&self, sub_targets: &[String]) -> Vec<String> {
        let built: Vec<String> = sub_targets
            .iter()
            .map(|sub_target| self.built_target_name(sub_target))
            .collect();
        self.build_graph.record(&self.path, "built");
        built
    }

    /// Clean the given sub-targets. Cleaning has no return value to
    /// aggregate; only the build graph is annotated.
    pub fn clean(&self, _sub_targets: &[String]) {
        self.build_graph.record(&self.path, "cleaned");
    }

    fn built_target_name(&self, sub_target: &str) -> String {
        if sub_target == WILDCARD_SUBTARGET {
            self.path.clone()
        } else {
            format!("{}/{}", self.path, sub_target)
        }
    }
}

type InitOutput = std::result::Result<Arc<Node>, Arc<PlatformError>>;
type SharedInit = Shared<BoxFuture<'static, InitOutput>>;

/// Guarantees each node path is initialized exactly once, regardless of how
/// many concurrent callers request it in the same `build_targets`/
/// `clean_targets` call.
///
/// The shared future is inserted into the map before it is ever polled, so a
/// second caller that finds the entry already present joins the first
/// caller's in-flight initialization instead of starting a duplicate one.
pub struct NodeInitializer {
    futures: Mutex<HashMap<String, SharedInit>>,
}

impl Default for NodeInitializer {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeInitializer {
    pub fn new() -> Self {
        Self {
            futures: Mutex::new(HashMap::new()),
        }
    }

    /// Initialize `node_path`, or return the already-initialized (or
    /// in-flight) node.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_or_init(
        &self,
        node_path: &str,
        project_config: &ProjectConfig,
        mode: &str,
        project_dir: &Path,
        build_graph: Arc<BuildGraph>,
        build_state: BuildState,
    ) -> Result<Arc<Node>> {
        let shared = {
            let mut futures = self.futures.lock().await;
            futures
                .entry(node_path.to_string())
                .or_insert_with(|| {
                    build_init_future(node_path, project_config, mode, project_dir, build_graph, build_state)
                })
                .clone()
        };

        shared.await.map_err(|source| PlatformError::NodeInitError {
            node: node_path.to_string(),
            message: source.to_string(),
        })
    }

    /// Number of nodes initialized (or in-flight) so far.
    pub async fn len(&self) -> usize {
        self.futures.lock().await.len()
    }
}

fn build_init_future(
    node_path: &str,
    project_config: &ProjectConfig,
    mode: &str,
    project_dir: &Path,
    build_graph: Arc<BuildGraph>,
    build_state: BuildState,
) -> SharedInit {
    let path = node_path.to_string();
    let techs = project_config.effective_techs(node_path);
    let settings = project_config.effective_settings(node_path, mode);
    let node_dir: PathBuf = project_dir.join(node_path);

    let fut: BoxFuture<'static, InitOutput> = async move {
        tokio::fs::create_dir_all(&node_dir)
            .await
            .map_err(|source| Arc::new(PlatformError::Io { path: node_dir.clone(), source }))?;

        let span = tracing::info_span!("node", node = %path);
        build_graph.record(&path, "initialized");

        Ok(Arc::new(Node {
            path,
            techs,
            settings,
            span,
            build_graph,
            build_state,
        }))
    }
    .boxed();

    fut.shared()
}
