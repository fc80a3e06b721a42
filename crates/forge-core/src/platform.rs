//! `MakePlatform`: the build orchestrator core.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use forge_cache::CacheStorage;
use forge_config::{ConfigDiscovery, LevelNamingScheme, MakefileKind, ProjectConfig, RuleManifest};
use futures::future::try_join_all;
use tracing::instrument;

use crate::cache_validator::CacheValidator;
use crate::error::{PlatformError, Result};
use crate::graph::BuildGraph;
use crate::node::NodeInitializer;
use crate::resolver::TargetResolver;
use crate::state::{new_build_state, BuildState};
use crate::task::{builtin_tasks, ShellTask, Task};

/// Tool version stamped into the cache's reserved bookkeeping namespace.
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_MODE: &str = "development";
const MODE_ENV_VAR: &str = "YENV";

/// The top-level build orchestrator: resolves targets to nodes, initializes
/// them at most once, and drives concurrent build/clean over the resolved
/// set.
pub struct MakePlatform {
    project_dir: PathBuf,
    project_name: String,
    mode: String,
    config_dir: PathBuf,
    makefile_paths: Vec<PathBuf>,
    project_config: ProjectConfig,
    env: HashMap<String, String>,
    languages: Vec<String>,
    cache_storage: Option<Arc<CacheStorage>>,
    node_initializer: NodeInitializer,
    tasks: HashMap<String, Arc<dyn Task>>,
    build_graph: Arc<BuildGraph>,
    build_state: BuildState,
}

impl MakePlatform {
    /// Resolve mode, discover and load rule manifests, and assemble the
    /// project config. Does not touch the persistent cache — call
    /// [`MakePlatform::load_cache`] afterwards if incremental behavior is
    /// wanted.
    #[instrument(skip_all, fields(project_dir = %project_dir.as_ref().display()))]
    pub fn init(project_dir: impl AsRef<Path>, mode: Option<String>) -> Result<Self> {
        let project_dir = project_dir.as_ref().to_path_buf();
        let mode = resolve_mode(mode);

        let discovery = ConfigDiscovery::new(&project_dir);
        let (config_dir, primary_makefile) = discovery.discover_primary_makefile()?;

        let mut makefile_paths = vec![primary_makefile.clone()];
        let (mut manifest, mut included) =
            RuleManifest::load_merged(&primary_makefile, &config_dir)?;
        makefile_paths.append(&mut included);

        if let Some(personal) = discovery.get_make_file(&config_dir, MakefileKind::MakePersonal)? {
            makefile_paths.push(personal.clone());
            let (personal_manifest, mut personal_included) =
                RuleManifest::load_merged(&personal, &config_dir)?;
            makefile_paths.append(&mut personal_included);
            merge_manifest(&mut manifest, personal_manifest);
        }

        let project_config = ProjectConfig::from_manifest(manifest, makefile_paths.clone());

        let env = project_config.env.clone();
        let languages = project_config.languages.clone();

        let mut tasks: HashMap<String, Arc<dyn Task>> = HashMap::new();
        for (task_config_name, task_config) in &project_config.tasks {
            tasks.insert(
                task_config_name.clone(),
                Arc::new(ShellTask {
                    command_template: task_config.run.clone(),
                }) as Arc<dyn Task>,
            );
        }
        for (name, task) in builtin_tasks() {
            tasks.insert(name, task);
        }

        let project_name = project_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string());

        let cache_dir = config_dir.join("tmp").join("cache");
        let cache_storage = Arc::new(CacheStorage::open(&cache_dir)?);
        let build_graph = Arc::new(BuildGraph::new(&project_name));

        Ok(Self {
            project_dir,
            project_name,
            mode,
            config_dir,
            makefile_paths: project_config.included_files.clone(),
            project_config,
            env,
            languages,
            cache_storage: Some(cache_storage),
            node_initializer: NodeInitializer::new(),
            tasks,
            build_graph,
            build_state: new_build_state(),
        })
    }

    /// Validate the persistent cache against the current tool version, mode,
    /// and rule-manifest mtimes, dropping it entirely if stale. Read-only
    /// otherwise: it does not write a fresh bookkeeping record (`save_cache`
    /// does), so a stale `load_cache` leaves the `:make` namespace empty.
    pub fn load_cache(&self) -> Result<bool> {
        let storage = self.cache_storage.as_ref().ok_or(PlatformError::CacheNotLoaded)?;
        let dropped = CacheValidator::validate(storage, &self.mode, TOOL_VERSION, &self.makefile_paths)?;
        if dropped {
            tracing::info!("cache invalidated: mode, tool version, or rule manifests changed");
        }
        Ok(dropped)
    }

    /// Write the cache's bookkeeping record (mode, tool version, rule-file
    /// fingerprint). Does not itself persist node-level cache entries, which
    /// are written as they're produced during `build_targets`/`clean_targets`.
    pub fn save_cache(&self) -> Result<()> {
        let storage = self.cache_storage.as_ref().ok_or(PlatformError::CacheNotLoaded)?;
        CacheValidator::stamp(storage, &self.mode, TOOL_VERSION, &self.makefile_paths)
    }

    /// Wipe the entire persistent cache, bookkeeping included, unconditionally.
    pub fn drop_cache(&self) -> Result<()> {
        let storage = self.cache_storage.as_ref().ok_or(PlatformError::CacheNotLoaded)?;
        CacheValidator::drop_cache(storage)
    }

    /// Build every declared node.
    pub async fn build(&self) -> Result<Vec<String>> {
        self.build_targets(&[]).await
    }

    /// Build the nodes that own `targets` (or every node, if `targets` is
    /// empty). Initializes all resolved nodes concurrently, then asks each
    /// node to build its sub-targets concurrently, and returns the flattened
    /// `builtTargets` list.
    #[instrument(skip(self))]
    pub async fn build_targets(&self, targets: &[String]) -> Result<Vec<String>> {
        let resolved = TargetResolver::new(&self.project_config).resolve(targets)?;
        let storage = self.cache_storage.as_ref().ok_or(PlatformError::CacheNotLoaded)?;

        let init_futures = resolved
            .iter()
            .map(|target| self.init_node(&target.node));
        let nodes = try_join_all(init_futures).await?;

        let build_futures = resolved.iter().zip(nodes.iter()).map(|(target, node)| {
            let storage = storage.clone();
            let node = node.clone();
            let sub_targets = target.sub_targets.clone();
            async move {
                let _span = node.span.clone().entered();
                tracing::info!(node = %node.path, "build started");
                let built = node.build(&sub_targets);

                let node_path = node.path.clone();
                let stored = built.clone();
                tokio::task::spawn_blocking(move || storage.set("nodes", &node_path, &stored))
                    .await
                    .map_err(|source| PlatformError::NodeBuildError {
                        node: node.path.clone(),
                        message: source.to_string(),
                    })?
                    .map_err(PlatformError::from)?;

                tracing::info!(node = %node.path, "build finished");
                Ok::<Vec<String>, PlatformError>(built)
            }
        });

        let built_per_node = try_join_all(build_futures).await?;
        Ok(built_per_node.into_iter().flatten().collect())
    }

    /// Clean the nodes that own `targets` (or every node, if `targets` is
    /// empty). Structurally identical to `build_targets`, except each node is
    /// asked to clean instead of build and the per-node result is discarded.
    #[instrument(skip(self))]
    pub async fn clean_targets(&self, targets: &[String]) -> Result<()> {
        let resolved = TargetResolver::new(&self.project_config).resolve(targets)?;
        let storage = self.cache_storage.as_ref().ok_or(PlatformError::CacheNotLoaded)?;

        let init_futures = resolved
            .iter()
            .map(|target| self.init_node(&target.node));
        let nodes = try_join_all(init_futures).await?;

        let clean_futures = resolved.iter().zip(nodes.iter()).map(|(target, node)| {
            let storage = storage.clone();
            let node = node.clone();
            let sub_targets = target.sub_targets.clone();
            async move {
                let _span = node.span.clone().entered();
                tracing::info!(node = %node.path, "clean started");
                node.clean(&sub_targets);

                let node_path = node.path.clone();
                tokio::task::spawn_blocking(move || storage.remove("nodes", &node_path))
                    .await
                    .map_err(|source| PlatformError::NodeCleanError {
                        node: node.path.clone(),
                        message: source.to_string(),
                    })?
                    .map_err(PlatformError::from)?;

                tracing::info!(node = %node.path, "clean finished");
                Ok::<(), PlatformError>(())
            }
        });

        try_join_all(clean_futures).await?;
        Ok(())
    }

    /// Initialize a single node, threading through the shared build graph
    /// and build state every node in this platform's lifetime shares.
    async fn init_node(&self, node_path: &str) -> Result<Arc<crate::node::Node>> {
        self.node_initializer
            .get_or_init(
                node_path,
                &self.project_config,
                &self.mode,
                &self.project_dir,
                self.build_graph.clone(),
                self.build_state.clone(),
            )
            .await
    }

    /// Run a named task instead of a target build.
    pub async fn build_task(&self, name: &str, args: &[String]) -> Result<()> {
        let task = self
            .tasks
            .get(name)
            .cloned()
            .ok_or_else(|| PlatformError::UnknownTask {
                name: name.to_string(),
            })?;
        task.run(self, args).await
    }

    /// Source files declared for a node, resolved relative to the project
    /// directory. The per-tech meaning of "source" beyond this declared
    /// list is a builder concern, out of scope here.
    pub async fn require_node_sources(&self, node_path: &str) -> Result<Vec<PathBuf>> {
        let node = self.init_node(node_path).await?;

        let sources = node
            .settings
            .get("sources")
            .and_then(|v| v.as_array())
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(|s| self.project_dir.join(s))
                    .collect()
            })
            .unwrap_or_default();

        Ok(sources)
    }

    /// Release the cache handle and reset in-memory state. Safe to call more
    /// than once.
    pub fn destruct(&mut self) {
        self.build_state = new_build_state();
        self.cache_storage = None;
        self.node_initializer = NodeInitializer::new();
        self.project_config = ProjectConfig::default();
        self.tasks.clear();
        self.build_graph = Arc::new(BuildGraph::new(&self.project_name));
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn project_config(&self) -> &ProjectConfig {
        &self.project_config
    }

    pub fn env(&self) -> &HashMap<String, String> {
        &self.env
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// The write-shared build graph every node in this platform's lifetime
    /// records activity into.
    pub fn build_graph(&self) -> &Arc<BuildGraph> {
        &self.build_graph
    }

    /// The level-naming scheme declared for `level_path`, if any.
    pub fn level_naming_scheme(&self, level_path: &str) -> Option<&LevelNamingScheme> {
        self.project_config.level_naming_schemes.get(level_path)
    }
}

fn resolve_mode(mode_arg: Option<String>) -> String {
    mode_arg
        .or_else(|| std::env::var(MODE_ENV_VAR).ok())
        .unwrap_or_else(|| DEFAULT_MODE.to_string())
}

fn merge_manifest(base: &mut RuleManifest, overlay: RuleManifest) {
    for (path, config) in overlay.node {
        base.node.insert(path, config);
    }
    base.node_mask.extend(overlay.node_mask);
    base.task.extend(overlay.task);
    base.languages.extend(overlay.languages);
    for (k, v) in overlay.env {
        base.env.insert(k, v);
    }
    for (level, scheme) in overlay.level_naming {
        base.level_naming.insert(level, scheme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_project(dir: &Path, manifest: &str) {
        let config_dir = dir.join(".enb");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("make.toml"), manifest).unwrap();
    }

    #[tokio::test]
    async fn init_fails_without_config_dir() {
        let dir = TempDir::new().unwrap();
        let result = MakePlatform::init(dir.path(), None);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn init_defaults_mode_to_development() {
        unsafe {
            std::env::remove_var("YENV");
        }
        let dir = TempDir::new().unwrap();
        write_project(dir.path(), "");
        let platform = MakePlatform::init(dir.path(), None).unwrap();
        assert_eq!(platform.mode(), "development");
    }

    #[tokio::test]
    async fn mode_argument_overrides_yenv() {
        unsafe {
            std::env::set_var("YENV", "staging");
        }
        let dir = TempDir::new().unwrap();
        write_project(dir.path(), "");
        let platform = MakePlatform::init(dir.path(), Some("production".to_string())).unwrap();
        assert_eq!(platform.mode(), "production");
        unsafe {
            std::env::remove_var("YENV");
        }
    }

    #[tokio::test]
    async fn build_targets_of_empty_project_is_a_noop() {
        let dir = TempDir::new().unwrap();
        write_project(dir.path(), "");
        let platform = MakePlatform::init(dir.path(), Some("development".to_string())).unwrap();
        platform.load_cache().unwrap();
        assert!(platform.build().await.is_ok());
        assert!(platform.build_targets(&[]).await.is_ok());
    }

    #[tokio::test]
    async fn build_then_clean_round_trips_through_cache() {
        let dir = TempDir::new().unwrap();
        write_project(
            dir.path(),
            r#"
            [node."bundles/common"]
            techs = ["js"]
            "#,
        );
        let platform = MakePlatform::init(dir.path(), Some("development".to_string())).unwrap();
        platform.load_cache().unwrap();

        let built = platform
            .build_targets(&["bundles/common".to_string()])
            .await
            .unwrap();
        assert_eq!(built, vec!["bundles/common".to_string()]);

        platform
            .clean_targets(&["bundles/common".to_string()])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn build_creates_the_node_directory_on_disk() {
        let dir = TempDir::new().unwrap();
        write_project(
            dir.path(),
            r#"
            [node."bundles/common"]
            techs = ["js"]
            "#,
        );
        let platform = MakePlatform::init(dir.path(), Some("development".to_string())).unwrap();
        platform.load_cache().unwrap();

        platform
            .build_targets(&["bundles/common".to_string()])
            .await
            .unwrap();

        assert!(dir.path().join("bundles/common").is_dir());
    }

    #[tokio::test]
    async fn building_a_sub_target_namespaces_it_under_the_node_path() {
        let dir = TempDir::new().unwrap();
        write_project(
            dir.path(),
            r#"
            [node."bundles/common"]
            techs = ["js"]
            "#,
        );
        let platform = MakePlatform::init(dir.path(), Some("development".to_string())).unwrap();
        platform.load_cache().unwrap();

        let built = platform
            .build_targets(&["bundles/common/file.js".to_string()])
            .await
            .unwrap();
        assert_eq!(built, vec!["bundles/common/file.js".to_string()]);
    }

    #[tokio::test]
    async fn save_cache_then_load_cache_is_not_stale() {
        let dir = TempDir::new().unwrap();
        write_project(dir.path(), "");
        let platform = MakePlatform::init(dir.path(), Some("development".to_string())).unwrap();
        platform.save_cache().unwrap();

        let dropped = MakePlatform::init(dir.path(), Some("development".to_string()))
            .unwrap()
            .load_cache()
            .unwrap();
        assert!(!dropped);
    }

    #[tokio::test]
    async fn stale_load_cache_leaves_bookkeeping_nil() {
        let dir = TempDir::new().unwrap();
        write_project(dir.path(), "");
        let platform = MakePlatform::init(dir.path(), Some("development".to_string())).unwrap();
        platform.save_cache().unwrap();

        let staged = MakePlatform::init(dir.path(), Some("production".to_string())).unwrap();
        let dropped = staged.load_cache().unwrap();
        assert!(dropped);

        let storage = staged.cache_storage.as_ref().unwrap();
        assert!(!storage.contains(forge_cache::RESERVED_NAMESPACE, "bookkeeping").unwrap());
    }

    #[tokio::test]
    async fn drop_cache_wipes_node_level_entries() {
        let dir = TempDir::new().unwrap();
        write_project(
            dir.path(),
            r#"
            [node."bundles/common"]
            techs = ["js"]
            "#,
        );
        let platform = MakePlatform::init(dir.path(), Some("development".to_string())).unwrap();
        platform.load_cache().unwrap();
        platform
            .build_targets(&["bundles/common".to_string()])
            .await
            .unwrap();

        platform.drop_cache().unwrap();

        let storage = platform.cache_storage.as_ref().unwrap();
        assert!(!storage.contains("nodes", "bundles/common").unwrap());
    }

    #[tokio::test]
    async fn destruct_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write_project(dir.path(), "");
        let mut platform = MakePlatform::init(dir.path(), None).unwrap();
        platform.destruct();
        platform.destruct();
    }

    #[tokio::test]
    async fn build_task_runs_registered_clean_task() {
        let dir = TempDir::new().unwrap();
        write_project(dir.path(), "");
        let platform = MakePlatform::init(dir.path(), None).unwrap();
        platform.load_cache().unwrap();
        assert!(platform.build_task("clean", &[]).await.is_ok());
    }

    #[tokio::test]
    async fn build_task_errors_on_unknown_name() {
        let dir = TempDir::new().unwrap();
        write_project(dir.path(), "");
        let platform = MakePlatform::init(dir.path(), None).unwrap();
        let result = platform.build_task("does-not-exist", &[]).await;
        assert!(matches!(result, Err(PlatformError::UnknownTask { .. })));
    }
}
