//! Terminal status output. Handles environment detection (CI, TTY, NO_COLOR)
//! and gracefully degrades when terminal features aren't available.
//!
//! # Examples
//!
//! ```no_run
//! use forge_cli::ui;
//!
//! ui::init_colors();
//! ui::success("build successful");
//! ui::error("failed to parse manifest");
//! ```

// Submodules
mod messages;

// Re-exports for convenient access
pub use messages::{debug, error, info, success, warning};

/// Check if running in a CI environment.
///
/// Detects common CI environment variables from GitHub Actions, GitLab CI,
/// CircleCI, and Travis CI.
///
/// # Returns
///
/// `true` if running in CI
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
}

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
///
/// # Returns
///
/// `true` if colors should be used
pub fn should_use_color() -> bool {
    // NO_COLOR environment variable disables colors
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // FORCE_COLOR enables colors even in non-TTY
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Check if stderr is a terminal
    console::user_attended_stderr()
}

/// Initialize color support based on environment.
///
/// Should be called early in the application lifecycle (e.g., in main).
/// Respects NO_COLOR and FORCE_COLOR environment variables.
///
/// **Note**: This function currently checks color support but doesn't modify
/// global state. The `owo-colors` crate automatically respects NO_COLOR and
/// terminal capabilities. This function is provided for explicit initialization
/// and future extensibility.
///
/// # Examples
///
/// ```no_run
/// use forge_cli::ui;
///
/// ui::init_colors();
/// // ... rest of application
/// ```
pub fn init_colors() {
    // owo-colors automatically respects NO_COLOR and terminal capabilities.
    // This function performs validation and can be extended for custom logic.
    let _ = should_use_color();
}
