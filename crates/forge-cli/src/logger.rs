//! Tracing initialization for the CLI binary.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Precedence: `RUST_LOG` always wins when neither `--verbose` nor `--quiet`
/// is passed; otherwise `--verbose` selects `forge=debug` and `--quiet`
/// selects `forge=error`, falling back to `forge=info`.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("forge=debug")
    } else if quiet {
        EnvFilter::new("forge=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("forge=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact()
        .init();
}

fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_colors_respects_no_color() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
        }
        assert!(!should_use_colors());
        unsafe {
            std::env::remove_var("NO_COLOR");
        }
    }
}
