//! Output formatting utilities

use console::{style, Style};

use shiplog_changelog::ChangelogWarning;

/// Print a success message
pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a pipeline warning
pub fn warning(warning: &ChangelogWarning) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), warning);
}

/// Print an info message
pub fn info(message: &str) {
    eprintln!("{} {}", style("→").blue(), message);
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}
