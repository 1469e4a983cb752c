//! Output formatting utilities

use console::{style, Style};

use gantry_patch::{FileStatus, PatchReport};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}

/// Print a patch report as text
pub fn print_report(report: &PatchReport) {
    let title = if report.dry_run {
        "Patch Results (dry run)"
    } else {
        "Patch Results"
    };
    println!("{}", header(title));
    println!();

    for file in &report.files {
        let symbol = match file.status {
            FileStatus::Modified => style("~").green().bold(),
            FileStatus::Unchanged => style("=").dim(),
            FileStatus::Skipped => style("!").yellow().bold(),
        };
        let path = file
            .path
            .as_ref()
            .map(|p| path_style().apply_to(p.display()).to_string())
            .unwrap_or_else(|| style("<unresolved>").dim().to_string());
        println!(
            "  {} {:<16} {} {}",
            symbol,
            file.target.as_str(),
            path,
            style(status_label(file.status, report.dry_run)).dim()
        );
    }

    if !report.warnings.is_empty() {
        println!();
        for w in &report.warnings {
            warning(&w.to_string());
        }
    }

    println!();
    let modified = report.modified_count();
    if modified == 0 && report.warnings.is_empty() {
        success("Native projects are up to date");
    } else if report.dry_run {
        info(&format!("{} file(s) would be modified", modified));
    } else {
        success(&format!("Modified {} file(s)", modified));
    }
}

fn status_label(status: FileStatus, dry_run: bool) -> &'static str {
    match (status, dry_run) {
        (FileStatus::Modified, true) => "would modify",
        (FileStatus::Modified, false) => "modified",
        (FileStatus::Unchanged, _) => "up to date",
        (FileStatus::Skipped, _) => "skipped",
    }
}
