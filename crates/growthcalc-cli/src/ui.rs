//! UI helpers for CLI display.

use console::{style, StyledObject};

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Build a `"[TAG] text"` line, colored unless `NO_COLOR` is set.
fn tagged(tag: &str, text: &str, paint: fn(StyledObject<String>) -> StyledObject<String>) -> String {
    let tag = format!("[{tag}]");
    if is_color_disabled() {
        format!("{tag} {text}")
    } else {
        format!("{} {text}", paint(style(tag)).bold())
    }
}

/// Print a styled header.
pub fn print_header(text: &str) {
    if is_color_disabled() {
        println!("=== {text} ===");
    } else {
        println!("{}", style(format!("=== {text} ===")).bold().cyan());
    }
}

/// Print a success message.
pub fn print_success(text: &str) {
    println!("{}", tagged("OK", text, |s| s.green()));
}

/// Print a warning message.
pub fn print_warning(text: &str) {
    eprintln!("{}", tagged("WARN", text, |s| s.yellow()));
}

/// Print an error message.
pub fn print_error(text: &str) {
    eprintln!("{}", tagged("ERROR", text, |s| s.red()));
}
