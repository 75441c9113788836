//! Text formatting for the diagnostic stream.

use terminal_size::{terminal_size, Width};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Horizontal rule under a tier banner, capped at 72 columns.
pub fn rule() -> String {
    "─".repeat(get_term_width().min(72))
}

/// ` - pixel sad:            [OK]`
pub fn status_line(label: &str, ok: bool) -> String {
    format!(
        " - {:<21} [{}]",
        format!("{label}:"),
        if ok { "OK" } else { "FAILED" }
    )
}
