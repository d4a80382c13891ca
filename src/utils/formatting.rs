//! Formatting utilities for display

/// Format a size in megabytes, e.g. `1.26` -> `"1.3 MB"`, `0.04` -> `"40 KB"`
pub fn format_size_mb(size_mb: f64) -> String {
    if !size_mb.is_finite() || size_mb < 0.0 {
        return "?".to_string();
    }
    if size_mb < 0.1 {
        format!("{:.0} KB", size_mb * 1000.0)
    } else {
        format!("{:.1} MB", size_mb)
    }
}

/// Secondary line of a file card: size and location when known
pub fn format_card_meta(size_mb: Option<f64>, path: Option<&str>) -> Option<String> {
    let parts: Vec<String> = size_mb
        .map(format_size_mb)
        .into_iter()
        .chain(path.filter(|p| !p.is_empty()).map(str::to_string))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}
