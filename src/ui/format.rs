//! Display formatting shared by the section widgets

use humansize::{format_size, FormatSizeOptions, WINDOWS};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 1024-based sizes with KB/MB/GB labels, e.g. `1.5 MB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let options = FormatSizeOptions::from(WINDOWS).decimal_places(1);
    let formatted = format_size(bytes, options);
    // humansize spells the kilo unit `kB`
    match formatted.strip_suffix(" kB") {
        Some(value) => format!("{} KB", value),
        None => formatted,
    }
}

/// Backend sizes arrive already scaled to GB.
pub fn format_gb(value: f64) -> String {
    format!("{:.1} GB", value)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Unreported per-process metrics render as `n/a` rather than a fake zero.
pub fn format_optional_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format_percent(v),
        None => "n/a".to_string(),
    }
}

/// `1,234,567`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Cut `s` to at most `max_width` terminal columns, ending in `…` when shortened.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Horizontal fill bar, e.g. `██████░░░░`.
pub fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    "█".repeat(filled) + &"░".repeat(width - filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_bytes() {
        assert_eq!(format_bytes(0), "0 B");
    }

    #[test]
    fn bytes_use_kb_labels() {
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1536 * 1024), "1.5 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024 / 2), "2.5 GB");
    }

    #[test]
    fn optional_percent_distinguishes_unreported() {
        assert_eq!(format_optional_percent(Some(0.0)), "0.0%");
        assert_eq!(format_optional_percent(None), "n/a");
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("postgres", 20), "postgres");
        assert_eq!(truncate_to_width("postgres: writer", 8), "postgre…");
        assert_eq!(truncate_to_width("日本語のプロセス", 5), "日本…");
    }

    #[test]
    fn bar_is_clamped() {
        assert_eq!(bar(50.0, 10), "█████░░░░░");
        assert_eq!(bar(150.0, 4), "████");
        assert_eq!(bar(-5.0, 4), "░░░░");
    }
}
