//! Small UI helpers: sizes, truncation, masking.

pub fn gb(v: f64) -> String {
    format!("{v:.2} GB")
}

pub fn truncate_middle(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max { return s.to_string(); }
    if max <= 3 { return "...".into(); }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    let head: String = chars[..left].iter().collect();
    let tail: String = chars[chars.len() - right..].iter().collect();
    format!("{head}...{tail}")
}

pub fn mask(secret: &str) -> String {
    "•".repeat(secret.chars().count())
}

/// Gauge ratio from a 0..100 percentage; out-of-range values are clamped.
pub fn ratio(pct: f64) -> f64 {
    (pct / 100.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_hostnames_in_the_middle() {
        assert_eq!(truncate_middle("short", 10), "short");
        assert_eq!(truncate_middle("fileserver01.corp.example.com", 12), "file...e.com");
        assert_eq!(truncate_middle("abcdef", 3), "...");
    }

    #[test]
    fn masks_per_character_and_clamps_ratio() {
        assert_eq!(mask("pässword").chars().count(), 8);
        assert_eq!(ratio(150.0), 1.0);
        assert_eq!(ratio(-1.0), 0.0);
        assert_eq!(gb(1.5), "1.50 GB");
    }
}
