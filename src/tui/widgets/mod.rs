pub mod greeting;
pub mod lyrics;
pub mod now_playing;
pub mod previous;
pub mod root;

/// Truncate to `max` characters, ending with an ellipsis when cut.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}
