//! LRC tag stripping
//!
//! Synced lyrics arrive as `[mm:ss.xx] line` with optional metadata tags
//! such as `[ar:Artist]`. The panel shows the words only.

/// Remove timestamps and metadata tags, keeping blank lines between verses.
pub fn strip_tags(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !is_metadata(line))
        .map(|line| strip_timestamps(line).to_string())
        .collect()
}

/// `[ti:Title]`, `[ar:Artist]`, `[length: 03:12]` and friends.
fn is_metadata(line: &str) -> bool {
    let Some(inner) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) else {
        return false;
    };
    let Some((tag, _)) = inner.split_once(':') else {
        return false;
    };
    !tag.is_empty() && tag.chars().all(|c| c.is_ascii_alphabetic())
}

/// Drop every leading `[mm:ss.xx]` group.
fn strip_timestamps(mut line: &str) -> &str {
    while let Some(rest) = line.strip_prefix('[') {
        let Some(end) = rest.find(']') else { break };
        if !is_timestamp(&rest[..end]) {
            break;
        }
        line = &rest[end + 1..];
    }
    line.trim()
}

fn is_timestamp(s: &str) -> bool {
    let mut parts = s.split([':', '.']);
    let (Some(min), Some(sec)) = (parts.next(), parts.next()) else {
        return false;
    };
    let numeric = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
    numeric(min) && numeric(sec) && parts.all(numeric)
}
