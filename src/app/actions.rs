#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Start a pass now (still single-flight).
    Refresh,
    /// Open the now-playing track's source URL.
    OpenSource,
    /// Mouse click at terminal cell (column, row).
    Click(u16, u16),
    LyricsUp,
    LyricsDown,
    Resize,
}
