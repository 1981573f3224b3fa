use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod defaults;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub history: HistoryConfig,
    pub poll: PollConfig,
    pub artwork: ArtworkConfig,
    pub lyrics: LyricsConfig,
    pub greeting: GreetingConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Scrobble history endpoint. Fetched as-is unless `user` is set.
    pub url: String,
    /// Last.fm user name; enables the direct `user.getrecenttracks` query.
    pub user: Option<String>,
    pub api_key: Option<String>,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupBy {
    #[default]
    ArtistTitle,
    Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_secs: u64,
    /// How many previously played tracks to keep on screen.
    pub previous_max: usize,
    pub dedup: DedupBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkStep {
    Search,
    Itunes,
    Thumbnail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkConfig {
    /// Sources tried in order; the placeholder always comes last.
    pub order: Vec<ArtworkStep>,
    /// Song search endpoint returning a direct art URL. Skipped when unset.
    pub search_url: Option<String>,
    pub itunes_url: String,
    /// Probe .webp/.gif/.jpg variants of iTunes art before the plain upgrade.
    pub try_animated: bool,
    pub placeholder: String,
    pub cache_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LyricsConfig {
    pub enabled: bool,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingEntry {
    pub text: String,
    pub lang: String,
    /// Shown under the greeting; the label is hidden when absent.
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GreetingConfig {
    pub interval_ms: u64,
    pub slide_ms: u64,
    pub entries: Vec<GreetingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Program used to open a track's source URL (defaults to `open`/`xdg-open`).
    pub open_command: Option<String>,
    pub mouse: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        defaults::history()
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        defaults::poll()
    }
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        defaults::artwork()
    }
}

impl Default for LyricsConfig {
    fn default() -> Self {
        defaults::lyrics()
    }
}

impl Default for GreetingConfig {
    fn default() -> Self {
        defaults::greeting()
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            open_command: None,
            mouse: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        defaults::log()
    }
}

impl HistoryConfig {
    /// Full request URL, adding the `user.getrecenttracks` query in direct mode.
    pub fn request_url(&self) -> String {
        let Some(user) = self.user.as_deref() else {
            return self.url.clone();
        };
        let sep = if self.url.contains('?') { '&' } else { '?' };
        let mut url = format!(
            "{}{}method=user.getrecenttracks&user={}&format=json&limit={}",
            self.url,
            sep,
            urlencoding::encode(user),
            self.limit
        );
        if let Some(key) = &self.api_key {
            url.push_str(&format!("&api_key={}", urlencoding::encode(key)));
        }
        url
    }
}

impl HistoryConfig {
    /// What is still missing before the Last.fm API can answer, if anything.
    /// Proxy URLs are taken as ready.
    pub fn setup_hint(&self) -> Option<&'static str> {
        if !self.url.contains("audioscrobbler.com") {
            return None;
        }
        match (&self.user, &self.api_key) {
            (None, _) => Some("set [history].user and [history].api_key in the config file"),
            (Some(_), None) => Some("set [history].api_key in the config file"),
            _ => None,
        }
    }
}

impl UiConfig {
    pub fn open_program(&self) -> &str {
        match self.open_command.as_deref() {
            Some(cmd) => cmd,
            None if cfg!(target_os = "macos") => "open",
            None => "xdg-open",
        }
    }
}

pub fn project_dirs() -> anyhow::Result<ProjectDirs> {
    ProjectDirs::from("dev", "nowplaying", "nowplaying").context("ProjectDirs unavailable")
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
        }
        let cfg = Config::default();
        let raw = toml::to_string_pretty(&cfg).context("serialize default config")?;
        fs::write(&path, raw).with_context(|| format!("write {}", path.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&path, fs::Permissions::from_mode(0o600));
        }
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    parse(&raw).with_context(|| format!("parse {}", path.display()))
}

pub fn parse(raw: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str::<Config>(raw)?)
}
