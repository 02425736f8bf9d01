//! Configuration – reads/writes `~/.gazeos/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gazeos_layout::{LayoutDecl, SectionDecl};
use gazeos_runtime::TrackerConfig;
use gazeos_types::{NavError, ScreenGeometry};

/// Persisted user configuration stored in `~/.gazeos/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Width of the projection surface in points.
    #[serde(default = "default_screen_width")]
    pub screen_width: f64,

    #[serde(default = "default_screen_height")]
    pub screen_height: f64,

    /// Gaze filter coefficient in `(0, 1)`; higher is smoother.  Values at
    /// or beyond the bounds are clamped just inside them.
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,

    /// Blink score above which a frame counts towards a blink gesture.
    #[serde(default = "default_blink_score_threshold")]
    pub blink_score_threshold: f32,

    /// Positive blink frames that must be exceeded before a select fires.
    #[serde(default = "default_blink_frames")]
    pub blink_frames: usize,

    /// Flip incoming points on both axes (front-camera projections).
    #[serde(default)]
    pub mirror_projection: bool,

    /// Log every raw gaze point at debug level.
    #[serde(default)]
    pub gaze_log: bool,

    #[serde(default = "default_go_back_throttle_ms")]
    pub go_back_throttle_ms: u64,

    /// Recorded in session metadata.
    #[serde(default = "default_app_id")]
    pub app_id: String,

    /// Region tree navigated by the shell.  Kept last: TOML tables must
    /// follow plain keys.
    #[serde(default = "default_layout")]
    pub layout: LayoutDecl,
}

fn default_screen_width() -> f64 {
    390.0
}
fn default_screen_height() -> f64 {
    844.0
}
fn default_smoothing() -> f64 {
    0.85
}
fn default_blink_score_threshold() -> f32 {
    0.9
}
fn default_blink_frames() -> usize {
    20
}
fn default_go_back_throttle_ms() -> u64 {
    2000
}
fn default_app_id() -> String {
    "gazeos".to_string()
}

/// Demo storefront: a menu, a product card with a size picker, checkout.
fn default_layout() -> LayoutDecl {
    LayoutDecl {
        sections: vec![
            SectionDecl::group(vec![
                SectionDecl::leaf("open_cart"),
                SectionDecl::leaf("open_profile"),
                SectionDecl::leaf("back"),
            ]),
            SectionDecl::group(vec![
                SectionDecl::leaf("add_to_cart"),
                SectionDecl::group(vec![
                    SectionDecl::leaf("size_s"),
                    SectionDecl::leaf("size_m"),
                    SectionDecl::leaf("size_l"),
                ]),
            ]),
            SectionDecl::leaf("checkout"),
        ],
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            smoothing: default_smoothing(),
            blink_score_threshold: default_blink_score_threshold(),
            blink_frames: default_blink_frames(),
            mirror_projection: false,
            gaze_log: false,
            go_back_throttle_ms: default_go_back_throttle_ms(),
            app_id: default_app_id(),
            layout: default_layout(),
        }
    }
}

impl Config {
    pub fn screen(&self) -> ScreenGeometry {
        ScreenGeometry::new(self.screen_width, self.screen_height)
    }

    pub fn go_back_window(&self) -> Duration {
        Duration::from_millis(self.go_back_throttle_ms)
    }

    /// Runtime view of the tracking-related keys.
    pub fn tracker(&self) -> TrackerConfig {
        TrackerConfig {
            screen: self.screen(),
            smoothing: self.smoothing,
            blink_score_threshold: self.blink_score_threshold,
            blink_frames: self.blink_frames,
            mirror_projection: self.mirror_projection,
            gaze_log: self.gaze_log,
            go_back_window: self.go_back_window(),
            app_id: self.app_id.clone(),
        }
    }
}

/// Return the path to `~/.gazeos/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".gazeos").join("config.toml")
}

/// Load the config from `path`.  Returns `None` if the file does not exist.
pub fn load_from(path: &Path) -> Result<Option<Config>, NavError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).map_err(|e| {
        NavError::Config(format!("failed to read {}: {e}", path.display()))
    })?;
    let mut cfg: Config =
        toml::from_str(&raw).map_err(|e| NavError::Config(format!("failed to parse config: {e}")))?;
    apply_env_overrides(&mut cfg);
    Ok(Some(cfg))
}

/// Apply `GAZEOS_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `GAZEOS_SMOOTHING` | `smoothing` |
/// | `GAZEOS_BLINK_FRAMES` | `blink_frames` |
/// | `GAZEOS_SCREEN_WIDTH` | `screen_width` |
/// | `GAZEOS_SCREEN_HEIGHT` | `screen_height` |
/// | `GAZEOS_GAZE_LOG` | `gaze_log` |
///
/// Values that do not parse are ignored.
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Some(v) = env_parse::<f64>("GAZEOS_SMOOTHING") {
        cfg.smoothing = v;
    }
    if let Some(v) = env_parse::<usize>("GAZEOS_BLINK_FRAMES") {
        cfg.blink_frames = v;
    }
    if let Some(v) = env_parse::<f64>("GAZEOS_SCREEN_WIDTH") {
        cfg.screen_width = v;
    }
    if let Some(v) = env_parse::<f64>("GAZEOS_SCREEN_HEIGHT") {
        cfg.screen_height = v;
    }
    if let Some(v) = env_parse::<bool>("GAZEOS_GAZE_LOG") {
        cfg.gaze_log = v;
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.trim().parse().ok()
}

/// Save the config to `path`, creating its directory if necessary.
pub fn save_to(cfg: &Config, path: &Path) -> Result<(), NavError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| NavError::Config(format!("failed to create config directory: {e}")))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(parent, fs::Permissions::from_mode(0o700)).map_err(|e| {
                NavError::Config(format!("failed to set config directory permissions: {e}"))
            })?;
        }
    }
    let raw = toml::to_string_pretty(cfg)
        .map_err(|e| NavError::Config(format!("failed to serialize config: {e}")))?;
    let write_err = |e: std::io::Error| NavError::Config(format!("failed to write {}: {e}", path.display()));
    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .and_then(|mut f| f.write_all(raw.as_bytes()))
            .map_err(write_err)?;
    }
    #[cfg(not(unix))]
    fs::write(path, raw).map_err(write_err)?;
    Ok(())
}
