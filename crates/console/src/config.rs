use advice::AdviceSettings;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/console.toml";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8501";

const DEFAULT_LOTTIE_PLAYER_URL: &str =
    "https://unpkg.com/@lottiefiles/lottie-player@2.0.8/dist/lottie-player.js";
const DEFAULT_ROBOT_ANIMATION: &str = "https://assets4.lottiefiles.com/packages/lf20_u4yrau.json";
const DEFAULT_HEART_ANIMATION: &str =
    "https://assets10.lottiefiles.com/packages/lf20_qp1q7mct.json";
const DEFAULT_CELEBRATE_ANIMATION: &str =
    "https://assets2.lottiefiles.com/packages/lf20_jbrw3hcz.json";

#[derive(Debug, Default, Deserialize)]
pub struct ConsoleConfig {
    pub listen_addr: Option<String>,
    #[serde(default)]
    pub advice: AdviceSettings,
    #[serde(default)]
    pub assets: AssetConfig,
}

/// Lottie animations played in the browser. Purely cosmetic.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    #[serde(default = "default_lottie_player_url")]
    pub lottie_player_url: String,
    #[serde(default = "default_robot_animation")]
    pub robot_animation: String,
    #[serde(default = "default_heart_animation")]
    pub heart_animation: String,
    #[serde(default = "default_celebrate_animation")]
    pub celebrate_animation: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            lottie_player_url: default_lottie_player_url(),
            robot_animation: default_robot_animation(),
            heart_animation: default_heart_animation(),
            celebrate_animation: default_celebrate_animation(),
        }
    }
}

impl ConsoleConfig {
    pub fn listen_addr(&self) -> &str {
        self.listen_addr.as_deref().unwrap_or(DEFAULT_LISTEN_ADDR)
    }
}

pub fn parse_console_config(raw: &str) -> anyhow::Result<ConsoleConfig> {
    let config: ConsoleConfig = toml::from_str(raw)?;
    if config.advice.timeout_ms == 0 {
        anyhow::bail!("advice.timeout_ms must be greater than zero");
    }
    Ok(config)
}

/// Loads the given file, or the default path when it exists, or falls back to
/// built-in defaults. An explicitly named file must exist.
pub fn load_console_config(path: Option<&Path>) -> anyhow::Result<ConsoleConfig> {
    let path = match path {
        Some(path) => path,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if !default_path.exists() {
                tracing::info!(path = DEFAULT_CONFIG_PATH, "no config file, using defaults");
                return Ok(ConsoleConfig::default());
            }
            default_path
        }
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_console_config(&raw).with_context(|| format!("failed to parse config {}", path.display()))
}

fn default_lottie_player_url() -> String {
    DEFAULT_LOTTIE_PLAYER_URL.to_string()
}

fn default_robot_animation() -> String {
    DEFAULT_ROBOT_ANIMATION.to_string()
}

fn default_heart_animation() -> String {
    DEFAULT_HEART_ANIMATION.to_string()
}

fn default_celebrate_animation() -> String {
    DEFAULT_CELEBRATE_ANIMATION.to_string()
}
