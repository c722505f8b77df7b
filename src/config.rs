use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_filename")]
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Origin the pages are fetched from and that asset URLs resolve against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Root-relative page paths to mirror, processed in declaration order.
    #[serde(default = "default_pages")]
    pub pages: Vec<String>,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    #[serde(default)]
    pub logging: LogConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
            filename: default_log_filename(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            pages: default_pages(),
            output_dir: default_output_dir(),
            user_agent: default_user_agent(),
            request_timeout: default_request_timeout(),
            logging: LogConfig::default(),
        }
    }
}

impl Config {
    /// Reads `config.toml` when present; runs on built-in defaults otherwise,
    /// so the tool works with no arguments and no config file.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            let config = Config::default();
            config.validate()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(ConfigError::FileRead)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::MissingField("base_url".to_string()).into());
        }
        if !self.base_url.starts_with("http") {
            return Err(ConfigError::InvalidValue(format!(
                "base_url must start with http(s): {}",
                self.base_url
            ))
            .into());
        }

        if self.pages.is_empty() {
            return Err(ConfigError::InvalidValue("pages cannot be empty".to_string()).into());
        }
        for page in &self.pages {
            if !page.starts_with('/') {
                return Err(ConfigError::InvalidValue(format!(
                    "page paths must be root-relative: {}",
                    page
                ))
                .into());
            }
        }

        if self.output_dir.is_empty() {
            return Err(ConfigError::MissingField("output_dir".to_string()).into());
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::MissingField("user_agent".to_string()).into());
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::InvalidValue(
                "request_timeout must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    "https://www.bronxvillefamilydental.com".to_string()
}

fn default_pages() -> Vec<String> {
    [
        "/",
        "/about-us/",
        "/our-services/",
        "/new-patients/",
        "/contact-us/",
        "/about-us/meet-our-doctors/",
        "/about-us/meet-our-team/",
        "/new-patients/patient-reviews/",
        "/new-patients/dental-membership-plan/",
        "/our-services/invisalign/",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_output_dir() -> String {
    "site".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36"
        .to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_filename() -> String {
    "mirror.log".to_string()
}
