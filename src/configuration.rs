use config::{Config, ConfigError, Environment};
use resolve_path::PathResolveExt;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_IMAGES_PATH: &str = "comics";
pub const DEFAULT_VK_API_VERSION: &str = "5.81";
pub const DEFAULT_VK_API_URL: &str = "https://api.vk.com/method";
pub const DEFAULT_XKCD_URL: &str = "https://xkcd.com";

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub images_path: String,
    pub vk_access_token: String,
    pub vk_group_id: u64,
    pub vk_api_version: String,
    pub vk_api_url: String,
    pub xkcd_url: String,
}

impl Settings {
    /// Defaults, then the optional config file, then the process environment.
    pub fn new(config_file: &str) -> Result<Self, ConfigError> {
        Self::load(config_file, Environment::default())
    }

    fn load(config_file: &str, environment: Environment) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("images_path", DEFAULT_IMAGES_PATH)?
            .set_default("vk_api_version", DEFAULT_VK_API_VERSION)?
            .set_default("vk_api_url", DEFAULT_VK_API_URL)?
            .set_default("xkcd_url", DEFAULT_XKCD_URL)?
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(environment)
            .build()?;
        builder.try_deserialize()
    }

    pub fn images_dir(&self) -> PathBuf {
        self.images_path.resolve().into_owned()
    }
}
