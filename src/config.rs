use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;

/// The backend used when `TREATY_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://diplomacy-ledger-api.onrender.com";

/// The application's configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// The base URL of the treaty REST backend.
    pub api_url: Url,
    /// The file backing client-local storage. `None` keeps storage in memory.
    pub storage_path: Option<PathBuf>,
    /// How long the login page waits before navigating to the dashboard.
    pub login_redirect_delay: Duration,
    /// How long the create page waits before navigating to the dashboard.
    pub create_redirect_delay: Duration,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("TREATY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&api_url).context("TREATY_API_URL must be a valid URL")?;

        let storage_path = match env::var("TREATY_STORAGE_PATH") {
            Ok(path) => PathBuf::from(path),
            Err(_) => dirs::home_dir()
                .map(|home| home.join(".treaty-ledger").join("local_storage.json"))
                .context("home directory not found; set TREATY_STORAGE_PATH")?,
        };

        Ok(Self {
            api_url,
            storage_path: Some(storage_path),
            login_redirect_delay: delay_from_env("LOGIN_REDIRECT_DELAY_MS", 1000)?,
            create_redirect_delay: delay_from_env("CREATE_REDIRECT_DELAY_MS", 1500)?,
        })
    }

    /// Creates a `Config` pointing at `api_url` with in-memory storage and no redirect delays.
    pub fn for_backend(api_url: Url) -> Self {
        Self {
            api_url,
            storage_path: None,
            login_redirect_delay: Duration::ZERO,
            create_redirect_delay: Duration::ZERO,
        }
    }
}

fn delay_from_env(key: &str, default_ms: u64) -> Result<Duration> {
    let millis = match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("Invalid {key}"))?,
        Err(_) => default_ms,
    };
    Ok(Duration::from_millis(millis))
}
