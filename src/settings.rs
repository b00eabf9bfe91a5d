use crate::common::env::FromEnv;
use std::env;
use std::net::IpAddr;
use std::ops::Deref;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::Level;

const DEFAULT_DIRECTORY_PAGE_SIZE: usize = 1000;

pub struct AppSettings {
    pub app_component: String,
    pub level: Level,
    pub app_host: IpAddr,
    pub app_port: u16,

    pub backend_base_url: String,
    pub backend_service_key: String,
    pub backend_request_timeout: Duration,

    /// Page size used when walking the directory provider's account listing.
    pub directory_page_size: usize,
}

impl AppSettings {
    pub fn load_from_env() -> anyhow::Result<Self> {
        let _ = dotenv::dotenv();

        let app_component = env::var("APP_COMPONENT")?;
        let level = Level::from_env("LOG_LEVEL")?;
        let app_host = IpAddr::from_env("APP_HOST")?;
        let app_port = u16::from_env("APP_PORT")?;

        let mut backend_base_url = env::var("BACKEND_BASE_URL")?;
        while backend_base_url.ends_with('/') {
            backend_base_url.pop();
        }
        let backend_service_key = env::var("BACKEND_SERVICE_KEY")?;
        let backend_request_timeout_secs = u64::from_env("BACKEND_REQUEST_TIMEOUT_SECS")?;
        let backend_request_timeout = Duration::from_secs(backend_request_timeout_secs);

        let directory_page_size =
            usize::from_env_or("DIRECTORY_PAGE_SIZE", DEFAULT_DIRECTORY_PAGE_SIZE)?;

        Ok(AppSettings {
            app_component,
            level,
            app_host,
            app_port,

            backend_base_url,
            backend_service_key,
            backend_request_timeout,

            directory_page_size,
        })
    }

    pub fn get() -> &'static AppSettings {
        settings()
    }
}

pub fn settings() -> &'static AppSettings {
    static SETTINGS: LazyLock<AppSettings> =
        LazyLock::new(|| AppSettings::load_from_env().expect("Failed to load settings"));
    SETTINGS.deref()
}
