use log::Level;
use web_sys::window;

const STORAGE_PREFIX: &str = "pricing_console_";

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Pricing API origin (e.g., "http://localhost:8000"); empty means same origin
    pub api_origin: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_origin: String::new(),
            log_level: Level::Info,
            debug_mode: false,
            toast_duration_ms: 5000,
        }
    }
}

impl AppSettings {
    /// Create settings from environment/window location
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = is_local_host(&hostname);
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            let read = |key: &str| storage.get_item(&format!("{STORAGE_PREFIX}{key}")).ok().flatten();
            settings.apply_overrides(
                read("api_origin"),
                read("log_level"),
                read("toast_duration_ms"),
            );
        }

        settings
    }

    /// Apply raw overrides as read from localStorage; unparsable values are ignored.
    pub fn apply_overrides(
        &mut self,
        api_origin: Option<String>,
        log_level: Option<String>,
        toast_duration_ms: Option<String>,
    ) {
        if let Some(origin) = api_origin {
            self.api_origin = origin.trim_end_matches('/').to_string();
        }

        if let Some(level) = log_level {
            self.log_level = match level.to_lowercase().as_str() {
                "error" => Level::Error,
                "warn" => Level::Warn,
                "info" => Level::Info,
                "debug" => Level::Debug,
                "trace" => Level::Trace,
                _ => self.log_level,
            };
        }

        if let Some(duration) = toast_duration_ms.and_then(|d| d.parse::<u32>().ok()) {
            self.toast_duration_ms = duration;
        }
    }

    /// Get the full API URL for an endpoint path such as `/api/test_model/`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_origin, path)
    }
}

fn is_local_host(hostname: &str) -> bool {
    hostname == "localhost" || hostname == "127.0.0.1"
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
