//! Demo configuration, persisted as JSON in the platform config dir

use serde::{Deserialize, Serialize};

/// What the demo window shows. Loaded from
/// `<config dir>/marquee-demo/config.json` when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    pub text: String,
    pub duration_ms: u64,
    pub repeat: bool,
    pub inline: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            text: "This headline is far too long for the window, so it scrolls \
                   into view instead of truncating."
                .to_string(),
            duration_ms: 3000,
            repeat: true,
            inline: false,
        }
    }
}

impl DemoConfig {
    pub fn load() -> Self {
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("marquee-demo").join("config.json");
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = serde_json::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("marquee-demo");
            std::fs::create_dir_all(&app_dir)?;
            let config_path = app_dir.join("config.json");
            let content = serde_json::to_string_pretty(self)?;
            std::fs::write(config_path, content)?;
        }
        Ok(())
    }
}
