use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_host: String,
    pub bind_port: u16,
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_host = env::var("BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let bind_port = env::var("BIND_PORT")
            .ok()
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or_else(|| {
                warn!("BIND_PORT not set or invalid, using default 3000");
                3000
            });

        // Anything other than an explicit opt-out keeps the demo practice data.
        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .map(|raw| raw != "false" && raw != "0")
            .unwrap_or(true);

        Self {
            bind_host,
            bind_port,
            seed_demo_data,
        }
    }
}
