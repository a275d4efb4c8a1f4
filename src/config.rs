use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub upload_dir: PathBuf,
    /// Placeholder latency for `/analyze`; no real processing happens.
    pub analysis_delay: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists (for development)
        dotenvy::dotenv().ok();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid PORT value: {}", e))?;

        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        let delay_ms: u64 = env::var("ANALYSIS_DELAY_MS")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid ANALYSIS_DELAY_MS value: {}", e))?;

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (500 * 1024 * 1024).to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid MAX_UPLOAD_BYTES value: {}", e))?;

        Ok(Config {
            port,
            upload_dir,
            analysis_delay: Duration::from_millis(delay_ms),
            max_upload_bytes,
        })
    }
}
