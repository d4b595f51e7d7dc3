//! 一括取得テスト
//!
//! 実行方法:
//! ```
//! STUDZONE_USERNAME=21z201 STUDZONE_PASSWORD=... cargo run --example fetch_all
//! ```

use studzone_scraper::{Credentials, PortalConfig, PortalService};
use tower::Service;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ログ設定
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // .envがあれば読み込む
    if let Ok(env_path) = std::fs::canonicalize(".env") {
        println!("Loading .env from: {:?}", env_path);
        for line in std::fs::read_to_string(".env")?.lines() {
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('\'').trim_matches('"');
                if !key.starts_with('#') && !key.is_empty() {
                    std::env::set_var(key, value);
                }
            }
        }
    }

    let username = std::env::var("STUDZONE_USERNAME")?;
    let password = std::env::var("STUDZONE_PASSWORD")?;
    let config = PortalConfig::from_env()?;

    println!("=== Studzone Fetch Test ===");
    println!("Portal: {}", config.base_url);

    let mut service = PortalService::new(config);
    match service.call(Credentials::new(username, password)).await {
        Ok(data) => {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Err(e) => {
            eprintln!("Error ({}): {}", e.http_status(), e);
        }
    }

    Ok(())
}
