//! Server command implementation

use anyhow::Result;
use finaxis_core::EngineConfig;

pub async fn cmd_serve(
    config: EngineConfig,
    host: &str,
    port: u16,
    allowed_origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting Finaxis web server...");
    println!("   Listening: http://{}:{}", host, port);

    // Origins from the flag plus FINAXIS_ALLOWED_ORIGINS (comma-separated)
    let mut origins = allowed_origins;
    origins.extend(
        std::env::var("FINAXIS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    );
    origins.sort();
    origins.dedup();

    if origins.is_empty() {
        println!("   🌐 CORS: same-origin only");
    } else {
        println!("   🌐 CORS: {}", origins.join(", "));
    }
    println!(
        "   📜 Protocol limits: goal {}-{}, {}-{} periods",
        config.protocol.min_target,
        config.protocol.max_target,
        config.protocol.min_periods,
        config.protocol.max_periods
    );
    println!();
    println!("   Press Ctrl+C to stop");

    let server_config = finaxis_server::ServerConfig {
        allowed_origins: origins,
    };

    finaxis_server::serve_with_config(config, host, port, server_config).await?;

    Ok(())
}
