// Native binary for Suix - one-shot transaction lookup

use anyhow::{Context, Result};

use suix::config;
use suix::lookup::{lookup_transaction, LookupError};
use suix::present::build_presentation;
use suix::render;
use suix::rpc::HttpTransport;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cfg = config::load().context("Failed to load configuration")?;

    if cfg.digest.trim().is_empty() {
        eprintln!("Please enter a transaction digest.");
        std::process::exit(2);
    }

    let rpc = HttpTransport::new(&cfg.endpoint, cfg.api_key.as_deref(), cfg.rpc_timeout_ms);

    eprintln!("Fetching transaction details...");
    match lookup_transaction(&rpc, &cfg.digest).await {
        Ok(outcome) => {
            match outcome.warning {
                Some(warning) => eprintln!("{warning}"),
                None => eprintln!("Success — see the breakdown below."),
            }
            let model = build_presentation(&outcome.transaction);
            if cfg.plain {
                render::render_plain(&model);
            } else {
                render::render(&model, cfg.raw);
            }
            Ok(())
        }
        Err(LookupError::EmptyDigest) => {
            eprintln!("Please enter a transaction digest.");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("Unable to fetch transaction: {err}");
            std::process::exit(1);
        }
    }
}
