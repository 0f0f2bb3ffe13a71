use anyhow::{anyhow, Result};
use clap::Parser;
use std::env;

/// Public mainnet gateway used when no endpoint is supplied.
pub const DEFAULT_ENDPOINT: &str = "https://sui-mainnet.gateway.tatum.io/";

/// Suix - Sui Transaction Inspector
///
/// Looks up a transaction block by digest and prints a human-readable
/// breakdown. Configuration priority: CLI args > Environment variables >
/// Defaults.
#[derive(Parser, Debug)]
#[command(name = "suix")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sui transaction inspector", long_about = None)]
pub struct CliArgs {
    /// Transaction digest to look up
    pub digest: Option<String>,

    /// Sui JSON-RPC endpoint URL
    #[arg(long, env = "SUI_RPC_URL")]
    pub endpoint: Option<String>,

    /// API key forwarded as the x-api-key header
    #[arg(long, env = "SUI_RPC_API_KEY")]
    pub api_key: Option<String>,

    /// RPC request timeout in milliseconds (1000-60000)
    #[arg(long, env = "RPC_TIMEOUT_MS")]
    pub rpc_timeout_ms: Option<u64>,

    /// Use the plain renderer (no styling, raw JSON expanded)
    #[arg(long)]
    pub plain: bool,

    /// Expand the raw response section
    #[arg(long)]
    pub raw: bool,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// As submitted; may be empty, which the lookup rejects before any
    /// network call.
    pub digest: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub rpc_timeout_ms: u64,
    pub plain: bool,
    pub raw: bool,
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Validate URL format (basic check)
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

/// Load configuration from CLI args and environment variables
pub fn load() -> Result<Config> {
    from_args(CliArgs::parse())
}

pub fn from_args(args: CliArgs) -> Result<Config> {
    let endpoint = args
        .endpoint
        .or_else(|| env::var("SUI_RPC_URL").ok())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    validate_url(&endpoint, "SUI_RPC_URL")?;

    let api_key = args
        .api_key
        .or_else(|| env::var("SUI_RPC_API_KEY").ok())
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    let rpc_timeout_ms = args
        .rpc_timeout_ms
        .or_else(|| env::var("RPC_TIMEOUT_MS").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(15_000);
    let rpc_timeout_ms = validate_in_range(rpc_timeout_ms, 1_000, 60_000, "RPC_TIMEOUT_MS")?;

    Ok(Config {
        digest: args.digest.unwrap_or_default(),
        endpoint,
        api_key,
        rpc_timeout_ms,
        plain: args.plain,
        raw: args.raw,
    })
}
