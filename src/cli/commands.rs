use crate::api::{LookupEngine, ProviderRegistry, ReqwestBackend, DEFAULT_TIMEOUT};
use crate::cli::{prompt_ip, providers_table, resolve_ip, result_table, summary_line};
use crate::error::{AppError, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Look up where an IP address lives by asking several public geolocation services at once
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit logs as JSON (log level is controlled by RUST_LOG)
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Query every provider for an IP address (the default command)
    Lookup(LookupArgs),

    /// List the built-in providers and their field mappings
    Providers,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Lookup(LookupArgs::default())
    }
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct LookupArgs {
    /// IPv4 or IPv6 address; prompts when omitted
    pub ip: Option<String>,

    /// Per-provider timeout in seconds (default: 5)
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Also show providers that returned no data
    #[arg(short, long)]
    pub all: bool,

    /// Print each record as a JSON line instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Default for LookupArgs {
    fn default() -> Self {
        Self {
            ip: None,
            timeout: DEFAULT_TIMEOUT.as_secs(),
            all: false,
            json: false,
        }
    }
}

/// CLI application
pub struct App {
    registry: ProviderRegistry,
}

impl App {
    /// Create a new CLI application over the given providers
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Engine with a fresh HTTP client bounded by `timeout`
    fn engine(&self, timeout: Duration) -> Result<LookupEngine> {
        let backend = ReqwestBackend::new(timeout)?;
        Ok(LookupEngine::new(
            Arc::new(backend),
            self.registry.clone(),
            timeout,
        ))
    }

    /// Run a single command
    pub async fn run_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Lookup(args) => self.lookup(&args).await.map(|_| ()),
            Commands::Providers => {
                println!("{}", providers_table(&self.registry));
                Ok(())
            },
        }
    }

    /// Look up one address and print records as providers answer.
    ///
    /// Returns how many providers produced a usable location.
    async fn lookup(&self, args: &LookupArgs) -> Result<usize> {
        if self.registry.is_empty() {
            return Err(AppError::Cli("no providers are registered".to_string()));
        }

        let ip = match &args.ip {
            Some(ip) => resolve_ip(ip)?,
            None => prompt_ip()?,
        }
        .to_string();

        let engine = self.engine(Duration::from_secs(args.timeout))?;
        let mut stream = engine.lookup(&ip);
        let total = stream.expected();

        let progress = if args.json {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(ProgressStyle::with_template(
                "{spinner:.cyan} {pos}/{len} providers answered",
            )?);
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };

        let mut usable = 0;
        while let Some(result) = stream.next().await {
            progress.inc(1);
            if result.is_usable() {
                usable += 1;
            } else {
                warn!(provider = %result.provider, status = %result.status, "provider returned no data");
                if !args.all {
                    continue;
                }
            }

            if args.json {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                progress.suspend(|| println!("{}", result_table(&result)));
            }
        }
        progress.finish_and_clear();

        info!(ip = %ip, usable, total, "lookup finished");
        if !args.json {
            println!("{}", summary_line(&ip, usable, total));
        }
        Ok(usable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProviderSpec;

    fn test_app(base_url: &str, paths: &[&str]) -> App {
        let providers = paths
            .iter()
            .map(|path| {
                ProviderSpec::new(
                    path,
                    &format!("{}/{}/1.1.1.1", base_url, path),
                    "country",
                    "city",
                    "isp",
                    "org",
                )
            })
            .collect();
        App::new(ProviderRegistry::new(providers))
    }

    fn lookup_args(ip: &str) -> LookupArgs {
        LookupArgs {
            ip: Some(ip.to_string()),
            json: true,
            ..LookupArgs::default()
        }
    }

    #[test]
    fn test_cli_defaults_to_lookup() {
        let cli = Cli::try_parse_from(["ip-location-finder"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Commands::default());
        assert_eq!(LookupArgs::default().timeout, 5);
    }

    #[test]
    fn test_cli_parses_lookup_flags() {
        let cli = Cli::try_parse_from([
            "ip-location-finder",
            "lookup",
            "1.1.1.1",
            "--timeout",
            "2",
            "--all",
            "--log-json",
        ])
        .unwrap();
        assert!(cli.log_json);
        match cli.command.unwrap() {
            Commands::Lookup(args) => {
                assert_eq!(args.ip.as_deref(), Some("1.1.1.1"));
                assert_eq!(args.timeout, 2);
                assert!(args.all);
                assert!(!args.json);
            },
            _ => panic!("Expected lookup command"),
        }
    }

    #[test]
    fn test_cli_rejects_zero_timeout() {
        assert!(Cli::try_parse_from(["ip-location-finder", "lookup", "--timeout", "0"]).is_err());
    }

    #[tokio::test]
    async fn test_cli_lookup_counts_usable_providers() {
        let mut server = mockito::Server::new_async().await;
        let _a = server
            .mock("GET", "/a/9.9.9.9")
            .with_status(200)
            .with_body(r#"{"country":"Switzerland","city":"Zurich","isp":"Quad9","org":"Quad9"}"#)
            .create_async()
            .await;
        let _b = server
            .mock("GET", "/b/9.9.9.9")
            .with_status(503)
            .create_async()
            .await;

        let app = test_app(&server.url(), &["a", "b"]);
        let usable = app.lookup(&lookup_args("9.9.9.9")).await.unwrap();
        assert_eq!(usable, 1);
    }

    #[tokio::test]
    async fn test_cli_lookup_rejects_invalid_ip() {
        let app = test_app("http://127.0.0.1:1", &["a"]);
        match app.lookup(&lookup_args("999.1.1.1")).await {
            Err(AppError::Cli(msg)) => assert!(msg.contains("999.1.1.1")),
            other => panic!("Expected CliError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cli_lookup_without_providers_fails() {
        let app = App::new(ProviderRegistry::new(Vec::new()));
        match app.lookup(&lookup_args("9.9.9.9")).await {
            Err(AppError::Cli(msg)) => assert!(msg.contains("no providers")),
            other => panic!("Expected CliError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cli_providers_lists_registry_offline() {
        // Points at a closed port: listing must not touch the network.
        let app = test_app("http://127.0.0.1:1", &["a", "b"]);
        assert!(app.run_command(Commands::Providers).await.is_ok());
    }
}
