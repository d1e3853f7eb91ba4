use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use multi_get::args::{Args, Commands};
use multi_get::config::{Config, Settings};
use multi_get::observer::Reporter;
use multi_get::{MultiGet, StatusPolicy, logging, utils};
use std::time::Duration;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let settings = Settings::load().unwrap_or_else(|e| {
        warn!("Ignoring settings: {:#}", e);
        Settings::default()
    });

    match args.command {
        Some(Commands::MultiGet {
            url,
            count,
            destination,
            timeout,
            strict,
        }) => {
            let config = Config::resolve(&url, count, destination, &settings)
                .context("Unable to validate command-line arguments, unable to continue")?;

            let timeout = timeout.map(Duration::from_secs).or(settings.timeout());
            let user_agent = settings
                .user_agent
                .as_deref()
                .unwrap_or(utils::DEFAULT_USER_AGENT);
            let client = utils::build_client(user_agent, timeout)?;

            let policy = if strict || settings.strict.unwrap_or(false) {
                StatusPolicy::Strict
            } else {
                StatusPolicy::Lenient
            };

            let reporter = Reporter::console();
            let report = MultiGet::new(client)
                .reporter(reporter.clone())
                .status_policy(policy)
                .run(&config)
                .await
                .with_context(|| format!("Download of {} failed", config.url))?;

            if let Some(destination) = report.destination {
                reporter.println(format!(
                    "✅ Saved {} bytes to {}",
                    report.bytes,
                    destination.display()
                ));
            }
        }
        None => {
            Args::command().print_help()?;
        }
    }

    Ok(())
}
