//! Robots-Gate main entry point
//!
//! This is the command-line interface for the Robots-Gate robots.txt checker.

use anyhow::Context;
use clap::Parser;
use robots_gate::config::{load_config_or_default, Config};
use robots_gate::RobotsTxt;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Robots-Gate: a robots.txt pre-fetch gate
///
/// Fetches the robots.txt of each URL's origin (once per origin) and reports
/// whether a crawler may fetch the URL.
#[derive(Parser, Debug)]
#[command(name = "robots-gate")]
#[command(version)]
#[command(about = "Check URLs against their site's robots.txt", long_about = None)]
struct Cli {
    /// URLs to check
    #[arg(value_name = "URL", required = true)]
    urls: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// User-agent group to evaluate (defaults to the configured agent, "*")
    #[arg(short, long)]
    agent: Option<String>,

    /// User-Agent header to send when fetching robots.txt
    #[arg(short, long, value_name = "UA")]
    user_agent: Option<String>,

    /// Print the Disallow patterns for each URL's origin instead of a verdict
    #[arg(long)]
    disallowed: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Exit status when at least one URL could not be checked
const EXIT_ERROR: u8 = 1;

/// Exit status when every URL was checked and at least one is disallowed
const EXIT_DISALLOWED: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref()).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            cli.config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<defaults>".to_string())
        )
    })?;

    let robots = build_engine(&config, cli.user_agent.as_deref())?;
    let agent = cli
        .agent
        .clone()
        .unwrap_or_else(|| config.evaluation.default_agent.clone());

    tracing::info!(
        "Checking {} URL(s) as agent '{}' (User-Agent: {})",
        cli.urls.len(),
        agent,
        robots.user_agent()
    );

    let status = if cli.disallowed {
        print_disallowed(&robots, &cli.urls, &agent).await
    } else {
        print_verdicts(&robots, &cli.urls, &agent).await
    };

    Ok(ExitCode::from(status))
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("robots_gate=warn,warn"),
            1 => EnvFilter::new("robots_gate=info,warn"),
            2 => EnvFilter::new("robots_gate=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_engine(config: &Config, user_agent: Option<&str>) -> anyhow::Result<RobotsTxt> {
    let mut robots = RobotsTxt::from_config(config).context("Failed to build robots engine")?;
    if let Some(user_agent) = user_agent {
        robots.set_user_agent(user_agent);
    }
    Ok(robots)
}

/// Prints `allowed <url>` or `disallowed <url>` for every URL
async fn print_verdicts(robots: &RobotsTxt, urls: &[String], agent: &str) -> u8 {
    let mut status = 0;

    for url in urls {
        match robots.is_allowed_for(url, agent).await {
            Ok(true) => println!("allowed {}", url),
            Ok(false) => {
                println!("disallowed {}", url);
                if status == 0 {
                    status = EXIT_DISALLOWED;
                }
            }
            Err(e) => {
                tracing::error!("{}: {}", url, e);
                status = EXIT_ERROR;
            }
        }
    }

    status
}

/// Prints each URL's origin Disallow patterns, one per line, under a header
async fn print_disallowed(robots: &RobotsTxt, urls: &[String], agent: &str) -> u8 {
    let mut status = 0;

    for url in urls {
        match robots.get_disallowed_for(url, agent).await {
            Ok(patterns) => {
                println!("{} ({} pattern(s))", url, patterns.len());
                for pattern in patterns {
                    println!("  {}", pattern);
                }
            }
            Err(e) => {
                tracing::error!("{}: {}", url, e);
                status = EXIT_ERROR;
            }
        }
    }

    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "robots-gate",
            "--agent",
            "googlebot",
            "-u",
            "MyBot/1.0",
            "--disallowed",
            "https://example.com/a",
            "https://example.com/b",
        ]);
        assert_eq!(cli.agent.as_deref(), Some("googlebot"));
        assert_eq!(cli.user_agent.as_deref(), Some("MyBot/1.0"));
        assert!(cli.disallowed);
        assert_eq!(cli.urls.len(), 2);
    }

    #[test]
    fn test_cli_requires_url() {
        assert!(Cli::try_parse_from(["robots-gate"]).is_err());
    }

    #[test]
    fn test_build_engine_overrides_user_agent() {
        let robots = build_engine(&Config::default(), Some("Override/2.0")).unwrap();
        assert_eq!(robots.user_agent(), "Override/2.0");

        let robots = build_engine(&Config::default(), None).unwrap();
        assert!(robots.user_agent().starts_with("RobotsGate/"));
    }
}
