//! Common processing logic shared between the repo and portfolio commands.

use super::config::Config;
use super::{Host, ProgressReporter};
use crate::Result;
use crate::facts::{FetchError, GitHubFetcher};
use crate::pipeline::{Analyzer, RepositoryAnalysis};
use crate::portfolio::PortfolioAggregate;
use crate::reports::{generate_json, generate_portfolio_console, generate_repository_console};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Args;
use clap::ValueEnum;
use core::time::Duration;
use ohno::{EnrichableExt, IntoAppError};
use serde::Serialize;
use std::fs;
use std::io::Write;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Common arguments shared between the repo and portfolio commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Path to configuration file (default is `reposcope.toml` in the current directory)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Output the full analysis to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output the analysis to the console.
    /// If omitted, console output is shown only when no other reports are generated.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,
}

pub struct Common<'a, H: Host> {
    pub config: Config,
    host: &'a mut H,
    github_token: Option<String>,
    color: ColorMode,
    log_level: LogLevel,
    console: bool,
    json: Option<Utf8PathBuf>,
}

impl<'a, H: Host> Common<'a, H> {
    /// Set up logging and load the configuration
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;

        Ok(Self {
            config,
            host,
            github_token: args.github_token.clone(),
            color: args.color,
            log_level: args.log_level,
            console: args.console,
            json: args.json.clone(),
        })
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        let level = match log_level {
            LogLevel::None => return,
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        // a logger may already be installed when commands run repeatedly in one process
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
            .try_init();
    }

    /// Build an analyzer talking to the configured GitHub endpoint
    pub fn analyzer(&self) -> Result<Analyzer<GitHubFetcher>> {
        let fetcher = GitHubFetcher::new(
            self.github_token.as_deref(),
            &self.config.api_base_url,
            self.config.request_timeout,
        )?;

        Ok(Analyzer::new(fetcher, self.config.analyzer_settings(), Utc::now()))
    }

    /// Progress bar for long-running work, held back while logs are being written
    pub fn progress_reporter(&self) -> ProgressReporter {
        let delay = if self.log_level == LogLevel::None {
            Duration::from_millis(300)
        } else {
            Duration::from_hours(365 * 24)
        };

        let use_colors_for_progress = match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                use std::io::{IsTerminal, stderr};
                stderr().is_terminal()
            }
        };

        ProgressReporter::new(delay, use_colors_for_progress)
    }

    /// Turn a terminal fetch failure into a user-facing error
    pub fn fetch_failed(&mut self, subject: &str, err: FetchError) -> ohno::AppError {
        if let FetchError::RateLimited { reset_at: Some(reset_at) } = &err {
            let _ = writeln!(
                self.host.error(),
                "GitHub rate limit exhausted; it resets at {}. Supplying a token with --github-token raises the limit.",
                reset_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }

        ohno::AppError::from(err).enrich_with(|| format!("analyzing {subject}"))
    }

    pub fn report_repository(&mut self, analysis: &RepositoryAnalysis) -> Result<()> {
        self.report(analysis, generate_repository_console)
    }

    pub fn report_portfolio(&mut self, portfolio: &PortfolioAggregate) -> Result<()> {
        if portfolio.is_partial() {
            let _ = writeln!(
                self.host.error(),
                "Analyzed {} of {} repositories; {} could not be analyzed",
                portfolio.analyzed_repositories,
                portfolio.total_repositories,
                portfolio.failures.len()
            );
        }

        self.report(portfolio, generate_portfolio_console)?;

        // listed repositories but none could be analyzed
        if portfolio.total_repositories > 0 && portfolio.analyzed_repositories == 0 {
            let _ = writeln!(self.host.error(), "No repository owned by '{}' could be analyzed", portfolio.account);
            self.host.exit(1);
        }

        Ok(())
    }

    fn report<T: Serialize>(&mut self, data: &T, console: fn(&T, bool, &mut String) -> Result<()>) -> Result<()> {
        // Show console output if --console is set or no file reports are being generated
        if self.console || self.json.is_none() {
            let mut console_output = String::new();
            let use_colors = match self.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => {
                    use std::io::{IsTerminal, stdout};
                    stdout().is_terminal()
                }
            };
            console(data, use_colors, &mut console_output)?;
            let _ = write!(self.host.output(), "{console_output}");
        }

        if let Some(filename) = &self.json {
            let mut json_output = String::new();
            generate_json(data, &mut json_output)?;
            fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
        }

        Ok(())
    }
}
