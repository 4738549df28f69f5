use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::facts::Progress;
use clap::Parser;
use ohno::bail;

#[derive(Parser, Debug)]
pub struct PortfolioArgs {
    /// GitHub user or organization whose repositories are analyzed
    #[arg(value_name = "ACCOUNT")]
    pub account: String,

    /// Maximum number of repositories to analyze, most recently updated first
    #[arg(long, value_name = "N", default_value_t = 50)]
    pub max_repos: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_portfolio<H: Host>(host: &mut H, args: &PortfolioArgs) -> Result<()> {
    let account = args.account.trim();
    if account.is_empty() || account.contains('/') {
        bail!("invalid account '{}': expected a GitHub user or organization name", args.account);
    }

    let mut common = Common::new(host, &args.common)?;
    let analyzer = common.analyzer()?;
    let progress = common.progress_reporter();

    let outcome = analyzer.analyze_portfolio(account, args.max_repos, &progress).await;
    progress.done();

    match outcome {
        Ok(portfolio) => common.report_portfolio(&portfolio),
        Err(e) => Err(common.fetch_failed(&format!("portfolio of '{account}'"), e)),
    }
}
