use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::facts::RepoSpec;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct RepoArgs {
    /// Repository to analyze (format: `owner/name` or a repository URL)
    #[arg(value_name = "REPOSITORY")]
    pub repository: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_repository<H: Host>(host: &mut H, args: &RepoArgs) -> Result<()> {
    let spec = RepoSpec::parse(&args.repository)?;
    let mut common = Common::new(host, &args.common)?;
    let analyzer = common.analyzer()?;

    match analyzer.analyze_repository(spec.owner(), spec.repo()).await {
        Ok(analysis) => common.report_repository(&analysis),
        Err(e) => Err(common.fetch_failed(&format!("repository '{spec}'"), e)),
    }
}
