use chatpulse_report::ReportGenerator;

use crate::workspace::Workspace;

/// `chatpulse report`: print the region's report, generating it if needed.
pub(crate) async fn run_report(workspace: &Workspace, region: &str, fresh: bool) -> anyhow::Result<()> {
    let region = workspace.region(region)?;
    let generator = ReportGenerator::from_config(&workspace.config)?;
    let report = generator.generate(region, fresh).await?;
    println!("{report}");
    Ok(())
}
