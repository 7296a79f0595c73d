//! `chatpulse status`: one line per configured region.

use chatpulse_analysis::ArtifactStore;
use chatpulse_core::RegionConfig;

use crate::workspace::Workspace;

pub(crate) fn run_status(workspace: &Workspace) {
    println!(
        "{:<6} {:<24} {:<8} {:<7} {:>9} {:<6}",
        "CODE", "NAME", "LANG", "ACTIVE", "MESSAGES", "REPORT"
    );
    for region in &workspace.regions.regions {
        println!("{}", status_line(workspace, region));
    }
}

fn status_line(workspace: &Workspace, region: &RegionConfig) -> String {
    let code = region.code.as_str();
    let messages = if workspace.store.has_artifact(code) {
        match workspace.store.load_artifact(code) {
            Ok(artifact) => artifact.message_count.to_string(),
            Err(e) => {
                tracing::warn!(region = %code, error = %e, "unreadable analysis artifact");
                "error".to_string()
            }
        }
    } else {
        "-".to_string()
    };
    let language = region.lexicon_language().to_string();
    let report = if workspace.store.paths().report_file(code).is_file() {
        "yes"
    } else {
        "no"
    };

    format!(
        "{:<6} {:<24} {:<8} {:<7} {:>9} {:<6}",
        code,
        region.name,
        language,
        if region.active { "yes" } else { "no" },
        messages,
        report
    )
}
