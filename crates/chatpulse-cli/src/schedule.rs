//! `chatpulse schedule`: cron-driven refresh of every active region.
//!
//! A refresh re-analyzes all active regions and then requests a fresh report
//! for each region whose analysis succeeded. Failures are logged per region
//! and never stop the scheduler.

use std::sync::Arc;

use chatpulse_report::ReportGenerator;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::analyze::analyze_regions;
use crate::workspace::Workspace;

pub(crate) async fn run_schedule(workspace: Arc<Workspace>) -> anyhow::Result<()> {
    let mut scheduler = build_scheduler(Arc::clone(&workspace)).await?;
    tracing::info!(
        schedule = %workspace.config.refresh_schedule,
        regions = workspace.active_codes().len(),
        "scheduler started"
    );

    shutdown_signal().await;
    scheduler.shutdown().await?;
    Ok(())
}

/// Builds and starts the scheduler with the refresh job registered.
///
/// The returned handle must be kept alive; dropping it stops all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the cron expression is invalid or the
/// scheduler cannot start.
pub(crate) async fn build_scheduler(
    workspace: Arc<Workspace>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    register_refresh_job(&scheduler, workspace).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_refresh_job(
    scheduler: &JobScheduler,
    workspace: Arc<Workspace>,
) -> Result<(), JobSchedulerError> {
    let schedule = workspace.config.refresh_schedule.clone();
    let job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
        let workspace = Arc::clone(&workspace);
        Box::pin(async move {
            tracing::info!("scheduler: starting refresh run");
            run_refresh(&workspace).await;
            tracing::info!("scheduler: refresh run complete");
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

/// One refresh pass. Never fails; every problem is logged.
async fn run_refresh(workspace: &Arc<Workspace>) {
    let codes = workspace.active_codes();
    if codes.is_empty() {
        tracing::info!("scheduler: no active regions; skipping");
        return;
    }

    let results = analyze_regions(workspace, &codes).await;
    let mut analyzed = Vec::with_capacity(results.len());
    for (code, outcome) in results {
        match outcome {
            Ok(outcome) => {
                tracing::info!(
                    region = %code,
                    messages = outcome.artifact.message_count,
                    "scheduler: analysis complete"
                );
                analyzed.push(code);
            }
            Err(e) => tracing::error!(region = %code, error = %e, "scheduler: analysis failed"),
        }
    }

    let generator = match ReportGenerator::from_config(&workspace.config) {
        Ok(generator) => generator,
        Err(e) => {
            tracing::warn!(error = %e, "scheduler: report generation unavailable; skipping reports");
            return;
        }
    };

    for code in &analyzed {
        let Ok(region) = workspace.region(code) else {
            continue;
        };
        match generator.generate(region, true).await {
            Ok(report) => tracing::info!(
                region = %code,
                chars = report.chars().count(),
                "scheduler: report refreshed"
            ),
            Err(e) => tracing::error!(region = %code, error = %e, "scheduler: report failed"),
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduler");
}
