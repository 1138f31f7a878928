//! Cron-driven refresh scheduler.
//!
//! Fires [`AggregationPipeline::run_cycle`] on each cron tick, plus once at
//! start when configured. Each cycle runs on its own task so a slow cycle
//! never delays the next tick; overlapping ticks are turned away by the
//! pipeline's single-flight guard.

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use cron::Schedule;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::ScheduleConfig;
use crate::services::aggregation_pipeline::{AggregationPipeline, RefreshOutcome};

pub struct RefreshScheduler {
    pipeline: Arc<AggregationPipeline>,
    schedule: Schedule,
    expression: String,
    run_on_start: bool,
    shutdown: watch::Sender<bool>,
}

impl RefreshScheduler {
    pub fn new(pipeline: Arc<AggregationPipeline>, config: &ScheduleConfig) -> DomainResult<Self> {
        let schedule = parse_cron(&config.cron)?;
        let (shutdown, _) = watch::channel(false);

        Ok(Self {
            pipeline,
            schedule,
            expression: config.cron.clone(),
            run_on_start: config.run_on_start,
            shutdown,
        })
    }

    /// Start the tick loop on a background task.
    pub fn start(&self) -> JoinHandle<()> {
        let pipeline = self.pipeline.clone();
        let schedule = self.schedule.clone();
        let run_on_start = self.run_on_start;
        let mut shutdown = self.shutdown.subscribe();

        info!(cron = %self.expression, run_on_start, "refresh scheduler started");

        tokio::spawn(async move {
            if run_on_start {
                spawn_cycle(&pipeline);
            }

            loop {
                let Some(next) = schedule.upcoming(Utc).next() else {
                    warn!("cron schedule has no upcoming fire time, stopping scheduler");
                    break;
                };
                let wait = (next - Utc::now()).to_std().unwrap_or_default();
                debug!(next = %next, "next refresh scheduled");

                tokio::select! {
                    () = tokio::time::sleep(wait) => spawn_cycle(&pipeline),
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("refresh scheduler stopped");
        })
    }

    /// Signal the tick loop to exit. A cycle already running completes.
    pub fn stop(&self) {
        self.shutdown.send_replace(true);
    }
}

fn spawn_cycle(pipeline: &Arc<AggregationPipeline>) {
    let pipeline = pipeline.clone();
    tokio::spawn(async move {
        if let RefreshOutcome::Skipped = pipeline.run_cycle().await {
            debug!("scheduled tick overlapped a running cycle");
        }
    });
}

/// Parse a six-field (seconds first) cron expression.
pub fn parse_cron(expression: &str) -> DomainResult<Schedule> {
    Schedule::from_str(expression).map_err(|e| {
        DomainError::ValidationFailed(format!("invalid cron expression '{expression}': {e}"))
    })
}
