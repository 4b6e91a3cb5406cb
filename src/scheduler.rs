//! Daily job scheduler.
//!
//! Runs each registered job once per day, as soon as the clock reaches the
//! job's time of day. Ticks once per second.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info};

use crate::clock::Clock;

const TICK: Duration = Duration::from_secs(1);

#[async_trait]
pub trait Job: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self) -> anyhow::Result<()>;
}

struct Entry {
    at: NaiveTime,
    job: Arc<dyn Job>,
    last_run: Option<NaiveDate>,
}

pub struct Scheduler {
    entries: Vec<Entry>,
    clock: Arc<dyn Clock>,
}

impl Scheduler {
    pub fn new(jobs: Vec<(NaiveTime, Arc<dyn Job>)>, clock: Arc<dyn Clock>) -> Self {
        // Jobs whose time already passed today wait for tomorrow.
        let now = clock.now();
        let entries = jobs
            .into_iter()
            .map(|(at, job)| Entry {
                at,
                job,
                last_run: (now.time() >= at).then(|| now.date()),
            })
            .collect();

        Self { entries, clock }
    }

    /// Runs every job that is due. Returns how many ran.
    pub async fn run_pending(&mut self) -> usize {
        let now = self.clock.now();
        let mut ran = 0;

        for entry in &mut self.entries {
            let due = now.time() >= entry.at && entry.last_run != Some(now.date());
            if !due {
                continue;
            }

            entry.last_run = Some(now.date());
            ran += 1;

            match entry.job.run().await {
                Ok(()) => info!(job = entry.job.name(), "Scheduled job finished"),
                Err(e) => error!(job = entry.job.name(), error = %e, "Scheduled job failed"),
            }
        }

        ran
    }

    /// Start the scheduler loop on the current runtime.
    pub fn start(mut self) -> tokio::task::JoinHandle<()> {
        actix_web::rt::spawn(async move {
            if self.entries.is_empty() {
                info!("Scheduler started with no jobs registered");
            } else {
                info!(jobs = self.entries.len(), "Scheduler started");
            }

            let mut ticker = interval(TICK);
            loop {
                ticker.tick().await;
                self.run_pending().await;
            }
        })
    }
}
