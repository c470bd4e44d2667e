use crate::config::toml_config::{OnJobFailure, ShelfPlan};
use crate::core::engine::ShelfEngine;
use crate::core::mover::SelectiveMover;
use crate::core::FileStore;
use crate::domain::model::MoveReport;
use crate::utils::error::{Result, ShelfError};
use std::io::Write;
use std::time::Instant;

/// 單一 job 的執行結果
#[derive(Debug)]
pub struct JobResult {
    pub name: String,
    pub outcome: Result<MoveReport>,
}

impl JobResult {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Debug, Default)]
pub struct PlanOutcome {
    pub results: Vec<JobResult>,
}

impl PlanOutcome {
    pub fn failed_jobs(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| !r.succeeded())
            .map(|r| r.name.clone())
            .collect()
    }

    pub fn total_moved(&self) -> usize {
        self.results
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok())
            .map(|report| report.moved_count())
            .sum()
    }

    /// 任一 job 失敗即回傳 PlanFailed
    pub fn into_result(self) -> Result<Self> {
        let failed = self.failed_jobs();
        if failed.is_empty() {
            Ok(self)
        } else {
            Err(ShelfError::PlanFailed { failed })
        }
    }
}

/// Job 序列執行器
pub struct PlanRunner<S: FileStore + Clone> {
    store: S,
    plan: ShelfPlan,
}

impl<S: FileStore + Clone> PlanRunner<S> {
    pub fn new(store: S, plan: ShelfPlan) -> Self {
        Self { store, plan }
    }

    pub fn plan(&self) -> &ShelfPlan {
        &self.plan
    }

    pub fn execute_all(&self, out: &mut dyn Write) -> Result<PlanOutcome> {
        self.execute_filtered(out, None)
    }

    /// `only` 限定只執行指定名稱的 job
    pub fn execute_filtered(&self, out: &mut dyn Write, only: Option<&str>) -> Result<PlanOutcome> {
        let timer = Instant::now();
        let policy = self.plan.on_job_failure();
        let mut outcome = PlanOutcome::default();

        let jobs: Vec<_> = self
            .plan
            .enabled_jobs()
            .into_iter()
            .filter(|job| only.map_or(true, |name| job.name == name))
            .collect();

        if let Some(name) = only {
            if jobs.is_empty() {
                return Err(ShelfError::ConfigValidationError {
                    field: "only".to_string(),
                    message: format!("No enabled job named '{}'", name),
                });
            }
        }

        tracing::info!("🚀 Running plan '{}' ({} job(s))", self.plan.plan.name, jobs.len());

        for job in jobs {
            tracing::info!("▶️  Job '{}'", job.name);
            let mover = SelectiveMover::new(self.store.clone(), job.clone());
            let result = ShelfEngine::new(mover).run_with_output(out);

            match result {
                Ok(report) => outcome.results.push(JobResult {
                    name: job.name.clone(),
                    outcome: Ok(report),
                }),
                Err(e) => {
                    tracing::error!("❌ Job '{}' failed: {}", job.name, e);
                    if policy == OnJobFailure::Stop {
                        return Err(e);
                    }
                    outcome.results.push(JobResult {
                        name: job.name.clone(),
                        outcome: Err(e),
                    });
                }
            }
        }

        tracing::info!(
            "🏁 Plan '{}' finished in {:?}, {} file(s) moved",
            self.plan.plan.name,
            timer.elapsed(),
            outcome.total_moved()
        );

        Ok(outcome)
    }
}
