use crate::core::output::{summary_line, SOURCE_SKIPPED_LINE};
use crate::core::Relocator;
use crate::domain::model::MoveReport;
use crate::utils::error::{Result, ShelfError};
use chrono::Utc;
use std::io::Write;
use std::time::Instant;

pub struct ShelfEngine<R: Relocator> {
    relocator: R,
}

impl<R: Relocator> ShelfEngine<R> {
    pub fn new(relocator: R) -> Self {
        Self { relocator }
    }

    /// Runs scan, plan and relocate, printing status lines and the summary to stdout.
    pub fn run(&self) -> Result<MoveReport> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.run_with_output(&mut handle)
    }

    pub fn run_with_output(&self, out: &mut dyn Write) -> Result<MoveReport> {
        let timer = Instant::now();
        tracing::info!(
            "📦 Relocating {} files from {} to {} (threshold {})",
            self.relocator.selection(),
            self.relocator.source_dir().display(),
            self.relocator.destination_dir().display(),
            self.relocator.threshold()
        );

        // Scan
        let entries = match self.relocator.scan()? {
            Some(entries) => entries,
            None => {
                writeln!(out, "{}", SOURCE_SKIPPED_LINE)
                    .map_err(|e| ShelfError::io("writing", "output", e))?;
                return Ok(self.skipped_report());
            }
        };

        // Plan
        let plan = self.relocator.plan(entries);
        tracing::info!(
            "🔍 {} file(s) selected, {} kept in place",
            plan.move_count(),
            plan.keep_count()
        );

        // Relocate
        let report = self.relocator.relocate(plan, out)?;
        writeln!(out, "{}", summary_line(&report))
            .map_err(|e| ShelfError::io("writing", "output", e))?;

        tracing::info!(
            "✅ Moved {} file(s), {} bytes in {:?}",
            report.moved_count(),
            report.moved_bytes(),
            timer.elapsed()
        );

        Ok(report)
    }

    fn skipped_report(&self) -> MoveReport {
        let now = Utc::now();
        MoveReport {
            selection: self.relocator.selection(),
            threshold_mb: self.relocator.threshold().megabytes(),
            source: self.relocator.source_dir().to_path_buf(),
            destination: self.relocator.destination_dir().to_path_buf(),
            moved: Vec::new(),
            kept: Vec::new(),
            skipped_entries: 0,
            source_missing: true,
            started_at: now,
            finished_at: now,
        }
    }
}
