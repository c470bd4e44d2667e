use crate::domain::model::{Candidate, MoveReport, Selection};

pub const SOURCE_SKIPPED_LINE: &str = "Source directory not found, skipping.";

/// Line printed right before a file is moved.
pub fn moving_line(selection: Selection, candidate: &Candidate) -> String {
    match selection {
        Selection::Lightweight => {
            format!("Moving {} ({:.2} MB)", candidate.name, candidate.size_mb())
        }
        Selection::Large => format!(
            "Moving LARGE file: {} ({:.2} MB)",
            candidate.name,
            candidate.size_mb()
        ),
        Selection::All => format!("Moving: {}", candidate.name),
    }
}

/// Only `large` runs announce the files they leave behind.
pub fn keeping_line(selection: Selection, candidate: &Candidate) -> Option<String> {
    match selection {
        Selection::Large => Some(format!(
            "Keeping lightweight file: {} ({:.2} MB)",
            candidate.name,
            candidate.size_mb()
        )),
        Selection::Lightweight | Selection::All => None,
    }
}

pub fn summary_line(report: &MoveReport) -> String {
    match report.selection {
        Selection::Lightweight => format!(
            "Successfully moved {} lightweight models.",
            report.moved_count()
        ),
        Selection::Large => format!(
            "Summary: Moved {} large models to {}. Kept {} lightweight models in {}.",
            report.moved_count(),
            report.destination.display(),
            report.kept_count(),
            report.source.display()
        ),
        Selection::All => format!(
            "Successfully merged {} models back to {}.",
            report.moved_count(),
            report.destination.display()
        ),
    }
}
