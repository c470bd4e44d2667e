use crate::core::output::{keeping_line, moving_line};
use crate::core::{ConfigProvider, FileStore, Relocator};
use crate::domain::model::{
    Candidate, MissingSourcePolicy, MovePlan, MoveReport, MovedFile, PlannedAction, Selection,
    SizeThreshold, SourceEntry,
};
use crate::utils::error::{Result, ShelfError};
use chrono::Utc;
use std::io::Write;
use std::path::Path;

/// Moves the regular files of one directory that match a size selection into another.
pub struct SelectiveMover<S: FileStore, C: ConfigProvider> {
    store: S,
    config: C,
}

impl<S: FileStore, C: ConfigProvider> SelectiveMover<S, C> {
    pub fn new(store: S, config: C) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

fn write_line(out: &mut dyn Write, line: &str) -> Result<()> {
    writeln!(out, "{}", line).map_err(|e| ShelfError::io("writing", "output", e))
}

impl<S: FileStore, C: ConfigProvider> Relocator for SelectiveMover<S, C> {
    fn scan(&self) -> Result<Option<Vec<SourceEntry>>> {
        let source = self.config.source_dir();
        let source_exists = self.store.dir_exists(source);

        if !source_exists && self.config.missing_source() == MissingSourcePolicy::Skip {
            tracing::warn!("Source directory {} not found, skipping", source.display());
            return Ok(None);
        }

        // 目的地在讀取來源前建立，來源不存在時也會留下
        self.store.ensure_dir(self.config.destination_dir())?;

        if !source_exists {
            return Err(ShelfError::SourceMissing {
                path: source.to_path_buf(),
            });
        }

        let entries = self.store.list_entries(source)?;
        tracing::debug!("Found {} entries in {}", entries.len(), source.display());
        Ok(Some(entries))
    }

    fn plan(&self, entries: Vec<SourceEntry>) -> MovePlan {
        let threshold = self.config.threshold();
        let selection = self.config.selection();
        let mut plan = MovePlan::default();

        for entry in entries {
            if !entry.is_regular_file() {
                plan.skipped_entries += 1;
                continue;
            }

            let action = if selection.wants(threshold, entry.size_bytes) {
                PlannedAction::Move
            } else {
                PlannedAction::Keep
            };
            plan.push(Candidate::from(entry), action);
        }

        tracing::debug!(
            "Planned {} move(s), {} kept, {} non-file entries skipped",
            plan.move_count(),
            plan.keep_count(),
            plan.skipped_entries
        );
        plan
    }

    fn relocate(&self, plan: MovePlan, out: &mut dyn Write) -> Result<MoveReport> {
        let started_at = Utc::now();
        let selection = self.config.selection();
        let destination = self.config.destination_dir();

        let mut moved = Vec::with_capacity(plan.move_count());
        let mut kept = Vec::with_capacity(plan.keep_count());

        for planned in plan.entries {
            let candidate = planned.candidate;

            if planned.action == PlannedAction::Keep {
                if let Some(line) = keeping_line(selection, &candidate) {
                    write_line(out, &line)?;
                }
                kept.push(candidate);
                continue;
            }

            let target = destination.join(&candidate.file_name);
            write_line(out, &moving_line(selection, &candidate))?;
            self.store.move_file(&candidate.path, &target)?;
            tracing::debug!("Moved {} -> {}", candidate.path.display(), target.display());

            moved.push(MovedFile {
                name: candidate.name,
                size_bytes: candidate.size_bytes,
                destination: target,
            });
        }

        Ok(MoveReport {
            selection,
            threshold_mb: self.config.threshold().megabytes(),
            source: self.config.source_dir().to_path_buf(),
            destination: destination.to_path_buf(),
            moved,
            kept,
            skipped_entries: plan.skipped_entries,
            source_missing: false,
            started_at,
            finished_at: Utc::now(),
        })
    }

    fn selection(&self) -> Selection {
        self.config.selection()
    }

    fn threshold(&self) -> SizeThreshold {
        self.config.threshold()
    }

    fn source_dir(&self) -> &Path {
        self.config.source_dir()
    }

    fn destination_dir(&self) -> &Path {
        self.config.destination_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::EntryKind;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::io;
    use std::path::PathBuf;

    struct FakeConfig {
        selection: Selection,
        policy: MissingSourcePolicy,
    }

    impl ConfigProvider for FakeConfig {
        fn source_dir(&self) -> &Path {
            Path::new("src")
        }
        fn destination_dir(&self) -> &Path {
            Path::new("dst")
        }
        fn threshold(&self) -> SizeThreshold {
            SizeThreshold::default()
        }
        fn selection(&self) -> Selection {
            self.selection
        }
        fn missing_source(&self) -> MissingSourcePolicy {
            self.policy
        }
    }

    /// In-memory store that records moves and can be told to fail one.
    #[derive(Default)]
    struct FakeStore {
        source_exists: bool,
        entries: Vec<SourceEntry>,
        fail_on: Option<String>,
        moves: RefCell<Vec<(PathBuf, PathBuf)>>,
        created: RefCell<HashSet<PathBuf>>,
    }

    impl FileStore for FakeStore {
        fn dir_exists(&self, _dir: &Path) -> bool {
            self.source_exists
        }
        fn list_entries(&self, _dir: &Path) -> Result<Vec<SourceEntry>> {
            Ok(self.entries.clone())
        }
        fn ensure_dir(&self, dir: &Path) -> Result<()> {
            self.created.borrow_mut().insert(dir.to_path_buf());
            Ok(())
        }
        fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
            if self.fail_on.as_deref() == from.file_name().and_then(|n| n.to_str()) {
                return Err(ShelfError::MoveFailed {
                    from: from.to_path_buf(),
                    to: to.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            self.moves
                .borrow_mut()
                .push((from.to_path_buf(), to.to_path_buf()));
            Ok(())
        }
    }

    fn file(name: &str, size_bytes: u64) -> SourceEntry {
        SourceEntry {
            file_name: name.into(),
            path: Path::new("src").join(name),
            kind: EntryKind::File,
            size_bytes,
        }
    }

    fn dir(name: &str) -> SourceEntry {
        SourceEntry {
            file_name: name.into(),
            path: Path::new("src").join(name),
            kind: EntryKind::Directory,
            size_bytes: 0,
        }
    }

    fn mover(store: FakeStore, selection: Selection) -> SelectiveMover<FakeStore, FakeConfig> {
        SelectiveMover::new(
            store,
            FakeConfig {
                selection,
                policy: MissingSourcePolicy::Fail,
            },
        )
    }

    const MB: u64 = 1024 * 1024;

    #[test]
    fn test_plan_partitions_and_skips_directories() {
        let m = mover(FakeStore::default(), Selection::Lightweight);
        let plan = m.plan(vec![file("a.glb", MB * 3 / 2), file("b.glb", 3 * MB), dir("sub")]);

        assert_eq!(plan.move_count(), 1);
        assert_eq!(plan.keep_count(), 1);
        assert_eq!(plan.entries[0].candidate.name, "a.glb");
        assert_eq!(plan.entries[0].action, PlannedAction::Move);
        assert_eq!(plan.entries[1].action, PlannedAction::Keep);
        assert_eq!(plan.skipped_entries, 1);
    }

    #[test]
    fn test_relocate_writes_status_lines_in_listing_order() {
        let store = FakeStore {
            source_exists: true,
            ..Default::default()
        };
        let m = mover(store, Selection::Lightweight);
        let plan = m.plan(vec![file("z.glb", MB), file("a.glb", MB / 2)]);

        let mut out = Vec::new();
        let report = m.relocate(plan, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Moving z.glb (1.00 MB)\nMoving a.glb (0.50 MB)\n");
        assert_eq!(report.moved_count(), 2);
        assert_eq!(report.moved[1].destination, Path::new("dst").join("a.glb"));
    }

    #[test]
    fn test_scan_creates_destination() {
        let store = FakeStore {
            source_exists: true,
            ..Default::default()
        };
        let m = mover(store, Selection::Lightweight);
        assert!(m.scan().unwrap().is_some());
        assert!(m.store.created.borrow().contains(Path::new("dst")));
    }

    #[test]
    fn test_missing_source_fails_by_default() {
        let m = mover(FakeStore::default(), Selection::Lightweight);
        assert!(matches!(m.scan(), Err(ShelfError::SourceMissing { .. })));
        // 目的地仍會先建立
        assert!(m.store.created.borrow().contains(Path::new("dst")));
    }

    #[test]
    fn test_missing_source_skip_policy() {
        let m = SelectiveMover::new(
            FakeStore::default(),
            FakeConfig {
                selection: Selection::All,
                policy: MissingSourcePolicy::Skip,
            },
        );
        assert!(m.scan().unwrap().is_none());
        assert!(m.store.created.borrow().is_empty());
    }

    #[test]
    fn test_failed_move_stops_the_run() {
        let store = FakeStore {
            source_exists: true,
            fail_on: Some("b.glb".to_string()),
            ..Default::default()
        };
        let m = mover(store, Selection::All);
        let plan = m.plan(vec![file("a.glb", 1), file("b.glb", 2), file("c.glb", 3)]);

        let mut out = Vec::new();
        let err = m.relocate(plan, &mut out).unwrap_err();

        assert!(matches!(err, ShelfError::MoveFailed { .. }));
        // a.glb 已搬走, c.glb 未處理
        assert_eq!(m.store.moves.borrow().len(), 1);
    }

    #[test]
    fn test_large_selection_reports_kept_files() {
        let store = FakeStore {
            source_exists: true,
            ..Default::default()
        };
        let m = mover(store, Selection::Large);
        let plan = m.plan(vec![file("light.glb", MB), file("heavy.glb", 2 * MB)]);

        let mut out = Vec::new();
        let report = m.relocate(plan, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Keeping lightweight file: light.glb (1.00 MB)"));
        assert!(text.contains("Moving LARGE file: heavy.glb (2.00 MB)"));
        assert_eq!(report.moved_count(), 1);
        assert_eq!(report.kept_count(), 1);
    }

    #[test]
    fn test_large_selection_interleaves_lines_in_listing_order() {
        let store = FakeStore {
            source_exists: true,
            ..Default::default()
        };
        let m = mover(store, Selection::Large);
        let plan = m.plan(vec![
            file("f2.glb", 10),
            file("f3.glb", 3 * MB),
            file("f0.glb", 10),
            dir("sub"),
            file("f4.glb", 3 * MB),
            file("f5.glb", 10),
            file("f1.glb", 3 * MB),
        ]);

        let mut out = Vec::new();
        m.relocate(plan, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Keeping lightweight file: f2.glb (0.00 MB)\n\
             Moving LARGE file: f3.glb (3.00 MB)\n\
             Keeping lightweight file: f0.glb (0.00 MB)\n\
             Moving LARGE file: f4.glb (3.00 MB)\n\
             Keeping lightweight file: f5.glb (0.00 MB)\n\
             Moving LARGE file: f1.glb (3.00 MB)\n"
        );
        let moved: Vec<_> = m.store.moves.borrow().iter().map(|(from, _)| from.clone()).collect();
        assert_eq!(
            moved,
            vec![
                Path::new("src").join("f3.glb"),
                Path::new("src").join("f4.glb"),
                Path::new("src").join("f1.glb"),
            ]
        );
    }
}
