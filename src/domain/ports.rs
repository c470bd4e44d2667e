use crate::domain::model::{
    MissingSourcePolicy, MovePlan, MoveReport, Selection, SizeThreshold, SourceEntry,
};
use crate::utils::error::Result;
use std::io::Write;
use std::path::Path;

/// Filesystem operations the mover depends on.
pub trait FileStore {
    fn dir_exists(&self, dir: &Path) -> bool;
    /// Lists the direct children of `dir` in the order the OS returns them.
    fn list_entries(&self, dir: &Path) -> Result<Vec<SourceEntry>>;
    fn ensure_dir(&self, dir: &Path) -> Result<()>;
    fn move_file(&self, from: &Path, to: &Path) -> Result<()>;
}

pub trait ConfigProvider {
    fn source_dir(&self) -> &Path;
    fn destination_dir(&self) -> &Path;
    fn threshold(&self) -> SizeThreshold;
    fn selection(&self) -> Selection;
    fn missing_source(&self) -> MissingSourcePolicy;
}

/// The three phases of one relocation run.
pub trait Relocator {
    /// `Ok(None)` when the source is missing and the policy says skip.
    fn scan(&self) -> Result<Option<Vec<SourceEntry>>>;
    fn plan(&self, entries: Vec<SourceEntry>) -> MovePlan;
    fn relocate(&self, plan: MovePlan, out: &mut dyn Write) -> Result<MoveReport>;

    fn selection(&self) -> Selection;
    fn threshold(&self) -> SizeThreshold;
    fn source_dir(&self) -> &Path;
    fn destination_dir(&self) -> &Path;
}
