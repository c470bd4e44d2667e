use crate::core::ConfigProvider;
use crate::domain::model::{MissingSourcePolicy, Selection, SizeThreshold};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_distinct_dirs, validate_path, validate_threshold, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "model-shelf")]
#[command(about = "Move files across a size threshold from one directory to another")]
pub struct CliConfig {
    /// Directory whose files are evaluated
    #[arg(short, long)]
    pub source: PathBuf,

    /// Directory the selected files are moved into (created if missing)
    #[arg(short, long)]
    pub destination: PathBuf,

    /// Size threshold in megabytes (1 MB = 1024 * 1024 bytes)
    #[arg(long, default_value_t = SizeThreshold::DEFAULT_MB)]
    pub threshold_mb: f64,

    /// Which files to move
    #[arg(long, value_enum, default_value_t = Selection::Lightweight)]
    pub selection: Selection,

    /// Print a notice and exit successfully when the source directory is missing
    #[arg(long)]
    pub skip_missing_source: bool,

    /// Print the move report as JSON after the summary
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            threshold_mb: SizeThreshold::DEFAULT_MB,
            selection: Selection::Lightweight,
            skip_missing_source: false,
            json: false,
            verbose: false,
            log_json: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn source_dir(&self) -> &Path {
        &self.source
    }

    fn destination_dir(&self) -> &Path {
        &self.destination
    }

    fn threshold(&self) -> SizeThreshold {
        SizeThreshold::from_megabytes(self.threshold_mb)
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn missing_source(&self) -> MissingSourcePolicy {
        if self.skip_missing_source {
            MissingSourcePolicy::Skip
        } else {
            MissingSourcePolicy::Fail
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("source", &self.source)?;
        validate_path("destination", &self.destination)?;
        validate_threshold("threshold_mb", self.threshold_mb)?;
        validate_distinct_dirs(&self.source, &self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_args() {
        let config =
            CliConfig::try_parse_from(["model-shelf", "-s", "temp", "-d", "public/models"]).unwrap();

        assert_eq!(config.source, PathBuf::from("temp"));
        assert_eq!(config.threshold().megabytes(), 2.0);
        assert_eq!(config.selection(), Selection::Lightweight);
        assert_eq!(config.missing_source(), MissingSourcePolicy::Fail);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_selection_and_policy_flags() {
        let config = CliConfig::try_parse_from([
            "model-shelf",
            "--source",
            "models",
            "--destination",
            "large",
            "--selection",
            "large",
            "--threshold-mb",
            "10",
            "--skip-missing-source",
        ])
        .unwrap();

        assert_eq!(config.selection(), Selection::Large);
        assert_eq!(config.threshold().megabytes(), 10.0);
        assert_eq!(config.missing_source(), MissingSourcePolicy::Skip);
    }

    #[test]
    fn test_source_and_destination_are_required() {
        assert!(CliConfig::try_parse_from(["model-shelf", "-s", "temp"]).is_err());
    }

    #[test]
    fn test_validation_rejects_same_dirs_and_bad_threshold() {
        let same = CliConfig::new("models", "models");
        assert!(same.validate().is_err());

        let mut zero = CliConfig::new("a", "b");
        zero.threshold_mb = 0.0;
        assert!(zero.validate().is_err());
    }
}
