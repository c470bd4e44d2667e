pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{JobConfig, ShelfPlan};

pub use adapters::LocalFileStore;
pub use core::{engine::ShelfEngine, mover::SelectiveMover, plan_runner::PlanRunner};
pub use domain::model::{MissingSourcePolicy, MoveReport, Selection, SizeThreshold};
pub use utils::error::{Result, ShelfError};
