pub mod engine;
pub mod mover;
pub mod output;
pub mod plan_runner;

pub use crate::domain::model::{Candidate, MovePlan, MoveReport, Selection, SizeThreshold};
pub use crate::domain::ports::{ConfigProvider, FileStore, Relocator};
pub use crate::utils::error::Result;
