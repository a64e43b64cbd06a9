pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, MemoryStorage};
pub use app::{run_editor, Session, SessionOutcome};
pub use config::{EditorConfig, EditorProfile};
pub use crate::core::{MergeSummary, RecordList, RecordStore};
pub use domain::model::{BudgetEntry, Contact, EmployeeContact, Record, RecordKind, SourceFormat};
pub use utils::error::{EditorError, Result};
