pub mod prompt;
pub mod session;

pub use session::{Session, SessionOutcome, SessionState};

use crate::config::EditorConfig;
use crate::core::RecordStore;
use crate::domain::model::{BudgetEntry, Contact, EmployeeContact, RecordKind};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// 依設定的資料種類建立對應的編輯流程並執行
pub fn run_editor<S, I, O>(config: EditorConfig, storage: S, input: I, output: O) -> Result<SessionOutcome>
where
    S: Storage,
    I: BufRead,
    O: Write,
{
    let store = RecordStore::new(storage);
    tracing::info!("🚀 Starting {} editor on {}", config.kind, config.source.display());

    match config.kind {
        RecordKind::Budget => Session::<BudgetEntry, _, _, _>::new(config, store, input, output).run(),
        RecordKind::Employees => {
            Session::<EmployeeContact, _, _, _>::new(config, store, input, output).run()
        }
        RecordKind::Contacts => Session::<Contact, _, _, _>::new(config, store, input, output).run(),
    }
}
