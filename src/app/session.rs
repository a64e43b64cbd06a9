use crate::app::prompt::{
    normalize_export_path, normalize_import_path, parse_selection, MenuChoice, Prompter, Selection,
};
use crate::config::EditorConfig;
use crate::core::{LoadStatus, RecordList, RecordStore};
use crate::domain::model::Record;
use crate::domain::ports::Storage;
use crate::utils::clock;
use crate::utils::error::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// 互動流程結束的方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Saved { path: PathBuf, rows: usize },
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Listing,
    Editing,
    Deleting,
    Adding,
    Importing,
    Exporting,
    Terminated(SessionOutcome),
}

/// 單一使用者的編輯流程，獨占記錄清單直到結束
pub struct Session<R: Record, S: Storage, I, O> {
    config: EditorConfig,
    store: RecordStore<S>,
    records: RecordList<R>,
    prompter: Prompter<I, O>,
    state: SessionState,
}

impl<R, S, I, O> Session<R, S, I, O>
where
    R: Record,
    S: Storage,
    I: BufRead,
    O: Write,
{
    pub fn new(config: EditorConfig, store: RecordStore<S>, input: I, output: O) -> Self {
        Self {
            config,
            store,
            records: RecordList::new(),
            prompter: Prompter::new(input, output),
            state: SessionState::Idle,
        }
    }

    pub fn with_records(mut self, records: RecordList<R>) -> Self {
        self.records = records;
        self
    }

    pub fn records(&self) -> &RecordList<R> {
        &self.records
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_parts(self) -> (RecordList<R>, O) {
        (self.records, self.prompter.into_output())
    }

    /// 載入來源檔並回報狀態；失敗時以空清單繼續
    pub fn load_source(&mut self) -> Result<()> {
        let source = self.config.source.clone();
        let loaded =
            self.store
                .load::<R>(&source, self.config.format, self.config.placeholder());

        match &loaded.status {
            LoadStatus::Loaded => {}
            LoadStatus::CreatedPlaceholder => {
                self.prompter.say(format_args!(
                    "Note: {} not found. Created a new one.",
                    source.display()
                ))?;
            }
            LoadStatus::Missing => {
                self.prompter
                    .say(format_args!("Error: {} not found.", source.display()))?;
            }
            LoadStatus::Failed(e) => {
                self.prompter.say(format_args!(
                    "An error occurred reading the file: {}",
                    e.user_friendly_message()
                ))?;
            }
        }

        self.records = loaded.records;
        Ok(())
    }

    /// 完整流程：開場、載入、選單迴圈、結束時間
    pub fn run(&mut self) -> Result<SessionOutcome> {
        self.prompter
            .say(format_args!("Program Purpose: {}", self.config.kind.purpose()))?;
        self.prompter
            .say(format_args!("Program Start Time: {}", clock::now()))?;

        self.load_source()?;
        let outcome = self.run_loop()?;

        self.prompter
            .say(format_args!("Program End Time: {}", clock::now()))?;
        Ok(outcome)
    }

    /// 只跑選單迴圈 (不載入來源檔)
    pub fn run_loop(&mut self) -> Result<SessionOutcome> {
        self.state = SessionState::Listing;

        loop {
            let next = match self.state.clone() {
                SessionState::Idle => SessionState::Listing,
                SessionState::Listing => self.listing()?,
                SessionState::Editing => self.editing()?,
                SessionState::Deleting => self.deleting()?,
                SessionState::Adding => self.adding()?,
                SessionState::Importing => self.importing()?,
                SessionState::Exporting => self.exporting()?,
                SessionState::Terminated(outcome) => return Ok(outcome),
            };

            tracing::debug!("Session state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn show_records(&mut self, show_index: bool) -> Result<()> {
        let table = self.records.render(show_index);
        self.prompter.say("\n--- Current Data ---")?;
        self.prompter.say(table)?;
        Ok(())
    }

    fn listing(&mut self) -> Result<SessionState> {
        self.show_records(false)?;
        self.prompter.say(MenuChoice::render_menu().trim_end())?;

        let Some(answer) = self.prompter.ask("Enter selection: ")? else {
            self.prompter.say("Input closed. Force closing program...")?;
            return Ok(SessionState::Terminated(SessionOutcome::Discarded));
        };

        let next = match MenuChoice::parse(&answer) {
            Some(MenuChoice::Edit) => SessionState::Editing,
            Some(MenuChoice::Delete) => SessionState::Deleting,
            Some(MenuChoice::Import) => SessionState::Importing,
            Some(MenuChoice::Add) => SessionState::Adding,
            Some(MenuChoice::SaveAndExit) => SessionState::Exporting,
            Some(MenuChoice::ForceExit) => {
                self.prompter.say("Force closing program...")?;
                SessionState::Terminated(SessionOutcome::Discarded)
            }
            None => {
                self.prompter.say(format_args!(
                    "Invalid option. Please enter a number from 1 to {}.",
                    MenuChoice::ALL.len()
                ))?;
                SessionState::Listing
            }
        };

        Ok(next)
    }

    /// 顯示編號清單並讀取選擇；清單為空、輸入 -1 或 EOF 時回傳 `None`
    fn select_position(&mut self, action: &str) -> Result<Option<usize>> {
        if self.records.is_empty() {
            self.prompter
                .say(format_args!("No entries to {}.", action.to_lowercase()))?;
            return Ok(None);
        }

        self.show_records(true)?;

        let len = self.records.len();
        let prompt = format!(
            "Enter the number of the entry to {} (or -1 to exit): ",
            action
        );
        let selection = self
            .prompter
            .ask_until(&prompt, |answer| parse_selection(answer, len))?;

        match selection {
            Some(Selection::Position(position)) => Ok(Some(position)),
            Some(Selection::Exit) | None => {
                self.prompter
                    .say(format_args!("Exiting {} mode.", action.to_lowercase()))?;
                Ok(None)
            }
        }
    }

    /// 逐欄詢問新值，直到整筆記錄通過驗證
    fn read_record(&mut self, verb: &str) -> Result<Option<R>> {
        loop {
            let mut fields = Vec::with_capacity(R::arity());

            for header in R::HEADERS {
                let Some(value) = self
                    .prompter
                    .ask(&format!("Enter {}{}: ", verb, header))?
                else {
                    return Ok(None);
                };
                fields.push(value);
            }

            match R::from_fields(fields.as_slice()) {
                Ok(record) => return Ok(Some(record)),
                Err(e) => {
                    self.prompter
                        .say(format_args!("Error: {}. Please try again.", e))?;
                }
            }
        }
    }

    fn editing(&mut self) -> Result<SessionState> {
        self.prompter.say("\n--- Edit Entry ---")?;

        let Some(position) = self.select_position("edit")? else {
            return Ok(SessionState::Listing);
        };

        if let Some(current) = self.records.get(position) {
            let summary = current.to_fields().join(" | ");
            self.prompter.say(format_args!("Editing: {}", summary))?;
        }

        let Some(record) = self.read_record("new ")? else {
            return Ok(SessionState::Listing);
        };

        match self.records.edit(position, record) {
            Ok(_) => self.prompter.say("Entry updated successfully.")?,
            Err(e) => self
                .prompter
                .say(format_args!("Error: {}", e.user_friendly_message()))?,
        }

        Ok(SessionState::Listing)
    }

    fn deleting(&mut self) -> Result<SessionState> {
        self.prompter.say("\n--- Delete Entry ---")?;

        let Some(position) = self.select_position("DELETE")? else {
            return Ok(SessionState::Listing);
        };

        match self.records.delete(position) {
            Ok(removed) => self.prompter.say(format_args!(
                "Successfully removed entry for: {}",
                removed.key()
            ))?,
            Err(e) => self
                .prompter
                .say(format_args!("Error: {}", e.user_friendly_message()))?,
        }

        Ok(SessionState::Listing)
    }

    fn adding(&mut self) -> Result<SessionState> {
        self.prompter.say("\n--- Add Entry ---")?;

        if let Some(record) = self.read_record("")? {
            let key = record.key().to_string();
            self.records.push(record);
            self.prompter
                .say(format_args!("Successfully added entry for: {}", key))?;
        }

        Ok(SessionState::Listing)
    }

    fn importing(&mut self) -> Result<SessionState> {
        self.prompter.say("\n--- Import Data ---")?;

        let Some(answer) = self.prompter.ask(
            "Enter the full path or filename to import from (e.g., C:\\Data\\new.csv): ",
        )?
        else {
            return Ok(SessionState::Listing);
        };

        let Some(path) = normalize_import_path(&answer) else {
            self.prompter.say("No file given. Import cancelled.")?;
            return Ok(SessionState::Listing);
        };

        match self
            .store
            .import_merge(&mut self.records, &path, self.config.format)
        {
            Ok(summary) => {
                self.prompter.say("Import complete.")?;
                self.prompter
                    .say(format_args!("- New entries added: {}", summary.inserted))?;
                self.prompter
                    .say(format_args!("- Existing entries updated: {}", summary.updated))?;
            }
            Err(e) => {
                tracing::warn!("⚠️ Import of {} failed: {}", path.display(), e);
                self.prompter.say(format_args!(
                    "Error: {}",
                    e.user_friendly_message()
                ))?;
            }
        }

        Ok(SessionState::Listing)
    }

    fn exporting(&mut self) -> Result<SessionState> {
        let prompt = match &self.config.export {
            Some(default) => format!(
                "Enter the desired filename for the CSV [{}]: ",
                default.display()
            ),
            None => format!(
                "Enter the desired filename for the CSV (e.g., {}): ",
                self.config.kind.export_hint()
            ),
        };

        let Some(answer) = self.prompter.ask(&prompt)? else {
            return Ok(SessionState::Listing);
        };

        let Some(dest) = normalize_export_path(&answer, self.config.export.as_ref()) else {
            self.prompter.say("No filename given. Nothing was saved.")?;
            return Ok(SessionState::Listing);
        };

        match self.store.export(&self.records, &dest) {
            Ok(rows) => {
                self.prompter
                    .say(format_args!("Successfully saved data to {}.", dest.display()))?;
                self.prompter.say("Saving and closing program...")?;
                Ok(SessionState::Terminated(SessionOutcome::Saved {
                    path: dest,
                    rows,
                }))
            }
            Err(e) => {
                tracing::error!("❌ Export to {} failed: {}", dest.display(), e);
                self.prompter.say(format_args!(
                    "Error writing to file: {}",
                    e.user_friendly_message()
                ))?;
                self.prompter.say(format!("💡 {}", e.recovery_suggestion()))?;
                Ok(SessionState::Listing)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;
    use crate::domain::model::{BudgetEntry, RecordKind};
    use std::io::Cursor;

    fn budget_session(
        script: &str,
        storage: MemoryStorage,
    ) -> Session<BudgetEntry, MemoryStorage, Cursor<String>, Vec<u8>> {
        Session::new(
            EditorConfig::for_kind(RecordKind::Budget),
            RecordStore::new(storage),
            Cursor::new(script.to_string()),
            Vec::new(),
        )
        .with_records(RecordList::from(vec![
            BudgetEntry::new("Jan", 100.0),
            BudgetEntry::new("Feb", 200.0),
        ]))
    }

    fn output_of(session: Session<BudgetEntry, MemoryStorage, Cursor<String>, Vec<u8>>) -> String {
        let (_, output) = session.into_parts();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_edit_with_retries() {
        let mut session = budget_session("1\nx\n0\n3\n2\nMarch\nabc\nMarch\n75\n6\n", MemoryStorage::new());

        let outcome = session.run_loop().unwrap();
        assert_eq!(outcome, SessionOutcome::Discarded);
        assert_eq!(
            session.records().as_slice(),
            &[BudgetEntry::new("Jan", 100.0), BudgetEntry::new("March", 75.0)]
        );

        let text = output_of(session);
        assert_eq!(text.matches("Please try again.").count(), 4);
        assert!(text.contains("Editing: Feb | 200.00"));
        assert!(text.contains("Entry updated successfully."));
    }

    #[test]
    fn test_delete_exit_sentinel_leaves_list() {
        let mut session = budget_session("2\n-1\n6\n", MemoryStorage::new());

        session.run_loop().unwrap();
        assert_eq!(session.records().len(), 2);
        assert!(output_of(session).contains("Exiting delete mode."));
    }

    #[test]
    fn test_edit_exit_sentinel_leaves_list() {
        let mut session = budget_session("1\n-1\n6\n", MemoryStorage::new());

        assert_eq!(session.run_loop().unwrap(), SessionOutcome::Discarded);
        assert_eq!(
            session.records().as_slice(),
            &[BudgetEntry::new("Jan", 100.0), BudgetEntry::new("Feb", 200.0)]
        );

        let text = output_of(session);
        assert!(text.contains("Exiting edit mode."));
        assert!(!text.contains("Entry updated successfully."));
    }

    #[test]
    fn test_invalid_utf8_input_is_reprompted() {
        let mut session = Session::new(
            EditorConfig::for_kind(RecordKind::Budget),
            RecordStore::new(MemoryStorage::new()),
            Cursor::new(b"\xff\xfe\n2\n\xff\n1\n6\n".to_vec()),
            Vec::new(),
        )
        .with_records(RecordList::from(vec![
            BudgetEntry::new("Jan", 100.0),
            BudgetEntry::new("Feb", 200.0),
        ]));

        assert_eq!(session.run_loop().unwrap(), SessionOutcome::Discarded);
        assert_eq!(
            session.records().as_slice(),
            &[BudgetEntry::new("Feb", 200.0)]
        );

        let (_, output) = session.into_parts();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Invalid option."));
        assert!(text.contains("Please try again."));
    }

    #[test]
    fn test_invalid_menu_choice_reprompts() {
        let mut session = budget_session("9\nhello\n6\n", MemoryStorage::new());

        session.run_loop().unwrap();
        let text = output_of(session);
        assert_eq!(text.matches("Invalid option.").count(), 2);
        assert_eq!(text.matches("Enter selection: ").count(), 3);
    }

    #[test]
    fn test_eof_terminates_as_discarded() {
        let mut session = budget_session("1\n", MemoryStorage::new());

        assert_eq!(session.run_loop().unwrap(), SessionOutcome::Discarded);
        assert_eq!(
            session.state(),
            &SessionState::Terminated(SessionOutcome::Discarded)
        );
    }

    #[test]
    fn test_failed_export_keeps_session_alive() {
        let mut session = budget_session("5\nbudget\n6\n", MemoryStorage::read_only());

        let outcome = session.run_loop().unwrap();
        assert_eq!(outcome, SessionOutcome::Discarded);
        assert!(output_of(session).contains("Error writing to file"));
    }

    #[test]
    fn test_save_appends_csv_extension() {
        let mut session = budget_session("5\nbudget\n", MemoryStorage::new());

        let outcome = session.run_loop().unwrap();
        assert_eq!(
            outcome,
            SessionOutcome::Saved {
                path: PathBuf::from("budget.csv"),
                rows: 2
            }
        );
    }
}
