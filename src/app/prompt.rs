use crate::core::store::is_csv_path;
use std::borrow::Cow;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

/// 結束編輯/刪除流程的輸入值
pub const EXIT_SENTINEL: i64 = -1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("'{input}' is not a whole number")]
    NotANumber { input: String },

    #[error("{selection} is not a valid selection number (1-{len})")]
    OutOfRange { selection: i64, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Exit,
    /// 1 起算的位置，已確認在範圍內
    Position(usize),
}

/// 解析清單編號；`-1` 代表離開
pub fn parse_selection(input: &str, len: usize) -> Result<Selection, SelectionError> {
    let trimmed = input.trim();
    let selection: i64 = trimmed.parse().map_err(|_| SelectionError::NotANumber {
        input: trimmed.to_string(),
    })?;

    if selection == EXIT_SENTINEL {
        return Ok(Selection::Exit);
    }

    match usize::try_from(selection) {
        Ok(position) if (1..=len).contains(&position) => Ok(Selection::Position(position)),
        _ => Err(SelectionError::OutOfRange { selection, len }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Edit,
    Delete,
    Import,
    Add,
    SaveAndExit,
    ForceExit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::Edit,
        MenuChoice::Delete,
        MenuChoice::Import,
        MenuChoice::Add,
        MenuChoice::SaveAndExit,
        MenuChoice::ForceExit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Edit => "Edit Entry",
            MenuChoice::Delete => "Delete Entry",
            MenuChoice::Import => "Import Data from File",
            MenuChoice::Add => "Add Entry",
            MenuChoice::SaveAndExit => "Save to CSV and Exit",
            MenuChoice::ForceExit => "Force Exit (No Save)",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let number: usize = input.trim().parse().ok()?;
        Self::ALL.get(number.checked_sub(1)?).copied()
    }

    pub fn render_menu() -> String {
        let mut menu = String::from("Options:\n");
        for (i, choice) in Self::ALL.iter().enumerate() {
            menu.push_str(&format!("{}. {}\n", i + 1, choice.label()));
        }
        menu
    }
}

/// 使用者貼上路徑時常帶引號 (Windows「複製為路徑」)
pub fn normalize_import_path(input: &str) -> Option<PathBuf> {
    let cleaned = input.trim().replace('"', "");
    if cleaned.is_empty() {
        None
    } else {
        Some(PathBuf::from(cleaned))
    }
}

/// 空白輸入時使用預設檔名；缺少 `.csv` 副檔名時自動補上
pub fn normalize_export_path(input: &str, default: Option<&PathBuf>) -> Option<PathBuf> {
    let cleaned = input.trim().replace('"', "");
    let path = if cleaned.is_empty() {
        default?.clone()
    } else {
        PathBuf::from(cleaned)
    };

    if is_csv_path(&path) {
        Some(path)
    } else {
        let mut name = path.into_os_string();
        name.push(".csv");
        Some(PathBuf::from(name))
    }
}

/// 從輸入讀行、向輸出寫提示。輸入結束 (EOF) 時回傳 `None`
pub struct Prompter<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Prompter<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> O {
        self.output
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// 非 UTF-8 的輸入以替代字元保留，交由呼叫端的解析流程拒絕並重問
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            tracing::debug!("Input line was not valid UTF-8: {:?}", buf);
        }

        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    /// 重複詢問直到 `parse` 成功
    pub fn ask_until<T, E, F>(&mut self, prompt: &str, mut parse: F) -> io::Result<Option<T>>
    where
        E: Display,
        F: FnMut(&str) -> Result<T, E>,
    {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };

            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    tracing::debug!("Rejected input {:?}: {}", answer, e);
                    self.say(format_args!("Error: {}. Please try again.", e))?;
                }
            }
        }
    }
}
