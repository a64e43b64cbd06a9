use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 單筆記錄解析失敗的原因
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("expected {expected} fields, found {found}")]
    WrongFieldCount { expected: usize, found: usize },

    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("'{value}' is not a valid amount")]
    InvalidAmount { value: String },
}

/// 固定欄位數的記錄型別。
///
/// 每個領域 (預算、員工通訊錄、聯絡人) 都有自己的具名欄位結構，
/// 從文字解析時即驗證，編輯器本身只透過這個 trait 操作記錄。
pub trait Record: Clone + PartialEq + fmt::Debug {
    /// CSV 標題列及表格欄名，順序即欄位順序
    const HEADERS: &'static [&'static str];

    /// 表格顯示用的欄寬
    const WIDTHS: &'static [usize];

    fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, RecordError>;

    fn to_fields(&self) -> Vec<String>;

    /// 合併匯入時比對用的鍵 (第一個欄位)
    fn key(&self) -> &str;

    fn arity() -> usize {
        Self::HEADERS.len()
    }

    fn matches_key(&self, other: &str) -> bool {
        self.key().to_lowercase() == other.to_lowercase()
    }
}

fn check_arity<S: AsRef<str>>(fields: &[S], expected: usize) -> Result<(), RecordError> {
    if fields.len() != expected {
        return Err(RecordError::WrongFieldCount {
            expected,
            found: fields.len(),
        });
    }
    Ok(())
}

fn text_field<S: AsRef<str>>(
    fields: &[S],
    index: usize,
    name: &'static str,
) -> Result<String, RecordError> {
    let value = fields[index].as_ref().trim();
    if value.is_empty() {
        return Err(RecordError::EmptyField { field: name });
    }
    Ok(value.to_string())
}

/// Parses a money amount. Accepts an optional leading `$` and `,` group separators.
pub fn parse_amount(input: &str) -> Result<f64, RecordError> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RecordError::InvalidAmount {
            value: input.trim().to_string(),
        }),
    }
}

/// 通常以兩位小數呈現；兩位小數無法精確還原時改用最短的完整表示，匯出後重新載入不失真
pub fn format_amount(amount: f64) -> String {
    let cents = format!("{:.2}", amount);
    if cents.parse::<f64>() == Ok(amount) {
        cents
    } else {
        amount.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetEntry {
    pub month: String,
    pub amount: f64,
}

impl BudgetEntry {
    pub fn new(month: impl Into<String>, amount: f64) -> Self {
        Self {
            month: month.into(),
            amount,
        }
    }
}

impl Record for BudgetEntry {
    const HEADERS: &'static [&'static str] = &["Month", "Amount"];
    const WIDTHS: &'static [usize] = &[15, 15];

    fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, RecordError> {
        check_arity(fields, 2)?;
        let month = text_field(fields, 0, "Month")?;
        let amount_text = text_field(fields, 1, "Amount")?;
        let amount = parse_amount(&amount_text)?;
        Ok(Self { month, amount })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![self.month.clone(), format_amount(self.amount)]
    }

    fn key(&self) -> &str {
        &self.month
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeContact {
    pub name: String,
    pub email: String,
}

impl EmployeeContact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Record for EmployeeContact {
    const HEADERS: &'static [&'static str] = &["Name", "Email"];
    const WIDTHS: &'static [usize] = &[15, 25];

    fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, RecordError> {
        check_arity(fields, 2)?;
        Ok(Self {
            name: text_field(fields, 0, "Name")?,
            email: text_field(fields, 1, "Email")?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone()]
    }

    fn key(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Record for Contact {
    const HEADERS: &'static [&'static str] = &["Name", "Phone", "Email"];
    const WIDTHS: &'static [usize] = &[20, 15, 25];

    fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, RecordError> {
        check_arity(fields, 3)?;
        Ok(Self {
            name: text_field(fields, 0, "Name")?,
            phone: text_field(fields, 1, "Phone")?,
            email: text_field(fields, 2, "Email")?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.phone.clone(), self.email.clone()]
    }

    fn key(&self) -> &str {
        &self.name
    }
}

/// 來源檔格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// `Jan|100`
    Pipe,
    /// `Jake jake@example.com`
    Whitespace,
    /// RFC 4180 CSV, optional header row
    Csv,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::Pipe => "pipe",
            SourceFormat::Whitespace => "whitespace",
            SourceFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// 編輯器支援的資料種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Budget,
    Employees,
    Contacts,
}

impl RecordKind {
    pub fn purpose(&self) -> &'static str {
        match self {
            RecordKind::Budget => "Budget Editor Program",
            RecordKind::Employees => "Employee Contact Directory Manager",
            RecordKind::Contacts => "Contact Manager",
        }
    }

    pub fn default_source(&self) -> &'static str {
        match self {
            RecordKind::Budget => "final_exam.txt",
            RecordKind::Employees => "employee_contact_info.txt",
            RecordKind::Contacts => "contacts.csv",
        }
    }

    pub fn default_format(&self) -> SourceFormat {
        match self {
            RecordKind::Budget => SourceFormat::Pipe,
            RecordKind::Employees => SourceFormat::Whitespace,
            RecordKind::Contacts => SourceFormat::Csv,
        }
    }

    /// 來源檔不存在時寫入的內容
    pub fn placeholder(&self) -> &'static str {
        match self {
            RecordKind::Budget => "",
            RecordKind::Employees => {
                "Jake jake@example.com\nSteve steve@jobs.org\nstudent student@mclennan.edu\n"
            }
            RecordKind::Contacts => "Name,Phone,Email\n",
        }
    }

    pub fn export_hint(&self) -> &'static str {
        match self {
            RecordKind::Budget => "budget.csv",
            RecordKind::Employees => "output.csv",
            RecordKind::Contacts => "contacts_export.csv",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Budget => "budget",
            RecordKind::Employees => "employees",
            RecordKind::Contacts => "contacts",
        };
        f.write_str(name)
    }
}
