use crate::domain::model::{Record, SourceFormat};
use crate::utils::error::{EditorError, Result};

/// 每列欄位數的接受規則
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// 欄位數必須剛好等於記錄的欄位數 (載入來源檔)
    Exact,
    /// 至少要有記錄的欄位數，多餘的欄位捨棄 (匯入)
    AtLeast,
}

fn build_record<R: Record>(fields: &[&str], arity: Arity) -> Option<R> {
    let expected = R::arity();
    let fields = match arity {
        Arity::Exact if fields.len() == expected => fields,
        Arity::AtLeast if fields.len() >= expected => &fields[..expected],
        _ => {
            tracing::debug!(
                "Dropping row with {} fields (expected {}): {:?}",
                fields.len(),
                expected,
                fields
            );
            return None;
        }
    };

    match R::from_fields(fields) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::debug!("Dropping malformed row {:?}: {}", fields, e);
            None
        }
    }
}

/// 一行文字切成欄位
pub type Splitter = fn(&str) -> Vec<&str>;

/// `Jan | 100`
pub fn split_pipe(line: &str) -> Vec<&str> {
    line.split('|').map(str::trim).collect()
}

/// `Jake   jake@example.com`
pub fn split_whitespace(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// 逐行解析分隔文字，空行略過，格式不符的行直接丟棄
pub fn parse_delimited<R: Record>(content: &str, split: Splitter, arity: Arity) -> Vec<R> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| build_record(&split(line), arity))
        .collect()
}

/// 第一列的前兩格 (不分大小寫) 包含預期的欄名時視為標題列
pub fn looks_like_header<R: Record>(cells: &[&str]) -> bool {
    let checked = R::HEADERS.len().min(2);
    if cells.len() < checked {
        return false;
    }

    R::HEADERS
        .iter()
        .take(checked)
        .zip(cells)
        .all(|(header, cell)| cell.to_lowercase().contains(&header.to_lowercase()))
}

pub fn parse_csv<R: Record>(content: &str, arity: Arity) -> Result<Vec<R>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();

    for (row_number, row) in reader.records().enumerate() {
        let row = row?;
        let cells: Vec<&str> = row.iter().collect();

        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        if row_number == 0 && looks_like_header::<R>(&cells) {
            tracing::debug!("Skipping CSV header row: {:?}", cells);
            continue;
        }

        if let Some(record) = build_record(&cells, arity) {
            records.push(record);
        }
    }

    Ok(records)
}

/// 依格式解析整份內容
pub fn parse<R: Record>(content: &str, format: SourceFormat, arity: Arity) -> Result<Vec<R>> {
    match format {
        SourceFormat::Csv => parse_csv(content, arity),
        SourceFormat::Pipe => Ok(parse_delimited(content, split_pipe, arity)),
        SourceFormat::Whitespace => Ok(parse_delimited(content, split_whitespace, arity)),
    }
}

/// 寫出 CSV：標題列 + 每筆記錄一列
pub fn write_csv<'a, R, I>(records: I) -> Result<Vec<u8>>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(R::HEADERS)?;

    for record in records {
        writer.write_record(record.to_fields())?;
    }

    writer
        .into_inner()
        .map_err(|e| EditorError::IoError(e.into_error()))
}
