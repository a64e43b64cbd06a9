use crate::domain::model::Record;
use crate::utils::error::{EditorError, Result};
use std::fmt::Write;

const INDEX_WIDTH: usize = 5;

/// 合併匯入的統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub inserted: usize,
    pub updated: usize,
}

impl MergeSummary {
    pub fn total(&self) -> usize {
        self.inserted + self.updated
    }
}

/// 依插入順序保存的記錄清單，對外一律使用 1 起算的位置
#[derive(Debug, Clone, PartialEq)]
pub struct RecordList<R: Record> {
    records: Vec<R>,
}

impl<R: Record> Default for RecordList<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordList<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    pub fn into_inner(self) -> Vec<R> {
        self.records
    }

    /// 取得 1 起算位置的記錄
    pub fn get(&self, position: usize) -> Option<&R> {
        position
            .checked_sub(1)
            .and_then(|index| self.records.get(index))
    }

    fn index_of(&self, position: usize) -> Result<usize> {
        match position.checked_sub(1) {
            Some(index) if index < self.records.len() => Ok(index),
            _ => Err(EditorError::IndexOutOfRange {
                position,
                len: self.records.len(),
            }),
        }
    }

    pub fn push(&mut self, record: R) {
        self.records.push(record);
    }

    /// 以新記錄取代指定位置的記錄，回傳被取代的舊記錄
    pub fn edit(&mut self, position: usize, record: R) -> Result<R> {
        let index = self.index_of(position)?;
        tracing::debug!("Editing entry {} ({:?} -> {:?})", position, self.records[index], record);
        Ok(std::mem::replace(&mut self.records[index], record))
    }

    /// 刪除指定位置的記錄，之後的記錄往前移一位
    pub fn delete(&mut self, position: usize) -> Result<R> {
        let index = self.index_of(position)?;
        let removed = self.records.remove(index);
        tracing::debug!("Deleted entry {} ({:?})", position, removed);
        Ok(removed)
    }

    /// 合併候選記錄：鍵 (不分大小寫) 已存在則覆寫第一筆相符的記錄，否則附加到最後
    pub fn merge<I>(&mut self, candidates: I) -> MergeSummary
    where
        I: IntoIterator<Item = R>,
    {
        let mut summary = MergeSummary::default();

        for candidate in candidates {
            let existing = self
                .records
                .iter()
                .position(|record| record.matches_key(candidate.key()));

            match existing {
                Some(index) => {
                    tracing::debug!("Import overwrites '{}'", self.records[index].key());
                    self.records[index] = candidate;
                    summary.updated += 1;
                }
                None => {
                    tracing::debug!("Import appends '{}'", candidate.key());
                    self.records.push(candidate);
                    summary.inserted += 1;
                }
            }
        }

        summary
    }

    /// 以固定欄寬輸出表格，`show_index` 時每列前加上 1 起算的編號
    pub fn render(&self, show_index: bool) -> String {
        let mut out = String::new();

        if self.records.is_empty() {
            out.push_str("No entries found.\n");
            return out;
        }

        let mut header: Vec<String> = Vec::new();
        if show_index {
            header.push(format!("{:<width$}", "#", width = INDEX_WIDTH));
        }
        for (name, width) in R::HEADERS.iter().zip(R::WIDTHS) {
            header.push(format!("{:<width$}", name, width = width));
        }
        let _ = writeln!(out, "{}", header.join(" ").trim_end());

        let rule_width: usize =
            R::WIDTHS.iter().sum::<usize>() + if show_index { INDEX_WIDTH } else { 0 };
        let _ = writeln!(out, "{}", "-".repeat(rule_width));

        for (i, record) in self.records.iter().enumerate() {
            let mut cells: Vec<String> = Vec::new();
            if show_index {
                cells.push(format!("{:<width$}", i + 1, width = INDEX_WIDTH));
            }
            for (value, width) in record.to_fields().iter().zip(R::WIDTHS) {
                cells.push(format!("{:<width$}", value, width = width));
            }
            let _ = writeln!(out, "{}", cells.join(" ").trim_end());
        }

        out
    }
}

impl<R: Record> From<Vec<R>> for RecordList<R> {
    fn from(records: Vec<R>) -> Self {
        Self { records }
    }
}

impl<R: Record> FromIterator<R> for RecordList<R> {
    fn from_iter<T: IntoIterator<Item = R>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a, R: Record> IntoIterator for &'a RecordList<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
