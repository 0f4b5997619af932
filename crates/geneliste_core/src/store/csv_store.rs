//! Delimited-text record store (`Data/Qui.csv`).
//!
//! # Responsibility
//! - Parse `;`- or tab-separated files into headers and flat records.
//! - Apply row edits in memory and write them back with a timestamped backup.
//! - Export a JS snapshot consumed by the static web client.
//!
//! # Invariants
//! - Cells are trimmed on load; the format has no quoting.
//! - Blank header names become `Col{n}` (1-based); surplus cells also land in
//!   `Col{n}` entries but are not written back unless listed in headers.
//! - `save` writes only the header columns, joined by the detected delimiter.

use super::{RecordSource, StoreError, StoreResult};
use crate::clock;
use crate::config::{BACKUP_DIR_NAME, BACKUP_FILE_PREFIX};
use crate::model::record::{find_column, Record};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

const PRIMARY_DELIMITER: char = ';';
const FALLBACK_DELIMITER: char = '\t';

/// Outcome of [`CsvRecordStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Number of records written.
    pub saved: usize,
    pub path: PathBuf,
    /// Copy of the previous file, when one existed.
    pub backup: Option<PathBuf>,
}

/// Picks `;` when the header line contains one, tab otherwise.
pub fn detect_delimiter(header_line: &str) -> char {
    if header_line.contains(PRIMARY_DELIMITER) {
        PRIMARY_DELIMITER
    } else {
        FALLBACK_DELIMITER
    }
}

/// Parses delimited text into `(delimiter, headers, records)`.
pub fn parse_csv(raw: &str) -> (char, Vec<String>, Vec<Record>) {
    let mut lines = raw
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return (PRIMARY_DELIMITER, Vec::new(), Vec::new());
    };
    let delimiter = detect_delimiter(header_line);
    let headers: Vec<String> = header_line
        .split(delimiter)
        .enumerate()
        .map(|(idx, name)| match name.trim() {
            "" => extra_column(idx),
            trimmed => trimmed.to_string(),
        })
        .collect();

    let records = lines
        .map(|line| {
            let cells: Vec<&str> = line.split(delimiter).map(str::trim).collect();
            let mut record = Record::new();
            for (idx, header) in headers.iter().enumerate() {
                record.set(header.clone(), cells.get(idx).copied().unwrap_or(""));
            }
            for (idx, cell) in cells.iter().enumerate().skip(headers.len()) {
                record.set(extra_column(idx), *cell);
            }
            record
        })
        .collect();

    (delimiter, headers, records)
}

fn extra_column(idx: usize) -> String {
    format!("Col{}", idx + 1)
}

/// In-memory copy of one CSV file plus its edit operations.
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    path: PathBuf,
    id_column: String,
    delimiter: char,
    headers: Vec<String>,
    records: Vec<Record>,
}

impl CsvRecordStore {
    /// Loads `path`, using `id_column` (case-insensitive) as identifier.
    ///
    /// # Errors
    /// - `Io` when the file cannot be read.
    pub fn open(path: impl Into<PathBuf>, id_column: impl Into<String>) -> StoreResult<Self> {
        let mut store = Self {
            path: path.into(),
            id_column: id_column.into(),
            delimiter: PRIMARY_DELIMITER,
            headers: Vec::new(),
            records: Vec::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-reads the file, discarding unsaved edits.
    pub fn reload(&mut self) -> StoreResult<()> {
        let raw = fs::read_to_string(&self.path).map_err(|source| {
            warn!(
                "event=store_load module=store status=error path={} error={}",
                self.path.display(),
                source
            );
            io_error(&self.path, source)
        })?;
        let (delimiter, headers, records) = parse_csv(&raw);
        self.delimiter = delimiter;
        self.headers = headers;
        self.records = records;
        info!(
            "event=store_load module=store status=ok rows={} columns={} path={}",
            self.records.len(),
            self.headers.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Returns the record with identifier `id`.
    pub fn get(&self, id: &str) -> StoreResult<&Record> {
        let idx = self.position(id)?;
        Ok(&self.records[idx])
    }

    /// Inserts a blank record at the front with the next free numeric id.
    ///
    /// Non-numeric identifiers are ignored when computing the maximum.
    pub fn create(&mut self) -> StoreResult<&Record> {
        let id_key = self.id_key()?;
        let max_id = self
            .records
            .iter()
            .filter_map(|record| record.get(&id_key).trim().parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        let mut record = Record::from_pairs(self.headers.iter().map(|header| (header.as_str(), "")));
        let new_id = (max_id + 1).to_string();
        record.set(id_key, new_id.as_str());
        self.records.insert(0, record);
        info!("event=record_create module=store status=ok id={new_id}");
        Ok(&self.records[0])
    }

    /// Sets `field` to `value` on the record with identifier `id`.
    ///
    /// # Errors
    /// - `MissingField` when `field` is blank.
    /// - `IdNotEditable` when `field` names the identifier column.
    pub fn update_field(&mut self, id: &str, field: &str, value: &str) -> StoreResult<&Record> {
        let field = field.trim();
        if field.is_empty() {
            return Err(StoreError::MissingField);
        }
        let id_key = self.id_key()?;
        let idx = self.position(id)?;
        if field.eq_ignore_ascii_case(&id_key) {
            return Err(StoreError::IdNotEditable);
        }
        let column = find_column(&self.headers, field).unwrap_or_else(|| field.to_string());
        self.records[idx].set(column, value);
        Ok(&self.records[idx])
    }

    /// Removes and returns the record with identifier `id`.
    pub fn delete(&mut self, id: &str) -> StoreResult<Record> {
        let idx = self.position(id)?;
        info!("event=record_delete module=store status=ok id={id}");
        Ok(self.records.remove(idx))
    }

    /// Rewrites identifiers as `1..=n` in current order.
    pub fn renumber(&mut self) -> StoreResult<usize> {
        let id_key = self.id_key()?;
        for (idx, record) in self.records.iter_mut().enumerate() {
            record.set(id_key.as_str(), (idx + 1).to_string());
        }
        info!(
            "event=record_renumber module=store status=ok updated={}",
            self.records.len()
        );
        Ok(self.records.len())
    }

    /// Serializes headers and records with the detected delimiter.
    pub fn to_csv(&self) -> String {
        let separator = self.delimiter.to_string();
        let mut lines = Vec::with_capacity(self.records.len() + 1);
        lines.push(self.headers.join(separator.as_str()));
        for record in &self.records {
            let cells: Vec<&str> = self
                .headers
                .iter()
                .map(|header| record.get(header))
                .collect();
            lines.push(cells.join(separator.as_str()));
        }
        lines.join("\n")
    }

    /// Backs up the current file under `Save/` and writes in-memory records.
    pub fn save(&self, at: OffsetDateTime) -> StoreResult<SaveReport> {
        let backup = if self.path.exists() {
            let save_dir = self
                .path
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(BACKUP_DIR_NAME);
            fs::create_dir_all(&save_dir).map_err(|source| io_error(&save_dir, source))?;
            let backup_path =
                save_dir.join(format!("{BACKUP_FILE_PREFIX}{}.csv", clock::file_stamp(at)));
            fs::copy(&self.path, &backup_path).map_err(|source| io_error(&backup_path, source))?;
            Some(backup_path)
        } else {
            None
        };

        fs::write(&self.path, self.to_csv()).map_err(|source| io_error(&self.path, source))?;
        info!(
            "event=store_save module=store status=ok rows={} backup={}",
            self.records.len(),
            backup.is_some()
        );
        Ok(SaveReport {
            saved: self.records.len(),
            path: self.path.clone(),
            backup,
        })
    }

    /// Writes a JS snapshot exposing `window.renderJs(renderFn)`.
    pub fn export_js(&self, target: &Path, at: OffsetDateTime) -> StoreResult<usize> {
        let headers = serde_json::to_string_pretty(&self.headers)?;
        let rows = serde_json::to_string_pretty(&self.records)?;
        let content = format!(
            "// Generated from {source} on {stamp}\n\
             (function(){{\n\
             \x20 const headers = {headers};\n\
             \x20 const rows = {rows};\n\
             \x20 window.renderJs = function(renderFn){{\n\
             \x20   if (typeof renderFn === 'function') {{\n\
             \x20     renderFn(headers, rows);\n\
             \x20   }} else if (typeof window.render === 'function') {{\n\
             \x20     window.render(headers, rows);\n\
             \x20   }} else {{\n\
             \x20     console.warn('No render function available for JS data.');\n\
             \x20   }}\n\
             \x20 }};\n\
             }})();",
            source = self.path.display(),
            stamp = clock::rfc3339(at),
        );
        fs::write(target, content).map_err(|source| io_error(target, source))?;
        info!(
            "event=store_export module=store status=ok format=js rows={} path={}",
            self.records.len(),
            target.display()
        );
        Ok(self.records.len())
    }

    /// Header spelling of the identifier column.
    pub fn id_key(&self) -> StoreResult<String> {
        find_column(&self.headers, &self.id_column).ok_or(StoreError::MissingIdColumn)
    }

    fn position(&self, id: &str) -> StoreResult<usize> {
        let id_key = self.id_key()?;
        self.records
            .iter()
            .position(|record| record.get(&id_key) == id)
            .ok_or_else(|| StoreError::RecordNotFound(id.to_string()))
    }
}

impl RecordSource for CsvRecordStore {
    fn headers(&self) -> &[String] {
        &self.headers
    }

    fn records(&self) -> &[Record] {
        &self.records
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::{detect_delimiter, parse_csv};

    #[test]
    fn delimiter_prefers_semicolon() {
        assert_eq!(detect_delimiter("ID;Nom"), ';');
        assert_eq!(detect_delimiter("ID\tNom"), '\t');
        assert_eq!(detect_delimiter("ID"), '\t');
    }

    #[test]
    fn parse_trims_and_fills_missing_cells() {
        let (delimiter, headers, records) = parse_csv("ID; Gene ;Nom\r\n\r\n1; #a# \n2\n");
        assert_eq!(delimiter, ';');
        assert_eq!(headers, vec!["ID", "Gene", "Nom"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Gene"), "#a#");
        assert_eq!(records[0].get("Nom"), "");
        assert!(records[1].contains("Nom"));
    }

    #[test]
    fn parse_names_blank_and_surplus_columns() {
        let (_, headers, records) = parse_csv("ID\t\tNom\n1\tx\ty\tz\n");
        assert_eq!(headers, vec!["ID", "Col2", "Nom"]);
        assert_eq!(records[0].get("Col2"), "x");
        assert_eq!(records[0].get("Col4"), "z");
    }

    #[test]
    fn parse_empty_input() {
        let (delimiter, headers, records) = parse_csv("\n  \n");
        assert_eq!(delimiter, ';');
        assert!(headers.is_empty());
        assert!(records.is_empty());
    }
}
