//! Append-only CSV ledger of calculated quotes.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info};

pub const LEDGER_HEADER: [&str; 8] = [
    "Projeto",
    "Tempo (h)",
    "Filamento (g)",
    "Custo Impressora",
    "Custo Filamento",
    "Custo Energia",
    "Preço Final",
    "Link",
];

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to access ledger file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed ledger record {record}: {reason}")]
    Malformed { record: usize, reason: String },
}

/// One saved quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub project_name: String,
    pub hours: f64,
    pub filament_grams: f64,
    pub printer_cost: f64,
    pub filament_cost: f64,
    pub energy_cost: f64,
    pub final_price: f64,
    pub link: String,
}

impl LedgerRow {
    fn to_record(&self) -> String {
        let fields = [
            escape_field(&self.project_name),
            format!("{:.2}", self.hours),
            format!("{:.2}", self.filament_grams),
            format!("{:.2}", self.printer_cost),
            format!("{:.2}", self.filament_cost),
            format!("{:.2}", self.energy_cost),
            format!("{:.2}", self.final_price),
            escape_field(&self.link),
        ];
        let mut line = fields.join(",");
        line.push('\n');
        line
    }

    fn from_record(record: usize, fields: Vec<String>) -> Result<Self, LedgerError> {
        if fields.len() != LEDGER_HEADER.len() {
            return Err(LedgerError::Malformed {
                record,
                reason: format!("expected {} fields, found {}", LEDGER_HEADER.len(), fields.len()),
            });
        }

        let number = |idx: usize| -> Result<f64, LedgerError> {
            fields[idx].trim().parse::<f64>().map_err(|_| LedgerError::Malformed {
                record,
                reason: format!("column '{}' is not a number: '{}'", LEDGER_HEADER[idx], fields[idx]),
            })
        };

        Ok(Self {
            project_name: fields[0].clone(),
            hours: number(1)?,
            filament_grams: number(2)?,
            printer_cost: number(3)?,
            filament_cost: number(4)?,
            energy_cost: number(5)?,
            final_price: number(6)?,
            link: fields[7].clone(),
        })
    }
}

/// CSV file sink
///
/// The header is written when the file is empty. Each row is written with a
/// single `write_all` in append mode. Appends through one `Ledger` are
/// serialized; separate processes are not coordinated.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, row: &LedgerRow) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        if file.metadata()?.len() == 0 {
            let mut header = LEDGER_HEADER.join(",");
            header.push('\n');
            file.write_all(header.as_bytes())?;
            info!("Created ledger at {}", self.path.display());
        } else {
            // Appends always land at the end; the seek only positions the read
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        file.write_all(row.to_record().as_bytes())?;
        debug!("Appended ledger row for project '{}'", row.project_name);
        Ok(())
    }

    /// Read every row; a missing file is an empty ledger
    pub fn read_all(&self) -> Result<Vec<LedgerRow>, LedgerError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let records = parse_records(&content)?;
        let mut rows = Vec::with_capacity(records.len());
        for (idx, fields) in records.into_iter().enumerate() {
            if idx == 0 && fields.first().map(String::as_str) == Some(LEDGER_HEADER[0]) {
                continue;
            }
            rows.push(LedgerRow::from_record(idx + 1, fields)?);
        }
        Ok(rows)
    }
}

/// Quote a field when it contains a delimiter, quote or line break
fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Split CSV text into records, honoring quoted fields
fn parse_records(content: &str) -> Result<Vec<Vec<String>>, LedgerError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut fields));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(LedgerError::Malformed {
            record: records.len() + 1,
            reason: "unterminated quoted field".to_string(),
        });
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(fields);
    }

    Ok(records)
}
