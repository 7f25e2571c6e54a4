use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use crate::table::Table;

/// Detected file format
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Csv,
    Tsv,
}

impl FileFormat {
    /// Detect format from file extension
    fn from_extension(path: &PathBuf) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(FileFormat::Csv),
            "tsv" | "tab" => Some(FileFormat::Tsv),
            _ => None,
        }
    }

    fn delimiter(&self) -> u8 {
        match self {
            FileFormat::Csv => b',',
            FileFormat::Tsv => b'\t',
        }
    }
}

/// Result of loading a file, including any warnings
pub struct LoadResult {
    pub table: Table,
    pub warnings: Vec<String>,
}

pub struct FileIO {
    pub file_path: Option<PathBuf>,
    delimiter: Option<u8>,
    format: Option<FileFormat>,
}

impl FileIO {
    pub fn new(file_path: Option<PathBuf>, delimiter: Option<u8>) -> io::Result<Self> {
        let format = file_path.as_ref().and_then(FileFormat::from_extension);
        Ok(Self {
            file_path,
            delimiter,
            format,
        })
    }

    pub fn file_name(&self) -> String {
        self.file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(sample data)".to_string())
    }

    pub fn delimiter_name(&self) -> &'static str {
        match self.effective_delimiter() {
            b',' => "comma",
            b'\t' => "tab",
            b';' => "semicolon",
            b'|' => "pipe",
            _ => "custom",
        }
    }

    fn effective_delimiter(&self) -> u8 {
        if let Some(d) = self.delimiter {
            return d;
        }
        if let Some(f) = self.format {
            return f.delimiter();
        }
        // sniff the first line when neither flag nor extension decides
        self.sniff_delimiter().unwrap_or(b',')
    }

    /// Count candidate delimiters in the first line and take the most
    /// frequent one.
    fn sniff_delimiter(&self) -> Option<u8> {
        let path = self.file_path.as_ref()?;
        let file = File::open(path).ok()?;
        let mut first_line = String::new();
        BufReader::new(file).read_line(&mut first_line).ok()?;

        [b',', b'\t', b';', b'|']
            .into_iter()
            .map(|d| (d, first_line.bytes().filter(|b| *b == d).count()))
            .filter(|(_, n)| *n > 0)
            .max_by_key(|(_, n)| *n)
            .map(|(d, _)| d)
    }

    /// Load the table, first row as headers. Without a path a built-in
    /// sample data set is returned so the viewer has something to show.
    pub fn load_table(&self) -> io::Result<LoadResult> {
        if self.file_path.is_none() {
            return Ok(LoadResult {
                table: sample_table(),
                warnings: vec!["No file given, showing sample data".to_string()],
            });
        }
        self.read_csv()
    }

    fn read_csv(&self) -> io::Result<LoadResult> {
        let path = self.file_path.as_ref().ok_or(io::ErrorKind::NotFound)?;
        let delim = self.effective_delimiter();

        let file = File::open(path)?;
        let reader = BufReader::with_capacity(1 << 20, file); // 1 MB

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delim)
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::Fields)
            .from_reader(reader);

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut max_cols: usize = 0;
        let mut needs_padding = false;

        for result in csv_reader.records() {
            let record = result.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            if row.len() > max_cols {
                if max_cols > 0 {
                    needs_padding = true;
                }
                max_cols = row.len();
            } else if row.len() < max_cols {
                needs_padding = true;
            }

            rows.push(row);
        }

        let mut warnings = Vec::new();
        if needs_padding {
            warnings.push("Padded short rows to a uniform column count".to_string());
        }

        if rows.is_empty() {
            return Ok(LoadResult {
                table: Table::empty(),
                warnings: vec![format!("Empty file: {}", path.display())],
            });
        }

        let mut headers = rows.remove(0);
        headers.resize(max_cols, String::new());

        Ok(LoadResult {
            table: Table::new(headers, rows),
            warnings,
        })
    }
}

/// Deterministic wide sample: 20 columns with mixed content lengths,
/// enough to exercise the sizing, frozen columns and every layout mode.
pub fn sample_table() -> Table {
    let headers: Vec<String> = std::iter::once("Service".to_string())
        .chain((1..20).map(|i| format!("Metric {:02}", i)))
        .collect();

    let names = [
        "auth-gateway",
        "billing-reconciliation-worker",
        "checkout",
        "content-indexer",
        "delivery-estimates",
        "email-dispatch",
        "fraud-scoring-pipeline",
        "geo-lookup",
        "hourly-report-aggregator",
        "inventory-sync",
    ];

    let rows: Vec<Vec<String>> = (0..30)
        .map(|r| {
            std::iter::once(format!("{}-{:02}", names[r % names.len()], r))
                .chain((1..20).map(|c| match (r + c) % 4 {
                    0 => format!("{}", (r * 37 + c * 13) % 1000),
                    1 => format!("{}.{:02}%", (r * 7 + c) % 100, (r * c) % 100),
                    2 => format!("ok ({}ms)", (r * 11 + c * 3) % 250),
                    _ => format!("queued since {:02}:{:02}", (r + c) % 24, (r * c) % 60),
                }))
                .collect()
        })
        .collect();

    Table::new(headers, rows)
}
