use serde::Serialize;
use std::fmt;

/// One cell of a report row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportValue {
    Text(String),
    Number(f64),
    /// A statistic the tool has not computed
    Missing,
}

impl From<&str> for ReportValue {
    fn from(s: &str) -> Self {
        ReportValue::Text(s.to_string())
    }
}

impl From<String> for ReportValue {
    fn from(s: String) -> Self {
        ReportValue::Text(s)
    }
}

impl From<Option<f64>> for ReportValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(ReportValue::Missing, ReportValue::Number)
    }
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportValue::Text(s) => write!(f, "{}", s),
            ReportValue::Number(n) => write!(f, "{}", n),
            ReportValue::Missing => Ok(()),
        }
    }
}

/// Flat column/value table describing one measurement
///
/// Columns may repeat; they are positional, not keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    columns: Vec<String>,
    values: Vec<ReportValue>,
}

impl Report {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column together with its value
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<ReportValue>) {
        self.columns.push(column.into());
        self.values.push(value.into());
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[ReportValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterates over (column, value) pairs in order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ReportValue)> {
        self.columns
            .iter()
            .map(|c| c.as_str())
            .zip(self.values.iter())
    }

    /// Renders the report as CSV: a header line and one value line
    ///
    /// Cells containing a comma, quote or line break are quoted.
    pub fn to_csv(&self) -> String {
        let header: Vec<String> = self.columns.iter().map(|c| csv_escape(c)).collect();
        let row: Vec<String> = self
            .values
            .iter()
            .map(|v| csv_escape(&v.to_string()))
            .collect();
        format!("{}\n{}\n", header.join(","), row.join(","))
    }
}

fn csv_escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Builds a measurement's report on demand
///
/// Implementations hold the data the report is computed from and rebuild the
/// report from scratch on every call.
pub trait ReportGenerator: fmt::Debug + Send + Sync {
    fn build_report(&self) -> Report;
}
