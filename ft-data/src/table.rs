//! Raw CSV tables.
//!
//! A [`Table`] is the loader's view of one CSV file: a header row and string
//! cells, nothing typed yet. The normalizers read cells by column name so the
//! column order of the source files does not matter.

use crate::error::{DataError, DatasetKind, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use ft_utils::dates::parse_date;
use log::warn;
use std::io::{Read, Write};

/// Cell values pandas writes for a missing number.
const MISSING_MARKERS: [&str; 4] = ["nan", "NaN", "NA", "null"];

/// A header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// An empty table with the given columns.
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Table {
            headers: headers.into_iter().map(|h| h.into().trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Read a CSV with a header row. Short rows are padded with empty cells.
    pub fn from_reader<R: Read>(reader: R) -> Result<Table> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>();
        let mut table = Table::new(headers);
        for result in rdr.records() {
            let record = result?;
            table.push_row(record.iter().map(|cell| cell.trim().to_string()).collect());
        }
        Ok(table)
    }

    pub fn from_csv_str(csv_data: &str) -> Result<Table> {
        Table::from_reader(csv_data.as_bytes())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Fail with `MissingRequiredColumn` naming the first absent column.
    pub fn require_columns(&self, dataset: DatasetKind, columns: &[&str]) -> Result<()> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(column) => Err(DataError::MissingRequiredColumn {
                dataset,
                column: column.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut values: Vec<String>) {
        if values.len() > self.headers.len() {
            warn!(
                "row {} has {} cells for {} columns, extra cells dropped",
                self.rows.len(),
                values.len(),
                self.headers.len()
            );
        }
        values.resize(self.headers.len(), String::new());
        self.rows.push(values);
    }

    /// Rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().enumerate().map(move |(index, values)| Row {
            table: self,
            index,
            values,
        })
    }

    /// Set `column` to `value` on every row, adding the column if needed.
    pub fn with_constant(mut self, column: &str, value: &str) -> Table {
        let index = match self.column_index(column) {
            Some(index) => index,
            None => {
                self.headers.push(column.to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
                self.headers.len() - 1
            }
        };
        for row in &mut self.rows {
            row[index] = value.to_string();
        }
        self
    }

    /// Stack tables vertically. Columns are the union of all headers in
    /// first-seen order; cells a table lacks stay empty.
    pub fn concat(tables: impl IntoIterator<Item = Table>) -> Table {
        let mut combined = Table::default();
        for table in tables {
            for header in &table.headers {
                if !combined.has_column(header) {
                    combined.headers.push(header.clone());
                    for row in &mut combined.rows {
                        row.push(String::new());
                    }
                }
            }
            let positions: Vec<usize> = table
                .headers
                .iter()
                .filter_map(|h| combined.column_index(h))
                .collect();
            for row in table.rows {
                let mut values = vec![String::new(); combined.headers.len()];
                for (value, &position) in row.into_iter().zip(&positions) {
                    values[position] = value;
                }
                combined.rows.push(values);
            }
        }
        combined
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// A borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
    values: &'a [String],
}

impl<'a> Row<'a> {
    /// Zero-based position in the table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The cell under `column`, or None when the column is absent, the cell
    /// is empty, or it holds a missing-value marker such as `NaN`.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let value = self.table.column_index(column).map(|i| self.values[i].as_str())?;
        if value.is_empty() || MISSING_MARKERS.contains(&value) {
            None
        } else {
            Some(value)
        }
    }

    /// A text cell that must be present.
    pub fn required(&self, column: &str) -> Result<&'a str> {
        self.get(column).ok_or_else(|| DataError::MissingValue {
            column: column.to_string(),
        })
    }

    /// A required date cell.
    pub fn date(&self, column: &str) -> Result<NaiveDate> {
        parse_date(self.get(column).unwrap_or_default()).map_err(|source| DataError::InvalidDate {
            column: column.to_string(),
            source,
        })
    }

    /// An optional numeric cell; present-but-garbled values are an error.
    pub fn number(&self, column: &str) -> Result<Option<f64>> {
        match self.get(column) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<f64>()
                .map(Some)
                .map_err(|_| DataError::InvalidNumber {
                    column: column.to_string(),
                    value: raw.to_string(),
                }),
        }
    }

    /// A numeric cell that must be present.
    pub fn required_number(&self, column: &str) -> Result<f64> {
        self.number(column)?.ok_or_else(|| DataError::InvalidNumber {
            column: column.to_string(),
            value: String::new(),
        })
    }

    /// An integer cell that must be present. Accepts pandas-style `2010.0`.
    pub fn required_integer(&self, column: &str) -> Result<i64> {
        let value = self.required_number(column)?;
        if value.fract() != 0.0 || !value.is_finite() {
            return Err(DataError::InvalidNumber {
                column: column.to_string(),
                value: self.get(column).unwrap_or_default().to_string(),
            });
        }
        Ok(value as i64)
    }
}
