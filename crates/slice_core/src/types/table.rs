//! Date-indexed table of named numeric columns.
//!
//! Asset returns, factor returns and macro indicators all cross the data
//! boundary in this shape. Missing observations are `None`; the consumers
//! decide whether a missing cell drops the row (factor alignment), skips the
//! cell (weighted sums, pairwise correlation) or means "indicator absent"
//! (macro snapshot).

use super::error::TableError;
use super::series::{ReturnSeries, TimeSeriesPoint};
use super::time::Date;
use super::weights::Weights;
use crate::math::stats;

/// Date-indexed table with unique named columns.
///
/// # Examples
///
/// ```
/// use slice_core::types::{Date, DateTable};
///
/// let d0 = Date::from_ymd(2024, 1, 2).unwrap();
/// let d1 = Date::from_ymd(2024, 1, 3).unwrap();
/// let table = DateTable::new(
///     vec!["SPY".into(), "TLT".into()],
///     vec![(d1, vec![Some(0.02), None]), (d0, vec![Some(0.01), Some(-0.01)])],
/// )
/// .unwrap();
///
/// assert_eq!(table.dates(), &[d0, d1]);
/// assert_eq!(table.column("TLT").unwrap(), vec![Some(-0.01), None]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DateTable {
    columns: Vec<String>,
    dates: Vec<Date>,
    rows: Vec<Vec<Option<f64>>>,
}

impl DateTable {
    /// Creates a table from column names and dated rows.
    ///
    /// Rows are sorted by date.
    ///
    /// # Errors
    ///
    /// - `TableError::DuplicateColumn` if a column name repeats
    /// - `TableError::RaggedRow` if a row width differs from the column count
    /// - `TableError::NonFiniteValue` if a present cell is NaN or infinite
    /// - `TableError::DuplicateDate` if two rows share a date
    pub fn new(
        columns: Vec<String>,
        mut rows: Vec<(Date, Vec<Option<f64>>)>,
    ) -> Result<Self, TableError> {
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(TableError::DuplicateColumn(name.clone()));
            }
        }

        for (date, values) in &rows {
            if values.len() != columns.len() {
                return Err(TableError::RaggedRow {
                    date: date.to_string(),
                    expected: columns.len(),
                    actual: values.len(),
                });
            }
            if let Some(j) = values
                .iter()
                .position(|v| matches!(v, Some(x) if !x.is_finite()))
            {
                return Err(TableError::NonFiniteValue {
                    column: columns[j].clone(),
                    date: date.to_string(),
                });
            }
        }

        rows.sort_by_key(|(date, _)| *date);
        if let Some(pair) = rows.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(TableError::DuplicateDate(pair[0].0.to_string()));
        }

        let (dates, rows): (Vec<Date>, Vec<Vec<Option<f64>>>) = rows.into_iter().unzip();
        Ok(Self {
            columns,
            dates,
            rows,
        })
    }

    /// Builds a table with one column per series over the union of dates.
    ///
    /// Dates a series does not cover are left as `None`.
    ///
    /// # Errors
    ///
    /// `TableError::DuplicateColumn` if two series share an identifier.
    pub fn from_series<'a, I>(series: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = &'a ReturnSeries>,
    {
        let series: Vec<&ReturnSeries> = series.into_iter().collect();
        let columns: Vec<String> = series.iter().map(|s| s.id().to_string()).collect();

        let mut dates: Vec<Date> = series.iter().flat_map(|s| s.dates()).collect();
        dates.sort();
        dates.dedup();

        let rows = dates
            .into_iter()
            .map(|date| (date, series.iter().map(|s| s.value_on(date)).collect()))
            .collect();

        Self::new(columns, rows)
    }

    /// Returns the column names in table order.
    #[inline]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Returns the row dates in ascending order.
    #[inline]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.dates.len()
    }

    /// Returns the number of columns.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the table has no rows or no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Returns the position of a column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns a column's cells in date order.
    ///
    /// # Errors
    ///
    /// `TableError::UnknownColumn` if the column does not exist.
    pub fn column(&self, name: &str) -> Result<Vec<Option<f64>>, TableError> {
        let j = self
            .column_index(name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|row| row[j]).collect())
    }

    /// Iterates `(date, cells)` in ascending date order.
    pub fn rows(&self) -> impl Iterator<Item = (Date, &[Option<f64>])> {
        self.dates
            .iter()
            .copied()
            .zip(self.rows.iter().map(|r| r.as_slice()))
    }

    /// Returns the cells of the row on a given date.
    pub fn row(&self, date: Date) -> Option<&[Option<f64>]> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|i| self.rows[i].as_slice())
    }

    /// Returns the most recent row.
    pub fn latest_row(&self) -> Option<(Date, &[Option<f64>])> {
        let date = *self.dates.last()?;
        let row = self.rows.last()?;
        Some((date, row.as_slice()))
    }

    /// Returns a named cell of the most recent row, if present.
    pub fn latest_value(&self, name: &str) -> Option<f64> {
        let j = self.column_index(name)?;
        self.latest_row().and_then(|(_, row)| row[j])
    }

    /// Weighted sum across columns for every row.
    ///
    /// Columns without a weight contribute nothing; missing cells contribute
    /// nothing.
    ///
    /// # Errors
    ///
    /// `TableError::UnknownColumn` if a weight names a column the table does
    /// not have.
    ///
    /// ```
    /// use slice_core::types::{Date, DateTable, Weights};
    ///
    /// let d = Date::from_ymd(2024, 1, 2).unwrap();
    /// let table = DateTable::new(
    ///     vec!["A".into(), "B".into()],
    ///     vec![(d, vec![Some(0.01), Some(0.03)])],
    /// )
    /// .unwrap();
    /// let weights = Weights::new([("A", 0.5), ("B", 0.5)]).unwrap();
    ///
    /// let sum = table.weighted_row_sum(&weights).unwrap();
    /// assert!((sum[0].value - 0.02).abs() < 1e-15);
    /// ```
    pub fn weighted_row_sum(&self, weights: &Weights) -> Result<Vec<TimeSeriesPoint>, TableError> {
        let mut aligned = vec![0.0; self.columns.len()];
        for (id, weight) in weights.iter() {
            let j = self
                .column_index(id)
                .ok_or_else(|| TableError::UnknownColumn(id.to_string()))?;
            aligned[j] = weight;
        }

        Ok(self
            .rows()
            .map(|(date, row)| {
                let value = row
                    .iter()
                    .zip(&aligned)
                    .filter_map(|(cell, w)| cell.map(|v| v * w))
                    .sum();
                TimeSeriesPoint::new(date, value)
            })
            .collect())
    }

    /// Pairwise Pearson correlation matrix in column order.
    ///
    /// Each pair uses the rows where both cells are present. An entry is
    /// `None` when fewer than two such rows exist or either side has zero
    /// variance over them.
    pub fn correlation_matrix(&self) -> Vec<Vec<Option<f64>>> {
        let n = self.columns.len();
        let columns: Vec<Vec<Option<f64>>> = (0..n)
            .map(|j| self.rows.iter().map(|row| row[j]).collect())
            .collect();

        let mut matrix = vec![vec![None; n]; n];
        for i in 0..n {
            for j in i..n {
                let (xs, ys): (Vec<f64>, Vec<f64>) = columns[i]
                    .iter()
                    .zip(&columns[j])
                    .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
                    .unzip();
                let corr = stats::pearson(&xs, &ys);
                matrix[i][j] = corr;
                matrix[j][i] = corr;
            }
        }
        matrix
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct RawRow {
        date: Date,
        values: Vec<Option<f64>>,
    }

    #[derive(Serialize, Deserialize)]
    struct RawTable {
        columns: Vec<String>,
        #[serde(default)]
        rows: Vec<RawRow>,
    }

    impl Serialize for DateTable {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            RawTable {
                columns: self.columns.clone(),
                rows: self
                    .rows()
                    .map(|(date, values)| RawRow {
                        date,
                        values: values.to_vec(),
                    })
                    .collect(),
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for DateTable {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let raw = RawTable::deserialize(deserializer)?;
            DateTable::new(
                raw.columns,
                raw.rows.into_iter().map(|r| (r.date, r.values)).collect(),
            )
            .map_err(serde::de::Error::custom)
        }
    }
}
