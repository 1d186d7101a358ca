//! Ordered collection of equal-length named columns.

use super::column::{Column, ColumnData};
use super::key::RowKey;
use super::types::{ColumnType, Schema, Value};
use crate::error::{Error, Result};

/// Tabular dataset with insertion-ordered, uniquely named columns.
///
/// A dataset with no columns still remembers its row count so that projecting
/// onto an empty column set keeps the row set unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Empty dataset with no columns and no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from columns, checking names and lengths
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut dataset = Self::new();
        for column in columns {
            dataset.push_column(column)?;
        }
        Ok(dataset)
    }

    /// Builder-style [`Dataset::push_column`]
    pub fn with_column(mut self, column: Column) -> Result<Self> {
        self.push_column(column)?;
        Ok(self)
    }

    /// Append a column. The first column fixes the row count.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.column(column.name()).is_some() {
            return Err(Error::DuplicateColumn { name: column.name().to_string() });
        }
        if self.columns.is_empty() {
            self.n_rows = column.len();
        } else if column.len() != self.n_rows {
            return Err(Error::LengthMismatch {
                name: column.name().to_string(),
                expected: self.n_rows,
                actual: column.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// True when the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Column by name, or [`Error::MissingColumn`]
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| Error::MissingColumn { name: name.to_string() })
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn schema(&self) -> Schema {
        Schema::new(self.columns.iter().map(Column::field).collect())
    }

    /// Project onto `names`, in the order given
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Dataset> {
        let columns = names
            .iter()
            .map(|n| self.require(n.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;
        Ok(Dataset { columns, n_rows: self.n_rows })
    }

    /// Rows at `indices`, in that order
    pub fn take(&self, indices: &[usize]) -> Dataset {
        Dataset {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name(), c.data().take(indices)))
                .collect(),
            n_rows: indices.len(),
        }
    }

    /// Cell values of `row` in column order
    pub fn row_values(&self, row: usize) -> Vec<Value> {
        self.columns.iter().map(|c| c.data().value(row)).collect()
    }

    /// Exact identity of `row` in column order
    pub fn row_key(&self, row: usize, decimals: Option<u32>) -> RowKey {
        RowKey::from_values(&self.row_values(row), decimals)
    }

    /// Convert a column to another declared type in place
    pub fn cast_column(&mut self, name: &str, to: ColumnType) -> Result<()> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name() == name)
            .ok_or_else(|| Error::MissingColumn { name: name.to_string() })?;
        if column.column_type() != to {
            *column = column.cast(to);
        }
        Ok(())
    }

    /// Append the rows of `other`, matching columns by name.
    ///
    /// Columns `other` lacks are filled with missing values; values are cast to
    /// this dataset's declared types; columns only `other` has are ignored. An
    /// empty dataset with no columns adopts `other` wholesale.
    pub fn append_rows(&mut self, other: &Dataset) {
        if self.columns.is_empty() && self.n_rows == 0 {
            *self = other.clone();
            return;
        }
        for column in &mut self.columns {
            match other.column(column.name()) {
                Some(src) => column.data_mut().extend_from(src.data()),
                None => column.data_mut().extend_nulls(other.n_rows),
            }
        }
        self.n_rows += other.n_rows;
    }

    /// Rename a column; the new name must not already exist
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<()> {
        if from == to {
            return self.require(from).map(|_| ());
        }
        if self.column(to).is_some() {
            return Err(Error::DuplicateColumn { name: to.to_string() });
        }
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name() == from)
            .ok_or_else(|| Error::MissingColumn { name: from.to_string() })?;
        column.rename(to);
        Ok(())
    }

    /// Remove the named columns; absent names are ignored
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) {
        self.columns.retain(|c| !names.iter().any(|n| n.as_ref() == c.name()));
    }

    /// Numeric column values, or [`Error::ColumnType`] for a categorical column
    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>]> {
        match self.require(name)?.data() {
            ColumnData::Numeric(v) => Ok(v),
            ColumnData::Categorical(_) => Err(Error::ColumnType {
                name: name.to_string(),
                expected: ColumnType::Numeric.name(),
                actual: ColumnType::Categorical.name(),
            }),
        }
    }

    /// Label column values, or [`Error::ColumnType`] for a numeric column
    pub fn labels(&self, name: &str) -> Result<&[Option<String>]> {
        match self.require(name)?.data() {
            ColumnData::Categorical(v) => Ok(v),
            ColumnData::Numeric(_) => Err(Error::ColumnType {
                name: name.to_string(),
                expected: ColumnType::Categorical.name(),
                actual: ColumnType::Numeric.name(),
            }),
        }
    }
}
