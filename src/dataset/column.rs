//! Homogeneous column storage.

use super::types::{ColumnType, Field, Value};

/// Column values; `None` marks a missing cell.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

impl ColumnData {
    /// A column of `len` missing values
    pub fn nulls(column_type: ColumnType, len: usize) -> Self {
        match column_type {
            ColumnType::Numeric => ColumnData::Numeric(vec![None; len]),
            ColumnType::Categorical => ColumnData::Categorical(vec![None; len]),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnData::Numeric(_) => ColumnType::Numeric,
            ColumnData::Categorical(_) => ColumnType::Categorical,
        }
    }

    /// Value at `row`. NaN is reported as missing.
    pub fn value(&self, row: usize) -> Value {
        match self {
            ColumnData::Numeric(v) => match v.get(row).copied().flatten() {
                Some(x) if !x.is_nan() => Value::Number(x),
                _ => Value::Null,
            },
            ColumnData::Categorical(v) => v.get(row).cloned().flatten().into(),
        }
    }

    /// Rows at `indices`, in that order
    pub fn take(&self, indices: &[usize]) -> Self {
        match self {
            ColumnData::Numeric(v) => {
                ColumnData::Numeric(indices.iter().map(|&i| v.get(i).copied().flatten()).collect())
            }
            ColumnData::Categorical(v) => {
                ColumnData::Categorical(indices.iter().map(|&i| v.get(i).cloned().flatten()).collect())
            }
        }
    }

    /// Append `other`, converting it to this column's type first.
    pub fn extend_from(&mut self, other: &ColumnData) {
        match self {
            ColumnData::Numeric(dst) => dst.extend(other.to_numbers()),
            ColumnData::Categorical(dst) => dst.extend(other.to_labels()),
        }
    }

    /// Append `n` missing values
    pub fn extend_nulls(&mut self, n: usize) {
        match self {
            ColumnData::Numeric(v) => v.extend(std::iter::repeat(None).take(n)),
            ColumnData::Categorical(v) => v.extend(std::iter::repeat(None).take(n)),
        }
    }

    /// Convert to another type. Numbers format with `Display`; labels that do
    /// not parse as numbers become missing.
    pub fn cast(&self, to: ColumnType) -> ColumnData {
        match to {
            ColumnType::Numeric => ColumnData::Numeric(self.to_numbers()),
            ColumnType::Categorical => ColumnData::Categorical(self.to_labels()),
        }
    }

    fn to_numbers(&self) -> Vec<Option<f64>> {
        match self {
            ColumnData::Numeric(v) => v.clone(),
            ColumnData::Categorical(v) => v
                .iter()
                .map(|s| s.as_deref().and_then(|s| s.trim().parse::<f64>().ok()))
                .collect(),
        }
    }

    /// Every cell as a label; NaN and missing cells become `None`
    pub(crate) fn to_labels(&self) -> Vec<Option<String>> {
        match self {
            ColumnData::Numeric(v) => v
                .iter()
                .map(|x| x.filter(|x| !x.is_nan()).map(|x| x.to_string()))
                .collect(),
            ColumnData::Categorical(v) => v.clone(),
        }
    }

    /// Non-missing numeric observations. Empty for categorical columns.
    pub fn observed_numbers(&self) -> Vec<f64> {
        match self {
            ColumnData::Numeric(v) => v.iter().flatten().copied().filter(|x| !x.is_nan()).collect(),
            ColumnData::Categorical(_) => Vec::new(),
        }
    }

    /// Non-missing labels. Numeric columns are formatted.
    pub fn observed_labels(&self) -> Vec<String> {
        self.to_labels().into_iter().flatten().collect()
    }

    /// Number of non-missing cells
    pub fn observed_count(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.iter().filter(|x| x.is_some_and(|x| !x.is_nan())).count(),
            ColumnData::Categorical(v) => v.iter().filter(|x| x.is_some()).count(),
        }
    }
}

/// A named column
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self { name: name.into(), data }
    }

    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnData::Numeric(values))
    }

    pub fn categorical(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self::new(name, ColumnData::Categorical(values))
    }

    /// Numeric column with no missing values
    pub fn from_f64(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::numeric(name, values.into_iter().map(Some).collect())
    }

    /// Categorical column with no missing values
    pub fn from_labels<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::categorical(name, values.into_iter().map(|s| Some(s.into())).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ColumnData {
        &mut self.data
    }

    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    pub fn field(&self) -> Field {
        Field::new(self.name.clone(), self.column_type())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn cast(&self, to: ColumnType) -> Column {
        Column::new(self.name.clone(), self.data.cast(to))
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
