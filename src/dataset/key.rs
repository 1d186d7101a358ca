//! Exact row identity for deduplication.

use super::types::Value;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum KeyCell {
    Missing,
    Number(u64),
    Text(String),
}

/// Hashable value tuple of one row.
///
/// Numbers compare by bit pattern, so `1.0` and `1.0000000001` are distinct
/// keys. `-0.0` equals `0.0`, and missing equals missing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RowKey(Vec<KeyCell>);

impl RowKey {
    /// Build a key from row values, optionally rounding numbers to `decimals`.
    pub fn from_values(values: &[Value], decimals: Option<u32>) -> Self {
        RowKey(
            values
                .iter()
                .map(|v| match v {
                    Value::Null => KeyCell::Missing,
                    Value::Number(x) => KeyCell::Number(number_bits(*x, decimals)),
                    Value::Text(s) => KeyCell::Text(s.clone()),
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn number_bits(x: f64, decimals: Option<u32>) -> u64 {
    let x = match decimals {
        Some(d) => {
            let scale = 10f64.powi(d as i32);
            (x * scale).round() / scale
        }
        None => x,
    };
    if x == 0.0 {
        0f64.to_bits()
    } else if x.is_nan() {
        f64::NAN.to_bits()
    } else {
        x.to_bits()
    }
}
