//! Schema alignment of a reference/incoming dataset pair.

use tracing::warn;

use super::frame::Dataset;
use crate::error::Result;

/// Project both datasets onto their shared columns, in reference order.
///
/// Row sets are unchanged. A shared column declared with different types on
/// each side is cast to the reference's type. An empty intersection is not an
/// error: both outputs simply have no columns.
///
/// Columns present on only one side are dropped, which can hide a schema
/// change from the comparator; they are logged at `warn` level.
pub fn align(reference: &Dataset, incoming: &Dataset) -> Result<(Dataset, Dataset)> {
    let reference_schema = reference.schema();
    let incoming_schema = incoming.schema();
    let common = reference_schema.intersection(&incoming_schema);

    let dropped: Vec<&str> = reference_schema
        .names()
        .chain(incoming_schema.names())
        .filter(|n| !common.iter().any(|c| c == n))
        .collect();
    if !dropped.is_empty() {
        warn!(columns = ?dropped, "columns not shared by reference and incoming data were dropped");
    }

    let aligned_reference = reference.select(&common)?;
    let mut aligned_incoming = incoming.select(&common)?;
    for field in reference_schema.fields().iter().filter(|f| common.contains(&f.name)) {
        aligned_incoming.cast_column(&field.name, field.column_type)?;
    }

    Ok((aligned_reference, aligned_incoming))
}
