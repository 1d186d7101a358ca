//! Raw scrape cleaning.
//!
//! Listing portals emit prices as `S$ 1,200,000`, sizes as `1,250 sqft` and
//! room counts as `3 Beds`. Some rows arrive shifted one field to the right
//! of `year`, which then holds the `psf` price. Cleaning repairs those rows,
//! drops the ones it cannot trust and turns the numeric fields into numbers.

use regex::Regex;
use tracing::debug;

use crate::dataset::{Column, Dataset};
use crate::error::{Error, Result};

/// Columns a raw scrape batch must carry for cleaning
pub const RAW_COLUMNS: [&str; 8] = [
    "year",
    "n_bedrooms",
    "n_bathrooms",
    "price",
    "price_per_sqft",
    "size_sqft",
    "area",
    "road_name",
];

const NOT_DECIMAL: &str = r"[^\d.]";
const NOT_GROUPED_DIGIT: &str = r"[^\d,]";
const FIRST_INTEGER: &str = r"(\d+)";

/// Marker the portal puts in per-square-foot prices
const PSF_MARKER: &str = "psf";

type Labels = Vec<Option<String>>;

fn labels(data: &Dataset, name: &str) -> Result<Labels> {
    Ok(data.require(name)?.data().to_labels())
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Config(e.to_string()))
}

fn is_build_year(value: &str) -> bool {
    value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Repair a row whose fields start one place early.
///
/// Returns false when the row has no usable build year afterwards.
fn unshift(
    row: usize,
    year: &mut Labels,
    area: &[Option<String>],
    road_name: &mut Labels,
    size_sqft: &mut Labels,
    price_per_sqft: &mut Labels,
) -> bool {
    road_name[row] = size_sqft[row].take();
    size_sqft[row] = price_per_sqft[row].take();
    price_per_sqft[row] = year[row].take();
    match area[row].as_deref().filter(|a| is_build_year(a)) {
        Some(a) => {
            year[row] = Some(a.to_string());
            true
        }
        None => false,
    }
}

fn strip_parse(values: &[Option<String>], strip: &Regex, drop_commas: bool) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| {
            let kept = strip.replace_all(v.as_deref()?, "");
            let digits = if drop_commas { kept.replace(',', "") } else { kept.into_owned() };
            digits.parse().ok()
        })
        .collect()
}

fn first_integer(values: &[Option<String>], re: &Regex) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| re.captures(v.as_deref()?)?.get(1)?.as_str().parse().ok())
        .collect()
}

/// Clean a raw scrape batch so it can go through [`super::engineer_features`].
///
/// Shifted rows are repaired first. Rows are then dropped when `year` holds
/// anything but digits, when a shifted row had no build year to recover, or
/// when `size_sqft` is missing. A missing `year` is left for feature
/// validation to drop. Other columns pass through unchanged.
pub fn clean_listings(raw: &Dataset) -> Result<Dataset> {
    for name in RAW_COLUMNS {
        raw.require(name)?;
    }
    let not_decimal = compile(NOT_DECIMAL)?;
    let not_grouped_digit = compile(NOT_GROUPED_DIGIT)?;
    let first_int = compile(FIRST_INTEGER)?;

    let mut year = labels(raw, "year")?;
    let area = labels(raw, "area")?;
    let mut road_name = labels(raw, "road_name")?;
    let mut size_sqft = labels(raw, "size_sqft")?;
    let mut price_per_sqft = labels(raw, "price_per_sqft")?;

    let mut keep = Vec::with_capacity(raw.n_rows());
    let mut repaired = 0usize;
    for row in 0..raw.n_rows() {
        if year[row].as_deref().is_some_and(|y| y.contains(PSF_MARKER)) {
            repaired += 1;
            let recovered =
                unshift(row, &mut year, &area, &mut road_name, &mut size_sqft, &mut price_per_sqft);
            if !recovered {
                continue;
            }
        }
        let year_ok = year[row].as_deref().map_or(true, |y| y.bytes().all(|b| b.is_ascii_digit()));
        let size_ok = size_sqft[row].as_deref().is_some_and(|s| !s.is_empty());
        if year_ok && size_ok {
            keep.push(row);
        }
    }

    let price = labels(raw, "price")?;
    let bedrooms = labels(raw, "n_bedrooms")?;
    let bathrooms = labels(raw, "n_bathrooms")?;

    let mut out = Dataset::new();
    for column in raw.columns() {
        let cleaned = match column.name() {
            "year" => Column::numeric("year", year.iter().map(|y| y.as_deref()?.parse().ok()).collect()),
            "price" => Column::numeric("price", strip_parse(&price, &not_decimal, false)),
            "price_per_sqft" => {
                Column::numeric("price_per_sqft", strip_parse(&price_per_sqft, &not_decimal, false))
            }
            "size_sqft" => Column::numeric("size_sqft", strip_parse(&size_sqft, &not_grouped_digit, true)),
            "n_bedrooms" => Column::numeric("n_bedrooms", first_integer(&bedrooms, &first_int)),
            "n_bathrooms" => Column::numeric("n_bathrooms", first_integer(&bathrooms, &first_int)),
            "road_name" => Column::categorical("road_name", std::mem::take(&mut road_name)),
            _ => column.clone(),
        };
        out.push_column(cleaned)?;
    }

    let cleaned = out.take(&keep);
    debug!(before = raw.n_rows(), after = cleaned.n_rows(), repaired, "raw listings cleaned");
    Ok(cleaned)
}
