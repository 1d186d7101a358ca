//! Statistical helper functions for drift detection.

use std::collections::BTreeMap;

use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Round to four decimal places
pub fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Two-sample KS statistic: the largest gap between the empirical CDFs.
///
/// Both CDFs are evaluated after consuming every copy of each distinct value,
/// so ties never inflate the statistic.
pub fn ks_statistic(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_by(f64::total_cmp);
    b.sort_by(f64::total_cmp);

    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let (mut i, mut j) = (0usize, 0usize);
    let mut d_max = 0.0f64;

    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        d_max = d_max.max((i as f64 / n1 - j as f64 / n2).abs());
    }
    d_max
}

/// Approximate p-value for KS statistic using Kolmogorov distribution
pub fn ks_p_value(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }
    // Asymptotic approximation: P(D > d) ≈ 2 * sum_{k=1}^∞ (-1)^{k+1} * exp(-2 * k^2 * λ^2)
    let mut p = 0.0;
    for k in 1..=100 {
        let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
        let term = sign * (-2.0 * f64::from(k).powi(2) * lambda.powi(2)).exp();
        p += term;
        if term.abs() < 1e-10 {
            return (2.0 * p).clamp(0.0, 1.0);
        }
    }
    // The series only fails to converge for tiny λ, where the tail probability is 1
    1.0
}

/// Largest `n1 * n2` for which the exact two-sample distribution is used
pub const KS_EXACT_MAX_CELLS: usize = 10_000;

/// Exact two-sided p-value `P(D >= d)` for sample sizes `n1` and `n2`.
///
/// Counts the monotone lattice paths from `(0, 0)` to `(n1, n2)` that never
/// reach a gap of `d`; every path is equally likely under the null. Counts
/// stay below `f64::MAX` for every size pair within [`KS_EXACT_MAX_CELLS`].
pub fn ks_exact_p_value(n1: usize, n2: usize, d: f64) -> f64 {
    // D is always a multiple of 1 / (n1 * n2)
    let gap = (d * (n1 * n2) as f64).round() as i64;
    if gap <= 0 || n1 == 0 || n2 == 0 {
        return 1.0;
    }
    let (m, n) = (n1 as i64, n2 as i64);
    let within = |i: usize, j: usize| (i as i64 * n - j as i64 * m).abs() < gap;

    let mut inside = vec![0.0f64; n2 + 1];
    let mut total = vec![0.0f64; n2 + 1];
    inside[0] = 1.0;
    total[0] = 1.0;
    for i in 0..=n1 {
        for j in 0..=n2 {
            if i == 0 && j == 0 {
                continue;
            }
            // Before the update, index j still holds the value of row i - 1
            let (up_in, up_all) = (inside[j], total[j]);
            let (left_in, left_all) = if j > 0 { (inside[j - 1], total[j - 1]) } else { (0.0, 0.0) };
            total[j] = up_all + left_all;
            inside[j] = if within(i, j) { up_in + left_in } else { 0.0 };
        }
    }
    (1.0 - inside[n2] / total[n2]).clamp(0.0, 1.0)
}

/// Two-sample KS test returning `(statistic, p_value)`.
///
/// Small samples (`n1 * n2 <= KS_EXACT_MAX_CELLS`) use the exact
/// distribution. Larger ones use the asymptotic distribution with Stephens'
/// small-sample correction of the effective sample size.
pub fn ks_two_sample(a: &[f64], b: &[f64]) -> (f64, f64) {
    let d = ks_statistic(a, b);
    if a.is_empty() || b.is_empty() {
        return (d, 1.0);
    }
    if a.len() * b.len() <= KS_EXACT_MAX_CELLS {
        return (d, ks_exact_p_value(a.len(), b.len(), d));
    }
    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let sqrt_ne = ((n1 * n2) / (n1 + n2)).sqrt();
    let lambda = (sqrt_ne + 0.12 + 0.11 / sqrt_ne) * d;
    (d, ks_p_value(lambda))
}

/// Upper tail probability of the chi-square distribution
pub fn chi_square_sf(chi_sq: f64, df: usize) -> f64 {
    if df == 0 || chi_sq <= 0.0 {
        return 1.0;
    }
    match ChiSquared::new(df as f64) {
        Ok(dist) => dist.sf(chi_sq),
        Err(_) => f64::NAN,
    }
}

/// Frequency of each label
pub fn value_counts<'a>(labels: impl IntoIterator<Item = &'a str>) -> BTreeMap<&'a str, f64> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0.0) += 1.0;
    }
    counts
}

/// Align two frequency tables on the union of their labels; a label missing
/// from one side counts as zero there.
pub fn align_counts(
    left: &BTreeMap<&str, f64>,
    right: &BTreeMap<&str, f64>,
) -> (Vec<f64>, Vec<f64>) {
    let mut labels: Vec<&str> = left.keys().chain(right.keys()).copied().collect();
    labels.sort_unstable();
    labels.dedup();
    labels
        .iter()
        .map(|l| (left.get(l).copied().unwrap_or(0.0), right.get(l).copied().unwrap_or(0.0)))
        .unzip()
}

/// Scale `expected` so it sums to the observed total.
///
/// An all-zero `expected` first gets `epsilon` added to every cell, and any
/// cell that is zero after scaling is replaced by `epsilon`.
pub fn rescale_expected(observed: &[f64], expected: &[f64], epsilon: f64) -> Vec<f64> {
    let observed_total: f64 = observed.iter().sum();
    let mut expected = expected.to_vec();
    let mut expected_total: f64 = expected.iter().sum();
    if expected_total == 0.0 {
        for e in &mut expected {
            *e += epsilon;
        }
        expected_total = expected.iter().sum();
    }
    let scale = observed_total / expected_total;
    for e in &mut expected {
        *e *= scale;
        if *e == 0.0 {
            *e = epsilon;
        }
    }
    expected
}

/// Chi-square goodness of fit returning `(statistic, p_value)` with `k - 1`
/// degrees of freedom. `expected` must already be rescaled.
pub fn chi_square_goodness_of_fit(observed: &[f64], expected: &[f64]) -> (f64, f64) {
    let chi_sq: f64 = observed
        .iter()
        .zip(expected)
        .map(|(o, e)| (o - e).powi(2) / e)
        .sum();
    let df = observed.len().saturating_sub(1);
    (chi_sq, chi_square_sf(chi_sq, df))
}

/// Chi-square test of independence on a 2×k table without continuity
/// correction, returning `(statistic, p_value)`. Empty label columns are
/// skipped.
pub fn chi_square_contingency(a: &[f64], b: &[f64]) -> (f64, f64) {
    let total_a: f64 = a.iter().sum();
    let total_b: f64 = b.iter().sum();
    let total = total_a + total_b;
    if total_a == 0.0 || total_b == 0.0 {
        return (0.0, 1.0);
    }

    let mut chi_sq = 0.0;
    let mut kept = 0usize;
    for (&count_a, &count_b) in a.iter().zip(b) {
        let label_total = count_a + count_b;
        if label_total == 0.0 {
            continue;
        }
        let expected_a = total_a * label_total / total;
        let expected_b = total_b * label_total / total;
        chi_sq += (count_a - expected_a).powi(2) / expected_a;
        chi_sq += (count_b - expected_b).powi(2) / expected_b;
        kept += 1;
    }
    let df = kept.saturating_sub(1);
    (chi_sq, chi_square_sf(chi_sq, df))
}
