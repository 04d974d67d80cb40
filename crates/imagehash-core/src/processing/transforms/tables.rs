//! Cosine factors for the fast DCT, computed once per process.

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::f64::consts::PI;

/// Largest power-of-two length with a precomputed table.
pub const MAX_TABLE_LEN: usize = 4096;

// TABLES[k] holds the factors for len = 2 << k
static TABLES: Lazy<Vec<Vec<f64>>> = Lazy::new(|| {
    let mut tables = Vec::new();
    let mut len = 2;
    while len <= MAX_TABLE_LEN {
        tables.push(compute_factors(len));
        len <<= 1;
    }
    log::trace!("initialized DCT cosine tables up to length {}", MAX_TABLE_LEN);
    tables
});

/// `2·cos((i + 0.5)·π / len)` for `i` in `0..len / 2`.
///
/// `len` must be a power of two of at least 2. Lengths above [`MAX_TABLE_LEN`]
/// are computed on demand instead of served from the static tables.
pub fn butterfly_factors(len: usize) -> Cow<'static, [f64]> {
    debug_assert!(len >= 2 && len.is_power_of_two());

    if len > MAX_TABLE_LEN {
        return Cow::Owned(compute_factors(len));
    }

    let index = len.trailing_zeros() as usize - 1;
    Cow::Borrowed(TABLES[index].as_slice())
}

fn compute_factors(len: usize) -> Vec<f64> {
    (0..len / 2)
        .map(|i| ((i as f64 + 0.5) * PI / len as f64).cos() * 2.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_cover_every_power_of_two() {
        let mut len = 2;
        while len <= MAX_TABLE_LEN {
            let factors = butterfly_factors(len);
            assert_eq!(factors.len(), len / 2);
            assert!(matches!(factors, Cow::Borrowed(_)));
            len <<= 1;
        }
    }

    #[test]
    fn oversized_lengths_are_computed() {
        let factors = butterfly_factors(MAX_TABLE_LEN * 2);
        assert!(matches!(factors, Cow::Owned(_)));
        assert_eq!(factors.len(), MAX_TABLE_LEN);
    }

    #[test]
    fn length_two_factor() {
        let factors = butterfly_factors(2);
        assert!((factors[0] - std::f64::consts::SQRT_2).abs() < 1e-12);
    }
}
