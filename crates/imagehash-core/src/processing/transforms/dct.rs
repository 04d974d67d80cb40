//! Orthonormal DCT-II in one and two dimensions.
//!
//! `output[i] = scale(i) · Σ_j input[j] · cos(π·(j + 0.5)·i / n)` with
//! `scale(0) = √(1/n)` and `scale(i > 0) = √(2/n)`.
//!
//! Power-of-two lengths go through Byeong Gi Lee's recursive butterfly (1984) using the
//! cosine tables in [`super::tables`]; other lengths are planned through `rustdct`. Either way
//! the unscaled result is normalized the same way, so coefficients at different
//! frequency indices can be compared against one shared threshold.

use rayon::prelude::*;
use rustdct::DctPlanner;
use std::f64::consts::PI;

use super::tables::butterfly_factors;

/// Grids with at least this many cells are worth splitting across threads.
pub const PARALLEL_DCT_THRESHOLD: usize = 64 * 64;

/// Orthonormal DCT-II of `input`, returned as a new vector.
pub fn dct_1d(input: &[f64]) -> Vec<f64> {
    let mut output = input.to_vec();
    dct_1d_in_place(&mut output);
    output
}

/// Orthonormal DCT-II of `data`, overwriting it.
pub fn dct_1d_in_place(data: &mut [f64]) {
    let len = data.len();
    if len == 0 {
        return;
    }

    if len.is_power_of_two() {
        let mut scratch = vec![0.0; len];
        forward_lee(data, &mut scratch);
    } else {
        // rustdct's DCT-II is unscaled, like the butterfly
        DctPlanner::<f64>::new().plan_dct2(len).process_dct2(data);
    }

    normalize(data);
}

/// Literal evaluation of the DCT-II formula, O(n²).
///
/// Kept as the reference the fast path is checked against.
pub fn dct_1d_reference(input: &[f64]) -> Vec<f64> {
    let mut output = unscaled_direct(input);
    normalize(&mut output);
    output
}

fn unscaled_direct(input: &[f64]) -> Vec<f64> {
    let len = input.len() as f64;

    (0..input.len())
        .map(|i| {
            input
                .iter()
                .enumerate()
                .map(|(j, &x)| x * (PI * (j as f64 + 0.5) * i as f64 / len).cos())
                .sum()
        })
        .collect()
}

fn normalize(data: &mut [f64]) {
    let len = data.len() as f64;
    let dc_scale = (1.0 / len).sqrt();
    let ac_scale = (2.0 / len).sqrt();

    for (i, val) in data.iter_mut().enumerate() {
        *val *= if i == 0 { dc_scale } else { ac_scale };
    }
}

/// Unscaled DCT-II by recursive halving. `data` and `scratch` have equal power-of-two length.
fn forward_lee(data: &mut [f64], scratch: &mut [f64]) {
    let len = data.len();
    if len == 1 {
        return;
    }

    let half = len / 2;
    let factors = butterfly_factors(len);

    for i in 0..half {
        let (x, y) = (data[i], data[len - 1 - i]);
        scratch[i] = x + y;
        scratch[i + half] = (x - y) / factors[i];
    }

    {
        // the halves recurse on `scratch`, borrowing `data` as their scratch space
        let (scratch_lo, scratch_hi) = scratch.split_at_mut(half);
        let (data_lo, data_hi) = data.split_at_mut(half);
        forward_lee(scratch_lo, data_lo);
        forward_lee(scratch_hi, data_hi);
    }

    for i in 0..half - 1 {
        data[i * 2] = scratch[i];
        data[i * 2 + 1] = scratch[i + half] + scratch[i + half + 1];
    }
    data[len - 2] = scratch[half - 1];
    data[len - 1] = scratch[len - 1];
}

/// Separable 2D DCT of a row-major `width × height` grid: every row, then every column.
///
/// ## Panics
/// If `grid.len() != width * height`.
pub fn dct_2d(grid: &[f64], width: usize, height: usize) -> Vec<f64> {
    assert_eq!(grid.len(), width * height, "grid must be width * height long");
    log::trace!("dct_2d over {}x{}", width, height);

    if grid.is_empty() {
        return Vec::new();
    }

    let mut rows = grid.to_vec();
    for row in rows.chunks_exact_mut(width) {
        dct_1d_in_place(row);
    }

    // columns of `rows` become rows of `cols`
    let mut cols = vec![0.0; grid.len()];
    transpose::transpose(&rows, &mut cols, width, height);

    for col in cols.chunks_exact_mut(height) {
        dct_1d_in_place(col);
    }

    transpose::transpose(&cols, &mut rows, height, width);
    rows
}

/// Same result as [`dct_2d`], with each pass fanned out over the rayon pool.
///
/// The column pass only starts once every row has been transformed.
///
/// ## Panics
/// If `grid.len() != width * height`.
pub fn par_dct_2d(grid: &[f64], width: usize, height: usize) -> Vec<f64> {
    assert_eq!(grid.len(), width * height, "grid must be width * height long");
    log::trace!("par_dct_2d over {}x{}", width, height);

    if grid.is_empty() {
        return Vec::new();
    }

    let mut rows = grid.to_vec();
    rows.par_chunks_exact_mut(width).for_each(dct_1d_in_place);

    let mut cols = vec![0.0; grid.len()];
    transpose::transpose(&rows, &mut cols, width, height);

    cols.par_chunks_exact_mut(height).for_each(dct_1d_in_place);

    transpose::transpose(&cols, &mut rows, height, width);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-5;

    fn assert_close(left: &[f64], right: &[f64], eps: f64) {
        assert_eq!(left.len(), right.len());
        for (i, (l, r)) in left.iter().zip(right).enumerate() {
            assert!((l - r).abs() <= eps, "index {}: {} vs {}", i, l, r);
        }
    }

    fn signal(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| ((i * 37 + 11) % 255) as f64 + (i as f64 * 0.3).sin())
            .collect()
    }

    #[test]
    fn fast_path_matches_reference() {
        for len in [1, 2, 4, 8, 16, 32, 64, 128, 256] {
            let input = signal(len);
            assert_close(&dct_1d(&input), &dct_1d_reference(&input), EPS);
        }
    }

    #[test]
    fn non_power_of_two_lengths() {
        for len in [3, 5, 9, 12, 17, 100, 1000] {
            let input = signal(len);
            assert_close(&dct_1d(&input), &dct_1d_reference(&input), EPS);
        }
    }

    #[test]
    fn known_length_four_transform() {
        let output = dct_1d(&[1.0, 2.0, 3.0, 4.0]);
        // orthonormal DCT-II of [1, 2, 3, 4]
        let expected = [5.0, -2.230_442_497_387_663, 0.0, -0.158_512_667_781_108];
        assert_close(&output, &expected, 1e-9);
    }

    #[test]
    fn constant_signal_only_has_dc() {
        let output = dct_1d(&[3.0; 16]);
        assert!((output[0] - 12.0).abs() < 1e-9);
        assert!(output[1..].iter().all(|v| v.abs() < 1e-9));
    }

    #[test]
    fn transform_preserves_energy() {
        let input = signal(64);
        let output = dct_1d(&input);
        let energy_in: f64 = input.iter().map(|v| v * v).sum();
        let energy_out: f64 = output.iter().map(|v| v * v).sum();
        assert!((energy_in - energy_out).abs() / energy_in < 1e-9);
    }

    #[test]
    fn dct_2d_matches_row_then_column_reference() {
        let (width, height) = (8, 4);
        let grid = signal(width * height);

        let mut expected = vec![0.0; grid.len()];
        for (row_in, row_out) in grid.chunks(width).zip(expected.chunks_mut(width)) {
            row_out.copy_from_slice(&dct_1d_reference(row_in));
        }
        for x in 0..width {
            let col: Vec<f64> = (0..height).map(|y| expected[y * width + x]).collect();
            for (y, val) in dct_1d_reference(&col).into_iter().enumerate() {
                expected[y * width + x] = val;
            }
        }

        assert_close(&dct_2d(&grid, width, height), &expected, EPS);
    }

    #[test]
    fn parallel_matches_sequential() {
        for (width, height) in [(64, 64), (16, 8), (9, 8), (1, 5)] {
            let grid = signal(width * height);
            assert_eq!(
                par_dct_2d(&grid, width, height),
                dct_2d(&grid, width, height),
                "{}x{}",
                width,
                height
            );
        }
    }

    #[test]
    fn empty_grid() {
        assert!(dct_2d(&[], 0, 0).is_empty());
        assert!(par_dct_2d(&[], 0, 3).is_empty());
    }

    #[test]
    #[should_panic]
    fn mismatched_dimensions_panic() {
        dct_2d(&[1.0, 2.0, 3.0], 2, 2);
    }
}
