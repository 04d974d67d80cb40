//! Haar discrete wavelet transform and its inverse.
//!
//! One level splits a signal into pairwise averages (low band, first half) and
//! pairwise half-differences (high band, second half). An odd trailing element
//! is not paired and stays where it is.

/// One level of the Haar transform of `data`, in place.
pub fn dwt_1d(data: &mut [f64]) {
    let half = data.len() / 2;
    if half == 0 {
        return;
    }

    let pairs: Vec<(f64, f64)> = data
        .chunks_exact(2)
        .map(|pair| (0.5 * (pair[0] + pair[1]), 0.5 * (pair[0] - pair[1])))
        .collect();

    for (i, (low, high)) in pairs.into_iter().enumerate() {
        data[i] = low;
        data[half + i] = high;
    }
}

/// Inverse of [`dwt_1d`], in place.
pub fn idwt_1d(data: &mut [f64]) {
    let half = data.len() / 2;
    if half == 0 {
        return;
    }

    let (low, high) = data[..half * 2].split_at(half);
    let restored: Vec<f64> = low
        .iter()
        .zip(high)
        .flat_map(|(&a, &d)| [a + d, a - d])
        .collect();

    data[..half * 2].copy_from_slice(&restored);
}

/// `level` levels of the 2D Haar transform of a row-major `width × height` grid.
///
/// Level `k` transforms the rows and then the columns of the top-left
/// `(width >> k) × (height >> k)` quadrant, which holds the LL band of level `k - 1`.
///
/// ## Panics
/// If `grid.len() != width * height`.
pub fn dwt_2d(grid: &mut [f64], width: usize, height: usize, level: u32) {
    assert_eq!(grid.len(), width * height, "grid must be width * height long");
    log::trace!("dwt_2d over {}x{}, {} levels", width, height, level);

    for k in 0..level {
        let (w, h) = (shifted(width, k), shifted(height, k));
        if w == 0 || h == 0 {
            break;
        }
        rows(grid, width, w, h, dwt_1d);
        columns(grid, width, w, h, dwt_1d);
    }
}

/// Undo [`dwt_2d`] with the same `level`: deepest level first, columns before rows.
///
/// ## Panics
/// If `grid.len() != width * height`.
pub fn idwt_2d(grid: &mut [f64], width: usize, height: usize, level: u32) {
    assert_eq!(grid.len(), width * height, "grid must be width * height long");
    log::trace!("idwt_2d over {}x{}, {} levels", width, height, level);

    for k in (0..level).rev() {
        let (w, h) = (shifted(width, k), shifted(height, k));
        if w == 0 || h == 0 {
            continue;
        }
        columns(grid, width, w, h, idwt_1d);
        rows(grid, width, w, h, idwt_1d);
    }
}

/// Largest power of two not above `x`; `0` for `0`.
pub fn floor_power_of_two(x: u64) -> u64 {
    let mut x = x;
    x |= x >> 1;
    x |= x >> 2;
    x |= x >> 4;
    x |= x >> 8;
    x |= x >> 16;
    x |= x >> 32;
    x - (x >> 1)
}

fn shifted(len: usize, k: u32) -> usize {
    len.checked_shr(k).unwrap_or(0)
}

fn rows(grid: &mut [f64], stride: usize, w: usize, h: usize, op: fn(&mut [f64])) {
    for row in grid.chunks_exact_mut(stride).take(h) {
        op(&mut row[..w]);
    }
}

fn columns(grid: &mut [f64], stride: usize, w: usize, h: usize, op: fn(&mut [f64])) {
    let mut column = vec![0.0; h];
    for x in 0..w {
        for (y, val) in column.iter_mut().enumerate() {
            *val = grid[y * stride + x];
        }
        op(&mut column);
        for (y, val) in column.iter().enumerate() {
            grid[y * stride + x] = *val;
        }
    }
}
