//! Order statistics used to pick hash thresholds.

use std::cmp::Ordering;

// Below this length a slice is simply sorted
const SORT_THRESH: usize = 8;

/// Arithmetic mean of `values`, or `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.iter().sum::<f64>() / values.len() as f64
}

/// Lower median of `values`: the element at `(n - 1) / 2` in sorted order.
///
/// Runs quickselect on a private copy, so the caller's slice is untouched.
/// Returns `0.0` for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut scratch = values.to_vec();
    let k = (scratch.len() - 1) / 2;
    qselect_inplace(&mut scratch, k)
}

fn cmp_f64(left: &f64, right: &f64) -> Ordering {
    // NaN sorts as "less" so selection always terminates
    left.partial_cmp(right).unwrap_or(Ordering::Less)
}

fn qselect_inplace(data: &mut [f64], k: usize) -> f64 {
    debug_assert!(k < data.len(), "qselect_inplace with k = {} and length {}", k, data.len());

    let mut data = data;
    let mut k = k;

    loop {
        if data.len() < SORT_THRESH {
            data.sort_by(cmp_f64);
            return data[k];
        }

        let pivot_idx = partition(data);

        let rest = data;
        match k.cmp(&pivot_idx) {
            Ordering::Equal => return rest[pivot_idx],
            Ordering::Less => data = &mut rest[..pivot_idx],
            Ordering::Greater => {
                k -= pivot_idx + 1;
                data = &mut rest[pivot_idx + 1..];
            }
        }
    }
}

/// Lomuto partition around a median-of-three pivot; returns the pivot's final index.
fn partition(data: &mut [f64]) -> usize {
    let len = data.len();
    let last = len - 1;

    let pivot_idx = median_of_3(data, 0, len / 2, last);
    data.swap(pivot_idx, last);

    let mut store = 0;
    for i in 0..last {
        if cmp_f64(&data[i], &data[last]) == Ordering::Less {
            data.swap(i, store);
            store += 1;
        }
    }

    data.swap(store, last);
    store
}

fn median_of_3(data: &[f64], a: usize, b: usize, c: usize) -> usize {
    let (x, y, z) = (&data[a], &data[b], &data[c]);

    if cmp_f64(x, y) == Ordering::Less {
        if cmp_f64(y, z) == Ordering::Less {
            b
        } else if cmp_f64(x, z) == Ordering::Less {
            c
        } else {
            a
        }
    } else if cmp_f64(x, z) == Ordering::Less {
        a
    } else if cmp_f64(y, z) == Ordering::Less {
        c
    } else {
        b
    }
}
