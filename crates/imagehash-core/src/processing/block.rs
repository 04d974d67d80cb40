use crate::error::{Error, Result};

/// Top-left `target × target` sub-grid of a row-major `width × height` grid, row-major.
///
/// A grid that is already `target × target` comes back unchanged.
pub fn extract_low_frequency_block(
    grid: &[f64],
    width: usize,
    height: usize,
    target: usize,
) -> Result<Vec<f64>> {
    if grid.len() != width * height {
        return Err(Error::InvalidInput(format!(
            "grid of {} values is not {}x{}",
            grid.len(),
            width,
            height
        )));
    }

    if target > width || target > height {
        return Err(Error::InvalidInput(format!(
            "cannot take a {}x{} block from a {}x{} grid",
            target, target, width, height
        )));
    }

    if width == target && height == target {
        return Ok(grid.to_vec());
    }

    Ok(grid
        .chunks_exact(width)
        .take(target)
        .flat_map(|row| &row[..target])
        .copied()
        .collect())
}
