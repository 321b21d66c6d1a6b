use crate::error::*;
use crate::grid::*;
use std::path::Path;

/// Render the grid as a heatmap, one pixel per cell.
/// Values are clamped to `[0, 1]` before lookup in the gradient.
pub fn write_heatmap<F: AsRef<Path>, G: GridView>(
    grid: &G,
    path: &F,
) -> Result<()> {
    let size = grid.size();
    let gradient = colorous::TURBO;
    let mut img = image::RgbImage::new(size as u32, size as u32);
    for l in 0..size * size {
        let r = grid.value_linear(l).clamp(0.0, 1.0);
        let c = gradient.eval_continuous(r);
        // x is the column, y the row
        img.put_pixel(
            (l % size) as u32,
            (l / size) as u32,
            image::Rgb(c.as_array()),
        );
    }
    img.save(path).map_err(|source| RelaxError::Image {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.as_ref().display(), "wrote heatmap");
    Ok(())
}
