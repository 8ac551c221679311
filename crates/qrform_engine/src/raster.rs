use image::{Rgba, RgbaImage};

use crate::EncodeSettings;

/// Pixels per module when the requested width cannot fit the symbol.
const FALLBACK_SCALE: f64 = 4.0;

/// Returns `(scale, side)` for a symbol of `size` modules per side.
///
/// The requested width is honoured exactly whenever it can hold at least one
/// pixel per module including the margin.
pub fn symbol_side(size: usize, settings: &EncodeSettings) -> (f64, u32) {
    let modules_with_margin = size as u64 + 2 * u64::from(settings.margin);
    if modules_with_margin == 0 {
        return (FALLBACK_SCALE, 0);
    }
    if u64::from(settings.width) >= modules_with_margin {
        let scale = f64::from(settings.width) / modules_with_margin as f64;
        (scale, settings.width)
    } else {
        let side = (modules_with_margin as f64 * FALLBACK_SCALE).floor() as u32;
        (FALLBACK_SCALE, side)
    }
}

/// Paints a square module grid (row-major, `true` = dark) into an RGBA image.
pub fn rasterize(modules: &[bool], size: usize, settings: &EncodeSettings) -> RgbaImage {
    debug_assert_eq!(modules.len(), size * size);
    let (scale, side) = symbol_side(size, settings);
    let scaled_margin = f64::from(settings.margin) * scale;
    let inner_end = f64::from(side) - scaled_margin;
    let dark = Rgba(settings.dark);
    let light = Rgba(settings.light);

    let module_at = |pixel: u32| -> Option<usize> {
        let p = f64::from(pixel);
        if p < scaled_margin || p >= inner_end || size == 0 {
            return None;
        }
        let index = ((p - scaled_margin) / scale).floor() as usize;
        Some(index.min(size - 1))
    };

    let mut img = RgbaImage::from_pixel(side, side, light);
    for row in 0..side {
        let Some(src_row) = module_at(row) else {
            continue;
        };
        for col in 0..side {
            let Some(src_col) = module_at(col) else {
                continue;
            };
            if modules[src_row * size + src_col] {
                img.put_pixel(col, row, dark);
            }
        }
    }
    img
}
