use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

use crate::errors::QrError;
use crate::render::label::{LabelStyle, draw_label};
use crate::render::vector::VectorCode;

/// Width of the exported canvas; the code is drawn CANVAS_WIDTH square.
pub const CANVAS_WIDTH: u32 = 512;
/// Height of the watermark band under the code.
pub const LABEL_BAND_HEIGHT: u32 = 48;
pub const BRAND_LABEL: &str = "SMARTQR.LINK";

const DARK: Rgb<u8> = Rgb([0, 0, 0]);
const LIGHT: Rgb<u8> = Rgb([255, 255, 255]);
pub const BAND_BACKGROUND: Rgb<u8> = Rgb([0xf3, 0xf4, 0xf6]);

pub const LABEL_STYLE: LabelStyle = LabelStyle {
    scale: 3,
    bold: true,
    color: Rgb([0x6b, 0x72, 0x80]),
    padding: 16,
};

/// Turns a vector code into pixels. Swappable so a different backend can be
/// used without touching target resolution; an SVG backend reads the markup
/// through `VectorCode::svg`.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, code: &VectorCode, size: u32) -> Result<RgbImage, QrError>;
}

/// Samples the module matrix onto a `size` x `size` grid.
pub struct ModuleRasterizer;

impl Rasterizer for ModuleRasterizer {
    fn rasterize(&self, code: &VectorCode, size: u32) -> Result<RgbImage, QrError> {
        if size == 0 {
            return Err(QrError::render("raster size must be positive"));
        }
        let extent = code.extent() as u64;
        let size64 = u64::from(size);

        Ok(RgbImage::from_fn(size, size, |x, y| {
            let mx = (u64::from(x) * extent / size64) as usize;
            let my = (u64::from(y) * extent / size64) as usize;
            if code.is_dark(mx, my) { DARK } else { LIGHT }
        }))
    }
}

/// Code on top, watermark band with the brand label underneath.
pub fn compose_labeled(code: &RgbImage) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_WIDTH + LABEL_BAND_HEIGHT, BAND_BACKGROUND);
    image::imageops::replace(&mut canvas, code, 0, 0);
    draw_label(&mut canvas, BRAND_LABEL, CANVAS_WIDTH, LABEL_BAND_HEIGHT, &LABEL_STYLE);
    canvas
}

/// Full raster export for `target`, PNG encoded.
pub fn render_png(rasterizer: &dyn Rasterizer, target: &str) -> Result<Vec<u8>, QrError> {
    let code = VectorCode::render(target)?;
    let pixels = rasterizer.rasterize(&code, CANVAS_WIDTH)?;
    if pixels.dimensions() != (CANVAS_WIDTH, CANVAS_WIDTH) {
        return Err(QrError::render(format!(
            "rasterizer returned {:?}, expected {}x{}",
            pixels.dimensions(),
            CANVAS_WIDTH,
            CANVAS_WIDTH
        )));
    }
    let canvas = compose_labeled(&pixels);

    let mut png = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(QrError::render)?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasterizes_to_requested_square() {
        let code = VectorCode::render("https://mysite.io").unwrap();
        let img = ModuleRasterizer.rasterize(&code, 300).unwrap();
        assert_eq!(img.dimensions(), (300, 300));
        assert_eq!(*img.get_pixel(0, 0), LIGHT);
    }

    #[test]
    fn band_sits_below_the_code() {
        let code = VectorCode::render("https://mysite.io").unwrap();
        let img = ModuleRasterizer.rasterize(&code, CANVAS_WIDTH).unwrap();
        let canvas = compose_labeled(&img);
        assert_eq!(canvas.dimensions(), (CANVAS_WIDTH, CANVAS_WIDTH + LABEL_BAND_HEIGHT));
        assert_eq!(*canvas.get_pixel(0, CANVAS_WIDTH + 1), BAND_BACKGROUND);
        assert!(
            canvas
                .enumerate_pixels()
                .any(|(_, y, p)| y >= CANVAS_WIDTH && *p == LABEL_STYLE.color)
        );
    }

    #[test]
    fn every_brand_character_has_a_glyph() {
        for c in BRAND_LABEL.chars() {
            assert_ne!(crate::render::label::glyph(c), [0; 7], "{c}");
        }
    }

    #[test]
    fn zero_size_is_rejected() {
        let code = VectorCode::render("x").unwrap();
        assert!(ModuleRasterizer.rasterize(&code, 0).is_err());
    }
}
