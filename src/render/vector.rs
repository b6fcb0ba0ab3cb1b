use qrcode::render::svg;
use qrcode::{Color, EcLevel, QrCode};

use crate::errors::QrError;

pub const ERROR_CORRECTION: EcLevel = EcLevel::M;

/// Light modules around the symbol, as drawn by the SVG renderer.
pub const QUIET_ZONE: usize = 4;

/// A scannable code for one target string, before any export.
pub struct VectorCode {
    code: QrCode,
}

impl VectorCode {
    pub fn render(target: &str) -> Result<Self, QrError> {
        if target.trim().is_empty() {
            return Err(QrError::render("target is empty"));
        }
        let code = QrCode::with_error_correction_level(target.as_bytes(), ERROR_CORRECTION)
            .map_err(QrError::render)?;
        Ok(Self { code })
    }

    /// SVG markup at least `size` pixels wide, quiet zone included.
    pub fn svg(&self, size: u32) -> String {
        self.code
            .render::<svg::Color>()
            .min_dimensions(size, size)
            .quiet_zone(true)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build()
    }

    /// Side length in modules, quiet zone included.
    pub fn extent(&self) -> usize {
        self.code.width() + 2 * QUIET_ZONE
    }

    /// Module colour at `(x, y)` in quiet-zone coordinates.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        let width = self.code.width();
        if x < QUIET_ZONE || y < QUIET_ZONE {
            return false;
        }
        let (x, y) = (x - QUIET_ZONE, y - QUIET_ZONE);
        x < width && y < width && self.code[(x, y)] == Color::Dark
    }
}
