use image::{Rgb, RgbImage};

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

/// 5x7 bitmap face covering the brand label. Each row uses the low five
/// bits, leftmost pixel first; unknown characters draw as blanks.
pub(crate) fn glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        _ => [0; 7],
    }
}

/// Fixed label typography.
#[derive(Debug, Clone, Copy)]
pub struct LabelStyle {
    pub scale: u32,
    pub bold: bool,
    pub color: Rgb<u8>,
    pub padding: u32,
}

impl LabelStyle {
    fn advance(&self) -> u32 {
        (GLYPH_WIDTH + 1) * self.scale
    }

    /// Rendered width of `text` in pixels.
    pub fn text_width(&self, text: &str) -> u32 {
        let count = text.chars().count() as u32;
        if count == 0 {
            return 0;
        }
        count * self.advance() - self.scale + u32::from(self.bold)
    }
}

/// Draw `text` right-aligned and vertically centred in the band
/// `[band_top, band_top + band_height)` of `canvas`.
pub fn draw_label(canvas: &mut RgbImage, text: &str, band_top: u32, band_height: u32, style: &LabelStyle) {
    let text_width = style.text_width(text);
    let glyph_height = GLYPH_HEIGHT * style.scale;
    let left = canvas.width().saturating_sub(style.padding + text_width);
    let top = band_top + band_height.saturating_sub(glyph_height) / 2;
    let stroke = style.scale + u32::from(style.bold);

    for (index, c) in text.chars().enumerate() {
        let origin_x = left + index as u32 * style.advance();
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let x0 = origin_x + col * style.scale;
                let y0 = top + row as u32 * style.scale;
                for dy in 0..style.scale {
                    for dx in 0..stroke {
                        let (x, y) = (x0 + dx, y0 + dy);
                        if x < canvas.width() && y < canvas.height() {
                            canvas.put_pixel(x, y, style.color);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: LabelStyle = LabelStyle {
        scale: 2,
        bold: true,
        color: Rgb([255, 0, 0]),
        padding: 4,
    };

    #[test]
    fn width_accounts_for_spacing_and_bold() {
        // 3 glyphs * 12px advance - 2px trailing gap + 1px bold
        assert_eq!(STYLE.text_width("ABC"), 35);
        assert_eq!(STYLE.text_width(""), 0);
    }

    #[test]
    fn label_is_right_aligned_inside_band() {
        let mut canvas = RgbImage::from_pixel(100, 40, Rgb([255, 255, 255]));
        draw_label(&mut canvas, "L", 20, 20, &STYLE);

        let painted: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == STYLE.color)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!painted.is_empty());
        assert!(painted.iter().all(|(_, y)| *y >= 20));
        let rightmost = painted.iter().map(|(x, _)| *x).max().unwrap();
        assert_eq!(rightmost, 100 - STYLE.padding - 1);
    }
}
