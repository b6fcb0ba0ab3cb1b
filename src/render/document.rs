use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::errors::QrError;

/// A4 portrait, in points.
pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const PAGE_MARGIN: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Largest aspect-preserving box for an image inside the page margins,
/// centred on the page.
pub fn fit_centered(image_width: u32, image_height: u32, page_width: f32, page_height: f32, margin: f32) -> Placement {
    let available_width = page_width - 2.0 * margin;
    let available_height = page_height - 2.0 * margin;
    let scale = (available_width / image_width as f32).min(available_height / image_height as f32);
    let width = image_width as f32 * scale;
    let height = image_height as f32 * scale;

    Placement {
        x: (page_width - width) / 2.0,
        y: (page_height - height) / 2.0,
        width,
        height,
    }
}

/// Single-page PDF embedding the PNG raster.
pub fn build_pdf(png: &[u8]) -> Result<Vec<u8>, QrError> {
    let raster = image::load_from_memory(png).map_err(QrError::render)?.to_rgb8();
    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return Err(QrError::render("raster has no pixels"));
    }
    let placement = fit_centered(width, height, PAGE_WIDTH, PAGE_HEIGHT, PAGE_MARGIN);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        raster.into_raw(),
    ));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    placement.width.into(),
                    0.into(),
                    0.into(),
                    placement.height.into(),
                    placement.x.into(),
                    placement.y.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().map_err(QrError::render)?,
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(QrError::render)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([10, 20, 30]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn placement_preserves_aspect_and_centres() {
        let p = fit_centered(512, 560, PAGE_WIDTH, PAGE_HEIGHT, PAGE_MARGIN);
        assert!((p.width / p.height - 512.0 / 560.0).abs() < 1e-4);
        assert!(p.width <= PAGE_WIDTH - 2.0 * PAGE_MARGIN + 1e-3);
        assert!(p.height <= PAGE_HEIGHT - 2.0 * PAGE_MARGIN + 1e-3);
        assert!((p.x - (PAGE_WIDTH - p.x - p.width)).abs() < 1e-3);
        assert!((p.y - (PAGE_HEIGHT - p.y - p.height)).abs() < 1e-3);
    }

    #[test]
    fn wide_images_are_bounded_by_width() {
        let p = fit_centered(2000, 100, PAGE_WIDTH, PAGE_HEIGHT, PAGE_MARGIN);
        assert!((p.x - PAGE_MARGIN).abs() < 1e-3);
        assert!((p.width - (PAGE_WIDTH - 2.0 * PAGE_MARGIN)).abs() < 1e-3);
    }

    #[test]
    fn pdf_has_exactly_one_page() {
        let bytes = build_pdf(&png(64, 70)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn garbage_raster_is_a_render_error() {
        assert!(matches!(build_pdf(b"not a png"), Err(QrError::Render(_))));
    }
}
