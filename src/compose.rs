//! Single-page PDF composition
//!
//! Takes a rendered diagram bitmap, fits and centers it on the configured
//! page, and emits the document bytes. Assembly happens entirely in memory;
//! nothing is written to disk.

use crate::page::{fit_and_center, PageGeometry};
use crate::{Bitmap, Error, Result};
use printpdf::{Image, ImageTransform, Mm, PdfDocument};

const MM_PER_PT: f64 = 25.4 / 72.0;

fn pt_to_mm(pt: f64) -> Mm {
    Mm((pt * MM_PER_PT) as f32)
}

/// Produce a one-page PDF with the bitmap scaled and centered on the page
///
/// The placement comes from [`fit_and_center`]; invalid dimensions propagate
/// from there. The image is embedded at 72 dpi so one pixel corresponds to
/// one point and the placement scale applies directly.
pub fn compose_pdf(bitmap: &Bitmap, page: &PageGeometry) -> Result<Vec<u8>> {
    let placement = fit_and_center(bitmap.width(), bitmap.height(), page)?;

    let (doc, page_idx, layer_idx) = PdfDocument::new(
        "Mermaid Diagram",
        pt_to_mm(page.width),
        pt_to_mm(page.height),
        "diagram",
    );
    let layer = doc.get_page(page_idx).get_layer(layer_idx);

    // Screenshots come back RGBA; flatten to RGB for embedding. The buffer is
    // rebuilt against printpdf's bundled copy of the image crate, which is a
    // different crate version than the one used for decoding.
    let rgb = bitmap.image().to_rgb8();
    let (width, height) = rgb.dimensions();
    let buffer = printpdf::image_crate::RgbImage::from_raw(width, height, rgb.into_raw())
        .ok_or_else(|| Error::Compose("pixel buffer did not match its dimensions".to_string()))?;
    let pdf_image =
        Image::from_dynamic_image(&printpdf::image_crate::DynamicImage::ImageRgb8(buffer));

    pdf_image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(pt_to_mm(placement.x)),
            translate_y: Some(pt_to_mm(placement.y)),
            scale_x: Some(placement.scale as f32),
            scale_y: Some(placement.scale as f32),
            dpi: Some(72.0),
            ..Default::default()
        },
    );

    doc.save_to_bytes()
        .map_err(|e| Error::Compose(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_bitmap(width: u32, height: u32) -> Bitmap {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([30, 120, 200, 255]),
        ));
        let mut png = std::io::Cursor::new(Vec::new());
        img.write_to(&mut png, image::ImageFormat::Png).unwrap();
        Bitmap::from_png(png.into_inner()).unwrap()
    }

    #[test]
    fn test_compose_produces_pdf_bytes() {
        let bitmap = test_bitmap(200, 100);
        let bytes = compose_pdf(&bitmap, &PageGeometry::letter()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        // One embedded image plus page scaffolding; far more than a bare page
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_compose_wide_bitmap_on_letter() {
        // Width-limited placement: a 2000x1000 capture scales to the full
        // 612 point page width
        let bitmap = test_bitmap(2000, 1000);
        let bytes = compose_pdf(&bitmap, &PageGeometry::letter()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_compose_rejects_degenerate_page() {
        let bitmap = test_bitmap(10, 10);
        let mut page = PageGeometry::letter();
        page.top_margin = page.height + 1.0;
        assert!(matches!(
            compose_pdf(&bitmap, &page),
            Err(Error::InvalidDimensions(_))
        ));
    }
}
