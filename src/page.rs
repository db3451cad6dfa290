//! Page geometry and the fit-and-center placement calculation

use crate::{Error, Result};

/// US Letter width in PDF points
pub const LETTER_WIDTH_PT: f64 = 612.0;
/// US Letter height in PDF points
pub const LETTER_HEIGHT_PT: f64 = 792.0;
/// Points reserved at the top of the page for non-image content
pub const DEFAULT_TOP_MARGIN_PT: f64 = 100.0;

/// Fixed dimensions of the output document's single page, in PDF points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    /// Height reserved at the top of the page; the image must fit below it
    pub top_margin: f64,
}

impl PageGeometry {
    /// US Letter with the default top margin
    pub fn letter() -> Self {
        Self {
            width: LETTER_WIDTH_PT,
            height: LETTER_HEIGHT_PT,
            top_margin: DEFAULT_TOP_MARGIN_PT,
        }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

/// Scale and origin that position a bitmap within a page
///
/// `width` and `height` are the scaled image dimensions; `x`/`y` are the
/// lower-left corner of the image in page coordinates (origin bottom-left,
/// matching PDF).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Compute the placement that scales an image to fit a page and centers it
///
/// The scale is the largest uniform factor that keeps the image within the
/// page width and within the page height minus the top margin. The image is
/// then centered on both axes. Vertical centering uses the full page height,
/// not the margin-adjusted height, so a wide image may extend up into the
/// reserved margin; this asymmetry is intentional.
pub fn fit_and_center(img_width: u32, img_height: u32, page: &PageGeometry) -> Result<Placement> {
    if img_width == 0 || img_height == 0 {
        return Err(Error::InvalidDimensions(format!(
            "image is {}x{} pixels",
            img_width, img_height
        )));
    }
    if !page.width.is_finite() || page.width <= 0.0 || !page.height.is_finite() || page.height <= 0.0
    {
        return Err(Error::InvalidDimensions(format!(
            "page is {}x{} points",
            page.width, page.height
        )));
    }
    if !page.top_margin.is_finite() || page.top_margin < 0.0 || page.top_margin >= page.height {
        return Err(Error::InvalidDimensions(format!(
            "top margin of {} points does not fit a {} point tall page",
            page.top_margin, page.height
        )));
    }

    let img_w = f64::from(img_width);
    let img_h = f64::from(img_height);

    let scale = (page.width / img_w).min((page.height - page.top_margin) / img_h);
    let width = img_w * scale;
    let height = img_h * scale;

    let x = (page.width - width) / 2.0;
    let y = (page.height - height) / 2.0;

    Ok(Placement {
        scale,
        x,
        y,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_wide_image_on_letter() {
        // 2000x1000 on Letter with a 100pt margin: width is the limiting
        // dimension, scale = min(612/2000, 692/1000) = 0.306.
        let p = fit_and_center(2000, 1000, &PageGeometry::letter()).unwrap();
        assert!((p.scale - 0.306).abs() < EPS);
        assert!((p.width - 612.0).abs() < EPS);
        assert!((p.height - 306.0).abs() < EPS);
        assert!(p.x.abs() < EPS);
        assert!((p.y - 243.0).abs() < EPS);
    }

    #[test]
    fn test_tall_image_limited_by_margin() {
        let page = PageGeometry::letter();
        let p = fit_and_center(100, 1000, &page).unwrap();
        // Height (692 usable points) is the limiting dimension
        assert!((p.scale - 0.692).abs() < EPS);
        assert!((p.height - 692.0).abs() < EPS);
        assert!(p.height <= page.height - page.top_margin + EPS);
    }

    #[test]
    fn test_fit_invariants() {
        let page = PageGeometry::letter();
        for (w, h) in [(1, 1), (2000, 2000), (5000, 37), (613, 693), (612, 692)] {
            let p = fit_and_center(w, h, &page).unwrap();
            assert!(p.width <= page.width + EPS, "{}x{} too wide", w, h);
            assert!(
                p.height <= page.height - page.top_margin + EPS,
                "{}x{} too tall",
                w,
                h
            );
            // Aspect ratio preserved
            let img_ratio = f64::from(w) / f64::from(h);
            assert!((p.width / p.height - img_ratio).abs() < 1e-6);
            // Centered on both axes
            assert!((p.x - (page.width - p.width) / 2.0).abs() < EPS);
            assert!((p.y - (page.height - p.height) / 2.0).abs() < EPS);
        }
    }

    #[test]
    fn test_upscales_small_images() {
        // Nothing clamps scale to 1.0; a tiny bitmap is stretched to fill
        let p = fit_and_center(10, 10, &PageGeometry::letter()).unwrap();
        assert!(p.scale > 1.0);
        assert!((p.width - 612.0).abs() < EPS);
    }

    #[test]
    fn test_centering_ignores_margin() {
        // A square image limited by width ends up vertically centered on the
        // full page, so its top edge crosses into the margin reservation.
        let page = PageGeometry::letter();
        let p = fit_and_center(4000, 4000, &page).unwrap();
        let top_edge = p.y + p.height;
        assert!((p.y - (page.height - p.height) / 2.0).abs() < EPS);
        assert!(top_edge > page.height - page.top_margin);
    }

    #[test]
    fn test_zero_image_dimension_rejected() {
        let page = PageGeometry::letter();
        assert!(matches!(
            fit_and_center(0, 100, &page),
            Err(Error::InvalidDimensions(_))
        ));
        assert!(matches!(
            fit_and_center(100, 0, &page),
            Err(Error::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_degenerate_page_rejected() {
        let mut page = PageGeometry::letter();
        page.width = 0.0;
        assert!(fit_and_center(100, 100, &page).is_err());

        let mut page = PageGeometry::letter();
        page.height = -10.0;
        assert!(fit_and_center(100, 100, &page).is_err());

        let mut page = PageGeometry::letter();
        page.top_margin = page.height;
        assert!(fit_and_center(100, 100, &page).is_err());

        let mut page = PageGeometry::letter();
        page.top_margin = f64::NAN;
        assert!(fit_and_center(100, 100, &page).is_err());
    }
}
