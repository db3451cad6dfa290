//! End-to-end smoke test for the render-and-export pipeline

use mermpress::compose::compose_pdf;
use mermpress::page::PageGeometry;
use mermpress::{render_diagram, RenderConfig, Viewport};

#[test]
#[ignore] // Requires Chrome to be installed and network access to the Mermaid CDN
fn test_render_and_export() {
    let config = RenderConfig {
        viewport: Viewport {
            width: 800,
            height: 600,
        },
        settle_ms: 500,
        ..Default::default()
    };

    let bitmap = render_diagram("graph TD\nA-->B\nB-->C", &config).expect("render failed");
    assert!(bitmap.width() > 0);
    assert!(bitmap.height() > 0);
    assert!(!bitmap.png().is_empty());

    let pdf = compose_pdf(&bitmap, &PageGeometry::letter()).expect("compose failed");
    assert!(pdf.starts_with(b"%PDF"));
}
