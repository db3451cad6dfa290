//! Mermpress
//!
//! Renders Mermaid diagram text to a bitmap in a headless browser and lays
//! the result out on a single-page PDF.
//!
//! # Pipeline
//!
//! - **Renderer**: a per-request headless Chrome instance loads a small HTML
//!   page embedding the diagram source, waits for Mermaid to produce its SVG,
//!   and captures a PNG screenshot.
//! - **PageComposer**: the screenshot is scaled to fit a US Letter page
//!   (keeping a top margin free), centered, and embedded as the only content
//!   of a one-page PDF.
//!
//! # Example
//!
//! ```no_run
//! use mermpress::{render_diagram, RenderConfig};
//! use mermpress::compose::compose_pdf;
//! use mermpress::page::PageGeometry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RenderConfig::default();
//! let bitmap = render_diagram("graph TD\nA-->B", &config)?;
//! let pdf = compose_pdf(&bitmap, &PageGeometry::letter())?;
//! std::fs::write("mermaid_diagram.pdf", pdf)?;
//! # Ok(())
//! # }
//! ```

use image::GenericImageView;

pub mod error;
pub use error::{Error, Result};

pub mod cdp;
pub mod compose;
pub mod page;
pub mod server;

pub use page::{fit_and_center, PageGeometry, Placement};

/// Default Mermaid ES module loaded into the diagram page
pub const DEFAULT_MERMAID_JS_URL: &str =
    "https://cdn.jsdelivr.net/npm/mermaid@10.2.4/dist/mermaid.esm.min.mjs";

/// Configuration for the diagram renderer
///
/// The defaults mirror interactive use: a large square viewport for a
/// high-resolution capture, a generous navigation timeout, and a settle
/// delay that gives Mermaid time to finish layout before the screenshot.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Browser viewport dimensions in pixels
    pub viewport: Viewport,
    /// Timeout for navigation and for the diagram SVG to appear, in milliseconds
    pub timeout_ms: u64,
    /// Delay between the diagram appearing and the screenshot, in milliseconds
    pub settle_ms: u64,
    /// URL of the Mermaid ES module loaded into the page
    pub mermaid_js_url: String,
    /// Whether to run Chrome with its sandbox enabled
    pub sandbox: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            timeout_ms: 30000,
            settle_ms: 3000,
            mermaid_js_url: DEFAULT_MERMAID_JS_URL.to_string(),
            sandbox: false,
        }
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 2000,
        }
    }
}

/// A rendered diagram screenshot
///
/// Holds both the raw PNG bytes (served as the inline preview) and the
/// decoded pixels (embedded into the PDF). A `Bitmap` belongs to the request
/// that produced it and is dropped once the preview or PDF has been served.
pub struct Bitmap {
    png: Vec<u8>,
    image: image::DynamicImage,
}

impl Bitmap {
    /// Decode PNG bytes into a `Bitmap`
    pub fn from_png(png: Vec<u8>) -> Result<Self> {
        let image = image::load_from_memory(&png).map_err(|e| Error::Decode(e.to_string()))?;
        Ok(Self { png, image })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.image.dimensions().0
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.image.dimensions().1
    }

    /// The original PNG bytes
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// The decoded pixels
    pub fn image(&self) -> &image::DynamicImage {
        &self.image
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("png_bytes", &self.png.len())
            .finish()
    }
}

/// Core trait for diagram renderer implementations
pub trait Renderer {
    /// Create a new renderer instance with the given configuration
    fn new(config: RenderConfig) -> Result<Self>
    where
        Self: Sized;

    /// Render Mermaid diagram source into a bitmap
    fn render(&mut self, source: &str) -> Result<Bitmap>;

    /// Close the renderer and release the browser
    fn close(self) -> Result<()>;
}

/// Render a diagram through a browser instance created for this call alone
///
/// The browser is launched, used for one screenshot, and torn down before the
/// function returns. This is the lifecycle the web UI uses: no browser state
/// survives a request.
pub fn render_diagram(source: &str, config: &RenderConfig) -> Result<Bitmap> {
    let mut renderer = cdp::CdpRenderer::new(config.clone())?;
    let bitmap = renderer.render(source)?;
    renderer.close()?;
    Ok(bitmap)
}
