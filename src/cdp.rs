//! Chrome DevTools Protocol renderer (uses the `headless_chrome` crate)

use crate::{Bitmap, Error, RenderConfig, Renderer, Result};
use base64::Engine as Base64Engine;
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use log::debug;
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

/// Selector that exists once Mermaid has replaced the source text with its SVG
const DIAGRAM_SELECTOR: &str = ".mermaid svg";

/// CDP-based renderer implementation
///
/// Launches a headless Chrome instance, manages a single tab, and captures a
/// screenshot of a page that embeds the diagram source.
pub struct CdpRenderer {
    browser: Browser,
    tab: Arc<Tab>,
    config: RenderConfig,
}

/// Build the HTML page that Mermaid renders the diagram into
///
/// The source is inserted verbatim; Mermaid reads the div's text content and
/// replaces it with an SVG once `startOnLoad` fires.
fn diagram_html(source: &str, mermaid_js_url: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
<head>
<script type="module">
import mermaid from '{mermaid_js_url}';
mermaid.initialize({{ startOnLoad: true }});
</script>
</head>
<body>
<div class="mermaid">
{source}
</div>
</body>
</html>"#
    )
}

impl Renderer for CdpRenderer {
    fn new(config: RenderConfig) -> Result<Self>
    where
        Self: Sized,
    {
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(config.sandbox)
            .window_size(Some((config.viewport.width, config.viewport.height)))
            // Avoids crashes on hosts with a small /dev/shm (containers)
            .args(vec![OsStr::new("--disable-dev-shm-usage")])
            .build()
            .map_err(|e| Error::Initialization(format!("Failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::Initialization(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::Initialization(format!("Failed to create tab: {}", e)))?;

        Ok(Self {
            browser,
            tab,
            config,
        })
    }

    fn render(&mut self, source: &str) -> Result<Bitmap> {
        let html = diagram_html(source, &self.config.mermaid_js_url);

        // base64 keeps '#' and '%' in diagram text from truncating the data URL
        let encoded = base64::engine::general_purpose::STANDARD.encode(html.as_bytes());
        let url = format!("data:text/html;charset=utf-8;base64,{}", encoded);

        self.tab
            .navigate_to(&url)
            .map_err(|e| Error::Load(format!("Navigation failed: {}", e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| Error::Load(format!("Wait for navigation failed: {}", e)))?;

        self.tab
            .wait_for_element_with_custom_timeout(
                DIAGRAM_SELECTOR,
                Duration::from_millis(self.config.timeout_ms),
            )
            .map_err(|e| Error::Load(format!("Diagram did not render: {}", e)))?;

        // Let fonts and edge routing settle before capture
        std::thread::sleep(Duration::from_millis(self.config.settle_ms));

        let png = self
            .tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| Error::Capture(format!("Screenshot failed: {}", e)))?;

        debug!("captured screenshot of {} bytes", png.len());

        Bitmap::from_png(png)
    }

    fn close(self) -> Result<()> {
        // Drop tab before browser so the child process terminates promptly
        drop(self.tab);
        drop(self.browser);
        Ok(())
    }
}
