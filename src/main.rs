use anyhow::Context;
use clap::Parser;
use log::info;

use mermpress::server::{router, AppState};
use mermpress::{RenderConfig, Viewport};

#[derive(Parser, Debug)]
#[command(
    name = "mermpress",
    version,
    about = "Render Mermaid diagrams in headless Chrome and export them as single-page PDFs"
)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8470")]
    listen: String,

    /// Browser viewport width in pixels
    #[arg(long, default_value_t = 2000)]
    viewport_width: u32,

    /// Browser viewport height in pixels
    #[arg(long, default_value_t = 2000)]
    viewport_height: u32,

    /// Delay between the diagram appearing and the screenshot, in milliseconds
    #[arg(long, default_value_t = 3000)]
    settle_ms: u64,

    /// Navigation and render timeout in milliseconds
    #[arg(long, default_value_t = 30000)]
    timeout_ms: u64,

    /// Run Chrome with its sandbox enabled
    #[arg(long)]
    sandbox: bool,

    /// Mermaid ES module URL loaded into the diagram page
    #[arg(long)]
    mermaid_js: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = RenderConfig {
        viewport: Viewport {
            width: args.viewport_width,
            height: args.viewport_height,
        },
        timeout_ms: args.timeout_ms,
        settle_ms: args.settle_ms,
        sandbox: args.sandbox,
        ..Default::default()
    };
    if let Some(url) = args.mermaid_js {
        config.mermaid_js_url = url;
    }

    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&args.listen)
        .await
        .with_context(|| format!("failed to bind {}", args.listen))?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
