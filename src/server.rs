//! Web form UI: paste Mermaid text, preview the render, download a PDF
//!
//! Three routes: the form page, a preview endpoint returning the screenshot
//! as base64 PNG, and an export endpoint returning the finished PDF as an
//! attachment. Each request renders through its own browser instance; no
//! state is shared between requests.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use base64::Engine as Base64Engine;
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::compose::compose_pdf;
use crate::page::PageGeometry;
use crate::{Bitmap, RenderConfig, Result};

/// Fixed filename for the exported document
pub const PDF_FILENAME: &str = "mermaid_diagram.pdf";

type RenderFn = dyn Fn(&str) -> Result<Bitmap> + Send + Sync;

/// Shared application state: the render step and the output page geometry
#[derive(Clone)]
pub struct AppState {
    render: Arc<RenderFn>,
    geometry: PageGeometry,
}

impl AppState {
    /// State that renders through a fresh headless Chrome instance per request
    pub fn new(config: RenderConfig) -> Self {
        Self::with_renderer(
            move |source| crate::render_diagram(source, &config),
            PageGeometry::letter(),
        )
    }

    /// State with a substituted render step; route tests use this to avoid
    /// launching a browser
    pub fn with_renderer<F>(render: F, geometry: PageGeometry) -> Self
    where
        F: Fn(&str) -> Result<Bitmap> + Send + Sync + 'static,
    {
        Self {
            render: Arc::new(render),
            geometry,
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/render", post(render_preview))
        .route("/export", post(export_pdf))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RenderResponse {
    /// base64-encoded PNG for the inline preview
    pub png: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub code: String,
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn render_preview(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Response {
    let bitmap = match run_render(&state, req.code).await {
        Ok(bitmap) => bitmap,
        Err(resp) => return resp,
    };

    let png = base64::engine::general_purpose::STANDARD.encode(bitmap.png());
    Json(RenderResponse {
        png,
        width: bitmap.width(),
        height: bitmap.height(),
    })
    .into_response()
}

async fn export_pdf(State(state): State<AppState>, Form(req): Form<ExportRequest>) -> Response {
    let bitmap = match run_render(&state, req.code).await {
        Ok(bitmap) => bitmap,
        Err(resp) => return resp,
    };

    match compose_pdf(&bitmap, &state.geometry) {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", PDF_FILENAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!("PDF composition failed: {}", e);
            fatal(e.to_string())
        }
    }
}

/// Run the blocking render step off the async executor
///
/// Any failure is the fatal-error path: the response is a 500 carrying the
/// error text, with no categorization or retry.
async fn run_render(state: &AppState, code: String) -> std::result::Result<Bitmap, Response> {
    let render = state.render.clone();
    match tokio::task::spawn_blocking(move || render(&code)).await {
        Ok(Ok(bitmap)) => {
            info!("rendered {}x{} diagram", bitmap.width(), bitmap.height());
            Ok(bitmap)
        }
        Ok(Err(e)) => {
            error!("render failed: {}", e);
            Err(fatal(e.to_string()))
        }
        Err(e) => Err(fatal(format!("render task failed: {}", e))),
    }
}

fn fatal(message: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}

const INDEX_HTML: &str = r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>Mermaid Diagram Visualizer and PDF Exporter</title>
<style>
  body { font-family: sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; }
  textarea { width: 100%; height: 12rem; font-family: monospace; }
  img { max-width: 100%; border: 1px solid #ccc; margin-top: 1rem; }
  button { margin-top: 0.5rem; margin-right: 0.5rem; }
  #error { color: #b00; white-space: pre-wrap; }
</style>
</head>
<body>
<h1>Mermaid Diagram Visualizer and PDF Exporter</h1>
<form id="export-form" method="post" action="/export">
<textarea id="code" name="code" placeholder="graph TD
A-->B
B-->C
C-->D"></textarea>
<div>
<button type="button" id="render">Render</button>
<button type="submit">Download PDF</button>
</div>
</form>
<p id="error"></p>
<img id="preview" alt="Mermaid Diagram Preview" hidden>
<script>
document.getElementById('render').addEventListener('click', async () => {
  const code = document.getElementById('code').value;
  const err = document.getElementById('error');
  const preview = document.getElementById('preview');
  err.textContent = '';
  try {
    const resp = await fetch('/render', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ code }),
    });
    if (!resp.ok) {
      err.textContent = await resp.text();
      preview.hidden = true;
      return;
    }
    const data = await resp.json();
    preview.src = 'data:image/png;base64,' + data.png;
    preview.hidden = false;
  } catch (e) {
    err.textContent = String(e);
  }
});
</script>
</body>
</html>
"##;
