use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lifeworld::config::Params;
use lifeworld::edge::Topology;
use lifeworld::grid::Grid;
use lifeworld::pattern::{CATALOG, Pattern};
use lifeworld::render;
use lifeworld::snapshot::{Dims, Snapshot};
use lifeworld::{LifeError, Run, Timing};

/// Caps so a single request cannot pin the blocking pool.
const MAX_CELLS: usize = 512 * 512;
const MAX_GENERATIONS: usize = 1000;
/// Pixels per rendered frame.
const MAX_PIXELS: usize = 4096 * 4096;

#[derive(Deserialize)]
struct EvolveRequest {
    seed: Option<u64>,
    width: Option<usize>,
    height: Option<usize>,
    topology: Option<Topology>,
    pattern: Option<String>,
    density: Option<f64>,
    generations: Option<usize>,
    cell_size: Option<usize>,
    /// Explicit starting world, row-major. Overrides pattern and density.
    cells: Option<Vec<bool>>,
}

#[derive(Serialize)]
struct EvolveResponse {
    width: usize,
    height: usize,
    topology: Topology,
    frames: Vec<Frame>,
    timings: Vec<TimingEntry>,
}

#[derive(Serialize)]
struct Frame {
    generation: usize,
    population: usize,
    cells: Vec<bool>,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<LifeError> for ApiError {
    fn from(e: LifeError) -> Self {
        if e.is_client_error() {
            ApiError::BadRequest(e.to_string())
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Internal(m) => {
                error!("evolve failed: {}", m);
                (StatusCode::INTERNAL_SERVER_ERROR, m)
            }
        };
        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> Result<String, ApiError> {
    let (w, h) = u32::try_from(w)
        .ok()
        .zip(u32::try_from(h).ok())
        .ok_or_else(|| ApiError::BadRequest(format!("{w}x{h} image is too large to encode")))?;
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(rgba, w, h, image::ExtendedColorType::Rgba8)
        .map_err(|e| ApiError::Internal(format!("PNG encode failed: {e}")))?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

impl EvolveRequest {
    fn params(&self) -> Result<Params, ApiError> {
        let defaults = Params::default();
        let params = Params {
            seed: self.seed.unwrap_or(defaults.seed),
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            topology: self.topology.unwrap_or(defaults.topology),
            pattern: self.pattern.clone(),
            density: self.density.unwrap_or(defaults.density),
            generations: self.generations.unwrap_or(defaults.generations),
            cell_size: self.cell_size.unwrap_or(defaults.cell_size),
        };
        params.validate()?;

        let cells = params.width.saturating_mul(params.height);
        if cells > MAX_CELLS {
            return Err(ApiError::BadRequest(format!(
                "world of {cells} cells exceeds the {MAX_CELLS} cell limit"
            )));
        }
        if params.generations > MAX_GENERATIONS {
            return Err(ApiError::BadRequest(format!(
                "{} generations exceeds the {MAX_GENERATIONS} limit",
                params.generations
            )));
        }
        let (w, h) = render::image_size(Dims::new(params.width, params.height), params.cell_size)?;
        if w * h > MAX_PIXELS {
            return Err(ApiError::BadRequest(format!(
                "{w}x{h} frames exceed the {MAX_PIXELS} pixel limit"
            )));
        }
        Ok(params)
    }
}

fn evolve(req: EvolveRequest) -> Result<EvolveResponse, ApiError> {
    let params = req.params()?;

    let (run, timings): (Run, Vec<Timing>) = match req.cells {
        Some(cells) => {
            let snapshot = Snapshot::new(cells, Dims::new(params.width, params.height))?;
            let t = std::time::Instant::now();
            let run = lifeworld::run_grid(Grid::from_snapshot(snapshot, params.topology), params.generations);
            let timing = Timing {
                name: "evolve",
                ms: t.elapsed().as_secs_f64() * 1000.0,
            };
            (run, vec![timing])
        }
        None => lifeworld::simulate(&params)?,
    };

    let (w, h) = render::image_size(run.dims, params.cell_size)?;
    let frames = run
        .frames
        .iter()
        .enumerate()
        .map(|(generation, snap)| {
            Ok(Frame {
                generation,
                population: snap.population(),
                cells: snap.cells().to_vec(),
                data_url: encode_png(&render::render_snapshot(snap, params.cell_size)?, w, h)?,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(EvolveResponse {
        width: run.dims.width,
        height: run.dims.height,
        topology: run.topology,
        frames,
        timings: timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect(),
    })
}

async fn evolve_handler(Json(req): Json<EvolveRequest>) -> Result<Json<EvolveResponse>, ApiError> {
    let response = tokio::task::spawn_blocking(move || evolve(req))
        .await
        .map_err(|e| ApiError::Internal(format!("evolve task failed: {e}")))??;
    Ok(Json(response))
}

async fn patterns_handler() -> Json<&'static [Pattern]> {
    Json(CATALOG)
}

fn app() -> Router {
    Router::new()
        .route("/api/evolve", post(evolve_handler))
        .route("/api/patterns", get(patterns_handler))
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lifeworld=info,server=info")),
        )
        .init();

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("lifeworld server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app()).await?;
    Ok(())
}
