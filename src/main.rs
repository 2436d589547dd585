use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lifeworld::config::Params;
use lifeworld::edge::Topology;
use lifeworld::render;

/// Evolve a Game of Life world and write every generation as a PNG.
#[derive(Parser, Debug)]
#[command(name = "lifeworld", version)]
struct Cli {
    /// TOML file with default parameters; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// bounded or wrapped.
    #[arg(long)]
    topology: Option<Topology>,

    /// Named pattern to centre in the world instead of random cells.
    #[arg(long)]
    pattern: Option<String>,

    /// Fraction of cells alive when seeding randomly.
    #[arg(long)]
    density: Option<f64>,

    #[arg(long)]
    generations: Option<usize>,

    /// Pixels per cell side.
    #[arg(long)]
    cell_size: Option<usize>,

    #[arg(long, default_value = "artifacts")]
    out: PathBuf,

    /// List known patterns and exit.
    #[arg(long)]
    list_patterns: bool,
}

impl Cli {
    fn params(&self) -> anyhow::Result<Params> {
        let mut params = match &self.config {
            Some(path) => Params::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Params::default(),
        };
        if let Some(v) = self.seed {
            params.seed = v;
        }
        if let Some(v) = self.width {
            params.width = v;
        }
        if let Some(v) = self.height {
            params.height = v;
        }
        if let Some(v) = self.topology {
            params.topology = v;
        }
        if let Some(v) = &self.pattern {
            params.pattern = Some(v.clone());
        }
        if let Some(v) = self.density {
            params.density = v;
        }
        if let Some(v) = self.generations {
            params.generations = v;
        }
        if let Some(v) = self.cell_size {
            params.cell_size = v;
        }
        params.validate()?;
        Ok(params)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lifeworld=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_patterns {
        for p in lifeworld::pattern::CATALOG {
            let d = p.dims();
            println!("{:10} {:?} {}x{} period {}", p.name, p.family, d.width, d.height, p.period());
        }
        return Ok(());
    }

    let params = cli.params()?;
    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("failed to create {}", cli.out.display()))?;

    info!(
        "Evolving {}x{} {} world, seed={}, generations={}",
        params.width, params.height, params.topology, params.seed, params.generations
    );

    let (run, mut timings) = lifeworld::simulate(&params)?;

    let t = std::time::Instant::now();
    let (w, h) = render::image_size(run.dims, params.cell_size)?;
    let w = u32::try_from(w).context("image width exceeds u32")?;
    let h = u32::try_from(h).context("image height exceeds u32")?;
    for (generation, frame) in run.frames.iter().enumerate() {
        let rgba = render::render_snapshot(frame, params.cell_size)?;
        let path = cli.out.join(format!("frame_{generation:04}.png"));
        image::save_buffer(&path, &rgba, w, h, image::ColorType::Rgba8)
            .with_context(|| format!("failed to save {}", path.display()))?;
    }
    timings.push(lifeworld::Timing {
        name: "render",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    info!("Timings:");
    for t in &timings {
        info!("  {:20} {:8.1} ms", t.name, t.ms);
    }
    info!(
        "Wrote {} frames to {}, populations {:?}",
        run.frames.len(),
        cli.out.display(),
        run.populations()
    );

    Ok(())
}
