//! Isleforge CLI - Procedural island and rock generator.
//!
//! Generate floating islands, spire rocks and rock clusters and export
//! their material layers as Wavefront OBJ files.

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

use isleforge::config::{ConfigError, SceneConfig};
use isleforge::export::{ExportError, export_layers_obj};
use isleforge::geometry::{GeometryError, MeshBuffer, icosphere_counts};
use isleforge::layers::{LayerSet, apply_moss_layer};
use isleforge::rocks::{SpireGenerator, build_cluster};
use isleforge::terrain::build_island;

/// Procedural island and rock generator.
#[derive(Parser)]
#[command(name = "isleforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every generating command.
#[derive(Args)]
struct OutputArgs {
    /// Random seed for reproducible generation.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output directory for generated files.
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Base name for output files.
    #[arg(short, long, default_value = "scene")]
    name: String,

    /// TOML file overriding generator settings.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a floating island with grass and snow layers.
    Island {
        /// Half extent along x.
        #[arg(long, default_value = "50")]
        width: f32,

        /// Half extent along y.
        #[arg(long, default_value = "50")]
        height: f32,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Generate a single spire rock.
    Spire {
        /// Footprint along x.
        #[arg(long, default_value = "10")]
        width: f32,

        /// Footprint along y.
        #[arg(long, default_value = "10")]
        height: f32,

        /// Height along z.
        #[arg(long, default_value = "20")]
        depth: f32,

        /// Add a moss layer over faces whose dot with (0, 1, 1) is at least this.
        #[arg(long)]
        moss: Option<f32>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Generate a cluster of spire rocks.
    Cluster {
        /// Footprint of the largest rock along x.
        #[arg(long, default_value = "12")]
        width: f32,

        /// Footprint of the largest rock along y.
        #[arg(long, default_value = "12")]
        height: f32,

        /// Height of the largest rock.
        #[arg(long, default_value = "20")]
        depth: f32,

        /// Add a moss layer over faces whose dot with (0, 1, 1) is at least this.
        #[arg(long)]
        moss: Option<f32>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Display expected mesh sizes for a configuration.
    Info {
        /// Icosphere subdivision level of the island base.
        #[arg(short, long)]
        detail: Option<u32>,

        /// TOML file overriding generator settings.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Geometry(#[from] GeometryError),
    #[error("{0}")]
    Export(#[from] ExportError),
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Island { width, height, out } => run_island(width, height, &out),
        Commands::Spire {
            width,
            height,
            depth,
            moss,
            out,
        } => run_spire(width, height, depth, moss, &out),
        Commands::Cluster {
            width,
            height,
            depth,
            moss,
            out,
        } => run_cluster(width, height, depth, moss, &out),
        Commands::Info { detail, config } => run_info(detail, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_scene(path: Option<&Path>) -> Result<SceneConfig, ConfigError> {
    match path {
        Some(path) => {
            println!("Config: {}", path.display());
            SceneConfig::load(path)
        }
        None => Ok(SceneConfig::default()),
    }
}

/// Uses the given seed, or wall-clock nanoseconds when none was passed.
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    })
}

fn print_header(title: &str, out: &OutputArgs, seed: u64) {
    println!("Isleforge - {}", title);
    println!("{}", "=".repeat(12 + title.len()));
    println!("Seed: {}", seed);
    println!("Output: {}", out.output.display());
}

fn report_mesh(label: &str, mesh: &MeshBuffer) {
    println!(
        "  {:<6} {:>8} vertices {:>8} faces",
        label,
        mesh.vertex_count(),
        mesh.face_count()
    );
}

fn report_footprint(mesh: &MeshBuffer) {
    if let Some(circle) = mesh.bounding_circle() {
        println!(
            "Footprint: radius {:.2} around ({:.2}, {:.2})",
            circle.radius, circle.center.x, circle.center.y
        );
    }
}

fn export(layers: &LayerSet, out: &OutputArgs) -> Result<(), CliError> {
    println!("\nExporting layers...");
    let paths = export_layers_obj(layers, &out.output, &out.name)?;
    for path in &paths {
        println!("  {}", path.display());
    }
    println!("Exported {} OBJ files: {}_*.obj", paths.len(), out.name);
    Ok(())
}

fn run_island(width: f32, height: f32, out: &OutputArgs) -> Result<(), CliError> {
    let seed = resolve_seed(out.seed);
    print_header("Floating Island Generator", out, seed);
    println!("Size: {}x{}", width, height);
    let scene = load_scene(out.config.as_deref())?;

    let start = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    println!("\nBuilding island...");
    let island = build_island(width, height, &scene.island, &mut rng)?;
    println!("Extracting layers...");
    let layers = island.layers();
    println!("Generation completed in {:.2?}", start.elapsed());

    println!(
        "Peak: ({:.2}, {:.2}, {:.2})",
        island.peak.x, island.peak.y, island.peak.z
    );
    report_footprint(&island.mesh);
    for (name, mesh) in layers.iter() {
        report_mesh(name, mesh);
    }

    export(&layers, out)
}

fn run_spire(
    width: f32,
    height: f32,
    depth: f32,
    moss: Option<f32>,
    out: &OutputArgs,
) -> Result<(), CliError> {
    let seed = resolve_seed(out.seed);
    print_header("Spire Generator", out, seed);
    println!("Size: {}x{}x{}", width, height, depth);
    let scene = load_scene(out.config.as_deref())?;

    let start = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    println!("\nBuilding spire...");
    let spire = SpireGenerator::new(scene.spire).build(width, height, depth, &mut rng)?;
    println!(
        "Segments: {} radial x {} bands",
        spire.layout.radial_segments, spire.layout.height_segments
    );
    let layers = rock_layers(spire.mesh, moss);
    println!("Generation completed in {:.2?}", start.elapsed());

    for (name, mesh) in layers.iter() {
        report_mesh(name, mesh);
    }

    export(&layers, out)
}

fn run_cluster(
    width: f32,
    height: f32,
    depth: f32,
    moss: Option<f32>,
    out: &OutputArgs,
) -> Result<(), CliError> {
    let seed = resolve_seed(out.seed);
    print_header("Rock Cluster Generator", out, seed);
    println!("Size: {}x{}x{}", width, height, depth);
    let scene = load_scene(out.config.as_deref())?;

    let start = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    println!("\nBuilding cluster...");
    let generator = SpireGenerator::new(scene.spire);
    let cluster = build_cluster(&generator, width, height, depth, &scene.cluster, &mut rng)?;
    report_footprint(&cluster);
    let layers = rock_layers(cluster, moss);
    println!("Generation completed in {:.2?}", start.elapsed());

    for (name, mesh) in layers.iter() {
        report_mesh(name, mesh);
    }

    export(&layers, out)
}

fn rock_layers(rock: MeshBuffer, moss: Option<f32>) -> LayerSet {
    let mut layers = LayerSet::new();
    if let Some(threshold) = moss {
        println!("Applying moss (threshold {})...", threshold);
        layers.insert("moss", apply_moss_layer(&rock, threshold));
    }
    layers.insert("rocks", rock);
    layers
}

fn run_info(detail: Option<u32>, config: Option<&Path>) -> Result<(), CliError> {
    let scene = load_scene(config)?;
    let detail = detail.unwrap_or(scene.island.detail);

    let (island_vertices, island_faces) = icosphere_counts(detail);

    let spire = &scene.spire;
    let spire_counts = |r: u32, h: u32| (r * (h + 1) + 2, 2 * r * h + 2 * r);
    let (min_vertices, min_faces) =
        spire_counts(spire.radial_segments_min, spire.height_segments_min);
    let (max_vertices, max_faces) = spire_counts(
        spire.radial_segments_max.max(spire.radial_segments_min),
        spire.height_segments_max.max(spire.height_segments_min),
    );

    let cluster = &scene.cluster;

    println!("Isleforge - Configuration Info");
    println!("==============================");
    println!();
    println!("Island (detail {}):", detail);
    println!("  Vertices: {:>8}", island_vertices);
    println!("  Faces:    {:>8}", island_faces);
    println!();
    println!("Spire:");
    println!("  Vertices: {:>8} - {}", min_vertices, max_vertices);
    println!("  Faces:    {:>8} - {}", min_faces, max_faces);
    println!();
    println!("Cluster:");
    println!("  Rounds:   {:>8} at most", cluster.round_limit());
    println!("  Shapes:   {:>8} at most", cluster.max_shapes());
    println!(
        "  Faces:    {:>8} at most",
        cluster.max_shapes() as u64 * max_faces as u64
    );

    Ok(())
}
