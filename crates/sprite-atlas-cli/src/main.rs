use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use image::ImageReader;
use serde::{Deserialize, Serialize};
use sprite_atlas_core::config::SortOrder;
use sprite_atlas_core::{
    AtlasConfig, InputImage, PackedAtlas, PixelBuffer, Placement, PlacementTable, pack_images,
    rotate::rotate_ccw,
};
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "sprite-atlas",
    about = "Pack images into a single square sprite atlas",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack images into an atlas (PNG + JSON manifest)
    Pack(PackArgs),
    /// Copy one image out of a packed atlas
    Extract(ExtractArgs),
    /// Print the placements and statistics of a packed atlas
    Inspect(InspectArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Input file or directory
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Atlas base name (files will be name.png/.json)
    #[arg(short, long, default_value = "atlas", help_heading = "Input/Output")]
    name: String,
    /// YAML config file path (keys present in the file override the flags)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Layout
    /// Side length of the square atlas
    #[arg(long, default_value_t = 300, help_heading = "Layout")]
    side: u32,
    /// Padding between images
    #[arg(long, default_value_t = 4, help_heading = "Layout")]
    padding: u32,
    /// Sort order: height_desc|area_desc|max_side_desc|none
    #[arg(long, default_value = "height_desc", help_heading = "Layout")]
    sort_order: String,
    /// Allow rotation (90deg) when an image only fits sideways
    #[arg(long, default_value_t = true, action=ArgAction::Set, help_heading = "Layout")]
    allow_rotation: bool,
    /// Background colour for uncovered pixels, as RRGGBBAA hex
    #[arg(long, default_value = "00000000", help_heading = "Layout")]
    background: String,

    // Export
    /// Export packing stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: pack and report stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct ExtractArgs {
    /// Manifest written by `pack`
    manifest: PathBuf,
    /// Key of the image to extract
    key: String,
    /// Output PNG path
    #[arg(short, long)]
    output: PathBuf,
    /// Undo the packer's clockwise rotation for images stored rotated
    #[arg(long, default_value_t = false)]
    unrotate: bool,
}

#[derive(Parser, Debug, Clone)]
struct InspectArgs {
    /// Manifest written by `pack`
    manifest: PathBuf,
}

/// On-disk description of a packed atlas, written next to its PNG.
#[derive(Debug, Serialize, Deserialize)]
struct Manifest {
    /// Atlas image file name, relative to the manifest.
    image: String,
    side: u32,
    padding: u32,
    placements: PlacementTable,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args, cli.progress && !cli.quiet),
        Commands::Extract(args) => run_extract(args),
        Commands::Inspect(args) => run_inspect(args),
    }
}

fn run_pack(cli: &PackArgs, show_progress: bool) -> anyhow::Result<()> {
    let mut cfg = AtlasConfig {
        side: cli.side,
        padding: cli.padding,
        allow_rotation: cli.allow_rotation,
        sort_order: parse_sort_order(&cli.sort_order)?,
        background: parse_background(&cli.background)?,
    };
    if let Some(path) = &cli.config {
        let file =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        cfg = y.apply(cfg)?;
    }
    cfg.validate().context("invalid configuration")?;

    if cli.print_config {
        match cli.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    let paths = gather_paths(&cli.input, &cli.include, &cli.exclude)?;
    if paths.is_empty() {
        anyhow::bail!("no images found under {}", cli.input.display());
    }
    let inputs = load_images_with_progress(&cli.input, &paths, show_progress)?;
    info!(count = inputs.len(), "loaded input images");

    let padding = cfg.padding;
    let atlas = pack_images(inputs, cfg).context("packing failed")?;
    let stats = atlas.stats();
    info!(
        images = stats.num_placements,
        rotated = stats.num_rotated,
        used_area = stats.used_area,
        total_area = stats.total_area,
        occupancy = format!("{:.2}%", stats.occupancy * 100.0),
        "stats"
    );

    if !cli.dry_run {
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("create out_dir {}", cli.out_dir.display()))?;
        let png_name = format!("{}.png", cli.name);
        let png_path = cli.out_dir.join(&png_name);
        atlas
            .pixels()
            .to_rgba_image()
            .save(&png_path)
            .with_context(|| format!("write {}", png_path.display()))?;
        info!(?png_path, "wrote atlas image");

        let manifest = Manifest {
            image: png_name,
            side: atlas.side(),
            padding,
            placements: atlas.placements().clone(),
        };
        let json_path = cli.out_dir.join(format!("{}.json", cli.name));
        let json = serde_json::to_string_pretty(&manifest)?;
        fs::write(&json_path, json).with_context(|| format!("write {}", json_path.display()))?;
        info!(?json_path, placements = manifest.placements.len(), "manifest written");
    }

    if let Some(stats_path) = &cli.export_stats {
        if !cli.dry_run {
            fs::write(stats_path, serde_json::to_string_pretty(&stats)?)
                .with_context(|| format!("write {}", stats_path.display()))?;
            info!(?stats_path, "stats exported");
        } else {
            println!("{}", stats.summary());
        }
    }
    Ok(())
}

fn run_extract(args: &ExtractArgs) -> anyhow::Result<()> {
    let manifest = read_manifest(&args.manifest)?;
    let atlas = load_atlas(&args.manifest, manifest)?;
    let placement = atlas.lookup(&args.key).with_context(|| {
        format!(
            "no image with key '{}' in {}",
            args.key,
            args.manifest.display()
        )
    })?;
    let rotated = placement.rotated;
    let mut pixels = atlas.try_extract(&args.key)?;
    if args.unrotate && rotated {
        pixels = rotate_ccw(&pixels)?;
        debug!(key = %args.key, "undid rotation");
    }
    pixels
        .to_rgba_image()
        .save(&args.output)
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(key = %args.key, output = ?args.output, rotated, "extracted");
    Ok(())
}

fn run_inspect(args: &InspectArgs) -> anyhow::Result<()> {
    let manifest = read_manifest(&args.manifest)?;
    println!(
        "{} ({}x{}, padding {})",
        manifest.image, manifest.side, manifest.side, manifest.padding
    );
    let atlas = load_atlas(&args.manifest, manifest)?;
    for p in atlas.placements() {
        println!("{}", format_placement(p));
    }
    println!("{}", atlas.stats().summary());
    Ok(())
}

fn format_placement(p: &Placement) -> String {
    let (sw, sh) = p.source_size();
    format!(
        "{:<32} x={:<5} y={:<5} w={:<5} h={:<5} source={}x{}{}",
        p.key,
        p.frame.x,
        p.frame.y,
        p.frame.w,
        p.frame.h,
        sw,
        sh,
        if p.rotated { " rotated" } else { "" }
    )
}

fn read_manifest(path: &Path) -> anyhow::Result<Manifest> {
    let file = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let manifest: Manifest =
        serde_json::from_str(&file).with_context(|| format!("parse manifest {}", path.display()))?;
    Ok(manifest)
}

fn load_atlas(manifest_path: &Path, manifest: Manifest) -> anyhow::Result<PackedAtlas> {
    let image_path = manifest_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(&manifest.image);
    let pixels = PixelBuffer::from(load_image(&image_path)?);
    if pixels.width() != manifest.side {
        anyhow::bail!(
            "{} is {}x{}, manifest says side {}",
            image_path.display(),
            pixels.width(),
            pixels.height(),
            manifest.side
        );
    }
    let atlas = PackedAtlas::from_parts(pixels, manifest.placements)
        .with_context(|| format!("inconsistent atlas {}", manifest_path.display()))?;
    Ok(atlas)
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let inc_set = build_globset(include)?;
    let exc_set = build_globset(exclude)?;
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_image(path) {
            list.push(path.to_path_buf());
        }
    } else {
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walk {}", path.display()))?;
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_image(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    Ok(list)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat).with_context(|| format!("bad glob '{}'", pat))?);
    }
    Ok(Some(b.build()?))
}

fn should_skip(p: &Path, include: Option<&GlobSet>, exclude: Option<&GlobSet>) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if let Some(ex) = exclude {
        if ex.is_match(&s) {
            return true;
        }
    }
    if let Some(inc) = include {
        if !inc.is_match(&s) {
            return true;
        }
    }
    false
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "bmp" | "tga" | "gif")
    )
}

/// Key for `path`: relative to `root`, extension stripped, `/`-separated.
/// A single-file input is keyed by its file stem.
fn key_for(root: &Path, path: &Path) -> String {
    let rel = path
        .strip_prefix(root)
        .ok()
        .filter(|r| !r.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new(path.file_name().unwrap_or(path.as_os_str())));
    let rel = rel.with_extension("");
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn load_images_with_progress(
    root: &Path,
    paths: &[PathBuf],
    progress: bool,
) -> anyhow::Result<Vec<InputImage>> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
        ) {
            b.set_style(style);
        }
        Some(b)
    } else {
        None
    };
    let load_one = |p: &PathBuf| -> anyhow::Result<InputImage> {
        if let Some(b) = &bar {
            b.set_message(
                p.file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("")
                    .to_string(),
            );
        }
        let img = load_image(p)?;
        if let Some(b) = &bar {
            b.inc(1);
        }
        Ok(InputImage::from_rgba(key_for(root, p), img))
    };

    #[cfg(feature = "parallel")]
    let list = {
        use rayon::prelude::*;
        paths
            .par_iter()
            .map(load_one)
            .collect::<anyhow::Result<Vec<_>>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let list = paths
        .iter()
        .map(load_one)
        .collect::<anyhow::Result<Vec<_>>>()?;

    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(list)
}

fn load_image(p: &Path) -> anyhow::Result<image::RgbaImage> {
    let img = ImageReader::open(p)
        .with_context(|| format!("open {}", p.display()))?
        .with_guessed_format()?
        .decode()
        .with_context(|| format!("decode {}", p.display()))?;
    Ok(img.to_rgba8())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    side: Option<u32>,
    padding: Option<u32>,
    allow_rotation: Option<bool>,
    sort_order: Option<String>,
    background: Option<String>,
}

impl YamlConfig {
    fn apply(self, mut cfg: AtlasConfig) -> anyhow::Result<AtlasConfig> {
        if let Some(v) = self.side {
            cfg.side = v;
        }
        if let Some(v) = self.padding {
            cfg.padding = v;
        }
        if let Some(v) = self.allow_rotation {
            cfg.allow_rotation = v;
        }
        if let Some(v) = self.sort_order {
            cfg.sort_order = parse_sort_order(&v)?;
        }
        if let Some(v) = self.background {
            cfg.background = parse_background(&v)?;
        }
        Ok(cfg)
    }
}

fn parse_sort_order(s: &str) -> anyhow::Result<SortOrder> {
    match s.parse::<SortOrder>() {
        Ok(order) => Ok(order),
        Err(()) => anyhow::bail!("unknown sort order: {}", s),
    }
}

fn parse_background(s: &str) -> anyhow::Result<[u8; 4]> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 8 || !hex.is_ascii() {
        anyhow::bail!("background must be RRGGBBAA hex, got '{}'", s);
    }
    let mut out = [0u8; 4];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .with_context(|| format!("bad background colour '{}'", s))?;
    }
    Ok(out)
}
