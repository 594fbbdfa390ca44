// Scene Asset Generator CLI
//
// This binary turns algorithm-result payloads into precomputed scene JSON.
// It runs before deployment so the frontend can fetch ready-made geometry
// instead of shipping the mapping code to the browser.

use clap::Parser;
use flate2::write::GzEncoder;
use flate2::Compression;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use algo_scenes::*;

/// CLI arguments for the scene generator
#[derive(Parser, Debug)]
#[command(name = "generate")]
#[command(about = "Generate 3D scene assets from algorithm result payloads", long_about = None)]
struct Args {
    /// Path to the result payload JSON (a GLCM analysis, decision-tree
    /// training, or naive-bayes training response)
    #[arg(short, long)]
    input: PathBuf,

    /// Scene kind to build (e.g. "glcm", "tree", "bayes")
    #[arg(short, long)]
    scene: String,

    /// Feature mode for GLCM scenes (default, contrast, dissimilarity,
    /// homogeneity, energy, correlation, ASM)
    #[arg(short, long, default_value = "default")]
    feature: String,

    /// Bin count per axis for GLCM scenes
    #[arg(short, long, default_value_t = 32, value_parser = clap::value_parser!(u16).range(1..=256))]
    bins: u16,

    /// Output directory for generated assets
    #[arg(short, long, default_value = "public/scenes")]
    output: PathBuf,

    /// Gzip compress the scene JSON (creates scene.json.gz instead of
    /// scene.json)
    #[arg(long, default_value_t = false)]
    gzip: bool,
}

/// Scene kinds this generator can build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SceneKind {
    Glcm,
    Tree,
    Bayes,
}

/// Parse the scene kind from the CLI string
fn parse_scene_kind(scene: &str) -> Result<SceneKind, String> {
    match scene {
        "glcm" => Ok(SceneKind::Glcm),
        "tree" => Ok(SceneKind::Tree),
        "bayes" => Ok(SceneKind::Bayes),
        _ => Err(format!(
            "Invalid scene: '{}'. Must be one of: glcm, tree, bayes",
            scene
        )),
    }
}

/// Write JSON data to a file, optionally gzipped
fn write_json(dir: &Path, name: &str, json_str: &str, gzip: bool) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    if gzip {
        let path = dir.join(format!("{}.gz", name));
        let file = fs::File::create(&path)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(json_str.as_bytes())?;
        encoder.finish()?;
        Ok(path)
    } else {
        let path = dir.join(name);
        fs::write(&path, json_str)?;
        Ok(path)
    }
}

/// Find the workspace root by looking for Cargo.toml
fn find_workspace_root() -> PathBuf {
    let mut current = env::current_dir().expect("Failed to get current directory");

    // Walk up the directory tree until we find workspace Cargo.toml
    loop {
        let cargo_toml = current.join("Cargo.toml");
        if cargo_toml.exists() {
            // Check if it's a workspace (has [workspace] section)
            if let Ok(contents) = fs::read_to_string(&cargo_toml) {
                if contents.contains("[workspace]") {
                    return current;
                }
            }
        }

        // Try parent directory
        if let Some(parent) = current.parent() {
            current = parent.to_path_buf();
        } else {
            // Couldn't find workspace root, use current dir
            return env::current_dir().expect("Failed to get current directory");
        }
    }
}

/// Save a scene plus its manifest and report what was written
fn save_scene(
    dir: &Path,
    scene_json: &str,
    manifest: &SceneManifest,
    gzip: bool,
) -> std::io::Result<()> {
    let scene_path = write_json(dir, "scene.json", scene_json, gzip)?;
    println!(
        "  ✓ Wrote scene: {} ({:.2} KB)",
        scene_path.display(),
        fs::metadata(&scene_path)?.len() as f64 / 1_000.0
    );

    let manifest_json = serde_json::to_string_pretty(manifest)?;
    let manifest_path = write_json(dir, "manifest.json", &manifest_json, false)?;
    println!("  ✓ Wrote manifest: {}", manifest_path.display());

    Ok(())
}

/// Build one GLCM bar-field scene per angle in the payload
fn generate_glcm(
    payload: &GlcmAnalysis,
    mode: FeatureMode,
    bin_count: usize,
    source: &str,
    output_dir: &Path,
    gzip: bool,
) -> Result<usize, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(payload.degrees.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} angles")?
            .progress_chars("█▓▒░ "),
    );

    let mut total_bars = 0;
    for &angle in &payload.degrees {
        let Some(matrix) = payload.matrix_for(angle) else {
            pb.inc(1);
            continue;
        };

        let scene = build_glcm_scene(matrix, mode, bin_count);
        total_bars += scene.bars.len();

        let manifest = SceneManifest::new(
            "glcm",
            source,
            Some(mode.name().to_string()),
            Some(angle),
            Some(bin_count),
            scene.bars.len(),
        );

        let dir = output_dir.join("glcm").join(format!("{}deg", angle));
        save_scene(&dir, &serde_json::to_string_pretty(&scene)?, &manifest, gzip)?;

        if let Some(value) = payload.feature_value_at(mode, angle) {
            println!("    {} at {}°: {:.5}", mode.name(), angle, value);
        }

        pb.inc(1);
    }
    pb.finish_with_message("✓ Scene build complete");

    Ok(total_bars)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();

    let scene_kind = parse_scene_kind(&args.scene).map_err(|e| e.to_string())?;
    let mode = FeatureMode::from_name(&args.feature).map_err(|e| e.to_string())?;
    let bin_count = args.bins as usize;

    // Find workspace root so output lands in a stable place regardless of
    // which kernel directory the generator runs from
    let workspace_root = find_workspace_root();
    let output_dir = workspace_root.join(&args.output);

    let source = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| args.input.display().to_string());
    let payload_text = fs::read_to_string(&args.input)?;

    // Print configuration
    println!("\nScene Asset Generator");
    println!("=======================================");
    println!("  Input: {}", args.input.display());
    println!("  Scene: {}", args.scene);
    println!("  Feature mode: {}", mode.name());
    println!("  Bins: {}", bin_count);
    println!("  Build: {} ({})", env!("BUILD_GIT_SHA"), env!("BUILD_RUSTC_VERSION"));
    println!("=======================================\n");

    let primitives = match scene_kind {
        SceneKind::Glcm => {
            let payload: GlcmAnalysis = serde_json::from_str(&payload_text)?;
            println!("Building bar fields for {} angles...", payload.degrees.len());
            generate_glcm(&payload, mode, bin_count, &source, &output_dir, args.gzip)?
        }
        SceneKind::Tree => {
            let payload: DecisionTreeTraining = serde_json::from_str(&payload_text)?;
            let shape = payload.tree().map_err(|e| e.to_string())?;
            let (nodes, edges) = flatten_tree(&shape);
            let scene = build_tree_scene(&nodes, &edges);

            println!(
                "Flattened tree: {} nodes, {} edges (accuracy {:.1}%, {} samples)",
                nodes.len(),
                edges.len(),
                payload.accuracy * 100.0,
                payload.dataset_size
            );

            let manifest = SceneManifest::new(
                "tree",
                &source,
                None,
                None,
                None,
                scene.nodes.len() + scene.edges.len(),
            );
            save_scene(
                &output_dir.join("tree"),
                &serde_json::to_string_pretty(&scene)?,
                &manifest,
                args.gzip,
            )?;
            scene.nodes.len() + scene.edges.len()
        }
        SceneKind::Bayes => {
            let payload: NaiveBayesTraining = serde_json::from_str(&payload_text)?;
            let table = payload.probability_table().map_err(|e| e.to_string())?;
            let scene = build_prob_scene(&table);

            println!(
                "Probability grid: {} features, {} classes, {} samples",
                table.num_features(),
                table.num_classes(),
                payload.num_samples
            );

            let manifest =
                SceneManifest::new("bayes", &source, None, None, None, scene.grid.bars.len());
            save_scene(
                &output_dir.join("bayes"),
                &serde_json::to_string_pretty(&scene)?,
                &manifest,
                args.gzip,
            )?;
            scene.grid.bars.len()
        }
    };

    // Print statistics
    println!("\nStatistics:");
    println!("  Scene primitives: {}", primitives);

    println!("\n✨ Generation complete!");
    println!("Output: {}\n", output_dir.display());

    Ok(())
}
