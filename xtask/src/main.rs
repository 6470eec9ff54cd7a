//! Maintenance tasks for Planetes
//!
//! Usage:
//!   cargo xtask check-levels [files...]                      # Validate level layouts
//!   cargo xtask new-save --level <file> --name <n> --out <p>  # Write a fresh save JSON
//!   cargo xtask package                                      # Release build + assets in dist/

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use planetes::game::{read_layout_file, Level, LevelSettings};
use planetes::Save;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Maintenance tasks for Planetes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse level layouts and report construction errors
    CheckLevels {
        /// Layout files (default: every .txt in assets/levels)
        files: Vec<PathBuf>,
    },
    /// Write a fresh save for a layout
    NewSave {
        #[arg(long)]
        level: PathBuf,
        #[arg(long, default_value = "Player 1")]
        name: String,
        /// Level index stored in the save
        #[arg(long, default_value_t = 0)]
        index: u32,
        #[arg(long)]
        out: PathBuf,
    },
    /// Build a native release and copy it with the assets into dist/
    Package,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckLevels { files } => check_levels(files),
        Commands::NewSave { level, name, index, out } => new_save(&level, &name, index, &out),
        Commands::Package => package(),
    }
}

/// Get the project root directory
fn project_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.parent().unwrap_or(manifest).to_path_buf()
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Copy directory recursively
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn default_levels() -> Result<Vec<PathBuf>> {
    let dir = project_root().join("assets/levels");
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .with_context(|| format!("Cannot list {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();
    Ok(files)
}

fn check_levels(files: Vec<PathBuf>) -> Result<()> {
    let files = if files.is_empty() { default_levels()? } else { files };
    let settings = LevelSettings::default();
    let mut failures = 0;

    for file in &files {
        let result = read_layout_file(file).and_then(|rows| Level::new(rows.as_slice(), &settings).map(|level| (rows, level)));
        match result {
            Ok((rows, level)) => println!(
                "ok    {} ({} rows, {} tiles, {} enemies)",
                file.display(),
                rows.len(),
                level.tiles().len(),
                level.enemies().len()
            ),
            Err(e) => {
                failures += 1;
                println!("FAIL  {}: {}", file.display(), e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} level(s) failed", failures, files.len());
    }
    println!("{} level(s) ok", files.len());
    Ok(())
}

fn new_save(level: &Path, name: &str, index: u32, out: &Path) -> Result<()> {
    let rows = read_layout_file(level)?;
    let settings = LevelSettings::default();
    Level::new(rows.as_slice(), &settings).with_context(|| format!("{} is not a playable level", level.display()))?;

    let save = Save::new(name, index, rows);
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out, save.to_json_pretty()?)?;
    println!("Wrote {} to {}", save.pretty(), out.display());
    Ok(())
}

fn package() -> Result<()> {
    let root = project_root();
    let dist = root.join("dist/planetes");

    println!("Building native release...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--bin", "planetes", "--bin", "save_server"]),
    )?;

    // Clean and create dist folder
    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    for name in ["planetes", "save_server"] {
        let binary = if cfg!(target_os = "windows") {
            format!("{}.exe", name)
        } else {
            name.to_string()
        };
        std::fs::copy(root.join("target/release").join(&binary), dist.join(&binary))
            .with_context(|| format!("Missing build output {}", binary))?;
    }

    copy_dir_recursive(&root.join("assets"), &dist.join("assets"))?;

    println!("Package ready: dist/planetes/");
    Ok(())
}
