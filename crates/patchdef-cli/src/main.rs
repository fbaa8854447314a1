use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use patchdef_core::{
    DEFS_FILENAME, Error, PatchSummary, UpdateClient, UpdateConfig, apply_patches,
    config::CONFIG_FILENAME, load_patch_defs, md5_of_file,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "patchdef")]
#[command(about = "Declarative binary executable patcher", version)]
struct Args {
    /// Update the patch definitions file from the configured update server
    #[arg(long)]
    update: bool,

    /// Patch the executable at the given path
    #[arg(long, value_name = "EXE", required_unless_present = "update")]
    patch: Option<PathBuf>,

    /// Path to the update-server config file
    #[arg(long, default_value = CONFIG_FILENAME)]
    config: PathBuf,

    /// Path to the local patch definitions file
    #[arg(long, default_value = DEFS_FILENAME)]
    defs: PathBuf,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("patchdef=info".parse()?)
                .add_directive("patchdef_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    if args.update {
        run_update(&args)?;
    }

    match &args.patch {
        Some(exe_path) => run_patch(exe_path, &args.defs),
        None => Ok(ExitCode::SUCCESS),
    }
}

fn run_update(args: &Args) -> Result<()> {
    println!("Checking for updates...");

    let config = UpdateConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;
    let client = UpdateClient::new(&config.update_server)?;

    if client
        .update_available(&args.defs)
        .context("Failed to check for definition updates")?
    {
        println!("Downloading latest patch definitions...");
        client
            .download_defs(&args.defs)
            .context("Failed to download patch definitions")?;
        println!("Done.");
    } else {
        println!("No updates available.");
    }

    Ok(())
}

fn run_patch(exe_path: &Path, defs_path: &Path) -> Result<ExitCode> {
    println!("Loading patch definitions...");

    let exe_md5 = md5_of_file(exe_path)
        .with_context(|| format!("Failed to hash executable {:?}", exe_path))?;
    info!("Executable checksum: {}", exe_md5);

    let build = load_patch_defs(defs_path, &exe_md5)
        .with_context(|| format!("Failed to load patch definitions from {:?}", defs_path))?;

    if !build.is_matched() {
        warn!("{}", Error::UnknownBuild(exe_md5));
        return Ok(ExitCode::FAILURE);
    }
    println!("{} detected.", build.id);

    if !build.has_patches() {
        warn!("{}", Error::NoPatchesFound(build.id.clone()));
        return Ok(ExitCode::FAILURE);
    }

    println!("\nApplying patches...");
    let results = apply_patches(exe_path, &build.pattern_patches, &build.offset_patches);
    let summary = PatchSummary::new(results);
    println!("{}", summary.render_console());

    Ok(if summary.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
