//! SkinPack - Minecraft Bedrock skin pack generator
//!
//! Main entry point for the command-line application.
//!
//! # Overview
//!
//! This binary crate provides the CLI frontend for the skinpack library. It
//! wires together:
//! - Logging infrastructure (daily file rotation + console output)
//! - Configuration loading ([`ConfigManager`], `SkinPack Config.yaml`)
//! - The animation [`BindingStore`] with YAML and `--set` overrides applied
//! - The [`PackagingPipeline`] that stages and compresses the archive
//! - The launcher seam that hands a finished archive to the OS handler
//!
//! # Commands
//!
//! - `skinpack list [DIR]` - show subfolders and packagable textures
//! - `skinpack bindings` - show the animation slots packs will carry
//! - `skinpack generate --name <NAME> [OPTIONS] <FILES>...` - build a pack
//!
//! # Execution Flow (generate)
//!
//! 1. Load `SkinPack Config.yaml` from the data directory
//! 2. Initialize logging → logs/skinpack.<date>
//! 3. Seed the binding store, apply YAML overrides, then `--set` overrides
//! 4. Build the selection from the file arguments (non-`.png` files skipped)
//! 5. Generate the archive in the output directory (settings or system temp)
//! 6. Print the archive path; open it with the OS handler unless disabled

use anyhow::{Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use skinpack::launch::{Launcher, NoopLauncher, SystemLauncher};
use skinpack::models::{Entry, PackRequest, UserConfig};
use skinpack::services::scanner;
use skinpack::{
    APP_NAME, BindingStore, ConfigManager, Metrics, PackagingPipeline, VERSION, scan_directory,
};
use std::sync::Arc;

/// SkinPack - Minecraft Bedrock skin pack generator
#[derive(Parser)]
#[command(name = "skinpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding SkinPack Config.yaml
    #[arg(long, default_value = "SkinPack Data", global = true)]
    data_dir: Utf8PathBuf,

    /// Log at debug level
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List subfolders and packagable textures in a directory
    List {
        /// Directory to scan
        #[arg(default_value = ".")]
        dir: Utf8PathBuf,
    },

    /// Print the animation slot bindings generated packs will carry
    Bindings,

    /// Generate a .mcpack archive from the given texture files
    Generate {
        /// Display name of the pack
        #[arg(short, long)]
        name: String,

        /// Use the slim-arm player model
        #[arg(long)]
        slim: bool,

        /// Use the NoArmor geometry variant and disable armor attachables
        #[arg(long)]
        no_armor: bool,

        /// Rebind an animation slot (repeatable)
        #[arg(long = "set", value_name = "SLOT=ANIMATION")]
        overrides: Vec<String>,

        /// Directory for the archive (default: settings, then system temp)
        #[arg(long)]
        output_dir: Option<Utf8PathBuf>,

        /// Open the archive with the system handler when done
        #[arg(long, overrides_with = "no_open")]
        open: bool,

        /// Skip opening the archive even if the settings say otherwise
        #[arg(long, overrides_with = "open")]
        no_open: bool,

        /// Texture files to package
        #[arg(required = true)]
        files: Vec<Utf8PathBuf>,
    },
}

/// Options for one `generate` invocation, as parsed from the command line.
struct GenerateOptions {
    name: String,
    slim: bool,
    no_armor: bool,
    overrides: Vec<String>,
    output_dir: Option<Utf8PathBuf>,
    open: bool,
    no_open: bool,
    files: Vec<Utf8PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config first: the Debug Mode setting feeds the logging level
    let config_manager = ConfigManager::new(&cli.data_dir)?;
    let user_config = config_manager.load_user_config()?;

    let debug_mode = cli.debug || user_config.settings.debug_mode;
    let _guard = skinpack::logging::setup_logging("logs", "skinpack", debug_mode, true)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::info!("Using data directory {}", config_manager.data_dir());

    match cli.command {
        Commands::List { dir } => run_list(&dir),
        Commands::Bindings => run_bindings(&user_config),
        Commands::Generate {
            name,
            slim,
            no_armor,
            overrides,
            output_dir,
            open,
            no_open,
            files,
        } => run_generate(
            &user_config,
            GenerateOptions {
                name,
                slim,
                no_armor,
                overrides,
                output_dir,
                open,
                no_open,
                files,
            },
        ),
    }
}

fn run_list(dir: &Utf8Path) -> Result<()> {
    let entries = scan_directory(dir)?;
    for entry in &entries {
        println!("{}", entry.name);
    }
    tracing::info!("Listed {} entries under {}", entries.len(), dir);
    Ok(())
}

fn run_bindings(user_config: &UserConfig) -> Result<()> {
    let store = BindingStore::new();
    store.apply_overrides(&user_config.settings.animation_overrides);

    for binding in store.bindings() {
        println!("{} = {}", binding.key, binding.value);
    }
    Ok(())
}

fn run_generate(user_config: &UserConfig, opts: GenerateOptions) -> Result<()> {
    let metrics = Arc::new(Metrics::new());

    // YAML overrides first, then command-line ones on top
    let store = BindingStore::new();
    let applied = store.apply_overrides(&user_config.settings.animation_overrides);
    metrics.record_overrides_applied(applied);

    for assignment in &opts.overrides {
        let (slot, animation) = parse_override(assignment)?;
        if store.set(slot, animation) {
            metrics.record_overrides_applied(1);
        } else {
            tracing::warn!("--set {}: no animation slot named '{}'", assignment, slot);
        }
    }

    let mut selected = Vec::new();
    for file in &opts.files {
        if file.is_dir() {
            selected.push(Entry::folder(file.clone()));
        } else if scanner::is_packagable(file) {
            selected.push(Entry::file(file.clone()));
        } else {
            tracing::warn!(
                "Skipping {}: not a .{} file",
                file,
                scanner::IMAGE_EXTENSION
            );
        }
    }

    let scratch_dir = opts.output_dir.clone().or_else(|| {
        let configured = user_config.settings.output_dir.trim();
        (!configured.is_empty()).then(|| Utf8PathBuf::from(configured))
    });

    let pipeline = match scratch_dir {
        Some(dir) => PackagingPipeline::with_scratch_dir(dir),
        None => PackagingPipeline::new()?,
    }
    .with_metrics(Arc::clone(&metrics));

    let request = PackRequest {
        pack_name: opts.name.clone(),
        selected,
        no_armor: opts.no_armor,
        slim: opts.slim,
        animations: store.snapshot(),
    };

    let archive = pipeline.generate(&request)?;
    println!("{archive}");

    let should_open = if opts.no_open {
        false
    } else if opts.open {
        true
    } else {
        user_config.settings.open_after_generate
    };

    let launcher: &dyn Launcher = if should_open {
        &SystemLauncher
    } else {
        &NoopLauncher
    };
    launcher.launch(&archive)?;

    metrics.log_summary();
    Ok(())
}

/// Splits a `--set SLOT=ANIMATION` assignment into its two halves.
fn parse_override(assignment: &str) -> Result<(&str, &str)> {
    assignment
        .split_once('=')
        .map(|(slot, animation)| (slot.trim(), animation.trim()))
        .filter(|(slot, animation)| !slot.is_empty() && !animation.is_empty())
        .ok_or_else(|| {
            anyhow!(
                "Invalid --set value '{}', expected SLOT=ANIMATION",
                assignment
            )
        })
}
