use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use imagehash_core::logging::{init_logger, log_hash_error};
use imagehash_core::{is_supported_image, ExtImageHash, HashAlgorithm, Hasher, HasherConfig};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, LevelFilter};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// Show a progress bar once a run covers at least this many files
const PROGRESS_MIN_FILES: usize = 16;

#[derive(Parser)]
#[command(name = "imagehash")]
#[command(about = "Compute and compare perceptual image hashes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to rotating files in this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the hash of every image found under the given paths
    Hash {
        #[command(flatten)]
        options: HashOptions,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Number of worker threads (0 = one per CPU)
        #[arg(short, long, default_value_t = 0)]
        threads: usize,

        /// Image files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Hash two images and print their distance
    Compare {
        #[command(flatten)]
        options: HashOptions,

        left: PathBuf,
        right: PathBuf,
    },

    /// Print the distance between two hashes in `<kind>:<hex>` form
    Distance { left: String, right: String },

    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "imagehash.json")]
        path: PathBuf,
    },
}

#[derive(Args)]
struct HashOptions {
    /// Hash algorithm: average, difference, perceptual or wavelet
    #[arg(short, long)]
    algorithm: Option<HashAlgorithm>,

    /// Side of the decision grid; hashes carry size² bits
    #[arg(short, long)]
    size: Option<u32>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl HashOptions {
    /// Configuration file (or defaults) overridden by command line arguments
    fn hasher(&self) -> anyhow::Result<Hasher> {
        let mut config = match &self.config {
            Some(path) => HasherConfig::from_file(path)?,
            None => HasherConfig::default(),
        };

        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(size) = self.size {
            config.hash_size = size;
        }

        Ok(config.to_hasher()?)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_dir.as_deref())?;

    match cli.command {
        Commands::Hash {
            options,
            recursive,
            threads,
            paths,
        } => {
            let hasher = options.hasher()?;
            let files = collect_images(&paths, recursive);
            info!("Hashing {} images", files.len());
            hash_files(&hasher, &files, threads)
        }

        Commands::Compare {
            options,
            left,
            right,
        } => {
            let hasher = options.hasher()?;
            let left_hash = hasher
                .hash_path(&left)
                .with_context(|| format!("Failed to hash {}", left.display()))?;
            let right_hash = hasher
                .hash_path(&right)
                .with_context(|| format!("Failed to hash {}", right.display()))?;

            println!("{}  {}", left_hash, left.display());
            println!("{}  {}", right_hash, right.display());
            println!("distance: {}", left_hash.distance(&right_hash)?);
            Ok(())
        }

        Commands::Distance { left, right } => {
            println!("{}", text_distance(&left, &right)?);
            Ok(())
        }

        Commands::GenerateConfig { path } => {
            let config = HasherConfig::default();
            config.save_to_file(&path)?;
            println!("Configuration file generated at: {}", path.display());
            Ok(())
        }
    }
}

fn init_logging(verbose: u8, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    match log_dir {
        Some(dir) => init_logger(dir, level).map_err(|e| anyhow!("{}", e)),
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_default_env()
                .init();
            Ok(())
        }
    }
}

/// Image files named directly plus those found in the named directories, sorted
fn collect_images(paths: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let walker = WalkDir::new(path).max_depth(if recursive { usize::MAX } else { 1 });
            for entry in walker {
                match entry {
                    Ok(entry) if entry.file_type().is_file() && is_supported_image(entry.path()) => {
                        files.push(entry.into_path());
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Skipping unreadable entry: {}", e),
                }
            }
        } else {
            files.push(path.clone());
        }
    }

    files.sort();
    files.dedup();
    files
}

fn hash_files(hasher: &Hasher, files: &[PathBuf], threads: usize) -> anyhow::Result<()> {
    let threads = if threads == 0 { num_cpus::get() } else { threads };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build thread pool")?;

    let progress = if files.len() >= PROGRESS_MIN_FILES {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{eta}] {bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")?
                .progress_chars("##-"),
        );
        bar.set_message("Computing image hashes...");
        bar
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<_> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let result = hasher.hash_path(path);
                progress.inc(1);
                result
            })
            .collect()
    });
    progress.finish_and_clear();

    let mut failures = 0;
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(hash) => println!("{}  {}", hash, path.display()),
            Err(e) => {
                log_hash_error(path, &e);
                eprintln!("{}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} images could not be hashed", failures, files.len());
    }
    Ok(())
}

/// Distance between two text hashes; 64-bit texts parse as one-word extended hashes
fn text_distance(left: &str, right: &str) -> anyhow::Result<u32> {
    let left: ExtImageHash = left.parse()?;
    let right: ExtImageHash = right.parse()?;
    Ok(left.distance(&right)?)
}
