use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use helix_revlist::config::Config;
use helix_revlist::hash::{hash_to_hex, short_hash, Hash};
use helix_revlist::storage::{FsObjectStore, FsRefStore};
use helix_revlist::{objects, objects_with_storage_for_ignores};
use tracing_subscriber::EnvFilter;

/// List objects reachable from WANTs but not from any --not HAVE
#[derive(Parser, Debug)]
#[command(name = "helix-revlist", version, about, long_about = None)]
struct Args {
    /// Revisions whose objects are wanted (hash, HEAD, ref, branch or tag)
    #[arg(required = true, value_name = "WANT")]
    wants: Vec<String>,

    /// Revisions whose reachable objects are excluded
    #[arg(long = "not", value_name = "HAVE")]
    haves: Vec<String>,

    #[arg(long, value_name = "PATH", default_value = ".")]
    repo: PathBuf,

    /// Resolve the --not revisions in another repository
    #[arg(long, value_name = "PATH")]
    ignore_repo: Option<PathBuf>,

    /// Print 8-character hashes
    #[arg(long)]
    short: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::load(&args.repo)?;
    init_tracing(&config, args.verbose);

    let hashes = rev_list(&args, &config)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_hashes(&mut out, &hashes, args.short || config.short_hashes)?;
    out.flush()?;

    Ok(())
}

/// Resolve revisions and run the walk; `--ignore-repo` wins over the config
fn rev_list(args: &Args, config: &Config) -> Result<Vec<Hash>> {
    let ignore_repo = args.ignore_repo.as_ref().or(config.ignore_repo.as_ref());

    let wants = resolve_all(&args.repo, &args.wants)?;
    let store = FsObjectStore::new(&args.repo);

    let hashes = match ignore_repo {
        Some(ignore_path) => {
            let haves = resolve_all(ignore_path, &args.haves)?;
            let ignore_store = FsObjectStore::new(ignore_path);
            objects_with_storage_for_ignores(&store, &ignore_store, &wants, &haves)
        }
        None => {
            let haves = resolve_all(&args.repo, &args.haves)?;
            objects(&store, &wants, &haves)
        }
    };

    hashes.context("rev-list failed")
}

fn write_hashes<W: Write>(out: &mut W, hashes: &[Hash], short: bool) -> io::Result<()> {
    for hash in hashes {
        let line = if short { short_hash(hash) } else { hash_to_hex(hash) };
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn resolve_all(repo: &Path, revs: &[String]) -> Result<Vec<Hash>> {
    let refs = FsRefStore::new(repo);
    revs.iter()
        .map(|rev| {
            refs.resolve_revision(rev)
                .with_context(|| format!("cannot resolve {:?} in {}", rev, repo.display()))
        })
        .collect()
}

/// RUST_LOG wins over the configured level; -v forces debug
fn init_tracing(config: &Config, verbose: bool) {
    let level = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
