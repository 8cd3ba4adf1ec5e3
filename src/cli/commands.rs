use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::filters::{SearchFilter, parse_filter};
use crate::index_file::RecordStream;
use crate::index_storage::{RebuildMetadata, load_extension_dictionary, load_tag_dictionary};
use crate::indexer::{BuildOutcome, Indexer};
use crate::models::SearchResultEntry;
use crate::search::{read_record_at, search_from};
use crate::utils::{format_path_with_tilde, get_config_path};

const DEFAULT_LIMIT: usize = 50;

#[derive(Parser)]
#[command(name = "explore-index")]
#[command(version = "0.1.0")]
#[command(about = "Index a directory tree and search it by name, path, extension and tag")]
pub struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every command that reads the configuration
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Config file (defaults to $EXPLORE_INDEX_CONFIG, then the user config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the index file, dictionaries and metadata
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the index, skipped when the source root is unchanged
    Index {
        #[command(flatten)]
        config: ConfigArgs,

        /// Directory tree to index
        #[arg(short, long)]
        src: Option<PathBuf>,

        /// Rebuild even if the source root is unchanged
        #[arg(short, long)]
        force: bool,
    },
    /// Print matching records as JSON lines
    Search(SearchArgs),
    /// Print the record with the given id
    Show {
        #[command(flatten)]
        config: ConfigArgs,

        /// Record id (its byte offset in the index file)
        id: u64,
    },
    /// Show statistics about the index
    Stats {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Substring of the file name
    #[arg(long)]
    pub name: Option<String>,

    /// Substring of the path relative to the source root
    #[arg(long)]
    pub path: Option<String>,

    /// Exact extension, without the dot
    #[arg(long)]
    pub ext: Option<String>,

    /// Exact tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Filter expression, e.g. `ext:jpg tag:cat`
    #[arg(short, long)]
    pub query: Option<String>,

    /// Maximum number of results
    #[arg(short, long, default_value_t = DEFAULT_LIMIT, conflicts_with = "all")]
    pub limit: usize,

    /// Return every match
    #[arg(long)]
    pub all: bool,

    /// Resume from a byte offset printed by an earlier search
    #[arg(long, default_value_t = 0)]
    pub from: u64,
}

impl SearchArgs {
    /// Combine the individual field flags with the query expression
    fn filter(&self) -> Result<SearchFilter> {
        let mut filter = SearchFilter::new();
        if let Some(name) = &self.name {
            filter = filter.with_name(name.as_str());
        }
        if let Some(path) = &self.path {
            filter = filter.with_path(path.as_str());
        }
        if let Some(ext) = &self.ext {
            filter = filter.with_ext(ext.as_str());
        }
        if let Some(tag) = &self.tag {
            filter = filter.with_tag(tag.as_str());
        }

        match &self.query {
            Some(query) => {
                let parsed = parse_filter(query)
                    .with_context(|| format!("Invalid query: {}", query))?;
                filter.merge(parsed)
            }
            None => Ok(filter),
        }
    }

    fn limit(&self) -> Option<usize> {
        if self.all { None } else { Some(self.limit) }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Some(Commands::Index { config, src, force }) => {
            run_index(config, src.as_deref(), *force)?;
        }
        Some(Commands::Search(args)) => {
            run_search(args)?;
        }
        Some(Commands::Show { config, id }) => {
            run_show(config, *id)?;
        }
        Some(Commands::Stats { config }) => {
            show_stats(config)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable
fn init_logging(verbose: bool) {
    let default_level = if verbose { "explore_index=debug" } else { "explore_index=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests driving `run` twice) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}

/// Resolve the config file and apply command-line overrides
fn load_config(args: &ConfigArgs) -> Result<Config> {
    let path = args.config.clone().or_else(get_config_path);
    if let Some(path) = &path {
        debug!(path = %path.display(), "Loading config");
    }

    let mut config = Config::load_or_default(path.as_deref())?;
    if let Some(data) = &args.data {
        config.data_root = data.clone();
    }
    Ok(config)
}

fn run_index(args: &ConfigArgs, src: Option<&Path>, force: bool) -> Result<()> {
    let mut config = load_config(args)?;
    if let Some(src) = src {
        config.src_root = src.to_path_buf();
    }

    let indexer = Indexer::new(&config.scan)?;
    let outcome = if force {
        BuildOutcome::Rebuilt(indexer.rebuild(&config.src_root, &config.data_root)?)
    } else {
        indexer.create(&config.src_root, &config.data_root)?
    };

    match outcome {
        BuildOutcome::Skipped => {
            println!("Index is up to date: {}", format_path_with_tilde(&config.index_path()));
        }
        BuildOutcome::Rebuilt(stats) => {
            info!(src = %config.src_root.display(), "Index rebuilt");
            println!("Indexed {} files", stats.records);
            println!("  Ignored: {}", stats.ignored);
            println!("  Skipped: {}", stats.skipped);
            println!("  Extensions: {}", stats.extensions);
            println!("  Tags: {}", stats.tags);
            println!("Index file: {}", format_path_with_tilde(&config.index_path()));
        }
    }

    Ok(())
}

fn run_search(args: &SearchArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let filter = args.filter()?;

    let page = search_from(&config.index_path(), &filter, args.limit(), args.from)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for entry in &page.entries {
        write_entry(&mut out, entry)?;
    }
    out.flush()?;

    if let Some(next) = page.next_offset {
        eprintln!("More results available: --from {}", next);
    }

    Ok(())
}

fn write_entry(out: &mut impl Write, entry: &SearchResultEntry) -> Result<()> {
    serde_json::to_writer(&mut *out, entry).context("Failed to serialize search result")?;
    out.write_all(b"\n")?;
    Ok(())
}

fn run_show(args: &ConfigArgs, id: u64) -> Result<()> {
    let config = load_config(args)?;
    let record = read_record_at(&config.index_path(), id)?;
    let entry = SearchResultEntry { id, record };

    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(())
}

fn show_stats(args: &ConfigArgs) -> Result<()> {
    let config = load_config(args)?;
    let scan = &config.scan;
    let data_root = &config.data_root;

    let index_file = std::fs::File::open(config.index_path()).with_context(|| {
        format!("Failed to open index file: {}", format_path_with_tilde(&config.index_path()))
    })?;
    let mut records = 0usize;
    for item in RecordStream::new(index_file)? {
        item?;
        records += 1;
    }

    let extensions = load_extension_dictionary(&scan.ext_list_path(data_root))?;
    let tags = load_tag_dictionary(&scan.tag_list_path(data_root))?;
    let metadata = RebuildMetadata::load(&scan.meta_path(data_root));

    println!("Index Statistics");
    println!("================");
    println!("Total records: {}", records);
    println!("  Extensions: {}", extensions.len());
    println!("  Tags: {}", tags.len());
    println!();
    println!("Data directory: {}", format_path_with_tilde(data_root));

    if let Some(created) = metadata.create_time {
        println!("Last build: {}", created.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(updated) = metadata.last_update {
        println!("Source modified: {}", updated.format("%Y-%m-%d %H:%M:%S"));
    }

    Ok(())
}
