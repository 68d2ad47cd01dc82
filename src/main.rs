use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codectx::format::{Formatter, OutputFormat, Report, create_formatter};
use codectx::utils::watch::{Debouncer, FileWatcher, is_source_change};
use codectx::{CodebaseContext, ContextConfig, ContextEngine};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Plain,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Plain => OutputFormat::Plain,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Codebase context intelligence: dependency graph, impact analysis and symbol lookup", long_about = None)]
struct Args {
    /// Project root to scan
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    format: Option<CliOutputFormat>,

    /// Add include pattern (glob); replaces the default set
    #[arg(long, global = true)]
    include: Vec<String>,

    /// Add ignore pattern (glob)
    #[arg(long, global = true)]
    ignore: Vec<String>,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Query(Query),
    /// Reprint the summary whenever source files change
    Watch {
        /// Debounce delay in milliseconds
        #[arg(long, default_value_t = 500)]
        debounce: u64,
    },
}

/// One-shot queries, all answered from a single snapshot
#[derive(Subcommand, Debug)]
enum Query {
    /// What breaks if FILE changes
    Impact { file: String },
    /// Files one import away from FILE
    Related { file: String },
    /// Where SYMBOL is defined or imported
    Usage { symbol: String },
    /// File counts, top dependencies, recent changes
    Summary,
    /// File-system routes under the routing root
    Routes,
    /// Component and page files with their importers
    Components,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "codectx=debug" } else { "codectx=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // 1. Load from file or default
    let mut config = ContextConfig::load_from_file().unwrap_or_default();

    // 2. Override with CLI args
    if let Some(root) = args.root {
        config.root = root;
    }
    if !args.include.is_empty() {
        config.include_patterns = args.include;
    }
    if !args.ignore.is_empty() {
        // CLI ignores ADD to config ignores
        config.ignore_patterns.extend(args.ignore);
    }
    config.validate()?;

    let format: OutputFormat = args.format.map(Into::into).unwrap_or_default();
    let engine = ContextEngine::new(config);

    match args.command {
        Command::Query(query) => {
            let ctx = engine.get_context()?;
            run_query(&ctx, query, format)
        }
        Command::Watch { debounce } => watch(&engine, format, Duration::from_millis(debounce)),
    }
}

fn run_query(ctx: &CodebaseContext, query: Query, format: OutputFormat) -> Result<()> {
    let skipped = ctx.skipped_files;
    match query {
        Query::Impact { file } => emit(format, &ctx.analyze_impact(&file), skipped),
        Query::Related { file } => emit(format, &ctx.related_files(&file), skipped),
        Query::Usage { symbol } => emit(format, &ctx.symbol_usage(&symbol), skipped),
        Query::Summary => emit(format, &ctx.summary(), skipped),
        Query::Routes => emit(format, &ctx.route_report(), skipped),
        Query::Components => emit(format, &ctx.component_report(), skipped),
    }
}

/// Print a report, flagging partial results when files were skipped.
fn emit(format: OutputFormat, report: &dyn Report, skipped: usize) -> Result<()> {
    let mut formatter = create_formatter(format);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    formatter.write_report(&mut out, report)?;
    if skipped > 0 {
        formatter.write_partial_notice(&mut out, skipped)?;
    }
    out.flush()?;
    Ok(())
}

fn watch(engine: &ContextEngine, format: OutputFormat, delay: Duration) -> Result<()> {
    let root = engine.config().root.clone();
    let watcher = FileWatcher::new(&root).context("Failed to start watch mode")?;
    let mut debouncer = Debouncer::new(delay);

    let ctx = engine.get_context()?;
    emit(format, &ctx.summary(), ctx.skipped_files)?;
    info!("Watching {:?} for changes", root);

    loop {
        let Some(event) = watcher.next_event(Duration::from_secs(1)) else {
            debouncer.cleanup();
            continue;
        };
        let Some(path) = event.path() else {
            warn!("Watch error: {:?}", event);
            continue;
        };
        if !is_source_change(path, &engine.config().extensions) || !debouncer.should_process(path) {
            continue;
        }

        info!("Change detected: {:?}", path);
        engine.invalidate();
        match engine.get_context() {
            Ok(ctx) => emit(format, &ctx.summary(), ctx.skipped_files)?,
            Err(e) => warn!("Rebuild failed: {}", e),
        }
    }
}
