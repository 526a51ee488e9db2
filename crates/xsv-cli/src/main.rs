//! XSV CLI
//!
//! Command-line tool for inspecting, converting and grouping CSV/TSV tables.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use xsv_core::{compose, DirectorySource, Dialect, Reader, ReaderOptions};

#[derive(Parser)]
#[command(name = "xsv-cli")]
#[command(about = "CSV/TSV table utility", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and display a table file
    Parse {
        /// Path to the table file
        #[arg(short, long)]
        file: PathBuf,

        /// Dialect (csv or tsv), inferred from the extension if omitted
        #[arg(short, long)]
        dialect: Option<Dialect>,

        /// Treat the first row as a header
        #[arg(long)]
        header: bool,

        /// Maximum number of rows to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Re-write a table in another dialect
    Convert {
        /// Input table file
        #[arg(short, long)]
        input: PathBuf,

        /// Output table file
        #[arg(short, long)]
        output: PathBuf,

        /// Input dialect, inferred from the extension if omitted
        #[arg(long)]
        from: Option<Dialect>,

        /// Output dialect, inferred from the extension if omitted
        #[arg(long)]
        to: Option<Dialect>,
    },

    /// Dump a table as JSON rows, or as objects when it has a header
    Json {
        /// Path to the table file
        #[arg(short, long)]
        file: PathBuf,

        /// Dialect (csv or tsv), inferred from the extension if omitted
        #[arg(short, long)]
        dialect: Option<Dialect>,

        /// Treat the first row as a header
        #[arg(long)]
        header: bool,
    },

    /// Show one row per distinct first-column value
    Group {
        /// Path to the table file
        #[arg(short, long)]
        file: PathBuf,

        /// Dialect (csv or tsv), inferred from the extension if omitted
        #[arg(short, long)]
        dialect: Option<Dialect>,

        /// Treat the first row as a header
        #[arg(long)]
        header: bool,

        /// Keep the last row of each group instead of the first
        #[arg(long)]
        last: bool,
    },

    /// List table assets below a directory
    Scan {
        /// Root directory to scan
        #[arg(short, long)]
        root: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> xsv_core::Result<()> {
    match command {
        Commands::Parse {
            file,
            dialect,
            header,
            limit,
        } => cmd_parse(&file, dialect, header, limit),
        Commands::Convert {
            input,
            output,
            from,
            to,
        } => cmd_convert(&input, &output, from, to),
        Commands::Json {
            file,
            dialect,
            header,
        } => cmd_json(&file, dialect, header),
        Commands::Group {
            file,
            dialect,
            header,
            last,
        } => cmd_group(&file, dialect, header, last),
        Commands::Scan { root } => cmd_scan(&root),
    }
}

/// Explicit dialect, else the file extension, else comma
fn resolve_dialect(path: &Path, explicit: Option<Dialect>) -> Dialect {
    let dialect = explicit
        .or_else(|| Dialect::from_path(path))
        .unwrap_or_default();
    debug!(path = %path.display(), %dialect, "resolved dialect");
    dialect
}

fn read_table(path: &Path, options: ReaderOptions) -> xsv_core::Result<Reader<'static>> {
    let text = fs::read_to_string(path).map_err(|e| xsv_core::Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Reader::new(options, text))
}

fn cmd_parse(
    file: &Path,
    dialect: Option<Dialect>,
    header: bool,
    limit: Option<usize>,
) -> xsv_core::Result<()> {
    let dialect = resolve_dialect(file, dialect);
    let reader = read_table(file, ReaderOptions::new(dialect).with_header(header))?;
    let rows = reader.string_rows().unwrap_or_default();

    println!("File: {}", file.display());
    println!("Dialect: {}", dialect);
    println!("Rows: {}", rows.len());
    println!();

    if header {
        if let Some(text) = reader.text() {
            if let Some(names) = xsv_core::parse(dialect, text).into_iter().next() {
                println!("{}", names.join("\t"));
                println!("{}", "-".repeat(names.len() * 12));
            }
        }
    }

    let row_limit = limit.unwrap_or(rows.len());
    for row in rows.iter().take(row_limit) {
        let values: Vec<String> = row.iter().map(|f| f.escape_debug().to_string()).collect();
        println!("{}", values.join("\t"));
    }

    if rows.len() > row_limit {
        println!("... ({} more rows)", rows.len() - row_limit);
    }

    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: &Path,
    from: Option<Dialect>,
    to: Option<Dialect>,
) -> xsv_core::Result<()> {
    let from = resolve_dialect(input, from);
    let to = resolve_dialect(output, to);

    let reader = read_table(input, ReaderOptions::new(from).with_header(false))?;
    let rows = reader.string_rows().unwrap_or_default();

    fs::write(output, compose(to, &rows))?;
    info!(rows = rows.len(), %from, %to, "converted table");
    println!(
        "Converted {} rows ({} -> {}) to {}",
        rows.len(),
        from,
        to,
        output.display()
    );

    Ok(())
}

fn cmd_json(file: &Path, dialect: Option<Dialect>, header: bool) -> xsv_core::Result<()> {
    let dialect = resolve_dialect(file, dialect);
    let reader = read_table(file, ReaderOptions::new(dialect).with_header(header))?;
    let text = reader.text().unwrap_or_default();

    let json = if header {
        serde_json::to_string_pretty(&xsv_core::parse_with_header(dialect, text))?
    } else {
        serde_json::to_string_pretty(&xsv_core::parse(dialect, text))?
    };
    println!("{}", json);

    Ok(())
}

fn cmd_group(
    file: &Path,
    dialect: Option<Dialect>,
    header: bool,
    last: bool,
) -> xsv_core::Result<()> {
    let dialect = resolve_dialect(file, dialect);
    let options = ReaderOptions::new(dialect)
        .with_header(header)
        .use_first(!last);
    let reader = read_table(file, options)?;

    let groups = reader.grouped_string_rows().unwrap_or_default();
    let picked = reader.string_maps().unwrap_or_default();

    println!("Groups: {}", groups.len());
    println!();
    for (group, mapping) in groups.iter().zip(&picked) {
        let key = group
            .first()
            .and_then(|row| row.first())
            .map(String::as_str)
            .unwrap_or_default();
        let values: Vec<String> = mapping
            .iter()
            .map(|(name, value)| format!("{}={}", name, value.escape_debug()))
            .collect();
        println!("{} ({} rows): {}", key, group.len(), values.join(", "));
    }

    Ok(())
}

fn cmd_scan(root: &Path) -> xsv_core::Result<()> {
    let source = DirectorySource::new(root);
    let names = source.scan()?;

    println!("Scanned {}:", source.root().display());
    for name in &names {
        let dialect = Dialect::from_path(name)
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!("  {} [{}]", name, dialect);
    }
    println!();
    println!("Found {} table assets", names.len());

    Ok(())
}
