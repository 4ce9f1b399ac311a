use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::probe::Probe;
use crate::parsing::{self, DocumentFormat};
use crate::report::store::ExportStore;
use crate::report::{export, table};
use crate::screening::{FilterMode, ScreenConfig, ScreeningEngine};

/// Default percent-identity threshold when no stringency option is given
const DEFAULT_MIN_IDENTITY: f64 = 80.0;

#[derive(Args)]
pub struct ScreenArgs {
    /// Alignment results file (tabular or XML, optionally gzipped).
    /// Use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Probe sequence the results were generated from (A, C, G, T, N)
    #[arg(short, long, required = true)]
    pub probe: String,

    /// Input format (auto-detected by default)
    #[arg(long, value_enum, default_value = "auto")]
    pub input_format: InputFormat,

    /// Keep hits at or above this percent identity (0-100)
    #[arg(long, conflicts_with = "max_mismatch")]
    pub min_identity: Option<f64>,

    /// Keep forward-strand hits with at most this many mismatches
    #[arg(long)]
    pub max_mismatch: Option<u64>,

    /// Species taxonomy id recorded in export names
    /// (passed through, never interpreted)
    #[arg(long, default_value = "9606")]
    pub taxid: String,

    /// Write the flat export text into this directory after screening
    #[arg(long)]
    pub save_export: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum InputFormat {
    Auto,
    Tabular,
    Xml,
}

impl InputFormat {
    fn resolve(self) -> Option<DocumentFormat> {
        match self {
            Self::Auto => None,
            Self::Tabular => Some(DocumentFormat::Tabular),
            Self::Xml => Some(DocumentFormat::Xml),
        }
    }
}

/// Execute screen subcommand
///
/// # Errors
///
/// Returns an error if the probe is invalid, the stringency configuration
/// is out of range, or the input document cannot be recognized.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ScreenArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // Probe validation happens before anything touches the document
    let probe = Probe::parse(&args.probe)?;

    let mode = resolve_mode(&args)?;
    mode.validate().map_err(|reason| anyhow::anyhow!(reason))?;

    let doc = read_input(&args)?;

    if verbose {
        eprintln!(
            "Parsed {} of {} alignment records ({} bases probed)",
            doc.hits.len(),
            doc.total_records,
            probe.len(),
        );
    }

    let engine = ScreeningEngine::new(ScreenConfig::new(mode, args.taxid.clone()));
    let report = engine.screen(doc, &probe);

    if verbose {
        eprintln!("{} rows after filtering", report.rows.len());
    }

    match format {
        OutputFormat::Text => print!("{}", table::render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.rows)?),
        OutputFormat::Tsv => print!("{}", export::encode(&report.rows)),
    }

    if let Some(dir) = &args.save_export {
        let text = export::encode(&report.rows);
        if text.is_empty() {
            eprintln!("Nothing to export.");
        } else {
            let store = ExportStore::new(dir);
            let path = store
                .save(&text, &engine.config().species_taxid)
                .with_context(|| format!("failed to store export under {}", dir.display()))?;
            eprintln!("Export written to {}", path.display());
        }
    }

    Ok(())
}

/// Exactly one stringency option applies per run; with neither given, the
/// percent-identity default is used.
fn resolve_mode(args: &ScreenArgs) -> anyhow::Result<FilterMode> {
    match (args.min_identity, args.max_mismatch) {
        (Some(min_pct), None) => Ok(FilterMode::PercentIdentity { min_pct }),
        (None, Some(max)) => Ok(FilterMode::MaxMismatch { max }),
        (None, None) => Ok(FilterMode::PercentIdentity {
            min_pct: DEFAULT_MIN_IDENTITY,
        }),
        // clap's conflicts_with already rejects this; keep the guard
        (Some(_), Some(_)) => anyhow::bail!(
            "--min-identity and --max-mismatch are mutually exclusive"
        ),
    }
}

fn read_input(args: &ScreenArgs) -> anyhow::Result<parsing::ParsedDocument> {
    use std::io::Read;

    let format = args.input_format.resolve();

    if args.input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(parsing::parse_text(&buffer, format)?);
    }

    parsing::parse_file(&args.input, format)
        .with_context(|| format!("failed to parse {}", args.input.display()))
}
