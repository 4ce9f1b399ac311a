use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::report::export;
use crate::report::store::ExportStore;

#[derive(Args)]
pub struct ExportArgs {
    /// Previously produced flat export text file
    #[arg(required = true)]
    pub input: PathBuf,

    /// Species taxonomy id used in the stored filename
    #[arg(long, default_value = "9606")]
    pub taxid: String,

    /// Directory to store the named download file in
    #[arg(long, default_value = "downloads")]
    pub out_dir: PathBuf,
}

/// Execute export subcommand
///
/// Decodes the export text (validating it is round-trippable), then
/// persists it byte-for-byte under the download naming convention.
///
/// # Errors
///
/// Returns an error if the input cannot be read, fails validation, or the
/// store cannot write the file.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ExportArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let records = export::decode(&text).context("export text failed validation")?;

    if records.is_empty() {
        println!("Nothing to download.");
        return Ok(());
    }

    if verbose {
        eprintln!("Validated {} export rows", records.len());
    }

    let store = ExportStore::new(&args.out_dir);
    let path = store
        .save(&text, &args.taxid)
        .with_context(|| format!("failed to store export under {}", args.out_dir.display()))?;

    match format {
        OutputFormat::Text => {
            println!("Stored {} rows at {}", records.len(), path.display());
        }
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "path": path.display().to_string(),
                "rows": records.len(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Tsv => print!("{text}"),
    }

    Ok(())
}
