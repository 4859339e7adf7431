//! Extract command - pull fields from a single contract or payslip.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use fratgen_core::extract::{ContractExtractor, FieldsExtractor, PayslipExtractor};
use fratgen_core::models::{ExtractedFields, FratgenConfig};
use fratgen_core::pdf::{PdfExtractor, PdfProcessor};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF, or plain text with --raw-text)
    #[arg(required = true)]
    input: PathBuf,

    /// Document kind
    #[arg(short, long, value_enum, default_value = "contract")]
    kind: DocumentKind,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Treat the input as already-recovered document text
    #[arg(long)]
    raw_text: bool,

    /// Dump the recovered text to stderr before extraction
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum DocumentKind {
    /// Employment contract
    Contract,
    /// Payslip
    Payslip,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let text = read_document_text(&args.input, args.raw_text, &config)?;
    if args.show_text {
        eprintln!("{}", text);
    }

    let fields = extract_fields(&text, args.kind, &config);

    if fields.is_empty() {
        eprintln!(
            "{} No fields recognized; the form must be filled in manually.",
            style("!").yellow()
        );
    }

    let output = format_fields(&fields, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

/// Recover document text from a PDF, or read it directly with --raw-text.
pub fn read_document_text(
    path: &PathBuf,
    raw_text: bool,
    config: &FratgenConfig,
) -> anyhow::Result<String> {
    if raw_text {
        return Ok(fs::read_to_string(path)?);
    }

    let data = fs::read(path)?;
    let extractor = PdfExtractor::from_bytes(&data)?;
    debug!("PDF has {} pages", extractor.page_count());

    if !extractor.has_text_layer(config.pdf.min_text_length) {
        warn!(
            "{} has little or no text layer; fields will likely be missing",
            path.display()
        );
    }

    Ok(extractor.extract_text()?)
}

/// Run the extractor matching the document kind.
pub fn extract_fields(text: &str, kind: DocumentKind, config: &FratgenConfig) -> ExtractedFields {
    match kind {
        DocumentKind::Contract => ContractExtractor::from_config(&config.extraction).extract(text),
        DocumentKind::Payslip => PayslipExtractor::from_config(&config.extraction).extract(text),
    }
}

pub fn format_fields(fields: &ExtractedFields, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(fields)?),
        OutputFormat::Csv => format_csv(fields),
        OutputFormat::Text => Ok(format_text(fields)),
    }
}

fn format_csv(fields: &ExtractedFields) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["field", "value"])?;
    for (key, value) in fields.iter() {
        wtr.write_record([key.as_str(), value])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(fields: &ExtractedFields) -> String {
    let mut output = String::new();
    for (key, value) in fields.iter() {
        output.push_str(&format!("{:<26} {}\n", format!("{}:", key), value));
    }
    output
}
