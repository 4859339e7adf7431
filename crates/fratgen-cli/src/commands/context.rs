//! Context command - assemble the flat mapping a template renderer
//! consumes.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use fratgen_core::context::{ContextBuilder, FormValues};
use fratgen_core::models::ExtractedFields;

use super::extract::{extract_fields, read_document_text, DocumentKind};

/// Arguments for the context command.
#[derive(Args)]
pub struct ContextArgs {
    /// Employment contract PDF
    #[arg(long)]
    contract: Option<PathBuf>,

    /// Payslip PDF
    #[arg(long)]
    payslip: Option<PathBuf>,

    /// JSON file with user-edited form values
    #[arg(long)]
    form: Option<PathBuf>,

    /// Keys whose form value overrides the extracted value (repeatable)
    #[arg(long = "force", value_name = "KEY")]
    force: Vec<String>,

    /// Build the termination-memo context instead of the severance one
    #[arg(long)]
    memo: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ContextArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let contract = match &args.contract {
        Some(path) => {
            let text = read_document_text(path, false, &config)?;
            let fields = extract_fields(&text, DocumentKind::Contract, &config);
            info!("contract: {} fields from {}", fields.len(), path.display());
            fields
        }
        None => ExtractedFields::new(),
    };

    let payslip = match &args.payslip {
        Some(path) => {
            let text = read_document_text(path, false, &config)?;
            let fields = extract_fields(&text, DocumentKind::Payslip, &config);
            info!("payslip: {} fields from {}", fields.len(), path.display());
            fields
        }
        None => ExtractedFields::new(),
    };

    let form: FormValues = match &args.form {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => FormValues::new(),
    };

    let mut builder = ContextBuilder::new(&contract, &payslip, &form);
    for key in &args.force {
        builder = builder.force_form_value(key);
    }

    let ctx = if args.memo {
        builder.build_memo_context()
    } else {
        builder.build_severance_context()
    };

    let output = serde_json::to_string_pretty(&ctx)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Context written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
