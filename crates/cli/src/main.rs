//! `dhtools` - operator CLI for the DataHub metadata tooling.
//!
//! Diagnostics go to stderr via tracing; everything a script would want to
//! capture (validation reports, converted instances) goes to stdout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use datahub_cedar::{validate_general_fields, validate_structure, ValidationRun};
use datahub_convert::{xml, AffiliationMap, Conversion, ConversionContext};
use datahub_pid::{migrate_urls, EpicClient, MigrationOptions};

#[derive(Parser)]
#[command(name = "dhtools")]
#[command(about = "DataHub operator tooling: schema validation, metadata conversion, PID maintenance", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a CEDAR schema against the DataHub rendering rules and general schema
    ValidateSchema {
        /// Path to the schema to validate (must be a '.json' file)
        file: PathBuf,
    },

    /// Convert a metadata XML document into a filled JSON-LD instance
    Convert {
        /// Source metadata XML document
        #[arg(long)]
        xml: PathBuf,

        /// Instance template to fill
        #[arg(long)]
        template: PathBuf,

        /// Collection context JSON (PID, creator, dates, contributors)
        #[arg(long)]
        context: PathBuf,

        /// Affiliation-string to JSON-LD block mapping; falls back to the
        /// path named in the context file
        #[arg(long)]
        affiliations: Option<PathBuf>,

        /// Write the instance here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Re-point registered handles from an old platform base URL to a new one
    MigratePids {
        /// CSV worklist of 'collection,pid' rows, no header
        #[arg(long)]
        input: PathBuf,

        /// Handle resolver endpoint
        #[arg(long, env = "EPIC_URL")]
        epic_url: String,

        /// Handle prefix the worklist rows must carry
        #[arg(long, env = "EPIC_PREFIX", default_value = "21.T12996")]
        prefix: String,

        /// Resolver username
        #[arg(long, env = "EPIC_USER")]
        user: String,

        /// Resolver password
        #[arg(long, env = "EPIC_PASS")]
        password: String,

        /// Only handles currently pointing at this base are rewritten
        #[arg(long)]
        expected_old_url: String,

        /// Base URL supplying the new scheme and host
        #[arg(long)]
        new_base_url: String,

        /// Resolve and record, but push nothing to the resolver
        #[arg(long)]
        dry_run: bool,
    },

    /// Rename an element tag throughout a metadata XML file
    MigrateXml {
        /// Input XML file
        #[arg(long)]
        input: PathBuf,

        /// Output XML file
        #[arg(long)]
        output: PathBuf,

        /// Tag to rename
        #[arg(long, default_value = "organ")]
        from_tag: String,

        /// New tag name
        #[arg(long, default_value = "tissue")]
        to_tag: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs to stderr, keeping stdout clean for data
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ValidateSchema { file } => run_validate_schema(&file),
        Commands::Convert { xml, template, context, affiliations, output } => {
            run_convert(&xml, &template, &context, affiliations.as_deref(), output.as_deref())
        }
        Commands::MigratePids {
            input,
            epic_url,
            prefix,
            user,
            password,
            expected_old_url,
            new_base_url,
            dry_run,
        } => {
            let client = EpicClient::new(epic_url, prefix, user, password);
            let options = MigrationOptions { input, expected_old_url, new_base_url, dry_run };
            run_migrate_pids(&client, &options).await
        }
        Commands::MigrateXml { input, output, from_tag, to_tag } => {
            run_migrate_xml(&input, &output, &from_tag, &to_tag)
        }
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))
}

fn run_validate_schema(file: &Path) -> Result<()> {
    if file.extension().and_then(|ext| ext.to_str()) != Some("json") {
        bail!("Invalid file path provided. Should be a '.json' file");
    }
    let raw = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let schema: Value = serde_json::from_str(&raw)
        .context("encountered an error while parsing the schema as JSON")?;

    let separator = "-".repeat(65);
    let mut run = ValidationRun::new();

    println!("Starting basic validation of '{}'", file.display());
    validate_structure(&schema, &mut run)?;
    for finding in run.findings() {
        println!("{finding}");
    }
    let structural = run.findings().len();

    println!("{separator}");
    println!("Starting general schema validation of '{}'", file.display());
    validate_general_fields(&schema, &mut run);
    for finding in &run.findings()[structural..] {
        println!("{finding}");
    }

    println!("{separator}");
    if run.is_ok() {
        if run.warning_count() > 0 {
            println!("Validation result: OK with warnings. No errors found.");
        } else {
            println!("Validation result: OK. No errors found.");
        }
        println!("\t {} warning(s) encountered", run.warning_count());
    } else {
        println!("Validation result: NOT OK - errors found");
        println!("\t {} error(s) encountered", run.error_count());
        println!("\t {} warning(s) encountered", run.warning_count());
        std::process::exit(1);
    }
    Ok(())
}

fn run_convert(
    xml_path: &Path,
    template_path: &Path,
    context_path: &Path,
    affiliations_path: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let xml_raw = fs::read_to_string(xml_path)
        .with_context(|| format!("failed to read {}", xml_path.display()))?;
    let document = roxmltree::Document::parse(&xml_raw)
        .with_context(|| format!("{} is not well-formed XML", xml_path.display()))?;

    let mut template = read_json(template_path)?;
    let context: ConversionContext = serde_json::from_value(read_json(context_path)?)
        .context("context file does not match the expected layout")?;

    let affiliations = match affiliations_path.or(context.affiliation_mapping_file.as_deref()) {
        Some(path) => serde_json::from_value(read_json(path)?)
            .context("affiliation mapping is not a flat JSON object")?,
        None => AffiliationMap::default(),
    };

    Conversion::new(document.root_element(), &context, &affiliations)
        .fill(&mut template)
        .context("conversion failed")?;

    // Non-ASCII is written through unescaped.
    let rendered = serde_json::to_string_pretty(&template)?;
    match output {
        Some(path) => fs::write(path, rendered + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}

async fn run_migrate_pids(client: &EpicClient, options: &MigrationOptions) -> Result<()> {
    let outcome = migrate_urls(client, options).await?;
    println!(
        "Processed {} handle(s): {} updated, {} skipped, {} failed",
        outcome.processed, outcome.updated, outcome.skipped, outcome.failed
    );
    if outcome.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn run_migrate_xml(input: &Path, output: &Path, from_tag: &str, to_tag: &str) -> Result<()> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let rewritten = xml::rename_tag(&raw, from_tag, to_tag)
        .with_context(|| format!("failed to rewrite {}", input.display()))?;
    fs::write(output, rewritten)
        .with_context(|| format!("failed to write {}", output.display()))?;
    tracing::info!(from = from_tag, to = to_tag, output = %output.display(), "tag migration written");
    Ok(())
}
