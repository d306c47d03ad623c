//! Enrich command - look up details for identifiers listed in a file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use tracing::{info, warn};

use hubscope_core::{ModelId, ModelRecord};
use hubscope_providers::huggingface::{HubApiClient, ModelEnricher};

use crate::output::JsonFormatter;
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the enrich command.
#[derive(Args)]
pub struct EnrichArgs {
    /// File with one model identifier per line.
    #[arg(long, short)]
    pub input: PathBuf,

    /// CSV file to write.
    #[arg(long, short, default_value = "models.csv")]
    pub output: PathBuf,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 20)]
    pub timeout: u64,
}

/// Runs the enrich command.
pub async fn run(args: &EnrichArgs, cli: &Cli) -> Result<()> {
    let ids = read_identifiers(&args.input)?;
    if ids.is_empty() {
        anyhow::bail!("No identifiers found in {}", args.input.display());
    }

    info!(count = ids.len(), "Enriching identifiers from file");

    let ctx = super::fetch_context("auto", args.timeout)?;
    let enricher = ModelEnricher::new(HubApiClient::new(Arc::clone(&ctx.http)));
    let records = enricher.enrich(&ids).await;

    if records.is_empty() {
        // Nothing succeeded, so no file is written at all.
        warn!("No models could be enriched; skipping CSV output");
        if !cli.quiet {
            eprintln!("No models could be enriched");
        }
        std::process::exit(ExitCode::NoData as i32);
    }

    write_csv(&args.output, &records)?;

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                println!(
                    "Wrote {} of {} models to {}",
                    records.len(),
                    ids.len(),
                    args.output.display()
                );
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let summary = serde_json::json!({
                "requested": ids.len(),
                "written": records.len(),
                "output": args.output.display().to_string(),
            });
            println!("{}", formatter.format(&summary)?);
        }
    }

    Ok(())
}

/// Reads identifiers from a text file, one per line.
///
/// Blank lines are skipped; everything else is taken as-is. Malformed
/// identifiers simply fail their detail lookup later.
fn read_identifiers(path: &Path) -> Result<Vec<ModelId>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => anyhow::bail!("Cannot read {}: {}", path.display(), e),
    };

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ModelId::new)
        .collect())
}

/// Writes enriched records to a CSV file.
fn write_csv(path: &Path, records: &[ModelRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record([
        "model_id",
        "likes",
        "downloads",
        "license",
        "created_at",
        "last_modified",
    ])?;

    for record in records {
        writer.write_record([
            record.model_id.as_str(),
            &record.likes.to_string(),
            &record.downloads.to_string(),
            record.license.as_deref().unwrap_or(""),
            &format_date(record.created_date()),
            &format_date(record.modified_date()),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hubscope_core::RecordStatus;

    fn record(id: &str, likes: u64, created: Option<&str>) -> ModelRecord {
        ModelRecord {
            model_id: ModelId::new(id),
            likes,
            downloads: likes * 10,
            tags: Vec::new(),
            pipeline_tag: None,
            license: Some("mit".to_string()),
            created_at: created.map(String::from),
            last_modified: None,
            status: RecordStatus::Success,
            error: None,
        }
    }

    #[test]
    fn test_read_identifiers_skips_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        std::fs::write(&path, "org/a\n\n  org/b  \n\t\norg/c\n").unwrap();

        let ids = read_identifiers(&path).unwrap();
        let names: Vec<&str> = ids.iter().map(ModelId::as_str).collect();
        assert_eq!(names, vec!["org/a", "org/b", "org/c"]);
    }

    #[test]
    fn test_read_identifiers_missing_file() {
        let err = read_identifiers(&PathBuf::from("/nonexistent/ids.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ids.txt"));
    }

    #[test]
    fn test_write_csv_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![
            record("org/a", 5, Some("2024-01-15T10:00:00.000Z")),
            record("org/b", 2, None),
        ];

        write_csv(&path, &records).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines[0],
            "model_id,likes,downloads,license,created_at,last_modified"
        );
        assert_eq!(lines[1], "org/a,5,50,mit,2024-01-15,");
        assert_eq!(lines[2], "org/b,2,20,mit,,");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(None), "");
        let dt = DateTime::parse_from_rfc3339("2023-06-01T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_date(Some(dt)), "2023-06-01");
    }
}
