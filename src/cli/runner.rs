//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, CursorCommand};
use crate::cursor;
use crate::error::{Result, ResultExt};
use crate::http::{FeedClient, FeedClientConfig};
use crate::reading::transform_records;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Serve(config) => crate::cli::serve(config.clone()).await,
            Commands::Crawl {
                url,
                api_key,
                api_key_header,
                max_pages,
                output,
                transform,
            } => {
                self.crawl(
                    url,
                    api_key.as_deref(),
                    api_key_header,
                    *max_pages,
                    output.as_deref(),
                    *transform,
                )
                .await
            }
            Commands::Cursor { command } => {
                let line = cursor_command(command)?;
                println!("{line}");
                Ok(())
            }
        }
    }

    /// Walk a remote feed and write every record as one JSON line
    async fn crawl(
        &self,
        url: &str,
        api_key: Option<&str>,
        api_key_header: &str,
        max_pages: u32,
        output: Option<&Path>,
        transform: bool,
    ) -> Result<()> {
        let mut builder = FeedClientConfig::builder()
            .url(url)
            .api_key_header(api_key_header);
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        let client = FeedClient::new(builder.build())?;

        let started = Instant::now();
        let result = client.fetch_all(max_pages).await?;

        if transform {
            let readings = transform_records(&result.records)?;
            let alerts = readings
                .iter()
                .filter(|r| r.temperature_alert || r.humidity_alert)
                .count();
            info!(alerts, "Transformed {} readings", readings.len());
            write_output(output, &readings)?;
        } else {
            write_output(output, &result.records)?;
        }

        info!(
            pages = result.pages,
            records = result.records.len(),
            complete = result.complete,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Crawl finished"
        );

        if self.cli.verbose && !result.complete {
            eprintln!("Stopped at page limit ({max_pages}); more pages remain");
        }

        Ok(())
    }
}

/// Output line for a cursor subcommand
pub(crate) fn cursor_command(command: &CursorCommand) -> Result<String> {
    match command {
        CursorCommand::Encode { offset } => Ok(cursor::encode(*offset)),
        CursorCommand::Decode { cursor: token } => Ok(cursor::decode(token)?.to_string()),
    }
}

/// Write to `output`, or stdout when no path is given
fn write_output<T: Serialize>(output: Option<&Path>, records: &[T]) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_json_lines(BufWriter::new(file), records)?;
            info!("Wrote {} records to {}", records.len(), path.display());
            Ok(())
        }
        None => write_json_lines(io::stdout().lock(), records),
    }
}

fn write_json_lines<W: Write, T: Serialize>(mut out: W, records: &[T]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
