//! Record commands - list and add records straight through the service
//!
//! Same validation and conflict rules as `POST /records`.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use roster_server::{Record, RecordDraft, RecordService};

use super::DatabaseArgs;

#[derive(Args, Debug)]
pub struct RecordsArgs {
    #[command(subcommand)]
    pub command: RecordsCommand,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

#[derive(Subcommand, Debug)]
pub enum RecordsCommand {
    /// List all records, newest first
    List {
        /// Print the records as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Add a record
    Add {
        /// Full name
        #[arg(long)]
        name: String,

        /// Unique external code (e.g. registration number)
        #[arg(long)]
        external_code: String,

        /// Category (e.g. department)
        #[arg(long)]
        category: String,

        /// Print the created record as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run_records(args: RecordsArgs) -> Result<()> {
    let service = RecordService::new(args.database.connect().await?);

    match args.command {
        RecordsCommand::List { json } => {
            let records = service.list().await.context("Failed to fetch records")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print!("{}", format_table(&records));
            }
        }
        RecordsCommand::Add {
            name,
            external_code,
            category,
            json,
        } => {
            let record = service
                .create(RecordDraft::new(name, external_code, category))
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("Created record #{} ({})", record.id, record.external_code);
            }
        }
    }

    Ok(())
}

fn format_table(records: &[Record]) -> String {
    if records.is_empty() {
        return "No records yet\n".to_string();
    }

    let name_width = column_width("Name", records.iter().map(|r| r.name.as_str()));
    let code_width = column_width("External code", records.iter().map(|r| r.external_code.as_str()));
    let category_width = column_width("Category", records.iter().map(|r| r.category.as_str()));

    let mut out = format!(
        "{:>4}  {:<name_width$}  {:<code_width$}  {:<category_width$}  Created\n",
        "No", "Name", "External code", "Category"
    );
    for (i, r) in records.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {:<name_width$}  {:<code_width$}  {:<category_width$}  {}\n",
            i + 1,
            r.name,
            r.external_code,
            r.category,
            r.created_at.format("%Y-%m-%d %H:%M"),
        ));
    }
    out
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or_default()
}
