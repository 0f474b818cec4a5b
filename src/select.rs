//! Interactive selection and the detail view.
//!
//! Selection itself is deliberately dumb: given the ordered record list it
//! yields one chosen index, or a cancellation. `--pick` bypasses the prompt
//! for scripted use. An empty store is a reported condition, never a hang
//! or a panic.

use anyhow::{bail, Result};
use std::io::{BufRead, Write};

use crate::config::Config;
use crate::db;
use crate::enrich;
use crate::models::OrgRecord;
use crate::store;

/// Outcome of the selection prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Chosen(usize),
    Cancelled,
}

/// CLI entry point for `bdx show [--pick n]`.
pub async fn run_show(config: &Config, pick: Option<usize>) -> Result<()> {
    let pool = db::connect(config).await?;
    store::initialize(&pool).await?;
    let records = store::list_records(&pool).await?;
    pool.close().await;

    if records.is_empty() {
        bail!("no organizations stored — run `bdx ingest <batch>` first");
    }

    let index = match pick {
        Some(n) => {
            if n >= records.len() {
                bail!(
                    "--pick {} is out of range (store holds {} organizations, indices 0..{})",
                    n,
                    records.len(),
                    records.len() - 1
                );
            }
            n
        }
        None => {
            let stdin = std::io::stdin();
            match prompt_select(&records, &mut stdin.lock(), &mut std::io::stdout())? {
                Selection::Chosen(i) => i,
                Selection::Cancelled => {
                    println!("No selection made.");
                    return Ok(());
                }
            }
        }
    };

    let record = &records[index];
    print_detail(record);

    match enrich::fetch_contact_info(&config.enrichment, &record.website_url).await {
        Ok(info) => {
            if let Some(summary) = info.summary {
                println!("Summary:     {}", summary);
            }
            match info.email {
                Some(email) => println!("Contact:     {}", email),
                None => println!("Contact:     not found"),
            }
        }
        Err(e) => {
            eprintln!("warning: could not fetch contact info: {}", e);
            println!("Contact:     not found");
        }
    }

    Ok(())
}

fn print_detail(record: &OrgRecord) {
    println!("--- {} ---", record.name);
    println!("Website:     {}", record.website_url);
    println!("Location:    {}", record.location);
    println!("Batch:       {}", record.batch);
    if !record.tags.is_empty() {
        println!("Tags:        {}", record.tags.join(", "));
    }
    println!("Description: {}", record.description);
}

/// Numbered prompt over the record list. Empty line or EOF cancels.
fn prompt_select(
    records: &[OrgRecord],
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Selection> {
    for (i, record) in records.iter().enumerate() {
        writeln!(output, "{:>4}  {}", i, record.name)?;
    }
    write!(output, "Select an organization (0-{}): ", records.len() - 1)?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    let trimmed = line.trim();

    if read == 0 || trimmed.is_empty() {
        return Ok(Selection::Cancelled);
    }

    let index: usize = trimmed
        .parse()
        .map_err(|_| anyhow::anyhow!("'{}' is not a valid index", trimmed))?;
    if index >= records.len() {
        bail!(
            "index {} is out of range (0-{})",
            index,
            records.len() - 1
        );
    }

    Ok(Selection::Chosen(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> OrgRecord {
        OrgRecord {
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: String::new(),
            batch: String::new(),
            logo_url: String::new(),
            website_url: String::new(),
            tags: Vec::new(),
            location: String::new(),
        }
    }

    #[test]
    fn test_prompt_select_valid_index() {
        let records = vec![record("Acme"), record("Binder")];
        let mut input = std::io::Cursor::new("1\n");
        let mut output = Vec::new();
        let selection = prompt_select(&records, &mut input, &mut output).unwrap();
        assert_eq!(selection, Selection::Chosen(1));
    }

    #[test]
    fn test_prompt_select_empty_line_cancels() {
        let records = vec![record("Acme")];
        let mut input = std::io::Cursor::new("\n");
        let mut output = Vec::new();
        let selection = prompt_select(&records, &mut input, &mut output).unwrap();
        assert_eq!(selection, Selection::Cancelled);
    }

    #[test]
    fn test_prompt_select_eof_cancels() {
        let records = vec![record("Acme")];
        let mut input = std::io::Cursor::new("");
        let mut output = Vec::new();
        let selection = prompt_select(&records, &mut input, &mut output).unwrap();
        assert_eq!(selection, Selection::Cancelled);
    }

    #[test]
    fn test_prompt_select_out_of_range_errors() {
        let records = vec![record("Acme")];
        let mut input = std::io::Cursor::new("5\n");
        let mut output = Vec::new();
        let err = prompt_select(&records, &mut input, &mut output).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_prompt_select_non_numeric_errors() {
        let records = vec![record("Acme")];
        let mut input = std::io::Cursor::new("acme\n");
        let mut output = Vec::new();
        let err = prompt_select(&records, &mut input, &mut output).unwrap_err();
        assert!(err.to_string().contains("not a valid index"));
    }

    #[test]
    fn test_prompt_lists_every_record() {
        let records = vec![record("Acme"), record("Binder"), record("Copper")];
        let mut input = std::io::Cursor::new("0\n");
        let mut output = Vec::new();
        prompt_select(&records, &mut input, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Acme"));
        assert!(text.contains("Binder"));
        assert!(text.contains("Copper"));
    }
}
