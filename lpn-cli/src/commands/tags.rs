//! `lpn tags` command - lists the image tags published on Docker Hub.

use anyhow::{Context, Result};
use clap::Args;
use lpn_core::liferay::Portal;
use serde::Deserialize;
use tabled::{settings::Style, Table, Tabled};

use super::Variant;

#[derive(Args)]
pub struct TagsArgs {
    /// Portal flavor whose repository is queried
    pub variant: Variant,

    /// Number of tags to retrieve per page
    #[arg(short, long, default_value_t = 25)]
    pub size: u32,

    /// Page of tags to retrieve
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,
}

#[derive(Deserialize)]
struct TagsResponse {
    count: u64,
    results: Vec<TagResult>,
}

#[derive(Deserialize)]
struct TagResult {
    name: String,
    full_size: Option<u64>,
    last_updated: Option<String>,
}

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "TAG")]
    name: String,
    #[tabled(rename = "SIZE")]
    size: String,
    #[tabled(rename = "LAST UPDATED")]
    last_updated: String,
}

pub async fn tags(args: TagsArgs) -> Result<()> {
    let portal: Portal = args.variant.into();
    let repository = portal.tags_repository();

    let url = format!(
        "https://hub.docker.com/v2/repositories/{repository}/tags/?page_size={}&page={}",
        args.size, args.page
    );

    let response = reqwest::get(&url)
        .await
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("Could not list the tags for [{repository}]"))?
        .json::<TagsResponse>()
        .await
        .context("Unexpected response from Docker Hub")?;

    if response.results.is_empty() {
        println!("No tags found for [{repository}]");
        return Ok(());
    }

    let rows: Vec<TagRow> = response
        .results
        .iter()
        .map(|tag| TagRow {
            name: tag.name.clone(),
            size: tag
                .full_size
                .map(|bytes| format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0))
                .unwrap_or_else(|| "-".to_string()),
            last_updated: tag.last_updated.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{table}");

    let pages = ((response.count as f64) / (args.size as f64)).ceil().max(1.0) as u64;
    println!(
        "Page {} of {} ({} tags in total)",
        args.page, pages, response.count
    );

    Ok(())
}
