//! Terminal front-ends for the release flow.

use std::io::Write;

use anyhow::{Context, Result};
use log::debug;
use tokio_util::sync::CancellationToken;

use crate::config::Settings;
use crate::release::{
    DownloadResolver, HttpReleaseRepository, ReleaseRepository, VersionSelection,
};
use crate::server;

/// Runs the HTTP service until Ctrl-C.
pub async fn serve(settings: &Settings) -> Result<()> {
    let shutdown = CancellationToken::new();
    server::cancel_on_ctrl_c(shutdown.clone());
    server::serve(settings, shutdown).await
}

/// Prints the downloadable releases straight from the upstream API.
pub async fn releases(settings: &Settings) -> Result<()> {
    let repository =
        HttpReleaseRepository::new(settings.http_client()?, settings.upstream_listing_url());
    debug!("Listing releases from {}", repository.listing_url());

    let collection = repository.fetch_releases().await?;
    let selection = VersionSelection::new(collection);

    let mut stdout = std::io::stdout().lock();
    print_releases(&mut stdout, &selection)
}

/// Prints the download URL for `version` (a tag or `latest`).
pub fn resolve(settings: &Settings, version: &str) -> Result<()> {
    let resolver = DownloadResolver::new(settings.upstream_base_url());
    let target = resolver
        .resolve(Some(version))
        .with_context(|| format!("Unable to resolve version {:?}", version))?;

    println!("{}", target.download_url);
    Ok(())
}

pub(crate) fn print_releases(out: &mut impl Write, selection: &VersionSelection) -> Result<()> {
    if selection.releases().is_empty() {
        writeln!(out, "No versions available.")?;
        return Ok(());
    }

    for release in selection.releases() {
        let details = selection.details(release);
        let marker = if details.is_latest { "*" } else { " " };
        writeln!(
            out,
            "{} {:<12} {:<24} {:<14} {:>9} {:>8} downloads",
            marker,
            details.tag_name,
            details.display_name,
            details.published,
            details.size.unwrap_or_default(),
            details.download_count.unwrap_or_default(),
        )?;
    }

    if let Some(url) = selection.latest().and_then(|r| r.download_url()) {
        writeln!(out)?;
        writeln!(out, "Latest: {}", url)?;
    }

    Ok(())
}
