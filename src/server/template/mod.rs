use anyhow::Result;
use handlebars::Handlebars;
use serde::Serialize;

use crate::release::{ReleaseDetails, VersionSelection};

pub const LANDING_TEMPLATE: &str = "landing";

pub fn handlebars() -> Result<Handlebars<'static>> {
    let mut hb = Handlebars::new();

    let landing = include_str!("./landing.hbs");
    hb.register_template_string(LANDING_TEMPLATE, landing)?;

    Ok(hb)
}

/// Everything the landing template renders.
#[derive(Debug, Serialize)]
pub struct LandingPage {
    /// URL of the hero "Download APK" button
    pub hero_download_url: Option<String>,
    pub releases: Vec<ReleaseDetails>,
    pub current: Option<ReleaseDetails>,
    pub has_releases: bool,
    pub fetch_failed: bool,
}

impl LandingPage {
    pub fn new(selection: &VersionSelection, hero_download_url: Option<String>) -> Self {
        let releases: Vec<ReleaseDetails> = selection
            .releases()
            .iter()
            .map(|release| selection.details(release))
            .collect();

        Self {
            hero_download_url,
            current: selection.current().map(|release| selection.details(release)),
            has_releases: !releases.is_empty(),
            fetch_failed: selection.fetch_failed(),
            releases,
        }
    }
}
