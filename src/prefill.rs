//! Query-string prefill and share links.
//!
//! Supported parameters:
//! `area=Malad%20West`, `locality=Mindspace`, `bhk=1|2`, `min=40`, `max=60`
//! (thousands, clamped to 10..=300), `furnishing=F|S|U`,
//! `moveIn=Immediate|7|15|30+`, `profile=Family|Bachelor|Company`,
//! `notes=...`, `openForm=1`, `scroll=1`.

use crate::models::{Area, Bhk, DraftPatch, RentalPreferenceDraft};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Bounds for budget values accepted from a URL, in thousands
pub const MIN_BUDGET_K: f64 = 10.0;
pub const MAX_BUDGET_K: f64 = 300.0;

#[derive(Debug, Error)]
pub enum PrefillError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Patch read from a landing URL, plus the UI flags that came with it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prefill {
    pub patch: DraftPatch,
    pub auto_open: bool,
    pub auto_scroll: bool,
}

fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lenient area match: case and `-`/`_` separators don't matter, extra
/// trailing words are ignored ("malad-west-mumbai").
pub fn parse_area(value: &str) -> Option<Area> {
    let n = normalize(value);
    let head: Vec<&str> = n.split(' ').take(2).collect();
    let head = head.join(" ");
    Area::ALL
        .into_iter()
        .find(|a| a.as_str().to_lowercase() == head)
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

/// Links only carry 1 and 2 BHK; larger homes go through the form
fn url_bhk(bhk: Bhk) -> Option<Bhk> {
    matches!(bhk, Bhk::One | Bhk::Two).then_some(bhk)
}

fn clamp_budget_k(k: u32) -> u32 {
    k.clamp(MIN_BUDGET_K as u32, MAX_BUDGET_K as u32)
}

fn parse_budget_k(value: &str) -> Option<u32> {
    let n: f64 = value.trim().parse().ok()?;
    if !n.is_finite() {
        return None;
    }
    Some(n.clamp(MIN_BUDGET_K, MAX_BUDGET_K).round() as u32)
}

/// Read a draft patch from a landing URL. Unknown or malformed parameters
/// are skipped; only an unparseable URL is an error.
pub fn parse_prefill(url: &str) -> Result<Prefill, PrefillError> {
    let url = Url::parse(url)?;

    // first occurrence wins
    let mut params: HashMap<String, String> = HashMap::new();
    for (key, value) in url.query_pairs() {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }

    let mut patch = DraftPatch::default();

    if let Some(raw) = param(&params, "area") {
        patch.area = parse_area(raw);
        if patch.area.is_none() {
            warn!(area = raw, "ignoring unknown area in url");
        }
    }
    patch.locality = param(&params, "locality").map(str::to_string);
    patch.bhk = param(&params, "bhk")
        .and_then(|v| v.trim().parse::<Bhk>().ok())
        .and_then(url_bhk);
    patch.furnishing = param(&params, "furnishing").and_then(|v| v.trim().parse().ok());
    patch.move_in = param(&params, "moveIn").and_then(|v| v.trim().parse().ok());
    patch.profile = param(&params, "profile").and_then(|v| v.trim().parse().ok());
    patch.budget_min_k = param(&params, "min").and_then(parse_budget_k);
    patch.budget_max_k = param(&params, "max").and_then(parse_budget_k);
    patch.notes = param(&params, "notes").map(str::to_string);

    let auto_open = param(&params, "openForm") == Some("1");
    let auto_scroll = param(&params, "scroll") == Some("1") || auto_open;

    debug!(?patch, auto_open, auto_scroll, "parsed url prefill");

    Ok(Prefill {
        patch,
        auto_open,
        auto_scroll,
    })
}

/// Build a link that reopens the form with the draft's set fields.
///
/// Only meaningful values are written, restricted to what [`parse_prefill`]
/// accepts: BHK beyond 2 is left out and budgets are clamped to
/// 10..=300. The form is always deep-opened.
pub fn build_share_link(
    base_url: &str,
    path: &str,
    draft: &RentalPreferenceDraft,
) -> Result<String, PrefillError> {
    let mut url = Url::parse(base_url)?;
    url.set_path(path);
    url.set_query(None);

    {
        let mut q = url.query_pairs_mut();
        if let Some(area) = draft.area {
            q.append_pair("area", area.as_str());
        }
        if let Some(locality) = draft.locality_trimmed() {
            q.append_pair("locality", locality);
        }
        if let Some(bhk) = draft.bhk.and_then(url_bhk) {
            q.append_pair("bhk", bhk.as_str());
        }
        if let Some(min) = draft.budget_min_k {
            q.append_pair("min", &clamp_budget_k(min).to_string());
        }
        if let Some(max) = draft.budget_max_k {
            q.append_pair("max", &clamp_budget_k(max).to_string());
        }
        if let Some(furnishing) = draft.furnishing {
            q.append_pair("furnishing", furnishing.code());
        }
        if let Some(move_in) = draft.move_in {
            q.append_pair("moveIn", move_in.code());
        }
        if let Some(profile) = draft.profile {
            q.append_pair("profile", profile.as_str());
        }
        q.append_pair("openForm", "1");
    }

    Ok(url.to_string())
}
