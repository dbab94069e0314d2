use crate::fetch::FragmentSource;
use crate::models::{PageEvent, PageHandles};
use crate::page::Page;
use crate::state::PageState;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    BuildingList,
    ChartList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Load {
    pub target: String,
    pub url: String,
}

impl Refresh {
    /// `None` when the target control is not on the page.
    pub fn plan(self, page: &Page, handles: &PageHandles) -> Option<Load> {
        let target = match self {
            Refresh::BuildingList => &handles.building,
            Refresh::ChartList => &handles.chart,
        };
        if page.select(target).is_none() {
            warn!(control = %target, "refresh target missing from page, skipping");
            return None;
        }

        let base_url = page.text(&handles.base_url).unwrap_or_default();
        let group = page.value(&handles.group).unwrap_or_default();
        let url = match self {
            Refresh::BuildingList => bldg_list_url(base_url, group),
            Refresh::ChartList => {
                let building = page.value(&handles.building).unwrap_or_default();
                chart_list_url(base_url, group, building)
            }
        };

        Some(Load {
            target: target.clone(),
            url,
        })
    }
}

pub fn bldg_list_url(base_url: &str, group: &str) -> String {
    format!("{base_url}bldg_list/{}/", encode_segment(group))
}

pub fn chart_list_url(base_url: &str, group: &str, building: &str) -> String {
    format!(
        "{base_url}chart_list/{}/{}/",
        encode_segment(group),
        encode_segment(building)
    )
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

pub struct Refreshers<S> {
    source: Arc<S>,
}

impl<S> Clone for Refreshers<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: FragmentSource> Refreshers<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub async fn fetch(&self, load: &Load) -> Option<String> {
        debug!(url = %load.url, control = %load.target, "loading fragment");
        match self.source.fetch(&load.url).await {
            Ok(html) => Some(html),
            Err(err) => {
                warn!(control = %load.target, "fragment load failed: {err}");
                None
            }
        }
    }
}

/// Replaces the target's options and fires its change event while the page
/// is still held.
pub fn install(state: &PageState, page: &mut Page, load: &Load, html: &str) -> bool {
    let Some(control) = page.select_mut(&load.target) else {
        warn!(control = %load.target, "refresh target disappeared before install");
        return false;
    };
    control.set_inner_html(html);
    info!(
        control = %load.target,
        options = control.options().len(),
        selected = control.value().unwrap_or_default(),
        "installed fragment"
    );

    state.emit(PageEvent::Replaced {
        id: load.target.clone(),
    });
    state.emit(PageEvent::Changed {
        id: load.target.clone(),
    });
    true
}
