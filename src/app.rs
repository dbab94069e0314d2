use crate::fetch::FragmentSource;
use crate::models::{PageEvent, PageHandles};
use crate::page::Page;
use crate::refresh::{install, Load, Refresh, Refreshers};
use crate::state::PageState;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Change listeners keyed by element id, run in the order they were bound.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    listeners: Vec<(String, Refresh)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready(handles: &PageHandles) -> Self {
        let mut bindings = Self::new();
        bindings.bind(&handles.group, Refresh::BuildingList);
        bindings.bind(&handles.building, Refresh::ChartList);
        bindings
    }

    pub fn bind(&mut self, id: &str, refresh: Refresh) {
        self.listeners.push((id.to_string(), refresh));
    }

    pub fn listeners<'a>(&'a self, id: &'a str) -> impl Iterator<Item = Refresh> + 'a {
        self.listeners
            .iter()
            .filter(move |(bound, _)| bound == id)
            .map(|(_, refresh)| *refresh)
    }
}

pub struct Cascade<S> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    state: PageState,
    handles: PageHandles,
    refreshers: Refreshers<S>,
    bindings: Bindings,
}

impl<S> Clone for Cascade<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: FragmentSource> Cascade<S> {
    pub fn ready(state: PageState, handles: PageHandles, source: Arc<S>) -> Self {
        let bindings = Bindings::ready(&handles);
        Self::with_bindings(state, handles, source, bindings)
    }

    pub fn with_bindings(
        state: PageState,
        handles: PageHandles,
        source: Arc<S>,
        bindings: Bindings,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state,
                handles,
                refreshers: Refreshers::new(source),
                bindings,
            }),
        }
    }

    pub fn state(&self) -> &PageState {
        &self.inner.state
    }

    pub fn handles(&self) -> &PageHandles {
        &self.inner.handles
    }

    /// Returns `None` when the control or value is unknown.
    pub async fn select(&self, id: &str, value: &str) -> Option<JoinHandle<()>> {
        let mut page = self.inner.state.page.lock().await;
        if !page.select_mut(id)?.select(value) {
            return None;
        }
        Some(self.dispatch(&page, id))
    }

    /// Listener urls are built from the page as it is now.
    pub async fn change(&self, id: &str) -> JoinHandle<()> {
        let page = self.inner.state.page.lock().await;
        self.dispatch(&page, id)
    }

    pub async fn update_bldg_list(&self) -> JoinHandle<()> {
        self.refresh(Refresh::BuildingList).await
    }

    pub async fn update_chart_list(&self) -> JoinHandle<()> {
        self.refresh(Refresh::ChartList).await
    }

    /// Runs one refresher directly. Its change event drives the bound
    /// listeners exactly as a user change would.
    pub async fn refresh(&self, refresh: Refresh) -> JoinHandle<()> {
        let page = self.inner.state.page.lock().await;
        let loads = refresh.plan(&page, &self.inner.handles).into_iter().collect();
        self.spawn(loads)
    }

    fn dispatch(&self, page: &Page, id: &str) -> JoinHandle<()> {
        self.inner.state.emit(PageEvent::Changed { id: id.to_string() });
        let loads = self.inner.plan(page, id);
        self.spawn(loads)
    }

    fn spawn(&self, loads: VecDeque<Load>) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.run(loads).await })
    }
}

impl<S: FragmentSource> Inner<S> {
    fn plan(&self, page: &Page, id: &str) -> VecDeque<Load> {
        self.bindings
            .listeners(id)
            .filter_map(|refresh| refresh.plan(page, &self.handles))
            .collect()
    }

    async fn run(&self, mut pending: VecDeque<Load>) {
        while let Some(load) = pending.pop_front() {
            let Some(html) = self.refreshers.fetch(&load).await else {
                continue;
            };
            let mut page = self.state.page.lock().await;
            if install(&self.state, &mut page, &load, &html) {
                // the synthetic change runs its listeners against the page we just installed
                pending.extend(self.plan(&page, &load.target));
            }
        }
        debug!("cascade settled");
    }
}
