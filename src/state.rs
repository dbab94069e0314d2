use crate::models::{PageEvent, PageHandles, PageSnapshot};
use crate::page::Page;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

const EVENT_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct PageState {
    pub page: Arc<Mutex<Page>>,
    events: broadcast::Sender<PageEvent>,
}

impl PageState {
    pub fn new(page: Page) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            page: Arc::new(Mutex::new(page)),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PageEvent> {
        self.events.subscribe()
    }

    pub fn emit(&self, event: PageEvent) {
        let _ = self.events.send(event);
    }

    pub async fn snapshot(&self, handles: &PageHandles) -> PageSnapshot {
        self.page.lock().await.snapshot(handles)
    }
}
