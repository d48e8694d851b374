// Scripted scanner for executor and query tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;

use events_domain::ports::TableScanner;
use events_domain::{AttributeMap, AttributeValue, ContinuationToken, Event, ScanPage, ScanRequest};

type PageHook = (usize, Box<dyn FnOnce() + Send>);

pub(crate) struct ScriptedScanner {
    pages: Mutex<VecDeque<anyhow::Result<ScanPage>>>,
    starts: Mutex<Vec<Option<ContinuationToken>>>,
    requests: Mutex<Vec<ScanRequest>>,
    hook: Mutex<Option<PageHook>>,
    delay: Option<Duration>,
}

impl ScriptedScanner {
    pub(crate) fn new(pages: Vec<anyhow::Result<ScanPage>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            starts: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            hook: Mutex::new(None),
            delay: None,
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Runs `hook` right after the `page`-th page has been served.
    pub(crate) fn on_page(&self, page: usize, hook: impl FnOnce() + Send + 'static) {
        *self.hook.lock().expect("hook lock") = Some((page, Box::new(hook)));
    }

    pub(crate) fn starts(&self) -> Vec<Option<ContinuationToken>> {
        self.starts.lock().expect("starts lock").clone()
    }

    pub(crate) fn requests(&self) -> Vec<ScanRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl TableScanner for ScriptedScanner {
    async fn scan_page(
        &self,
        request: &ScanRequest,
        start: Option<ContinuationToken>,
    ) -> anyhow::Result<ScanPage> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let served = {
            let mut starts = self.starts.lock().expect("starts lock");
            starts.push(start);
            starts.len()
        };
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        let page = self
            .pages
            .lock()
            .expect("pages lock")
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted page left")));

        let hook = {
            let mut slot = self.hook.lock().expect("hook lock");
            match slot.take() {
                Some((at, hook)) if at == served => Some(hook),
                other => {
                    *slot = other;
                    None
                }
            }
        };
        if let Some(hook) = hook {
            hook();
        }

        page
    }
}

pub(crate) fn event(id: &str) -> Event {
    Event {
        id: id.to_string(),
        occurred_at: "2022-06-01T10:00:00Z".to_string(),
        title: format!("event {id}"),
        created_at: "01/06/2022 10:00".to_string(),
        ..Event::default()
    }
}

pub(crate) fn token(id: &str) -> ContinuationToken {
    let mut key = AttributeMap::new();
    key.insert("id".to_string(), AttributeValue::S(id.to_string()));
    ContinuationToken::new(key)
}
