//! Scripted in-memory browser used by unit tests.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::acquire::{HEIGHT_SCRIPT, SCROLL_SCRIPT};
use crate::browser::{BrowserLauncher, BrowserSession};
use crate::error::ScraperError;

/// What the fake session observed, shared with the test after the session
/// has been consumed by `close`.
#[derive(Debug, Default)]
pub(crate) struct SessionLog {
    pub launches: u32,
    pub navigated: Vec<String>,
    pub scrolls: u32,
    pub clicked: Vec<String>,
    pub closed: bool,
}

/// Launcher whose sessions replay a fixed sequence of document heights.
#[derive(Debug, Clone)]
pub(crate) struct FakeLauncher {
    pub heights: Vec<Value>,
    pub markup: String,
    pub dialogs: HashSet<String>,
    pub fail_launch: bool,
    pub fail_navigate: bool,
    pub fail_close: bool,
    pub log: Arc<Mutex<SessionLog>>,
}

impl FakeLauncher {
    pub(crate) fn new(heights: &[u64], markup: &str) -> Self {
        Self {
            heights: heights.iter().map(|h| json!(h)).collect(),
            markup: markup.to_string(),
            dialogs: HashSet::new(),
            fail_launch: false,
            fail_navigate: false,
            fail_close: false,
            log: Arc::new(Mutex::new(SessionLog::default())),
        }
    }

    pub(crate) fn with_dialog(mut self, name: &str) -> Self {
        self.dialogs.insert(name.to_string());
        self
    }

    pub(crate) fn log(&self) -> std::sync::MutexGuard<'_, SessionLog> {
        self.log.lock().unwrap()
    }
}

impl BrowserLauncher for FakeLauncher {
    type Session = FakeSession;

    async fn launch(&self) -> Result<FakeSession, ScraperError> {
        self.log.lock().unwrap().launches += 1;
        if self.fail_launch {
            return Err(ScraperError::Launch {
                webdriver_url: "http://localhost:9515".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(FakeSession {
            heights: self.heights.iter().cloned().collect(),
            last_height: json!(0),
            markup: self.markup.clone(),
            dialogs: self.dialogs.clone(),
            fail_navigate: self.fail_navigate,
            fail_close: self.fail_close,
            log: Arc::clone(&self.log),
        })
    }
}

pub(crate) struct FakeSession {
    heights: VecDeque<Value>,
    last_height: Value,
    markup: String,
    dialogs: HashSet<String>,
    fail_navigate: bool,
    fail_close: bool,
    log: Arc<Mutex<SessionLog>>,
}

impl BrowserSession for FakeSession {
    type Element = String;

    async fn navigate(&mut self, url: &str) -> Result<(), ScraperError> {
        if self.fail_navigate {
            return Err(ScraperError::InvalidUrl {
                url: url.to_string(),
                source: url::ParseError::EmptyHost,
            });
        }
        self.log.lock().unwrap().navigated.push(url.to_string());
        Ok(())
    }

    async fn execute_script(&mut self, script: &str) -> Result<Value, ScraperError> {
        match script {
            HEIGHT_SCRIPT => {
                // Once the scripted heights run out the page stays at its last height.
                if let Some(next) = self.heights.pop_front() {
                    self.last_height = next;
                }
                Ok(self.last_height.clone())
            }
            SCROLL_SCRIPT => {
                self.log.lock().unwrap().scrolls += 1;
                Ok(Value::Null)
            }
            other => panic!("unexpected script: {other}"),
        }
    }

    async fn find_by_accessible_name(&mut self, name: &str) -> Result<Option<String>, ScraperError> {
        Ok(self.dialogs.contains(name).then(|| name.to_string()))
    }

    async fn click(&mut self, element: &String) -> Result<(), ScraperError> {
        self.log.lock().unwrap().clicked.push(element.clone());
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, ScraperError> {
        Ok(self.markup.clone())
    }

    async fn close(self) -> Result<(), ScraperError> {
        self.log.lock().unwrap().closed = true;
        if self.fail_close {
            return Err(ScraperError::Launch {
                webdriver_url: "http://localhost:9515".to_string(),
                reason: "session already gone".to_string(),
            });
        }
        Ok(())
    }
}
