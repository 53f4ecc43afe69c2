//! Shared fakes for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use slack_search::results::{MatchSink, PermalinkOpener, ResolvedMatch};
use slack_search::slack::{
    Channel, ChannelRef, FileMatch, MessageMatch, SearchPage, SlackApi, SlackError, User,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory Slack workspace with scripted pagination and failures
pub struct FakeSlack {
    pub file_pages: u32,
    pub message_pages: u32,
    pub matches_per_page: usize,
    /// Pages whose search call always fails
    pub failing_pages: HashSet<u32>,
    /// Fail page 1 only after the probe succeeded
    pub fail_page_one_refetch: bool,
    pub users: HashMap<String, String>,
    pub channels: HashMap<String, String>,
    pub delay: Duration,
    pub file_calls: Mutex<Vec<u32>>,
    pub message_calls: Mutex<Vec<u32>>,
    pub lookups: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeSlack {
    pub fn new(file_pages: u32, message_pages: u32) -> Self {
        Self {
            file_pages,
            message_pages,
            matches_per_page: 2,
            failing_pages: HashSet::new(),
            fail_page_one_refetch: false,
            users: [("U1", "ann"), ("U2", "bob")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            channels: [("C1", "general"), ("C2", "random")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            delay: Duration::ZERO,
            file_calls: Mutex::new(Vec::new()),
            message_calls: Mutex::new(Vec::new()),
            lookups: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn failing(mut self, pages: &[u32]) -> Self {
        self.failing_pages.extend(pages.iter().copied());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn file_calls(&self) -> Vec<u32> {
        let mut calls = self.file_calls.lock().unwrap().clone();
        calls.sort_unstable();
        calls
    }

    pub fn message_calls(&self) -> Vec<u32> {
        let mut calls = self.message_calls.lock().unwrap().clone();
        calls.sort_unstable();
        calls
    }

    /// Record a page call and decide whether it fails
    async fn page_call(&self, calls: &Mutex<Vec<u32>>, page: u32) -> Result<(), SlackError> {
        let previous_calls = {
            let mut calls = calls.lock().unwrap();
            let previous = calls.iter().filter(|p| **p == page).count();
            calls.push(page);
            previous
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_pages.contains(&page) {
            return Err(SlackError::Status(500));
        }
        if self.fail_page_one_refetch && page == 1 && previous_calls > 0 {
            return Err(SlackError::Api("ratelimited".to_string()));
        }
        Ok(())
    }
}

pub fn file_match(page: u32, n: usize) -> FileMatch {
    FileMatch {
        id: format!("F{}-{}", page, n),
        title: format!("file-{}-{}", page, n),
        url: format!("https://files.slack.com/files-pri/T1-F{}-{}/doc.pdf", page, n),
        permalink: format!("https://acme.slack.com/files/U1/F{}-{}/doc.pdf", page, n),
        user_id: "U1".to_string(),
        channel_ids: vec!["C1".to_string(), "C404".to_string(), "C2".to_string()],
    }
}

pub fn message_match(page: u32, n: usize) -> MessageMatch {
    MessageMatch {
        text: format!("message {}-{}", page, n),
        permalink: format!("https://acme.slack.com/archives/C1/p{}{}", page, n),
        username: "bob".to_string(),
        user_id: "U2".to_string(),
        channel: ChannelRef {
            id: "C1".to_string(),
            name: "general".to_string(),
        },
    }
}

#[async_trait]
impl SlackApi for FakeSlack {
    async fn search_files(
        &self,
        _query: &str,
        page: u32,
    ) -> Result<SearchPage<FileMatch>, SlackError> {
        self.page_call(&self.file_calls, page).await?;
        let matches = (0..self.matches_per_page).map(|n| file_match(page, n)).collect();
        Ok(SearchPage::new(matches, self.file_pages))
    }

    async fn search_messages(
        &self,
        _query: &str,
        page: u32,
    ) -> Result<SearchPage<MessageMatch>, SlackError> {
        self.page_call(&self.message_calls, page).await?;
        let matches = (0..self.matches_per_page)
            .map(|n| message_match(page, n))
            .collect();
        Ok(SearchPage::new(matches, self.message_pages))
    }

    async fn user_info(&self, user_id: &str) -> Result<User, SlackError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match self.users.get(user_id) {
            Some(name) => Ok(User {
                id: user_id.to_string(),
                name: name.clone(),
            }),
            None => Err(SlackError::Api("user_not_found".to_string())),
        }
    }

    async fn channel_info(&self, channel_id: &str) -> Result<Channel, SlackError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match self.channels.get(channel_id) {
            Some(name) => Ok(Channel {
                id: channel_id.to_string(),
                name: name.clone(),
            }),
            None => Err(SlackError::Api("channel_not_found".to_string())),
        }
    }
}

/// Sink that keeps every emitted match
#[derive(Default)]
pub struct RecordingSink {
    pub records: Mutex<Vec<(u32, ResolvedMatch)>>,
}

impl RecordingSink {
    pub fn records(&self) -> Vec<(u32, ResolvedMatch)> {
        self.records.lock().unwrap().clone()
    }
}

impl MatchSink for RecordingSink {
    fn emit(&self, page: u32, resolved: &ResolvedMatch) {
        self.records.lock().unwrap().push((page, resolved.clone()));
    }
}

/// Opener that records URLs instead of launching a browser
#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<String>>,
}

impl PermalinkOpener for RecordingOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Formatted log output, captured for the current thread
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Route this thread's `tracing` events into the capture until the guard drops
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_target(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
