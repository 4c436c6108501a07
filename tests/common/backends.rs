//! Substitute backends for exercising the cache without a network.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use secretfs::{Secret, SecretBackend};
use tokio::sync::{mpsc, Mutex};

/// Backend that never has a usable answer.
#[derive(Debug, Default)]
pub struct FailingBackend;

#[async_trait]
impl SecretBackend for FailingBackend {
    async fn fetch_secret(&self, _name: &str) -> Option<Secret> {
        None
    }

    async fn fetch_secret_list(&self) -> Option<Vec<Secret>> {
        None
    }
}

/// Backend answering from channels. A missing channel blocks forever.
#[derive(Debug, Default)]
pub struct ChannelBackend {
    secrets: Option<Mutex<mpsc::Receiver<Secret>>>,
    secret_lists: Option<Mutex<mpsc::Receiver<Vec<Secret>>>>,
}

impl ChannelBackend {
    /// Backend whose every call hangs.
    pub fn blocking() -> Self {
        Self::default()
    }

    /// Backend answering `fetch_secret` from the returned sender.
    pub fn with_secrets(capacity: usize) -> (Self, mpsc::Sender<Secret>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { secrets: Some(Mutex::new(rx)), secret_lists: None }, tx)
    }

    /// Backend answering `fetch_secret_list` from the returned sender.
    pub fn with_secret_lists(capacity: usize) -> (Self, mpsc::Sender<Vec<Secret>>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { secrets: None, secret_lists: Some(Mutex::new(rx)) }, tx)
    }
}

#[async_trait]
impl SecretBackend for ChannelBackend {
    async fn fetch_secret(&self, _name: &str) -> Option<Secret> {
        match &self.secrets {
            Some(rx) => rx.lock().await.recv().await,
            None => std::future::pending().await,
        }
    }

    async fn fetch_secret_list(&self) -> Option<Vec<Secret>> {
        match &self.secret_lists {
            Some(rx) => rx.lock().await.recv().await,
            None => std::future::pending().await,
        }
    }
}

/// Wraps another backend and counts calls.
#[derive(Debug)]
pub struct CountingBackend<B> {
    inner: B,
    secret_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl<B: SecretBackend> CountingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self { inner, secret_calls: AtomicUsize::new(0), list_calls: AtomicUsize::new(0) }
    }

    pub fn secret_calls(&self) -> usize {
        self.secret_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<B: SecretBackend> SecretBackend for CountingBackend<B> {
    async fn fetch_secret(&self, name: &str) -> Option<Secret> {
        self.secret_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_secret(name).await
    }

    async fn fetch_secret_list(&self) -> Option<Vec<Secret>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_secret_list().await
    }
}
