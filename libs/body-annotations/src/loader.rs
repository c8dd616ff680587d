//! # Background Loader
//!
//! Runs bookmark loads on the rayon pool and hands the results back to the
//! thread that owns the loader.
//!
//! - Each job is identified by a fingerprint, such as a file path or a store
//!   address. While a fingerprint is in flight, further submissions for it
//!   are refused.
//! - Results arrive on a channel and are collected with
//!   [`BackgroundLoader::poll`] or [`BackgroundLoader::wait`].
//! - Cancellation is cooperative. A job sees it through its [`CancelToken`].
//!   A cancelled job reports [`AnnotationError::Cancelled`] whatever it
//!   returned.
//! - A job that panics reports [`AnnotationError::JobPanicked`], so its
//!   fingerprint is always released.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crate::bookmark::{load_file, BookmarkTable};
use crate::error::{AnnotationError, AnnotationResult};
use crate::store::{import_bookmarks_cancellable, AnnotationStore};

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Handle to a submitted job.
#[derive(Debug, Clone)]
pub struct LoadHandle {
    fingerprint: String,
    token: CancelToken,
}

impl LoadHandle {
    /// Fingerprint the job was submitted under.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Requests cancellation of the job.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Result of a finished job.
#[derive(Debug)]
pub struct LoadOutcome<T> {
    /// Fingerprint the job was submitted under
    pub fingerprint: String,
    /// What the job produced
    pub result: AnnotationResult<T>,
}

/// Runs jobs in the background, at most one per fingerprint.
///
/// # Example
///
/// ```rust
/// use body_annotations::loader::BackgroundLoader;
///
/// let mut loader = BackgroundLoader::new();
/// let handle = loader.submit("answer", |_token| Ok(42)).unwrap();
/// let outcome = loader.wait().unwrap();
/// assert_eq!(outcome.fingerprint, handle.fingerprint());
/// assert_eq!(outcome.result.unwrap(), 42);
/// ```
#[derive(Debug)]
pub struct BackgroundLoader<T> {
    sender: Sender<LoadOutcome<T>>,
    receiver: Receiver<LoadOutcome<T>>,
    in_flight: HashMap<String, CancelToken>,
}

impl<T: Send + 'static> Default for BackgroundLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> BackgroundLoader<T> {
    /// Creates a loader with nothing in flight.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            in_flight: HashMap::new(),
        }
    }

    /// Starts `job` on the rayon pool.
    ///
    /// Returns `None` without running anything when a job with the same
    /// fingerprint has not been collected yet.
    pub fn submit<F>(&mut self, fingerprint: impl Into<String>, job: F) -> Option<LoadHandle>
    where
        F: FnOnce(&CancelToken) -> AnnotationResult<T> + Send + 'static,
    {
        let fingerprint = fingerprint.into();
        if self.in_flight.contains_key(&fingerprint) {
            log::debug!("load of '{fingerprint}' already in flight");
            return None;
        }

        let token = CancelToken::new();
        self.in_flight.insert(fingerprint.clone(), token.clone());
        let handle = LoadHandle {
            fingerprint: fingerprint.clone(),
            token: token.clone(),
        };

        let sender = self.sender.clone();
        rayon::spawn(move || {
            let result = if token.is_cancelled() {
                Err(AnnotationError::Cancelled)
            } else {
                panic::catch_unwind(AssertUnwindSafe(|| job(&token))).unwrap_or_else(|payload| {
                    let message = panic_message(payload.as_ref());
                    log::error!("load of '{fingerprint}' panicked: {message}");
                    Err(AnnotationError::JobPanicked(message))
                })
            };
            let result = match result {
                Ok(_) if token.is_cancelled() => Err(AnnotationError::Cancelled),
                other => other,
            };
            if sender.send(LoadOutcome { fingerprint, result }).is_err() {
                log::debug!("loader dropped before a job finished");
            }
        });
        Some(handle)
    }

    /// Collects every finished job without blocking.
    pub fn poll(&mut self) -> Vec<LoadOutcome<T>> {
        let finished: Vec<LoadOutcome<T>> = self.receiver.try_iter().collect();
        for outcome in &finished {
            self.in_flight.remove(&outcome.fingerprint);
        }
        finished
    }

    /// Blocks until the next job finishes. Returns `None` when nothing is
    /// in flight.
    pub fn wait(&mut self) -> Option<LoadOutcome<T>> {
        if self.in_flight.is_empty() {
            return None;
        }
        let outcome = self.receiver.recv().ok()?;
        self.in_flight.remove(&outcome.fingerprint);
        Some(outcome)
    }

    /// Whether a job with `fingerprint` is still uncollected.
    pub fn is_loading(&self, fingerprint: &str) -> bool {
        self.in_flight.contains_key(fingerprint)
    }

    /// Number of uncollected jobs.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Cancels the job with `fingerprint`. Returns whether one was in flight.
    pub fn cancel(&self, fingerprint: &str) -> bool {
        match self.in_flight.get(fingerprint) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancels every job in flight.
    pub fn cancel_all(&self) {
        self.in_flight.values().for_each(CancelToken::cancel);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl BackgroundLoader<BookmarkTable> {
    /// Loads a bookmark file, using its path as the fingerprint.
    pub fn load_file(&mut self, path: impl Into<PathBuf>) -> Option<LoadHandle> {
        let path = path.into();
        let fingerprint = path.display().to_string();
        self.submit(fingerprint, move |_token| load_file(&path).map(BookmarkTable::new))
    }

    /// Imports bookmarks from `store` under `fingerprint`.
    pub fn import_from<S>(&mut self, fingerprint: impl Into<String>, store: Arc<S>) -> Option<LoadHandle>
    where
        S: AnnotationStore + Send + Sync + ?Sized + 'static,
    {
        self.submit(fingerprint, move |token| {
            import_bookmarks_cancellable(store.as_ref(), token).map(BookmarkTable::new)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use config::constants::{BODY_ANNOTATION_DATA, BODY_SYNAPSES_KEY};
    use std::sync::mpsc::sync_channel;

    #[test]
    fn test_single_flight() {
        let mut loader = BackgroundLoader::new();
        let (release, gate) = sync_channel::<()>(0);

        let first = loader.submit("body-list", move |_token| {
            gate.recv().map_err(|e| AnnotationError::store(e.to_string()))?;
            Ok(1)
        });
        assert!(first.is_some());
        assert!(loader.is_loading("body-list"));
        assert!(loader.submit("body-list", |_token| Ok(2)).is_none());

        release.send(()).unwrap();
        let outcome = loader.wait().unwrap();
        assert_eq!(outcome.result.unwrap(), 1);
        assert!(!loader.is_loading("body-list"));
        assert!(loader.wait().is_none());

        assert!(loader.submit("body-list", |_token| Ok(3)).is_some());
        assert_eq!(loader.wait().unwrap().result.unwrap(), 3);
    }

    #[test]
    fn test_distinct_fingerprints_run_concurrently() {
        let mut loader = BackgroundLoader::new();
        for i in 0..4u32 {
            assert!(loader.submit(format!("job-{i}"), move |_token| Ok(i * 10)).is_some());
        }
        assert_eq!(loader.pending(), 4);

        let mut results: Vec<u32> = (0..4)
            .filter_map(|_| loader.wait())
            .map(|o| o.result.unwrap())
            .collect();
        results.sort_unstable();
        assert_eq!(results, vec![0, 10, 20, 30]);
        assert_eq!(loader.pending(), 0);
        assert!(loader.poll().is_empty());
    }

    #[test]
    fn test_cancel_in_flight() {
        let mut loader = BackgroundLoader::new();
        let (release, gate) = sync_channel::<()>(0);
        let handle = loader
            .submit("slow", move |_token| {
                gate.recv().map_err(|e| AnnotationError::store(e.to_string()))?;
                Ok("done")
            })
            .unwrap();

        assert!(loader.cancel("slow"));
        assert!(handle.is_cancelled());
        assert!(!loader.cancel("unknown"));
        // The job may be dropped unstarted once cancelled.
        release.send(()).ok();

        let outcome = loader.wait().unwrap();
        assert!(matches!(outcome.result, Err(AnnotationError::Cancelled)));
    }

    #[test]
    fn test_job_observes_token() {
        let mut loader = BackgroundLoader::new();
        let (release, gate) = sync_channel::<()>(0);
        let handle = loader
            .submit("watch", move |token| {
                gate.recv().map_err(|e| AnnotationError::store(e.to_string()))?;
                if token.is_cancelled() {
                    Err(AnnotationError::Cancelled)
                } else {
                    Ok(())
                }
            })
            .unwrap();
        handle.cancel();
        // The job may be dropped unstarted once cancelled.
        release.send(()).ok();
        assert!(matches!(loader.wait().unwrap().result, Err(AnnotationError::Cancelled)));
    }

    #[test]
    fn test_panicking_job_releases_fingerprint() {
        let mut loader: BackgroundLoader<u32> = BackgroundLoader::new();
        assert!(loader
            .submit("broken", |_token| panic!("corrupt bookmark cache"))
            .is_some());

        let outcome = loader.wait().unwrap();
        assert_eq!(outcome.fingerprint, "broken");
        match outcome.result {
            Err(AnnotationError::JobPanicked(message)) => {
                assert!(message.contains("corrupt bookmark cache"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(!loader.is_loading("broken"));
        assert_eq!(loader.pending(), 0);

        // The fingerprint can be submitted again and other jobs still run.
        assert!(loader.submit("broken", |_token| Ok(7)).is_some());
        assert_eq!(loader.wait().unwrap().result.unwrap(), 7);
    }

    #[test]
    fn test_panic_message_payloads() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");
        let fixed: Box<dyn Any + Send> = Box::new("fixed");
        assert_eq!(panic_message(fixed.as_ref()), "fixed");
        let other: Box<dyn Any + Send> = Box::new(3u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }

    #[test]
    fn test_import_from_store() {
        let mut store = MemoryStore::new();
        store.insert(
            BODY_ANNOTATION_DATA,
            BODY_SYNAPSES_KEY,
            r#"{"metadata": {"description": "bookmarks"},
                "data": [{"body ID": 1, "body T-bars": 2}, {"body ID": 2, "body T-bars": 8}]}"#,
        );

        let mut loader = BackgroundLoader::new();
        let handle = loader.import_from("memory", Arc::new(store)).unwrap();
        assert_eq!(handle.fingerprint(), "memory");
        let table = loader.wait().unwrap().result.unwrap();
        assert_eq!(table.rows()[0].body_id, 2);
    }

    #[test]
    fn test_load_missing_file() {
        let mut loader = BackgroundLoader::new();
        let path = std::env::temp_dir().join("no-such-bookmark-file.json");
        assert!(loader.load_file(&path).is_some());
        let outcome = loader.wait().unwrap();
        assert_eq!(outcome.fingerprint, path.display().to_string());
        assert!(matches!(outcome.result, Err(AnnotationError::Io { .. })));
    }
}
