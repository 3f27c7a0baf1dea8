//! Classification sessions.
//!
//! A [`Session`] owns one loaded [`ModelRuntime`]. Loading is the expensive
//! part, so a session is meant to be created once and reused for many
//! identifications, including from several threads at once.
//!
//! # Lifecycle
//!
//! [`SessionBuilder`] collects configuration; [`SessionBuilder::build`] loads
//! the model and returns a session in [`SessionState::Ready`]. A session that
//! fails to load never exists. [`Session::release`] moves it to
//! [`SessionState::Released`]; every identify call after that fails with
//! [`Error::SessionClosed`]. Releasing twice is a no-op.
//!
//! # Concurrency
//!
//! Identify calls share a read lock on the runtime and run in parallel.
//! `release` takes the write lock, so it waits for in-flight calls to finish;
//! `try_release` returns [`Error::SessionBusy`] instead of waiting.
//!
//! # Examples
//!
//! ```
//! use filekind::Session;
//!
//! # fn main() -> filekind::Result<()> {
//! let session = Session::new()?;
//! let info = session.identify_bytes(b"%PDF-1.7\n")?;
//! assert_eq!(info.label(), "pdf");
//! assert_eq!(info.mime_type(), "application/pdf");
//! session.release();
//! assert!(session.identify_bytes(b"").is_err());
//! # Ok(())
//! # }
//! ```

// Submodule declarations
#[cfg(feature = "parallel")]
mod batch;
pub mod result;
mod select;

use std::fs::{self, File};
use std::path::Path;

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};

use crate::common::config::SessionConfig;
use crate::common::error::{Error, Result};
use crate::features::{FeatureVector, extract, extract_from_reader};
use crate::labels::{self, DIRECTORY};
use crate::model::{ModelRuntime, ModelSource};

// Re-exports
pub use result::{Classification, TypeInfo};

/// Observable lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Model loaded; identify calls are accepted.
    Ready,
    /// Model dropped; identify calls fail with [`Error::SessionClosed`].
    Released,
}

/// Configuration stage of a session, before the model is loaded.
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    config: SessionConfig,
    source: Option<ModelSource>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn confidence_threshold(mut self, threshold: f32) -> Self {
        self.config.confidence_threshold = threshold;
        self
    }

    pub fn tie_epsilon(mut self, epsilon: f32) -> Self {
        self.config.tie_epsilon = epsilon;
        self
    }

    /// Load weights from `source`, overriding `model_path` in the config.
    pub fn model(mut self, source: ModelSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Validate the configuration and load the model.
    pub fn build(self) -> Result<Session> {
        self.config.validate()?;
        let source = match (self.source, &self.config.model_path) {
            (Some(source), _) => source,
            (None, Some(path)) => ModelSource::File(path.clone()),
            (None, None) => ModelSource::Builtin,
        };

        let runtime = ModelRuntime::load(&source)?;
        for label in runtime.labels() {
            if !labels::contains(label) {
                tracing::warn!(label = %label, "model label missing from registry");
            }
        }

        Ok(Session {
            config: self.config,
            runtime: RwLock::new(Some(runtime)),
        })
    }
}

/// A loaded classifier.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    runtime: RwLock<Option<ModelRuntime>>,
}

impl Session {
    /// Load the built-in model with default configuration.
    pub fn new() -> Result<Self> {
        SessionBuilder::new().build()
    }

    /// Load with the given configuration.
    pub fn with_config(config: SessionConfig) -> Result<Self> {
        SessionBuilder::new().config(config).build()
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        if self.runtime.read().is_some() {
            SessionState::Ready
        } else {
            SessionState::Released
        }
    }

    /// Labels the loaded model can emit.
    pub fn model_labels(&self) -> Result<Vec<String>> {
        Ok(self.active()?.labels().to_vec())
    }

    /// Identify an in-memory buffer. An empty buffer is valid input.
    pub fn identify_bytes(&self, data: &[u8]) -> Result<TypeInfo> {
        self.classify_bytes(data).map(Classification::into_info)
    }

    /// Identify a file on disk.
    ///
    /// Only the head, middle and tail windows are read. Missing files are
    /// [`Error::FileNotFound`], other filesystem failures [`Error::Io`].
    pub fn identify_path(&self, path: impl AsRef<Path>) -> Result<TypeInfo> {
        self.classify_path(path).map(Classification::into_info)
    }

    /// Like [`identify_bytes`](Self::identify_bytes), with score details.
    pub fn classify_bytes(&self, data: &[u8]) -> Result<Classification> {
        let runtime = self.active()?;
        let features = extract(data, runtime.layout());
        self.classify_features(&runtime, &features)
    }

    /// Like [`identify_path`](Self::identify_path), with score details.
    pub fn classify_path(&self, path: impl AsRef<Path>) -> Result<Classification> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidInput("empty path".to_string()));
        }
        let runtime = self.active()?;
        self.classify_path_with(&runtime, path)
    }

    /// Drop the model, waiting for in-flight identify calls to finish.
    ///
    /// Idempotent.
    pub fn release(&self) {
        if self.runtime.write().take().is_some() {
            tracing::debug!("session released");
        }
    }

    /// Drop the model without waiting.
    ///
    /// Fails with [`Error::SessionBusy`] if an identify call is in flight.
    /// Succeeds on an already released session.
    pub fn try_release(&self) -> Result<()> {
        let mut slot = self.runtime.try_write().ok_or(Error::SessionBusy)?;
        if slot.take().is_some() {
            tracing::debug!("session released");
        }
        Ok(())
    }

    fn active(&self) -> Result<MappedRwLockReadGuard<'_, ModelRuntime>> {
        RwLockReadGuard::try_map(self.runtime.read(), Option::as_ref)
            .map_err(|_| Error::SessionClosed)
    }

    fn classify_path_with(&self, runtime: &ModelRuntime, path: &Path) -> Result<Classification> {
        let metadata = fs::metadata(path).map_err(|e| Error::from_path_io(path, e))?;
        if metadata.is_dir() {
            return Ok(Classification {
                info: TypeInfo::from_entry(labels::lookup(DIRECTORY)?),
                score: 1.0,
                model_label: None,
                overwritten: false,
            });
        }

        let mut file = File::open(path).map_err(|e| Error::from_path_io(path, e))?;
        let features = extract_from_reader(&mut file, runtime.layout())
            .map_err(|e| Error::from_path_io(path, e))?;
        self.classify_features(runtime, &features)
    }

    fn classify_features(
        &self,
        runtime: &ModelRuntime,
        features: &FeatureVector,
    ) -> Result<Classification> {
        let scores = runtime.infer(features)?;
        let selection = select::select(
            &scores,
            self.config.confidence_threshold,
            self.config.tie_epsilon,
        )?;
        tracing::trace!(
            label = selection.entry.label,
            model_label = selection.model_label,
            score = selection.score,
            "classified"
        );
        Ok(Classification {
            info: TypeInfo::from_entry(selection.entry),
            score: selection.score,
            model_label: Some(selection.model_label.to_string()),
            overwritten: selection.overwritten,
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.runtime.get_mut().take().is_some() {
            tracing::warn!("session dropped without explicit release");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureLayout;
    use crate::labels::{EMPTY, TXT, UNKNOWN};
    use crate::model::weights::{DenseLayer, ModelWeights, input_width};
    use std::io::Write;

    /// Single-layer model whose output is fixed by the output biases.
    fn constant_model(labels: &[&str], biases: &[f32]) -> ModelSource {
        let output = DenseLayer::new(labels.len(), 1, vec![0.0; labels.len()], biases.to_vec()).unwrap();
        let weights = ModelWeights::new(
            FeatureLayout::new(8, 0, 8),
            0,
            labels.iter().map(|l| l.to_string()).collect(),
            DenseLayer::zeros(1, input_width(0)),
            output,
        )
        .unwrap();
        ModelSource::Bytes(weights.to_bytes())
    }

    /// Counts `WARN` events emitted while it is the default subscriber.
    struct WarnCounter(std::sync::Arc<std::sync::atomic::AtomicUsize>);

    impl tracing::Subscriber for WarnCounter {
        fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(1)
        }

        fn record(&self, _: &tracing::span::Id, _: &tracing::span::Record<'_>) {}

        fn record_follows_from(&self, _: &tracing::span::Id, _: &tracing::span::Id) {}

        fn event(&self, event: &tracing::Event<'_>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        }

        fn enter(&self, _: &tracing::span::Id) {}

        fn exit(&self, _: &tracing::span::Id) {}
    }

    fn warnings_during(f: impl FnOnce()) -> usize {
        let count = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let subscriber = WarnCounter(std::sync::Arc::clone(&count));
        tracing::subscriber::with_default(subscriber, f);
        count.load(std::sync::atomic::Ordering::SeqCst)
    }

    #[test]
    fn test_implicit_drop_is_reported() {
        let leaked = warnings_during(|| {
            let session = Session::new().unwrap();
            session.identify_bytes(b"abc").unwrap();
            drop(session);
        });
        assert_eq!(leaked, 1);

        let released = warnings_during(|| {
            let session = Session::new().unwrap();
            session.identify_bytes(b"abc").unwrap();
            session.release();
            drop(session);
        });
        assert_eq!(released, 0);
    }

    #[test]
    fn test_session_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Session>();
    }

    #[test]
    fn test_png_prefix() {
        let session = Session::new().unwrap();
        let info = session.identify_bytes(&[0x89, 0x50, 0x4E]).unwrap();
        assert_eq!(info.label(), "png");
        assert_eq!(info.mime_type(), "image/png");
        assert!(!info.is_text());
        assert_eq!(info.extensions()[0], "png");
    }

    #[test]
    fn test_empty_bytes_are_valid() {
        let session = Session::new().unwrap();
        assert_eq!(session.identify_bytes(&[]).unwrap().label(), EMPTY);
    }

    #[test]
    fn test_release_lifecycle() {
        let session = Session::new().unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        session.release();
        assert_eq!(session.state(), SessionState::Released);
        session.release();
        assert!(session.try_release().is_ok());
        assert!(matches!(session.identify_bytes(b"abc"), Err(Error::SessionClosed)));
        assert!(matches!(session.identify_path("Cargo.toml"), Err(Error::SessionClosed)));
        assert!(matches!(session.model_labels(), Err(Error::SessionClosed)));
    }

    #[test]
    fn test_try_release_busy_while_call_in_flight() {
        let session = Session::new().unwrap();
        let in_flight = session.active().unwrap();
        assert!(matches!(session.try_release(), Err(Error::SessionBusy)));
        drop(in_flight);
        assert!(session.try_release().is_ok());
        assert_eq!(session.state(), SessionState::Released);
    }

    #[test]
    fn test_release_waits_for_in_flight_call() {
        let session = std::sync::Arc::new(Session::new().unwrap());
        let in_flight = session.active().unwrap();

        let releaser = {
            let session = std::sync::Arc::clone(&session);
            std::thread::spawn(move || session.release())
        };
        std::thread::sleep(std::time::Duration::from_millis(50));
        assert!(!releaser.is_finished());
        // The held runtime is still usable while release waits.
        assert!(in_flight.infer(&extract(b"x", in_flight.layout())).is_ok());
        drop(in_flight);

        releaser.join().unwrap();
        assert_eq!(session.state(), SessionState::Released);
    }

    #[test]
    fn test_concurrent_identify_then_release() {
        let session = std::sync::Arc::new(Session::new().unwrap());
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let session = std::sync::Arc::clone(&session);
                std::thread::spawn(move || {
                    let mut identified = 0usize;
                    loop {
                        match session.identify_bytes(b"\x7FELF\x02\x01\x01\x00") {
                            Ok(info) => {
                                assert_eq!(info.label(), "elf");
                                identified += 1;
                            },
                            Err(Error::SessionClosed) => return identified,
                            Err(other) => panic!("unexpected error: {other}"),
                        }
                    }
                })
            })
            .collect();

        std::thread::sleep(std::time::Duration::from_millis(20));
        session.release();
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(session.state(), SessionState::Released);
    }

    #[test]
    fn test_low_confidence_fallback() {
        // Uniform output: the tie goes to png by priority, below threshold.
        let session = Session::builder()
            .model(constant_model(&["png", TXT, UNKNOWN], &[0.0, 0.0, 0.0]))
            .build()
            .unwrap();
        let result = session.classify_bytes(b"\x89PNG").unwrap();
        assert_eq!(result.info.label(), UNKNOWN);
        assert_eq!(result.model_label.as_deref(), Some("png"));
        assert!(result.overwritten);

        let session = Session::builder()
            .model(constant_model(&["json", TXT, UNKNOWN], &[0.0, 0.0, 0.0]))
            .build()
            .unwrap();
        assert_eq!(session.identify_bytes(b"{}").unwrap().label(), TXT);
    }

    #[test]
    fn test_threshold_zero_disables_fallback() {
        let session = Session::builder()
            .model(constant_model(&["png", TXT, UNKNOWN], &[0.0, 0.0, 0.0]))
            .confidence_threshold(0.0)
            .build()
            .unwrap();
        assert_eq!(session.identify_bytes(b"").unwrap().label(), "png");
    }

    #[test]
    fn test_unknown_label_leaves_session_usable() {
        let session = Session::builder()
            .model(constant_model(&["from-a-newer-model", UNKNOWN], &[5.0, 0.0]))
            .build()
            .unwrap();
        assert!(matches!(
            session.identify_bytes(b"data"),
            Err(Error::UnknownLabel(label)) if label == "from-a-newer-model"
        ));
        assert_eq!(session.state(), SessionState::Ready);

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(session.identify_path(dir.path()).unwrap().label(), DIRECTORY);
    }

    #[test]
    fn test_malformed_model_never_builds() {
        let err = Session::builder()
            .model(ModelSource::Bytes(b"FKMW not really a model".to_vec()))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
    }

    #[test]
    fn test_invalid_config_never_builds() {
        let err = Session::builder().confidence_threshold(2.0).build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_model_path_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.fkmw");
        let ModelSource::Bytes(blob) = constant_model(&[TXT, UNKNOWN], &[3.0, 0.0]) else {
            unreachable!()
        };
        std::fs::write(&path, blob).unwrap();

        let config = SessionConfig {
            model_path: Some(path),
            ..SessionConfig::default()
        };
        let session = Session::with_config(config).unwrap();
        assert_eq!(session.model_labels().unwrap(), [TXT, UNKNOWN]);
        assert_eq!(session.identify_bytes(&[0, 1, 2]).unwrap().label(), TXT);
    }

    #[test]
    fn test_identify_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n").unwrap();
        file.flush().unwrap();

        let session = Session::new().unwrap();
        let by_path = session.identify_path(file.path()).unwrap();
        assert_eq!(by_path.label(), "pdf");
        let bytes = std::fs::read(file.path()).unwrap();
        assert_eq!(session.identify_bytes(&bytes).unwrap(), by_path);
    }

    #[test]
    fn test_path_errors_are_distinct() {
        let session = Session::new().unwrap();
        let err = session.identify_path("/no/such/dir/file.bin").unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
        assert!(err.is_file_error());

        assert!(matches!(session.identify_path(""), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_directory_label() {
        let session = Session::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let result = session.classify_path(dir.path()).unwrap();
        assert_eq!(result.info.label(), DIRECTORY);
        assert!(result.model_label.is_none());
    }
}
