//! Session orchestration and user-facing state.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, error};

use crate::classify::{classify_failure, FailureKind};
use crate::error::PipelineResult;
use crate::pipeline::Synthesizer;
use motionref_genai::{GeneratedVideo, KeyProvider};
use motionref_models::{ContentAsset, MotionCommand};

const SELECT_KEY_PROMPT: &str = "Please select an API key before generating a video.";
const INVALID_KEY_MESSAGE: &str = "API key is invalid or expired. Please select a new key.";

/// Mutable user-facing session state.
#[derive(Default)]
struct SessionState {
    content: Option<ContentAsset>,
    reference: Option<PathBuf>,
    command: Option<MotionCommand>,
    video: Option<GeneratedVideo>,
    error: Option<String>,
    progress: Option<String>,
    key_selected: bool,
}

/// Orchestrates a single user session.
///
/// Owns the uploaded assets, the busy gate and the user-visible error
/// and progress text. At most one generation runs at a time; the
/// session is the only place failures are classified and rendered.
pub struct Session {
    synthesizer: Arc<dyn Synthesizer>,
    keys: Option<Arc<dyn KeyProvider>>,
    busy: AtomicBool,
    state: Mutex<SessionState>,
}

impl Session {
    /// Create a session. A missing key provider behaves as if no key is
    /// ever selected.
    pub fn new(synthesizer: Arc<dyn Synthesizer>, keys: Option<Arc<dyn KeyProvider>>) -> Self {
        let key_selected = keys.as_ref().map(|k| k.has_selected_key()).unwrap_or(false);
        Self {
            synthesizer,
            keys,
            busy: AtomicBool::new(false),
            state: Mutex::new(SessionState {
                key_selected,
                ..Default::default()
            }),
        }
    }

    /// Ingest new content, superseding any previous asset and clearing
    /// the previous result and error.
    pub fn set_content(&self, asset: ContentAsset) {
        let mut state = self.state.lock().unwrap();
        state.content = Some(asset);
        state.video = None;
        state.error = None;
    }

    /// Set the reference video whose animation should be replicated.
    pub fn set_reference(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().reference = Some(path.into());
    }

    /// Prompt the user to select an API key.
    ///
    /// Selection is assumed to succeed once prompted; the provider has
    /// no completion signal to confirm it.
    pub fn select_key(&self) {
        if let Some(keys) = &self.keys {
            keys.open_select_key();
            let mut state = self.state.lock().unwrap();
            state.key_selected = true;
            state.error = None;
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn key_selected(&self) -> bool {
        self.state.lock().unwrap().key_selected
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.lock().unwrap().error.clone()
    }

    pub fn progress(&self) -> Option<String> {
        self.state.lock().unwrap().progress.clone()
    }

    pub fn motion_command(&self) -> Option<MotionCommand> {
        self.state.lock().unwrap().command.clone()
    }

    pub fn generated_video(&self) -> Option<GeneratedVideo> {
        self.state.lock().unwrap().video.clone()
    }

    /// Run the full pipeline for the current content and reference.
    ///
    /// No-op returning `Ok(None)` when inputs are missing, a run is
    /// already in flight, or no key is selected (the provider is
    /// prompted in that case). Stage failures are classified into the
    /// session error text and also returned to the caller. The busy
    /// flag and progress text are cleared on every exit path.
    pub async fn generate(&self) -> PipelineResult<Option<GeneratedVideo>> {
        let (content, reference) = {
            let state = self.state.lock().unwrap();
            if self.busy.load(Ordering::SeqCst) {
                debug!("generation already in flight; ignoring");
                return Ok(None);
            }
            match (&state.content, &state.reference) {
                (Some(content), Some(reference)) => (content.clone(), reference.clone()),
                _ => return Ok(None),
            }
        };

        // Re-query the provider so a key revoked since the last check is
        // caught before any remote call.
        let selected = match &self.keys {
            Some(keys) => {
                let has = keys.has_selected_key();
                self.state.lock().unwrap().key_selected = has;
                has
            }
            None => false,
        };
        if !selected {
            self.state.lock().unwrap().error = Some(SELECT_KEY_PROMPT.to_string());
            if let Some(keys) = &self.keys {
                keys.open_select_key();
            }
            return Ok(None);
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("generation already in flight; ignoring");
            return Ok(None);
        }

        {
            let mut state = self.state.lock().unwrap();
            state.error = None;
            state.video = None;
        }

        let progress = |message: String| {
            self.state.lock().unwrap().progress = Some(message);
        };
        let result = self
            .synthesizer
            .synthesize(&content, &reference, &progress)
            .await;

        let outcome = match result {
            Ok(synthesis) => {
                let mut state = self.state.lock().unwrap();
                state.command = Some(synthesis.command.clone());
                state.video = Some(synthesis.video.clone());
                Ok(Some(synthesis.video))
            }
            Err(err) => {
                let message = err.to_string();
                error!(error = %message, "generation pipeline failed");
                let mut state = self.state.lock().unwrap();
                match classify_failure(&message) {
                    FailureKind::InvalidCredential => {
                        state.error = Some(INVALID_KEY_MESSAGE.to_string());
                        state.key_selected = false;
                    }
                    FailureKind::Other => {
                        state.error = Some(format!("An error occurred: {}", message));
                    }
                }
                Err(err)
            }
        };

        // Guaranteed cleanup, success or failure.
        self.busy.store(false, Ordering::SeqCst);
        self.state.lock().unwrap().progress = None;

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::pipeline::Synthesis;
    use async_trait::async_trait;
    use motionref_genai::GenAiError;
    use motionref_models::{AspectRatio, MediaKind};
    use std::collections::VecDeque;
    use std::path::Path;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    fn asset() -> ContentAsset {
        ContentAsset {
            kind: MediaKind::Image,
            payload: "AAAA".into(),
            mime_type: "image/jpeg".into(),
            aspect: AspectRatio::Wide,
        }
    }

    fn synthesis() -> Synthesis {
        Synthesis {
            command: MotionCommand::from_raw("A slow linear pan left to right."),
            video: GeneratedVideo {
                bytes: vec![1, 2, 3],
                mime_type: "video/mp4".into(),
            },
        }
    }

    /// Scripted synthesizer; optionally parks until released.
    struct StubSynthesizer {
        results: Mutex<VecDeque<PipelineResult<Synthesis>>>,
        gate: Option<Arc<Notify>>,
        calls: AtomicUsize,
    }

    impl StubSynthesizer {
        fn ready(results: Vec<PipelineResult<Synthesis>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                gate: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn gated(results: Vec<PipelineResult<Synthesis>>, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::ready(results)
            }
        }
    }

    #[async_trait]
    impl Synthesizer for StubSynthesizer {
        async fn synthesize(
            &self,
            _content: &ContentAsset,
            _reference: &Path,
            progress: &(dyn Fn(String) + Send + Sync),
        ) -> PipelineResult<Synthesis> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            progress("Analyzing reference video animation...".to_string());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            progress("Your video is ready!".to_string());
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .expect("synthesize called more often than scripted")
        }
    }

    struct StaticKeys {
        selected: AtomicBool,
        prompts: AtomicUsize,
    }

    impl StaticKeys {
        fn new(selected: bool) -> Self {
            Self {
                selected: AtomicBool::new(selected),
                prompts: AtomicUsize::new(0),
            }
        }
    }

    impl KeyProvider for StaticKeys {
        fn has_selected_key(&self) -> bool {
            self.selected.load(Ordering::SeqCst)
        }

        fn open_select_key(&self) {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            self.selected.store(true, Ordering::SeqCst);
        }

        fn api_key(&self) -> Option<String> {
            self.has_selected_key().then(|| "test-key".to_string())
        }
    }

    fn session_with(
        synthesizer: Arc<StubSynthesizer>,
        keys: Option<Arc<StaticKeys>>,
    ) -> Arc<Session> {
        let session = Arc::new(Session::new(
            synthesizer,
            keys.map(|k| k as Arc<dyn KeyProvider>),
        ));
        session.set_content(asset());
        session.set_reference("/tmp/reference.mp4");
        session
    }

    #[tokio::test]
    async fn test_happy_path_stores_result_and_cleans_up() {
        let session = session_with(
            Arc::new(StubSynthesizer::ready(vec![Ok(synthesis())])),
            Some(Arc::new(StaticKeys::new(true))),
        );

        let video = session.generate().await.unwrap().unwrap();
        assert_eq!(video.bytes, vec![1, 2, 3]);

        assert!(session.last_error().is_none());
        assert!(!session.is_busy());
        assert!(session.progress().is_none());
        assert_eq!(
            session.motion_command().unwrap().as_str(),
            "A slow linear pan left to right."
        );
        assert!(session.generated_video().is_some());
    }

    #[tokio::test]
    async fn test_missing_inputs_is_noop() {
        let session = Arc::new(Session::new(
            Arc::new(StubSynthesizer::ready(vec![])),
            Some(Arc::new(StaticKeys::new(true)) as Arc<dyn KeyProvider>),
        ));

        assert!(session.generate().await.unwrap().is_none());
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn test_missing_key_prompts_and_aborts() {
        let keys = Arc::new(StaticKeys::new(false));
        let session = session_with(Arc::new(StubSynthesizer::ready(vec![])), Some(keys.clone()));

        assert!(session.generate().await.unwrap().is_none());
        assert_eq!(session.last_error().as_deref(), Some(SELECT_KEY_PROMPT));
        assert_eq!(keys.prompts.load(Ordering::SeqCst), 1);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_no_provider_behaves_as_unselected() {
        let session = session_with(Arc::new(StubSynthesizer::ready(vec![])), None);

        assert!(session.generate().await.unwrap().is_none());
        assert_eq!(session.last_error().as_deref(), Some(SELECT_KEY_PROMPT));
    }

    #[tokio::test]
    async fn test_single_flight_second_call_is_noop() {
        let gate = Arc::new(Notify::new());
        let stub = Arc::new(StubSynthesizer::gated(vec![Ok(synthesis())], gate.clone()));
        let session = session_with(stub.clone(), Some(Arc::new(StaticKeys::new(true))));

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.generate().await }
        });

        // Wait for the first run to park inside the synthesizer.
        while !session.is_busy() {
            tokio::task::yield_now().await;
        }
        let progress_before = session.progress();
        assert!(progress_before.is_some());

        let second = session.generate().await.unwrap();
        assert!(second.is_none());
        assert_eq!(session.progress(), progress_before);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
        assert!(session.is_busy());

        gate.notify_one();
        let first = first.await.unwrap().unwrap();
        assert!(first.is_some());
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_invalid_key_error_resets_selection() {
        let keys = Arc::new(StaticKeys::new(true));
        let session = session_with(
            Arc::new(StubSynthesizer::ready(vec![Err(PipelineError::GenAi(
                GenAiError::Api {
                    status: 404,
                    body: "Requested entity was not found.".into(),
                },
            ))])),
            Some(keys),
        );

        let err = session.generate().await.unwrap_err();
        assert!(err.to_string().contains("Requested entity was not found"));

        assert_eq!(session.last_error().as_deref(), Some(INVALID_KEY_MESSAGE));
        assert!(!session.key_selected());
        assert!(!session.is_busy());
        assert!(session.progress().is_none());
    }

    #[tokio::test]
    async fn test_other_errors_surface_verbatim_with_prefix() {
        let session = session_with(
            Arc::new(StubSynthesizer::ready(vec![Err(
                PipelineError::NoFramesExtracted,
            )])),
            Some(Arc::new(StaticKeys::new(true))),
        );

        session.generate().await.unwrap_err();
        assert_eq!(
            session.last_error().as_deref(),
            Some("An error occurred: Could not extract frames from the reference video.")
        );
        assert!(session.key_selected());
    }

    #[tokio::test]
    async fn test_select_key_assumes_success() {
        let keys = Arc::new(StaticKeys::new(false));
        let session = session_with(Arc::new(StubSynthesizer::ready(vec![])), Some(keys.clone()));

        session.select_key();
        assert!(session.key_selected());
        assert_eq!(keys.prompts.load(Ordering::SeqCst), 1);
        assert!(session.last_error().is_none());
    }
}
