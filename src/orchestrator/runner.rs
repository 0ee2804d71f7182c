//! Orchestrator — sequences the user-triggered remote operations.
//!
//! [`Orchestrator`] owns the [`SharedState`] and responds to [`Command`]s
//! received over a `tokio::sync::mpsc` channel.
//!
//! # Flows
//!
//! ```text
//! Command::UploadPaper(text)
//!   └─▶ set paper text, clear stale summary
//!         └─▶ store.store(text)            ── failure skips the similar call
//!               └─▶ store.find_similar(text)
//!                     ├─ Ok  → keep results, post success notice
//!                     └─ Err → generic failure notice (store not rolled back)
//!
//! Command::GenerateSummary(format)
//!   └─▶ phase = Generating
//!         └─▶ summarizer.summarize(paper_text, format)
//!               ├─ Ok  → summary set, phase = Done
//!               └─ Err → summary unset, phase = Failed, failure notice
//!
//! Command::Speak(text)
//!   └─▶ empty text → notice, no remote call
//!   └─▶ synthesizer.synthesize(text, voice) → playback.play(bytes)
//! ```
//!
//! Commands are processed one at a time; every remote call is awaited before
//! the next command is picked up, so there is no parallel fan-out and no
//! in-flight cancellation.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::papers::PaperStore;
use crate::speech::{is_known_voice, Playback, SpeechSynthesizer};
use crate::summary::{Summarizer, SummaryFormat};

use super::state::{GenerationPhase, Notice, SharedState};

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// User-triggered operations handled by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// New paper text was submitted: store it and find similar papers.
    UploadPaper(String),

    /// Generate a summary of the current paper text.  `None` carries an
    /// unrecognized wire tag through to the bare prompt prefix.
    GenerateSummary(Option<SummaryFormat>),

    /// Convert `text` to speech with the currently selected voice.
    Speak(String),

    /// Change the selected voice.  Ids outside the catalog are refused.
    SelectVoice(String),
}

// ---------------------------------------------------------------------------
// Notice texts
// ---------------------------------------------------------------------------

const UPLOAD_OK: &str = "Paper processed and similar papers found.";
const UPLOAD_FAILED: &str = "Failed to process paper. Please try again.";
const SUMMARY_FAILED: &str = "Failed to generate summary. Please try again.";
const SPEECH_FAILED: &str = "Failed to convert text to speech. Please try again.";
const SPEECH_EMPTY: &str = "Please enter some text to convert to speech.";

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Drives the upload / summarize / speak flows against the external services.
///
/// Create with [`Orchestrator::new`], then call [`run`](Self::run) inside a
/// tokio task.
pub struct Orchestrator {
    state: SharedState,
    store: Arc<dyn PaperStore>,
    summarizer: Arc<dyn Summarizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    playback: Arc<dyn Playback>,
}

impl Orchestrator {
    /// Create a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `state`       — shared session state (also read by the HTTP layer).
    /// * `store`       — paper backend client.
    /// * `summarizer`  — summary backend client.
    /// * `synthesizer` — speech-synthesis client.
    /// * `playback`    — local audio output.
    pub fn new(
        state: SharedState,
        store: Arc<dyn PaperStore>,
        summarizer: Arc<dyn Summarizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        playback: Arc<dyn Playback>,
    ) -> Self {
        Self {
            state,
            store,
            summarizer,
            synthesizer,
            playback,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the orchestrator until `command_rx` is closed.
    ///
    /// This is an `async fn` and should be spawned as a tokio task from
    /// `main()`.  It never returns while the channel is open.
    pub async fn run(self, mut command_rx: mpsc::Receiver<Command>) {
        while let Some(command) = command_rx.recv().await {
            match command {
                Command::UploadPaper(text) => self.handle_upload(text).await,
                Command::GenerateSummary(format) => self.handle_generate(format).await,
                Command::Speak(text) => self.handle_speak(text).await,
                Command::SelectVoice(id) => self.handle_select_voice(id),
            }
        }

        log::info!("orchestrator: command channel closed, shutting down");
    }

    // -----------------------------------------------------------------------
    // Command handlers
    // -----------------------------------------------------------------------

    /// Upload: set paper text, clear any stale summary, then store and
    /// find-similar sequentially.
    ///
    /// The two backend calls share one failure path: a store failure skips
    /// the similar call entirely; a similar failure leaves the already
    /// stored paper in place (accepted eventual inconsistency).
    async fn handle_upload(&self, text: String) {
        log::debug!("orchestrator: upload ({} chars)", text.len());

        {
            let mut st = self.state.lock().unwrap();
            st.paper_text = Some(text.clone());
            // A summary is only meaningful relative to the text that
            // produced it.
            st.summary = None;
        }

        if let Err(e) = self.store.store(&text).await {
            log::error!("orchestrator: store failed: {e}");
            self.post_notice(Notice::error(UPLOAD_FAILED));
            return;
        }

        match self.store.find_similar(&text).await {
            Ok(similar) => {
                log::debug!("orchestrator: {} similar papers found", similar.len());
                let mut st = self.state.lock().unwrap();
                st.similar_papers = similar;
                st.last_notice = Some(Notice::success(UPLOAD_OK));
            }
            Err(e) => {
                log::error!("orchestrator: similarity search failed: {e}");
                self.post_notice(Notice::error(UPLOAD_FAILED));
            }
        }
    }

    /// Generate a summary of the current paper text.
    ///
    /// The phase is `Generating` strictly between invocation start and
    /// settlement of the single summarizer call, and settles to `Done` or
    /// `Failed` on every exit path.  A request arriving while one is in
    /// flight is refused rather than raced.
    async fn handle_generate(&self, format: Option<SummaryFormat>) {
        let text = {
            let mut st = self.state.lock().unwrap();
            if st.phase.is_busy() {
                log::warn!("orchestrator: generation already in flight, refusing");
                return;
            }
            st.phase = GenerationPhase::Generating;
            st.paper_text.clone().unwrap_or_default()
        };

        log::debug!(
            "orchestrator: generating {} summary",
            format.map_or("untagged", |f| f.tag())
        );

        match self.summarizer.summarize(&text, format).await {
            Ok(summary) => {
                let mut st = self.state.lock().unwrap();
                st.summary = Some(summary);
                st.phase = GenerationPhase::Done;
            }
            Err(e) => {
                log::error!("orchestrator: summary generation failed: {e}");
                let mut st = self.state.lock().unwrap();
                st.phase = GenerationPhase::Failed;
                st.last_notice = Some(Notice::error(SUMMARY_FAILED));
            }
        }
    }

    /// Convert text to speech with the selected voice and play the result.
    ///
    /// Empty text short-circuits with a notice — no remote call is issued.
    async fn handle_speak(&self, text: String) {
        if text.is_empty() {
            self.post_notice(Notice::error(SPEECH_EMPTY));
            return;
        }

        let voice_id = {
            let st = self.state.lock().unwrap();
            st.selected_voice.clone()
        };

        log::debug!(
            "orchestrator: synthesizing {} chars with voice {voice_id}",
            text.len()
        );

        match self.synthesizer.synthesize(&text, &voice_id).await {
            Ok(audio) => {
                if let Err(e) = self.playback.play(audio) {
                    log::error!("orchestrator: playback failed: {e}");
                    self.post_notice(Notice::error(SPEECH_FAILED));
                }
            }
            Err(e) => {
                log::error!("orchestrator: speech synthesis failed: {e}");
                self.post_notice(Notice::error(SPEECH_FAILED));
            }
        }
    }

    /// Change the selected voice; ids outside the catalog are refused.
    fn handle_select_voice(&self, id: String) {
        if !is_known_voice(&id) {
            log::warn!("orchestrator: unknown voice id {id:?}");
            self.post_notice(Notice::error("Unknown voice."));
            return;
        }

        let mut st = self.state.lock().unwrap();
        st.selected_voice = id;
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn post_notice(&self, notice: Notice) {
        let mut st = self.state.lock().unwrap();
        st.last_notice = Some(notice);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::orchestrator::state::{new_shared_state, NoticeKind};
    use crate::papers::{Paper, PaperError};
    use crate::speech::{NullPlayback, SpeechError};
    use crate::summary::SummaryError;

    const VOICE_SARAH: &str = "EXAVITQu4vr4xnSDxMaL";

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Paper store that records every call and can be told to fail a step.
    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<(String, String)>>, // (operation, text)
        fail_store: bool,
        fail_similar: bool,
    }

    impl RecordingStore {
        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaperStore for RecordingStore {
        async fn store(&self, paper_text: &str) -> Result<(), PaperError> {
            self.calls
                .lock()
                .unwrap()
                .push(("store".into(), paper_text.into()));
            if self.fail_store {
                return Err(PaperError::Request("connection refused".into()));
            }
            Ok(())
        }

        async fn find_similar(&self, paper_text: &str) -> Result<Vec<Paper>, PaperError> {
            self.calls
                .lock()
                .unwrap()
                .push(("similar".into(), paper_text.into()));
            if self.fail_similar {
                return Err(PaperError::Timeout);
            }
            let paper: Paper =
                serde_json::from_str(r#"{"title": "Related Work", "similarity": 0.8}"#).unwrap();
            Ok(vec![paper])
        }

        async fn recent(&self, _limit: usize) -> Result<Vec<Paper>, PaperError> {
            Ok(Vec::new())
        }
    }

    /// Summarizer that records its input, observes the session phase at call
    /// time, and answers with a fixed reply.
    struct ObservingSummarizer {
        reply: String,
        state: SharedState,
        seen: Mutex<Vec<(String, Option<SummaryFormat>, GenerationPhase)>>,
    }

    impl ObservingSummarizer {
        fn new(reply: &str, state: SharedState) -> Self {
            Self {
                reply: reply.into(),
                state,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Summarizer for ObservingSummarizer {
        async fn summarize(
            &self,
            text: &str,
            format: Option<SummaryFormat>,
        ) -> Result<String, SummaryError> {
            let phase_during = self.state.lock().unwrap().phase;
            self.seen
                .lock()
                .unwrap()
                .push((text.into(), format, phase_during));
            Ok(self.reply.clone())
        }
    }

    /// Summarizer that always fails.
    struct FailSummarizer;

    #[async_trait]
    impl Summarizer for FailSummarizer {
        async fn summarize(
            &self,
            _text: &str,
            _format: Option<SummaryFormat>,
        ) -> Result<String, SummaryError> {
            Err(SummaryError::Backend {
                status: 500,
                message: "boom".into(),
            })
        }
    }

    /// Synthesizer that records its input, or fails on demand.
    #[derive(Default)]
    struct RecordingSynth {
        calls: Mutex<Vec<(String, String)>>, // (text, voice_id)
        fail: bool,
    }

    #[async_trait]
    impl SpeechSynthesizer for RecordingSynth {
        async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SpeechError> {
            self.calls
                .lock()
                .unwrap()
                .push((text.into(), voice_id.into()));
            if self.fail {
                return Err(SpeechError::Backend {
                    status: 500,
                    message: "synthesis down".into(),
                });
            }
            Ok(vec![0xff, 0xfb, 0x90]) // arbitrary mpeg-ish bytes
        }
    }

    /// Playback double that counts how often audio was handed over.
    #[derive(Default)]
    struct CountingPlayback {
        plays: Mutex<usize>,
    }

    impl Playback for CountingPlayback {
        fn play(&self, _audio: Vec<u8>) -> Result<(), SpeechError> {
            *self.plays.lock().unwrap() += 1;
            Ok(())
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    struct Fixture {
        state: SharedState,
        store: Arc<RecordingStore>,
        summarizer: Arc<ObservingSummarizer>,
        synth: Arc<RecordingSynth>,
        playback: Arc<CountingPlayback>,
    }

    fn make_fixture(store: RecordingStore, synth: RecordingSynth, reply: &str) -> (Orchestrator, Fixture) {
        let state = new_shared_state(VOICE_SARAH);
        let store = Arc::new(store);
        let summarizer = Arc::new(ObservingSummarizer::new(reply, Arc::clone(&state)));
        let synth = Arc::new(synth);
        let playback = Arc::new(CountingPlayback::default());

        let orc = Orchestrator::new(
            Arc::clone(&state),
            Arc::clone(&store) as Arc<dyn PaperStore>,
            Arc::clone(&summarizer) as Arc<dyn Summarizer>,
            Arc::clone(&synth) as Arc<dyn SpeechSynthesizer>,
            Arc::clone(&playback) as Arc<dyn Playback>,
        );

        (
            orc,
            Fixture {
                state,
                store,
                summarizer,
                synth,
                playback,
            },
        )
    }

    async fn run_commands(orc: Orchestrator, commands: Vec<Command>) {
        let (tx, rx) = mpsc::channel(8);
        for command in commands {
            tx.send(command).await.unwrap();
        }
        drop(tx); // close channel so run() returns
        orc.run(rx).await;
    }

    // -----------------------------------------------------------------------
    // Upload flow
    // -----------------------------------------------------------------------

    /// Upload must issue store then similar, in order, with the same text.
    #[tokio::test]
    async fn upload_issues_store_then_similar_with_same_text() {
        let (orc, fx) = make_fixture(RecordingStore::default(), RecordingSynth::default(), "");

        run_commands(orc, vec![Command::UploadPaper("Paper X body".into())]).await;

        let calls = fx.store.calls();
        assert_eq!(
            calls,
            vec![
                ("store".to_string(), "Paper X body".to_string()),
                ("similar".to_string(), "Paper X body".to_string()),
            ]
        );

        let st = fx.state.lock().unwrap();
        assert_eq!(st.paper_text.as_deref(), Some("Paper X body"));
        assert_eq!(st.similar_papers.len(), 1);
        let notice = st.last_notice.as_ref().expect("success notice");
        assert_eq!(notice.kind, NoticeKind::Success);
    }

    /// Setting new paper text must clear any previously held summary.
    #[tokio::test]
    async fn upload_clears_stale_summary() {
        let (orc, fx) = make_fixture(RecordingStore::default(), RecordingSynth::default(), "");
        fx.state.lock().unwrap().summary = Some("old summary".into());

        run_commands(orc, vec![Command::UploadPaper("new text".into())]).await;

        let st = fx.state.lock().unwrap();
        assert!(st.summary.is_none());
        assert_eq!(st.paper_text.as_deref(), Some("new text"));
    }

    /// A store failure skips the similar call entirely and posts the generic
    /// failure notice.
    #[tokio::test]
    async fn store_failure_skips_similar_call() {
        let store = RecordingStore {
            fail_store: true,
            ..Default::default()
        };
        let (orc, fx) = make_fixture(store, RecordingSynth::default(), "");

        run_commands(orc, vec![Command::UploadPaper("body".into())]).await;

        let calls = fx.store.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "store");

        let st = fx.state.lock().unwrap();
        let notice = st.last_notice.as_ref().expect("failure notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.description, UPLOAD_FAILED);
    }

    /// A similar-search failure still leaves the store call issued (no
    /// rollback) and collapses to the same generic notice.
    #[tokio::test]
    async fn similar_failure_keeps_store_side_effect() {
        let store = RecordingStore {
            fail_similar: true,
            ..Default::default()
        };
        let (orc, fx) = make_fixture(store, RecordingSynth::default(), "");

        run_commands(orc, vec![Command::UploadPaper("body".into())]).await;

        let calls = fx.store.calls();
        assert_eq!(calls.len(), 2);

        let st = fx.state.lock().unwrap();
        assert!(st.similar_papers.is_empty());
        let notice = st.last_notice.as_ref().expect("failure notice");
        assert_eq!(notice.description, UPLOAD_FAILED);
    }

    // -----------------------------------------------------------------------
    // Summary generation
    // -----------------------------------------------------------------------

    /// Success path: the summarizer receives the current paper text and the
    /// requested format, and its reply lands in session state.
    #[tokio::test]
    async fn generate_summary_success_sets_summary() {
        let (orc, fx) = make_fixture(
            RecordingStore::default(),
            RecordingSynth::default(),
            "Flowchart: A->B",
        );

        run_commands(
            orc,
            vec![
                Command::UploadPaper("Graph theory basics".into()),
                Command::GenerateSummary(Some(SummaryFormat::Flowchart)),
            ],
        )
        .await;

        let seen = fx.summarizer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1, "exactly one downstream call per invocation");
        let (text, format, phase_during) = &seen[0];
        assert_eq!(text, "Graph theory basics");
        assert_eq!(*format, Some(SummaryFormat::Flowchart));
        assert_eq!(*phase_during, GenerationPhase::Generating);

        let st = fx.state.lock().unwrap();
        assert_eq!(st.summary.as_deref(), Some("Flowchart: A->B"));
        assert_eq!(st.phase, GenerationPhase::Done);
        assert!(!st.phase.is_busy());
    }

    /// The phase must be busy strictly during the summarizer call and settle
    /// afterwards, for the failure outcome too.
    #[tokio::test]
    async fn generate_summary_failure_resets_phase_and_leaves_summary_unset() {
        let state = new_shared_state(VOICE_SARAH);
        let store: Arc<dyn PaperStore> = Arc::new(RecordingStore::default());
        let summarizer: Arc<dyn Summarizer> = Arc::new(FailSummarizer);
        let synth: Arc<dyn SpeechSynthesizer> = Arc::new(RecordingSynth::default());
        let playback: Arc<dyn Playback> = Arc::new(NullPlayback);

        let orc = Orchestrator::new(Arc::clone(&state), store, summarizer, synth, playback);

        run_commands(
            orc,
            vec![
                Command::UploadPaper("body".into()),
                Command::GenerateSummary(Some(SummaryFormat::Abstract)),
            ],
        )
        .await;

        let st = state.lock().unwrap();
        assert!(st.summary.is_none());
        assert_eq!(st.phase, GenerationPhase::Failed);
        assert!(!st.phase.is_busy());
        let notice = st.last_notice.as_ref().expect("failure notice");
        assert_eq!(notice.description, SUMMARY_FAILED);
    }

    /// A generation request arriving while one is marked in flight must be
    /// refused without calling the summarizer.
    #[tokio::test]
    async fn generation_refused_while_busy() {
        let (orc, fx) = make_fixture(RecordingStore::default(), RecordingSynth::default(), "s");
        fx.state.lock().unwrap().phase = GenerationPhase::Generating;

        run_commands(orc, vec![Command::GenerateSummary(Some(SummaryFormat::Full))]).await;

        assert!(fx.summarizer.seen.lock().unwrap().is_empty());
    }

    /// An unrecognized format tag is carried through as `None` (bare prompt)
    /// rather than being rejected.
    #[tokio::test]
    async fn untagged_format_is_passed_through() {
        let (orc, fx) = make_fixture(RecordingStore::default(), RecordingSynth::default(), "s");

        run_commands(
            orc,
            vec![
                Command::UploadPaper("body".into()),
                Command::GenerateSummary(None),
            ],
        )
        .await;

        let seen = fx.summarizer.seen.lock().unwrap();
        assert_eq!(seen[0].1, None);
    }

    // -----------------------------------------------------------------------
    // Text to speech
    // -----------------------------------------------------------------------

    /// Empty text must never issue a network call and must surface the
    /// "enter some text" notice.
    #[tokio::test]
    async fn speak_empty_text_issues_no_call() {
        let (orc, fx) = make_fixture(RecordingStore::default(), RecordingSynth::default(), "");

        run_commands(orc, vec![Command::Speak(String::new())]).await;

        assert!(fx.synth.calls.lock().unwrap().is_empty());
        assert_eq!(*fx.playback.plays.lock().unwrap(), 0);

        let st = fx.state.lock().unwrap();
        let notice = st.last_notice.as_ref().expect("notice");
        assert_eq!(notice.description, SPEECH_EMPTY);
    }

    /// Speak sends `{text, voiceId}` and hands the audio to playback once.
    #[tokio::test]
    async fn speak_sends_text_and_selected_voice() {
        let (orc, fx) = make_fixture(RecordingStore::default(), RecordingSynth::default(), "");

        run_commands(orc, vec![Command::Speak("Hello world".into())]).await;

        let calls = fx.synth.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![("Hello world".to_string(), VOICE_SARAH.to_string())]
        );
        assert_eq!(*fx.playback.plays.lock().unwrap(), 1);
    }

    /// A synthesis failure posts the generic speech notice and never reaches
    /// playback.
    #[tokio::test]
    async fn speak_synthesis_failure_posts_notice() {
        let synth = RecordingSynth {
            fail: true,
            ..Default::default()
        };
        let (orc, fx) = make_fixture(RecordingStore::default(), synth, "");

        run_commands(orc, vec![Command::Speak("Hello".into())]).await;

        assert_eq!(*fx.playback.plays.lock().unwrap(), 0);
        let st = fx.state.lock().unwrap();
        let notice = st.last_notice.as_ref().expect("notice");
        assert_eq!(notice.description, SPEECH_FAILED);
    }

    /// The voice selected at speak time is the one sent downstream.
    #[tokio::test]
    async fn speak_uses_newly_selected_voice() {
        let (orc, fx) = make_fixture(RecordingStore::default(), RecordingSynth::default(), "");

        run_commands(
            orc,
            vec![
                Command::SelectVoice("TX3LPaxmHKxFdv7VOQHJ".into()),
                Command::Speak("Hi".into()),
            ],
        )
        .await;

        let calls = fx.synth.calls.lock().unwrap();
        assert_eq!(calls[0].1, "TX3LPaxmHKxFdv7VOQHJ");
    }

    // -----------------------------------------------------------------------
    // Voice selection
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn unknown_voice_is_refused() {
        let (orc, fx) = make_fixture(RecordingStore::default(), RecordingSynth::default(), "");

        run_commands(orc, vec![Command::SelectVoice("bogus".into())]).await;

        let st = fx.state.lock().unwrap();
        assert_eq!(st.selected_voice, VOICE_SARAH);
        let notice = st.last_notice.as_ref().expect("notice");
        assert_eq!(notice.kind, NoticeKind::Error);
    }
}
