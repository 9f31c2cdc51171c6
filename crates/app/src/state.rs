//! State management for the Plott app
//!
//! `AppState` owns one sub-store per concern (history, notifications,
//! overlays, accessibility) plus the prompt/result state of the main view.
//! Network work runs on a background thread and reports back through a
//! channel that the UI drains once per frame.

use crate::accessibility::AccessibilityState;
use crate::export::{self, ShareTarget};
use crate::history::HistoryManager;
use crate::modals::confirm_dialog::CLEAR_HISTORY_QUESTION;
use crate::modals::{ConfirmDialog, Modal, ModalResult};
use crate::notifications::NotificationQueue;
use crate::overlays::{KeyPress, Overlay, OverlayCoordinator, ShortcutAction, ShortcutContext};
use crate::store::StoreHandle;
use crate::utils::{now_millis, word_count};
use providers::probe::{check_primary, PROBE_FAILED_MESSAGE, PROBE_FAILED_TITLE};
use providers::EndpointRouter;
use shared::chart::{ChartResult, GenerationResult};
use shared::error::{ClientError, RequestKind};
use shared::events::NotificationKind;
use shared::preferences::Theme;
use shared::settings::ClientSettings;
use std::future::Future;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

pub const IDLE_LOADING_MESSAGE: &str = "Generating your diagrams...";

/// Progress messages cycled while a generation is in flight
pub const LOADING_MESSAGES: [&str; 6] = [
    "Analyzing your request...",
    "Identifying optimal chart types...",
    "Generating sample data...",
    "Creating visualizations...",
    "Applying finishing touches...",
    "Almost there...",
];

pub const LOADING_MESSAGE_INTERVAL: Duration = Duration::from_millis(2500);

/// Result of a background job, applied on the UI thread
#[derive(Debug)]
pub enum Completion {
    Generated {
        seq: u64,
        prompt: String,
        outcome: Result<GenerationResult, ClientError>,
    },
    Enhanced {
        seq: u64,
        original: String,
        outcome: Result<String, ClientError>,
    },
    Probed(Result<(), ClientError>),
    Exported(Result<PathBuf, String>),
}

/// Run `job` on its own thread with a private runtime (non-blocking for the UI).
/// If the runtime cannot start, `on_failure` is delivered instead.
pub fn run_in_background<F>(tx: Sender<Completion>, job: F, on_failure: Completion)
where
    F: Future<Output = Completion> + Send + 'static,
{
    std::thread::spawn(move || {
        let completion = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(job),
            Err(e) => {
                error!("failed to start async runtime: {}", e);
                on_failure
            }
        };
        let _ = tx.send(completion);
    });
}

fn runtime_failure(kind: RequestKind) -> ClientError {
    ClientError::exhausted(kind, Vec::new())
}

/// Main application state
pub struct AppState {
    pub settings: ClientSettings,
    router: EndpointRouter,
    pub history: HistoryManager,
    pub notifications: NotificationQueue,
    pub overlays: OverlayCoordinator,
    pub accessibility: AccessibilityState,
    pub clear_dialog: ConfirmDialog,

    /// Current prompt text
    prompt: String,
    pub is_loading: bool,
    pub is_enhancing: bool,
    pub is_downloading: bool,
    /// Inline error banner for the last generation
    pub error: Option<String>,
    pub result: Option<GenerationResult>,
    selected_chart: Option<usize>,
    loading_started_at: Option<Instant>,

    /// Sequence numbers of the latest started request per kind
    submit_seq: u64,
    enhance_seq: u64,

    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl AppState {
    pub fn new(settings: ClientSettings, store: StoreHandle, system_theme: Option<Theme>) -> Self {
        let router = EndpointRouter::from_settings(&settings);
        Self::with_router(settings, router, store, system_theme)
    }

    pub fn with_router(
        settings: ClientSettings,
        router: EndpointRouter,
        store: StoreHandle,
        system_theme: Option<Theme>,
    ) -> Self {
        let (tx, rx) = channel();
        Self {
            history: HistoryManager::load(store.clone(), settings.history_limit),
            notifications: NotificationQueue::new(Duration::from_millis(
                settings.notification_ttl_ms,
            )),
            overlays: OverlayCoordinator::new(),
            accessibility: AccessibilityState::load(store, system_theme),
            clear_dialog: ConfirmDialog::new("clear_history", CLEAR_HISTORY_QUESTION),
            settings,
            router,
            prompt: String::new(),
            is_loading: false,
            is_enhancing: false,
            is_downloading: false,
            error: None,
            result: None,
            selected_chart: None,
            loading_started_at: None,
            submit_seq: 0,
            enhance_seq: 0,
            tx,
            rx,
        }
    }

    // ----- prompt -----

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt unless the edit exceeds the word limit.
    pub fn set_prompt(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if word_count(&text) > self.settings.max_prompt_words {
            return false;
        }
        self.prompt = text;
        true
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.prompt)
    }

    pub fn prompt_ready(&self) -> bool {
        !self.prompt.trim().is_empty()
    }

    pub fn shortcut_context(&self) -> ShortcutContext {
        ShortcutContext {
            prompt_ready: self.prompt_ready(),
            is_loading: self.is_loading,
            is_enhancing: self.is_enhancing,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.prompt_ready() && !self.is_loading && !self.is_enhancing
    }

    pub fn can_enhance(&self) -> bool {
        self.prompt_ready() && !self.is_enhancing && !self.is_loading
    }

    // ----- generation -----

    /// Validate and mark a submission as started. Returns the sequence number
    /// and trimmed prompt to send, or `None` if nothing should be sent.
    pub fn begin_submit(&mut self) -> Option<(u64, String)> {
        if self.is_loading || self.is_enhancing {
            return None;
        }
        let trimmed = self.prompt.trim();
        if trimmed.is_empty() {
            self.error = Some(ClientError::empty_prompt().user_message());
            return None;
        }
        let prompt = trimmed.to_string();

        self.is_loading = true;
        self.error = None;
        self.result = None;
        self.selected_chart = None;
        self.loading_started_at = Some(Instant::now());
        self.submit_seq += 1;
        info!(seq = self.submit_seq, "submitting prompt");
        Some((self.submit_seq, prompt))
    }

    pub fn submit(&mut self) {
        let Some((seq, prompt)) = self.begin_submit() else {
            return;
        };
        let router = self.router.clone();
        let on_failure = Completion::Generated {
            seq,
            prompt: prompt.clone(),
            outcome: Err(runtime_failure(RequestKind::Generate)),
        };
        run_in_background(
            self.tx.clone(),
            async move {
                let outcome = router.submit(&prompt).await;
                Completion::Generated {
                    seq,
                    prompt,
                    outcome,
                }
            },
            on_failure,
        );
    }

    /// Submit and apply the outcome inline (no background thread).
    pub async fn submit_and_wait(&mut self) {
        let Some((seq, prompt)) = self.begin_submit() else {
            return;
        };
        let outcome = self.router.submit(&prompt).await;
        self.apply_generation(seq, &prompt, outcome);
    }

    pub fn apply_generation(
        &mut self,
        seq: u64,
        prompt: &str,
        outcome: Result<GenerationResult, ClientError>,
    ) {
        if seq != self.submit_seq {
            debug!(seq, latest = self.submit_seq, "dropping stale generation result");
            return;
        }
        self.is_loading = false;
        self.loading_started_at = None;

        match outcome {
            Ok(result) => {
                self.history.add(prompt);
                self.selected_chart = result.first_chart().map(|_| 0);
                info!(charts = result.charts.len(), "generation finished");
                self.result = Some(result);
            }
            Err(e) => {
                let message = e.user_message();
                self.error = Some(message.clone());
                self.notifications.push(
                    RequestKind::Generate.failure_title(),
                    message,
                    NotificationKind::Error,
                );
            }
        }
    }

    /// Progress text for the loading indicator.
    pub fn loading_message(&self, now: Instant) -> &'static str {
        let Some(started) = self.loading_started_at.filter(|_| self.is_loading) else {
            return IDLE_LOADING_MESSAGE;
        };
        let ticks = now.saturating_duration_since(started).as_millis()
            / LOADING_MESSAGE_INTERVAL.as_millis();
        if ticks == 0 {
            IDLE_LOADING_MESSAGE
        } else {
            LOADING_MESSAGES[((ticks - 1) as usize) % LOADING_MESSAGES.len()]
        }
    }

    pub fn select_chart(&mut self, index: usize) -> bool {
        let in_range = self
            .result
            .as_ref()
            .is_some_and(|r| index < r.charts.len());
        if in_range {
            self.selected_chart = Some(index);
        }
        in_range
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_chart
    }

    pub fn selected_chart(&self) -> Option<&ChartResult> {
        let index = self.selected_chart?;
        self.result.as_ref()?.charts.get(index)
    }

    // ----- enhancement -----

    /// Mark an enhancement as started. Returns the sequence number and the
    /// prompt as typed (restored if enhancement fails).
    pub fn begin_enhance(&mut self) -> Option<(u64, String)> {
        if !self.can_enhance() {
            return None;
        }
        self.is_enhancing = true;
        self.enhance_seq += 1;
        Some((self.enhance_seq, self.prompt.clone()))
    }

    pub fn enhance(&mut self) {
        let Some((seq, original)) = self.begin_enhance() else {
            return;
        };
        let router = self.router.clone();
        let on_failure = Completion::Enhanced {
            seq,
            original: original.clone(),
            outcome: Err(runtime_failure(RequestKind::Enhance)),
        };
        run_in_background(
            self.tx.clone(),
            async move {
                let outcome = router.enhance(&original).await;
                Completion::Enhanced {
                    seq,
                    original,
                    outcome,
                }
            },
            on_failure,
        );
    }

    pub async fn enhance_and_wait(&mut self) {
        let Some((seq, original)) = self.begin_enhance() else {
            return;
        };
        let outcome = self.router.enhance(&original).await;
        self.apply_enhancement(seq, original, outcome);
    }

    pub fn apply_enhancement(
        &mut self,
        seq: u64,
        original: String,
        outcome: Result<String, ClientError>,
    ) {
        if seq != self.enhance_seq {
            debug!(seq, latest = self.enhance_seq, "dropping stale enhancement result");
            return;
        }
        self.is_enhancing = false;

        match outcome {
            Ok(text) => {
                self.prompt = text;
                self.notifications.push(
                    "Prompt Enhanced",
                    "Your prompt has been magically improved!",
                    NotificationKind::Success,
                );
            }
            Err(e) => {
                self.prompt = original;
                self.notifications.push(
                    RequestKind::Enhance.failure_title(),
                    e.user_message(),
                    NotificationKind::Error,
                );
            }
        }
    }

    // ----- connectivity -----

    pub fn start_probe(&self) {
        let settings = self.settings.clone();
        run_in_background(
            self.tx.clone(),
            async move { Completion::Probed(check_primary(&settings).await) },
            Completion::Probed(Ok(())),
        );
    }

    pub async fn probe_and_wait(&mut self) {
        let outcome = check_primary(&self.settings).await;
        self.apply_probe(outcome);
    }

    pub fn apply_probe(&mut self, outcome: Result<(), ClientError>) {
        if outcome.is_err() {
            self.notifications.push(
                PROBE_FAILED_TITLE,
                PROBE_FAILED_MESSAGE,
                NotificationKind::Warning,
            );
        }
    }

    // ----- history -----

    /// Load a past prompt into the editor and close the history panel.
    pub fn use_from_history(&mut self, id: i64) -> bool {
        let Some(entry) = self.history.get(id) else {
            return false;
        };
        self.prompt = entry.text.clone();
        self.overlays.close(Overlay::History);
        true
    }

    pub fn request_clear_history(&mut self) {
        self.clear_dialog.open();
    }

    /// Act on the clear-history dialog once the user has answered.
    pub fn resolve_clear_history(&mut self) {
        match self.clear_dialog.take_result() {
            ModalResult::Confirmed(()) => {
                self.history.clear();
                self.overlays.close(Overlay::History);
            }
            ModalResult::Cancelled | ModalResult::Pending => {}
        }
    }

    // ----- export / share -----

    pub fn download_selected(&mut self) {
        if self.is_downloading {
            return;
        }
        let Some(chart) = self.selected_chart().cloned() else {
            return;
        };
        self.is_downloading = true;
        let millis = now_millis();
        run_in_background(
            self.tx.clone(),
            async move {
                let saved = export::save_chart(&chart, &export::download_dir(), millis)
                    .await
                    .map_err(|e| e.to_string());
                Completion::Exported(saved)
            },
            Completion::Exported(Err("background runtime unavailable".to_string())),
        );
    }

    pub fn apply_export(&mut self, outcome: Result<PathBuf, String>) {
        self.is_downloading = false;
        match outcome {
            Ok(path) => {
                info!(path = %path.display(), "chart saved");
                self.notifications.push(
                    "Download Complete",
                    "Image saved to your downloads folder",
                    NotificationKind::Success,
                );
            }
            Err(e) => {
                error!("download failed: {}", e);
                self.notifications
                    .push("Download Failed", e, NotificationKind::Error);
            }
        }
    }

    pub fn toggle_share_menu(&mut self) -> bool {
        self.overlays.toggle(Overlay::ShareMenu)
    }

    pub fn share_to(&mut self, target: ShareTarget) {
        let Some(chart_type) = self.selected_chart().map(|c| c.chart_type.clone()) else {
            return;
        };
        if let Err(e) = target.open(&chart_type, &self.settings.share_url) {
            error!(target = target.label(), "share failed: {}", e);
            self.notifications.push(
                "Share Failed",
                "Unable to share diagram",
                NotificationKind::Error,
            );
        }
        self.overlays.close(Overlay::ShareMenu);
    }

    // ----- input & frame loop -----

    /// Route a key press through the overlay coordinator and start any
    /// request it asks for.
    pub fn handle_key(&mut self, press: KeyPress) -> Option<ShortcutAction> {
        let action = self.overlays.handle_key(press, self.shortcut_context());
        match action {
            Some(ShortcutAction::Submit) => self.submit(),
            Some(ShortcutAction::Enhance) => self.enhance(),
            _ => {}
        }
        action
    }

    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Generated {
                seq,
                prompt,
                outcome,
            } => self.apply_generation(seq, &prompt, outcome),
            Completion::Enhanced {
                seq,
                original,
                outcome,
            } => self.apply_enhancement(seq, original, outcome),
            Completion::Probed(outcome) => self.apply_probe(outcome),
            Completion::Exported(outcome) => self.apply_export(outcome),
        }
    }

    /// Apply finished background jobs (non-blocking).
    pub fn poll_completions(&mut self) {
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
        }
    }

    /// Per-frame housekeeping.
    pub fn tick(&mut self, now: Instant) {
        self.poll_completions();
        self.resolve_clear_history();
        self.notifications.sweep(now);
    }

    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_enhancing || self.is_downloading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlays::Key;
    use crate::store::PreferenceStore;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const UNREACHABLE: &str = "http://127.0.0.1:1";

    fn state_for(primary: &str, secondary: &str) -> AppState {
        let mut settings = ClientSettings::default();
        settings.primary.base_url = primary.to_string();
        settings.secondary.base_url = secondary.to_string();
        AppState::new(settings, PreferenceStore::in_memory().shared(), None)
    }

    fn offline() -> AppState {
        state_for(UNREACHABLE, UNREACHABLE)
    }

    fn chart(kind: &str) -> GenerationResult {
        GenerationResult::new(vec![ChartResult::new(kind, "r", "abc"), ChartResult::new("Pie", "r", "def")], None)
    }

    #[tokio::test]
    async fn test_successful_submission_records_history_and_selects_first_chart() {
        let primary = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-diagram"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "charts": [
                    { "chart_type": "Flowchart", "reason": "shows steps", "image": "abc123" },
                    { "chart_type": "Sequence", "reason": "order", "image": "https://img/seq.png" }
                ]
            })))
            .expect(2)
            .mount(&primary)
            .await;

        let mut state = state_for(&primary.uri(), UNREACHABLE);
        state.set_prompt("Compare Q1 and Q2 sales");
        state.submit_and_wait().await;

        assert!(!state.is_loading);
        assert_eq!(state.selected_index(), Some(0));
        let selected = state.selected_chart().unwrap();
        assert_eq!(selected.chart_type, "Flowchart");
        assert_eq!(selected.image, "data:image/png;base64,abc123");
        assert_eq!(state.history.len(), 1);
        assert!(state.notifications.is_empty());

        state.submit_and_wait().await;
        assert_eq!(state.history.len(), 1);
    }

    #[tokio::test]
    async fn test_both_endpoints_failing_notifies_once_without_history() {
        let primary = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&primary)
            .await;
        let secondary = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "error": "Service warming up" })))
            .mount(&secondary)
            .await;

        let mut state = state_for(&primary.uri(), &secondary.uri());
        state.set_prompt("org chart");
        state.submit_and_wait().await;

        assert!(!state.is_loading);
        assert!(state.history.is_empty());
        assert!(state.result.is_none());
        assert_eq!(state.error.as_deref(), Some("Service warming up"));
        let notes: Vec<_> = state.notifications.visible().collect();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Generation Failed");
        assert_eq!(notes[0].kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_empty_prompt_makes_no_request() {
        let primary = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&primary)
            .await;

        let mut state = state_for(&primary.uri(), &primary.uri());
        state.set_prompt("   ");
        state.submit_and_wait().await;

        assert_eq!(state.error.as_deref(), Some("Please enter a prompt"));
        assert!(!state.is_loading);
        assert!(state.notifications.is_empty());
    }

    #[tokio::test]
    async fn test_enhancement_failure_restores_prompt() {
        let mut state = offline();
        state.set_prompt("sales  ");
        state.enhance_and_wait().await;

        assert_eq!(state.prompt(), "sales  ");
        assert!(!state.is_enhancing);
        let note = state.notifications.visible().next().unwrap();
        assert_eq!(note.title, "Enhancement Failed");
        assert_eq!(note.message, "Failed to enhance prompt");
    }

    #[tokio::test]
    async fn test_enhancement_success_replaces_prompt() {
        let primary = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/enhance-prompt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "enhanced_prompt": "A bar chart of monthly sales" })))
            .mount(&primary)
            .await;

        let mut state = state_for(&primary.uri(), UNREACHABLE);
        state.set_prompt("sales");
        state.enhance_and_wait().await;

        assert_eq!(state.prompt(), "A bar chart of monthly sales");
        assert_eq!(state.notifications.visible().next().unwrap().kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_failed_probe_warns_but_keeps_app_usable() {
        let mut state = offline();
        state.probe_and_wait().await;
        let note = state.notifications.visible().next().unwrap();
        assert_eq!(note.kind, NotificationKind::Warning);
        assert_eq!(note.title, "API Connection Issue");

        state.set_prompt("still works");
        assert!(state.can_submit());
    }

    #[test]
    fn test_busy_flags_are_mutually_exclusive() {
        let mut state = offline();
        state.set_prompt("x");
        assert!(state.begin_enhance().is_some());
        assert!(state.begin_submit().is_none());
        assert!(state.begin_enhance().is_none());
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let mut state = offline();
        state.set_prompt("first");
        let (first, _) = state.begin_submit().unwrap();
        state.apply_generation(first, "first", Ok(chart("Bar")));

        state.set_prompt("second");
        let (second, _) = state.begin_submit().unwrap();
        state.apply_generation(first, "first", Ok(chart("Stale")));
        assert!(state.is_loading);
        assert!(state.result.is_none());

        state.apply_generation(second, "second", Ok(chart("Line")));
        assert_eq!(state.selected_chart().unwrap().chart_type, "Line");
        assert_eq!(state.history.len(), 2);
    }

    #[test]
    fn test_begin_submit_clears_previous_result() {
        let mut state = offline();
        state.set_prompt("first");
        let (seq, _) = state.begin_submit().unwrap();
        state.apply_generation(seq, "first", Ok(chart("Bar")));
        assert!(state.select_chart(1));
        assert!(!state.select_chart(5));

        state.begin_submit();
        assert!(state.result.is_none());
        assert!(state.selected_chart().is_none());
    }

    #[test]
    fn test_word_limit() {
        let mut state = offline();
        let ok = vec!["word"; 150].join(" ");
        let too_long = vec!["word"; 151].join(" ");
        assert!(state.set_prompt(ok.clone()));
        assert!(!state.set_prompt(too_long));
        assert_eq!(state.prompt(), ok);
        assert_eq!(state.word_count(), 150);
    }

    #[test]
    fn test_loading_message_rotation() {
        let mut state = offline();
        let now = Instant::now();
        assert_eq!(state.loading_message(now), IDLE_LOADING_MESSAGE);

        state.set_prompt("x");
        state.begin_submit();
        let started = state.loading_started_at.unwrap();
        assert_eq!(state.loading_message(started), IDLE_LOADING_MESSAGE);
        assert_eq!(state.loading_message(started + Duration::from_millis(2500)), LOADING_MESSAGES[0]);
        assert_eq!(state.loading_message(started + Duration::from_millis(7600)), LOADING_MESSAGES[2]);
        assert_eq!(state.loading_message(started + Duration::from_millis(2500 * 7)), LOADING_MESSAGES[0]);
    }

    #[test]
    fn test_use_from_history_closes_panel() {
        let mut state = offline();
        state.history.add("timeline of releases");
        let id = state.history.list()[0].id;
        state.overlays.open(Overlay::History);

        assert!(state.use_from_history(id));
        assert_eq!(state.prompt(), "timeline of releases");
        assert!(!state.overlays.is_open(Overlay::History));
        assert!(!state.use_from_history(id + 1));
    }

    #[test]
    fn test_clear_history_requires_confirmation() {
        let mut state = offline();
        state.history.add("a");
        state.overlays.open(Overlay::History);

        state.request_clear_history();
        state.clear_dialog.answer(false);
        state.resolve_clear_history();
        assert_eq!(state.history.len(), 1);

        state.request_clear_history();
        state.resolve_clear_history();
        assert_eq!(state.history.len(), 1);

        state.clear_dialog.answer(true);
        state.resolve_clear_history();
        assert!(state.history.is_empty());
        assert!(!state.overlays.is_open(Overlay::History));
    }

    #[test]
    fn test_escape_via_app_state() {
        let mut state = offline();
        state.overlays.open(Overlay::Help);
        state.overlays.open(Overlay::History);
        let action = state.handle_key(KeyPress::plain(Key::Escape));
        assert_eq!(action, Some(ShortcutAction::Dismissed(Overlay::Help)));
        assert!(state.overlays.is_open(Overlay::History));
    }

    #[test]
    fn test_completions_arrive_through_channel() {
        let mut state = offline();
        state.tx.send(Completion::Probed(Ok(()))).unwrap();
        state
            .tx
            .send(Completion::Exported(Err("disk full".into())))
            .unwrap();
        state.is_downloading = true;
        state.poll_completions();

        assert!(!state.is_downloading);
        let titles: Vec<_> = state.notifications.visible().map(|n| n.title.clone()).collect();
        assert_eq!(titles, vec!["Download Failed".to_string()]);
    }

    #[test]
    fn test_tick_expires_notifications() {
        let mut state = offline();
        state.notifications.push("Copied!", "done", NotificationKind::Success);
        state.tick(Instant::now() + Duration::from_millis(3001));
        assert!(state.notifications.is_empty());
    }
}
