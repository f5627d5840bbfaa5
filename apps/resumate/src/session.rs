//! The editor session: one user's live editing state.
//!
//! Wires the persistent stores to the render/layout/export engines and the
//! review backend. Review and export are single-flight — a second request
//! while one is running is rejected instead of queued, matching the disabled
//! buttons in the editor.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::errors::AppError;
use crate::export::PdfExporter;
use crate::layout::measure::document_height;
use crate::layout::pagination::Paginator;
use crate::layout::zoom::ZoomController;
use crate::layout::{a4_page_size, Size};
use crate::models::{ResumeRecord, StylePreferences};
use crate::patch::ledger::{AiSuggestion, SuggestionLedger};
use crate::render::{templates, Document};
use crate::review::serialize::serialize_resume;
use crate::review::SuggestionBackend;
use crate::store::{ResumeStore, StyleStore};

const DEFAULT_TEMPLATE: &str = "classic-professional";

/// At-most-one-in-flight gate for an async operation.
struct SingleFlight {
    busy: AtomicBool,
}

impl SingleFlight {
    fn new() -> Self {
        SingleFlight {
            busy: AtomicBool::new(false),
        }
    }

    /// Claims the flight, or `None` if one is already running. The claim is
    /// released when the guard drops, on success and error alike.
    fn try_begin(&self) -> Option<FlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard { flight: self })
    }
}

struct FlightGuard<'a> {
    flight: &'a SingleFlight,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flight.busy.store(false, Ordering::Release);
    }
}

/// A user-facing notification the frontend surfaces as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn export_saved() -> Self {
        Notice {
            kind: NoticeKind::Info,
            title: "Resume Saved!".to_string(),
            message: "Your resume has been downloaded as a PDF.".to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Destructive,
            title: "Uh oh! Something went wrong.".to_string(),
            message: message.into(),
        }
    }
}

pub struct EditorSession {
    resume: ResumeStore,
    styles: StyleStore,
    backend: Arc<dyn SuggestionBackend>,
    exporter: PdfExporter,
    ledger: Mutex<SuggestionLedger>,
    /// Suggestions from the latest review round, in model order.
    suggestions: Mutex<Vec<AiSuggestion>>,
    template_id: Mutex<String>,
    paginator: Mutex<Paginator>,
    zoom: tokio::sync::Mutex<ZoomController>,
    review_flight: SingleFlight,
    export_flight: SingleFlight,
}

impl EditorSession {
    pub fn new(
        resume: ResumeStore,
        styles: StyleStore,
        backend: Arc<dyn SuggestionBackend>,
        exporter: PdfExporter,
    ) -> Self {
        EditorSession {
            resume,
            styles,
            backend,
            exporter,
            ledger: Mutex::new(SuggestionLedger::new()),
            suggestions: Mutex::new(Vec::new()),
            template_id: Mutex::new(DEFAULT_TEMPLATE.to_string()),
            paginator: Mutex::new(Paginator::new()),
            zoom: tokio::sync::Mutex::new(ZoomController::new()),
            review_flight: SingleFlight::new(),
            export_flight: SingleFlight::new(),
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // Record and styles
    // ────────────────────────────────────────────────────────────────────

    pub fn resume(&self) -> ResumeRecord {
        self.resume.snapshot()
    }

    pub fn styles(&self) -> StylePreferences {
        self.styles.snapshot()
    }

    pub fn replace_resume(&self, next: ResumeRecord) {
        self.resume.replace(next);
        self.paginator.lock().expect("paginator lock").invalidate();
    }

    pub fn replace_styles(&self, next: StylePreferences) {
        self.styles.replace(next);
        self.paginator.lock().expect("paginator lock").invalidate();
    }

    pub fn reset_styles(&self) {
        self.styles.reset();
        self.paginator.lock().expect("paginator lock").invalidate();
    }

    // ────────────────────────────────────────────────────────────────────
    // Template selection and preview
    // ────────────────────────────────────────────────────────────────────

    pub fn template_id(&self) -> String {
        self.template_id.lock().expect("template lock").clone()
    }

    pub fn set_template(&self, id: &str) -> Result<(), AppError> {
        if templates::find(id).is_none() {
            return Err(AppError::TemplateNotFound(id.to_string()));
        }
        *self.template_id.lock().expect("template lock") = id.to_string();
        self.paginator.lock().expect("paginator lock").invalidate();
        Ok(())
    }

    /// Renders the current record with the selected template.
    pub fn document(&self) -> Document {
        let id = self.template_id();
        let template = templates::find(&id)
            .unwrap_or_else(|| templates::find(DEFAULT_TEMPLATE).expect("default template"));
        template.render(&self.resume.snapshot(), &self.styles.snapshot())
    }

    /// Re-measures the current document and commits the page count.
    pub fn refresh_preview(&self) -> usize {
        let ticket = {
            let paginator = self.paginator.lock().expect("paginator lock");
            paginator.begin_measure()
        };
        let height = document_height(&self.document());
        let mut paginator = self.paginator.lock().expect("paginator lock");
        paginator
            .complete_measure(ticket, height)
            .unwrap_or_else(|| paginator.page_count())
    }

    pub fn page_count(&self) -> usize {
        self.paginator.lock().expect("paginator lock").page_count()
    }

    // ────────────────────────────────────────────────────────────────────
    // Zoom
    // ────────────────────────────────────────────────────────────────────

    pub async fn zoom_level(&self) -> f32 {
        self.zoom.lock().await.level()
    }

    pub async fn zoom_in(&self) -> f32 {
        self.zoom.lock().await.zoom_in()
    }

    pub async fn zoom_out(&self) -> f32 {
        self.zoom.lock().await.zoom_out()
    }

    pub async fn zoom_to_fit(&self, viewport: Size) -> f32 {
        self.zoom.lock().await.fit(viewport, a4_page_size())
    }

    // ────────────────────────────────────────────────────────────────────
    // AI review
    // ────────────────────────────────────────────────────────────────────

    /// Runs one review round. Clears the previous round's suggestions and
    /// applied-suggestion records before calling the backend, so a stale
    /// undo can never target a field the new round re-suggested.
    pub async fn request_review(&self) -> Result<Vec<AiSuggestion>, AppError> {
        let _flight = self
            .review_flight
            .try_begin()
            .ok_or_else(|| AppError::Validation("a review is already in progress".to_string()))?;

        self.ledger.lock().expect("ledger lock").clear();
        self.suggestions.lock().expect("suggestions lock").clear();

        let text = serialize_resume(&self.resume.snapshot());
        let suggestions = self.backend.review(&text).await.map_err(|e| {
            warn!(error = %e, "review round failed");
            AppError::Review(e)
        })?;

        info!(count = suggestions.len(), "review round completed");
        *self.suggestions.lock().expect("suggestions lock") = suggestions.clone();
        Ok(suggestions)
    }

    pub fn suggestions(&self) -> Vec<AiSuggestion> {
        self.suggestions.lock().expect("suggestions lock").clone()
    }

    pub fn is_applied(&self, field: &str) -> bool {
        self.ledger.lock().expect("ledger lock").is_applied(field)
    }

    pub fn apply_suggestion(&self, suggestion: &AiSuggestion) -> Result<ResumeRecord, AppError> {
        let next = {
            let mut ledger = self.ledger.lock().expect("ledger lock");
            ledger.apply(&self.resume.snapshot(), suggestion)?
        };
        self.resume.replace(next.clone());
        self.paginator.lock().expect("paginator lock").invalidate();
        Ok(next)
    }

    pub fn undo_suggestion(&self, field: &str) -> Result<ResumeRecord, AppError> {
        let next = {
            let mut ledger = self.ledger.lock().expect("ledger lock");
            ledger.undo(&self.resume.snapshot(), field)?
        };
        self.resume.replace(next.clone());
        self.paginator.lock().expect("paginator lock").invalidate();
        Ok(next)
    }

    // ────────────────────────────────────────────────────────────────────
    // Export
    // ────────────────────────────────────────────────────────────────────

    /// Exports the current document to a PDF, returning the written path.
    pub async fn export_pdf(&self) -> Result<PathBuf, AppError> {
        let _flight = self
            .export_flight
            .try_begin()
            .ok_or_else(|| AppError::Validation("an export is already in progress".to_string()))?;

        let doc = self.document();
        let mut zoom = self.zoom.lock().await;
        let path = self.exporter.export(&doc, &mut zoom).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{LocalStorage, RESUME_KEY};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;

    struct ScriptedBackend {
        calls: AtomicU32,
        delay: Duration,
    }

    #[async_trait]
    impl SuggestionBackend for ScriptedBackend {
        async fn review(
            &self,
            _resume_text: &str,
        ) -> Result<Vec<AiSuggestion>, crate::review::ReviewError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(vec![AiSuggestion {
                field: "title".to_string(),
                suggestion: "Senior Engineer".to_string(),
            }])
        }
    }

    fn session_in(dir: &std::path::Path, delay: Duration) -> (EditorSession, Arc<ScriptedBackend>) {
        let backend = Arc::new(ScriptedBackend {
            calls: AtomicU32::new(0),
            delay,
        });
        let session = EditorSession::new(
            ResumeStore::load(LocalStorage::new(dir.to_path_buf())),
            StyleStore::load(LocalStorage::new(dir.to_path_buf())),
            backend.clone(),
            PdfExporter::new(dir),
        );
        (session, backend)
    }

    #[tokio::test]
    async fn test_concurrent_reviews_run_once() {
        let dir = tempfile::tempdir().unwrap();
        let (session, backend) = session_in(dir.path(), Duration::from_millis(100));

        let (a, b) = tokio::join!(session.request_review(), session.request_review());
        let outcomes = [a.is_ok(), b.is_ok()];
        assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);

        // The gate reopens once the flight finishes.
        assert!(session.request_review().await.is_ok());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_apply_and_undo_persist_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let (session, _) = session_in(dir.path(), Duration::ZERO);
        session.replace_resume(ResumeRecord {
            title: "Engineer".to_string(),
            ..Default::default()
        });

        let suggestions = session.request_review().await.unwrap();
        let applied = session.apply_suggestion(&suggestions[0]).unwrap();
        assert_eq!(applied.title, "Senior Engineer");
        assert!(session.is_applied("title"));

        // The applied value reached disk.
        let stored = LocalStorage::new(dir.path().to_path_buf())
            .read(RESUME_KEY)
            .unwrap();
        assert_eq!(stored["title"], "Senior Engineer");

        let undone = session.undo_suggestion("title").unwrap();
        assert_eq!(undone.title, "Engineer");
        assert!(!session.is_applied("title"));
    }

    #[tokio::test]
    async fn test_new_review_round_clears_applied_state() {
        let dir = tempfile::tempdir().unwrap();
        let (session, _) = session_in(dir.path(), Duration::ZERO);
        session.replace_resume(ResumeRecord {
            title: "Engineer".to_string(),
            ..Default::default()
        });

        let suggestions = session.request_review().await.unwrap();
        session.apply_suggestion(&suggestions[0]).unwrap();
        assert!(session.is_applied("title"));

        session.request_review().await.unwrap();
        assert!(!session.is_applied("title"));
        assert!(session.undo_suggestion("title").is_err());
    }

    #[test]
    fn test_unknown_template_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (session, _) = session_in(
            dir.path(),
            Duration::ZERO,
        );
        assert!(matches!(
            session.set_template("brutalist"),
            Err(AppError::TemplateNotFound(_))
        ));
        assert_eq!(session.template_id(), DEFAULT_TEMPLATE);
        session.set_template("modern-sleek").unwrap();
        assert_eq!(session.template_id(), "modern-sleek");
    }

    #[tokio::test]
    async fn test_refresh_preview_reports_page_count() {
        let dir = tempfile::tempdir().unwrap();
        let (session, _) = session_in(dir.path(), Duration::ZERO);
        assert_eq!(session.refresh_preview(), 1);

        let long_description = "Did a substantial amount of meaningful work.\n".repeat(120);
        session.replace_resume(ResumeRecord {
            full_name: "Ada Lovelace".to_string(),
            experience: vec![crate::models::Experience {
                id: "e0".to_string(),
                company: "Analytical Engines".to_string(),
                role: "Programmer".to_string(),
                date: "1843".to_string(),
                description: long_description,
            }],
            ..Default::default()
        });
        assert!(session.refresh_preview() > 1);
        assert_eq!(session.page_count(), session.refresh_preview());
    }

    struct FlakyBackend {
        fail_from_second_call: AtomicU32,
    }

    #[async_trait]
    impl SuggestionBackend for FlakyBackend {
        async fn review(
            &self,
            _resume_text: &str,
        ) -> Result<Vec<AiSuggestion>, crate::review::ReviewError> {
            if self.fail_from_second_call.fetch_add(1, Ordering::SeqCst) > 0 {
                return Err(crate::review::ReviewError::Empty);
            }
            Ok(vec![AiSuggestion {
                field: "title".to_string(),
                suggestion: "Senior Engineer".to_string(),
            }])
        }
    }

    #[tokio::test]
    async fn test_concurrent_exports_run_once() {
        let dir = tempfile::tempdir().unwrap();
        let (session, _) = session_in(dir.path(), Duration::ZERO);

        // The settle delay keeps the first flight open while the second
        // invocation arrives.
        let (a, b) = tokio::join!(session.export_pdf(), session.export_pdf());
        let outcomes = [a.is_ok(), b.is_ok()];
        assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
        let rejected = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
        assert!(matches!(rejected, AppError::Validation(_)));
        assert!(session.exporter.output_path().exists());

        // The gate reopens once the flight finishes.
        assert!(session.export_pdf().await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_review_round_leaves_no_suggestions() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(FlakyBackend {
            fail_from_second_call: AtomicU32::new(0),
        });
        let session = EditorSession::new(
            ResumeStore::load(LocalStorage::new(dir.path().to_path_buf())),
            StyleStore::load(LocalStorage::new(dir.path().to_path_buf())),
            backend,
            PdfExporter::new(dir.path()),
        );
        session.replace_resume(ResumeRecord {
            title: "Engineer".to_string(),
            ..Default::default()
        });

        let suggestions = session.request_review().await.unwrap();
        session.apply_suggestion(&suggestions[0]).unwrap();
        assert!(!session.suggestions().is_empty());

        // The failing round clears the previous round and surfaces the
        // error without leaving stale suggestions behind.
        let err = session.request_review().await.unwrap_err();
        assert!(matches!(err, AppError::Review(_)));
        assert!(session.suggestions().is_empty());
        assert!(!session.is_applied("title"));
    }

    #[tokio::test]
    async fn test_export_writes_pdf_via_session() {
        let dir = tempfile::tempdir().unwrap();
        let (session, _) = session_in(dir.path(), Duration::ZERO);
        session.zoom_in().await;

        let path = session.export_pdf().await.unwrap();
        assert!(path.exists());
        // Zoom came back to the user's level.
        assert!((session.zoom_level().await - 1.1).abs() < 1e-4);
    }
}
