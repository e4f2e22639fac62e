//! Submission pipeline.
//!
//! Validates the form, sends it to the endpoint, appends the acknowledged
//! record to the local list and posts a transient notice. A submission
//! either fully succeeds (list updated, form cleared) or fully fails (list
//! and form unchanged).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::form::Form;
use crate::mirror::{RecordMirror, RecordStore};
use crate::notice::{NoticeBoard, NoticeKind, SUCCESS_MESSAGE};
use crate::payload::{build_payload, DEFAULT_SHEET};
use crate::record::StoredRecord;

/// Shared view of whether a submission is in flight.
///
/// Cloneable so a front end can disable its submit control while the
/// request is pending.
#[derive(Debug, Clone, Default)]
pub struct SubmitState {
    busy: Arc<AtomicBool>,
}

impl SubmitState {
    /// Whether a submission is waiting on the endpoint.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Mark a submission as started, unless one already is.
    fn begin(&self) -> Option<SubmitGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SubmitGuard {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Clears the in-flight flag when dropped.
#[derive(Debug)]
struct SubmitGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

/// Drives submissions from a form to the endpoint and the local list.
#[derive(Debug)]
pub struct Submitter<E, S> {
    endpoint: E,
    mirror: RecordMirror<S>,
    notices: NoticeBoard,
    sheet: String,
    state: SubmitState,
}

impl<E: Endpoint, S: RecordStore> Submitter<E, S> {
    /// Create a submitter with the default sheet and notice board.
    #[must_use]
    pub fn new(endpoint: E, mirror: RecordMirror<S>) -> Self {
        Self {
            endpoint,
            mirror,
            notices: NoticeBoard::default(),
            sheet: DEFAULT_SHEET.to_string(),
            state: SubmitState::default(),
        }
    }

    /// Route submissions to `sheet`.
    #[must_use]
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = sheet.into();
        self
    }

    /// Use `notices` for transient messages.
    #[must_use]
    pub fn with_notices(mut self, notices: NoticeBoard) -> Self {
        self.notices = notices;
        self
    }

    /// The record list.
    #[must_use]
    pub fn mirror(&self) -> &RecordMirror<S> {
        &self.mirror
    }

    /// The endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// The notice board.
    #[must_use]
    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Mutable access to the notice board.
    pub fn notices_mut(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    /// A handle reporting whether a submission is in flight.
    #[must_use]
    pub fn state(&self) -> SubmitState {
        self.state.clone()
    }

    /// Submit the form.
    ///
    /// On success the stored record is returned, the list grows by one and
    /// the form is reset. On failure nothing changes except the notice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubmissionInProgress`] if another submission is in
    /// flight, a validation error if a required field is empty, or the
    /// endpoint/storage error that stopped the submission.
    pub async fn submit(&mut self, form: &mut Form) -> Result<StoredRecord> {
        let Some(_guard) = self.state.begin() else {
            return Err(Error::SubmissionInProgress);
        };

        if let Err(e) = form.validate() {
            self.notices.post(NoticeKind::Failure, e.user_message());
            return Err(e);
        }

        match self.send(form).await {
            Ok(record) => {
                form.reset();
                self.notices.post(NoticeKind::Success, SUCCESS_MESSAGE);
                Ok(record)
            }
            Err(e) => {
                error!("Submission failed: {}", e);
                self.notices.post(NoticeKind::Failure, e.user_message());
                Err(e)
            }
        }
    }

    async fn send(&mut self, form: &Form) -> Result<StoredRecord> {
        let draft = form.draft();
        let payload = build_payload(draft, form.photo(), &self.sheet);
        info!(
            "Submitting record {} to sheet {} (photo: {})",
            payload.id,
            payload.sheet,
            payload.foto_passport.is_some()
        );

        let response = self.endpoint.submit(&payload).await?;

        let record = StoredRecord::from_draft(draft.clone(), response.foto_passport);
        self.mirror.push(record.clone())?;
        Ok(record)
    }
}
