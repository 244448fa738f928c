//! Follow-up submission: `Idle -> Pending -> Idle`.
//!
//! Answers come from an [`AnswerService`], polled once per frame with the
//! current time. The built-in [`MockAnswerService`] resolves with fixed
//! content after a fixed delay; tests drive it with explicit timestamps.

use tracing::{debug, info, warn};

use crate::conversation::{Turn, TurnContent, TurnId, TurnIdGenerator, TurnStore};
use crate::error::ViewError;
use crate::state::{StateChange, ViewState};

/// Simulated answer latency.
pub const DEFAULT_ANSWER_DELAY_MS: u64 = 600;

/// Delay between appending a turn and jumping to it, so it can be laid out first.
pub const DEFAULT_MOUNT_DELAY_MS: u64 = 100;

/// Source of answers for follow-up questions.
///
/// `request` starts work for one query; `poll` is called every frame and
/// returns the outcome once it is available. At most one request is
/// outstanding at a time.
pub trait AnswerService {
    fn request(&mut self, query: &str, now_ms: u64);

    fn poll(&mut self, now_ms: u64) -> Option<Result<TurnContent, ViewError>>;
}

/// Always answers with the same content after a fixed delay. Never fails.
#[derive(Debug, Clone)]
pub struct MockAnswerService {
    delay_ms: u64,
    content: TurnContent,
    ready_at: Option<u64>,
}

impl MockAnswerService {
    pub const fn new(content: TurnContent, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            content,
            ready_at: None,
        }
    }
}

impl AnswerService for MockAnswerService {
    fn request(&mut self, _query: &str, now_ms: u64) {
        self.ready_at = Some(now_ms.saturating_add(self.delay_ms));
    }

    fn poll(&mut self, now_ms: u64) -> Option<Result<TurnContent, ViewError>> {
        let ready_at = self.ready_at?;
        if now_ms < ready_at {
            return None;
        }
        self.ready_at = None;
        Some(Ok(self.content.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Pending {
        query: String,
        navigation_revision: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScheduledJump {
    turn: TurnId,
    due_ms: u64,
    navigation_revision: u64,
}

/// Result of polling the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchEvent {
    /// A new turn was appended to the store.
    Appended(TurnId),
    /// The answer service failed; the query can be retried.
    Failed { query: String, error: ViewError },
}

pub struct FollowUpDispatcher {
    service: Box<dyn AnswerService>,
    ids: TurnIdGenerator,
    phase: Phase,
    mount_delay_ms: u64,
    scheduled_jump: Option<ScheduledJump>,
}

impl std::fmt::Debug for FollowUpDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FollowUpDispatcher")
            .field("phase", &self.phase)
            .field("mount_delay_ms", &self.mount_delay_ms)
            .field("scheduled_jump", &self.scheduled_jump)
            .finish_non_exhaustive()
    }
}

impl FollowUpDispatcher {
    pub fn new(service: Box<dyn AnswerService>, mount_delay_ms: u64) -> Self {
        Self {
            service,
            ids: TurnIdGenerator::default(),
            phase: Phase::Idle,
            mount_delay_ms,
            scheduled_jump: None,
        }
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    /// Query text of the outstanding request.
    pub fn pending_query(&self) -> Option<&str> {
        match &self.phase {
            Phase::Pending { query, .. } => Some(query),
            Phase::Idle => None,
        }
    }

    /// Submit a follow-up question.
    ///
    /// On success the loading flag is set and the request handed to the
    /// answer service.
    ///
    /// # Errors
    ///
    /// - [`ViewError::EmptySubmission`] if `text` is blank after trimming.
    /// - [`ViewError::ConcurrentSubmission`] if a request is already pending.
    ///
    /// Neither error changes any state.
    pub fn submit(&mut self, text: &str, state: &mut ViewState, now_ms: u64) -> Result<(), ViewError> {
        if self.is_pending() {
            warn!("follow-up rejected: answer already pending");
            return Err(ViewError::ConcurrentSubmission);
        }
        let query = text.trim();
        if query.is_empty() {
            debug!("follow-up rejected: empty");
            return Err(ViewError::EmptySubmission);
        }

        state.apply(StateChange::SetLoading(true));
        self.service.request(query, now_ms);
        self.phase = Phase::Pending {
            query: query.to_string(),
            navigation_revision: state.navigation_revision(),
        };
        info!(query, "follow-up submitted");
        Ok(())
    }

    /// Check the answer service and apply a resolution if one arrived.
    pub fn poll(
        &mut self,
        state: &mut ViewState,
        store: &mut TurnStore,
        now_ms: u64,
    ) -> Option<DispatchEvent> {
        let Phase::Pending {
            query,
            navigation_revision,
        } = &self.phase
        else {
            return None;
        };
        let outcome = self.service.poll(now_ms)?;
        let query = query.clone();
        let navigation_revision = *navigation_revision;
        self.phase = Phase::Idle;

        match outcome {
            Ok(content) => {
                let id = self.ids.next_id(store);
                store.append(Turn::new(id.clone(), query, content));
                state.apply(StateChange::SetLoading(false));
                self.scheduled_jump = Some(ScheduledJump {
                    turn: id.clone(),
                    due_ms: now_ms.saturating_add(self.mount_delay_ms),
                    navigation_revision,
                });
                info!(turn = %id, turns = store.len(), "follow-up answered");
                Some(DispatchEvent::Appended(id))
            }
            Err(error) => {
                state.apply(StateChange::SetLoading(false));
                warn!(%error, query = %query, "follow-up failed");
                Some(DispatchEvent::Failed { query, error })
            }
        }
    }

    /// Turn to auto-navigate to, once its mount delay has passed.
    ///
    /// The jump is dropped if the user scrolled or jumped since the question
    /// was submitted. Selection changes from relayouts do not count.
    pub fn take_due_jump(&mut self, state: &ViewState, now_ms: u64) -> Option<TurnId> {
        let jump = self.scheduled_jump.as_ref()?;
        if now_ms < jump.due_ms {
            return None;
        }
        let jump = self.scheduled_jump.take()?;
        if state.navigation_revision() != jump.navigation_revision {
            info!(turn = %jump.turn, "auto-jump suppressed: user navigated while pending");
            return None;
        }
        Some(jump.turn)
    }

    pub const fn has_scheduled_jump(&self) -> bool {
        self.scheduled_jump.is_some()
    }
}
