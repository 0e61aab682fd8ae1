//! Per-session view state for the career pipeline.
//!
//! Sessions live in memory only. They are removed on request, expire after a
//! configurable time to live, and are discarded with the process. The store
//! lock is never held across an `.await`: steps snapshot their inputs, release
//! the lock, call the model, then re-lock to commit.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::flows::recommendation::CareerRecommendation;
use crate::flows::roadmap::Roadmap;
use crate::flows::skill_gap::SkillGapAnalysis;
use crate::models::profile::StudentProfile;

pub mod handlers;
pub mod narration;
pub mod pipeline;

use narration::Playback;

/// A user-gated step that may not run twice at once within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    Recommendations,
    Roadmap,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub profile: Option<StudentProfile>,
    pub recommendations: Option<CareerRecommendation>,
    pub selected_career: Option<String>,
    pub skill_gaps: Option<SkillGapAnalysis>,
    pub roadmap: Option<Roadmap>,
    pub narration: Playback,
    /// Steps whose triggering control is currently disabled.
    pub pending: BTreeSet<Step>,
    /// Bumped whenever the selection (or the profile) changes; results
    /// computed for an older epoch are discarded.
    #[serde(skip)]
    selection_epoch: u64,
}

impl Session {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            profile: None,
            recommendations: None,
            selected_career: None,
            skill_gaps: None,
            roadmap: None,
            narration: Playback::default(),
            pending: BTreeSet::new(),
            selection_epoch: 0,
        }
    }

    /// Stores a new profile and clears everything derived from the old one.
    fn replace_profile(&mut self, profile: StudentProfile) {
        self.profile = Some(profile);
        self.recommendations = None;
        self.selected_career = None;
        self.clear_selection_results();
        self.selection_epoch += 1;
    }

    /// Stores a new selection and clears the results of the previous one.
    fn select(&mut self, career: String) -> u64 {
        self.selected_career = Some(career);
        self.clear_selection_results();
        self.selection_epoch += 1;
        self.selection_epoch
    }

    fn clear_selection_results(&mut self) {
        self.skill_gaps = None;
        self.roadmap = None;
        self.narration.reset();
    }

    pub fn selection_epoch(&self) -> u64 {
        self.selection_epoch
    }
}

/// In-memory session map shared by all handlers.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> Session {
        let session = Session::new(Uuid::new_v4());
        self.inner.lock().insert(session.id, session.clone());
        debug!("Created session {}", session.id);
        session
    }

    pub fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.with_session(id, |s| s.clone())
    }

    pub fn remove(&self, id: Uuid) -> Result<(), AppError> {
        match self.inner.lock().remove(&id) {
            Some(_) => {
                debug!("Removed session {id}");
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Session {id} not found"))),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Drops every session created more than `ttl` ago. Returns how many went.
    pub fn expire_older_than(&self, ttl: Duration) -> usize {
        let Some(cutoff) = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_sub_signed(ttl))
        else {
            return 0;
        };
        let mut sessions = self.inner.lock();
        let before = sessions.len();
        sessions.retain(|_, s| s.created_at > cutoff);
        before - sessions.len()
    }

    /// Spawns the background sweep that expires sessions every `every`.
    pub fn spawn_expiry(&self, ttl: Duration, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(every);
            loop {
                tick.tick().await;
                let expired = store.expire_older_than(ttl);
                if expired > 0 {
                    info!("Expired {expired} session(s); {} active", store.len());
                }
            }
        })
    }

    /// Runs `f` against the session under the store lock.
    pub fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R, AppError> {
        let mut sessions = self.inner.lock();
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        Ok(f(session))
    }

    /// Marks `step` in flight and runs `prepare` atomically with that check.
    ///
    /// Fails with `Conflict` if the step is already running. If `prepare`
    /// fails, the step is not marked. The returned guard clears the mark on drop.
    pub fn begin_step<T>(
        &self,
        id: Uuid,
        step: Step,
        prepare: impl FnOnce(&mut Session) -> Result<T, AppError>,
    ) -> Result<(StepGuard, T), AppError> {
        let prepared = self.with_session(id, |s| {
            if s.pending.contains(&step) {
                return Err(AppError::Conflict(format!(
                    "{step:?} generation is already in progress"
                )));
            }
            let prepared = prepare(s)?;
            s.pending.insert(step);
            Ok(prepared)
        })??;

        Ok((
            StepGuard {
                store: self.clone(),
                id,
                step,
            },
            prepared,
        ))
    }
}

/// Re-enables a step's control when the step finishes, however it finishes.
pub struct StepGuard {
    store: SessionStore,
    id: Uuid,
    step: Step,
}

impl Drop for StepGuard {
    fn drop(&mut self) {
        if let Some(session) = self.store.inner.lock().get_mut(&self.id) {
            session.pending.remove(&self.step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::LearningStyle;

    fn profile() -> StudentProfile {
        StudentProfile {
            academic_background: "Diploma in Mechanical Engineering".to_string(),
            interests: "automotive".to_string(),
            skills: "CAD, welding".to_string(),
            goals: "Design electric vehicles".to_string(),
            learning_style: LearningStyle::Kinesthetic,
        }
    }

    #[test]
    fn test_unknown_session_is_not_found() {
        let store = SessionStore::new();
        assert!(matches!(
            store.get(Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_begin_step_rejects_second_start_until_guard_drops() {
        let store = SessionStore::new();
        let id = store.create().id;

        let (guard, ()) = store.begin_step(id, Step::Roadmap, |_| Ok(())).unwrap();
        assert!(store.get(id).unwrap().pending.contains(&Step::Roadmap));
        assert!(matches!(
            store.begin_step(id, Step::Roadmap, |_| Ok(())),
            Err(AppError::Conflict(_))
        ));
        // Different steps are independent.
        assert!(store
            .begin_step(id, Step::Recommendations, |_| Ok(()))
            .is_ok());

        drop(guard);
        assert!(store.get(id).unwrap().pending.is_empty());
        assert!(store.begin_step(id, Step::Roadmap, |_| Ok(())).is_ok());
    }

    #[test]
    fn test_failed_prepare_does_not_mark_step() {
        let store = SessionStore::new();
        let id = store.create().id;
        let result = store.begin_step(id, Step::Roadmap, |_| -> Result<(), AppError> {
            Err(AppError::Conflict("missing profile".to_string()))
        });
        assert!(result.is_err());
        assert!(store.get(id).unwrap().pending.is_empty());
    }

    #[test]
    fn test_replace_profile_clears_derived_state() {
        let store = SessionStore::new();
        let id = store.create().id;
        store
            .with_session(id, |s| {
                s.replace_profile(profile());
                s.recommendations = Some(CareerRecommendation {
                    career_options: vec!["EV Engineer".to_string()],
                });
                s.select("EV Engineer".to_string());
                s.skill_gaps = Some(SkillGapAnalysis::default());
                s.replace_profile(profile());
            })
            .unwrap();

        let session = store.get(id).unwrap();
        assert!(session.profile.is_some());
        assert!(session.recommendations.is_none());
        assert!(session.selected_career.is_none());
        assert!(session.skill_gaps.is_none());
        assert_eq!(session.selection_epoch(), 3);
    }

    #[test]
    fn test_remove_deletes_session_once() {
        let store = SessionStore::new();
        let id = store.create().id;
        store.remove(id).unwrap();
        assert!(matches!(store.get(id), Err(AppError::NotFound(_))));
        assert!(matches!(store.remove(id), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_expire_drops_only_old_sessions() {
        let store = SessionStore::new();
        let old = store.create().id;
        let fresh = store.create().id;
        store
            .with_session(old, |s| s.created_at = Utc::now() - chrono::Duration::hours(25))
            .unwrap();

        assert_eq!(store.expire_older_than(Duration::from_secs(24 * 3600)), 1);
        assert!(store.get(old).is_err());
        assert!(store.get(fresh).is_ok());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_guard_drop_after_removal_is_harmless() {
        let store = SessionStore::new();
        let id = store.create().id;
        let (guard, ()) = store.begin_step(id, Step::Roadmap, |_| Ok(())).unwrap();
        store.remove(id).unwrap();
        drop(guard);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_sweep_expires_sessions() {
        let store = SessionStore::new();
        let id = store.create().id;
        store
            .with_session(id, |s| s.created_at = Utc::now() - chrono::Duration::hours(2))
            .unwrap();

        let sweep = store.spawn_expiry(Duration::from_secs(3600), Duration::from_secs(60));
        // The first tick fires immediately; let the task run it.
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(store.len(), 0);
        sweep.abort();
    }

    #[test]
    fn test_session_serializes_without_epoch() {
        let store = SessionStore::new();
        let session = store.create();
        let value = serde_json::to_value(&session).unwrap();
        assert!(value.get("selectionEpoch").is_none());
        assert_eq!(value["narration"]["state"], "idle");
        assert_eq!(value["pending"], serde_json::json!([]));
    }
}
