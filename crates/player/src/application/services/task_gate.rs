//! Task gate - the experiment's mandatory viewing lock
//!
//! In their assigned main mode a participant must spend a fixed time on each
//! artifact before they may navigate away. The lock starts when viewing
//! begins, at most once per artifact, and expiry marks the artifact done.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use ugclab_domain::{ArtifactId, ModeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Still locked; the caller shows the "keep looking" reminder.
    Blocked { remaining: Duration },
    Allowed,
}

#[derive(Debug, Clone)]
struct TaskLock {
    artifact_id: Option<ArtifactId>,
    started_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TaskGate {
    main_mode: Option<ModeType>,
    lock_duration: Duration,
    lock: Option<TaskLock>,
    completed: HashSet<ArtifactId>,
}

impl TaskGate {
    pub fn new(main_mode: Option<ModeType>, lock_duration: Duration) -> Self {
        Self {
            main_mode,
            lock_duration,
            lock: None,
            completed: HashSet::new(),
        }
    }

    pub fn main_mode(&self) -> Option<ModeType> {
        self.main_mode
    }

    pub fn is_completed(&self, artifact_id: &ArtifactId) -> bool {
        self.completed.contains(artifact_id)
    }

    /// Entering a mode always starts without a lock.
    pub fn enter_mode(&mut self, mode: ModeType) {
        tracing::debug!(mode = %mode, "Task lock reset on mode entry");
        self.lock = None;
    }

    /// Starts the lock if this is the main mode, the artifact is not already
    /// done and no lock is running. Returns whether a lock was started.
    pub fn on_task_start(
        &mut self,
        current_mode: ModeType,
        artifact_id: Option<&ArtifactId>,
        now: DateTime<Utc>,
    ) -> bool {
        if self.main_mode != Some(current_mode) {
            tracing::debug!(mode = %current_mode, main_mode = ?self.main_mode, "Not the main mode, no lock");
            return false;
        }
        if let Some(id) = artifact_id.filter(|id| self.completed.contains(*id)) {
            tracing::debug!(artifact_id = %id, "Artifact already completed, no lock");
            return false;
        }
        if self.lock.is_some() {
            return false;
        }

        tracing::info!(artifact_id = ?artifact_id, lock_ms = self.lock_duration.as_millis() as u64, "Task lock started");
        self.lock = Some(TaskLock {
            artifact_id: artifact_id.cloned(),
            started_at: now,
        });
        true
    }

    /// Time left on the running lock, if any.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let lock = self.lock.as_ref()?;
        let elapsed = now
            .signed_duration_since(lock.started_at)
            .to_std()
            .unwrap_or_default();
        self.lock_duration.checked_sub(elapsed).filter(|d| !d.is_zero())
    }

    /// Whether navigation is currently blocked. An expired lock is cleared
    /// and its artifact marked completed.
    pub fn is_locked(&mut self, now: DateTime<Utc>) -> bool {
        if self.lock.is_none() {
            return false;
        }
        if self.remaining(now).is_some() {
            return true;
        }

        if let Some(TaskLock {
            artifact_id: Some(id),
            ..
        }) = self.lock.take()
        {
            tracing::info!(artifact_id = %id, "Task lock expired, artifact completed");
            self.completed.insert(id);
        }
        false
    }

    /// Leaving a content view: blocked while locked, otherwise the lock
    /// state is cleared.
    pub fn try_leave(&mut self, now: DateTime<Utc>) -> LeaveOutcome {
        if self.is_locked(now) {
            let remaining = self.remaining(now).unwrap_or_default();
            tracing::debug!(remaining_ms = remaining.as_millis() as u64, "Leave blocked by task lock");
            return LeaveOutcome::Blocked { remaining };
        }
        self.lock = None;
        LeaveOutcome::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const LOCK: Duration = Duration::from_secs(180);

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0)
            .single()
            .expect("valid time")
    }

    fn ding() -> ArtifactId {
        ArtifactId::new("ding")
    }

    #[test]
    fn only_the_main_mode_locks() {
        let mut gate = TaskGate::new(Some(ModeType::CrowdChat), LOCK);

        assert!(!gate.on_task_start(ModeType::CommentBoard, Some(&ding()), at(0)));
        assert!(!gate.is_locked(at(1)));

        assert!(gate.on_task_start(ModeType::CrowdChat, Some(&ding()), at(0)));
        assert!(gate.is_locked(at(1)));
    }

    #[test]
    fn participants_without_a_main_mode_are_never_locked() {
        let mut gate = TaskGate::new(None, LOCK);
        assert!(!gate.on_task_start(ModeType::FollowMe, None, at(0)));
    }

    #[test]
    fn leaving_is_blocked_until_expiry() {
        let mut gate = TaskGate::new(Some(ModeType::FollowMe), LOCK);
        gate.on_task_start(ModeType::FollowMe, Some(&ding()), at(0));

        assert_eq!(
            gate.try_leave(at(60)),
            LeaveOutcome::Blocked {
                remaining: Duration::from_secs(120)
            }
        );
        assert_eq!(gate.try_leave(at(180)), LeaveOutcome::Allowed);
        assert!(gate.is_completed(&ding()));
    }

    #[test]
    fn completed_artifacts_do_not_lock_again() {
        let mut gate = TaskGate::new(Some(ModeType::FollowMe), LOCK);
        gate.on_task_start(ModeType::FollowMe, Some(&ding()), at(0));
        assert!(!gate.is_locked(at(200)));

        assert!(!gate.on_task_start(ModeType::FollowMe, Some(&ding()), at(300)));
        assert!(gate.on_task_start(ModeType::FollowMe, Some(&ArtifactId::new("vase")), at(300)));
    }

    #[test]
    fn a_running_lock_is_not_restarted() {
        let mut gate = TaskGate::new(Some(ModeType::FollowMe), LOCK);
        gate.on_task_start(ModeType::FollowMe, Some(&ding()), at(0));

        assert!(!gate.on_task_start(ModeType::FollowMe, Some(&ArtifactId::new("vase")), at(100)));
        assert_eq!(gate.remaining(at(100)), Some(Duration::from_secs(80)));
    }

    #[test]
    fn entering_a_mode_resets_the_lock() {
        let mut gate = TaskGate::new(Some(ModeType::FollowMe), LOCK);
        gate.on_task_start(ModeType::FollowMe, Some(&ding()), at(0));

        gate.enter_mode(ModeType::CommentBoard);

        assert!(!gate.is_locked(at(1)));
        assert!(!gate.is_completed(&ding()));
    }
}
