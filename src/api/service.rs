//! Shared state behind the REST handlers
//!
//! Each funnel session sits behind its own mutex so a slow step (provider
//! lookup, lead submission) only blocks that visitor. Sessions untouched for
//! longer than the idle timeout are dropped, on access and by a periodic
//! sweep.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::FunnelError;
use crate::funnel::{FunnelSession, Step, StepInput, StepOutcome};
use crate::models::RequestMeta;
use crate::pipeline::LeadPipeline;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ServiceError {
    #[error("Funnel session not found: {0}")]
    SessionNotFound(Uuid),
    #[error(transparent)]
    Funnel(#[from] FunnelError),
}

struct SessionSlot {
    session: FunnelSession,
    touched: Instant,
}

type SessionHandle = Arc<Mutex<SessionSlot>>;

pub struct FunnelService {
    pipeline: LeadPipeline,
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
    idle_timeout: Duration,
}

impl FunnelService {
    pub fn new(pipeline: LeadPipeline) -> Self {
        Self {
            pipeline,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn pipeline(&self) -> &LeadPipeline {
        &self.pipeline
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn start_session(&self) -> (Uuid, FunnelSession) {
        self.evict_idle().await;

        let id = Uuid::new_v4();
        let session = FunnelSession::new();
        let slot = SessionSlot {
            session: session.clone(),
            touched: Instant::now(),
        };
        self.sessions.write().await.insert(id, Arc::new(Mutex::new(slot)));
        debug!("Started funnel session {}", id);
        (id, session)
    }

    /// Drop every idle session, returning how many went. Sessions busy
    /// with a step are kept.
    pub async fn evict_idle(&self) -> usize {
        let timeout = self.idle_timeout;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(slot) => slot.touched.elapsed() < timeout,
            Err(_) => true,
        });

        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {} idle funnel sessions", evicted);
        }
        evicted
    }

    /// Run [`Self::evict_idle`] every `every` on a background task
    pub fn spawn_idle_sweep(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                service.evict_idle().await;
            }
        })
    }

    /// Lock a live session and mark it as used
    async fn checkout(&self, id: Uuid) -> Result<OwnedMutexGuard<SessionSlot>, ServiceError> {
        let handle = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ServiceError::SessionNotFound(id))?;

        let mut slot = handle.lock_owned().await;
        if slot.touched.elapsed() >= self.idle_timeout {
            self.sessions.write().await.remove(&id);
            debug!("Funnel session {} expired", id);
            return Err(ServiceError::SessionNotFound(id));
        }
        slot.touched = Instant::now();
        Ok(slot)
    }

    /// Snapshot of a session
    pub async fn session(&self, id: Uuid) -> Result<FunnelSession, ServiceError> {
        let slot = self.checkout(id).await?;
        Ok(slot.session.clone())
    }

    /// Apply one step answer. A completed session is dropped from memory
    /// once its lead has been captured.
    pub async fn submit_step(
        &self,
        id: Uuid,
        input: StepInput,
        meta: &RequestMeta,
    ) -> Result<(StepOutcome, FunnelSession), ServiceError> {
        let mut slot = self.checkout(id).await?;

        let outcome = slot.session.apply(input, &self.pipeline, meta).await?;

        if slot.session.step() == Step::Complete {
            self.sessions.write().await.remove(&id);
            info!("Funnel session {} completed", id);
        }

        Ok((outcome, slot.session.clone()))
    }

    /// Go back one step, or to `target` when given
    pub async fn go_back(&self, id: Uuid, target: Option<Step>) -> Result<FunnelSession, ServiceError> {
        let mut slot = self.checkout(id).await?;

        match target {
            Some(step) => slot.session.back_to(step)?,
            None => slot.session.back()?,
        };

        Ok(slot.session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::BillRange;
    use crate::storage::LocalLog;

    async fn service() -> FunnelService {
        let log = LocalLog::in_memory().await.unwrap();
        FunnelService::new(LeadPipeline::new(Config::for_tests(), log))
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let service = service().await;
        let id = Uuid::new_v4();
        assert_eq!(
            service.session(id).await.unwrap_err(),
            ServiceError::SessionNotFound(id)
        );
    }

    #[tokio::test]
    async fn test_steps_persist_between_calls() {
        let service = service().await;
        let (id, session) = service.start_session().await;
        assert_eq!(session.step(), Step::ZipCode);

        let meta = RequestMeta::default();
        let (outcome, _) = service
            .submit_step(id, StepInput::ZipCode { zip_code: "90210".to_string() }, &meta)
            .await
            .unwrap();
        assert_eq!(outcome, StepOutcome::Advanced(Step::PowerBill));

        service
            .submit_step(id, StepInput::PowerBill { power_bill: BillRange::Under100 }, &meta)
            .await
            .unwrap();

        let session = service.session(id).await.unwrap();
        assert_eq!(session.step(), Step::Homeowner);
        assert_eq!(session.record().zip_code, "90210");

        let session = service.go_back(id, Some(Step::ZipCode)).await.unwrap();
        assert_eq!(session.step(), Step::ZipCode);
        assert_eq!(session.record().power_bill, Some(BillRange::Under100));
    }

    #[tokio::test]
    async fn test_idle_sessions_are_evicted() {
        let service = service().await.with_idle_timeout(Duration::from_millis(200));
        for _ in 0..50 {
            service.start_session().await;
        }
        assert_eq!(service.session_count().await, 50);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(service.evict_idle().await, 50);
        assert_eq!(service.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_new_session_sweeps_abandoned_ones() {
        let service = service().await.with_idle_timeout(Duration::from_millis(200));
        let (old, _) = service.start_session().await;

        tokio::time::sleep(Duration::from_millis(300)).await;
        let (fresh, _) = service.start_session().await;

        assert_eq!(service.session_count().await, 1);
        assert_eq!(service.session(old).await.unwrap_err(), ServiceError::SessionNotFound(old));
        assert!(service.session(fresh).await.is_ok());
    }

    #[tokio::test]
    async fn test_expired_session_is_gone_on_access() {
        let service = service().await.with_idle_timeout(Duration::from_millis(200));
        let (id, _) = service.start_session().await;

        tokio::time::sleep(Duration::from_millis(300)).await;
        let err = service
            .submit_step(id, StepInput::ZipCode { zip_code: "90210".to_string() }, &RequestMeta::default())
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::SessionNotFound(id));
        assert_eq!(service.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_activity_keeps_session_alive() {
        let service = service().await.with_idle_timeout(Duration::from_millis(400));
        let (id, _) = service.start_session().await;

        for _ in 0..4 {
            tokio::time::sleep(Duration::from_millis(150)).await;
            service.session(id).await.unwrap();
        }
        assert_eq!(service.evict_idle().await, 0);
    }

    #[tokio::test]
    async fn test_idle_sweep_task() {
        let service = Arc::new(service().await.with_idle_timeout(Duration::from_millis(20)));
        service.start_session().await;

        let sweep = service.spawn_idle_sweep(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        sweep.abort();

        assert_eq!(service.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_step_error_passes_through() {
        let service = service().await;
        let (id, _) = service.start_session().await;

        let err = service
            .submit_step(id, StepInput::Homeowner { homeowner: true }, &RequestMeta::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Funnel(FunnelError::WrongStep { .. })));
        assert_eq!(service.session_count().await, 1);
    }
}
