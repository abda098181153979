use crate::core::{AnswerCollector, Questionnaire};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// In-memory store of live questionnaire sessions.
///
/// Each session owns its own `AnswerCollector`; there is no shared or
/// global quiz state. Entries expire after an idle TTL and die with the
/// process - sessions are deliberately not persisted anywhere.
pub struct SessionStore {
    questionnaire: Questionnaire,
    sessions: Cache<Uuid, Arc<Mutex<AnswerCollector>>>,
}

impl SessionStore {
    pub fn new(questionnaire: Questionnaire, capacity: u64, idle_ttl_secs: u64) -> Self {
        let sessions = Cache::builder()
            .max_capacity(capacity)
            .time_to_idle(Duration::from_secs(idle_ttl_secs))
            .build();

        Self {
            questionnaire,
            sessions,
        }
    }

    /// Open a new session, positioned at the first question.
    ///
    /// The intro screen is client chrome; server sessions only exist once
    /// the adopter actually begins answering.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut collector = AnswerCollector::new(self.questionnaire);
        collector.start();

        self.sessions
            .insert(id, Arc::new(Mutex::new(collector)))
            .await;

        tracing::debug!("Opened questionnaire session {}", id);
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<Arc<Mutex<AnswerCollector>>> {
        self.sessions.get(id).await
    }

    pub async fn remove(&self, id: &Uuid) {
        self.sessions.invalidate(id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Step;

    #[tokio::test]
    async fn test_create_and_fetch_session() {
        let store = SessionStore::new(Questionnaire::standard(), 100, 600);
        let id = store.create().await;

        let session = store.get(&id).await.expect("session exists");
        let collector = session.lock().await;
        assert_eq!(collector.step(), Step::Question(0));
        assert!(collector.answers().is_empty());
    }

    #[tokio::test]
    async fn test_session_state_persists_across_fetches() {
        let store = SessionStore::new(Questionnaire::standard(), 100, 600);
        let id = store.create().await;

        {
            let session = store.get(&id).await.unwrap();
            let mut collector = session.lock().await;
            collector.select_option(0, "apartment").unwrap();
        }

        let session = store.get(&id).await.unwrap();
        let collector = session.lock().await;
        assert_eq!(collector.answers().get("living"), Some("apartment"));
        assert_eq!(collector.step(), Step::Question(1));
    }

    #[tokio::test]
    async fn test_remove_forgets_session() {
        let store = SessionStore::new(Questionnaire::standard(), 100, 600);
        let id = store.create().await;
        store.remove(&id).await;

        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_session_is_none() {
        let store = SessionStore::new(Questionnaire::standard(), 100, 600);
        assert!(store.get(&Uuid::new_v4()).await.is_none());
    }
}
