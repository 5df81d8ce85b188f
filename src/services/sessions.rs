use crate::models::{RecommendationQuery, TreeRecord};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur with session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown session: {0}")]
    NotFound(Uuid),

    #[error("session filter state is unavailable")]
    Poisoned,
}

/// One dashboard session
///
/// Holds an immutable loaded inventory plus the filter state last applied by
/// its owner. Sessions never share tables, results or filter state.
pub struct Session {
    pub id: Uuid,
    records: Vec<TreeRecord>,
    filters: RwLock<RecommendationQuery>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    fn new(records: Vec<TreeRecord>) -> Self {
        Self {
            id: Uuid::new_v4(),
            records,
            filters: RwLock::new(RecommendationQuery::default()),
            created_at: chrono::Utc::now(),
        }
    }

    pub fn records(&self) -> &[TreeRecord] {
        &self.records
    }

    /// Snapshot of the last-applied filter state
    pub fn filters(&self) -> Result<RecommendationQuery, SessionError> {
        self.filters
            .read()
            .map(|query| query.clone())
            .map_err(|_| SessionError::Poisoned)
    }

    pub fn set_filters(&self, query: RecommendationQuery) -> Result<(), SessionError> {
        let mut filters = self.filters.write().map_err(|_| SessionError::Poisoned)?;
        *filters = query;
        Ok(())
    }
}

/// Session registry with bounded capacity and idle expiry
///
/// Idle sessions are evicted after the configured TTL; the caller sees that
/// as `SessionError::NotFound` and re-uploads the inventory.
pub struct SessionStore {
    sessions: moka::sync::Cache<Uuid, Arc<Session>>,
}

impl SessionStore {
    pub fn new(capacity: u64, idle_ttl_secs: u64) -> Self {
        let sessions = moka::sync::CacheBuilder::new(capacity)
            .time_to_idle(Duration::from_secs(idle_ttl_secs))
            .build();

        Self { sessions }
    }

    /// Register a freshly loaded inventory as a new session
    pub fn create(&self, records: Vec<TreeRecord>) -> Arc<Session> {
        let session = Arc::new(Session::new(records));
        self.sessions.insert(session.id, session.clone());

        tracing::debug!(
            "Created session {} ({} records)",
            session.id,
            session.records().len()
        );
        session
    }

    pub fn get(&self, id: &Uuid) -> Result<Arc<Session>, SessionError> {
        self.sessions.get(id).ok_or(SessionError::NotFound(*id))
    }

    pub fn remove(&self, id: &Uuid) {
        self.sessions.invalidate(id);
    }

    pub fn session_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<TreeRecord> {
        vec![TreeRecord {
            scientific_name: "Samanea saman".to_string(),
            genus: "Samanea".to_string(),
            species: "saman".to_string(),
            street: Some("Jalan Perda Utama".to_string()),
            environmental_score: Some(0.5),
            health_score: Some(0.5),
            suitability_score: Some(0.7),
            canopy_score: Some(0.3),
            stability_score: Some(0.5),
        }]
    }

    #[test]
    fn test_create_and_get() {
        let store = SessionStore::new(16, 60);
        let session = store.create(sample_records());

        let fetched = store.get(&session.id).unwrap();
        assert_eq!(fetched.records().len(), 1);
    }

    #[test]
    fn test_unknown_session() {
        let store = SessionStore::new(16, 60);
        let id = Uuid::new_v4();

        assert!(matches!(store.get(&id), Err(SessionError::NotFound(_))));
    }

    #[test]
    fn test_filters_default_and_update() {
        let store = SessionStore::new(16, 60);
        let session = store.create(sample_records());

        let filters = session.filters().unwrap();
        assert!(filters.location.is_empty());

        let query = RecommendationQuery {
            location: "perda".to_string(),
            min_stability: 0.4,
            ..RecommendationQuery::default()
        };
        session.set_filters(query).unwrap();

        let filters = session.filters().unwrap();
        assert_eq!(filters.location, "perda");
        assert_eq!(filters.min_stability, 0.4);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new(16, 60);
        let first = store.create(sample_records());
        let second = store.create(sample_records());

        first
            .set_filters(RecommendationQuery {
                location: "perda".to_string(),
                ..RecommendationQuery::default()
            })
            .unwrap();

        assert!(second.filters().unwrap().location.is_empty());
    }

    #[test]
    fn test_remove() {
        let store = SessionStore::new(16, 60);
        let session = store.create(sample_records());

        store.remove(&session.id);
        assert!(store.get(&session.id).is_err());
    }
}
