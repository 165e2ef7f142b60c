//! Builders for HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use contact_manager::domain::ContactsService;
use contact_manager::domain::ports::{ContactRepository, FixtureContactRepository};
use contact_manager::inbound::http::state::HttpState;
use contact_manager::outbound::persistence::DieselContactRepository;

use super::ServerConfig;

/// Build the contacts service over the repository `make_repo` produces when a
/// pool is available, otherwise over an empty in-memory store.
fn build_contacts_state_with_pool<Pool, Repo>(
    pool: Option<&Pool>,
    make_repo: impl FnOnce(&Pool) -> Repo,
) -> HttpState
where
    Repo: ContactRepository + 'static,
{
    match pool {
        Some(pool) => {
            info!("serving contacts from the database");
            HttpState::from_service(Arc::new(ContactsService::new(Arc::new(make_repo(pool)))))
        }
        None => {
            info!("no database configured; serving contacts from memory");
            HttpState::from_service(Arc::new(ContactsService::new(Arc::new(
                FixtureContactRepository::default(),
            ))))
        }
    }
}

/// Build the shared HTTP state from the configured pool or the fixture store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(build_contacts_state_with_pool(config.db_pool(), |pool| {
        DieselContactRepository::new(pool.clone())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contact_manager::domain::ports::ContactRepositoryError;
    use contact_manager::domain::{
        Contact, ContactDraft, ContactFields, ContactId, ContactListQuery, DuplicateProbe,
    };
    use rstest::rstest;

    /// Stand-in for the database repository that always reports an outage.
    struct UnreachableRepository;

    #[async_trait]
    impl ContactRepository for UnreachableRepository {
        async fn find_by_id(&self, _: ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
            Err(ContactRepositoryError::connection("db down"))
        }
        async fn find_duplicates(
            &self,
            _: &DuplicateProbe,
        ) -> Result<Vec<Contact>, ContactRepositoryError> {
            Err(ContactRepositoryError::connection("db down"))
        }
        async fn count_matching(&self, _: &ContactListQuery) -> Result<u64, ContactRepositoryError> {
            Err(ContactRepositoryError::connection("db down"))
        }
        async fn list(&self, _: &ContactListQuery) -> Result<Vec<Contact>, ContactRepositoryError> {
            Err(ContactRepositoryError::connection("db down"))
        }
        async fn insert(&self, _: &ContactDraft) -> Result<Contact, ContactRepositoryError> {
            Err(ContactRepositoryError::connection("db down"))
        }
        async fn update(
            &self,
            _: ContactId,
            _: &ContactDraft,
        ) -> Result<Option<Contact>, ContactRepositoryError> {
            Err(ContactRepositoryError::connection("db down"))
        }
        async fn delete(&self, _: ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
            Err(ContactRepositoryError::connection("db down"))
        }
    }

    fn draft() -> ContactDraft {
        ContactDraft::try_new(ContactFields {
            name: Some("Ada Lovelace".into()),
            phone_number: Some("0123456789".into()),
            email: None,
            address: None,
        })
        .expect("valid draft")
    }

    #[rstest]
    #[tokio::test]
    async fn missing_pool_serves_from_an_empty_memory_store() {
        let state = build_contacts_state_with_pool(None::<&()>, |_| UnreachableRepository);

        let page = state
            .contacts_query
            .list(&ContactListQuery::default())
            .await
            .expect("memory listing");
        assert!(page.is_empty());

        let created = state.contacts.create(draft()).await.expect("memory insert");
        let fetched = state
            .contacts_query
            .get(created.id)
            .await
            .expect("command and query share one store");
        assert_eq!(fetched, created);
    }

    #[rstest]
    #[tokio::test]
    async fn pool_present_selects_the_supplied_repository() {
        let state = build_contacts_state_with_pool(Some(&()), |_| UnreachableRepository);

        let err = state
            .contacts_query
            .get(ContactId::new(7))
            .await
            .expect_err("repository is unreachable");
        assert_eq!(err.code(), contact_manager::domain::ErrorCode::ServiceUnavailable);
    }
}
