use std::sync::Arc;

use crate::domain::entity::errors::EntityError;
use crate::domain::entity::models::Entity;
use crate::domain::entity::ports::EntityRepository;
use crate::domain::page::Page;
use crate::domain::page::PageRequest;

/// Generic CRUD service shared by the five business entities.
///
/// The six original list/add/update/delete screens follow one identical
/// pattern; this service is that pattern written once, parameterized by
/// the entity type and its repository port.
pub struct EntityService<E: Entity> {
    repository: Arc<dyn EntityRepository<E>>,
}

impl<E: Entity> EntityService<E> {
    pub fn new(repository: Arc<dyn EntityRepository<E>>) -> Self {
        Self { repository }
    }

    pub async fn find_all(&self) -> Result<Vec<E>, EntityError> {
        self.repository.find_all().await
    }

    /// Assemble one page from a count plus an id-ordered slice.
    ///
    /// A page number past the last valid page yields empty content with
    /// the correctly computed total. Count and slice are two separate
    /// statements; consistency between them is best-effort.
    pub async fn find_paginated(&self, request: PageRequest) -> Result<Page<E>, EntityError> {
        let total = self.repository.count().await?;
        let content = self
            .repository
            .find_slice(request.limit(), request.offset())
            .await?;

        Ok(Page::new(content, request, total))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<E, EntityError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(EntityError::NotFound {
                entity: E::NAME,
                id,
            })
    }

    /// Insert or update depending on id presence.
    ///
    /// A record without an id is inserted and returned with its generated
    /// id; a record carrying an id updates that row and nothing else, so
    /// an "update" can never create an unrelated duplicate.
    pub async fn save(&self, entity: E) -> Result<E, EntityError> {
        match entity.id() {
            None => {
                let stored = self.repository.insert(entity).await?;
                tracing::info!(entity = E::NAME, id = stored.id(), "record inserted");
                Ok(stored)
            }
            Some(id) => {
                let stored = self.repository.update(entity).await?;
                tracing::info!(entity = E::NAME, id, "record updated");
                Ok(stored)
            }
        }
    }

    /// Delete by id; deleting an absent id is a no-op, not an error.
    pub async fn delete_by_id(&self, id: i32) -> Result<(), EntityError> {
        let removed = self.repository.delete(id).await?;
        if removed {
            tracing::info!(entity = E::NAME, id, "record deleted");
        } else {
            tracing::debug!(entity = E::NAME, id, "delete of absent id ignored");
        }
        Ok(())
    }

    pub async fn exists_by_id(&self, id: i32) -> Result<bool, EntityError> {
        self.repository.exists_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::entity::models::BidList;

    mock! {
        pub TestBidListRepository {}

        #[async_trait]
        impl EntityRepository<BidList> for TestBidListRepository {
            async fn find_all(&self) -> Result<Vec<BidList>, EntityError>;
            async fn count(&self) -> Result<u64, EntityError>;
            async fn find_slice(&self, limit: i64, offset: i64) -> Result<Vec<BidList>, EntityError>;
            async fn find_by_id(&self, id: i32) -> Result<Option<BidList>, EntityError>;
            async fn insert(&self, entity: BidList) -> Result<BidList, EntityError>;
            async fn update(&self, entity: BidList) -> Result<BidList, EntityError>;
            async fn delete(&self, id: i32) -> Result<bool, EntityError>;
            async fn exists_by_id(&self, id: i32) -> Result<bool, EntityError>;
        }
    }

    fn bid(account: &str) -> BidList {
        BidList {
            account: account.to_string(),
            bid_type: "LIVE".to_string(),
            ..BidList::default()
        }
    }

    fn stored(id: i32, account: &str) -> BidList {
        let mut entity = bid(account);
        entity.set_id(id);
        entity
    }

    #[tokio::test]
    async fn save_without_id_inserts_and_returns_generated_id() {
        let mut repository = MockTestBidListRepository::new();
        repository
            .expect_insert()
            .withf(|e| e.id.is_none() && e.account == "acc-1")
            .times(1)
            .returning(|mut e| {
                e.set_id(7);
                Ok(e)
            });
        repository.expect_update().times(0);

        let service = EntityService::new(Arc::new(repository));

        let saved = service.save(bid("acc-1")).await.unwrap();
        assert_eq!(saved.id, Some(7));
    }

    #[tokio::test]
    async fn save_with_id_updates_in_place() {
        let mut repository = MockTestBidListRepository::new();
        repository.expect_insert().times(0);
        repository
            .expect_update()
            .withf(|e| e.id == Some(3))
            .times(1)
            .returning(Ok);

        let service = EntityService::new(Arc::new(repository));

        let saved = service.save(stored(3, "acc-1")).await.unwrap();
        assert_eq!(saved.id, Some(3));
    }

    #[tokio::test]
    async fn save_with_unknown_id_surfaces_not_found() {
        let mut repository = MockTestBidListRepository::new();
        repository.expect_update().times(1).returning(|_| {
            Err(EntityError::NotFound {
                entity: BidList::NAME,
                id: 99,
            })
        });

        let service = EntityService::new(Arc::new(repository));

        let result = service.save(stored(99, "acc-1")).await;
        assert!(matches!(result, Err(EntityError::NotFound { id: 99, .. })));
    }

    #[tokio::test]
    async fn find_by_id_maps_absence_to_not_found() {
        let mut repository = MockTestBidListRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(None));

        let service = EntityService::new(Arc::new(repository));

        let result = service.find_by_id(42).await;
        assert!(matches!(result, Err(EntityError::NotFound { id: 42, .. })));
    }

    #[tokio::test]
    async fn delete_of_absent_id_is_a_no_op() {
        let mut repository = MockTestBidListRepository::new();
        repository
            .expect_delete()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(false));

        let service = EntityService::new(Arc::new(repository));

        assert!(service.delete_by_id(42).await.is_ok());
    }

    #[tokio::test]
    async fn find_paginated_builds_the_page_from_count_and_slice() {
        let mut repository = MockTestBidListRepository::new();
        repository.expect_count().times(1).returning(|| Ok(12));
        repository
            .expect_find_slice()
            .with(eq(5), eq(10))
            .times(1)
            .returning(|_, _| Ok(vec![stored(11, "acc-11"), stored(12, "acc-12")]));

        let service = EntityService::new(Arc::new(repository));

        let page = service
            .find_paginated(PageRequest::of(2, 5, 10))
            .await
            .unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page_number, 2);
    }

    #[tokio::test]
    async fn find_paginated_past_the_end_is_empty_not_an_error() {
        let mut repository = MockTestBidListRepository::new();
        repository.expect_count().times(1).returning(|| Ok(12));
        repository
            .expect_find_slice()
            .with(eq(5), eq(15))
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = EntityService::new(Arc::new(repository));

        let page = service
            .find_paginated(PageRequest::of(3, 5, 10))
            .await
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 3);
    }
}
