//! PostgreSQL integration tests for the product DAO and repository.
//!
//! Require Docker; run with `cargo test -- --ignored`.

mod common;

use catalog_core::{ErrorKind, ProductDraft, ProductId};
use catalog_repository::{
    DatabasePoolInterface, MokaProductCache, PostgresProductDao, ProductCache, ProductDao,
    ProductRepository, ProductRepositoryImpl, StoreError,
};
use common::TestDatabase;
use std::sync::Arc;

fn donut(price: i32) -> ProductDraft {
    ProductDraft::new("Donut", price, "Tasty")
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_dao_round_trip() {
    let db = TestDatabase::new().await;
    db.pool().health_check().await.unwrap();
    let dao = PostgresProductDao::new(db.pool());
    let id = ProductId::new("0192a000-0000-7000-8000-000000000001");

    let stored = dao.insert(&id, &donut(1000)).await.unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.price, 1000);

    let found = dao.find_by_id(&id).await.unwrap();
    assert_eq!(found.name, "Donut");
    assert_eq!(found.created_at, stored.created_at);

    let updated = dao.update(&id, &donut(1200)).await.unwrap();
    assert_eq!(updated.price, 1200);
    assert_eq!(updated.created_at, stored.created_at);

    dao.delete(&id).await.unwrap();
    assert!(matches!(dao.find_by_id(&id).await, Err(StoreError::NotFound)));
    assert!(matches!(dao.delete(&id).await, Err(StoreError::NotFound)));
    assert!(matches!(dao.update(&id, &donut(1)).await, Err(StoreError::NotFound)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_dao_unique_name_and_ordering() {
    let db = TestDatabase::new().await;
    let dao = PostgresProductDao::new(db.pool());

    let first = ProductId::new("0192a000-0000-7000-8000-000000000001");
    let second = ProductId::new("0192a000-0000-7000-8000-000000000002");

    dao.insert(&second, &ProductDraft::new("Bagel", 300, "Chewy")).await.unwrap();
    dao.insert(&first, &donut(1000)).await.unwrap();

    let err = dao.insert(&ProductId::new("x"), &donut(5)).await.unwrap_err();
    assert!(matches!(err, StoreError::UniqueViolation));

    let err = dao.update(&second, &donut(300)).await.unwrap_err();
    assert!(matches!(err, StoreError::UniqueViolation));

    let all = dao.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first);
    assert_eq!(all[1].id, second);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_repository_scenario() {
    let db = TestDatabase::new().await;
    let cache = Arc::new(MokaProductCache::default());
    let repo = ProductRepositoryImpl::new(Arc::new(PostgresProductDao::new(db.pool())), cache.clone());
    let id = ProductId::new("0192a000-0000-7000-8000-000000000001");

    repo.create(&id, &donut(1000)).await.unwrap();
    assert!(cache.get(&id).await.is_some());

    repo.update(&id, &donut(1200)).await.unwrap();
    assert_eq!(repo.get(&id).await.unwrap().price, 1200);

    repo.delete(&id).await.unwrap();
    assert_eq!(repo.get(&id).await.unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(repo.get_all().await.unwrap_err().kind(), ErrorKind::NotFound);
}
