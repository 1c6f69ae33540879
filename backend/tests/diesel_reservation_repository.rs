//! Integration tests for the Diesel reservation repository.
//!
//! These run against the database named by `TEST_DATABASE_URL` and are
//! skipped when it is unset.

use std::sync::Arc;

use reservation_service::domain::ports::ReservationRepository;
use reservation_service::domain::{
    NewReservation, ReservationName, ReservationService, ReservationServiceError, TransactionMode,
};
use rstest::rstest;

mod support;
#[path = "support/postgres.rs"]
mod postgres;

use postgres::test_database;
use support::names_of;

fn pending(name: &str) -> NewReservation {
    NewReservation::new(ReservationName::new(name).expect("valid name"))
}

async fn stored_names(repository: &dyn ReservationRepository) -> Vec<String> {
    repository
        .find_all()
        .await
        .expect("find all")
        .into_iter()
        .map(|reservation| reservation.name().to_string())
        .collect()
}

#[rstest]
#[tokio::test]
async fn save_assigns_increasing_ids_and_find_all_orders_them() {
    let Some(db) = test_database().await else {
        return;
    };

    let first = db.repository.save(pending("Josh")).await.expect("save");
    let second = db.repository.save(pending("Madhura")).await.expect("save");

    assert!(first.id() < second.id());
    let all = db.repository.find_all().await.expect("find all");
    assert_eq!(all, vec![first, second]);
}

#[rstest]
#[tokio::test]
async fn delete_all_reports_removed_rows() {
    let Some(db) = test_database().await else {
        return;
    };
    for name in ["Josh", "Olga", "Marcin"] {
        db.repository.save(pending(name)).await.expect("save");
    }

    let removed = db.repository.delete_all().await.expect("delete all");

    assert_eq!(removed, 3);
    assert!(stored_names(&db.repository).await.is_empty());
    assert_eq!(db.repository.delete_all().await.expect("delete all"), 0);
}

#[rstest]
#[tokio::test]
async fn committed_transaction_is_visible() {
    let Some(db) = test_database().await else {
        return;
    };

    let mut transaction = db.repository.begin().await.expect("begin");
    transaction.save(pending("Josh")).await.expect("save");
    transaction.save(pending("Ria")).await.expect("save");
    assert!(
        stored_names(&db.repository).await.is_empty(),
        "uncommitted rows stay invisible to other connections"
    );
    transaction.commit().await.expect("commit");

    assert_eq!(stored_names(&db.repository).await, ["Josh", "Ria"]);
}

#[rstest]
#[tokio::test]
async fn rolled_back_transaction_leaves_no_rows() {
    let Some(db) = test_database().await else {
        return;
    };

    let mut transaction = db.repository.begin().await.expect("begin");
    transaction.save(pending("Josh")).await.expect("save");
    transaction.rollback().await.expect("rollback");

    assert!(stored_names(&db.repository).await.is_empty());
}

#[rstest]
#[tokio::test]
async fn finished_transaction_rejects_further_use() {
    let Some(db) = test_database().await else {
        return;
    };

    let mut transaction = db.repository.begin().await.expect("begin");
    transaction.commit().await.expect("commit");

    assert!(transaction.save(pending("Josh")).await.is_err());
    assert!(transaction.commit().await.is_err());
}

#[rstest]
#[tokio::test]
async fn dropped_transaction_leaves_no_rows() {
    let Some(db) = test_database().await else {
        return;
    };

    {
        let mut transaction = db.repository.begin().await.expect("begin");
        transaction.save(pending("Josh")).await.expect("save");
    }

    assert!(stored_names(&db.repository).await.is_empty());
}

#[rstest]
#[case(TransactionMode::Transactional, &["Josh", "josh"], &[])]
#[case(TransactionMode::AutoCommit, &["josh"], &["josh"])]
#[tokio::test]
async fn lowercase_batch_follows_the_transaction_mode(
    #[case] mode: TransactionMode,
    #[case] input: &[&str],
    #[case] expected: &[&str],
) {
    let Some(db) = test_database().await else {
        return;
    };
    let repository: Arc<dyn ReservationRepository> = Arc::new(db.repository.clone());
    let service = ReservationService::with_mode(Arc::clone(&repository), mode);

    let error = service
        .save_all(input.iter().copied())
        .await
        .expect_err("lowercase name rejected");

    assert!(matches!(
        error,
        ReservationServiceError::CapitalisationRequired { .. }
    ));
    assert_eq!(stored_names(repository.as_ref()).await, expected);
}

#[rstest]
#[actix_web::test]
async fn valid_batch_is_listed_over_http() {
    let Some(db) = test_database().await else {
        return;
    };
    let repository: Arc<dyn ReservationRepository> = Arc::new(db.repository.clone());
    let service = ReservationService::new(Arc::clone(&repository));

    service
        .save_all(["Josh", "Cornelia"])
        .await
        .expect("batch saved");

    let listed = support::fetch_reservations(Arc::new(db.repository.clone())).await;
    assert_eq!(names_of(&listed), ["Josh", "Cornelia"]);
}
