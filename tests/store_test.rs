use topmovies::{
    db,
    error::AppError,
    models::{NewMovie, Review},
    store::MovieStore,
};

async fn setup_store() -> MovieStore {
    let db = db::connect_and_migrate("sqlite::memory:").await.expect("Failed to init DB");
    MovieStore::new(db)
}

fn new_movie(title: &str, rating: f64) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        year: 2002,
        description: "Publicist Stuart Shepard finds himself trapped in a phone booth.".to_string(),
        rating: Some(rating),
        review: Some("My favourite character was the caller.".to_string()),
        img_url: "https://image.tmdb.org/t/p/w500/tjrX2oWRCM3Tvarz38zlZM7Uc10.jpg".to_string(),
    }
}

#[tokio::test]
async fn insert_assigns_ids_and_leaves_ranking_empty() {
    let store = setup_store().await;

    let first = store.insert(new_movie("Phone Booth", 7.3)).await.unwrap();
    let second = store.insert(new_movie("Tenet", 6.9)).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(first.ranking, None);
    assert_eq!(store.get(1).await.unwrap(), first);
}

#[tokio::test]
async fn duplicate_title_is_a_constraint_violation() {
    let store = setup_store().await;
    store.insert(new_movie("Phone Booth", 7.3)).await.unwrap();

    let err = store.insert(new_movie("Phone Booth", 2.0)).await.unwrap_err();

    assert!(matches!(err, AppError::ConstraintViolation(_)), "got {err:?}");
    assert_eq!(store.count().await.unwrap(), 1);
    assert_eq!(store.get(1).await.unwrap().rating, Some(7.3));
}

#[tokio::test]
async fn count_tracks_inserts() {
    let store = setup_store().await;
    assert_eq!(store.count().await.unwrap(), 0);

    store.insert(new_movie("Phone Booth", 7.3)).await.unwrap();
    store.insert(new_movie("Tenet", 6.9)).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn lookups_distinguish_missing_rows() {
    let store = setup_store().await;

    assert_eq!(store.find(42).await.unwrap(), None);
    assert!(matches!(store.get(42).await, Err(AppError::NotFound { id: 42 })));
}

#[tokio::test]
async fn update_review_changes_only_rating_and_review() {
    let store = setup_store().await;
    let original = store.insert(new_movie("Phone Booth", 7.3)).await.unwrap();

    let updated = store
        .update_review(original.id, Review { rating: 9.1, review: None })
        .await
        .unwrap();

    assert_eq!(updated.rating, Some(9.1));
    assert_eq!(updated.review, None);
    assert_eq!(updated.title, original.title);
    assert_eq!(updated.img_url, original.img_url);
}

#[tokio::test]
async fn update_review_of_missing_movie_is_not_found() {
    let store = setup_store().await;

    let err = store.update_review(3, Review { rating: 5.0, review: None }).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound { id: 3 }));
}

#[tokio::test]
async fn delete_removes_row() {
    let store = setup_store().await;
    let movie = store.insert(new_movie("Phone Booth", 7.3)).await.unwrap();

    store.delete(movie.id).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 0);
    assert!(matches!(store.delete(movie.id).await, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn recompute_rankings_persists_inverse_rating_order() {
    let store = setup_store().await;
    store.insert(new_movie("A", 5.0)).await.unwrap();
    store.insert(new_movie("B", 9.0)).await.unwrap();
    store.insert(new_movie("C", 7.0)).await.unwrap();

    let ranked = store.recompute_rankings().await.unwrap();

    let ids: Vec<i32> = ranked.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 3, 2]);
    assert_eq!(store.get(1).await.unwrap().ranking, Some(1));
    assert_eq!(store.get(2).await.unwrap().ranking, Some(3));
    assert_eq!(store.get(3).await.unwrap().ranking, Some(2));
}

#[tokio::test]
async fn recompute_rankings_follows_rating_changes() {
    let store = setup_store().await;
    store.insert(new_movie("A", 5.0)).await.unwrap();
    store.insert(new_movie("B", 9.0)).await.unwrap();
    store.recompute_rankings().await.unwrap();

    store.update_review(1, Review { rating: 9.5, review: None }).await.unwrap();
    store.recompute_rankings().await.unwrap();

    assert_eq!(store.get(1).await.unwrap().ranking, Some(2));
    assert_eq!(store.get(2).await.unwrap().ranking, Some(1));
}

#[tokio::test]
async fn recompute_rankings_on_empty_store() {
    let store = setup_store().await;

    assert!(store.recompute_rankings().await.unwrap().is_empty());
}
