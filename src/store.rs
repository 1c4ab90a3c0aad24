use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryOrder, Set,
};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{NewMovie, Review},
    ranking,
};

/// Persistence operations over the `movie` table.
///
/// Every call auto-commits on its own; nothing here opens a transaction that
/// outlives a single statement.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn count(&self) -> AppResult<u64> {
        Ok(movie::Entity::find().count(&self.db).await?)
    }

    /// All movies, ascending by rating with unrated rows first.
    pub async fn all_by_rating(&self) -> AppResult<Vec<movie::Model>> {
        let movies = movie::Entity::find()
            .order_by_asc(movie::Column::Rating)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    pub async fn find(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> AppResult<movie::Model> {
        self.find(id).await?.ok_or(AppError::NotFound { id })
    }

    pub async fn insert(&self, new: NewMovie) -> AppResult<movie::Model> {
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(new.rating),
            ranking: Set(None),
            review: Set(new.review),
            img_url: Set(new.img_url),
        };

        let movie = model.insert(&self.db).await?;
        tracing::info!(id = movie.id, title = %movie.title, "movie added");
        Ok(movie)
    }

    pub async fn update_review(&self, id: i32, review: Review) -> AppResult<movie::Model> {
        let mut model = self.get(id).await?.into_active_model();
        model.rating = Set(Some(review.rating));
        model.review = Set(review.review);

        let movie = model.update(&self.db).await?;
        tracing::info!(id, rating = review.rating, "movie review updated");
        Ok(movie)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let movie = self.get(id).await?;
        let title = movie.title.clone();
        movie.delete(&self.db).await?;
        tracing::info!(id, title = %title, "movie deleted");
        Ok(())
    }

    /// Recomputes every movie's ranking from its rating and writes back the
    /// rows whose ranking changed.
    ///
    /// Returns the movies in ascending rating order.
    pub async fn recompute_rankings(&self) -> AppResult<Vec<movie::Model>> {
        let current = self.all_by_rating().await?;
        let previous: HashMap<i32, Option<i32>> =
            current.iter().map(|m| (m.id, m.ranking)).collect();
        let ranked = ranking::assign_rankings(current);

        let mut written = 0usize;
        for row in &ranked {
            if previous.get(&row.id) == Some(&row.ranking) {
                continue;
            }
            movie::ActiveModel {
                id: Set(row.id),
                ranking: Set(row.ranking),
                ..Default::default()
            }
            .update(&self.db)
            .await?;
            written += 1;
        }

        tracing::debug!(total = ranked.len(), written, "rankings recomputed");
        Ok(ranked)
    }
}
