use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Candidate, MovieDetails},
};

/// Client for the TMDB v3 API, authenticated with an `api_key` query parameter.
///
/// Requests are made once, with no retry and no caching; any non-2xx answer is
/// returned as [`AppError::ExternalService`].
pub struct TmdbClient {
    client: wreq::Client,
    api_key: String,
    base_url: String,
    image_url: String,
}

impl TmdbClient {
    pub fn new(client: wreq::Client, api_key: String, base_url: String, image_url: String) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("no TMDB_API_KEY provided, TMDB requests will be rejected");
        }
        Self { client, api_key, base_url, image_url }
    }

    pub async fn search_by_title(&self, query: &str) -> AppResult<Vec<Candidate>> {
        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        tracing::debug!(query = %query, "searching TMDB");

        let resp: SearchResponse = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("query", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.results.into_iter().map(Candidate::from).collect())
    }

    pub async fn get_details_by_id(&self, tmdb_id: i32) -> AppResult<MovieDetails> {
        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), tmdb_id);
        tracing::debug!(tmdb_id, "fetching TMDB movie details");

        let resp: MovieResponse = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        resp.into_details(&self.image_url)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchMovie>,
}

#[derive(Debug, Deserialize)]
struct SearchMovie {
    id: i32,
    title: String,
    release_date: Option<String>,
    overview: Option<String>,
}

impl From<SearchMovie> for Candidate {
    fn from(m: SearchMovie) -> Self {
        Candidate {
            tmdb_id: m.id,
            title: m.title,
            release_date: m.release_date.filter(|d| !d.is_empty()),
            overview: m.overview.filter(|o| !o.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovieResponse {
    id: i32,
    original_title: String,
    overview: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
}

impl MovieResponse {
    fn into_details(self, image_url: &str) -> AppResult<MovieDetails> {
        let year = self
            .release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse::<i32>().ok())
            .ok_or_else(|| {
                AppError::ExternalService(format!("movie {} has no release year", self.id))
            })?;
        let poster_path = self.poster_path.ok_or_else(|| {
            AppError::ExternalService(format!("movie {} has no poster", self.id))
        })?;

        Ok(MovieDetails {
            title: self.original_title,
            description: self.overview.unwrap_or_default(),
            year,
            img_url: format!("{image_url}{poster_path}"),
        })
    }
}
