use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use hypertext::Rendered;
use serde::Deserialize;

use crate::{
    AppState,
    entities::movie,
    error::AppResult,
    forms::{self, AddMovieForm, EditMovieForm, FormErrors},
    models::{MovieDetails, NewMovie},
    templates,
};

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    id: i32,
}

/// Lists every movie, best first. Rankings are recomputed and written back
/// before rendering.
pub async fn home(State(state): State<Arc<AppState>>) -> AppResult<Rendered<String>> {
    let mut movies = state.store.recompute_rankings().await?;
    movies.reverse();
    Ok(templates::index_page(&movies))
}

/// What an `/edit?id=` request refers to: a stored movie, or failing that, a
/// TMDB movie picked from the search results.
enum EditTarget {
    Stored(movie::Model),
    Remote(MovieDetails),
}

impl EditTarget {
    async fn resolve(state: &AppState, id: i32) -> AppResult<Self> {
        match state.store.find(id).await? {
            Some(movie) => Ok(EditTarget::Stored(movie)),
            None => Ok(EditTarget::Remote(state.tmdb.get_details_by_id(id).await?)),
        }
    }

    fn title(&self) -> &str {
        match self {
            EditTarget::Stored(movie) => &movie.title,
            EditTarget::Remote(details) => &details.title,
        }
    }
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
    jar: CookieJar,
) -> AppResult<Response> {
    let target = EditTarget::resolve(&state, q.id).await?;
    // Stored movies get a blank form too, not their current rating/review.
    Ok(render_edit(jar, q.id, &target, &EditMovieForm::default(), &FormErrors::default()))
}

pub async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
    jar: CookieJar,
    Form(form): Form<EditMovieForm>,
) -> AppResult<Response> {
    let target = EditTarget::resolve(&state, q.id).await?;

    let review = match form.validate(forms::csrf_cookie(&jar)) {
        Ok(review) => review,
        Err(errors) => {
            tracing::debug!(id = q.id, ?errors, "edit form rejected");
            return Ok(render_edit(jar, q.id, &target, &form, &errors));
        },
    };

    match target {
        EditTarget::Stored(movie) => {
            state.store.update_review(movie.id, review).await?;
        },
        EditTarget::Remote(details) => {
            state.store.insert(NewMovie::from_details(details, review)).await?;
        },
    }
    Ok(Redirect::to("/").into_response())
}

fn render_edit(
    jar: CookieJar,
    id: i32,
    target: &EditTarget,
    form: &EditMovieForm,
    errors: &FormErrors,
) -> Response {
    let (jar, token) = forms::issue_csrf_token(jar);
    (jar, templates::edit_page(id, target.title(), form, errors, &token)).into_response()
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Redirect> {
    state.store.delete(q.id).await?;
    Ok(Redirect::to("/"))
}

pub async fn add_form(jar: CookieJar) -> Response {
    render_add(jar, &AddMovieForm::default(), &FormErrors::default())
}

/// Searches TMDB and shows the candidates. Nothing is stored until one is
/// picked and rated through `/edit`.
pub async fn add_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<AddMovieForm>,
) -> AppResult<Response> {
    let query = match form.validate(forms::csrf_cookie(&jar)) {
        Ok(query) => query,
        Err(errors) => {
            tracing::debug!(?errors, "add form rejected");
            return Ok(render_add(jar, &form, &errors));
        },
    };

    let candidates = state.tmdb.search_by_title(&query).await?;
    tracing::debug!(query = %query, found = candidates.len(), "search finished");
    Ok(templates::select_page(&query, &candidates).into_response())
}

fn render_add(jar: CookieJar, form: &AddMovieForm, errors: &FormErrors) -> Response {
    let (jar, token) = forms::issue_csrf_token(jar);
    (jar, templates::add_page(form, errors, &token)).into_response()
}
