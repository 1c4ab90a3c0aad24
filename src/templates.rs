use axum::http::StatusCode;
use hypertext::prelude::*;

use crate::{
    entities::movie,
    forms::{AddMovieForm, EditMovieForm, FormErrors},
    models::Candidate,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

/// The movie list. `movies` must already be in display order.
pub fn index_page(movies: &[movie::Model]) -> Rendered<String> {
    page(
        "My Top Movies",
        maud! {
            div class="max-w-4xl mx-auto px-6 py-12" {
                div class="flex items-start justify-between gap-6" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                        p class="mt-2 text-gray-600" { "These are my all-time favourite movies." }
                    }
                    a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                }

                @if movies.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "No movies yet. Add one to get started." }
                    }
                } @else {
                    div class="mt-10 space-y-4" {
                        @for movie in movies {
                            (movie_card(movie))
                        }
                    }
                }
            }
        },
    )
}

fn movie_card(movie: &movie::Model) -> impl Renderable {
    maud! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" {
            img class="w-32 rounded" src=(movie.img_url) alt=(movie.title);
            div class="flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        @if let Some(ranking) = movie.ranking {
                            span class="mr-2 text-gray-400" { "#" (ranking) }
                        }
                        (movie.title)
                        span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                    }
                    @if let Some(rating) = movie.rating {
                        span class="text-lg font-semibold text-yellow-600" { (format!("{rating:.1}")) }
                    }
                }
                p class="mt-2 text-gray-700" { (movie.description) }
                @if let Some(review) = &movie.review {
                    p class="mt-2 italic text-gray-600" { "\u{201c}" (review) "\u{201d}" }
                }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", movie.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", movie.id)) { "Delete" }
                }
            }
        }
    }
}

/// Rating/review form for a stored movie (`id` is the local id) or a TMDB
/// candidate (`id` is the TMDB id).
pub fn edit_page(
    id: i32,
    movie_title: &str,
    submitted: &EditMovieForm,
    errors: &FormErrors,
    csrf_token: &str,
) -> Rendered<String> {
    page(
        "Edit Movie",
        maud! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { (movie_title) }
                    p class="mt-2 text-gray-600" { "Edit Movie Rating" }

                    form class="mt-8 space-y-6" method="post" action=(format!("/edit?id={id}")) {
                        input type="hidden" name="csrf_token" value=(csrf_token);
                        (field_error(errors, "csrf_token"))

                        div {
                            label class="block text-sm font-medium text-gray-700" for="new_rating" { "Your Rating Out of 10" }
                            input class=(INPUT_CLASS) name="new_rating" id="new_rating" value=(submitted.new_rating);
                            (field_error(errors, "new_rating"))
                        }

                        div {
                            label class="block text-sm font-medium text-gray-700" for="new_review" { "Your Review" }
                            input class=(INPUT_CLASS) name="new_review" id="new_review" value=(submitted.new_review);
                        }

                        button class=(BUTTON_CLASS) type="submit" { "Update" }
                    }
                }
            }
        },
    )
}

pub fn add_page(submitted: &AddMovieForm, errors: &FormErrors, csrf_token: &str) -> Rendered<String> {
    page(
        "Add Movie",
        maud! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }

                    form class="mt-8 space-y-6" method="post" action="/add" {
                        input type="hidden" name="csrf_token" value=(csrf_token);
                        (field_error(errors, "csrf_token"))

                        div {
                            label class="block text-sm font-medium text-gray-700" for="title" { "Name of movie" }
                            input class=(INPUT_CLASS) name="title" id="title" value=(submitted.title) required;
                            (field_error(errors, "title"))
                        }

                        button class=(BUTTON_CLASS) type="submit" { "Add Movie" }
                    }
                }
            }
        },
    )
}

/// Search results; each candidate links into the edit flow by TMDB id.
pub fn select_page(query: &str, candidates: &[Candidate]) -> Rendered<String> {
    page(
        "Select Movie",
        maud! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                    p class="mt-2 text-gray-600" { "Results for \u{201c}" (query) "\u{201d}" }

                    @if candidates.is_empty() {
                        p class="mt-8 text-gray-600" { "No movies found." }
                    } @else {
                        ul class="mt-8 divide-y divide-gray-200" {
                            @for candidate in candidates {
                                li class="py-3" {
                                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", candidate.tmdb_id)) {
                                        (candidate.title)
                                        @if let Some(date) = &candidate.release_date {
                                            " - " (date)
                                        }
                                    }
                                    @if let Some(overview) = &candidate.overview {
                                        p class="mt-1 text-sm text-gray-500" { (overview) }
                                    }
                                }
                            }
                        }
                    }

                    a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/add" { "Search again" }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: String) -> Rendered<String> {
    let heading = status.canonical_reason().unwrap_or("Error");
    page(
        "Error",
        maud! {
            div class="min-h-screen flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { (status.as_u16()) " " (heading) }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn field_error<'a>(errors: &'a FormErrors, field: &'a str) -> impl Renderable + 'a {
    maud! {
        @if let Some(err) = errors.get(field) {
            p class="mt-2 text-sm text-red-600" { (err.to_string()) }
        }
    }
}

fn page(page_title: &str, content: impl Renderable) -> Rendered<String> {
    maud! {
        !DOCTYPE
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page_title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" { (content) }
        }
    }
    .render()
}
