use std::cmp::Ordering;

use crate::entities::movie;

/// Orders movies ascending by rating (unrated first, equal ratings by
/// descending id) and assigns `ranking = index + 1`, so the best-rated movie
/// ends up with the highest number.
///
/// Returns the movies in that ascending order.
pub fn assign_rankings(mut movies: Vec<movie::Model>) -> Vec<movie::Model> {
    movies.sort_by(|a, b| compare_rating(a.rating, b.rating).then(b.id.cmp(&a.id)));

    for (index, movie) in movies.iter_mut().enumerate() {
        movie.ranking = Some(index as i32 + 1);
    }
    movies
}

fn compare_rating(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
