/// A search hit from TMDB that has not been stored locally.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub tmdb_id: i32,
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
}

/// Details of a single TMDB movie, already reduced to what a stored movie needs.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieDetails {
    pub title: String,
    pub description: String,
    pub year: i32,
    pub img_url: String,
}

/// The rating and review a user gives a movie.
#[derive(Clone, Debug, PartialEq)]
pub struct Review {
    pub rating: f64,
    pub review: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub rating: Option<f64>,
    pub review: Option<String>,
    pub img_url: String,
}

impl NewMovie {
    pub fn from_details(details: MovieDetails, review: Review) -> Self {
        Self {
            title: details.title,
            year: details.year,
            description: details.description,
            rating: Some(review.rating),
            review: review.review,
            img_url: details.img_url,
        }
    }
}
