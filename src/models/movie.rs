use serde::{Deserialize, Serialize};

/// A single catalog row describing a movie
///
/// `overview` and `genre_names` are optional so that an absent value can be
/// told apart from an empty one; the feature builder rejects the former.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    /// Genre labels rendered as one delimited string, e.g. "Sci-Fi, Thriller"
    #[serde(default)]
    pub genre_names: Option<String>,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: u64,
}

impl MovieRecord {
    /// Creates a record with both text fields present
    pub fn new(
        title: impl Into<String>,
        overview: impl Into<String>,
        genre_names: impl Into<String>,
        popularity: f64,
        vote_average: f64,
        vote_count: u64,
    ) -> Self {
        Self {
            title: title.into(),
            overview: Some(overview.into()),
            genre_names: Some(genre_names.into()),
            popularity,
            vote_average,
            vote_count,
        }
    }
}

/// Ordered collection of movie records for one request
///
/// Row order is fixed for the lifetime of the corpus: the similarity matrix
/// is indexed both by position and by title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    movies: Vec<MovieRecord>,
}

impl Corpus {
    /// Wraps records, lowercasing every title into its canonical key
    pub fn normalized(movies: Vec<MovieRecord>) -> Self {
        let movies = movies
            .into_iter()
            .map(|mut movie| {
                movie.title = movie.title.to_lowercase();
                movie
            })
            .collect();
        Self { movies }
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Titles in corpus order
    pub fn titles(&self) -> Vec<String> {
        self.movies.iter().map(|m| m.title.clone()).collect()
    }

    /// First record whose title equals `title` exactly
    pub fn find(&self, title: &str) -> Option<&MovieRecord> {
        self.movies.iter().find(|m| m.title == title)
    }
}
