use crate::{
    error::{AppError, AppResult},
    models::Corpus,
};

/// Number of times the genre labels are repeated in the combined text
///
/// Repetition upweights the genre signal relative to overview length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenreWeight(u32);

impl GenreWeight {
    pub fn new(weight: u32) -> AppResult<Self> {
        if weight == 0 {
            return Err(AppError::InvalidInput(
                "genre weight must be at least 1".to_string(),
            ));
        }
        Ok(Self(weight))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for GenreWeight {
    fn default() -> Self {
        Self(2)
    }
}

/// Builds the combined feature text for every movie, in corpus order
///
/// `overview + " " + (genre_names + ", ") * weight`. An empty overview or
/// genre string is fine; an absent one fails the whole corpus.
pub fn combine_features(corpus: &Corpus, weight: GenreWeight) -> AppResult<Vec<String>> {
    let combined = corpus
        .movies()
        .iter()
        .map(|movie| -> AppResult<String> {
            let overview = movie.overview.as_deref().ok_or_else(|| AppError::MissingField {
                title: movie.title.clone(),
                field: "overview",
            })?;
            let genres = movie
                .genre_names
                .as_deref()
                .ok_or_else(|| AppError::MissingField {
                    title: movie.title.clone(),
                    field: "genre_names",
                })?;

            let mut text = String::with_capacity(
                overview.len() + 1 + (genres.len() + 2) * weight.get() as usize,
            );
            text.push_str(overview);
            text.push(' ');
            for _ in 0..weight.get() {
                text.push_str(genres);
                text.push_str(", ");
            }
            Ok(text)
        })
        .collect::<AppResult<Vec<String>>>()?;

    tracing::debug!(
        movies = combined.len(),
        weight = weight.get(),
        "Combined feature text built"
    );

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieRecord;

    fn corpus() -> Corpus {
        Corpus::normalized(vec![
            MovieRecord::new("Dune", "A desert planet", "Sci-Fi, Adventure", 90.0, 8.0, 12000),
            MovieRecord::new("Blank", "", "", 1.0, 5.0, 10),
        ])
    }

    #[test]
    fn test_default_weight_repeats_genres_twice() {
        let combined = combine_features(&corpus(), GenreWeight::default()).unwrap();
        assert_eq!(
            combined[0],
            "A desert planet Sci-Fi, Adventure, Sci-Fi, Adventure, "
        );
    }

    #[test]
    fn test_empty_fields_are_accepted() {
        let combined = combine_features(&corpus(), GenreWeight::default()).unwrap();
        assert_eq!(combined[1], " , , ");
    }

    #[test]
    fn test_custom_weight() {
        let combined = combine_features(&corpus(), GenreWeight::new(1).unwrap()).unwrap();
        assert_eq!(combined[0], "A desert planet Sci-Fi, Adventure, ");
    }

    #[test]
    fn test_zero_weight_rejected() {
        assert!(matches!(GenreWeight::new(0), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_absent_overview_is_an_error() {
        let mut movie = MovieRecord::new("Dune", "", "Sci-Fi", 1.0, 1.0, 1);
        movie.overview = None;
        let err = combine_features(&Corpus::normalized(vec![movie]), GenreWeight::default())
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingField { field: "overview", .. }
        ));
    }

    #[test]
    fn test_absent_genres_is_an_error() {
        let mut movie = MovieRecord::new("Dune", "Spice", "", 1.0, 1.0, 1);
        movie.genre_names = None;
        let err = combine_features(&Corpus::normalized(vec![movie]), GenreWeight::default())
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingField { field: "genre_names", .. }
        ));
    }
}
