use std::collections::HashSet;

use crate::models::{Corpus, MovieRecord, RecommendationMetrics};

/// Root-mean-square deviation of the recommended set from the query movie
/// on popularity, vote average and vote count
///
/// Every corpus row whose title is in `recommendations` contributes one term.
/// Results are rounded to 3 decimals. If the query row is missing, or no
/// recommended row is found, all three metrics are NaN.
pub fn compute_metrics(
    corpus: &Corpus,
    query_title: &str,
    recommendations: &[String],
) -> RecommendationMetrics {
    let Some(query) = corpus.find(query_title) else {
        tracing::warn!(query = %query_title, "Query movie missing from corpus; metrics are NaN");
        return RecommendationMetrics::nan();
    };

    let wanted: HashSet<&str> = recommendations.iter().map(String::as_str).collect();
    let recommended: Vec<&MovieRecord> = corpus
        .movies()
        .iter()
        .filter(|movie| wanted.contains(movie.title.as_str()))
        .collect();

    RecommendationMetrics {
        popularity: rmse(
            query.popularity,
            recommended.iter().map(|m| m.popularity),
        ),
        vote_avg: rmse(
            query.vote_average,
            recommended.iter().map(|m| m.vote_average),
        ),
        vote_count: rmse(
            query.vote_count as f64,
            recommended.iter().map(|m| m.vote_count as f64),
        ),
    }
}

/// `sqrt(mean((reference - x)^2))` rounded to 3 decimals; NaN for no values
fn rmse(reference: f64, values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| {
        let diff = reference - value;
        (sum + diff * diff, count + 1)
    });
    if count == 0 {
        return f64::NAN;
    }
    round3((sum / count as f64).sqrt())
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn corpus() -> Corpus {
        Corpus::normalized(vec![
            MovieRecord::new("Inception", "", "", 80.0, 8.3, 30000),
            MovieRecord::new("Paprika", "", "", 20.0, 7.7, 500),
            MovieRecord::new("Dune", "", "", 90.0, 8.0, 12000),
        ])
    }

    #[test]
    fn test_single_recommendation() {
        let metrics = compute_metrics(&corpus(), "inception", &["paprika".to_string()]);
        assert_relative_eq!(metrics.popularity, 60.0);
        assert_relative_eq!(metrics.vote_avg, 0.6);
        assert_relative_eq!(metrics.vote_count, 29500.0);
    }

    #[test]
    fn test_multiple_recommendations() {
        let recs = vec!["paprika".to_string(), "dune".to_string()];
        let metrics = compute_metrics(&corpus(), "inception", &recs);
        // sqrt((60^2 + 10^2) / 2) = 43.0116...
        assert_relative_eq!(metrics.popularity, 43.012);
        // sqrt((0.6^2 + 0.3^2) / 2) = 0.4743...
        assert_relative_eq!(metrics.vote_avg, 0.474);
        // sqrt((29500^2 + 18000^2) / 2) = 24436.14...
        assert_relative_eq!(metrics.vote_count, 24436.141);
    }

    #[test]
    fn test_missing_query_gives_nan_everywhere() {
        let metrics = compute_metrics(&corpus(), "unknown", &["paprika".to_string()]);
        assert!(metrics.popularity.is_nan());
        assert!(metrics.vote_avg.is_nan());
        assert!(metrics.vote_count.is_nan());
    }

    #[test]
    fn test_empty_recommendations_give_nan() {
        let metrics = compute_metrics(&corpus(), "inception", &[]);
        assert_eq!(metrics, RecommendationMetrics::nan());
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(2.0), 2.0);
        assert!(round3(f64::NAN).is_nan());
    }
}
