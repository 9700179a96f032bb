use std::cmp::Ordering;

use super::similarity::SimilarityMatrix;

/// Outcome of a neighbour lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Neighbors {
    /// Titles ordered by descending similarity, query excluded
    Found(Vec<String>),
    /// The query title is not a label of the similarity matrix
    NotFound,
}

impl Neighbors {
    /// Recommended titles, empty when the query was not found
    pub fn into_titles(self) -> Vec<String> {
        match self {
            Neighbors::Found(titles) => titles,
            Neighbors::NotFound => Vec::new(),
        }
    }
}

/// Ranks every item against `query_title` and returns the `top_n` closest
///
/// The query is lowercased, then looked up among `title_list`. Its row is
/// sorted by descending similarity (stable, so ties keep corpus order; NaN
/// sorts last), the first entry is dropped as the query itself and the next
/// `top_n` titles are returned.
///
/// If another title ties the query's own similarity and sorts ahead of it,
/// that title is the one dropped and the query can appear in the result.
pub fn recommend(
    query_title: &str,
    similarity: &SimilarityMatrix,
    title_list: &[String],
    top_n: usize,
) -> Neighbors {
    let query = query_title.to_lowercase();

    let Some(scores) = similarity.row(&query) else {
        tracing::info!(query = %query, "Query title not in similarity index");
        return Neighbors::NotFound;
    };

    let mut order: Vec<usize> = (0..scores.len().min(title_list.len())).collect();
    order.sort_by(|&a, &b| descending(scores[a], scores[b]));

    let recommended: Vec<String> = order
        .into_iter()
        .skip(1)
        .take(top_n)
        .map(|i| title_list[i].clone())
        .collect();

    tracing::debug!(
        query = %query,
        requested = top_n,
        returned = recommended.len(),
        "Neighbors ranked"
    );

    Neighbors::Found(recommended)
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
