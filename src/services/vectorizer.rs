//! TF-IDF vectorization of combined feature text.
//!
//! Weighting follows the usual smoothed scheme:
//!
//! ```text
//! tf(t, d)  = count of t in d
//! idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! w(t, d)   = tf(t, d) * idf(t), rows L2-normalized
//! ```
//!
//! The vocabulary is rebuilt on every call; nothing is kept between requests.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use sprs::{CsMat, CsVecView, TriMat};

use super::stop_words::StopWords;

/// Outcome of fitting the vectorizer over a corpus
#[derive(Debug, Clone)]
pub enum Vectorization {
    Fitted(TfidfMatrix),
    /// No token survived tokenization and stop-word removal (or the corpus
    /// was empty); downstream steps short-circuit to an empty result.
    NoVocabulary,
}

/// Sparse TF-IDF weights, one row per document, one column per term
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    weights: CsMat<f64>,
}

impl TfidfMatrix {
    pub fn n_documents(&self) -> usize {
        self.weights.rows()
    }

    pub fn n_terms(&self) -> usize {
        self.weights.cols()
    }

    /// Term -> column, columns in alphabetical term order
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&col| self.idf[col])
    }

    /// Row view of a document's weights
    pub fn row(&self, document: usize) -> Option<CsVecView<'_, f64>> {
        self.weights.outer_view(document)
    }

    pub(crate) fn weights(&self) -> &CsMat<f64> {
        &self.weights
    }

    /// Weight of `term` in `document`, 0.0 when absent
    pub fn weight(&self, document: usize, term: &str) -> f64 {
        self.vocabulary
            .get(term)
            .and_then(|&col| self.weights.get(document, col).copied())
            .unwrap_or(0.0)
    }
}

/// Per-request TF-IDF model
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    stop_words: StopWords,
}

impl TfidfVectorizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    /// Learns the vocabulary and idf weights from `documents` and returns
    /// their weight matrix
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Vectorization {
        let stop_words = self.stop_words.to_set();
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| tokenize(doc.as_ref(), &stop_words))
            .collect();

        let vocabulary: BTreeMap<String, usize> = tokenized
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .enumerate()
            .map(|(col, term)| (term, col))
            .collect();

        if vocabulary.is_empty() {
            tracing::warn!(
                documents = documents.len(),
                "Empty vocabulary; documents contain only stop words or no text"
            );
            return Vectorization::NoVocabulary;
        }

        let n_docs = tokenized.len();
        let n_terms = vocabulary.len();

        let counts: Vec<BTreeMap<usize, f64>> = tokenized
            .iter()
            .map(|tokens| {
                let mut counts = BTreeMap::new();
                for token in tokens {
                    *counts.entry(vocabulary[token]).or_insert(0.0) += 1.0;
                }
                counts
            })
            .collect();

        let mut doc_freq = vec![0usize; n_terms];
        for doc in &counts {
            for &col in doc.keys() {
                doc_freq[col] += 1;
            }
        }

        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let mut triplets: TriMat<f64> = TriMat::new((n_docs, n_terms));
        for (row, doc) in counts.iter().enumerate() {
            for (&col, &tf) in doc {
                triplets.add_triplet(row, col, tf * idf[col]);
            }
        }

        let mut weights: CsMat<f64> = triplets.to_csr();
        for mut row in weights.outer_iterator_mut() {
            let norm = row.l2_norm();
            if norm > 0.0 {
                row.map_inplace(|w| *w / norm);
            }
        }

        tracing::debug!(
            documents = n_docs,
            terms = n_terms,
            nnz = weights.nnz(),
            "TF-IDF matrix built"
        );

        Vectorization::Fitted(TfidfMatrix {
            vocabulary,
            idf,
            weights,
        })
    }
}

/// Lowercases `text` and splits it into runs of word characters, keeping
/// tokens of two or more characters that are not stop words
fn tokenize(text: &str, stop_words: &HashSet<String>) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| !stop_words.contains(*token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fitted(docs: &[&str], stop_words: StopWords) -> TfidfMatrix {
        match TfidfVectorizer::new(stop_words).fit_transform(docs) {
            Vectorization::Fitted(matrix) => matrix,
            Vectorization::NoVocabulary => panic!("expected a vocabulary"),
        }
    }

    #[test]
    fn test_tokenize_drops_short_tokens_and_stop_words() {
        let stop = StopWords::English.to_set();
        let tokens = tokenize("A thief steals secrets via dreams. Sci-Fi, Thriller, ", &stop);
        assert_eq!(
            tokens,
            vec!["thief", "steals", "secrets", "dreams", "sci", "fi", "thriller"]
        );
    }

    #[test]
    fn test_tokenize_keeps_unicode_words() {
        let tokens = tokenize("Amélie à Montmartre", &HashSet::new());
        assert_eq!(tokens, vec!["amélie", "montmartre"]);
    }

    #[test]
    fn test_vocabulary_is_alphabetical() {
        let matrix = fitted(&["zebra apple", "mango"], StopWords::None);
        let terms: Vec<&str> = matrix.vocabulary().keys().map(String::as_str).collect();
        assert_eq!(terms, vec!["apple", "mango", "zebra"]);
        assert_eq!(matrix.n_documents(), 2);
        assert_eq!(matrix.n_terms(), 3);
    }

    #[test]
    fn test_smoothed_idf() {
        let matrix = fitted(&["apple banana", "apple cherry"], StopWords::None);
        assert_relative_eq!(matrix.idf("apple").unwrap(), 1.0);
        assert_relative_eq!(
            matrix.idf("banana").unwrap(),
            (3.0f64 / 2.0).ln() + 1.0
        );
        assert!(matrix.idf("durian").is_none());
    }

    #[test]
    fn test_rows_are_l2_normalized() {
        let matrix = fitted(&["apple banana banana", "apple cherry"], StopWords::None);
        for row in 0..matrix.n_documents() {
            assert_relative_eq!(matrix.row(row).unwrap().l2_norm(), 1.0, epsilon = 1e-12);
        }

        let idf_banana = (3.0f64 / 2.0).ln() + 1.0;
        let raw_banana = 2.0 * idf_banana;
        let expected = raw_banana / (1.0 + raw_banana * raw_banana).sqrt();
        assert_relative_eq!(matrix.weight(0, "banana"), expected, epsilon = 1e-12);
        assert_eq!(matrix.weight(0, "cherry"), 0.0);
    }

    #[test]
    fn test_document_without_terms_is_zero_row() {
        let matrix = fitted(&["apple", "the of and"], StopWords::English);
        assert_eq!(matrix.row(1).unwrap().nnz(), 0);
    }

    #[test]
    fn test_only_stop_words_yields_no_vocabulary() {
        let result = TfidfVectorizer::default().fit_transform(&["the a of", " , , "]);
        assert!(matches!(result, Vectorization::NoVocabulary));
    }

    #[test]
    fn test_empty_corpus_yields_no_vocabulary() {
        let docs: Vec<String> = Vec::new();
        let result = TfidfVectorizer::default().fit_transform(&docs);
        assert!(matches!(result, Vectorization::NoVocabulary));
    }
}
