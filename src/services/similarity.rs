use std::collections::HashMap;

use ndarray::{Array2, ArrayView1};
use sprs::CsMat;

use crate::error::{AppError, AppResult};

use super::vectorizer::TfidfMatrix;

/// Dense all-pairs cosine similarity, labelled by title on both axes
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    titles: Vec<String>,
    index: HashMap<String, usize>,
    values: Array2<f64>,
}

impl SimilarityMatrix {
    /// Computes cosine similarity for every pair of rows in `tfidf`
    ///
    /// `titles` labels rows and columns in corpus order. Dot products come
    /// from the sparse product `W * W^T`; entries involving a zero vector are
    /// 0.0, including its own diagonal. Only the upper triangle is read and
    /// the lower one is mirrored from it.
    pub fn from_tfidf(tfidf: &TfidfMatrix, titles: Vec<String>) -> AppResult<Self> {
        let n = tfidf.n_documents();
        if titles.len() != n {
            return Err(AppError::Internal(format!(
                "similarity labels ({}) do not match vector rows ({})",
                titles.len(),
                n
            )));
        }

        let norms: Vec<f64> = (0..n)
            .map(|i| {
                tfidf
                    .row(i)
                    .map(|row| row.l2_norm())
                    .ok_or_else(|| AppError::Internal(format!("missing vector row {}", i)))
            })
            .collect::<AppResult<_>>()?;

        let weights = tfidf.weights();
        let transposed: CsMat<f64> = weights.transpose_view().to_csr();
        let gram: CsMat<f64> = weights * &transposed;

        let mut values = Array2::<f64>::zeros((n, n));
        for (&dot, (i, j)) in gram.iter() {
            if i > j {
                continue;
            }
            let denom = norms[i] * norms[j];
            let sim = if denom == 0.0 { 0.0 } else { dot / denom };
            values[[i, j]] = sim;
            values[[j, i]] = sim;
        }

        let mut index = HashMap::with_capacity(n);
        for (row, title) in titles.iter().enumerate() {
            index.entry(title.clone()).or_insert(row);
        }

        tracing::debug!(items = n, "Similarity matrix computed");

        Ok(Self {
            titles,
            index,
            values,
        })
    }

    /// Row and column labels in corpus order
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Row index of the first item labelled `title`
    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.index.get(title).copied()
    }

    /// Similarities of `title` against every item, in corpus order
    pub fn row(&self, title: &str) -> Option<ArrayView1<'_, f64>> {
        self.index_of(title).map(|i| self.values.row(i))
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.values[[i, j]])
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }
}
