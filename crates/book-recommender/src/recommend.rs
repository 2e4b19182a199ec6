use std::sync::Arc;

use bookrec_common::mcp_api::BookView;
use ndarray::ArrayView1;

use crate::catalog::Catalog;
use crate::error::LookupError;
use crate::model::{Book, TitleRecommendations};

pub const DEFAULT_TOP_N: usize = 5;

/// Answers "books like this title" and "best books in this genre" over a shared [`Catalog`].
///
/// Both lookups are pure: the same query against the same catalog always yields the same
/// ordered result.
pub struct Recommender {
    catalog: Arc<Catalog>,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Picks the first book (in dataset order) whose title contains `query`, ignoring case, and
    /// returns the `top_n` books with the highest similarity to it. The matched book itself is
    /// never part of the result. Equal scores keep dataset order.
    pub fn recommend_by_title(
        &self,
        query: &str,
        top_n: usize,
    ) -> Result<TitleRecommendations, LookupError> {
        let needle = normalize_query(query, top_n)?;
        let anchor = self
            .catalog
            .title_matches(&needle)
            .next()
            .ok_or_else(|| LookupError::TitleNotFound(query.trim().to_string()))?;

        let books = self.catalog.books();
        let ranked = self
            .catalog
            .similarity()
            .row(anchor)
            .map(|row| rank_similar(row, anchor, top_n))
            .unwrap_or_default();

        Ok(TitleRecommendations {
            anchor_index: anchor,
            anchor: books[anchor].view(),
            recommendations: ranked.into_iter().map(|(idx, _)| books[idx].view()).collect(),
        })
    }

    /// Returns up to `top_n` books whose genre contains `query`, ignoring case, ranked by rating
    /// and then by review count. No match is an empty list, not an error.
    pub fn recommend_by_genre(&self, query: &str, top_n: usize) -> Result<Vec<BookView>, LookupError> {
        let needle = normalize_query(query, top_n)?;
        let books = self.catalog.books();
        let mut candidates: Vec<usize> = self.catalog.genre_matches(&needle).collect();
        candidates.sort_by(|&a, &b| by_popularity(&books[a], &books[b]).then(a.cmp(&b)));
        candidates.truncate(top_n);
        Ok(candidates.into_iter().map(|idx| books[idx].view()).collect())
    }
}

fn normalize_query(query: &str, top_n: usize) -> Result<String, LookupError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(LookupError::EmptyQuery);
    }
    if top_n == 0 {
        return Err(LookupError::ZeroLimit);
    }
    Ok(query.to_lowercase())
}

/// Every index except `anchor`, by score descending then index ascending. NaN scores rank last.
fn rank_similar(row: ArrayView1<'_, f64>, anchor: usize, top_n: usize) -> Vec<(usize, f64)> {
    let mut scored: Vec<(usize, f64)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(idx, _)| idx != anchor)
        .collect();
    scored.sort_by(|a, b| rank_key(b.1).total_cmp(&rank_key(a.1)).then(a.0.cmp(&b.0)));
    scored.truncate(top_n);
    scored
}

fn rank_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

fn by_popularity(a: &Book, b: &Book) -> std::cmp::Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then(b.review_count.cmp(&a.review_count))
}
