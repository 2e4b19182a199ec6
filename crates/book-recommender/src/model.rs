use bookrec_common::mcp_api::BookView;
use serde::{Deserialize, Serialize};

/// One row of the books dataset. Identity is the row position; there is no key column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub rating: f64,
    pub review_count: u64,
}

impl Book {
    pub fn view(&self) -> BookView {
        BookView {
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
            rating: self.rating,
            review_count: self.review_count,
        }
    }
}

/// Result of a title lookup: the matched book and its nearest neighbours, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleRecommendations {
    pub anchor_index: usize,
    pub anchor: BookView,
    pub recommendations: Vec<BookView>,
}
