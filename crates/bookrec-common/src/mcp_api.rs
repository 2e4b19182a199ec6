use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RecommendByTitleParams {
    /// Full or partial book title, matched case-insensitively. The first matching book is used.
    pub title: String,
    /// Maximum number of recommendations to return (default: 5, max: 50).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RecommendByGenreParams {
    /// Full or partial genre such as "Thriller" or "fantasy", matched case-insensitively.
    pub genre: String,
    /// Maximum number of books to return (default: 5, max: 50).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AuthorStatisticsParams {
    /// Maximum number of authors to return (default: all).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompareModelsParams {
    /// Metric to compare: Precision, Recall, NDCG, MAP or RMSE (default: Precision).
    pub metric: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetReportParams {
    /// Report name such as "hidden-gems" or "clustered-pairs".
    pub report: String,
}

/// The fixed projection of a book used in every recommendation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BookView {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub rating: f64,
    pub review_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TitleRecommendationsResponse {
    pub query: String,
    /// The book the recommendations were computed for.
    pub anchor: BookView,
    pub recommendations: Vec<BookView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenreRecommendationsResponse {
    pub query: String,
    /// Empty when no genre matched.
    pub recommendations: Vec<BookView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenreCount {
    pub genre: String,
    pub book_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AuthorRating {
    pub author: String,
    pub highest_rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RatingBin {
    pub lower: f64,
    pub upper: f64,
    pub book_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DatasetOverviewResponse {
    pub book_count: usize,
    pub author_count: usize,
    pub genre_count: usize,
    /// Most common genres, excluding "Unknown".
    pub top_genres: Vec<GenreCount>,
    /// Authors ranked by the highest rating among their books.
    pub top_rated_authors: Vec<AuthorRating>,
    pub rating_histogram: Vec<RatingBin>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AuthorStatistic {
    pub author: String,
    pub book_count: usize,
    pub average_rating: f64,
    pub average_reviews: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AuthorStatisticsResponse {
    pub author_count: usize,
    pub authors: Vec<AuthorStatistic>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ModelScore {
    pub model: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ModelComparisonResponse {
    pub metric: String,
    pub models: Vec<ModelScore>,
    pub available_metrics: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReportResponse {
    pub name: String,
    pub title: String,
    pub columns: Vec<String>,
    /// One entry per row, values in `columns` order.
    pub rows: Vec<Vec<serde_json::Value>>,
}
