/// MCP server implementation for the book recommender.
///
/// Exposes six tools:
/// - `recommend_by_title`: Books most similar to a given title
/// - `recommend_by_genre`: Best-rated books in a genre
/// - `dataset_overview`: Genre popularity, top-rated authors, rating distribution
/// - `author_statistics`: Per-author averages
/// - `compare_models`: One evaluation metric across the offline models
/// - `get_report`: Static tables from the offline evaluation
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::info;

use crate::analysis;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::LookupError;
use crate::evaluation;
use crate::recommend::Recommender;
use bookrec_common::mcp_api::{
    AuthorStatisticsParams, AuthorStatisticsResponse, CompareModelsParams, DatasetOverviewResponse,
    GenreRecommendationsResponse, GetReportParams, ModelComparisonResponse, RecommendByGenreParams,
    RecommendByTitleParams, ReportResponse, TitleRecommendationsResponse,
};

#[derive(Clone)]
pub struct BookRecommenderServer {
    catalog: Arc<Catalog>,
    recommender: Arc<Recommender>,
    config: Arc<Config>,
    tool_router: ToolRouter<BookRecommenderServer>,
}

impl BookRecommenderServer {
    pub fn new(catalog: Arc<Catalog>, config: Config) -> Self {
        let recommender = Arc::new(Recommender::new(Arc::clone(&catalog)));
        Self {
            catalog,
            recommender,
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl BookRecommenderServer {
    #[tool(description = "Recommend books similar to a given title. The title is matched case-insensitively as a substring and the first matching book is used. Returns the matched book and the most similar other books, best first.")]
    async fn recommend_by_title(
        &self,
        Parameters(params): Parameters<RecommendByTitleParams>,
    ) -> Result<Json<TitleRecommendationsResponse>, String> {
        let query = params.title.trim().to_string();
        let limit = self.config.resolve_limit(params.limit);

        let result = match self.recommender.recommend_by_title(&query, limit) {
            Ok(result) => result,
            Err(LookupError::TitleNotFound(title)) => {
                info!(query = %title, "title not found");
                return Err(format!(
                    "book not found in the dataset: '{title}'. Try another title."
                ));
            }
            Err(e) => return Err(e.to_string()),
        };

        info!(
            query = %query,
            anchor = %result.anchor.title,
            anchor_index = result.anchor_index,
            results = result.recommendations.len(),
            "recommend_by_title"
        );
        Ok(Json(TitleRecommendationsResponse {
            query,
            anchor: result.anchor,
            recommendations: result.recommendations,
        }))
    }

    #[tool(description = "Recommend the best-rated books whose genre contains the given text (case-insensitive), ranked by rating and then by number of reviews. Returns an empty list when no genre matches.")]
    async fn recommend_by_genre(
        &self,
        Parameters(params): Parameters<RecommendByGenreParams>,
    ) -> Result<Json<GenreRecommendationsResponse>, String> {
        let query = params.genre.trim().to_string();
        let limit = self.config.resolve_limit(params.limit);

        let recommendations = self
            .recommender
            .recommend_by_genre(&query, limit)
            .map_err(|e| e.to_string())?;

        info!(query = %query, results = recommendations.len(), "recommend_by_genre");
        Ok(Json(GenreRecommendationsResponse {
            query,
            recommendations,
        }))
    }

    #[tool(description = "Summarize the book dataset: counts, the 10 most common genres (excluding Unknown), the 10 authors with the highest-rated books, and a 20-bin rating histogram.")]
    async fn dataset_overview(&self) -> Result<Json<DatasetOverviewResponse>, String> {
        let overview = analysis::overview(self.catalog.books());
        info!(books = overview.book_count, "dataset_overview");
        Ok(Json(overview))
    }

    #[tool(description = "Average rating and average number of reviews per author, ordered by author name.")]
    async fn author_statistics(
        &self,
        Parameters(params): Parameters<AuthorStatisticsParams>,
    ) -> Result<Json<AuthorStatisticsResponse>, String> {
        let mut authors = analysis::author_statistics(self.catalog.books());
        let author_count = authors.len();
        if let Some(limit) = params.limit {
            authors.truncate(limit as usize);
        }
        info!(author_count, returned = authors.len(), "author_statistics");
        Ok(Json(AuthorStatisticsResponse {
            author_count,
            authors,
        }))
    }

    #[tool(description = "Compare the offline-evaluated models (TF-IDF, BERT, Hybrid) on one metric: Precision, Recall, NDCG, MAP or RMSE. Defaults to Precision.")]
    async fn compare_models(
        &self,
        Parameters(params): Parameters<CompareModelsParams>,
    ) -> Result<Json<ModelComparisonResponse>, String> {
        let requested = params
            .metric
            .as_deref()
            .unwrap_or(evaluation::DEFAULT_METRIC);
        let metric = evaluation::canonical_metric(requested).ok_or_else(|| {
            format!(
                "unknown metric: '{requested}'. Available metrics: {}",
                evaluation::METRICS.join(", ")
            )
        })?;
        let models = evaluation::compare_models(metric)
            .ok_or_else(|| format!("no scores recorded for metric '{metric}'"))?;

        Ok(Json(ModelComparisonResponse {
            metric: metric.to_string(),
            models,
            available_metrics: evaluation::METRICS.iter().map(|m| m.to_string()).collect(),
        }))
    }

    #[tool(description = "Get a static table from the offline evaluation: model-metrics, clustered-pairs, hybrid-genre, thriller, science-fiction or hidden-gems.")]
    async fn get_report(
        &self,
        Parameters(params): Parameters<GetReportParams>,
    ) -> Result<Json<ReportResponse>, String> {
        let name = params.report.trim().to_string();
        if name.is_empty() {
            return Err("report must not be empty".to_string());
        }
        let report = evaluation::report(&name).ok_or_else(|| {
            format!(
                "unknown report: '{name}'. Available reports: {}",
                evaluation::REPORT_NAMES.join(", ")
            )
        })?;
        Ok(Json(report))
    }
}

#[tool_handler]
impl ServerHandler for BookRecommenderServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "book-recommender".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Book recommendation MCP server over a catalog of {} audiobooks. Use \
                 recommend_by_title for books similar to one you know, recommend_by_genre \
                 for the best-rated books in a genre, dataset_overview and \
                 author_statistics to explore the catalog, and compare_models / get_report \
                 for the offline evaluation results.",
                self.catalog.len()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BookRecommenderServer;

    #[test]
    fn tools_publish_output_schemas() {
        let tools = BookRecommenderServer::tool_router().list_all();
        for name in [
            "recommend_by_title",
            "recommend_by_genre",
            "dataset_overview",
            "author_statistics",
            "compare_models",
            "get_report",
        ] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }
}
