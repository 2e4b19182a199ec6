/// The read-only data every query runs against: the books dataset and its similarity matrix.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it afterwards, so no
/// locking is involved. Row `i` of the matrix describes book `i`. The constructor checks that
/// the sizes agree, but it cannot check that the rows are in the same order, so both inputs
/// must be produced by the same pipeline run.
use bookrec_common::matrix::SimilarityMatrix;
use tracing::info;

use crate::config::Config;
use crate::dataset;
use crate::error::AppError;
use crate::model::Book;

#[derive(Debug)]
pub struct Catalog {
    books: Vec<Book>,
    similarity: SimilarityMatrix,
    title_keys: Vec<String>,
    genre_keys: Vec<String>,
}

impl Catalog {
    pub fn new(books: Vec<Book>, similarity: SimilarityMatrix) -> Result<Self, AppError> {
        if books.len() != similarity.dim() {
            return Err(AppError::Integrity {
                books: books.len(),
                matrix: similarity.dim(),
            });
        }
        let title_keys = books.iter().map(|b| b.title.to_lowercase()).collect();
        let genre_keys = books.iter().map(|b| b.genre.to_lowercase()).collect();
        Ok(Self {
            books,
            similarity,
            title_keys,
            genre_keys,
        })
    }

    pub fn load(config: &Config) -> Result<Self, AppError> {
        let books = dataset::load_books(&config.books_path())?;
        info!(books = books.len(), "books dataset loaded");

        let similarity = SimilarityMatrix::from_npy_file(&config.similarity_path())?;
        info!(dim = similarity.dim(), "similarity matrix loaded");

        Self::new(books, similarity)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Indices of books whose title contains `needle`. `needle` must already be lowercase.
    pub fn title_matches<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
        matching(&self.title_keys, needle)
    }

    /// Indices of books whose genre contains `needle`. `needle` must already be lowercase.
    pub fn genre_matches<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
        matching(&self.genre_keys, needle)
    }
}

fn matching<'a>(keys: &'a [String], needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    keys.iter()
        .enumerate()
        .filter(move |(_, key)| key.contains(needle))
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;

    use super::*;

    fn book(title: &str, genre: &str) -> Book {
        Book {
            title: title.to_string(),
            author: "Someone".to_string(),
            genre: genre.to_string(),
            rating: 4.0,
            review_count: 1,
        }
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let books = vec![book("A", "X"), book("B", "X"), book("C", "X")];
        let matrix = SimilarityMatrix::from_array(Array2::eye(2)).expect("square");
        let err = Catalog::new(books, matrix).unwrap_err();
        assert!(matches!(err, AppError::Integrity { books: 3, matrix: 2 }));
    }

    #[test]
    fn matching_ignores_case() {
        let books = vec![book("The Martian", "Science Fiction"), book("Beach Read", "Romance")];
        let matrix = SimilarityMatrix::from_array(Array2::eye(2)).expect("square");
        let catalog = Catalog::new(books, matrix).expect("sizes agree");
        assert_eq!(catalog.title_matches("martian").collect::<Vec<_>>(), vec![0]);
        assert_eq!(catalog.genre_matches("fiction").collect::<Vec<_>>(), vec![0]);
        assert_eq!(catalog.genre_matches("horror").count(), 0);
    }

    #[test]
    fn load_real_catalog() {
        let books_path = std::env::var("BOOKS_CSV_PATH")
            .unwrap_or_else(|_| "./data/audible_data_cleaned.csv".to_string());
        let similarity_path = std::env::var("SIMILARITY_MATRIX_PATH")
            .unwrap_or_else(|_| "./data/hybrid_sim.npy".to_string());
        for path in [&books_path, &similarity_path] {
            if !std::path::Path::new(path).exists() {
                eprintln!("skipping load_real_catalog: {path} not found");
                return;
            }
        }
        let config = Config {
            books_path,
            similarity_path,
            default_limit: 5,
            max_limit: 50,
        };
        let catalog = Catalog::load(&config).expect("load should succeed");
        assert_eq!(catalog.len(), catalog.similarity().dim());
    }
}
