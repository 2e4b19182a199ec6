use std::path::Path;

use bookrec_common::error::CommonError;
use csv::StringRecord;

use crate::error::AppError;
use crate::model::Book;

const TITLE_COLUMN: &str = "Book Name";
const AUTHOR_COLUMN: &str = "Author";
const GENRE_COLUMN: &str = "Genre";
const RATING_COLUMN: &str = "Rating";
const REVIEWS_COLUMN: &str = "Number of Reviews";

pub fn load_books(path: &Path) -> Result<Vec<Book>, AppError> {
    let content = std::fs::read_to_string(path).map_err(|source| CommonError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_books(&content)
}

/// Parses the cleaned books CSV. Rows keep file order, which is also the row order of the
/// similarity matrix. Extra columns are ignored; empty text cells become empty strings.
pub fn parse_books(content: &str) -> Result<Vec<Book>, AppError> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| AppError::Dataset {
            line: 1,
            message: format!("failed to read header: {e}"),
        })?
        .clone();
    let columns = Columns::locate(&headers)?;

    let mut books = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| AppError::Dataset {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        books.push(columns.book(&record)?);
    }
    Ok(books)
}

struct Columns {
    title: usize,
    author: usize,
    genre: usize,
    rating: usize,
    reviews: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, AppError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| AppError::Dataset {
                    line: 1,
                    message: format!(
                        "missing column '{name}'. Available columns: {}",
                        headers.iter().collect::<Vec<_>>().join(", ")
                    ),
                })
        };
        Ok(Self {
            title: find(TITLE_COLUMN)?,
            author: find(AUTHOR_COLUMN)?,
            genre: find(GENRE_COLUMN)?,
            rating: find(RATING_COLUMN)?,
            reviews: find(REVIEWS_COLUMN)?,
        })
    }

    fn book(&self, record: &StringRecord) -> Result<Book, AppError> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let text = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
        let field_error = |column: &str, message: String| AppError::Dataset {
            line,
            message: format!("column '{column}': {message}"),
        };

        let raw_rating = record.get(self.rating).unwrap_or("").trim();
        let rating = parse_rating(raw_rating).map_err(|m| field_error(RATING_COLUMN, m))?;

        let raw_reviews = record.get(self.reviews).unwrap_or("").trim();
        let review_count =
            parse_review_count(raw_reviews).map_err(|m| field_error(REVIEWS_COLUMN, m))?;

        Ok(Book {
            title: text(self.title),
            author: text(self.author),
            genre: text(self.genre),
            rating,
            review_count,
        })
    }
}

fn parse_rating(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("expected a number, got '{raw}'")),
    }
}

// Review counts sometimes arrive float-formatted ("12.0") after a pandas round trip.
fn parse_review_count(raw: &str) -> Result<u64, String> {
    if let Ok(count) = raw.parse::<u64>() {
        return Ok(count);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 && value.fract() == 0.0 => Ok(value as u64),
        _ => Err(format!("expected a non-negative integer, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal() {
        let content = "\
Book Name,Author,Rating,Number of Reviews,Price,Genre
The Fault in Our Stars,John Green,4.6,1200,450,Romance
\"Die Trying: Jack Reacher, Book 2\",Lee Child,4.4,87.0,300,Unknown
";
        let books = parse_books(content).expect("parse should succeed");
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "The Fault in Our Stars");
        assert_eq!(books[0].genre, "Romance");
        assert_eq!(books[0].review_count, 1200);
        assert_eq!(books[1].title, "Die Trying: Jack Reacher, Book 2");
        assert_eq!(books[1].rating, 4.4);
        assert_eq!(books[1].review_count, 87);
    }

    #[test]
    fn empty_text_cells_load_as_empty_strings() {
        let content = "Book Name,Author,Genre,Rating,Number of Reviews\nUntitled,,,3.5,0\n";
        let books = parse_books(content).expect("parse should succeed");
        assert_eq!(books[0].author, "");
        assert_eq!(books[0].genre, "");
    }

    #[test]
    fn missing_column_is_reported() {
        let content = "Book Name,Author,Rating,Number of Reviews\nA,B,4.0,1\n";
        let err = parse_books(content).unwrap_err();
        match err {
            AppError::Dataset { line, message } => {
                assert_eq!(line, 1);
                assert!(message.contains("'Genre'"), "unexpected message: {message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_rating_reports_line() {
        let content = "Book Name,Author,Genre,Rating,Number of Reviews\nA,B,C,4.0,1\nD,E,F,n/a,2\n";
        let err = parse_books(content).unwrap_err();
        match err {
            AppError::Dataset { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("Rating"), "unexpected message: {message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fractional_or_negative_reviews_rejected() {
        assert!(parse_review_count("12.5").is_err());
        assert!(parse_review_count("-3").is_err());
        assert_eq!(parse_review_count("0"), Ok(0));
    }

    #[test]
    fn parse_real_dataset() {
        let path = std::env::var("BOOKS_CSV_PATH")
            .unwrap_or_else(|_| "./data/audible_data_cleaned.csv".to_string());
        let path = Path::new(&path);
        if !path.exists() {
            eprintln!("skipping parse_real_dataset: {} not found", path.display());
            return;
        }
        let books = load_books(path).expect("load should succeed");
        assert!(!books.is_empty(), "expected at least one book");
        assert!(books.iter().all(|b| b.rating.is_finite()));
    }
}
