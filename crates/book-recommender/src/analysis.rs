/// Aggregate views over the books dataset, used for the dataset overview and author tools.
///
/// Rows with an empty author or genre are left out of the groupings that key on that field.
use std::collections::{BTreeMap, BTreeSet};

use bookrec_common::mcp_api::{
    AuthorRating, AuthorStatistic, DatasetOverviewResponse, GenreCount, RatingBin,
};

use crate::model::Book;

const UNKNOWN_GENRE: &str = "Unknown";
const TOP_GENRES: usize = 10;
const TOP_AUTHORS: usize = 10;
const RATING_BINS: usize = 20;

pub fn overview(books: &[Book]) -> DatasetOverviewResponse {
    let authors: BTreeSet<&str> = books
        .iter()
        .map(|b| b.author.as_str())
        .filter(|a| !a.is_empty())
        .collect();
    let genres: BTreeSet<&str> = books
        .iter()
        .map(|b| b.genre.as_str())
        .filter(|g| !g.is_empty())
        .collect();

    DatasetOverviewResponse {
        book_count: books.len(),
        author_count: authors.len(),
        genre_count: genres.len(),
        top_genres: top_genres(books, TOP_GENRES),
        top_rated_authors: top_rated_authors(books, TOP_AUTHORS),
        rating_histogram: rating_histogram(books, RATING_BINS),
    }
}

/// Genres by number of books, most common first, ties by name. "Unknown" is not counted.
pub fn top_genres(books: &[Book], limit: usize) -> Vec<GenreCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for book in books {
        if book.genre.is_empty() || book.genre == UNKNOWN_GENRE {
            continue;
        }
        *counts.entry(book.genre.as_str()).or_default() += 1;
    }

    let mut genres: Vec<GenreCount> = counts
        .into_iter()
        .map(|(genre, book_count)| GenreCount {
            genre: genre.to_string(),
            book_count,
        })
        .collect();
    genres.sort_by(|a, b| b.book_count.cmp(&a.book_count));
    genres.truncate(limit);
    genres
}

/// Authors ranked by the best rating any of their books received, ties by name.
pub fn top_rated_authors(books: &[Book], limit: usize) -> Vec<AuthorRating> {
    let mut best: BTreeMap<&str, f64> = BTreeMap::new();
    for book in books.iter().filter(|b| !b.author.is_empty()) {
        best.entry(book.author.as_str())
            .and_modify(|r| *r = r.max(book.rating))
            .or_insert(book.rating);
    }

    let mut authors: Vec<AuthorRating> = best
        .into_iter()
        .map(|(author, highest_rating)| AuthorRating {
            author: author.to_string(),
            highest_rating,
        })
        .collect();
    authors.sort_by(|a, b| b.highest_rating.total_cmp(&a.highest_rating));
    authors.truncate(limit);
    authors
}

/// Equal-width bins between the lowest and highest rating. The top value lands in the last bin.
pub fn rating_histogram(books: &[Book], bins: usize) -> Vec<RatingBin> {
    let Some(first) = books.first() else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    let (min, max) = books
        .iter()
        .fold((first.rating, first.rating), |(lo, hi), b| (lo.min(b.rating), hi.max(b.rating)));

    if max == min {
        return vec![RatingBin {
            lower: min,
            upper: max,
            book_count: books.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for book in books {
        let slot = (((book.rating - min) / width) as usize).min(bins - 1);
        counts[slot] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, book_count)| RatingBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            book_count,
        })
        .collect()
}

/// Per-author book count, mean rating and mean review count, ordered by author name.
pub fn author_statistics(books: &[Book]) -> Vec<AuthorStatistic> {
    #[derive(Default)]
    struct Totals {
        books: usize,
        rating: f64,
        reviews: f64,
    }

    let mut totals: BTreeMap<&str, Totals> = BTreeMap::new();
    for book in books.iter().filter(|b| !b.author.is_empty()) {
        let entry = totals.entry(book.author.as_str()).or_default();
        entry.books += 1;
        entry.rating += book.rating;
        entry.reviews += book.review_count as f64;
    }

    totals
        .into_iter()
        .map(|(author, t)| AuthorStatistic {
            author: author.to_string(),
            book_count: t.books,
            average_rating: t.rating / t.books as f64,
            average_reviews: t.reviews / t.books as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(author: &str, genre: &str, rating: f64, review_count: u64) -> Book {
        Book {
            title: format!("{author} / {genre} / {rating}"),
            author: author.to_string(),
            genre: genre.to_string(),
            rating,
            review_count,
        }
    }

    fn sample() -> Vec<Book> {
        vec![
            book("Lee Child", "Thriller", 4.4, 100),
            book("Lee Child", "Thriller", 4.6, 300),
            book("Andy Weir", "Science Fiction", 4.7, 5000),
            book("Emily Henry", "Romantic Comedy", 4.4, 800),
            book("Agatha Christie", "Thriller", 4.7, 40),
            book("Audible Inc.", "Unknown", 5.0, 1),
            book("Audible Inc.", "Unknown", 3.0, 2),
            book("", "", 2.0, 0),
        ]
    }

    #[test]
    fn top_genres_skip_unknown_and_blank() {
        let genres = top_genres(&sample(), 10);
        let names: Vec<&str> = genres.iter().map(|g| g.genre.as_str()).collect();
        assert_eq!(names, vec!["Thriller", "Romantic Comedy", "Science Fiction"]);
        assert_eq!(genres[0].book_count, 3);
    }

    #[test]
    fn top_genres_respects_limit() {
        assert_eq!(top_genres(&sample(), 1).len(), 1);
    }

    #[test]
    fn authors_ranked_by_best_rating_then_name() {
        let authors = top_rated_authors(&sample(), 3);
        let names: Vec<&str> = authors.iter().map(|a| a.author.as_str()).collect();
        assert_eq!(names, vec!["Audible Inc.", "Agatha Christie", "Andy Weir"]);
        assert_eq!(authors[0].highest_rating, 5.0);
    }

    #[test]
    fn histogram_covers_every_book() {
        let books = sample();
        let bins = rating_histogram(&books, 20);
        assert_eq!(bins.len(), 20);
        assert_eq!(bins.iter().map(|b| b.book_count).sum::<usize>(), books.len());
        assert_eq!(bins[0].lower, 2.0);
        assert_eq!(bins[19].upper, 5.0);
        assert_eq!(bins[19].book_count, 1);
        assert_eq!(bins[0].book_count, 1);
    }

    #[test]
    fn histogram_degenerate_inputs() {
        assert!(rating_histogram(&[], 20).is_empty());
        let same = vec![book("A", "X", 4.0, 1), book("B", "X", 4.0, 2)];
        let bins = rating_histogram(&same, 20);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].book_count, 2);
    }

    #[test]
    fn author_statistics_average_per_author() {
        let stats = author_statistics(&sample());
        let lee = stats.iter().find(|s| s.author == "Lee Child").expect("present");
        assert_eq!(lee.book_count, 2);
        assert!((lee.average_rating - 4.5).abs() < 1e-9);
        assert!((lee.average_reviews - 200.0).abs() < 1e-9);
        assert!(stats.iter().all(|s| !s.author.is_empty()));
        assert!(stats.windows(2).all(|w| w[0].author < w[1].author));
    }

    #[test]
    fn overview_counts_distinct_values() {
        let overview = overview(&sample());
        assert_eq!(overview.book_count, 8);
        assert_eq!(overview.author_count, 5);
        assert_eq!(overview.genre_count, 4);
    }
}
