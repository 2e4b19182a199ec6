/// Results of the offline model evaluations, served as fixed tables.
///
/// Nothing here is recomputed at runtime: the numbers were produced by the pipeline that built
/// the similarity matrix and are kept so the tool surface can report how the models compared.
use bookrec_common::mcp_api::{ModelScore, ReportResponse};
use serde_json::{json, Value};

pub const METRICS: [&str; 5] = ["Precision", "Recall", "NDCG", "MAP", "RMSE"];
pub const DEFAULT_METRIC: &str = "Precision";

struct ModelMetrics {
    model: &'static str,
    // Same order as METRICS.
    scores: [f64; 5],
}

const MODEL_RESULTS: [ModelMetrics; 3] = [
    ModelMetrics {
        model: "TF-IDF",
        scores: [0.778, 0.8903809523809524, 0.8999207538338473, 0.7629160185345921, 14.478680215659242],
    },
    ModelMetrics {
        model: "BERT",
        scores: [0.6999999999999998, 0.7456666666666666, 0.8355214056623698, 0.7055344190744853, 13.479724292024255],
    },
    ModelMetrics {
        model: "Hybrid",
        scores: [0.741, 0.8046904761904763, 0.8845009694450383, 0.7412433081858845, 16.83675496692056],
    },
];

/// Resolves a metric name case-insensitively to its canonical spelling.
pub fn canonical_metric(name: &str) -> Option<&'static str> {
    METRICS.iter().copied().find(|m| m.eq_ignore_ascii_case(name.trim()))
}

pub fn compare_models(metric: &str) -> Option<Vec<ModelScore>> {
    let canonical = canonical_metric(metric)?;
    let column = METRICS.iter().position(|m| *m == canonical)?;
    Some(
        MODEL_RESULTS
            .iter()
            .map(|r| ModelScore {
                model: r.model.to_string(),
                score: r.scores[column],
            })
            .collect(),
    )
}

pub const REPORT_NAMES: [&str; 6] = [
    "model-metrics",
    "clustered-pairs",
    "hybrid-genre",
    "thriller",
    "science-fiction",
    "hidden-gems",
];

pub fn report(name: &str) -> Option<ReportResponse> {
    let name = name.trim().to_ascii_lowercase();
    let (title, columns, rows) = match name.as_str() {
        "model-metrics" => model_metrics(),
        "clustered-pairs" => clustered_pairs(),
        "hybrid-genre" => hybrid_genre(),
        "thriller" => thriller(),
        "science-fiction" => science_fiction(),
        "hidden-gems" => hidden_gems(),
        _ => return None,
    };
    Some(ReportResponse {
        name,
        title: title.to_string(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows,
    })
}

type Table = (&'static str, &'static [&'static str], Vec<Vec<Value>>);

fn model_metrics() -> Table {
    const COLUMNS: &[&str] = &["Model", "Precision", "Recall", "NDCG", "MAP", "RMSE"];
    let rows: Vec<Vec<Value>> = MODEL_RESULTS
        .iter()
        .map(|r| {
            std::iter::once(json!(r.model))
                .chain(r.scores.iter().map(|s| json!(s)))
                .collect::<Vec<_>>()
        })
        .collect();
    ("Individual Model Results", COLUMNS, rows)
}

fn clustered_pairs() -> Table {
    const COLUMNS: &[&str] = &["Book 1", "Book 2", "Similarity"];
    const ARABIC: &str = "Everyday Arabic for Beginners - 400 Actions & Activities";
    const WIMPY: &str = "The Meltdown: Diary of a Wimpy Kid, Book 13";
    const HEALTHY: &str = "Notes for Healthy Kids";
    const PAIRS: [(&str, &str); 20] = [
        ("The Fault in Our Stars", "The Diviners"),
        (ARABIC, "The Riddle of the Third Mile: Inspector Morse Mysteries, Book 6"),
        (ARABIC, "The Sense of Style: The Thinking Person’s Guide to Writing in the 21st Century"),
        (ARABIC, "Capital and Ideology"),
        (ARABIC, "Marvel Super Heroes: Secret Wars"),
        (ARABIC, "Six Easy Pieces: Essentials of Physics Explained by Its Most Brilliant Teacher"),
        (ARABIC, "The Lovely Bones"),
        (ARABIC, "Radical Forgiveness: A Revolutionary Five-Stage Process to Heal Relationships, Let Go of Anger and Blame, Find Peace in Any Situation"),
        (WIMPY, "The Book of Hygge: The Danish Art of Living Well"),
        (ARABIC, "Superforecasting: The Art and Science of Prediction"),
        (WIMPY, "Pregnancy (Hindi Edition)"),
        (HEALTHY, "Darwin's Dangerous Idea: Evolution and the Meanings of Life"),
        (HEALTHY, "Crushing It in Apartments and Commercial Real Estate: How a Small Investor Can Make It Big"),
        ("The Bear and the Dragon", "The Mister"),
        (
            "The Way of the SEAL: Think like an Elite Warrior to Lead and Succeed: Updated and Expanded Edition",
            "The Neapolitan Novels: My Brilliant Friend, The Story of a New Name, Those Who Leave and Those Who Stay & The Story of the Lost Child: The Complete BBC Radio Collection",
        ),
        (ARABIC, "Kinds of Minds: Toward an Understanding of Consciousness"),
        (ARABIC, "Hard Luck: Diary of a Wimpy Kid, Book 8"),
        (ARABIC, "The Effortless Experience: Conquering the New Battleground for Customer Loyalty"),
        (WIMPY, "Feel Better Fast and Make It Last: Unlock Your Brain's Healing Potential to Overcome Negativity, Anxiety, Anger, Stress, and Trauma"),
        (ARABIC, "We Are Never Meeting in Real Life"),
    ];
    let rows: Vec<Vec<Value>> = PAIRS
        .iter()
        .map(|(a, b)| vec![json!(a), json!(b), json!(1.0)])
        .collect();
    ("Top 20 Most Frequently Clustered Book Pairs", COLUMNS, rows)
}

fn hybrid_genre() -> Table {
    const COLUMNS: &[&str] = &["ID", "Book Name", "Author", "Genre", "Rating"];
    const ROWS: [(u32, &str, &str, &str, f64); 5] = [
        (514, "Die Trying: Jack Reacher, Book 2", "Lee Child", "Unknown", 4.4),
        (1984, "Transcendent Kingdom", "Yaa Gyasi", "Southern United States Literature", 4.3),
        (2193, "Charlie and the Chocolate Factory", "Roald Dahl", "Fiction Classics for Children", 4.6),
        (2237, "Beach Read", "Emily Henry", "Romantic Comedy", 4.4),
        (2278, "Know My Name", "Chanel Miller", "Sexual Abuse & Harassment", 4.8),
    ];
    let rows: Vec<Vec<Value>> = ROWS
        .iter()
        .map(|(id, title, author, genre, rating)| {
            vec![json!(id), json!(title), json!(author), json!(genre), json!(rating)]
        })
        .collect();
    (
        "Enhanced Hybrid Recommendations (TF-IDF + BERT + Genre)",
        COLUMNS,
        rows,
    )
}

const PICK_COLUMNS: &[&str] = &["Book ID", "Book Name", "Author", "Rating"];

fn picks(rows: &[(u32, &str, &str, f64)]) -> Vec<Vec<Value>> {
    rows.iter()
        .map(|(id, title, author, rating)| vec![json!(id), json!(title), json!(author), json!(rating)])
        .collect()
}

fn thriller() -> Table {
    let rows = picks(&[
        (2425, "Blasphemy: The Trial of Danesh Masih", "Osman Haneef", 4.9),
        (3125, "Nightshade", "Anthony Horowitz", 4.8),
        (3002, "Gates of Fire: An Epic Novel of the Battle of ...", "Steven Pressfield", 4.7),
        (2692, "Murder on the Orient Express (Dramatised)", "Agatha Christie", 4.7),
        (3162, "Trunk Music: Harry Bosch Series, Book 5", "Michael Connelly", 4.7),
    ]);
    ("Top 5 Recommendations for Thriller Book Lovers", PICK_COLUMNS, rows)
}

fn science_fiction() -> Table {
    let rows = picks(&[
        (2909, "Doctor Who: 10th Doctor Tales: 10th Doctor Aud...", "Peter Anghelides", 4.8),
        (2786, "Morning Star: Book III of the Red Rising Trilogy", "Pierce Brown", 4.8),
        (2942, "So Long and Thanks for All the Fish", "Douglas Adams", 4.7),
        (2117, "Gemina: The Illuminae Files, Book 2", "Amie Kaufman", 4.7),
        (2266, "The Martian", "Andy Weir", 4.7),
    ]);
    ("Top 5 Science Fiction Books", PICK_COLUMNS, rows)
}

fn hidden_gems() -> Table {
    const COLUMNS: &[&str] = &["Index", "Book Name", "Author", "Rating", "Number of Reviews"];
    // Every gem is a 5.0 rating from a single review.
    const GEMS: [(u32, &str, &str); 20] = [
        (19, "Goodness Gracious Me: The Complete Radio Series 1-3", "Meera Syal"),
        (22, "Jonathan Van Ness: Audible Sessions: FREE Exclusive Interview", "Holly Newson"),
        (66, "Eighty Days to Elsewhere", "KC Dyer"),
        (447, "Midnight's Children: BBC Radio 4 full-cast dramatisation", "Salman Rushdie"),
        (581, "Gather ‘Round the Sound: Holiday Stories from Beloved Authors and Great Performers Across the Globe", "Paulo Coelho"),
        (675, "The Lottery Ticket", "Anton Chekhov"),
        (687, "Aamool Kranti Ki Chunauti [Radical Revolution Is the Key Challenge]", "J. Krishnamurti"),
        (719, "The Himalayan Arc: Journeys East of South-east", "Namita Gokhale"),
        (767, "Free Excerpt: Star Wars: Heir to the Empire - Behind the Scenes", "Timothy Zahn"),
        (914, "Introduction to Intermediate French Conversation Lessons", "Audible Inc."),
        (937, "The Spirit of Mantra with Deva Premal & Miten: 21 Chant Practices for Daily Life", "Deva Premal"),
        (1018, "Vietnam War", "Maurice Isserman"),
        (1031, "Birth of Ganesha", "Shobha Viswanath"),
        (1100, "Roll of the Dice: Duryodhana's Mahabharata", "Anand Neelakantan"),
        (1260, "Is Jesus Truly God?: How the Bible Teaches the Divinity of Christ", "Gregory R. Lanier"),
        (1594, "The Feynman Lectures on Physics: Volume 2, Advanced Quantum Mechanics", "Richard P. Feynman"),
        (1650, "Geronimo Stilton #20 and #21: Surf's Up, Geronimo & The Wild Wild West", "Geronimo Stilton"),
        (1764, "Learn Thai with Innovative Language's Proven Language System - Level 1: Introduction to Thai: Introduction Thai #2", "Innovative Language Learning"),
        (2198, "Manage Your Time, Master Your Life", "Robin Sharma"),
        (2273, "No Calculator? No Problem!: Mastering Mental Math", "Art Benjamin"),
    ];
    let rows: Vec<Vec<Value>> = GEMS
        .iter()
        .map(|(idx, title, author)| vec![json!(idx), json!(title), json!(author), json!(5.0), json!(1)])
        .collect();
    (
        "Top 20 Highly-Rated Books with Low Popularity (Hidden Gems)",
        COLUMNS,
        rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_named_report_resolves() {
        for name in REPORT_NAMES {
            let table = report(name).unwrap_or_else(|| panic!("missing report: {name}"));
            assert!(!table.rows.is_empty(), "report {name} has no rows");
            assert!(
                table.rows.iter().all(|row| row.len() == table.columns.len()),
                "report {name} has ragged rows"
            );
        }
    }

    #[test]
    fn report_lookup_ignores_case() {
        let gems = report("  Hidden-Gems ").expect("known report");
        assert_eq!(gems.name, "hidden-gems");
        assert_eq!(gems.rows.len(), 20);
        assert!(report("top-secret").is_none());
    }

    #[test]
    fn compare_uses_latest_recorded_scores() {
        let scores = compare_models("precision").expect("known metric");
        let models: Vec<&str> = scores.iter().map(|s| s.model.as_str()).collect();
        assert_eq!(models, vec!["TF-IDF", "BERT", "Hybrid"]);
        assert_eq!(scores[0].score, 0.778);
        assert_eq!(scores[2].score, 0.741);
    }

    #[test]
    fn rmse_is_comparable_too() {
        let scores = compare_models("RMSE").expect("known metric");
        assert_eq!(scores[1].score, 13.479724292024255);
        assert!(compare_models("F1").is_none());
    }
}
