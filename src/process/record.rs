use chrono::NaiveDateTime;

use crate::clean::{self, EmojiResolver, Shortcodes};
use crate::process::{date_parser, mapper::MappedRow};
use crate::sentiment::{self, SentimentAnalyzer, VaderAnalyzer};

/// Output column order.
pub const HEADER: [&str; 6] = ["date", "user", "text", "cleaned_text", "score", "polarity"];

/// The six-field normalised post.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub date: NaiveDateTime,
    pub user: String,
    pub text: String,
    pub cleaned_text: String,
    pub score: f64,
    pub polarity: f64,
}

impl CanonicalRecord {
    /// Fields in [`HEADER`] order; numbers in plain decimal.
    pub fn to_fields(&self) -> [String; 6] {
        [
            date_parser::format_datetime(&self.date),
            self.user.clone(),
            self.text.clone(),
            self.cleaned_text.clone(),
            self.score.to_string(),
            self.polarity.to_string(),
        ]
    }
}

/// Runs the cleaning and scoring stages over mapped rows.
pub struct Enricher {
    analyzer: Box<dyn SentimentAnalyzer + Send + Sync>,
    emoji: Box<dyn EmojiResolver + Send + Sync>,
}

impl Enricher {
    pub fn new(
        analyzer: impl SentimentAnalyzer + Send + Sync + 'static,
        emoji: impl EmojiResolver + Send + Sync + 'static,
    ) -> Self {
        Self {
            analyzer: Box::new(analyzer),
            emoji: Box::new(emoji),
        }
    }

    pub fn enrich(&self, row: MappedRow) -> CanonicalRecord {
        let cleaned_text = clean::normalize_with(&row.text, self.emoji.as_ref());
        let s = sentiment::score(self.analyzer.as_ref(), &cleaned_text);
        CanonicalRecord {
            date: row.date,
            user: row.user,
            text: row.text,
            cleaned_text,
            score: s.score,
            polarity: s.polarity,
        }
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new(VaderAnalyzer::new(), Shortcodes)
    }
}
