pub mod lexicon;
pub mod rules;
pub mod vader;

pub use lexicon::Lexicon;
pub use rules::LexiconAnalyzer;
pub use vader::VaderAnalyzer;

/// Anything that can reduce text to a compound polarity in `[-1, 1]`.
pub trait SentimentAnalyzer {
    fn compound(&self, text: &str) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    /// Polarity rescaled to `[0, 1]`.
    pub score: f64,
    /// Compound polarity in `[-1, 1]`.
    pub polarity: f64,
}

impl Sentiment {
    pub fn from_compound(compound: f64) -> Self {
        let polarity = compound.clamp(-1.0, 1.0);
        Self {
            score: (polarity + 1.0) / 2.0,
            polarity,
        }
    }
}

/// Score already-cleaned text.
pub fn score(analyzer: &dyn SentimentAnalyzer, cleaned: &str) -> Sentiment {
    Sentiment::from_compound(analyzer.compound(cleaned))
}

/// Compound values are reported to four decimal places.
pub(crate) fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
