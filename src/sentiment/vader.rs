use super::{round4, SentimentAnalyzer};

/// Compound polarity from the full VADER lexicon and rule set, as shipped by
/// the `vader_sentiment` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaderAnalyzer;

impl VaderAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentAnalyzer for VaderAnalyzer {
    fn compound(&self, text: &str) -> f64 {
        // cleaned text carries backticks where apostrophes were; contractions
        // only negate with the apostrophe
        let text = text.replace('`', "'");
        let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(&text);
        let compound = scores.get("compound").copied().unwrap_or(0.0);
        round4(compound.clamp(-1.0, 1.0))
    }
}
