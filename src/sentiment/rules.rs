use super::lexicon::{self, Lexicon};
use super::{round4, SentimentAnalyzer};

/// Emphasis added to an ALL-CAPS sentiment word in mixed-case text.
const C_INCR: f64 = 0.733;
/// Multiplier applied to a negated valence.
const N_SCALAR: f64 = -0.74;
/// Normalisation constant approximating the max expected raw sum.
const ALPHA: f64 = 15.0;

/// VADER's rules (Hutto & Gilbert, 2014) over a caller-supplied lexicon,
/// for runs that score against their own valence file.
#[derive(Debug, Clone)]
pub struct LexiconAnalyzer {
    lexicon: Lexicon,
}

impl LexiconAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    fn valences(&self, tokens: &[Token]) -> Vec<f64> {
        let cap_diff = allcap_differential(tokens);
        let mut sentiments = Vec::with_capacity(tokens.len());

        for (i, token) in tokens.iter().enumerate() {
            if lexicon::booster(&token.lower).is_some() {
                sentiments.push(0.0);
                continue;
            }
            // "kind of" is a dampener, not the adjective
            if token.lower == "kind"
                && tokens.get(i + 1).is_some_and(|next| next.lower == "of")
            {
                sentiments.push(0.0);
                continue;
            }

            let Some(mut valence) = self.lexicon.valence(&token.lower) else {
                sentiments.push(0.0);
                continue;
            };

            if cap_diff && token.is_upper {
                valence += if valence > 0.0 { C_INCR } else { -C_INCR };
            }

            for distance in 0..3 {
                if i <= distance {
                    break;
                }
                let prior = &tokens[i - distance - 1];
                if self.lexicon.contains(&prior.lower) {
                    continue;
                }
                let mut scalar = scalar_inc_dec(prior, valence, cap_diff);
                if scalar != 0.0 {
                    scalar *= match distance {
                        1 => 0.95,
                        2 => 0.9,
                        _ => 1.0,
                    };
                }
                valence += scalar;
                if lexicon::is_negation(&prior.lower) {
                    valence *= N_SCALAR;
                }
            }

            sentiments.push(valence);
        }

        but_check(tokens, &mut sentiments);
        sentiments
    }
}

impl SentimentAnalyzer for LexiconAnalyzer {
    fn compound(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let sum: f64 = self.valences(&tokens).iter().sum();
        if sum == 0.0 {
            return 0.0;
        }

        let emphasis = punctuation_emphasis(text);
        let sum = if sum > 0.0 { sum + emphasis } else { sum - emphasis };

        round4(normalize(sum))
    }
}

#[derive(Debug, Clone)]
struct Token {
    lower: String,
    is_upper: bool,
}

/// Whitespace split; surrounding punctuation is stripped unless that would
/// leave two chars or fewer (keeps emoticons like `:)` intact); single-char
/// tokens are dropped. Backticks read as apostrophes.
fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|raw| {
            let raw = raw.replace('`', "'");
            let stripped = raw.trim_matches(|c: char| c.is_ascii_punctuation());
            let word = if stripped.chars().count() <= 2 {
                raw.as_str()
            } else {
                stripped
            };
            if word.chars().count() <= 1 {
                return None;
            }
            Some(Token {
                lower: word.to_lowercase(),
                is_upper: is_upper(word),
            })
        })
        .collect()
}

/// Python's `str.isupper`: at least one cased char and no lower-case ones.
fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

fn allcap_differential(tokens: &[Token]) -> bool {
    let upper = tokens.iter().filter(|t| t.is_upper).count();
    upper > 0 && upper < tokens.len()
}

fn scalar_inc_dec(prior: &Token, valence: f64, cap_diff: bool) -> f64 {
    let Some(mut scalar) = lexicon::booster(&prior.lower) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if prior.is_upper && cap_diff {
        scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
    }
    scalar
}

/// Contrastive "but": damp what precedes it, boost what follows.
fn but_check(tokens: &[Token], sentiments: &mut [f64]) {
    let Some(but) = tokens.iter().position(|t| t.lower == "but") else {
        return;
    };
    for (i, s) in sentiments.iter_mut().enumerate() {
        if i < but {
            *s *= 0.5;
        } else if i > but {
            *s *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let ep = text.matches('!').count().min(4) as f64 * 0.292;
    let qm = match text.matches('?').count() {
        0 | 1 => 0.0,
        n @ 2..=3 => n as f64 * 0.18,
        _ => 0.96,
    };
    ep + qm
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Lexicon {
        Lexicon::from_pairs(
            [
                ("good", 1.9),
                ("great", 3.1),
                ("love", 3.2),
                ("awesome", 3.1),
                ("best", 3.2),
                ("wow", 2.8),
                (":)", 2.0),
                ("bad", -2.5),
                ("terrible", -2.1),
                ("horrible", -2.5),
                ("hate", -2.7),
                ("worst", -3.1),
                ("kill", -3.7),
                ("disaster", -3.1),
            ]
            .map(|(w, v)| (w.to_string(), v)),
        )
    }

    fn compound(text: &str) -> f64 {
        LexiconAnalyzer::new(fixture()).compound(text)
    }

    #[test]
    fn test_neutral_and_empty() {
        assert_eq!(compound(""), 0.0);
        assert_eq!(compound("   "), 0.0);
        assert_eq!(compound("the table is in the kitchen"), 0.0);
    }

    #[test]
    fn test_single_word_matches_formula() {
        // good = 1.9 → 1.9 / sqrt(1.9² + 15)
        let expected = round4(1.9 / (1.9f64 * 1.9 + 15.0).sqrt());
        assert_eq!(compound("good"), expected);
        assert_eq!(compound("it is good"), expected);
        assert_eq!(compound("so good"), round4(normalize(1.9 + lexicon::B_INCR)));
    }

    #[test]
    fn test_polarity_direction() {
        assert!(compound("I love this, it is great") > 0.5);
        assert!(compound("this is terrible and I hate it") < -0.5);
    }

    #[test]
    fn test_negation_flips() {
        assert!(compound("this is good") > 0.0);
        assert!(compound("this is not good") < 0.0);
        // backtick apostrophes from the normalizer still negate
        assert!(compound("this isn`t good") < 0.0);
    }

    #[test]
    fn test_booster_intensifies() {
        assert!(compound("this is very good") > compound("this is good"));
        assert!(compound("this is slightly good") < compound("this is good"));
        assert!(compound("this is very bad") < compound("this is bad"));
    }

    #[test]
    fn test_caps_emphasis() {
        assert!(compound("this is GREAT today") > compound("this is great today"));
    }

    #[test]
    fn test_but_shifts_weight() {
        assert!(compound("the food is good but the service is terrible") < 0.0);
    }

    #[test]
    fn test_exclamation_emphasis() {
        assert!(compound("this is good!!!") > compound("this is good"));
        assert_eq!(compound("wow!!!!!!"), compound("wow!!!!"));
    }

    #[test]
    fn test_range() {
        let texts = [
            "great great great great great great great great awesome best love",
            "worst worst worst terrible horrible hate kill disaster",
        ];
        for t in texts {
            let c = compound(t);
            assert!((-1.0..=1.0).contains(&c), "{t}: {c}");
        }
    }

    #[test]
    fn test_custom_lexicon() {
        let analyzer = LexiconAnalyzer::new(Lexicon::from_pairs([("rustacean".to_string(), 2.0)]));
        assert!(analyzer.compound("a true rustacean") > 0.0);
        assert_eq!(analyzer.compound("this is good"), 0.0);
    }

    #[test]
    fn test_tokenize_keeps_emoticons() {
        let tokens = tokenize("hi :) x wow!!");
        let words: Vec<&str> = tokens.iter().map(|t| t.lower.as_str()).collect();
        assert_eq!(words, vec!["hi", ":)", "wow"]);
    }
}
