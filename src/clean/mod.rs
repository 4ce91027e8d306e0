// src/clean/mod.rs
pub mod emoji;

use once_cell::sync::Lazy;
use regex::Regex;

pub use emoji::{EmojiResolver, Shortcodes};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([#@$])([0-9A-Za-z_]+)").unwrap());
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static NEWLINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DOTS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{3,}").unwrap());
static ELLIPSES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"…+").unwrap());

/// Clean a post's text, resolving emoji through GitHub shortcodes.
pub fn normalize(text: &str) -> String {
    normalize_with(text, &Shortcodes)
}

/// Clean a post's text so it can sit unquoted in a comma-separated column.
///
/// Steps run in a fixed order, each relying on the ones before it:
/// 1) emoji glyph → `:name:`
/// 2) `'` → `` ` `` and `"` → ``` `` ```
/// 3) `,` → space
/// 4) lower-case the word of `#tag`, `@mention`, `$cashtag`
/// 5) drop `http(s)://` URLs
/// 6) line breaks → space
/// 7) collapse whitespace runs
/// 8) `...` (or longer) → `…`, `……` → `…`
/// 9) trim
pub fn normalize_with(text: &str, resolver: &dyn EmojiResolver) -> String {
    let text = substitute_emoji(text, resolver);
    let text = text.replace('\'', "`").replace('"', "``").replace(',', " ");

    let text = TAG_RE.replace_all(&text, |caps: &regex::Captures| {
        format!("{}{}", &caps[1], caps[2].to_lowercase())
    });
    let text = URL_RE.replace_all(&text, "");
    let text = NEWLINE_RE.replace_all(&text, " ");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    let text = DOTS_RE.replace_all(&text, "…");
    let text = ELLIPSES_RE.replace_all(&text, "…");

    text.trim().to_string()
}

/// Replace every resolvable glyph in the scanned emoji ranges with `:name:`.
/// Unknown glyphs stay as they are.
fn substitute_emoji(text: &str, resolver: &dyn EmojiResolver) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if !emoji::in_emoji_range(c) {
            out.push(c);
            continue;
        }
        match resolver.name(c) {
            Some(name) => {
                out.push(':');
                out.push_str(&name);
                out.push(':');
                // presentation selector belongs to the glyph we just replaced
                if chars.peek().copied().is_some_and(emoji::is_variation_selector) {
                    chars.next();
                }
            }
            None => out.push(c),
        }
    }

    out
}
