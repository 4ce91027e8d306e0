/// Looks up a short textual name for a single emoji glyph.
pub trait EmojiResolver {
    /// `None` when the glyph has no known name.
    fn name(&self, glyph: char) -> Option<String>;
}

/// Resolves glyphs to their GitHub shortcodes (`🔥` → `fire`).
#[derive(Debug, Default, Clone, Copy)]
pub struct Shortcodes;

const VARIATION_SELECTOR_16: char = '\u{FE0F}';

impl EmojiResolver for Shortcodes {
    fn name(&self, glyph: char) -> Option<String> {
        let bare = glyph.to_string();
        // Text-default symbols (☀, ✈, ...) are only listed in their emoji presentation.
        let emoji = emojis::get(&bare).or_else(|| {
            let mut presented = bare.clone();
            presented.push(VARIATION_SELECTOR_16);
            emojis::get(&presented)
        })?;

        match emoji.shortcode() {
            Some(code) => Some(code.to_string()),
            None => Some(emoji.name().to_lowercase().replace([' ', '-'], "_")),
        }
    }
}

/// Codepoint ranges scanned for emoji: misc pictographs + transport,
/// supplemental symbols, misc symbols and dingbats.
pub fn in_emoji_range(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1F6FF | 0x1F900..=0x1F9FF | 0x2600..=0x26FF | 0x2700..=0x27BF
    )
}

pub(crate) fn is_variation_selector(c: char) -> bool {
    c == VARIATION_SELECTOR_16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert!(in_emoji_range('🔥'));
        assert!(in_emoji_range('☀'));
        assert!(in_emoji_range('✂'));
        assert!(in_emoji_range('🤔'));
        assert!(!in_emoji_range('a'));
        assert!(!in_emoji_range('…'));
        assert!(in_emoji_range('😀'));
        assert!(!in_emoji_range('\u{1FA70}'));
    }

    #[test]
    fn test_shortcodes_resolve_common_glyphs() {
        assert_eq!(Shortcodes.name('🔥').as_deref(), Some("fire"));
        assert_eq!(Shortcodes.name('🍕').as_deref(), Some("pizza"));
    }

    #[test]
    fn test_shortcodes_unknown_glyph() {
        // unassigned codepoint inside a scanned block
        assert_eq!(Shortcodes.name('\u{1F6FF}'), None);
        assert_eq!(Shortcodes.name('x'), None);
    }
}
