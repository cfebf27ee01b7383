use std::sync::LazyLock;

use regex::Regex;

static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Clean a review body: emoji to `name_with_underscores`, every other
/// non-word/non-whitespace character to a space, whitespace runs collapsed,
/// ends trimmed. Idempotent on already-cleaned text.
pub fn clean_text(text: &str) -> String {
    let named = demojize(text);
    let spaced = NON_WORD_RE.replace_all(&named, " ");
    SPACE_RE.replace_all(&spaced, " ").trim().to_string()
}

/// Replace each named emoji with `:{name}:` (spaces in the Unicode name become
/// underscores). Unnamed emoji scalars, joiners and variation selectors are
/// dropped; everything else passes through untouched.
fn demojize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        // Some emoji are only named as a pair with U+FE0F (e.g. red heart).
        if chars.peek() == Some(&'\u{FE0F}') {
            let mut pair = String::with_capacity(7);
            pair.push(c);
            pair.push('\u{FE0F}');
            if push_emoji_name(&mut out, &pair).is_some() {
                chars.next();
                continue;
            }
        }

        let single = c.to_string();
        if push_emoji_name(&mut out, &single).is_some() {
            continue;
        }

        if !is_emoji_component(c) {
            out.push(c);
        }
    }

    out
}

fn push_emoji_name(out: &mut String, candidate: &str) -> Option<()> {
    let emoji = emojis::get(candidate)?;
    out.push(':');
    for c in emoji.name().chars() {
        out.push(if c == ' ' { '_' } else { c });
    }
    out.push(':');
    Some(())
}

/// Scalars that belong to emoji sequences but carry no name of their own.
fn is_emoji_component(c: char) -> bool {
    matches!(u32::from(c),
        0x200D                // zero-width joiner
        | 0xFE0E | 0xFE0F     // variation selectors
        | 0x20E3              // combining enclosing keycap
        | 0x1F3FB..=0x1F3FF   // skin tone modifiers
        | 0x1F1E6..=0x1F1FF   // regional indicators
        | 0x2600..=0x27BF     // misc symbols, dingbats
        | 0x1F000..=0x1FAFF   // emoji planes
        | 0xE0020..=0xE007F   // tag characters
    )
}
