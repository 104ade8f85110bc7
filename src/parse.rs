//! Parsing of free-text slash command arguments

/// Split comma separated reactions into emoji tokens.
///
/// Accepts unicode emoji and custom emoji (`<:name:id>`, `<a:name:id>`, or `<name:id>`, which is
/// normalized to `<:name:id>`).  Anything else is dropped.  Validation is best effort: Discord has
/// the final say when the reaction is added.
pub fn parse_reactions(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| custom_emoji(token).or_else(|| unicode_emoji(token)))
        .collect()
}

fn custom_emoji(token: &str) -> Option<String> {
    let inner = token.strip_prefix('<')?.strip_suffix('>')?;

    let (animated, rest) = if let Some(rest) = inner.strip_prefix("a:") {
        (true, rest)
    } else {
        (false, inner.strip_prefix(':').unwrap_or(inner))
    };

    let (name, id) = rest.split_once(':')?;
    let name_ok = (2..=32).contains(&name.len())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    let id_ok = !id.is_empty() && id.len() <= 20 && id.chars().all(|c| c.is_ascii_digit());
    if !name_ok || !id_ok {
        return None;
    }

    let prefix = if animated { "a" } else { "" };
    Some(format!("<{}:{}:{}>", prefix, name, id))
}

fn unicode_emoji(token: &str) -> Option<String> {
    // Keycap sequences such as `#️⃣` carry one ASCII character.
    let plausible = token.chars().count() <= 16
        && token.chars().any(|c| is_pictographic(c) || c == KEYCAP)
        && token.chars().all(|c| {
            is_pictographic(c)
                || is_sequence_component(c)
                || c.is_ascii_digit()
                || c == '#'
                || c == '*'
        });

    plausible.then(|| token.to_owned())
}

const KEYCAP: char = '\u{20E3}';

/// Code points that render as an emoji on their own (or with a variation selector).
fn is_pictographic(c: char) -> bool {
    matches!(c,
        '\u{A9}' | '\u{AE}' | '\u{203C}' | '\u{2049}' | '\u{2122}' | '\u{2139}'
        | '\u{2194}'..='\u{21AA}'
        | '\u{231A}'..='\u{23FF}'
        | '\u{24C2}'
        | '\u{25AA}'..='\u{25FE}'
        | '\u{2600}'..='\u{27BF}'
        | '\u{2934}'..='\u{2935}'
        | '\u{2B05}'..='\u{2B55}'
        | '\u{3030}' | '\u{303D}' | '\u{3297}' | '\u{3299}'
        // Symbols, pictographs, flags (regional indicators) and skin tones
        | '\u{1F000}'..='\u{1FAFF}')
}

/// Code points that only glue or modify other emoji: joiner, variation selectors, keycap and
/// subdivision flag tags.
fn is_sequence_component(c: char) -> bool {
    matches!(c, '\u{200D}' | '\u{FE0E}' | '\u{FE0F}' | KEYCAP | '\u{E0020}'..='\u{E007F}')
}

/// Split semicolon separated messages.
///
/// Double quotes group text so it may contain semicolons; the quotes themselves are dropped.
/// Surrounding whitespace is trimmed and empty entries are skipped, so blank input clears.
pub fn parse_messages(input: &str) -> Vec<String> {
    let mut messages = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in input.chars() {
        match c {
            '"' => quoted = !quoted,
            ';' if !quoted => messages.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    messages.push(current);

    messages
        .into_iter()
        .map(|m| m.trim().to_owned())
        .filter(|m| !m.is_empty())
        .collect()
}
