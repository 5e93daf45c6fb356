//! Text Cleaner — turns scraped page text into a single normalised line for prompting.

use std::sync::OnceLock;

use regex::Regex;

static COMMENT_RE: OnceLock<Regex> = OnceLock::new();
static TAG_RE: OnceLock<Regex> = OnceLock::new();
static ENTITY_RE: OnceLock<Regex> = OnceLock::new();

fn comment_re() -> &'static Regex {
    COMMENT_RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"))
}

fn tag_re() -> &'static Regex {
    // Only a letter, `/`, `!` or `?` opens a tag; "<3 years>" is text.
    TAG_RE.get_or_init(|| {
        Regex::new(r"</?[A-Za-z][^<>]*>|<[!?][^<>]*>").expect("tag pattern is valid")
    })
}

fn entity_re() -> &'static Regex {
    ENTITY_RE.get_or_init(|| {
        Regex::new(r"&(?:[A-Za-z][A-Za-z0-9]{1,31}|#[0-9]{1,7}|#[xX][0-9A-Fa-f]{1,6});")
            .expect("entity pattern is valid")
    })
}

/// Strips markup residue and collapses whitespace.
///
/// Removes comments, tags, entities, stray angle brackets and control characters,
/// then folds every whitespace run into one space and trims. Each removed
/// fragment is replaced by a space, so a removal can never join its neighbours
/// into a new tag or entity and `clean_text(clean_text(x)) == clean_text(x)`.
pub fn clean_text(raw: &str) -> String {
    let text = comment_re().replace_all(raw, " ");
    let text = tag_re().replace_all(&text, " ");
    let text = entity_re().replace_all(&text, " ");

    let text: String = text
        .chars()
        .map(|c| if c == '<' || c == '>' || c.is_control() { ' ' } else { c })
        .collect();

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
