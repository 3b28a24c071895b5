use regex::Regex;
use std::sync::OnceLock;

pub const PROJECT_PREFIX: &str = "ai-underdog-";
pub const FALLBACK_SLUG: &str = "project";
pub const MAX_SLUG_CHARS: usize = 50;

fn disallowed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9\s-]").expect("static regex"))
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Lowercase, drop everything outside `[a-z0-9]`, whitespace and `-`, trim,
/// turn whitespace runs into single hyphens and keep the first 50 chars.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = disallowed().replace_all(&lower, "");
    let hyphenated = whitespace_run().replace_all(stripped.trim(), "-");
    hyphenated.chars().take(MAX_SLUG_CHARS).collect()
}

/// Hosting-safe project name for a prompt, e.g.
/// "A synthwave artist page" -> "ai-underdog-a-synthwave-artist-page".
pub fn project_name(prompt: &str) -> String {
    let slug = slugify(prompt);
    if slug.is_empty() {
        format!("{PROJECT_PREFIX}{FALLBACK_SLUG}")
    } else {
        format!("{PROJECT_PREFIX}{slug}")
    }
}
