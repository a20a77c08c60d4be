const DOUBLE_HYPHEN_SENTINEL: &str = "\u{0}DOUBLE_HYPHEN\u{0}";

// "Elections & Results" becomes "elections--results"; doubled hyphens are kept.
pub fn tab_slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-").replace('&', "")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugMatch {
    pub page_key: String,
    pub tab_slug: Option<String>,
    pub year: Option<String>,
}

pub fn is_year_token(token: &str) -> bool {
    token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit())
}

fn restore(tokens: &[&str]) -> String {
    tokens.join("-").replace(DOUBLE_HYPHEN_SENTINEL, "--")
}

/// Resolves a request path segment against the known page keys.
///
/// An exact key match wins outright. Otherwise a trailing 4-digit token is
/// taken as the year and the longest token prefix that names a page becomes
/// the page key; whatever follows it is the tab slug. Returns `None` when no
/// prefix names a page.
pub fn resolve_slug<F>(segment: &str, is_known_page: F) -> Option<SlugMatch>
where
    F: Fn(&str) -> bool,
{
    if is_known_page(segment) {
        return Some(SlugMatch {
            page_key: segment.to_string(),
            tab_slug: None,
            year: None,
        });
    }

    let protected = segment.replace("--", DOUBLE_HYPHEN_SENTINEL);
    let mut tokens: Vec<&str> = protected.split('-').collect();

    let mut year = None;
    if tokens.len() > 1 && tokens.last().is_some_and(|t| is_year_token(t)) {
        year = tokens.pop().map(str::to_string);
    }

    (1..=tokens.len()).rev().find_map(|split| {
        let candidate = restore(&tokens[..split]);
        if !is_known_page(&candidate) {
            return None;
        }
        let tab_slug = (split < tokens.len()).then(|| restore(&tokens[split..]));
        Some(SlugMatch {
            page_key: candidate,
            tab_slug,
            year: year.clone(),
        })
    })
}
