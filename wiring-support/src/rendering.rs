//! Text rendering for resolution diagnostics.
//!
//! Identifiers are usually fully qualified Rust type names, which are
//! noisy in error output. These helpers shorten them, join resolution
//! paths and pick close matches for "did you mean" hints.

/// Separator used between steps of a resolution path.
pub const CHAIN_ARROW: &str = " → ";

/// Joins the steps of a resolution path.
///
/// # Examples
/// ```
/// use wiring_support::rendering::render_chain;
///
/// let path = ["Service", "Repository", "Service"];
/// assert_eq!(render_chain(&path), "Service → Repository → Service");
/// ```
pub fn render_chain(chain: &[impl AsRef<str>]) -> String {
    let mut rendered = String::new();
    for (i, step) in chain.iter().enumerate() {
        if i > 0 {
            rendered.push_str(CHAIN_ARROW);
        }
        rendered.push_str(&short_name(step.as_ref()));
    }
    rendered
}

/// Drops module paths from every segment of a type name.
///
/// ```
/// use wiring_support::rendering::short_name;
///
/// assert_eq!(short_name("app::repo::Repository"), "Repository");
/// assert_eq!(short_name("alloc::sync::Arc<app::Repository>"), "Arc<Repository>");
/// assert_eq!(short_name("Logger"), "Logger");
/// ```
pub fn short_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;

    for (idx, ch) in full.char_indices() {
        if matches!(ch, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&') {
            out.push_str(last_path_segment(&full[segment_start..idx]));
            out.push(ch);
            segment_start = idx + ch.len_utf8();
        }
    }
    out.push_str(last_path_segment(&full[segment_start..]));
    out
}

fn last_path_segment(segment: &str) -> &str {
    segment.rsplit("::").next().unwrap_or(segment)
}

/// Picks up to `limit` known names that look like `requested`.
///
/// Matching is case-insensitive and works on short names, so
/// `"Repositry"` finds `"app::Repository"`. Best matches come first.
pub fn suggest<'a>(
    requested: &str,
    known: impl IntoIterator<Item = &'a str>,
    limit: usize,
) -> Vec<String> {
    let wanted = short_name(requested).to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &str)> = known
        .into_iter()
        .filter_map(|name| similarity(&wanted, &short_name(name).to_lowercase()).map(|s| (s, name)))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored.dedup_by(|a, b| a.1 == b.1);
    scored
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Scores how close two lowercase short names are, `None` when unrelated.
fn similarity(wanted: &str, candidate: &str) -> Option<usize> {
    if candidate.is_empty() || wanted == candidate {
        return None;
    }
    if candidate.contains(wanted) || wanted.contains(candidate) {
        return Some(100);
    }

    let prefix = wanted
        .chars()
        .zip(candidate.chars())
        .take_while(|(a, b)| a == b)
        .count();
    if prefix >= 3 {
        return Some(prefix * 10);
    }

    let longest = wanted.chars().count().max(candidate.chars().count());
    let aligned = wanted
        .chars()
        .zip(candidate.chars())
        .filter(|(a, b)| a == b)
        .count();
    (aligned * 100 / longest >= 60).then_some(aligned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_of_one() {
        assert_eq!(render_chain(&["A"]), "A");
    }

    #[test]
    fn empty_chain() {
        let chain: [&str; 0] = [];
        assert_eq!(render_chain(&chain), "");
    }

    #[test]
    fn chain_uses_short_names() {
        let chain = ["app::A", "app::inner::B", "app::A"];
        assert_eq!(render_chain(&chain), "A → B → A");
    }

    #[test]
    fn short_name_with_nested_generics() {
        assert_eq!(
            short_name("core::option::Option<alloc::sync::Arc<app::Repository>>"),
            "Option<Arc<Repository>>"
        );
    }

    #[test]
    fn short_name_of_trait_object() {
        assert_eq!(short_name("alloc::sync::Arc<dyn app::Logger>"), "Arc<dyn Logger>");
    }

    #[test]
    fn suggest_finds_typo() {
        let known = ["app::Repository", "app::Service", "app::Logger"];
        let hits = suggest("Repositry", known, 3);
        assert_eq!(hits.first().map(String::as_str), Some("app::Repository"));
    }

    #[test]
    fn suggest_ignores_exact_and_unrelated() {
        let known = ["Logger", "Database"];
        assert!(suggest("Logger", ["Logger"], 3).is_empty());
        assert!(suggest("Xyzzy", known, 3).is_empty());
    }

    #[test]
    fn suggest_respects_limit() {
        let known = ["UserRepo", "UserService", "UserCache"];
        assert_eq!(suggest("User", known, 2).len(), 2);
    }

    #[test]
    fn empty_names_are_never_suggested() {
        let known = ["", "Repository"];
        assert_eq!(suggest("Repositry", known, 3), ["Repository"]);
        assert!(suggest("Unrelated", [""], 3).is_empty());
    }
}
