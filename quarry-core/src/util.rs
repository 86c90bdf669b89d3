use std::cmp::min;
use syn::Path;

/// Compare the trailing segments of `path` against `expect`.
///
/// `String` matches `["std", "string", "String"]` as well as the fully qualified form.
pub fn matches_path(path: &Path, expect: &[&str]) -> bool {
    let len = min(path.segments.len(), expect.len());
    path.segments
        .iter()
        .rev()
        .take(len)
        .map(|v| &v.ident)
        .eq(expect.iter().rev().take(len))
}

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut first = true;
    for v in values {
        if !first {
            out.push_str(separator);
        }
        first = false;
        f(out, v);
    }
}

/// Cap long SQL text for log and error messages at 497 characters.
#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {{
        let query: &str = &$query;
        let end = query
            .char_indices()
            .nth(497)
            .map_or(query.len(), |(i, _)| i);
        if end < query.len() {
            format!("{}...", query[..end].trim_end())
        } else {
            query.trim_end().to_string()
        }
    }};
}
