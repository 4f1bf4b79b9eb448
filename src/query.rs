//! Single-parameter query rewriting.

/// Returns `url` with query parameter `key` set to exactly `value`.
///
/// Every other parameter keeps its values and position; repeated keys are
/// grouped at their first occurrence. Whatever precedes the query (scheme,
/// authority, path) and the fragment are left as they are. Setting the same
/// key twice is the same as setting it once with the last value.
///
/// The query is re-serialized as `application/x-www-form-urlencoded`: only
/// alphanumerics and `*-._` stay literal, so `~` comes back as `%7E`.
///
/// ```
/// use contact_relay::query::append_param;
///
/// let url = append_param("https://x.test/p?a=1&b=2", "status", "success");
/// assert_eq!(url, "https://x.test/p?a=1&b=2&status=success");
/// ```
pub fn append_param(url: &str, key: &str, value: &str) -> String {
    let (rest, fragment) = match url.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (url, None),
    };
    let (base, query) = rest.split_once('?').unwrap_or((rest, ""));

    let mut params: Vec<(String, Vec<String>)> = Vec::new();
    for (name, val) in form_urlencoded::parse(query.as_bytes()) {
        match params.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(val.into_owned()),
            None => params.push((name.into_owned(), vec![val.into_owned()])),
        }
    }

    match params.iter_mut().find(|(n, _)| n == key) {
        Some((_, values)) => *values = vec![value.to_owned()],
        None => params.push((key.to_owned(), vec![value.to_owned()])),
    }

    let mut encoded = form_urlencoded::Serializer::new(String::new());
    for (name, values) in &params {
        for v in values {
            encoded.append_pair(name, v);
        }
    }

    let mut out = format!("{base}?{}", encoded.finish());
    if let Some(fragment) = fragment.filter(|f| !f.is_empty()) {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_unrelated_keys_in_order() {
        assert_eq!(
            append_param("https://x.test/p?a=1&b=2", "status", "success"),
            "https://x.test/p?a=1&b=2&status=success"
        );
    }

    #[test]
    fn adds_query_to_bare_path() {
        assert_eq!(append_param("/contact", "status", "error"), "/contact?status=error");
    }

    #[test]
    fn overwrites_in_place() {
        assert_eq!(
            append_param("/contact?status=error&ref=nav", "status", "success"),
            "/contact?status=success&ref=nav"
        );
    }

    #[test]
    fn latest_value_wins() {
        let once = append_param("/p?a=1", "status", "error");
        let twice = append_param(&once, "status", "success");
        assert_eq!(twice, "/p?a=1&status=success");
        assert_eq!(append_param(&twice, "status", "success"), twice);
    }

    #[test]
    fn repeated_keys_collapse_to_single_value() {
        assert_eq!(
            append_param("/p?status=a&x=1&status=b", "status", "ok"),
            "/p?status=ok&x=1"
        );
    }

    #[test]
    fn groups_repeated_unrelated_keys() {
        assert_eq!(
            append_param("/p?tag=a&x=1&tag=b", "status", "ok"),
            "/p?tag=a&tag=b&x=1&status=ok"
        );
    }

    #[test]
    fn keeps_fragment_and_blank_values() {
        assert_eq!(
            append_param("/contact?draft=#form", "status", "invalid_form"),
            "/contact?draft=&status=invalid_form#form"
        );
    }

    #[test]
    fn reencodes_values() {
        assert_eq!(
            append_param("/p?q=a%20b&r=%2F", "status", "success"),
            "/p?q=a+b&r=%2F&status=success"
        );
    }

    #[test]
    fn tilde_is_percent_encoded() {
        assert_eq!(append_param("/p?~x*=1", "status", "ok"), "/p?%7Ex*=1&status=ok");
        assert_eq!(append_param("/p?a=~b", "status", "ok"), "/p?a=%7Eb&status=ok");
    }
}
