//! Default-value normalization.
//!
//! Raw `column_default` expressions from the catalog are noisy: sequence
//! calls, timestamp functions, cast-annotated literals. Normalization is
//! pure and deterministic; generated values are treated as having no
//! stored default at all.

/// Canonical sentinel for sequence-backed (auto-increment) columns.
pub const AUTO_INCREMENT: &str = "[AUTO INCREMENT]";

/// Normalize a raw default expression into canonical form.
///
/// Rules are applied in order: sequence markers win over cast stripping,
/// and current-timestamp expressions are dropped entirely.
pub fn normalize_default(raw: Option<&str>) -> Option<String> {
    let raw = raw?;

    if raw.contains("nextval('") {
        return Some(AUTO_INCREMENT.to_string());
    }

    // The value is generated at insert time, not a stored literal.
    if raw.contains("now()") || raw.contains("'now'::text") {
        return None;
    }

    if raw.contains("::") {
        let candidate = raw.split("::").next().unwrap_or(raw);
        // A quote pair is stripped only as a pair; a lone quote stays.
        let stripped = candidate
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .unwrap_or(candidate);

        if stripped == "NULL" {
            return None;
        }
        return Some(stripped.to_string());
    }

    Some(raw.to_string())
}
