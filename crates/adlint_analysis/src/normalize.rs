use adlint_core::{ComplianceVerdict, Error, Result, RewriteResult};
use serde_json::{Map, Value};

/// Unwraps a code-fence wrapper around a backend reply. Precedence: tagged
/// ```json fence, then untagged ``` fence, then bare text.
pub fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    for opener in ["```json", "```"] {
        if let Some(rest) = trimmed.strip_prefix(opener) {
            let rest = rest.strip_suffix("```").unwrap_or(rest);
            return rest.trim();
        }
    }
    trimmed
}

fn parse_object(raw: &str) -> Result<Map<String, Value>> {
    let body = strip_fences(raw);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::parse(format!("reply is not valid JSON: {}", e), raw))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Error::parse("reply is not a JSON object", raw)),
    }
}

fn require<'a>(object: &'a Map<String, Value>, key: &str, raw: &str) -> Result<&'a Value> {
    object
        .get(key)
        .ok_or_else(|| Error::parse(format!("missing required key {:?}", key), raw))
}

fn boolean(object: &Map<String, Value>, key: &str, raw: &str) -> Result<bool> {
    match require(object, key, raw)? {
        Value::Bool(b) => Ok(*b),
        // Some models quote their booleans.
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(Error::parse(
            format!("key {:?} is not a boolean (got {})", key, other),
            raw,
        )),
    }
}

/// Scores must be integers in 0..=100. Out-of-range values are an error,
/// never clamped.
fn score(object: &Map<String, Value>, key: &str, raw: &str) -> Result<u8> {
    let value = require(object, key, raw)?;
    let number = value.as_i64().ok_or_else(|| {
        Error::parse(format!("key {:?} is not an integer (got {})", key, value), raw)
    })?;
    if !(0..=100).contains(&number) {
        return Err(Error::parse(
            format!("key {:?} out of range: {} is not within 0-100", key, number),
            raw,
        ));
    }
    Ok(number as u8)
}

/// A bare string where a list was expected becomes a one-element list;
/// scalar list elements are stringified.
fn string_list(object: &Map<String, Value>, key: &str, raw: &str) -> Result<Vec<String>> {
    match require(object, key, raw)? {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                Value::Bool(b) => Ok(b.to_string()),
                other => Err(Error::parse(
                    format!("key {:?} has a non-string entry: {}", key, other),
                    raw,
                )),
            })
            .collect(),
        other => Err(Error::parse(
            format!("key {:?} is not a list (got {})", key, other),
            raw,
        )),
    }
}

fn non_empty_string(object: &Map<String, Value>, key: &str, raw: &str) -> Result<String> {
    match require(object, key, raw)? {
        Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
        Value::String(_) => Err(Error::parse(format!("key {:?} is empty", key), raw)),
        other => Err(Error::parse(
            format!("key {:?} is not a string (got {})", key, other),
            raw,
        )),
    }
}

/// Validates a compliance reply. Cost/usage metadata is attached by the
/// orchestrator from the backend reply, not by the model.
pub fn verdict(raw: &str) -> Result<ComplianceVerdict> {
    let object = parse_object(raw)?;
    Ok(ComplianceVerdict {
        compliant: boolean(&object, "compliant", raw)?,
        relevancy_score: score(&object, "relevancy_score", raw)?,
        image_score: score(&object, "image_score", raw)?,
        issues: string_list(&object, "issues", raw)?,
        suggestions: string_list(&object, "suggestions", raw)?,
        cost_usd: None,
        usage: None,
    })
}

/// Validates a rewrite reply: all three fields present and non-empty.
pub fn rewrite(raw: &str) -> Result<RewriteResult> {
    let object = parse_object(raw)?;
    Ok(RewriteResult {
        headline: non_empty_string(&object, "headline", raw)?,
        description: non_empty_string(&object, "description", raw)?,
        primary_text: non_empty_string(&object, "primary_text", raw)?,
    })
}
