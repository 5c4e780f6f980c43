//! Dot-path primitives over nested value trees.
//!
//! Shared by the validation session for value lookup and for expanding
//! wildcard attribute paths against the data actually present in the bag.

use regex::Regex;
use serde_json::{Map, Value};

// ─── get / has ──────────────────────────────────────────────────────────────

/// Resolves a concrete dot-path against a value tree.
///
/// Descends through nested objects and arrays one segment at a time; array
/// indices are decimal segments. Returns `None` if any segment fails to
/// resolve — distinct from `Some(&Value::Null)`, which means the entry
/// exists and holds null. Empty path returns the root.
pub fn get<'a>(bag: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(bag);
    }

    let mut current = bag;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => {
                let index: usize = segment.parse().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// True iff every segment of `path` resolves to an existing entry.
/// The entry's value may be null.
pub fn has(bag: &Value, path: &str) -> bool {
    get(bag, path).is_some()
}

// ─── set ────────────────────────────────────────────────────────────────────

/// Writes `value` at `path`, creating empty object containers for missing
/// intermediate segments.
///
/// An intermediate segment that already holds a non-container value is only
/// replaced when `overwrite` is true; otherwise the write is a silent no-op.
/// A `*` segment fans the write out over every element of the container at
/// that position (no-op when nothing is there to fan over), which is how
/// wildcard placeholders get allocated before flattening.
pub fn set(bag: &mut Value, path: &str, value: Value, overwrite: bool) {
    let segments: Vec<&str> = path.split('.').collect();
    set_segments(bag, &segments, value, overwrite);
}

fn set_segments(current: &mut Value, segments: &[&str], value: Value, overwrite: bool) {
    let (segment, rest) = match segments.split_first() {
        Some(pair) => pair,
        None => return,
    };

    if *segment == "*" {
        match current {
            Value::Array(items) => {
                for item in items.iter_mut() {
                    if rest.is_empty() {
                        *item = value.clone();
                    } else {
                        set_segments(item, rest, value.clone(), overwrite);
                    }
                }
            }
            Value::Object(map) => {
                for (_, item) in map.iter_mut() {
                    if rest.is_empty() {
                        *item = value.clone();
                    } else {
                        set_segments(item, rest, value.clone(), overwrite);
                    }
                }
            }
            _ => {}
        }
        return;
    }

    if rest.is_empty() {
        match current {
            Value::Object(map) => {
                map.insert(segment.to_string(), value);
            }
            Value::Array(items) => {
                // In-bounds writes or a single append; sparse arrays cannot
                // be represented, so anything further out is a no-op.
                if let Ok(index) = segment.parse::<usize>() {
                    if index < items.len() {
                        items[index] = value;
                    } else if index == items.len() {
                        items.push(value);
                    }
                }
            }
            _ => {}
        }
        return;
    }

    let child = match current {
        Value::Object(map) => map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new())),
        Value::Array(items) => match segment.parse::<usize>() {
            Ok(index) if index < items.len() => &mut items[index],
            Ok(index) if index == items.len() => {
                items.push(Value::Object(Map::new()));
                &mut items[index]
            }
            _ => return,
        },
        _ => return,
    };

    if !child.is_object() && !child.is_array() {
        if !overwrite && !child.is_null() {
            return;
        }
        *child = Value::Object(Map::new());
    }

    set_segments(child, rest, value, overwrite);
}

// ─── flatten ────────────────────────────────────────────────────────────────

/// Flattens a value tree into an insertion-ordered map of dot-path → leaf.
///
/// Depth-first; array indices become path segments. Empty containers and
/// scalars are leaves. The root itself never appears as a key.
pub fn flatten(bag: &Value) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(bag, "", &mut out);
    out
}

fn flatten_into(value: &Value, prefix: &str, out: &mut Map<String, Value>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let path = join(prefix, key);
                flatten_into(child, &path, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                let path = join(prefix, &index.to_string());
                flatten_into(child, &path, out);
            }
        }
        _ => {
            if !prefix.is_empty() {
                out.insert(prefix.to_string(), value.clone());
            }
        }
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

// ─── wildcard expansion ─────────────────────────────────────────────────────

/// Regex source matching the concrete paths a wildcard path stands for:
/// every literal character escaped, each `*` standing for one non-dot
/// segment.
pub fn wildcard_pattern(path: &str) -> String {
    regex::escape(path).replace("\\*", "[^\\.]+")
}

/// Leading part of `path` before the first `*`, trailing dot trimmed.
/// `foo.bar.*.baz` → `foo.bar`; a leading wildcard yields `None`.
pub fn leading_explicit_path(path: &str) -> Option<&str> {
    let head = path.split('*').next().unwrap_or("");
    let trimmed = head.trim_end_matches('.');
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// Expands a wildcard dot-path into the concrete paths present in `bag`.
///
/// A path without `*` is already concrete and is returned as-is. Otherwise:
///
/// 1. Extract the sub-bag rooted at the explicit prefix (empty when absent).
/// 2. For a non-trailing wildcard, allocate a null placeholder along the
///    wildcard path so missing nested entries still surface in the flatten.
/// 3. Flatten the view; union in the distinct pattern-prefix groups found
///    across the full bag, with their real values, recovering matches whose
///    explicit prefix carries no data of its own.
/// 4. Keep the keys the anchored pattern matches end-to-end, deduplicated,
///    in insertion order.
pub fn expand_wildcard_path(bag: &Value, path: &str) -> Vec<String> {
    if !path.contains('*') {
        return vec![path.to_string()];
    }

    let pattern = wildcard_pattern(path);
    let (prefix_re, full_re) = match (
        Regex::new(&format!("^{}", pattern)),
        Regex::new(&format!("^{}\\z", pattern)),
    ) {
        (Ok(p), Ok(f)) => (p, f),
        _ => return vec![],
    };

    let view = attribute_view(bag, path);
    let mut flat = flatten(&view);

    for key in flatten(bag).keys() {
        if let Some(found) = prefix_re.find(key) {
            let candidate = found.as_str();
            if !flat.contains_key(candidate) {
                let value = get(bag, candidate).cloned().unwrap_or(Value::Null);
                flat.insert(candidate.to_string(), value);
            }
        }
    }

    flat.keys()
        .filter(|key| full_re.is_match(key.as_str()))
        .cloned()
        .collect()
}

/// The data-with-placeholders view an attribute path is matched against:
/// the sub-bag under the explicit prefix, re-rooted at its original path,
/// with null placeholders written along non-trailing wildcard paths.
fn attribute_view(bag: &Value, path: &str) -> Value {
    let mut data = match leading_explicit_path(path) {
        None => bag.clone(),
        Some(explicit) => {
            let mut rooted = Value::Object(Map::new());
            if let Some(value) = get(bag, explicit) {
                set(&mut rooted, explicit, value.clone(), false);
            }
            rooted
        }
    };

    if let Some(pos) = path.find('*') {
        if pos != path.len() - 1 {
            set(&mut data, path, Value::Null, true);
        }
    }

    data
}
