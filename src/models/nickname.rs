// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Short display names for structured model IDs.
//!
//! `Llama-3.2-1B-Instruct-q4f16_1-MLC` becomes `Llama 1B`;
//! `DeepSeek-R1-Distill-Qwen-1.5B-q4f16_1-MLC` becomes `Qwen < DeepSeek 1.5B`.

/// Display name for `model_id`, numbered if it collides with `existing`.
///
/// Collisions count entries equal to the candidate or of the form
/// `"{candidate} #N"`; with N such entries the result is `"{candidate} #{N+1}"`.
pub fn nickname(model_id: &str, existing: &[String]) -> String {
    let candidate = base_nickname(model_id);
    let collisions = existing
        .iter()
        .filter(|name| is_same_or_numbered(name, &candidate))
        .count();
    if collisions == 0 {
        candidate
    } else {
        format!("{} #{}", candidate, collisions + 1)
    }
}

/// Nicknames for a batch, each one numbered against those before it.
pub fn nickname_all<S: AsRef<str>>(model_ids: &[S]) -> Vec<String> {
    let mut assigned: Vec<String> = Vec::with_capacity(model_ids.len());
    for id in model_ids {
        let name = nickname(id.as_ref(), &assigned);
        assigned.push(name);
    }
    assigned
}

fn base_nickname(model_id: &str) -> String {
    let segments: Vec<&str> = model_id.split('-').collect();
    let family = normalize_family(segments[0]);
    let rest = &segments[1..];

    let size = rest.iter().copied().find(|s| is_size_token(s)).map(format_size);

    let distill_family = rest
        .iter()
        .position(|s| s.eq_ignore_ascii_case("distill"))
        .and_then(|i| rest.get(i + 1))
        .map(|s| normalize_family(s));

    let name = match distill_family {
        Some(distill) => format!("{} < {} {}", distill, family, size.unwrap_or_default()),
        None => format!("{} {}", family, size.unwrap_or_default()),
    };
    name.trim().to_string()
}

/// Keep stylized mixed-case names as written, otherwise capitalize.
fn normalize_family(segment: &str) -> String {
    let is_upper = segment == segment.to_uppercase();
    let is_lower = segment == segment.to_lowercase();
    if !is_upper && !is_lower {
        return segment.to_string();
    }
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut name: String = first.to_uppercase().collect();
    name.push_str(&chars.as_str().to_lowercase());
    name
}

/// `mini`, or digits with an optional single decimal point followed by B/M.
fn is_size_token(segment: &str) -> bool {
    if segment.eq_ignore_ascii_case("mini") {
        return true;
    }
    let Some(number) = segment
        .strip_suffix(['B', 'b', 'M', 'm'])
        .filter(|n| !n.is_empty())
    else {
        return false;
    };
    let mut seen_point = false;
    let mut seen_digit = false;
    for c in number.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => return false,
        }
    }
    seen_digit
}

fn format_size(segment: &str) -> String {
    if segment.eq_ignore_ascii_case("mini") {
        "Mini".to_string()
    } else {
        segment.to_uppercase()
    }
}

fn is_same_or_numbered(name: &str, candidate: &str) -> bool {
    match name.strip_prefix(candidate) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix(" #")
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit())),
        None => false,
    }
}

#[cfg(test)]
#[path = "nickname_tests.rs"]
mod tests;
