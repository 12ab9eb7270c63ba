// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Produce filesystem-safe name components for suggested filenames.

/// Produce a filesystem-safe name component from a product name.
///
/// # Steps
/// - Transliterate Unicode to ASCII with `deunicode` (e.g., "Å" → "A").
/// - Allow ASCII alphanumerics plus `-` and `_`; treat other characters
///   as `_`. Dots count as separators here, since export names get
///   their extension appended by the caller.
/// - Collapse runs of `_`; trim leading/trailing underscores.
/// - Fall back to `label` for empty results.
pub fn sanitize_component(value: &str) -> String {
    let transliterated = deunicode::deunicode(value);
    let mut out = String::with_capacity(transliterated.len());
    let mut last_was_sep = true; // swallow leading separators

    for ch in transliterated.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('_');
            last_was_sep = true;
        }
    }

    while out.ends_with('_') {
        out.pop();
    }

    if out.is_empty() {
        return "label".to_string();
    }

    out
}
