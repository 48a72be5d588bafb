//! # Error Suggestions
//!
//! Helper functions for generating error messages with hints, for the CLI
//! layer to wrap around `crate::error::Error` values. Following CLI
//! recommendations, errors should tell users what went wrong AND how to
//! fix it.

use std::path::Path;

/// Generate an error for when the root config file is not found.
pub fn config_not_found(root: &Path, tried: &[String]) -> anyhow::Error {
    anyhow::anyhow!(
        "No config file found under {root}\n\n\
         hint: Create one of: {tried}\n\
         hint: Run 'syncdrift init' to scaffold a starting config",
        root = root.display(),
        tried = tried.join(", "),
    )
}

/// Generate an error for a sync entry naming an unregistered generator.
///
/// Includes a "did you mean" suggestion when a close match exists among
/// the registered generator names.
pub fn unknown_generator(name: &str, registered: &[&str]) -> anyhow::Error {
    let did_you_mean = find_similar(name, registered)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Unknown generator: {name}{did_you_mean}\n\n\
         Registered generators: {registered}",
        registered = registered.join(", "),
    )
}

/// Generate an error for an unsupported config schema version.
pub fn config_version_unsupported(found: i64, expected: i64) -> anyhow::Error {
    anyhow::anyhow!(
        "Unsupported config version: {found} (expected {expected})\n\n\
         hint: Update 'version:' in your root config to {expected}\n\
         hint: Check the migration notes if upgrading from an older syncdrift"
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
