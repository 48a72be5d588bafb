//! # SectionParser
//!
//! Splits an existing file's contents into a pre-autogen region, the
//! autogenerated region itself (start marker through end marker,
//! inclusive), and a post-autogen region. Built-in generators that rewrite
//! only a managed region of a file (`generators::section_merger`) use this
//! to preserve user edits outside the markers.
//!
//! Grounded on `original_source/sharedapi/files/existingfileparser/parser.go`'s
//! `Parse`, with one deliberate behavior change: the Go original treats a
//! start marker with no matching end marker the same as "no section at
//! all" (it falls through to the `endIndex == -1` branch and returns the
//! whole file as the post-autogen region). That silently discards a
//! malformed managed section. Here it is `Error::UnterminatedSection`.

use crate::error::{Error, Result};

pub const RECOMMENDED_SECTION_START: &str = "THIS SECTION IS AUTOGENERATED, DO NOT EDIT";
pub const RECOMMENDED_SECTION_END: &str = "END OF AUTOGENERATED SECTION";

/// The three regions a file splits into around its autogenerated section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub pre_autogen: String,
    pub autogen: String,
    pub post_autogen: String,
}

impl ParseResult {
    /// Whether any autogenerated section was found.
    pub fn has_section(&self) -> bool {
        !self.autogen.is_empty()
    }

    /// Reassembles the three regions, joined by `split_by`.
    pub fn join(&self, split_by: &str) -> String {
        if self.has_section() {
            [
                self.pre_autogen.as_str(),
                self.autogen.as_str(),
                self.post_autogen.as_str(),
            ]
            .join(split_by)
        } else {
            self.post_autogen.clone()
        }
    }
}

/// Parser configuration: how to split lines, recognize section markers,
/// trim them, and (optionally) sort each region's lines independently.
///
/// Three separate sorters, not one shared sorter: only the autogen region
/// is generator-owned, so by default only it gets sorted. Sorting the
/// pre/post regions would reorder hand-written content the generator
/// doesn't own.
pub struct ParseConfig {
    pub split_by: String,
    pub start_section: Box<dyn Fn(&str) -> bool>,
    pub end_section: Box<dyn Fn(&str) -> bool>,
    /// Applied to a scratch copy of every line for marker matching only, and
    /// to the final autogen lines. Pre/post lines are reassembled from the
    /// original, untrimmed content.
    pub section_trim: Option<Box<dyn Fn(&str) -> String>>,
    pub pre_sorter: Option<Box<dyn Fn(&mut [String])>>,
    pub autogen_sorter: Option<Box<dyn Fn(&mut [String])>>,
    pub post_sorter: Option<Box<dyn Fn(&mut [String])>>,
}

impl ParseConfig {
    /// The recommended configuration: newline-separated, substring markers,
    /// whitespace-trimmed, autogen region lexically sorted. Pre/post regions
    /// are left untouched since they hold hand-written content.
    pub fn recommended() -> Self {
        ParseConfig {
            split_by: "\n".to_string(),
            start_section: contains_substring(RECOMMENDED_SECTION_START),
            end_section: contains_substring(RECOMMENDED_SECTION_END),
            section_trim: Some(Box::new(|s: &str| s.trim().to_string())),
            pre_sorter: None,
            autogen_sorter: Some(Box::new(|lines: &mut [String]| lines.sort())),
            post_sorter: None,
        }
    }
}

/// Builds a marker predicate that matches any line containing `substring`.
pub fn contains_substring(substring: &str) -> Box<dyn Fn(&str) -> bool> {
    let needle = substring.to_string();
    Box::new(move |s: &str| s.contains(&needle))
}

/// Parses `contents` into its three regions per `config`.
///
/// A path is accepted purely for error messages; the caller is expected to
/// have already loaded `contents` via a `StateLoader`.
pub fn parse(path: &str, contents: &str, config: &ParseConfig) -> Result<ParseResult> {
    let parts: Vec<String> = contents.split(config.split_by.as_str()).map(String::from).collect();

    // Marker matching runs against a trimmed copy so markers are recognized
    // regardless of surrounding whitespace; the pre/post regions keep the
    // original, untrimmed lines so hand-written content round-trips as-is.
    let match_parts: Vec<String> = match &config.section_trim {
        Some(trim) => parts.iter().map(|p| trim(p)).collect(),
        None => parts.clone(),
    };

    let mut start_index: Option<usize> = None;
    let mut end_index: Option<usize> = None;
    for (idx, part) in match_parts.iter().enumerate() {
        if start_index.is_none() && (config.start_section)(part) {
            start_index = Some(idx);
            continue;
        }
        if start_index.is_some() && (config.end_section)(part) {
            end_index = Some(idx);
        }
    }

    match (start_index, end_index) {
        (None, _) => Ok(ParseResult {
            pre_autogen: String::new(),
            autogen: String::new(),
            post_autogen: contents.to_string(),
        }),
        (Some(_), None) => Err(Error::UnterminatedSection {
            path: path.to_string(),
        }),
        (Some(start), Some(end)) => {
            let mut pre: Vec<String> = parts[..start].to_vec();
            let mut autogen: Vec<String> = parts[start..=end].to_vec();
            let mut post: Vec<String> = parts[end + 1..].to_vec();
            if let Some(trim) = &config.section_trim {
                for line in &mut autogen {
                    *line = trim(line);
                }
            }
            if let Some(sorter) = &config.pre_sorter {
                sorter(&mut pre);
            }
            if let Some(sorter) = &config.autogen_sorter {
                sorter(&mut autogen);
            }
            if let Some(sorter) = &config.post_sorter {
                sorter(&mut post);
            }
            Ok(ParseResult {
                pre_autogen: pre.join(&config.split_by),
                autogen: autogen.join(&config.split_by),
                post_autogen: post.join(&config.split_by),
            })
        }
    }
}
