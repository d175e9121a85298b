#![deny(missing_docs)]

//! # Naming
//!
//! Collision-free identifiers for one conversion run.
//!
//! - First use of a base returns it verbatim, the Nth use appends `N-1`
//!   (`Pet`, `Pet1`, `Pet2`).
//! - A name that is live (issued and not released, or a built-in) is never
//!   handed out again; its suffix is skipped.
//! - A name discarded by an equivalence merge is handed back with `release`.
//! - Operation names fall back to `<method><sanitized path>`.

use crate::error::{AppError, AppResult};
use crate::graphql::schema::{MUTATION_TYPE, QUERY_TYPE};
use crate::graphql::types::{BOOLEAN, FLOAT, INT, STRING};
use indexmap::IndexMap;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Base used when neither the schema nor the caller supplies a name.
pub const DEFAULT_BASE_NAME: &str = "Untitled";

/// Suffix appended to composite names in input position.
pub const INPUT_SUFFIX: &str = "Input";

/// Type names every schema already defines.
const BUILTIN_NAMES: [&str; 7] = [INT, FLOAT, STRING, BOOLEAN, "ID", QUERY_TYPE, MUTATION_TYPE];

/// Hands out unique names and tracks the suffix counter per base.
#[derive(Debug, Clone)]
pub struct NameAllocator {
    records: IndexMap<String, usize>,
    issued: HashMap<String, String>,
    reserved: HashSet<String>,
}

impl Default for NameAllocator {
    fn default() -> Self {
        Self {
            records: IndexMap::new(),
            issued: HashMap::new(),
            reserved: BUILTIN_NAMES.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl NameAllocator {
    /// Creates an allocator with only the built-in names in use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh name derived from `base` (or `DEFAULT_BASE_NAME`).
    ///
    /// Suffixes whose name is already live are skipped, so a base that is a
    /// suffixed form of another (`Pet1` next to `Pet`) never collides.
    pub fn allocate(&mut self, base: Option<&str>) -> String {
        let base = base.unwrap_or(DEFAULT_BASE_NAME);
        let mut count = self.uses(base);
        let name = loop {
            let name = suffixed(base, count);
            count += 1;
            if !self.is_taken(&name) {
                break name;
            }
        };
        self.records.insert(base.to_string(), count);
        self.issued.insert(name.clone(), base.to_string());
        name
    }

    /// Gives back a name issued by `allocate`.
    ///
    /// The base counter is only rewound when `name` is the latest suffix of
    /// its base; an older name is freed without touching the counter, as
    /// later suffixes are still live. Releasing a name that is not an
    /// outstanding allocation fails.
    pub fn release(&mut self, name: &str) -> AppResult<()> {
        let base = self.issued.remove(name).ok_or_else(|| {
            AppError::General(format!(
                "cannot release name '{}': it has no outstanding allocation",
                name
            ))
        })?;
        if let Some(count) = self.records.get_mut(&base) {
            if *count > 0 && suffixed(&base, *count - 1) == name {
                *count -= 1;
            }
        }
        Ok(())
    }

    /// Suffix counter of `base`: how many suffixes have been consumed.
    pub fn uses(&self, base: &str) -> usize {
        self.records.get(base).copied().unwrap_or(0)
    }

    /// Whether `name` is a built-in or an outstanding allocation.
    pub fn is_taken(&self, name: &str) -> bool {
        self.reserved.contains(name) || self.issued.contains_key(name)
    }

    /// Finds the base both names were allocated from.
    ///
    /// Scans every base ever allocated and returns the longest one such that
    /// each name is that base followed by nothing or by a numeric suffix.
    /// `Pet` and `Pet1` share `Pet`; `Pet` and `PetInput` share nothing.
    pub fn common_prefix_of(&self, name_a: &str, name_b: &str) -> Option<String> {
        self.records
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(base, _)| base)
            .filter(|base| derives_from(name_a, base) && derives_from(name_b, base))
            .max_by_key(|base| base.len())
            .cloned()
    }
}

fn suffixed(base: &str, count: usize) -> String {
    if count == 0 {
        base.to_string()
    } else {
        format!("{}{}", base, count)
    }
}

fn derives_from(name: &str, base: &str) -> bool {
    name.strip_prefix(base)
        .is_some_and(|suffix| suffix.chars().all(|c| c.is_ascii_digit()))
}

/// Appends `INPUT_SUFFIX` unless the name already carries it.
pub fn input_base_name(name: &str) -> String {
    if name.ends_with(INPUT_SUFFIX) {
        name.to_string()
    } else {
        format!("{}{}", name, INPUT_SUFFIX)
    }
}

/// Default name of an operation.
///
/// Returns `explicit_id` verbatim when present; otherwise the lowercased
/// method followed by the path with each of `/`, `{`, `}` and every run of
/// `-` replaced by `_`.
///
/// # Arguments
///
/// * `explicit_id` - The `operationId`, if declared.
/// * `method` - HTTP method, any case.
/// * `path` - Path template, e.g. `/pets/{petId}`.
pub fn operation_name(explicit_id: Option<&str>, method: &str, path: &str) -> String {
    if let Some(id) = explicit_id {
        return id.to_string();
    }
    static PATH_RE: OnceLock<Regex> = OnceLock::new();
    let path_re = PATH_RE.get_or_init(|| Regex::new(r"/|\{|\}|-+").expect("Invalid regex"));
    format!("{}{}", method.to_lowercase(), path_re.replace_all(path, "_"))
}

/// Turns an arbitrary label (enum literal, property, parameter) into a valid
/// GraphQL name (`[_A-Za-z][_0-9A-Za-z]*`). Valid names pass through unchanged.
pub fn graphql_name(literal: &str) -> String {
    let mut name: String = literal
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}
