use crate::ParamType;
use regex::{Captures, Regex};
use std::{collections::HashMap, sync::LazyLock};

/// Positional marker substituted for every named placeholder.
pub const POSITIONAL_MARKER: &str = "?";

/// Matches `<type-char?>:<name>`.
fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_REGEX: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"([sbilfdt]?):([A-Za-z0-9_]+)").unwrap());
    &PLACEHOLDER_REGEX
}

/// Result of [`compile`]: positional SQL together with the binding plan.
///
/// The n-th `?` of `sql` is bound to the value named by the n-th entry of
/// `placeholders`, with the type that `types` records for that name.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub sql: String,
    pub placeholders: Vec<String>,
    pub types: HashMap<String, ParamType>,
}

impl CompiledQuery {
    /// Bind type of `name`, if it appears in the statement.
    pub fn param_type(&self, name: &str) -> Option<ParamType> {
        self.types.get(name).copied()
    }

    /// Distinct parameter names, in order of first appearance.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.placeholders
            .iter()
            .enumerate()
            .filter(|(i, name)| !self.placeholders[..*i].contains(name))
            .map(|(_, name)| name.as_str())
    }
}

/// Rewrite the named placeholders of `sql` into positional markers.
///
/// Every `:name` (optionally prefixed by one of `s b i l f d t`) becomes `?`.
/// The first occurrence of a name fixes its type: later occurrences are still
/// bound, but their prefix is ignored. A character in front of `:` that is not
/// a type prefix stays in the output (`x:name` becomes `x?`). Nothing in here
/// fails, malformed SQL is rejected later by the driver.
pub fn compile(sql: &str) -> CompiledQuery {
    let mut placeholders = Vec::new();
    let mut types = HashMap::new();
    let sql = placeholder_regex().replace_all(sql, |captures: &Captures| {
        let name = &captures[2];
        if !types.contains_key(name) {
            let param_type = ParamType::from_prefix(&captures[1]).unwrap_or_default();
            types.insert(name.to_string(), param_type);
        }
        placeholders.push(name.to_string());
        POSITIONAL_MARKER
    });
    let sql = sql.into_owned();
    log::trace!("Compiled query with {} placeholders: {}", placeholders.len(), sql);
    CompiledQuery {
        sql,
        placeholders,
        types,
    }
}
