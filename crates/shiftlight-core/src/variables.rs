//! Named integer variables
//!
//! Variables are declared one per line as `name=value`:
//!
//! ```text
//! # engine limits
//! idle=900
//! redline=6500
//! shift_point = 6200
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Names use the
//! characters `[a-zA-Z0-9_-]` and values must be in `0..=9999`.

use std::collections::BTreeMap;

use crate::error::VariableError;

/// Largest value a variable may hold
pub const MAX_VALUE: i32 = 9999;

/// Mapping from variable name to value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    vars: BTreeMap<String, i32>,
}

/// Check whether `name` is a syntactically valid variable name
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

impl VariableTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from declaration text
    ///
    /// The first malformed line aborts parsing and its error is returned.
    pub fn parse(text: &str) -> Result<Self, VariableError> {
        let mut table = Self::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (name, value) = parse_declaration(idx + 1, line)?;
            table.vars.insert(name, value);
        }

        log::debug!("variables: parsed {} declaration(s)", table.len());
        Ok(table)
    }

    /// Replace the contents of this table with the declarations in `text`
    ///
    /// The new table is built separately and swapped in only if every line
    /// parses; on error the current contents are left untouched.
    pub fn rebuild(&mut self, text: &str) -> Result<(), VariableError> {
        *self = Self::parse(text)?;
        Ok(())
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<i32> {
        self.vars.get(name).copied()
    }

    /// Define or overwrite a variable
    ///
    /// There is no source line here, so errors carry `line: 0`.
    pub fn set(&mut self, name: &str, value: i32) -> Result<(), VariableError> {
        if !is_valid_name(name) {
            return Err(VariableError::InvalidName {
                line: 0,
                name: name.to_string(),
            });
        }
        if !(0..=MAX_VALUE).contains(&value) {
            return Err(VariableError::ValueOutOfRange {
                line: 0,
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        self.vars.insert(name.to_string(), value);
        Ok(())
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the table has no variables
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Render the table back to declaration text, one `name=value` per line
    pub fn to_text(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{}={}\n", name, value))
            .collect()
    }
}

fn parse_declaration(line: usize, text: &str) -> Result<(String, i32), VariableError> {
    let malformed = || VariableError::MalformedDeclaration {
        line,
        text: text.to_string(),
    };

    let (name, value) = text.split_once('=').ok_or_else(malformed)?;
    let name = name.trim();
    let value = value.trim();

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    if !is_valid_name(name) {
        return Err(VariableError::InvalidName {
            line,
            name: name.to_string(),
        });
    }

    let out_of_range = || VariableError::ValueOutOfRange {
        line,
        name: name.to_string(),
        value: value.to_string(),
    };
    let parsed: i32 = value.parse().map_err(|_| out_of_range())?;
    if parsed > MAX_VALUE {
        return Err(out_of_range());
    }

    Ok((name.to_string(), parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations() {
        let text = "# limits\nidle=900\n\n  redline = 6500  \nshift-point_2=6200\n";
        let table = VariableTable::parse(text).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("idle"), Some(900));
        assert_eq!(table.get("redline"), Some(6500));
        assert_eq!(table.get("shift-point_2"), Some(6200));
        assert_eq!(table.get("missing"), None);
    }

    #[test]
    fn test_empty_text() {
        assert!(VariableTable::parse("").unwrap().is_empty());
        assert!(VariableTable::parse("  \n# only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(
            VariableTable::parse("a=1\nnot a declaration\n"),
            Err(VariableError::MalformedDeclaration { line: 2, .. })
        ));
        assert!(matches!(
            VariableTable::parse("a=-5"),
            Err(VariableError::MalformedDeclaration { line: 1, .. })
        ));
        assert!(matches!(
            VariableTable::parse("a=1+2"),
            Err(VariableError::MalformedDeclaration { .. })
        ));
        assert!(matches!(
            VariableTable::parse("bad name=5"),
            Err(VariableError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_value_range() {
        assert_eq!(VariableTable::parse("max=9999").unwrap().get("max"), Some(9999));
        assert!(matches!(
            VariableTable::parse("big=10000"),
            Err(VariableError::ValueOutOfRange { .. })
        ));
        assert!(matches!(
            VariableTable::parse("huge=99999999999999"),
            Err(VariableError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rebuild_keeps_old_table_on_error() {
        let mut table = VariableTable::parse("a=1\nb=2").unwrap();
        let err = table.rebuild("a=5\nc=oops");
        assert!(err.is_err());
        assert_eq!(table.get("a"), Some(1));
        assert_eq!(table.get("b"), Some(2));
        assert_eq!(table.get("c"), None);

        table.rebuild("c=3").unwrap();
        assert_eq!(table.get("a"), None);
        assert_eq!(table.get("c"), Some(3));
    }

    #[test]
    fn test_to_text() {
        let mut table = VariableTable::new();
        table.set("b", 2).unwrap();
        table.set("a", 1).unwrap();
        assert_eq!(table.to_text(), "a=1\nb=2\n");
        assert!(table.set("x y", 1).is_err());
        assert!(table.set("x", 10_000).is_err());
    }

    #[test]
    fn test_set_errors_have_no_line() {
        let mut table = VariableTable::new();
        assert_eq!(
            table.set("x y", 1),
            Err(VariableError::InvalidName {
                line: 0,
                name: "x y".to_string(),
            })
        );
        assert_eq!(
            table.set("x", -1),
            Err(VariableError::ValueOutOfRange {
                line: 0,
                name: "x".to_string(),
                value: "-1".to_string(),
            })
        );
        assert!(table.is_empty());
    }
}
