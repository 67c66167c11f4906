//! Regex compilation for the configurable extraction patterns.

use authgraph_core::errors::ParseError;
use regex::Regex;

/// Compile `pattern`, requiring at least `groups` capture groups.
pub fn compile(pattern: &str, groups: usize) -> Result<Regex, ParseError> {
    let regex = Regex::new(pattern).map_err(|e| ParseError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    // captures_len includes the implicit group 0.
    if regex.captures_len() <= groups {
        return Err(ParseError::MissingCaptureGroup {
            pattern: pattern.to_string(),
            required: groups,
        });
    }
    Ok(regex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_counts_explicit_groups() {
        assert!(compile("a(b)", 1).is_ok());
        assert!(matches!(
            compile("ab", 1),
            Err(ParseError::MissingCaptureGroup { required: 1, .. })
        ));
        assert!(matches!(compile("a(", 1), Err(ParseError::InvalidPattern { .. })));
    }
}
