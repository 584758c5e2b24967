//! Simple element selectors
//!
//! Supports `tag`, `.class`, `#id`, `tag.class`, `tag#id` and
//! comma-separated groups of those.

use std::fmt;

use super::{Result, ValidatorError};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    class: Option<String>,
    id: Option<String>,
}

impl Compound {
    fn parse(raw: &str) -> Result<Self> {
        let invalid = || ValidatorError::InvalidSelector(raw.to_string());

        let (tag, rest) = match raw.find(&['.', '#'][..]) {
            Some(idx) => (&raw[..idx], &raw[idx..]),
            None => (raw, ""),
        };

        let mut compound = Compound {
            tag: None,
            class: None,
            id: None,
        };
        if !tag.is_empty() {
            if !is_ident(tag) {
                return Err(invalid());
            }
            compound.tag = Some(tag.to_ascii_lowercase());
        }

        if let Some(class) = rest.strip_prefix('.') {
            if !is_ident(class) {
                return Err(invalid());
            }
            compound.class = Some(class.to_string());
        } else if let Some(id) = rest.strip_prefix('#') {
            if !is_ident(id) {
                return Err(invalid());
            }
            compound.id = Some(id.to_string());
        }

        if compound.tag.is_none() && compound.class.is_none() && compound.id.is_none() {
            return Err(invalid());
        }
        Ok(compound)
    }

    fn matches(&self, tag: &str, class_attr: Option<&str>, id_attr: Option<&str>) -> bool {
        if let Some(expected) = &self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(expected) = &self.class {
            let found = class_attr
                .map(|c| c.split_whitespace().any(|c| c == expected))
                .unwrap_or(false);
            if !found {
                return false;
            }
        }
        if let Some(expected) = &self.id {
            if id_attr != Some(expected.as_str()) {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{tag}")?;
        }
        if let Some(class) = &self.class {
            write!(f, ".{class}")?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        Ok(())
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Parsed selector group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    pub fn parse(raw: &str) -> Result<Self> {
        let alternatives = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Compound::parse)
            .collect::<Result<Vec<_>>>()?;

        if alternatives.is_empty() {
            return Err(ValidatorError::InvalidSelector(raw.to_string()));
        }
        Ok(Self { alternatives })
    }

    /// Does an element with this tag, `class` and `id` match?
    pub fn matches(&self, tag: &str, class_attr: Option<&str>, id_attr: Option<&str>) -> bool {
        self.alternatives
            .iter()
            .any(|c| c.matches(tag, class_attr, id_attr))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, compound) in self.alternatives.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{compound}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_selector() {
        let selector = Selector::parse("a").unwrap();
        assert!(selector.matches("a", None, None));
        assert!(selector.matches("A", None, None));
        assert!(!selector.matches("span", None, None));
    }

    #[test]
    fn test_class_and_id() {
        let selector = Selector::parse("span.menu-label").unwrap();
        assert!(selector.matches("span", Some("item menu-label"), None));
        assert!(!selector.matches("span", Some("menu-label-x"), None));
        assert!(!selector.matches("div", Some("menu-label"), None));

        let selector = Selector::parse("#footer").unwrap();
        assert!(selector.matches("nav", None, Some("footer")));
        assert!(!selector.matches("nav", None, Some("header")));
    }

    #[test]
    fn test_group() {
        let selector = Selector::parse("a.nav, span.label").unwrap();
        assert!(selector.matches("a", Some("nav"), None));
        assert!(selector.matches("span", Some("label"), None));
        assert_eq!(selector.to_string(), "a.nav, span.label");
    }

    #[test]
    fn test_invalid() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("header nav a").is_err());
        assert!(Selector::parse("a.").is_err());
        assert!(Selector::parse("a[href]").is_err());
    }
}
