//! A small subset of CSS selectors: tag, `.class`, `#id` and attribute
//! tests, joined into compounds and comma-separated groups.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::document::Element;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected {found:?} at offset {offset}")]
    Unexpected { found: char, offset: usize },
    #[error("unterminated attribute selector")]
    Unterminated,
    #[error("expected a name at offset {offset}")]
    MissingName { offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Tag(String),
    Class(String),
    Id(String),
    Attr { name: String, op: AttrOp },
}

impl Part {
    fn matches(&self, element: &Element) -> bool {
        match self {
            Part::Tag(tag) => element.tag.eq_ignore_ascii_case(tag),
            Part::Class(class) => element.has_class(class),
            Part::Id(id) => element.id.as_deref() == Some(id.as_str()),
            Part::Attr { name, op } => match (element.attr(name), op) {
                (None, _) => false,
                (Some(_), AttrOp::Exists) => true,
                (Some(value), AttrOp::Equals(expected)) => value == expected,
                (Some(value), AttrOp::Prefix(prefix)) => value.starts_with(prefix.as_str()),
            },
        }
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    groups: Vec<Vec<Part>>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut groups = Vec::new();
        let mut base = 0;
        for group in source.split(',') {
            groups.push(parse_compound(group, base)?);
            base += group.len() + 1;
        }
        Ok(Self {
            source: source.to_string(),
            groups,
        })
    }

    /// True if any group matches the element.
    pub fn matches(&self, element: &Element) -> bool {
        self.groups
            .iter()
            .any(|parts| parts.iter().all(|part| part.matches(element)))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(group: &str, base: usize) -> Result<Vec<Part>, SelectorError> {
    let trimmed_start = group.len() - group.trim_start().len();
    let text = group.trim();
    if text.is_empty() {
        return Err(SelectorError::Empty);
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let offset_of = |i: usize| {
        base + trimmed_start + chars.get(i).map_or(text.len(), |&(byte, _)| byte)
    };
    let read_name = |mut i: usize| {
        let start = i;
        let mut name = String::new();
        while let Some(&(_, c)) = chars.get(i) {
            if !is_name_char(c) {
                break;
            }
            name.push(c);
            i += 1;
        }
        if name.is_empty() {
            Err(SelectorError::MissingName {
                offset: offset_of(start),
            })
        } else {
            Ok((name, i))
        }
    };

    let mut parts = Vec::new();
    let mut i = 0;
    while let Some(&(_, c)) = chars.get(i) {
        match c {
            '.' => {
                let (name, next) = read_name(i + 1)?;
                parts.push(Part::Class(name));
                i = next;
            }
            '#' => {
                let (name, next) = read_name(i + 1)?;
                parts.push(Part::Id(name));
                i = next;
            }
            '[' => {
                let close = chars[i..]
                    .iter()
                    .position(|&(_, c)| c == ']')
                    .map(|p| i + p)
                    .ok_or(SelectorError::Unterminated)?;
                let (name, next) = read_name(i + 1)?;
                let rest: String = chars[next..close].iter().map(|&(_, c)| c).collect();
                let op = parse_attr_op(rest.trim(), offset_of(next))?;
                parts.push(Part::Attr { name, op });
                i = close + 1;
            }
            c if is_name_char(c) && parts.is_empty() => {
                let (name, next) = read_name(i)?;
                parts.push(Part::Tag(name));
                i = next;
            }
            found => {
                return Err(SelectorError::Unexpected {
                    found,
                    offset: offset_of(i),
                });
            }
        }
    }
    Ok(parts)
}

fn parse_attr_op(rest: &str, offset: usize) -> Result<AttrOp, SelectorError> {
    if rest.is_empty() {
        return Ok(AttrOp::Exists);
    }
    let (prefix_match, value) = if let Some(value) = rest.strip_prefix("^=") {
        (true, value)
    } else if let Some(value) = rest.strip_prefix('=') {
        (false, value)
    } else {
        let found = rest.chars().next().unwrap_or(']');
        return Err(SelectorError::Unexpected { found, offset });
    };
    let value = unquote(value.trim());
    Ok(if prefix_match {
        AttrOp::Prefix(value)
    } else {
        AttrOp::Equals(value)
    })
}

fn unquote(value: &str) -> String {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str, id: Option<&str>, classes: &[&str], attrs: &[(&str, &str)]) -> Element {
        let mut el = Element::new(tag);
        el.id = id.map(str::to_string);
        for class in classes {
            el.classes.insert(class.to_string());
        }
        for (k, v) in attrs {
            el.attrs.insert(k.to_string(), v.to_string());
        }
        el
    }

    #[test]
    fn test_class_list() {
        let sel = Selector::parse(".stat-card, .timeline-item,.github-card").unwrap();
        assert!(sel.matches(&element("div", None, &["timeline-item"], &[])));
        assert!(sel.matches(&element("div", None, &["github-card", "x"], &[])));
        assert!(!sel.matches(&element("div", None, &["stat-number"], &[])));
    }

    #[test]
    fn test_compound_with_attribute() {
        let sel = Selector::parse(".stat-number[data-target]").unwrap();
        assert!(sel.matches(&element("p", None, &["stat-number"], &[("data-target", "12")])));
        assert!(!sel.matches(&element("p", None, &["stat-number"], &[])));
        assert!(!sel.matches(&element("p", None, &[], &[("data-target", "12")])));
    }

    #[test]
    fn test_anchor_prefix() {
        let sel = Selector::parse(r##"a[href^="#"]"##).unwrap();
        assert!(sel.matches(&element("a", None, &[], &[("href", "#timeline")])));
        assert!(!sel.matches(&element("a", None, &[], &[("href", "https://example.com")])));
        assert!(!sel.matches(&element("p", None, &[], &[("href", "#timeline")])));
    }

    #[test]
    fn test_id_and_equals() {
        let sel = Selector::parse("#hero, [role='banner']").unwrap();
        assert!(sel.matches(&element("div", Some("hero"), &[], &[])));
        assert!(sel.matches(&element("div", None, &[], &[("role", "banner")])));
        assert!(!sel.matches(&element("div", None, &[], &[("role", "main")])));
    }

    #[test]
    fn test_errors() {
        assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
        assert_eq!(Selector::parse(".a,"), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("[href"), Err(SelectorError::Unterminated));
        assert_eq!(
            Selector::parse(".a > .b"),
            Err(SelectorError::Unexpected {
                found: ' ',
                offset: 2
            })
        );
        assert_eq!(
            Selector::parse(". a"),
            Err(SelectorError::MissingName { offset: 1 })
        );
    }
}
