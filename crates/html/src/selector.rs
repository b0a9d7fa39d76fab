//! Compound selectors: `tag`, `#id`, `.class`, `[attr]`, `[attr="value"]` and any
//! combination of them without whitespace, e.g. `details.folder` or `a[data-spa]`.
//! Combinators and pseudo-classes are not supported.

use crate::types::ElementData;
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unsupported selector syntax at byte {at} in {input:?}")]
    Unsupported { input: String, at: usize },
    #[error("unterminated attribute selector in {0:?}")]
    UnterminatedAttribute(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut ident = String::new();
    while let Some((_, c)) = chars.next_if(|&(_, c)| is_ident_char(c)) {
        ident.push(c);
    }
    ident
}

impl Selector {
    pub fn tag(name: &str) -> Self {
        Self {
            tag: Some(name.to_ascii_lowercase()),
            ..Self::default()
        }
    }

    pub fn class(name: &str) -> Self {
        Self::default().and_class(name)
    }

    pub fn id(name: &str) -> Self {
        Self {
            id: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn and_class(mut self, name: &str) -> Self {
        self.classes.push(name.to_string());
        self
    }

    pub fn and_attr(mut self, name: &str, value: Option<&str>) -> Self {
        self.attributes
            .push((name.to_ascii_lowercase(), value.map(str::to_string)));
        self
    }

    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut selector = Selector::default();
        let mut chars = s.char_indices().peekable();
        while let Some(&(at, c)) = chars.peek() {
            let unsupported = || SelectorError::Unsupported {
                input: s.to_string(),
                at,
            };
            match c {
                '#' | '.' => {
                    chars.next();
                    let ident = take_ident(&mut chars);
                    if ident.is_empty() {
                        return Err(unsupported());
                    }
                    if c == '#' {
                        selector.id = Some(ident);
                    } else {
                        selector.classes.push(ident);
                    }
                }
                '[' => {
                    chars.next();
                    let body_start = at + 1;
                    let Some(close) = s[body_start..].find(']') else {
                        return Err(SelectorError::UnterminatedAttribute(s.to_string()));
                    };
                    let body = &s[body_start..body_start + close];
                    let (name, value) = match body.split_once('=') {
                        Some((n, v)) => {
                            let v = v.trim();
                            let v = v
                                .strip_prefix('"')
                                .and_then(|v| v.strip_suffix('"'))
                                .or_else(|| v.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                                .unwrap_or(v);
                            (n.trim(), Some(v.to_string()))
                        }
                        None => (body.trim(), None),
                    };
                    if name.is_empty() || !name.chars().all(is_ident_char) {
                        return Err(unsupported());
                    }
                    selector
                        .attributes
                        .push((name.to_ascii_lowercase(), value));
                    while chars.next_if(|&(i, _)| i <= body_start + close).is_some() {}
                }
                c if is_ident_char(c) && selector.tag.is_none() && at == 0 => {
                    selector.tag = Some(take_ident(&mut chars).to_ascii_lowercase());
                }
                '*' if at == 0 => {
                    chars.next();
                }
                _ => return Err(unsupported()),
            }
        }
        Ok(selector)
    }

    pub fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !element.name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attributes.iter().all(|(name, want)| match want {
            None => element.has_attr(name),
            Some(want) => element.attr(name) == Some(want.as_str()),
        })
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}
