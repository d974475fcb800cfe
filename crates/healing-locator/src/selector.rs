//! Selector synthesis. Every dynamic value placed into a selector goes
//! through [`escape_ident`].

use std::fmt::Write;

/// Escapes `value` for use as a single CSS identifier token, following the
/// `CSS.escape()` algorithm from CSSOM.
pub fn escape_ident(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    for (index, &ch) in chars.iter().enumerate() {
        let code = ch as u32;
        if ch == '\0' {
            out.push('\u{FFFD}');
        } else if (0x01..=0x1f).contains(&code)
            || code == 0x7f
            || (index == 0 && ch.is_ascii_digit())
            || (index == 1 && ch.is_ascii_digit() && chars[0] == '-')
        {
            let _ = write!(out, "\\{code:x} ");
        } else if index == 0 && ch == '-' && chars.len() == 1 {
            out.push_str("\\-");
        } else if code >= 0x80 || ch == '-' || ch == '_' || ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}

pub fn id_selector(id: &str) -> String {
    format!("#{}", escape_ident(id))
}

pub fn attribute_predicate(name: &str, value: &str) -> String {
    format!("[{}=\"{}\"]", escape_ident(name), escape_ident(value))
}

/// `.a.b.c` from class tokens, `None` when there are none.
pub fn class_selector<'a, I>(tokens: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let selector: String = tokens
        .into_iter()
        .filter(|token| !token.is_empty())
        .map(|token| format!(".{}", escape_ident(token)))
        .collect();
    (!selector.is_empty()).then_some(selector)
}

/// `tag:contains("text")`; the engine matches text as a substring.
pub fn text_selector(tag: &str, text: &str) -> String {
    format!("{}:contains(\"{}\")", escape_ident(tag), escape_ident(text))
}

/// `tag[k="v"]...`, `None` when no predicates are given.
pub fn attributes_selector<'n, 'v, I>(tag: &str, attributes: I) -> Option<String>
where
    I: IntoIterator<Item = (&'n str, &'v str)>,
{
    let predicates: String = attributes
        .into_iter()
        .map(|(name, value)| attribute_predicate(name, value))
        .collect();
    if predicates.is_empty() {
        return None;
    }
    Some(format!("{}{}", escape_ident(tag), predicates))
}
