//! Identifier conversion for generated Rust code.
//!
//! Schema names are free-form; everything emitted as a Rust identifier goes
//! through this module so that the result is always a valid identifier.

/// Rust keywords and reserved words, strict and reserved for 2024.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Converts a string to snake_case.
///
/// Runs of capitals are kept together, so `HTTPServer` becomes `http_server`.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1);
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(char::is_ascii_lowercase),
                _ => false,
            };
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else if c.is_ascii_alphanumeric() {
            result.push(c);
        } else if !result.is_empty() && !result.ends_with('_') {
            result.push('_');
        }
    }

    if result.ends_with('_') && result.len() > 1 {
        result.pop();
    }
    result
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if !c.is_ascii_alphanumeric() {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Converts a string to SCREAMING_SNAKE_CASE.
#[must_use]
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_ascii_uppercase()
}

/// Returns the identifier for a field, parameter or module named `name`.
///
/// Keywords become raw identifiers (`r#type`); the few keywords that cannot
/// be raw get a trailing underscore instead.
#[must_use]
pub fn field_ident(name: &str) -> String {
    let ident = sanitize(to_snake_case(name));
    escape_keyword(ident)
}

/// Returns the identifier for a type named `name`.
#[must_use]
pub fn type_ident(name: &str) -> String {
    let ident = sanitize(to_pascal_case(name));
    escape_keyword(ident)
}

/// Returns the module identifier of a namespace.
#[must_use]
pub fn module_ident(namespace: &str) -> String {
    field_ident(namespace)
}

/// Returns the name of the tag constant for `variant` of `owner`.
#[must_use]
pub fn tag_const(owner: &str, variant: &str) -> String {
    sanitize(format!(
        "{}_{}",
        to_screaming_snake_case(owner),
        to_screaming_snake_case(variant)
    ))
}

/// Returns the name of the interface trait of a polymorphic record.
#[must_use]
pub fn marker_trait(record: &str) -> String {
    format!("Is{}", type_ident(record))
}

/// Returns the name of the union container of a polymorphic record.
#[must_use]
pub fn family_union(record: &str) -> String {
    format!("{}Union", type_ident(record))
}

/// Returns the identifier text without a raw prefix.
#[must_use]
pub fn unraw(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

fn sanitize(ident: String) -> String {
    if ident.chars().all(|c| c == '_') {
        return "_unnamed".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{ident}");
    }
    ident
}

fn escape_keyword(ident: String) -> String {
    if NON_RAW_KEYWORDS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else if KEYWORDS.contains(&ident.as_str()) {
        format!("r#{ident}")
    } else {
        ident
    }
}
