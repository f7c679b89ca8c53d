//! Conversions between masked (storage) and plain (display) component text.
//!
//! A masked component marks every literal escape character and every literal
//! delimiter with a preceding [`ESCAPE_CHARACTER`]. Both component stores go
//! through these functions so they split, join and unescape identically.

pub const ESCAPE_CHARACTER: char = '\\';

/// Delimiter of the canonical data string, independent of any name's own delimiter.
pub const DEFAULT_DELIMITER: char = '.';

/// A delimiter equal to the escape character would make masking ambiguous.
pub fn is_valid_delimiter(delimiter: char) -> bool {
    delimiter != ESCAPE_CHARACTER
}

pub fn unmask(masked: &str) -> String {
    let mut result = String::with_capacity(masked.len());
    let mut chars = masked.chars();

    while let Some(ch) = chars.next() {
        if ch == ESCAPE_CHARACTER {
            // A lone escape at the very end stands for itself
            result.push(chars.next().unwrap_or(ESCAPE_CHARACTER));
        } else {
            result.push(ch);
        }
    }

    result
}

pub fn remask(plain: &str, delimiter: char) -> String {
    let mut result = String::with_capacity(plain.len() * 2);

    for ch in plain.chars() {
        if ch == ESCAPE_CHARACTER || ch == delimiter {
            result.push(ESCAPE_CHARACTER);
        }
        result.push(ch);
    }

    result
}

/// Splits `source` at every unescaped `delimiter`, keeping escape sequences intact.
///
/// The result always holds `1 + (number of unescaped delimiters)` components, so
/// the empty string yields a single empty component. A trailing lone escape is
/// absorbed into the final component.
pub fn split_masked(source: &str, delimiter: char) -> Vec<String> {
    let mut components = Vec::new();
    let mut current = String::new();
    let mut chars = source.chars();

    while let Some(ch) = chars.next() {
        if ch == ESCAPE_CHARACTER {
            current.push(ch);
            if let Some(next) = chars.next() {
                current.push(next);
            }
        } else if ch == delimiter {
            components.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    components.push(current);

    components
}

pub fn count_masked(source: &str, delimiter: char) -> usize {
    let mut count = 1;
    let mut chars = source.chars();

    while let Some(ch) = chars.next() {
        if ch == ESCAPE_CHARACTER {
            chars.next();
        } else if ch == delimiter {
            count += 1;
        }
    }

    count
}

pub fn join_masked<S: AsRef<str>>(components: &[S], delimiter: char) -> String {
    let mut result = String::new();

    for (i, component) in components.iter().enumerate() {
        if i > 0 {
            result.push(delimiter);
        }
        result.push_str(component.as_ref());
    }

    result
}

pub fn has_dangling_escape(masked: &str) -> bool {
    let mut chars = masked.chars();

    while let Some(ch) = chars.next() {
        if ch == ESCAPE_CHARACTER && chars.next().is_none() {
            return true;
        }
    }

    false
}

/// A well-formed component has no unescaped delimiter and no dangling escape,
/// so joining it with its neighbours never changes the component count.
pub fn is_well_formed(masked: &str, delimiter: char) -> bool {
    let mut chars = masked.chars();

    while let Some(ch) = chars.next() {
        if ch == ESCAPE_CHARACTER {
            if chars.next().is_none() {
                return false;
            }
        } else if ch == delimiter {
            return false;
        }
    }

    true
}

/// Turns a dangling trailing escape into an escaped escape.
///
/// The plain text is unchanged: `unmask(canonicalize(s)) == unmask(s)`.
pub fn canonicalize(masked: &str) -> String {
    let mut result = masked.to_string();
    if has_dangling_escape(masked) {
        result.push(ESCAPE_CHARACTER);
    }
    result
}
