//! Identifier and literal rendering.
//!
//! Identifiers (tables, columns) are wrapped in backticks and literals in
//! single quotes. Neither function escapes anything: text reaching them has
//! already been through a [`Sanitizer`](crate::sanitize::Sanitizer).

/// Append `` `name` `` to `out`.
pub(crate) fn write_ident(out: &mut String, name: &str) {
    out.reserve(name.len() + 2);
    out.push('`');
    out.push_str(name);
    out.push('`');
}

/// Append `'value'` to `out`.
pub(crate) fn write_literal(out: &mut String, value: &str) {
    out.reserve(value.len() + 2);
    out.push('\'');
    out.push_str(value);
    out.push('\'');
}

/// Render a backtick-quoted identifier.
pub fn quote_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    write_ident(&mut out, name);
    out
}

/// Render a single-quoted literal.
pub fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    write_literal(&mut out, value);
    out
}

/// Append `items` to `out`, each written by `write`, separated by `", "`.
pub(crate) fn write_comma_list<'a, I>(out: &mut String, items: I, write: fn(&mut String, &str))
where
    I: IntoIterator<Item = &'a str>,
{
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write(out, item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_backticks() {
        assert_eq!(quote_ident("Users"), "`Users`");
    }

    #[test]
    fn literal_quotes() {
        assert_eq!(quote_literal("Amy"), "'Amy'");
        assert_eq!(quote_literal(""), "''");
    }

    #[test]
    fn comma_list() {
        let mut out = String::new();
        write_comma_list(&mut out, ["id", "name"], write_ident);
        assert_eq!(out, "`id`, `name`");
    }
}
