//! Positional placeholder substitution.

/// Expand `{0}`, `{1}`, ... tokens in a template with the given
/// arguments.
///
/// A token whose index has no matching argument is left literal, as are
/// non-numeric braces like `{name}` or `{}`. There is no escape syntax.
pub fn expand(template: &str, args: &[&str]) -> String {
    if args.is_empty() || !template.contains('{') {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        match tail.find('}') {
            Some(close) => {
                let token = &tail[1..close];
                let is_index = !token.is_empty() && token.chars().all(|c| c.is_ascii_digit());
                let arg = if is_index {
                    token.parse::<usize>().ok().and_then(|i| args.get(i))
                } else {
                    None
                };
                match arg {
                    Some(arg) => out.push_str(arg),
                    None => out.push_str(&tail[..=close]),
                }
                rest = &tail[close + 1..];
            }
            None => {
                // Unclosed brace, keep the remainder verbatim.
                out.push_str(tail);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
