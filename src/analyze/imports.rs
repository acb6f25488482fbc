//! Static import extraction for ES modules.
//!
//! A text scan, not a parser: comments, string bodies and template literals
//! are blanked first, so only a quoted string directly following `import` or
//! `from` in live code counts. Specifiers are then read back from the
//! original text at the matched span. Dynamic `import()` calls and
//! `import.meta` are never reported.

use once_cell::sync::Lazy;
use regex::Regex;

// import x from 'a';  import {x, y as z} from "a";  import * as ns from 'a';  import 'a';
static IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)(?:^|[^\w$.])import(?:\s*[\w$*{}\s,]+?\s*from)?\s*['"]([^'"\n]+)['"]"#)
        .unwrap()
});

// export * from 'a';  export * as ns from 'a';  export {x, y} from 'a';
static EXPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)(?:^|[^\w$.])export\s*(?:\*(?:\s*as\s+[\w$]+)?|\{[^}]*\})\s*from\s*['"]([^'"\n]+)['"]"#,
    )
    .unwrap()
});

/// Statically declared import specifiers of `source`, in source order
pub fn extract_imports(source: &str) -> Vec<String> {
    let code = mask_non_code(source);

    // the mask keeps byte offsets, so spans index the original text
    let mut found: Vec<(usize, String)> = IMPORT_PATTERN
        .captures_iter(&code)
        .chain(EXPORT_PATTERN.captures_iter(&code))
        .filter_map(|cap| {
            let m = cap.get(1)?;
            let specifier = source.get(m.start()..m.end())?;
            Some((m.start(), specifier.to_string()))
        })
        .collect();

    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, specifier)| specifier).collect()
}

#[derive(Clone, Copy, PartialEq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Quoted(char),
    Template,
}

/// Blank comments, string bodies and template literals with spaces.
///
/// Quote characters and newlines are kept, and every character is replaced
/// by as many bytes as it occupied, so byte offsets match `source`.
pub fn mask_non_code(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::BlockComment;
                }
                '\'' | '"' => {
                    out.push(c);
                    state = State::Quoted(c);
                }
                '`' => {
                    out.push(c);
                    state = State::Template;
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                } else {
                    push_blank(&mut out, c);
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = State::Code;
                } else {
                    push_blank(&mut out, c);
                }
            }
            State::Quoted(quote) => {
                if c == '\\' {
                    out.push(' ');
                    if let Some(escaped) = chars.next() {
                        push_blank(&mut out, escaped);
                    }
                } else if c == quote {
                    out.push(c);
                    state = State::Code;
                } else if c == '\n' {
                    // unterminated literal
                    out.push('\n');
                    state = State::Code;
                } else {
                    push_blank(&mut out, c);
                }
            }
            State::Template => {
                if c == '\\' {
                    out.push(' ');
                    if let Some(escaped) = chars.next() {
                        push_blank(&mut out, escaped);
                    }
                } else if c == '`' {
                    out.push(c);
                    state = State::Code;
                } else {
                    push_blank(&mut out, c);
                }
            }
        }
    }

    out
}

fn push_blank(out: &mut String, c: char) {
    if c == '\n' {
        out.push('\n');
    } else {
        out.extend(std::iter::repeat(' ').take(c.len_utf8()));
    }
}
