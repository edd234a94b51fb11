//! Lexical rules per source language

use std::path::Path;

/// A string literal delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Opening and closing delimiter
    pub delim: &'static str,
    /// Whether a raw newline may appear inside the literal
    pub multiline: bool,
    /// Whether a backslash escapes the following character
    pub escapes: bool,
}

const fn quote(delim: &'static str, multiline: bool, escapes: bool) -> Quote {
    Quote {
        delim,
        multiline,
        escapes,
    }
}

/// Comment and string rules of one language family
#[derive(Debug, PartialEq, Eq)]
pub struct Syntax {
    pub name: &'static str,
    pub line_comments: &'static [&'static str],
    pub block_comment: Option<(&'static str, &'static str)>,
    /// Block comments nest (Rust)
    pub nested_blocks: bool,
    /// Line comments only start after whitespace or at the start of a line
    pub comment_needs_boundary: bool,
    /// Checked in order, so longer delimiters come first
    pub quotes: &'static [Quote],
    /// Quotes glued to a preceding word character are plain text
    pub quotes_need_boundary: bool,
    /// `r#"..."#` and `br"..."` literals
    pub raw_strings: bool,
    /// `'` opens a char literal only when it closes right away (lifetimes)
    pub char_or_lifetime: bool,
    /// `/` opens a regex literal where an operand is expected
    pub regex_literals: bool,
    /// Unquoted `url(...)` contents are literal text
    pub url_literals: bool,
    /// Prefix that looks like a line comment but is not (`#[` attributes)
    pub comment_exception: Option<&'static str>,
}

pub static PLAIN: Syntax = Syntax {
    name: "plain",
    line_comments: &[],
    block_comment: None,
    nested_blocks: false,
    comment_needs_boundary: false,
    quotes: &[],
    quotes_need_boundary: false,
    raw_strings: false,
    char_or_lifetime: false,
    regex_literals: false,
    url_literals: false,
    comment_exception: None,
};

pub static PYTHON: Syntax = Syntax {
    name: "python",
    line_comments: &["#"],
    block_comment: None,
    nested_blocks: false,
    comment_needs_boundary: false,
    quotes: &[
        quote("\"\"\"", true, true),
        quote("'''", true, true),
        quote("\"", false, true),
        quote("'", false, true),
    ],
    quotes_need_boundary: false,
    raw_strings: false,
    char_or_lifetime: false,
    regex_literals: false,
    url_literals: false,
    comment_exception: None,
};

pub static HASH: Syntax = Syntax {
    name: "hash",
    line_comments: &["#"],
    block_comment: None,
    nested_blocks: false,
    comment_needs_boundary: true,
    quotes: &[quote("\"", true, true), quote("'", true, false)],
    quotes_need_boundary: true,
    raw_strings: false,
    char_or_lifetime: false,
    regex_literals: false,
    url_literals: false,
    comment_exception: None,
};

pub static C_FAMILY: Syntax = Syntax {
    name: "c",
    line_comments: &["//"],
    block_comment: Some(("/*", "*/")),
    nested_blocks: false,
    comment_needs_boundary: false,
    quotes: &[quote("\"", false, true), quote("'", false, true)],
    quotes_need_boundary: false,
    raw_strings: false,
    char_or_lifetime: false,
    regex_literals: false,
    url_literals: false,
    comment_exception: None,
};

pub static RUST: Syntax = Syntax {
    name: "rust",
    line_comments: &["//"],
    block_comment: Some(("/*", "*/")),
    nested_blocks: true,
    comment_needs_boundary: false,
    quotes: &[quote("\"", true, true), quote("'", false, true)],
    quotes_need_boundary: false,
    raw_strings: true,
    char_or_lifetime: true,
    regex_literals: false,
    url_literals: false,
    comment_exception: None,
};

pub static PHP: Syntax = Syntax {
    name: "php",
    line_comments: &["//", "#"],
    block_comment: Some(("/*", "*/")),
    nested_blocks: false,
    comment_needs_boundary: false,
    quotes: &[quote("\"", true, true), quote("'", true, true)],
    quotes_need_boundary: false,
    raw_strings: false,
    char_or_lifetime: false,
    regex_literals: false,
    url_literals: false,
    comment_exception: Some("#["),
};

pub static JAVASCRIPT: Syntax = Syntax {
    name: "javascript",
    line_comments: &["//"],
    block_comment: Some(("/*", "*/")),
    nested_blocks: false,
    comment_needs_boundary: false,
    quotes: &[
        quote("`", true, true),
        quote("\"", false, true),
        quote("'", false, true),
    ],
    quotes_need_boundary: false,
    raw_strings: false,
    char_or_lifetime: false,
    regex_literals: true,
    url_literals: false,
    comment_exception: None,
};

pub static GO: Syntax = Syntax {
    name: "go",
    line_comments: &["//"],
    block_comment: Some(("/*", "*/")),
    nested_blocks: false,
    comment_needs_boundary: false,
    quotes: &[
        quote("`", true, false),
        quote("\"", false, true),
        quote("'", false, true),
    ],
    quotes_need_boundary: false,
    raw_strings: false,
    char_or_lifetime: false,
    regex_literals: false,
    url_literals: false,
    comment_exception: None,
};

pub static CSS: Syntax = Syntax {
    name: "css",
    line_comments: &[],
    block_comment: Some(("/*", "*/")),
    nested_blocks: false,
    comment_needs_boundary: false,
    quotes: &[quote("\"", false, true), quote("'", false, true)],
    quotes_need_boundary: false,
    raw_strings: false,
    char_or_lifetime: false,
    regex_literals: false,
    url_literals: true,
    comment_exception: None,
};

pub static SCSS: Syntax = Syntax {
    name: "scss",
    line_comments: &["//"],
    block_comment: Some(("/*", "*/")),
    nested_blocks: false,
    comment_needs_boundary: false,
    quotes: &[quote("\"", false, true), quote("'", false, true)],
    quotes_need_boundary: false,
    raw_strings: false,
    char_or_lifetime: false,
    regex_literals: false,
    url_literals: true,
    comment_exception: None,
};

pub static SQL: Syntax = Syntax {
    name: "sql",
    line_comments: &["--"],
    block_comment: Some(("/*", "*/")),
    nested_blocks: false,
    comment_needs_boundary: false,
    quotes: &[quote("'", true, false), quote("\"", true, false)],
    quotes_need_boundary: false,
    raw_strings: false,
    char_or_lifetime: false,
    regex_literals: false,
    url_literals: false,
    comment_exception: None,
};

impl Syntax {
    /// Pick the syntax for a file from its extension
    pub fn for_path(path: &Path) -> &'static Syntax {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "py" | "pyw" | "pyi" => &PYTHON,
            "sh" | "bash" | "zsh" | "toml" | "yaml" | "yml" | "r" | "rb" | "pl" | "cfg"
            | "conf" => &HASH,
            "c" | "h" | "cpp" | "hpp" | "cc" | "cxx" | "java" | "cs" | "kt" | "kts"
            | "swift" | "scala" | "dart" => &C_FAMILY,
            "php" => &PHP,
            "rs" => &RUST,
            "js" | "jsx" | "ts" | "tsx" | "mjs" | "cjs" => &JAVASCRIPT,
            "go" => &GO,
            "css" => &CSS,
            "scss" | "less" => &SCSS,
            "sql" => &SQL,
            _ => &PLAIN,
        }
    }
}
