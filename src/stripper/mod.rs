//! Comment stripping
//!
//! Source text is tokenized with the lexical rules of its language, comment
//! tokens are dropped and the remaining tokens are stitched back together.
//! Working on tokens rather than raw text keeps comment markers that live
//! inside string literals untouched.

mod lexer;
mod syntax;

pub use lexer::{Lexer, Token, TokenKind};
pub use syntax::Syntax;

use std::path::Path;

use thiserror::Error;

/// Errors raised while tokenizing a file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StripError {
    /// A string literal is still open at the end of its line or file
    #[error("unterminated string literal starting on line {line}")]
    UnterminatedString { line: usize },

    /// A block comment is still open at the end of the file
    #[error("unterminated block comment starting on line {line}")]
    UnterminatedComment { line: usize },
}

/// Remove comments from a file and return its non-blank lines
///
/// The language is chosen from the file extension. Lines left empty by the
/// removal are dropped, except blank lines inside multi-line string
/// literals, which are part of the literal's value.
pub fn strip(path: &Path, text: &str) -> Result<Vec<String>, StripError> {
    strip_with(Syntax::for_path(path), text)
}

/// Remove comments using an explicit syntax
pub fn strip_with(syntax: &'static Syntax, text: &str) -> Result<Vec<String>, StripError> {
    let tokens = Lexer::new(text, syntax).tokenize()?;
    Ok(reassemble(&tokens))
}

/// Raw lines of a file with line terminators removed
pub fn raw_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

struct Line {
    text: String,
    /// Starts inside a string literal, so it is kept even when blank
    in_literal: bool,
}

fn reassemble(tokens: &[Token<'_>]) -> Vec<String> {
    let mut lines: Vec<Line> = Vec::new();
    let mut current = Line {
        text: String::new(),
        in_literal: false,
    };

    for (idx, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Newline => {
                let finished = std::mem::replace(
                    &mut current,
                    Line {
                        text: String::new(),
                        in_literal: false,
                    },
                );
                lines.push(finished);
            }
            TokenKind::Str => {
                let mut segments = token.text.split('\n');
                if let Some(first) = segments.next() {
                    current.text.push_str(first);
                }
                for segment in segments {
                    let finished = std::mem::replace(
                        &mut current,
                        Line {
                            text: segment.to_string(),
                            in_literal: true,
                        },
                    );
                    lines.push(finished);
                }
            }
            TokenKind::Comment => {
                let trimmed = current.text.trim_end_matches([' ', '\t']).len();
                current.text.truncate(trimmed);

                // Keep `a/**/b` from fusing into `ab`
                let next_is_code = tokens
                    .get(idx + 1)
                    .is_some_and(|t| matches!(t.kind, TokenKind::Code | TokenKind::Str));
                if next_is_code && !current.text.is_empty() {
                    current.text.push(' ');
                }
            }
            TokenKind::Code | TokenKind::Whitespace => current.text.push_str(token.text),
        }
    }
    lines.push(current);

    lines
        .into_iter()
        .map(|mut line| {
            if line.text.ends_with('\r') {
                line.text.pop();
            }
            line
        })
        .filter(|line| line.in_literal || !line.text.trim().is_empty())
        .map(|line| line.text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_as(name: &str, text: &str) -> Vec<String> {
        strip(Path::new(name), text).unwrap()
    }

    #[test]
    fn test_python_comments_removed() {
        let src = "#!/usr/bin/env python3\n\
                   # module comment\n\
                   import os  # trailing\n\
                   \n\
                   def f():\n\
                   \x20   # indented comment\n\
                   \x20   return 1\n";
        assert_eq!(
            strip_as("a.py", src),
            vec!["import os", "def f():", "    return 1"]
        );
    }

    #[test]
    fn test_hash_in_string_literal_survives() {
        let src = "color = \"#ff0000\"  # red\nurl = 'http://x/#frag'\n";
        assert_eq!(
            strip_as("a.py", src),
            vec!["color = \"#ff0000\"", "url = 'http://x/#frag'"]
        );
    }

    #[test]
    fn test_docstring_keeps_blank_lines() {
        let src = "def f():\n    \"\"\"Summary.\n\n    # not a comment\n    \"\"\"\n    return 1\n";
        assert_eq!(
            strip_as("a.py", src),
            vec![
                "def f():",
                "    \"\"\"Summary.",
                "",
                "    # not a comment",
                "    \"\"\"",
                "    return 1",
            ]
        );
    }

    #[test]
    fn test_c_style_block_comments() {
        let src = "int a = 1; /* one\n two */\nint b = a/**/+1; // tail\nchar *s = \"/* kept */\";\n";
        assert_eq!(
            strip_as("x.c", src),
            vec!["int a = 1;", "int b = a +1;", "char *s = \"/* kept */\";"]
        );
    }

    #[test]
    fn test_rust_nested_comments_and_lifetimes() {
        let src = "/* outer /* inner */ still comment */\n\
                   fn f<'a>(s: &'a str) -> char { // note\n\
                   \x20   let url = \"http://example.com\";\n\
                   \x20   '/'\n\
                   }\n";
        assert_eq!(
            strip_as("lib.rs", src),
            vec![
                "fn f<'a>(s: &'a str) -> char {",
                "    let url = \"http://example.com\";",
                "    '/'",
                "}",
            ]
        );
    }

    #[test]
    fn test_shell_hash_needs_word_boundary() {
        let src = "echo ${#arr[@]} # count\nmsg=don't#go\n";
        assert_eq!(
            strip_as("run.sh", src),
            vec!["echo ${#arr[@]}", "msg=don't#go"]
        );
    }

    #[test]
    fn test_javascript_regex_literals_survive() {
        let src = "const u = s.replace(/^https?:\\/\\//, '');\nconst n = 1;\n";
        assert_eq!(
            strip_as("a.js", src),
            vec!["const u = s.replace(/^https?:\\/\\//, '');", "const n = 1;"]
        );

        let src = "const re = /[/*]/g;\nfoo();\n/** doc */\nbar();\n";
        assert_eq!(
            strip_as("a.js", src),
            vec!["const re = /[/*]/g;", "foo();", "bar();"]
        );
    }

    #[test]
    fn test_javascript_division_and_comments() {
        let src = "const half = total / 2; // note\nreturn /x/.test(s); /* why */\n";
        assert_eq!(
            strip_as("a.ts", src),
            vec!["const half = total / 2;", "return /x/.test(s);"]
        );
    }

    #[test]
    fn test_scss_unquoted_url_survives() {
        let src = ".a { background: url(http://example.com/a.png); } // tail\n";
        assert_eq!(
            strip_as("a.scss", src),
            vec![".a { background: url(http://example.com/a.png); }"]
        );

        let src = ".b { src: url(\"//cdn.example.com/f.woff\"); /* font */ }\n";
        assert_eq!(
            strip_as("a.css", src),
            vec![".b { src: url(\"//cdn.example.com/f.woff\"); }"]
        );
    }

    #[test]
    fn test_php_hash_comments_and_attributes() {
        let src = "<?php\n#[Route('/x')]\nfunction f() {} # done\n// gone\n$a = 1;\n";
        assert_eq!(
            strip_as("index.php", src),
            vec!["<?php", "#[Route('/x')]", "function f() {}", "$a = 1;"]
        );
    }

    #[test]
    fn test_crlf_input() {
        let src = "x = 1  # c\r\n\r\ny = 2\r\n";
        assert_eq!(strip_as("a.py", src), vec!["x = 1", "y = 2"]);
    }

    #[test]
    fn test_plain_files_only_lose_blank_lines() {
        let src = "# Title\n\nSome text // not code\n";
        assert_eq!(
            strip_as("README.md", src),
            vec!["# Title", "Some text // not code"]
        );
    }

    #[test]
    fn test_unterminated_literals_are_errors() {
        let err = strip(Path::new("a.py"), "x = \"\"\"never closed\n").unwrap_err();
        assert_eq!(err, StripError::UnterminatedString { line: 1 });

        let err = strip(Path::new("a.c"), "int x;\n/* open\n").unwrap_err();
        assert_eq!(err, StripError::UnterminatedComment { line: 2 });
    }

    #[test]
    fn test_raw_lines_keep_blank_lines() {
        assert_eq!(raw_lines("a\n\n# c\r\n"), vec!["a", "", "# c"]);
    }
}
