// src/exec/render.rs

//! Human-readable rendering of an argument vector.
//!
//! The result is meant for display (the `> cmd args` banner and error
//! messages). It is close to what one would type into a POSIX shell, but it
//! is not a guarantee of safe re-execution.

use std::sync::LazyLock;

use regex::Regex;

static SHELL_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[&|;!$"\\]"#).expect("static regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s").expect("static regex"));
static SINGLE_QUOTE_OR_BACKSLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"['\\]").expect("static regex"));

/// Render one argument.
///
/// - shell metacharacters (`& | ; ! $ " \`) → single-quoted, with `'` and
///   `\` escaped by a backslash;
/// - whitespace or `'` → double-quoted as-is;
/// - anything else → unchanged.
pub fn quote_arg(arg: &str) -> String {
    if SHELL_CHARS.is_match(arg) {
        let escaped = SINGLE_QUOTE_OR_BACKSLASH.replace_all(arg, r"\$0");
        format!("'{escaped}'")
    } else if WHITESPACE.is_match(arg) || arg.contains('\'') {
        format!("\"{arg}\"")
    } else {
        arg.to_owned()
    }
}

/// Render a whole argument vector, joined with single spaces.
pub fn shell_command<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|a| quote_arg(a.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
