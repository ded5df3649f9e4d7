// tests/render_roundtrip.rs

//! The display rendering of an argument should read back, through a real
//! POSIX shell, as the same argument (for the cases it is designed to
//! handle: metacharacters without quotes, and quotes without
//! metacharacters).

mod common;
use crate::common::{init_tracing, plain_options, sh, with_timeout};

use justrun::exec::render::{quote_arg, shell_command};
use justrun::execute;

async fn shell_reads_back(arg: &str) -> String {
    let script = format!("printf '[%s]' {}", quote_arg(arg));
    let out = with_timeout(execute(sh(&script), plain_options().with_quiet(true)))
        .await
        .unwrap_or_else(|e| panic!("shell rejected {script:?}: {e}"));
    out.stdout.unwrap()
}

#[tokio::test]
async fn rendered_arguments_survive_shell_tokenization() {
    init_tracing();

    let cases = [
        "plain",
        "a b",
        "two  spaces",
        "it's",
        "$HOME",
        "a && b",
        "semi;colon",
        "bang!",
        "pipe|x",
        r#"say "hi""#,
    ];

    for arg in cases {
        assert_eq!(shell_reads_back(arg).await, format!("[{arg}]"), "arg {arg:?}");
    }
}

#[test]
fn full_command_line_rendering() {
    let argv = ["git", "commit", "-m", "fix: it's done", "--author", "$USER"];
    assert_eq!(
        shell_command(&argv),
        r#"git commit -m "fix: it's done" --author '$USER'"#
    );
}
