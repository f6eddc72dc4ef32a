use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

// ESC, a Fe byte, parameter bytes, intermediate bytes, one final byte.
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B[@-_][0-?]*[ -/]*[@-~]").expect("ANSI escape pattern is valid")
});

pub fn sanitize(line: &str) -> Cow<'_, str> {
    let mut out = ANSI_ESCAPE.replace_all(line, "");
    // Dropping one sequence can join the halves of another.
    while ANSI_ESCAPE.is_match(&out) {
        out = Cow::Owned(ANSI_ESCAPE.replace_all(&out, "").into_owned());
    }
    out
}

pub fn sanitize_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter(|line| !line.as_ref().is_empty())
        .map(|line| sanitize(line.as_ref()).into_owned())
        .collect()
}
