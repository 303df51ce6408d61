use ohno::AppError;

/// Render a star count the way the console summary shows it: `12.3k` above 1000, plain below.
///
/// Halves round up, so 1250 is `1.3k`.
#[must_use]
pub fn format_stars(stars: u64) -> String {
    if stars > 1000 {
        let tenths = stars / 100 + u64::from(stars % 100 >= 50);
        format!("{}.{}k", tenths / 10, tenths % 10)
    } else {
        stars.to_string()
    }
}

/// One-line rendering of an error for the console: the most recent context first, the
/// underlying cause last, no locations and no backtrace.
#[must_use]
pub fn error_line(error: &AppError) -> String {
    summarize_error_text(&error.to_string())
}

fn summarize_error_text(text: &str) -> String {
    let text = text.split_once("\n\nBacktrace:").map_or(text, |(head, _)| head);

    let mut cause = Vec::new();
    let mut context = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match line.strip_prefix("> ") {
            Some(entry) => context.push(entry.rsplit_once(" (at ").map_or(entry, |(message, _)| message)),
            None => cause.push(line),
        }
    }

    context.reverse();
    let cause = cause.join(" ");
    if !cause.is_empty() {
        context.push(&cause);
    }

    context.join(": ")
}

/// `OK` or `FAIL`.
#[must_use]
pub const fn status(ok: bool) -> &'static str {
    if ok { "OK" } else { "FAIL" }
}
