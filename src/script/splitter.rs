//! Batch splitter for SQL scripts.

/// Sentinel line separating independently executable batches.
pub const BATCH_DELIMITER: &str = "----NEXT----";

/// Splits a batch-delimited script into ordered commands.
///
/// Line-continuation escapes (a backslash immediately followed by `\n` or
/// `\r\n`) are removed first, joining the two physical lines without
/// inserting whitespace. Every line whose content equals [`BATCH_DELIMITER`]
/// (ASCII case-insensitive) then closes the current batch. The delimiter
/// line and the line break right before it are dropped; that break is
/// taken to be `\r\n` only when the delimiter line itself ends in `\r\n`
/// (or has no terminator and follows a `\r\n`).
///
/// Empty leading and trailing batches are kept as empty strings, so a
/// script without delimiters yields exactly one element and an empty
/// script yields `[""]`. Callers executing the result should skip
/// commands rejected by [`is_executable`].
#[must_use]
pub fn split(script: &str) -> Vec<String> {
    let joined = remove_line_continuations(script);
    let mut commands = Vec::new();
    let mut current = String::new();

    for line in joined.split_inclusive('\n') {
        if is_delimiter_line(line) {
            let mut finished = std::mem::take(&mut current);
            trim_trailing_line_break(&mut finished, line_ending(line));
            commands.push(finished);
        } else {
            current.push_str(line);
        }
    }

    commands.push(current);
    commands
}

/// Returns whether a split command carries anything to execute.
#[must_use]
pub fn is_executable(command: &str) -> bool {
    !command.trim().is_empty()
}

fn remove_line_continuations(script: &str) -> String {
    let mut output = String::with_capacity(script.len());
    let mut chars = script.chars().peekable();

    while let Some(character) = chars.next() {
        if character == '\\' {
            if chars.next_if_eq(&'\n').is_some() {
                continue;
            }
            if chars.peek() == Some(&'\r') {
                let mut lookahead = chars.clone();
                lookahead.next();
                if lookahead.next() == Some('\n') {
                    chars = lookahead;
                    continue;
                }
            }
        }
        output.push(character);
    }

    output
}

fn is_delimiter_line(line: &str) -> bool {
    let content = line.strip_suffix('\n').unwrap_or(line);
    let without_cr = content.strip_suffix('\r').unwrap_or(content);
    without_cr.eq_ignore_ascii_case(BATCH_DELIMITER)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum LineEnding {
    Lf,
    CrLf,
    Unterminated,
}

fn line_ending(line: &str) -> LineEnding {
    if line.ends_with("\r\n") {
        LineEnding::CrLf
    } else if line.ends_with('\n') {
        LineEnding::Lf
    } else {
        LineEnding::Unterminated
    }
}

fn trim_trailing_line_break(batch: &mut String, delimiter_ending: LineEnding) {
    if !batch.ends_with('\n') {
        return;
    }
    batch.pop();
    if delimiter_ending != LineEnding::Lf && batch.ends_with('\r') {
        batch.pop();
    }
}
