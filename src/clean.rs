// ABOUTME: Lexical cleaner — strips trailing comments honouring string-literal quoting

/// Removes a trailing `#` comment from `line`, honouring single- and
/// double-quote string literals (a `#` inside an active quote is
/// literal, not a comment opener), then trims surrounding whitespace.
/// No escape processing happens at this stage.
pub fn clean_line(line: &str) -> String {
    let mut in_single = false;
    let mut in_double = false;
    for (i, c) in line.char_indices() {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if !in_single && !in_double => return line[..i].trim().to_string(),
            _ => {}
        }
    }
    line.trim().to_string()
}
