/// Width used to wrap the comments block, indent included.
pub const DEFAULT_COMMENT_WIDTH: usize = 70;

pub const INDENT: &str = "    ";

/// Canonical rendering of a points value: integers without a decimal
/// point, everything else rounded to at most two decimals.
pub fn format_points(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        let text = format!("{rounded:.2}");
        text.trim_end_matches('0').to_string()
    }
}

/// Two values are the same number of points when they render identically.
pub fn same_points(a: f64, b: f64) -> bool {
    format_points(a) == format_points(b)
}

/// Renders a mapping key, quoting it when a plain YAML scalar would not
/// read back as the same string.
pub fn yaml_key(key: &str) -> String {
    if needs_quotes(key) {
        quote(key)
    } else {
        key.to_string()
    }
}

fn needs_quotes(key: &str) -> bool {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
        '@', '`',
    ];
    const RESERVED: &[&str] = &[
        "~", "null", "true", "false", "yes", "no", "on", "off", "y", "n",
    ];

    let Some(first) = key.chars().next() else {
        return true;
    };
    if INDICATORS.contains(&first) || key.trim() != key {
        return true;
    }
    if key.contains(": ")
        || key.contains(" #")
        || key.ends_with(':')
        || key.chars().any(|c| c.is_control() || "[]{},".contains(c))
    {
        return true;
    }
    let lowered = key.to_ascii_lowercase();
    let unsigned = lowered.trim_start_matches(['+', '-']);
    RESERVED.contains(&lowered.as_str())
        || ["0x", "0o", "0b"].iter().any(|prefix| lowered.starts_with(prefix))
        || unsigned == ".inf"
        || unsigned == ".nan"
        || key.parse::<f64>().is_ok()
}

fn quote(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 2);
    out.push('"');
    for c in key.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Comment text as it reads back from a folded block: each line with its
/// whitespace runs collapsed to single spaces, outer blank lines dropped.
pub fn normalize_comment(text: &str) -> Option<String> {
    let normalized = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n");
    let normalized = normalized.trim();
    (!normalized.is_empty()).then(|| normalized.to_string())
}

/// Wraps comment text for a folded block. Each source line is filled
/// greedily up to `width` columns; source lines are separated by an empty
/// line so folding gives back the original line breaks.
pub fn wrap_comment(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, source) in text.trim().lines().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        let mut current = String::new();
        let mut columns = 0;
        for word in source.split_whitespace() {
            let word_columns = word.chars().count();
            if current.is_empty() {
                current = format!("{INDENT}{word}");
                columns = INDENT.len() + word_columns;
            } else if columns + 1 + word_columns <= width {
                current.push(' ');
                current.push_str(word);
                columns += 1 + word_columns;
            } else {
                lines.push(std::mem::take(&mut current));
                current = format!("{INDENT}{word}");
                columns = INDENT.len() + word_columns;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}
