//! Rendering of date fields with date-fns style patterns (`dd MMM yyyy`,
//! `yyyy-MM-dd HH:mm`, ...).
//!
//! Letters outside the supported set and text wrapped in single quotes are
//! copied verbatim; `''` yields a literal quote.

use chrono::{DateTime, Utc};

pub const DEFAULT_DATE_FORMAT: &str = "dd MMM yyyy";

pub fn format_date(date: &DateTime<Utc>, pattern: &str) -> String {
    date.format(&to_strftime(pattern)).to_string()
}

/// Translate a date-fns pattern into a chrono strftime string.
fn to_strftime(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            // '' is an escaped quote
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) == Some(&'\'') {
                        out.push('\'');
                        i += 2;
                        continue;
                    }
                    break;
                }
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        match token(c, run) {
            Some(spec) => out.push_str(spec),
            None => (0..run).for_each(|_| push_literal(&mut out, c)),
        }
        i += run;
    }

    out
}

fn token(c: char, len: usize) -> Option<&'static str> {
    let spec = match (c, len) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('d', 1) => "%-d",
        ('d', _) => "%d",
        ('H', 1) => "%-H",
        ('H', _) => "%H",
        ('h', 1) => "%-I",
        ('h', _) => "%I",
        ('m', 1) => "%-M",
        ('m', _) => "%M",
        ('s', 1) => "%-S",
        ('s', _) => "%S",
        ('E', 1..=3) => "%a",
        ('E', _) => "%A",
        ('a', _) => "%p",
        _ => return None,
    };
    Some(spec)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
