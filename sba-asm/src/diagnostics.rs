//! The Diagnostics sink (spec §6): a growing, ordered, never-fatal
//! sequence of human-readable messages, built with a small printf-like
//! formatter (`%c %d %f %s %x %%`) in place of the original source's
//! growth-by-one byte buffer (spec §9's "string-growth error buffer"
//! note — this is the builder/writer-to-buffer replacement it asks for).

use std::fmt;

/// The five error categories of spec §7. Kept alongside the formatted
/// message (rather than discarded after formatting) so callers and
/// tests can distinguish, say, an Arity failure from a Lexical one
/// without parsing the message text back apart.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Category {
    Lexical,
    Arity,
    Enumerant,
    Structural,
    Resource,
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub category: Category,
    pub line: Option<usize>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// One session's diagnostics (spec §5: session-scoped, never shared).
#[derive(Default, Debug)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn push(&mut self, category: Category, line: Option<usize>, message: String) {
        self.records.push(Diagnostic {
            category,
            line,
            message,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }
}

/// One argument to `printf`.
pub enum Arg<'a> {
    C(char),
    D(i64),
    F(f64),
    S(&'a str),
    X(u64),
}

/// Formats `fmt` against `args`, consuming one argument per recognized
/// conversion (`%c %d %f %s %x`) and passing `%%` through as a literal
/// percent. An unrecognized conversion or an exhausted argument list is
/// passed through verbatim rather than panicking — diagnostic formatting
/// must never itself fail a session (spec §7's collected-not-thrown
/// policy extends to the formatter that builds the messages).
pub fn printf(fmt: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(fmt.len());
    let mut args = args.iter();
    let mut chars = fmt.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some('c') => match args.next() {
                Some(Arg::C(v)) => out.push(*v),
                _ => out.push_str("%c"),
            },
            Some('d') => match args.next() {
                Some(Arg::D(v)) => out.push_str(&v.to_string()),
                _ => out.push_str("%d"),
            },
            Some('f') => match args.next() {
                Some(Arg::F(v)) => out.push_str(&v.to_string()),
                _ => out.push_str("%f"),
            },
            Some('s') => match args.next() {
                Some(Arg::S(v)) => out.push_str(v),
                _ => out.push_str("%s"),
            },
            Some('x') => match args.next() {
                Some(Arg::X(v)) => out.push_str(&format!("{:x}", v)),
                _ => out.push_str("%x"),
            },
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn printf_handles_every_conversion() {
        let msg = printf(
            "%s at %d (%x) is %f%% done: %c",
            &[
                Arg::S("Nop"),
                Arg::D(-3),
                Arg::X(255),
                Arg::F(12.5),
                Arg::C('!'),
            ],
        );
        assert_eq!(msg, "Nop at -3 (ff) is 12.5% done: !");
    }

    #[test]
    fn printf_passes_through_unknown_conversion() {
        assert_eq!(printf("100%z", &[]), "100%z");
    }

    #[test]
    fn diagnostics_collect_in_order() {
        let mut sink = Diagnostics::new();
        sink.push(Category::Lexical, Some(1), "bad token".into());
        sink.push(Category::Arity, Some(2), "too few operands".into());
        assert_eq!(sink.len(), 2);
        assert!(!sink.is_empty());
        let messages: Vec<_> = sink.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["bad token", "too few operands"]);
    }
}
