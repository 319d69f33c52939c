//! The Identifier Table (IDT, spec §4.2): a bidirectional map between
//! textual names and a dense, monotonic `u32` id space, plus the fresh-id
//! generator. One table per assemble/disassemble session (spec §5); the
//! generator resets to zero at the start of every session simply because
//! a new table starts empty.

use std::collections::HashMap;

/// One `{ text, id }` pair (spec §3).
#[derive(Clone, Debug)]
pub struct IdentifierEntry {
    pub text: String,
    pub id: u32,
}

/// The longest textual identifier accepted before a Lexical diagnostic
/// is raised instead of a silent truncation (spec §3's "bounded string",
/// carried from `examples/original_source/src/spirva.h`'s
/// `char textId[256]` without reproducing the original's fixed-size
/// buffer — Rust strings don't need one).
pub const MAX_IDENTIFIER_LEN: usize = 4096;

#[derive(Debug)]
pub struct IdentifierTooLong {
    pub text: String,
}

/// Lookup-or-create by text, reverse lookup by id, existence by id
/// (spec §4.2). Forward lookup uses a hash map for O(1) lookup-or-create
/// (spec §9 explicitly permits this in place of linear search); reverse
/// lookup is a dense `Vec` index, since ids are allocated 0..n.
#[derive(Default)]
pub struct IdentifierTable {
    entries: Vec<IdentifierEntry>,
    by_text: HashMap<String, u32>,
}

impl IdentifierTable {
    pub fn new() -> Self {
        IdentifierTable::default()
    }

    /// Returns the existing id for `text`, or allocates and returns a
    /// fresh one. Forward references are legal (spec §9): there is no
    /// "must already exist" check.
    pub fn lookup_or_create(&mut self, text: &str) -> Result<u32, IdentifierTooLong> {
        if let Some(&id) = self.by_text.get(text) {
            return Ok(id);
        }
        if text.len() > MAX_IDENTIFIER_LEN {
            return Err(IdentifierTooLong {
                text: text.to_owned(),
            });
        }
        let id = self.entries.len() as u32;
        self.entries.push(IdentifierEntry {
            text: text.to_owned(),
            id,
        });
        self.by_text.insert(text.to_owned(), id);
        Ok(id)
    }

    pub fn text_of(&self, id: u32) -> Option<&str> {
        self.entries
            .get(id as usize)
            .map(|entry| entry.text.as_str())
    }

    pub fn contains_id(&self, id: u32) -> bool {
        (id as usize) < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `bounds` for the module header: strictly greater than every id in
    /// the table, which — since ids are dense and monotonic from zero —
    /// is simply the number of entries (spec §3, §4.5).
    pub fn bounds(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = &IdentifierEntry> {
        self.entries.iter()
    }

    /// Debug names: entries whose text did not begin with the `%` sigil
    /// at the call site (spec §4.2). The table itself is sigil-agnostic;
    /// the caller (the LLT) decides which entries qualify and passes
    /// them in already stripped of any sigil.
    pub fn plain_debug_names<'a>(&'a self, is_plain: impl Fn(&str) -> bool + 'a) -> impl Iterator<Item = &'a IdentifierEntry> {
        self.entries.iter().filter(move |e| is_plain(&e.text))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookup_or_create_is_idempotent() {
        let mut table = IdentifierTable::new();
        let a = table.lookup_or_create("%foo").unwrap();
        let b = table.lookup_or_create("%foo").unwrap();
        assert_eq!(a, b);
        assert_eq!(table.bounds(), 1);
    }

    #[test]
    fn ids_are_dense_and_monotonic() {
        let mut table = IdentifierTable::new();
        let a = table.lookup_or_create("%a").unwrap();
        let b = table.lookup_or_create("%b").unwrap();
        let c = table.lookup_or_create("%a").unwrap();
        assert_eq!((a, b, c), (0, 1, 0));
        assert_eq!(table.bounds(), 2);
    }

    #[test]
    fn reverse_lookup_recovers_text() {
        let mut table = IdentifierTable::new();
        let id = table.lookup_or_create("%thing").unwrap();
        assert_eq!(table.text_of(id), Some("%thing"));
        assert_eq!(table.text_of(id + 1), None);
    }

    #[test]
    fn plain_debug_names_excludes_sigiled_entries() {
        let mut table = IdentifierTable::new();
        table.lookup_or_create("%sigiled").unwrap();
        table.lookup_or_create("plainname").unwrap();

        let names: Vec<&str> = table
            .plain_debug_names(|text| !text.starts_with('%'))
            .map(|entry| entry.text.as_str())
            .collect();
        assert_eq!(names, vec!["plainname"]);
    }
}
