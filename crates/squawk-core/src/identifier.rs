//! Participant keys backed by a global string interner.
//!
//! Every key used in a comms script (speaker keys, meta keys, marker keys)
//! is canonicalized to uppercase and interned once, so the compiler can copy
//! and compare keys freely while building blocks and rails.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for participant keys.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Interned participant key.
///
/// Keys are case-insensitive in the script format. [`Id::new`] stores the
/// canonical uppercase spelling, so `Id::new("app") == Id::new("APP")`.
///
/// # Examples
///
/// ```
/// use squawk_core::identifier::Id;
///
/// let app = Id::new("app");
/// assert_eq!(app, "APP");
/// assert_eq!(app, Id::new("App"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates the canonical (trimmed, uppercase) key for `name`.
    pub fn new(name: &str) -> Self {
        let canonical = name.trim().to_uppercase();
        Self::raw(&canonical)
    }

    /// Interns `name` exactly as written.
    fn raw(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Returns the canonical key text.
    pub fn as_string(&self) -> String {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_string()
        })
    }

    /// Length of the canonical key in bytes.
    pub fn len(&self) -> usize {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .len()
        })
    }

    /// Returns `true` for the empty key.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Compares against the canonical spelling: `Id::new("atc") == "ATC"`.
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                == other
        })
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
