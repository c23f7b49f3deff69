//! String interning for identifiers.
//!
//! Identifier spellings are interned so that equal names share one stored
//! copy and compare as integers. An interner can be private to one parse,
//! shared by a compile session, or the process-wide one returned by
//! [`global_interner`].

use lasso::{Spur, ThreadedRodeo};
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// An interned string handle. Comparing two handles is an O(1) integer
/// comparison; resolving one requires the interner that produced it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl InternedString {
    #[inline]
    pub fn from_spur(spur: Spur) -> Self {
        Self(spur)
    }

    #[inline]
    pub fn as_spur(self) -> Spur {
        self.0
    }
}

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternedString({:?})", self.0)
    }
}

/// Thread-safe string interner.
///
/// Cloning is cheap and yields a handle to the same table. Concurrent
/// `intern` calls for the same spelling are insert-if-absent: every caller
/// receives the same key, whichever thread inserted it.
#[derive(Clone)]
pub struct StringInterner {
    rodeo: Arc<ThreadedRodeo>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Intern a string, returning the existing handle if already present.
    #[inline]
    pub fn intern(&self, s: &str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern(s))
    }

    /// Look up an already-interned string without interning it if absent.
    #[inline]
    pub fn get(&self, s: &str) -> Option<InternedString> {
        self.rodeo.get(s).map(InternedString::from_spur)
    }

    /// Resolve a handle produced by this interner.
    ///
    /// # Panics
    ///
    /// Panics if `key` came from a different interner and is out of range.
    #[inline]
    pub fn resolve(&self, key: InternedString) -> &str {
        self.rodeo.resolve(&key.as_spur())
    }

    /// Resolve a handle, returning `None` if this interner never produced it.
    #[inline]
    pub fn try_resolve(&self, key: InternedString) -> Option<&str> {
        self.rodeo.try_resolve(&key.as_spur())
    }

    /// Whether both handles point at the same underlying table.
    pub fn ptr_eq(&self, other: &StringInterner) -> bool {
        Arc::ptr_eq(&self.rodeo, &other.rodeo)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

lazy_static! {
    static ref GLOBAL_INTERNER: RwLock<StringInterner> = RwLock::new(StringInterner::new());
}

/// The process-wide interner.
///
/// Created on first use and lives until process exit or the next
/// [`reset_global_interner`]. The returned handle keeps its table alive, so
/// handles obtained before a reset stay resolvable through it.
pub fn global_interner() -> StringInterner {
    GLOBAL_INTERNER.read().clone()
}

/// Replace the process-wide interner with an empty one.
///
/// Outstanding handles from [`global_interner`] keep the old table.
pub fn reset_global_interner() {
    *GLOBAL_INTERNER.write() = StringInterner::new();
}
