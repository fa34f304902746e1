//! String interning for class, member and descriptor names

pub use lasso::Spur as Symbol;
use lasso::ThreadedRodeo;
use std::fmt;
use std::sync::Arc;

/// Thread-safe string interner
///
/// Cloning is cheap: every clone shares the same underlying rodeo, so a
/// symbol interned through one handle resolves through any other.
#[derive(Clone, Default)]
pub struct Interner {
    inner: Arc<ThreadedRodeo>,
}

impl Interner {
    /// Create an empty interner
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its symbol
    pub fn intern(&self, text: &str) -> Symbol {
        self.inner.get_or_intern(text)
    }

    /// Resolve a symbol back to its text
    ///
    /// Symbols minted by a different interner are a caller bug and panic
    /// inside `lasso`.
    pub fn resolve(&self, sym: Symbol) -> &str {
        self.inner.resolve(&sym)
    }

    /// Resolve a symbol, returning `None` if it is unknown to this interner
    pub fn try_resolve(&self, sym: Symbol) -> Option<&str> {
        self.inner.try_resolve(&sym)
    }

    /// Look up a symbol without interning
    pub fn get(&self, text: &str) -> Option<Symbol> {
        self.inner.get(text)
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Interner")
            .field("len", &self.inner.len())
            .finish()
    }
}
