//! Alias resolution
//!
//! A shadow member may be known in the target under more than one name.
//! Its alias list holds the member's own name first, then the aliases from
//! its shadow annotation in the order they were written. Resolution tries
//! the names front to back and the first name with a match wins, so a donor
//! can reach an obfuscated target member by listing the obfuscated name as a
//! secondary alias.

use mx_class::{Annotation, Member, Symbol};
use mx_intern::Interner;
use std::collections::VecDeque;

/// Ordered candidate names for one member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasList {
    names: VecDeque<Symbol>,
}

impl AliasList {
    /// List holding only the primary name
    #[must_use]
    pub fn new(primary: Symbol) -> Self {
        Self {
            names: VecDeque::from([primary]),
        }
    }

    /// Primary name followed by the `aliases` declared on `shadow`
    #[must_use]
    pub fn for_member(primary: Symbol, shadow: Option<&Annotation>, interner: &Interner) -> Self {
        let mut list = Self::new(primary);
        if let Some(shadow) = shadow {
            list.names.extend(
                shadow
                    .get_strings("aliases")
                    .into_iter()
                    .map(|alias| interner.intern(alias)),
            );
        }
        list
    }

    /// Candidate names in resolution order
    pub fn names(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.names.iter().copied()
    }

    /// First candidate matching one of the names with descriptor `desc`
    pub fn resolve<M: Member>(self, candidates: &[M], desc: Symbol) -> Option<&M> {
        self.resolve_by(candidates, |candidate, alias| {
            candidate.name() == alias && candidate.desc() == desc
        })
    }

    /// First candidate matching one of the names, whatever its descriptor
    pub fn resolve_name<M: Member>(self, candidates: &[M]) -> Option<&M> {
        self.resolve_by(candidates, |candidate, alias| candidate.name() == alias)
    }

    fn resolve_by<M: Member>(mut self, candidates: &[M], matches: impl Fn(&M, Symbol) -> bool) -> Option<&M> {
        while let Some(alias) = self.names.pop_front() {
            if let Some(found) = candidates.iter().find(|&candidate| matches(candidate, alias)) {
                return Some(found);
            }
        }
        None
    }
}
