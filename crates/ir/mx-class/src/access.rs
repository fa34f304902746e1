//! Access modifiers

use derive_more::Display;
use std::fmt;

/// Member visibility
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Display)]
pub enum Visibility {
    /// Visible everywhere
    #[display("public")]
    Public,
    /// Visible to subclasses and the declaring package
    #[display("protected")]
    Protected,
    /// Visible inside the declaring package only
    #[display("package")]
    Package,
    /// Visible inside the declaring class only
    #[display("private")]
    Private,
}

/// Access modifiers of a method or field
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct Access {
    /// Visibility modifier
    pub visibility: Visibility,
    /// `static` modifier
    pub is_static: bool,
    /// `final` modifier
    pub is_final: bool,
}

impl Access {
    /// Instance member with the given visibility
    #[must_use]
    pub const fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            is_static: false,
            is_final: false,
        }
    }

    /// Public instance member
    #[must_use]
    pub const fn public() -> Self {
        Self::new(Visibility::Public)
    }

    /// Private instance member
    #[must_use]
    pub const fn private() -> Self {
        Self::new(Visibility::Private)
    }

    /// Same access with `static` set
    #[must_use]
    pub const fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Same access with `final` set
    #[must_use]
    pub const fn with_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Whether the member is private
    pub fn is_private(self) -> bool {
        self.visibility == Visibility::Private
    }

    /// Whether the member is public
    pub fn is_public(self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Private with no other modifier
    pub fn is_exactly_private(self) -> bool {
        self == Self::private()
    }
}

impl fmt::Display for Access {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.visibility)?;
        if self.is_static {
            write!(formatter, " static")?;
        }
        if self.is_final {
            write!(formatter, " final")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_private_rejects_modifiers() {
        assert!(Access::private().is_exactly_private());
        assert!(!Access::private().with_final().is_exactly_private());
        assert!(!Access::private().with_static().is_exactly_private());
        assert!(!Access::new(Visibility::Protected).is_exactly_private());
    }

    #[test]
    fn display_lists_modifiers_in_order() {
        let access = Access::public().with_static().with_final();
        assert_eq!(access.to_string(), "public static final");
        assert_eq!(Access::new(Visibility::Package).to_string(), "package");
    }
}
