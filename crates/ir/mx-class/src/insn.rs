//! Method body instructions
//!
//! Only member references are modelled structurally. Everything else is an
//! opaque opcode the preprocessor never looks at.

use derive_more::Display;
use mx_intern::Symbol;

/// Dispatch kind of a method invocation
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Display)]
pub enum InvokeKind {
    /// Virtual dispatch
    #[display("invokevirtual")]
    Virtual,
    /// Direct call (constructors, private and super calls)
    #[display("invokespecial")]
    Special,
    /// Static call
    #[display("invokestatic")]
    Static,
    /// Interface dispatch
    #[display("invokeinterface")]
    Interface,
}

/// Field access operation
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Display)]
pub enum FieldOp {
    /// Read an instance field
    #[display("getfield")]
    Get,
    /// Write an instance field
    #[display("putfield")]
    Put,
    /// Read a static field
    #[display("getstatic")]
    GetStatic,
    /// Write a static field
    #[display("putstatic")]
    PutStatic,
}

/// A single instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Method invocation
    Invoke {
        /// Dispatch kind
        kind: InvokeKind,
        /// Class the method is looked up on
        owner: Symbol,
        /// Method name
        name: Symbol,
        /// Method descriptor
        desc: Symbol,
    },
    /// Field access
    Field {
        /// Access operation
        op: FieldOp,
        /// Class declaring the field
        owner: Symbol,
        /// Field name
        name: Symbol,
        /// Field descriptor
        desc: Symbol,
    },
    /// Any instruction that does not reference a member
    Other {
        /// Raw opcode
        opcode: u8,
    },
}

impl Instruction {
    /// Referenced `(owner, name, desc)`, for member-referencing instructions
    pub fn member_ref(&self) -> Option<(Symbol, Symbol, Symbol)> {
        match *self {
            Self::Invoke {
                owner, name, desc, ..
            }
            | Self::Field {
                owner, name, desc, ..
            } => Some((owner, name, desc)),
            Self::Other { .. } => None,
        }
    }
}
