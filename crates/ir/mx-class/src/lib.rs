//! Class description model
//!
//! An in-memory form of a class description as handed over by the loader:
//! ordered methods and fields, each with a name, a descriptor, access
//! modifiers and metadata annotations. Methods additionally carry an
//! instruction stream. Names and descriptors are interned [`Symbol`]s.
//!
//! Descriptors use the JVM textual syntax (`I`, `(I)V`, `Lcom/example/Foo;`)
//! but are otherwise opaque to this crate, except for [`object_descriptor`].

pub mod access;
pub mod annotation;
pub mod insn;
pub mod node;
pub mod pretty;

pub use access::{Access, Visibility};
pub use annotation::{Annotation, AnnotationValue};
pub use insn::{FieldOp, Instruction, InvokeKind};
pub use mx_intern::{Interner, Symbol};
pub use node::{ClassNode, FieldNode, Member, MethodNode};
pub use pretty::Pretty;

/// Descriptor of a reference to `class_name`, e.g. `Lcom/example/Foo;`
pub fn object_descriptor(class_name: &str) -> String {
    format!("L{class_name};")
}
