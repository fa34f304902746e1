//! Class, method and field nodes

use crate::access::Access;
use crate::annotation::{self, Annotation};
use crate::insn::Instruction;
use mx_intern::Symbol;

/// Common view over methods and fields
pub trait Member {
    /// Current name
    fn name(&self) -> Symbol;
    /// Type descriptor
    fn desc(&self) -> Symbol;
    /// Access modifiers
    fn access(&self) -> Access;
    /// Attached annotations
    fn annotations(&self) -> &[Annotation];

    /// Annotation of type `desc`, if present
    fn annotation(&self, desc: Symbol) -> Option<&Annotation> {
        annotation::find(self.annotations(), desc)
    }
}

/// A method with its instruction stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodNode {
    /// Method name
    pub name: Symbol,
    /// Method descriptor
    pub desc: Symbol,
    /// Access modifiers
    pub access: Access,
    /// Annotations in declaration order
    pub annotations: Vec<Annotation>,
    /// Method body
    pub instructions: Vec<Instruction>,
}

impl MethodNode {
    /// Method with no annotations and an empty body
    #[must_use]
    pub fn new(name: Symbol, desc: Symbol, access: Access) -> Self {
        Self {
            name,
            desc,
            access,
            annotations: Vec::new(),
            instructions: Vec::new(),
        }
    }

    /// Builder-style annotation
    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Builder-style body
    #[must_use]
    pub fn with_body(mut self, instructions: Vec<Instruction>) -> Self {
        self.instructions = instructions;
        self
    }

    /// Insert or replace an annotation
    pub fn set_annotation(&mut self, annotation: Annotation) {
        annotation::set(&mut self.annotations, annotation);
    }
}

impl Member for MethodNode {
    fn name(&self) -> Symbol {
        self.name
    }

    fn desc(&self) -> Symbol {
        self.desc
    }

    fn access(&self) -> Access {
        self.access
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// A field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNode {
    /// Field name
    pub name: Symbol,
    /// Field descriptor
    pub desc: Symbol,
    /// Access modifiers
    pub access: Access,
    /// Annotations in declaration order
    pub annotations: Vec<Annotation>,
}

impl FieldNode {
    /// Field with no annotations
    #[must_use]
    pub fn new(name: Symbol, desc: Symbol, access: Access) -> Self {
        Self {
            name,
            desc,
            access,
            annotations: Vec::new(),
        }
    }

    /// Builder-style annotation
    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

impl Member for FieldNode {
    fn name(&self) -> Symbol {
        self.name
    }

    fn desc(&self) -> Symbol {
        self.desc
    }

    fn access(&self) -> Access {
        self.access
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// A class description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    /// Internal class name, e.g. `com/example/Foo`
    pub name: Symbol,
    /// Superclass name, `None` for the hierarchy root
    pub superclass: Option<Symbol>,
    /// Methods in declaration order
    pub methods: Vec<MethodNode>,
    /// Fields in declaration order
    pub fields: Vec<FieldNode>,
}

impl ClassNode {
    /// Empty class
    #[must_use]
    pub fn new(name: Symbol, superclass: Option<Symbol>) -> Self {
        Self {
            name,
            superclass,
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Builder-style method
    #[must_use]
    pub fn with_method(mut self, method: MethodNode) -> Self {
        self.methods.push(method);
        self
    }

    /// Builder-style field
    #[must_use]
    pub fn with_field(mut self, field: FieldNode) -> Self {
        self.fields.push(field);
        self
    }
}
