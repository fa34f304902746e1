//! Metadata annotations attached to members

use indexmap::IndexMap;
use mx_intern::Symbol;

/// Value of a single annotation key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValue {
    /// String value
    Str(String),
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Array value
    List(Vec<AnnotationValue>),
}

impl AnnotationValue {
    /// String payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Boolean payload, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl From<&str> for AnnotationValue {
    fn from(text: &str) -> Self {
        Self::Str(text.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl From<bool> for AnnotationValue {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

/// A marker or parameterised annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Annotation type
    pub desc: Symbol,
    /// Key/value pairs in declaration order
    pub values: IndexMap<String, AnnotationValue>,
}

impl Annotation {
    /// Marker annotation with no values
    #[must_use]
    pub fn marker(desc: Symbol) -> Self {
        Self {
            desc,
            values: IndexMap::new(),
        }
    }

    /// Builder-style value insertion
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<AnnotationValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Builder-style string list insertion
    #[must_use]
    pub fn with_list<'item>(mut self, key: &str, items: impl IntoIterator<Item = &'item str>) -> Self {
        let list = items.into_iter().map(AnnotationValue::from).collect();
        self.values.insert(key.to_string(), AnnotationValue::List(list));
        self
    }

    /// Raw value for `key`
    pub fn get(&self, key: &str) -> Option<&AnnotationValue> {
        self.values.get(key)
    }

    /// String value for `key`
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AnnotationValue::as_str)
    }

    /// String elements of the list value for `key`, in order
    ///
    /// A missing key yields nothing; a single string counts as a one-element
    /// list, matching how array-typed annotation values may be written.
    pub fn get_strings(&self, key: &str) -> Vec<&str> {
        match self.get(key) {
            Some(AnnotationValue::List(items)) => {
                items.iter().filter_map(AnnotationValue::as_str).collect()
            }
            Some(AnnotationValue::Str(text)) => vec![text.as_str()],
            _ => Vec::new(),
        }
    }
}

/// Find the annotation of type `desc`
pub fn find(annotations: &[Annotation], desc: Symbol) -> Option<&Annotation> {
    annotations.iter().find(|annotation| annotation.desc == desc)
}

/// Insert `annotation`, replacing any existing annotation of the same type
pub fn set(annotations: &mut Vec<Annotation>, annotation: Annotation) {
    for existing in annotations.iter_mut() {
        if existing.desc == annotation.desc {
            *existing = annotation;
            return;
        }
    }
    annotations.push(annotation);
}
