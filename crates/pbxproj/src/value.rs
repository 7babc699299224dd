/// Byte range of a token or container in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array {
    pub items: Vec<Value>,
    pub span: Span,
}

/// `key /* annotation */ = value;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub annotation: Option<String>,
    pub value: Value,
}

/// A `{ ... }` dictionary. `span` covers both braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dict {
    pub entries: Vec<Entry>,
    pub span: Span,
}

impl Dict {
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entry(key).map(|entry| &entry.value)
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn get_dict(&self, key: &str) -> Option<&Dict> {
        self.get(key).and_then(Value::as_dict)
    }

    /// Byte offset of the closing brace.
    #[must_use]
    pub const fn close_offset(&self) -> usize {
        self.span.end - 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(Scalar),
    Array(Array),
    Dict(Dict),
}

impl Value {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(scalar) => Some(&scalar.text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::String(scalar) => scalar.span,
            Self::Array(array) => array.span,
            Self::Dict(dict) => dict.span,
        }
    }
}
