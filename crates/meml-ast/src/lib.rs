#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

pub mod span {
    use serde::Serialize;

    /// Half-open byte range into the source text.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
    pub struct Span {
        pub start: u32,
        pub end: u32,
    }

    impl Span {
        /// Offsets past `u32::MAX` saturate to `u32::MAX`.
        pub fn new(start: usize, end: usize) -> Self {
            Span {
                start: u32::try_from(start).unwrap_or(u32::MAX),
                end: u32::try_from(end).unwrap_or(u32::MAX),
            }
        }
    }
}

pub mod value {
    use indexmap::IndexMap;
    use serde::Serialize;

    /// Everything written after a `:` or on one list row.
    pub type Tuple = Vec<Value>;

    /// One tuple per row.
    pub type List = Vec<Tuple>;

    /// Entries in first-insertion order. Re-inserting a key replaces its tuple
    /// but keeps the key where it first appeared.
    pub type Dict = IndexMap<String, Tuple>;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub enum Value {
        /// Quoted text with the boundary quotes removed. Backslash escapes are kept as written.
        String(String),
        Integer(i64),
        Float(f64),
        /// Bare identifier. Never equal to a `String` with the same text.
        Keyword(String),
        Tuple(Tuple),
        List(List),
        Dict(Dict),
    }

    impl Value {
        pub fn kind(&self) -> &'static str {
            match self {
                Value::String(_) => "string",
                Value::Integer(_) => "integer",
                Value::Float(_) => "float",
                Value::Keyword(_) => "keyword",
                Value::Tuple(_) => "tuple",
                Value::List(_) => "list",
                Value::Dict(_) => "dict",
            }
        }

        pub fn keyword(name: impl Into<String>) -> Self {
            Value::Keyword(name.into())
        }

        pub fn string(text: impl Into<String>) -> Self {
            Value::String(text.into())
        }

        pub fn as_str(&self) -> Option<&str> {
            match self {
                Value::String(s) => Some(s),
                _ => None,
            }
        }

        pub fn as_keyword(&self) -> Option<&str> {
            match self {
                Value::Keyword(k) => Some(k),
                _ => None,
            }
        }

        pub fn is_keyword(&self, name: &str) -> bool {
            self.as_keyword() == Some(name)
        }

        pub fn as_integer(&self) -> Option<i64> {
            match self {
                Value::Integer(i) => Some(*i),
                _ => None,
            }
        }

        /// Only `Float` values; integers are not widened.
        pub fn as_float(&self) -> Option<f64> {
            match self {
                Value::Float(f) => Some(*f),
                _ => None,
            }
        }

        pub fn as_tuple(&self) -> Option<&Tuple> {
            match self {
                Value::Tuple(t) => Some(t),
                _ => None,
            }
        }

        pub fn as_list(&self) -> Option<&List> {
            match self {
                Value::List(l) => Some(l),
                _ => None,
            }
        }

        pub fn as_dict(&self) -> Option<&Dict> {
            match self {
                Value::Dict(d) => Some(d),
                _ => None,
            }
        }
    }

    /// The value of `key` when its entry holds exactly one element.
    pub fn single<'d>(dict: &'d Dict, key: &str) -> Option<&'d Value> {
        match dict.get(key).map(Vec::as_slice) {
            Some([only]) => Some(only),
            _ => None,
        }
    }
}
