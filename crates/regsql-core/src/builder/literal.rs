//! Literal values interpolated into query text.
//!
//! The builders never bind parameters. Values handed to typed comparison
//! helpers are rendered inline through [`Literal`], with text quoted and
//! single quotes doubled. Raw condition strings are never touched.

use std::fmt;

/// A value rendered inline into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value, rendered single-quoted.
    Text(String),
    /// Pre-formatted SQL, rendered verbatim.
    Raw(String),
}

impl Literal {
    /// Creates a verbatim literal, e.g. `Literal::raw("NOW()")`.
    ///
    /// **Warning**: the text is not escaped.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(true) => f.write_str("TRUE"),
            Self::Bool(false) => f.write_str("FALSE"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::Raw(s) => f.write_str(s),
        }
    }
}

/// Trait for types that can be rendered as a [`Literal`].
pub trait IntoLiteral {
    /// Converts the value into a literal.
    fn into_literal(self) -> Literal;
}

impl IntoLiteral for Literal {
    fn into_literal(self) -> Literal {
        self
    }
}

impl IntoLiteral for bool {
    fn into_literal(self) -> Literal {
        Literal::Bool(self)
    }
}

macro_rules! impl_into_literal_int {
    ($($ty:ty),+) => {
        $(
            impl IntoLiteral for $ty {
                fn into_literal(self) -> Literal {
                    Literal::Int(i64::from(self))
                }
            }
        )+
    };
}

impl_into_literal_int!(i8, i16, i32, i64, u8, u16, u32);

impl IntoLiteral for f32 {
    fn into_literal(self) -> Literal {
        Literal::Float(f64::from(self))
    }
}

impl IntoLiteral for f64 {
    fn into_literal(self) -> Literal {
        Literal::Float(self)
    }
}

impl IntoLiteral for String {
    fn into_literal(self) -> Literal {
        Literal::Text(self)
    }
}

impl IntoLiteral for &str {
    fn into_literal(self) -> Literal {
        Literal::Text(String::from(self))
    }
}

impl IntoLiteral for &String {
    fn into_literal(self) -> Literal {
        Literal::Text(self.clone())
    }
}

impl<T: IntoLiteral> IntoLiteral for Option<T> {
    fn into_literal(self) -> Literal {
        self.map_or(Literal::Null, IntoLiteral::into_literal)
    }
}
