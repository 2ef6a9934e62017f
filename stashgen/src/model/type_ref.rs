//! Semantic type descriptors and their parser
//!
//! Field types arrive as text (`java.util.ArrayList<java.lang.String>`, `int[]`,
//! `? extends android.os.Parcelable`) and are parsed with nom into [`TypeRef`]. The
//! canonical `Display` form is what the exact-shape strategy table is keyed by, so
//! `java.util.ArrayList< java.lang.String >` and `java.util.ArrayList<java.lang.String>`
//! classify identically.

use std::fmt;

use error_stack::Report;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while_m_n};
use nom::character::complete::{char, multispace0, multispace1};
use nom::combinator::{map, opt, recognize};
use nom::multi::{many0, separated_list1};
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};
use serde::{Deserialize, Serialize};

use super::TypeName;
use crate::error::{Error, Result};

/// Keywords that denote primitive shapes
pub const PRIMITIVES: [&str; 8] = [
    "boolean", "byte", "char", "double", "float", "int", "long", "short",
];

/// Bound attached to a wildcard type argument
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    /// `? extends T`
    Extends(Box<TypeRef>),
    /// `? super T`
    Super(Box<TypeRef>),
}

/// A declared field type, as the host toolchain describes it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// `int`, `boolean`, ...
    Primitive(String),
    /// A class or interface type, possibly parameterized
    Declared {
        /// Erasure of the type
        name: TypeName,
        /// Type arguments in declaration order, empty for raw or non-generic types
        args: Vec<TypeRef>,
    },
    /// `T[]`
    Array(Box<TypeRef>),
    /// `?`, `? extends T` or `? super T`, only valid as a type argument
    Wildcard(Option<WildcardBound>),
}

impl TypeRef {
    /// A non-generic declared type
    pub fn declared(name: impl Into<TypeName>) -> Self {
        Self::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A parameterized declared type
    pub fn parameterized(name: impl Into<TypeName>, args: Vec<Self>) -> Self {
        Self::Declared {
            name: name.into(),
            args,
        }
    }

    /// Parse canonical or loosely spaced type text
    pub fn parse(text: &str) -> Result<Self> {
        parse_type_text(text).map_err(Report::new)
    }

    /// Erasure of a declared type, `None` for primitives, arrays and wildcards
    pub const fn erasure(&self) -> Option<&TypeName> {
        match self {
            Self::Declared { name, .. } => Some(name),
            Self::Primitive(_) | Self::Array(_) | Self::Wildcard(_) => None,
        }
    }

    /// Type arguments of a declared type
    pub fn type_args(&self) -> &[Self] {
        match self {
            Self::Declared { args, .. } => args,
            Self::Primitive(_) | Self::Array(_) | Self::Wildcard(_) => &[],
        }
    }

    /// Whether this is a wildcard type argument
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(keyword) => write!(f, "{keyword}"),
            Self::Declared { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (index, arg) in args.iter().enumerate() {
                        if index > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            Self::Array(component) => write!(f, "{component}[]"),
            Self::Wildcard(None) => write!(f, "?"),
            Self::Wildcard(Some(WildcardBound::Extends(bound))) => write!(f, "? extends {bound}"),
            Self::Wildcard(Some(WildcardBound::Super(bound))) => write!(f, "? super {bound}"),
        }
    }
}

impl TryFrom<String> for TypeRef {
    type Error = Error;

    fn try_from(text: String) -> std::result::Result<Self, Self::Error> {
        parse_type_text(&text)
    }
}

impl From<TypeRef> for String {
    fn from(type_ref: TypeRef) -> Self {
        type_ref.to_string()
    }
}

fn parse_type_text(text: &str) -> std::result::Result<TypeRef, Error> {
    match type_ref(text.trim()) {
        Ok(("", parsed)) => Ok(parsed),
        Ok((remaining, _)) => Err(Error::TypeParse(format!(
            "Unexpected characters after type '{text}': {remaining}"
        ))),
        Err(e) => Err(Error::TypeParse(format!("Failed to parse type '{text}': {e:?}"))),
    }
}

/// Parse an identifier (letters, digits, `_` and `$`, not starting with a digit)
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while_m_n(1, 1, |c: char| c.is_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    ))
    .parse(input)
}

/// Parse a dot-separated qualified name
fn qualified_name(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(char('.'), identifier)).parse(input)
}

/// Parse `<A, B<C>>`
fn type_arguments(input: &str) -> IResult<&str, Vec<TypeRef>> {
    delimited(
        pair(char('<'), multispace0),
        separated_list1(delimited(multispace0, char(','), multispace0), type_ref),
        pair(multispace0, char('>')),
    )
    .parse(input)
}

/// Parse a primitive keyword or a declared type with optional arguments
fn primitive_or_declared(input: &str) -> IResult<&str, TypeRef> {
    let (input, name) = qualified_name(input)?;
    let (input, args) = opt(preceded(multispace0, type_arguments)).parse(input)?;

    let parsed = match args {
        None if PRIMITIVES.contains(&name) => TypeRef::Primitive(name.to_string()),
        args => TypeRef::parameterized(name, args.unwrap_or_default()),
    };
    Ok((input, parsed))
}

fn wildcard_bound(input: &str) -> IResult<&str, WildcardBound> {
    alt((
        map(
            preceded((multispace1, tag("extends"), multispace1), type_ref),
            |bound| WildcardBound::Extends(Box::new(bound)),
        ),
        map(
            preceded((multispace1, tag("super"), multispace1), type_ref),
            |bound| WildcardBound::Super(Box::new(bound)),
        ),
    ))
    .parse(input)
}

fn wildcard(input: &str) -> IResult<&str, TypeRef> {
    map(preceded(char('?'), opt(wildcard_bound)), TypeRef::Wildcard).parse(input)
}

/// Count trailing `[]` pairs
fn array_dimensions(input: &str) -> IResult<&str, usize> {
    map(many0(preceded(multispace0, tag("[]"))), |dims: Vec<&str>| {
        dims.len()
    })
    .parse(input)
}

fn type_ref(input: &str) -> IResult<&str, TypeRef> {
    let (input, base) = alt((wildcard, primitive_or_declared)).parse(input)?;
    let (input, dimensions) = array_dimensions(input)?;

    let parsed = (0..dimensions).fold(base, |component, _| TypeRef::Array(Box::new(component)));
    Ok((input, parsed))
}
