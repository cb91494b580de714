//! C type model used to describe exported structure fields.
//!
//! Each [`CType`] knows its C spelling, its `ctypes` spelling (the name a
//! dynamic loader uses to build a matching structure), the host-language
//! value type it maps onto, and its size on the current target.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ffi::{c_char, c_int, c_long, c_longlong, c_short, c_void};
use std::fmt;
use std::mem::size_of;
use std::str::FromStr;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static SPACE_BEFORE_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\*").expect("valid regex"));

/// Broad classification of a C type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CTypeCategory {
    Integer,
    Float,
    Char,
    Pointer,
    Bool,
    Void,
}

/// Scalar C types a record field can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CType {
    Char,
    SignedChar,
    UnsignedChar,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Int32,
    UInt32,
    Int64,
    SizeT,
    SsizeT,
    Float,
    Double,
    Bool,
    Void,
    CharPtr,
    ConstCharPtr,
    VoidPtr,
    ConstVoidPtr,
}

const ALL: &[CType] = &[
    CType::Char,
    CType::SignedChar,
    CType::UnsignedChar,
    CType::Short,
    CType::UnsignedShort,
    CType::Int,
    CType::UnsignedInt,
    CType::Long,
    CType::UnsignedLong,
    CType::LongLong,
    CType::UnsignedLongLong,
    CType::Int32,
    CType::UInt32,
    CType::Int64,
    CType::SizeT,
    CType::SsizeT,
    CType::Float,
    CType::Double,
    CType::Bool,
    CType::Void,
    CType::CharPtr,
    CType::ConstCharPtr,
    CType::VoidPtr,
    CType::ConstVoidPtr,
];

impl CType {
    /// C spelling, normalised (`const char*`, `unsigned long long`, ...)
    pub fn c_name(self) -> &'static str {
        match self {
            CType::Char => "char",
            CType::SignedChar => "signed char",
            CType::UnsignedChar => "unsigned char",
            CType::Short => "short",
            CType::UnsignedShort => "unsigned short",
            CType::Int => "int",
            CType::UnsignedInt => "unsigned int",
            CType::Long => "long",
            CType::UnsignedLong => "unsigned long",
            CType::LongLong => "long long",
            CType::UnsignedLongLong => "unsigned long long",
            CType::Int32 => "int32_t",
            CType::UInt32 => "uint32_t",
            CType::Int64 => "int64_t",
            CType::SizeT => "size_t",
            CType::SsizeT => "ssize_t",
            CType::Float => "float",
            CType::Double => "double",
            CType::Bool => "bool",
            CType::Void => "void",
            CType::CharPtr => "char*",
            CType::ConstCharPtr => "const char*",
            CType::VoidPtr => "void*",
            CType::ConstVoidPtr => "const void*",
        }
    }

    /// Name of the matching `ctypes` class (`"None"` for `void`)
    pub fn ctypes_name(self) -> &'static str {
        match self {
            CType::Char => "c_char",
            CType::SignedChar => "c_byte",
            CType::UnsignedChar => "c_ubyte",
            CType::Short => "c_short",
            CType::UnsignedShort => "c_ushort",
            CType::Int => "c_int",
            CType::UnsignedInt => "c_uint",
            CType::Long => "c_long",
            CType::UnsignedLong => "c_ulong",
            CType::LongLong => "c_longlong",
            CType::UnsignedLongLong => "c_ulonglong",
            CType::Int32 => "c_int32",
            CType::UInt32 => "c_uint32",
            CType::Int64 => "c_int64",
            CType::SizeT => "c_size_t",
            CType::SsizeT => "c_ssize_t",
            CType::Float => "c_float",
            CType::Double => "c_double",
            CType::Bool => "c_bool",
            CType::Void => "None",
            CType::CharPtr | CType::ConstCharPtr => "c_char_p",
            CType::VoidPtr | CType::ConstVoidPtr => "c_void_p",
        }
    }

    /// Host value type a loader converts this field into
    pub fn host_type(self) -> &'static str {
        match self.category() {
            CTypeCategory::Integer => "int",
            CTypeCategory::Float => "float",
            CTypeCategory::Bool => "bool",
            CTypeCategory::Void => "None",
            CTypeCategory::Char => "str",
            CTypeCategory::Pointer => match self {
                CType::CharPtr | CType::ConstCharPtr => "str",
                _ => "object",
            },
        }
    }

    pub fn category(self) -> CTypeCategory {
        match self {
            CType::Char => CTypeCategory::Char,
            CType::Float | CType::Double => CTypeCategory::Float,
            CType::Bool => CTypeCategory::Bool,
            CType::Void => CTypeCategory::Void,
            CType::CharPtr | CType::ConstCharPtr | CType::VoidPtr | CType::ConstVoidPtr => {
                CTypeCategory::Pointer
            }
            _ => CTypeCategory::Integer,
        }
    }

    /// Size in bytes on the current target
    pub fn size(self) -> usize {
        match self {
            CType::Char | CType::SignedChar | CType::UnsignedChar => size_of::<c_char>(),
            CType::Short | CType::UnsignedShort => size_of::<c_short>(),
            CType::Int | CType::UnsignedInt => size_of::<c_int>(),
            CType::Long | CType::UnsignedLong => size_of::<c_long>(),
            CType::LongLong | CType::UnsignedLongLong => size_of::<c_longlong>(),
            CType::Int32 | CType::UInt32 => size_of::<i32>(),
            CType::Int64 => size_of::<i64>(),
            CType::SizeT | CType::SsizeT => size_of::<usize>(),
            CType::Float => size_of::<f32>(),
            CType::Double => size_of::<f64>(),
            CType::Bool => size_of::<bool>(),
            CType::Void => 0,
            CType::CharPtr | CType::ConstCharPtr => size_of::<*const c_char>(),
            CType::VoidPtr | CType::ConstVoidPtr => size_of::<*const c_void>(),
        }
    }

    pub fn is_signed(self) -> bool {
        !matches!(
            self,
            CType::UnsignedChar
                | CType::UnsignedShort
                | CType::UnsignedInt
                | CType::UnsignedLong
                | CType::UnsignedLongLong
                | CType::UInt32
                | CType::SizeT
        )
    }

    /// Looks a type up by its `ctypes` class name.
    ///
    /// Pointer classes resolve to their non-const spelling.
    pub fn from_ctypes_name(name: &str) -> Option<CType> {
        ALL.iter()
            .copied()
            .filter(|t| !matches!(t, CType::ConstCharPtr | CType::ConstVoidPtr))
            .find(|t| t.ctypes_name() == name)
    }

    /// Parses a C type spelling, falling back to `void*` for anything
    /// unrecognised.
    pub fn parse_lenient(text: &str) -> CType {
        match text.parse() {
            Ok(ctype) => ctype,
            Err(_) => {
                tracing::warn!(c_type = %text, "unknown C type, using void*");
                CType::VoidPtr
            }
        }
    }
}

/// Collapses runs of whitespace and glues `*` to the preceding token.
fn normalise(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text.trim(), " ");
    SPACE_BEFORE_STAR.replace_all(&collapsed, "*").into_owned()
}

impl FromStr for CType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = normalise(s);
        if let Some(found) = ALL.iter().copied().find(|t| t.c_name() == normalised) {
            return Ok(found);
        }

        // Pointers to anything else collapse onto char* or void*
        if let Some(base) = normalised.strip_suffix('*') {
            let base = base.trim_start_matches("const ").trim();
            return Ok(match base {
                "char" | "signed char" | "unsigned char" => CType::CharPtr,
                _ => CType::VoidPtr,
            });
        }

        Err(crate::Error::ffi(
            "parse C type",
            format!("unrecognised C type '{s}'"),
        ))
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.c_name())
    }
}

impl Serialize for CType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.c_name())
    }
}

impl<'de> Deserialize<'de> for CType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(CType::parse_lenient(&text))
    }
}
