use crate::{ConfigError, DecodeFn, matches_path};
use quote::ToTokens;
use std::{fmt, str::FromStr};
use syn::{GenericArgument, PathArguments, Type, TypePath, TypeReference};

/// Host-language types with a dedicated decode function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostKind {
    I32,
    String,
    Bool,
    F32,
    I64,
    F64,
    I16,
    /// Any other type, kept as its path (e.g. `time::PrimitiveDateTime`).
    Other(String),
}

/// Type tag of an entity field as declared in the host language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostType {
    pub kind: HostKind,
    /// Declared through `Option<..>`.
    pub nullable: bool,
}

impl HostType {
    pub fn new(kind: HostKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub fn nullable(kind: HostKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }

    pub fn from_type(ty: &Type) -> Self {
        match ty {
            Type::Reference(TypeReference { elem, .. }) => Self::from_type(elem),
            Type::Paren(paren) => Self::from_type(&paren.elem),
            Type::Group(group) => Self::from_type(&group.elem),
            Type::Path(TypePath { path, .. }) => {
                if let Some(ident) = path.get_ident() {
                    let kind = if ident == "i32" {
                        Some(HostKind::I32)
                    } else if ident == "i64" {
                        Some(HostKind::I64)
                    } else if ident == "i16" {
                        Some(HostKind::I16)
                    } else if ident == "f32" {
                        Some(HostKind::F32)
                    } else if ident == "f64" {
                        Some(HostKind::F64)
                    } else if ident == "bool" {
                        Some(HostKind::Bool)
                    } else if ident == "str" {
                        Some(HostKind::String)
                    } else {
                        None
                    };
                    if let Some(kind) = kind {
                        return Self::new(kind);
                    }
                }
                if matches_path(path, &["std", "string", "String"]) {
                    return Self::new(HostKind::String);
                }
                let is_option = matches_path(path, &["std", "option", "Option"]);
                let is_wrapper = is_option
                    || matches_path(path, &["std", "boxed", "Box"])
                    || matches_path(path, &["std", "rc", "Rc"])
                    || matches_path(path, &["std", "sync", "Arc"])
                    || matches_path(path, &["std", "borrow", "Cow"]);
                if is_wrapper {
                    let inner = path.segments.last().and_then(|v| match &v.arguments {
                        PathArguments::AngleBracketed(bracketed) => {
                            bracketed.args.iter().find_map(|arg| match arg {
                                GenericArgument::Type(ty) => Some(ty),
                                _ => None,
                            })
                        }
                        _ => None,
                    });
                    if let Some(inner) = inner {
                        let mut result = Self::from_type(inner);
                        result.nullable |= is_option;
                        return result;
                    }
                }
                Self::new(HostKind::Other(compact(path.to_token_stream().to_string())))
            }
            _ => Self::new(HostKind::Other(compact(ty.to_token_stream().to_string()))),
        }
    }

    /// Decode function selected by the host type alone, `None` for `HostKind::Other`.
    pub fn decode_fn(&self) -> Option<DecodeFn> {
        Some(match self.kind {
            HostKind::I32 => DecodeFn::Integer,
            HostKind::String => DecodeFn::Text,
            HostKind::Bool => DecodeFn::Boolean,
            HostKind::F32 => DecodeFn::Float,
            HostKind::I64 => DecodeFn::Long,
            HostKind::F64 => DecodeFn::Double,
            HostKind::I16 => DecodeFn::Short,
            HostKind::Other(..) => return None,
        })
    }
}

fn compact(tokens: String) -> String {
    tokens.chars().filter(|c| !c.is_whitespace()).collect()
}

impl FromStr for HostType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        syn::parse_str::<Type>(s)
            .map(|ty| Self::from_type(&ty))
            .map_err(|e| ConfigError::InvalidHostType(s.to_string(), e.to_string()))
    }
}

impl From<HostKind> for HostType {
    fn from(value: HostKind) -> Self {
        HostType::new(value)
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match &self.kind {
            HostKind::I32 => "i32",
            HostKind::String => "String",
            HostKind::Bool => "bool",
            HostKind::F32 => "f32",
            HostKind::I64 => "i64",
            HostKind::F64 => "f64",
            HostKind::I16 => "i16",
            HostKind::Other(v) => v.as_str(),
        };
        if self.nullable {
            write!(f, "Option<{}>", name)
        } else {
            f.write_str(name)
        }
    }
}
