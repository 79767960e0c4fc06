//! Type shapes as reported by an introspection backend.
//!
//! A [`TypeShape`] is a closed set of variants. Anything that walks types
//! (import collection, printing) matches on every variant, so adding a
//! new kind of type means extending this enum and fixing the matches.
//!
//! In JSON a shape is either a `{"kind": ...}` object or a plain type
//! spelling (`"[]*example.com/store.Item"`), which is run through
//! [`parse_type_shape`](crate::type_parsing::parse_type_shape).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A module referenced by a named type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleRef {
    /// Full import path, e.g. `example.com/store`.
    pub path: String,
    /// Short name declared by the module. Empty means "last path segment".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl ModuleRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: String::new(),
        }
    }

    pub fn with_name(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// The module's own short name, used as the first alias proposal.
    pub fn short_name(&self) -> &str {
        if !self.name.is_empty() {
            return &self.name;
        }
        self.path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.path)
    }
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

/// A callable signature. Parameter names are never carried: the
/// generator synthesizes positional names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub params: Vec<TypeShape>,
    #[serde(default)]
    pub results: Vec<TypeShape>,
    /// The last parameter is variadic. Its shape is then a slice.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub variadic: bool,
}

impl Signature {
    pub fn new(params: Vec<TypeShape>, results: Vec<TypeShape>) -> Self {
        Self {
            params,
            results,
            variadic: false,
        }
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// A named method (interface member or top-level function).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(flatten)]
    pub signature: Signature,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            signature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    /// Predeclared basic type (`int`, `string`, `bool`, ...).
    Basic { name: String },
    /// Named type. `module: None` means a universe type such as `error`.
    Named {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        module: Option<ModuleRef>,
    },
    Pointer { elem: Box<TypeShape> },
    Slice { elem: Box<TypeShape> },
    Array { len: u64, elem: Box<TypeShape> },
    Map {
        key: Box<TypeShape>,
        value: Box<TypeShape>,
    },
    Chan {
        #[serde(default)]
        dir: ChanDir,
        elem: Box<TypeShape>,
    },
    Signature(Signature),
    /// Anonymous interface literal, `interface{}` when empty.
    Interface {
        #[serde(default)]
        methods: Vec<MethodDecl>,
    },
}

impl TypeShape {
    pub fn basic(name: impl Into<String>) -> Self {
        TypeShape::Basic { name: name.into() }
    }

    /// Named type declared in `module`.
    pub fn named(module: ModuleRef, name: impl Into<String>) -> Self {
        TypeShape::Named {
            name: name.into(),
            module: Some(module),
        }
    }

    /// Named type with no module (`error`, `any`).
    pub fn universe(name: impl Into<String>) -> Self {
        TypeShape::Named {
            name: name.into(),
            module: None,
        }
    }

    pub fn pointer(elem: TypeShape) -> Self {
        TypeShape::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: TypeShape) -> Self {
        TypeShape::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn map(key: TypeShape, value: TypeShape) -> Self {
        TypeShape::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(dir: ChanDir, elem: TypeShape) -> Self {
        TypeShape::Chan {
            dir,
            elem: Box::new(elem),
        }
    }
}

/// Mirror of [`TypeShape`] used only for the tagged JSON form.
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum TaggedShape {
    Basic {
        name: String,
    },
    Named {
        name: String,
        #[serde(default)]
        module: Option<ModuleRef>,
    },
    Pointer {
        elem: Box<TypeShape>,
    },
    Slice {
        elem: Box<TypeShape>,
    },
    Array {
        len: u64,
        elem: Box<TypeShape>,
    },
    Map {
        key: Box<TypeShape>,
        value: Box<TypeShape>,
    },
    Chan {
        #[serde(default)]
        dir: ChanDir,
        elem: Box<TypeShape>,
    },
    Signature(Signature),
    Interface {
        #[serde(default)]
        methods: Vec<MethodDecl>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ShapeRepr {
    Spelled(String),
    Tagged(TaggedShape),
}

impl<'de> Deserialize<'de> for TypeShape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let shape = match ShapeRepr::deserialize(deserializer)? {
            ShapeRepr::Spelled(text) => crate::type_parsing::parse_type_shape(&text)
                .map_err(serde::de::Error::custom)?,
            ShapeRepr::Tagged(tagged) => match tagged {
                TaggedShape::Basic { name } => TypeShape::Basic { name },
                TaggedShape::Named { name, module } => TypeShape::Named { name, module },
                TaggedShape::Pointer { elem } => TypeShape::Pointer { elem },
                TaggedShape::Slice { elem } => TypeShape::Slice { elem },
                TaggedShape::Array { len, elem } => TypeShape::Array { len, elem },
                TaggedShape::Map { key, value } => TypeShape::Map { key, value },
                TaggedShape::Chan { dir, elem } => TypeShape::Chan { dir, elem },
                TaggedShape::Signature(sig) => TypeShape::Signature(sig),
                TaggedShape::Interface { methods } => TypeShape::Interface { methods },
            },
        };
        Ok(shape)
    }
}

/// Spells a shape with full module paths (`*example.com/store.Item`).
/// This is the form accepted back by the type parser, not the aliased
/// form written into generated code.
impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Basic { name } => write!(f, "{}", name),
            TypeShape::Named { name, module: None } => write!(f, "{}", name),
            TypeShape::Named {
                name,
                module: Some(module),
            } => write!(f, "{}.{}", module.path, name),
            TypeShape::Pointer { elem } => write!(f, "*{}", elem),
            TypeShape::Slice { elem } => write!(f, "[]{}", elem),
            TypeShape::Array { len, elem } => write!(f, "[{}]{}", len, elem),
            TypeShape::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeShape::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {}", elem),
                ChanDir::Send => write!(f, "chan<- {}", elem),
                ChanDir::Recv => write!(f, "<-chan {}", elem),
            },
            TypeShape::Signature(sig) => write!(f, "func{}", sig),
            TypeShape::Interface { methods } => {
                write!(f, "interface{{")?;
                for (i, m) in methods.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}{}", m.name, m.signature)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Parameter list and results, without the leading `func`.
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        let last = self.params.len().saturating_sub(1);
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match p {
                TypeShape::Slice { elem } if self.variadic && i == last => {
                    write!(f, "...{}", elem)?
                }
                _ => write!(f, "{}", p)?,
            }
        }
        write!(f, ")")?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " {}", single),
            results => {
                write!(f, " (")?;
                for (i, r) in results.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", r)?;
                }
                write!(f, ")")
            }
        }
    }
}
