//! Type-annotated export names.
//!
//! A host that resolves foreign functions by signature looks up names of the
//! form
//!
//! ```text
//! $<ret>_<name>_<param>_<param>...
//! ```
//!
//! - `<name>` is ASCII alphanumeric and never contains `_`.
//! - `<ret>` and each `<param>` are [`CType`] tokens. `const_char` and
//!   `size_t` contain `_` themselves, so tokens are matched against the known
//!   spellings rather than split blindly.
//! - Pointers are implied: `char` is a `char*` whose ownership passes to the
//!   caller, `const_char` is a borrowed `const char*`.
//!
//! `$char_readfile_const_char` therefore reads as
//! `char *readfile(const char *)` with a caller-owned result.
//!
//! Bare exports (plain identifiers such as `c_ls`) carry no type information
//! and are not described by this module.

use std::fmt;

use thiserror::Error;

/// Prefix marking a type-annotated symbol.
pub const ANNOTATED_PREFIX: char = '$';

const SEPARATOR: char = '_';

/// Boundary-safe C types that may appear in an annotated symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CType {
    Void,
    /// `char*` handed to the caller, who must release it.
    Char,
    /// `const char*` borrowed for the duration of the call.
    ConstChar,
    Int,
    SizeT,
    Bool,
}

impl CType {
    /// Every token, longest spelling first so greedy matching is unambiguous.
    pub const ALL: [CType; 6] = [
        CType::ConstChar,
        CType::SizeT,
        CType::Void,
        CType::Char,
        CType::Bool,
        CType::Int,
    ];

    /// Spelling inside a symbol.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Char => "char",
            Self::ConstChar => "const_char",
            Self::Int => "int",
            Self::SizeT => "size_t",
            Self::Bool => "bool",
        }
    }

    /// C declaration spelling.
    #[must_use]
    pub const fn c_spelling(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Char => "char *",
            Self::ConstChar => "const char *",
            Self::Int => "int",
            Self::SizeT => "size_t",
            Self::Bool => "bool",
        }
    }

    /// True when the type is a pointer.
    #[must_use]
    pub const fn is_pointer(self) -> bool {
        matches!(self, Self::Char | Self::ConstChar)
    }

    /// Matches the token at the start of `s`, returning it and the rest.
    fn strip_token(s: &str) -> Option<(Self, &str)> {
        Self::ALL.into_iter().find_map(|ty| {
            let rest = s.strip_prefix(ty.token())?;
            (rest.is_empty() || rest.starts_with(SEPARATOR)).then_some((ty, rest))
        })
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Errors produced while building or parsing an annotated symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("symbol `{0}` does not start with `$`")]
    MissingPrefix(String),
    #[error("symbol `{symbol}`: unknown type token at `{at}`")]
    UnknownType { symbol: String, at: String },
    #[error("symbol `{0}` has no function name")]
    MissingName(String),
    #[error("function name `{0}` must be non-empty ASCII alphanumeric")]
    InvalidName(String),
    #[error("`void` is only valid as a return type")]
    VoidParameter,
}

/// Return and parameter types of an exported function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub name: String,
    pub ret: CType,
    pub params: Vec<CType>,
}

fn valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric())
}

impl Signature {
    /// Builds a signature, validating the name and parameter list.
    pub fn new(
        name: impl Into<String>,
        ret: CType,
        params: Vec<CType>,
    ) -> Result<Self, SymbolError> {
        let name = name.into();
        if !valid_name(&name) {
            return Err(SymbolError::InvalidName(name));
        }
        if params.contains(&CType::Void) {
            return Err(SymbolError::VoidParameter);
        }
        Ok(Self { name, ret, params })
    }

    /// The exported symbol name for this signature.
    #[must_use]
    pub fn mangle(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 16);
        out.push(ANNOTATED_PREFIX);
        out.push_str(self.ret.token());
        out.push(SEPARATOR);
        out.push_str(&self.name);
        for param in &self.params {
            out.push(SEPARATOR);
            out.push_str(param.token());
        }
        out
    }

    /// Parses an annotated symbol back into its signature.
    pub fn parse(symbol: &str) -> Result<Self, SymbolError> {
        let body = symbol
            .strip_prefix(ANNOTATED_PREFIX)
            .ok_or_else(|| SymbolError::MissingPrefix(symbol.to_string()))?;

        let unknown = |at: &str| SymbolError::UnknownType {
            symbol: symbol.to_string(),
            at: at.to_string(),
        };

        let (ret, rest) = CType::strip_token(body).ok_or_else(|| unknown(body))?;
        let rest = rest
            .strip_prefix(SEPARATOR)
            .ok_or_else(|| SymbolError::MissingName(symbol.to_string()))?;

        let (name, mut rest) = match rest.find(SEPARATOR) {
            Some(at) => (&rest[..at], &rest[at..]),
            None => (rest, ""),
        };
        if name.is_empty() {
            return Err(SymbolError::MissingName(symbol.to_string()));
        }

        let mut params = Vec::new();
        while let Some(tail) = rest.strip_prefix(SEPARATOR) {
            let (ty, after) = CType::strip_token(tail).ok_or_else(|| unknown(tail))?;
            params.push(ty);
            rest = after;
        }

        Self::new(name, ret, params)
    }

    /// C prototype, e.g. `char *readfile(const char *)`.
    #[must_use]
    pub fn c_prototype(&self) -> String {
        let params = if self.params.is_empty() {
            "void".to_string()
        } else {
            self.params
                .iter()
                .map(|p| p.c_spelling())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let ret = self.ret.c_spelling();
        let gap = if self.ret.is_pointer() { "" } else { " " };
        format!("{ret}{gap}{}({params})", self.name)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mangle())
    }
}

/// Returns true if `symbol` uses the annotated form.
#[must_use]
pub fn is_annotated(symbol: &str) -> bool {
    symbol.starts_with(ANNOTATED_PREFIX)
}
