//! Export table.
//!
//! One row per exported symbol, with the C signature a host must use to call
//! it. Annotated rows must satisfy `symbol == Signature::mangle()`.

use fixturefs_core::symbol::{CType, Signature, is_annotated};

use crate::dirent_abi::C_LS_SYMBOL;
use crate::io_abi::{FREEFILE_SYMBOL, READFILE_SYMBOL};

/// Description of one exported function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSpec {
    /// Name the host resolves.
    pub symbol: &'static str,
    /// Function name inside the signature.
    pub name: &'static str,
    pub ret: CType,
    pub params: &'static [CType],
    /// What the caller must do with the result.
    pub ownership: Ownership,
    pub summary: &'static str,
}

/// Who owns the value an export returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Scalar or nothing; no lifetime concerns.
    None,
    /// Heap buffer the caller must pass to the named release symbol.
    CallerReleases { release: &'static str },
}

/// All symbols exported by this library.
pub const EXPORTS: &[ExportSpec] = &[
    ExportSpec {
        symbol: C_LS_SYMBOL,
        name: "c_ls",
        ret: CType::Int,
        params: &[CType::ConstChar],
        ownership: Ownership::None,
        summary: "print the immediate entries of a directory to stdout, one per line",
    },
    ExportSpec {
        symbol: READFILE_SYMBOL,
        name: "readfile",
        ret: CType::Char,
        params: &[CType::ConstChar],
        ownership: Ownership::CallerReleases {
            release: FREEFILE_SYMBOL,
        },
        summary: "read a text file as newline-terminated lines; NULL if it cannot be opened",
    },
    ExportSpec {
        symbol: FREEFILE_SYMBOL,
        name: "freefile",
        ret: CType::Void,
        params: &[CType::Char],
        ownership: Ownership::None,
        summary: "release a buffer returned by readfile",
    },
];

impl ExportSpec {
    /// True when the symbol encodes its signature.
    #[must_use]
    pub fn is_annotated(&self) -> bool {
        is_annotated(self.symbol)
    }

    /// The signature as data.
    #[must_use]
    pub fn signature(&self) -> Signature {
        Signature {
            name: self.name.to_string(),
            ret: self.ret,
            params: self.params.to_vec(),
        }
    }

    /// C prototype the host should declare.
    #[must_use]
    pub fn c_prototype(&self) -> String {
        self.signature().c_prototype()
    }
}

/// Find an export by the symbol the host resolves.
#[must_use]
pub fn lookup(symbol: &str) -> Option<&'static ExportSpec> {
    EXPORTS.iter().find(|spec| spec.symbol == symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{c_char, c_int};

    #[test]
    fn annotated_symbols_match_their_signatures() {
        for spec in EXPORTS.iter().filter(|s| s.is_annotated()) {
            assert_eq!(spec.signature().mangle(), spec.symbol);
            assert_eq!(
                Signature::parse(spec.symbol).expect("parse"),
                spec.signature()
            );
        }
    }

    #[test]
    fn bare_symbol_is_plain_identifier() {
        let ls = lookup("c_ls").expect("c_ls exported");
        assert!(!ls.is_annotated());
        assert_eq!(ls.c_prototype(), "int c_ls(const char *)");
    }

    #[test]
    fn owned_results_name_an_exported_release() {
        for spec in EXPORTS {
            if let Ownership::CallerReleases { release } = spec.ownership {
                let rel = lookup(release).expect("release symbol exported");
                assert_eq!(rel.ret, CType::Void);
                assert_eq!(rel.params, &[spec.ret]);
            }
        }
    }

    #[test]
    fn symbols_are_unique() {
        for (i, a) in EXPORTS.iter().enumerate() {
            for b in &EXPORTS[i + 1..] {
                assert_ne!(a.symbol, b.symbol);
            }
        }
    }

    #[test]
    fn function_types_match_table() {
        let _: unsafe extern "C" fn(*const c_char) -> c_int = crate::dirent_abi::c_ls;
        let _: unsafe extern "C" fn(*const c_char) -> *mut c_char = crate::io_abi::readfile;
        let _: unsafe extern "C" fn(*mut c_char) = crate::io_abi::freefile;
    }

    #[test]
    fn unknown_symbol_is_none() {
        assert!(lookup("readfile").is_none());
    }
}
