//! Decoding of compiler-mangled member identifiers.
//!
//! Identifiers look like `<kind>:<qualified.path>[(<params>)]`, for example
//! `T:Foo.Bar`, ``T:Foo.Dict`2`` or `M:Foo.Bar.Baz(System.Int32)`.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Parameter list without nested parentheses.
static RE_PARAMS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^()]*\)").unwrap());

/// Separator between a generic name and its arity (`Dict`2`).
pub const GENERIC_MARKER: char = '`';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier `{0}` has no member kind prefix")]
    MissingKind(String),
    #[error("identifier `{0}` has an empty member path")]
    EmptyPath(String),
    #[error("identifier `{0}` has no declaring type")]
    MissingDeclaringType(String),
}

/// One-letter member kinds with a markdown template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Type,
    Method,
    Property,
    Field,
    Event,
}

impl MemberKind {
    pub fn code(self) -> &'static str {
        match self {
            MemberKind::Type => "T",
            MemberKind::Method => "M",
            MemberKind::Property => "P",
            MemberKind::Field => "F",
            MemberKind::Event => "E",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MemberKind::Type => "Type",
            MemberKind::Method => "Method",
            MemberKind::Property => "Property",
            MemberKind::Field => "Field",
            MemberKind::Event => "Event",
        }
    }
}

impl FromStr for MemberKind {
    type Err = ();

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "T" => Ok(MemberKind::Type),
            "M" => Ok(MemberKind::Method),
            "P" => Ok(MemberKind::Property),
            "F" => Ok(MemberKind::Field),
            "E" => Ok(MemberKind::Event),
            _ => Err(()),
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Decoded identifier.
///
/// `kind` stays a raw string: unknown kinds (e.g. `N:` or `!:`) decode fine
/// and are only dropped later by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberId {
    pub kind: String,
    /// Dotted namespace. For non-type members the declaring type is not part
    /// of it and is not kept anywhere.
    pub namespace: String,
    /// Last path segment, generic arity suffix included.
    pub name: String,
}

impl MemberId {
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let (kind, qualified) = raw
            .split_once(':')
            .filter(|(kind, _)| !kind.is_empty())
            .ok_or_else(|| IdentifierError::MissingKind(raw.to_string()))?;

        let path = RE_PARAMS.replacen(qualified, 1, "");

        let mut segments: Vec<&str> = path.split('.').collect();
        let name = match segments.pop() {
            Some(name) if !name.is_empty() => name,
            _ => return Err(IdentifierError::EmptyPath(raw.to_string())),
        };

        if kind != MemberKind::Type.code() && segments.pop().is_none() {
            return Err(IdentifierError::MissingDeclaringType(raw.to_string()));
        }

        Ok(MemberId {
            kind: kind.to_string(),
            namespace: segments.join("."),
            name: name.to_string(),
        })
    }

    pub fn member_kind(&self) -> Option<MemberKind> {
        self.kind.parse().ok()
    }

    /// Name without the generic arity suffix.
    pub fn base_name(&self) -> &str {
        strip_generic_suffix(&self.name)
    }

    pub fn is_generic(&self) -> bool {
        self.name.contains(GENERIC_MARKER)
    }
}

/// Everything before the first backtick.
pub fn strip_generic_suffix(s: &str) -> &str {
    s.split(GENERIC_MARKER).next().unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_identifier() {
        let id = MemberId::parse("T:A.B.C").unwrap();
        assert_eq!(id.kind, "T");
        assert_eq!(id.namespace, "A.B");
        assert_eq!(id.name, "C");
        assert_eq!(id.member_kind(), Some(MemberKind::Type));
    }

    #[test]
    fn method_drops_declaring_type_and_params() {
        let id = MemberId::parse("M:A.B.C.Method(System.Int32)").unwrap();
        assert_eq!(id.kind, "M");
        assert_eq!(id.namespace, "A.B");
        assert_eq!(id.name, "Method");
    }

    #[test]
    fn params_with_dots_are_removed_before_split() {
        let id = MemberId::parse("M:A.C.Run(System.String,System.IO.Stream)").unwrap();
        assert_eq!(id.namespace, "A");
        assert_eq!(id.name, "Run");
    }

    #[test]
    fn global_namespace() {
        assert_eq!(MemberId::parse("T:Widget").unwrap().namespace, "");
        assert_eq!(MemberId::parse("P:Widget.Size").unwrap().namespace, "");
    }

    #[test]
    fn generic_name_keeps_arity() {
        let id = MemberId::parse("T:A.Dict`2").unwrap();
        assert_eq!(id.name, "Dict`2");
        assert_eq!(id.base_name(), "Dict");
        assert!(id.is_generic());
    }

    #[test]
    fn unknown_kind_still_decodes() {
        let id = MemberId::parse("N:A.B.C").unwrap();
        assert_eq!(id.kind, "N");
        assert_eq!(id.member_kind(), None);
    }

    #[test]
    fn missing_kind() {
        assert_eq!(
            MemberId::parse("A.B.C"),
            Err(IdentifierError::MissingKind("A.B.C".to_string()))
        );
        assert!(matches!(
            MemberId::parse(":A.B"),
            Err(IdentifierError::MissingKind(_))
        ));
    }

    #[test]
    fn empty_path() {
        assert!(matches!(
            MemberId::parse("T:"),
            Err(IdentifierError::EmptyPath(_))
        ));
        assert!(matches!(
            MemberId::parse("T:A."),
            Err(IdentifierError::EmptyPath(_))
        ));
    }

    #[test]
    fn member_without_declaring_type() {
        assert!(matches!(
            MemberId::parse("M:Run()"),
            Err(IdentifierError::MissingDeclaringType(_))
        ));
    }

    #[test]
    fn strip_suffix() {
        assert_eq!(strip_generic_suffix("T:A.B`1"), "T:A.B");
        assert_eq!(strip_generic_suffix("M:A.B.Foo``1(``0)"), "M:A.B.Foo");
        assert_eq!(strip_generic_suffix("T:A.B"), "T:A.B");
    }
}
