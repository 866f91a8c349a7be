//! Diagnostics reported while generating composites.
//!
//! Nothing reported here stops a whole run. Errors abort the composite they
//! concern, warnings only drop the offending piece of input.

use thiserror::Error ;

use crate::contract::TypeRef ;



/// How serious a diagnostic is.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord )]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
        f.write_str( match self { Self::Warning => "warning", Self::Error => "error" })
    }
}

/// Where in the input a diagnostic points.
#[derive( Debug, Clone, PartialEq, Eq, Hash, Default )]
pub struct Location {
    file: Option<String>,
    line: Option<u32>,
    column: Option<u32>,
}

impl Location {

    /// A location with no position information.
    pub fn unknown() -> Self { Self::default() }

    pub fn in_file( file: impl Into<String> ) -> Self {
        Self { file: Some( file.into() ), line: None, column: None }
    }

    /// Sets the 1-based line and column.
    pub fn at( mut self, line: u32, column: u32 ) -> Self {
        self.line = Some( line );
        self.column = Some( column );
        self
    }

    #[inline] pub fn file( &self ) -> Option<&str> { self.file.as_deref() }
    #[inline] pub fn line( &self ) -> Option<u32> { self.line }
    #[inline] pub fn column( &self ) -> Option<u32> { self.column }
}

impl std::fmt::Display for Location {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
        match ( &self.file, self.line, self.column ) {
            ( Some( file ), Some( line ), Some( column )) => write!( f, "{}:{}:{}", file, line, column ),
            ( Some( file ), Some( line ), None ) => write!( f, "{}:{}", file, line ),
            ( Some( file ), None, _ ) => f.write_str( file ),
            ( None, Some( line ), Some( column )) => write!( f, "{}:{}", line, column ),
            ( None, Some( line ), None ) => write!( f, "{}", line ),
            ( None, None, _ ) => f.write_str( "<unknown>" ),
        }
    }
}

/// What went wrong. The `Display` output is the diagnostic message.
#[derive( Debug, Clone, PartialEq, Eq, Error )]
pub enum DiagnosticKind {
    #[error( "'{0}' must be declared partial to receive generated members" )]
    NonPartialComposite( String ),
    #[error( "'{composite}' is nested in '{scope}', which must be declared partial as well" )]
    NonPartialScope { composite: String, scope: String },
    #[error( "Members of contract '{contract}' could not be read: {reason}" )]
    ContractUnavailable { contract: TypeRef, reason: String },
    #[error( "'{0}' declares no contracts; nothing will be forwarded" )]
    NoContracts( String ),
    #[error( "'{composite}' lists contract '{contract}' more than once; the repetition is ignored" )]
    DuplicateContract { composite: String, contract: TypeRef },
    #[error( "Construction directive on '{0}' lists no providers and is ignored" )]
    EmptyDirective( String ),
    #[error( "Directive entry '{0}' does not name a type and is ignored" )]
    UnparsableEntry( String ),
    #[error( "Provider '{provider}' matches none of the remaining contracts of '{composite}'; its constructor parameter is never stored" )]
    UnmatchedProvider { composite: String, provider: TypeRef },
}

impl DiagnosticKind {

    /// Stable diagnostic code.
    pub fn code( &self ) -> &'static str {
        match self {
            Self::NonPartialComposite( _ ) => "MIX0001",
            Self::NonPartialScope { .. } => "MIX0002",
            Self::ContractUnavailable { .. } => "MIX0003",
            Self::NoContracts( _ ) => "MIX0100",
            Self::DuplicateContract { .. } => "MIX0101",
            Self::EmptyDirective( _ ) => "MIX0200",
            Self::UnparsableEntry( _ ) => "MIX0201",
            Self::UnmatchedProvider { .. } => "MIX0202",
        }
    }

    pub fn severity( &self ) -> Severity {
        match self {
            Self::NonPartialComposite( _ ) | Self::NonPartialScope { .. } | Self::ContractUnavailable { .. } => Severity::Error,
            Self::NoContracts( _ ) | Self::DuplicateContract { .. } | Self::EmptyDirective( _ ) | Self::UnparsableEntry( _ ) | Self::UnmatchedProvider { .. } => Severity::Warning,
        }
    }

}

/// A reported diagnostic.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct Diagnostic {
    kind: DiagnosticKind,
    location: Location,
}

impl Diagnostic {

    pub const CATEGORY: &'static str = "Mixin" ;

    pub fn new( kind: DiagnosticKind, location: Location ) -> Self { Self { kind, location }}

    #[inline] pub fn kind( &self ) -> &DiagnosticKind { &self.kind }
    #[inline] pub fn location( &self ) -> &Location { &self.location }
    #[inline] pub fn code( &self ) -> &'static str { self.kind.code() }
    #[inline] pub fn severity( &self ) -> Severity { self.kind.severity() }
    #[inline] pub fn category( &self ) -> &'static str { Self::CATEGORY }
    #[inline] pub fn is_error( &self ) -> bool { self.severity() == Severity::Error }
    pub fn message( &self ) -> String { self.kind.to_string() }
}

impl std::fmt::Display for Diagnostic {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
        write!( f, "{}[{}]: {}", self.severity(), self.code(), self.kind )
    }
}

/// Receives diagnostics as they are produced.
pub trait DiagnosticSink {
    fn report( &mut self, diagnostic: Diagnostic );
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report( &mut self, diagnostic: Diagnostic ) { self.push( diagnostic ) }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report( &mut self, diagnostic: Diagnostic ) { ( **self ).report( diagnostic ) }
}
