//! Composite declarations as delivered by discovery.

use serde::Deserialize ;

use crate::contract::TypeRef ;
use crate::diagnostics::Location ;
use crate::directive::RawDirective ;



/// Kind of a type declaration.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize )]
#[serde( rename_all = "kebab-case" )]
pub enum TypeKind {
    #[default] Class,
    Struct,
    Record,
    RecordStruct,
}

impl TypeKind {
    pub fn keyword( self ) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Record => "record",
            Self::RecordStruct => "record struct",
        }
    }
}

/// A type that lexically encloses a composite.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct ScopeDecl {
    name: String,
    kind: TypeKind,
    type_parameters: Vec<String>,
    partial: bool,
    location: Location,
}

impl ScopeDecl {

    /// A partial class scope with no type parameters.
    pub fn new( name: impl Into<String> ) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            type_parameters: Vec::with_capacity( 0 ),
            partial: true,
            location: Location::unknown(),
        }
    }

    pub fn with_kind( mut self, kind: TypeKind ) -> Self { self.kind = kind ; self }
    pub fn with_type_parameters( mut self, type_parameters: impl IntoIterator<Item = impl Into<String>> ) -> Self {
        self.type_parameters = type_parameters.into_iter().map( Into::into ).collect();
        self
    }
    pub fn with_partial( mut self, partial: bool ) -> Self { self.partial = partial ; self }
    pub fn with_location( mut self, location: Location ) -> Self { self.location = location ; self }

    #[inline] pub fn name( &self ) -> &str { &self.name }
    #[inline] pub fn kind( &self ) -> TypeKind { self.kind }
    #[inline] pub fn type_parameters( &self ) -> &[String] { &self.type_parameters }
    #[inline] pub fn is_partial( &self ) -> bool { self.partial }
    #[inline] pub fn location( &self ) -> &Location { &self.location }
}

/// A type marked for composite generation.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct CompositeDecl {
    name: String,
    kind: TypeKind,
    type_parameters: Vec<String>,
    partial: bool,
    namespace: Option<String>,
    /// Enclosing types, outermost first
    scopes: Vec<ScopeDecl>,
    contracts: Vec<TypeRef>,
    directives: Vec<RawDirective>,
    location: Location,
}

impl CompositeDecl {

    /// A partial, top level class with no contracts.
    pub fn new( name: impl Into<String> ) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            type_parameters: Vec::with_capacity( 0 ),
            partial: true,
            namespace: None,
            scopes: Vec::with_capacity( 0 ),
            contracts: Vec::new(),
            directives: Vec::with_capacity( 0 ),
            location: Location::unknown(),
        }
    }

    pub fn with_kind( mut self, kind: TypeKind ) -> Self { self.kind = kind ; self }
    pub fn with_type_parameters( mut self, type_parameters: impl IntoIterator<Item = impl Into<String>> ) -> Self {
        self.type_parameters = type_parameters.into_iter().map( Into::into ).collect();
        self
    }
    pub fn with_partial( mut self, partial: bool ) -> Self { self.partial = partial ; self }
    pub fn with_namespace( mut self, namespace: impl Into<String> ) -> Self {
        self.namespace = Some( namespace.into() );
        self
    }
    /// Adds an enclosing scope inside the ones already added.
    pub fn with_scope( mut self, scope: ScopeDecl ) -> Self { self.scopes.push( scope ); self }
    pub fn with_contract( mut self, contract: TypeRef ) -> Self { self.contracts.push( contract ); self }
    pub fn with_directive( mut self, directive: RawDirective ) -> Self { self.directives.push( directive ); self }
    pub fn with_location( mut self, location: Location ) -> Self { self.location = location ; self }

    #[inline] pub fn name( &self ) -> &str { &self.name }
    #[inline] pub fn kind( &self ) -> TypeKind { self.kind }
    #[inline] pub fn type_parameters( &self ) -> &[String] { &self.type_parameters }
    #[inline] pub fn is_partial( &self ) -> bool { self.partial }
    #[inline] pub fn namespace( &self ) -> Option<&str> { self.namespace.as_deref() }
    #[inline] pub fn scopes( &self ) -> &[ScopeDecl] { &self.scopes }
    #[inline] pub fn contracts( &self ) -> &[TypeRef] { &self.contracts }
    #[inline] pub fn directives( &self ) -> &[RawDirective] { &self.directives }
    #[inline] pub fn location( &self ) -> &Location { &self.location }

    /// Name with its type parameters, e.g. `Repository<T>`.
    pub fn display_name( &self ) -> String {
        match self.type_parameters.is_empty() {
            true => self.name.clone(),
            false => format!( "{}<{}>", self.name, self.type_parameters.join( ", " )),
        }
    }

    /// Artifact name unique per composite: namespace, enclosing types and the
    /// type itself joined by dots, generic types carrying a `` `N `` arity suffix.
    pub fn hint_name( &self ) -> String {
        fn segment( name: &str, arity: usize ) -> String {
            match arity {
                0 => name.to_string(),
                arity => format!( "{}`{}", name, arity ),
            }
        }
        self.namespace.iter().cloned()
            .chain( self.scopes.iter().map(| scope | segment( scope.name(), scope.type_parameters().len() )))
            .chain( std::iter::once( segment( &self.name, self.type_parameters.len() )))
            .collect::<Vec<_>>()
            .join( "." )
    }

}

/// Trait for enumerating composite declarations from a user-defined source.
///
/// Discovery is up to the host: a syntax tree walk, a manifest file, or a
/// fixed list in a test.
pub trait DeclarationSource {

    /// Iterator over the discovered declarations.
    type DeclarationIter<'a>: IntoIterator<Item = &'a CompositeDecl> where Self: 'a ;

    /// Returns every composite declaration, in discovery order.
    fn declarations( &self ) -> Self::DeclarationIter<'_> ;

}

impl DeclarationSource for Vec<CompositeDecl> {
    type DeclarationIter<'a> = std::slice::Iter<'a, CompositeDecl> ;
    fn declarations( &self ) -> Self::DeclarationIter<'_> { self.iter() }
}

impl DeclarationSource for [CompositeDecl] {
    type DeclarationIter<'a> = std::slice::Iter<'a, CompositeDecl> ;
    fn declarations( &self ) -> Self::DeclarationIter<'_> { self.iter() }
}
