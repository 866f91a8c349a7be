//! Capability contract model.
//!
//! A [`Contract`] is an interface-like specification a composite must expose: an
//! identity ( [`TypeRef`] ) and an ordered list of [`Member`]s. Contracts are read
//! once from the type-system collaborator and never mutated afterwards.
//!
//! Member signatures are kept in their rendered host form (e.g. `string`,
//! `global::System.Collections.Generic.List<T>`). The model does not try to
//! understand them, it only carries them through to the emitter.

use serde::Deserialize ;
use thiserror::Error ;



/// Errors raised when a model value would violate its invariants.
#[derive( Debug, Clone, PartialEq, Eq, Error )]
pub enum ModelError {
    /// A type reference with no path.
    #[error( "Type reference is empty" )] EmptyTypePath,
    /// A path segment that is not a valid identifier.
    #[error( "Invalid segment '{segment}' in type reference '{path}'" )]
    InvalidSegment { path: String, segment: String },
    /// Generic argument brackets do not balance.
    #[error( "Unbalanced generic arguments in type reference '{0}'" )] UnbalancedArguments( String ),
    /// A property must be readable, writable, or both.
    #[error( "Property '{0}' has neither a getter nor a setter" )] PropertyWithoutAccessors( String ),
}



/// A reference to a named type: a contract, a provider, or both.
///
/// Identity is structural: two references are the same type when their
/// qualified paths and generic arguments match exactly. Generic arguments are
/// kept as rendered text since they may name type parameters of the composite.
#[derive( Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord )]
pub struct TypeRef {
    /// Dot separated qualified name without generic arguments (e.g. `Sample.IWithMethod`)
    path: String,
    /// Rendered generic arguments (e.g. `["T"]`, `["string"]`)
    arguments: Vec<String>,
}

impl TypeRef {

    /// Creates a type reference from a qualified path and rendered generic arguments.
    ///
    /// # Errors
    /// Fails if the path is empty or any of its segments is not an identifier.
    pub fn new(
        path: impl Into<String>,
        arguments: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ModelError> {
        let path = path.into();
        let path = path.strip_prefix( GLOBAL_PREFIX ).map( str::to_string ).unwrap_or( path );
        validate_path( &path )?;
        Ok( Self { path, arguments: arguments.into_iter().map( Into::into ).collect() })
    }

    /// Parses a reference such as `Sample.IRepository<T, global::System.String>`.
    ///
    /// A leading `global::` is accepted and dropped. Only the outermost argument
    /// list is split; nested arguments stay as text.
    ///
    /// # Errors
    /// Fails on an empty path, an invalid segment or unbalanced angle brackets.
    pub fn parse( text: &str ) -> Result<Self, ModelError> {
        let text = text.trim();
        let text = text.strip_prefix( GLOBAL_PREFIX ).unwrap_or( text );
        match text.find( '<' ) {
            None if text.contains( '>' ) => Err( ModelError::UnbalancedArguments( text.to_string() )),
            None => Self::new( text, Vec::<String>::new() ),
            Some( open ) => {
                let inner = text[open..]
                    .strip_prefix( '<' )
                    .and_then(| rest | rest.strip_suffix( '>' ))
                    .ok_or_else(|| ModelError::UnbalancedArguments( text.to_string() ))?;
                let arguments = split_arguments( inner )
                    .ok_or_else(|| ModelError::UnbalancedArguments( text.to_string() ))?;
                Self::new( text[..open].trim(), arguments )
            }
        }
    }

    /// Qualified path without generic arguments.
    #[inline] pub fn path( &self ) -> &str { &self.path }

    /// Rendered generic arguments.
    #[inline] pub fn arguments( &self ) -> &[String] { &self.arguments }

    /// Number of generic arguments.
    #[inline] pub fn arity( &self ) -> usize { self.arguments.len() }

    /// Last path segment (e.g. `IWithMethod` for `Sample.IWithMethod`).
    pub fn simple_name( &self ) -> &str {
        self.path.rsplit( '.' ).next().unwrap_or( &self.path )
    }

    /// Fully qualified form used in emitted code, e.g. `global::Sample.IRepository<T>`.
    pub fn qualified( &self ) -> String {
        match self.arguments.is_empty() {
            true => format!( "{}{}", GLOBAL_PREFIX, self.path ),
            false => format!( "{}{}<{}>", GLOBAL_PREFIX, self.path, self.arguments.join( ", " )),
        }
    }

}

impl std::fmt::Display for TypeRef {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
        match self.arguments.is_empty() {
            true => write!( f, "{}", self.path ),
            false => write!( f, "{}<{}>", self.path, self.arguments.join( ", " )),
        }
    }
}

const GLOBAL_PREFIX: &str = "global::" ;

fn validate_path( path: &str ) -> Result<(), ModelError> {
    if path.is_empty() { return Err( ModelError::EmptyTypePath ) }
    match path.split( '.' ).find(| segment | !is_identifier( segment )) {
        Some( segment ) => Err( ModelError::InvalidSegment { path: path.to_string(), segment: segment.to_string() }),
        None => Ok(()),
    }
}

fn is_identifier( segment: &str ) -> bool {
    let segment = segment.strip_prefix( '@' ).unwrap_or( segment );
    let mut chars = segment.chars();
    match chars.next() {
        Some( first ) if first.is_alphabetic() || first == '_' => chars.all(| c | c.is_alphanumeric() || c == '_' ),
        _ => false,
    }
}

/// Splits a generic argument list on its top level commas.
fn split_arguments( inner: &str ) -> Option<Vec<String>> {
    let mut depth = 0_usize ;
    let mut current = String::new();
    let mut arguments = Vec::new();
    for c in inner.chars() {
        match c {
            '<' | '(' | '[' => { depth += 1 ; current.push( c ); }
            '>' | ')' | ']' => { depth = depth.checked_sub( 1 )?; current.push( c ); }
            ',' if depth == 0 => { arguments.push( std::mem::take( &mut current ).trim().to_string() ); }
            _ => current.push( c ),
        }
    }
    if depth != 0 { return None }
    arguments.push( current.trim().to_string() );
    match arguments.iter().any( String::is_empty ) {
        true => None,
        false => Some( arguments ),
    }
}



/// Declared accessibility of a member or accessor.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize )]
#[serde( rename_all = "kebab-case" )]
pub enum Accessibility {
    #[default] Public,
    ProtectedInternal,
    Internal,
    Protected,
    PrivateProtected,
    Private,
}

impl Accessibility {

    /// Keyword(s) used in a declaration.
    pub fn keyword( self ) -> &'static str {
        match self {
            Self::Public => "public",
            Self::ProtectedInternal => "protected internal",
            Self::Internal => "internal",
            Self::Protected => "protected",
            Self::PrivateProtected => "private protected",
            Self::Private => "private",
        }
    }

    /// Whether every location allowed by `self` is also allowed by `other`, and
    /// `other` allows strictly more.
    ///
    /// `Internal` and `Protected` are incomparable: neither is narrower than the other.
    pub fn is_narrower_than( self, other: Self ) -> bool {
        let ( mine, theirs ) = ( self.domain(), other.domain() );
        mine != theirs && mine & theirs == mine
    }

    // Access domain as a set of locations:
    // declaring type, derived in assembly, other in assembly, derived elsewhere, other elsewhere.
    fn domain( self ) -> u8 {
        const TYPE: u8 = 0b00001 ;
        const DERIVED_INSIDE: u8 = 0b00010 ;
        const OTHER_INSIDE: u8 = 0b00100 ;
        const DERIVED_OUTSIDE: u8 = 0b01000 ;
        const OTHER_OUTSIDE: u8 = 0b10000 ;
        match self {
            Self::Private => TYPE,
            Self::PrivateProtected => TYPE | DERIVED_INSIDE,
            Self::Protected => TYPE | DERIVED_INSIDE | DERIVED_OUTSIDE,
            Self::Internal => TYPE | DERIVED_INSIDE | OTHER_INSIDE,
            Self::ProtectedInternal => TYPE | DERIVED_INSIDE | OTHER_INSIDE | DERIVED_OUTSIDE,
            Self::Public => TYPE | DERIVED_INSIDE | OTHER_INSIDE | DERIVED_OUTSIDE | OTHER_OUTSIDE,
        }
    }

}

impl std::fmt::Display for Accessibility {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { f.write_str( self.keyword() )}
}



/// How an argument is passed.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize )]
#[serde( rename_all = "kebab-case" )]
pub enum PassBy {
    #[default] Value,
    Ref,
    Out,
    In,
    /// Variadic parameter array. Not repeated at the call site.
    Params,
}

impl PassBy {

    /// Modifier written before the parameter type in a declaration.
    pub fn declaration_keyword( self ) -> Option<&'static str> {
        match self {
            Self::Value => None,
            Self::Ref => Some( "ref" ),
            Self::Out => Some( "out" ),
            Self::In => Some( "in" ),
            Self::Params => Some( "params" ),
        }
    }

    /// Modifier written before the argument when forwarding the call.
    pub fn call_keyword( self ) -> Option<&'static str> {
        match self {
            Self::Ref => Some( "ref" ),
            Self::Out => Some( "out" ),
            Self::In => Some( "in" ),
            Self::Value | Self::Params => None,
        }
    }

}

/// A single method parameter.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct Parameter {
    name: String,
    ty: String,
    pass_by: PassBy,
    default: Option<String>,
}

impl Parameter {

    /// Creates a by-value parameter without a default.
    pub fn new( name: impl Into<String>, ty: impl Into<String> ) -> Self {
        Self { name: name.into(), ty: ty.into(), pass_by: PassBy::Value, default: None }
    }

    pub fn with_pass_by( mut self, pass_by: PassBy ) -> Self {
        self.pass_by = pass_by ;
        self
    }

    /// Sets the default value expression (e.g. `null`, `42`, `default`).
    pub fn with_default( mut self, default: impl Into<String> ) -> Self {
        self.default = Some( default.into() );
        self
    }

    #[inline] pub fn name( &self ) -> &str { &self.name }
    #[inline] pub fn ty( &self ) -> &str { &self.ty }
    #[inline] pub fn pass_by( &self ) -> PassBy { self.pass_by }
    #[inline] pub fn default( &self ) -> Option<&str> { self.default.as_deref() }
}

/// A generic type parameter of a method, with its constraints.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct TypeParameter {
    name: String,
    constraints: Vec<String>,
}

impl TypeParameter {
    pub fn new( name: impl Into<String>, constraints: impl IntoIterator<Item = impl Into<String>> ) -> Self {
        Self { name: name.into(), constraints: constraints.into_iter().map( Into::into ).collect() }
    }
    #[inline] pub fn name( &self ) -> &str { &self.name }
    #[inline] pub fn constraints( &self ) -> &[String] { &self.constraints }
}

/// What kind of method a contract member is.
///
/// Only [`Ordinary`]( Self::Ordinary ) methods are forwarded; accessors are covered
/// by their [`Property`], the rest cannot be forwarded through an instance.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize )]
#[serde( rename_all = "kebab-case" )]
pub enum MethodKind {
    #[default] Ordinary,
    PropertyAccessor,
    EventAccessor,
    Operator,
    Conversion,
    Constructor,
    Static,
}

/// A method declared by a contract.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct Method {
    name: String,
    kind: MethodKind,
    accessibility: Accessibility,
    /// `None` for `void`
    returns: Option<String>,
    type_parameters: Vec<TypeParameter>,
    parameters: Vec<Parameter>,
}

impl Method {

    /// Creates a public, ordinary, parameterless `void` method.
    pub fn new( name: impl Into<String> ) -> Self {
        Self {
            name: name.into(),
            kind: MethodKind::Ordinary,
            accessibility: Accessibility::Public,
            returns: None,
            type_parameters: Vec::with_capacity( 0 ),
            parameters: Vec::with_capacity( 0 ),
        }
    }

    pub fn returning( mut self, ty: impl Into<String> ) -> Self {
        self.returns = Some( ty.into() );
        self
    }

    pub fn with_kind( mut self, kind: MethodKind ) -> Self {
        self.kind = kind ;
        self
    }

    pub fn with_accessibility( mut self, accessibility: Accessibility ) -> Self {
        self.accessibility = accessibility ;
        self
    }

    pub fn with_type_parameter( mut self, parameter: TypeParameter ) -> Self {
        self.type_parameters.push( parameter );
        self
    }

    pub fn with_parameter( mut self, parameter: Parameter ) -> Self {
        self.parameters.push( parameter );
        self
    }

    #[inline] pub fn name( &self ) -> &str { &self.name }
    #[inline] pub fn kind( &self ) -> MethodKind { self.kind }
    #[inline] pub fn accessibility( &self ) -> Accessibility { self.accessibility }
    /// Return type, `None` for `void`.
    #[inline] pub fn returns( &self ) -> Option<&str> { self.returns.as_deref() }
    #[inline] pub fn is_void( &self ) -> bool { self.returns.is_none() }
    #[inline] pub fn type_parameters( &self ) -> &[TypeParameter] { &self.type_parameters }
    #[inline] pub fn parameters( &self ) -> &[Parameter] { &self.parameters }
}

/// A property declared by a contract.
///
/// Get-only and set-only properties are both valid. A property with no
/// accessor at all cannot be constructed.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct Property {
    name: String,
    ty: String,
    accessibility: Accessibility,
    getter: Option<Accessibility>,
    setter: Option<Accessibility>,
}

impl Property {

    /// Creates a property with explicit accessor accessibility.
    /// Pass `None` for an accessor the contract does not declare.
    ///
    /// # Errors
    /// Returns [`ModelError::PropertyWithoutAccessors`] if both accessors are `None`.
    pub fn new(
        name: impl Into<String>,
        ty: impl Into<String>,
        accessibility: Accessibility,
        getter: Option<Accessibility>,
        setter: Option<Accessibility>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if getter.is_none() && setter.is_none() { return Err( ModelError::PropertyWithoutAccessors( name )) }
        Ok( Self { name, ty: ty.into(), accessibility, getter, setter })
    }

    /// Public `{ get; set; }` property.
    pub fn read_write( name: impl Into<String>, ty: impl Into<String> ) -> Self {
        Self::with_accessors( name, ty, Some( Accessibility::Public ), Some( Accessibility::Public ))
    }

    /// Public `{ get; }` property.
    pub fn read_only( name: impl Into<String>, ty: impl Into<String> ) -> Self {
        Self::with_accessors( name, ty, Some( Accessibility::Public ), None )
    }

    /// Public `{ set; }` property.
    pub fn write_only( name: impl Into<String>, ty: impl Into<String> ) -> Self {
        Self::with_accessors( name, ty, None, Some( Accessibility::Public ))
    }

    fn with_accessors(
        name: impl Into<String>,
        ty: impl Into<String>,
        getter: Option<Accessibility>,
        setter: Option<Accessibility>,
    ) -> Self {
        Self { name: name.into(), ty: ty.into(), accessibility: Accessibility::Public, getter, setter }
    }

    #[inline] pub fn name( &self ) -> &str { &self.name }
    #[inline] pub fn ty( &self ) -> &str { &self.ty }
    #[inline] pub fn accessibility( &self ) -> Accessibility { self.accessibility }
    /// Getter accessibility, `None` if the property is write-only.
    #[inline] pub fn getter( &self ) -> Option<Accessibility> { self.getter }
    /// Setter accessibility, `None` if the property is read-only.
    #[inline] pub fn setter( &self ) -> Option<Accessibility> { self.setter }
    #[inline] pub fn is_readable( &self ) -> bool { self.getter.is_some() }
    #[inline] pub fn is_writable( &self ) -> bool { self.setter.is_some() }
}

/// A member of a contract.
#[derive( Debug, Clone, PartialEq, Eq )]
pub enum Member {
    Method( Method ),
    Property( Property ),
}

impl Member {
    pub fn name( &self ) -> &str {
        match self {
            Self::Method( method ) => method.name(),
            Self::Property( property ) => property.name(),
        }
    }
}

impl From<Method> for Member {
    fn from( method: Method ) -> Self { Self::Method( method ) }
}

impl From<Property> for Member {
    fn from( property: Property ) -> Self { Self::Property( property ) }
}



/// A capability contract: an identity plus its ordered members.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct Contract {
    id: TypeRef,
    members: Vec<Member>,
}

impl Contract {

    pub fn new( id: TypeRef, members: impl IntoIterator<Item = impl Into<Member>> ) -> Self {
        Self { id, members: members.into_iter().map( Into::into ).collect() }
    }

    #[inline] pub fn id( &self ) -> &TypeRef { &self.id }
    #[inline] pub fn members( &self ) -> &[Member] { &self.members }
}
