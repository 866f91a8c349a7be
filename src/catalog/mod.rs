//! Manifest backed collaborators.
//!
//! A [`Catalog`] is read from a TOML manifest listing contracts, provider
//! types and composite declarations. It answers type questions as a
//! [`TypeSystem`] and yields the composites as a [`DeclarationSource`], which
//! is enough to run the whole pipeline without a host compiler.
//!
//! ```toml
//! [[contract]]
//! name = "Sample.IGreeter"
//! [[contract.member]]
//! member = "method"
//! name = "Greet"
//! returns = "string"
//! [[contract.member.parameter]]
//! name = "name"
//! type = "string"
//!
//! [[composite]]
//! name = "Greeter"
//! namespace = "Sample"
//! contracts = ["Sample.IGreeter"]
//! ```

mod schema ;

use std::collections::{ HashMap, HashSet, VecDeque };
use std::path::Path ;
use thiserror::Error ;
use tracing::debug ;

use crate::composite::{ CompositeDecl, DeclarationSource, ScopeDecl };
use crate::contract::{ Member, Method, ModelError, Parameter, Property, TypeParameter, TypeRef };
use crate::diagnostics::Location ;
use crate::directive::{ DirectiveEntry, RawDirective };
use crate::options::GeneratorOptions ;
use crate::type_system::{ Conversion, TypeSystem };

use schema::{ AccessorSchema, CompositeSchema, Manifest, MemberSchema, canonical_name };



/// Error reading a manifest.
#[derive( Debug, Error )]
pub enum ManifestError {
    #[error( "Failed to read manifest {path}: {source}" )]
    Io { path: String, source: std::io::Error },
    #[error( "Failed to parse manifest {path}: {source}" )]
    Parse { path: String, source: toml::de::Error },
    #[error( "Invalid manifest {path}:\n  {}", .problems.join( "\n  " ))]
    Invalid { path: String, problems: Vec<String> },
}

/// Error answering a member query.
#[derive( Debug, Clone, PartialEq, Eq, Error )]
pub enum CatalogError {
    #[error( "Contract '{0}' is not declared in the manifest" )] UnknownContract( TypeRef ),
    #[error( "Contract '{contract}' takes {expected} type arguments, {found} given" )]
    ArityMismatch { contract: TypeRef, expected: usize, found: usize },
    #[error( "{0}" )] Model( #[from] ModelError ),
}

#[derive( Debug, Clone )]
struct ContractEntry {
    type_parameters: Vec<String>,
    members: Vec<MemberSchema>,
}

#[derive( Debug, Clone )]
struct RelationEntry {
    type_parameters: Vec<String>,
    supertypes: Vec<String>,
}

/// Contracts, provider types and composites read from one manifest.
#[derive( Debug, Clone )]
pub struct Catalog {
    options: GeneratorOptions,
    contracts: HashMap<String, ContractEntry>,
    relations: HashMap<String, RelationEntry>,
    composites: Vec<CompositeDecl>,
}

impl Catalog {

    /// Reads and validates the manifest at `path`.
    ///
    /// # Errors
    /// Fails if the file cannot be read, is not valid TOML of the expected
    /// shape, or fails validation.
    pub fn load( path: impl AsRef<Path> ) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string( path )
            .map_err(| source | ManifestError::Io { path: display.clone(), source })?;
        Self::parse( &text, &display )
    }

    /// Parses and validates manifest text. `file` is only used in locations
    /// and error messages.
    ///
    /// # Errors
    /// Fails if the text is not a valid manifest.
    pub fn parse( text: &str, file: &str ) -> Result<Self, ManifestError> {

        let manifest: Manifest = toml::from_str( text )
            .map_err(| source | ManifestError::Parse { path: file.to_string(), source })?;
        manifest.validate()
            .map_err(| problems | ManifestError::Invalid { path: file.to_string(), problems })?;

        let lines = LineIndex::new( text );

        let contracts = manifest.contracts.iter()
            .map(| contract | ( canonical_name( &contract.name ), ContractEntry {
                type_parameters: contract.type_parameters.clone(),
                members: contract.members.clone(),
            }))
            .collect::<HashMap<_, _>>();

        // composites are types too: a composite implements every contract it lists
        let relations = manifest.contracts.iter()
            .map(| contract | ( canonical_name( &contract.name ), RelationEntry {
                type_parameters: contract.type_parameters.clone(),
                supertypes: contract.extends.clone(),
            }))
            .chain( manifest.types.iter().map(| ty | ( canonical_name( &ty.name ), RelationEntry {
                type_parameters: ty.type_parameters.clone(),
                supertypes: ty.implements.iter().chain( ty.extends.iter() ).cloned().collect(),
            })))
            .chain( manifest.composites.iter().map(| composite | ( composite.type_path(), RelationEntry {
                type_parameters: composite.type_parameters.clone(),
                supertypes: composite.contracts.clone(),
            })))
            .collect::<HashMap<_, _>>();

        let known = relations.keys().map( String::as_str ).collect::<HashSet<_>>();
        let composites = manifest.composites.iter()
            .map(| composite | build_composite( composite, &known, &lines, file ))
            .collect::<Vec<_>>();

        debug!( file, contracts = contracts.len(), types = manifest.types.len(), composites = composites.len(), "manifest loaded" );

        Ok( Self { options: manifest.options, contracts, relations, composites })

    }

    /// Options from the manifest's `[options]` table.
    #[inline] pub fn options( &self ) -> &GeneratorOptions { &self.options }
    #[inline] pub fn composites( &self ) -> &[CompositeDecl] { &self.composites }

    /// Direct supertypes of `ty` with its generic arguments substituted in.
    fn supertypes( &self, ty: &TypeRef ) -> Vec<TypeRef> {
        let Some( entry ) = self.relations.get( ty.path() ) else { return Vec::new() };
        let substitution = Substitution::new( &entry.type_parameters, ty.arguments() );
        entry.supertypes.iter()
            .filter_map(| supertype | TypeRef::parse( &substitution.apply( supertype )).ok() )
            .collect()
    }

}

impl TypeSystem for Catalog {

    type Error = CatalogError ;

    /// Identity for equal references, implicit when `target` is reachable
    /// through `implements`/`extends` relations. A declared composite counts as
    /// implementing each of its contracts, so it can provide for another composite.
    fn classify( &self, source: &TypeRef, target: &TypeRef ) -> Conversion {
        if source == target { return Conversion::Identity }
        let mut visited = HashSet::from([ source.clone() ]);
        let mut queue = VecDeque::from([ source.clone() ]);
        while let Some( current ) = queue.pop_front() {
            for supertype in self.supertypes( &current ) {
                if &supertype == target { return Conversion::Implicit }
                if visited.insert( supertype.clone() ) { queue.push_back( supertype ); }
            }
        }
        Conversion::None
    }

    fn members( &self, contract: &TypeRef ) -> Result<Vec<Member>, Self::Error> {
        let entry = self.contracts.get( contract.path() )
            .ok_or_else(|| CatalogError::UnknownContract( contract.clone() ))?;
        if entry.type_parameters.len() != contract.arity() {
            return Err( CatalogError::ArityMismatch {
                contract: contract.clone(),
                expected: entry.type_parameters.len(),
                found: contract.arity(),
            })
        }
        let substitution = Substitution::new( &entry.type_parameters, contract.arguments() );
        entry.members.iter()
            .map(| member | build_member( member, &substitution ))
            .collect()
    }

}

impl DeclarationSource for Catalog {
    type DeclarationIter<'a> = std::slice::Iter<'a, CompositeDecl> ;
    fn declarations( &self ) -> Self::DeclarationIter<'_> { self.composites.iter() }
}

fn build_member( member: &MemberSchema, substitution: &Substitution ) -> Result<Member, CatalogError> {
    match member {
        MemberSchema::Method( method ) => {
            let built = Method::new( &method.name )
                .with_kind( method.kind )
                .with_accessibility( method.accessibility );
            let built = match &method.returns {
                Some( returns ) => built.returning( substitution.apply( returns )),
                None => built,
            };
            let built = method.type_parameters.iter().fold( built, | built, parameter | built.with_type_parameter(
                TypeParameter::new( &parameter.name, parameter.constraints.iter().map(| c | substitution.apply( c ))),
            ));
            let built = method.parameters.iter().fold( built, | built, parameter | {
                let built_parameter = Parameter::new( &parameter.name, substitution.apply( &parameter.ty ))
                    .with_pass_by( parameter.pass_by );
                built.with_parameter( match &parameter.default {
                    Some( default ) => built_parameter.with_default( default ),
                    None => built_parameter,
                })
            });
            Ok( Member::Method( built ))
        }
        MemberSchema::Property( property ) => Ok( Member::Property( Property::new(
            &property.name,
            substitution.apply( &property.ty ),
            property.accessibility,
            AccessorSchema::resolve( property.get, property.accessibility ),
            AccessorSchema::resolve( property.set, property.accessibility ),
        )?)),
    }
}

fn build_composite( schema: &CompositeSchema, known: &HashSet<&str>, lines: &LineIndex, file: &str ) -> CompositeDecl {

    let decl = CompositeDecl::new( schema.name.get_ref().trim() )
        .with_kind( schema.kind )
        .with_partial( schema.partial )
        .with_type_parameters( schema.type_parameters.iter().cloned() )
        .with_location( lines.locate( file, schema.name.span().start ));
    let decl = match &schema.namespace {
        Some( namespace ) => decl.with_namespace( namespace ),
        None => decl,
    };

    let decl = schema.scopes.iter().fold( decl, | decl, scope | decl.with_scope(
        ScopeDecl::new( scope.name.get_ref().trim() )
            .with_kind( scope.kind )
            .with_partial( scope.partial )
            .with_type_parameters( scope.type_parameters.iter().cloned() )
            .with_location( lines.locate( file, scope.name.span().start )),
    ));

    // validation guarantees every contract reference parses
    let decl = schema.contracts.iter()
        .filter_map(| contract | TypeRef::parse( contract ).ok() )
        .fold( decl, CompositeDecl::with_contract );

    schema.directives.iter().fold( decl, | decl, directive | {
        let entries = directive.providers.get_ref().iter().map(| entry | match TypeRef::parse( entry ) {
            Ok( ty ) if known.contains( ty.path() ) => DirectiveEntry::Type( ty ),
            _ => DirectiveEntry::Unresolved( entry.clone() ),
        });
        decl.with_directive( RawDirective::new( entries )
            .with_location( lines.locate( file, directive.providers.span().start )))
    })

}

/// Replaces whole identifiers naming type parameters with their arguments.
struct Substitution<'a> {
    map: HashMap<&'a str, &'a str>,
}

impl<'a> Substitution<'a> {

    fn new( parameters: &'a [String], arguments: &'a [String] ) -> Self {
        Self { map: parameters.iter().map( String::as_str ).zip( arguments.iter().map( String::as_str )).collect() }
    }

    fn apply( &self, text: &str ) -> String {
        if self.map.is_empty() { return text.to_string() }
        let mut output = String::with_capacity( text.len() );
        let mut identifier = String::new();
        let flush = | identifier: &mut String, output: &mut String | {
            output.push_str( self.map.get( identifier.as_str() ).copied().unwrap_or( identifier.as_str() ));
            identifier.clear();
        };
        for c in text.chars() {
            match c.is_alphanumeric() || c == '_' {
                true => identifier.push( c ),
                false => {
                    flush( &mut identifier, &mut output );
                    output.push( c );
                }
            }
        }
        flush( &mut identifier, &mut output );
        output
    }

}

/// Byte offset to line and column conversion.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {

    fn new( text: &str ) -> Self {
        let starts = std::iter::once( 0 )
            .chain( text.match_indices( '\n' ).map(|( index, _ )| index + 1 ))
            .collect();
        Self { starts }
    }

    fn locate( &self, file: &str, offset: usize ) -> Location {
        let line = self.starts.partition_point(| start | *start <= offset ).max( 1 );
        let column = offset - self.starts[line - 1] + 1 ;
        Location::in_file( file ).at(
            u32::try_from( line ).unwrap_or( u32::MAX ),
            u32::try_from( column ).unwrap_or( u32::MAX ),
        )
    }

}
