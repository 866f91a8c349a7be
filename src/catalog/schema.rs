//! Manifest file layout.
//!
//! Every table maps one to one onto a struct here. Cross references (a
//! composite naming a contract, a relation naming a type) are checked by
//! [`Manifest::validate`], not by deserialization.

use std::collections::HashSet ;
use pipe_trait::Pipe ;
use serde::Deserialize ;
use toml::Spanned ;

use crate::composite::TypeKind ;
use crate::contract::{ Accessibility, MethodKind, PassBy, TypeRef };
use crate::options::GeneratorOptions ;



#[derive( Debug, Clone, Default, Deserialize )]
#[serde( default, rename_all = "kebab-case" )]
pub struct Manifest {
    pub options: GeneratorOptions,
    #[serde( rename = "contract" )]
    pub contracts: Vec<ContractSchema>,
    #[serde( rename = "type" )]
    pub types: Vec<TypeSchema>,
    #[serde( rename = "composite" )]
    pub composites: Vec<CompositeSchema>,
}

/// `[[contract]]`
#[derive( Debug, Clone, Deserialize )]
#[serde( rename_all = "kebab-case" )]
pub struct ContractSchema {
    /// Qualified name without generic arguments
    pub name: String,
    #[serde( default )]
    pub type_parameters: Vec<String>,
    /// Contracts this one inherits from
    #[serde( default )]
    pub extends: Vec<String>,
    #[serde( default, rename = "member" )]
    pub members: Vec<MemberSchema>,
}

/// `[[contract.member]]`, discriminated by `member = "method" | "property"`.
#[derive( Debug, Clone, Deserialize )]
#[serde( tag = "member", rename_all = "kebab-case" )]
pub enum MemberSchema {
    Method( MethodSchema ),
    Property( PropertySchema ),
}

#[derive( Debug, Clone, Deserialize )]
#[serde( rename_all = "kebab-case" )]
pub struct MethodSchema {
    pub name: String,
    #[serde( default )]
    pub kind: MethodKind,
    #[serde( default )]
    pub accessibility: Accessibility,
    /// Omitted for `void`
    pub returns: Option<String>,
    #[serde( default )]
    pub type_parameters: Vec<TypeParameterSchema>,
    #[serde( default, rename = "parameter" )]
    pub parameters: Vec<ParameterSchema>,
}

#[derive( Debug, Clone, Deserialize )]
#[serde( rename_all = "kebab-case" )]
pub struct TypeParameterSchema {
    pub name: String,
    #[serde( default )]
    pub constraints: Vec<String>,
}

#[derive( Debug, Clone, Deserialize )]
#[serde( rename_all = "kebab-case" )]
pub struct ParameterSchema {
    pub name: String,
    #[serde( rename = "type" )]
    pub ty: String,
    #[serde( default )]
    pub pass_by: PassBy,
    pub default: Option<String>,
}

#[derive( Debug, Clone, Deserialize )]
#[serde( rename_all = "kebab-case" )]
pub struct PropertySchema {
    pub name: String,
    #[serde( rename = "type" )]
    pub ty: String,
    #[serde( default )]
    pub accessibility: Accessibility,
    pub get: Option<AccessorSchema>,
    pub set: Option<AccessorSchema>,
}

/// `get = true` or `get = "protected"`.
#[derive( Debug, Clone, Copy, Deserialize )]
#[serde( untagged )]
pub enum AccessorSchema {
    Present( bool ),
    Restricted( Accessibility ),
}

impl AccessorSchema {
    /// Accessor accessibility, `None` if the accessor is absent.
    pub fn resolve( accessor: Option<Self>, property: Accessibility ) -> Option<Accessibility> {
        match accessor {
            None | Some( Self::Present( false )) => None,
            Some( Self::Present( true )) => Some( property ),
            Some( Self::Restricted( accessibility )) => Some( accessibility ),
        }
    }
}

/// `[[type]]`, a provider type known to the catalog.
#[derive( Debug, Clone, Deserialize )]
#[serde( rename_all = "kebab-case" )]
pub struct TypeSchema {
    pub name: String,
    #[serde( default )]
    pub type_parameters: Vec<String>,
    #[serde( default )]
    pub implements: Vec<String>,
    pub extends: Option<String>,
}

/// `[[composite]]`
#[derive( Debug, Clone, Deserialize )]
#[serde( rename_all = "kebab-case" )]
pub struct CompositeSchema {
    pub name: Spanned<String>,
    #[serde( default )]
    pub kind: TypeKind,
    pub namespace: Option<String>,
    #[serde( default = "default_partial" )]
    pub partial: bool,
    #[serde( default )]
    pub type_parameters: Vec<String>,
    #[serde( default, rename = "scope" )]
    pub scopes: Vec<ScopeSchema>,
    #[serde( default )]
    pub contracts: Vec<String>,
    #[serde( default, rename = "construct-using" )]
    pub directives: Vec<DirectiveSchema>,
}

impl CompositeSchema {

    /// Path other declarations use to name this composite: namespace,
    /// enclosing types, then the composite itself.
    pub fn type_path( &self ) -> String {
        self.namespace.iter()
            .map(| namespace | namespace.trim().to_string() )
            .chain( self.scopes.iter().map(| scope | scope.name.get_ref().trim().to_string() ))
            .chain( std::iter::once( self.name.get_ref().trim().to_string() ))
            .collect::<Vec<_>>()
            .join( "." )
            .pipe(| path | canonical_name( &path ))
    }

}

/// `[[composite.scope]]`, enclosing types outermost first.
#[derive( Debug, Clone, Deserialize )]
#[serde( rename_all = "kebab-case" )]
pub struct ScopeSchema {
    pub name: Spanned<String>,
    #[serde( default )]
    pub kind: TypeKind,
    #[serde( default = "default_partial" )]
    pub partial: bool,
    #[serde( default )]
    pub type_parameters: Vec<String>,
}

/// `[[composite.construct-using]]`
#[derive( Debug, Clone, Deserialize )]
#[serde( rename_all = "kebab-case" )]
pub struct DirectiveSchema {
    pub providers: Spanned<Vec<String>>,
}

fn default_partial() -> bool { true }

impl Manifest {

    /// Checks cross references and model invariants.
    ///
    /// Returns every problem found, not just the first.
    pub fn validate( &self ) -> Result<(), Vec<String>> {

        let mut problems = Vec::new();

        let mut contract_names = HashSet::new();
        self.contracts.iter().for_each(| contract | {
            check_path( &contract.name, "contract", &mut problems );
            if !contract_names.insert( canonical_name( &contract.name )) {
                problems.push( format!( "Duplicate contract '{}'", contract.name ));
            }
            contract.members.iter().for_each(| member | if let MemberSchema::Property( property ) = member {
                if AccessorSchema::resolve( property.get, property.accessibility ).is_none()
                    && AccessorSchema::resolve( property.set, property.accessibility ).is_none() {
                    problems.push( format!( "Property '{}.{}' has neither a getter nor a setter", contract.name, property.name ));
                }
            });
            contract.extends.iter().for_each(| base | check_reference( base, "base contract", &mut problems ));
        });

        let mut type_names = HashSet::new();
        self.types.iter().for_each(| ty | {
            check_path( &ty.name, "type", &mut problems );
            let name = canonical_name( &ty.name );
            if contract_names.contains( &name ) || !type_names.insert( name ) {
                problems.push( format!( "Duplicate type '{}'", ty.name ));
            }
            ty.implements.iter().chain( ty.extends.iter() )
                .for_each(| base | check_reference( base, "supertype", &mut problems ));
        });

        self.composites.iter().for_each(| composite | {
            match composite.name.get_ref().trim().is_empty() {
                true => problems.push( "Composite with an empty name".to_string() ),
                false => {
                    let path = composite.type_path();
                    check_path( &path, "composite", &mut problems );
                    if contract_names.contains( &path ) || !type_names.insert( path.clone() ) {
                        problems.push( format!( "Duplicate type '{}'", path ));
                    }
                }
            }
            let mut listed = HashSet::new();
            composite.contracts.iter().for_each(| contract | match TypeRef::parse( contract ) {
                Ok( reference ) if !contract_names.contains( reference.path() ) =>
                    problems.push( format!( "Composite '{}' names unknown contract '{}'", composite.name.get_ref(), contract )),
                Ok( reference ) => if !listed.insert( reference ) {
                    problems.push( format!( "Composite '{}' lists contract '{}' more than once", composite.name.get_ref(), contract ));
                },
                Err( err ) => problems.push( format!( "Composite '{}': {}", composite.name.get_ref(), err )),
            });
        });

        match problems.is_empty() {
            true => Ok(()),
            false => Err( problems ),
        }

    }

}

/// Name under which the catalog stores a declaration, without `global::`.
pub fn canonical_name( name: &str ) -> String {
    let name = name.trim();
    TypeRef::new( name, Vec::<String>::new() )
        .map_or_else(| _ | name.to_string(), | ty | ty.path().to_string() )
}

fn check_path( name: &str, what: &str, problems: &mut Vec<String> ) {
    match TypeRef::new( name, Vec::<String>::new() ) {
        Ok( _ ) => {}
        Err( err ) => problems.push( format!( "Invalid {} name: {}", what, err )),
    }
}

fn check_reference( reference: &str, what: &str, problems: &mut Vec<String> ) {
    if let Err( err ) = TypeRef::parse( reference ) {
        problems.push( format!( "Invalid {} '{}': {}", what, reference, err ));
    }
}
