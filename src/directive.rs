//! Construction directives.
//!
//! A directive lists the providers one alternative constructor takes. Raw
//! directives come from discovery and may contain entries that do not name a
//! type; [`parse_directive`] drops those (reporting them) and
//! [`resolve_directive`] matches the remainder against the composite's contracts.

use itertools::Itertools ;
use nonempty_collections::NEVec ;
use tracing::debug ;

use crate::composite::CompositeDecl ;
use crate::contract::TypeRef ;
use crate::diagnostics::{ Diagnostic, DiagnosticKind, Location };
use crate::matcher::{ Assignment, greedy_assign };
use crate::type_system::TypeSystem ;
use crate::utils::{ PartialSuccess, Merge };



/// A single entry of a raw directive.
#[derive( Debug, Clone, PartialEq, Eq )]
pub enum DirectiveEntry {
    /// The entry resolved to a type.
    Type( TypeRef ),
    /// Source text that could not be resolved to a type.
    Unresolved( String ),
}

/// A directive as discovered, before validation.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct RawDirective {
    entries: Vec<DirectiveEntry>,
    location: Location,
}

impl RawDirective {

    pub fn new( entries: impl IntoIterator<Item = DirectiveEntry> ) -> Self {
        Self { entries: entries.into_iter().collect(), location: Location::unknown() }
    }

    /// A directive whose entries all resolved.
    pub fn of_types( providers: impl IntoIterator<Item = TypeRef> ) -> Self {
        Self::new( providers.into_iter().map( DirectiveEntry::Type ))
    }

    pub fn with_location( mut self, location: Location ) -> Self {
        self.location = location ;
        self
    }

    #[inline] pub fn entries( &self ) -> &[DirectiveEntry] { &self.entries }
    #[inline] pub fn location( &self ) -> &Location { &self.location }
}

/// A validated directive: the ordered providers of one alternative constructor.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct ConstructionDirective {
    providers: NEVec<TypeRef>,
    location: Location,
}

impl ConstructionDirective {

    /// Returns `None` if `providers` is empty.
    pub fn new( providers: Vec<TypeRef>, location: Location ) -> Option<Self> {
        NEVec::try_from_vec( providers ).map(| providers | Self { providers, location })
    }

    #[inline] pub fn providers( &self ) -> &NEVec<TypeRef> { &self.providers }
    #[inline] pub fn location( &self ) -> &Location { &self.location }

    /// Providers in declaration order.
    pub fn provider_list( &self ) -> Vec<TypeRef> { Vec::from( self.providers.clone() )}

}

/// Validates a raw directive.
///
/// Unresolved entries are reported and skipped. A directive without entries
/// is reported and discarded. A directive whose entries were all unresolved
/// is discarded after its entries were reported.
pub fn parse_directive( composite: &str, raw: &RawDirective ) -> PartialSuccess<Option<ConstructionDirective>, Diagnostic> {

    if raw.entries().is_empty() {
        let diagnostic = Diagnostic::new( DiagnosticKind::EmptyDirective( composite.to_string() ), raw.location().clone() );
        return ( None, vec![ diagnostic ])
    }

    let ( providers, errors ) = raw.entries().iter()
        .map(| entry | match entry {
            DirectiveEntry::Type( ty ) => Ok( ty.clone() ),
            DirectiveEntry::Unresolved( text ) => Err( Diagnostic::new(
                DiagnosticKind::UnparsableEntry( text.clone() ),
                raw.location().clone(),
            )),
        })
        .partition_result::<Vec<_>, Vec<_>, _, _>();

    ( ConstructionDirective::new( providers, raw.location().clone() ), errors )

}

/// Matches a directive's providers against the composite's contracts.
///
/// Contracts left unmatched are fine, the binder fills them with their own
/// parameters. Providers left unmatched are reported and keep their place in
/// the assignment with no contracts.
pub fn resolve_directive<T: TypeSystem + ?Sized>(
    types: &T,
    composite: &str,
    contracts: &[TypeRef],
    directive: &ConstructionDirective,
) -> PartialSuccess<Assignment, Diagnostic> {

    let providers = directive.provider_list();
    let assignment = greedy_assign( types, &providers, contracts );
    debug!(
        composite,
        providers = providers.len(),
        unmatched_providers = assignment.unmatched_providers.len(),
        unmatched_contracts = assignment.unmatched_contracts.len(),
        "resolved directive",
    );

    let errors = assignment.unmatched_providers.iter()
        .map(| provider | Diagnostic::new(
            DiagnosticKind::UnmatchedProvider { composite: composite.to_string(), provider: provider.clone() },
            directive.location().clone(),
        ))
        .collect();

    ( assignment, errors )

}

/// Parses and resolves every directive of a composite, in declaration order,
/// against `contracts` (the composite's contracts without repetitions).
pub fn resolve_directives<T: TypeSystem + ?Sized>(
    types: &T,
    decl: &CompositeDecl,
    contracts: &[TypeRef],
) -> PartialSuccess<Vec<Assignment>, Diagnostic> {
    let name = decl.display_name();
    decl.directives().iter()
        .fold(( Vec::<Assignment>::new(), Vec::<Diagnostic>::new() ), |( mut assignments, errors ), raw | {
            let ( directive, parse_errors ) = parse_directive( &name, raw );
            let errors = errors.merge_all( parse_errors );
            match directive {
                Some( directive ) => {
                    let ( assignment, resolve_errors ) = resolve_directive( types, &name, contracts, &directive );
                    assignments.push( assignment );
                    ( assignments, errors.merge_all( resolve_errors ))
                }
                None => ( assignments, errors ),
            }
        })
}
