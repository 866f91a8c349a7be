//! Per composite orchestration and the run driver.
//!
//! [`Generator::generate`] takes one composite declaration through eligibility
//! checks, contract loading, directive resolution, binding and emission.
//! [`drive`] does that for every declaration a [`DeclarationSource`] yields and
//! hands the results to a [`DiagnosticSink`] and a [`Delivery`].

use std::collections::HashSet ;
use itertools::Itertools ;
use pipe_trait::Pipe ;
use tracing::{ debug, debug_span, info };

use crate::binder::{ SlotSet, bind, default_assignment };
use crate::composite::{ CompositeDecl, DeclarationSource };
use crate::contract::{ Contract, TypeRef };
use crate::diagnostics::{ Diagnostic, DiagnosticKind, DiagnosticSink, Severity };
use crate::directive::resolve_directives ;
use crate::emitter::emit ;
use crate::options::GeneratorOptions ;
use crate::type_system::TypeSystem ;
use crate::utils::{ PartialSuccess, Merge };



/// Generated text for one composite.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct Artifact {
    hint_name: String,
    text: String,
}

impl Artifact {
    pub fn new( hint_name: impl Into<String>, text: impl Into<String> ) -> Self {
        Self { hint_name: hint_name.into(), text: text.into() }
    }
    /// Name unique per composite, see [`CompositeDecl::hint_name`].
    #[inline] pub fn hint_name( &self ) -> &str { &self.hint_name }
    #[inline] pub fn text( &self ) -> &str { &self.text }
}

/// Trait for receiving generated artifacts.
pub trait Delivery {

    /// Error type for delivery failures.
    type Error: std::error::Error ;

    /// Accepts one artifact.
    ///
    /// # Errors
    /// Implementations fail when the artifact cannot be stored.
    fn deliver( &mut self, artifact: Artifact ) -> Result<(), Self::Error> ;

}

impl Delivery for Vec<Artifact> {
    type Error = std::convert::Infallible ;
    fn deliver( &mut self, artifact: Artifact ) -> Result<(), Self::Error> {
        self.push( artifact );
        Ok(())
    }
}

/// Generates composites against one type system.
pub struct Generator<'t, T: TypeSystem + ?Sized> {
    types: &'t T,
    options: GeneratorOptions,
}

impl<'t, T: TypeSystem + ?Sized> Generator<'t, T> {

    pub fn new( types: &'t T, options: GeneratorOptions ) -> Self { Self { types, options }}

    #[inline] pub fn options( &self ) -> &GeneratorOptions { &self.options }

    /// Generates the fragment for one composite.
    ///
    /// Returns `None` when the composite is not eligible (it, or a type
    /// enclosing it, is not partial) or when a contract's members cannot be
    /// read. Every other problem is reported and generation carries on.
    pub fn generate( &self, decl: &CompositeDecl ) -> PartialSuccess<Option<Artifact>, Diagnostic> {

        let _span = debug_span!( "composite", name = %decl.hint_name() ).entered();
        let name = decl.display_name();

        if !decl.is_partial() {
            return ( None, vec![ Diagnostic::new( DiagnosticKind::NonPartialComposite( name ), decl.location().clone() )])
        }

        let scope_errors = decl.scopes().iter()
            .filter(| scope | !scope.is_partial() )
            .map(| scope | Diagnostic::new(
                DiagnosticKind::NonPartialScope { composite: name.clone(), scope: scope.name().to_string() },
                scope.location().clone(),
            ))
            .collect::<Vec<_>>();
        if !scope_errors.is_empty() { return ( None, scope_errors ) }

        let mut seen = HashSet::new();
        let ( ids, repeated ) = decl.contracts().iter()
            .partition::<Vec<&TypeRef>, _>(| id | seen.insert( *id ));
        let ids = ids.into_iter().cloned().collect::<Vec<_>>();

        let warnings = match ids.is_empty() {
            true => vec![ Diagnostic::new( DiagnosticKind::NoContracts( name.clone() ), decl.location().clone() )],
            false => repeated.into_iter()
                .map(| id | Diagnostic::new(
                    DiagnosticKind::DuplicateContract { composite: name.clone(), contract: id.clone() },
                    decl.location().clone(),
                ))
                .collect(),
        };

        let ( contracts, load_errors ) = ids.iter()
            .map(| id | self.types.members( id )
                .map(| members | Contract::new( id.clone(), members ))
                .map_err(| err | Diagnostic::new(
                    DiagnosticKind::ContractUnavailable { contract: id.clone(), reason: err.to_string() },
                    decl.location().clone(),
                ))
            )
            .partition_result::<Vec<_>, Vec<_>, _, _>();
        if !load_errors.is_empty() { return ( None, warnings.merge_all( load_errors )) }

        let ( assignments, directive_errors ) = resolve_directives( self.types, decl, &ids );

        let slots = SlotSet::new( &ids, &self.options.field_prefix );
        let plans = std::iter::once( default_assignment( &ids ))
            .chain( assignments.into_iter().map(| assignment | assignment.bindings ))
            .map(| bindings | bind( self.types, &slots, &bindings ))
            .collect::<Vec<_>>();
        debug!( contracts = contracts.len(), constructors = plans.len(), "planned" );

        emit( decl, &contracts, &slots, &plans, &self.options )
            .pipe(| text | Artifact::new( decl.hint_name(), text ))
            .pipe(| artifact | ( Some( artifact ), warnings.merge_all( directive_errors )))

    }

}

/// Totals of one [`drive`] run.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Default )]
pub struct Summary {
    pub composites: usize,
    pub artifacts: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl Summary {
    /// `true` if any error diagnostic was reported.
    #[inline] pub fn has_errors( &self ) -> bool { self.errors > 0 }
}

/// Runs generation for every declaration of `source`.
///
/// Composites are independent: a composite that fails to generate does not
/// affect the others.
///
/// # Errors
/// Stops at the first artifact `delivery` fails to accept.
pub fn drive<S, T, K, D>(
    source: &S,
    types: &T,
    options: &GeneratorOptions,
    sink: &mut K,
    delivery: &mut D,
) -> Result<Summary, D::Error>
where
    S: DeclarationSource + ?Sized,
    T: TypeSystem + ?Sized,
    K: DiagnosticSink + ?Sized,
    D: Delivery + ?Sized,
{

    let generator = Generator::new( types, options.clone() );

    let summary = source.declarations().into_iter().try_fold( Summary::default(), | mut summary, decl | {
        let ( artifact, diagnostics ) = generator.generate( decl );
        summary.composites += 1 ;
        diagnostics.into_iter().for_each(| diagnostic | {
            match diagnostic.severity() {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
            }
            sink.report( diagnostic );
        });
        if let Some( artifact ) = artifact {
            delivery.deliver( artifact )?;
            summary.artifacts += 1 ;
        }
        Ok::<_, D::Error>( summary )
    })?;

    info!(
        composites = summary.composites,
        artifacts = summary.artifacts,
        errors = summary.errors,
        warnings = summary.warnings,
        "generation finished",
    );

    Ok( summary )

}
