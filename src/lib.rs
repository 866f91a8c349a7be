//! Forwarding generator for composite types.
//!
//! A **composite** is a type that has to expose a set of capability
//! **contracts** (interfaces) without implementing them itself. For every
//! contract the composite stores one provider object and forwards each
//! contract member to it. `mixin_weaver` decides which constructor parameter
//! ends up in which field and emits the forwarding code as a `partial` C#
//! fragment to be merged with the hand written part of the type.
//!
//! # Core Concepts
//!
//! - [`Contract`]: a contract's identity ( [`TypeRef`] ) and its ordered members.
//!
//! - **Provider**: a type supplying the implementation of one or more contracts.
//! 	By default every contract is its own provider. A [`RawDirective`] lists
//! 	providers for one additional constructor; a single provider may cover
//! 	several contracts.
//!
//! - [`FieldSlot`]: the field storing one contract's provider. There is exactly
//! 	one slot per contract, typed as the contract.
//!
//! - [`ConstructorPlan`]: for one constructor, the parameters and the slots each
//! 	of them is stored into.
//!
//! # Collaborators
//!
//! The generator knows nothing about the host compiler. It is driven through four traits:
//!
//! - [`DeclarationSource`] yields the composite declarations
//! - [`TypeSystem`] classifies conversions and lists contract members
//! - [`DiagnosticSink`] receives [`Diagnostic`]s
//! - [`Delivery`] receives the generated [`Artifact`]s
//!
//! [`Catalog`] implements the first two from a TOML manifest, `Vec<Diagnostic>`
//! and `Vec<Artifact>` implement the last two.
//!
//! # Example
//!
//! ```
//! use mixin_weaver::{ Catalog, GeneratorOptions, Diagnostic, Artifact, drive };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::parse( r#"
//! 	[[contract]]
//! 	name = "Sample.IWithProperty"
//! 	[[contract.member]]
//! 	member = "property"
//! 	name = "Prop"
//! 	type = "string"
//! 	get = true
//! 	set = true
//!
//! 	[[composite]]
//! 	name = "Composite"
//! 	namespace = "Sample"
//! 	contracts = ["Sample.IWithProperty"]
//! "#, "mixins.toml" )?;
//!
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//! let mut artifacts: Vec<Artifact> = Vec::new();
//! let summary = drive( &catalog, &catalog, &GeneratorOptions::default(), &mut diagnostics, &mut artifacts )?;
//!
//! assert_eq!( summary.artifacts, 1 );
//! assert!( diagnostics.is_empty() );
//! assert_eq!( artifacts[0].hint_name(), "Sample.Composite" );
//! assert!( artifacts[0].text().contains( "public Composite(global::Sample.IWithProperty withProperty)" ));
//! assert!( artifacts[0].text().contains( "get => this._withProperty.Prop;" ));
//! # Ok(())
//! # }
//! ```

mod contract ;
mod type_system ;
mod matcher ;
mod diagnostics ;
mod composite ;
mod directive ;
mod binder ;
mod emitter ;
mod options ;
mod pipeline ;
mod catalog ;
mod output ;
mod utils ;

pub use contract::{
	TypeRef, Accessibility, PassBy, MethodKind, Parameter, TypeParameter,
	Method, Property, Member, Contract, ModelError,
};
pub use type_system::{ Conversion, TypeSystem };
pub use matcher::{ classify, greedy_assign, Assignment, ProviderAssignment };
pub use diagnostics::{ Diagnostic, DiagnosticKind, DiagnosticSink, Location, Severity };
pub use composite::{ CompositeDecl, ScopeDecl, TypeKind, DeclarationSource };
pub use directive::{
	DirectiveEntry, RawDirective, ConstructionDirective,
	parse_directive, resolve_directive, resolve_directives,
};
pub use binder::{ FieldSlot, SlotSet, PlanParameter, ConstructorPlan, default_assignment, bind };
pub use emitter::{ emit, HEADER };
pub use options::GeneratorOptions ;
pub use pipeline::{ Artifact, Delivery, Generator, Summary, drive };
pub use catalog::{ Catalog, CatalogError, ManifestError };
pub use output::{ OutputDir, OutputMode, OutputError, EXTENSION };
pub use utils::PartialSuccess ;
