//! Rendering of a composite's generated fragment.
//!
//! The fragment is a `partial` redeclaration of the composite (and of every
//! enclosing type) holding:
//!
//! - one private field per contract slot,
//! - one constructor per plan, the default plan first,
//! - one forwarding member per forwardable contract member, grouped by contract.
//!
//! Emission cannot fail. Whatever plans it is given are rendered as they are.

mod writer ;
mod members ;
mod constructors ;

use tracing::trace ;

use crate::binder::{ ConstructorPlan, SlotSet };
use crate::composite::{ CompositeDecl, ScopeDecl, TypeKind };
use crate::contract::Contract ;
use crate::options::GeneratorOptions ;
use writer::SourceWriter ;



/// First lines of every generated fragment when headers are enabled.
pub const HEADER: [&str; 3] = [
    "// <auto-generated>",
    "//     Generated by mixin-weaver. Do not edit; changes are lost on regeneration.",
    "// </auto-generated>",
];

/// Renders the fragment for `decl`.
///
/// `contracts` and `slots` are parallel: the n-th slot stores the n-th contract.
pub fn emit(
    decl: &CompositeDecl,
    contracts: &[Contract],
    slots: &SlotSet,
    plans: &[ConstructorPlan],
    options: &GeneratorOptions,
) -> String {

    let mut writer = SourceWriter::new( options.indent_unit() );

    if options.header { HEADER.iter().for_each(| line | writer.line( line )); }
    if options.nullable { writer.raw_line( "#nullable enable" ); }
    writer.separator();

    let body = | writer: &mut SourceWriter | write_scopes( writer, decl.scopes(), &| writer: &mut SourceWriter | {
        writer.scoped( type_header( decl.kind(), decl.name(), decl.type_parameters() ), | writer | {
            write_body( writer, decl.name(), contracts, slots, plans, options );
        });
    });

    match decl.namespace() {
        Some( namespace ) => writer.scoped( format!( "namespace {}", namespace ), body ),
        None => body( &mut writer ),
    }

    writer.finish()

}

fn write_scopes( writer: &mut SourceWriter, scopes: &[ScopeDecl], innermost: &dyn Fn( &mut SourceWriter )) {
    match scopes.split_first() {
        None => innermost( writer ),
        Some(( scope, rest )) => writer.scoped(
            type_header( scope.kind(), scope.name(), scope.type_parameters() ),
            | writer | write_scopes( writer, rest, innermost ),
        ),
    }
}

fn type_header( kind: TypeKind, name: &str, type_parameters: &[String] ) -> String {
    match type_parameters.is_empty() {
        true => format!( "partial {} {}", kind.keyword(), name ),
        false => format!( "partial {} {}<{}>", kind.keyword(), name, type_parameters.join( ", " )),
    }
}

fn write_body(
    writer: &mut SourceWriter,
    type_name: &str,
    contracts: &[Contract],
    slots: &SlotSet,
    plans: &[ConstructorPlan],
    options: &GeneratorOptions,
) {

    slots.slots().iter().for_each(| slot | writer.line( format!( "private {} {};", slot.contract().qualified(), slot.name() )));

    plans.iter().for_each(| plan | {
        writer.separator();
        constructors::write_constructor( writer, type_name, slots, plan );
    });

    contracts.iter().zip( slots.slots() ).for_each(|( contract, slot )| {
        writer.separator();
        if options.regions { writer.line( format!( "#region {}", contract.id().qualified() )); }
        contract.members().iter()
            .filter(| member | match members::is_forwarded( member ) {
                true => true,
                false => { trace!( contract = %contract.id(), member = member.name(), "member not forwarded" ); false }
            })
            .enumerate()
            .for_each(|( index, member )| {
                if index > 0 { writer.separator(); }
                members::write_member( writer, slot.name(), member );
            });
        if options.regions { writer.line( "#endregion" ); }
    });

}
