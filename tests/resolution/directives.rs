use mixin_weaver::{
    CompositeDecl, DirectiveEntry, RawDirective,
    parse_directive, resolve_directive, resolve_directives,
};
use crate::stub_types::{ StubTypes, ty };

#[test]
fn empty_directive_is_reported_and_discarded() {
    let ( directive, diagnostics ) = parse_directive( "Composite", &RawDirective::new([]));
    assert!( directive.is_none() );
    assert_codes!( diagnostics, [ "MIX0200" ]);
}

#[test]
fn unresolved_entries_are_reported_and_skipped() {

    let raw = RawDirective::new([
        DirectiveEntry::Unresolved( "typeof(Missing)".to_string() ),
        DirectiveEntry::Type( ty( "Sample.A" )),
        DirectiveEntry::Unresolved( "42".to_string() ),
    ]);

    let ( directive, diagnostics ) = parse_directive( "Composite", &raw );

    let directive = directive.expect( "directive with a resolved entry is kept" );
    assert_eq!( directive.provider_list(), vec![ ty( "Sample.A" )]);
    assert_codes!( diagnostics, [ "MIX0201", "MIX0201" ]);
    assert!( diagnostics[0].message().contains( "typeof(Missing)" ));

}

#[test]
fn directive_without_resolved_entries_is_discarded() {
    let raw = RawDirective::new([ DirectiveEntry::Unresolved( "nope".to_string() )]);
    let ( directive, diagnostics ) = parse_directive( "Composite", &raw );
    assert!( directive.is_none() );
    assert_codes!( diagnostics, [ "MIX0201" ]);
}

#[test]
fn unmatched_provider_is_reported_but_kept() {

    let types = StubTypes::new();
    let raw = RawDirective::of_types([ ty( "Sample.A" ), ty( "Sample.Unrelated" )]);
    let ( directive, _ ) = parse_directive( "Composite", &raw );
    let directive = directive.expect( "resolved directive" );

    let ( assignment, diagnostics ) = resolve_directive(
        &types,
        "Composite",
        &[ ty( "Sample.A" ), ty( "Sample.B" )],
        &directive,
    );

    assert_eq!( assignment.bindings.len(), 2 );
    assert!( assignment.bindings[1].is_unmatched() );
    assert_eq!( assignment.unmatched_contracts, vec![ ty( "Sample.B" )]);
    assert_codes!( diagnostics, [ "MIX0202" ]);
    assert!( diagnostics[0].message().contains( "Sample.Unrelated" ));

}

#[test]
fn directives_resolve_in_declaration_order() {

    let types = StubTypes::new().implicit( "Sample.AB", "Sample.A" ).implicit( "Sample.AB", "Sample.B" );
    let decl = CompositeDecl::new( "Composite" )
        .with_contract( ty( "Sample.A" ))
        .with_contract( ty( "Sample.B" ))
        .with_directive( RawDirective::of_types([ ty( "Sample.AB" )]))
        .with_directive( RawDirective::new([]))
        .with_directive( RawDirective::of_types([ ty( "Sample.B" ), ty( "Sample.A" )]));

    let ( assignments, diagnostics ) = resolve_directives( &types, &decl, decl.contracts() );

    assert_eq!( assignments.len(), 2 );
    assert_eq!( assignments[0].bindings[0].contracts(), &[ ty( "Sample.A" ), ty( "Sample.B" )]);
    assert_eq!( assignments[1].bindings[0].provider(), &ty( "Sample.B" ));
    assert_eq!( assignments[1].bindings[1].provider(), &ty( "Sample.A" ));
    assert_codes!( diagnostics, [ "MIX0200" ]);

}
