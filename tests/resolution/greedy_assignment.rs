use mixin_weaver::{ greedy_assign, classify, Conversion };
use crate::stub_types::{ StubTypes, ty };

fn abc() -> Vec<mixin_weaver::TypeRef> { vec![ ty( "Sample.A" ), ty( "Sample.B" ), ty( "Sample.C" )]}

#[test]
fn equal_references_are_identity_without_asking() {
    let types = StubTypes::new();
    assert_eq!( classify( &types, &ty( "Sample.A" ), &ty( "global::Sample.A" )), Conversion::Identity );
    assert_eq!( classify( &types, &ty( "Sample.A" ), &ty( "Sample.B" )), Conversion::None );
}

#[test]
fn combined_provider_takes_every_contract_it_implements() {

    let types = StubTypes::new()
        .implicit( "Sample.AB", "Sample.A" )
        .implicit( "Sample.AB", "Sample.B" );

    let result = greedy_assign( &types, &[ ty( "Sample.AB" ), ty( "Sample.C" )], &abc() );

    assert_eq!( result.bindings.len(), 2 );
    assert_eq!( result.bindings[0].provider(), &ty( "Sample.AB" ));
    assert_eq!( result.bindings[0].contracts(), &[ ty( "Sample.A" ), ty( "Sample.B" )]);
    assert_eq!( result.bindings[1].contracts(), &[ ty( "Sample.C" )]);
    assert!( result.unmatched_providers.is_empty() );
    assert!( result.unmatched_contracts.is_empty() );

}

#[test]
fn identity_pass_runs_before_implicit_pass() {

    // AB would take A in an implicit pass, but the later A provider is an exact match
    let types = StubTypes::new()
        .implicit( "Sample.AB", "Sample.A" )
        .implicit( "Sample.AB", "Sample.B" );

    let result = greedy_assign( &types, &[ ty( "Sample.AB" ), ty( "Sample.A" )], &abc() );

    assert_eq!( result.bindings[0].contracts(), &[ ty( "Sample.B" )]);
    assert_eq!( result.bindings[1].contracts(), &[ ty( "Sample.A" )]);
    assert_eq!( result.unmatched_contracts, vec![ ty( "Sample.C" )]);

}

#[test]
fn matched_provider_does_not_take_part_in_implicit_pass() {

    // C matches C exactly and leaves the pool, so its implicit conversion to A is never used
    let types = StubTypes::new().implicit( "Sample.C", "Sample.A" );

    let result = greedy_assign( &types, &[ ty( "Sample.C" )], &abc() );

    assert_eq!( result.bindings[0].contracts(), &[ ty( "Sample.C" )]);
    assert_eq!( result.unmatched_contracts, vec![ ty( "Sample.A" ), ty( "Sample.B" )]);

}

#[test]
fn unrelated_provider_stays_with_empty_set() {

    let types = StubTypes::new();
    let result = greedy_assign( &types, &[ ty( "Sample.Unrelated" )], &abc() );

    assert!( result.bindings[0].is_unmatched() );
    assert_eq!( result.unmatched_providers, vec![ ty( "Sample.Unrelated" )]);
    assert_eq!( result.unmatched_contracts, abc() );

}

#[test]
fn generic_arguments_are_part_of_identity() {

    let types = StubTypes::new();
    let contracts = [ ty( "Sample.IRepository<int>" ), ty( "Sample.IRepository<string>" )];
    let result = greedy_assign( &types, &[ ty( "Sample.IRepository<string>" )], &contracts );

    assert_eq!( result.bindings[0].contracts(), &[ ty( "Sample.IRepository<string>" )]);
    assert_eq!( result.unmatched_contracts, vec![ ty( "Sample.IRepository<int>" )]);

}
