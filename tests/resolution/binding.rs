use mixin_weaver::{ ProviderAssignment, SlotSet, bind, default_assignment, greedy_assign };
use crate::stub_types::{ StubTypes, ty };

#[test]
fn slot_names_are_prefixed_and_unique() {

    let slots = SlotSet::new( &[
        ty( "Sample.IRepository<int>" ),
        ty( "Sample.IRepository<string>" ),
        ty( "Other.IRepository<int>" ),
        ty( "Sample.IWithMethod" ),
    ], "_" );

    let names = slots.slots().iter().map(| slot | slot.name() ).collect::<Vec<_>>();
    assert_eq!( names, vec![ "_repository", "_repository2", "_repository3", "_withMethod" ]);

}

#[test]
fn unprefixed_slot_names_escape_keywords() {
    let slots = SlotSet::new( &[ ty( "Sample.IEvent" ), ty( "Sample.IString" )], "" );
    let names = slots.slots().iter().map(| slot | slot.name() ).collect::<Vec<_>>();
    assert_eq!( names, vec![ "@event", "@string" ]);
}

#[test]
fn default_plan_binds_each_contract_to_its_own_slot() {

    let contracts = [ ty( "Sample.A" ), ty( "Sample.B" ), ty( "Sample.C" )];
    let slots = SlotSet::new( &contracts, "_" );

    let plan = bind( &StubTypes::new(), &slots, &default_assignment( &contracts ));

    assert_eq!( plan.parameters().len(), 3 );
    plan.parameters().iter().enumerate().for_each(|( index, parameter )| {
        assert_eq!( parameter.ty(), &contracts[index] );
        assert_eq!( parameter.slots(), &[ index ]);
    });
    assert_eq!(
        plan.parameters().iter().map(| parameter | parameter.name() ).collect::<Vec<_>>(),
        vec![ "a", "b", "c" ],
    );

}

#[test]
fn provider_matching_two_contracts_fills_two_slots() {

    let types = StubTypes::new().implicit( "Sample.AB", "Sample.A" ).implicit( "Sample.AB", "Sample.B" );
    let contracts = [ ty( "Sample.A" ), ty( "Sample.B" ), ty( "Sample.C" )];
    let slots = SlotSet::new( &contracts, "_" );

    let assignment = greedy_assign( &types, &[ ty( "Sample.AB" ), ty( "Sample.C" )], &contracts );
    let plan = bind( &types, &slots, &assignment.bindings );

    assert_eq!( plan.parameters().len(), 2 );
    assert_eq!( plan.parameters()[0].name(), "ab" );
    assert_eq!( plan.parameters()[0].slots(), &[ 0, 1 ]);
    assert_eq!( plan.parameters()[1].name(), "c" );
    assert_eq!( plan.parameters()[1].slots(), &[ 2 ]);

}

#[test]
fn uncovered_contracts_are_appended_in_contract_order() {

    let contracts = [ ty( "Sample.A" ), ty( "Sample.B" ), ty( "Sample.C" )];
    let slots = SlotSet::new( &contracts, "_" );
    let bindings = [
        ProviderAssignment::new( ty( "Sample.Unrelated" ), vec![]),
        ProviderAssignment::new( ty( "Sample.B" ), vec![ ty( "Sample.B" )]),
    ];

    let plan = bind( &StubTypes::new(), &slots, &bindings );

    let shape = plan.parameters().iter()
        .map(| parameter | ( parameter.name(), parameter.slots().to_vec() ))
        .collect::<Vec<_>>();
    assert_eq!( shape, vec![
        ( "unrelated", vec![]),
        ( "b", vec![ 1 ]),
        ( "a", vec![ 0 ]),
        ( "c", vec![ 2 ]),
    ]);
    assert!( plan.parameters()[0].is_dead() );

}

#[test]
fn parameter_names_are_unique_within_a_plan() {

    let contracts = [ ty( "Sample.IRepository<int>" ), ty( "Sample.IRepository<string>" )];
    let slots = SlotSet::new( &contracts, "_" );

    let plan = bind( &StubTypes::new(), &slots, &default_assignment( &contracts ));

    assert_eq!(
        plan.parameters().iter().map(| parameter | parameter.name() ).collect::<Vec<_>>(),
        vec![ "repository", "repository2" ],
    );

}
