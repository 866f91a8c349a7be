use mixin_weaver::{ Catalog, CatalogError, Conversion, Member, TypeRef, TypeSystem };

fn ty( text: &str ) -> TypeRef { TypeRef::parse( text ).expect( "type reference" ) }

fn catalog() -> Catalog {
    Catalog::parse( r#"
        [[contract]]
        name = "Sample.IReadable"
        type-parameters = ["T"]
        [[contract.member]]
        member = "method"
        name = "Read"
        returns = "T"
        [[contract.member.parameter]]
        name = "fallback"
        type = "global::System.Collections.Generic.List<T>"

        [[contract]]
        name = "Sample.IRepository"
        type-parameters = ["TItem"]
        extends = ["Sample.IReadable<TItem>"]

        [[type]]
        name = "Sample.Base"
        implements = ["Sample.IRepository<string>"]

        [[type]]
        name = "Sample.Derived"
        extends = "Sample.Base"
    "#, "mixins.toml" ).expect( "valid manifest" )
}

#[test]
fn conversions_follow_relations_transitively() {

    let catalog = catalog();

    assert_eq!( catalog.classify( &ty( "Sample.Derived" ), &ty( "Sample.Derived" )), Conversion::Identity );
    assert_eq!( catalog.classify( &ty( "Sample.Derived" ), &ty( "Sample.Base" )), Conversion::Implicit );
    assert_eq!( catalog.classify( &ty( "Sample.Derived" ), &ty( "Sample.IRepository<string>" )), Conversion::Implicit );
    assert_eq!( catalog.classify( &ty( "Sample.Derived" ), &ty( "Sample.IReadable<string>" )), Conversion::Implicit );
    assert_eq!( catalog.classify( &ty( "Sample.Derived" ), &ty( "Sample.IReadable<int>" )), Conversion::None );
    assert_eq!( catalog.classify( &ty( "Sample.Base" ), &ty( "Sample.Derived" )), Conversion::None );

}

#[test]
fn members_have_type_arguments_substituted() {

    let members = catalog().members( &ty( "Sample.IReadable<int>" )).expect( "members" );

    match members.as_slice() {
        [ Member::Method( method )] => {
            assert_eq!( method.returns(), Some( "int" ));
            assert_eq!( method.parameters()[0].ty(), "global::System.Collections.Generic.List<int>" );
        }
        other => panic!( "Expected one method, got {:?}", other ),
    }

}

#[test]
fn member_lookup_failures() {
    let catalog = catalog();
    assert!( matches!( catalog.members( &ty( "Sample.IUnknown" )), Err( CatalogError::UnknownContract( _ ))));
    assert!( matches!(
        catalog.members( &ty( "Sample.IReadable" )),
        Err( CatalogError::ArityMismatch { expected: 1, found: 0, .. }),
    ));
}

#[test]
fn prefixed_names_are_stored_without_prefix() {

    let catalog = Catalog::parse( r#"
        [[contract]]
        name = "global::Sample.IA"
        [[contract.member]]
        member = "method"
        name = "Do"

        [[type]]
        name = "global::Sample.Provider"
        implements = ["global::Sample.IA"]

        [[composite]]
        name = "Composite"
        namespace = "Sample"
        contracts = ["global::Sample.IA"]
    "#, "mixins.toml" ).expect( "valid manifest" );

    assert_eq!( catalog.members( &ty( "Sample.IA" )).map(| members | members.len() ), Ok( 1 ));
    assert_eq!( catalog.classify( &ty( "Sample.Provider" ), &ty( "Sample.IA" )), Conversion::Implicit );

}

#[test]
fn composites_implement_their_contracts() {

    let catalog = Catalog::parse( r#"
        [[contract]]
        name = "Sample.IA"

        [[contract]]
        name = "Sample.IB"
        type-parameters = ["T"]

        [[composite]]
        name = "Pair"
        namespace = "Sample"
        type-parameters = ["T"]
        contracts = ["Sample.IA", "Sample.IB<T>"]

        [[composite]]
        name = "Inner"
        namespace = "Sample"
        contracts = ["Sample.IA"]
        [[composite.scope]]
        name = "Outer"
    "#, "mixins.toml" ).expect( "valid manifest" );

    assert_eq!( catalog.classify( &ty( "Sample.Pair<int>" ), &ty( "Sample.IA" )), Conversion::Implicit );
    assert_eq!( catalog.classify( &ty( "Sample.Pair<int>" ), &ty( "Sample.IB<int>" )), Conversion::Implicit );
    assert_eq!( catalog.classify( &ty( "Sample.Pair<int>" ), &ty( "Sample.IB<string>" )), Conversion::None );
    assert_eq!( catalog.classify( &ty( "Sample.Outer.Inner" ), &ty( "Sample.IA" )), Conversion::Implicit );
    assert_eq!( catalog.classify( &ty( "Sample.Inner" ), &ty( "Sample.IA" )), Conversion::None );

}
