use mixin_weaver::{ Artifact, CompositeDecl, Delivery, Diagnostic, GeneratorOptions, Method, drive };
use crate::stub_types::{ StubTypes, ty };

fn types() -> StubTypes {
    StubTypes::new().contract( "Sample.IService", vec![ Method::new( "Run" ).into() ])
}

fn declarations() -> Vec<CompositeDecl> {
    vec![
        CompositeDecl::new( "First" ).with_contract( ty( "Sample.IService" )),
        CompositeDecl::new( "Broken" ).with_partial( false ).with_contract( ty( "Sample.IService" )),
        CompositeDecl::new( "Empty" ),
        CompositeDecl::new( "Last" ).with_namespace( "Sample" ).with_contract( ty( "Sample.IService" )),
    ]
}

#[test]
fn failing_composite_does_not_stop_the_others() {

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut artifacts: Vec<Artifact> = Vec::new();

    let summary = drive( &declarations(), &types(), &GeneratorOptions::default(), &mut diagnostics, &mut artifacts )
        .expect( "vector delivery cannot fail" );

    assert_eq!( summary.composites, 4 );
    assert_eq!( summary.artifacts, 3 );
    assert_eq!( summary.errors, 1 );
    assert_eq!( summary.warnings, 1 );
    assert!( summary.has_errors() );
    assert_codes!( diagnostics, [ "MIX0001", "MIX0100" ]);
    assert_eq!(
        artifacts.iter().map( Artifact::hint_name ).collect::<Vec<_>>(),
        vec![ "First", "Empty", "Sample.Last" ],
    );

}

#[derive( Debug, thiserror::Error )]
#[error( "Delivery refused {0}" )]
struct Refused( String );

/// Accepts a fixed number of artifacts, then fails.
struct Limited { remaining: usize, accepted: Vec<String> }

impl Delivery for Limited {
    type Error = Refused ;
    fn deliver( &mut self, artifact: Artifact ) -> Result<(), Self::Error> {
        if self.remaining == 0 { return Err( Refused( artifact.hint_name().to_string() )) }
        self.remaining -= 1 ;
        self.accepted.push( artifact.hint_name().to_string() );
        Ok(())
    }
}

#[test]
fn delivery_failure_stops_the_run() {

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut delivery = Limited { remaining: 1, accepted: Vec::new() };

    let result = drive( &declarations(), &types(), &GeneratorOptions::default(), &mut diagnostics, &mut delivery );

    match result {
        Err( Refused( name )) => assert_eq!( name, "Empty" ),
        Ok( summary ) => panic!( "Expected a delivery failure, got {:?}", summary ),
    }
    assert_eq!( delivery.accepted, vec![ "First".to_string() ]);

}
