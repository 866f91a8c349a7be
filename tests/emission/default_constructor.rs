use mixin_weaver::{ CompositeDecl, GeneratorOptions, Method, Parameter, Property, HEADER };
use crate::stub_types::{ StubTypes, ty };
use crate::{ generate, lines };

fn types() -> StubTypes {
    StubTypes::new()
        .contract( "Sample.A", vec![ Property::read_write( "Prop", "string" ).into() ])
        .contract( "Sample.B", vec![ Method::new( "Method" )
            .returning( "string" )
            .with_parameter( Parameter::new( "x", "string" ))
            .into()
        ])
}

fn composite() -> CompositeDecl {
    CompositeDecl::new( "Composite" )
        .with_namespace( "Sample" )
        .with_contract( ty( "Sample.A" ))
        .with_contract( ty( "Sample.B" ))
}

#[test]
fn forwards_every_member_through_the_default_constructor() {

    let text = generate( &types(), &composite(), GeneratorOptions::default() );

    let expected = HEADER.iter().copied().chain([
        "#nullable enable",
        "",
        "namespace Sample",
        "{",
        "    partial class Composite",
        "    {",
        "        private global::Sample.A _a;",
        "        private global::Sample.B _b;",
        "",
        "        public Composite(global::Sample.A a, global::Sample.B b)",
        "        {",
        "            this._a = a;",
        "            this._b = b;",
        "        }",
        "",
        "        #region global::Sample.A",
        "        public string Prop",
        "        {",
        "            get => this._a.Prop;",
        "            set => this._a.Prop = value;",
        "        }",
        "        #endregion",
        "",
        "        #region global::Sample.B",
        "        public string Method(string x)",
        "        {",
        "            return this._b.Method(x);",
        "        }",
        "        #endregion",
        "    }",
        "}",
    ]).map(| line | format!( "{}\n", line )).collect::<String>();

    assert_eq!( text, expected );

}

#[test]
fn one_constructor_with_one_parameter_per_contract() {

    let types = StubTypes::new()
        .contract( "Sample.IFirst", vec![])
        .contract( "Sample.ISecond", vec![])
        .contract( "Sample.IThird", vec![]);
    let decl = CompositeDecl::new( "Composite" )
        .with_contract( ty( "Sample.IFirst" ))
        .with_contract( ty( "Sample.ISecond" ))
        .with_contract( ty( "Sample.IThird" ));

    let text = generate( &types, &decl, GeneratorOptions::bare() );
    let lines = lines( &text );

    let constructors = lines.iter().filter(| line | line.starts_with( "public Composite(" )).collect::<Vec<_>>();
    assert_eq!( constructors, vec![
        &"public Composite(global::Sample.IFirst first, global::Sample.ISecond second, global::Sample.IThird third)",
    ]);
    assert!( lines.contains( &"this._first = first;" ));
    assert!( lines.contains( &"this._second = second;" ));
    assert!( lines.contains( &"this._third = third;" ));

}

#[test]
fn composite_without_contracts_still_gets_a_constructor() {

    let ( artifact, diagnostics ) = mixin_weaver::Generator::new( &StubTypes::new(), GeneratorOptions::bare() )
        .generate( &CompositeDecl::new( "Empty" ));

    assert_codes!( diagnostics, [ "MIX0100" ]);
    let text = artifact.expect( "warnings do not stop generation" ).text().to_string();
    assert!( lines( &text ).contains( &"public Empty()" ));

}
