use mixin_weaver::{ CompositeDecl, GeneratorOptions, Method, ScopeDecl, TypeKind };
use crate::stub_types::{ StubTypes, ty };
use crate::generate ;

fn types() -> StubTypes {
    StubTypes::new().contract( "Sample.IService", vec![ Method::new( "Run" ).into() ])
}

#[test]
fn enclosing_scopes_are_reopened_as_partial() {

    let decl = CompositeDecl::new( "Composite" )
        .with_kind( TypeKind::Record )
        .with_type_parameters([ "T" ])
        .with_namespace( "Sample.Nested" )
        .with_scope( ScopeDecl::new( "Outer" ).with_kind( TypeKind::Struct ).with_type_parameters([ "TOuter" ]))
        .with_scope( ScopeDecl::new( "Inner" ))
        .with_contract( ty( "Sample.IService" ));

    let text = generate( &types(), &decl, GeneratorOptions::bare() );
    let expected = [
        "namespace Sample.Nested",
        "{",
        "    partial struct Outer<TOuter>",
        "    {",
        "        partial class Inner",
        "        {",
        "            partial record Composite<T>",
        "            {",
        "                private global::Sample.IService _service;",
        "",
        "                public Composite(global::Sample.IService service)",
    ].map(| line | format!( "{}\n", line )).concat();

    assert!( text.starts_with( &expected ), "unexpected layout:\n{}", text );
    assert!( text.ends_with( "            }\n        }\n    }\n}\n" ));
    assert_eq!( decl.hint_name(), "Sample.Nested.Outer`1.Inner.Composite`1" );

}

#[test]
fn top_level_composite_has_no_namespace_block() {
    let decl = CompositeDecl::new( "Composite" ).with_contract( ty( "Sample.IService" ));
    let text = generate( &types(), &decl, GeneratorOptions::bare() );
    assert!( text.starts_with( "partial class Composite\n{\n    private global::Sample.IService _service;\n" ));
    assert_eq!( decl.hint_name(), "Composite" );
}

#[test]
fn options_shape_the_output() {

    let decl = CompositeDecl::new( "Composite" ).with_contract( ty( "Sample.IService" ));

    let tabbed = generate( &types(), &decl, GeneratorOptions::bare().with_tabs().with_field_prefix( "m_" ));
    assert!( tabbed.contains( "\tprivate global::Sample.IService m_service;\n" ));
    assert!( tabbed.contains( "\t\tthis.m_service = service;\n" ));
    assert!( !tabbed.contains( "#region" ));
    assert!( !tabbed.contains( "#nullable" ));

    let full = generate( &types(), &decl, GeneratorOptions::default() );
    assert!( full.starts_with( "// <auto-generated>\n" ));
    assert!( full.contains( "\n#nullable enable\n" ));
    assert!( full.contains( "    #region global::Sample.IService\n" ));
    assert!( full.contains( "    #endregion\n" ));

}
