mod stub_types {

    use std::collections::HashMap ;
    use mixin_weaver::{ Conversion, Member, TypeRef, TypeSystem };

    #[derive( Debug, thiserror::Error )]
    #[error( "No members recorded for {0}" )]
    pub struct Unavailable( pub TypeRef );

    /// Type system answering from explicitly recorded contracts and conversions.
    #[derive( Debug, Default )]
    pub struct StubTypes {
        members: HashMap<TypeRef, Vec<Member>>,
        implicit: Vec<( TypeRef, TypeRef )>,
    }

    impl StubTypes {

        pub fn new() -> Self { Self::default() }

        pub fn contract( mut self, name: &str, members: Vec<Member> ) -> Self {
            self.members.insert( ty( name ), members );
            self
        }

        /// Records an implicit conversion from `source` to `target`.
        pub fn implicit( mut self, source: &str, target: &str ) -> Self {
            self.implicit.push(( ty( source ), ty( target )));
            self
        }

    }

    impl TypeSystem for StubTypes {

        type Error = Unavailable ;

        fn classify( &self, source: &TypeRef, target: &TypeRef ) -> Conversion {
            if source == target { return Conversion::Identity }
            match self.implicit.iter().any(|( s, t )| s == source && t == target ) {
                true => Conversion::Implicit,
                false => Conversion::None,
            }
        }

        fn members( &self, contract: &TypeRef ) -> Result<Vec<Member>, Self::Error> {
            self.members.get( contract ).cloned().ok_or_else(|| Unavailable( contract.clone() ))
        }

    }

    pub fn ty( text: &str ) -> TypeRef {
        TypeRef::parse( text ).unwrap_or_else(| err | panic!( "Invalid type reference {}: {}", text, err ))
    }

}
