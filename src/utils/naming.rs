use std::collections::HashSet ;



/// Lower camel case identifier derived from a type's simple name.
///
/// A leading interface `I` is dropped when it is followed by another word
/// (`IWithMethod` becomes `withMethod`, `IO` stays `io`). A leading run of
/// capitals is lowered as one word (`HTTPClient` becomes `httpClient`).
pub fn lower_camel( simple_name: &str ) -> String {

    let chars = simple_name.chars().collect::<Vec<_>>();
    let chars = match chars.as_slice() {
        [ 'I', second, third, .. ] if second.is_uppercase() && third.is_lowercase() => &chars[1..],
        _ => &chars[..],
    };

    let upper_run = chars.iter().take_while(| c | c.is_uppercase() ).count();
    let lowered = match upper_run {
        0 => 0,
        run if run == chars.len() => run,
        1 => 1,
        // the last capital of the run starts the next word
        run => run - 1,
    };

    let name = chars.iter()
        .enumerate()
        .flat_map(|( index, c )| match index < lowered {
            true => c.to_lowercase().collect::<Vec<_>>(),
            false => vec![ *c ],
        })
        .collect::<String>();

    match name.is_empty() {
        true => "value".to_string(),
        false => name,
    }

}

/// Prefixes `@` to identifiers that are reserved keywords.
pub fn escape_keyword( identifier: &str ) -> String {
    match KEYWORDS.binary_search( &identifier ) {
        Ok( _ ) => format!( "@{}", identifier ),
        Err( _ ) => identifier.to_string(),
    }
}

/// Hands out names unique within one scope by appending `2`, `3`, ... on collision.
#[derive( Debug, Default )]
pub struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {

    pub fn new() -> Self { Self::default() }

    /// Returns `base` or the first free numbered variant, and marks it as used.
    pub fn claim( &mut self, base: &str ) -> String {
        let name = std::iter::once( base.to_string() )
            .chain(( 2_usize.. ).map(| n | format!( "{}{}", base, n )))
            .find(| candidate | !self.taken.contains( candidate ))
            .unwrap_or_else(|| base.to_string() );
        self.taken.insert( name.clone() );
        name
    }

}

// sorted for binary search
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else", "enum",
    "event", "explicit", "extern", "false", "finally", "fixed", "float", "for", "foreach", "goto",
    "if", "implicit", "in", "int", "interface", "internal", "is", "lock", "long", "namespace",
    "new", "null", "object", "operator", "out", "override", "params", "private", "protected", "public",
    "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof", "stackalloc", "static", "string",
    "struct", "switch", "this", "throw", "true", "try", "typeof", "uint", "ulong", "unchecked",
    "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];



#[cfg( test )]
mod tests {

    use super::* ;

    #[test]
    fn lower_camel_cases() {
        assert_eq!( lower_camel( "IWithMethod" ), "withMethod" );
        assert_eq!( lower_camel( "WithProperty" ), "withProperty" );
        assert_eq!( lower_camel( "AB" ), "ab" );
        assert_eq!( lower_camel( "IO" ), "io" );
        assert_eq!( lower_camel( "HTTPClient" ), "httpClient" );
        assert_eq!( lower_camel( "Item" ), "item" );
    }

    #[test]
    fn keywords_are_sorted_and_escaped() {
        assert!( KEYWORDS.windows( 2 ).all(| pair | pair[0] < pair[1] ));
        assert_eq!( escape_keyword( "string" ), "@string" );
        assert_eq!( escape_keyword( "strings" ), "strings" );
    }

    #[test]
    fn claims_are_numbered() {
        let mut names = UniqueNames::new();
        assert_eq!( names.claim( "a" ), "a" );
        assert_eq!( names.claim( "a" ), "a2" );
        assert_eq!( names.claim( "a" ), "a3" );
    }

}
