use proc_macro::TokenStream;
use quote::{ quote, format_ident };
use syn::{ parse_macro_input, LitStr, Token, punctuated::Punctuated };
use pipe_trait::Pipe ;

/// Generates one test per fixture directory.
///
/// Scans `tests/<segments..>` for subdirectories, sorts them alphabetically and
/// emits a test named after each directory that calls `check_fixture` with the
/// directory's path relative to `tests/`:
/// ```ignore
/// fixture_tests!( "fixtures" );
/// // expands to
/// #[test] fn default_plan() { check_fixture( "fixtures/default_plan" ) }
/// #[test] fn shared_provider() { check_fixture( "fixtures/shared_provider" ) }
/// ```
/// `check_fixture` must be in scope at the call site.
#[proc_macro]
pub fn fixture_tests( input: TokenStream ) -> TokenStream {

    let segments = parse_macro_input!( input with Punctuated::<LitStr, Token![,]>::parse_terminated )
        .iter()
        .map( LitStr::value )
        .collect::<Vec<_>>();

    let manifest_dir = std::env::var( "CARGO_MANIFEST_DIR" )
        .expect( "CARGO_MANIFEST_DIR not set" );

    let mut fixture_path = std::path::PathBuf::from( &manifest_dir ).join( "tests" );
    segments.iter().for_each(| segment | fixture_path.push( segment ));

    let tests = get_sorted_dirs( &fixture_path )
        .into_iter()
        .map(| dir_name | {
            let test_name = format_ident!( "{}", dir_name_to_test_name( &dir_name ));
            let relative = segments.iter()
                .cloned()
                .chain( std::iter::once( dir_name ))
                .collect::<Vec<_>>()
                .join( "/" );
            quote! {
                #[test]
                fn #test_name() { check_fixture( #relative ) }
            }
        })
        .collect::<Vec<_>>();

    quote! { #( #tests )* }.into()

}

fn dir_name_to_test_name( dir_name: &str ) -> String {
    dir_name
        .to_lowercase()
        .replace( '-', "_" )
}

fn get_sorted_dirs( parent_dir: &std::path::Path ) -> Vec<String> {

    let entries = match std::fs::read_dir( parent_dir ) {
        Ok( entries ) => entries,
        Err( _ ) => return vec![],
    };

    entries
        .filter_map( Result::ok )
        .filter(| entry | entry.path().is_dir() )
        .filter_map(| entry | entry.file_name().to_str().map( String::from ))
        .collect::<Vec<_>>()
        .pipe(| mut dirs | { dirs.sort(); dirs })

}
