//! Provider to contract matching.
//!
//! [`greedy_assign`] pairs an ordered list of providers with an ordered list of
//! contracts in two passes. The first pass only accepts identity matches, the
//! second accepts implicit conversions over whatever the first pass left. A
//! provider may collect several contracts; a contract goes to at most one
//! provider.

use tracing::trace ;

use crate::contract::TypeRef ;
use crate::type_system::{ Conversion, TypeSystem };



/// Classifies `source` against `target`, short-circuiting structurally equal
/// references to [`Conversion::Identity`].
pub fn classify<T: TypeSystem + ?Sized>( types: &T, source: &TypeRef, target: &TypeRef ) -> Conversion {
    match source == target {
        true => Conversion::Identity,
        false => types.classify( source, target ),
    }
}

/// A provider and the contracts it answers for, in assignment order.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct ProviderAssignment {
    provider: TypeRef,
    contracts: Vec<TypeRef>,
}

impl ProviderAssignment {

    pub fn new( provider: TypeRef, contracts: Vec<TypeRef> ) -> Self {
        Self { provider, contracts }
    }

    #[inline] pub fn provider( &self ) -> &TypeRef { &self.provider }
    #[inline] pub fn contracts( &self ) -> &[TypeRef] { &self.contracts }
    /// `true` if the provider did not match any contract.
    #[inline] pub fn is_unmatched( &self ) -> bool { self.contracts.is_empty() }
}

/// Result of [`greedy_assign`].
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct Assignment {
    /// One entry per input provider, in input order. Unmatched providers are
    /// kept with an empty contract list.
    pub bindings: Vec<ProviderAssignment>,
    /// Providers that did not match any contract, in input order.
    pub unmatched_providers: Vec<TypeRef>,
    /// Contracts no provider matched, in input order.
    pub unmatched_contracts: Vec<TypeRef>,
}

/// Greedily assigns contracts to providers.
///
/// Both passes walk the open providers in input order. For each one, a snapshot
/// of the open contracts is scanned in input order and every contract that
/// matches under the current pass is taken. A provider that took anything
/// leaves the open set once its scan is done.
pub fn greedy_assign<T: TypeSystem + ?Sized>(
    types: &T,
    providers: &[TypeRef],
    contracts: &[TypeRef],
) -> Assignment {

    let mut assigned: Vec<Vec<usize>> = vec![ Vec::new(); providers.len() ];
    let mut open_providers = ( 0..providers.len() ).collect::<Vec<_>>();
    let mut open_contracts = ( 0..contracts.len() ).collect::<Vec<_>>();

    for wanted in [ Conversion::Identity, Conversion::Implicit ] {
        open_providers.retain(| &provider | {
            let snapshot = open_contracts.clone();
            let taken = snapshot.into_iter()
                .filter(| &contract | classify( types, &providers[provider], &contracts[contract] ) == wanted )
                .collect::<Vec<_>>();
            taken.iter().for_each(| contract | trace!(
                provider = %providers[provider],
                contract = %contracts[*contract],
                conversion = ?wanted,
                "assigned",
            ));
            open_contracts.retain(| contract | !taken.contains( contract ));
            assigned[provider].extend( taken );
            assigned[provider].is_empty()
        });
    }

    let bindings = providers.iter()
        .zip( assigned )
        .map(|( provider, indices )| ProviderAssignment::new(
            provider.clone(),
            indices.into_iter().map(| index | contracts[index].clone() ).collect(),
        ))
        .collect::<Vec<_>>();

    Assignment {
        unmatched_providers: open_providers.into_iter().map(| index | providers[index].clone() ).collect(),
        unmatched_contracts: open_contracts.into_iter().map(| index | contracts[index].clone() ).collect(),
        bindings,
    }

}



#[cfg( test )]
mod tests {

    use super::* ;
    use crate::contract::Member ;

    struct Table( Vec<( &'static str, &'static str )> );

    impl TypeSystem for Table {
        type Error = std::convert::Infallible ;
        fn classify( &self, source: &TypeRef, target: &TypeRef ) -> Conversion {
            match self.0.iter().any(|( s, t )| *s == source.path() && *t == target.path() ) {
                true => Conversion::Implicit,
                false => Conversion::None,
            }
        }
        fn members( &self, _: &TypeRef ) -> Result<Vec<Member>, Self::Error> { Ok( Vec::new() ) }
    }

    fn ty( path: &str ) -> TypeRef { TypeRef::parse( path ).unwrap() }

    #[test]
    fn identity_wins_over_earlier_implicit_provider() {
        let types = Table( vec![( "AB", "A" ), ( "AB", "B" )]);
        let result = greedy_assign( &types, &[ ty( "AB" ), ty( "A" )], &[ ty( "A" ), ty( "B" )]);
        assert_eq!( result.bindings[0].contracts(), &[ ty( "B" )]);
        assert_eq!( result.bindings[1].contracts(), &[ ty( "A" )]);
        assert!( result.unmatched_providers.is_empty() );
        assert!( result.unmatched_contracts.is_empty() );
    }

    #[test]
    fn provider_collects_several_contracts() {
        let types = Table( vec![( "AB", "A" ), ( "AB", "B" )]);
        let result = greedy_assign( &types, &[ ty( "AB" )], &[ ty( "A" ), ty( "B" ), ty( "C" )]);
        assert_eq!( result.bindings[0].contracts(), &[ ty( "A" ), ty( "B" )]);
        assert_eq!( result.unmatched_contracts, vec![ ty( "C" )]);
    }

    #[test]
    fn unrelated_provider_is_kept_with_empty_set() {
        let types = Table( vec![]);
        let result = greedy_assign( &types, &[ ty( "X" )], &[ ty( "A" )]);
        assert!( result.bindings[0].is_unmatched() );
        assert_eq!( result.unmatched_providers, vec![ ty( "X" )]);
        assert_eq!( result.unmatched_contracts, vec![ ty( "A" )]);
    }

    #[test]
    fn earlier_provider_takes_shared_contract() {
        let types = Table( vec![( "P", "A" ), ( "Q", "A" )]);
        let result = greedy_assign( &types, &[ ty( "P" ), ty( "Q" )], &[ ty( "A" )]);
        assert_eq!( result.bindings[0].contracts(), &[ ty( "A" )]);
        assert!( result.bindings[1].is_unmatched() );
        assert_eq!( result.unmatched_providers, vec![ ty( "Q" )]);
    }

}
