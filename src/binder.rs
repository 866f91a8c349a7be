//! Binding of resolved providers onto the composite's field slots.
//!
//! Every contract owns exactly one [`FieldSlot`]. A [`ConstructorPlan`] says,
//! for each constructor parameter, which slots receive it.

use tracing::debug ;

use crate::contract::TypeRef ;
use crate::matcher::{ ProviderAssignment, classify };
use crate::type_system::{ Conversion, TypeSystem };
use crate::utils::{ lower_camel, escape_keyword, UniqueNames };



/// Storage cell for one contract.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct FieldSlot {
    contract: TypeRef,
    name: String,
}

impl FieldSlot {
    /// The contract this slot stores, also the field's type.
    #[inline] pub fn contract( &self ) -> &TypeRef { &self.contract }
    /// Field identifier, unique within the composite.
    #[inline] pub fn name( &self ) -> &str { &self.name }
}

/// The fixed slot set of a composite, one slot per contract in contract order.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct SlotSet {
    slots: Vec<FieldSlot>,
}

impl SlotSet {

    /// Creates one slot per contract. Names are `prefix` followed by the
    /// lower camel case contract name, numbered on collision.
    pub fn new( contracts: &[TypeRef], prefix: &str ) -> Self {
        let mut names = UniqueNames::new();
        let slots = contracts.iter()
            .map(| contract | {
                let name = names.claim( &format!( "{}{}", prefix, lower_camel( contract.simple_name() )));
                let name = match prefix.is_empty() {
                    true => escape_keyword( &name ),
                    false => name,
                };
                FieldSlot { contract: contract.clone(), name }
            })
            .collect();
        Self { slots }
    }

    #[inline] pub fn slots( &self ) -> &[FieldSlot] { &self.slots }
    #[inline] pub fn len( &self ) -> usize { self.slots.len() }
    #[inline] pub fn is_empty( &self ) -> bool { self.slots.is_empty() }

    pub fn get( &self, index: usize ) -> Option<&FieldSlot> { self.slots.get( index ) }

    /// Slot storing `contract`, if any.
    pub fn slot_of( &self, contract: &TypeRef ) -> Option<&FieldSlot> {
        self.slots.iter().find(| slot | slot.contract() == contract )
    }

}

/// One constructor parameter and the slots it is stored into.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct PlanParameter {
    name: String,
    ty: TypeRef,
    /// Indices into the slot set, ascending
    slots: Vec<usize>,
}

impl PlanParameter {
    #[inline] pub fn name( &self ) -> &str { &self.name }
    #[inline] pub fn ty( &self ) -> &TypeRef { &self.ty }
    #[inline] pub fn slots( &self ) -> &[usize] { &self.slots }
    /// `true` if the parameter is declared but never stored.
    #[inline] pub fn is_dead( &self ) -> bool { self.slots.is_empty() }
}

/// Parameters of one constructor, in declaration order.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct ConstructorPlan {
    parameters: Vec<PlanParameter>,
}

impl ConstructorPlan {
    #[inline] pub fn parameters( &self ) -> &[PlanParameter] { &self.parameters }

    /// Parameter types in order, the constructor's signature.
    pub fn signature( &self ) -> Vec<&TypeRef> { self.parameters.iter().map( PlanParameter::ty ).collect() }
}

/// The assignment behind the default constructor: every contract provides itself.
pub fn default_assignment( contracts: &[TypeRef] ) -> Vec<ProviderAssignment> {
    contracts.iter()
        .map(| contract | ProviderAssignment::new( contract.clone(), vec![ contract.clone() ]))
        .collect()
}

/// Maps an assignment onto the slot set.
///
/// Providers are taken in order; each binds the still unbound slots whose
/// contract is identical to one of its assigned contracts. Slots left over get
/// a parameter of their own, typed and named after their contract.
pub fn bind<T: TypeSystem + ?Sized>( types: &T, slots: &SlotSet, bindings: &[ProviderAssignment] ) -> ConstructorPlan {

    let mut names = UniqueNames::new();
    let mut pool = ( 0..slots.len() ).collect::<Vec<_>>();
    let mut parameter = | ty: &TypeRef, bound: Vec<usize> | PlanParameter {
        name: escape_keyword( &names.claim( &lower_camel( ty.simple_name() ))),
        ty: ty.clone(),
        slots: bound,
    };

    let mut parameters = bindings.iter()
        .map(| binding | {
            let ( bound, rest ) = pool.iter().copied().partition::<Vec<usize>, _>(| &index | binding.contracts().iter()
                .any(| contract | classify( types, contract, &slots.slots()[index].contract ) == Conversion::Identity ));
            pool = rest ;
            parameter( binding.provider(), bound )
        })
        .collect::<Vec<_>>();

    parameters.extend( pool.into_iter().map(| index | parameter( &slots.slots()[index].contract, vec![ index ])));

    debug!(
        parameters = parameters.len(),
        dead = parameters.iter().filter(| parameter | parameter.is_dead() ).count(),
        "bound constructor plan",
    );

    ConstructorPlan { parameters }

}
