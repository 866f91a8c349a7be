//! Type-system collaborator.
//!
//! The generator never inspects types on its own. Whether one type converts to
//! another, and what members a contract declares, is answered by a host
//! [`TypeSystem`] implementation.

use crate::contract::{ TypeRef, Member };



/// How a value of one type converts to another.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash )]
pub enum Conversion {
    /// Both references name the same type.
    Identity,
    /// The source converts implicitly to the target (interface implementation,
    /// base class, user-defined implicit conversion).
    Implicit,
    /// No implicit conversion exists.
    None,
}

impl Conversion {
    /// Whether the conversion exists at all.
    #[inline] pub fn exists( self ) -> bool { self != Self::None }
}

/// Trait for answering type questions from a user-defined source.
///
/// The source can be anything: a compiler's semantic model, a hand written
/// catalog, or a fixed table in a test. See [`crate::catalog::Catalog`] for
/// the manifest backed implementation.
pub trait TypeSystem {

    /// Error type for member lookup failures.
    type Error: std::error::Error ;

    /// Classifies the conversion from `source` to `target`.
    fn classify( &self, source: &TypeRef, target: &TypeRef ) -> Conversion ;

    /// Returns the members `contract` declares, in declaration order.
    ///
    /// # Errors
    /// Implementations fail if the contract is unknown or its members cannot be read.
    fn members( &self, contract: &TypeRef ) -> Result<Vec<Member>, Self::Error> ;

}

impl<T: TypeSystem + ?Sized> TypeSystem for &T {
    type Error = T::Error ;
    fn classify( &self, source: &TypeRef, target: &TypeRef ) -> Conversion { ( **self ).classify( source, target )}
    fn members( &self, contract: &TypeRef ) -> Result<Vec<Member>, Self::Error> { ( **self ).members( contract )}
}
