//! Aliases for operations that may partially fail.
//! Recoverable problems are collected next to the result instead of aborting
//! the whole operation.

/// A result produced despite some recoverable failures, listed in the `Vec<E>`.
pub type PartialSuccess<T, E> = ( T, Vec<E> );

/// Concatenates collected failures, preserving order.
pub trait Merge<E> {
    fn merge_all( self, other: impl IntoIterator<Item = E> ) -> Self ;
}

impl<E> Merge<E> for Vec<E> {
    fn merge_all( mut self, other: impl IntoIterator<Item = E> ) -> Self {
        self.extend( other );
        self
    }
}
