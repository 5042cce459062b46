use thiserror::Error;

/// An error returned by a query that has no answer for the current contents of a set.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The set has no items.
    #[error("the collection is empty")]
    EmptyCollection,
}

/// The result of a fallible `Set` query.
pub type Result<T> = ::std::result::Result<T, Error>;
