pub(crate) mod bound;
pub(crate) mod color;
pub(crate) mod error;
