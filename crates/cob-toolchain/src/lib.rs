//! Concrete external collaborators: the C compiler and seed sources.

pub mod gcc;
pub mod seed;

pub use gcc::GccToolchain;
pub use seed::{LocalSeed, RandomOrgSeed};
