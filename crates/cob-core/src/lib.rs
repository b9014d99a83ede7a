pub mod config;
pub mod error;
pub mod names;
pub mod traits;
pub mod types;

pub use config::CobConfig;
pub use error::{CobError, Result};
pub use names::NameRegistry;
pub use traits::{SeedProvider, SignatureLister, SourceProvider};
pub use types::{Category, Mappings, Signature, SymbolTable};
