pub mod implementations;
pub mod traitlookup;

pub use implementations::mock::MockLookup;
pub use implementations::pubchem::PubChemLookup;
pub use traitlookup::{CompoundLookup, CompoundProperties, LookupError};
