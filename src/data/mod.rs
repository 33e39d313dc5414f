pub mod dictionary;
pub mod groups;
pub mod types;

pub use dictionary::{CompoundDictionary, DictionaryEntry};
pub use groups::{FunctionalGroup, GroupPatternTable};
pub use types::{
    ExplanationResponse, InputKind, PhysicalProperties, ResolvedIdentity, StructureRecord, StructureRequest,
};
