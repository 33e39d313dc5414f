//! chemresolve: resolución de identificadores químicos.
//!
//! Convierte una entrada textual (notación SMILES o nombre común/IUPAC) en
//! un registro molecular normalizado: notación canónica, fórmula, masas,
//! geometría 2D/3D y grupos funcionales reconocidos. Dos operaciones
//! lógicas: resolver ([`pipeline::StructurePipeline`]) y explicar
//! ([`explain::explain`]).
//!
//! El motor de química es un colaborador externo detrás del trait
//! `chem_oracle::MoleculeOracle`; el servicio remoto de nombres, detrás de
//! [`providers::lookup::CompoundLookup`]. Ambos se inyectan junto con las
//! dos tablas estáticas (diccionario local y patrones de grupos).

pub mod classify;
pub mod config;
pub mod data;
pub mod errors;
pub mod explain;
pub mod pipeline;
pub mod providers;
pub mod resolver;

pub use data::dictionary::CompoundDictionary;
pub use data::groups::{FunctionalGroup, GroupPatternTable};
pub use data::types::{ExplanationResponse, InputKind, StructureRecord, StructureRequest};
pub use errors::ResolveError;
pub use pipeline::StructurePipeline;

#[cfg(test)]
mod tests {
    use super::errors::ResolveError;

    #[test]
    fn test_error_taxonomy_is_user_presentable() {
        let e = ResolveError::InvalidNotation.to_string();
        assert_eq!(e, "Invalid SMILES string.");
        let e = ResolveError::Processing("boom".into()).to_string();
        assert_eq!(e, "Error processing: boom");
    }
}
