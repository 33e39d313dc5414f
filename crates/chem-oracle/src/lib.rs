//! Frontera con el motor de química.
//!
//! El resto del sistema nunca manipula grafos moleculares directamente:
//! todo pasa por el trait [`MoleculeOracle`], que encapsula parseo,
//! sanitización, propiedades canónicas, matching de subestructuras y
//! generación de coordenadas 2D/3D.
//!
//! Implementaciones:
//! - [`FixtureOracle`]: determinista, en memoria, para tests y demos.
//! - `RdkitOracle` (feature `python-rdkit`): puente a RDKit vía Python.

pub mod fixture;
#[cfg(feature = "python-rdkit")]
pub mod rdkit;

pub use fixture::FixtureOracle;
#[cfg(feature = "python-rdkit")]
pub use rdkit::RdkitOracle;

use thiserror::Error;

/// Errores en la frontera del oráculo. Cada variante corresponde a un modo
/// de degradación distinto aguas arriba: `Parse`/`Sanitize` terminan una
/// resolución, `Pattern` se omite en silencio durante la clasificación y
/// `Embed`/`ForceField` degradan a geometría ausente.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("notation does not parse: {0}")]
    Parse(String),
    #[error("structure failed sanitization: {0}")]
    Sanitize(String),
    #[error("substructure pattern rejected: {0}")]
    Pattern(String),
    #[error("embedding failed: {0}")]
    Embed(String),
    #[error("force field not applicable: {0}")]
    ForceField(String),
    #[error("engine failure: {0}")]
    Engine(String),
}

/// Métodos de embedding 3D, del más sofisticado al de último recurso.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedMethod {
    Etkdg3,
    Etkdg2,
    RandomCoords,
}

/// Campos de fuerza para optimizar una geometría embebida.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceField {
    Mmff94,
    Uff,
}

/// Interfaz del motor de química subyacente.
///
/// Invariante: un `Mol` devuelto por `parse` ya pasó la validación
/// estructural del motor; nunca se expone un resultado de parseo sin
/// sanitizar fuera de esta frontera. `sanitize` re-valida un grafo ya
/// construido (valencias, aromaticidad) y puede rechazarlo con mensaje.
pub trait MoleculeOracle: Send + Sync {
    /// Grafo molecular validado, opaco para los consumidores.
    type Mol: Clone + Send + Sync;

    fn parse(&self, notation: &str) -> Result<Self::Mol, OracleError>;
    fn sanitize(&self, mol: &Self::Mol) -> Result<(), OracleError>;

    fn canonical_notation(&self, mol: &Self::Mol) -> Result<String, OracleError>;
    fn formula(&self, mol: &Self::Mol) -> Result<String, OracleError>;
    fn weight(&self, mol: &Self::Mol) -> Result<f64, OracleError>;
    fn exact_mass(&self, mol: &Self::Mol) -> Result<f64, OracleError>;
    /// Identificador estandarizado (InChI).
    fn standard_identifier(&self, mol: &Self::Mol) -> Result<String, OracleError>;

    /// Coordenadas 2D serializadas (molblock).
    fn layout_2d(&self, mol: &Self::Mol) -> Result<String, OracleError>;
    /// Representación SVG del diagrama 2D.
    fn render_svg(&self, mol: &Self::Mol) -> Result<String, OracleError>;

    /// Número de ocurrencias de un patrón de subestructura (SMARTS).
    /// `Err(OracleError::Pattern)` si el patrón no compila.
    fn match_count(&self, mol: &Self::Mol, pattern: &str) -> Result<usize, OracleError>;

    /// Copia del grafo con hidrógenos explícitos, previa al embedding.
    fn add_hydrogens(&self, mol: &Self::Mol) -> Result<Self::Mol, OracleError>;
    /// Intenta asignar una conformación 3D con el método y semilla dados.
    fn embed_3d(&self, mol: &mut Self::Mol, method: EmbedMethod, seed: u64) -> Result<(), OracleError>;
    /// Optimiza la conformación actual con el campo de fuerza dado.
    fn optimize(&self, mol: &mut Self::Mol, forcefield: ForceField) -> Result<(), OracleError>;
    /// Molblock de la conformación 3D actual.
    fn molblock_3d(&self, mol: &Self::Mol) -> Result<String, OracleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = OracleError::Parse("CCO(".into());
        assert_eq!(e.to_string(), "notation does not parse: CCO(");
        let e = OracleError::Pattern("[broken".into());
        assert_eq!(e.to_string(), "substructure pattern rejected: [broken");
    }

    #[test]
    fn test_embed_method_order_is_meaningful() {
        // El pipeline recorre los métodos en este orden fijo.
        let chain = [EmbedMethod::Etkdg3, EmbedMethod::Etkdg2, EmbedMethod::RandomCoords];
        assert_eq!(chain.len(), 3);
        assert_ne!(chain[0], chain[2]);
    }
}
