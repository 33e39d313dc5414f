//! Orquestador de una resolución completa.
//!
//! Máquina de estados lineal, sin vuelta atrás:
//! despacho por clase declarada → sanitización → derivación → ensamblado.
//! La clase declarada manda: una entrada declarada nombre jamás se intenta
//! parsear como notación, y una notación que no parsea es terminal (sin
//! fallback a búsqueda por nombre). El pipeline nunca propaga un error más
//! allá de su frontera: todo fallo termina en un registro con razón.

pub mod geometry;

use chem_oracle::{MoleculeOracle, OracleError};
use log::{debug, warn};

use crate::classify::FunctionalGroupClassifier;
use crate::data::dictionary::CompoundDictionary;
use crate::data::groups::GroupPatternTable;
use crate::data::types::{InputKind, PhysicalProperties, ResolvedIdentity, StructureRecord, StructureRequest};
use crate::errors::ResolveError;
use crate::providers::lookup::CompoundLookup;
use crate::resolver::NameResolver;

/// Texto sustituto cuando la búsqueda inversa no aporta nombre.
pub const NAME_NOT_AVAILABLE: &str = "Name not available";

/// Razón terminal para entradas vacías.
pub const EMPTY_INPUT_REASON: &str = "Please provide a structure or name";

/// Pipeline de resolución. Sin estado entre invocaciones: las dos tablas
/// inyectadas son de sólo lectura y el resto vive dentro de cada llamada.
pub struct StructurePipeline<'a, O: MoleculeOracle, L: CompoundLookup + ?Sized> {
    oracle: &'a O,
    lookup: &'a L,
    dictionary: &'a CompoundDictionary,
    groups: &'a GroupPatternTable,
}

/// Partes derivadas de un grafo sanitizado, previas al ensamblado.
struct DerivedParts {
    properties: PhysicalProperties,
    canonical_notation: String,
    functional_groups: Vec<String>,
    mol_block_2d: String,
    mol_block_3d: Option<String>,
    svg_2d: Option<String>,
}

impl<'a, O: MoleculeOracle, L: CompoundLookup + ?Sized> StructurePipeline<'a, O, L> {
    pub fn new(
        oracle: &'a O,
        lookup: &'a L,
        dictionary: &'a CompoundDictionary,
        groups: &'a GroupPatternTable,
    ) -> Self {
        Self { oracle, lookup, dictionary, groups }
    }

    /// Operación Resolve del contrato externo.
    pub async fn resolve_request(&self, request: &StructureRequest) -> StructureRecord {
        self.resolve(&request.structure, request.input_type).await
    }

    /// Resuelve una entrada con su clase declarada. Siempre devuelve un
    /// registro bien formado; los fallos viajan en el campo `error`.
    pub async fn resolve(&self, input: &str, kind: InputKind) -> StructureRecord {
        let input = input.trim();
        if input.is_empty() {
            return StructureRecord::failed(EMPTY_INPUT_REASON);
        }

        let (mol, official_name, common_name) = match kind {
            InputKind::Notation => {
                let mol = match self.oracle.parse(input) {
                    Ok(mol) => mol,
                    Err(e) => {
                        debug!("notation '{input}' does not parse: {e}");
                        return StructureRecord::failed(ResolveError::InvalidNotation.to_string());
                    }
                };
                // Enriquecimiento no fatal: nombre oficial vía búsqueda inversa.
                let official = match self.lookup.name_for_notation(input).await {
                    Ok(Some(name)) if !name.is_empty() => name,
                    Ok(_) => NAME_NOT_AVAILABLE.to_string(),
                    Err(e) => {
                        warn!("reverse name lookup failed for '{input}': {e}");
                        NAME_NOT_AVAILABLE.to_string()
                    }
                };
                (mol, official, None)
            }
            InputKind::Name => {
                let resolver = NameResolver::new(self.oracle, self.lookup, self.dictionary);
                match resolver.resolve(input).await {
                    Ok(resolved) => (resolved.mol, resolved.official_name, Some(resolved.display_name)),
                    Err(e) => return StructureRecord::failed(e.to_string()),
                }
            }
        };

        // Ambas ramas convergen aquí: re-validación estructural.
        if let Err(e) = self.oracle.sanitize(&mol) {
            let message = match e {
                OracleError::Sanitize(m) => m,
                other => other.to_string(),
            };
            return StructureRecord::failed(ResolveError::InvalidStructure(message).to_string());
        }

        let DerivedParts { properties, canonical_notation, functional_groups, mol_block_2d, mol_block_3d, svg_2d } =
            match self.derive(&mol) {
                Ok(parts) => parts,
                Err(e) => return StructureRecord::failed(e.to_string()),
            };

        let identity = ResolvedIdentity {
            canonical_notation,
            official_name: if official_name.is_empty() { "Unknown".to_string() } else { official_name },
            common_name,
        };
        assemble(identity, properties, functional_groups, mol_block_2d, mol_block_3d, svg_2d)
    }

    /// Derivación a partir del grafo ya sanitizado. Las propiedades
    /// canónicas y el layout 2D son obligatorios; SVG, InChI y 3D degradan
    /// a ausente.
    fn derive(&self, mol: &O::Mol) -> Result<DerivedParts, ResolveError> {
        let mol_block_2d = self
            .oracle
            .layout_2d(mol)
            .map_err(|e| ResolveError::Processing(e.to_string()))?;

        let svg_2d = match self.oracle.render_svg(mol) {
            Ok(svg) => Some(svg),
            Err(e) => {
                warn!("2D rendering failed: {e}");
                None
            }
        };

        let mol_block_3d = geometry::embed_3d(self.oracle, mol);

        let canonical_notation = self
            .oracle
            .canonical_notation(mol)
            .map_err(|e| ResolveError::Processing(e.to_string()))?;
        let formula = self.oracle.formula(mol).map_err(|e| ResolveError::Processing(e.to_string()))?;
        let molecular_weight = self.oracle.weight(mol).map_err(|e| ResolveError::Processing(e.to_string()))?;
        let exact_mass = self.oracle.exact_mass(mol).map_err(|e| ResolveError::Processing(e.to_string()))?;
        let standardized_identifier = match self.oracle.standard_identifier(mol) {
            Ok(inchi) => inchi,
            Err(e) => {
                warn!("standardized identifier unavailable: {e}");
                String::new()
            }
        };

        let properties = PhysicalProperties {
            formula,
            molecular_weight: round4(molecular_weight),
            exact_mass: round4(exact_mass),
            standardized_identifier,
        };

        let functional_groups = FunctionalGroupClassifier::new(self.groups)
            .classify(self.oracle, mol)
            .iter()
            .map(|g| g.label().to_string())
            .collect();

        Ok(DerivedParts {
            properties,
            canonical_notation,
            functional_groups,
            mol_block_2d,
            mol_block_3d,
            svg_2d,
        })
    }
}

fn assemble(
    identity: ResolvedIdentity,
    properties: PhysicalProperties,
    functional_groups: Vec<String>,
    mol_block_2d: String,
    mol_block_3d: Option<String>,
    svg_2d: Option<String>,
) -> StructureRecord {
    StructureRecord {
        iupac_name: identity.official_name,
        common_name: identity.common_name,
        smiles: identity.canonical_notation,
        molecular_formula: properties.formula,
        molecular_weight: properties.molecular_weight,
        exact_mass: properties.exact_mass,
        inchi: properties.standardized_identifier,
        functional_groups,
        mol_block_2d,
        mol_block_3d,
        svg_2d,
        error: None,
    }
}

/// Redondeo a 4 decimales de los pesos derivados.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round4() {
        assert_eq!(round4(46.068_999_9), 46.069);
        assert_eq!(round4(180.15901), 180.159);
        assert_eq!(round4(0.0), 0.0);
    }
}
