//! Tipos de datos del contrato externo y agregados internos de una
//! resolución. Los nombres de campo serializados son parte del contrato
//! JSON del servicio (`inputType`, `iupac_name`, `mol_block_2d`).

use serde::{Deserialize, Serialize};

/// Clase declarada (o inferida) de una entrada textual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    #[serde(rename = "smiles")]
    Notation,
    #[serde(rename = "name")]
    Name,
}

/// Petición de resolución: texto libre más la clase declarada por el caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureRequest {
    pub structure: String,
    #[serde(rename = "inputType")]
    pub input_type: InputKind,
}

/// Identidad resuelta de un compuesto. Se produce una vez por resolución y
/// no se muta después.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub canonical_notation: String,
    pub official_name: String,
    pub common_name: Option<String>,
}

/// Propiedades físicas derivadas estrictamente de un grafo sanitizado;
/// nunca se construyen a mano. Pesos redondeados a 4 decimales.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalProperties {
    pub formula: String,
    pub molecular_weight: f64,
    pub exact_mass: f64,
    pub standardized_identifier: String,
}

/// Agregado terminal de una resolución. Exactamente uno de {campos
/// poblados, `error`} es significativo: en fallo los campos numéricos
/// quedan en su default cero/vacío y sólo `error` lleva información.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureRecord {
    pub iupac_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    pub smiles: String,
    pub molecular_formula: String,
    pub molecular_weight: f64,
    pub exact_mass: f64,
    pub inchi: String,
    pub functional_groups: Vec<String>,
    pub mol_block_2d: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mol_block_3d: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg_2d: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StructureRecord {
    /// Registro terminal de fallo: todo en default salvo la razón.
    pub fn failed(reason: impl Into<String>) -> Self {
        StructureRecord { error: Some(reason.into()), ..Default::default() }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Respuesta de la operación Explain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplanationResponse {
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_kind_wire_names() {
        let req: StructureRequest =
            serde_json::from_str(r#"{"structure": "CCO", "inputType": "smiles"}"#).expect("request parses");
        assert_eq!(req.input_type, InputKind::Notation);
        let req: StructureRequest =
            serde_json::from_str(r#"{"structure": "aspirin", "inputType": "name"}"#).expect("request parses");
        assert_eq!(req.input_type, InputKind::Name);
    }

    #[test]
    fn test_failed_record_defaults() {
        let rec = StructureRecord::failed("Please provide a structure or name");
        assert!(rec.is_failure());
        assert_eq!(rec.molecular_weight, 0.0);
        assert!(rec.smiles.is_empty());
        assert!(rec.functional_groups.is_empty());
        assert!(rec.mol_block_3d.is_none());
    }

    #[test]
    fn test_record_serialization_omits_absent_optionals() {
        let rec = StructureRecord { iupac_name: "ethanol".into(), ..Default::default() };
        let json = serde_json::to_string(&rec).expect("serializes");
        assert!(!json.contains("mol_block_3d"));
        assert!(!json.contains("error"));
        assert!(json.contains("\"iupac_name\":\"ethanol\""));
    }
}
