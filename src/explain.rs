//! Formateador de explicaciones.
//!
//! Puro y total: cualquier registro produce un texto, sin camino de fallo.

use crate::data::types::{ExplanationResponse, StructureRecord};

const CANNOT_EXPLAIN: &str = "Unable to generate explanation.";

/// Texto descriptivo multilínea y determinista para un registro resuelto.
pub fn render(record: &StructureRecord) -> String {
    if record.iupac_name.is_empty() || record.iupac_name == "Unknown" {
        return CANNOT_EXPLAIN.to_string();
    }

    let mut lines = Vec::new();
    lines.push(format!("**{}**", record.iupac_name));
    if let Some(common) = &record.common_name {
        // La línea de nombre común se omite cuando coincide con el título.
        if !common.is_empty() && !common.eq_ignore_ascii_case(&record.iupac_name) {
            lines.push(format!("Common name: {common}"));
        }
    }

    lines.push(String::new());
    lines.push(format!("**Formula:** {}", record.molecular_formula));
    lines.push(format!("**Weight:** {} g/mol", record.molecular_weight));

    if !record.functional_groups.is_empty() {
        lines.push(String::new());
        lines.push("**Functional Groups:**".to_string());
        for group in &record.functional_groups {
            lines.push(format!("• {group}"));
        }
    }

    lines.join("\n")
}

/// Operación Explain del contrato externo.
pub fn explain(record: &StructureRecord) -> ExplanationResponse {
    ExplanationResponse { explanation: render(record) }
}
