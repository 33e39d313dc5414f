use thiserror::Error;

/// Taxonomía de fallos de una resolución. El `Display` de cada variante es
/// el texto que viaja en el campo `error` del registro final, directamente
/// presentable al usuario.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// La entrada no parsea como notación estructural.
    #[error("Invalid SMILES string.")]
    InvalidNotation,
    /// Parsea pero no pasa la sanitización química (p. ej. valencias).
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
    /// El nombre no se pudo resolver ni local ni remotamente. Colapsa todos
    /// los modos de fallo de red/lookup; lleva la consulta original.
    #[error("Could not find compound: '{0}'. Try a common name (e.g., Aspirin) or check spelling.")]
    CompoundNotFound(String),
    /// Fallo inesperado durante la derivación de propiedades.
    #[error("Error processing: {0}")]
    Processing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_notation_message() {
        assert_eq!(ResolveError::InvalidNotation.to_string(), "Invalid SMILES string.");
    }

    #[test]
    fn test_not_found_carries_query() {
        let err = ResolveError::CompoundNotFound("unobtainium".into());
        assert!(err.to_string().contains("'unobtainium'"));
    }

    #[test]
    fn test_invalid_structure_carries_message() {
        let err = ResolveError::InvalidStructure("bad valence".into());
        assert_eq!(err.to_string(), "Invalid structure: bad valence");
    }
}
