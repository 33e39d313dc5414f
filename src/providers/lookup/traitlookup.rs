//! Frontera con el servicio remoto de resolución de nombres.
//!
//! El trait refleja las cuatro consultas que el núcleo necesita; cada
//! implementación decide transporte y formato. `Ok(None)` significa "el
//! servicio respondió y no conoce la respuesta"; `Err` es un fallo del
//! canal. Aguas arriba ambos colapsan en un único resultado NotFound, pero
//! la distinción se conserva para los logs.

use async_trait::async_trait;
use thiserror::Error;

/// Propiedades preferidas de un compuesto remoto. La notación isomérica
/// tiene prioridad sobre la canónica.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundProperties {
    pub isomeric_notation: Option<String>,
    pub canonical_notation: Option<String>,
    pub official_name: Option<String>,
}

/// Modos de fallo del canal remoto. Nunca llegan al caller del servicio;
/// sólo alimentan el logging de operabilidad.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("lookup timed out")]
    Timeout,
    #[error("lookup returned status {0}")]
    Status(u16),
    #[error("malformed lookup payload: {0}")]
    Malformed(String),
    #[error("lookup transport failure: {0}")]
    Transport(String),
}

/// Consultas al servicio remoto de nombres.
#[async_trait]
pub trait CompoundLookup: Send + Sync {
    /// Nombre → identificador numérico de compuesto.
    async fn cid_for_name(&self, name: &str) -> Result<Option<u64>, LookupError>;

    /// Identificador → notaciones preferidas y nombre oficial.
    async fn properties_for_cid(&self, cid: u64) -> Result<Option<CompoundProperties>, LookupError>;

    /// Camino secundario: identificador → notación en texto plano.
    async fn plain_notation_for_cid(&self, cid: u64) -> Result<Option<String>, LookupError>;

    /// Dirección inversa: notación → nombre oficial.
    async fn name_for_notation(&self, notation: &str) -> Result<Option<String>, LookupError>;
}
