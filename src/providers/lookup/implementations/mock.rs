//! Doble de prueba del lookup remoto.
//!
//! Devuelve respuestas enlatadas y cuenta cada consulta, lo que permite
//! afirmar en tests que un acierto del diccionario local nunca toca la red.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::super::traitlookup::{CompoundLookup, CompoundProperties, LookupError};

#[derive(Default)]
pub struct MockLookup {
    calls: AtomicUsize,
    cid: Option<u64>,
    properties: Option<CompoundProperties>,
    plain_notation: Option<String>,
    reverse_name: Option<String>,
    fail: Option<LookupError>,
}

impl MockLookup {
    /// Servicio que no conoce nada: toda consulta responde "sin resultado".
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_cid(mut self, cid: u64) -> Self {
        self.cid = Some(cid);
        self
    }

    pub fn with_properties(mut self, properties: CompoundProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_plain_notation(mut self, notation: &str) -> Self {
        self.plain_notation = Some(notation.to_string());
        self
    }

    pub fn with_reverse_name(mut self, name: &str) -> Self {
        self.reverse_name = Some(name.to_string());
        self
    }

    /// Toda consulta falla con el error dado (simula timeouts, 5xx, etc.).
    pub fn failing(mut self, error: LookupError) -> Self {
        self.fail = Some(error);
        self
    }

    /// Número total de consultas recibidas por cualquier método.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record<T: Clone>(&self, value: &Option<T>) -> Result<Option<T>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail {
            Some(e) => Err(e.clone()),
            None => Ok(value.clone()),
        }
    }
}

#[async_trait]
impl CompoundLookup for MockLookup {
    async fn cid_for_name(&self, _name: &str) -> Result<Option<u64>, LookupError> {
        self.record(&self.cid)
    }

    async fn properties_for_cid(&self, _cid: u64) -> Result<Option<CompoundProperties>, LookupError> {
        self.record(&self.properties)
    }

    async fn plain_notation_for_cid(&self, _cid: u64) -> Result<Option<String>, LookupError> {
        self.record(&self.plain_notation)
    }

    async fn name_for_notation(&self, _notation: &str) -> Result<Option<String>, LookupError> {
        self.record(&self.reverse_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_mock_answers_none_and_counts() {
        let mock = MockLookup::empty();
        assert_eq!(mock.cid_for_name("aspirin").await.unwrap(), None);
        assert_eq!(mock.name_for_notation("CCO").await.unwrap(), None);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failing_mock_propagates_error() {
        let mock = MockLookup::empty().with_cid(2244).failing(LookupError::Timeout);
        assert_eq!(mock.cid_for_name("aspirin").await.unwrap_err(), LookupError::Timeout);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_configured_answers() {
        let mock = MockLookup::empty()
            .with_cid(702)
            .with_properties(CompoundProperties {
                isomeric_notation: Some("CCO".into()),
                canonical_notation: Some("CCO".into()),
                official_name: Some("ethanol".into()),
            });
        assert_eq!(mock.cid_for_name("ethanol").await.unwrap(), Some(702));
        let props = mock.properties_for_cid(702).await.unwrap().unwrap();
        assert_eq!(props.official_name.as_deref(), Some("ethanol"));
    }
}
