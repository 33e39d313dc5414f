//! Implementación del lookup remoto contra la API PUG REST de PubChem.
//!
//! Cuatro endpoints de sólo lectura, todos acotados por el timeout del
//! cliente. Un 404 es "no encontrado" (Ok(None)); cualquier otro estado no
//! exitoso se reporta como `LookupError::Status` para que el resolvedor lo
//! registre antes de colapsarlo en NotFound. Sin reintentos.

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use crate::config::LookupConfig;

use super::super::traitlookup::{CompoundLookup, CompoundProperties, LookupError};

pub struct PubChemLookup {
    client: reqwest::Client,
    base_url: String,
}

impl PubChemLookup {
    /// Construye el cliente con el timeout de la configuración.
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<Option<T>, LookupError> {
        debug!("pubchem GET {url}");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        let payload = response.json::<T>().await.map_err(|e| LookupError::Malformed(e.to_string()))?;
        Ok(Some(payload))
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LookupError::Timeout
        } else if e.is_decode() {
            LookupError::Malformed(e.to_string())
        } else {
            LookupError::Transport(e.to_string())
        }
    }
}

/// Codificación percent de un segmento de ruta (RFC 3986, sin caracteres
/// reservados). Los nombres de compuestos llevan espacios y comas; las
/// notaciones llevan `/`, `+` y `#`.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[derive(Deserialize)]
struct CidResponse {
    #[serde(rename = "IdentifierList")]
    identifier_list: Option<IdentifierList>,
}

#[derive(Deserialize)]
struct IdentifierList {
    #[serde(rename = "CID")]
    cid: Vec<u64>,
}

#[derive(Deserialize)]
struct PropertyResponse {
    #[serde(rename = "PropertyTable")]
    property_table: Option<PropertyTable>,
}

#[derive(Deserialize)]
struct PropertyTable {
    #[serde(rename = "Properties")]
    properties: Vec<PropertyRow>,
}

#[derive(Deserialize)]
struct PropertyRow {
    #[serde(rename = "IsomericSMILES")]
    isomeric_smiles: Option<String>,
    #[serde(rename = "CanonicalSMILES")]
    canonical_smiles: Option<String>,
    #[serde(rename = "IUPACName")]
    iupac_name: Option<String>,
}

#[async_trait]
impl CompoundLookup for PubChemLookup {
    async fn cid_for_name(&self, name: &str) -> Result<Option<u64>, LookupError> {
        let url = format!("{}/compound/name/{}/cids/JSON", self.base_url, encode_segment(name));
        let payload: Option<CidResponse> = self.get_json(&url).await?;
        Ok(payload
            .and_then(|p| p.identifier_list)
            .and_then(|list| list.cid.first().copied()))
    }

    async fn properties_for_cid(&self, cid: u64) -> Result<Option<CompoundProperties>, LookupError> {
        let url = format!(
            "{}/compound/cid/{cid}/property/IsomericSMILES,CanonicalSMILES,IUPACName/JSON",
            self.base_url
        );
        let payload: Option<PropertyResponse> = self.get_json(&url).await?;
        let row = payload
            .and_then(|p| p.property_table)
            .and_then(|t| t.properties.into_iter().next());
        Ok(row.map(|r| CompoundProperties {
            isomeric_notation: r.isomeric_smiles,
            canonical_notation: r.canonical_smiles,
            official_name: r.iupac_name,
        }))
    }

    async fn plain_notation_for_cid(&self, cid: u64) -> Result<Option<String>, LookupError> {
        let url = format!("{}/compound/cid/{cid}/property/CanonicalSMILES/TXT", self.base_url);
        debug!("pubchem GET {url}");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        let text = response.text().await.map_err(|e| LookupError::Malformed(e.to_string()))?;
        let text = text.trim();
        // Un payload de error JSON en el endpoint TXT no es una notación.
        if text.is_empty() || text.starts_with('{') {
            return Ok(None);
        }
        Ok(Some(text.to_string()))
    }

    async fn name_for_notation(&self, notation: &str) -> Result<Option<String>, LookupError> {
        let url = format!(
            "{}/compound/smiles/{}/property/IUPACName/JSON",
            self.base_url,
            encode_segment(notation)
        );
        let payload: Option<PropertyResponse> = self.get_json(&url).await?;
        Ok(payload
            .and_then(|p| p.property_table)
            .and_then(|t| t.properties.into_iter().next())
            .and_then(|r| r.iupac_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("acetic acid"), "acetic%20acid");
        assert_eq!(encode_segment("CC(=O)O"), "CC%28%3DO%29O");
        assert_eq!(encode_segment("C#C"), "C%23C");
        assert_eq!(encode_segment("caffeine"), "caffeine");
    }

    #[test]
    fn test_cid_payload_shape() {
        let payload: CidResponse =
            serde_json::from_str(r#"{"IdentifierList": {"CID": [2244]}}"#).expect("parses");
        assert_eq!(payload.identifier_list.unwrap().cid, vec![2244]);
        let empty: CidResponse = serde_json::from_str("{}").expect("parses");
        assert!(empty.identifier_list.is_none());
    }

    #[test]
    fn test_property_payload_shape() {
        let raw = r#"{"PropertyTable": {"Properties": [{
            "CID": 2244,
            "IsomericSMILES": "CC(=O)Oc1ccccc1C(=O)O",
            "CanonicalSMILES": "CC(=O)OC1=CC=CC=C1C(=O)O",
            "IUPACName": "2-acetyloxybenzoic acid"
        }]}}"#;
        let payload: PropertyResponse = serde_json::from_str(raw).expect("parses");
        let row = payload.property_table.unwrap().properties.into_iter().next().unwrap();
        assert_eq!(row.isomeric_smiles.as_deref(), Some("CC(=O)Oc1ccccc1C(=O)O"));
        assert_eq!(row.iupac_name.as_deref(), Some("2-acetyloxybenzoic acid"));
        assert!(row.canonical_smiles.is_some());
    }
}
