//! Resolución de nombre a grafo molecular.
//!
//! Diccionario local primero; sólo en fallo de diccionario se consulta el
//! servicio remoto en dos etapas (nombre → CID, CID → propiedades), con el
//! endpoint de texto plano como camino secundario. Toda notación devuelta
//! se valida contra el oráculo antes de aceptarse: una cadena que no parsea
//! nunca se presenta como éxito.
//!
//! Los modos de fallo (timeout, estado no exitoso, payload malformado,
//! resultados vacíos, notación no parseable) colapsan en un único
//! `CompoundNotFound`; los logs conservan la distinción. Sin reintentos.

use chem_oracle::MoleculeOracle;
use log::{debug, info, warn};

use crate::data::dictionary::CompoundDictionary;
use crate::errors::ResolveError;
use crate::providers::lookup::{CompoundLookup, LookupError};

/// Resultado de una resolución por nombre: grafo validado más los nombres
/// que lo acompañan.
#[derive(Debug)]
pub struct ResolvedCompound<M> {
    pub mol: M,
    pub official_name: String,
    pub display_name: String,
    pub notation: String,
}

pub struct NameResolver<'a, O: MoleculeOracle, L: CompoundLookup + ?Sized> {
    oracle: &'a O,
    lookup: &'a L,
    dictionary: &'a CompoundDictionary,
}

impl<'a, O: MoleculeOracle, L: CompoundLookup + ?Sized> NameResolver<'a, O, L> {
    pub fn new(oracle: &'a O, lookup: &'a L, dictionary: &'a CompoundDictionary) -> Self {
        Self { oracle, lookup, dictionary }
    }

    pub async fn resolve(&self, name: &str) -> Result<ResolvedCompound<O::Mol>, ResolveError> {
        if let Some(entry) = self.dictionary.lookup(name) {
            match self.oracle.parse(entry.notation) {
                Ok(mol) => {
                    debug!("dictionary hit for '{name}'");
                    return Ok(ResolvedCompound {
                        mol,
                        official_name: entry.official_name.to_string(),
                        display_name: entry.display_name.to_string(),
                        notation: entry.notation.to_string(),
                    });
                }
                // Una entrada local corrupta no debe ocultar el camino remoto.
                Err(e) => warn!("dictionary notation for '{name}' does not parse: {e}"),
            }
        }

        match self.resolve_remote(name).await {
            Ok(Some(resolved)) => Ok(resolved),
            Ok(None) => {
                info!("no remote result for '{name}'");
                Err(ResolveError::CompoundNotFound(name.to_string()))
            }
            Err(e) => {
                match &e {
                    LookupError::Timeout => warn!("remote lookup timed out for '{name}'"),
                    LookupError::Status(code) => warn!("remote lookup returned status {code} for '{name}'"),
                    LookupError::Malformed(detail) => warn!("malformed remote payload for '{name}': {detail}"),
                    LookupError::Transport(detail) => warn!("remote transport failure for '{name}': {detail}"),
                }
                Err(ResolveError::CompoundNotFound(name.to_string()))
            }
        }
    }

    async fn resolve_remote(&self, name: &str) -> Result<Option<ResolvedCompound<O::Mol>>, LookupError> {
        let Some(cid) = self.lookup.cid_for_name(name).await? else {
            return Ok(None);
        };
        debug!("'{name}' resolved to compound id {cid}");

        let properties = self.lookup.properties_for_cid(cid).await?;
        let mut official_name = properties.as_ref().and_then(|p| p.official_name.clone());
        let mut notation = properties
            .as_ref()
            .and_then(|p| p.isomeric_notation.clone().or_else(|| p.canonical_notation.clone()));

        if notation.is_none() {
            debug!("no notation in property payload for cid {cid}, trying plain-text fetch");
            notation = self.lookup.plain_notation_for_cid(cid).await?;
            official_name = None;
        }

        let Some(notation) = notation else {
            return Ok(None);
        };

        match self.oracle.parse(&notation) {
            Ok(mol) => {
                info!("remote resolution succeeded for '{name}' (cid {cid})");
                Ok(Some(ResolvedCompound {
                    mol,
                    official_name: official_name.unwrap_or_else(|| name.to_string()),
                    display_name: title_case(name),
                    notation,
                }))
            }
            Err(e) => {
                warn!("remote notation for '{name}' does not parse: {e}");
                Ok(None)
            }
        }
    }
}

/// Equivalente a `str.title()`: inicial mayúscula tras cada no-letra.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
