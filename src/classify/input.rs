//! Heurística léxica para adivinar la clase de una entrada textual.
//!
//! Puramente consultiva: el pipeline obedece la clase declarada por el
//! caller; esta clasificación sólo sirve para interfaces que no declaran
//! clase. Sin E/S salvo el intento de parseo final, sin camino de fallo.

use chem_oracle::MoleculeOracle;

use crate::data::types::InputKind;

/// Marcadores léxicos de nomenclatura IUPAC / nombres comunes. La presencia
/// de cualquiera clasifica la entrada como nombre de inmediato.
const NAME_MARKERS: &[&str] = &[
    "-yl", "-ol", "-al", "-one", "-ane", "-ene", "-yne", "-oic", "-ate", "-amine", "-amide", "-oxide", "-ide",
    "methyl", "ethyl", "propyl", "butyl", "pentyl", "hexyl", "heptyl", "octyl", "nonyl", "decyl", "phenyl",
    "benzyl", "cyclo", "iso", "neo", "tert-", "sec-", "n-", "hydroxy", "oxo", "amino", "nitro", "chloro",
    "bromo", "fluoro", "acid", "ester", "ether", "-oxy", "thio", "sulfo", "phospho", "di", "tri", "tetra",
    "penta", "hexa", "hepta", "octa", "nona", "deca", "1,", "2,", "3,", "4,", "5,", "6,", "7,", "8,", "9,",
    "1-", "2-", "3-", "4-", "5-", "6-", "7-", "8-", "9-",
];

/// Símbolos propios de la notación estructural.
const NOTATION_SYMBOLS: &str = "=@#[]()+-/\\%";

/// Alfabeto extendido de la notación: subconjunto de elementos/aromáticos,
/// dígitos y puntuación de notación.
const NOTATION_ALPHABET: &str = "CNOPSFIBrcnopsfibl0123456789=@#[]()+-/\\%.";

/// Umbral de fracción de símbolos por encima del cual la entrada se asume
/// notación.
const SYMBOL_FRACTION_THRESHOLD: f64 = 0.10;

/// Longitud máxima para intentar un parseo real como último recurso.
const MAX_PARSE_PROBE_LEN: usize = 50;

/// Adivina si `text` es notación estructural o un nombre.
pub fn classify_input<O: MoleculeOracle>(text: &str, oracle: &O) -> InputKind {
    let text = text.trim();
    let lowered = text.to_lowercase();

    for marker in NAME_MARKERS {
        if lowered.contains(marker) {
            return InputKind::Name;
        }
    }

    if !text.is_empty() {
        let symbol_count = text.chars().filter(|c| NOTATION_SYMBOLS.contains(*c)).count();
        if symbol_count as f64 / text.chars().count() as f64 > SYMBOL_FRACTION_THRESHOLD {
            return InputKind::Notation;
        }
    }

    if text.chars().all(|c| NOTATION_ALPHABET.contains(c))
        && text.chars().count() < MAX_PARSE_PROBE_LEN
        && oracle.parse(text).is_ok()
    {
        return InputKind::Notation;
    }

    InputKind::Name
}
