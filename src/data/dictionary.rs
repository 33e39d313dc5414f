//! Diccionario local de compuestos conocidos.
//!
//! Tabla de sólo lectura construida una vez en el arranque e inyectada por
//! referencia en el resolvedor de nombres. Un acierto aquí evita por
//! completo la consulta remota.

use std::collections::HashMap;

/// Entrada del diccionario: notación almacenada, nombre oficial (IUPAC) y
/// nombre de presentación.
#[derive(Debug, Clone, Copy)]
pub struct DictionaryEntry {
    pub notation: &'static str,
    pub official_name: &'static str,
    pub display_name: &'static str,
}

/// Diccionario inmutable de compuestos comunes, indexado por nombre común
/// en minúsculas.
#[derive(Debug)]
pub struct CompoundDictionary {
    entries: HashMap<&'static str, DictionaryEntry>,
}

macro_rules! entry {
    ($map:ident, $key:literal, $notation:literal, $official:literal, $display:literal) => {
        $map.insert(
            $key,
            DictionaryEntry { notation: $notation, official_name: $official, display_name: $display },
        );
    };
}

impl CompoundDictionary {
    /// Tabla integrada de ~45 compuestos bien conocidos.
    pub fn builtin() -> Self {
        let mut m = HashMap::new();
        entry!(m, "aspirin", "CC(=O)OC1=CC=CC=C1C(=O)O", "2-acetoxybenzoic acid", "Aspirin");
        entry!(m, "caffeine", "CN1C=NC2=C1C(=O)N(C(=O)N2C)C", "1,3,7-trimethylpurine-2,6-dione", "Caffeine");
        entry!(m, "ethanol", "CCO", "ethanol", "Ethanol");
        entry!(m, "methanol", "CO", "methanol", "Methanol");
        entry!(m, "glucose", "OC[C@H]1OC(O)[C@H](O)[C@@H](O)[C@@H]1O", "D-glucose", "Glucose");
        entry!(m, "benzene", "c1ccccc1", "benzene", "Benzene");
        entry!(m, "acetone", "CC(=O)C", "propan-2-one", "Acetone");
        entry!(m, "acetic acid", "CC(=O)O", "acetic acid", "Acetic Acid");
        entry!(m, "acetaminophen", "CC(=O)NC1=CC=C(O)C=C1", "N-(4-hydroxyphenyl)acetamide", "Acetaminophen");
        entry!(m, "paracetamol", "CC(=O)NC1=CC=C(O)C=C1", "N-(4-hydroxyphenyl)acetamide", "Paracetamol");
        entry!(m, "ibuprofen", "CC(C)CC1=CC=C(C=C1)C(C)C(=O)O", "2-(4-isobutylphenyl)propanoic acid", "Ibuprofen");
        entry!(m, "nicotine", "CN1CCC[C@H]1C2=CN=CC=C2", "3-(1-methylpyrrolidin-2-yl)pyridine", "Nicotine");
        entry!(
            m,
            "morphine",
            "CN1CC[C@]23[C@H]4OC5=C(O)C=CC(=C25)[C@H](O)[C@@H]1[C@@H]3C=C4",
            "morphine",
            "Morphine"
        );
        entry!(
            m,
            "cholesterol",
            "CC(C)CCC[C@@H](C)[C@H]1CC[C@@H]2[C@@]1(CC[C@H]3[C@H]2CC=C4[C@@]3(CC[C@@H](C4)O)C)C",
            "cholesterol",
            "Cholesterol"
        );
        entry!(m, "toluene", "CC1=CC=CC=C1", "methylbenzene", "Toluene");
        entry!(m, "phenol", "OC1=CC=CC=C1", "phenol", "Phenol");
        entry!(m, "aniline", "NC1=CC=CC=C1", "aniline", "Aniline");
        entry!(m, "formaldehyde", "C=O", "methanal", "Formaldehyde");
        entry!(m, "benzaldehyde", "O=CC1=CC=CC=C1", "benzaldehyde", "Benzaldehyde");
        entry!(m, "naphthalene", "C1=CC2=CC=CC=C2C=C1", "naphthalene", "Naphthalene");
        entry!(m, "cyclohexane", "C1CCCCC1", "cyclohexane", "Cyclohexane");
        entry!(m, "propane", "CCC", "propane", "Propane");
        entry!(m, "butane", "CCCC", "butane", "Butane");
        entry!(m, "pentane", "CCCCC", "pentane", "Pentane");
        entry!(m, "hexane", "CCCCCC", "hexane", "Hexane");
        entry!(m, "ethene", "C=C", "ethene", "Ethylene");
        entry!(m, "ethylene", "C=C", "ethene", "Ethylene");
        entry!(m, "propene", "CC=C", "propene", "Propylene");
        entry!(m, "ethyne", "C#C", "ethyne", "Acetylene");
        entry!(m, "acetylene", "C#C", "ethyne", "Acetylene");
        entry!(m, "water", "O", "water", "Water");
        entry!(m, "ammonia", "N", "ammonia", "Ammonia");
        entry!(m, "urea", "NC(=O)N", "urea", "Urea");
        entry!(m, "glycine", "NCC(=O)O", "glycine", "Glycine");
        entry!(m, "alanine", "CC(N)C(=O)O", "alanine", "Alanine");
        entry!(
            m,
            "sucrose",
            "OC[C@H]1O[C@@](CO)(O[C@H]2O[C@H](CO)[C@@H](O)[C@H](O)[C@H]2O)[C@@H](O)[C@@H]1O",
            "sucrose",
            "Sucrose"
        );
        entry!(m, "fructose", "OC[C@H]1OC(O)(CO)[C@@H](O)[C@@H]1O", "D-fructose", "Fructose");
        entry!(
            m,
            "citric acid",
            "OC(=O)CC(O)(CC(=O)O)C(=O)O",
            "2-hydroxypropane-1,2,3-tricarboxylic acid",
            "Citric Acid"
        );
        entry!(m, "lactic acid", "CC(O)C(=O)O", "2-hydroxypropanoic acid", "Lactic Acid");
        entry!(m, "salicylic acid", "OC(=O)C1=CC=CC=C1O", "2-hydroxybenzoic acid", "Salicylic Acid");
        entry!(m, "theobromine", "CN1C=NC2=C1C(=O)NC(=O)N2C", "3,7-dimethylpurine-2,6-dione", "Theobromine");
        entry!(m, "theophylline", "CN1C(=O)N(C)C2=C1N=CN2", "1,3-dimethyl-7H-purine-2,6-dione", "Theophylline");
        entry!(m, "dopamine", "NCCC1=CC(O)=C(O)C=C1", "4-(2-aminoethyl)benzene-1,2-diol", "Dopamine");
        entry!(m, "serotonin", "NCCC1=CNC2=CC=C(O)C=C12", "3-(2-aminoethyl)-1H-indol-5-ol", "Serotonin");
        entry!(
            m,
            "adrenaline",
            "CNC[C@H](O)C1=CC(O)=C(O)C=C1",
            "4-(1-hydroxy-2-(methylamino)ethyl)benzene-1,2-diol",
            "Adrenaline"
        );
        entry!(
            m,
            "epinephrine",
            "CNC[C@H](O)C1=CC(O)=C(O)C=C1",
            "4-(1-hydroxy-2-(methylamino)ethyl)benzene-1,2-diol",
            "Epinephrine"
        );
        CompoundDictionary { entries: m }
    }

    /// Búsqueda por nombre, insensible a mayúsculas y espacios exteriores.
    pub fn lookup(&self, name: &str) -> Option<&DictionaryEntry> {
        let normalized = name.trim().to_lowercase();
        self.entries.get(normalized.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dict = CompoundDictionary::builtin();
        let entry = dict.lookup("  Aspirin ").expect("aspirin present");
        assert_eq!(entry.notation, "CC(=O)OC1=CC=CC=C1C(=O)O");
        assert_eq!(entry.display_name, "Aspirin");
    }

    #[test]
    fn test_lookup_miss() {
        let dict = CompoundDictionary::builtin();
        assert!(dict.lookup("unobtainium").is_none());
    }

    #[test]
    fn test_aliases_share_structure() {
        let dict = CompoundDictionary::builtin();
        let a = dict.lookup("acetaminophen").expect("present");
        let b = dict.lookup("paracetamol").expect("present");
        assert_eq!(a.notation, b.notation);
        assert_eq!(a.official_name, b.official_name);
        assert_ne!(a.display_name, b.display_name);
    }

    #[test]
    fn test_builtin_size() {
        let dict = CompoundDictionary::builtin();
        assert!(dict.len() >= 45, "expected at least 45 entries, got {}", dict.len());
    }
}
