//! Vocabulario cerrado de grupos funcionales y sus tablas de configuración.
//!
//! Dos tablas de sólo lectura gobiernan la clasificación:
//! - la tabla de patrones (grupo → SMARTS) que se ejecuta completa en la
//!   fase de detección, y
//! - la lista de prioridad (específico → genérico) que ordena la salida y
//!   suprime etiquetas redundantes mediante conjuntos de sombra literales.
//!
//! La supresión la gobierna la lista de prioridad, no la estructura de los
//! patrones: los conjuntos de sombra son datos curados a mano.

/// Categorías de subestructura reconocidas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionalGroup {
    AminePrimary,
    AmineSecondary,
    AmineTertiary,
    NMethyl,
    Amide,
    Lactam,
    Urea,
    Imide,
    Imine,
    Nitrile,
    Nitro,
    Alcohol,
    Phenol,
    Aldehyde,
    Ketone,
    CarboxylicAcid,
    Ester,
    Ether,
    Carbonyl,
    AromaticRing,
    BenzeneRing,
    Purine,
    Imidazole,
    HeterocyclicN,
    HeterocyclicO,
    HeterocyclicS,
    Alkene,
    Alkyne,
    Fluoride,
    Chloride,
    Bromide,
    Iodide,
    Thiol,
    Sulfide,
    Sulfoxide,
    Sulfone,
    Phosphate,
    MethylGroup,
    Alkane,
}

impl FunctionalGroup {
    /// Etiqueta de presentación, tal como viaja en el registro final.
    pub fn label(&self) -> &'static str {
        match self {
            FunctionalGroup::AminePrimary => "Amine (Primary)",
            FunctionalGroup::AmineSecondary => "Amine (Secondary)",
            FunctionalGroup::AmineTertiary => "Amine (Tertiary)",
            FunctionalGroup::NMethyl => "N-Methyl",
            FunctionalGroup::Amide => "Amide",
            FunctionalGroup::Lactam => "Lactam (Cyclic Amide)",
            FunctionalGroup::Urea => "Urea/Urea-like",
            FunctionalGroup::Imide => "Imide",
            FunctionalGroup::Imine => "Imine",
            FunctionalGroup::Nitrile => "Nitrile",
            FunctionalGroup::Nitro => "Nitro",
            FunctionalGroup::Alcohol => "Alcohol",
            FunctionalGroup::Phenol => "Phenol",
            FunctionalGroup::Aldehyde => "Aldehyde",
            FunctionalGroup::Ketone => "Ketone",
            FunctionalGroup::CarboxylicAcid => "Carboxylic Acid",
            FunctionalGroup::Ester => "Ester",
            FunctionalGroup::Ether => "Ether",
            FunctionalGroup::Carbonyl => "Carbonyl (C=O)",
            FunctionalGroup::AromaticRing => "Aromatic Ring",
            FunctionalGroup::BenzeneRing => "Benzene Ring",
            FunctionalGroup::Purine => "Purine",
            FunctionalGroup::Imidazole => "Imidazole",
            FunctionalGroup::HeterocyclicN => "Heterocyclic (N)",
            FunctionalGroup::HeterocyclicO => "Heterocyclic (O)",
            FunctionalGroup::HeterocyclicS => "Heterocyclic (S)",
            FunctionalGroup::Alkene => "Alkene",
            FunctionalGroup::Alkyne => "Alkyne",
            FunctionalGroup::Fluoride => "Fluoride",
            FunctionalGroup::Chloride => "Chloride",
            FunctionalGroup::Bromide => "Bromide",
            FunctionalGroup::Iodide => "Iodide",
            FunctionalGroup::Thiol => "Thiol",
            FunctionalGroup::Sulfide => "Sulfide",
            FunctionalGroup::Sulfoxide => "Sulfoxide",
            FunctionalGroup::Sulfone => "Sulfone",
            FunctionalGroup::Phosphate => "Phosphate",
            FunctionalGroup::MethylGroup => "Methyl Group",
            FunctionalGroup::Alkane => "Alkane",
        }
    }
}

/// Entrada de la lista de prioridad: un grupo y las etiquetas menos
/// específicas que su presencia suprime.
#[derive(Debug, Clone, Copy)]
pub struct PriorityEntry {
    pub group: FunctionalGroup,
    pub shadows: &'static [FunctionalGroup],
}

use self::FunctionalGroup as G;

/// Batería de detección: cada par (grupo, SMARTS) se evalúa contra el grafo.
const PATTERNS: &[(FunctionalGroup, &str)] = &[
    // Nitrogenados (de específico a general)
    (G::AminePrimary, "[NX3H2;!$(NC=O)]"),
    (G::AmineSecondary, "[NX3H1;!$(NC=O)]([#6])[#6]"),
    (G::AmineTertiary, "[NX3;H0;!$(NC=O);!$([nR])]([#6])([#6])[#6]"),
    (G::NMethyl, "[#7][CH3]"),
    (G::Amide, "[#7][#6](=[OX1])"),
    (G::Lactam, "[#7;R][#6;R](=[OX1])"),
    (G::Urea, "[NX3][CX3](=[OX1])[NX3]"),
    (G::Imide, "[CX3](=[OX1])[NX3][CX3](=[OX1])"),
    (G::Imine, "[#6]=[NX2]"),
    (G::Nitrile, "[NX1]#[CX2]"),
    (G::Nitro, "[$([NX3](=O)=O),$([NX3+](=O)[O-])]"),
    // Oxigenados
    (G::Alcohol, "[OX2H][CX4]"),
    (G::Phenol, "[OX2H]c"),
    (G::Aldehyde, "[CX3H1](=O)"),
    (G::Ketone, "[#6][CX3](=O)[#6;!$([OX2])]"),
    (G::CarboxylicAcid, "[CX3](=O)[OX2H1]"),
    (G::Ester, "[#6][CX3](=O)[OX2][#6]"),
    (G::Ether, "[OD2]([#6])[#6]"),
    (G::Carbonyl, "[#6](=[OX1])"),
    // Aromáticos
    (G::AromaticRing, "[a]"),
    (G::BenzeneRing, "c1ccccc1"),
    (G::Purine, "[#7]1[#6][#7][#6]2[#6]1[#7][#6][#7]2"),
    (G::Imidazole, "[nR1]1[cR1][nR1][cR1][cR1]1"),
    (G::HeterocyclicN, "[nR]"),
    (G::HeterocyclicO, "[oR]"),
    (G::HeterocyclicS, "[sR]"),
    // Insaturados
    (G::Alkene, "[CX3]=[CX3]"),
    (G::Alkyne, "[CX2]#[CX2]"),
    // Haluros
    (G::Fluoride, "[#6][F]"),
    (G::Chloride, "[#6][Cl]"),
    (G::Bromide, "[#6][Br]"),
    (G::Iodide, "[#6][I]"),
    // Azufrados
    (G::Thiol, "[#6][SX2H]"),
    (G::Sulfide, "[#6][SX2][#6]"),
    (G::Sulfoxide, "[#6][SX3](=O)[#6]"),
    (G::Sulfone, "[#6][SX4](=O)(=O)[#6]"),
    // Fósforo
    (G::Phosphate, "[PX4](=O)([OX2])([OX2])[OX2]"),
    // Marcadores saturados (sólo se emiten como fallback)
    (G::MethylGroup, "[CH3]"),
    (G::Alkane, "[CX4H3,CX4H2,CX4H1,CX4H0]"),
];

/// Lista de prioridad, del grupo más específico al más genérico. El orden
/// de esta lista es el orden de la salida.
const PRIORITY: &[PriorityEntry] = &[
    // Nitrogenados
    PriorityEntry { group: G::Urea, shadows: &[G::Amide, G::Carbonyl] },
    PriorityEntry { group: G::Lactam, shadows: &[G::Amide, G::Carbonyl] },
    PriorityEntry { group: G::Imide, shadows: &[G::Amide, G::Carbonyl] },
    PriorityEntry { group: G::Amide, shadows: &[G::Carbonyl] },
    PriorityEntry { group: G::Imine, shadows: &[] },
    PriorityEntry { group: G::Nitrile, shadows: &[] },
    PriorityEntry { group: G::Nitro, shadows: &[] },
    PriorityEntry { group: G::NMethyl, shadows: &[] },
    PriorityEntry { group: G::AmineTertiary, shadows: &[] },
    PriorityEntry { group: G::AmineSecondary, shadows: &[] },
    PriorityEntry { group: G::AminePrimary, shadows: &[] },
    // Oxigenados
    PriorityEntry { group: G::CarboxylicAcid, shadows: &[G::Carbonyl] },
    PriorityEntry { group: G::Ester, shadows: &[G::Carbonyl, G::Ether] },
    PriorityEntry { group: G::Aldehyde, shadows: &[G::Carbonyl] },
    PriorityEntry { group: G::Ketone, shadows: &[G::Carbonyl] },
    PriorityEntry { group: G::Carbonyl, shadows: &[] },
    PriorityEntry { group: G::Phenol, shadows: &[] },
    PriorityEntry { group: G::Alcohol, shadows: &[] },
    PriorityEntry { group: G::Ether, shadows: &[] },
    // Aromáticos
    PriorityEntry { group: G::BenzeneRing, shadows: &[G::AromaticRing] },
    PriorityEntry { group: G::Purine, shadows: &[G::Imidazole, G::HeterocyclicN, G::AromaticRing] },
    PriorityEntry { group: G::Imidazole, shadows: &[G::HeterocyclicN, G::AromaticRing] },
    PriorityEntry { group: G::HeterocyclicN, shadows: &[G::AromaticRing] },
    PriorityEntry { group: G::HeterocyclicO, shadows: &[G::AromaticRing] },
    PriorityEntry { group: G::HeterocyclicS, shadows: &[G::AromaticRing] },
    PriorityEntry { group: G::AromaticRing, shadows: &[] },
    // Insaturados
    PriorityEntry { group: G::Alkyne, shadows: &[] },
    PriorityEntry { group: G::Alkene, shadows: &[] },
    // Haluros
    PriorityEntry { group: G::Fluoride, shadows: &[] },
    PriorityEntry { group: G::Chloride, shadows: &[] },
    PriorityEntry { group: G::Bromide, shadows: &[] },
    PriorityEntry { group: G::Iodide, shadows: &[] },
    // Azufrados
    PriorityEntry { group: G::Sulfone, shadows: &[] },
    PriorityEntry { group: G::Sulfoxide, shadows: &[] },
    PriorityEntry { group: G::Sulfide, shadows: &[] },
    PriorityEntry { group: G::Thiol, shadows: &[] },
    // Otros
    PriorityEntry { group: G::Phosphate, shadows: &[] },
];

/// Marcadores de hidrocarburo saturado: sólo se emite el primero presente,
/// y únicamente cuando la pasada de prioridad no produjo nada.
const SATURATED_FALLBACK: &[FunctionalGroup] = &[G::MethylGroup, G::Alkane];

/// Tablas de configuración del clasificador, construidas una vez e
/// inyectadas por referencia.
#[derive(Debug)]
pub struct GroupPatternTable {
    patterns: &'static [(FunctionalGroup, &'static str)],
    priority: &'static [PriorityEntry],
    fallback: &'static [FunctionalGroup],
}

impl GroupPatternTable {
    pub fn builtin() -> Self {
        GroupPatternTable { patterns: PATTERNS, priority: PRIORITY, fallback: SATURATED_FALLBACK }
    }

    pub fn patterns(&self) -> &[(FunctionalGroup, &'static str)] {
        self.patterns
    }

    pub fn priority(&self) -> &[PriorityEntry] {
        self.priority
    }

    pub fn fallback(&self) -> &[FunctionalGroup] {
        self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_priority_group_has_a_pattern() {
        let with_pattern: HashSet<_> = PATTERNS.iter().map(|(g, _)| *g).collect();
        for entry in PRIORITY {
            assert!(with_pattern.contains(&entry.group), "{:?} lacks a detection pattern", entry.group);
        }
        for g in SATURATED_FALLBACK {
            assert!(with_pattern.contains(g), "{g:?} lacks a detection pattern");
        }
    }

    #[test]
    fn test_no_duplicate_priority_entries() {
        let mut seen = HashSet::new();
        for entry in PRIORITY {
            assert!(seen.insert(entry.group), "{:?} listed twice", entry.group);
        }
    }

    #[test]
    fn test_shadows_point_to_later_entries() {
        // Una sombra sólo tiene efecto sobre entradas aún no emitidas: todo
        // grupo sombreado debe aparecer después del que lo sombrea.
        let position: std::collections::HashMap<_, _> =
            PRIORITY.iter().enumerate().map(|(i, e)| (e.group, i)).collect();
        for (i, entry) in PRIORITY.iter().enumerate() {
            for shadowed in entry.shadows {
                if let Some(&j) = position.get(shadowed) {
                    assert!(j > i, "{:?} shadows {:?} but walks after it", entry.group, shadowed);
                }
            }
        }
    }

    #[test]
    fn test_specific_before_generic() {
        let position: std::collections::HashMap<_, _> =
            PRIORITY.iter().enumerate().map(|(i, e)| (e.group, i)).collect();
        assert!(position[&G::Lactam] < position[&G::Amide]);
        assert!(position[&G::CarboxylicAcid] < position[&G::Carbonyl]);
        assert!(position[&G::AmineTertiary] < position[&G::AminePrimary]);
        assert!(position[&G::BenzeneRing] < position[&G::AromaticRing]);
    }

    #[test]
    fn test_pattern_battery_size() {
        assert!(PATTERNS.len() >= 38, "battery unexpectedly small: {}", PATTERNS.len());
    }
}
