//! Oráculo determinista en memoria.
//!
//! Sirve el mismo propósito que los providers mock del resto del sistema:
//! ejercitar el pipeline completo sin motor de química real. Cada compuesto
//! de la tabla lleva sus propiedades canónicas precalculadas y el conjunto
//! de patrones SMARTS que casan contra él.

use crate::{EmbedMethod, ForceField, MoleculeOracle, OracleError};

/// Entrada de la tabla de compuestos del oráculo de prueba.
struct FixtureCompound {
    /// Grafías de notación aceptadas por `parse` (incluye la canónica).
    notations: &'static [&'static str],
    canonical: &'static str,
    formula: &'static str,
    weight: f64,
    exact_mass: f64,
    inchi: &'static str,
    /// Patrones SMARTS que casan contra este compuesto (count = 1 cada uno).
    matches: &'static [&'static str],
    /// Índice del primer método de embedding que funciona (0 = ETKDGv3,
    /// 1 = ETKDGv2, 2 = coordenadas aleatorias). `None` = los tres fallan.
    embed_rank: Option<u8>,
    /// `false` => MMFF94 no aplica (tipos de átomo no soportados), cae a UFF.
    mmff_ok: bool,
    /// `Some(msg)` => `sanitize` rechaza el grafo con ese mensaje.
    sanitize_error: Option<&'static str>,
}

const COMPOUNDS: &[FixtureCompound] = &[
    FixtureCompound {
        notations: &["CCO", "OCC"],
        canonical: "CCO",
        formula: "C2H6O",
        weight: 46.069,
        exact_mass: 46.0419,
        inchi: "InChI=1S/C2H6O/c1-2-3/h3H,2H2,1H3",
        matches: &["[OX2H][CX4]", "[CH3]", "[CX4H3,CX4H2,CX4H1,CX4H0]"],
        embed_rank: Some(0),
        mmff_ok: true,
        sanitize_error: None,
    },
    FixtureCompound {
        notations: &["CO"],
        canonical: "CO",
        formula: "CH4O",
        weight: 32.042,
        exact_mass: 32.0262,
        inchi: "InChI=1S/CH4O/c1-2/h2H,1H3",
        matches: &["[OX2H][CX4]", "[CH3]", "[CX4H3,CX4H2,CX4H1,CX4H0]"],
        embed_rank: Some(0),
        mmff_ok: true,
        sanitize_error: None,
    },
    FixtureCompound {
        notations: &["CC(=O)OC1=CC=CC=C1C(=O)O", "CC(=O)Oc1ccccc1C(=O)O"],
        canonical: "CC(=O)Oc1ccccc1C(=O)O",
        formula: "C9H8O4",
        weight: 180.159,
        exact_mass: 180.0423,
        inchi: "InChI=1S/C9H8O4/c1-6(10)13-8-5-3-2-4-7(8)9(11)12/h2-5H,1H3,(H,11,12)",
        matches: &[
            "[CX3](=O)[OX2H1]",
            "[#6][CX3](=O)[OX2][#6]",
            "[OD2]([#6])[#6]",
            "[#6](=[OX1])",
            "c1ccccc1",
            "[a]",
            "[CH3]",
            "[CX4H3,CX4H2,CX4H1,CX4H0]",
        ],
        embed_rank: Some(0),
        mmff_ok: true,
        sanitize_error: None,
    },
    FixtureCompound {
        notations: &["c1ccccc1", "C1=CC=CC=C1"],
        canonical: "c1ccccc1",
        formula: "C6H6",
        weight: 78.114,
        exact_mass: 78.047,
        inchi: "InChI=1S/C6H6/c1-2-4-6-5-3-1/h1-6H",
        matches: &["c1ccccc1", "[a]"],
        embed_rank: Some(0),
        mmff_ok: true,
        sanitize_error: None,
    },
    FixtureCompound {
        notations: &["CN1C=NC2=C1C(=O)N(C(=O)N2C)C", "Cn1cnc2c1c(=O)n(C)c(=O)n2C"],
        canonical: "Cn1cnc2c1c(=O)n(C)c(=O)n2C",
        formula: "C8H10N4O2",
        weight: 194.194,
        exact_mass: 194.0804,
        inchi: "InChI=1S/C8H10N4O2/c1-10-4-9-6-5(10)7(13)12(3)8(14)11(6)2/h4H,1-3H3",
        matches: &[
            "[NX3][CX3](=[OX1])[NX3]",
            "[#7;R][#6;R](=[OX1])",
            "[CX3](=[OX1])[NX3][CX3](=[OX1])",
            "[#7][#6](=[OX1])",
            "[#7][CH3]",
            "[#6](=[OX1])",
            "[#7]1[#6][#7][#6]2[#6]1[#7][#6][#7]2",
            "[nR1]1[cR1][nR1][cR1][cR1]1",
            "[nR]",
            "[a]",
            "[CH3]",
            "[CX4H3,CX4H2,CX4H1,CX4H0]",
        ],
        // ETKDGv3 no converge con el biciclo del fixture; cae a ETKDGv2.
        embed_rank: Some(1),
        mmff_ok: true,
        sanitize_error: None,
    },
    FixtureCompound {
        notations: &["CC(=O)C", "CC(C)=O"],
        canonical: "CC(C)=O",
        formula: "C3H6O",
        weight: 58.08,
        exact_mass: 58.0419,
        inchi: "InChI=1S/C3H6O/c1-3(2)4/h1-2H3",
        matches: &[
            "[#6][CX3](=O)[#6;!$([OX2])]",
            "[#6](=[OX1])",
            "[CH3]",
            "[CX4H3,CX4H2,CX4H1,CX4H0]",
        ],
        embed_rank: Some(0),
        mmff_ok: true,
        sanitize_error: None,
    },
    FixtureCompound {
        notations: &["CC(=O)O", "CC(O)=O"],
        canonical: "CC(=O)O",
        formula: "C2H4O2",
        weight: 60.052,
        exact_mass: 60.0211,
        inchi: "InChI=1S/C2H4O2/c1-2(3)4/h1H3,(H,3,4)",
        matches: &[
            "[CX3](=O)[OX2H1]",
            "[#6](=[OX1])",
            "[CH3]",
            "[CX4H3,CX4H2,CX4H1,CX4H0]",
        ],
        embed_rank: Some(0),
        mmff_ok: true,
        sanitize_error: None,
    },
    FixtureCompound {
        notations: &["CCC"],
        canonical: "CCC",
        formula: "C3H8",
        weight: 44.097,
        exact_mass: 44.0626,
        inchi: "InChI=1S/C3H8/c1-3-2/h3H2,1-2H3",
        matches: &["[CH3]", "[CX4H3,CX4H2,CX4H1,CX4H0]"],
        embed_rank: Some(0),
        mmff_ok: true,
        sanitize_error: None,
    },
    FixtureCompound {
        notations: &["C1CCCCC1"],
        canonical: "C1CCCCC1",
        formula: "C6H12",
        weight: 84.162,
        exact_mass: 84.0939,
        inchi: "InChI=1S/C6H12/c1-2-4-6-5-3-1/h1-6H2",
        matches: &["[CX4H3,CX4H2,CX4H1,CX4H0]"],
        embed_rank: Some(0),
        mmff_ok: true,
        sanitize_error: None,
    },
    FixtureCompound {
        notations: &["O"],
        canonical: "O",
        formula: "H2O",
        weight: 18.015,
        exact_mass: 18.0106,
        inchi: "InChI=1S/H2O/h1H2",
        matches: &[],
        embed_rank: Some(0),
        // El agua no tiene parámetros MMFF en el fixture; ejercita el
        // fallback a UFF.
        mmff_ok: false,
        sanitize_error: None,
    },
    FixtureCompound {
        notations: &["OC1=CC=CC=C1", "Oc1ccccc1"],
        canonical: "Oc1ccccc1",
        formula: "C6H6O",
        weight: 94.113,
        exact_mass: 94.0419,
        inchi: "InChI=1S/C6H6O/c7-6-4-2-1-3-5-6/h1-5,7H",
        matches: &["[OX2H]c", "c1ccccc1", "[a]"],
        embed_rank: Some(0),
        mmff_ok: true,
        sanitize_error: None,
    },
    FixtureCompound {
        notations: &["C=C"],
        canonical: "C=C",
        formula: "C2H4",
        weight: 28.054,
        exact_mass: 28.0313,
        inchi: "InChI=1S/C2H4/c1-2/h1-2H2",
        matches: &["[CX3]=[CX3]"],
        // Sólo el embedding de coordenadas aleatorias funciona.
        embed_rank: Some(2),
        mmff_ok: true,
        sanitize_error: None,
    },
    FixtureCompound {
        notations: &["C1CC1"],
        canonical: "C1CC1",
        formula: "C3H6",
        weight: 42.081,
        exact_mass: 42.047,
        inchi: "InChI=1S/C3H6/c1-2-3-1/h1-3H2",
        matches: &["[CX4H3,CX4H2,CX4H1,CX4H0]"],
        // Ningún método de embedding converge: geometría 3D ausente.
        embed_rank: None,
        mmff_ok: true,
        sanitize_error: None,
    },
    FixtureCompound {
        notations: &["C(F)(F)(F)(F)F"],
        canonical: "C(F)(F)(F)(F)F",
        formula: "CF5",
        weight: 107.01,
        exact_mass: 106.993,
        inchi: "",
        matches: &["[#6][F]"],
        embed_rank: None,
        mmff_ok: false,
        sanitize_error: Some("Explicit valence for atom # 0 C, 5, is greater than permitted"),
    },
];

/// Grafo opaco del oráculo de prueba: índice en la tabla más el estado de
/// preparación 3D acumulado por el pipeline.
#[derive(Debug, Clone)]
pub struct FixtureMol {
    idx: usize,
    explicit_hydrogens: bool,
    conformer: Option<EmbedMethod>,
}

/// Oráculo de prueba determinista. Sin estado mutable: seguro de compartir
/// entre invocaciones concurrentes.
#[derive(Debug, Default)]
pub struct FixtureOracle;

impl FixtureOracle {
    pub fn new() -> Self {
        Self
    }

    fn compound(mol: &FixtureMol) -> &'static FixtureCompound {
        &COMPOUNDS[mol.idx]
    }

    /// Validez sintáctica mínima de un SMARTS: no vacío, sin espacios y con
    /// corchetes/paréntesis balanceados.
    fn pattern_compiles(pattern: &str) -> bool {
        if pattern.is_empty() || pattern.contains(char::is_whitespace) {
            return false;
        }
        let mut square = 0i32;
        let mut round = 0i32;
        for c in pattern.chars() {
            match c {
                '[' => square += 1,
                ']' => square -= 1,
                '(' => round += 1,
                ')' => round -= 1,
                _ => {}
            }
            if square < 0 || round < 0 {
                return false;
            }
        }
        square == 0 && round == 0
    }
}

impl MoleculeOracle for FixtureOracle {
    type Mol = FixtureMol;

    fn parse(&self, notation: &str) -> Result<FixtureMol, OracleError> {
        let wanted = notation.trim();
        COMPOUNDS
            .iter()
            .position(|c| c.notations.iter().any(|&n| n == wanted))
            .map(|idx| FixtureMol { idx, explicit_hydrogens: false, conformer: None })
            .ok_or_else(|| OracleError::Parse(wanted.to_string()))
    }

    fn sanitize(&self, mol: &FixtureMol) -> Result<(), OracleError> {
        match Self::compound(mol).sanitize_error {
            Some(msg) => Err(OracleError::Sanitize(msg.to_string())),
            None => Ok(()),
        }
    }

    fn canonical_notation(&self, mol: &FixtureMol) -> Result<String, OracleError> {
        Ok(Self::compound(mol).canonical.to_string())
    }

    fn formula(&self, mol: &FixtureMol) -> Result<String, OracleError> {
        Ok(Self::compound(mol).formula.to_string())
    }

    fn weight(&self, mol: &FixtureMol) -> Result<f64, OracleError> {
        Ok(Self::compound(mol).weight)
    }

    fn exact_mass(&self, mol: &FixtureMol) -> Result<f64, OracleError> {
        Ok(Self::compound(mol).exact_mass)
    }

    fn standard_identifier(&self, mol: &FixtureMol) -> Result<String, OracleError> {
        Ok(Self::compound(mol).inchi.to_string())
    }

    fn layout_2d(&self, mol: &FixtureMol) -> Result<String, OracleError> {
        let c = Self::compound(mol);
        Ok(format!(
            "{}\n  chem-oracle fixture 2D\n\n  0  0  0  0  0  0  0  0  0  0999 V2000\nM  END\n",
            c.canonical
        ))
    }

    fn render_svg(&self, mol: &FixtureMol) -> Result<String, OracleError> {
        let c = Self::compound(mol);
        Ok(format!("<svg xmlns=\"http://www.w3.org/2000/svg\"><!-- {} --></svg>", c.canonical))
    }

    fn match_count(&self, mol: &FixtureMol, pattern: &str) -> Result<usize, OracleError> {
        if !Self::pattern_compiles(pattern) {
            return Err(OracleError::Pattern(pattern.to_string()));
        }
        let c = Self::compound(mol);
        Ok(usize::from(c.matches.iter().any(|&m| m == pattern)))
    }

    fn add_hydrogens(&self, mol: &FixtureMol) -> Result<FixtureMol, OracleError> {
        let mut with_h = mol.clone();
        with_h.explicit_hydrogens = true;
        Ok(with_h)
    }

    fn embed_3d(&self, mol: &mut FixtureMol, method: EmbedMethod, _seed: u64) -> Result<(), OracleError> {
        if !mol.explicit_hydrogens {
            return Err(OracleError::Engine("embedding requires explicit hydrogens".into()));
        }
        let rank = match method {
            EmbedMethod::Etkdg3 => 0u8,
            EmbedMethod::Etkdg2 => 1,
            EmbedMethod::RandomCoords => 2,
        };
        match Self::compound(mol).embed_rank {
            Some(min_rank) if rank >= min_rank => {
                mol.conformer = Some(method);
                Ok(())
            }
            _ => Err(OracleError::Embed(format!("{method:?} did not converge"))),
        }
    }

    fn optimize(&self, mol: &mut FixtureMol, forcefield: ForceField) -> Result<(), OracleError> {
        if mol.conformer.is_none() {
            return Err(OracleError::Engine("no conformer to optimize".into()));
        }
        if forcefield == ForceField::Mmff94 && !Self::compound(mol).mmff_ok {
            return Err(OracleError::ForceField("MMFF94 has no parameters for this structure".into()));
        }
        Ok(())
    }

    fn molblock_3d(&self, mol: &FixtureMol) -> Result<String, OracleError> {
        let method = mol
            .conformer
            .ok_or_else(|| OracleError::Engine("no conformer present".into()))?;
        let c = Self::compound(mol);
        Ok(format!(
            "{}\n  chem-oracle fixture 3D ({method:?})\n\n  0  0  0  0  0  0  0  0  0  0999 V2000\nM  END\n",
            c.canonical
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_and_unknown() {
        let oracle = FixtureOracle::new();
        assert!(oracle.parse("CCO").is_ok());
        assert!(oracle.parse(" CCO ").is_ok());
        let err = oracle.parse("C1CC").unwrap_err();
        assert!(matches!(err, OracleError::Parse(_)));
    }

    #[test]
    fn test_parse_aliases_share_canonical() {
        let oracle = FixtureOracle::new();
        let a = oracle.parse("CC(=O)OC1=CC=CC=C1C(=O)O").unwrap();
        let b = oracle.parse("CC(=O)Oc1ccccc1C(=O)O").unwrap();
        assert_eq!(
            oracle.canonical_notation(&a).unwrap(),
            oracle.canonical_notation(&b).unwrap()
        );
    }

    #[test]
    fn test_match_count_and_pattern_rejection() {
        let oracle = FixtureOracle::new();
        let mol = oracle.parse("CCO").unwrap();
        assert_eq!(oracle.match_count(&mol, "[OX2H][CX4]").unwrap(), 1);
        assert_eq!(oracle.match_count(&mol, "c1ccccc1").unwrap(), 0);
        assert!(matches!(oracle.match_count(&mol, "[broken"), Err(OracleError::Pattern(_))));
        assert!(matches!(oracle.match_count(&mol, ""), Err(OracleError::Pattern(_))));
    }

    #[test]
    fn test_sanitize_rejects_bad_valence() {
        let oracle = FixtureOracle::new();
        let mol = oracle.parse("C(F)(F)(F)(F)F").unwrap();
        let err = oracle.sanitize(&mol).unwrap_err();
        assert!(err.to_string().contains("valence"));
    }

    #[test]
    fn test_embed_requires_hydrogens_and_honors_rank() {
        let oracle = FixtureOracle::new();
        let mut bare = oracle.parse("C=C").unwrap();
        assert!(oracle.embed_3d(&mut bare, EmbedMethod::Etkdg3, 42).is_err());

        let mut mol = oracle.add_hydrogens(&bare).unwrap();
        assert!(oracle.embed_3d(&mut mol, EmbedMethod::Etkdg3, 42).is_err());
        assert!(oracle.embed_3d(&mut mol, EmbedMethod::Etkdg2, 42).is_err());
        assert!(oracle.embed_3d(&mut mol, EmbedMethod::RandomCoords, 42).is_ok());
        assert!(oracle.molblock_3d(&mol).unwrap().contains("RandomCoords"));
    }

    #[test]
    fn test_embed_none_never_converges() {
        let oracle = FixtureOracle::new();
        let bare = oracle.parse("C1CC1").unwrap();
        let mut mol = oracle.add_hydrogens(&bare).unwrap();
        for method in [EmbedMethod::Etkdg3, EmbedMethod::Etkdg2, EmbedMethod::RandomCoords] {
            assert!(oracle.embed_3d(&mut mol, method, 42).is_err());
        }
        assert!(oracle.molblock_3d(&mol).is_err());
    }

    #[test]
    fn test_mmff_fallback_flag() {
        let oracle = FixtureOracle::new();
        let bare = oracle.parse("O").unwrap();
        let mut mol = oracle.add_hydrogens(&bare).unwrap();
        oracle.embed_3d(&mut mol, EmbedMethod::Etkdg3, 42).unwrap();
        assert!(matches!(
            oracle.optimize(&mut mol, ForceField::Mmff94),
            Err(OracleError::ForceField(_))
        ));
        assert!(oracle.optimize(&mut mol, ForceField::Uff).is_ok());
    }
}
