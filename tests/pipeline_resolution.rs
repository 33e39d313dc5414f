//! Tests de integración del pipeline completo con dobles en ambas
//! fronteras: oráculo fixture y lookup mock con contador de llamadas.

use chem_oracle::FixtureOracle;
use chemresolve_rust::data::types::{InputKind, StructureRequest};
use chemresolve_rust::providers::lookup::{CompoundProperties, LookupError, MockLookup};
use chemresolve_rust::{explain, CompoundDictionary, GroupPatternTable, StructurePipeline};

struct Harness {
    oracle: FixtureOracle,
    lookup: MockLookup,
    dictionary: CompoundDictionary,
    groups: GroupPatternTable,
}

impl Harness {
    fn new(lookup: MockLookup) -> Self {
        Harness {
            oracle: FixtureOracle::new(),
            lookup,
            dictionary: CompoundDictionary::builtin(),
            groups: GroupPatternTable::builtin(),
        }
    }

    fn pipeline(&self) -> StructurePipeline<'_, FixtureOracle, MockLookup> {
        StructurePipeline::new(&self.oracle, &self.lookup, &self.dictionary, &self.groups)
    }
}

#[tokio::test]
async fn resolve_notation_populates_full_record() {
    let h = Harness::new(MockLookup::empty());
    let record = h.pipeline().resolve("CCO", InputKind::Notation).await;

    assert!(!record.is_failure(), "unexpected failure: {:?}", record.error);
    assert_eq!(record.molecular_formula, "C2H6O");
    assert_eq!(record.molecular_weight, 46.069);
    assert_eq!(record.exact_mass, 46.0419);
    assert_eq!(record.smiles, "CCO");
    assert_eq!(record.functional_groups, vec!["Alcohol".to_string()]);
    assert!(!record.mol_block_2d.is_empty());
    assert!(record.svg_2d.is_some());
    assert!(record.mol_block_3d.is_some());
    // Sin búsqueda inversa disponible, el nombre oficial es el sustituto.
    assert_eq!(record.iupac_name, "Name not available");
}

#[tokio::test]
async fn resolve_notation_round_trips_canonically() {
    let h = Harness::new(MockLookup::empty());
    let first = h.pipeline().resolve("CC(=O)OC1=CC=CC=C1C(=O)O", InputKind::Notation).await;
    assert!(!first.is_failure());

    // La notación canónica re-resuelta es punto fijo.
    let second = h.pipeline().resolve(&first.smiles, InputKind::Notation).await;
    assert_eq!(second.smiles, first.smiles);
    assert_eq!(second.molecular_formula, first.molecular_formula);
}

#[tokio::test]
async fn resolve_notation_uses_reverse_lookup_when_available() {
    let h = Harness::new(MockLookup::empty().with_reverse_name("ethanol"));
    let record = h.pipeline().resolve("CCO", InputKind::Notation).await;
    assert_eq!(record.iupac_name, "ethanol");
}

#[tokio::test]
async fn resolve_notation_survives_reverse_lookup_failure() {
    let h = Harness::new(MockLookup::empty().failing(LookupError::Timeout));
    let record = h.pipeline().resolve("CCO", InputKind::Notation).await;
    assert!(!record.is_failure());
    assert_eq!(record.iupac_name, "Name not available");
}

#[tokio::test]
async fn resolve_dictionary_name_never_calls_remote() {
    let h = Harness::new(MockLookup::empty());
    let record = h.pipeline().resolve("aspirin", InputKind::Name).await;

    assert!(!record.is_failure());
    assert_eq!(record.molecular_formula, "C9H8O4");
    assert_eq!(record.iupac_name, "2-acetoxybenzoic acid");
    assert_eq!(record.common_name.as_deref(), Some("Aspirin"));
    let groups = &record.functional_groups;
    let acid = groups.iter().position(|g| g == "Carboxylic Acid").expect("acid label present");
    let ester = groups.iter().position(|g| g == "Ester").expect("ester label present");
    assert!(acid < ester, "priority walks acids before esters");
    assert_eq!(h.lookup.call_count(), 0, "dictionary hit must not touch the network");
}

#[tokio::test]
async fn declared_name_never_falls_back_to_notation_parsing() {
    // "CCO" parsea como notación, pero la clase declarada manda: como
    // nombre desconocido debe terminar en CompoundNotFound.
    let h = Harness::new(MockLookup::empty());
    let record = h.pipeline().resolve("CCO", InputKind::Name).await;
    assert!(record.is_failure());
    assert!(record.error.as_deref().unwrap().contains("'CCO'"));
}

#[tokio::test]
async fn resolve_name_via_remote_service() {
    let lookup = MockLookup::empty().with_cid(702).with_properties(CompoundProperties {
        isomeric_notation: Some("CCO".into()),
        canonical_notation: Some("OCC".into()),
        official_name: Some("ethanol".into()),
    });
    let h = Harness::new(lookup);
    let record = h.pipeline().resolve("grain alcohol", InputKind::Name).await;

    assert!(!record.is_failure());
    assert_eq!(record.iupac_name, "ethanol");
    assert_eq!(record.common_name.as_deref(), Some("Grain Alcohol"));
    assert_eq!(record.smiles, "CCO");
    assert!(h.lookup.call_count() >= 2, "expected cid + properties calls");
}

#[tokio::test]
async fn unknown_name_reports_not_found_with_query() {
    let h = Harness::new(MockLookup::empty());
    let record = h.pipeline().resolve("unobtainium", InputKind::Name).await;

    assert!(record.is_failure());
    let reason = record.error.as_deref().unwrap();
    assert!(reason.contains("Could not find compound"));
    assert!(reason.contains("'unobtainium'"));
    assert_eq!(record.molecular_formula, "");
    assert_eq!(record.molecular_weight, 0.0);
    assert_eq!(h.lookup.call_count(), 1);
}

#[tokio::test]
async fn remote_timeout_collapses_to_not_found() {
    let h = Harness::new(MockLookup::empty().failing(LookupError::Timeout));
    let record = h.pipeline().resolve("anything", InputKind::Name).await;
    assert!(record.is_failure());
    assert!(record.error.as_deref().unwrap().contains("Could not find compound"));
}

#[tokio::test]
async fn empty_input_is_terminal_without_collaborator_calls() {
    for kind in [InputKind::Notation, InputKind::Name] {
        let h = Harness::new(MockLookup::empty());
        let record = h.pipeline().resolve("   ", kind).await;
        assert_eq!(record.error.as_deref(), Some("Please provide a structure or name"));
        assert_eq!(h.lookup.call_count(), 0);
    }
}

#[tokio::test]
async fn invalid_notation_is_terminal() {
    let h = Harness::new(MockLookup::empty());
    let record = h.pipeline().resolve("C1CC(", InputKind::Notation).await;

    assert_eq!(record.error.as_deref(), Some("Invalid SMILES string."));
    assert_eq!(record.smiles, "");
    assert_eq!(record.molecular_formula, "");
    assert!(record.functional_groups.is_empty());
    assert!(record.mol_block_2d.is_empty());
}

#[tokio::test]
async fn sanitization_failure_reports_invalid_structure() {
    let h = Harness::new(MockLookup::empty());
    let record = h.pipeline().resolve("C(F)(F)(F)(F)F", InputKind::Notation).await;

    assert!(record.is_failure());
    let reason = record.error.as_deref().unwrap();
    assert!(reason.starts_with("Invalid structure:"));
    assert!(reason.contains("valence"));
}

#[tokio::test]
async fn missing_3d_geometry_does_not_suppress_the_rest() {
    let h = Harness::new(MockLookup::empty());
    let record = h.pipeline().resolve("C1CC1", InputKind::Notation).await;

    assert!(!record.is_failure());
    assert!(record.mol_block_3d.is_none(), "fixture cyclopropane never embeds");
    assert_eq!(record.molecular_formula, "C3H6");
    assert!(!record.mol_block_2d.is_empty());
    assert_eq!(record.functional_groups, vec!["Alkane".to_string()]);
}

#[tokio::test]
async fn functional_groups_are_order_deterministic() {
    let h = Harness::new(MockLookup::empty());
    let first = h.pipeline().resolve("caffeine", InputKind::Name).await;
    for _ in 0..3 {
        let again = h.pipeline().resolve("caffeine", InputKind::Name).await;
        assert_eq!(again.functional_groups, first.functional_groups);
    }
    // Ninguna etiqueta sombreada convive con la que la sombrea.
    assert!(first.functional_groups.contains(&"Lactam (Cyclic Amide)".to_string()));
    assert!(!first.functional_groups.contains(&"Amide".to_string()));
    assert!(!first.functional_groups.contains(&"Carbonyl (C=O)".to_string()));
}

#[tokio::test]
async fn resolve_request_matches_direct_call() {
    let h = Harness::new(MockLookup::empty());
    let request = StructureRequest { structure: "CCO".into(), input_type: InputKind::Notation };
    let via_request = h.pipeline().resolve_request(&request).await;
    let direct = h.pipeline().resolve("CCO", InputKind::Notation).await;
    assert_eq!(via_request, direct);
}

#[tokio::test]
async fn explain_renders_resolved_record() {
    let h = Harness::new(MockLookup::empty());
    let record = h.pipeline().resolve("aspirin", InputKind::Name).await;
    let response = explain::explain(&record);

    assert!(response.explanation.starts_with("**2-acetoxybenzoic acid**"));
    assert!(response.explanation.contains("Common name: Aspirin"));
    assert!(response.explanation.contains("**Formula:** C9H8O4"));
    assert!(response.explanation.contains("• Carboxylic Acid"));
}

#[tokio::test]
async fn explain_failure_record_cannot_explain() {
    let h = Harness::new(MockLookup::empty());
    let record = h.pipeline().resolve("unobtainium", InputKind::Name).await;
    let response = explain::explain(&record);
    assert_eq!(response.explanation, "Unable to generate explanation.");
}

#[tokio::test]
async fn record_serializes_with_wire_field_names() {
    let h = Harness::new(MockLookup::empty());
    let record = h.pipeline().resolve("CCO", InputKind::Notation).await;
    let json = serde_json::to_value(&record).expect("serializes");

    assert_eq!(json["molecular_formula"], "C2H6O");
    assert_eq!(json["iupac_name"], "Name not available");
    assert!(json["mol_block_2d"].as_str().is_some());
    assert!(json.get("error").is_none());
}
