use chemresolve_rust::classify::classify_input;
use chemresolve_rust::data::types::{InputKind, StructureRequest};
use chemresolve_rust::providers::lookup::MockLookup;
use chemresolve_rust::{explain, CompoundDictionary, GroupPatternTable, StructurePipeline};

use chem_oracle::FixtureOracle;
use serde_json::to_string_pretty;

#[tokio::main]
async fn main() {
    // Cargar variables de entorno desde .env si existe
    let _ = dotenvy::dotenv();

    // Demo offline: oráculo fixture + lookup mudo. Ejercita las dos
    // operaciones del contrato sin red ni motor de química real.
    let oracle = FixtureOracle::new();
    let lookup = MockLookup::empty();
    let dictionary = CompoundDictionary::builtin();
    let groups = GroupPatternTable::builtin();
    let pipeline = StructurePipeline::new(&oracle, &lookup, &dictionary, &groups);

    let requests = [
        StructureRequest { structure: "CCO".into(), input_type: InputKind::Notation },
        StructureRequest { structure: "aspirin".into(), input_type: InputKind::Name },
        StructureRequest { structure: "caffeine".into(), input_type: InputKind::Name },
        StructureRequest { structure: "C1CC".into(), input_type: InputKind::Notation },
        StructureRequest { structure: "".into(), input_type: InputKind::Name },
    ];

    for request in &requests {
        // La heurística es consultiva; la clase declarada en la petición manda.
        let guessed = classify_input(&request.structure, &oracle);
        let record = pipeline.resolve_request(request).await;
        println!(
            "--- Resolve {:?} (declared {:?}, heuristic {:?}) ---",
            request.structure, request.input_type, guessed
        );
        println!("{}", to_string_pretty(&record).unwrap_or_default());
        if !record.is_failure() {
            let response = explain::explain(&record);
            println!("--- Explain ---");
            println!("{}", response.explanation);
        }
        println!();
    }

    // Demo con RDKit y PubChem reales – opt-in, requiere feature
    // `python-rdkit` y red.
    if std::env::var("CHEMRESOLVE_RUN_LIVE_DEMO").ok().as_deref() == Some("1") {
        run_live_demo().await;
    } else {
        eprintln!("[LIVE DEMO] Skipping (set CHEMRESOLVE_RUN_LIVE_DEMO=1 to enable)");
    }
}

#[cfg(feature = "python-rdkit")]
async fn run_live_demo() {
    use chem_oracle::RdkitOracle;
    use chemresolve_rust::config::CONFIG;
    use chemresolve_rust::providers::lookup::PubChemLookup;

    let oracle = match RdkitOracle::init() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("[LIVE DEMO] RDKit unavailable: {e}");
            return;
        }
    };
    let lookup = match PubChemLookup::new(&CONFIG.lookup) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[LIVE DEMO] lookup client failed: {e}");
            return;
        }
    };
    let dictionary = CompoundDictionary::builtin();
    let groups = GroupPatternTable::builtin();
    let pipeline = StructurePipeline::new(&oracle, &lookup, &dictionary, &groups);

    let record = pipeline.resolve("ibuprofen", InputKind::Name).await;
    println!("[LIVE DEMO] ibuprofen:");
    println!("{}", to_string_pretty(&record).unwrap_or_default());
}

#[cfg(not(feature = "python-rdkit"))]
async fn run_live_demo() {
    eprintln!("[LIVE DEMO] Built without the python-rdkit feature; nothing to run");
}
