//! Cadena de fallback para la geometría 3D.
//!
//! Tres métodos de embedding en orden de sofisticación decreciente, todos
//! con la misma semilla fija para reproducibilidad; a la primera
//! conformación lograda se intenta optimizar con MMFF94 y, si no aplica,
//! con UFF. Nada aquí es fatal: el fallo total produce `None` y el caller
//! debe tratar la geometría ausente como estado normal.

use chem_oracle::{EmbedMethod, ForceField, MoleculeOracle};
use log::debug;

/// Semilla fija de embedding: misma entrada, misma conformación.
pub const EMBED_SEED: u64 = 42;

const EMBED_CHAIN: [EmbedMethod; 3] = [EmbedMethod::Etkdg3, EmbedMethod::Etkdg2, EmbedMethod::RandomCoords];

/// Intenta producir un molblock 3D. `None` = sin geometría, nunca error.
pub fn embed_3d<O: MoleculeOracle>(oracle: &O, mol: &O::Mol) -> Option<String> {
    let mut with_h = match oracle.add_hydrogens(mol) {
        Ok(m) => m,
        Err(e) => {
            debug!("hydrogen addition failed, skipping 3D: {e}");
            return None;
        }
    };

    let mut embedded = None;
    for method in EMBED_CHAIN {
        match oracle.embed_3d(&mut with_h, method, EMBED_SEED) {
            Ok(()) => {
                embedded = Some(method);
                break;
            }
            Err(e) => debug!("embedding via {method:?} failed: {e}"),
        }
    }
    let method = embedded?;
    debug!("embedded via {method:?}");

    // La optimización es mejora, no requisito: la geometría embebida sin
    // optimizar también se devuelve.
    if let Err(primary) = oracle.optimize(&mut with_h, ForceField::Mmff94) {
        debug!("MMFF94 optimization unavailable: {primary}");
        if let Err(secondary) = oracle.optimize(&mut with_h, ForceField::Uff) {
            debug!("UFF optimization unavailable: {secondary}");
        }
    }

    oracle.molblock_3d(&with_h).ok()
}
