//! Oráculo real respaldado por RDKit vía Python.
//!
//! El módulo `python/rdkit_wrapper.py` se embebe en el binario y se carga
//! una sola vez por proceso; cada operación toma el GIL, invoca la función
//! correspondiente y traduce la excepción (si la hay) a [`OracleError`].
//! Requiere un intérprete con el paquete `rdkit` instalado.

use pyo3::ffi::c_str;
use pyo3::prelude::*;
use pyo3::types::PyModule;
use std::ffi::CString;
use std::sync::OnceLock;

use crate::{EmbedMethod, ForceField, MoleculeOracle, OracleError};

static WRAPPER_MODULE: OnceLock<Py<PyModule>> = OnceLock::new();

fn load_module(py: Python<'_>) -> PyResult<()> {
    let code = CString::new(include_str!("../python/rdkit_wrapper.py"))?;
    let module = PyModule::from_code(py, code.as_c_str(), c_str!("rdkit_wrapper.py"), c_str!("rdkit_wrapper"))?;
    WRAPPER_MODULE.set(module.unbind()).ok();
    Ok(())
}

fn module(py: Python<'_>) -> PyResult<Py<PyModule>> {
    WRAPPER_MODULE
        .get()
        .map(|m| m.clone_ref(py))
        .ok_or_else(|| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>("RdkitOracle::init() must run first"))
}

/// Grafo molecular: referencia a un objeto `Mol` de RDKit.
#[derive(Debug)]
pub struct PyMol(Py<PyAny>);

impl Clone for PyMol {
    fn clone(&self) -> Self {
        Python::attach(|py| PyMol(self.0.clone_ref(py)))
    }
}

/// Extrae una cadena llamando a una función del wrapper con el mol como
/// único argumento.
fn string_op(name: &str, mol: &PyMol) -> PyResult<String> {
    Python::attach(|py| {
        let m = module(py)?;
        let value: String = m.bind(py).getattr(name)?.call1((&mol.0,))?.extract()?;
        Ok(value)
    })
}

/// Variante numérica de [`string_op`].
fn float_op(name: &str, mol: &PyMol) -> PyResult<f64> {
    Python::attach(|py| {
        let m = module(py)?;
        let value: f64 = m.bind(py).getattr(name)?.call1((&mol.0,))?.extract()?;
        Ok(value)
    })
}

/// Oráculo respaldado por RDKit. Sin estado propio: el módulo Python se
/// comparte a nivel de proceso.
pub struct RdkitOracle {
    _private: (),
}

impl RdkitOracle {
    /// Carga el módulo wrapper (y con él RDKit). Falla si el intérprete no
    /// tiene `rdkit` disponible.
    pub fn init() -> Result<Self, OracleError> {
        Python::attach(load_module).map_err(|e| OracleError::Engine(format!("RDKit init: {e}")))?;
        Ok(Self { _private: () })
    }
}

impl MoleculeOracle for RdkitOracle {
    type Mol = PyMol;

    fn parse(&self, notation: &str) -> Result<PyMol, OracleError> {
        Python::attach(|py| {
            let m = module(py)?;
            let mol = m.bind(py).getattr("parse")?.call1((notation,))?;
            Ok(PyMol(mol.unbind()))
        })
        .map_err(|e: PyErr| OracleError::Parse(e.to_string()))
    }

    fn sanitize(&self, mol: &PyMol) -> Result<(), OracleError> {
        Python::attach(|py| -> PyResult<()> {
            let m = module(py)?;
            m.bind(py).getattr("sanitize")?.call1((&mol.0,))?;
            Ok(())
        })
        .map_err(|e| OracleError::Sanitize(e.to_string()))
    }

    fn canonical_notation(&self, mol: &PyMol) -> Result<String, OracleError> {
        string_op("canonical", mol).map_err(|e| OracleError::Engine(e.to_string()))
    }

    fn formula(&self, mol: &PyMol) -> Result<String, OracleError> {
        string_op("formula", mol).map_err(|e| OracleError::Engine(e.to_string()))
    }

    fn weight(&self, mol: &PyMol) -> Result<f64, OracleError> {
        float_op("weight", mol).map_err(|e| OracleError::Engine(e.to_string()))
    }

    fn exact_mass(&self, mol: &PyMol) -> Result<f64, OracleError> {
        float_op("exact_mass", mol).map_err(|e| OracleError::Engine(e.to_string()))
    }

    fn standard_identifier(&self, mol: &PyMol) -> Result<String, OracleError> {
        string_op("inchi", mol).map_err(|e| OracleError::Engine(e.to_string()))
    }

    fn layout_2d(&self, mol: &PyMol) -> Result<String, OracleError> {
        string_op("layout_2d", mol).map_err(|e| OracleError::Engine(e.to_string()))
    }

    fn render_svg(&self, mol: &PyMol) -> Result<String, OracleError> {
        string_op("render_svg", mol).map_err(|e| OracleError::Engine(e.to_string()))
    }

    fn match_count(&self, mol: &PyMol, pattern: &str) -> Result<usize, OracleError> {
        Python::attach(|py| {
            let m = module(py)?;
            m.bind(py).getattr("match_count")?.call1((&mol.0, pattern))?.extract()
        })
        .map_err(|e: PyErr| OracleError::Pattern(e.to_string()))
    }

    fn add_hydrogens(&self, mol: &PyMol) -> Result<PyMol, OracleError> {
        Python::attach(|py| {
            let m = module(py)?;
            let with_h = m.bind(py).getattr("add_hydrogens")?.call1((&mol.0,))?;
            Ok(PyMol(with_h.unbind()))
        })
        .map_err(|e: PyErr| OracleError::Engine(e.to_string()))
    }

    fn embed_3d(&self, mol: &mut PyMol, method: EmbedMethod, seed: u64) -> Result<(), OracleError> {
        let method_name = match method {
            EmbedMethod::Etkdg3 => "etkdg3",
            EmbedMethod::Etkdg2 => "etkdg2",
            EmbedMethod::RandomCoords => "random",
        };
        Python::attach(|py| -> PyResult<()> {
            let m = module(py)?;
            m.bind(py).getattr("embed")?.call1((&mol.0, method_name, seed))?;
            Ok(())
        })
        .map_err(|e| OracleError::Embed(e.to_string()))
    }

    fn optimize(&self, mol: &mut PyMol, forcefield: ForceField) -> Result<(), OracleError> {
        let ff_name = match forcefield {
            ForceField::Mmff94 => "mmff94",
            ForceField::Uff => "uff",
        };
        Python::attach(|py| -> PyResult<()> {
            let m = module(py)?;
            m.bind(py).getattr("optimize")?.call1((&mol.0, ff_name))?;
            Ok(())
        })
        .map_err(|e| OracleError::ForceField(e.to_string()))
    }

    fn molblock_3d(&self, mol: &PyMol) -> Result<String, OracleError> {
        string_op("molblock_3d", mol).map_err(|e| OracleError::Engine(e.to_string()))
    }
}
