//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable
//! (`CONFIG`) evaluada una sola vez. Los componentes la reciben por
//! referencia; nunca se muta tras la inicialización.

use once_cell::sync::Lazy;
use std::env;

/// Configuración global (extensible para más secciones).
pub struct AppConfig {
    /// Configuración del servicio remoto de resolución de nombres.
    pub lookup: LookupConfig,
}

/// Parámetros del lookup remoto.
pub struct LookupConfig {
    /// URL base de la API PUG REST.
    pub base_url: String,
    /// Timeout duro por petición, en segundos. Sin reintentos.
    pub timeout_secs: u64,
}

const DEFAULT_BASE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Instancia global perezosa de configuración.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
    let base_url = env::var("CHEMRESOLVE_LOOKUP_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let timeout_secs = env::var("CHEMRESOLVE_LOOKUP_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    AppConfig { lookup: LookupConfig { base_url, timeout_secs } }
});
