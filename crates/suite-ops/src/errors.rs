//! Errores de operación (taxonomía compartida por toda la biblioteca).

use thiserror::Error;

/// Fallos posibles al ejecutar una operación.
///
/// - `Validation`: el argumento no tiene la forma/tamaño requerido; se detecta
///   antes de tocar el input.
/// - `OperationFailed`: la operación corrió pero no produjo resultado usable
///   (padding inválido, Base64 malformado, bytes no-UTF-8, etc.).
/// - `InvalidPassword`: distinto de cualquier otro fallo; el caller debe poder
///   diferenciar "contraseña incorrecta" de "datos ilegibles".
/// - `Capacity`: el payload esteganográfico excede la capacidad del carrier.
/// - `NotFound`: el delimitador/marcador no aparece al decodificar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OpError {
    #[error("{0}")] Validation(String),
    #[error("{0}")] OperationFailed(String),
    #[error("incorrect password")] InvalidPassword,
    #[error("message needs {needed} bits but the carrier only holds {available}")]
    Capacity { needed: usize, available: usize },
    #[error("{0}")] NotFound(String),
}
