//! Cursor de ejecución para el modo paso a paso.

/// Posición del modo paso a paso: índice del *próximo* paso a ejecutar.
///
/// Invariantes:
/// - Se resetea a 0 ante cualquier mutación de la receta o cambio de input.
/// - Avanza exactamente uno por paso ejecutado con éxito.
/// - Más allá del último paso, el siguiente intento lo devuelve a 0 (wrap)
///   sin ejecutar nada.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionCursor {
    step_index: usize,
}

impl ExecutionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn advance(&mut self) {
        self.step_index += 1;
    }

    pub fn reset(&mut self) {
        self.step_index = 0;
    }

    /// ¿Quedó el cursor más allá del último paso de una receta de `len` pasos?
    pub fn past_end(&self, len: usize) -> bool {
        self.step_index >= len
    }
}
