//! suite-ops: Biblioteca de operaciones de CryptoSuite
//!
//! Este crate provee las transformaciones puras que consume el motor de
//! recetas (`suite-core`):
//! - Codecs reversibles: Base64, Hex, binario, Morse.
//! - Cifrados clásicos: Caesar, Atbash, ROT13, Vigenère.
//! - Cifrados de bloque en CBC con padding PKCS#7: AES, DES, 3DES, Blowfish.
//! - RSA-OAEP (generación de claves, cifrado, descifrado).
//! - Hashes one-way: MD5, SHA-1, SHA-256, SHA-512.
//! - Esteganografía LSB con cifrado derivado de contraseña.
//!
//! Todas las operaciones son stateless y libres de efectos: `(input, args) ->
//! Result<output, OpError>`. El registro cerrado vive en `op::OpId`.

pub mod args;
pub mod asymmetric;
pub mod block;
pub mod classical;
pub mod codec;
pub mod errors;
pub mod hash;
pub mod op;
pub mod stego;

pub use args::{ArgSpec, StepArgs, ARG_KEY, ARG_SHIFT};
pub use errors::OpError;
pub use op::OpId;
