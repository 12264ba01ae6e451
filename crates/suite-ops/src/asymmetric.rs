//! RSA-OAEP: generación de par de claves y cifrado/descifrado.
//!
//! - Claves de 2048 bits; privada en PKCS#8 PEM, pública en SPKI PEM, ambas
//!   devueltas en un solo bloque de texto (pública primero).
//! - OAEP con SHA-256 tanto para el hash como para la MGF1.
//! - El ciphertext viaja como Base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::errors::OpError;

pub const RSA_KEY_BITS: usize = 2048;

/// Genera un par de claves y lo devuelve como un bloque de texto con los dos
/// PEM (pública, línea en blanco, privada).
pub fn generate_key_pair() -> Result<String, OpError> {
    let private = RsaPrivateKey::new(&mut OsRng, RSA_KEY_BITS)
        .map_err(|e| OpError::OperationFailed(format!("failed to generate RSA key pair: {e}")))?;
    let public = RsaPublicKey::from(&private);
    let public_pem = public.to_public_key_pem(LineEnding::LF)
                           .map_err(|e| OpError::OperationFailed(format!("failed to encode public key: {e}")))?;
    let private_pem = private.to_pkcs8_pem(LineEnding::LF)
                             .map_err(|e| OpError::OperationFailed(format!("failed to encode private key: {e}")))?;
    Ok(format!("{}\n{}", public_pem.trim_end(), private_pem.trim_end()))
}

/// Cifra con una clave pública PEM; salida Base64.
pub fn encrypt(input: &str, public_key_pem: &str) -> Result<String, OpError> {
    let key = RsaPublicKey::from_public_key_pem(public_key_pem.trim())
        .map_err(|e| OpError::Validation(format!("failed to load RSA public key: {e}")))?;
    let ciphertext = key.encrypt(&mut OsRng, Oaep::new::<Sha256>(), input.as_bytes())
                        .map_err(|e| OpError::OperationFailed(format!("failed to encrypt with RSA: {e}")))?;
    Ok(STANDARD.encode(ciphertext))
}

/// Descifra Base64 con una clave privada PEM (sin password).
pub fn decrypt(input: &str, private_key_pem: &str) -> Result<String, OpError> {
    let key = RsaPrivateKey::from_pkcs8_pem(private_key_pem.trim())
        .map_err(|e| OpError::Validation(format!("failed to load RSA private key: {e}")))?;
    let ciphertext = STANDARD.decode(input.trim())
                             .map_err(|e| OpError::OperationFailed(format!("failed to decrypt with RSA: {e}")))?;
    let plaintext = key.decrypt(Oaep::new::<Sha256>(), &ciphertext)
                       .map_err(|e| OpError::OperationFailed(format!("failed to decrypt with RSA: {e}")))?;
    String::from_utf8(plaintext).map_err(|_| OpError::OperationFailed("RSA plaintext is not valid UTF-8".into()))
}

/// Separa el bloque combinado devuelto por [`generate_key_pair`] en
/// (pública, privada); acepta también un bloque con una sola de las dos.
pub fn split_key_block(block: &str) -> (Option<String>, Option<String>) {
    let public = extract_pem(block, "PUBLIC KEY");
    let private = extract_pem(block, "PRIVATE KEY");
    (public, private)
}

fn extract_pem(block: &str, label: &str) -> Option<String> {
    let begin = format!("-----BEGIN {label}-----");
    let end = format!("-----END {label}-----");
    let start = block.find(&begin)?;
    let stop = block[start..].find(&end)? + start + end.len();
    Some(block[start..stop].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_pair_encrypt_decrypt_round_trip() {
        let block = generate_key_pair().unwrap();
        let (public_pem, private_pem) = split_key_block(&block);
        let public_pem = public_pem.expect("public PEM present");
        let private_pem = private_pem.expect("private PEM present");

        let ciphertext = encrypt("top secret", &public_pem).unwrap();
        assert_ne!(ciphertext, "top secret");
        assert_eq!(decrypt(&ciphertext, &private_pem).unwrap(), "top secret");
    }

    #[test]
    fn bad_pem_is_a_load_error() {
        assert!(matches!(encrypt("text", "not a pem"), Err(OpError::Validation(_))));
        assert!(matches!(decrypt("AAAA", "not a pem"), Err(OpError::Validation(_))));
    }
}
