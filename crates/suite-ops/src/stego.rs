//! Esteganografía LSB con cifrado derivado de contraseña.
//!
//! Dos capas independientes que se componen:
//! - Capa criptográfica: PBKDF2-HMAC-SHA256 (100k iteraciones, salida de 32
//!   bytes, salt aleatorio de 16) deriva una clave Fernet; el formato
//!   persistido es `base64(salt || token)`, salt primero. Un fallo de
//!   autenticación del token (contraseña equivocada) es un resultado
//!   *distinto* de cualquier otro fallo (datos corruptos, formato inválido).
//! - Capa de embedding: un bit por valor de canal del buffer de píxeles
//!   aplanado, sólo el bit menos significativo; el mensaje termina en un
//!   delimitador fijo. La capacidad se verifica antes de escribir.

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use fernet::Fernet;
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use crate::errors::OpError;

pub const ENCRYPTION_ITERATIONS: u32 = 100_000;
pub const MESSAGE_DELIMITER: &str = "####";
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// Deriva la clave Fernet (Base64 url-safe de 32 bytes) desde la contraseña.
pub fn derive_fernet_key(password: &str, salt: &[u8]) -> String {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ENCRYPTION_ITERATIONS, &mut key);
    URL_SAFE.encode(key)
}

/// Cifra `message` con una clave derivada de `password` y un salt fresco.
/// Devuelve `base64(salt || token)` — el formato exacto que consume
/// [`decrypt_message`].
pub fn encrypt_message(message: &str, password: &str) -> Result<String, OpError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let key = derive_fernet_key(password, &salt);
    let fernet = Fernet::new(&key)
        .ok_or_else(|| OpError::OperationFailed("failed to initialise message cipher".into()))?;
    let token = fernet.encrypt(message.as_bytes());
    let mut payload = salt.to_vec();
    payload.extend_from_slice(token.as_bytes());
    Ok(STANDARD.encode(payload))
}

/// Descifra el formato de [`encrypt_message`]. Contraseña incorrecta =>
/// `OpError::InvalidPassword`; cualquier otro problema => `OperationFailed`.
pub fn decrypt_message(encrypted: &str, password: &str) -> Result<String, OpError> {
    let unreadable = || OpError::OperationFailed("hidden data is unreadable or corrupted".into());
    let payload = STANDARD.decode(encrypted.trim()).map_err(|_| unreadable())?;
    if payload.len() <= SALT_LEN {
        return Err(unreadable());
    }
    let (salt, token_bytes) = payload.split_at(SALT_LEN);
    let token = std::str::from_utf8(token_bytes).map_err(|_| unreadable())?;
    let key = derive_fernet_key(password, salt);
    let fernet = Fernet::new(&key)
        .ok_or_else(|| OpError::OperationFailed("failed to initialise message cipher".into()))?;
    let plaintext = fernet.decrypt(token).map_err(|_| OpError::InvalidPassword)?;
    String::from_utf8(plaintext).map_err(|_| unreadable())
}

/// Incrusta `data` (más el delimitador) en los LSB del buffer de píxeles.
/// Verifica la capacidad antes de copiar; el buffer original no se toca.
pub fn encode_lsb(pixels: &[u8], data: &str) -> Result<Vec<u8>, OpError> {
    let mut message = data.as_bytes().to_vec();
    message.extend_from_slice(MESSAGE_DELIMITER.as_bytes());
    let needed = message.len() * 8;
    if needed > pixels.len() {
        return Err(OpError::Capacity { needed, available: pixels.len() });
    }

    let mut out = pixels.to_vec();
    for (i, byte) in message.iter().enumerate() {
        for bit in 0..8 {
            let value = (byte >> (7 - bit)) & 1;
            let idx = i * 8 + bit;
            out[idx] = (out[idx] & 0b1111_1110) | value;
        }
    }
    Ok(out)
}

/// Extrae un mensaje incrustado por [`encode_lsb`]: acumula 8 bits por
/// carácter y mantiene una ventana deslizante del tamaño del delimitador;
/// cuando la ventana coincide, devuelve todo lo decodificado antes de ella.
pub fn decode_lsb(pixels: &[u8]) -> Result<String, OpError> {
    let delim = MESSAGE_DELIMITER.as_bytes();
    let mut decoded: Vec<u8> = Vec::new();
    let mut current = 0u8;
    let mut bits = 0usize;

    for &channel in pixels {
        current = (current << 1) | (channel & 1);
        bits += 1;
        if bits == 8 {
            decoded.push(current);
            current = 0;
            bits = 0;
            if decoded.len() >= delim.len() && &decoded[decoded.len() - delim.len()..] == delim {
                let body = &decoded[..decoded.len() - delim.len()];
                return String::from_utf8(body.to_vec())
                    .map_err(|_| OpError::OperationFailed("hidden data is unreadable or corrupted".into()));
            }
        }
    }
    Err(OpError::NotFound("no hidden message found in this image".into()))
}

/// Conveniencia: cifra el mensaje con la contraseña y lo incrusta.
pub fn hide_message(pixels: &[u8], message: &str, password: &str) -> Result<Vec<u8>, OpError> {
    let encrypted = encrypt_message(message, password)?;
    encode_lsb(pixels, &encrypted)
}

/// Conveniencia: extrae y descifra un mensaje incrustado por [`hide_message`].
pub fn reveal_message(pixels: &[u8], password: &str) -> Result<String, OpError> {
    let encrypted = decode_lsb(pixels)?;
    decrypt_message(&encrypted, password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lsb_round_trip_plain() {
        let carrier = vec![0x7Fu8; 128];
        let stego = encode_lsb(&carrier, "hi").unwrap();
        assert_eq!(stego.len(), carrier.len());
        assert_eq!(decode_lsb(&stego).unwrap(), "hi");
    }

    #[test]
    fn lsb_only_touches_the_low_bit() {
        let carrier = vec![0b1010_1010u8; 128];
        let stego = encode_lsb(&carrier, "x").unwrap();
        for (orig, new) in carrier.iter().zip(&stego) {
            assert_eq!(orig & 0b1111_1110, new & 0b1111_1110);
        }
    }

    #[test]
    fn lsb_capacity_checked_before_writing() {
        // "hi" + "####" => 6 bytes => 48 bits; 40 canales no alcanzan
        let carrier = vec![0u8; 40];
        match encode_lsb(&carrier, "hi") {
            Err(OpError::Capacity { needed, available }) => {
                assert_eq!(needed, 48);
                assert_eq!(available, 40);
            }
            other => panic!("expected Capacity, got {other:?}"),
        }
    }

    #[test]
    fn lsb_missing_delimiter_reports_not_found() {
        let carrier = vec![0u8; 64];
        assert!(matches!(decode_lsb(&carrier), Err(OpError::NotFound(_))));
    }

    #[test]
    fn message_encryption_round_trip() {
        let encrypted = encrypt_message("meet at noon", "hunter2").unwrap();
        assert_eq!(decrypt_message(&encrypted, "hunter2").unwrap(), "meet at noon");
    }

    #[test]
    fn wrong_password_is_distinct_from_corruption() {
        let encrypted = encrypt_message("meet at noon", "hunter2").unwrap();
        assert_eq!(decrypt_message(&encrypted, "wrong"), Err(OpError::InvalidPassword));
        // datos ilegibles: error genérico, nunca InvalidPassword
        assert!(matches!(decrypt_message("@@not-base64@@", "hunter2"),
                         Err(OpError::OperationFailed(_))));
        assert!(matches!(decrypt_message("AAAA", "hunter2"), Err(OpError::OperationFailed(_))));
    }

    #[test]
    fn salts_differ_between_encryptions() {
        let a = encrypt_message("m", "p").unwrap();
        let b = encrypt_message("m", "p").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn hide_and_reveal_round_trip() {
        let carrier = vec![0x55u8; 4096];
        let stego = hide_message(&carrier, "hi", "s3cret").unwrap();
        assert_eq!(reveal_message(&stego, "s3cret").unwrap(), "hi");
        assert_eq!(reveal_message(&stego, "nope"), Err(OpError::InvalidPassword));
    }

    #[test]
    fn hide_rejects_small_carrier() {
        let carrier = vec![0u8; 64];
        assert!(matches!(hide_message(&carrier, "hi", "pw"), Err(OpError::Capacity { .. })));
    }
}
