//! Cifrados de bloque en modo CBC con padding PKCS#7.
//!
//! Formato de salida (y de entrada del decrypt): `hex(iv) || hex(ciphertext)`
//! en un solo string, IV primero, IV aleatorio fresco del tamaño del bloque.
//! La longitud de clave se valida contra el conjunto permitido por algoritmo
//! antes de cifrar; cualquier fallo al descifrar (clave mala, ciphertext
//! corrupto, padding inválido) se reporta como un único error, jamás texto
//! plano parcial.

use aes::{Aes128, Aes192, Aes256};
use blowfish::Blowfish;
use cipher::block_padding::Pkcs7;
use cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, BlockSizeUser, InnerIvInit, KeyInit};
use des::{Des, TdesEde2, TdesEde3};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::errors::OpError;

/// Algoritmos de bloque soportados y sus conjuntos de tamaños de clave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAlgorithm {
    /// Clave de 16, 24 o 32 bytes.
    Aes,
    /// Clave de 8 bytes.
    Des,
    /// Clave de 16 (EDE2) o 24 (EDE3) bytes.
    TripleDes,
    /// Clave de 4 a 56 bytes.
    Blowfish,
}

impl BlockAlgorithm {
    pub fn display_name(&self) -> &'static str {
        match self {
            BlockAlgorithm::Aes => "AES",
            BlockAlgorithm::Des => "DES",
            BlockAlgorithm::TripleDes => "Triple DES",
            BlockAlgorithm::Blowfish => "Blowfish",
        }
    }

    fn allowed_sizes(&self) -> &'static str {
        match self {
            BlockAlgorithm::Aes => "16, 24 or 32",
            BlockAlgorithm::Des => "8",
            BlockAlgorithm::TripleDes => "16 or 24",
            BlockAlgorithm::Blowfish => "4 to 56",
        }
    }

    fn key_len_ok(&self, len: usize) -> bool {
        match self {
            BlockAlgorithm::Aes => matches!(len, 16 | 24 | 32),
            BlockAlgorithm::Des => len == 8,
            BlockAlgorithm::TripleDes => matches!(len, 16 | 24),
            BlockAlgorithm::Blowfish => (4..=56).contains(&len),
        }
    }

    /// Valida la longitud en bytes de la clave contra el conjunto permitido.
    pub fn check_key(&self, key: &[u8]) -> Result<(), OpError> {
        if self.key_len_ok(key.len()) {
            Ok(())
        } else {
            Err(OpError::Validation(format!("{} key must be {} bytes (got {})",
                                            self.display_name(),
                                            self.allowed_sizes(),
                                            key.len())))
        }
    }
}

/// Cifra `input` con la clave dada; ver formato de salida en el módulo.
pub fn encrypt(alg: BlockAlgorithm, input: &str, key: &str) -> Result<String, OpError> {
    let key = key.as_bytes();
    alg.check_key(key)?;
    let plaintext = input.as_bytes();
    match (alg, key.len()) {
        (BlockAlgorithm::Aes, 16) => encrypt_with(init::<Aes128>(key)?, plaintext),
        (BlockAlgorithm::Aes, 24) => encrypt_with(init::<Aes192>(key)?, plaintext),
        (BlockAlgorithm::Aes, _) => encrypt_with(init::<Aes256>(key)?, plaintext),
        (BlockAlgorithm::Des, _) => encrypt_with(init::<Des>(key)?, plaintext),
        (BlockAlgorithm::TripleDes, 16) => encrypt_with(init::<TdesEde2>(key)?, plaintext),
        (BlockAlgorithm::TripleDes, _) => encrypt_with(init::<TdesEde3>(key)?, plaintext),
        (BlockAlgorithm::Blowfish, _) => encrypt_with(init::<Blowfish>(key)?, plaintext),
    }
}

/// Descifra el formato `hex(iv) || hex(ciphertext)` producido por [`encrypt`].
pub fn decrypt(alg: BlockAlgorithm, input: &str, key: &str) -> Result<String, OpError> {
    let key = key.as_bytes();
    alg.check_key(key)?;
    let name = alg.display_name();
    match (alg, key.len()) {
        (BlockAlgorithm::Aes, 16) => decrypt_with(init::<Aes128>(key)?, input, name),
        (BlockAlgorithm::Aes, 24) => decrypt_with(init::<Aes192>(key)?, input, name),
        (BlockAlgorithm::Aes, _) => decrypt_with(init::<Aes256>(key)?, input, name),
        (BlockAlgorithm::Des, _) => decrypt_with(init::<Des>(key)?, input, name),
        (BlockAlgorithm::TripleDes, 16) => decrypt_with(init::<TdesEde2>(key)?, input, name),
        (BlockAlgorithm::TripleDes, _) => decrypt_with(init::<TdesEde3>(key)?, input, name),
        (BlockAlgorithm::Blowfish, _) => decrypt_with(init::<Blowfish>(key)?, input, name),
    }
}

fn init<C: KeyInit>(key: &[u8]) -> Result<C, OpError> {
    // la longitud ya fue validada; esto sólo cubre discrepancias internas
    C::new_from_slice(key).map_err(|_| OpError::OperationFailed("failed to initialise cipher key".into()))
}

fn encrypt_with<C>(cipher: C, plaintext: &[u8]) -> Result<String, OpError>
    where C: BlockEncryptMut + BlockCipher + BlockSizeUser
{
    let mut iv = vec![0u8; C::block_size()];
    OsRng.fill_bytes(&mut iv);
    let enc = cbc::Encryptor::<C>::inner_iv_slice_init(cipher, &iv)
        .map_err(|_| OpError::OperationFailed("failed to initialise cipher IV".into()))?;
    let ciphertext = enc.encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    Ok(format!("{}{}", hex::encode(iv), hex::encode(ciphertext)))
}

fn decrypt_with<C>(cipher: C, input: &str, name: &str) -> Result<String, OpError>
    where C: BlockDecryptMut + BlockCipher + BlockSizeUser
{
    let fail = || OpError::OperationFailed(format!("{name} decryption failed: check the key and ciphertext"));
    let input = input.trim();
    let iv_hex_len = C::block_size() * 2;
    // el split de abajo es por índice de byte; un carácter multibyte sobre
    // la frontera del IV debe fallar como hex inválido, no como pánico
    if !input.is_ascii() || input.len() <= iv_hex_len {
        return Err(fail());
    }
    let (iv_hex, ct_hex) = input.split_at(iv_hex_len);
    let iv = hex::decode(iv_hex).map_err(|_| fail())?;
    let ciphertext = hex::decode(ct_hex).map_err(|_| fail())?;
    let dec = cbc::Decryptor::<C>::inner_iv_slice_init(cipher, &iv).map_err(|_| fail())?;
    let plaintext = dec.decrypt_padded_vec_mut::<Pkcs7>(&ciphertext).map_err(|_| fail())?;
    String::from_utf8(plaintext).map_err(|_| fail())
}
