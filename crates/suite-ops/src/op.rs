//! Registro cerrado de operaciones.
//!
//! `OpId` reemplaza el despacho por cadenas if/elif: un enum cerrado, clave
//! estable por nombre visible (el formato de archivo de recetas usa ese
//! nombre), cada variante con su esquema de argumentos, su función de
//! transformación pura y su inversa. El match exhaustivo garantiza que añadir
//! una operación obliga a decidir las tres cosas.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::args::{self, ArgSpec, StepArgs};
use crate::block::BlockAlgorithm;
use crate::errors::OpError;
use crate::{asymmetric, block, classical, codec, hash};

/// Identificador estable de cada operación del registro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpId {
    ToBase64,
    FromBase64,
    ToHex,
    FromHex,
    ToBinary,
    FromBinary,
    ToMorse,
    FromMorse,
    CaesarEncrypt,
    CaesarDecrypt,
    Atbash,
    Rot13,
    VigenereEncrypt,
    VigenereDecrypt,
    AesEncrypt,
    AesDecrypt,
    DesEncrypt,
    DesDecrypt,
    TripleDesEncrypt,
    TripleDesDecrypt,
    BlowfishEncrypt,
    BlowfishDecrypt,
    RsaEncrypt,
    RsaDecrypt,
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

/// Todas las operaciones, en el orden en que se listan al usuario.
pub const ALL_OPS: &[OpId] = &[OpId::ToBase64,
                               OpId::FromBase64,
                               OpId::ToHex,
                               OpId::FromHex,
                               OpId::ToBinary,
                               OpId::FromBinary,
                               OpId::ToMorse,
                               OpId::FromMorse,
                               OpId::CaesarEncrypt,
                               OpId::CaesarDecrypt,
                               OpId::Atbash,
                               OpId::Rot13,
                               OpId::VigenereEncrypt,
                               OpId::VigenereDecrypt,
                               OpId::AesEncrypt,
                               OpId::AesDecrypt,
                               OpId::DesEncrypt,
                               OpId::DesDecrypt,
                               OpId::TripleDesEncrypt,
                               OpId::TripleDesDecrypt,
                               OpId::BlowfishEncrypt,
                               OpId::BlowfishDecrypt,
                               OpId::RsaEncrypt,
                               OpId::RsaDecrypt,
                               OpId::Md5,
                               OpId::Sha1,
                               OpId::Sha256,
                               OpId::Sha512];

impl OpId {
    /// Nombre estable; es la clave del formato de archivo de recetas.
    pub fn name(&self) -> &'static str {
        match self {
            OpId::ToBase64 => "To Base64",
            OpId::FromBase64 => "From Base64",
            OpId::ToHex => "To Hex",
            OpId::FromHex => "From Hex",
            OpId::ToBinary => "To Binary",
            OpId::FromBinary => "From Binary",
            OpId::ToMorse => "Morse Code",
            OpId::FromMorse => "From Morse",
            OpId::CaesarEncrypt => "Caesar Encrypt",
            OpId::CaesarDecrypt => "Caesar Decrypt",
            OpId::Atbash => "Atbash Cipher",
            OpId::Rot13 => "ROT13 Cipher",
            OpId::VigenereEncrypt => "Vigenère Cipher",
            OpId::VigenereDecrypt => "Vigenère Decrypt",
            OpId::AesEncrypt => "AES Encrypt",
            OpId::AesDecrypt => "AES Decrypt",
            OpId::DesEncrypt => "DES Encrypt",
            OpId::DesDecrypt => "DES Decrypt",
            OpId::TripleDesEncrypt => "Triple DES Encrypt",
            OpId::TripleDesDecrypt => "Triple DES Decrypt",
            OpId::BlowfishEncrypt => "Blowfish Encrypt",
            OpId::BlowfishDecrypt => "Blowfish Decrypt",
            OpId::RsaEncrypt => "RSA Encrypt",
            OpId::RsaDecrypt => "RSA Decrypt",
            OpId::Md5 => "MD5",
            OpId::Sha1 => "SHA-1",
            OpId::Sha256 => "SHA-256",
            OpId::Sha512 => "SHA-512",
        }
    }

    /// Resuelve un nombre de operación; `None` si no está en el registro.
    pub fn from_name(name: &str) -> Option<OpId> {
        ALL_OPS.iter().copied().find(|op| op.name() == name)
    }

    /// Esquema de argumentos declarado.
    pub fn arg_spec(&self) -> ArgSpec {
        match self {
            OpId::CaesarEncrypt | OpId::CaesarDecrypt => ArgSpec::Shift,
            OpId::VigenereEncrypt
            | OpId::VigenereDecrypt
            | OpId::AesEncrypt
            | OpId::AesDecrypt
            | OpId::DesEncrypt
            | OpId::DesDecrypt
            | OpId::TripleDesEncrypt
            | OpId::TripleDesDecrypt
            | OpId::BlowfishEncrypt
            | OpId::BlowfishDecrypt => ArgSpec::Key,
            OpId::RsaEncrypt | OpId::RsaDecrypt => ArgSpec::MultilineKey,
            _ => ArgSpec::None,
        }
    }

    /// Tabla de inversión: la operación que deshace a ésta, si existe.
    ///
    /// RSA no tiene entrada: llevar la clave pública del paso de cifrado a un
    /// paso de descifrado produciría una receta inservible. Los hashes son
    /// one-way.
    pub fn inverse(&self) -> Option<OpId> {
        match self {
            OpId::ToBase64 => Some(OpId::FromBase64),
            OpId::FromBase64 => Some(OpId::ToBase64),
            OpId::ToHex => Some(OpId::FromHex),
            OpId::FromHex => Some(OpId::ToHex),
            OpId::ToBinary => Some(OpId::FromBinary),
            OpId::FromBinary => Some(OpId::ToBinary),
            OpId::ToMorse => Some(OpId::FromMorse),
            OpId::FromMorse => Some(OpId::ToMorse),
            OpId::CaesarEncrypt => Some(OpId::CaesarDecrypt),
            OpId::CaesarDecrypt => Some(OpId::CaesarEncrypt),
            OpId::Atbash => Some(OpId::Atbash),
            OpId::Rot13 => Some(OpId::Rot13),
            OpId::VigenereEncrypt => Some(OpId::VigenereDecrypt),
            OpId::VigenereDecrypt => Some(OpId::VigenereEncrypt),
            OpId::AesEncrypt => Some(OpId::AesDecrypt),
            OpId::AesDecrypt => Some(OpId::AesEncrypt),
            OpId::DesEncrypt => Some(OpId::DesDecrypt),
            OpId::DesDecrypt => Some(OpId::DesEncrypt),
            OpId::TripleDesEncrypt => Some(OpId::TripleDesDecrypt),
            OpId::TripleDesDecrypt => Some(OpId::TripleDesEncrypt),
            OpId::BlowfishEncrypt => Some(OpId::BlowfishDecrypt),
            OpId::BlowfishDecrypt => Some(OpId::BlowfishEncrypt),
            OpId::RsaEncrypt | OpId::RsaDecrypt => None,
            OpId::Md5 | OpId::Sha1 | OpId::Sha256 | OpId::Sha512 => None,
        }
    }

    /// Validación estática de los argumentos (sin necesidad del input).
    pub fn validate_args(&self, step_args: &StepArgs) -> Result<(), OpError> {
        match self.arg_spec() {
            ArgSpec::None => Ok(()),
            ArgSpec::Shift => args::shift(step_args).map(|_| ()),
            ArgSpec::Key | ArgSpec::MultilineKey => {
                let key = args::key(step_args)?;
                match self {
                    OpId::VigenereEncrypt | OpId::VigenereDecrypt => {
                        if key.chars().all(|c| c.is_ascii_alphabetic()) {
                            Ok(())
                        } else {
                            Err(OpError::Validation("Vigenère key must be non-empty and alphabetic".into()))
                        }
                    }
                    OpId::AesEncrypt | OpId::AesDecrypt => BlockAlgorithm::Aes.check_key(key.as_bytes()),
                    OpId::DesEncrypt | OpId::DesDecrypt => BlockAlgorithm::Des.check_key(key.as_bytes()),
                    OpId::TripleDesEncrypt | OpId::TripleDesDecrypt => {
                        BlockAlgorithm::TripleDes.check_key(key.as_bytes())
                    }
                    OpId::BlowfishEncrypt | OpId::BlowfishDecrypt => {
                        BlockAlgorithm::Blowfish.check_key(key.as_bytes())
                    }
                    _ => Ok(()),
                }
            }
        }
    }

    /// Despacho exhaustivo: ejecuta la transformación pura de la operación.
    pub fn run(&self, input: &str, step_args: &StepArgs) -> Result<String, OpError> {
        match self {
            OpId::ToBase64 => codec::to_base64(input),
            OpId::FromBase64 => codec::from_base64(input),
            OpId::ToHex => codec::to_hex(input),
            OpId::FromHex => codec::from_hex(input),
            OpId::ToBinary => codec::to_binary(input),
            OpId::FromBinary => codec::from_binary(input),
            OpId::ToMorse => codec::to_morse(input),
            OpId::FromMorse => codec::from_morse(input),
            OpId::CaesarEncrypt => Ok(classical::caesar(input, args::shift(step_args)?)),
            OpId::CaesarDecrypt => Ok(classical::caesar(input, -args::shift(step_args)?)),
            OpId::Atbash => Ok(classical::atbash(input)),
            OpId::Rot13 => Ok(classical::rot13(input)),
            OpId::VigenereEncrypt => classical::vigenere(input, args::key(step_args)?, false),
            OpId::VigenereDecrypt => classical::vigenere(input, args::key(step_args)?, true),
            OpId::AesEncrypt => block::encrypt(BlockAlgorithm::Aes, input, args::key(step_args)?),
            OpId::AesDecrypt => block::decrypt(BlockAlgorithm::Aes, input, args::key(step_args)?),
            OpId::DesEncrypt => block::encrypt(BlockAlgorithm::Des, input, args::key(step_args)?),
            OpId::DesDecrypt => block::decrypt(BlockAlgorithm::Des, input, args::key(step_args)?),
            OpId::TripleDesEncrypt => block::encrypt(BlockAlgorithm::TripleDes, input, args::key(step_args)?),
            OpId::TripleDesDecrypt => block::decrypt(BlockAlgorithm::TripleDes, input, args::key(step_args)?),
            OpId::BlowfishEncrypt => block::encrypt(BlockAlgorithm::Blowfish, input, args::key(step_args)?),
            OpId::BlowfishDecrypt => block::decrypt(BlockAlgorithm::Blowfish, input, args::key(step_args)?),
            OpId::RsaEncrypt => asymmetric::encrypt(input, args::key(step_args)?),
            OpId::RsaDecrypt => asymmetric::decrypt(input, args::key(step_args)?),
            OpId::Md5 => Ok(hash::md5_hex(input)),
            OpId::Sha1 => Ok(hash::sha1_hex(input)),
            OpId::Sha256 => Ok(hash::sha256_hex(input)),
            OpId::Sha512 => Ok(hash::sha512_hex(input)),
        }
    }
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for OpId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for OpId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        OpId::from_name(&name).ok_or_else(|| D::Error::custom(format!("unknown operation: {name}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{ARG_KEY, ARG_SHIFT};

    fn with_key(value: &str) -> StepArgs {
        let mut a = StepArgs::new();
        a.insert(ARG_KEY.to_string(), value.to_string());
        a
    }

    fn with_shift(value: &str) -> StepArgs {
        let mut a = StepArgs::new();
        a.insert(ARG_SHIFT.to_string(), value.to_string());
        a
    }

    #[test]
    fn names_round_trip_through_the_registry() {
        for &op in ALL_OPS {
            assert_eq!(OpId::from_name(op.name()), Some(op), "{op}");
        }
        assert_eq!(OpId::from_name("Quantum Encrypt"), None);
    }

    #[test]
    fn inversion_table_is_symmetric() {
        for &op in ALL_OPS {
            if let Some(inv) = op.inverse() {
                assert_eq!(inv.inverse(), Some(op), "{op} <-> {inv}");
            }
        }
    }

    #[test]
    fn one_way_operations_have_no_inverse() {
        for op in [OpId::Md5, OpId::Sha1, OpId::Sha256, OpId::Sha512, OpId::RsaEncrypt, OpId::RsaDecrypt] {
            assert_eq!(op.inverse(), None, "{op}");
        }
    }

    #[test]
    fn run_dispatches_and_validates() {
        let none = StepArgs::new();
        assert_eq!(OpId::ToBase64.run("hi", &none).unwrap(), "aGk=");
        assert_eq!(OpId::CaesarEncrypt.run("abc", &with_shift("3")).unwrap(), "def");
        assert!(matches!(OpId::CaesarEncrypt.run("abc", &with_shift("99")),
                         Err(OpError::Validation(_))));
        assert!(matches!(OpId::AesEncrypt.run("abc", &with_key("short")), Err(OpError::Validation(_))));
    }

    #[test]
    fn encrypt_decrypt_pairs_round_trip_via_dispatch() {
        let key = with_key("0123456789abcdef");
        let ct = OpId::AesEncrypt.run("hola", &key).unwrap();
        assert_eq!(OpId::AesDecrypt.run(&ct, &key).unwrap(), "hola");

        let vkey = with_key("lemon");
        let ct = OpId::VigenereEncrypt.run("attack", &vkey).unwrap();
        assert_eq!(OpId::VigenereDecrypt.run(&ct, &vkey).unwrap(), "attack");
    }

    #[test]
    fn serde_uses_the_stable_name() {
        let json = serde_json::to_string(&OpId::VigenereEncrypt).unwrap();
        assert_eq!(json, "\"Vigenère Cipher\"");
        let back: OpId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OpId::VigenereEncrypt);
        assert!(serde_json::from_str::<OpId>("\"Nope\"").is_err());
    }

    #[test]
    fn static_validation_checks_key_shape() {
        assert!(OpId::VigenereEncrypt.validate_args(&with_key("lemon")).is_ok());
        assert!(OpId::VigenereEncrypt.validate_args(&with_key("l3mon")).is_err());
        assert!(OpId::AesEncrypt.validate_args(&with_key("0123456789abcdef")).is_ok());
        assert!(OpId::AesEncrypt.validate_args(&with_key("tiny")).is_err());
        assert!(OpId::ToBase64.validate_args(&StepArgs::new()).is_ok());
    }
}
