//! Codecs de texto: Base64, hexadecimal, binario y Morse.
//!
//! Reglas clave:
//! - Base64/Hex/binario operan sobre la representación UTF-8 del input; todo
//!   decode fallido (input malformado o bytes no-UTF-8) es `OperationFailed`,
//!   nunca basura parcial. `Validation` queda reservado para argumentos.
//! - El decode hex tolera prefijos `0x` y espacios, y rechaza longitud impar.
//! - Morse es asimétrico por diseño: encode descarta caracteres sin código
//!   (incluye saltos de línea), decode falla ante cualquier token desconocido.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use once_cell::sync::Lazy;

use crate::errors::OpError;

static MORSE_TABLE: &[(char, &str)] = &[('A', ".-"),
                                        ('B', "-..."),
                                        ('C', "-.-."),
                                        ('D', "-.."),
                                        ('E', "."),
                                        ('F', "..-."),
                                        ('G', "--."),
                                        ('H', "...."),
                                        ('I', ".."),
                                        ('J', ".---"),
                                        ('K', "-.-"),
                                        ('L', ".-.."),
                                        ('M', "--"),
                                        ('N', "-."),
                                        ('O', "---"),
                                        ('P', ".--."),
                                        ('Q', "--.-"),
                                        ('R', ".-."),
                                        ('S', "..."),
                                        ('T', "-"),
                                        ('U', "..-"),
                                        ('V', "...-"),
                                        ('W', ".--"),
                                        ('X', "-..-"),
                                        ('Y', "-.--"),
                                        ('Z', "--.."),
                                        ('1', ".----"),
                                        ('2', "..---"),
                                        ('3', "...--"),
                                        ('4', "....-"),
                                        ('5', "....."),
                                        ('6', "-...."),
                                        ('7', "--..."),
                                        ('8', "---.."),
                                        ('9', "----."),
                                        ('0', "-----"),
                                        (',', "--..--"),
                                        ('.', ".-.-.-"),
                                        ('?', "..--.."),
                                        ('/', "-..-."),
                                        ('-', "-....-"),
                                        ('(', "-.--."),
                                        (')', "-.--.-")];

static MORSE_ENCODE: Lazy<HashMap<char, &'static str>> =
    Lazy::new(|| MORSE_TABLE.iter().copied().collect());

static MORSE_DECODE: Lazy<HashMap<&'static str, char>> =
    Lazy::new(|| MORSE_TABLE.iter().map(|&(c, code)| (code, c)).collect());

pub fn to_base64(input: &str) -> Result<String, OpError> {
    Ok(STANDARD.encode(input.as_bytes()))
}

pub fn from_base64(input: &str) -> Result<String, OpError> {
    let bytes = STANDARD.decode(input.trim())
                        .map_err(|e| OpError::OperationFailed(format!("invalid Base64 input: {e}")))?;
    String::from_utf8(bytes).map_err(|_| OpError::OperationFailed("decoded Base64 is not valid UTF-8".into()))
}

pub fn to_hex(input: &str) -> Result<String, OpError> {
    Ok(hex::encode(input.as_bytes()))
}

pub fn from_hex(input: &str) -> Result<String, OpError> {
    let cleaned: String = input.replace("0x", "").replace(' ', "").trim().to_string();
    if cleaned.len() % 2 != 0 {
        return Err(OpError::OperationFailed("invalid Hex string: odd length".into()));
    }
    let bytes =
        hex::decode(&cleaned).map_err(|_| OpError::OperationFailed("invalid characters in Hex string".into()))?;
    String::from_utf8(bytes).map_err(|_| OpError::OperationFailed("decoded Hex is not valid UTF-8".into()))
}

/// Cada byte UTF-8 se vuelve un grupo binario de 8 bits, separado por espacio.
pub fn to_binary(input: &str) -> Result<String, OpError> {
    let groups: Vec<String> = input.bytes().map(|b| format!("{b:08b}")).collect();
    Ok(groups.join(" "))
}

pub fn from_binary(input: &str) -> Result<String, OpError> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if !cleaned.chars().all(|c| c == '0' || c == '1') {
        return Err(OpError::OperationFailed("invalid Binary string: contains non-binary characters".into()));
    }
    if cleaned.len() % 8 != 0 {
        return Err(OpError::OperationFailed("invalid Binary string: length is not a multiple of 8".into()));
    }
    let bytes: Vec<u8> = cleaned.as_bytes()
                                .chunks(8)
                                .map(|chunk| {
                                    chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit - b'0'))
                                })
                                .collect();
    String::from_utf8(bytes).map_err(|_| OpError::OperationFailed("decoded Binary is not valid UTF-8".into()))
}

/// Encode Morse: case-fold a mayúsculas, espacio simple entre códigos, doble
/// espacio como separador de palabra. Caracteres sin código se descartan.
pub fn to_morse(input: &str) -> Result<String, OpError> {
    let mut tokens: Vec<&str> = Vec::new();
    for ch in input.chars() {
        let upper = ch.to_ascii_uppercase();
        if let Some(code) = MORSE_ENCODE.get(&upper) {
            tokens.push(code);
        } else if ch == ' ' {
            // token vacío => doble espacio al unir
            tokens.push("");
        }
    }
    Ok(tokens.join(" ").trim().to_string())
}

/// Decode Morse: inverso exacto de la tabla; cualquier token desconocido es
/// un fallo (el encode es lossy, el decode es estricto).
pub fn from_morse(input: &str) -> Result<String, OpError> {
    let mut out = String::new();
    for code in input.split_whitespace() {
        match MORSE_DECODE.get(code) {
            Some(&c) => out.push(c),
            None => {
                return Err(OpError::OperationFailed(format!("unsupported Morse code '{code}'")));
            }
        }
    }
    Ok(out)
}
