//! Cifrados clásicos por sustitución de alfabeto.
//!
//! Todos operan letra a letra (ASCII), por caso, módulo 26; los caracteres
//! no alfabéticos pasan sin cambio.

use crate::errors::OpError;

/// Caesar: desplaza letras `shift` posiciones (negativo para descifrar).
pub fn caesar(input: &str, shift: i32) -> String {
    input.chars().map(|c| shift_char(c, shift)).collect()
}

/// Atbash: sustitución recíproca `c -> 'z' - (c - 'a')`. Auto-inversa.
pub fn atbash(input: &str) -> String {
    input.chars()
         .map(|c| match c {
             'a'..='z' => (b'z' - (c as u8 - b'a')) as char,
             'A'..='Z' => (b'Z' - (c as u8 - b'A')) as char,
             other => other,
         })
         .collect()
}

/// ROT13: Caesar con desplazamiento fijo 13. Auto-inversa.
pub fn rot13(input: &str) -> String {
    caesar(input, 13)
}

/// Vigenère: la clave (alfabética, no vacía) se repite sobre las letras del
/// input; el índice de clave avanza sólo en caracteres alfabéticos. Descifrar
/// resta el desplazamiento en lugar de sumarlo.
pub fn vigenere(input: &str, key: &str, decrypt: bool) -> Result<String, OpError> {
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(OpError::Validation("Vigenère key must be non-empty and alphabetic".into()));
    }
    let shifts: Vec<i32> = key.chars()
                              .map(|c| (c.to_ascii_lowercase() as u8 - b'a') as i32)
                              .collect();
    let mut key_index = 0usize;
    let out = input.chars()
                   .map(|c| {
                       if c.is_ascii_alphabetic() {
                           let mut shift = shifts[key_index % shifts.len()];
                           if decrypt {
                               shift = -shift;
                           }
                           key_index += 1;
                           shift_char(c, shift)
                       } else {
                           c
                       }
                   })
                   .collect();
    Ok(out)
}

fn shift_char(c: char, shift: i32) -> char {
    let base = match c {
        'a'..='z' => b'a',
        'A'..='Z' => b'A',
        _ => return c,
    };
    let offset = (c as u8 - base) as i32;
    (base + (offset + shift).rem_euclid(26) as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caesar_known_values() {
        assert_eq!(caesar("abc XYZ", 3), "def ABC");
        assert_eq!(caesar("def ABC", -3), "abc XYZ");
    }

    #[test]
    fn caesar_round_trip_all_shifts() {
        let text = "The quick brown fox, 1999!";
        for shift in 1..=25 {
            let encrypted = caesar(text, shift);
            assert_eq!(caesar(&encrypted, -shift), text, "shift {shift}");
        }
    }

    #[test]
    fn atbash_is_self_inverse() {
        let text = "Attack at Dawn!";
        assert_eq!(atbash("abc"), "zyx");
        assert_eq!(atbash(&atbash(text)), text);
    }

    #[test]
    fn rot13_is_self_inverse() {
        assert_eq!(rot13("Hello"), "Uryyb");
        assert_eq!(rot13(&rot13("Hello, World!")), "Hello, World!");
    }

    #[test]
    fn vigenere_round_trip() {
        let text = "divert troops to east ridge";
        let encrypted = vigenere(text, "lemon", false).unwrap();
        assert_ne!(encrypted, text);
        assert_eq!(vigenere(&encrypted, "lemon", true).unwrap(), text);
    }

    #[test]
    fn vigenere_key_advances_only_on_letters() {
        // "ab cd" con clave "bb" => todas las letras desplazadas 1
        assert_eq!(vigenere("ab cd", "bb", false).unwrap(), "bc de");
    }

    #[test]
    fn vigenere_classic_vector() {
        assert_eq!(vigenere("ATTACKATDAWN", "LEMON", false).unwrap(), "LXFOPVEFRNHR");
    }

    #[test]
    fn vigenere_rejects_bad_keys() {
        assert!(matches!(vigenere("text", "", false), Err(OpError::Validation(_))));
        assert!(matches!(vigenere("text", "k3y", false), Err(OpError::Validation(_))));
    }
}
