use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Smallest and largest numbers accepted as a CPF.
pub const CPF_MIN: u64 = 111_111_111;
pub const CPF_MAX: u64 = 99_999_999_999;

/// Brazilian individual taxpayer number, the patient's unique document.
///
/// Stored as the plain 11-digit number (leading zeros dropped), so the
/// natural ordering is the numeric one used by the document listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cpf(u64);

impl Cpf {
    pub const fn new(number: u64) -> Self {
        Self(number)
    }

    /// Builds a CPF from its 9 base digits, appending both check digits.
    pub fn from_base(base: u64) -> Self {
        let base = base % 1_000_000_000;
        let first = check_digit(base, 11);
        let second = check_digit(base * 10 + first, 12);
        Self(base * 100 + first * 10 + second)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Modulo-11 verification of the two trailing check digits.
    pub fn has_valid_checksum(&self) -> bool {
        let number = self.0;
        if !(CPF_MIN..=CPF_MAX).contains(&number) {
            return false;
        }

        let first = check_digit(number / 100, 11);
        let second = check_digit(number / 10, 12);

        first == (number % 100) / 10 && second == number % 10
    }

    /// `999.999.999-99`, or the bare number when the checksum fails.
    pub fn formatted(&self) -> String {
        if !self.has_valid_checksum() {
            return self.0.to_string();
        }

        let digits = format!("{:011}", self.0);
        format!(
            "{}.{}.{}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..11]
        )
    }
}

// Weights run from 2 on the least significant digit up to `max_weight`.
fn check_digit(mut digits: u64, max_weight: u64) -> u64 {
    let mut sum = 0;
    for weight in 2..=max_weight {
        sum += (digits % 10) * weight;
        digits /= 10;
    }

    let digit = 11 - sum % 11;
    if digit > 9 {
        0
    } else {
        digit
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl From<u64> for Cpf {
    fn from(number: u64) -> Self {
        Self(number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCpfError {
    #[error("CPF is empty")]
    Empty,

    #[error("CPF contains invalid character '{0}'")]
    InvalidCharacter(char),

    #[error("CPF has {0} digits, expected at most 11")]
    TooManyDigits(usize),
}

impl FromStr for Cpf {
    type Err = ParseCpfError;

    /// Accepts bare digits or the punctuated `999.999.999-99` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut digits = String::with_capacity(11);
        for c in s.trim().chars() {
            match c {
                '0'..='9' => digits.push(c),
                '.' | '-' => {}
                other => return Err(ParseCpfError::InvalidCharacter(other)),
            }
        }

        if digits.is_empty() {
            return Err(ParseCpfError::Empty);
        }
        if digits.len() > 11 {
            return Err(ParseCpfError::TooManyDigits(digits.len()));
        }

        digits
            .parse::<u64>()
            .map(Cpf)
            .map_err(|_| ParseCpfError::Empty)
    }
}

/// Arena key of an appointment in the clinic calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(Uuid);

impl AppointmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AppointmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn known_cpf_passes_checksum() {
        assert!(Cpf::new(12345678909).has_valid_checksum());
        assert!(!Cpf::new(12345678900).has_valid_checksum());
    }

    #[test]
    fn from_base_appends_check_digits() {
        assert_eq!(Cpf::from_base(123456789), Cpf::new(12345678909));
        for base in [111444777, 529982247, 987654321, 100000001] {
            assert!(Cpf::from_base(base).has_valid_checksum(), "base {}", base);
        }
    }

    #[test]
    fn numbers_outside_range_are_invalid() {
        assert!(!Cpf::new(0).has_valid_checksum());
        assert!(!Cpf::new(CPF_MIN - 1).has_valid_checksum());
        assert!(!Cpf::new(CPF_MAX + 1).has_valid_checksum());
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(Cpf::new(12345678909).to_string(), "123.456.789-09");

        let short = Cpf::from_base(1234567);
        assert!(short.to_string().starts_with("001.234.567-"));

        assert_eq!(Cpf::new(12345678900).to_string(), "12345678900");
    }

    #[test]
    fn parses_bare_and_punctuated_forms() {
        assert_eq!("12345678909".parse::<Cpf>(), Ok(Cpf::new(12345678909)));
        assert_eq!("123.456.789-09".parse::<Cpf>(), Ok(Cpf::new(12345678909)));
        assert_matches!("".parse::<Cpf>(), Err(ParseCpfError::Empty));
        assert_matches!("123a".parse::<Cpf>(), Err(ParseCpfError::InvalidCharacter('a')));
        assert_matches!("123456789012".parse::<Cpf>(), Err(ParseCpfError::TooManyDigits(12)));
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&Cpf::new(12345678909)).unwrap();
        assert_eq!(json, "12345678909");
    }
}
