use std::io::{self, BufRead, Write};

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use shared_models::Cpf;
use shared_utils::DocumentValidator;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("input closed")]
    InputClosed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Line-oriented prompts that keep asking until the answer is well formed.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn write_line(&mut self, line: &str) -> Result<(), ConsoleError> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    fn ask(&mut self, label: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn ask_until<T>(
        &mut self,
        label: &str,
        error: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> Result<T, ConsoleError> {
        loop {
            let answer = self.ask(label)?;
            match parse(&answer) {
                Some(value) => return Ok(value),
                None => self.write_line(error)?,
            }
        }
    }

    /// A number between 1 and `options`.
    pub fn read_option(&mut self, options: u32) -> Result<u32, ConsoleError> {
        self.ask_until("Option: ", "Invalid option", |answer| {
            answer
                .parse::<u32>()
                .ok()
                .filter(|option| (1..=options).contains(option))
        })
    }

    pub fn read_cpf(&mut self, validator: &dyn DocumentValidator) -> Result<Cpf, ConsoleError> {
        self.ask_until("CPF: ", "Invalid CPF", |answer| {
            answer.parse::<Cpf>().ok().filter(|cpf| validator.is_valid(*cpf))
        })
    }

    /// Trimmed and upper-cased; must not be empty.
    pub fn read_name(&mut self) -> Result<String, ConsoleError> {
        self.ask_until("Name: ", "Invalid name", |answer| {
            let name = answer.trim().to_uppercase();
            (!name.is_empty()).then_some(name)
        })
    }

    /// `DDMMYYYY`, no earlier than `min` when given.
    pub fn read_date(
        &mut self,
        label: &str,
        error: &str,
        min: Option<NaiveDate>,
    ) -> Result<NaiveDate, ConsoleError> {
        self.ask_until(label, error, |answer| {
            parse_date(answer).filter(|date| min.map_or(true, |min| *date >= min))
        })
    }

    /// `HHMM` on a 24 hour clock.
    pub fn read_time(&mut self, label: &str) -> Result<NaiveTime, ConsoleError> {
        self.ask_until(label, "Invalid time", parse_time)
    }

    /// One of `choices`, case-insensitive; returned upper-cased.
    pub fn read_choice(&mut self, label: &str, error: &str, choices: &str) -> Result<char, ConsoleError> {
        self.ask_until(label, error, |answer| {
            let mut chars = answer.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c.to_ascii_uppercase()).filter(|c| choices.contains(*c)),
                _ => None,
            }
        })
    }
}

fn all_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !all_digits(value, 8) {
        return None;
    }
    let day = value[0..2].parse().ok()?;
    let month = value[2..4].parse().ok()?;
    let year = value[4..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    if !all_digits(value, 4) {
        return None;
    }
    let hour = value[0..2].parse().ok()?;
    let minute = value[2..4].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}
