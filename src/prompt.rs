use anyhow::{Result, bail};
use chrono::NaiveDate;
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Line-oriented operator prompts. Invalid answers are asked again;
/// running out of input is an error.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Shows `prompt` and returns the answer without its line ending.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed");
        }
        let answer = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(answer);
        Ok(line)
    }

    pub fn int(&mut self, name: &str) -> Result<i32> {
        loop {
            if let Ok(val) = self.ask(&format!("Enter {name}: "))?.trim().parse() {
                return Ok(val);
            }
        }
    }

    pub fn score(&mut self, name: &str) -> Result<i32> {
        loop {
            let val = self.int(name)?;
            if val >= 0 {
                return Ok(val);
            }
        }
    }

    /// Length bounds count characters, both inclusive.
    pub fn string(&mut self, name: &str, min: usize, max: usize) -> Result<String> {
        loop {
            let val = self.ask(&format!("Enter {name}: "))?;
            let len = val.chars().count();
            if (min..=max).contains(&len) {
                return Ok(val);
            }
        }
    }

    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            match self.ask(&format!("{question}? (y/n): "))?.as_str() {
                "y" | "Y" | "yes" => return Ok(true),
                "n" | "N" | "no" => return Ok(false),
                _ => {}
            }
        }
    }

    /// Numbered menu; returns the zero-based index of the pick.
    pub fn choose<S: AsRef<str>>(&mut self, options: &[S]) -> Result<usize> {
        if options.is_empty() {
            bail!("nothing to choose from");
        }
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "[{}] {}", i + 1, option.as_ref())?;
        }
        loop {
            if let Ok(choice) = self.ask("Enter choice: ")?.trim().parse::<usize>() {
                if (1..=options.len()).contains(&choice) {
                    return Ok(choice - 1);
                }
            }
        }
    }

    pub fn date(&mut self) -> Result<NaiveDate> {
        loop {
            if let Some(date) = parse_date(&self.ask("Enter date: ")?) {
                return Ok(date);
            }
        }
    }
}

/// `YYYY-M-D`, month and day with one or two digits.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let digits = |p: &str, lo: usize, hi: usize| {
        (lo..=hi).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(year, 4, 4) || !digits(month, 1, 2) || !digits(day, 1, 2) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
