//! Console messages and confirmations for the CLI layer.

use ansi_term::Colour;
use std::fmt;
use std::io::{self, BufRead, Write};

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Blue.bold().paint("ℹ"), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Green.bold().paint("✔"), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Yellow.bold().paint("⚠"), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", Colour::Red.bold().paint("✘"), msg);
}

/// Interpret an answer to a `[Y/n]` question: anything but "n"/"no" is yes.
pub fn is_yes_default(answer: &str) -> bool {
    !matches!(answer.trim().to_lowercase().as_str(), "n" | "no")
}

/// Ask a `[Y/n]` question on stdout and read the answer from `input`.
/// End of input counts as the default answer (yes).
pub fn confirm_from<R: BufRead>(question: &str, input: &mut R) -> io::Result<bool> {
    print!("{} [Y/n]: ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_yes_default(&answer))
}

/// `confirm_from` on stdin, short-circuited to yes when `assume_yes` is set.
pub fn confirm(question: &str, assume_yes: bool) -> io::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let stdin = io::stdin();
    let mut lock = stdin.lock();
    confirm_from(question, &mut lock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn default_answer_is_yes() {
        assert!(is_yes_default(""));
        assert!(is_yes_default("y"));
        assert!(is_yes_default("whatever"));
        assert!(!is_yes_default("n"));
        assert!(!is_yes_default(" No \n"));
    }

    #[test]
    fn reads_answer_from_input() {
        let mut no = Cursor::new("n\n");
        assert!(!confirm_from("Pause?", &mut no).unwrap());
        let mut eof = Cursor::new("");
        assert!(confirm_from("Pause?", &mut eof).unwrap());
        assert!(confirm("never asked", true).unwrap());
    }
}
