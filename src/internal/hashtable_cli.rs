//! Interactive text front end for `SortedChainHashTable`.
//!
//! Reads a one-character mode per line from standard input and drives the table through its
//! public operations only.

use std::io::{self, BufRead, Write};

use sorted_chain::SortedChainHashTable;

/// Menu shown before every mode selection
const MODE_PROMPT: &str = "Please enter the mode to operate on the table: (1)Insert (2)Find (3)Erase (4)Clear (5)Print (6)Leave";

/// Operations selectable from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Insert a key-value pair
    Insert,
    /// Look up a key
    Find,
    /// Remove a key
    Erase,
    /// Remove everything
    Clear,
    /// List the table contents
    Print,
    /// Exit the session
    Leave,
}

impl Mode {
    /// Parses a whole input line into a mode
    fn parse(line: &str) -> Option<Self> {
        match line {
            "1" => Some(Self::Insert),
            "2" => Some(Self::Find),
            "3" => Some(Self::Erase),
            "4" => Some(Self::Clear),
            "5" => Some(Self::Print),
            "6" => Some(Self::Leave),
            _ => None,
        }
    }
}

/// One interactive session over a table of integer values
#[derive(Debug)]
struct Session<R, W> {
    /// Source of user input, one answer per line
    input: R,
    /// Destination of prompts and results
    output: W,
    /// The table being operated on
    table: SortedChainHashTable<i64>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session over an empty table
    fn new(input: R, output: W) -> Self {
        Self { input, output, table: SortedChainHashTable::new() }
    }

    /// Reads one line without its line terminator, or `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    /// Reads an integer, re-prompting on empty or non-numeric input
    fn read_number(&mut self, what: &str) -> io::Result<Option<i64>> {
        while let Some(line) = self.read_line()? {
            match line.parse::<i64>() {
                Ok(number) => return Ok(Some(number)),
                Err(_) => writeln!(self.output, "Invalid {what}. Please enter a valid {what}:")?,
            }
        }
        Ok(None)
    }

    /// Runs the menu loop until the user leaves or input ends
    fn run(&mut self) -> io::Result<()> {
        if self.table.is_empty() {
            writeln!(self.output, "The hashtable is currently empty")?;
        }
        writeln!(self.output, "{MODE_PROMPT}")?;

        while let Some(line) = self.read_line()? {
            let Some(mode) = Mode::parse(&line) else {
                writeln!(self.output, "Invalid mode!!")?;
                writeln!(self.output, "{MODE_PROMPT}")?;
                continue;
            };
            if mode == Mode::Leave || !self.apply(mode)? {
                break;
            }
            writeln!(self.output, "{MODE_PROMPT}")?;
        }

        self.output.flush()
    }

    /// Performs one menu operation; returns false if input ended midway
    fn apply(&mut self, mode: Mode) -> io::Result<bool> {
        match mode {
            Mode::Insert => {
                writeln!(self.output, "INSERTION")?;
                writeln!(self.output, "Please enter the key:")?;
                let Some(key) = self.read_number("key")? else { return Ok(false) };
                writeln!(self.output, "Please enter the value:")?;
                let Some(value) = self.read_number("value")? else { return Ok(false) };
                let outcome = if self.table.insert(key, value) { "Succeed" } else { "Fail" };
                writeln!(self.output, "Inserting ({key}, {value})....{outcome}!")?;
            }
            Mode::Find => {
                writeln!(self.output, "FIND")?;
                writeln!(self.output, "Please enter the key:")?;
                let Some(key) = self.read_number("key")? else { return Ok(false) };
                match self.table.find(key) {
                    Some(value) => {
                        writeln!(self.output, "Found the key = {key} with value = {value}")?;
                    }
                    None => writeln!(self.output, "Cannot find key = {key} in the table")?,
                }
            }
            Mode::Erase => {
                writeln!(self.output, "ERASE")?;
                writeln!(self.output, "Please enter the key:")?;
                let Some(key) = self.read_number("key")? else { return Ok(false) };
                self.table.erase(key);
                writeln!(self.output, "Erasing.... Done!")?;
            }
            Mode::Clear => {
                writeln!(self.output, "CLEAR")?;
                self.table.clear();
                writeln!(self.output, "Clearing.... Done!")?;
            }
            Mode::Print => write!(self.output, "{}", self.table)?,
            Mode::Leave => return Ok(false),
        }
        Ok(true)
    }
}

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(stdin.lock(), stdout.lock()).run()
}
