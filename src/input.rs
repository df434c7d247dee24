// ABOUTME: Sources of task/target choices and the go-ahead confirmation.
// ABOUTME: CLI values for silent runs, line-based prompts for interactive ones.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::plan::ExecutionPlan;
use crate::types::ALL_KEYWORD;

/// Supplies the user's choices to the deploy command.
///
/// Returned name lists are passed unchanged to [`crate::plan::resolve`];
/// an empty list means "use the configured defaults".
pub trait InputProvider {
    fn select_tasks(&mut self, declared: &[&str], defaults: &[String]) -> Result<Vec<String>>;

    fn select_targets(&mut self, declared: &[&str], defaults: &[String]) -> Result<Vec<String>>;

    /// Whether to go ahead with `plan`.
    fn confirm(&mut self, plan: &ExecutionPlan) -> Result<bool>;
}

/// Non-interactive input: the values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ProvidedInput {
    pub tasks: Vec<String>,
    pub targets: Vec<String>,
}

impl ProvidedInput {
    pub fn new(tasks: Vec<String>, targets: Vec<String>) -> Self {
        Self { tasks, targets }
    }
}

impl InputProvider for ProvidedInput {
    fn select_tasks(&mut self, _declared: &[&str], _defaults: &[String]) -> Result<Vec<String>> {
        Ok(self.tasks.clone())
    }

    fn select_targets(&mut self, _declared: &[&str], _defaults: &[String]) -> Result<Vec<String>> {
        Ok(self.targets.clone())
    }

    fn confirm(&mut self, _plan: &ExecutionPlan) -> Result<bool> {
        Ok(true)
    }
}

/// Interactive input read line by line.
///
/// Names already given on the command line are used without asking. An
/// empty answer or end of input picks the defaults and confirms.
pub struct PromptInput<R, W> {
    reader: R,
    writer: W,
    preset: ProvidedInput,
}

impl<R: BufRead, W: Write> PromptInput<R, W> {
    pub fn new(reader: R, writer: W, preset: ProvidedInput) -> Self {
        Self {
            reader,
            writer,
            preset,
        }
    }

    /// Read one trimmed line; `None` at end of input.
    fn read_answer(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn choose(&mut self, what: &str, declared: &[&str], defaults: &[String]) -> Result<Vec<String>> {
        let default_label = if defaults.is_empty() {
            ALL_KEYWORD.to_string()
        } else {
            defaults.join(" ")
        };

        loop {
            write!(
                self.writer,
                "Enter {what} from following: {ALL_KEYWORD} | {} [{default_label}]: ",
                declared.join(" ")
            )?;
            self.writer.flush()?;

            let Some(answer) = self.read_answer()? else {
                return Ok(Vec::new());
            };

            let names: Vec<String> = answer
                .split([',', ' ', '\t'])
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();

            let unknown: Vec<&str> = names
                .iter()
                .map(String::as_str)
                .filter(|n| *n != ALL_KEYWORD && !declared.contains(n))
                .collect();
            if unknown.is_empty() {
                return Ok(names);
            }

            writeln!(self.writer, "Unknown {what}: {}", unknown.join(", "))?;
        }
    }
}

impl<R: BufRead, W: Write> InputProvider for PromptInput<R, W> {
    fn select_tasks(&mut self, declared: &[&str], defaults: &[String]) -> Result<Vec<String>> {
        if !self.preset.tasks.is_empty() {
            return Ok(self.preset.tasks.clone());
        }
        self.choose("deploy tasks", declared, defaults)
    }

    fn select_targets(&mut self, declared: &[&str], defaults: &[String]) -> Result<Vec<String>> {
        if !self.preset.targets.is_empty() {
            return Ok(self.preset.targets.clone());
        }
        self.choose("deploy targets", declared, defaults)
    }

    fn confirm(&mut self, plan: &ExecutionPlan) -> Result<bool> {
        for cell in plan.iter() {
            writeln!(self.writer, "\t{} → {}", cell.task, cell.target)?;
        }

        loop {
            write!(
                self.writer,
                "Do you agree to start processing {} cell(s) (yes or no)? [yes]: ",
                plan.len()
            )?;
            self.writer.flush()?;

            let Some(answer) = self.read_answer()? else {
                return Ok(true);
            };
            match answer.to_lowercase().as_str() {
                "" | "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => continue,
            }
        }
    }
}
