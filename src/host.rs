//! Desktop link host: system browser plus a terminal prompt.

use std::io::{self, BufRead, Write};

use crate::error::HostError;
use crate::links::LinkHost;

/// Opens links with the platform opener and asks for choices on stdin.
#[derive(Debug, Default)]
pub struct SystemHost;

impl LinkHost for SystemHost {
    fn navigate(&self, url: &str) -> Result<(), HostError> {
        tracing::info!(url, "Opening link");
        open::that(url).map_err(|e| HostError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    fn choose(
        &self,
        title: &str,
        cancel: &str,
        options: &[&str],
    ) -> Result<Option<String>, HostError> {
        let stdin = io::stdin();
        let mut stderr = io::stderr();
        prompt(&mut stdin.lock(), &mut stderr, title, cancel, options)
    }
}

/// Numbered menu; `0`, an empty line or end of input cancels.
fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    title: &str,
    cancel: &str,
    options: &[&str],
) -> Result<Option<String>, HostError> {
    writeln!(output, "{title}")?;
    for (i, option) in options.iter().enumerate() {
        writeln!(output, "  {}. {option}", i + 1)?;
    }
    writeln!(output, "  0. {cancel}")?;
    write!(output, "> ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let choice = match line.trim().parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => Some(options[n - 1].to_string()),
        _ => None,
    };
    Ok(choice)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(answer: &str) -> (Option<String>, String) {
        let mut input = answer.as_bytes();
        let mut output = Vec::new();
        let choice = prompt(&mut input, &mut output, "Open link", "Cancel", &["A", "B"]).unwrap();
        (choice, String::from_utf8(output).unwrap())
    }

    #[test]
    fn picks_numbered_option() {
        let (choice, shown) = ask("2\n");
        assert_eq!(choice.as_deref(), Some("B"));
        assert_eq!(shown, "Open link\n  1. A\n  2. B\n  0. Cancel\n> ");
    }

    #[test]
    fn cancel_and_garbage_choose_nothing() {
        assert_eq!(ask("0\n").0, None);
        assert_eq!(ask("7\n").0, None);
        assert_eq!(ask("b\n").0, None);
        assert_eq!(ask("").0, None);
    }
}
