/* Reading operator input from the terminal */

use std::io::{self, BufRead, Write};

/// Prints `prompt` on `output` and reads a single line from `input`.
/// Returns `None` when the input is closed or the line is blank.
pub fn prompt_from<R, W>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let ans = line.trim();
    if ans.is_empty() {
        return Ok(None);
    }

    Ok(Some(ans.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_the_answer() {
        let mut input = "  abc-123 \n".as_bytes();
        let mut output = Vec::new();

        let ans = prompt_from(&mut input, &mut output, "Code: ").unwrap();

        assert_eq!(ans.as_deref(), Some("abc-123"));
        assert_eq!(String::from_utf8(output).unwrap(), "Code: ");
    }

    #[test]
    fn blank_or_closed_input_is_none() {
        let mut output = Vec::new();
        assert_eq!(prompt_from(&mut "   \n".as_bytes(), &mut output, "").unwrap(), None);
        assert_eq!(prompt_from(&mut "".as_bytes(), &mut output, "").unwrap(), None);
    }
}
