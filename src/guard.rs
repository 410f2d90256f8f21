use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;

/// Ask before replacing an existing output file.
///
/// Returns `true` when `path` does not exist or the user answered `y`/`yes`.
pub fn confirm_overwrite<R: BufRead, W: Write>(
    path: &Path,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    confirm(
        &format!("'{}' already exists. Overwrite?", path.display()),
        input,
        output,
    )
}

fn confirm<R: BufRead, W: Write>(message: &str, input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "{} [y/N]: ", message)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim_end_matches(['\r', '\n']).to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
