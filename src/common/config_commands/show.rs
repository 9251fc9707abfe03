use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write the resolved config path to provided writer.
pub(super) fn path_config_with_writer(path: &Path, output: &mut dyn Write) -> Result<()> {
    writeln!(output, "{}", path.display())?;
    Ok(())
}

/// Stream the config file, or print the built-in defaults when it is missing.
pub(super) fn show_config_with_io(
    path: &Path,
    defaults: &str,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    if path.exists() {
        let mut file = fs::File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        std::io::copy(&mut file, stdout)?;
    } else {
        writeln!(stderr, "No config file found at {}", path.display())?;
        writeln!(
            stderr,
            "Built-in defaults shown below. Create {} to override them.",
            path.display()
        )?;
        stdout.write_all(defaults.as_bytes())?;
    }

    Ok(())
}
