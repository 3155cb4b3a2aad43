use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read blueprint text from a file, or stdin for "-".
pub fn load_blueprint(path: &Path) -> Result<String, String> {
    if path.as_os_str() == "-" {
        return load_stdin();
    }
    if path.is_dir() {
        return Err(format!(
            "'{}' is a directory, expected a blueprint file",
            path.display()
        ));
    }

    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    if text.trim().is_empty() {
        return Err(format!("blueprint '{}' is empty", path.display()));
    }
    Ok(text)
}

fn load_stdin() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(buf)
}
