//! Reading task batches for the batch commands.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read a batch from a file, or stdin when the path is `-`.
pub fn read_batch(path: &Path) -> Result<Vec<Value>> {
    let text = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read tasks from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    parse_batch(&text)
}

/// Accept either a bare task array or an object with a `tasks` array.
pub fn parse_batch(text: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(text).context("Input is not valid JSON")?;
    match value {
        Value::Array(tasks) => Ok(tasks),
        Value::Object(mut object) => match object.remove("tasks") {
            Some(Value::Array(tasks)) => Ok(tasks),
            Some(_) => bail!("tasks must be a list"),
            None => bail!("Input object has no \"tasks\" field"),
        },
        _ => bail!("Input must be a task array or an object with a \"tasks\" array"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_bare_array() {
        let tasks = parse_batch(r#"[{"id": "1", "title": "A"}]"#).unwrap();
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_parse_wrapped_array() {
        let tasks = parse_batch(r#"{"tasks": [{"id": "1"}, {"id": "2"}]}"#).unwrap();
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(parse_batch(r#"{"tasks": {"id": "1"}}"#).is_err());
        assert!(parse_batch(r#"{"items": []}"#).is_err());
        assert!(parse_batch("42").is_err());
        assert!(parse_batch("not json").is_err());
    }

    #[test]
    fn test_read_batch_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "1", "title": "A"}}]"#).unwrap();
        file.flush().unwrap();

        let tasks = read_batch(file.path()).unwrap();
        assert_eq!(tasks[0]["id"], "1");
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = read_batch(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
