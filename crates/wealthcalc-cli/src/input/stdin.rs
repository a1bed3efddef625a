use serde_json::Value;
use std::io::{self, Read};

/// Parameters piped on stdin, as JSON or YAML.
///
/// `None` when stdin is a terminal or the pipe is empty, so the caller falls
/// back to flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped(buffer: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(v) => v,
        Err(json_err) => serde_yaml::from_str(trimmed)
            .map_err(|_| format!("stdin is neither JSON nor YAML: {json_err}"))?,
    };
    log::debug!("read {} bytes of parameters from stdin", trimmed.len());
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pipe_falls_back_to_flags() {
        assert!(parse_piped("  \n").unwrap().is_none());
    }

    #[test]
    fn test_yaml_pipe_matches_json_pipe() {
        let json = parse_piped(r#"{"query": "sip or lump sum?"}"#).unwrap();
        let yaml = parse_piped("query: sip or lump sum?\n").unwrap();
        assert_eq!(json, yaml);
    }
}
