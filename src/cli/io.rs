//! JSON I/O for the CLI
//!
//! Input is one JSON object on stdin, output one JSON object per line on
//! stdout.

use std::io::{self, Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::{CliError, CliResult};

/// Read one JSON document from stdin
pub fn read_request<T: DeserializeOwned>() -> CliResult<T> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    parse_request(&input)
}

pub(crate) fn parse_request<T: DeserializeOwned>(input: &str) -> CliResult<T> {
    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(serde_json::from_str(input.trim())?)
}

/// Write one JSON line to stdout
pub fn write_response<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Action, QueryRequest};

    #[test]
    fn test_parse_request() {
        let request: QueryRequest =
            parse_request(r#"{"table": "app_users", "action": "select", "limit": 2}"#).unwrap();
        assert_eq!(request.action, Some(Action::Select));
        assert_eq!(request.limit, Some(2));
    }

    #[test]
    fn test_parse_empty_input() {
        let err = parse_request::<QueryRequest>("  \n").unwrap_err();
        assert_eq!(err.code_str(), "STAFFBOARD_CLI_IO_ERROR");
    }
}
