#![deny(missing_docs)]

//! # Convert Command
//!
//! Loads an OpenAPI document and writes the equivalent GraphQL SDL.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use oas2gql_core::convert_openapi;
use tracing::info;

use crate::error::CliResult;
use crate::source;

/// Arguments for the convert command.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path or `http(s)://` URL of the OpenAPI document (JSON or YAML).
    pub source: String,

    /// Write the SDL to this file instead of stdout.
    #[clap(long, short)]
    pub output: Option<PathBuf>,
}

/// Executes the conversion.
///
/// Skipped operations are reported as warnings; only a document that cannot
/// be loaded or parsed fails the command.
pub fn execute(args: &ConvertArgs) -> CliResult<()> {
    let content = source::load(&args.source)?;
    let schema = convert_openapi(&content)?;
    let sdl = schema.to_sdl();

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &sdl)?;
            info!(
                types = schema.types.len(),
                skipped = schema.skipped.len(),
                "wrote schema to {:?}",
                path
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(sdl.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use tempfile::tempdir;

    const DOC: &str = r#"
openapi: 3.0.0
info: {title: T, version: 1.0.0}
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: '#/components/schemas/Pet'
components:
  schemas:
    Pet:
      type: object
      properties:
        name:
          type: string
"#;

    #[test]
    fn test_execute_writes_sdl() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("openapi.yaml");
        let output = dir.path().join("out/schema.graphql");
        fs::write(&input, DOC).unwrap();

        let args = ConvertArgs {
            source: input.to_string_lossy().to_string(),
            output: Some(output.clone()),
        };
        execute(&args).unwrap();

        let sdl = fs::read_to_string(output).unwrap();
        assert!(sdl.contains("listPets: [Pet]"));
        assert!(sdl.contains("type Pet {"));
    }

    #[test]
    fn test_execute_rejects_invalid_document() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("swagger.yaml");
        fs::write(&input, "swagger: '2.0'\npaths: {}\n").unwrap();

        let args = ConvertArgs {
            source: input.to_string_lossy().to_string(),
            output: None,
        };
        let err = execute(&args).unwrap_err();
        assert!(matches!(err, CliError::App(_)));
    }
}
