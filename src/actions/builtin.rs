//! Built-in actions
//!
//! A small standard toolset: `terminate` to end a run, plus the file
//! inspection actions most document-producing agents start from.

use crate::actions::{Action, ActionArgs, ActionBuilder, ParameterSchema, ParameterType};
use crate::error::{Result, ToolExecutionError};
use anyhow::Context;
use serde_json::Value;
use std::fs;

fn string_arg<'a>(
    args: &'a ActionArgs,
    name: &str,
) -> std::result::Result<&'a str, ToolExecutionError> {
    let value = args
        .get(name)
        .ok_or_else(|| ToolExecutionError::MissingArgument {
            name: name.to_string(),
        })?;
    value.as_str().ok_or_else(|| ToolExecutionError::InvalidArgument {
        name: name.to_string(),
        message: "expected a string".to_string(),
    })
}

/// Terminal action ending the run with a final message for the user
pub fn terminate() -> Result<Action> {
    ActionBuilder::new("terminate", |args| {
        let message = string_arg(args, "message")?;
        Ok(Value::String(message.to_string()))
    })
    .description("Terminates the session and returns the final message to the user.")
    .schema(ParameterSchema::new().required("message", ParameterType::String))
    .terminal()
    .tag("system")
    .build()
}

/// Read a file and return its contents
pub fn read_project_file() -> Result<Action> {
    ActionBuilder::new("read_project_file", |args| {
        let name = string_arg(args, "name")?;
        let contents =
            fs::read_to_string(name).with_context(|| format!("failed to read '{name}'"))?;
        Ok(Value::String(contents))
    })
    .description("Reads a file from the project and returns its contents.")
    .schema(ParameterSchema::new().required("name", ParameterType::String))
    .tags(["file_operations", "read"])
    .build()
}

/// List directory entries, sorted by name. `directory` defaults to `.`
pub fn list_project_files() -> Result<Action> {
    ActionBuilder::new("list_project_files", |args| {
        let directory = match args.get("directory") {
            Some(value) => value.as_str().ok_or(ToolExecutionError::InvalidArgument {
                name: "directory".to_string(),
                message: "expected a string".to_string(),
            })?,
            None => ".",
        };

        let mut entries = Vec::new();
        for entry in
            fs::read_dir(directory).with_context(|| format!("failed to list '{directory}'"))?
        {
            let entry = entry.with_context(|| format!("failed to list '{directory}'"))?;
            entries.push(entry.file_name().to_string_lossy().into_owned());
        }
        entries.sort();

        Ok(Value::Array(entries.into_iter().map(Value::String).collect()))
    })
    .description("Lists the files in a project directory, sorted by name.")
    .schema(ParameterSchema::new().optional("directory", ParameterType::String))
    .tags(["file_operations", "list"])
    .build()
}
