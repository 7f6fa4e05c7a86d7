use std::collections::HashMap;
use anyhow::{anyhow, Result};

use crate::model::task::{Priority, TaskInput};

pub const TASK_KEYS: [&str; 3] = ["priority", "description", "done"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub name: String,
    pub metadata: HashMap<String, String>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut name_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        name_parts.push(arg.as_str());
    }

    ParsedInput {
        name: name_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Builds task fields from `"Title words key:value ..."` tokens.
///
/// With `base` the tokens edit a copy of it: an empty title keeps the old one and
/// only the keys present change.
pub fn parse_task_input(args: &[String], base: Option<TaskInput>) -> Result<TaskInput> {
    let parsed = parse_args(args);
    let mut input = base.unwrap_or_default();

    if !parsed.name.is_empty() {
        input.title = parsed.name;
    }
    if input.title.trim().is_empty() {
        return Err(anyhow!("Task title is required"));
    }

    for (key, value) in parsed.metadata {
        let full_key = expand_key(&key, &TASK_KEYS)?;
        match full_key.as_str() {
            "priority" => {
                input.priority = value.parse::<Priority>().map_err(|e| anyhow!(e))?;
            }
            "description" => input.description = value,
            "done" => input.done = parse_flag(&value)?,
            _ => {}
        }
    }
    Ok(input)
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Ok(true),
        "n" | "no" | "false" | "0" => Ok(false),
        _ => Err(anyhow!("Expected yes/no, got '{}'", value)),
    }
}
