//! Key/value rewriting of `.env` files

use anyhow::{Context, Result};
use log::{debug, info};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

const KEY_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";
const LINE_PATTERN: &str = r"^\s*(?:export\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*=";

/// Fail unless `path` exists and can be written
pub fn ensure_writable(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Environment file not found: {:?}", path))?;
    if !metadata.is_file() || metadata.permissions().readonly() {
        anyhow::bail!(
            "Environment file {:?} is not writable, check its write permission",
            path
        );
    }
    Ok(())
}

/// Read every assignment in an env file. The first definition of a key wins.
pub fn read_env(path: &Path) -> Result<BTreeMap<String, String>> {
    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to open env file: {:?}", path))?;

    let mut values = BTreeMap::new();
    for item in iter {
        let (key, value) = item.with_context(|| format!("Failed to parse env file: {:?}", path))?;
        values.entry(key).or_insert(value);
    }
    Ok(values)
}

/// Set `updates` in the env file at `path`.
///
/// The first line assigning each key is replaced in place; every other line
/// is kept as-is. Keys that do not appear yet are appended.
pub fn modify_env(path: &Path, updates: &[(&str, &str)]) -> Result<()> {
    ensure_writable(path)?;

    let key_re = Regex::new(KEY_PATTERN)?;
    for (key, _) in updates {
        if !key_re.is_match(key) {
            anyhow::bail!("Invalid environment variable name: '{}'", key);
        }
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read env file: {:?}", path))?;
    let rewritten = rewrite(&content, updates)?;

    fs::write(path, rewritten).with_context(|| format!("Failed to write env file: {:?}", path))?;
    info!(
        "Updated {} key(s) in {:?}: {}",
        updates.len(),
        path,
        updates.iter().map(|(k, _)| *k).collect::<Vec<_>>().join(", ")
    );
    Ok(())
}

fn rewrite(content: &str, updates: &[(&str, &str)]) -> Result<String> {
    let line_re = Regex::new(LINE_PATTERN)?;
    let wanted: BTreeMap<&str, &str> = updates.iter().copied().collect();
    let mut done: HashSet<&str> = HashSet::new();
    let mut out = String::with_capacity(content.len() + 64);

    for line in content.split_inclusive('\n') {
        let body = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
        let ending = &line[body.len()..];

        let key = line_re
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());

        match key.and_then(|k| wanted.get_key_value(k)) {
            Some((key, value)) if !done.contains(key) => {
                debug!("Rewriting env key {}", key);
                out.push_str(&assignment(key, value));
                out.push_str(ending);
                done.insert(*key);
            }
            _ => out.push_str(line),
        }
    }

    for (key, value) in updates {
        if done.contains(key) {
            continue;
        }
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        debug!("Appending env key {}", key);
        out.push_str(&assignment(key, value));
        out.push('\n');
        done.insert(*key);
    }

    Ok(out)
}

fn assignment(key: &str, value: &str) -> String {
    format!("{}={}", key, quote(value))
}

fn quote(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\'' | '\\' | '=' | '$'));
    if !needs_quotes {
        return value.to_string();
    }
    // dotenvy expands `$` inside double quotes unless it is escaped
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
        .replace('\n', "\\n");
    format!("\"{}\"", escaped)
}
