// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML text for the guide's configuration snippets.
//!
//! Home Assistant parses its configuration as YAML 1.1, where bare `ON`,
//! `OFF`, `yes` and `no` are booleans. Every string is therefore written as
//! a JSON string literal (valid YAML double-quoted scalar), while numbers,
//! booleans and null stay bare:
//!
//! ```text
//! switch:
//!   - platform: "mqtt"
//!     payload_on: "ON"
//!     json_attributes:
//!       - "linkquality"
//! ```
//!
//! Nesting adds two spaces per level. A mapping inside a sequence starts on
//! the dash line. A key holding a non-empty collection keeps its trailing
//! space before the line break.

use crate::error::Result;
use serde_yaml::{Mapping, Number, Value};

const INDENT: &str = "  ";

/// Render `{ <key>: [payload] }` as one snippet, newline terminated.
pub fn keyed_sequence(key: &str, items: &[Value]) -> Result<String> {
    let mut out = format!("{key}:");
    write_sequence(&mut out, items, 0)?;
    out.push('\n');
    Ok(out)
}

fn write_value(out: &mut String, value: &Value, depth: usize) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&number_text(n)),
        Value::String(s) => out.push_str(&serde_json::to_string(s)?),
        Value::Sequence(items) => write_sequence(out, items, depth)?,
        Value::Mapping(map) => write_mapping(out, map, depth)?,
        Value::Tagged(tagged) => write_value(out, &tagged.value, depth)?,
    }
    Ok(())
}

fn write_sequence(out: &mut String, items: &[Value], depth: usize) -> Result<()> {
    if items.is_empty() {
        out.push_str("[]");
        return Ok(());
    }

    let item_depth = depth + 1;
    for item in items {
        out.push('\n');
        push_indent(out, item_depth);
        out.push_str("- ");

        let mut rendered = String::new();
        write_value(&mut rendered, item, item_depth)?;

        // A mapping item starts on the dash line instead of the next one.
        let mut lead = String::from("\n");
        push_indent(&mut lead, item_depth + 1);
        match rendered.strip_prefix(lead.as_str()) {
            Some(inline) if matches!(item, Value::Mapping(_)) => out.push_str(inline),
            _ => out.push_str(&rendered),
        }
    }
    Ok(())
}

fn write_mapping(out: &mut String, map: &Mapping, depth: usize) -> Result<()> {
    if map.is_empty() {
        out.push_str("{}");
        return Ok(());
    }

    let key_depth = depth + 1;
    for (key, value) in map {
        out.push('\n');
        push_indent(out, key_depth);
        out.push_str(&key_text(key));
        out.push_str(": ");
        write_value(out, value, key_depth)?;
    }
    Ok(())
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Keys are written bare.
fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Tagged(tagged) => key_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => format!("{key:?}"),
    }
}

/// Numbers the way the catalog's JSON tooling prints them: integral floats
/// lose their fraction, non-finite values use their JavaScript names.
fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_nan() => "NaN".to_string(),
        Some(f) if f.is_infinite() => {
            if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
        }
        #[allow(clippy::cast_possible_truncation)]
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
