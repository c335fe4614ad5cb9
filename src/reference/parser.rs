//! Parser for the flat function reference.
//!
//! `###` headings open modules and `####` headings open functions. Inside a
//! function, bold labels (`**Parameters**:`, `**Returns**:`, ...) switch the
//! field that following lines belong to, and fenced blocks become examples.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::sections::{is_fence, parse_heading};
use crate::models::reference::{Example, FunctionRecord, ModuleRecord, Param};
use crate::reference::subsystem;

static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\*([A-Za-z ]+?):?\*\*:?[ \t]*(.*)$").expect("label regex")
});
static ARITY_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_@:]*)\s*/\s*(\d+)").expect("arity heading regex")
});
static CALL_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_@:]*)\s*\((.*)\)").expect("call heading regex")
});
static PARAM_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^`?([^`:(\s]+)`?\s*(?:\(([^)]*)\))?\s*(?:[:\-–]\s*(.*))?$")
        .expect("param item regex")
});

/// Which part of a function entry the current line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Description,
    Params,
    Returns,
    Related,
    Notes,
    Examples,
}

impl Field {
    fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "description" | "summary" => Some(Self::Description),
            "parameters" | "params" | "arguments" => Some(Self::Params),
            "returns" | "return value" | "return" => Some(Self::Returns),
            "related functions" | "related" | "see also" => Some(Self::Related),
            "usage notes" | "notes" | "usage" => Some(Self::Notes),
            "example" | "examples" => Some(Self::Examples),
            _ => None,
        }
    }
}

/// Parse a function reference into modules, in source order.
#[must_use]
pub fn parse_reference(source: &str) -> Vec<ModuleRecord> {
    let mut modules: Vec<ModuleRecord> = Vec::new();
    let mut module: Option<ModuleDraft> = None;
    let mut function: Option<(String, Vec<&str>)> = None;
    let mut in_fence = false;

    for line in source.lines() {
        if is_fence(line) {
            in_fence = !in_fence;
        } else if !in_fence {
            if let Some((level, text)) = parse_heading(line) {
                if level <= 4 {
                    if let (Some(m), Some((heading, body))) = (module.as_mut(), function.take()) {
                        m.functions.push(parse_function(&heading, &body));
                    }
                }
                match level {
                    4 => {
                        if module.is_some() {
                            function = Some((text.to_string(), Vec::new()));
                        } else {
                            tracing::debug!(heading = text, "function outside any module, skipped");
                        }
                        continue;
                    }
                    3 => {
                        if let Some(done) = module.take() {
                            modules.push(done.finish());
                        }
                        module = Some(ModuleDraft::new(normalize_module_name(text)));
                        continue;
                    }
                    1 | 2 => {
                        if let Some(done) = module.take() {
                            modules.push(done.finish());
                        }
                        continue;
                    }
                    _ => {}
                }
            }
        }

        if let Some((_, body)) = function.as_mut() {
            body.push(line);
        } else if let Some(m) = module.as_mut() {
            if m.functions.is_empty() {
                m.description.push(line);
            }
        }
    }

    if let (Some(m), Some((heading, body))) = (module.as_mut(), function.take()) {
        m.functions.push(parse_function(&heading, &body));
    }
    if let Some(done) = module.take() {
        modules.push(done.finish());
    }
    modules
}

struct ModuleDraft<'a> {
    name: String,
    description: Vec<&'a str>,
    functions: Vec<FunctionRecord>,
}

impl<'a> ModuleDraft<'a> {
    fn new(name: String) -> Self {
        Self {
            name,
            description: Vec::new(),
            functions: Vec::new(),
        }
    }

    fn finish(self) -> ModuleRecord {
        let subsystem = subsystem::classify(&self.name).to_string();
        ModuleRecord {
            description: self.description.join("\n").trim().to_string(),
            subsystem,
            name: self.name,
            functions: self.functions,
        }
    }
}

/// `Module: hb_ao`, `` `hb_ao.erl` `` and `hb_ao - notes` all become `hb_ao`.
#[must_use]
pub fn normalize_module_name(heading: &str) -> String {
    let text = heading.replace('`', "");
    let text = text.trim();
    let text = match text.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("module:") => text[7..].trim(),
        _ => text,
    };
    let token = text.split_whitespace().next().unwrap_or_default();
    token.trim_end_matches(".erl").to_string()
}

/// Split a function heading into name and arity.
#[must_use]
pub fn parse_signature(heading: &str) -> (String, Option<u32>) {
    let text = heading.replace('`', "");
    let text = text.trim();
    let unqualified = |name: &str| name.rsplit(':').next().unwrap_or(name).to_string();

    if let Some(caps) = ARITY_HEADING.captures(text) {
        return (unqualified(&caps[1]), caps[2].parse().ok());
    }
    if let Some(caps) = CALL_HEADING.captures(text) {
        let args = caps[2].split(',').filter(|a| !a.trim().is_empty()).count();
        return (unqualified(&caps[1]), u32::try_from(args).ok());
    }
    let name = text.split_whitespace().next().unwrap_or_default();
    (unqualified(name), None)
}

fn parse_function(heading: &str, body: &[&str]) -> FunctionRecord {
    let (function_name, arity) = parse_signature(heading);
    let mut record = FunctionRecord {
        function_name,
        arity,
        signature: heading.replace('`', "").trim().to_string(),
        ..Default::default()
    };

    let mut field = Field::Description;
    let mut description = Vec::new();
    let mut returns = Vec::new();
    let mut notes = Vec::new();
    let mut fence: Option<(String, Vec<&str>)> = None;

    for &line in body {
        if let Some((language, code)) = fence.as_mut() {
            if is_fence(line) {
                record.examples.push(Example {
                    language: std::mem::take(language),
                    code: code.join("\n"),
                });
                fence = None;
            } else {
                code.push(line);
            }
            continue;
        }
        if is_fence(line) {
            let info = line.trim_start().trim_start_matches(['`', '~']).trim();
            fence = Some((info.to_string(), Vec::new()));
            continue;
        }

        let trimmed = line.trim();
        if let Some(caps) = LABEL.captures(trimmed) {
            if let Some(next) = Field::from_label(&caps[1]) {
                field = next;
                let rest = caps.get(2).map_or("", |m| m.as_str()).trim();
                if !rest.is_empty() {
                    match field {
                        Field::Description => description.push(rest),
                        Field::Returns => returns.push(rest),
                        Field::Notes => notes.push(rest),
                        Field::Related => record.related_functions.extend(split_related(rest)),
                        Field::Params | Field::Examples => {}
                    }
                }
                continue;
            }
        }

        match field {
            Field::Description => description.push(line),
            Field::Returns => returns.push(line),
            Field::Notes => notes.push(line),
            Field::Params => {
                if let Some(item) = bullet_item(trimmed) {
                    record.params.push(parse_param(item));
                } else if !trimmed.is_empty() {
                    if let Some(last) = record.params.last_mut() {
                        if !last.description.is_empty() {
                            last.description.push(' ');
                        }
                        last.description.push_str(trimmed);
                    }
                }
            }
            Field::Related => {
                if let Some(item) = bullet_item(trimmed) {
                    record.related_functions.push(related_name(item));
                } else if !trimmed.is_empty() {
                    record.related_functions.extend(split_related(trimmed));
                }
            }
            Field::Examples => {}
        }
    }

    if let Some((language, code)) = fence {
        record.examples.push(Example {
            language,
            code: code.join("\n"),
        });
    }

    record.description = description.join("\n").trim().to_string();
    record.returns = returns.join("\n").trim().to_string();
    record.usage_notes = notes.join("\n").trim().to_string();
    record
}

fn bullet_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim)
}

fn parse_param(item: &str) -> Param {
    match PARAM_ITEM.captures(item) {
        Some(caps) => Param {
            name: caps[1].to_string(),
            ty: caps
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .filter(|t| !t.is_empty()),
            description: caps.get(3).map_or("", |m| m.as_str()).trim().to_string(),
        },
        None => Param {
            name: item.to_string(),
            ty: None,
            description: String::new(),
        },
    }
}

/// Name of a related-function bullet: the first backticked span, or the
/// text before any ` - ` explanation.
fn related_name(item: &str) -> String {
    if let Some(start) = item.find('`') {
        if let Some(len) = item[start + 1..].find('`') {
            return item[start + 1..start + 1 + len].to_string();
        }
    }
    item.split(" - ")
        .next()
        .unwrap_or(item)
        .trim()
        .trim_end_matches(['.', ','])
        .to_string()
}

fn split_related(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.replace('`', "").trim().trim_end_matches('.').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
