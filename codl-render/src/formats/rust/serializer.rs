use super::function_name;
use codl_parser::{Command, Document, Include, Invoke, Param, Route, Value};
use tracing::debug;

pub(super) const HEADER: &str = "// This file is auto-generated by codl. Do not edit.";

const ROUTE_INDENT: usize = 1;
const COMMAND_INDENT: usize = 2;
const PARAM_INDENT: usize = 3;

/// Single pass writer from a [Document] to Rust source
pub(super) struct RustSerializer<'a> {
    registry_path: &'a str,
    output: String,
}

impl<'a> RustSerializer<'a> {
    pub fn new(registry_path: &'a str) -> Self {
        Self {
            registry_path,
            output: String::new(),
        }
    }

    pub fn render(mut self, doc: &Document) -> String {
        self.line(0, HEADER);
        self.output.push('\n');

        let mut uses = Vec::new();
        if self.registry_path.contains("::") {
            uses.push(self.registry_path.to_string());
        }
        let (paths, others): (Vec<&Value>, Vec<&Value>) = doc
            .imports()
            .iter()
            .partition(|import| !import.is_literal() && is_use_path(import.text()));
        uses.extend(paths.iter().map(|import| import.text().to_string()));
        for path in &uses {
            self.line(0, &format!("use {};", path));
        }
        if !uses.is_empty() {
            self.output.push('\n');
        }

        if !others.is_empty() {
            let list: Vec<String> = others.iter().map(|v| v.to_code().into_owned()).collect();
            self.line(
                0,
                &format!("pub const IMPORTS: &[&str] = &[{}];", list.join(", ")),
            );
            self.output.push('\n');
        }

        self.line(
            0,
            &format!(
                "pub fn {}(reg: &mut {}) {{",
                function_name(doc.namespace()),
                self.registry_type()
            ),
        );
        for route in doc.routes() {
            self.route(route);
        }
        self.line(0, "}");

        debug!(
            namespace = doc.namespace(),
            routes = doc.routes().len(),
            bytes = self.output.len(),
            "rendered rust"
        );
        self.output
    }

    fn registry_type(&self) -> &'a str {
        self.registry_path
            .rsplit("::")
            .next()
            .unwrap_or(self.registry_path)
    }

    fn route(&mut self, route: &Route) {
        let mut lines = vec![(
            ROUTE_INDENT,
            format!(
                "reg.route({}, {})",
                code_or_empty(route.name()),
                code_or_empty(route.description())
            ),
        )];

        for command in route.commands() {
            match command {
                Command::Include(include) => lines.push((COMMAND_INDENT, includes(include))),
                Command::Invoke(invoke) => {
                    lines.push((COMMAND_INDENT, does(invoke)));
                    lines.extend(invoke.params().iter().map(|p| (PARAM_INDENT, using(p))));
                }
            }
        }

        if let Some((_, last)) = lines.last_mut() {
            last.push(';');
        }
        for (depth, text) in &lines {
            self.line(*depth, text);
        }
    }

    fn line(&mut self, depth: usize, text: &str) {
        self.output.push_str(&"    ".repeat(depth));
        self.output.push_str(text);
        self.output.push('\n');
    }
}

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "do", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "macro", "match", "mod",
    "move", "mut", "pub", "ref", "return", "static", "struct", "trait", "true", "try", "type",
    "unsafe", "use", "where", "while", "yield",
];

/// Whether `text` can follow `use` as it is: `::`-separated identifiers, optionally
/// ending in a glob. `crate`, `self` and `super` count as identifiers.
pub(super) fn is_use_path(text: &str) -> bool {
    let segments: Vec<&str> = text.split("::").collect();
    let last = segments.len() - 1;
    segments.iter().enumerate().all(|(i, segment)| {
        if *segment == "*" {
            return i == last && i > 0;
        }
        let mut chars = segment.chars();
        let starts_ok = matches!(chars.next(), Some(ch) if ch.is_ascii_alphabetic() || ch == '_');
        starts_ok
            && *segment != "_"
            && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            && !KEYWORDS.contains(segment)
    })
}

fn code_or_empty(value: Option<&Value>) -> String {
    value
        .map(|v| v.to_code().into_owned())
        .unwrap_or_else(|| "\"\"".to_string())
}

fn includes(include: &Include) -> String {
    format!(".includes({})", include.name().to_code())
}

fn does(invoke: &Invoke) -> String {
    format!(
        ".does({}, {})",
        invoke.handler().to_code(),
        code_or_empty(invoke.name())
    )
}

fn using(param: &Param) -> String {
    let mut call = format!(".using({})", param.name().to_code());
    if let Some(default) = param.default_value() {
        call.push_str(&format!(".with_default({})", default.to_code()));
    }
    for source in param.sources() {
        call.push_str(&format!(".from({})", source.to_code()));
    }
    call
}
