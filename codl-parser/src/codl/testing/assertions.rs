//! Fluent assertions for the document model

use crate::codl::ast::{Command, Document, Include, Invoke, Param, Route, Value};

pub fn assert_document(document: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion {
        document,
        context: "document".to_string(),
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        Some(value) if value.is_literal() => format!("literal «{}»", value.text()),
        Some(value) => format!("string {:?}", value.text()),
        None => "nothing".to_string(),
    }
}

fn check_index(context: &str, what: &str, index: usize, len: usize) {
    assert!(
        index < len,
        "{}: {} index {} out of bounds ({} present)",
        context,
        what,
        index,
        len
    );
}

fn expect_string(context: &str, what: &str, actual: Option<&Value>, expected: &str) {
    assert!(
        matches!(actual, Some(Value::String(text)) if text == expected),
        "{}: Expected {} to be string {:?}, but got {}",
        context,
        what,
        expected,
        describe(actual)
    );
}

fn expect_literal(context: &str, what: &str, actual: Option<&Value>, expected: &str) {
    assert!(
        matches!(actual, Some(Value::Literal(text)) if text == expected),
        "{}: Expected {} to be literal «{}», but got {}",
        context,
        what,
        expected,
        describe(actual)
    );
}

fn expect_none(context: &str, what: &str, actual: Option<&Value>) {
    assert!(
        actual.is_none(),
        "{}: Expected no {}, but got {}",
        context,
        what,
        describe(actual)
    );
}

pub struct DocumentAssertion<'a> {
    document: &'a Document,
    context: String,
}

impl<'a> DocumentAssertion<'a> {
    pub fn namespace(self, expected: &str) -> Self {
        assert_eq!(
            self.document.namespace(),
            expected,
            "{}: Expected namespace '{}', but got '{}'",
            self.context,
            expected,
            self.document.namespace()
        );
        self
    }

    pub fn import_count(self, expected: usize) -> Self {
        let actual = self.document.imports().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} imports, found {}",
            self.context, expected, actual
        );
        self
    }

    /// Compare an import by its rendered code, e.g. `"\"foo\""`
    pub fn import(self, index: usize, expected_code: &str) -> Self {
        let imports = self.document.imports();
        check_index(&self.context, "import", index, imports.len());
        let actual = imports[index].to_code();
        assert_eq!(
            actual, expected_code,
            "{}: Expected import[{}] to render as {}, but got {}",
            self.context, index, expected_code, actual
        );
        self
    }

    pub fn route_count(self, expected: usize) -> Self {
        let actual = self.document.routes().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} routes, found {}",
            self.context, expected, actual
        );
        self
    }

    pub fn route<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(RouteAssertion<'a>),
    {
        let routes = self.document.routes();
        check_index(&self.context, "route", index, routes.len());
        assertion(RouteAssertion {
            route: &routes[index],
            context: format!("{}:route[{}]", self.context, index),
        });
        self
    }
}

pub struct RouteAssertion<'a> {
    route: &'a Route,
    context: String,
}

impl<'a> RouteAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        expect_string(&self.context, "name", self.route.name(), expected);
        self
    }

    pub fn no_name(self) -> Self {
        expect_none(&self.context, "name", self.route.name());
        self
    }

    pub fn description(self, expected: &str) -> Self {
        expect_string(&self.context, "description", self.route.description(), expected);
        self
    }

    pub fn no_description(self) -> Self {
        expect_none(&self.context, "description", self.route.description());
        self
    }

    pub fn command_count(self, expected: usize) -> Self {
        let actual = self.route.commands().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} commands, found {}",
            self.context, expected, actual
        );
        self
    }

    pub fn command<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(CommandAssertion<'a>),
    {
        let commands = self.route.commands();
        check_index(&self.context, "command", index, commands.len());
        assertion(CommandAssertion {
            command: &commands[index],
            context: format!("{}:command[{}]", self.context, index),
        });
        self
    }
}

pub struct CommandAssertion<'a> {
    command: &'a Command,
    context: String,
}

impl<'a> CommandAssertion<'a> {
    pub fn assert_include(self) -> IncludeAssertion<'a> {
        match self.command {
            Command::Include(include) => IncludeAssertion {
                include,
                context: self.context,
            },
            other => panic!(
                "{}: Expected INCLUDES, found {}",
                self.context,
                other.keyword()
            ),
        }
    }

    pub fn assert_invoke(self) -> InvokeAssertion<'a> {
        match self.command {
            Command::Invoke(invoke) => InvokeAssertion {
                invoke,
                context: self.context,
            },
            other => panic!("{}: Expected DOES, found {}", self.context, other.keyword()),
        }
    }
}

pub struct IncludeAssertion<'a> {
    include: &'a Include,
    context: String,
}

impl IncludeAssertion<'_> {
    pub fn name(self, expected: &str) -> Self {
        expect_string(&self.context, "name", Some(self.include.name()), expected);
        self
    }
}

pub struct InvokeAssertion<'a> {
    invoke: &'a Invoke,
    context: String,
}

impl<'a> InvokeAssertion<'a> {
    /// Handlers are always literal code, whichever way they were written
    pub fn handler(self, expected: &str) -> Self {
        expect_literal(&self.context, "handler", Some(self.invoke.handler()), expected);
        self
    }

    pub fn display_name(self, expected: &str) -> Self {
        expect_string(&self.context, "display name", self.invoke.name(), expected);
        self
    }

    pub fn no_display_name(self) -> Self {
        expect_none(&self.context, "display name", self.invoke.name());
        self
    }

    pub fn param_count(self, expected: usize) -> Self {
        let actual = self.invoke.params().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} params, found {}",
            self.context, expected, actual
        );
        self
    }

    pub fn param<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ParamAssertion<'a>),
    {
        let params = self.invoke.params();
        check_index(&self.context, "param", index, params.len());
        assertion(ParamAssertion {
            param: &params[index],
            context: format!("{}:param[{}]", self.context, index),
        });
        self
    }
}

pub struct ParamAssertion<'a> {
    param: &'a Param,
    context: String,
}

impl ParamAssertion<'_> {
    pub fn name(self, expected: &str) -> Self {
        expect_string(&self.context, "name", Some(self.param.name()), expected);
        self
    }

    pub fn default_string(self, expected: &str) -> Self {
        expect_string(&self.context, "default", self.param.default_value(), expected);
        self
    }

    pub fn default_literal(self, expected: &str) -> Self {
        expect_literal(&self.context, "default", self.param.default_value(), expected);
        self
    }

    pub fn no_default(self) -> Self {
        expect_none(&self.context, "default", self.param.default_value());
        self
    }

    pub fn sources(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.param.sources().iter().map(Value::text).collect();
        assert_eq!(
            actual, expected,
            "{}: Expected sources {:?}, but got {:?}",
            self.context, expected, actual
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codl::parsing::{parse_str, ParseOptions};

    fn sample() -> Document {
        parse_str(
            "IMPORT a\nROUTE r d DOES «h» USING p FROM x",
            "ns",
            ParseOptions::default(),
        )
        .expect("parse failed")
    }

    #[test]
    fn test_passing_chain() {
        let doc = sample();
        assert_document(&doc)
            .namespace("ns")
            .import_count(1)
            .route(0, |route| {
                route.name("r").description("d").command(0, |c| {
                    c.assert_invoke().handler("h").param(0, |p| {
                        p.name("p").no_default().sources(&["x"]);
                    });
                });
            });
    }

    #[test]
    #[should_panic(expected = "document:route[0]:command[0]: Expected INCLUDES, found DOES")]
    fn test_failure_names_the_path() {
        let doc = sample();
        assert_document(&doc).route(0, |route| {
            route.command(0, |c| {
                c.assert_include();
            });
        });
    }

    #[test]
    #[should_panic(expected = "route index 3 out of bounds")]
    fn test_index_out_of_bounds() {
        let doc = sample();
        assert_document(&doc).route(3, |_| {});
    }
}
