//! Open frames of the document under construction
//!
//!     The builder never holds a pointer into the finished tree. Instead the innermost
//!     open entities live in a stack of typed frames: the document at the bottom, then at
//!     most one open route, one open command within it and one open param within that.
//!     Each frame owns its own values until it is closed, at which point it is checked
//!     and moved into its parent. Opening a sibling closes the previous one first, so
//!     closing order is always innermost first.

use crate::codl::ast::{Command, Document, Include, Invoke, Param, Position, Route, Value};
use crate::codl::error::GrammarErrorKind;
use tracing::debug;

/// A frame that could not be closed because a required value never arrived
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Unfinished {
    pub kind: GrammarErrorKind,
    pub keyword: &'static str,
    pub position: Position,
}

impl Unfinished {
    fn new(kind: GrammarErrorKind, keyword: &'static str, position: Position) -> Self {
        Self {
            kind,
            keyword,
            position,
        }
    }
}

pub(crate) struct FrameStack {
    document: Document,
    route: Option<RouteFrame>,
}

impl FrameStack {
    pub fn new(namespace: &str) -> Self {
        Self {
            document: Document::new(namespace),
            route: None,
        }
    }

    pub fn push_import(&mut self, value: Value) {
        self.document.imports.push(value);
    }

    pub fn open_route(&mut self) -> Result<(), Unfinished> {
        self.close_route()?;
        self.route = Some(RouteFrame::default());
        Ok(())
    }

    pub fn route(&mut self) -> Option<&mut RouteFrame> {
        self.route.as_mut()
    }

    fn close_route(&mut self) -> Result<(), Unfinished> {
        if let Some(frame) = self.route.take() {
            let route = frame.close()?;
            debug!(
                name = route.name().map(|value| value.text()),
                commands = route.commands().len(),
                "route closed"
            );
            self.document.routes.push(route);
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<Document, Unfinished> {
        self.close_route()?;
        Ok(self.document)
    }
}

#[derive(Default)]
pub(crate) struct RouteFrame {
    route: Route,
    command: Option<CommandFrame>,
}

impl RouteFrame {
    pub fn set_name_or_description(&mut self, value: Value) -> Result<(), GrammarErrorKind> {
        if self.route.name.is_none() {
            self.route.name = Some(value);
        } else if self.route.description.is_none() {
            self.route.description = Some(value);
        } else {
            return Err(GrammarErrorKind::ExtraValue);
        }
        Ok(())
    }

    pub fn open_command(&mut self, frame: CommandFrame) -> Result<(), Unfinished> {
        self.close_command()?;
        self.command = Some(frame);
        Ok(())
    }

    pub fn include(&mut self) -> Option<&mut IncludeFrame> {
        match self.command.as_mut()? {
            CommandFrame::Include(frame) => Some(frame),
            CommandFrame::Invoke(_) => None,
        }
    }

    pub fn invoke(&mut self) -> Option<&mut InvokeFrame> {
        match self.command.as_mut()? {
            CommandFrame::Invoke(frame) => Some(frame),
            CommandFrame::Include(_) => None,
        }
    }

    fn close_command(&mut self) -> Result<(), Unfinished> {
        if let Some(frame) = self.command.take() {
            let command = frame.close()?;
            debug!(command = command.keyword(), "command closed");
            self.route.commands.push(command);
        }
        Ok(())
    }

    fn close(mut self) -> Result<Route, Unfinished> {
        self.close_command()?;
        Ok(self.route)
    }
}

pub(crate) enum CommandFrame {
    Include(IncludeFrame),
    Invoke(InvokeFrame),
}

impl CommandFrame {
    pub fn include(opened_at: Position) -> Self {
        CommandFrame::Include(IncludeFrame {
            name: None,
            opened_at,
        })
    }

    pub fn invoke(opened_at: Position) -> Self {
        CommandFrame::Invoke(InvokeFrame {
            handler: None,
            name: None,
            params: Vec::new(),
            param: None,
            opened_at,
        })
    }

    fn close(self) -> Result<Command, Unfinished> {
        match self {
            CommandFrame::Include(frame) => frame.close().map(Command::Include),
            CommandFrame::Invoke(frame) => frame.close().map(Command::Invoke),
        }
    }
}

pub(crate) struct IncludeFrame {
    name: Option<Value>,
    opened_at: Position,
}

impl IncludeFrame {
    pub fn set_name(&mut self, value: Value) -> Result<(), GrammarErrorKind> {
        if self.name.is_some() {
            return Err(GrammarErrorKind::ExtraValue);
        }
        self.name = Some(value);
        Ok(())
    }

    fn close(self) -> Result<Include, Unfinished> {
        let name = self.name.ok_or_else(|| {
            Unfinished::new(GrammarErrorKind::MissingName, "INCLUDES", self.opened_at)
        })?;
        Ok(Include { name })
    }
}

pub(crate) struct InvokeFrame {
    pub handler: Option<Value>,
    pub name: Option<Value>,
    params: Vec<Param>,
    param: Option<ParamFrame>,
    opened_at: Position,
}

impl InvokeFrame {
    pub fn open_param(&mut self, opened_at: Position) -> Result<(), Unfinished> {
        self.close_param()?;
        self.param = Some(ParamFrame {
            name: None,
            default: None,
            sources: Vec::new(),
            opened_at,
        });
        Ok(())
    }

    pub fn param(&mut self) -> Option<&mut ParamFrame> {
        self.param.as_mut()
    }

    fn close_param(&mut self) -> Result<(), Unfinished> {
        if let Some(frame) = self.param.take() {
            self.params.push(frame.close()?);
        }
        Ok(())
    }

    fn close(mut self) -> Result<Invoke, Unfinished> {
        self.close_param()?;
        let handler = self.handler.ok_or_else(|| {
            Unfinished::new(GrammarErrorKind::MissingHandler, "DOES", self.opened_at)
        })?;
        Ok(Invoke {
            handler,
            name: self.name,
            params: self.params,
        })
    }
}

pub(crate) struct ParamFrame {
    pub name: Option<Value>,
    pub default: Option<Value>,
    sources: Vec<Value>,
    opened_at: Position,
}

impl ParamFrame {
    pub fn push_source(&mut self, value: Value) {
        self.sources.push(value);
    }

    fn close(self) -> Result<Param, Unfinished> {
        let name = self.name.ok_or_else(|| {
            Unfinished::new(GrammarErrorKind::MissingName, "USING", self.opened_at)
        })?;
        Ok(Param {
            name,
            default: self.default,
            sources: self.sources,
        })
    }
}
