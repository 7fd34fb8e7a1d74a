//! Testing utilities for parsed documents
//!
//!     Tests over the parser should not walk the [Document](crate::codl::ast::Document)
//!     by hand. The model is small, but manual walks are verbose, tend to stop at counts,
//!     and break everywhere the moment a field moves. Use [assert_document] instead:
//!
//!     ```rust,ignore
//!     use crate::codl::testing::assert_document;
//!
//!     let doc = parse_str(r#"ROUTE matt "Butcher" DOES «foo.Bar» USING p"#, "ns", options)?;
//!
//!     assert_document(&doc).route_count(1).route(0, |route| {
//!         route.name("matt").description("Butcher").command(0, |command| {
//!             command.assert_invoke().handler("foo.Bar").param(0, |param| {
//!                 param.name("p").no_default();
//!             });
//!         });
//!     });
//!     ```
//!
//!     Every assertion carries a context path (`document:route[0]:command[1]`), so a
//!     failure deep in a nested closure still says where it happened.
//!
//! Sample Sources
//!
//!     Whole documents used by more than one test live in `tests/fixtures/*.codl`. Short
//!     one-line sources are fine inline, the grammar is small enough to get right by eye.

mod assertions;

pub use assertions::{
    assert_document, CommandAssertion, DocumentAssertion, IncludeAssertion, InvokeAssertion,
    ParamAssertion, RouteAssertion,
};
