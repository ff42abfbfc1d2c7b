//! Static type analysis of name-resolved C-- programs.
//!
//! `check` computes a `DataType` for every declaration, statement and
//! expression of a program, reporting each violated typing rule once. An
//! ill-typed node gets `DataType::Error`, which its ancestors absorb without
//! reporting again.
#![warn(
    clippy::print_stdout,
    clippy::unimplemented,
    clippy::doc_markdown,
    clippy::items_after_statements,
    clippy::match_same_arms,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::use_self,
    clippy::use_debug
)]

pub mod checker;
mod expr_type_checker;
pub mod function_body_type_checker;
pub mod type_analysis;
pub mod type_error;
pub mod type_system;

pub use self::{
    checker::check,
    function_body_type_checker::FunctionContext,
    type_analysis::{NodeRef, TypeAnalysis, TypeTable},
    type_error::{TypeError, TypeErrorKind},
    type_system::{BasicKind, DataType, FnType},
};

/// Prints the phase timings recorded so far. Set `MEASURE_STDERR` to get a
/// table on stderr, or `MEASURE_JSON=<path>` for a json dump. `run` records
/// its own timing but never prints it.
pub use compiler_shared::timing::print as report_timings;

use compiler_shared::{context::Context, timed_scope};
use failure::Fail;

#[derive(Debug, Fail, PartialEq, Eq)]
pub enum TypeCheckError {
    #[fail(display = "name analysis failed, type analysis not attempted")]
    NameAnalysisFailed,
    #[fail(display = "type analysis failed with {} errors", errors)]
    TypeAnalysisFailed { errors: usize },
}

/// Type analysis as a compiler phase: only runs on programs that passed name
/// analysis, and only hands out the type table of well-typed programs.
///
/// The phase is measured as `type analysis`; call `report_timings` once the
/// compiler is done to output the measurements.
pub fn run<'ast>(
    program: &'ast ast::Program,
    context: &Context,
) -> Result<TypeAnalysis<'ast>, TypeCheckError> {
    if context.diagnostics.errored() {
        log::info!("skipping type analysis, earlier phases reported errors");
        return Err(TypeCheckError::NameAnalysisFailed);
    }

    timed_scope!("type analysis");

    let analysis = check(program, context);
    if analysis.is_well_typed() {
        Ok(analysis)
    } else {
        Err(TypeCheckError::TypeAnalysisFailed {
            errors: context.diagnostics.count(diagnostics::MessageLevel::Error),
        })
    }
}
