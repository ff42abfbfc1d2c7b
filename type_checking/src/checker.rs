use crate::{
    function_body_type_checker::{declare, FunctionBodyTypeChecker},
    type_analysis::{TypeAnalysis, TypeTable},
    type_error::TypeError,
    type_system::DataType,
};
use asciifile::{Span, Spanned};
use ast::{Decl, Program};
use compiler_shared::context::Context;
use std::cell::Cell;

/// Types every node of `program` and reports every violated typing rule to
/// the diagnostics of `context`.
///
/// The pass never stops early. Whether it found errors is answered by the
/// returned analysis, independent of what earlier phases reported.
pub fn check<'ast>(program: &'ast Program, context: &Context) -> TypeAnalysis<'ast> {
    let sem_context = SemanticContext::new(context);
    let mut types = TypeTable::new();

    for global in &program.globals {
        match &global.data {
            Decl::Var(var_decl) => declare(&mut types, &var_decl.name),
            Decl::Fn(fn_decl) => {
                FunctionBodyTypeChecker::check_function(fn_decl, &mut types, &sem_context)
            }
        }
        types.set_type(global, DataType::VOID);
    }
    types.set_type(program, DataType::VOID);

    log::info!(
        "type analysis typed {} nodes and found {} errors",
        types.len(),
        sem_context.error_count()
    );

    TypeAnalysis::new(types, sem_context.error_count() == 0)
}

pub struct SemanticContext<'ctx> {
    pub context: &'ctx Context,
    error_count: Cell<usize>,
}

impl<'ctx> SemanticContext<'ctx> {
    pub fn new(context: &'ctx Context) -> SemanticContext<'ctx> {
        SemanticContext {
            context,
            error_count: Cell::new(0),
        }
    }

    pub fn report_error(&self, span: Span, error: TypeError) {
        log::debug!("{:?} at {}", error.kind(), span);
        self.error_count.set(self.error_count.get() + 1);
        self.context.diagnostics.error(Spanned::new(span, error))
    }

    /// Errors reported through this context. Messages emitted by other
    /// phases are not counted.
    pub fn error_count(&self) -> usize {
        self.error_count.get()
    }
}
