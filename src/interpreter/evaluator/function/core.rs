use log::trace;

use crate::{
    ast::{Expr, FunctionCall, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{BlockExit, Context, EvalResult},
            function::{clear, print, read},
            scope::{MAX_CALL_DEPTH, SlotId},
        },
        terminal::Terminal,
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the console, a slice of evaluated argument values and
/// the line number. It returns the produced value, or `None` for builtins
/// that produce nothing.
type BuiltinFn = fn(&mut dyn Terminal, &[Value], usize) -> EvalResult<Option<Value>>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `Variadic` accepts any number of arguments, including none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Variadic,
}

impl Arity {
    /// Tests an argument count against this arity constraint.
    ///
    /// # Returns
    /// `None` if the count is permitted, otherwise the expected count.
    #[must_use]
    pub const fn mismatch(self, found: usize) -> Option<usize> {
        match self {
            Self::Exact(expected) if expected != found => Some(expected),
            _ => None,
        }
    }
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - whether the builtin produces a value,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (call metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                returns: $returns:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// Metadata and implementation of one builtin.
        pub struct BuiltinDef {
            /// The name programs call it by.
            pub name:          &'static str,
            /// Accepted argument counts.
            pub arity:         Arity,
            /// `true` if a call produces a value.
            pub returns_value: bool,
            func:              BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, returns_value: $returns, func: $func },
            )*
        ];
        /// Names reserved for builtins; user functions may not reuse them.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print" => { arity: Arity::Variadic, returns: false, func: print::print },
    "read"  => { arity: Arity::Variadic, returns: true,  func: read::read },
    "clear" => { arity: Arity::Exact(0), returns: false, func: clear::clear },
}

/// Finds a builtin by name.
///
/// # Example
/// ```
/// use skimskript::interpreter::evaluator::function::core::{Arity, find_builtin};
///
/// let clear = find_builtin("clear").unwrap();
/// assert_eq!(clear.arity, Arity::Exact(0));
/// assert!(!clear.returns_value);
/// assert!(find_builtin("Print").is_none());
/// ```
#[must_use]
pub fn find_builtin(name: &str) -> Option<&'static BuiltinDef> {
    BUILTIN_TABLE.iter().find(|builtin| builtin.name == name)
}

/// An argument after evaluation, ready to be bound to its parameter.
enum BoundArgument {
    /// A pass-by-value argument, already coerced to the parameter type.
    Value(Value),
    /// A pass-by-reference argument: the caller's slot.
    Slot(SlotId),
}

impl Context<'_, '_> {
    /// Evaluates a function call.
    ///
    /// The evaluator first checks whether the name matches a builtin.
    /// If so, it verifies arity and executes the builtin.
    /// Otherwise it delegates to user-defined function handling.
    ///
    /// # Returns
    /// The value the function produced, or `None` for builtins and user
    /// functions without a return type.
    ///
    /// # Errors
    /// - Unknown function name.
    /// - Wrong number of arguments.
    /// - Any error raised while evaluating arguments or running the body.
    pub fn eval_call(&mut self, call: &FunctionCall) -> EvalResult<Option<Value>> {
        if let Some(builtin) = find_builtin(&call.name) {
            if let Some(expected) = builtin.arity.mismatch(call.arguments.len()) {
                return Err(RuntimeError::ArgumentCountMismatch { name: call.name.clone(),
                                                                 expected,
                                                                 found: call.arguments.len(),
                                                                 line: call.line });
            }

            let values = call.arguments
                             .iter()
                             .map(|argument| self.eval(argument))
                             .collect::<EvalResult<Vec<_>>>()?;
            return (builtin.func)(&mut *self.terminal, &values, call.line);
        }

        let function = self.functions
                           .get(call.name.as_str())
                           .copied()
                           .ok_or_else(|| RuntimeError::UnknownFunction { name: call.name.clone(),
                                                                          line: call.line, })?;
        self.call_user_defined_function(function, call)
    }

    /// Executes a user-defined function.
    ///
    /// Arguments are evaluated in the caller's scope. By-value arguments are
    /// coerced to their parameter's type; by-reference arguments must name a
    /// variable whose declared type matches the parameter exactly, and the
    /// parameter then shares that variable's slot.
    ///
    /// The body runs in a fresh frame that only sees its parameters, its own
    /// locals and the program's top-level variables. A call that would nest
    /// deeper than [`MAX_CALL_DEPTH`] raises `RecursionLimit`.
    fn call_user_defined_function(&mut self,
                                  function: &FunctionDef,
                                  call: &FunctionCall)
                                  -> EvalResult<Option<Value>> {
        if call.arguments.len() != function.parameters.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name:     call.name.clone(),
                                                             expected: function.parameters.len(),
                                                             found:    call.arguments.len(),
                                                             line:     call.line, });
        }

        let mut bound = Vec::with_capacity(call.arguments.len());
        for (parameter, argument) in function.parameters.iter().zip(&call.arguments) {
            if !parameter.by_reference {
                bound.push(BoundArgument::Value(self.eval(argument)?.into_type(parameter.data_type)));
                continue;
            }

            let Expr::Identifier { name, line } = argument else {
                return Err(RuntimeError::ReferenceArgumentNotIdentifier { name:      call.name.clone(),
                                                                          parameter: parameter.name.clone(),
                                                                          line:      call.line, });
            };
            let (slot, found) = self.scopes
                                    .lookup(name)
                                    .and_then(|slot| Some((slot, self.scopes.data_type(slot)?)))
                                    .ok_or_else(|| RuntimeError::UnknownIdentifier { name: name.clone(),
                                                                                     line: *line, })?;
            if found != parameter.data_type {
                return Err(RuntimeError::ReferenceTypeMismatch { name: call.name.clone(),
                                                                 parameter: parameter.name.clone(),
                                                                 expected: parameter.data_type,
                                                                 found,
                                                                 line: call.line });
            }
            bound.push(BoundArgument::Slot(slot));
        }

        if self.scopes.call_depth() >= MAX_CALL_DEPTH {
            return Err(RuntimeError::RecursionLimit { name:  function.name.clone(),
                                                      depth: MAX_CALL_DEPTH,
                                                      line:  call.line, });
        }

        trace!("Calling '{}' from line {}", function.name, call.line);
        self.scopes.push_frame();
        let result = self.run_body(function, bound);
        self.scopes.pop_frame();
        trace!("Returned from '{}'", function.name);

        Self::finish_call(function, result?)
    }

    /// Binds the parameters in the new frame and runs the function body in
    /// the same level.
    fn run_body(&mut self, function: &FunctionDef, arguments: Vec<BoundArgument>) -> EvalResult<BlockExit> {
        for (parameter, argument) in function.parameters.iter().zip(arguments) {
            let bound = match argument {
                BoundArgument::Value(value) => {
                    self.scopes
                        .declare(&parameter.name, value, parameter.data_type)
                        .is_some()
                },
                BoundArgument::Slot(slot) => self.scopes.bind_reference(&parameter.name, slot),
            };
            if !bound {
                return Err(RuntimeError::VariableAlreadyDeclared { name: parameter.name.clone(),
                                                                   line: function.line, });
            }
        }

        self.exec_statements(&function.body.statements)
    }

    /// Checks how the body finished against the declared return type.
    ///
    /// A returned value is coerced to the return type.
    fn finish_call(function: &FunctionDef, exit: BlockExit) -> EvalResult<Option<Value>> {
        match (function.return_type, exit) {
            (Some(data_type), BlockExit::Returned(Some(value))) => {
                Ok(Some(value.into_type(data_type)))
            },
            (Some(_), _) => Err(RuntimeError::MissingReturnValue { name: function.name.clone(),
                                                                   line: function.line, }),
            (None, BlockExit::Returned(Some(_))) => {
                Err(RuntimeError::ReturnValueInVoidFunction { name: function.name.clone(),
                                                              line: function.line, })
            },
            (None, _) => Ok(None),
        }
    }
}
