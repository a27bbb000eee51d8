use std::collections::{HashMap, HashSet};

use log::debug;

use crate::{
    ast::{Block, ElseBranch, Expr, FunctionCall, FunctionDef, IfChain, Program, Statement},
    error::SemanticError,
    interpreter::evaluator::function::core::find_builtin,
};

type AnalyzeResult<T> = Result<T, SemanticError>;

/// Checks a parsed program for errors that are visible without running it.
///
/// Function names are checked first, then the top-level statements in
/// order, then every function body. The first problem found is returned.
///
/// Names follow the same visibility rules as at runtime: a block sees its
/// own declarations and those of enclosing blocks made before it, and a
/// function body additionally sees its parameters and every top-level
/// declaration of the program.
///
/// # Errors
/// The first [`SemanticError`] found.
///
/// # Example
/// ```
/// use skimskript::{
///     error::SemanticError,
///     interpreter::{analyzer::analyze, lexer::tokenize, parser::core::parse_program},
/// };
///
/// let program = parse_program(&tokenize(&["print(total)"]).unwrap()).unwrap();
///
/// assert_eq!(analyze(&program),
///            Err(SemanticError::UnknownIdentifier { name: "total".to_string(),
///                                                   line: 1, }));
/// ```
pub fn analyze(program: &Program) -> AnalyzeResult<()> {
    let mut analyzer = Analyzer::new(program)?;

    analyzer.check_statements(&program.statements)?;
    for function in &program.functions {
        analyzer.check_function(function)?;
    }

    debug!("Analyzed {} statement(s) and {} function(s)",
           program.statements.len(),
           program.functions.len());
    Ok(())
}

/// Walks the tree with a stack of declared names per block level.
struct Analyzer<'p> {
    functions: HashMap<&'p str, &'p FunctionDef>,
    globals:   HashSet<&'p str>,
    levels:    Vec<HashSet<&'p str>>,
    function:  Option<&'p FunctionDef>,
}

impl<'p> Analyzer<'p> {
    fn new(program: &'p Program) -> AnalyzeResult<Self> {
        let mut functions = HashMap::new();
        for function in &program.functions {
            if find_builtin(&function.name).is_some() {
                return Err(SemanticError::BuiltinRedefinition { name: function.name.clone(),
                                                                line: function.line, });
            }
            if functions.insert(function.name.as_str(), function).is_some() {
                return Err(SemanticError::DuplicateFunction { name: function.name.clone(),
                                                              line: function.line, });
            }
        }

        let globals = program.statements
                             .iter()
                             .filter_map(|statement| match statement {
                                 Statement::VariableDeclaration { name, .. } => Some(name.as_str()),
                                 _ => None,
                             })
                             .collect();

        Ok(Self { functions,
                  globals,
                  levels: vec![HashSet::new()],
                  function: None })
    }

    fn check_function(&mut self, function: &'p FunctionDef) -> AnalyzeResult<()> {
        self.function = Some(function);
        self.levels = vec![HashSet::new()];

        for parameter in &function.parameters {
            self.declare(&parameter.name, function.line)?;
        }
        // The body shares the level of the parameters.
        self.check_statements(&function.body.statements)
    }

    fn declare(&mut self, name: &'p str, line: usize) -> AnalyzeResult<()> {
        let inserted = self.levels.last_mut().is_some_and(|level| level.insert(name));
        if inserted {
            Ok(())
        } else {
            Err(SemanticError::VariableAlreadyDeclared { name: name.to_string(),
                                                         line })
        }
    }

    fn is_visible(&self, name: &str) -> bool {
        self.levels.iter().any(|level| level.contains(name))
        || (self.function.is_some() && self.globals.contains(name))
    }

    fn check_statements(&mut self, statements: &'p [Statement]) -> AnalyzeResult<()> {
        statements.iter().try_for_each(|statement| self.check_statement(statement))
    }

    fn check_block(&mut self, block: &'p Block) -> AnalyzeResult<()> {
        self.levels.push(HashSet::new());
        let result = self.check_statements(&block.statements);
        self.levels.pop();
        result
    }

    fn check_statement(&mut self, statement: &'p Statement) -> AnalyzeResult<()> {
        match statement {
            Statement::VariableDeclaration { name, value, line, .. } => {
                self.check_expr(value)?;
                self.declare(name, *line)
            },
            Statement::Assignment { name, value, line } => {
                if !self.is_visible(name) {
                    return Err(SemanticError::UnknownIdentifier { name: name.clone(),
                                                                  line: *line, });
                }
                self.check_expr(value)
            },
            Statement::FunctionCall(call) => self.check_call(call, false),
            Statement::Return { value, line } => {
                if let Some(function) = self.function {
                    match (function.return_type, value) {
                        (None, Some(_)) => {
                            return Err(SemanticError::ReturnValueInVoidFunction { name: function.name.clone(),
                                                                                  line: *line, });
                        },
                        (Some(_), None) => {
                            return Err(SemanticError::MissingReturnValue { name: function.name.clone(),
                                                                           line: *line, });
                        },
                        _ => {},
                    }
                }
                value.as_ref().map_or(Ok(()), |value| self.check_expr(value))
            },
            Statement::If(chain) => self.check_if(chain),
            Statement::While { condition, body, .. } => {
                self.check_expr(condition)?;
                self.check_block(body)
            },
            Statement::Repeat { count, body, .. } => {
                self.check_expr(count)?;
                self.check_block(body)
            },
            Statement::Assertion { condition, .. } => self.check_expr(condition),
            Statement::TryCatch { try_block,
                                  catch_variable,
                                  catch_block,
                                  line, } => {
                self.check_block(try_block)?;

                self.levels.push(HashSet::new());
                let result = match catch_variable {
                    Some(variable) => self.declare(variable, *line),
                    None => Ok(()),
                }.and_then(|()| self.check_block(catch_block));
                self.levels.pop();
                result
            },
        }
    }

    fn check_if(&mut self, chain: &'p IfChain) -> AnalyzeResult<()> {
        self.check_expr(&chain.condition)?;
        self.check_block(&chain.body)?;
        match chain.otherwise.as_deref() {
            Some(ElseBranch::ElseIf(next)) => self.check_if(next),
            Some(ElseBranch::Else(block)) => self.check_block(block),
            None => Ok(()),
        }
    }

    fn check_expr(&self, expr: &Expr) -> AnalyzeResult<()> {
        match expr {
            Expr::Literal { .. } => Ok(()),
            Expr::Identifier { name, line } => {
                if self.is_visible(name) {
                    Ok(())
                } else {
                    Err(SemanticError::UnknownIdentifier { name: name.clone(),
                                                           line: *line, })
                }
            },
            Expr::Math { left, right, .. }
            | Expr::Comparison { left, right, .. }
            | Expr::Logic { left, right, .. } => {
                self.check_expr(left)?;
                self.check_expr(right)
            },
            Expr::FunctionCall(call) => self.check_call(call, true),
        }
    }

    /// Checks the callee, the argument count and the argument kinds of a
    /// call. `as_value` is set when the call sits inside an expression.
    fn check_call(&self, call: &FunctionCall, as_value: bool) -> AnalyzeResult<()> {
        let found = call.arguments.len();

        let returns_value = if let Some(builtin) = find_builtin(&call.name) {
            if let Some(expected) = builtin.arity.mismatch(found) {
                return Err(SemanticError::ArgumentCountMismatch { name: call.name.clone(),
                                                                  expected,
                                                                  found,
                                                                  line: call.line });
            }
            builtin.returns_value
        } else if let Some(function) = self.functions.get(call.name.as_str()) {
            if function.parameters.len() != found {
                return Err(SemanticError::ArgumentCountMismatch { name: call.name.clone(),
                                                                  expected: function.parameters.len(),
                                                                  found,
                                                                  line: call.line });
            }
            let misplaced = function.parameters
                                    .iter()
                                    .zip(&call.arguments)
                                    .find(|(parameter, argument)| {
                                        parameter.by_reference
                                        && !matches!(argument, Expr::Identifier { .. })
                                    });
            if let Some((parameter, _)) = misplaced {
                return Err(SemanticError::ReferenceArgumentNotIdentifier { name:      call.name.clone(),
                                                                           parameter: parameter.name.clone(),
                                                                           line:      call.line, });
            }
            function.return_type.is_some()
        } else {
            return Err(SemanticError::UnknownFunction { name: call.name.clone(),
                                                        line: call.line, });
        };

        if as_value && !returns_value {
            return Err(SemanticError::VoidCallInExpression { name: call.name.clone(),
                                                             line: call.line, });
        }

        call.arguments
            .iter()
            .try_for_each(|argument| self.check_expr(argument))
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::interpreter::{lexer::tokenize, parser::core::parse_program};

    fn check(source: &str) -> AnalyzeResult<()> {
        let lines: Vec<&str> = source.lines().collect();
        analyze(&parse_program(&tokenize(&lines).unwrap()).unwrap())
    }

    #[test]
    fn accepts_valid_program() {
        assert_eq!(check(indoc! {r#"
            declare int total as 0
            define function add(ref int target, int amount) {
                set target to target + amount + total
            }
            define int function twice(int x) {
                return x * 2
            }
            repeat 3 times {
                run add(total, twice(1))
            }
            try {
                print(total / 0)
            } catch message {
                print(message)
            }
            declare string name as read("Name?")
            return total
        "#}),
                   Ok(()));
    }

    #[test]
    fn rejects_function_name_collisions() {
        assert_eq!(check("define function print() {}"),
                   Err(SemanticError::BuiltinRedefinition { name: "print".to_string(),
                                                            line: 1, }));
        assert_eq!(check("define function f() {}\ndefine function f() {}"),
                   Err(SemanticError::DuplicateFunction { name: "f".to_string(),
                                                          line: 2, }));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(check("run nowhere()"),
                   Err(SemanticError::UnknownFunction { name: "nowhere".to_string(),
                                                        line: 1, }));
        assert_eq!(check("set y to 1"),
                   Err(SemanticError::UnknownIdentifier { name: "y".to_string(),
                                                          line: 1, }));
        assert_eq!(check("print(z)\ndeclare int z"),
                   Err(SemanticError::UnknownIdentifier { name: "z".to_string(),
                                                          line: 1, }));
    }

    #[test]
    fn block_declarations_end_with_block() {
        assert_eq!(check(indoc! {"
            if true {
                declare int inner as 1
            }
            print(inner)
        "}),
                   Err(SemanticError::UnknownIdentifier { name: "inner".to_string(),
                                                          line: 4, }));
    }

    #[test]
    fn functions_see_top_level_declarations_only() {
        assert_eq!(check(indoc! {"
            define function show() {
                print(late)
            }
            declare int late as 1
            run show()
        "}),
                   Ok(()));

        assert_eq!(check(indoc! {"
            define function show() {
                print(local)
            }
            if true {
                declare int local as 1
                run show()
            }
        "}),
                   Err(SemanticError::UnknownIdentifier { name: "local".to_string(),
                                                          line: 2, }));
    }

    #[test]
    fn checks_arity() {
        assert_eq!(check("define function f(int a) {}\nrun f(1, 2)"),
                   Err(SemanticError::ArgumentCountMismatch { name:     "f".to_string(),
                                                              expected: 1,
                                                              found:    2,
                                                              line:     2, }));
        assert_eq!(check("clear(1)"),
                   Err(SemanticError::ArgumentCountMismatch { name:     "clear".to_string(),
                                                              expected: 0,
                                                              found:    1,
                                                              line:     1, }));
        assert_eq!(check("print(1, 2, 3)"), Ok(()));
    }

    #[test]
    fn reference_arguments_must_be_identifiers() {
        assert_eq!(check("define function f(ref int a) {}\nrun f(1)"),
                   Err(SemanticError::ReferenceArgumentNotIdentifier { name:      "f".to_string(),
                                                                       parameter: "a".to_string(),
                                                                       line:      2, }));
    }

    #[test]
    fn checks_return_statements() {
        assert_eq!(check("define function f() {\nreturn 1\n}"),
                   Err(SemanticError::ReturnValueInVoidFunction { name: "f".to_string(),
                                                                  line: 2, }));
        assert_eq!(check("define int function f() {\nreturn\n}"),
                   Err(SemanticError::MissingReturnValue { name: "f".to_string(),
                                                           line: 2, }));
        assert_eq!(check("return 3"), Ok(()));
    }

    #[test]
    fn rejects_void_calls_in_expressions() {
        assert_eq!(check("declare int x as print(1)"),
                   Err(SemanticError::VoidCallInExpression { name: "print".to_string(),
                                                             line: 1, }));
        assert_eq!(check("define function f() {}\nprint(f() + 1)"),
                   Err(SemanticError::VoidCallInExpression { name: "f".to_string(),
                                                             line: 2, }));
    }

    #[test]
    fn rejects_redeclaration_in_same_level() {
        assert_eq!(check("declare int a\nif true {\ndeclare int a\n}\ndeclare float a"),
                   Err(SemanticError::VariableAlreadyDeclared { name: "a".to_string(),
                                                                line: 5, }));
        assert_eq!(check("define function f(int a, int a) {}"),
                   Err(SemanticError::VariableAlreadyDeclared { name: "a".to_string(),
                                                                line: 1, }));
    }
}
