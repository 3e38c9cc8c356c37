use crate::{
    eval::{
        environment::Environment,
        object::{AssertionErrorKind, Object},
    },
    parser::ast::{Block, Expr, Infix, Literal, Prefix, Program, Statement},
};
use std::{cell::RefCell, mem, rc::Rc};

mod builtins;
pub mod environment;
pub mod object;

pub struct Evaluator {
    environment: Rc<RefCell<Environment>>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            environment: Rc::new(RefCell::new(Environment::new())),
        }
    }

    pub fn with_environment(environment: Rc<RefCell<Environment>>) -> Self {
        Self { environment }
    }

    /// Evaluate a program top to bottom. A `return` at the top level (or
    /// anywhere inside nested blocks) unwinds to here and is unwrapped
    /// exactly once; errors come back as-is.
    pub fn eval(&mut self, program: &Program) -> Object {
        let result = self.eval_block(&program.statements);
        Self::unwrap_return(result)
    }

    // Blocks do NOT unwrap `Return`: it must travel through any number of
    // nested blocks to the enclosing call boundary untouched.
    fn eval_block(&mut self, block: &[Statement]) -> Object {
        let mut result = Object::Null;

        for statement in block {
            result = self.eval_statement(statement);
            if matches!(result, Object::Return(_) | Object::Error(..)) {
                break;
            }
        }

        result
    }

    fn unwrap_return(object: Object) -> Object {
        match object {
            Object::Return(value) => *value,
            other => other,
        }
    }

    fn eval_statement(&mut self, statement: &Statement) -> Object {
        match statement {
            Statement::Let(name, expr) => {
                let value = self.eval_expr(expr);
                if Self::is_error(&value) {
                    return value;
                }

                self.environment.borrow_mut().set(name, value);

                Object::Null
            }
            Statement::Return(expr) => {
                let value = self.eval_expr(expr);
                if Self::is_error(&value) {
                    return value;
                }

                Object::Return(Box::new(value))
            }
            Statement::Expression(expr) => self.eval_expr(expr),
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> Object {
        match expr {
            Expr::Ident(name) => self.eval_ident(name),
            Expr::Literal(literal) => Self::eval_literal(literal),
            Expr::Prefix(operator, right) => {
                let right = self.eval_expr(right);
                if Self::is_error(&right) {
                    return right;
                }
                Self::eval_prefix_expr(operator, right)
            }
            Expr::Infix(operator, left, right) => {
                let left = self.eval_expr(left);
                if Self::is_error(&left) {
                    return left;
                }
                let right = self.eval_expr(right);
                if Self::is_error(&right) {
                    return right;
                }
                Self::eval_infix_expr(operator, left, right)
            }
            Expr::If {
                condition,
                consequence,
                alternative,
            } => self.eval_if_expr(condition, consequence, alternative),
            Expr::Function { params, body } => {
                Object::Function(params.clone(), body.clone(), self.environment.clone())
            }
            Expr::Call {
                function,
                arguments,
            } => {
                let callee = self.eval_expr(function);
                if Self::is_error(&callee) {
                    return callee;
                }

                // arguments evaluate left to right and stop at the first error
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    let value = self.eval_expr(argument);
                    if Self::is_error(&value) {
                        return value;
                    }
                    args.push(value);
                }

                self.eval_func_application(callee, args)
            }
            Expr::Array(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    let value = self.eval_expr(element);
                    if Self::is_error(&value) {
                        return value;
                    }
                    values.push(value);
                }

                Object::Array(values)
            }
            Expr::Index(collection, index) => {
                let collection = self.eval_expr(collection);
                if Self::is_error(&collection) {
                    return collection;
                }
                let index = self.eval_expr(index);
                if Self::is_error(&index) {
                    return index;
                }
                Self::eval_index_expr(collection, index)
            }
        }
    }

    fn eval_ident(&self, name: &str) -> Object {
        if let Some(object) = self.environment.borrow().get(name) {
            return object;
        }

        match builtins::lookup(name) {
            Some(builtin) => builtin,
            None => Object::Error(
                AssertionErrorKind::InvalidIdentifier,
                format!("identifier not found: {}", name),
            ),
        }
    }

    fn eval_literal(literal: &Literal) -> Object {
        match literal {
            Literal::Int(value) => Object::Integer(*value),
            Literal::Bool(value) => Object::Boolean(*value),
            Literal::String(value) => Object::String(value.clone()),
        }
    }

    fn eval_prefix_expr(operator: &Prefix, right: Object) -> Object {
        match operator {
            Prefix::Bang => Object::Boolean(!right.is_truthy()),
            Prefix::Minus => match right {
                Object::Integer(value) => Object::Integer(-value),
                other => Object::Error(
                    AssertionErrorKind::InvalidToken,
                    format!("unknown operator: -{}", other.type_name()),
                ),
            },
        }
    }

    fn eval_infix_expr(operator: &Infix, left: Object, right: Object) -> Object {
        if mem::discriminant(&left) != mem::discriminant(&right) {
            return Object::Error(
                AssertionErrorKind::InvalidToken,
                format!(
                    "type mismatch: {} {} {}",
                    left.type_name(),
                    operator,
                    right.type_name()
                ),
            );
        }

        match (&left, &right) {
            (Object::Integer(l), Object::Integer(r)) => {
                Self::eval_integer_infix_expr(operator, *l, *r)
            }
            (Object::String(l), Object::String(r)) => match operator {
                Infix::Plus => Object::String(format!("{}{}", l, r)),
                _ => Self::unknown_operator(operator, &left, &right),
            },
            _ => match operator {
                Infix::Equal => Object::Boolean(left == right),
                Infix::NotEqual => Object::Boolean(left != right),
                _ => Self::unknown_operator(operator, &left, &right),
            },
        }
    }

    fn unknown_operator(operator: &Infix, left: &Object, right: &Object) -> Object {
        Object::Error(
            AssertionErrorKind::UnknownOperator,
            format!(
                "unknown operator: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            ),
        )
    }

    fn eval_integer_infix_expr(operator: &Infix, left: i64, right: i64) -> Object {
        match operator {
            Infix::Plus => Object::Integer(left + right),
            Infix::Minus => Object::Integer(left - right),
            Infix::Multiply => Object::Integer(left * right),
            Infix::Divide => {
                if right == 0 {
                    Object::Error(
                        AssertionErrorKind::DivisionByZero,
                        format!("division by zero: {} / 0", left),
                    )
                } else {
                    // host division truncates toward zero
                    Object::Integer(left / right)
                }
            }
            Infix::LessThan => Object::Boolean(left < right),
            Infix::GreaterThan => Object::Boolean(left > right),
            Infix::LessThanEqual => Object::Boolean(left <= right),
            Infix::GreaterThanEqual => Object::Boolean(left >= right),
            Infix::Equal => Object::Boolean(left == right),
            Infix::NotEqual => Object::Boolean(left != right),
        }
    }

    fn eval_if_expr(
        &mut self,
        condition: &Expr,
        consequence: &[Statement],
        alternative: &Option<Block>,
    ) -> Object {
        let condition = self.eval_expr(condition);
        if Self::is_error(&condition) {
            return condition;
        }

        if condition.is_truthy() {
            self.eval_block(consequence)
        } else if let Some(alternative) = alternative {
            self.eval_block(alternative)
        } else {
            Object::Null
        }
    }

    fn eval_index_expr(collection: Object, index: Object) -> Object {
        match (&collection, &index) {
            (Object::Array(elements), Object::Integer(i)) => {
                if *i < 0 || *i as usize >= elements.len() {
                    Object::Null
                } else {
                    elements[*i as usize].clone()
                }
            }
            (Object::Array(_), other) => Object::Error(
                AssertionErrorKind::TypeMismatch,
                format!("index into array must be an INTEGER, got {}", other.type_name()),
            ),
            _ => Object::Error(
                AssertionErrorKind::TypeMismatch,
                format!("index operator not supported: {}", collection.type_name()),
            ),
        }
    }

    fn eval_func_application(&mut self, callee: Object, args: Vec<Object>) -> Object {
        let (params, body, captured_env) = match callee {
            Object::Function(params, body, env) => (params, body, env),
            Object::Builtin(_, function) => return function(args),
            other => {
                return Object::Error(
                    AssertionErrorKind::TypeMismatch,
                    format!("not a function: {}", other.type_name()),
                )
            }
        };

        // Parameters zip with arguments: a missing argument leaves its
        // parameter unbound (it fails lookup if the body touches it),
        // surplus arguments are dropped.
        let original_env = self.environment.clone();
        let execution_env = Rc::new(RefCell::new(Environment::new_with_outer(captured_env)));
        params.iter().zip(args).for_each(|(param, arg)| {
            execution_env.borrow_mut().set(param, arg);
        });

        self.environment = execution_env;
        let result = self.eval_block(&body);
        self.environment = original_env;

        Self::unwrap_return(result)
    }

    fn is_error(object: &Object) -> bool {
        matches!(object, Object::Error(..))
    }
}
