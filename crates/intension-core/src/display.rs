//! Rendering of expressions in XCSP3 functional notation.
//!
//! `ite(lt(x, 3), add(x, 1), sub(x, 1))` renders as
//! `if(lt(x,3),add(x,1),sub(x,1))`, ranges as `min..max` and sets as
//! `set(a,b,c)`.

use std::fmt;

use crate::error::TraversalError;
use crate::expr::{
    BinaryExpr, Constant, Expr, IfThenElse, NaryExpr, RangeExpr, SetExpr, UnaryExpr, Variable,
};
use crate::visit::{Visitor, Walker};

/// Configuration for a [`Printer`].
#[derive(Clone, Debug, Default)]
pub struct PrinterConfig {
    /// Separate arguments with `", "` instead of `","`.
    pub spaced: bool,
}

impl PrinterConfig {
    /// Enables or disables spacing between arguments.
    #[must_use]
    pub fn with_spaced(mut self, spaced: bool) -> Self {
        self.spaced = spaced;
        self
    }
}

/// A visitor that renders a tree as text.
///
/// Each visited node pops the text of its children from a stack and pushes
/// its own.
#[derive(Debug, Default)]
pub struct Printer {
    config: PrinterConfig,
    stack: Vec<String>,
}

impl Printer {
    /// Creates a printer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a printer with a custom configuration.
    #[must_use]
    pub fn with_config(config: PrinterConfig) -> Self {
        Self {
            config,
            stack: Vec::new(),
        }
    }

    /// Renders `expr` with `walker`.
    ///
    /// # Errors
    ///
    /// Fails only if `walker` enforces a depth limit that `expr` exceeds.
    pub fn render(&mut self, walker: &Walker, expr: &Expr) -> Result<String, TraversalError> {
        self.stack.clear();
        walker.walk(expr, self)?;
        Ok(self.stack.pop().unwrap_or_default())
    }

    fn separator(&self) -> &'static str {
        if self.config.spaced {
            ", "
        } else {
            ","
        }
    }

    fn apply(&mut self, name: &str, arity: usize) {
        let at = self.stack.len().saturating_sub(arity);
        let args = self.stack.split_off(at).join(self.separator());
        self.stack.push(format!("{name}({args})"));
    }
}

impl Visitor for Printer {
    type Error = TraversalError;

    fn visit_constant(&mut self, node: &Constant) -> Result<(), Self::Error> {
        self.stack.push(node.value().to_string());
        Ok(())
    }

    fn visit_variable(&mut self, node: &Variable) -> Result<(), Self::Error> {
        self.stack.push(node.id().to_owned());
        Ok(())
    }

    fn visit_unary(&mut self, node: &UnaryExpr) -> Result<(), Self::Error> {
        self.apply(node.operator().name(), 1);
        Ok(())
    }

    fn visit_binary(&mut self, node: &BinaryExpr) -> Result<(), Self::Error> {
        self.apply(node.operator().name(), 2);
        Ok(())
    }

    fn visit_nary(&mut self, node: &NaryExpr) -> Result<(), Self::Error> {
        self.apply(node.operator().name(), node.arity());
        Ok(())
    }

    fn visit_if_then_else(&mut self, _node: &IfThenElse) -> Result<(), Self::Error> {
        self.apply("if", 3);
        Ok(())
    }

    fn visit_range(&mut self, node: &RangeExpr) -> Result<(), Self::Error> {
        self.stack.push(format!("{}..{}", node.min(), node.max()));
        Ok(())
    }

    fn visit_set(&mut self, node: &SetExpr) -> Result<(), Self::Error> {
        self.apply("set", node.len());
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = Printer::new()
            .render(&Walker::new(), self)
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
