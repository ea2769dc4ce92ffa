//! Read-only traversal of game code.
//!
//! Implement the `visit_*` / `enter_*` methods of [`AstVisitor`] that matter
//! and drive it with [`walk_block`], [`walk_stmt`], [`walk_expr`], or
//! [`walk_model`] for every code block a world declares.
//!
//! ```
//! use gdesc_world::ast::{Block, Expr, Stmt};
//! use gdesc_world::visitor::{AstVisitor, walk_block};
//! use gdesc_foundation::SourceLocation;
//!
//! struct CallCounter(usize);
//!
//! impl AstVisitor for CallCounter {
//!     fn visit_call(&mut self, _name: &str, _args: &[Expr], _loc: &SourceLocation) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let block = Block::new(vec![Stmt::expr(Expr::call("say", vec![Expr::text("hi")]))]);
//! let mut counter = CallCounter(0);
//! walk_block(&mut counter, &block);
//! assert_eq!(counter.0, 1);
//! ```

use gdesc_foundation::SourceLocation;

use crate::ast::{Block, Expr, ExprKind, Stmt, StmtKind};
use crate::model::WorldModel;

/// Read-only visitor over statements and expressions.
///
/// Default implementations do nothing.
#[allow(unused_variables)]
pub trait AstVisitor {
    /// Called before any expression's children.
    fn enter_expr(&mut self, expr: &Expr) {}

    /// Called after any expression's children.
    fn leave_expr(&mut self, expr: &Expr) {}

    /// Called before any statement's children.
    fn enter_stmt(&mut self, stmt: &Stmt) {}

    /// Called after any statement's children.
    fn leave_stmt(&mut self, stmt: &Stmt) {}

    /// Called before a block's statements.
    fn enter_block(&mut self, block: &Block) {}

    /// Called after a block's statements.
    fn leave_block(&mut self, block: &Block) {}

    /// Visit a text literal.
    fn visit_text(&mut self, text: &str, location: &SourceLocation) {}

    /// Visit an identifier reference.
    fn visit_ident(&mut self, name: &str, location: &SourceLocation) {}

    /// Visit a call, before its arguments are walked.
    fn visit_call(&mut self, name: &str, args: &[Expr], location: &SourceLocation) {}
}

/// Walks an expression depth-first.
pub fn walk_expr<V: AstVisitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    visitor.enter_expr(expr);

    match &expr.kind {
        ExprKind::Int(_) | ExprKind::Bool(_) | ExprKind::Char(_) => {}
        ExprKind::Text(text) => visitor.visit_text(text, &expr.location),
        ExprKind::Ident(name) | ExprKind::RefOf(name) | ExprKind::Deref(name) => {
            visitor.visit_ident(name, &expr.location);
        }
        ExprKind::InstanceOf { name, .. } => visitor.visit_ident(name, &expr.location),
        ExprKind::Index { index, .. } => walk_expr(visitor, index),
        ExprKind::Unary { operand, .. } => walk_expr(visitor, operand),
        ExprKind::Binary { left, right, .. } => {
            walk_expr(visitor, left);
            walk_expr(visitor, right);
        }
        ExprKind::Conditional {
            condition,
            then,
            otherwise,
        } => {
            walk_expr(visitor, condition);
            walk_expr(visitor, then);
            walk_expr(visitor, otherwise);
        }
        ExprKind::Assign { target, value, .. } => {
            walk_expr(visitor, target);
            walk_expr(visitor, value);
        }
        ExprKind::Call { name, args } => {
            visitor.visit_call(name, args, &expr.location);
            for arg in args {
                walk_expr(visitor, arg);
            }
        }
    }

    visitor.leave_expr(expr);
}

/// Walks a statement depth-first.
pub fn walk_stmt<V: AstVisitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    visitor.enter_stmt(stmt);

    match &stmt.kind {
        StmtKind::Empty | StmtKind::Break(_) | StmtKind::Continue(_) => {}
        StmtKind::Block(block) => walk_block(visitor, block),
        StmtKind::Expr(expr) => walk_expr(visitor, expr),
        StmtKind::Local(decls) => {
            for init in decls.iter().filter_map(|d| d.init.as_ref()) {
                walk_expr(visitor, init);
            }
        }
        StmtKind::If {
            conditions,
            branches,
        } => {
            for condition in conditions {
                walk_expr(visitor, condition);
            }
            for branch in branches {
                walk_stmt(visitor, branch);
            }
        }
        StmtKind::While {
            condition, body, ..
        } => {
            walk_expr(visitor, condition);
            walk_stmt(visitor, body);
        }
        StmtKind::RepeatUntil {
            body, condition, ..
        } => {
            walk_stmt(visitor, body);
            walk_expr(visitor, condition);
        }
        StmtKind::For {
            init,
            test,
            update,
            body,
            ..
        } => {
            for s in init {
                walk_stmt(visitor, s);
            }
            if let Some(test) = test {
                walk_expr(visitor, test);
            }
            for s in update {
                walk_stmt(visitor, s);
            }
            walk_stmt(visitor, body);
        }
        StmtKind::ForEachAt {
            container, body, ..
        } => {
            walk_expr(visitor, container);
            walk_stmt(visitor, body);
        }
        StmtKind::Return(value) => {
            if let Some(value) = value {
                walk_expr(visitor, value);
            }
        }
    }

    visitor.leave_stmt(stmt);
}

/// Walks every statement of a block.
pub fn walk_block<V: AstVisitor + ?Sized>(visitor: &mut V, block: &Block) {
    visitor.enter_block(block);
    for stmt in &block.statements {
        walk_stmt(visitor, stmt);
    }
    visitor.leave_block(block);
}

/// Walks all code a world declares, in a fixed order: state initializers,
/// object commands, place commands, actions, procs, inits, repeats.
pub fn walk_model<V: AstVisitor + ?Sized>(visitor: &mut V, model: &WorldModel) {
    for value in model.states.iter().filter_map(|s| s.value.as_ref()) {
        walk_expr(visitor, value);
    }
    for object in &model.objects {
        for command in &object.commands {
            walk_block(visitor, &command.body);
        }
    }
    for place in &model.places {
        for command in &place.commands {
            walk_block(visitor, &command.body);
        }
    }
    for action in &model.actions {
        for code in &action.codes {
            walk_block(visitor, &code.body);
        }
    }
    for proc in &model.procs {
        walk_block(visitor, &proc.body);
    }
    for block in model.inits.iter().chain(&model.repeats) {
        walk_block(visitor, block);
    }
}
