//! Expression evaluation.
//!
//! Every expression yields an `i32`. Arithmetic wraps on overflow and shift
//! counts use their low five bits. Division by zero is a runtime fault.

use gdesc_foundation::{Error, ErrorKind, Result, SourceLocation};
use gdesc_world::{AssignOp, BinaryOp, Category, Expr, ExprKind, Identifier, Refno, UnaryOp};

use crate::console::Console;
use crate::engine::Engine;
use crate::scope::LocalValue;
use crate::signal::Eval;

/// C truthiness as an integer.
const fn truth(value: bool) -> i32 {
    if value { 1 } else { 0 }
}

/// Applies a non-short-circuit binary operator.
///
/// # Errors
///
/// Returns [`ErrorKind::DivisionByZero`] for `/` or `%` by zero.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub fn apply_binary(op: BinaryOp, left: i32, right: i32) -> Result<i32> {
    let shift = (right & 31) as u32;
    Ok(match op {
        BinaryOp::Or => truth(left != 0 || right != 0),
        BinaryOp::And => truth(left != 0 && right != 0),
        BinaryOp::BitOr => left | right,
        BinaryOp::BitXor => left ^ right,
        BinaryOp::BitAnd => left & right,
        BinaryOp::Eq => truth(left == right),
        BinaryOp::Ne => truth(left != right),
        BinaryOp::Lt => truth(left < right),
        BinaryOp::Gt => truth(left > right),
        BinaryOp::Le => truth(left <= right),
        BinaryOp::Ge => truth(left >= right),
        BinaryOp::Shl => left.wrapping_shl(shift),
        BinaryOp::Shr => left.wrapping_shr(shift),
        BinaryOp::UShr => ((left as u32) >> shift) as i32,
        BinaryOp::Add => left.wrapping_add(right),
        BinaryOp::Sub => left.wrapping_sub(right),
        BinaryOp::Mul => left.wrapping_mul(right),
        BinaryOp::Div | BinaryOp::Rem if right == 0 => {
            return Err(Error::new(ErrorKind::DivisionByZero));
        }
        BinaryOp::Div => left.wrapping_div(right),
        BinaryOp::Rem => left.wrapping_rem(right),
    })
}

/// A writable location, resolved once per assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Local(String),
    Variable(Refno),
    Array { array: usize, cell: usize },
}

impl<C: Console> Engine<C> {
    /// Evaluates an expression, tagging faults with its location.
    pub(crate) fn eval(&mut self, expr: &Expr) -> Eval<i32> {
        self.eval_kind(expr).map_err(|u| u.at(&expr.location))
    }

    fn eval_kind(&mut self, expr: &Expr) -> Eval<i32> {
        match &expr.kind {
            ExprKind::Int(v) => Ok(*v),
            ExprKind::Bool(b) => Ok(truth(*b)),
            ExprKind::Char(c) => Ok(i32::try_from(u32::from(*c)).unwrap_or(0)),
            ExprKind::Text(text) => Ok(self.world.literal(text).map_or(0, Refno::get)),
            ExprKind::Ident(name) => Ok(self.ident_value(name)?),
            ExprKind::Index { array, index } => {
                let slot = self.array_slot(array, index)?;
                Ok(self.read_slot(&slot))
            }
            ExprKind::Unary { op, operand } => self.eval_unary(*op, operand),
            ExprKind::Binary { op, left, right } => match op {
                BinaryOp::Or => {
                    if self.eval(left)? != 0 {
                        return Ok(1);
                    }
                    Ok(truth(self.eval(right)? != 0))
                }
                BinaryOp::And => {
                    if self.eval(left)? == 0 {
                        return Ok(0);
                    }
                    Ok(truth(self.eval(right)? != 0))
                }
                _ => {
                    let l = self.eval(left)?;
                    let r = self.eval(right)?;
                    Ok(apply_binary(*op, l, r)?)
                }
            },
            ExprKind::Conditional {
                condition,
                then,
                otherwise,
            } => {
                if self.eval(condition)? != 0 {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            }
            ExprKind::Assign { op, target, value } => self.eval_assign(*op, target, value),
            ExprKind::RefOf(name) => Ok(self.ref_of(name)),
            ExprKind::Deref(name) => {
                let pointer = self.ident_value(name)?;
                let cell = self.deref_cell(pointer)?;
                Ok(self.default_var(cell))
            }
            ExprKind::InstanceOf { name, category } => {
                Ok(truth(self.category_of_ident(name) == Some(*category)))
            }
            ExprKind::Call { name, args } => self.call(name, args, &expr.location),
        }
    }

    fn eval_unary(&mut self, op: UnaryOp, operand: &Expr) -> Eval<i32> {
        match op {
            UnaryOp::Neg => Ok(self.eval(operand)?.wrapping_neg()),
            UnaryOp::Not => Ok(truth(self.eval(operand)? == 0)),
            UnaryOp::BitNot => Ok(!self.eval(operand)?),
            UnaryOp::PreInc | UnaryOp::PreDec | UnaryOp::PostInc | UnaryOp::PostDec => {
                let slot = self.resolve_slot(operand)?;
                let old = self.read_slot(&slot);
                let new = if matches!(op, UnaryOp::PreInc | UnaryOp::PostInc) {
                    old.wrapping_add(1)
                } else {
                    old.wrapping_sub(1)
                };
                self.write_slot(&slot, new);
                Ok(if matches!(op, UnaryOp::PreInc | UnaryOp::PreDec) {
                    new
                } else {
                    old
                })
            }
        }
    }

    fn eval_assign(&mut self, op: AssignOp, target: &Expr, value: &Expr) -> Eval<i32> {
        let rhs = self.eval(value)?;
        let slot = self.resolve_slot(target).map_err(|u| u.at(&target.location))?;
        let stored = match op.binary() {
            None => rhs,
            Some(binary) => apply_binary(binary, self.read_slot(&slot), rhs)?,
        };
        self.write_slot(&slot, stored);
        Ok(stored)
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    /// Reads an identifier: locals first, then globals.
    pub(crate) fn ident_value(&self, name: &str) -> Result<i32> {
        if let Some(local) = self.scopes.get(name) {
            return Ok(local.as_int());
        }
        let identifier = self
            .world
            .identifier(name)
            .ok_or_else(|| Error::undefined_identifier(name))?;
        Ok(match identifier {
            Identifier::Variable(index) => {
                let refno = self.world.space().refno(Category::Variable, index);
                self.default_var(refno)
            }
            Identifier::State(index) => self.state.state(index).unwrap_or(0),
            Identifier::Flag { bit, .. } => bit,
            Identifier::Proc(_) | Identifier::Array(_) => 0,
            Identifier::Object(_)
            | Identifier::Place(_)
            | Identifier::Text(_)
            | Identifier::Verb(_) => self.world.refno_of(name).map_or(0, Refno::get),
        })
    }

    /// `&name`: the refno of a declared entity, 0 for locals and non-entities.
    pub(crate) fn ref_of(&self, name: &str) -> i32 {
        if self.scopes.get(name).is_some() {
            return 0;
        }
        self.world.refno_of(name).map_or(0, Refno::get)
    }

    /// Category an identifier resolves to, following variables and locals
    /// to the category of the value they hold.
    pub(crate) fn category_of_ident(&self, name: &str) -> Option<Category> {
        let space = self.world.space();
        if let Some(local) = self.scopes.get(name) {
            return space.category_of(Refno::new(local.as_int()));
        }
        match self.world.identifier(name)?.category()? {
            Category::Variable => {
                let refno = self.world.refno_of(name)?;
                space.category_of(Refno::new(self.default_var(refno)))
            }
            category => Some(category),
        }
    }

    /// Checks that `pointer` addresses a variable cell.
    pub(crate) fn deref_cell(&self, pointer: i32) -> Result<Refno> {
        let refno = Refno::new(pointer);
        if self.world.space().contains(Category::Variable, refno) {
            Ok(refno)
        } else {
            Err(Error::new(ErrorKind::NotAVariable(pointer)))
        }
    }

    // =========================================================================
    // Left-hand sides
    // =========================================================================

    pub(crate) fn resolve_slot(&mut self, target: &Expr) -> Eval<Slot> {
        match &target.kind {
            ExprKind::Ident(name) => {
                if self.scopes.get(name).is_some() {
                    return Ok(Slot::Local(name.clone()));
                }
                match self.world.identifier(name) {
                    Some(Identifier::Variable(index)) => Ok(Slot::Variable(
                        self.world.space().refno(Category::Variable, index),
                    )),
                    Some(_) => Err(Error::new(ErrorKind::InvalidAssignment(name.clone())).into()),
                    None => Err(Error::undefined_identifier(name.as_str()).into()),
                }
            }
            ExprKind::Index { array, index } => self.array_slot(array, index),
            ExprKind::Deref(name) => {
                let pointer = self.ident_value(name)?;
                Ok(Slot::Variable(self.deref_cell(pointer)?))
            }
            _ => Err(Error::new(ErrorKind::InvalidAssignment("expression".to_string())).into()),
        }
    }

    fn array_slot(&mut self, array: &str, index: &Expr) -> Eval<Slot> {
        let Some(Identifier::Array(id)) = self.world.identifier(array) else {
            return Err(Error::new(ErrorKind::UndefinedArray(array.to_string())).into());
        };
        let position = self.eval(index)?;
        let length = self.state.array(id).map_or(0, <[i32]>::len);
        match usize::try_from(position) {
            Ok(cell) if cell < length => Ok(Slot::Array { array: id, cell }),
            _ => Err(Error::new(ErrorKind::IndexOutOfBounds {
                index: position,
                length,
            })
            .into()),
        }
    }

    pub(crate) fn read_slot(&self, slot: &Slot) -> i32 {
        match slot {
            Slot::Local(name) => self.scopes.get(name).map_or(0, LocalValue::as_int),
            Slot::Variable(refno) => self.default_var(*refno),
            Slot::Array { array, cell } => self
                .state
                .array(*array)
                .and_then(|cells| cells.get(*cell))
                .copied()
                .unwrap_or(0),
        }
    }

    pub(crate) fn write_slot(&mut self, slot: &Slot, value: i32) {
        match slot {
            Slot::Local(name) => {
                self.scopes.set(name, value);
            }
            Slot::Variable(refno) => {
                self.state.set_variable(*refno, value);
            }
            Slot::Array { array, cell } => {
                if let Some(target) = self
                    .state
                    .array_mut(*array)
                    .and_then(|cells| cells.get_mut(*cell))
                {
                    *target = value;
                }
            }
        }
    }

    /// Resolves an argument that names an entity, local, or expression to a refno.
    ///
    /// A bare identifier of an entity yields the entity itself rather than,
    /// for a variable, the value stored in it.
    pub(crate) fn target_refno(&mut self, expr: &Expr) -> Eval<i32> {
        if let ExprKind::Ident(name) = &expr.kind {
            if let Some(local) = self.scopes.get(name) {
                return Ok(local.as_int());
            }
            if let Some(refno) = self.world.refno_of(name) {
                return Ok(refno.get());
            }
        }
        self.eval(expr)
    }
}
