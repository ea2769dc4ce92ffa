//! Abstract syntax tree for game code.
//!
//! The front end turns game source into these nodes; the engine evaluates
//! them directly. Every node carries the [`SourceLocation`] it was parsed
//! from so runtime faults can point back at the game source.

use std::fmt;

use gdesc_foundation::SourceLocation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::refno::Category;

// =============================================================================
// Operators
// =============================================================================

/// Binary operators, C precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOp {
    /// `||` (short-circuit)
    Or,
    /// `&&` (short-circuit)
    And,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&`
    BitAnd,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `<<`
    Shl,
    /// `>>` (arithmetic)
    Shr,
    /// `>>>` (logical)
    UShr,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
}

impl BinaryOp {
    const ALL: [Self; 19] = [
        Self::Or,
        Self::And,
        Self::BitOr,
        Self::BitXor,
        Self::BitAnd,
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Gt,
        Self::Le,
        Self::Ge,
        Self::Shl,
        Self::Shr,
        Self::UShr,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Rem,
    ];

    /// Returns the source spelling of this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
        }
    }

    /// Looks up an operator by its source spelling.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Assignment operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `*=`
    Mul,
    /// `/=`
    Div,
    /// `%=`
    Rem,
    /// `+=`
    Add,
    /// `-=`
    Sub,
    /// `<<=`
    Shl,
    /// `>>=`
    Shr,
    /// `>>>=`
    UShr,
    /// `&=`
    BitAnd,
    /// `^=`
    BitXor,
    /// `|=`
    BitOr,
}

impl AssignOp {
    /// The binary operator a compound assignment combines with, or `None`
    /// for plain `=`.
    #[must_use]
    pub const fn binary(self) -> Option<BinaryOp> {
        match self {
            Self::Assign => None,
            Self::Mul => Some(BinaryOp::Mul),
            Self::Div => Some(BinaryOp::Div),
            Self::Rem => Some(BinaryOp::Rem),
            Self::Add => Some(BinaryOp::Add),
            Self::Sub => Some(BinaryOp::Sub),
            Self::Shl => Some(BinaryOp::Shl),
            Self::Shr => Some(BinaryOp::Shr),
            Self::UShr => Some(BinaryOp::UShr),
            Self::BitAnd => Some(BinaryOp::BitAnd),
            Self::BitXor => Some(BinaryOp::BitXor),
            Self::BitOr => Some(BinaryOp::BitOr),
        }
    }
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `!x`
    Not,
    /// `~x`
    BitNot,
    /// `++x`
    PreInc,
    /// `--x`
    PreDec,
    /// `x++`
    PostInc,
    /// `x--`
    PostDec,
}

// =============================================================================
// Expressions
// =============================================================================

/// An expression node. Every expression evaluates to an `i32`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Expr {
    /// What kind of expression this is.
    pub kind: ExprKind,
    /// Where it came from.
    pub location: SourceLocation,
}

/// The shape of an expression.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExprKind {
    /// Integer literal like `42`
    Int(i32),
    /// `true` or `false`
    Bool(bool),
    /// Character literal like `'a'`
    Char(char),
    /// Text literal like `"You see a lamp."`
    Text(String),
    /// Plain identifier, local or global
    Ident(String),
    /// `array[index]`
    Index {
        /// Array name.
        array: String,
        /// Element index.
        index: Box<Expr>,
    },
    /// Prefix or postfix operator application
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
    },
    /// Infix operator application
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// `condition ? then : otherwise`
    Conditional {
        /// The test.
        condition: Box<Expr>,
        /// Value when the test is nonzero.
        then: Box<Expr>,
        /// Value when the test is zero.
        otherwise: Box<Expr>,
    },
    /// `target op= value`
    Assign {
        /// The assignment operator.
        op: AssignOp,
        /// Left-hand side.
        target: Box<Expr>,
        /// Right-hand side.
        value: Box<Expr>,
    },
    /// `&name`, the refno of a declared entity
    RefOf(String),
    /// `*name`, the variable cell addressed by the refno stored in `name`
    Deref(String),
    /// `name instanceof category`
    InstanceOf {
        /// Identifier to test.
        name: String,
        /// Category it must resolve to.
        category: Category,
    },
    /// `name(args...)`
    Call {
        /// Built-in, proc, or entity name.
        name: String,
        /// Unevaluated arguments.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Creates an expression at the given location.
    #[must_use]
    pub const fn new(kind: ExprKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    /// Creates an expression with a synthesized location.
    #[must_use]
    pub const fn synthetic(kind: ExprKind) -> Self {
        Self::new(kind, SourceLocation::builtin())
    }

    /// Integer literal.
    #[must_use]
    pub const fn int(value: i32) -> Self {
        Self::synthetic(ExprKind::Int(value))
    }

    /// Text literal.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::synthetic(ExprKind::Text(text.into()))
    }

    /// Identifier reference.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::synthetic(ExprKind::Ident(name.into()))
    }

    /// Array element access.
    #[must_use]
    pub fn index(array: impl Into<String>, index: Self) -> Self {
        Self::synthetic(ExprKind::Index {
            array: array.into(),
            index: Box::new(index),
        })
    }

    /// Unary operator application.
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::synthetic(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// Binary operator application.
    #[must_use]
    pub fn binary(op: BinaryOp, left: Self, right: Self) -> Self {
        Self::synthetic(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Ternary conditional.
    #[must_use]
    pub fn conditional(condition: Self, then: Self, otherwise: Self) -> Self {
        Self::synthetic(ExprKind::Conditional {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    /// Assignment or compound assignment.
    #[must_use]
    pub fn assign(op: AssignOp, target: Self, value: Self) -> Self {
        Self::synthetic(ExprKind::Assign {
            op,
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    /// Function, proc, or entity call.
    #[must_use]
    pub fn call(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::synthetic(ExprKind::Call {
            name: name.into(),
            args,
        })
    }

    /// `&name`
    #[must_use]
    pub fn ref_of(name: impl Into<String>) -> Self {
        Self::synthetic(ExprKind::RefOf(name.into()))
    }

    /// `*name`
    #[must_use]
    pub fn deref(name: impl Into<String>) -> Self {
        Self::synthetic(ExprKind::Deref(name.into()))
    }

    /// `name instanceof category`
    #[must_use]
    pub fn instance_of(name: impl Into<String>, category: Category) -> Self {
        Self::synthetic(ExprKind::InstanceOf {
            name: name.into(),
            category,
        })
    }

    /// Returns the identifier name if this is a plain identifier.
    #[must_use]
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the literal text if this is a text literal.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns a copy of this expression at `location`.
    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

// =============================================================================
// Statements
// =============================================================================

/// Where a `break` or `continue` is aimed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JumpTarget {
    /// The innermost enclosing loop.
    Innermost,
    /// The enclosing loop carrying this label.
    Label(String),
    /// The enclosing proc call (`break proc;`).
    Proc,
    /// The enclosing per-turn pass (`break repeat;`).
    Repeat,
}

impl fmt::Display for JumpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Innermost => f.write_str("innermost loop"),
            Self::Label(label) => write!(f, "label {label}"),
            Self::Proc => f.write_str("proc"),
            Self::Repeat => f.write_str("repeat"),
        }
    }
}

/// One name in a local variable declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Declarator {
    /// Local variable name.
    pub name: String,
    /// Optional initializer; the variable starts at 0 without one.
    pub init: Option<Expr>,
}

/// A statement node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stmt {
    /// What kind of statement this is.
    pub kind: StmtKind,
    /// Where it came from.
    pub location: SourceLocation,
}

/// The shape of a statement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StmtKind {
    /// `;`
    Empty,
    /// `{ ... }` with its own block scope
    Block(Block),
    /// Expression evaluated for effect
    Expr(Expr),
    /// `var a, b = 2;`
    Local(Vec<Declarator>),
    /// `if (c1) s1 else if (c2) s2 ... else sN`
    ///
    /// `branches` has one entry per condition, plus an optional trailing
    /// default branch.
    If {
        /// Conditions, tested in order.
        conditions: Vec<Expr>,
        /// Branch per condition, then the optional else branch.
        branches: Vec<Stmt>,
    },
    /// Pre-test loop
    While {
        /// Optional loop label.
        label: Option<String>,
        /// Loop test.
        condition: Expr,
        /// Loop body.
        body: Box<Stmt>,
    },
    /// Post-test loop that runs until the condition becomes true
    RepeatUntil {
        /// Optional loop label.
        label: Option<String>,
        /// Loop body.
        body: Box<Stmt>,
        /// Exit test.
        condition: Expr,
    },
    /// C-style `for (init; test; update) body`
    For {
        /// Optional loop label.
        label: Option<String>,
        /// Initialization statements.
        init: Vec<Stmt>,
        /// Loop test; absent means always true.
        test: Option<Expr>,
        /// Update statements.
        update: Vec<Stmt>,
        /// Loop body.
        body: Box<Stmt>,
    },
    /// `for (var : container) body`, iterating objects located there
    ForEachAt {
        /// Optional loop label.
        label: Option<String>,
        /// Fresh local bound to each object.
        variable: String,
        /// Place or container refno.
        container: Expr,
        /// Loop body.
        body: Box<Stmt>,
    },
    /// `break;`, `break label;`, `break proc;`, `break repeat;`
    Break(JumpTarget),
    /// `continue;`, `continue label;`, `continue proc;`, `continue repeat;`
    Continue(JumpTarget),
    /// `return;` or `return expr;`
    Return(Option<Expr>),
}

impl Stmt {
    /// Creates a statement at the given location.
    #[must_use]
    pub const fn new(kind: StmtKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    /// Creates a statement with a synthesized location.
    #[must_use]
    pub const fn synthetic(kind: StmtKind) -> Self {
        Self::new(kind, SourceLocation::builtin())
    }

    /// Expression statement.
    #[must_use]
    pub const fn expr(expr: Expr) -> Self {
        Self::synthetic(StmtKind::Expr(expr))
    }

    /// Nested block statement.
    #[must_use]
    pub const fn block(block: Block) -> Self {
        Self::synthetic(StmtKind::Block(block))
    }

    /// Single local declaration.
    #[must_use]
    pub fn local(name: impl Into<String>, init: Option<Expr>) -> Self {
        Self::synthetic(StmtKind::Local(vec![Declarator {
            name: name.into(),
            init,
        }]))
    }

    /// If / else-if / else chain.
    #[must_use]
    pub const fn if_chain(conditions: Vec<Expr>, branches: Vec<Self>) -> Self {
        Self::synthetic(StmtKind::If {
            conditions,
            branches,
        })
    }

    /// Pre-test loop.
    #[must_use]
    pub fn while_loop(label: Option<&str>, condition: Expr, body: Self) -> Self {
        Self::synthetic(StmtKind::While {
            label: label.map(str::to_owned),
            condition,
            body: Box::new(body),
        })
    }

    /// Post-test `repeat ... until` loop.
    #[must_use]
    pub fn repeat_until(label: Option<&str>, body: Self, condition: Expr) -> Self {
        Self::synthetic(StmtKind::RepeatUntil {
            label: label.map(str::to_owned),
            body: Box::new(body),
            condition,
        })
    }

    /// C-style for loop.
    #[must_use]
    pub fn for_loop(
        label: Option<&str>,
        init: Vec<Self>,
        test: Option<Expr>,
        update: Vec<Self>,
        body: Self,
    ) -> Self {
        Self::synthetic(StmtKind::For {
            label: label.map(str::to_owned),
            init,
            test,
            update,
            body: Box::new(body),
        })
    }

    /// Loop over the objects located at a place or container.
    #[must_use]
    pub fn for_each_at(
        label: Option<&str>,
        variable: impl Into<String>,
        container: Expr,
        body: Self,
    ) -> Self {
        Self::synthetic(StmtKind::ForEachAt {
            label: label.map(str::to_owned),
            variable: variable.into(),
            container,
            body: Box::new(body),
        })
    }

    /// `break` aimed at `target`.
    #[must_use]
    pub const fn break_to(target: JumpTarget) -> Self {
        Self::synthetic(StmtKind::Break(target))
    }

    /// `continue` aimed at `target`.
    #[must_use]
    pub const fn continue_to(target: JumpTarget) -> Self {
        Self::synthetic(StmtKind::Continue(target))
    }

    /// `return` with an optional value.
    #[must_use]
    pub const fn ret(value: Option<Expr>) -> Self {
        Self::synthetic(StmtKind::Return(value))
    }
}

/// A braced sequence of statements.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Block {
    /// Statements in order.
    pub statements: Vec<Stmt>,
    /// Where the block opens.
    pub location: SourceLocation,
}

impl Block {
    /// Creates a block with a synthesized location.
    #[must_use]
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self {
            statements,
            location: SourceLocation::builtin(),
        }
    }

    /// Returns true if the block has no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl From<Vec<Stmt>> for Block {
    fn from(statements: Vec<Stmt>) -> Self {
        Self::new(statements)
    }
}
