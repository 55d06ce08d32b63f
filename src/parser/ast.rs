// AST (Abstract Syntax Tree) definitions for the toy language

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Declared scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Int,
    Float,
    Bool,
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::Int => f.write_str("int"),
            BaseType::Float => f.write_str("float"),
            BaseType::Bool => f.write_str("bool"),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
    Not, // !x
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnOp::Neg => f.write_str("-"),
            UnOp::Not => f.write_str("!"),
        }
    }
}

/// Node kinds; one per [`AstNode`] variant (plus the switch arms in [`CaseNode`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Structural
    Program,
    Block,
    FunctionDeclaration,
    Parameters,
    FunctionParam,
    // Declarations
    VariableDeclaration,
    ArrayDeclaration,
    // Statements
    Assignment,
    IfStatement,
    WhileStatement,
    SwitchStatement,
    CaseStatement,
    DefaultCase,
    BreakStatement,
    ContinueStatement,
    ReturnStatement,
    // Expressions
    BinaryOperation,
    UnaryOperation,
    ComparisonOperation,
    LogicalOperation,
    FunctionCall,
    ArrayAccess,
    Identifier,
    Number,
}

/// Function parameter: `type name`
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub param_type: BaseType,
    pub location: SourceLocation,
}

/// Left-hand side of an assignment
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    Variable(String),
    Element { name: String, index: Box<AstNode> },
}

impl AssignTarget {
    pub fn kind(&self) -> NodeKind {
        match self {
            AssignTarget::Variable(_) => NodeKind::Identifier,
            AssignTarget::Element { .. } => NodeKind::ArrayAccess,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AssignTarget::Variable(name) | AssignTarget::Element { name, .. } => name,
        }
    }
}

/// Switch arm
#[derive(Debug, Clone, PartialEq)]
pub enum CaseNode {
    Case {
        value: Box<AstNode>,
        statements: Vec<AstNode>,
        location: SourceLocation,
    },
    Default {
        statements: Vec<AstNode>,
        location: SourceLocation,
    },
}

impl CaseNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            CaseNode::Case { .. } => NodeKind::CaseStatement,
            CaseNode::Default { .. } => NodeKind::DefaultCase,
        }
    }

    pub fn statements(&self) -> &[AstNode] {
        match self {
            CaseNode::Case { statements, .. } | CaseNode::Default { statements, .. } => statements,
        }
    }
}

/// AST nodes representing statements and expressions.
///
/// Every node owns its children; the tree has no sharing and no back-references.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    // Structural
    Program {
        statements: Vec<AstNode>,
        location: SourceLocation,
    },
    Block {
        statements: Vec<AstNode>,
        location: SourceLocation,
    },
    FunctionDeclaration {
        name: String,
        params: Vec<Param>,
        body: Box<AstNode>,
        location: SourceLocation,
    },

    // Declarations
    VariableDeclaration {
        var_type: BaseType,
        name: String,
        initializer: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    ArrayDeclaration {
        elem_type: BaseType,
        name: String,
        size: String,
        initializer: Vec<AstNode>,
        location: SourceLocation,
    },

    // Statements
    Assignment {
        target: AssignTarget,
        value: Box<AstNode>,
        location: SourceLocation,
    },
    If {
        condition: Box<AstNode>,
        then_block: Box<AstNode>,
        else_block: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    While {
        condition: Box<AstNode>,
        body: Box<AstNode>,
        location: SourceLocation,
    },
    Switch {
        expr: Box<AstNode>,
        cases: Vec<CaseNode>,
        location: SourceLocation,
    },
    Break {
        location: SourceLocation,
    },
    Continue {
        location: SourceLocation,
    },
    Return {
        expr: Option<Box<AstNode>>,
        location: SourceLocation,
    },

    // Expressions
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        location: SourceLocation,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<AstNode>,
        location: SourceLocation,
    },
    FunctionCall {
        name: String,
        args: Vec<AstNode>,
        location: SourceLocation,
    },
    ArrayAccess {
        name: String,
        index: Box<AstNode>,
        location: SourceLocation,
    },
    Identifier(String, SourceLocation),
    Number(String, SourceLocation),
}

impl AstNode {
    /// The node's kind. Binary operations split into arithmetic, comparison and logical kinds.
    pub fn kind(&self) -> NodeKind {
        match self {
            AstNode::Program { .. } => NodeKind::Program,
            AstNode::Block { .. } => NodeKind::Block,
            AstNode::FunctionDeclaration { .. } => NodeKind::FunctionDeclaration,
            AstNode::VariableDeclaration { .. } => NodeKind::VariableDeclaration,
            AstNode::ArrayDeclaration { .. } => NodeKind::ArrayDeclaration,
            AstNode::Assignment { .. } => NodeKind::Assignment,
            AstNode::If { .. } => NodeKind::IfStatement,
            AstNode::While { .. } => NodeKind::WhileStatement,
            AstNode::Switch { .. } => NodeKind::SwitchStatement,
            AstNode::Break { .. } => NodeKind::BreakStatement,
            AstNode::Continue { .. } => NodeKind::ContinueStatement,
            AstNode::Return { .. } => NodeKind::ReturnStatement,
            AstNode::BinaryOp { op, .. } if op.is_logical() => NodeKind::LogicalOperation,
            AstNode::BinaryOp { op, .. } if op.is_comparison() => NodeKind::ComparisonOperation,
            AstNode::BinaryOp { .. } => NodeKind::BinaryOperation,
            AstNode::UnaryOp { .. } => NodeKind::UnaryOperation,
            AstNode::FunctionCall { .. } => NodeKind::FunctionCall,
            AstNode::ArrayAccess { .. } => NodeKind::ArrayAccess,
            AstNode::Identifier(..) => NodeKind::Identifier,
            AstNode::Number(..) => NodeKind::Number,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            AstNode::Program { location, .. }
            | AstNode::Block { location, .. }
            | AstNode::FunctionDeclaration { location, .. }
            | AstNode::VariableDeclaration { location, .. }
            | AstNode::ArrayDeclaration { location, .. }
            | AstNode::Assignment { location, .. }
            | AstNode::If { location, .. }
            | AstNode::While { location, .. }
            | AstNode::Switch { location, .. }
            | AstNode::Break { location }
            | AstNode::Continue { location }
            | AstNode::Return { location, .. }
            | AstNode::BinaryOp { location, .. }
            | AstNode::UnaryOp { location, .. }
            | AstNode::FunctionCall { location, .. }
            | AstNode::ArrayAccess { location, .. }
            | AstNode::Identifier(_, location)
            | AstNode::Number(_, location) => *location,
        }
    }
}
