//! Renders an AST as an indented tree, one node per line, labelled by [`NodeKind`].

use crate::parser::ast::*;

/// Render the tree rooted at `node`
pub fn render(node: &AstNode) -> String {
    let mut out = String::new();
    render_node(&mut out, node, 0);
    out
}

fn line(out: &mut String, level: usize, kind: NodeKind, detail: &str) {
    out.push_str(&"  ".repeat(level));
    out.push_str(&format!("{kind:?}"));
    if !detail.is_empty() {
        out.push(' ');
        out.push_str(detail);
    }
    out.push('\n');
}

fn render_node(out: &mut String, node: &AstNode, level: usize) {
    let kind = node.kind();
    match node {
        AstNode::Program { statements, .. } | AstNode::Block { statements, .. } => {
            line(out, level, kind, "");
            for stmt in statements {
                render_node(out, stmt, level + 1);
            }
        }
        AstNode::FunctionDeclaration {
            name, params, body, ..
        } => {
            line(out, level, kind, name);
            line(out, level + 1, NodeKind::Parameters, "");
            for param in params {
                let detail = format!("{} {}", param.param_type, param.name);
                line(out, level + 2, NodeKind::FunctionParam, &detail);
            }
            render_node(out, body, level + 1);
        }
        AstNode::VariableDeclaration {
            var_type,
            name,
            initializer,
            ..
        } => {
            line(out, level, kind, &format!("{var_type} {name}"));
            if let Some(init) = initializer {
                render_node(out, init, level + 1);
            }
        }
        AstNode::ArrayDeclaration {
            elem_type,
            name,
            size,
            initializer,
            ..
        } => {
            line(out, level, kind, &format!("{elem_type} {name}[{size}]"));
            for elem in initializer {
                render_node(out, elem, level + 1);
            }
        }
        AstNode::Assignment { target, value, .. } => {
            line(out, level, kind, "");
            match target {
                AssignTarget::Variable(name) => line(out, level + 1, target.kind(), name),
                AssignTarget::Element { name, index } => {
                    line(out, level + 1, target.kind(), name);
                    render_node(out, index, level + 2);
                }
            }
            render_node(out, value, level + 1);
        }
        AstNode::If {
            condition,
            then_block,
            else_block,
            ..
        } => {
            line(out, level, kind, "");
            render_node(out, condition, level + 1);
            render_node(out, then_block, level + 1);
            if let Some(else_block) = else_block {
                render_node(out, else_block, level + 1);
            }
        }
        AstNode::While {
            condition, body, ..
        } => {
            line(out, level, kind, "");
            render_node(out, condition, level + 1);
            render_node(out, body, level + 1);
        }
        AstNode::Switch { expr, cases, .. } => {
            line(out, level, kind, "");
            render_node(out, expr, level + 1);
            for case in cases {
                line(out, level + 1, case.kind(), "");
                if let CaseNode::Case { value, .. } = case {
                    render_node(out, value, level + 2);
                }
                for stmt in case.statements() {
                    render_node(out, stmt, level + 2);
                }
            }
        }
        AstNode::Break { .. } | AstNode::Continue { .. } => line(out, level, kind, ""),
        AstNode::Return { expr, .. } => {
            line(out, level, kind, "");
            if let Some(expr) = expr {
                render_node(out, expr, level + 1);
            }
        }
        AstNode::BinaryOp {
            op, left, right, ..
        } => {
            line(out, level, kind, op.symbol());
            render_node(out, left, level + 1);
            render_node(out, right, level + 1);
        }
        AstNode::UnaryOp { op, operand, .. } => {
            line(out, level, kind, &op.to_string());
            render_node(out, operand, level + 1);
        }
        AstNode::FunctionCall { name, args, .. } => {
            line(out, level, kind, name);
            for arg in args {
                render_node(out, arg, level + 1);
            }
        }
        AstNode::ArrayAccess { name, index, .. } => {
            line(out, level, kind, name);
            render_node(out, index, level + 1);
        }
        AstNode::Identifier(text, _) | AstNode::Number(text, _) => line(out, level, kind, text),
    }
}
