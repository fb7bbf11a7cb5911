//! Argument transformers and the constructor-argument compiler.
//!
//! Each transformer lowers one resolved argument node (or an environment
//! binding captured at descriptor-parse time) into one expression string in
//! the emitted runtime source. [`compile_constructor_arguments`] drives the
//! full pipeline for a node: parse each descriptor, resolve the argument in
//! the node's own argument map, lower it, and collect the expressions in
//! constructor order.
//!
//! Unsupported node-kind/transformer pairings are hard, immediate failures:
//! a silent fallback would corrupt generated code.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use recforge_spec::{ArgumentNode, ArgumentSource};

use crate::descriptor::{self, Descriptor, TransformerKind};
use crate::error::{CodegenError, Result};
use crate::naming::{to_camel_case, to_pascal_case};

/// A parameter reference: `%key%` or `%(type)key%`, matched at the start
/// of a literal value.
static PARAM_REF_HEAD: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)] // Safe: pattern is a literal
    Regex::new(r"^%(\([\w.\-]+\))?([\w.\-]+)%").expect("parameter pattern is valid")
});

/// A parameter reference anywhere inside a `${...}` expression.
static PARAM_REF: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)] // Safe: pattern is a literal
    Regex::new(r"%(\([\w.\-]+\))?([\w.\-]+)%").expect("parameter pattern is valid")
});

/// A `${...}` expression wrapper around a literal value.
static EXPR_WRAPPER: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)] // Safe: pattern is a literal
    Regex::new(r"^\$\{.+\}$").expect("wrapper pattern is valid")
});

/// Lower one parsed descriptor plus its resolved argument node into an
/// expression, or `None` when an optional argument is absent.
///
/// `config_var` names the configuration accessor visible at the call site
/// (`None` inside configuration code itself, where lookups are unprefixed).
pub fn transform(
    descriptor: &Descriptor,
    node: Option<&ArgumentNode>,
    config_var: Option<&str>,
) -> Result<Option<String>> {
    // EnvVariable carries its payload on the kind and ignores nodes.
    if let TransformerKind::EnvVariable { var_name } = &descriptor.kind {
        return Ok(Some(var_name.clone()));
    }

    let Some(node) = node else {
        if descriptor.optional {
            return Ok(None);
        }
        // Keyless descriptors have nothing better to report than the kind.
        return Err(CodegenError::MissingRequiredArgument(match &descriptor.arg_key {
            Some(key) => key.clone(),
            None => descriptor.kind.name().to_string(),
        }));
    };

    let expr = match &descriptor.kind {
        TransformerKind::Literal => literal(node, config_var)?,
        TransformerKind::FieldSetter => field_setter(node)?,
        TransformerKind::FieldGetter => field_getter(node)?,
        TransformerKind::RandomSetInspector => random_set_inspector(node, config_var)?,
        TransformerKind::FunctionRef => function_ref(node, config_var)?,
        TransformerKind::EnvVariable { .. } => unreachable!("handled above"),
    };

    Ok(Some(expr))
}

/// Compile a node's constructor arguments into an ordered expression list.
///
/// Absent optional arguments are omitted entirely, so the output may be
/// shorter than the descriptor list. A non-optional descriptor whose key
/// has no matching argument node fails with
/// [`CodegenError::MissingRequiredArgument`].
pub fn compile_constructor_arguments(
    source: &dyn ArgumentSource,
    config_var: Option<&str>,
) -> Result<Vec<String>> {
    let mut expressions = Vec::new();

    for raw in source.constructor_args() {
        let descriptor = descriptor::parse(raw)?;
        let node = descriptor
            .arg_key
            .as_deref()
            .and_then(|key| source.argument(key));

        if let Some(expr) = transform(&descriptor, node, config_var)? {
            expressions.push(expr);
        }
    }

    Ok(expressions)
}

fn config_prefix(config_var: Option<&str>) -> String {
    match config_var {
        Some(name) => format!("{name}."),
        None => String::new(),
    }
}

/// Lower a literal node.
///
/// Three shapes, checked in order:
/// 1. `%key%` — a single configuration-parameter reference, lowered to a
///    typed `parameter<T>("key")` lookup using the literal's declared type.
/// 2. `${expr}` — an arithmetic expression over parameter references; every
///    embedded `%key%` / `%(type)key%` is expanded to a lookup and the
///    whole expression is wrapped in a `static_cast` to the declared type.
/// 3. Anything else — emitted verbatim, quoted when the declared type is
///    String.
fn literal(node: &ArgumentNode, config_var: Option<&str>) -> Result<String> {
    let ArgumentNode::Literal {
        value_type, value, ..
    } = node
    else {
        return Err(unsupported(node));
    };

    let prefix = config_prefix(config_var);
    let declared_type = value_type.cpp_name();
    let value = value.trim();

    if let Some(captures) = PARAM_REF_HEAD.captures(value) {
        return Ok(format!(
            "{prefix}parameter<{declared_type}>(\"{}\")",
            &captures[2]
        ));
    }

    if EXPR_WRAPPER.is_match(value) {
        let expanded = PARAM_REF.replace_all(value, |captures: &Captures| {
            // An embedded `(type)` annotation overrides the declared type
            // for that one lookup.
            let lookup_type = captures
                .get(1)
                .map_or(declared_type.as_str(), |m| trim_parens(m.as_str()));
            format!("{prefix}parameter<{lookup_type}>(\"{}\")", &captures[2])
        });
        // Strip the `${` ... `}` wrapper around the expanded expression.
        let inner = &expanded[2..expanded.len() - 1];
        return Ok(format!("static_cast<{declared_type}>({inner})"));
    }

    if declared_type == "String" {
        Ok(format!("\"{value}\""))
    } else {
        Ok(value.to_string())
    }
}

fn trim_parens(s: &str) -> &str {
    &s[1..s.len() - 1]
}

/// Lower a field or reference ref to a pointer-to-member setter reference.
fn field_setter(node: &ArgumentNode) -> Result<String> {
    match node {
        ArgumentNode::DirectFieldRef {
            record_type_key,
            field_name,
            ..
        } => Ok(format!(
            "&{}::{}",
            to_pascal_case(record_type_key),
            to_camel_case(field_name)
        )),
        ArgumentNode::RecordReferenceRef {
            record_type_key,
            reference_name,
            ..
        } => Ok(format!(
            "&{}::{}",
            to_pascal_case(record_type_key),
            to_camel_case(reference_name)
        )),
        other => Err(unsupported(other)),
    }
}

/// Lower a field ref to a typed getter construction expression.
fn field_getter(node: &ArgumentNode) -> Result<String> {
    match node {
        ArgumentNode::DirectFieldRef {
            record_type_key,
            field_name,
            field_type,
            ..
        } => {
            let type_name = to_pascal_case(record_type_key);
            Ok(format!(
                "new FieldGetter<{t}, {f}>(&{t}::{m})",
                t = type_name,
                f = field_type.cpp_name(),
                m = to_camel_case(field_name)
            ))
        }
        ArgumentNode::ReferencedFieldRef {
            record_type_key,
            reference_name,
            target_type_key,
            field_name,
            field_type,
            ..
        } => {
            let type_name = to_pascal_case(record_type_key);
            let target_name = to_pascal_case(target_type_key);
            Ok(format!(
                "new ReferencedRecordFieldGetter<{t}, {r}, {f}>(&{t}::{l}, &{r}::{m})",
                t = type_name,
                r = target_name,
                f = field_type.cpp_name(),
                l = to_camel_case(reference_name),
                m = to_camel_case(field_name)
            ))
        }
        other => Err(unsupported(other)),
    }
}

/// Lower a field or reference ref to a generator-pool inspector access for
/// the record type the generator is responsible for.
fn random_set_inspector(node: &ArgumentNode, config_var: Option<&str>) -> Result<String> {
    let prefix = config_prefix(config_var);
    let type_key = match node {
        ArgumentNode::DirectFieldRef {
            record_type_key, ..
        } => record_type_key,
        ArgumentNode::RecordReferenceRef {
            target_type_key, ..
        } => target_type_key,
        other => return Err(unsupported(other)),
    };

    Ok(format!(
        "{prefix}generatorPool().get<{}Generator>().inspector()",
        to_pascal_case(type_key)
    ))
}

/// Lower a function ref to a typed function-registry lookup.
fn function_ref(node: &ArgumentNode, config_var: Option<&str>) -> Result<String> {
    let ArgumentNode::FunctionRef {
        function_name,
        concrete_type,
        ..
    } = node
    else {
        return Err(unsupported(node));
    };

    Ok(format!(
        "{}func< {concrete_type} >(\"{function_name}\")",
        config_prefix(config_var)
    ))
}

fn unsupported(node: &ArgumentNode) -> CodegenError {
    CodegenError::UnsupportedArgument {
        key: node.key().to_string(),
        kind: node.kind_name(),
    }
}
