use crate::ir::Argument;
use crate::ir::ConstantValue;
use crate::ir::DirectiveAnnotation;
use crate::ir::Document;
use crate::ir::Selection;
use crate::ir::Value;

/// Print a document to canonical text.
///
/// The output is the operation text persisted-query ids are computed from,
/// and the stable input for source hashes: identical IR always prints
/// identically.
pub fn print_document(document: &Document) -> String {
    let mut printer = Printer::default();
    printer.print_document(document);
    printer.out
}

#[derive(Default)]
struct Printer {
    indent: usize,
    out: String,
}
impl Printer {
    fn print_document(&mut self, document: &Document) {
        match document {
            Document::Fragment(fragment) => {
                self.out.push_str(&format!(
                    "fragment {} on {}",
                    fragment.name, fragment.type_condition,
                ));
                self.print_directives(&fragment.directives);
                self.print_selections(&fragment.selections);
            },

            Document::Operation(operation) => {
                self.out.push_str(&format!(
                    "{} {}",
                    operation.kind.name(),
                    operation.name,
                ));
                if !operation.variable_definitions.is_empty() {
                    let variables = operation
                        .variable_definitions
                        .iter()
                        .map(|var_def| {
                            let mut printed = format!(
                                "${}: {}",
                                var_def.name, var_def.type_annotation,
                            );
                            if let Some(default) = &var_def.default_value {
                                printed.push_str(" = ");
                                printed.push_str(&print_value(default));
                            }
                            printed
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    self.out.push_str(&format!("({variables})"));
                }
                self.print_directives(&operation.directives);
                self.print_selections(&operation.selections);
            },

            Document::SplitOperation(split) => {
                self.out.push_str(&format!(
                    "split operation {} on {}",
                    split.name, split.type_name,
                ));
                self.print_selections(&split.selections);
            },
        }
        self.out.push('\n');
    }

    fn print_selections(&mut self, selections: &[Selection]) {
        self.out.push_str(" {");
        self.indent += 1;
        for selection in selections {
            self.newline();
            self.print_selection(selection);
        }
        self.indent -= 1;
        self.newline();
        self.out.push('}');
    }

    fn print_selection(&mut self, selection: &Selection) {
        match selection {
            Selection::Condition(node) => {
                self.out.push_str(&format!(
                    "... @{}(if: {})",
                    if node.passing_value { "include" } else { "skip" },
                    print_value(&node.value),
                ));
                self.print_selections(&node.selections);
            },

            Selection::ConnectionField(node) => {
                self.print_field_header(
                    node.alias.as_deref(),
                    &node.name,
                    &node.arguments,
                );
                self.out.push_str(&format!(
                    " @connection(label: \"{}\"{})",
                    node.label,
                    if node.stream.is_some() { ", stream: true" } else { "" },
                ));
                self.print_directives(&node.directives);
                self.print_selections(&node.selections);
            },

            Selection::Defer(node) => {
                self.out.push_str(&format!(
                    "... @defer(label: \"{}\"{})",
                    node.label,
                    match &node.if_arg {
                        Some(value) => format!(", if: {}", print_value(value)),
                        None => String::new(),
                    },
                ));
                self.print_selections(&node.selections);
            },

            Selection::FragmentSpread(node) => {
                self.out.push_str(&format!("...{}", node.fragment_name));
                self.print_directives(&node.directives);
            },

            Selection::InlineFragment(node) => {
                match &node.type_condition {
                    Some(type_condition) =>
                        self.out.push_str(&format!("... on {type_condition}")),
                    None => self.out.push_str("..."),
                }
                self.print_directives(&node.directives);
                self.print_selections(&node.selections);
            },

            Selection::LinkedField(node) => {
                self.print_field_header(
                    node.alias.as_deref(),
                    &node.name,
                    &node.arguments,
                );
                self.print_directives(&node.directives);
                self.print_selections(&node.selections);
            },

            Selection::ModuleImport(node) => {
                self.out.push_str(&format!(
                    "... @module_import(name: \"{}\", module: \"{}\")",
                    node.fragment_name, node.module,
                ));
                self.print_selections(&node.selections);
            },

            Selection::ScalarField(node) => {
                self.print_field_header(
                    node.alias.as_deref(),
                    &node.name,
                    &node.arguments,
                );
                self.print_directives(&node.directives);
            },

            Selection::Stream(node) => {
                self.out.push_str(&format!(
                    "... @stream(label: \"{}\", initial_count: {}{})",
                    node.label,
                    print_value(&node.initial_count),
                    match &node.if_arg {
                        Some(value) => format!(", if: {}", print_value(value)),
                        None => String::new(),
                    },
                ));
                self.print_selections(&node.selections);
            },
        }
    }

    fn print_field_header(
        &mut self,
        alias: Option<&str>,
        name: &str,
        arguments: &[Argument],
    ) {
        if let Some(alias) = alias
            && alias != name
        {
            self.out.push_str(&format!("{alias}: "));
        }
        self.out.push_str(name);
        if !arguments.is_empty() {
            let printed = arguments
                .iter()
                .map(|arg| format!("{}: {}", arg.name, print_value(&arg.value)))
                .collect::<Vec<_>>()
                .join(", ");
            self.out.push_str(&format!("({printed})"));
        }
    }

    fn print_directives(&mut self, directives: &[DirectiveAnnotation]) {
        for directive in directives {
            self.out.push_str(&format!(" @{}", directive.name));
            if !directive.arguments.is_empty() {
                let printed = directive
                    .arguments
                    .iter()
                    .map(|arg| format!("{}: {}", arg.name, print_value(&arg.value)))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.out.push_str(&format!("({printed})"));
            }
        }
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }
}

fn print_value(value: &Value) -> String {
    match value {
        Value::List(values) => format!(
            "[{}]",
            values.iter().map(print_value).collect::<Vec<_>>().join(", "),
        ),

        Value::Literal(constant) => match constant {
            ConstantValue::Bool(value) => value.to_string(),
            ConstantValue::Enum(value) => value.clone(),
            ConstantValue::Float(value) => value.to_string(),
            ConstantValue::Int(value) => value.to_string(),
            ConstantValue::Null => "null".to_string(),
            ConstantValue::String(value) => format!("{value:?}"),
        },

        Value::Object(entries) => format!(
            "{{{}}}",
            entries
                .iter()
                .map(|(key, value)| format!("{key}: {}", print_value(value)))
                .collect::<Vec<_>>()
                .join(", "),
        ),

        Value::Variable(name) => format!("${name}"),
    }
}
