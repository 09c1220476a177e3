use crate::ir::Condition;
use crate::ir::ConnectionField;
use crate::ir::Defer;
use crate::ir::FragmentSpread;
use crate::ir::InlineFragment;
use crate::ir::LinkedField;
use crate::ir::ModuleImport;
use crate::ir::ScalarField;
use crate::ir::Stream;
use crate::loc;

/// One node in a document's selection tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Condition(Condition),
    ConnectionField(ConnectionField),
    Defer(Defer),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
    LinkedField(LinkedField),
    ModuleImport(ModuleImport),
    ScalarField(ScalarField),
    Stream(Stream),
}
impl Selection {
    pub fn loc(&self) -> &loc::SourceLocation {
        match self {
            Self::Condition(node) => &node.loc,
            Self::ConnectionField(node) => &node.loc,
            Self::Defer(node) => &node.loc,
            Self::FragmentSpread(node) => &node.loc,
            Self::InlineFragment(node) => &node.loc,
            Self::LinkedField(node) => &node.loc,
            Self::ModuleImport(node) => &node.loc,
            Self::ScalarField(node) => &node.loc,
            Self::Stream(node) => &node.loc,
        }
    }

    /// Child selections, for the variants that carry them. `ScalarField` and
    /// `FragmentSpread` are leaves.
    pub fn selections(&self) -> Option<&[Selection]> {
        match self {
            Self::Condition(node) => Some(node.selections.as_slice()),
            Self::ConnectionField(node) => Some(node.selections.as_slice()),
            Self::Defer(node) => Some(node.selections.as_slice()),
            Self::FragmentSpread(_) => None,
            Self::InlineFragment(node) => Some(node.selections.as_slice()),
            Self::LinkedField(node) => Some(node.selections.as_slice()),
            Self::ModuleImport(node) => Some(node.selections.as_slice()),
            Self::ScalarField(_) => None,
            Self::Stream(node) => Some(node.selections.as_slice()),
        }
    }

    /// Rebuild this node with a new child list. Leaf variants are returned
    /// unchanged.
    pub fn with_selections(&self, selections: Vec<Selection>) -> Self {
        match self {
            Self::Condition(node) => Self::Condition(Condition {
                selections,
                ..node.clone()
            }),
            Self::ConnectionField(node) => Self::ConnectionField(ConnectionField {
                selections,
                ..node.clone()
            }),
            Self::Defer(node) => Self::Defer(Defer {
                selections,
                ..node.clone()
            }),
            Self::FragmentSpread(node) => Self::FragmentSpread(node.clone()),
            Self::InlineFragment(node) => Self::InlineFragment(InlineFragment {
                selections,
                ..node.clone()
            }),
            Self::LinkedField(node) => Self::LinkedField(node.with_selections(selections)),
            Self::ModuleImport(node) => Self::ModuleImport(ModuleImport {
                selections,
                ..node.clone()
            }),
            Self::ScalarField(node) => Self::ScalarField(node.clone()),
            Self::Stream(node) => Self::Stream(Stream {
                selections,
                ..node.clone()
            }),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Condition(_) => "Condition",
            Self::ConnectionField(_) => "ConnectionField",
            Self::Defer(_) => "Defer",
            Self::FragmentSpread(_) => "FragmentSpread",
            Self::InlineFragment(_) => "InlineFragment",
            Self::LinkedField(_) => "LinkedField",
            Self::ModuleImport(_) => "ModuleImport",
            Self::ScalarField(_) => "ScalarField",
            Self::Stream(_) => "Stream",
        }
    }
}
