use crate::ir::Fragment;
use crate::ir::Metadata;
use crate::ir::Operation;
use crate::ir::Selection;
use crate::ir::SplitOperation;
use crate::loc;

/// One top-level compilation unit. Globally unique by name; immutable once
/// constructed — every rewrite produces a new `Document`.
#[derive(Clone, Debug, PartialEq)]
pub enum Document {
    Fragment(Fragment),
    Operation(Operation),
    SplitOperation(SplitOperation),
}
impl Document {
    pub fn name(&self) -> &str {
        match self {
            Self::Fragment(doc) => doc.name.as_str(),
            Self::Operation(doc) => doc.name.as_str(),
            Self::SplitOperation(doc) => doc.name.as_str(),
        }
    }

    pub fn loc(&self) -> &loc::SourceLocation {
        match self {
            Self::Fragment(doc) => &doc.loc,
            Self::Operation(doc) => &doc.loc,
            Self::SplitOperation(doc) => &doc.loc,
        }
    }

    pub fn selections(&self) -> &[Selection] {
        match self {
            Self::Fragment(doc) => doc.selections.as_slice(),
            Self::Operation(doc) => doc.selections.as_slice(),
            Self::SplitOperation(doc) => doc.selections.as_slice(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            Self::Fragment(doc) => &doc.metadata,
            Self::Operation(doc) => &doc.metadata,
            Self::SplitOperation(doc) => &doc.metadata,
        }
    }

    /// The schema type the root selections are made against.
    pub fn root_type_name(&self) -> &str {
        match self {
            Self::Fragment(doc) => doc.type_condition.as_str(),
            Self::Operation(doc) => doc.type_name.as_str(),
            Self::SplitOperation(doc) => doc.type_name.as_str(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Fragment(_) => "Fragment",
            Self::Operation(_) => "Operation",
            Self::SplitOperation(_) => "SplitOperation",
        }
    }

    pub fn as_fragment(&self) -> Option<&Fragment> {
        match self {
            Self::Fragment(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_operation(&self) -> Option<&Operation> {
        match self {
            Self::Operation(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn with_selections(&self, selections: Vec<Selection>) -> Self {
        match self {
            Self::Fragment(doc) => Self::Fragment(Fragment {
                selections,
                ..doc.clone()
            }),
            Self::Operation(doc) => Self::Operation(Operation {
                selections,
                ..doc.clone()
            }),
            Self::SplitOperation(doc) => Self::SplitOperation(SplitOperation {
                selections,
                ..doc.clone()
            }),
        }
    }

    pub fn with_metadata(&self, metadata: Metadata) -> Self {
        match self {
            Self::Fragment(doc) => Self::Fragment(Fragment {
                metadata,
                ..doc.clone()
            }),
            Self::Operation(doc) => Self::Operation(Operation {
                metadata,
                ..doc.clone()
            }),
            Self::SplitOperation(doc) => Self::SplitOperation(SplitOperation {
                metadata,
                ..doc.clone()
            }),
        }
    }
}
