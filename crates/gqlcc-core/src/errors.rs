use crate::loc;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for operations that accumulate every diagnostic they find
/// before failing, rather than bailing on the first.
pub type DiagnosticsResult<T> = std::result::Result<T, Vec<UserError>>;

/// Invalid directive or GraphQL usage in application source.
///
/// Every variant carries at least one [`loc::SourceLocation`] so the error
/// can be shown against the developer's own code. These never crash the
/// process: the orchestrator collects them per cycle and reports them
/// together.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum UserError {
    #[error(
        "Operations must be named; the name becomes the generated artifact's \
        module name"
    )]
    AnonymousOperation {
        location: loc::SourceLocation,
    },

    #[error(
        "The @{directive_name} directive requires an 'if' argument"
    )]
    ConditionMissingIfArgument {
        directive_name: String,
        location: loc::SourceLocation,
    },

    #[error(
        "Invalid usage of @connection_resolver, expected field to have shape \
        'field {{ edges {{ node {{ ... }} }} }}'"
    )]
    ConnectionInvalidNodeShape {
        location: loc::SourceLocation,
    },

    #[error(
        "Invalid use of @connection_resolver, could not generate a default \
        label that is unique. Specify a unique 'label' as a literal string"
    )]
    ConnectionLabelCollision {
        first: loc::SourceLocation,
        second: loc::SourceLocation,
    },

    #[error(
        "Invalid usage of @connection_resolver, expected a static string \
        'label'. Labels may be the document name ('{document_name}') or be \
        prefixed with the document name ('{document_name}$<name>')"
    )]
    ConnectionLabelInvalid {
        document_name: String,
        location: loc::SourceLocation,
    },

    #[error(
        "Invalid use of @connection_resolver, the provided label is not \
        unique. Specify a unique 'label' as a literal string"
    )]
    ConnectionLabelNotUnique {
        first: loc::SourceLocation,
        second: loc::SourceLocation,
    },

    #[error(
        "Invalid use of @connection_resolver, fields 'edges' and 'pageInfo' \
        must be fetched"
    )]
    ConnectionMissingEdgesOrPageInfo {
        location: loc::SourceLocation,
    },

    #[error(
        "@connection_resolver fields must return a single value, not a list, \
        found '{type_string}'"
    )]
    ConnectionOnListField {
        type_string: String,
        location: loc::SourceLocation,
    },

    #[error(
        "The @connection_resolver directive is not supported on scalar \
        fields, only fields returning an object/interface/union"
    )]
    ConnectionOnScalarField {
        location: loc::SourceLocation,
    },

    #[error(
        "Invalid use of @connection_resolver, selections on the connection \
        must be linked or scalar fields"
    )]
    ConnectionSelectionNotAField {
        location: loc::SourceLocation,
    },

    #[error(
        "Invalid use of @stream_connection_resolver, 'initial_count' is \
        required and must be an integer or variable of type 'Int!'"
    )]
    ConnectionStreamInitialCountInvalid {
        location: loc::SourceLocation,
    },

    #[error(
        "Direct use of the 'js' field is not allowed, use @match/@module \
        instead"
    )]
    DirectJsFieldUse {
        location: loc::SourceLocation,
    },

    #[error("Parse error in GraphQL document: {message}")]
    DocumentParseError {
        message: String,
        location: loc::SourceLocation,
    },

    #[error("Found multiple documents named '{document_name}'")]
    DuplicateDocumentName {
        document_name: String,
        first: loc::SourceLocation,
        second: loc::SourceLocation,
    },

    #[error(
        "The label '{label}' is not unique within this document; each \
        @defer/@stream branch must produce a distinct label"
    )]
    DuplicateIncrementalLabel {
        label: String,
        first: loc::SourceLocation,
        second: loc::SourceLocation,
    },

    #[error(
        "Expected the '{argument_name}' value to @{directive_name} to be a \
        string literal"
    )]
    ExpectedStringLiteralArgument {
        argument_name: String,
        directive_name: String,
        location: loc::SourceLocation,
    },

    #[error(
        "Field '{field_name}' has a composite type and must have a selection \
        of subfields"
    )]
    FieldMissingCompositeSelections {
        field_name: String,
        location: loc::SourceLocation,
    },

    #[error(
        "The @{directive_name} directive requires an 'if: ${variable_name}' \
        argument. This is a temporary restriction during rollout of \
        incremental data delivery"
    )]
    IncrementalDeliveryIfArgument {
        directive_name: String,
        variable_name: String,
        location: loc::SourceLocation,
    },

    #[error(
        "Invalid @match selection: each concrete variant/implementor of \
        '{abstract_type}' may be matched against at-most once, but \
        '{type_name}' was matched against multiple times"
    )]
    MatchDuplicateTypeCondition {
        abstract_type: String,
        type_name: String,
        first: loc::SourceLocation,
        second: loc::SourceLocation,
    },

    #[error(
        "@match used on incompatible field '{field_name}'. @match may only \
        be used with fields that accept a 'supported: [String!]!' argument"
    )]
    MatchFieldMissingSupportedArgument {
        field_name: String,
        location: loc::SourceLocation,
    },

    #[error(
        "@match used on incompatible field '{field_name}'. @match may only \
        be used with fields that return a union or interface"
    )]
    MatchFieldMustReturnAbstractType {
        field_name: String,
        location: loc::SourceLocation,
    },

    #[error(
        "@match used on incompatible field '{field_name}'. @match may only \
        be used with fields whose parent type is an interface or object, \
        got invalid type '{type_string}'"
    )]
    MatchInvalidParentType {
        field_name: String,
        type_string: String,
        location: loc::SourceLocation,
    },

    #[error(
        "Invalid @match selection: all selections should be fragment spreads \
        with @module"
    )]
    MatchInvalidSelection {
        locations: Vec<loc::SourceLocation>,
    },

    #[error(
        "Invalid @match selection: selections must match against concrete \
        variants/implementors of type '{field_type}'. Got '{type_name}', \
        {suggestions}"
    )]
    MatchTypeNotAMember {
        field_type: String,
        type_name: String,
        suggestions: String,
        locations: Vec<loc::SourceLocation>,
    },

    #[error(
        "@module used on invalid fragment spread '...{fragment_name}'. \
        @module requires the fragment type '{type_name}' to have a \
        'js(module: String!): JSDependency' field"
    )]
    ModuleFragmentMissingJsField {
        fragment_name: String,
        type_name: String,
        location: loc::SourceLocation,
    },

    #[error(
        "Using @module requires the schema to define a scalar 'JSDependency' \
        type"
    )]
    ModuleMissingJsDependencyType {
        location: loc::SourceLocation,
    },

    #[error(
        "@module used on invalid fragment spread '...{fragment_name}'. \
        @module may only be used with fragments on a concrete (object) type, \
        but the fragment has abstract type '{type_string}'"
    )]
    ModuleOnAbstractType {
        fragment_name: String,
        type_string: String,
        spread_location: loc::SourceLocation,
        fragment_location: loc::SourceLocation,
    },

    #[error(
        "@module used on invalid fragment spread '...{fragment_name}'. \
        @module may not have additional directives"
    )]
    ModuleWithAdditionalDirectives {
        fragment_name: String,
        location: loc::SourceLocation,
    },

    #[error("@module does not support @arguments")]
    ModuleWithArguments {
        location: loc::SourceLocation,
    },

    #[error("Field '{field_name}' is a scalar and cannot have a sub-selection")]
    SelectionsOnScalarField {
        field_name: String,
        location: loc::SourceLocation,
    },

    #[error("Invalid use of @stream, the 'initial_count' argument is required")]
    StreamInitialCountRequired {
        location: loc::SourceLocation,
    },

    #[error("Invalid use of @stream on non-plural field '{field_name}'")]
    StreamOnNonListField {
        field_name: String,
        location: loc::SourceLocation,
    },

    #[error("Invalid use of @stream on scalar field '{field_name}'")]
    StreamOnScalarField {
        field_name: String,
        location: loc::SourceLocation,
    },

    #[error(
        "The `__typename` field cannot be selected directly on Query, \
        Mutation or Subscription"
    )]
    TypenameOnOperationRoot {
        location: loc::SourceLocation,
    },

    #[error("Fragment '{fragment_name}' is not defined")]
    UndefinedFragment {
        fragment_name: String,
        location: loc::SourceLocation,
    },

    #[error("Type '{type_name}' has no field named '{field_name}'")]
    UnknownField {
        type_name: String,
        field_name: String,
        location: loc::SourceLocation,
    },

    #[error("Type '{type_name}' is not defined in the schema")]
    UnknownType {
        type_name: String,
        location: loc::SourceLocation,
    },
}
impl UserError {
    /// Every source location this diagnostic cites. Guaranteed non-empty.
    pub fn locations(&self) -> Vec<&loc::SourceLocation> {
        match self {
            Self::AnonymousOperation { location }
            | Self::ConditionMissingIfArgument { location, .. }
            | Self::ConnectionInvalidNodeShape { location }
            | Self::ConnectionLabelInvalid { location, .. }
            | Self::ConnectionMissingEdgesOrPageInfo { location }
            | Self::ConnectionOnListField { location, .. }
            | Self::ConnectionOnScalarField { location }
            | Self::ConnectionSelectionNotAField { location }
            | Self::ConnectionStreamInitialCountInvalid { location }
            | Self::DirectJsFieldUse { location }
            | Self::DocumentParseError { location, .. }
            | Self::ExpectedStringLiteralArgument { location, .. }
            | Self::FieldMissingCompositeSelections { location, .. }
            | Self::IncrementalDeliveryIfArgument { location, .. }
            | Self::MatchFieldMissingSupportedArgument { location, .. }
            | Self::MatchFieldMustReturnAbstractType { location, .. }
            | Self::MatchInvalidParentType { location, .. }
            | Self::ModuleFragmentMissingJsField { location, .. }
            | Self::ModuleMissingJsDependencyType { location }
            | Self::ModuleWithAdditionalDirectives { location, .. }
            | Self::ModuleWithArguments { location }
            | Self::SelectionsOnScalarField { location, .. }
            | Self::StreamInitialCountRequired { location }
            | Self::StreamOnNonListField { location, .. }
            | Self::StreamOnScalarField { location, .. }
            | Self::TypenameOnOperationRoot { location }
            | Self::UndefinedFragment { location, .. }
            | Self::UnknownField { location, .. }
            | Self::UnknownType { location, .. }
                => vec![location],

            Self::ConnectionLabelCollision { first, second }
            | Self::ConnectionLabelNotUnique { first, second }
            | Self::DuplicateDocumentName { first, second, .. }
            | Self::DuplicateIncrementalLabel { first, second, .. }
            | Self::MatchDuplicateTypeCondition { first, second, .. }
                => vec![first, second],

            Self::ModuleOnAbstractType {
                spread_location,
                fragment_location,
                ..
            } => vec![spread_location, fragment_location],

            Self::MatchInvalidSelection { locations }
            | Self::MatchTypeNotAMember { locations, .. }
                => locations.iter().collect(),
        }
    }
}

/// A broken compiler invariant. Fatal for the current compile cycle but
/// never user-displayable as a source diagnostic.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("Failed to {action} `{}`", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    #[error("Schema contract violated: {message}")]
    SchemaContract {
        message: String,
    },

    #[error("Writer '{writer_name}' references unknown language tag '{tag}'")]
    UnknownLanguageTag {
        writer_name: String,
        tag: String,
    },

    #[error("Writer '{writer_name}' references unknown parser '{parser_name}'")]
    UnknownParser {
        writer_name: String,
        parser_name: String,
    },
}
