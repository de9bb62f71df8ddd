use thiserror::Error;

/// Why a command line could not be carried out.
///
/// Every variant renders as a one-line diagnostic suitable for writing
/// straight back to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Field 0 is not one of the known command keywords.
    #[error("unrecognized command: {keyword}")]
    UnrecognizedCommand { keyword: String },

    /// The command requires more arguments than were supplied.
    #[error("{keyword}: missing argument")]
    MissingArgument { keyword: &'static str },

    /// The command requires a numeric argument and field 1 is not one.
    #[error("{keyword}: argument must be numeric")]
    NonNumericArgument { keyword: &'static str },

    /// A log position outside `[1, MAX_INSTRUCTIONS]`.
    #[error("log position out of range: {position}")]
    LogIndexOutOfRange { position: i32 },
}
