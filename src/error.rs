use std::fmt;

/// Error when encoding or decoding a variable-length integer stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// A value above [`MAX_VALUE`](crate::MAX_VALUE) was passed to an
    /// encoder, or a decoder's table/group index ran past its bound
    /// (the shape corrupt input takes).
    Overflow,
    /// The operation is invalid under the current configuration, e.g.
    /// encoding zero with the zero offset disabled, or shrinking a queue
    /// below its used count.
    Domain(&'static str),
    /// Decoding required more bits than the supplied input contained.
    EndOfInput,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Overflow => write!(f, "value or decode index out of range"),
            CodecError::Domain(msg) => write!(f, "{}", msg),
            CodecError::EndOfInput => write!(f, "input ended before the codeword completed"),
        }
    }
}

impl std::error::Error for CodecError {}
