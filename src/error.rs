/// Failures raised while deriving or interpreting a grammar.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("stack underflow: `]` at index {index} has no matching `[`")]
    StackUnderflow { index: usize },

    #[error("production for {symbol:?} has no alternatives")]
    EmptyProduction { symbol: String },
}

pub type Result<T> = std::result::Result<T, Error>;
