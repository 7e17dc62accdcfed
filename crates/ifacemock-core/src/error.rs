use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("numeric component {numeral:?} of name is out of range")]
    OutOfRange { numeral: String },
}
