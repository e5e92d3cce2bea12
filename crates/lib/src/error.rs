use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Parser error")]
    ParserError(#[from] crate::parser::ParserError),
    #[error("Capital error")]
    CapitalError(#[from] crate::summary::CapitalError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
