use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for sheetmaker operations
#[derive(Error, Diagnostic, Debug)]
pub enum SheetError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(sheetmaker::io))]
    Io { path: PathBuf, message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(sheetmaker::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Nothing to compose: {message}")]
    #[diagnostic(
        code(sheetmaker::empty_input),
        help("Add at least one readable image")
    )]
    EmptyInput { message: String },

    #[error("Failed to load image {path}: {message}")]
    #[diagnostic(code(sheetmaker::image_load))]
    ImageLoad { path: PathBuf, message: String },

    #[error("Invalid region for '{name}': {message}")]
    #[diagnostic(code(sheetmaker::invalid_region))]
    InvalidRegion { name: String, message: String },

    #[error("Malformed metadata: {message}")]
    #[diagnostic(code(sheetmaker::metadata))]
    MalformedMetadata {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid number: {message}")]
    #[diagnostic(code(sheetmaker::numeric))]
    InvalidNumericInput {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Codec error with {path}: {message}")]
    #[diagnostic(code(sheetmaker::codec))]
    Codec { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, SheetError>;
