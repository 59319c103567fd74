//! Identity Document Value Object
//!
//! A (type, number) pair identifying a person. The pair is unique across
//! users, enforced by the store.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum document number length (storage column width)
const DOCUMENT_NUMBER_MAX_LENGTH: usize = 32;

/// Kind of identity document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum DocumentType {
    /// National identity document
    #[serde(rename = "DNI")]
    #[display("DNI")]
    Dni,
    /// Foreigner identity card
    #[serde(rename = "CE")]
    #[display("CE")]
    Ce,
    /// Passport
    #[serde(rename = "PASSPORT")]
    #[display("PASSPORT")]
    Passport,
}

impl DocumentType {
    /// String code for storage and the API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Dni => "DNI",
            Self::Ce => "CE",
            Self::Passport => "PASSPORT",
        }
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DNI" => Some(Self::Dni),
            "CE" => Some(Self::Ce),
            "PASSPORT" => Some(Self::Passport),
            _ => None,
        }
    }
}

/// Identity document: type plus non-blank number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    doc_type: DocumentType,
    number: String,
}

impl Document {
    /// Create a new document with validation
    pub fn new(doc_type: DocumentType, number: impl Into<String>) -> AppResult<Self> {
        let number = number.into().trim().to_string();

        if number.is_empty() {
            return Err(AppError::bad_request("Document number cannot be blank"));
        }

        if number.len() > DOCUMENT_NUMBER_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Document number must be at most {} characters",
                DOCUMENT_NUMBER_MAX_LENGTH
            )));
        }

        Ok(Self { doc_type, number })
    }

    /// Create from database values (assumed already validated)
    pub fn from_db(doc_type: DocumentType, number: impl Into<String>) -> Self {
        Self {
            doc_type,
            number: number.into(),
        }
    }

    #[inline]
    pub fn doc_type(&self) -> DocumentType {
        self.doc_type
    }

    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }
}
