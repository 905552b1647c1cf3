pub mod types;

pub use types::{
    ApiResponse, DocumentValidation, ResponseType, StoredDocument, ValidateDocumentRequest,
    ValidationReport,
};
