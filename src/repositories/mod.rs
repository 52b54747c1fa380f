mod store_document_repository;
mod traits;

pub use store_document_repository::StoreDocumentRepository;
pub use traits::DocumentRepository;
