//! Hand-written mocks shared by the integration tests.

mod mock_bookmark_provider;
mod mock_document_repository;
mod mock_page_fetcher;

#[allow(unused_imports)]
pub use mock_bookmark_provider::MockBookmarkProvider;
#[allow(unused_imports)]
pub use mock_document_repository::MockDocumentRepository;
#[allow(unused_imports)]
pub use mock_page_fetcher::MockPageFetcher;
