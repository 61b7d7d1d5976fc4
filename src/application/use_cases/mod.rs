/// Use cases module containing application business logic orchestration
mod build_document;

pub use build_document::BuildDocumentUseCase;
