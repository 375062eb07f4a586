pub mod patent_service;

pub use patent_service::PatentService;
