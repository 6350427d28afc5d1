// Certificates module - Certificate parsing, bundle loading and filtering

pub mod bundle;
pub mod filter;
pub mod parser;

pub use filter::CertificateFilter;
pub use parser::Certificate;
