// Verification module - Trust sources, verdict aggregation and batch orchestration

pub mod checker;
pub mod crtsh;
pub mod http;
pub mod root_list;
pub mod status;
pub mod verifier;

pub use checker::Checker;
pub use crtsh::CertificateTransparencyChecker;
pub use http::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use root_list::TrustedRootListChecker;
pub use status::VerificationStatus;
pub use verifier::{
    CertificateVerifier, CheckerResults, ProgressSink, SilentProgress, VerificationObserver,
    VerificationResults,
};
