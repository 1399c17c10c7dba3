pub mod bio;
pub mod blast;
pub mod cli;
pub mod core;
pub mod error;
pub mod ncbi;
pub mod query;
pub mod transport;

pub use crate::blast::{BlastClient, BlastJob, BlastReport, JobStatus, PollPolicy};
pub use crate::error::{Result, SeqseekError};
pub use crate::ncbi::{EutilsClient, LookupResult};
pub use crate::query::{BlastProgram, BlastRequest, IdList, QueryParams, SearchRequest};
pub use crate::transport::{HttpResponse, ReqwestTransport, Transport};
