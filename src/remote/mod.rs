//! Clients for the remote catalog backend.
//!
//! - `storage`: the object-storage bucket (upload / list / bulk remove)
//! - `table`: the tabular REST endpoint (partial updates and reads)
//!
//! Both are thin wrappers over a blocking HTTP client: one call per request,
//! no retries, no timeouts beyond the client's defaults. A failed request is
//! reported by the caller and the batch moves on.

pub mod storage;
pub mod table;
