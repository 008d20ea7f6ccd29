//! # schemaforge Conformance
//!
//! Rust bindings generated at build time from `schema/api.json`.
//!
//! The top-level modules preserve unknown union tags and carry the
//! hand-maintained fragments registered in `build.rs`. The [`strict`]
//! modules are generated from the same schema with unknown tags rejected.

/// Shared types.
pub mod common {
    include!(concat!(env!("OUT_DIR"), "/lenient/common.rs"));
}

/// Errors returned by the service.
pub mod errors {
    include!(concat!(env!("OUT_DIR"), "/lenient/errors.rs"));
    include!(concat!(env!("OUT_DIR"), "/lenient/errors/retry_hints.rs"));
}

/// Accounts and sessions.
pub mod accounts {
    include!(concat!(env!("OUT_DIR"), "/lenient/accounts.rs"));
}

/// Bindings that reject unknown union tags when decoding.
pub mod strict {
    /// Shared types.
    pub mod common {
        include!(concat!(env!("OUT_DIR"), "/strict/common.rs"));
    }

    /// Errors returned by the service.
    pub mod errors {
        include!(concat!(env!("OUT_DIR"), "/strict/errors.rs"));
    }

    /// Accounts and sessions.
    pub mod accounts {
        include!(concat!(env!("OUT_DIR"), "/strict/accounts.rs"));
    }
}
