//! Security subsystem.
//!
//! Request body size is capped in the server setup; this module owns the
//! response-side hardening.

pub mod headers;
