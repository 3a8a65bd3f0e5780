//! Authentication for the Content Management API
//!
//! The API uses personal access tokens; `cma auth login` stores one in the
//! global config file.

pub mod credentials;
