//! Request middleware: the page authorization gateway, role checks, and
//! request logging.

pub mod gateway;
pub mod logging;
pub mod rbac;
