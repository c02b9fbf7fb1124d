pub mod admin_gate;
pub mod logout;
pub mod revocation;
pub mod session;
