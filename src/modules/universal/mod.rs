//! Módulos independientes de proveedor cloud.
pub mod echo;
pub mod local_secrets;
