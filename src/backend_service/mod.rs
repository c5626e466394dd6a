//! Backend service - the upstream data provider the gateway forwards to

pub mod routes;
