pub mod http;
pub mod rate_limit_middleware;
