//! API endpoint resolution.

/// Endpoint used when neither an argument nor the environment names one.
pub const DEFAULT_API_ENDPOINT: &str = "https://eu-central.api.formwork.dev";

/// Environment variable consulted first.
pub const API_ENDPOINT_ENV: &str = "FORMWORK_API_ENDPOINT";

/// Fallback environment variable, for build systems that only expose
/// public-prefixed variables to the client bundle.
pub const PUBLIC_API_ENDPOINT_ENV: &str = "FORMWORK_PUBLIC_API_ENDPOINT";

/// Resolves the API endpoint: explicit argument, then environment
/// variables, then the hardcoded default. Empty values are ignored.
pub fn api_endpoint(provided: Option<&str>) -> String {
    provided
        .map(str::to_string)
        .filter(|s| !s.is_empty())
        .or_else(|| env_endpoint(API_ENDPOINT_ENV))
        .or_else(|| env_endpoint(PUBLIC_API_ENDPOINT_ENV))
        .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string())
}

fn env_endpoint(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}
