// Fixed Texie Cloud endpoints. The service lives on a single host.

pub const HOST: &str = "http://gw-q201.fit.vutbr.cz:8081";

pub const TOKEN_PATH: &str = "/api/v1/oauth/token/";
pub const REVOKE_PATH: &str = "/api/v1/oauth/revoke_token/";
pub const ANNOTATIONS_PATH: &str = "/api/v1/annotations/";

/// Absolute URL for a path on the service host. Plain concatenation.
pub fn url(path: &str) -> String {
    format!("{}{}", HOST, path)
}
