/// API path prefix
pub const API_PREFIX: &str = "/v1";

/// Path on the upstream catalog host serving the full chain list
pub const CATALOG_PATH: &str = "/v1/chains";

/// Upstream catalog hosts per environment
pub const CATALOG_HOST_PROD: &str = "https://api.chainlist.org";
pub const CATALOG_HOST_DEV: &str = "https://api.chainlist-dev.org";

/// Hostname suffixes for managed RPC endpoints. URLs pointing at the
/// production suffix are rewritten to the development one when the daemon
/// runs against the development environment.
pub const RPC_HOST_SUFFIX_PROD: &str = "rpc.chainlist.org";
pub const RPC_HOST_SUFFIX_DEV: &str = "rpc.chainlist-dev.org";

/// Placeholder in endpoint URL templates substituted with the client id
pub const CLIENT_ID_PLACEHOLDER: &str = "${CLIENT_ID}";

/// Client hint header carrying the viewport width, used to pick a default
/// view mode when the request does not ask for one explicitly
pub const VIEWPORT_WIDTH_HEADER: &str = "sec-ch-viewport-width";
