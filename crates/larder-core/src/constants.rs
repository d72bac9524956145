// ABOUTME: Constants grouped by domain for the Larder engine
// ABOUTME: Upstream API paths, result limits, environment variable names and labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than living at the top level.

/// Upstream recipe API constants
pub mod api {
    /// Provider name used in logs and error messages
    pub const PROVIDER_NAME: &str = "spoonacular";

    /// Default base URL of the upstream recipe API
    pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

    /// Query parameter carrying the API key on every request
    pub const API_KEY_PARAM: &str = "apiKey";

    /// Ingredient autocomplete endpoint
    pub const AUTOCOMPLETE_PATH: &str = "/food/ingredients/autocomplete";

    /// Recipe search by ingredients endpoint
    pub const FIND_BY_INGREDIENTS_PATH: &str = "/recipes/findByIngredients";

    /// Analyzed instructions endpoint, `{id}` is substituted with the recipe id
    pub const INSTRUCTIONS_PATH: &str = "/recipes/{id}/analyzedInstructions";

    /// Ingredient information (pricing) endpoint, `{id}` is the ingredient id
    pub const INGREDIENT_INFORMATION_PATH: &str = "/food/ingredients/{id}/information";
}

/// Result sizes and bounds
pub mod limits {
    /// Number of recipes fetched per search
    pub const RECIPE_BATCH_SIZE: u32 = 30;

    /// Number of autocomplete suggestions requested per keystroke query
    pub const AUTOCOMPLETE_LIMIT: u32 = 8;

    /// Largest `number` the upstream API accepts
    pub const MAX_UPSTREAM_RESULTS: u32 = 100;

    /// Default cap on concurrently held server sessions
    pub const DEFAULT_MAX_SESSIONS: usize = 1024;

    /// Default request timeout in seconds
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

    /// Default connection timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Default HTTP port of the session server
    pub const DEFAULT_HTTP_PORT: u16 = 8051;
}

/// Environment variable names
pub mod env_vars {
    /// API key for the upstream recipe API (required)
    pub const API_KEY: &str = "LARDER_API_KEY";
    /// Base URL override for the upstream recipe API
    pub const API_BASE_URL: &str = "LARDER_API_BASE_URL";
    /// Request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "LARDER_HTTP_TIMEOUT_SECS";
    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: &str = "LARDER_CONNECT_TIMEOUT_SECS";
    /// Recipes per search
    pub const RECIPE_BATCH_SIZE: &str = "LARDER_RECIPE_BATCH_SIZE";
    /// Autocomplete suggestions per query
    pub const AUTOCOMPLETE_LIMIT: &str = "LARDER_AUTOCOMPLETE_LIMIT";
    /// Bind host of the session server
    pub const HOST: &str = "LARDER_HOST";
    /// Port of the session server
    pub const HTTP_PORT: &str = "LARDER_HTTP_PORT";
    /// Session registry capacity
    pub const MAX_SESSIONS: &str = "LARDER_MAX_SESSIONS";
    /// Location of the CLI cart file
    pub const CART_PATH: &str = "LARDER_CART_PATH";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Session server service name
    pub const LARDER_SERVER: &str = "larder-server";
    /// Interactive client service name
    pub const LARDER_CLI: &str = "larder-cli";
}

/// Display labels and column names
pub mod labels {
    /// Name column value of the synthetic cart total row
    pub const TOTAL_ROW_NAME: &str = "Total";

    /// Columns kept in the cart table projection, in display order
    pub const CART_COLUMNS: [&str; 3] = ["name", "aisle", "cost"];
}
