use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the billing server.
///
/// Holds the bind address, worker count, CORS origin, logging preferences,
/// the location of the plan catalog and the Stripe credentials used by the
/// plan-selection page.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// File the logger appends to.
    pub log_file: String,
    /// Path of the JSON plan catalog loaded at startup.
    pub plan_catalog_path: String,
    /// Stripe configuration.
    pub stripe: StripeConfig,
}

#[derive(Clone, Debug)]
/// Keys and endpoint used to talk to Stripe.
///
/// The publishable key is handed to the page (hidden `id_stripe_pk` field) and
/// is the only key used for card tokenization. The secret key is optional and
/// only used server-side to look submitted tokens up.
pub struct StripeConfig {
    /// Publishable key, safe to expose to the browser.
    pub publishable_key: String,
    /// Secret key. Empty when token verification is disabled.
    pub secret_key: String,
    /// Base URL of the Stripe REST API.
    pub api_base: String,
}

impl StripeConfig {
    /// Creates a new `StripeConfig` from environment variables.
    ///
    /// - `STRIPE_PUBLISHABLE_KEY`: Optional. Defaults to an empty string.
    /// - `STRIPE_SECRET_KEY`: Optional. Defaults to an empty string.
    /// - `STRIPE_API_BASE`: Optional. Defaults to `https://api.stripe.com`.
    ///
    /// # Panics
    ///
    /// Panics if `STRIPE_API_BASE` is set to something that is not a URL.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base = env::var("STRIPE_API_BASE")
            .unwrap_or_else(|_| "https://api.stripe.com".to_string());
        url::Url::parse(&api_base).expect("STRIPE_API_BASE must be a valid URL");

        StripeConfig {
            publishable_key: env::var("STRIPE_PUBLISHABLE_KEY").unwrap_or_default(),
            secret_key: env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Whether submitted tokens can be verified against Stripe.
    pub fn can_verify_tokens(&self) -> bool {
        !self.secret_key.is_empty()
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `PLAN_CATALOG_PATH`: JSON file mapping plan id to plan terms
    ///
    /// Optional (with defaults):
    /// - `ENVIRONMENT`: "development" or "production" (default: "development")
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `LOG_FILE`: Log file path (default: "billing.log")
    /// - Stripe settings (see [`StripeConfig::from_env`])
    ///
    /// # Panics
    ///
    /// This function will panic if required environment variables are missing.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "billing.log".to_string()),
            plan_catalog_path: env::var("PLAN_CATALOG_PATH")
                .expect("PLAN_CATALOG_PATH must be set"),
            stripe: StripeConfig::from_env(),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
