use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    // Admin API bearer token (optional — unset disables auth, dev mode)
    pub admin_token: Option<String>,

    // External file-hosting service (optional — unset records local URLs)
    pub storage_base_url: Option<String>,

    // Storefront listing
    pub storefront_page_size: u32,

    // Document uploads
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            admin_token: env::var("API_TOKEN").ok().filter(|t| !t.is_empty()),
            storage_base_url: env::var("STORAGE_BASE_URL").ok().filter(|u| !u.is_empty()),

            storefront_page_size: env::var("STOREFRONT_PAGE_SIZE")
                .unwrap_or_else(|_| "12".into())
                .parse()
                .unwrap_or(12),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| "10485760".into())
                .parse()
                .unwrap_or(10 * 1024 * 1024),
        })
    }
}
