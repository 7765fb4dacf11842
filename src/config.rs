#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub admin_password_hash: String,
    pub storage_url: String,
    pub storage_bucket: String,
    pub storage_service_key: String,
    pub contact_inbox: String,
    pub frontend_url: String,
    pub port: u16,
}

impl Config {

    /// Read every required variable up front so a missing one kills the
    /// process at startup instead of surfacing as a 500 later.
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let redis_url = std::env::var("REDIS_URL").expect("REDIS_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");
        let jwt_maxage = std::env::var("JWT_MAXAGE").expect("JWT_MAXAGE must be set");
        let admin_password_hash =
            std::env::var("ADMIN_PASSWORD_HASH").expect("ADMIN_PASSWORD_HASH must be set");
        let storage_url = std::env::var("STORAGE_URL").expect("STORAGE_URL must be set");
        let storage_bucket = std::env::var("STORAGE_BUCKET").expect("STORAGE_BUCKET must be set");
        let storage_service_key =
            std::env::var("STORAGE_SERVICE_KEY").expect("STORAGE_SERVICE_KEY must be set");
        let contact_inbox = std::env::var("CONTACT_INBOX").expect("CONTACT_INBOX must be set");
        let frontend_url = std::env::var("FRONTEND_URL").expect("FRONTEND_URL must be set");

        Config {
            database_url,
            redis_url,
            jwt_secret,
            jwt_maxage: jwt_maxage.parse::<i64>().expect("JWT_MAXAGE must be a number"),
            admin_password_hash,
            storage_url,
            storage_bucket,
            storage_service_key,
            contact_inbox,
            frontend_url,
            port: 8000,
        }
    }

}
