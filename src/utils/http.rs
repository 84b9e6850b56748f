use reqwest::Client;

pub const DEFAULT_USER_AGENT: &str = concat!("FlyHiBot/", env!("CARGO_PKG_VERSION"));

pub fn build_client(builder: reqwest::ClientBuilder) -> Result<Client, reqwest::Error> {
    builder.user_agent(DEFAULT_USER_AGENT).build()
}
