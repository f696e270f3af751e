use auth::{api, service::credentials::DemoCredentialService};
use common::error::HeResult;

/// Port the auth API server binds to when `AUTH_API_PORT` is not set
const DEFAULT_PORT: u16 = 8080;

/// Port for the auth API server, read from the `AUTH_API_PORT` environment variable
fn api_port() -> HeResult<u16> {
    match std::env::var("AUTH_API_PORT") {
        Ok(port) => Ok(port.parse()?),
        Err(std::env::VarError::NotPresent) => Ok(DEFAULT_PORT),
        Err(error) => Err(error.into()),
    }
}

#[tokio::main]
async fn main() -> HeResult<()> {
    log4rs::init_file("auth/auth_api_server_log.yml", Default::default()).unwrap();
    let credentials_service = DemoCredentialService::demo();
    api::spawn_api_server(credentials_service, ("127.0.0.1", api_port()?)).await?;
    Ok(())
}
