pub mod env;
pub mod error;
pub mod handlers;
pub mod location;
pub mod result;
pub mod router;

use std::{net::SocketAddr, time::Duration};

use anyhow::Result;
use axum_server::{Handle, tls_rustls::RustlsConfig};
pub use env::Env;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub async fn run(env: Env) -> Result<JoinHandle<()>> {
    let addr = SocketAddr::from(([127, 0, 0, 1], env.config.api_port));
    let handle = Handle::new();
    tokio::spawn({
        let handle = handle.clone();
        let cancel_token = env.cancel_token.clone();
        async move {
            cancel_token.cancelled().await;
            handle.graceful_shutdown(Some(Duration::from_secs(10)));
        }
    });
    if env.config.should_use_tls() {
        let tls_config = RustlsConfig::from_pem_file(
            env.config.data_dir.join("cert.pem"),
            env.config.data_dir.join("key.pem"),
        )
        .await?;
        info!("API server running @ https://{}", addr);
        let router = router::new(env);
        Ok(tokio::spawn(async move {
            if axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(router.into_make_service())
                .await
                .is_err()
            {
                error!("Server error");
            }
            info!("Exited");
        }))
    } else {
        info!("API server running @ http://{}", addr);
        let router = router::new(env);
        Ok(tokio::spawn(async move {
            if axum_server::bind(addr)
                .handle(handle)
                .serve(router.into_make_service())
                .await
                .is_err()
            {
                error!("Server error");
            }
            info!("Exited");
        }))
    }
}
