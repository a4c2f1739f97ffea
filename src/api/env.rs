use tokio_util::sync::CancellationToken;

use crate::{config::Config, sequence::Registry, store};

#[derive(Clone)]
pub struct Env {
    pub config: Config,
    pub cancel_token: CancellationToken,
    pub reader: store::Reader,
    pub registry: Registry,
}
