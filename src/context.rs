use std::sync::Arc;

use crate::{config::RunConfiguration, hiscores::Hiscores};

pub struct Context {
    pub config: Arc<RunConfiguration>,
    pub hiscores: Arc<dyn Hiscores>,
}
