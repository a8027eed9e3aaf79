use std::sync::Arc;
use tokio::sync::Mutex;

use crate::feed::FeedClient;
use crate::tracker::Tracker;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Arc<FeedClient>,
    pub tracker: Arc<Mutex<Tracker>>,
}
