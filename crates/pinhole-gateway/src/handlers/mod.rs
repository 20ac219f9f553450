mod health;
mod redirect;
mod url;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use url::{
    batch_create_handler, create_url_handler, get_url_handler, list_urls_handler, stats_handler,
};
