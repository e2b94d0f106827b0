// Route exports
pub mod matching;

use crate::error::{handle_json_payload_error, handle_path_error};
use actix_web::web;

pub use matching::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::PathConfig::default().error_handler(handle_path_error))
        .service(web::scope("/api/matching").configure(matching::configure));
}
