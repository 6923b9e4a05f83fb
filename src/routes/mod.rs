// Route exports
pub mod icebreakers;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(icebreakers::configure);
}
