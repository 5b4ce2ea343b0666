use std::sync::Mutex;

use actix_web::web::Data;
use thought_network::db::DB;

/// Builds the full app over `$db`, a `Data<Mutex<DB>>` the test keeps a
/// handle to.
macro_rules! init_app {
    ($db:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($db.clone())
                .configure(thought_network::routes::configure)
                .default_service(actix_web::web::to(thought_network::routes::default_handler)),
        )
        .await
    };
}

pub fn new_db() -> Data<Mutex<DB>> {
    Data::new(Mutex::new(DB::in_memory()))
}
