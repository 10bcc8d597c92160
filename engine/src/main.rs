#![deny(warnings)]
#![deny(rust_2018_idioms)]

use engine::{App, Settings};
use tracing::error;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = Settings::new().unwrap();
    let app = App::build(&settings).unwrap();

    if let Err(e) = app.run().await {
        error!("calculation failed: {e:?}");
        std::process::exit(1);
    }
}
