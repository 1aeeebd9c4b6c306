//! Article generator server binary.
//! Run with: cargo run --bin article-server

use std::process::ExitCode;

use article_generator::start_article_server;

fn main() -> ExitCode {
    start_article_server::run()
}
