use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    reposcan::app::startup::run().await
}
