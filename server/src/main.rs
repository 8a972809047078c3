#[tokio::main]
async fn main() -> Result<(), quill_server::error::AppError> {
    quill_server::start_server().await
}
