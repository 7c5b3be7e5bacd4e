#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    till_rs::run().await
}
