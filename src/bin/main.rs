#[tokio::main]
async fn main() -> vetclinic::Result<()> {
    vetclinic::cli::main().await
}
