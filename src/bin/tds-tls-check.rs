use tdscheck::{Variant, cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    cli::start(Variant::Tls).await
}
