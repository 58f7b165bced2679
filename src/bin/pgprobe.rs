use pgprobe::cli::start;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    start::start().await
}
