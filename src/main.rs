#[tokio::main]
async fn main() {
    if let Err(e) = docfill_lib::run().await {
        eprintln!("docfill: {e}");
        std::process::exit(1);
    }
}
