use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) =
        xcodepatch_cli::main(std::env::args().collect::<Vec<String>>().as_slice()).await
    {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
